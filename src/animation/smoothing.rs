//! Per-frame exponential smoothing.
//!
//! Each step moves the current value a fixed fraction of the remaining
//! distance toward the target: `current += (target - current) * factor`.
//! The factor is applied per rendered frame, not per second.

use glam::{Vec2, Vec3};

/// Values that can be linearly interpolated.
pub trait Interpolate: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Vec2 {
    fn lerp(self, other: Self, t: f32) -> Self {
        Vec2::lerp(self, other, t)
    }
}

impl Interpolate for Vec3 {
    fn lerp(self, other: Self, t: f32) -> Self {
        Vec3::lerp(self, other, t)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Smoothed<T: Interpolate> {
    current: T,
    target: T,
    factor: f32,
}

impl<T: Interpolate> Smoothed<T> {
    /// `factor` is clamped to `[0, 1]`; 1 snaps, 0 never moves.
    pub fn new(initial: T, factor: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            factor: factor.clamp(0.0, 1.0),
        }
    }

    pub fn set_target(&mut self, target: T) {
        self.target = target;
    }

    /// Advances one frame and returns the new current value.
    pub fn step(&mut self) -> T {
        self.current = self.current.lerp(self.target, self.factor);
        self.current
    }

    /// Sets the target and advances one frame.
    pub fn step_toward(&mut self, target: T) -> T {
        self.set_target(target);
        self.step()
    }

    pub fn current(&self) -> T {
        self.current
    }

    #[cfg(test)]
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Jumps straight to `value` and makes it the target.
    #[cfg(test)]
    pub fn snap(&mut self, value: T) {
        self.current = value;
        self.target = value;
    }
}
