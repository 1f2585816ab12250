//! Continuous animation channels.
//!
//! Every channel is a function of the seconds elapsed since activation (and,
//! for the smoothed ones, of its own smoothing state). Channels produce
//! offsets from the rest pose and never read the transform back.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::animation::smoothing::Smoothed;

/// Transform fields a channel can claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fields(u8);

impl Fields {
    pub const NONE: Fields = Fields(0);
    pub const POSITION_Y: Fields = Fields(1 << 0);
    pub const ROTATION_X: Fields = Fields(1 << 1);
    pub const ROTATION_Y: Fields = Fields(1 << 2);

    pub fn union(self, other: Fields) -> Fields {
        Fields(self.0 | other.0)
    }

    pub fn intersection(self, other: Fields) -> Fields {
        Fields(self.0 & other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Fields::POSITION_Y, "position.y"),
            (Fields::ROTATION_X, "rotation.x"),
            (Fields::ROTATION_Y, "rotation.y"),
        ];
        let claimed: Vec<&str> = names
            .iter()
            .filter(|(field, _)| !self.intersection(*field).is_empty())
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", claimed.join(", "))
    }
}

/// `sin(t / period) * amplitude`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    pub period: f32,
    pub amplitude: f32,
}

impl Oscillation {
    pub const fn new(period: f32, amplitude: f32) -> Self {
        Self { period, amplitude }
    }

    pub fn sample(&self, t: f32) -> f32 {
        if self.period == 0.0 {
            return 0.0;
        }
        (t / self.period).sin() * self.amplitude
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwayConfig {
    pub resting: Oscillation,
    pub hovering: Oscillation,
    pub smoothing: f32,
}

impl Default for SwayConfig {
    fn default() -> Self {
        Self {
            resting: Oscillation::new(8.0, 0.2),
            hovering: Oscillation::new(4.0, 0.5),
            smoothing: 0.1,
        }
    }
}

/// Yaw oscillation that blends between a resting and a hovering sweep.
#[derive(Debug, Clone)]
pub struct IdleSway {
    config: SwayConfig,
    yaw: Smoothed<f32>,
}

impl IdleSway {
    pub fn new(config: SwayConfig) -> Self {
        Self {
            yaw: Smoothed::new(0.0, config.smoothing),
            config,
        }
    }

    pub fn fields(&self) -> Fields {
        Fields::ROTATION_Y
    }

    /// Unsmoothed yaw the channel is heading toward.
    pub fn target(&self, t: f32, hovering: bool) -> f32 {
        if hovering {
            self.config.hovering.sample(t)
        } else {
            self.config.resting.sample(t)
        }
    }

    /// Advances one frame and returns the smoothed yaw.
    pub fn update(&mut self, t: f32, hovering: bool) -> f32 {
        let target = self.target(t, hovering);
        self.yaw.step_toward(target)
    }

    #[cfg(test)]
    pub fn current(&self) -> f32 {
        self.yaw.current()
    }
}

/// Which rotation axes follow the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerAxes {
    #[default]
    Both,
    /// rotation.x only
    Pitch,
    /// rotation.y only
    Yaw,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    pub scale: f32,
    pub smoothing: f32,
    pub axes: PointerAxes,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            scale: 0.2,
            smoothing: 0.1,
            axes: PointerAxes::Both,
        }
    }
}

/// Rotation nudged toward the normalized pointer position.
#[derive(Debug, Clone)]
pub struct PointerTilt {
    config: TiltConfig,
    tilt: Smoothed<Vec2>,
}

impl PointerTilt {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            tilt: Smoothed::new(Vec2::ZERO, config.smoothing),
            config,
        }
    }

    pub fn fields(&self) -> Fields {
        match self.config.axes {
            PointerAxes::Both => Fields::ROTATION_X.union(Fields::ROTATION_Y),
            PointerAxes::Pitch => Fields::ROTATION_X,
            PointerAxes::Yaw => Fields::ROTATION_Y,
        }
    }

    /// Advances one frame. Returns `(rotation.x, rotation.y)`; axes the
    /// channel does not own are always zero.
    pub fn update(&mut self, pointer: Vec2) -> Vec2 {
        let pointer = pointer.clamp(Vec2::NEG_ONE, Vec2::ONE);
        let target = Vec2::new(pointer.y, pointer.x) * self.config.scale;
        let target = match self.config.axes {
            PointerAxes::Both => target,
            PointerAxes::Pitch => Vec2::new(target.x, 0.0),
            PointerAxes::Yaw => Vec2::new(0.0, target.y),
        };
        self.tilt.step_toward(target)
    }

    #[cfg(test)]
    pub fn current(&self) -> Vec2 {
        self.tilt.current()
    }
}

/// Vertical bob as an absolute offset from the base height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatBob {
    oscillation: Oscillation,
}

impl FloatBob {
    pub fn new(oscillation: Oscillation) -> Self {
        Self { oscillation }
    }

    pub fn fields(&self) -> Fields {
        Fields::POSITION_Y
    }

    /// Offset to add to the base y at time `t`.
    pub fn sample(&self, t: f32) -> f32 {
        self.oscillation.sample(t)
    }

    /// Absolute height for a given base.
    #[cfg(test)]
    pub fn height(&self, base_y: f32, t: f32) -> f32 {
        base_y + self.sample(t)
    }
}
