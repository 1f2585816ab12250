//! Per-object animation driver.
//!
//! Combines the entrance, sway, tilt and bob channels into one additive
//! offset from the object's rest pose. The activation flag is edge
//! triggered: the entrance starts on every false -> true transition and is
//! never restarted while the flag stays true.

use anyhow::bail;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::animation::channels::{
    Fields, FloatBob, IdleSway, Oscillation, PointerTilt, SwayConfig, TiltConfig,
};
use crate::animation::entrance::EntranceConfig;
use crate::animation::pose::{Pose, TransformDelta};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Inactive,
    Entering,
    Idle,
    Hovering,
}

/// Inputs sampled once per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Clock time in seconds.
    pub time: f32,
    /// Pointer in normalized device coordinates, roughly `[-1, 1]` per axis.
    pub pointer: Vec2,
    pub active: bool,
    pub hovering: bool,
}

/// Channels enabled on a driver. Absent tables disable the channel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub entrance: Option<EntranceConfig>,
    pub sway: Option<SwayConfig>,
    pub tilt: Option<TiltConfig>,
    pub bob: Option<Oscillation>,
}

#[derive(Debug, Clone)]
pub struct AnimatedObjectDriver {
    entrance: Option<EntranceConfig>,
    sway: Option<IdleSway>,
    tilt: Option<PointerTilt>,
    bob: Option<FloatBob>,
    state: DriverState,
    was_active: bool,
    activated_at: f32,
    entrance_count: u32,
    last_delta: TransformDelta,
}

impl AnimatedObjectDriver {
    /// Builds a driver, rejecting configurations where two continuous
    /// channels claim the same transform field.
    pub fn new(config: &DriverConfig) -> anyhow::Result<Self> {
        let sway = config.sway.map(IdleSway::new);
        let tilt = config.tilt.map(PointerTilt::new);
        let bob = config.bob.map(FloatBob::new);

        let claims = [
            ("sway", sway.as_ref().map(IdleSway::fields)),
            ("tilt", tilt.as_ref().map(PointerTilt::fields)),
            ("bob", bob.as_ref().map(FloatBob::fields)),
        ];

        let mut owned = Fields::NONE;
        for (channel, fields) in claims {
            let Some(fields) = fields else { continue };
            let overlap = owned.intersection(fields);
            if !overlap.is_empty() {
                bail!("{channel} channel claims {overlap}, which is already driven by another channel");
            }
            owned = owned.union(fields);
        }

        let last_delta = config.entrance.map(|entrance| entrance.from).unwrap_or_default();

        Ok(Self {
            entrance: config.entrance,
            sway,
            tilt,
            bob,
            state: DriverState::Inactive,
            was_active: false,
            activated_at: 0.0,
            entrance_count: 0,
            last_delta,
        })
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Number of entrance transitions started so far.
    #[cfg(test)]
    pub fn entrance_count(&self) -> u32 {
        self.entrance_count
    }

    #[cfg(test)]
    pub fn last_delta(&self) -> TransformDelta {
        self.last_delta
    }

    /// Seconds since the current activation, or `None` while inactive.
    #[cfg(test)]
    pub fn active_time(&self, time: f32) -> Option<f32> {
        self.was_active
            .then(|| (time - self.activated_at).max(0.0))
    }

    fn resting_state(hovering: bool) -> DriverState {
        if hovering {
            DriverState::Hovering
        } else {
            DriverState::Idle
        }
    }

    pub fn advance(&mut self, input: &FrameInput) -> TransformDelta {
        if !input.active {
            if self.was_active {
                log::debug!("Driver deactivated at {:.2}s", input.time);
                self.state = DriverState::Inactive;
                self.was_active = false;
            }
            // Motion freezes where it was.
            return self.last_delta;
        }

        if !self.was_active {
            self.was_active = true;
            self.activated_at = input.time;

            if self.entrance.is_some() {
                self.state = DriverState::Entering;
                self.entrance_count += 1;
                log::debug!(
                    "Entrance #{} started at {:.2}s",
                    self.entrance_count,
                    input.time
                );
            } else {
                self.state = Self::resting_state(input.hovering);
            }
        }

        let t = (input.time - self.activated_at).max(0.0);
        let mut delta = Pose::ZERO;

        match (self.state, self.entrance) {
            (DriverState::Entering, Some(entrance)) => {
                let sample = entrance.sample(t);
                delta = delta + sample.offset;
                if sample.finished {
                    self.state = Self::resting_state(input.hovering);
                }
            }
            _ => self.state = Self::resting_state(input.hovering),
        }

        if let Some(sway) = &mut self.sway {
            delta.rotation.y += sway.update(t, input.hovering);
        }

        if let Some(tilt) = &mut self.tilt {
            let rotation = tilt.update(input.pointer);
            delta.rotation.x += rotation.x;
            delta.rotation.y += rotation.y;
        }

        if let Some(bob) = &self.bob {
            delta.position.y += bob.sample(t);
        }

        self.last_delta = delta;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::easing::Easing;
    use crate::animation::channels::PointerAxes;
    use glam::Vec3;

    const FRAME: f32 = 1.0 / 60.0;

    fn entrance() -> EntranceConfig {
        EntranceConfig {
            from: Pose::new(Vec3::new(0.0, -2.0, 0.0), Vec3::ZERO),
            delay: 0.0,
            duration: 1.0,
            easing: Easing::EaseOut,
        }
    }

    fn board_config() -> DriverConfig {
        DriverConfig {
            entrance: Some(entrance()),
            sway: Some(SwayConfig::default()),
            tilt: None,
            bob: None,
        }
    }

    fn frame(time: f32, active: bool) -> FrameInput {
        FrameInput {
            time,
            active,
            ..FrameInput::default()
        }
    }

    #[test]
    fn test_reports_off_pose_before_activation() {
        let mut driver = AnimatedObjectDriver::new(&board_config()).unwrap();
        let delta = driver.advance(&frame(0.0, false));
        assert_eq!(delta.position, Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(driver.state(), DriverState::Inactive);
        assert_eq!(driver.entrance_count(), 0);
    }

    #[test]
    fn test_entrance_fires_once_per_rising_edge() {
        let mut driver = AnimatedObjectDriver::new(&board_config()).unwrap();

        let mut time = 0.0;
        for _ in 0..300 {
            driver.advance(&frame(time, true));
            time += FRAME;
        }
        assert_eq!(driver.entrance_count(), 1);
        assert_eq!(driver.state(), DriverState::Idle);

        driver.advance(&frame(time, false));
        assert_eq!(driver.state(), DriverState::Inactive);

        time += FRAME;
        driver.advance(&frame(time, true));
        assert_eq!(driver.entrance_count(), 2);
        assert_eq!(driver.state(), DriverState::Entering);

        for _ in 0..10 {
            time += FRAME;
            driver.advance(&frame(time, true));
        }
        assert_eq!(driver.entrance_count(), 2);
    }

    #[test]
    fn test_entrance_moves_to_rest() {
        let config = DriverConfig {
            entrance: Some(entrance()),
            ..DriverConfig::default()
        };
        let mut driver = AnimatedObjectDriver::new(&config).unwrap();

        let start = driver.advance(&frame(5.0, true));
        assert!((start.position.y - -2.0).abs() < 1e-6);

        let middle = driver.advance(&frame(5.5, true));
        assert!(middle.position.y > -2.0 && middle.position.y < 0.0);
        assert_eq!(driver.state(), DriverState::Entering);

        let end = driver.advance(&frame(6.0, true));
        assert!(end.position.y.abs() < 1e-6);
        assert_eq!(driver.state(), DriverState::Idle);
    }

    #[test]
    fn test_board_sway_four_seconds_after_activation() {
        let mut driver = AnimatedObjectDriver::new(&board_config()).unwrap();
        let t0 = 12.0;

        for step in 0..=240 {
            driver.advance(&frame(t0 + step as f32 * FRAME, true));
        }

        let yaw = driver.last_delta().rotation.y;
        // Smoothing lags the raw 0.2 * sin(0.5) by a few thousandths.
        assert!((yaw - 0.0958).abs() < 0.01, "yaw was {yaw}");
        assert!(yaw < 0.0958);
    }

    #[test]
    fn test_hover_state_is_reversible() {
        let config = DriverConfig {
            sway: Some(SwayConfig::default()),
            ..DriverConfig::default()
        };
        let mut driver = AnimatedObjectDriver::new(&config).unwrap();

        driver.advance(&frame(0.0, true));
        assert_eq!(driver.state(), DriverState::Idle);

        driver.advance(&FrameInput {
            hovering: true,
            ..frame(FRAME, true)
        });
        assert_eq!(driver.state(), DriverState::Hovering);

        driver.advance(&frame(2.0 * FRAME, true));
        assert_eq!(driver.state(), DriverState::Idle);
    }

    #[test]
    fn test_inactive_freezes_last_delta() {
        let mut driver = AnimatedObjectDriver::new(&board_config()).unwrap();
        let mut time = 0.0;
        for _ in 0..120 {
            driver.advance(&frame(time, true));
            time += FRAME;
        }
        let frozen = driver.last_delta();

        for _ in 0..30 {
            time += FRAME;
            assert_eq!(driver.advance(&frame(time, false)), frozen);
        }
    }

    #[test]
    fn test_channels_combine_additively() {
        let config = DriverConfig {
            entrance: None,
            sway: Some(SwayConfig::default()),
            tilt: Some(TiltConfig {
                axes: PointerAxes::Pitch,
                smoothing: 1.0,
                ..TiltConfig::default()
            }),
            bob: Some(Oscillation::new(2.0, 0.05)),
        };
        let mut driver = AnimatedObjectDriver::new(&config).unwrap();

        driver.advance(&frame(0.0, true));
        let delta = driver.advance(&FrameInput {
            time: 3.0,
            pointer: Vec2::new(0.0, 1.0),
            active: true,
            hovering: false,
        });

        assert!((delta.rotation.x - 0.2).abs() < 1e-6);
        assert!((delta.position.y - 0.05 * 1.5f32.sin()).abs() < 1e-6);
        assert!(delta.rotation.y > 0.0);
    }

    #[test]
    fn test_rejects_overlapping_channels() {
        let config = DriverConfig {
            sway: Some(SwayConfig::default()),
            tilt: Some(TiltConfig::default()),
            ..DriverConfig::default()
        };
        let error = AnimatedObjectDriver::new(&config).unwrap_err();
        assert!(error.to_string().contains("rotation.y"));

        let split = DriverConfig {
            tilt: Some(TiltConfig {
                axes: PointerAxes::Pitch,
                ..TiltConfig::default()
            }),
            ..config
        };
        assert!(AnimatedObjectDriver::new(&split).is_ok());
    }

    #[test]
    fn test_active_time() {
        let mut driver = AnimatedObjectDriver::new(&DriverConfig::default()).unwrap();
        assert_eq!(driver.active_time(1.0), None);
        driver.advance(&frame(1.0, true));
        assert_eq!(driver.active_time(3.5), Some(2.5));
    }
}
