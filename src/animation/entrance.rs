//! One-shot entrance transition from an "off" offset to the rest pose.

use serde::{Deserialize, Serialize};

use crate::animation::easing::Easing;
use crate::animation::pose::Pose;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    /// Offset from the rest pose at the start of the transition.
    pub from: Pose,
    /// Seconds between activation and the start of motion.
    pub delay: f32,
    /// Seconds from start to rest.
    pub duration: f32,
    pub easing: Easing,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            from: Pose::ZERO,
            delay: 0.0,
            duration: 1.0,
            easing: Easing::EaseOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntranceSample {
    pub offset: Pose,
    /// Eased progress in `[0, 1]`.
    pub progress: f32,
    pub finished: bool,
}

impl EntranceConfig {
    /// Samples the transition `since` seconds after activation.
    pub fn sample(&self, since: f32) -> EntranceSample {
        let local = since - self.delay;
        let linear = if self.duration <= 0.0 {
            if local >= 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            (local / self.duration).clamp(0.0, 1.0)
        };

        let progress = self.easing.evaluate(linear);

        EntranceSample {
            offset: self.from * (1.0 - progress),
            progress,
            finished: linear >= 1.0,
        }
    }
}
