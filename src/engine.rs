use std::time::Duration;

use crate::showcase::ShowcaseState;

/// Smoothing factors are applied once per frame, so the host must not
/// redraw faster than this.
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// One frame: clear change flags, animate, then propagate world matrices.
pub fn update(state: &mut ShowcaseState, now: Duration) -> anyhow::Result<()> {
    state.scene.early_update();
    state.update(now);
    state.scene.late_update();

    Ok(())
}

/// Fixed-rate frame schedule on the showcase clock.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval: Duration,
    next_frame: Duration,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_frame: Duration::ZERO,
        }
    }

    /// Returns whether a frame is due at `elapsed` and, if so, schedules the
    /// next one. Frames missed during a stall are dropped, not replayed.
    pub fn frame_due(&mut self, elapsed: Duration) -> bool {
        if elapsed < self.next_frame {
            return false;
        }

        self.next_frame += self.interval;
        if self.next_frame <= elapsed {
            self.next_frame = elapsed + self.interval;
        }

        true
    }

    pub fn next_frame(&self) -> Duration {
        self.next_frame
    }
}
