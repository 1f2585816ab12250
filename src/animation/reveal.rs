//! Staggered per-symbol reveal with a click flicker.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::timer::TimerQueue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub text: String,
    pub base_delay_ms: u64,
    pub stagger_ms: u64,
    /// How long a clicked symbol stays hidden.
    pub flicker_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            text: "CIBA".to_string(),
            base_delay_ms: 2500,
            stagger_ms: 400,
            flicker_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealEvent {
    Show(usize),
}

#[derive(Debug)]
pub struct StaggeredReveal {
    config: RevealConfig,
    symbols: Vec<char>,
    visible: Vec<bool>,
    timers: TimerQueue<RevealEvent>,
    started: bool,
}

impl StaggeredReveal {
    pub fn new(config: RevealConfig) -> Self {
        let symbols: Vec<char> = config.text.chars().collect();
        let count = symbols.len();

        Self {
            config,
            symbols,
            visible: vec![false; count],
            timers: TimerQueue::new(),
            started: false,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Delay after the load signal at which symbol `index` appears.
    pub fn reveal_delay(&self, index: usize) -> Duration {
        Duration::from_millis(self.config.base_delay_ms + index as u64 * self.config.stagger_ms)
    }

    /// Page-load signal. Only the first call schedules anything.
    pub fn start(&mut self, now: Duration) {
        if self.started {
            return;
        }
        self.started = true;

        for index in 0..self.symbols.len() {
            let due = now + self.reveal_delay(index);
            self.timers.schedule(due, RevealEvent::Show(index));
        }

        log::debug!(
            "Scheduled reveal of {:?} starting at {:?}",
            self.config.text,
            now + self.reveal_delay(0)
        );
    }

    /// Hides a visible symbol and brings it back after the flicker delay.
    /// Returns whether the click did anything.
    pub fn click(&mut self, index: usize, now: Duration) -> bool {
        if !self.visible.get(index).copied().unwrap_or(false) || self.timers.is_torn_down() {
            return false;
        }

        self.visible[index] = false;
        let due = now + Duration::from_millis(self.config.flicker_ms);
        self.timers.schedule(due, RevealEvent::Show(index));
        log::debug!("Flickering symbol {index} until {due:?}");
        true
    }

    /// Fires due timers. Returns whether any visibility changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let mut changed = false;

        for event in self.timers.drain_due(now) {
            match event {
                RevealEvent::Show(index) => {
                    let Some(visible) = self.visible.get_mut(index) else {
                        continue;
                    };
                    changed |= !*visible;
                    *visible = true;
                }
            }
        }

        changed
    }

    #[cfg(test)]
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    #[cfg(test)]
    pub fn all_visible(&self) -> bool {
        self.visible.iter().all(|visible| *visible)
    }

    /// Cancels every pending reveal; later ticks and clicks do nothing.
    pub fn teardown(&mut self) {
        self.timers.teardown();
    }

    /// Text with hidden symbols replaced by `·`.
    pub fn render(&self) -> String {
        self.symbols
            .iter()
            .zip(&self.visible)
            .map(|(symbol, visible)| if *visible { *symbol } else { '·' })
            .collect()
    }
}

impl Drop for StaggeredReveal {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_symbols_appear_on_schedule() {
        let mut reveal = StaggeredReveal::new(RevealConfig::default());
        reveal.start(Duration::ZERO);

        for index in 0..4 {
            let due = 2500 + 400 * index as u64;
            reveal.tick(ms(due - 1));
            assert!(!reveal.is_visible(index), "symbol {index} early");
            assert!(reveal.tick(ms(due)));
            assert!(reveal.is_visible(index), "symbol {index} late");
        }

        assert!(reveal.all_visible());
        assert_eq!(reveal.render(), "CIBA");
    }

    #[test]
    fn test_reveal_times_non_decreasing() {
        let reveal = StaggeredReveal::new(RevealConfig::default());
        let delays: Vec<Duration> = (0..reveal.len()).map(|i| reveal.reveal_delay(i)).collect();
        assert_eq!(delays[0], ms(2500));
        assert_eq!(delays[3], ms(3700));
        assert!(delays.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut reveal = StaggeredReveal::new(RevealConfig::default());
        reveal.start(Duration::ZERO);
        reveal.start(ms(1000));
        reveal.tick(ms(2500));
        assert!(reveal.is_visible(0));
        assert_eq!(reveal.render(), "C···");
    }

    #[test]
    fn test_click_flickers_visible_symbol() {
        let mut reveal = StaggeredReveal::new(RevealConfig::default());
        reveal.start(Duration::ZERO);
        reveal.tick(ms(5000));

        assert!(reveal.click(2, ms(6000)));
        assert!(!reveal.is_visible(2));
        reveal.tick(ms(6199));
        assert!(!reveal.is_visible(2));
        reveal.tick(ms(6200));
        assert!(reveal.is_visible(2));
    }

    #[test]
    fn test_click_ignores_hidden_or_unknown_symbols() {
        let mut reveal = StaggeredReveal::new(RevealConfig::default());
        reveal.start(Duration::ZERO);
        assert!(!reveal.click(0, ms(100)));
        assert!(!reveal.click(9, ms(100)));
    }

    #[test]
    fn test_teardown_cancels_pending_reveals() {
        let mut reveal = StaggeredReveal::new(RevealConfig::default());
        reveal.start(Duration::ZERO);
        reveal.tick(ms(2500));
        reveal.teardown();

        assert!(!reveal.tick(ms(10_000)));
        assert_eq!(reveal.render(), "C···");
        assert!(!reveal.click(0, ms(10_000)));
    }
}
