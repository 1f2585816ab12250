//! Scroll-driven page model around the two 3D sections.

pub mod layout;
pub mod visibility;

use std::time::Duration;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::entrance::EntranceConfig;
use crate::animation::pose::Pose;
use crate::animation::smoothing::Smoothed;
use crate::page::layout::{PageLayout, SectionKind};
use crate::page::visibility::{intersection_ratio, InViewSignal};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub in_view_threshold: f32,
    /// Feature blocks count as in view on any overlap by default.
    pub block_in_view_threshold: f32,
    /// Pixels scrolled per mouse wheel line.
    pub scroll_line_px: f32,
    pub block_smoothing: f32,
    pub heading: EntranceConfig,
    pub subtitle: EntranceConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            in_view_threshold: 0.1,
            block_in_view_threshold: 0.0,
            scroll_line_px: 40.0,
            block_smoothing: 0.1,
            heading: EntranceConfig {
                from: Pose::new(Vec3::new(0.0, 20.0, 0.0), Vec3::ZERO),
                delay: 0.0,
                duration: 1.0,
                ..EntranceConfig::default()
            },
            subtitle: EntranceConfig {
                delay: 0.5,
                duration: 1.0,
                ..EntranceConfig::default()
            },
        }
    }
}

/// Offset and opacity of a piece of page text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextState {
    pub offset: Vec2,
    pub opacity: f32,
}

/// Something on the page crossed the in-view threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEdge {
    Chessboard(bool),
    Block(usize, bool),
}

pub struct PageState {
    config: PageConfig,
    layout: PageLayout,
    scroll: f32,
    loaded_at: Option<Duration>,
    board_signal: InViewSignal,
    block_signals: Vec<InViewSignal>,
    block_progress: Vec<Smoothed<f32>>,
}

impl PageState {
    pub fn new(config: PageConfig, viewport: Vec2) -> Self {
        let layout = PageLayout::new(viewport);
        let block_count = layout.blocks().len();

        Self {
            block_signals: vec![InViewSignal::new(config.block_in_view_threshold); block_count],
            block_progress: vec![Smoothed::new(0.0, config.block_smoothing); block_count],
            board_signal: InViewSignal::new(config.in_view_threshold),
            config,
            layout,
            scroll: 0.0,
            loaded_at: None,
        }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.layout.resize(viewport);
        self.set_scroll(self.scroll);
    }

    /// Clamped to the scrollable range.
    pub fn set_scroll(&mut self, scroll: f32) {
        self.scroll = scroll.clamp(0.0, self.layout.max_scroll());
    }

    pub fn scroll_by(&mut self, pixels: f32) {
        self.set_scroll(self.scroll + pixels);
    }

    pub fn scroll_lines(&mut self, lines: f32) {
        self.scroll_by(lines * self.config.scroll_line_px);
    }

    /// Page-load signal; only the first call counts.
    pub fn mark_loaded(&mut self, now: Duration) {
        self.loaded_at.get_or_insert(now);
    }

    fn ratio(&self, top: f32, height: f32) -> f32 {
        intersection_ratio(top, height, self.scroll, self.layout.viewport().y)
    }

    /// Recomputes visibility and advances block reveals by one frame.
    pub fn update(&mut self) -> Vec<VisibilityEdge> {
        let mut edges = Vec::new();

        if let Some(board) = self.layout.section(SectionKind::Chessboard).copied() {
            let ratio = self.ratio(board.top, board.height);
            if let Some(in_view) = self.board_signal.update(ratio) {
                edges.push(VisibilityEdge::Chessboard(in_view));
            }
        }

        let ratios: Vec<f32> = self
            .layout
            .blocks()
            .iter()
            .map(|block| self.ratio(block.top, block.height))
            .collect();

        for (index, ratio) in ratios.into_iter().enumerate() {
            if let Some(in_view) = self.block_signals[index].update(ratio) {
                edges.push(VisibilityEdge::Block(index, in_view));
            }
            let target = if self.block_signals[index].in_view() {
                1.0
            } else {
                0.0
            };
            self.block_progress[index].step_toward(target);
        }

        edges
    }

    pub fn board_in_view(&self) -> bool {
        self.board_signal.in_view()
    }

    pub fn blocks(&self) -> impl Iterator<Item = (&'static str, TextState)> + '_ {
        self.layout
            .blocks()
            .iter()
            .zip(&self.block_progress)
            .map(|(block, progress)| {
                let progress = progress.current();
                (
                    block.title,
                    TextState {
                        offset: Vec2::new(block.from_x * (1.0 - progress), 0.0),
                        opacity: progress,
                    },
                )
            })
    }

    fn loaded_text(&self, entrance: &EntranceConfig, now: Duration) -> TextState {
        let Some(loaded_at) = self.loaded_at else {
            let offset = entrance.from.position;
            return TextState {
                offset: Vec2::new(offset.x, offset.y),
                opacity: 0.0,
            };
        };

        let sample = entrance.sample(now.saturating_sub(loaded_at).as_secs_f32());
        TextState {
            offset: Vec2::new(sample.offset.position.x, sample.offset.position.y),
            opacity: sample.progress,
        }
    }

    pub fn heading(&self, now: Duration) -> TextState {
        self.loaded_text(&self.config.heading, now)
    }

    pub fn subtitle(&self, now: Duration) -> TextState {
        self.loaded_text(&self.config.subtitle, now)
    }

    /// Section under the middle of the viewport. The short sections at the
    /// bottom never reach the viewport top.
    pub fn current_section(&self) -> SectionKind {
        let middle = self.scroll + self.layout.viewport().y * 0.5;

        self.layout
            .sections()
            .iter()
            .rev()
            .find(|section| section.top <= middle)
            .map(|section| section.kind)
            .unwrap_or(SectionKind::Hero)
    }

    /// Pointer in the given section's own device coordinates.
    pub fn section_pointer(&self, kind: SectionKind, pointer_px: Vec2) -> Option<Vec2> {
        self.layout.section_pointer(kind, pointer_px, self.scroll)
    }

    /// Scroll position as a percentage of the scrollable range.
    pub fn scroll_percent(&self) -> u32 {
        let max = self.layout.max_scroll();
        if max <= 0.0 {
            return 0;
        }
        (self.scroll / max * 100.0).round() as u32
    }
}
