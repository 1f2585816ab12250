//! Vertical layout of the landing page, in physical pixels.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    Chessboard,
    Features,
    CallToAction,
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub top: f32,
    pub height: f32,
}

impl Section {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureBlock {
    pub title: &'static str,
    pub body: &'static str,
    /// Horizontal offset the block slides in from.
    pub from_x: f32,
    pub top: f32,
    pub height: f32,
}

const SECTION_PADDING: f32 = 80.0;
const BLOCK_HEIGHT: f32 = 256.0;
const BLOCK_MARGIN: f32 = 128.0;
const CTA_HEIGHT: f32 = 312.0;
const FOOTER_HEIGHT: f32 = 88.0;

const FEATURES: [(&str, &str, f32); 3] = [
    (
        "AI-powered gameplay",
        "Experience chess like never before with our advanced AI system that adapts to your play style and skill level.",
        -50.0,
    ),
    (
        "Realistic robotic arm movement",
        "Precision-engineered robotic arms that move with grace and accuracy, bringing your chess game into the physical world.",
        50.0,
    ),
    (
        "Classic wooden chess aesthetics",
        "Traditional craftsmanship meets modern technology with our premium wooden chess pieces and board.",
        -50.0,
    ),
];

pub const SUBTITLE: &str = "Chess Infused with Bionic Augmentation";
pub const CALL_TO_ACTION: &str = "Challenge CIBA to a Match";
pub const CALL_TO_ACTION_BUTTON: &str = "Play Now";
pub const FOOTER: &str = "© 2025 CIBA. All rights reserved.";

#[derive(Debug, Clone)]
pub struct PageLayout {
    viewport: Vec2,
    sections: Vec<Section>,
    blocks: Vec<FeatureBlock>,
}

impl PageLayout {
    pub fn new(viewport: Vec2) -> Self {
        let mut layout = Self {
            viewport,
            sections: Vec::new(),
            blocks: Vec::new(),
        };
        layout.resize(viewport);
        layout
    }

    /// Recomputes section offsets. The two canvas sections are one
    /// viewport tall; everything else has a fixed height.
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport.max(Vec2::ONE);

        let features_height =
            2.0 * SECTION_PADDING + FEATURES.len() as f32 * (BLOCK_HEIGHT + BLOCK_MARGIN);
        let heights = [
            (SectionKind::Hero, self.viewport.y),
            (SectionKind::Chessboard, self.viewport.y),
            (SectionKind::Features, features_height),
            (SectionKind::CallToAction, CTA_HEIGHT),
            (SectionKind::Footer, FOOTER_HEIGHT),
        ];

        let mut top = 0.0;
        self.sections = heights
            .into_iter()
            .map(|(kind, height)| {
                let section = Section { kind, top, height };
                top += height;
                section
            })
            .collect();

        let features_top = self
            .section(SectionKind::Features)
            .map(|section| section.top)
            .unwrap_or_default();

        self.blocks = FEATURES
            .iter()
            .enumerate()
            .map(|(index, &(title, body, from_x))| FeatureBlock {
                title,
                body,
                from_x,
                top: features_top + SECTION_PADDING + index as f32 * (BLOCK_HEIGHT + BLOCK_MARGIN),
                height: BLOCK_HEIGHT,
            })
            .collect();
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn blocks(&self) -> &[FeatureBlock] {
        &self.blocks
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    pub fn height(&self) -> f32 {
        self.sections.last().map(Section::bottom).unwrap_or_default()
    }

    pub fn max_scroll(&self) -> f32 {
        (self.height() - self.viewport.y).max(0.0)
    }

    /// Maps a window pointer to the section's own normalized device
    /// coordinates (y up), or `None` if the pointer is outside the part of
    /// the section currently on screen.
    pub fn section_pointer(&self, kind: SectionKind, pointer_px: Vec2, scroll: f32) -> Option<Vec2> {
        let section = self.section(kind)?;
        let local_y = pointer_px.y + scroll - section.top;

        if pointer_px.x < 0.0
            || pointer_px.x > self.viewport.x
            || local_y < 0.0
            || local_y > section.height
        {
            return None;
        }

        Some(Vec2::new(
            pointer_px.x / self.viewport.x * 2.0 - 1.0,
            -(local_y / section.height * 2.0 - 1.0),
        ))
    }
}
