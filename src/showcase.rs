//! Showcase state: the two animated scenes, the title reveal and the page.

use std::time::Duration;

use glam::Vec2;

use crate::animation::driver::{AnimatedObjectDriver, DriverState, FrameInput};
use crate::animation::pose::Pose;
use crate::animation::reveal::StaggeredReveal;
use crate::assets;
use crate::camera::Camera;
use crate::config::{ObjectConfig, ShowcaseConfig};
use crate::page::layout::{
    SectionKind, CALL_TO_ACTION, CALL_TO_ACTION_BUTTON, FOOTER, SUBTITLE,
};
use crate::page::{PageState, VisibilityEdge};
use crate::scene_graph::{ObjectId, Scene};

const DEFAULT_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

/// A scene root moved by its own driver.
pub struct AnimatedObject {
    pub name: &'static str,
    root: Option<ObjectId>,
    rest: Pose,
    driver: AnimatedObjectDriver,
}

impl AnimatedObject {
    fn new(
        name: &'static str,
        root: Option<ObjectId>,
        scene: &Scene,
        config: &ObjectConfig,
    ) -> anyhow::Result<Self> {
        let rest = root
            .and_then(|id| scene.get_object_transform(id))
            .map(|transform| Pose::new(transform.translation(), transform.rotation()))
            .unwrap_or_default();

        let driver = AnimatedObjectDriver::new(&config.animation)
            .map_err(|error| error.context(format!("Invalid animation for {name}")))?;

        Ok(Self {
            name,
            root,
            rest,
            driver,
        })
    }

    fn load(name: &'static str, scene: &mut Scene, config: &ObjectConfig) -> Option<ObjectId> {
        match assets::load_gltf_group(scene, name, &config.asset, config.scale) {
            Ok(root) => Some(root),
            Err(error) => {
                log::warn!("{name} unavailable, continuing without it: {error:#}");
                None
            }
        }
    }

    pub fn root(&self) -> Option<ObjectId> {
        self.root
    }

    pub fn is_loaded(&self) -> bool {
        self.root.is_some()
    }

    pub fn state(&self) -> DriverState {
        self.driver.state()
    }

    #[cfg(test)]
    pub fn entrance_count(&self) -> u32 {
        self.driver.entrance_count()
    }

    fn animate(&mut self, scene: &mut Scene, input: &FrameInput) {
        let Some(root) = self.root else {
            return;
        };

        let pose = self.rest + self.driver.advance(input);
        if !scene.set_object_pose(root, pose.position, pose.rotation) {
            log::warn!("{} root disappeared from the scene", self.name);
            self.root = None;
        }
    }
}

pub struct ShowcaseState {
    pub camera: Camera,
    pub scene: Scene,
    pub page: PageState,
    arms: AnimatedObject,
    board: AnimatedObject,
    title: StaggeredReveal,
    pointer_px: Option<Vec2>,
    arms_pointer: Vec2,
    board_hovered: bool,
}

impl ShowcaseState {
    pub fn new(config: &ShowcaseConfig) -> anyhow::Result<Self> {
        let mut scene = Scene::new();
        let arms = AnimatedObject::load("RoboticArms", &mut scene, &config.robotic_arms);
        let board = AnimatedObject::load("ChessBoard", &mut scene, &config.chessboard);

        Self::from_scene(config, scene, arms, board)
    }

    /// Builds the showcase around an already populated scene.
    pub fn from_scene(
        config: &ShowcaseConfig,
        scene: Scene,
        arms_root: Option<ObjectId>,
        board_root: Option<ObjectId>,
    ) -> anyhow::Result<Self> {
        let arms = AnimatedObject::new("RoboticArms", arms_root, &scene, &config.robotic_arms)?;
        let board = AnimatedObject::new("ChessBoard", board_root, &scene, &config.chessboard)?;

        Ok(Self {
            camera: config.camera,
            scene,
            page: PageState::new(config.page, DEFAULT_VIEWPORT),
            arms,
            board,
            title: StaggeredReveal::new(config.title.clone()),
            pointer_px: None,
            arms_pointer: Vec2::ZERO,
            board_hovered: false,
        })
    }

    #[cfg(test)]
    pub fn arms(&self) -> &AnimatedObject {
        &self.arms
    }

    #[cfg(test)]
    pub fn board(&self) -> &AnimatedObject {
        &self.board
    }

    #[cfg(test)]
    pub fn title(&self) -> &StaggeredReveal {
        &self.title
    }

    #[cfg(test)]
    pub fn board_hovered(&self) -> bool {
        self.board_hovered
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.page.resize(viewport);
    }

    pub fn set_pointer(&mut self, pointer_px: Option<Vec2>) {
        self.pointer_px = pointer_px;
    }

    pub fn scroll_lines(&mut self, lines: f32) {
        self.page.scroll_lines(lines);
    }

    pub fn scroll_pixels(&mut self, pixels: f32) {
        self.page.scroll_by(pixels);
    }

    pub fn click_letter(&mut self, index: usize, now: Duration) {
        if !self.title.click(index, now) {
            log::debug!("Letter {index} is not visible, ignoring click");
        }
    }

    fn board_hover(&self) -> bool {
        let Some(pointer) = self
            .pointer_px
            .and_then(|px| self.page.section_pointer(SectionKind::Chessboard, px))
        else {
            return false;
        };

        self.board
            .root()
            .and_then(|root| self.scene.subtree_bounds(root))
            .and_then(|bounds| {
                self.camera
                    .project_aabb(&bounds, self.page.layout().viewport())
            })
            .is_some_and(|rect| rect.contains(pointer))
    }

    pub fn update(&mut self, now: Duration) {
        // The first frame is the page-load signal.
        self.page.mark_loaded(now);
        self.title.start(now);

        if self.title.tick(now) {
            log::debug!("Title now reads {}", self.title.render());
        }

        for edge in self.page.update() {
            match edge {
                VisibilityEdge::Chessboard(in_view) => {
                    log::info!("Chessboard section in view: {in_view}");
                }
                VisibilityEdge::Block(index, in_view) => {
                    if let Some(block) = self.page.layout().blocks().get(index) {
                        log::info!("Feature \"{}\" in view: {in_view}", block.title);
                        if in_view {
                            log::debug!("{}", block.body);
                        }
                    }
                }
            }
        }

        let time = now.as_secs_f32();

        if let Some(pointer) = self
            .pointer_px
            .and_then(|px| self.page.section_pointer(SectionKind::Hero, px))
        {
            self.arms_pointer = pointer;
        }

        let arms_input = FrameInput {
            time,
            pointer: self.arms_pointer,
            active: self.arms.is_loaded(),
            hovering: false,
        };
        self.arms.animate(&mut self.scene, &arms_input);

        let hovering = self.board_hover();
        if hovering != self.board_hovered {
            log::debug!("Chessboard hovered: {hovering}");
            self.board_hovered = hovering;
        }

        let board_input = FrameInput {
            time,
            pointer: Vec2::ZERO,
            active: self.board.is_loaded() && self.page.board_in_view(),
            hovering,
        };
        self.board.animate(&mut self.scene, &board_input);

        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "Heading {:?}, subtitle {:?}",
                self.page.heading(now),
                self.page.subtitle(now)
            );
            for (title, text) in self.page.blocks() {
                log::trace!("{title}: {text:?}");
            }
        }
    }

    /// One-line status used as the window title.
    pub fn summary(&self) -> String {
        let call_to_action;
        let caption = match self.page.current_section() {
            SectionKind::Hero => SUBTITLE,
            SectionKind::Chessboard => "Interactive chessboard",
            SectionKind::Features => self
                .page
                .blocks()
                .find(|(_, text)| text.opacity > 0.5)
                .map(|(title, _)| title)
                .unwrap_or("Features"),
            SectionKind::CallToAction => {
                call_to_action = format!("{CALL_TO_ACTION} [{CALL_TO_ACTION_BUTTON}]");
                call_to_action.as_str()
            }
            SectionKind::Footer => FOOTER,
        };

        format!(
            "{} | {} {}% | arms {:?} | board {:?}",
            self.title.render(),
            caption,
            self.page.scroll_percent(),
            self.arms.state(),
            self.board.state(),
        )
    }

    pub fn teardown(&mut self) {
        self.title.teardown();
        self.arms.root = None;
        self.board.root = None;
        log::info!("Showcase torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::tests::TRIANGLE_GLTF;
    use crate::engine;
    use std::path::PathBuf;

    const FRAME: Duration = engine::FRAME_INTERVAL;

    fn missing_assets() -> ShowcaseConfig {
        let mut config = ShowcaseConfig::default();
        config.robotic_arms.asset = PathBuf::from("does/not/exist/arms.glb");
        config.chessboard.asset = PathBuf::from("does/not/exist/board.glb");
        config
    }

    fn with_board() -> ShowcaseState {
        let config = ShowcaseConfig::default();
        let mut scene = Scene::new();
        let board = assets::load_gltf_group_from_slice(
            &mut scene,
            "ChessBoard",
            TRIANGLE_GLTF.as_bytes(),
            config.chessboard.scale,
        )
        .unwrap();
        ShowcaseState::from_scene(&config, scene, None, Some(board)).unwrap()
    }

    fn run(state: &mut ShowcaseState, now: &mut Duration, frames: u32) {
        for _ in 0..frames {
            engine::update(state, *now).unwrap();
            *now += FRAME;
        }
    }

    #[test]
    fn test_missing_assets_are_no_ops() {
        let mut state = ShowcaseState::new(&missing_assets()).unwrap();
        assert!(!state.arms().is_loaded());
        assert!(!state.board().is_loaded());

        let mut now = Duration::ZERO;
        state.set_pointer(Some(Vec2::new(10.0, 10.0)));
        state.scroll_lines(30.0);
        run(&mut state, &mut now, 300);

        assert_eq!(state.arms().state(), DriverState::Inactive);
        assert_eq!(state.board().state(), DriverState::Inactive);
        assert_eq!(state.scene.object_count(), 0);
    }

    #[test]
    fn test_title_reveals_after_load() {
        let mut state = ShowcaseState::new(&missing_assets()).unwrap();
        let mut now = Duration::from_secs(1);
        run(&mut state, &mut now, 1);
        assert_eq!(state.title().render(), "····");

        // 1s + 2.5s + 3 * 0.4s = 4.7s
        let mut now = Duration::from_millis(4700);
        run(&mut state, &mut now, 1);
        assert_eq!(state.title().render(), "CIBA");
        assert!(state
            .summary()
            .starts_with("CIBA | Chess Infused with Bionic Augmentation 0%"));

        state.click_letter(1, now);
        assert_eq!(state.title().render(), "C·BA");
        let mut later = now + Duration::from_millis(250);
        run(&mut state, &mut later, 1);
        assert_eq!(state.title().render(), "CIBA");
    }

    #[test]
    fn test_summary_names_call_to_action() {
        let mut state = ShowcaseState::new(&missing_assets()).unwrap();
        state.scroll_pixels(1.0e6);

        let summary = state.summary();
        assert!(
            summary.contains("Challenge CIBA to a Match [Play Now] 100%"),
            "{summary}"
        );
    }

    #[test]
    fn test_board_waits_for_scroll() {
        let mut state = with_board();
        let mut now = Duration::ZERO;
        run(&mut state, &mut now, 60);
        assert_eq!(state.board().state(), DriverState::Inactive);

        let root = state.board().root().unwrap();
        let y = state.scene.get_object_transform(root).unwrap().translation().y;
        assert!((y - -2.0).abs() < 1e-6, "board should wait off screen, y = {y}");

        state.scroll_lines(18.0);
        run(&mut state, &mut now, 1);
        assert_eq!(state.board().state(), DriverState::Entering);
        run(&mut state, &mut now, 120);
        assert_eq!(state.board().state(), DriverState::Idle);
        assert_eq!(state.board().entrance_count(), 1);

        // Out and back in re-runs the entrance.
        state.scroll_lines(-100.0);
        run(&mut state, &mut now, 5);
        assert_eq!(state.board().state(), DriverState::Inactive);
        state.scroll_lines(18.0);
        run(&mut state, &mut now, 1);
        assert_eq!(state.board().entrance_count(), 2);
    }

    #[test]
    fn test_board_hover() {
        let mut state = with_board();
        let mut now = Duration::ZERO;
        let viewport = state.page.layout().viewport();

        // Scroll the board section fully into view.
        state.scroll_lines(viewport.y / 40.0);
        run(&mut state, &mut now, 150);
        assert_eq!(state.board().state(), DriverState::Idle);

        let root = state.board().root().unwrap();
        let bounds = state.scene.subtree_bounds(root).unwrap();
        let rect = state.camera.project_aabb(&bounds, viewport).unwrap();
        let center = (rect.min + rect.max) * 0.5;

        let board_top = state
            .page
            .layout()
            .section(SectionKind::Chessboard)
            .unwrap()
            .top;
        let pointer_px = Vec2::new(
            (center.x + 1.0) * 0.5 * viewport.x,
            (1.0 - center.y) * 0.5 * viewport.y + board_top - state.page.scroll(),
        );

        state.set_pointer(Some(pointer_px));
        run(&mut state, &mut now, 10);
        assert!(state.board_hovered());
        assert_eq!(state.board().state(), DriverState::Hovering);

        state.set_pointer(None);
        run(&mut state, &mut now, 1);
        assert_eq!(state.board().state(), DriverState::Idle);
    }

    #[test]
    fn test_arms_follow_pointer() {
        let config = ShowcaseConfig::default();
        let mut scene = Scene::new();
        let arms = assets::load_gltf_group_from_slice(
            &mut scene,
            "RoboticArms",
            TRIANGLE_GLTF.as_bytes(),
            config.robotic_arms.scale,
        )
        .unwrap();
        let mut state = ShowcaseState::from_scene(&config, scene, Some(arms), None).unwrap();

        let mut now = Duration::ZERO;
        let viewport = state.page.layout().viewport();
        // Top-right corner of the hero section.
        state.set_pointer(Some(Vec2::new(viewport.x, 0.0)));
        run(&mut state, &mut now, 300);

        let rotation = state.scene.get_object_transform(arms).unwrap().rotation();
        assert!((rotation.x - 0.2).abs() < 1e-3, "pitch {}", rotation.x);
        assert!((rotation.y - 0.2).abs() < 1e-3, "yaw {}", rotation.y);
        assert_eq!(state.arms().entrance_count(), 1);
    }

    #[test]
    fn test_teardown_stops_everything() {
        let mut state = with_board();
        let mut now = Duration::ZERO;
        run(&mut state, &mut now, 1);
        state.teardown();

        let mut later = Duration::from_secs(10);
        run(&mut state, &mut later, 1);
        assert_eq!(state.title().render(), "····");
        assert!(!state.board().is_loaded());
    }

    #[test]
    fn test_invalid_animation_is_rejected() {
        use crate::animation::channels::{SwayConfig, TiltConfig};

        let mut config = ShowcaseConfig::default();
        config.chessboard.animation.sway = Some(SwayConfig::default());
        config.chessboard.animation.tilt = Some(TiltConfig::default());

        let error = ShowcaseState::from_scene(&config, Scene::new(), None, None)
            .err()
            .unwrap();
        assert!(format!("{error:#}").contains("ChessBoard"));
    }
}
