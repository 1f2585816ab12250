use std::time::Instant;

use anyhow::Context;
use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    config::ShowcaseConfig,
    engine::{self, FramePacer, FRAME_INTERVAL},
    showcase::ShowcaseState,
};

struct App {
    window: Option<Window>,
    state: ShowcaseState,
    start_time: Instant,
    pacer: FramePacer,
    title: String,
}

impl App {
    fn from_state(state: ShowcaseState) -> Self {
        Self {
            window: None,
            state,
            start_time: Instant::now(),
            pacer: FramePacer::new(FRAME_INTERVAL),
            title: String::new(),
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.state.teardown();
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }

        let letter = match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => {
                self.shutdown(event_loop);
                return;
            }
            PhysicalKey::Code(KeyCode::Digit1) => 0,
            PhysicalKey::Code(KeyCode::Digit2) => 1,
            PhysicalKey::Code(KeyCode::Digit3) => 2,
            PhysicalKey::Code(KeyCode::Digit4) => 3,
            _ => return,
        };

        self.state.click_letter(letter, self.start_time.elapsed());
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("CIBA")
            .with_inner_size(LogicalSize::new(1280.0, 720.0));

        match event_loop.create_window(window_attributes) {
            Ok(window) => {
                let size = window.inner_size();
                self.state
                    .resize(Vec2::new(size.width as f32, size.height as f32));
                self.window = Some(window);
            }
            Err(error) => {
                log::error!("Failed to create window: {error}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(new_size) => {
                self.state
                    .resize(Vec2::new(new_size.width as f32, new_size.height as f32));
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .set_pointer(Some(Vec2::new(position.x as f32, position.y as f32)));
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.set_pointer(None);
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, lines) => self.state.scroll_lines(-lines),
                MouseScrollDelta::PixelDelta(position) => {
                    self.state.scroll_pixels(-(position.y as f32))
                }
            },
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, event);
            }
            WindowEvent::RedrawRequested => {
                if let Err(error) = engine::update(&mut self.state, self.start_time.elapsed()) {
                    log::error!("Error during engine::update: {error:#}");
                    self.shutdown(event_loop);
                    return;
                }

                let Some(window) = self.window.as_ref() else {
                    return;
                };

                let summary = self.state.summary();
                if summary != self.title {
                    window.set_title(&summary);
                    self.title = summary;
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        if self.pacer.frame_due(self.start_time.elapsed()) {
            window.request_redraw();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(
            self.start_time + self.pacer.next_frame(),
        ));
    }
}

pub fn run(config: &ShowcaseConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let state = ShowcaseState::new(config).context("Failed to create showcase state")?;
    let mut app = App::from_state(state);
    event_loop.run_app(&mut app)?;

    Ok(())
}
