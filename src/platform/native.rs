//! Native window: winit for events, wgpu for drawing
//!
//! The event loop is pumped without blocking whenever the game asks for
//! input, so the game loop keeps control of timing instead of handing it to
//! winit's `run_app`.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use glam::{UVec2, Vec2};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use super::{Platform, PlatformError};
use crate::assets::Assets;
use crate::config::GameConfig;
use crate::input::{InputEvent, Key};
use crate::renderer::{Frame, RenderState};

/// Pumps before giving up on the window appearing
const STARTUP_PUMPS: usize = 100;

/// Map a physical key to a game key
pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Minus | KeyCode::NumpadSubtract => Key::Minus,
        KeyCode::Equal | KeyCode::NumpadAdd => Key::Plus,
        KeyCode::F1 => Key::ToggleMode,
        _ => Key::Other,
    }
}

/// Window pixels to play-area pixels
pub fn to_play_area(position: Vec2, window_size: UVec2, logical_size: Vec2) -> Vec2 {
    if window_size.x == 0 || window_size.y == 0 {
        return position;
    }
    position * logical_size / window_size.as_vec2()
}

/// Window title mirroring the HUD text
pub fn hud_title(prefix: &str, frame: &Frame) -> String {
    std::iter::once(prefix)
        .chain(frame.texts())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// winit-side state, driven by the pumped event loop
struct NativeApp {
    title: String,
    window_size: UVec2,
    logical_size: Vec2,
    assets: Assets,
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    events: VecDeque<InputEvent>,
    cursor: Vec2,
    error: Option<PlatformError>,
}

impl NativeApp {
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(self.window_size.x, self.window_size.y))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| PlatformError::EventLoop(e.to_string()))?,
        );

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(Arc::clone(&window))
            .map_err(|e| PlatformError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| PlatformError::Adapter(e.to_string()))?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let render_state = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width,
            size.height,
            self.logical_size,
            &self.assets,
        ))?;

        if self.assets.font.is_some() {
            log::debug!("HUD font file present; HUD text uses the built-in pixel font");
        }

        self.window = Some(window);
        self.render_state = Some(render_state);
        Ok(())
    }

    fn current_window_size(&self) -> UVec2 {
        self.window
            .as_ref()
            .map(|w| {
                let size = w.inner_size();
                UVec2::new(size.width, size.height)
            })
            .unwrap_or(self.window_size)
    }
}

impl ApplicationHandler for NativeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            log::error!("Window setup failed: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.events.push_back(InputEvent::Closed),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && !event.repeat
                    && let PhysicalKey::Code(code) = event.physical_key
                {
                    self.events.push_back(InputEvent::KeyDown(map_key(code)));
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let window_size = self.current_window_size();
                self.cursor = to_play_area(
                    Vec2::new(position.x as f32, position.y as f32),
                    window_size,
                    self.logical_size,
                );
                self.events.push_back(InputEvent::PointerMove(self.cursor));
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let event = match state {
                    ElementState::Pressed => InputEvent::PointerDown(self.cursor),
                    ElementState::Released => InputEvent::PointerUp(self.cursor),
                };
                self.events.push_back(event);
            }
            WindowEvent::Resized(size) => {
                if let Some(render_state) = self.render_state.as_mut() {
                    render_state.resize(size.width, size.height);
                }
            }
            _ => {}
        }
    }
}

/// Desktop window
pub struct NativePlatform {
    event_loop: EventLoop<()>,
    app: NativeApp,
    title_prefix: String,
    shown_title: String,
    open: bool,
}

impl NativePlatform {
    /// Open the window and set up the GPU. Missing assets are not an error.
    pub fn new(config: &GameConfig) -> Result<Self, PlatformError> {
        let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;
        let app = NativeApp {
            title: config.window_title.clone(),
            window_size: config.window_size,
            logical_size: config.window_size.as_vec2(),
            assets: Assets::load(&config.asset_dir),
            window: None,
            render_state: None,
            events: VecDeque::new(),
            cursor: Vec2::ZERO,
            error: None,
        };

        let mut platform = Self {
            event_loop,
            app,
            title_prefix: config.window_title.clone(),
            shown_title: config.window_title.clone(),
            open: true,
        };

        for _ in 0..STARTUP_PUMPS {
            platform.pump();
            if let Some(e) = platform.app.error.take() {
                return Err(e);
            }
            if platform.app.render_state.is_some() {
                log::info!(
                    "Window open ({}x{})",
                    config.window_size.x,
                    config.window_size.y
                );
                return Ok(platform);
            }
            if !platform.open {
                break;
            }
        }
        Err(PlatformError::EventLoop("window was never created".into()))
    }

    fn pump(&mut self) {
        if !self.open {
            return;
        }
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app);
        if let PumpStatus::Exit(code) = status {
            log::debug!("Event loop exited with {}", code);
            self.open = false;
        }
    }

    fn update_title(&mut self, frame: &Frame) {
        let title = hud_title(&self.title_prefix, frame);
        if title != self.shown_title {
            if let Some(window) = &self.app.window {
                window.set_title(&title);
            }
            self.shown_title = title;
        }
    }
}

impl Platform for NativePlatform {
    fn is_open(&self) -> bool {
        self.open
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        if self.app.events.is_empty() {
            self.pump();
        }
        self.app.events.pop_front()
    }

    fn present(&mut self, frame: &Frame) {
        if !self.open {
            return;
        }
        self.update_title(frame);

        let Some(render_state) = self.app.render_state.as_mut() else {
            return;
        };
        match render_state.render(frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, closing");
                self.close();
            }
            Err(e) => log::warn!("Frame skipped: {:?}", e),
        }
    }

    fn close(&mut self) {
        if self.open {
            log::info!("Closing window");
        }
        self.open = false;
        self.app.render_state = None;
        self.app.window = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, colors};

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::Escape), Key::Escape);
        assert_eq!(map_key(KeyCode::NumpadSubtract), Key::Minus);
        assert_eq!(map_key(KeyCode::Minus), Key::Minus);
        assert_eq!(map_key(KeyCode::NumpadAdd), Key::Plus);
        assert_eq!(map_key(KeyCode::Equal), Key::Plus);
        assert_eq!(map_key(KeyCode::F1), Key::ToggleMode);
        assert_eq!(map_key(KeyCode::KeyA), Key::Other);
    }

    #[test]
    fn test_cursor_scaling() {
        let logical = Vec2::new(800.0, 600.0);
        assert_eq!(
            to_play_area(Vec2::new(800.0, 600.0), UVec2::new(1600, 1200), logical),
            Vec2::new(400.0, 300.0)
        );
        assert_eq!(
            to_play_area(Vec2::new(10.0, 20.0), UVec2::new(800, 600), logical),
            Vec2::new(10.0, 20.0)
        );
        assert_eq!(to_play_area(Vec2::ONE, UVec2::ZERO, logical), Vec2::ONE);
    }

    #[test]
    fn test_hud_title() {
        let mut frame = Frame::new(colors::WHITE);
        frame.push(DrawCommand::text("Hits 1", Vec2::ZERO, 20.0, colors::BLUE));
        frame.push(DrawCommand::Circle {
            center: Vec2::ZERO,
            radius: 1.0,
            color: colors::RED,
        });
        frame.push(DrawCommand::text("Misses 2", Vec2::ZERO, 20.0, colors::BLUE));
        assert_eq!(hud_title("Cannon Range", &frame), "Cannon Range | Hits 1 | Misses 2");
    }
}
