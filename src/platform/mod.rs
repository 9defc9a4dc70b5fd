//! Platform abstraction layer
//!
//! The game loop only talks to a [`Platform`]: is the window open, what's the
//! next input event, present this frame, close. Two implementations:
//! - [`HeadlessPlatform`]: scripted input and captured frames, no window
//! - [`native::NativePlatform`]: winit window with a wgpu surface

pub mod native;

use std::collections::VecDeque;
use std::fmt;

use crate::input::InputEvent;
use crate::renderer::Frame;

pub use native::NativePlatform;

/// Window and input collaborator
pub trait Platform {
    fn is_open(&self) -> bool;

    /// Next pending event, never blocks
    fn poll_event(&mut self) -> Option<InputEvent>;

    fn present(&mut self, frame: &Frame);

    fn close(&mut self);
}

/// Fatal start-up failures of the native platform
#[derive(Debug)]
pub enum PlatformError {
    EventLoop(String),
    Surface(String),
    Adapter(String),
    Device(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::EventLoop(e) => write!(f, "event loop error: {e}"),
            PlatformError::Surface(e) => write!(f, "failed to create surface: {e}"),
            PlatformError::Adapter(e) => write!(f, "no suitable GPU adapter: {e}"),
            PlatformError::Device(e) => write!(f, "failed to create device: {e}"),
        }
    }
}

impl std::error::Error for PlatformError {}

/// Scripted platform for tests and automation.
///
/// The script is a list of event batches. A batch is handed out once the
/// previous frame has been presented, so each batch lands in its own loop
/// iteration. The platform closes itself when the script runs out.
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    script: VecDeque<Vec<InputEvent>>,
    pending: VecDeque<InputEvent>,
    /// A frame was presented since the last batch was loaded
    ready_for_batch: bool,
    open: bool,
    pub frames: Vec<Frame>,
}

impl HeadlessPlatform {
    pub fn new(script: Vec<Vec<InputEvent>>) -> Self {
        Self {
            script: script.into(),
            pending: VecDeque::new(),
            ready_for_batch: true,
            open: true,
            frames: Vec::new(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl Platform for HeadlessPlatform {
    fn is_open(&self) -> bool {
        self.open
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        if !self.ready_for_batch || !self.open {
            return None;
        }
        self.ready_for_batch = false;
        match self.script.pop_front() {
            Some(batch) => {
                self.pending.extend(batch);
                self.pending.pop_front()
            }
            None => {
                log::debug!("Headless script exhausted after {} frames", self.frames.len());
                self.open = false;
                None
            }
        }
    }

    fn present(&mut self, frame: &Frame) {
        if !self.open {
            return;
        }
        self.frames.push(frame.clone());
        self.ready_for_batch = true;
    }

    fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use glam::Vec2;

    #[test]
    fn test_batches_wait_for_present() {
        let mut platform = HeadlessPlatform::new(vec![
            vec![InputEvent::KeyDown(Key::Plus), InputEvent::PointerDown(Vec2::ONE)],
            vec![InputEvent::KeyDown(Key::Minus)],
        ]);

        assert_eq!(platform.poll_event(), Some(InputEvent::KeyDown(Key::Plus)));
        assert_eq!(platform.poll_event(), Some(InputEvent::PointerDown(Vec2::ONE)));
        assert_eq!(platform.poll_event(), None);
        assert!(platform.is_open());

        platform.present(&Frame::default());
        assert_eq!(platform.poll_event(), Some(InputEvent::KeyDown(Key::Minus)));
        assert_eq!(platform.poll_event(), None);

        platform.present(&Frame::default());
        assert_eq!(platform.poll_event(), None);
        assert!(!platform.is_open());
        assert_eq!(platform.frame_count(), 2);
    }

    #[test]
    fn test_closed_platform_ignores_frames() {
        let mut platform = HeadlessPlatform::new(vec![vec![]]);
        platform.close();
        platform.present(&Frame::default());
        assert_eq!(platform.frame_count(), 0);
        assert_eq!(platform.poll_event(), None);
    }

    #[test]
    fn test_error_display() {
        let e = PlatformError::Adapter("none found".into());
        assert_eq!(e.to_string(), "no suitable GPU adapter: none found");
    }
}
