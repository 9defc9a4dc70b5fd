//! Input event model and dispatch
//!
//! Platforms translate their native events into [`InputEvent`]s; the
//! dispatcher maps those to [`Action`]s and applies them to the game state.
//! Pointer actions feed the aim state machine, keys adjust gravity, toggle
//! the render mode or request exit.

use glam::Vec2;

use crate::config::GameConfig;
use crate::sim::GameState;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// Decrease gravity
    Minus,
    /// Increase gravity
    Plus,
    /// Flip between debug and graphics rendering (F1 on the native window)
    ToggleMode,
    Other,
}

/// A typed platform event, pointer positions in play-area pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Closed,
    KeyDown(Key),
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp(Vec2),
}

/// What an input event asks the game to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    RequestExit,
    AdjustGravity(f32),
    ToggleRenderMode,
    Press(Vec2),
    Drag(Vec2),
    Release(Vec2),
}

/// Map a raw event to an action; `None` for keys the game ignores
pub fn map_event(event: InputEvent, config: &GameConfig) -> Option<Action> {
    match event {
        InputEvent::Closed => Some(Action::RequestExit),
        InputEvent::KeyDown(key) => match key {
            Key::Escape => Some(Action::RequestExit),
            Key::Minus => Some(Action::AdjustGravity(-config.gravity_step)),
            Key::Plus => Some(Action::AdjustGravity(config.gravity_step)),
            Key::ToggleMode => Some(Action::ToggleRenderMode),
            Key::Other => None,
        },
        InputEvent::PointerDown(p) => Some(Action::Press(p)),
        InputEvent::PointerMove(p) => Some(Action::Drag(p)),
        InputEvent::PointerUp(p) => Some(Action::Release(p)),
    }
}

/// Apply an action. Pointer actions that don't fit the current shot state
/// are dropped by the aim state machine.
pub fn apply(action: Action, state: &mut GameState, config: &GameConfig) {
    match action {
        Action::RequestExit => state.request_exit(),
        Action::AdjustGravity(amount) => state.adjust_gravity(amount),
        Action::ToggleRenderMode => state.toggle_render_mode(),
        Action::Press(p) => {
            state.begin_aim(p, config);
        }
        Action::Drag(p) => {
            state.update_aim(p, config);
        }
        Action::Release(p) => {
            state.release_aim(p, config);
        }
    }
}

/// Map and apply in one go
pub fn dispatch(event: InputEvent, state: &mut GameState, config: &GameConfig) {
    if let Some(action) = map_event(event, config) {
        apply(action, state, config);
    }
}
