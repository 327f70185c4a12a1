//! Translation of raw window events into controller input.
//!
//! Winit reports the cursor in physical pixels and clicks without a
//! position. [`InputTranslator`] remembers the last cursor position,
//! converts it to logical pixels (the unit the particle field works in) and
//! turns the events the background cares about into [`Action`]s.
//!
//! | Event | Action |
//! |-------|--------|
//! | cursor moved | [`InputEvent::PointerMoved`] |
//! | left button pressed | [`InputEvent::Clicked`] at the last cursor position |
//! | window resized, scale factor changed | [`InputEvent::Resized`] |
//! | `Escape` | [`Command::Quit`] |
//! | `Space` | [`Command::TogglePause`] |
//! | `F1` | [`Command::ToggleSettings`] |

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Input the surface controller reacts to. Coordinates are logical pixels
/// relative to the window's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    Clicked { x: f32, y: f32 },
    Resized,
}

/// Requests aimed at the host rather than the particle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    TogglePause,
    ToggleSettings,
}

/// What a window event turned into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Input(InputEvent),
    Command(Command),
}

/// Stateful translator from winit events to [`Action`]s.
#[derive(Debug)]
pub struct InputTranslator {
    cursor: Option<Vec2>,
    scale_factor: f64,
}

impl InputTranslator {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            cursor: None,
            scale_factor: sanitize_scale(scale_factor),
        }
    }

    /// Last cursor position in logical pixels, if the cursor has been seen.
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Translate one window event. Events with no meaning here yield `None`.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<Action> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(position.x as f32, position.y as f32))
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse_button(*state, *button),
            WindowEvent::Resized(_) => Some(Action::Input(InputEvent::Resized)),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor);
                Some(Action::Input(InputEvent::Resized))
            }
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(code) => self.key(code, event.state, event.repeat),
                PhysicalKey::Unidentified(_) => None,
            },
            _ => None,
        }
    }

    pub(crate) fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = sanitize_scale(scale_factor);
    }

    /// Cursor moved to physical pixel `(x, y)`.
    pub(crate) fn cursor_moved(&mut self, x: f32, y: f32) -> Action {
        let scale = self.scale_factor as f32;
        let logical = Vec2::new(x, y) / scale;
        self.cursor = Some(logical);
        Action::Input(InputEvent::PointerMoved {
            x: logical.x,
            y: logical.y,
        })
    }

    pub(crate) fn mouse_button(&mut self, state: ElementState, button: MouseButton) -> Option<Action> {
        if state != ElementState::Pressed || button != MouseButton::Left {
            return None;
        }
        // A click before any cursor movement has no position to spawn at.
        let at = self.cursor?;
        Some(Action::Input(InputEvent::Clicked { x: at.x, y: at.y }))
    }

    pub(crate) fn key(&mut self, code: KeyCode, state: ElementState, repeat: bool) -> Option<Action> {
        if state != ElementState::Pressed || repeat {
            return None;
        }
        let command = match code {
            KeyCode::Escape => Command::Quit,
            KeyCode::Space => Command::TogglePause,
            KeyCode::F1 => Command::ToggleSettings,
            _ => return None,
        };
        Some(Action::Command(command))
    }
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn sanitize_scale(scale_factor: f64) -> f64 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    }
}
