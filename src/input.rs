//! Host events and their translation from crossterm.
//!
//! The app consumes [`HostEvent`]s only; crossterm types stop here except
//! for key events, which views match on directly.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Everything the host loop feeds into [`App::step`](crate::app::App::step).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Time to draw a frame.
    Frame,
    Input(InputEvent),
    /// Platform back navigation (Esc, Alt+Left).
    Back,
    Resize(u16, u16),
    Shutdown,
}

/// Input routed to the active view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Pointer(PointerEvent),
    /// Lines to scroll; negative is up.
    Scroll(i16),
    Paste(String),
    /// An app bar action of the active view was activated, by index.
    Action(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: u16,
    pub y: u16,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: u16, y: u16) -> Self {
        Self { kind, x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    /// Moved while pressed.
    Move,
    Up,
    /// The platform took the pointer away mid-gesture.
    Cancel,
    /// Moved with no button pressed.
    Hover,
}

impl InputEvent {
    pub fn key(code: KeyCode) -> Self {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub fn pointer(kind: PointerKind, x: u16, y: u16) -> Self {
        InputEvent::Pointer(PointerEvent::new(kind, x, y))
    }
}

/// Translate a crossterm event. Returns `None` for events the app ignores.
pub fn from_crossterm(event: Event) -> Option<HostEvent> {
    match event {
        Event::Key(key) => from_key(key),
        Event::Mouse(mouse) => from_mouse(mouse).map(HostEvent::Input),
        Event::Paste(text) => Some(HostEvent::Input(InputEvent::Paste(text))),
        Event::Resize(width, height) => Some(HostEvent::Resize(width, height)),
        // Losing focus mid-drag must not leave a row stuck under the pointer.
        Event::FocusLost => Some(HostEvent::Input(InputEvent::pointer(PointerKind::Cancel, 0, 0))),
        Event::FocusGained => None,
    }
}

fn from_key(key: KeyEvent) -> Option<HostEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(HostEvent::Shutdown),
        (KeyCode::Esc, _) => Some(HostEvent::Back),
        (KeyCode::Left, KeyModifiers::ALT) => Some(HostEvent::Back),
        _ => Some(HostEvent::Input(InputEvent::Key(key))),
    }
}

fn from_mouse(mouse: MouseEvent) -> Option<InputEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
        MouseEventKind::Drag(MouseButton::Left) => PointerKind::Move,
        MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
        MouseEventKind::Moved => PointerKind::Hover,
        MouseEventKind::ScrollUp => return Some(InputEvent::Scroll(-1)),
        MouseEventKind::ScrollDown => return Some(InputEvent::Scroll(1)),
        _ => return None,
    };
    Some(InputEvent::pointer(kind, mouse.column, mouse.row))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_ctrl_c_is_shutdown() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(from_crossterm(event), Some(HostEvent::Shutdown));
    }

    #[test]
    fn test_escape_and_alt_left_are_back() {
        let esc = Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        let alt_left = Event::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::ALT));
        assert_eq!(from_crossterm(esc), Some(HostEvent::Back));
        assert_eq!(from_crossterm(alt_left), Some(HostEvent::Back));
    }

    #[test]
    fn test_plain_keys_pass_through() {
        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(
            from_crossterm(Event::Key(key)),
            Some(HostEvent::Input(InputEvent::Key(key)))
        );
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(from_crossterm(Event::Key(key)), None);
    }

    #[test]
    fn test_mouse_mapping() {
        assert_eq!(
            from_crossterm(mouse(MouseEventKind::Down(MouseButton::Left), 3, 4)),
            Some(HostEvent::Input(InputEvent::pointer(PointerKind::Down, 3, 4)))
        );
        assert_eq!(
            from_crossterm(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 4)),
            Some(HostEvent::Input(InputEvent::pointer(PointerKind::Move, 5, 4)))
        );
        assert_eq!(
            from_crossterm(mouse(MouseEventKind::Up(MouseButton::Left), 5, 4)),
            Some(HostEvent::Input(InputEvent::pointer(PointerKind::Up, 5, 4)))
        );
        assert_eq!(
            from_crossterm(mouse(MouseEventKind::Moved, 1, 1)),
            Some(HostEvent::Input(InputEvent::pointer(PointerKind::Hover, 1, 1)))
        );
        assert_eq!(
            from_crossterm(mouse(MouseEventKind::ScrollDown, 0, 0)),
            Some(HostEvent::Input(InputEvent::Scroll(1)))
        );
        assert_eq!(
            from_crossterm(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)),
            None
        );
    }

    #[test]
    fn test_focus_lost_cancels_pointer() {
        assert_eq!(
            from_crossterm(Event::FocusLost),
            Some(HostEvent::Input(InputEvent::pointer(PointerKind::Cancel, 0, 0)))
        );
        assert_eq!(from_crossterm(Event::FocusGained), None);
    }
}
