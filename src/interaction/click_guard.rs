//! Drag-aware click detection
//!
//! Pan gestures start on the same surface as switch and arrow clicks, so a
//! press that moved before release must not be reported as a click.
//!
//! ## States
//! - Idle: no press on this element
//! - Pressed: pressed, not moved since
//! - Dragging: pressed, then moved

/// Mouse button reported by a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl PointerButton {
    /// Map the DOM `MouseEvent.button` code
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => PointerButton::Primary,
            1 => PointerButton::Auxiliary,
            2 => PointerButton::Secondary,
            other => PointerButton::Other(other),
        }
    }

    pub fn is_primary(self) -> bool {
        self == PointerButton::Primary
    }
}

/// Cursor shown over an interactive element or the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
    Move,
}

impl Cursor {
    /// Inline style applied to the element
    pub fn style(self) -> &'static str {
        match self {
            Cursor::Default => "cursor: default",
            Cursor::Pointer => "cursor: pointer",
            Cursor::Move => "cursor: move",
        }
    }
}

/// Press state of one interactive element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressState {
    #[default]
    Idle,
    Pressed,
    Dragging,
}

/// Outcome of feeding one pointer event to a guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardOutcome {
    /// Cursor to show, if the event changes it
    pub cursor: Option<Cursor>,
    /// Whether the click callback should run
    pub fire: bool,
}

impl GuardOutcome {
    fn quiet() -> Self {
        Self {
            cursor: None,
            fire: false,
        }
    }

    fn cursor(cursor: Cursor) -> Self {
        Self {
            cursor: Some(cursor),
            fire: false,
        }
    }
}

/// Click guard for one element
#[derive(Debug, Clone, Default)]
pub struct ClickGuard {
    state: PressState,
}

impl ClickGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PressState {
        self.state
    }

    /// Any button pressed on the element starts a fresh press
    pub fn pointer_down(&mut self) -> GuardOutcome {
        self.state = PressState::Pressed;
        GuardOutcome::quiet()
    }

    pub fn pointer_move(&mut self) -> GuardOutcome {
        match self.state {
            PressState::Idle => GuardOutcome::cursor(Cursor::Pointer),
            PressState::Pressed | PressState::Dragging => {
                self.state = PressState::Dragging;
                GuardOutcome::cursor(Cursor::Move)
            }
        }
    }

    /// Release ends the press; only an undragged primary click fires
    pub fn pointer_up(&mut self, button: PointerButton) -> GuardOutcome {
        let was = std::mem::take(&mut self.state);

        GuardOutcome {
            cursor: Some(Cursor::Pointer),
            fire: was == PressState::Pressed && button.is_primary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_fires() {
        let mut guard = ClickGuard::new();
        guard.pointer_down();
        assert_eq!(guard.state(), PressState::Pressed);

        let outcome = guard.pointer_up(PointerButton::Primary);
        assert!(outcome.fire);
        assert_eq!(outcome.cursor, Some(Cursor::Pointer));
        assert_eq!(guard.state(), PressState::Idle);
    }

    #[test]
    fn test_drag_suppresses_click() {
        let mut guard = ClickGuard::new();
        guard.pointer_down();
        assert_eq!(guard.pointer_move().cursor, Some(Cursor::Move));
        assert_eq!(guard.state(), PressState::Dragging);

        assert!(!guard.pointer_up(PointerButton::Primary).fire);
    }

    #[test]
    fn test_hover_move_keeps_pointer_cursor() {
        let mut guard = ClickGuard::new();
        let outcome = guard.pointer_move();
        assert_eq!(outcome.cursor, Some(Cursor::Pointer));
        assert_eq!(guard.state(), PressState::Idle);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut guard = ClickGuard::new();
        assert!(!guard.pointer_up(PointerButton::Primary).fire);
    }

    #[test]
    fn test_new_press_clears_previous_drag() {
        let mut guard = ClickGuard::new();
        guard.pointer_down();
        guard.pointer_move();
        guard.pointer_up(PointerButton::Primary);

        guard.pointer_down();
        assert!(guard.pointer_up(PointerButton::Primary).fire);
    }

    #[test]
    fn test_non_primary_buttons() {
        for code in [1, 2, 3, 4] {
            let mut guard = ClickGuard::new();
            guard.pointer_down();
            assert!(!guard.pointer_up(PointerButton::from_dom(code)).fire);
        }
        assert_eq!(PointerButton::from_dom(7), PointerButton::Other(7));
    }
}
