//! Per-tick input and jump intent resolution

use glam::IVec2;

/// Jump intent for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpPress {
    #[default]
    None,
    Left,
    Right,
    /// Both directions at once: drop the charge
    Cancel,
}

/// Level-triggered directional keys, already merged across key bindings
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub keys: KeyState,
    /// Current touch contact positions in screen pixels
    pub touches: Vec<IVec2>,
    /// Quit (held)
    pub quit: bool,
    /// Fullscreen toggle (just pressed)
    pub toggle_fullscreen: bool,
    /// Debug: skip to the next level (just pressed)
    pub next_level: bool,
    /// Debug: zero the jump counter (just pressed)
    pub reset_jumps: bool,
    /// Move on from the win screen (just pressed)
    pub advance: bool,
}

/// Resolve keys, then touch, into a single jump intent
///
/// Touch is only consulted when no directional key is held.
pub fn resolve_press(keys: KeyState, touches: &[IVec2], viewport_width: i32) -> JumpPress {
    match (keys.left, keys.right) {
        (true, true) => return JumpPress::Cancel,
        (true, false) => return JumpPress::Left,
        (false, true) => return JumpPress::Right,
        (false, false) => {}
    }

    match touches {
        [] => JumpPress::None,
        [touch] => {
            // A lifted contact can still report x = 0 for a frame
            if touch.x == 0 {
                JumpPress::None
            } else if touch.x < viewport_width / 2 {
                JumpPress::Left
            } else {
                JumpPress::Right
            }
        }
        _ => JumpPress::Cancel,
    }
}

impl TickInput {
    pub fn press(&self, viewport_width: i32) -> JumpPress {
        resolve_press(self.keys, &self.touches, viewport_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: i32 = 640;

    fn keys(left: bool, right: bool) -> KeyState {
        KeyState { left, right }
    }

    #[test]
    fn test_keyboard() {
        assert_eq!(resolve_press(keys(false, false), &[], W), JumpPress::None);
        assert_eq!(resolve_press(keys(true, false), &[], W), JumpPress::Left);
        assert_eq!(resolve_press(keys(false, true), &[], W), JumpPress::Right);
        assert_eq!(resolve_press(keys(true, true), &[], W), JumpPress::Cancel);
    }

    #[test]
    fn test_keyboard_wins_over_touch() {
        let touches = [IVec2::new(600, 10)];
        assert_eq!(resolve_press(keys(true, false), &touches, W), JumpPress::Left);
    }

    #[test]
    fn test_single_touch_halves() {
        let none = keys(false, false);
        assert_eq!(resolve_press(none, &[IVec2::new(10, 200)], W), JumpPress::Left);
        assert_eq!(resolve_press(none, &[IVec2::new(319, 0)], W), JumpPress::Left);
        assert_eq!(resolve_press(none, &[IVec2::new(320, 0)], W), JumpPress::Right);
        assert_eq!(resolve_press(none, &[IVec2::new(0, 100)], W), JumpPress::None);
    }

    #[test]
    fn test_multi_touch_cancels() {
        let none = keys(false, false);
        let both = [IVec2::new(10, 10), IVec2::new(630, 10)];
        assert_eq!(resolve_press(none, &both, W), JumpPress::Cancel);
        let same_side = [IVec2::new(10, 10), IVec2::new(20, 10)];
        assert_eq!(resolve_press(none, &same_side, W), JumpPress::Cancel);
    }

    #[test]
    fn test_tick_input_press() {
        let input = TickInput {
            touches: vec![IVec2::new(500, 5)],
            ..Default::default()
        };
        assert_eq!(input.press(W), JumpPress::Right);
    }
}
