//! Hover / press / release state machine shared by buttons and checkboxes

use crate::event::InputEvent;

/// Visual state derived from the interaction flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovered,
    Pressed,
}

/// Pointer flags of an interactive widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interaction {
    pub(crate) hovered: bool,
    pub(crate) pressed: bool,
    pub(crate) reset_on_click: bool,
}

impl Interaction {
    pub fn state(&self) -> InteractionState {
        if self.pressed {
            InteractionState::Pressed
        } else if self.hovered {
            InteractionState::Hovered
        } else {
            InteractionState::Idle
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// When set, a release drops the hover look as if the pointer had left.
    pub fn reset_on_click(&self) -> bool {
        self.reset_on_click
    }

    pub fn set_reset_on_click(&mut self, reset: bool) {
        self.reset_on_click = reset;
    }
}

/// Effects a widget attaches to each transition.
///
/// [`dispatch`] updates the flags before calling the hook, so hooks observe
/// the new state.
pub(crate) trait InteractionHooks {
    fn interaction_mut(&mut self) -> &mut Interaction;

    fn on_start_hover(&mut self);

    fn on_end_hover(&mut self);

    fn on_click(&mut self);

    /// `away` is set when the pointer left the widget while pressed.
    fn on_release(&mut self, away: bool);
}

/// Run one event through the machine.
///
/// `inside` is whether the pointer is within the widget's hit area. Returns
/// whether the widget captures the pointer.
pub(crate) fn dispatch<H: InteractionHooks>(hooks: &mut H, event: &InputEvent, inside: bool) -> bool {
    let Interaction { hovered, .. } = *hooks.interaction_mut();

    if !inside {
        if hovered {
            hooks.interaction_mut().hovered = false;
            hooks.on_end_hover();
            if hooks.interaction_mut().pressed {
                hooks.interaction_mut().pressed = false;
                hooks.on_release(true);
            }
        }
        return false;
    }

    if !hovered {
        hooks.interaction_mut().hovered = true;
        hooks.on_start_hover();
    }

    if event.is_press() {
        hooks.interaction_mut().pressed = true;
        hooks.on_click();
    } else if event.is_release() && hooks.interaction_mut().pressed {
        let state = hooks.interaction_mut();
        state.pressed = false;
        if state.reset_on_click {
            state.hovered = false;
        }
        hooks.on_release(false);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        interaction: Interaction,
        log: Vec<&'static str>,
    }

    impl InteractionHooks for Recorder {
        fn interaction_mut(&mut self) -> &mut Interaction {
            &mut self.interaction
        }
        fn on_start_hover(&mut self) {
            self.log.push("start_hover");
        }
        fn on_end_hover(&mut self) {
            self.log.push("end_hover");
        }
        fn on_click(&mut self) {
            self.log.push("click");
        }
        fn on_release(&mut self, away: bool) {
            self.log.push(if away { "release_away" } else { "release" });
        }
    }

    const MOVE: InputEvent = InputEvent::PointerMoved { position: Vec2::ZERO };
    const PRESS: InputEvent = InputEvent::ButtonPressed { button: MouseButton::Left };
    const RELEASE: InputEvent = InputEvent::ButtonReleased { button: MouseButton::Left };

    #[test]
    fn test_full_click_cycle() {
        let mut r = Recorder::default();
        assert!(dispatch(&mut r, &MOVE, true));
        assert!(dispatch(&mut r, &PRESS, true));
        assert_eq!(r.interaction.state(), InteractionState::Pressed);
        assert!(dispatch(&mut r, &RELEASE, true));
        assert_eq!(r.interaction.state(), InteractionState::Hovered);
        assert!(!dispatch(&mut r, &MOVE, false));
        assert_eq!(r.log, vec!["start_hover", "click", "release", "end_hover"]);
    }

    #[test]
    fn test_leaving_while_pressed_releases_away() {
        let mut r = Recorder::default();
        dispatch(&mut r, &MOVE, true);
        dispatch(&mut r, &PRESS, true);
        assert!(!dispatch(&mut r, &MOVE, false));
        assert_eq!(r.log, vec!["start_hover", "click", "end_hover", "release_away"]);
        assert_eq!(r.interaction.state(), InteractionState::Idle);

        // A later release outside does nothing
        assert!(!dispatch(&mut r, &RELEASE, false));
        assert_eq!(r.log.len(), 4);
    }

    #[test]
    fn test_release_without_press_ignored() {
        let mut r = Recorder::default();
        dispatch(&mut r, &RELEASE, true);
        assert_eq!(r.log, vec!["start_hover"]);
    }

    #[test]
    fn test_reset_on_click_rehovers() {
        let mut r = Recorder::default();
        r.interaction.set_reset_on_click(true);
        dispatch(&mut r, &PRESS, true);
        dispatch(&mut r, &RELEASE, true);
        assert_eq!(r.interaction.state(), InteractionState::Idle);
        dispatch(&mut r, &MOVE, true);
        assert_eq!(r.log, vec!["start_hover", "click", "release", "start_hover"]);
    }

    #[test]
    fn test_outside_idle_is_silent() {
        let mut r = Recorder::default();
        assert!(!dispatch(&mut r, &PRESS, false));
        assert!(r.log.is_empty());
    }
}
