use super::{NavTarget, UiEvent, WindowAction, WindowController};
use crate::keys::{Key, KeyEvent, KeyOutcome, Modifiers};
use crate::statemachine::UserEvent;
use crate::view::InputLine;

impl WindowController {
    /// Route a key press from the input line. Anything not consumed goes
    /// on to the text editor, as the returned event when it was translated.
    pub fn key_press(&mut self, event: KeyEvent) -> KeyOutcome {
        if let Some(action) = WindowAction::matching(&event) {
            self.trigger_window_action(action);
            return KeyOutcome::Consumed;
        }

        if !self.edit_mode
            && let Some(translated) = event.emacs_translation()
        {
            return match self.key_press(translated) {
                KeyOutcome::Ignored => KeyOutcome::Forward(translated),
                outcome => outcome,
            };
        }

        if event.is_chord(Modifiers::CONTROL, 'w') {
            self.edit_input(InputLine::delete_word_backwards);
            return KeyOutcome::Consumed;
        }

        let shift = event.modifiers.shift;
        match event.key {
            Key::Tab if !self.edit_mode => {
                self.edit_input(InputLine::complete);
                return KeyOutcome::Consumed;
            }

            Key::Up if !self.edit_mode => {
                let at_top = self.results.current_row().is_none_or(|row| row < 1);
                if shift
                    || (self.nav != Some(NavTarget::Actions) && at_top && !event.auto_repeat)
                {
                    self.edit_input(InputLine::next);
                } else {
                    self.navigate(&event);
                }
                return KeyOutcome::Consumed;
            }

            Key::Down if !self.edit_mode => {
                if shift {
                    self.edit_input(InputLine::previous);
                } else {
                    self.navigate(&event);
                }
                return KeyOutcome::Consumed;
            }

            Key::PageUp | Key::PageDown => {
                if !self.edit_mode {
                    self.navigate(&event);
                }
                return KeyOutcome::Consumed;
            }

            Key::Return | Key::Enter => {
                if event.modifiers == self.prefs.command_modifier.as_modifiers() {
                    self.post(UiEvent::User(UserEvent::ToggleActions));
                    return KeyOutcome::Consumed;
                }
                if !self.edit_mode {
                    if shift {
                        self.edit_input(|input| input.insert("\n"));
                        return KeyOutcome::Consumed;
                    }
                    if self.has_current_row() {
                        self.activate_current(false);
                        return KeyOutcome::Consumed;
                    }
                }
            }

            Key::Char(c)
                if c.eq_ignore_ascii_case(&'o')
                    && event.modifiers.control
                    && !self.edit_mode
                    && self.has_current_row() =>
            {
                self.activate_current(shift);
                return KeyOutcome::Consumed;
            }

            Key::Escape => {
                if self.edit_mode {
                    self.set_edit_mode(false);
                } else {
                    self.hide();
                }
                return KeyOutcome::Consumed;
            }

            _ => {}
        }

        if event.key == self.prefs.actions_modifier.key() {
            self.post(UiEvent::User(UserEvent::ShowActions));
            return KeyOutcome::Consumed;
        }
        if event.key == self.prefs.fallbacks_modifier.key() {
            self.post(UiEvent::User(UserEvent::ShowFallbacks));
            return KeyOutcome::Consumed;
        }
        KeyOutcome::Ignored
    }

    /// Releasing the actions or fallbacks modifier hides what pressing it
    /// showed.
    pub fn key_release(&mut self, event: KeyEvent) -> bool {
        if event.key == self.prefs.actions_modifier.key() {
            self.post(UiEvent::User(UserEvent::HideActions));
            true
        } else if event.key == self.prefs.fallbacks_modifier.key() {
            self.post(UiEvent::User(UserEvent::HideFallbacks));
            true
        } else {
            false
        }
    }

    fn navigate(&mut self, event: &KeyEvent) {
        match self.nav {
            Some(NavTarget::Results) => {
                if self.results.handle_key(event) {
                    self.update_completion();
                }
            }
            Some(NavTarget::Actions) => {
                self.actions.handle_key(event);
            }
            None => {}
        }
    }

    fn has_current_row(&self) -> bool {
        match self.nav {
            Some(NavTarget::Results) => self.results.current_row().is_some(),
            Some(NavTarget::Actions) => self.actions.current_row().is_some(),
            None => false,
        }
    }

    fn edit_input(&mut self, edit: impl FnOnce(&mut InputLine)) {
        let before = self.input.text().to_string();
        edit(&mut self.input);
        self.input_changed(&before);
    }
}
