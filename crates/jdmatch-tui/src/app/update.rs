use super::{App, KeyMode, Screen};
use crate::action::Action;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return true;
            }
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                if self.screen == Screen::Banner && self.banner_expired() {
                    self.dismiss_banner();
                }
                return false;
            }
            Action::Resize(_w, h) => {
                self.visible_rows = h.saturating_sub(2);
                return false;
            }
            Action::None => return false,
            _ => {}
        }

        // Any key leaves the banner
        if self.screen == Screen::Banner {
            self.dismiss_banner();
            return false;
        }

        // Help overlay swallows everything but its own toggle and Esc
        if self.show_help {
            if matches!(action, Action::ToggleHelp | Action::NavigateBack) {
                self.show_help = false;
            }
            return false;
        }

        match self.screen {
            Screen::Form => self.update_form(action),
            Screen::Results => self.update_results(action),
            Screen::Banner => {}
        }
        false
    }

    fn update_form(&mut self, action: Action) {
        match action {
            Action::ToggleHelp => self.show_help = true,
            Action::Submit => self.submit(),
            Action::ToggleResumeMode => {
                self.form.toggle_input_mode();
            }
            Action::FocusNext | Action::FocusPrev => {
                self.leave_field();
                self.focus = self.focus.next();
            }
            Action::StartEditing => self.key_mode = KeyMode::Editing,
            Action::StopEditing => {
                self.leave_field();
                self.key_mode = KeyMode::Normal;
            }
            Action::InsertChar(ch) => {
                self.focused_field().insert(ch);
                self.sync_text_fields();
            }
            Action::InsertNewline => {
                let field = self.focused_field();
                if field.is_multiline() {
                    field.insert('\n');
                    self.sync_text_fields();
                } else {
                    // Enter on a single-line field confirms it
                    self.leave_field();
                    self.key_mode = KeyMode::Normal;
                }
            }
            Action::Backspace => {
                self.focused_field().backspace();
                self.sync_text_fields();
            }
            Action::CursorLeft => self.focused_field().move_left(),
            Action::CursorRight => self.focused_field().move_right(),
            Action::ShowResults => {
                if self.form.result().is_some() {
                    self.screen = Screen::Results;
                }
            }
            _ => {}
        }
    }

    fn update_results(&mut self, action: Action) {
        let page = self.visible_rows.saturating_sub(2).max(1);
        match action {
            Action::ToggleHelp => self.show_help = true,
            Action::NavigateBack => self.screen = Screen::Form,
            Action::ScrollDown => self.results_scroll = self.results_scroll.saturating_add(1),
            Action::ScrollUp => self.results_scroll = self.results_scroll.saturating_sub(1),
            Action::PageDown => self.results_scroll = self.results_scroll.saturating_add(page),
            Action::PageUp => self.results_scroll = self.results_scroll.saturating_sub(page),
            Action::GoTop => self.results_scroll = 0,
            Action::Submit => self.submit(),
            _ => {}
        }
    }

    /// Finish with the focused field: a file path gets loaded on the way out.
    fn leave_field(&mut self) {
        if self.focus == super::Focus::Resume
            && self.form.input_mode() == jdmatch_core::InputMode::File
        {
            self.commit_resume_path();
        }
    }
}
