mod update;


use std::path::Path;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use jdmatch_core::{FormController, InputMode, ResumeFile};

use crate::model::field::TextField;
use crate::theme::Theme;
use crate::tui_event::{BackendCommand, BackendEvent};

/// Ticks the banner stays up before showing the form on its own.
const BANNER_TICKS: usize = 15;

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Banner,
    Form,
    Results,
}

/// Key mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    Normal,
    Editing,
}

/// Which form box has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Resume,
    JobDescription,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Resume => Focus::JobDescription,
            Focus::JobDescription => Focus::Resume,
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub key_mode: KeyMode,
    pub focus: Focus,
    pub show_help: bool,
    pub should_quit: bool,
    pub theme: Theme,
    pub tick: usize,

    /// Owns mode, sources, and the request lifecycle.
    pub form: FormController,
    pub resume_path: TextField,
    pub resume_text: TextField,
    pub job_description: TextField,
    /// Path the currently held resume file was loaded from.
    pub loaded_path: Option<String>,
    /// Informational line under the form (file loaded, read failed).
    pub notice: Option<String>,

    pub results_scroll: u16,
    pub visible_rows: u16,

    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        Self {
            screen: Screen::Banner,
            key_mode: KeyMode::Normal,
            focus: Focus::Resume,
            show_help: false,
            should_quit: false,
            theme,
            tick: 0,
            form: FormController::new(),
            resume_path: TextField::single_line(),
            resume_text: TextField::multi_line(),
            job_description: TextField::multi_line(),
            loaded_path: None,
            notice: None,
            results_scroll: 0,
            visible_rows: 20,
            backend_cmd_tx: None,
        }
    }

    /// The field that receives keystrokes for the current focus and mode.
    pub fn focused_field(&mut self) -> &mut TextField {
        match (self.focus, self.form.input_mode()) {
            (Focus::Resume, InputMode::File) => &mut self.resume_path,
            (Focus::Resume, InputMode::Text) => &mut self.resume_text,
            (Focus::JobDescription, _) => &mut self.job_description,
        }
    }

    /// Push edited text into the controller.
    fn sync_text_fields(&mut self) {
        self.form.set_resume_text(self.resume_text.as_str());
        self.form.set_job_description(self.job_description.as_str());
    }

    /// Load the file named in the path field, if it changed since the last load.
    pub fn commit_resume_path(&mut self) {
        let path = self.resume_path.as_str().trim().to_string();
        if self.loaded_path.as_deref() == Some(path.as_str()) {
            return;
        }
        if path.is_empty() {
            self.form.set_resume_file(None);
            self.loaded_path = None;
            self.notice = None;
            return;
        }

        match ResumeFile::from_path(Path::new(&path)) {
            Ok(file) => {
                tracing::info!(path = %path, bytes = file.bytes.len(), "resume file loaded");
                self.notice = Some(format!("Loaded {} ({} bytes)", file.file_name, file.bytes.len()));
                self.form.set_resume_file(Some(file));
                self.loaded_path = Some(path);
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "could not read resume file");
                self.notice = Some(format!("Could not read {path}: {e}"));
                self.form.set_resume_file(None);
                self.loaded_path = None;
            }
        }
    }

    /// Insert pasted text into the focused field.
    pub fn paste(&mut self, text: &str) {
        if self.key_mode != KeyMode::Editing {
            return;
        }
        let field = self.focused_field();
        for ch in text.chars() {
            field.insert(if ch == '\r' { '\n' } else { ch });
        }
        self.sync_text_fields();
    }

    /// Validate and dispatch the form to the backend.
    fn submit(&mut self) {
        if self.form.is_submitting() {
            tracing::debug!("submit ignored: request in flight");
            return;
        }
        if self.key_mode == KeyMode::Editing {
            self.key_mode = KeyMode::Normal;
        }
        self.sync_text_fields();
        if self.form.input_mode() == InputMode::File {
            self.commit_resume_path();
        }

        let Ok(submission) = self.form.begin_submit() else {
            self.screen = Screen::Form;
            return;
        };
        let ticket = submission.ticket;

        let sent = match &self.backend_cmd_tx {
            Some(tx) => tx.send(BackendCommand::Submit(submission)).is_ok(),
            None => false,
        };
        if !sent {
            self.handle_backend_event(BackendEvent::MatchFinished {
                ticket,
                outcome: Err(jdmatch_core::RequestError::Dispatch(
                    "backend is not running".to_string(),
                )),
            });
        }
    }

    /// Apply an event from the backend task.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::MatchFinished { ticket, outcome } => {
                if !self.form.finish(ticket, outcome) {
                    return;
                }
                if self.form.result().is_some() {
                    self.screen = Screen::Results;
                    self.results_scroll = 0;
                } else {
                    // The error line lives on the form.
                    self.screen = Screen::Form;
                }
            }
        }
    }

    fn dismiss_banner(&mut self) {
        if self.screen == Screen::Banner {
            self.screen = Screen::Form;
        }
    }

    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();

        if self.screen == Screen::Banner {
            crate::view::banner::render(f, &self.theme, self.tick, BANNER_TICKS);
            return;
        }

        let header_area = Rect { height: 1.min(area.height), ..area };
        let footer_area = Rect {
            y: area.y + area.height.saturating_sub(1),
            height: 1.min(area.height),
            ..area
        };
        let body_area = Rect {
            y: area.y + 1,
            height: area.height.saturating_sub(2),
            ..area
        };
        self.visible_rows = body_area.height;

        crate::view::render_header(f, self, header_area);
        match self.screen {
            Screen::Form => crate::view::form::render_in(f, self, body_area),
            Screen::Results => crate::view::results::render_in(f, self, body_area),
            Screen::Banner => {}
        }
        crate::view::render_footer(f, self, footer_area);

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }
    }

    pub fn banner_expired(&self) -> bool {
        self.tick >= BANNER_TICKS
    }
}
