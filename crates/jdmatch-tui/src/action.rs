/// Everything the user can ask the TUI to do, after key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,
    Resize(u16, u16),
    ToggleHelp,

    // Form
    ToggleResumeMode,
    FocusNext,
    FocusPrev,
    StartEditing,
    StopEditing,
    InsertChar(char),
    InsertNewline,
    Backspace,
    CursorLeft,
    CursorRight,
    Submit,

    // Navigation
    ShowResults,
    NavigateBack,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    GoTop,

    None,
}
