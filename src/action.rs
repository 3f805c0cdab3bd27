/// User intents produced by key handling and dispatched by the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,

    // Category tabs and record list
    NextCategory,
    PrevCategory,
    SelectNext,
    SelectPrev,
    Reload,

    // Record actions
    BeginAdd,
    BeginEdit,
    RequestDelete,
    ConfirmDelete,
    RejectDelete,
    Activate,
    Test,

    // Form editing
    Save,
    Cancel,
    FormNextField,
    FormPrevField,
    FormInput(char),
    FormPaste(String),
    FormBackspace,
    FormClear,
    FormCycle(bool),
    FormToggleEnv,
    FormToggleReveal,

    // Preferences
    CycleTheme,
    ToggleLanguage,

    DismissNotification,
}
