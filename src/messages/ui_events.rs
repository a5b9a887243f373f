//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application screens
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ScreenKind {
    #[default]
    Posts,
    Create,
}

/// Which dialog is open over the post list
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DialogKind {
    #[default]
    None,
    Edit,
    Delete,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Screen navigation
    Navigate(ScreenKind),

    // Post list
    NextPost,
    PrevPost,
    EditHighlighted,
    DeleteHighlighted,

    // Form fields
    NextField,
    PrevField,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Actions
    Submit,
    ConfirmDelete,
    CloseDialog,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// A field of the post form
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
    Image,
}

impl FormField {
    pub fn next(&self) -> FormField {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Image,
            FormField::Image => FormField::Title,
        }
    }

    pub fn prev(&self) -> FormField {
        match self {
            FormField::Title => FormField::Image,
            FormField::Description => FormField::Title,
            FormField::Image => FormField::Description,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Image => "Image",
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    screen: ScreenKind,
    dialog: DialogKind,
    input_mode: InputMode,
    show_help: bool,
    is_loading: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // A request in flight blocks the screen
    if is_loading {
        return None;
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if input_mode == InputMode::Editing {
        return handle_editing_keys(key);
    }

    match (screen, dialog) {
        (ScreenKind::Posts, DialogKind::Edit) => handle_edit_dialog_keys(key),
        (ScreenKind::Posts, DialogKind::Delete) => handle_delete_dialog_keys(key),
        (ScreenKind::Posts, DialogKind::None) => handle_list_keys(key),
        (ScreenKind::Create, _) => handle_create_keys(key),
    }
}

/// Keys while typing into a form field
fn handle_editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

/// Keys on the post list with no dialog open
fn handle_list_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::NextPost),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::PrevPost),
        KeyCode::Char('e') => Some(UiEvent::EditHighlighted),
        KeyCode::Char('d') => Some(UiEvent::DeleteHighlighted),
        KeyCode::Char('2') | KeyCode::Char('n') => Some(UiEvent::Navigate(ScreenKind::Create)),
        _ => None,
    }
}

/// Keys in the edit dialog (not typing)
fn handle_edit_dialog_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::CloseDialog),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
        KeyCode::Char('s') => Some(UiEvent::Submit),
        _ => None,
    }
}

/// Keys in the delete confirmation dialog
fn handle_delete_dialog_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => Some(UiEvent::ConfirmDelete),
        KeyCode::Char('n') | KeyCode::Esc => Some(UiEvent::CloseDialog),
        _ => None,
    }
}

/// Keys on the create screen (not typing)
fn handle_create_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('1') | KeyCode::Esc => Some(UiEvent::Navigate(ScreenKind::Posts)),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
        KeyCode::Char('s') => Some(UiEvent::Submit),
        _ => None,
    }
}
