//! App state - pure data structure with no I/O logic

use chrono::{DateTime, Utc};

use crate::app::form::PostForm;
use crate::config::Config;
use crate::messages::ui_events::{DialogKind, FormField, InputMode, ScreenKind};
use crate::messages::RenderState;
use crate::models::Post;

/// Dialog over the post list. Being one value, at most one dialog is ever open.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Dialog {
    #[default]
    Closed,
    /// `target` is None when the chosen id was no longer in the list
    Edit { target: Option<String>, form: PostForm },
    Delete { target: Option<String> },
}

impl Dialog {
    pub fn kind(&self) -> DialogKind {
        match self {
            Dialog::Closed => DialogKind::None,
            Dialog::Edit { .. } => DialogKind::Edit,
            Dialog::Delete { .. } => DialogKind::Delete,
        }
    }

    /// Identifier of the selected post, if any
    pub fn target(&self) -> Option<&str> {
        match self {
            Dialog::Closed => None,
            Dialog::Edit { target, .. } | Dialog::Delete { target } => target.as_deref(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    Update,
    Delete,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Update => "updating",
            MutationKind::Delete => "deleting",
        }
    }
}

/// Where an in-flight edit or delete is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationPhase {
    /// Waiting for the update/delete response
    Writing,
    /// Write succeeded; waiting for the list reload
    Reloading,
}

/// An edit or delete in flight. Its request id changes when the reload is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingMutation {
    pub request_id: u64,
    pub kind: MutationKind,
    pub phase: MutationPhase,
}

/// State of the post list screen
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostListState {
    pub posts: Vec<Post>,
    /// Index of the highlighted row
    pub highlighted: usize,
    pub dialog: Dialog,
    pub pending: Option<PendingMutation>,
    /// Id of an outstanding plain load (mount)
    pub load_request: Option<u64>,
    /// Empty means no error
    pub error_message: String,
    /// Write list/edit/delete failures into `error_message`
    pub report_errors: bool,
    pub last_refreshed: Option<DateTime<Utc>>,
}

impl PostListState {
    pub fn new(report_errors: bool) -> Self {
        PostListState {
            report_errors,
            ..PostListState::default()
        }
    }

    /// True while an edit or delete is in flight
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn highlighted_post(&self) -> Option<&Post> {
        self.posts.get(self.highlighted)
    }

    pub fn find_post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }
}

/// State of the post creation screen
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreatePostState {
    pub form: PostForm,
    pub pending_request: Option<u64>,
    /// Empty means no error
    pub error_message: String,
    /// Required field that was empty on the last submit
    pub missing_field: Option<FormField>,
}

impl CreatePostState {
    pub fn is_loading(&self) -> bool {
        self.pending_request.is_some()
    }
}

/// The active screen and its private state
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Posts(PostListState),
    Create(CreatePostState),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Posts(_) => ScreenKind::Posts,
            Screen::Create(_) => ScreenKind::Create,
        }
    }

    pub fn dialog_kind(&self) -> DialogKind {
        match self {
            Screen::Posts(list) => list.dialog.kind(),
            Screen::Create(_) => DialogKind::None,
        }
    }

    pub fn is_loading(&self) -> bool {
        match self {
            Screen::Posts(list) => list.is_loading(),
            Screen::Create(create) => create.is_loading(),
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Posts(PostListState::default())
    }
}

/// Monotonic request id source
#[derive(Clone, Debug)]
pub struct RequestIds {
    next: u64,
}

impl Default for RequestIds {
    fn default() -> Self {
        RequestIds { next: 1 }
    }
}

impl RequestIds {
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub ids: RequestIds,

    // Settings copied from config
    pub api_base_url: String,
    pub show_list_errors: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            screen: Screen::Posts(PostListState::new(config.show_list_errors)),
            input_mode: InputMode::Normal,
            show_help: false,
            ids: RequestIds::default(),
            api_base_url: config.api_base_url.clone(),
            show_list_errors: config.show_list_errors,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            screen: self.screen.clone(),
            input_mode: self.input_mode,
            show_help: self.show_help,
            api_base_url: self.api_base_url.clone(),
        }
    }
}
