//! Command handlers - business logic for processing UI events and API responses

use std::path::PathBuf;

use chrono::Utc;

use crate::app::form::PostForm;
use crate::app::state::{
    AppState, CreatePostState, Dialog, MutationKind, MutationPhase, PendingMutation,
    PostListState, RequestIds, Screen,
};
use crate::messages::ui_events::{InputMode, ScreenKind};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{ImageChange, NewPost, Post, PostUpdate};
use crate::network::ApiError;

impl PostListState {
    // ========================
    // Loading
    // ========================

    /// Initial fetch when the screen is entered
    pub fn mount(&mut self, id: u64) -> NetworkCommand {
        self.load_request = Some(id);
        NetworkCommand::ListPosts { id }
    }

    fn replace_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.highlighted = self.highlighted.min(self.posts.len().saturating_sub(1));
        self.last_refreshed = Some(Utc::now());
        self.error_message.clear();
    }

    /// Log a failure; also show it when list error reporting is on
    fn report_failure(&mut self, context: &str, error: &ApiError) {
        tracing::error!(error = %error, "{}", context);
        if self.report_errors {
            self.error_message = error.user_message();
        }
    }

    // ========================
    // Highlight
    // ========================

    pub fn next_post(&mut self) {
        if !self.posts.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.posts.len();
        }
    }

    pub fn prev_post(&mut self) {
        if !self.posts.is_empty() {
            self.highlighted = self
                .highlighted
                .checked_sub(1)
                .unwrap_or(self.posts.len() - 1);
        }
    }

    // ========================
    // Dialogs
    // ========================

    /// Open the edit dialog for `post_id`, seeded from the listed post.
    /// An id that is no longer listed opens an empty dialog with no target.
    pub fn begin_edit(&mut self, post_id: &str) {
        if self.is_loading() {
            return;
        }
        self.dialog = match self.find_post(post_id) {
            Some(post) => Dialog::Edit {
                target: Some(post.id.clone()),
                form: PostForm::seeded(&post.title, &post.description),
            },
            None => {
                tracing::warn!(post_id, "Post selected for edit is not in the list");
                Dialog::Edit {
                    target: None,
                    form: PostForm::default(),
                }
            }
        };
    }

    /// Open the delete confirmation for `post_id`
    pub fn begin_delete(&mut self, post_id: &str) {
        if self.is_loading() {
            return;
        }
        let target = self.find_post(post_id).map(|post| post.id.clone());
        if target.is_none() {
            tracing::warn!(post_id, "Post selected for delete is not in the list");
        }
        self.dialog = Dialog::Delete { target };
    }

    /// Close whichever dialog is open, clearing the selected post
    pub fn close_dialog(&mut self) {
        if !self.is_loading() {
            self.dialog = Dialog::Closed;
        }
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut PostForm> {
        match &mut self.dialog {
            Dialog::Edit { form, .. } => Some(form),
            _ => None,
        }
    }

    // ========================
    // Mutations
    // ========================

    /// Send the edit dialog's contents as an update
    pub fn submit_edit(&mut self, id: u64) -> Option<NetworkCommand> {
        if self.is_loading() {
            return None;
        }
        let Dialog::Edit { target, form } = &self.dialog else {
            return None;
        };
        let Some(post_id) = target.clone() else {
            tracing::warn!("Edit submitted without a selected post");
            return None;
        };

        let update = PostUpdate {
            id: post_id,
            title: form.title.clone(),
            description: form.description.clone(),
            image: ImageChange::from_input(&form.image_path),
        };
        self.start_mutation(id, MutationKind::Update);
        Some(NetworkCommand::UpdatePost { id, update })
    }

    /// Delete the post selected in the confirmation dialog
    pub fn confirm_delete(&mut self, id: u64) -> Option<NetworkCommand> {
        if self.is_loading() {
            return None;
        }
        let Dialog::Delete { target } = &self.dialog else {
            return None;
        };
        let Some(post_id) = target.clone() else {
            tracing::warn!("Delete confirmed without a selected post");
            return None;
        };

        self.start_mutation(id, MutationKind::Delete);
        Some(NetworkCommand::DeletePost { id, post_id })
    }

    fn start_mutation(&mut self, request_id: u64, kind: MutationKind) {
        self.error_message.clear();
        self.pending = Some(PendingMutation {
            request_id,
            kind,
            phase: MutationPhase::Writing,
        });
    }

    fn finish_mutation(&mut self) {
        self.pending = None;
        self.dialog = Dialog::Closed;
    }

    // ========================
    // Responses
    // ========================

    /// Apply an API response. Returns the reload to issue after a successful write.
    pub fn handle_response(
        &mut self,
        response: NetworkResponse,
        ids: &mut RequestIds,
    ) -> Option<NetworkCommand> {
        let response_id = response.id();

        if let Some(pending) = self.pending {
            if pending.request_id == response_id {
                return self.handle_mutation_response(pending, response, ids);
            }
        }

        if self.load_request == Some(response_id) {
            self.load_request = None;
            match response {
                NetworkResponse::PostsLoaded { posts, .. } => self.replace_posts(posts),
                NetworkResponse::Failed { error, .. } => {
                    self.report_failure("Error fetching posts", &error)
                }
                other => tracing::warn!(?other, "Unexpected response to a post list request"),
            }
            return None;
        }

        tracing::debug!(id = response_id, "Dropping response this screen is not waiting for");
        None
    }

    fn handle_mutation_response(
        &mut self,
        pending: PendingMutation,
        response: NetworkResponse,
        ids: &mut RequestIds,
    ) -> Option<NetworkCommand> {
        match (pending.phase, response) {
            (MutationPhase::Writing, NetworkResponse::PostUpdated { .. })
            | (MutationPhase::Writing, NetworkResponse::PostDeleted { .. }) => {
                let id = ids.next_id();
                self.pending = Some(PendingMutation {
                    request_id: id,
                    phase: MutationPhase::Reloading,
                    ..pending
                });
                Some(NetworkCommand::ListPosts { id })
            }
            (MutationPhase::Writing, NetworkResponse::Failed { error, .. }) => {
                self.pending = None;
                let context = match pending.kind {
                    MutationKind::Update => "Error updating post",
                    MutationKind::Delete => "Error deleting post",
                };
                self.report_failure(context, &error);
                None
            }
            (MutationPhase::Reloading, NetworkResponse::PostsLoaded { posts, .. }) => {
                self.replace_posts(posts);
                self.finish_mutation();
                None
            }
            (MutationPhase::Reloading, NetworkResponse::Failed { error, .. }) => {
                self.report_failure("Error fetching posts", &error);
                self.finish_mutation();
                None
            }
            (phase, other) => {
                tracing::warn!(?phase, ?other, "Unexpected response while {}", pending.kind.as_str());
                self.pending = None;
                None
            }
        }
    }
}

impl CreatePostState {
    /// Submit the form. Empty required fields block the request.
    pub fn submit(&mut self, id: u64) -> Option<NetworkCommand> {
        if self.is_loading() {
            return None;
        }
        if let Some(field) = self.form.first_empty(true) {
            self.missing_field = Some(field);
            self.form.focus_field(field);
            return None;
        }

        self.missing_field = None;
        self.pending_request = Some(id);
        let post = NewPost {
            title: self.form.title.clone(),
            description: self.form.description.clone(),
            image: PathBuf::from(self.form.image_path.trim()),
        };
        Some(NetworkCommand::CreatePost { id, post })
    }

    /// Apply an API response. Returns true once the post exists and the screen should leave.
    pub fn handle_response(&mut self, response: NetworkResponse) -> bool {
        if self.pending_request != Some(response.id()) {
            tracing::debug!(id = response.id(), "Dropping response this screen is not waiting for");
            return false;
        }
        self.pending_request = None;

        match response {
            NetworkResponse::PostCreated { .. } => true,
            NetworkResponse::Failed { error, .. } => {
                tracing::error!(error = %error, "Error creating post");
                self.error_message = error.user_message();
                false
            }
            other => {
                tracing::warn!(?other, "Unexpected response to a create request");
                false
            }
        }
    }
}

impl AppState {
    // ========================
    // Screens
    // ========================

    /// Requests the active screen needs when it is entered
    pub fn mount(&mut self) -> Option<NetworkCommand> {
        match &mut self.screen {
            Screen::Posts(list) => Some(list.mount(self.ids.next_id())),
            Screen::Create(_) => None,
        }
    }

    /// Leave the current screen, dropping its state, and enter `kind`
    pub fn navigate(&mut self, kind: ScreenKind) -> Option<NetworkCommand> {
        if self.screen.kind() == kind {
            return None;
        }
        self.input_mode = InputMode::Normal;
        self.screen = match kind {
            ScreenKind::Posts => Screen::Posts(PostListState::new(self.show_list_errors)),
            ScreenKind::Create => Screen::Create(CreatePostState::default()),
        };
        self.mount()
    }

    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        match &mut self.screen {
            Screen::Posts(list) => list.handle_response(response, &mut self.ids),
            Screen::Create(create) => {
                if create.handle_response(response) {
                    self.navigate(ScreenKind::Posts)
                } else {
                    None
                }
            }
        }
    }

    // ========================
    // Post list
    // ========================

    fn list_mut(&mut self) -> Option<&mut PostListState> {
        match &mut self.screen {
            Screen::Posts(list) => Some(list),
            Screen::Create(_) => None,
        }
    }

    pub fn next_post(&mut self) {
        if let Some(list) = self.list_mut() {
            list.next_post();
        }
    }

    pub fn prev_post(&mut self) {
        if let Some(list) = self.list_mut() {
            list.prev_post();
        }
    }

    pub fn edit_highlighted(&mut self) {
        if let Some(list) = self.list_mut() {
            if let Some(id) = list.highlighted_post().map(|post| post.id.clone()) {
                list.begin_edit(&id);
            }
        }
    }

    pub fn delete_highlighted(&mut self) {
        if let Some(list) = self.list_mut() {
            if let Some(id) = list.highlighted_post().map(|post| post.id.clone()) {
                list.begin_delete(&id);
            }
        }
    }

    pub fn close_dialog(&mut self) {
        self.input_mode = InputMode::Normal;
        if let Some(list) = self.list_mut() {
            list.close_dialog();
        }
    }

    pub fn confirm_delete(&mut self) -> Option<NetworkCommand> {
        let id = self.ids.next_id();
        self.list_mut()?.confirm_delete(id)
    }

    // ========================
    // Forms
    // ========================

    /// The form being shown: the create form or the edit dialog's
    fn active_form_mut(&mut self) -> Option<&mut PostForm> {
        match &mut self.screen {
            Screen::Posts(list) => list.edit_form_mut(),
            Screen::Create(create) => Some(&mut create.form),
        }
    }

    pub fn start_editing(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.focus_field(form.focus);
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn next_field(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.next_field();
        }
    }

    pub fn prev_field(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.prev_field();
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if let Screen::Create(create) = &mut self.screen {
            create.missing_field = None;
        }
        if let Some(form) = self.active_form_mut() {
            form.enter_char(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.delete_char();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.move_cursor_left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.move_cursor_right();
        }
    }

    /// Save the edit dialog or submit the create form
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        self.stop_editing();
        let id = self.ids.next_id();
        match &mut self.screen {
            Screen::Posts(list) => list.submit_edit(id),
            Screen::Create(create) => create.submit(id),
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
