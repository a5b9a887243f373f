//! Network messages - communication between App and Network layers

use crate::models::{NewPost, Post, PostUpdate};
use crate::network::ApiError;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fetch the full post list
    ListPosts { id: u64 },
    /// Create a post
    CreatePost { id: u64, post: NewPost },
    /// Update a post
    UpdatePost { id: u64, update: PostUpdate },
    /// Delete a post by its identifier
    DeletePost { id: u64, post_id: String },
    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    /// Short operation name for logging
    pub fn operation(&self) -> &'static str {
        match self {
            NetworkCommand::ListPosts { .. } => "list",
            NetworkCommand::CreatePost { .. } => "create",
            NetworkCommand::UpdatePost { .. } => "update",
            NetworkCommand::DeletePost { .. } => "delete",
            NetworkCommand::Shutdown => "shutdown",
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// The post list was fetched
    PostsLoaded { id: u64, posts: Vec<Post> },
    /// A post was created
    PostCreated { id: u64 },
    /// A post was updated
    PostUpdated { id: u64 },
    /// A post was deleted
    PostDeleted { id: u64 },
    /// Any request failed
    Failed { id: u64, error: ApiError },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::PostsLoaded { id, .. } => *id,
            NetworkResponse::PostCreated { id } => *id,
            NetworkResponse::PostUpdated { id } => *id,
            NetworkResponse::PostDeleted { id } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, NetworkResponse::Failed { .. })
    }
}
