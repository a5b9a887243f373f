//! Network actor - runs Post API calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::PostApiClient;

/// Network actor that executes Post API commands.
///
/// Every command runs as its own task; nothing is cancelled once started.
pub struct NetworkActor {
    client: PostApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: PostApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => break,
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }

    fn spawn(&mut self, cmd: NetworkCommand) {
        let client = self.client.clone();
        let response_tx = self.response_tx.clone();

        self.active_requests.spawn(async move {
            let operation = cmd.operation();
            let Some(response) = execute(&client, cmd).await else {
                return;
            };
            let id = response.id();
            tracing::info!(id, operation, success = response.is_success(), "Request completed");
            let _ = response_tx.send(response);
        });
    }
}

/// Run one command against the API and wrap the outcome
pub async fn execute(client: &PostApiClient, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::ListPosts { id } => {
            tracing::info!(id, url = %client.list_url(), "Fetching posts");
            match client.list_posts().await {
                Ok(posts) => NetworkResponse::PostsLoaded { id, posts },
                Err(error) => NetworkResponse::Failed { id, error },
            }
        }
        NetworkCommand::CreatePost { id, post } => {
            tracing::info!(id, title = %post.title, "Creating post");
            match client.create_post(post).await {
                Ok(()) => NetworkResponse::PostCreated { id },
                Err(error) => NetworkResponse::Failed { id, error },
            }
        }
        NetworkCommand::UpdatePost { id, update } => {
            tracing::info!(id, post_id = %update.id, replace_image = ?update.image, "Updating post");
            match client.update_post(update).await {
                Ok(()) => NetworkResponse::PostUpdated { id },
                Err(error) => NetworkResponse::Failed { id, error },
            }
        }
        NetworkCommand::DeletePost { id, post_id } => {
            tracing::info!(id, post_id = %post_id, "Deleting post");
            match client.delete_post(&post_id).await {
                Ok(()) => NetworkResponse::PostDeleted { id },
                Err(error) => NetworkResponse::Failed { id, error },
            }
        }
        NetworkCommand::Shutdown => return None,
    };
    Some(response)
}
