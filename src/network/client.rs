//! Post API client - builds requests and interprets responses

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use reqwest::multipart::{Form, Part};

use crate::config::Config;
use crate::constants::{CREATE_POST_PATH, DELETE_POST_PATH, LIST_POSTS_PATH, UPDATE_POST_PATH};
use crate::models::{decode_post_list, ImageChange, NewPost, Post, PostUpdate};
use crate::network::error::{extract_server_message, ApiError};

/// One field of a multipart request, before any file is read
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text(&'static str, String),
    File(&'static str, PathBuf),
}

impl FormPart {
    pub fn name(&self) -> &'static str {
        match self {
            FormPart::Text(name, _) | FormPart::File(name, _) => name,
        }
    }
}

/// Parts of a create request, in wire order
pub fn create_parts(post: &NewPost) -> Vec<FormPart> {
    vec![
        FormPart::Text("title", post.title.clone()),
        FormPart::Text("description", post.description.clone()),
        FormPart::File("image", post.image.clone()),
    ]
}

/// Parts of an update request. `image` is present only for a replacement.
pub fn update_parts(update: &PostUpdate) -> Vec<FormPart> {
    let mut parts = vec![
        FormPart::Text("title", update.title.clone()),
        FormPart::Text("description", update.description.clone()),
        FormPart::Text("id", update.id.clone()),
    ];
    if let ImageChange::Replace(path) = &update.image {
        parts.push(FormPart::File("image", path.clone()));
    }
    parts
}

/// Content type for an image upload, from its extension
pub fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Read any files and assemble the multipart form
pub async fn build_form(parts: Vec<FormPart>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        match part {
            FormPart::Text(name, value) => {
                form = form.text(name, value);
            }
            FormPart::File(name, path) => {
                let image_error = |reason: String| ApiError::Image {
                    path: path.clone(),
                    reason,
                };
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|e| image_error(e.to_string()))?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| String::from("image"));
                let file_part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(image_mime(&path))
                    .map_err(|e| image_error(e.to_string()))?;
                form = form.part(name, file_part);
            }
        }
    }
    Ok(form)
}

/// HTTP client bound to one Post API origin
#[derive(Clone, Debug)]
pub struct PostApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PostApiClient {
    pub fn new(config: &Config) -> Self {
        PostApiClient {
            http: create_client(config.request_timeout_secs),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn list_url(&self) -> String {
        format!("{}{}", self.base_url, LIST_POSTS_PATH)
    }

    pub fn create_url(&self) -> String {
        format!("{}{}", self.base_url, CREATE_POST_PATH)
    }

    pub fn update_url(&self) -> String {
        format!("{}{}", self.base_url, UPDATE_POST_PATH)
    }

    pub fn delete_url(&self, post_id: &str) -> String {
        format!("{}{}/{}", self.base_url, DELETE_POST_PATH, post_id)
    }

    /// GET the full post list
    pub async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let start = Instant::now();
        let resp = self
            .http
            .get(self.list_url())
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        let resp = check_status(resp).await?;
        let body = resp.text().await.map_err(ApiError::from_reqwest)?;
        let posts = decode_post_list(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        tracing::debug!(count = posts.len(), elapsed_ms = start.elapsed().as_millis() as u64, "Posts fetched");
        Ok(posts)
    }

    /// POST a new post as multipart form data
    pub async fn create_post(&self, post: NewPost) -> Result<(), ApiError> {
        let form = build_form(create_parts(&post)).await?;
        let resp = self
            .http
            .post(self.create_url())
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        discard_body(check_status(resp).await?).await;
        Ok(())
    }

    /// PUT an update; the image is sent only when replaced
    pub async fn update_post(&self, update: PostUpdate) -> Result<(), ApiError> {
        let form = build_form(update_parts(&update)).await?;
        let resp = self
            .http
            .put(self.update_url())
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        discard_body(check_status(resp).await?).await;
        Ok(())
    }

    /// DELETE a post by id
    pub async fn delete_post(&self, post_id: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.delete_url(post_id))
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        discard_body(check_status(resp).await?).await;
        Ok(())
    }
}

/// Turn a non-2xx response into `ApiError::Server`
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Server {
        status: status.as_u16(),
        message: extract_server_message(&body),
    })
}

/// Mutation responses only signal success; the body is logged and dropped
async fn discard_body(resp: reqwest::Response) {
    if let Ok(body) = resp.text().await {
        tracing::trace!(%body, "Mutation response body");
    }
}

/// Create an HTTP client. `timeout_secs` of None keeps reqwest's default (no timeout).
pub fn create_client(timeout_secs: Option<u64>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, ?timeout_secs, "HTTP client setup failed; using defaults without the configured timeout");
        reqwest::Client::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn client_for(base: &str) -> PostApiClient {
        let config = Config {
            api_base_url: base.to_string(),
            ..Config::default()
        };
        PostApiClient::new(&config)
    }

    #[test]
    fn test_endpoint_urls() {
        let client = client_for("https://api.example.com/");
        assert_eq!(client.list_url(), "https://api.example.com/api/v1/postapp/getPosts");
        assert_eq!(client.create_url(), "https://api.example.com/api/v1/postapp/addPost");
        assert_eq!(client.update_url(), "https://api.example.com/api/v1/postapp/updatePost");
        assert_eq!(
            client.delete_url("66a1"),
            "https://api.example.com/api/v1/postapp/deletePost/66a1"
        );
    }

    #[test]
    fn test_update_without_replacement_omits_image() {
        let update = PostUpdate {
            id: "66a1".into(),
            title: "New title".into(),
            description: "New body".into(),
            image: ImageChange::Keep,
        };
        let parts = update_parts(&update);
        let names: Vec<_> = parts.iter().map(FormPart::name).collect();
        assert_eq!(names, vec!["title", "description", "id"]);
        assert!(parts.contains(&FormPart::Text("id", "66a1".into())));
    }

    #[test]
    fn test_update_with_replacement_sends_image() {
        let update = PostUpdate {
            id: "66a1".into(),
            title: "t".into(),
            description: "d".into(),
            image: ImageChange::Replace(PathBuf::from("/tmp/new.png")),
        };
        let parts = update_parts(&update);
        assert_eq!(
            parts.last(),
            Some(&FormPart::File("image", PathBuf::from("/tmp/new.png")))
        );
    }

    #[test]
    fn test_create_sends_all_three_fields() {
        let post = NewPost {
            title: "t".into(),
            description: "d".into(),
            image: PathBuf::from("cat.jpg"),
        };
        let names: Vec<_> = create_parts(&post).iter().map(FormPart::name).collect();
        assert_eq!(names, vec!["title", "description", "image"]);
    }

    #[test]
    fn test_client_builds_with_and_without_timeout() {
        let _ = create_client(None);
        let _ = create_client(Some(5));
    }

    #[test]
    fn test_image_mime_by_extension() {
        assert_eq!(image_mime(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(image_mime(Path::new("a.png")), "image/png");
        assert_eq!(image_mime(Path::new("a.webp")), "image/webp");
        assert_eq!(image_mime(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_build_form_reads_image_file() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"\x89PNG fake").unwrap();

        let parts = vec![
            FormPart::Text("title", "t".into()),
            FormPart::File("image", file.path().to_path_buf()),
        ];
        let form = build_form(parts).await.unwrap();
        assert!(!form.boundary().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_image_fails_before_sending() {
        // Port 9 is discard; the request must never get that far.
        let client = client_for("http://127.0.0.1:9");
        let post = NewPost {
            title: "t".into(),
            description: "d".into(),
            image: PathBuf::from("/definitely/not/here.png"),
        };
        let err = client.create_post(post).await.unwrap_err();
        assert!(matches!(err, ApiError::Image { .. }));
    }
}
