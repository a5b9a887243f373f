use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// A post as returned by the Post API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    /// Server-relative path of the stored image
    #[serde(rename = "imageUrl", default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedAt",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamps are display-only; anything that is not RFC 3339 becomes `None`
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|ts| ts.with_timezone(&Utc)))
}

/// Decode a post list body. Records that are not posts are skipped with a
/// warning so one bad entry does not hide the rest of the list.
pub fn decode_post_list(body: &str) -> Result<Vec<Post>, serde_json::Error> {
    let records: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let posts = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Post>(record) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed post record");
                None
            }
        })
        .collect();
    Ok(posts)
}

impl Post {
    /// Absolute URL of the post image on the given API origin
    pub fn image_link(&self, base_url: &str) -> String {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.image_url.trim_start_matches('/')
        )
    }
}

/// Payload of a create request. Every field is required.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub image: PathBuf,
}

/// What an update does with the stored image
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ImageChange {
    /// Leave the image field out of the request; the server keeps the current image
    #[default]
    Keep,
    /// Upload this file as the new image
    Replace(PathBuf),
}

impl ImageChange {
    /// Interpret the text of an image path field. Blank means keep.
    pub fn from_input(path: &str) -> Self {
        let path = path.trim();
        if path.is_empty() {
            ImageChange::Keep
        } else {
            ImageChange::Replace(PathBuf::from(path))
        }
    }
}

/// Payload of an update request
#[derive(Clone, Debug, PartialEq)]
pub struct PostUpdate {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: ImageChange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_post_list() {
        let body = r#"[
            {"_id":"66a1","title":"First","description":"Hello","imageUrl":"uploads/a.png",
             "createdAt":"2024-07-24T10:00:00.000Z","__v":0},
            {"_id":"66a2","title":"Second","description":"World","imageUrl":"uploads/b.jpg"}
        ]"#;
        let posts = decode_post_list(body).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "66a1");
        assert_eq!(posts[0].image_url, "uploads/a.png");
        assert!(posts[0].created_at.is_some());
        assert!(posts[1].created_at.is_none());
    }

    #[test]
    fn test_bad_record_does_not_hide_good_ones() {
        let body = r#"[
            {"_id":"66a1","title":"First","description":"Hello","imageUrl":"uploads/a.png"},
            {"_id":"66a2","title":"Second","description":"World","imageUrl":null,
             "createdAt":"yesterday","updatedAt":12345},
            {"_id":"66a3","description":"no title"},
            {"_id":"66a4","title":"Fourth","description":"No image field"}
        ]"#;
        let posts = decode_post_list(body).unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["66a1", "66a2", "66a4"]);
        assert_eq!(posts[1].image_url, "");
        assert!(posts[1].created_at.is_none());
        assert!(posts[1].updated_at.is_none());
        assert_eq!(posts[2].image_url, "");
    }

    #[test]
    fn test_non_array_body_is_an_error() {
        assert!(decode_post_list(r#"{"message":"oops"}"#).is_err());
    }

    #[test]
    fn test_image_link_joins_origin_and_path() {
        let post = Post {
            id: "1".into(),
            title: "t".into(),
            description: "d".into(),
            image_url: "uploads/cat.png".into(),
            created_at: None,
            updated_at: None,
        };
        assert_eq!(
            post.image_link("https://api.example.com/"),
            "https://api.example.com/uploads/cat.png"
        );
        assert_eq!(
            post.image_link("https://api.example.com"),
            "https://api.example.com/uploads/cat.png"
        );
    }

    #[test]
    fn test_blank_image_input_keeps_existing() {
        assert_eq!(ImageChange::from_input(""), ImageChange::Keep);
        assert_eq!(ImageChange::from_input("   "), ImageChange::Keep);
        assert_eq!(
            ImageChange::from_input(" ./new.png "),
            ImageChange::Replace(PathBuf::from("./new.png"))
        );
    }
}
