use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub(crate) type PostId = u64;

/// A blog post as the rest of the app sees it.
///
/// Backends disagree on where the text lives (`body` vs `content`), so decoding
/// goes through [`WirePost`] and the text always ends up in `content`.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(from = "WirePost")]
pub(crate) struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub category_id: Option<i64>,
    /// Sent as either a string or a boolean depending on the backend.
    pub is_active: Option<serde_json::Value>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Post exactly as it comes off the wire.
#[derive(Deserialize, Clone, Debug)]
struct WirePost {
    id: PostId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    category_id: Option<i64>,
    #[serde(default)]
    is_active: Option<serde_json::Value>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl From<WirePost> for Post {
    fn from(w: WirePost) -> Self {
        let content = read_content(w.body.as_deref(), w.content.as_deref());
        Self {
            id: w.id,
            title: w.title.unwrap_or_default(),
            content,
            category_id: w.category_id,
            is_active: w.is_active.filter(|v| !v.is_null()),
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

/// `body` wins over `content`; neither means empty text.
pub(crate) fn read_content(body: Option<&str>, content: Option<&str>) -> String {
    body.or(content).unwrap_or_default().to_string()
}

/// Create/update request body. Both text keys carry the same value.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct PostPayload {
    pub title: String,
    pub content: String,
    pub body: String,
}

impl PostPayload {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            title: title.into(),
            body: content.clone(),
            content,
        }
    }
}

/// Field-keyed validation messages from the backend's `errors` object.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub(crate) struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|msgs| msgs.is_empty())
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn title(&self) -> Vec<String> {
        self.get("title").to_vec()
    }

    /// Messages for the text input, which may be reported under either key.
    pub fn content(&self) -> Vec<String> {
        self.get("content")
            .iter()
            .chain(self.get("body"))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Post {
        serde_json::from_str(json).expect("post should parse")
    }

    #[test]
    fn test_read_content_prefers_body() {
        assert_eq!(read_content(Some("b"), Some("c")), "b");
        assert_eq!(read_content(None, Some("c")), "c");
        assert_eq!(read_content(Some(""), Some("c")), "");
        assert_eq!(read_content(None, None), "");
    }

    #[test]
    fn test_post_decode_body_only() {
        let p = decode(r#"{"id": 1, "title": "T", "body": "from body"}"#);
        assert_eq!(p.content, "from body");
    }

    #[test]
    fn test_post_decode_content_only() {
        let p = decode(r#"{"id": 2, "title": "T", "content": "from content"}"#);
        assert_eq!(p.content, "from content");
    }

    #[test]
    fn test_post_decode_null_body_falls_back_to_content() {
        let p = decode(r#"{"id": 3, "title": "T", "body": null, "content": "c"}"#);
        assert_eq!(p.content, "c");
    }

    #[test]
    fn test_post_decode_both_present_uses_body() {
        let p = decode(r#"{"id": 4, "title": "T", "body": "b", "content": "c"}"#);
        assert_eq!(p.content, "b");
    }

    #[test]
    fn test_post_decode_no_text_and_no_title() {
        let p = decode(r#"{"id": 5, "title": null}"#);
        assert_eq!(p.title, "");
        assert_eq!(p.content, "");
    }

    #[test]
    fn test_post_decode_server_owned_fields() {
        let p = decode(
            r#"{
                "id": 6,
                "title": "T",
                "content": "c",
                "category_id": 3,
                "is_active": "1",
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": null
            }"#,
        );
        assert_eq!(p.category_id, Some(3));
        assert_eq!(p.is_active, Some(serde_json::json!("1")));
        assert_eq!(p.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert!(p.updated_at.is_none());
    }

    #[test]
    fn test_post_decode_list() {
        let posts: Vec<Post> = serde_json::from_str(
            r#"[{"id": 1, "title": "A", "body": "a"}, {"id": 2, "title": "B", "content": "b"}]"#,
        )
        .expect("list should parse");
        let texts: Vec<&str> = posts.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(texts, ["a", "b"]);
    }

    #[test]
    fn test_payload_sends_both_text_keys() {
        let v = serde_json::to_value(PostPayload::new("T", "C")).expect("should serialize");
        assert_eq!(v, serde_json::json!({"title": "T", "content": "C", "body": "C"}));
    }

    #[test]
    fn test_field_errors_content_merges_body_messages() {
        let errors: FieldErrors = serde_json::from_str(
            r#"{"title": ["Title is required."], "content": ["Too short."], "body": ["Body is required."]}"#,
        )
        .expect("errors should parse");
        assert_eq!(errors.title(), ["Title is required."]);
        assert_eq!(errors.content(), ["Too short.", "Body is required."]);
        assert!(errors.get("category_id").is_empty());
        assert!(!errors.is_empty());
        assert!(FieldErrors::default().is_empty());
    }
}
