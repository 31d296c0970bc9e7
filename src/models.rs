use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DefaultOnError, serde_as};

// One gist record as returned by GitHub. Every field may be missing, and a
// field of the wrong type reads as missing instead of failing the whole page.
#[serde_as]
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawGist {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub id: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub description: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub public: Option<bool>,
    // keys keep upstream order (serde_json preserve_order)
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub files: Option<Map<String, Value>>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub updated_at: Option<String>,
}

// Simplified gist returned to clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GistSummary {
    pub id: Option<String>,
    pub description: String,
    pub public: bool,
    pub files: Vec<String>,
    pub url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// Cache key - one upstream page for one user
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchRequest {
    pub username: String,
    pub per_page: u32,
    pub page: u64,
}

// Query string of GET /{username}; kept as text so bad integers fall back to defaults
#[derive(Deserialize, Debug, Default)]
pub struct GistsQuery {
    pub per_page: Option<String>,
    pub page: Option<String>,
}

// Body of a successful GET /{username}
#[derive(Serialize, Debug)]
pub struct GistsResponse<'a> {
    pub username: &'a str,
    pub gists: &'a [GistSummary],
    pub count: usize,
    pub page: u64,
    pub per_page: u32,
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}
