//! Article types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bilingual blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    /// URL slug, unique across articles.
    pub slug: String,
    pub title_ja: String,
    /// Markdown body in Japanese.
    pub content_ja: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_en: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Build a fresh article from client input.
    pub fn new(input: ArticleInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: input.slug,
            title_ja: input.title_ja,
            content_ja: input.content_ja,
            title_en: input.title_en,
            content_en: input.content_en,
            published: input.published,
            created_at: now,
            updated_at: now,
        }
    }

    /// The Japanese title and body joined, as counted for writing activity.
    pub fn japanese_text(&self) -> String {
        format!("{}\n{}", self.title_ja, self.content_ja)
    }

    /// Overwrite the editable fields, keeping identity and creation time.
    pub fn apply(&mut self, input: ArticleInput) {
        self.slug = input.slug;
        self.title_ja = input.title_ja;
        self.content_ja = input.content_ja;
        self.title_en = input.title_en;
        self.content_en = input.content_en;
        self.published = input.published;
        self.updated_at = Utc::now();
    }
}

/// Client-supplied article fields for create and save.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleInput {
    pub slug: String,
    pub title_ja: String,
    #[serde(default)]
    pub content_ja: String,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub content_en: Option<String>,
    #[serde(default)]
    pub published: bool,
}
