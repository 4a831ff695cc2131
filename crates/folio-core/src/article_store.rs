//! SQLite persistence for articles.
//!
//! Saves feed the contribution recorder after the article row is committed,
//! comparing the stored Japanese text against the new one.

use crate::contribution_store::parse_timestamp;
use crate::{ContributionRecorder, FolioError, Result};
use folio_types::{Article, ArticleInput};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// SQLite-based article store.
pub struct ArticleStore {
    conn: Mutex<Connection>,
    recorder: ContributionRecorder,
}

impl ArticleStore {
    /// Open or create the database at the given path.
    pub fn open(path: &Path, recorder: ContributionRecorder) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
            recorder,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                id TEXT PRIMARY KEY,
                slug TEXT NOT NULL UNIQUE,
                title_ja TEXT NOT NULL,
                content_ja TEXT NOT NULL DEFAULT '',
                title_en TEXT,
                content_en TEXT,
                published INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_articles_updated_at ON articles(updated_at);
            "#,
        )?;
        Ok(())
    }

    /// Insert a new article and record it as a contribution.
    pub fn create(&self, input: ArticleInput) -> Result<Article> {
        validate_slug(&input.slug)?;
        let article = Article::new(input);

        {
            let conn = self.conn.lock().unwrap();
            if Self::slug_owner(&conn, &article.slug)?.is_some() {
                return Err(FolioError::SlugConflict(article.slug));
            }
            conn.execute(
                r#"
                INSERT INTO articles (
                    id, slug, title_ja, content_ja, title_en, content_en,
                    published, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    article.id.to_string(),
                    article.slug,
                    article.title_ja,
                    article.content_ja,
                    article.title_en,
                    article.content_en,
                    article.published as i32,
                    article.created_at.to_rfc3339(),
                    article.updated_at.to_rfc3339(),
                ],
            )?;
        }
        info!(target: "folio::articles", "Created article {} ({})", article.id, article.slug);

        self.recorder
            .record(None, Some(&article.japanese_text()), Some(article.updated_at))?;
        Ok(article)
    }

    /// Save new content over an existing article and record the change.
    pub fn update(&self, id: Uuid, input: ArticleInput) -> Result<Article> {
        validate_slug(&input.slug)?;

        let (previous_text, article) = {
            let conn = self.conn.lock().unwrap();
            let mut article =
                Self::fetch(&conn, id)?.ok_or(FolioError::ArticleNotFound(id))?;
            if let Some(owner) = Self::slug_owner(&conn, &input.slug)? {
                if owner != id {
                    return Err(FolioError::SlugConflict(input.slug));
                }
            }

            let previous_text = article.japanese_text();
            article.apply(input);
            conn.execute(
                r#"
                UPDATE articles SET
                    slug = ?1,
                    title_ja = ?2,
                    content_ja = ?3,
                    title_en = ?4,
                    content_en = ?5,
                    published = ?6,
                    updated_at = ?7
                WHERE id = ?8
                "#,
                params![
                    article.slug,
                    article.title_ja,
                    article.content_ja,
                    article.title_en,
                    article.content_en,
                    article.published as i32,
                    article.updated_at.to_rfc3339(),
                    id.to_string(),
                ],
            )?;
            (previous_text, article)
        };
        info!(target: "folio::articles", "Saved article {} ({})", article.id, article.slug);

        self.recorder.record(
            Some(&previous_text),
            Some(&article.japanese_text()),
            Some(article.updated_at),
        )?;
        Ok(article)
    }

    /// Get an article by ID.
    pub fn get(&self, id: Uuid) -> Result<Option<Article>> {
        let conn = self.conn.lock().unwrap();
        Self::fetch(&conn, id)
    }

    /// Get an article by slug.
    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let conn = self.conn.lock().unwrap();
        let raw = conn
            .query_row(
                "SELECT * FROM articles WHERE slug = ?1",
                params![slug],
                |row| RawArticle::from_row(row),
            )
            .optional()?;
        raw.map(RawArticle::into_article).transpose()
    }

    /// List articles, most recently updated first.
    pub fn list(&self, published_only: bool) -> Result<Vec<Article>> {
        let conn = self.conn.lock().unwrap();
        let sql = if published_only {
            "SELECT * FROM articles WHERE published = 1 ORDER BY updated_at DESC"
        } else {
            "SELECT * FROM articles ORDER BY updated_at DESC"
        };
        let mut stmt = conn.prepare(sql)?;
        let raw = stmt
            .query_map([], |row| RawArticle::from_row(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        raw.into_iter().map(RawArticle::into_article).collect()
    }

    /// Delete an article. Contribution history is left untouched.
    pub fn delete(&self, id: Uuid) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM articles WHERE id = ?1", params![id.to_string()])?;
        if affected == 0 {
            return Err(FolioError::ArticleNotFound(id));
        }
        info!(target: "folio::articles", "Deleted article {}", id);
        Ok(())
    }

    fn fetch(conn: &Connection, id: Uuid) -> Result<Option<Article>> {
        let raw = conn
            .query_row(
                "SELECT * FROM articles WHERE id = ?1",
                params![id.to_string()],
                |row| RawArticle::from_row(row),
            )
            .optional()?;
        raw.map(RawArticle::into_article).transpose()
    }

    fn slug_owner(conn: &Connection, slug: &str) -> Result<Option<Uuid>> {
        let owner: Option<String> = conn
            .query_row(
                "SELECT id FROM articles WHERE slug = ?1",
                params![slug],
                |row| row.get(0),
            )
            .optional()?;
        Ok(owner.and_then(|id| Uuid::parse_str(&id).ok()))
    }
}

/// Slugs are non-empty and limited to `a-z`, `0-9` and `-`.
fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(FolioError::InvalidInput("slug cannot be empty".to_string()));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(FolioError::InvalidInput(format!(
            "slug '{}' may only contain a-z, 0-9 and '-'",
            slug
        )));
    }
    Ok(())
}

/// Column values as stored, before timestamp parsing.
struct RawArticle {
    id: String,
    slug: String,
    title_ja: String,
    content_ja: String,
    title_en: Option<String>,
    content_en: Option<String>,
    published: bool,
    created_at: String,
    updated_at: String,
}

impl RawArticle {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            slug: row.get("slug")?,
            title_ja: row.get("title_ja")?,
            content_ja: row.get("content_ja")?,
            title_en: row.get("title_en")?,
            content_en: row.get("content_en")?,
            published: row.get::<_, i32>("published")? != 0,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn into_article(self) -> Result<Article> {
        Ok(Article {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| FolioError::InvalidStoredValue(format!("id {}: {}", self.id, e)))?,
            slug: self.slug,
            title_ja: self.title_ja,
            content_ja: self.content_ja,
            title_en: self.title_en,
            content_en: self.content_en,
            published: self.published,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}
