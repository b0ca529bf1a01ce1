use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

use crate::models::NewJobPost;

pub const DRAFT_KEY: &str = "jobPostDraft";

pub struct DraftStore {
    conn: Connection,
    path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SavedDraft {
    pub post: NewJobPost,
    pub saved_at: String,
}

impl DraftStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open draft store: {}", path.display()))?;
        let store = Self {
            conn,
            path: path.to_path_buf(),
        };
        store.init()?;
        Ok(store)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS drafts (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                saved_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )?;
        Ok(())
    }

    pub fn save(&self, key: &str, post: &NewJobPost) -> Result<()> {
        let value = serde_json::to_string(post)?;
        self.conn.execute(
            "INSERT INTO drafts (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, saved_at = datetime('now')",
            params![key, value],
        )?;
        tracing::info!(key, "draft saved");
        Ok(())
    }

    pub fn load(&self, key: &str) -> Result<Option<SavedDraft>> {
        let result = self.conn.query_row(
            "SELECT value, saved_at FROM drafts WHERE key = ?1",
            [key],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        );
        let (value, saved_at) = match result {
            Ok(row) => row,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let post: NewJobPost = serde_json::from_str(&value)
            .with_context(|| format!("Corrupt draft under key '{}'", key))?;
        Ok(Some(SavedDraft { post, saved_at }))
    }

    pub fn clear(&self, key: &str) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM drafts WHERE key = ?1", [key])?;
        if removed > 0 {
            tracing::info!(key, "draft cleared");
        }
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, DraftStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::open(&dir.path().join("nested/drafts.db")).unwrap();
        (dir, store)
    }

    fn sample() -> NewJobPost {
        NewJobPost {
            job_title: "Backend Engineer".to_string(),
            company_name: "Swiggy".to_string(),
            job_type: "Fulltime".to_string(),
            location: "Bengaluru".to_string(),
            max_salary: "12,00,000".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_load_missing_is_none() {
        let (_dir, store) = store();
        assert!(store.load(DRAFT_KEY).unwrap().is_none());
        assert!(!store.clear(DRAFT_KEY).unwrap());
    }

    #[test]
    fn test_save_overwrites_and_clear_removes() {
        let (_dir, store) = store();
        store.save(DRAFT_KEY, &sample()).unwrap();

        let mut updated = sample();
        updated.location = "Mysuru".to_string();
        store.save(DRAFT_KEY, &updated).unwrap();

        let draft = store.load(DRAFT_KEY).unwrap().unwrap();
        assert_eq!(draft.post, updated);
        assert!(!draft.saved_at.is_empty());

        assert!(store.clear(DRAFT_KEY).unwrap());
        assert!(store.load(DRAFT_KEY).unwrap().is_none());
    }

    #[test]
    fn test_reopen_keeps_draft() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drafts.db");
        DraftStore::open(&path).unwrap().save(DRAFT_KEY, &sample()).unwrap();

        let reopened = DraftStore::open(&path).unwrap();
        assert_eq!(reopened.path(), &path);
        assert_eq!(reopened.load(DRAFT_KEY).unwrap().unwrap().post, sample());
    }

    #[test]
    fn test_corrupt_value_is_reported() {
        let (_dir, store) = store();
        store
            .conn
            .execute("INSERT INTO drafts (key, value) VALUES (?1, 'not json')", [DRAFT_KEY])
            .unwrap();
        let err = store.load(DRAFT_KEY).unwrap_err();
        assert!(err.to_string().contains("Corrupt draft"));
    }
}
