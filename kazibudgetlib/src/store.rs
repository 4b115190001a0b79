//! Хранилище пользовательских процентов: один JSON-файл вида
//! `{ "<userId>": { "overrides": {...}, "updatedAt": "<RFC3339>" } }`.
//!
//! Без блокировок и гарантий долговечности: последний писатель побеждает.

use crate::{error::Result, model::Overrides};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const ANONYMOUS_USER: &str = "anonymous";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredOverrides {
    pub overrides: Overrides,
    pub updated_at: DateTime<Utc>,
}

type Db = BTreeMap<String, StoredOverrides>;

#[derive(Debug, Clone)]
pub struct OverridesStore {
    path: PathBuf,
}

impl OverridesStore {
    /// Открыть хранилище, при необходимости создав каталог и пустой `{}`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        if !path.exists() {
            fs::write(&path, "{}")?;
            tracing::debug!(path = %path.display(), "created empty overrides store");
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, user_id: &str) -> Result<Option<StoredOverrides>> {
        let mut db = self.load()?;
        Ok(db.remove(user_key(user_id)))
    }

    /// Заменить запись пользователя; возвращает отметку `updatedAt`.
    pub fn save(&self, user_id: &str, overrides: &Overrides) -> Result<DateTime<Utc>> {
        let mut db = self.load()?;
        let updated_at = Utc::now();
        db.insert(
            user_key(user_id).to_string(),
            StoredOverrides {
                overrides: overrides.clone(),
                updated_at,
            },
        );
        self.flush(&db)?;
        tracing::debug!(user = user_key(user_id), path = %self.path.display(), "saved overrides");
        Ok(updated_at)
    }

    /// `true`, если запись была.
    pub fn remove(&self, user_id: &str) -> Result<bool> {
        let mut db = self.load()?;
        let existed = db.remove(user_key(user_id)).is_some();
        if existed {
            self.flush(&db)?;
            tracing::debug!(user = user_key(user_id), "removed overrides");
        }
        Ok(existed)
    }

    fn load(&self) -> Result<Db> {
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Db::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn flush(&self, db: &Db) -> Result<()> {
        let mut w = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut w, db)?;
        w.flush()?;
        Ok(())
    }
}

fn user_key(user_id: &str) -> &str {
    let id = user_id.trim();
    if id.is_empty() {
        ANONYMOUS_USER
    } else {
        id
    }
}
