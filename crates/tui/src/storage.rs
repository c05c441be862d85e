use std::{collections::BTreeMap, fs, path::PathBuf};

use api_types::user::User;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

/// Key under which the authenticated user is persisted.
pub const LOGGED_USER_KEY: &str = "_usuario_logado";

type Items = BTreeMap<String, serde_json::Value>;

/// File-backed key-value store.
///
/// Every call reads the file again, so values written by another process
/// (or another screen) are picked up without a restart.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Items> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Items::default());
            }
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(Items::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, items: &Items) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.load()?.remove(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    pub fn set_item<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let mut items = self.load()?;
        items.insert(key.to_string(), serde_json::to_value(value)?);
        self.save(&items)
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }

    pub fn session_user(&self) -> Result<Option<User>> {
        self.get_item(LOGGED_USER_KEY)
    }
}
