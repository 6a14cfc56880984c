use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A wallet file
///
/// A JSON object kept fully in memory, [WalletStorage::write] replaces the file on disk.
#[derive(Debug, Clone)]
pub struct WalletStorage {
   path: PathBuf,
   data: Map<String, Value>,
}

impl WalletStorage {
   /// Open the wallet file at `path`, a missing file is an empty wallet
   pub fn open(path: impl Into<PathBuf>) -> Result<Self, anyhow::Error> {
      let path = path.into();

      let data = if path.exists() {
         let bytes = std::fs::read(&path)?;
         serde_json::from_slice(&bytes)?
      } else {
         tracing::info!("No wallet file at {}, starting empty", path.display());
         Map::new()
      };

      Ok(Self { path, data })
   }

   pub fn path(&self) -> &Path {
      &self.path
   }

   pub fn contains(&self, key: &str) -> bool {
      self.data.contains_key(key)
   }

   /// Read a value, `None` if missing or of another shape
   pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
      let value = self.data.get(key)?;
      match serde_json::from_value(value.clone()) {
         Ok(value) => Some(value),
         Err(e) => {
            tracing::warn!("Wallet key {} has an unexpected shape: {}", key, e);
            None
         }
      }
   }

   pub fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), anyhow::Error> {
      let value = serde_json::to_value(value)?;
      self.data.insert(key.to_string(), value);
      Ok(())
   }

   pub fn remove(&mut self, key: &str) -> Option<Value> {
      self.data.remove(key)
   }

   /// Write the whole document to disk
   ///
   /// The new contents go to a temporary file next to the wallet which is then renamed over it.
   pub fn write(&self) -> Result<(), anyhow::Error> {
      if let Some(parent) = self.path.parent() {
         if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
         }
      }

      let data = serde_json::to_vec_pretty(&self.data)?;
      let tmp = self.path.with_extension("tmp");
      std::fs::write(&tmp, data)?;
      std::fs::rename(&tmp, &self.path)?;

      tracing::debug!("Wallet written to {}", self.path.display());
      Ok(())
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn missing_file_is_empty() {
      let dir = tempfile::tempdir().unwrap();
      let storage = WalletStorage::open(dir.path().join("wallet.json")).unwrap();
      assert!(!storage.contains("contacts2"));
   }

   #[test]
   fn write_keeps_unknown_keys() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("wallet.json");
      std::fs::write(&path, r#"{"seed_version": 17, "labels": {"a": "b"}}"#).unwrap();

      let mut storage = WalletStorage::open(&path).unwrap();
      storage.put("contacts2", &Vec::<String>::new()).unwrap();
      storage.write().unwrap();

      let reopened = WalletStorage::open(&path).unwrap();
      assert_eq!(reopened.get::<u32>("seed_version"), Some(17));
      assert!(reopened.contains("labels"));
      assert_eq!(reopened.get::<Vec<String>>("contacts2"), Some(vec![]));
      assert!(!path.with_extension("tmp").exists());
   }

   #[test]
   fn wrong_shape_reads_as_none() {
      let dir = tempfile::tempdir().unwrap();
      let mut storage = WalletStorage::open(dir.path().join("wallet.json")).unwrap();
      storage.put("contacts2", "not a list").unwrap();
      assert_eq!(storage.get::<Vec<String>>("contacts2"), None);
   }

   #[test]
   fn write_creates_parent_dirs() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("wallets").join("default_wallet");
      let storage = WalletStorage::open(&path).unwrap();
      storage.write().unwrap();
      assert!(path.exists());
   }

   #[test]
   fn corrupt_file_fails_to_open() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("wallet.json");
      std::fs::write(&path, "{not json").unwrap();
      assert!(WalletStorage::open(&path).is_err());
   }
}
