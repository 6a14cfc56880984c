use super::explorer::Explorer;
use super::utils::data_dir;
use cash_address::{AddressFormat, Network};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_WALLET_FILE: &str = "default_wallet";

/// User settings
///
/// Unknown or missing fields fall back to their defaults so older files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
   /// Show addresses as CashAddr instead of legacy
   pub cashaddr_format: bool,

   pub network: Network,

   pub explorer: Explorer,

   /// Wallet file, relative paths are resolved against the data directory
   pub wallet_file: PathBuf,
}

impl Default for Settings {
   fn default() -> Self {
      Self {
         cashaddr_format: true,
         network: Network::Mainnet,
         explorer: Explorer::default(),
         wallet_file: PathBuf::from("wallets").join(DEFAULT_WALLET_FILE),
      }
   }
}

impl Settings {
   pub fn address_format(&self) -> AddressFormat {
      AddressFormat::from_cashaddr_flag(self.cashaddr_format)
   }

   pub fn set_address_format(&mut self, format: AddressFormat) {
      self.cashaddr_format = format.is_cashaddr();
   }

   /// Settings file in the data directory
   pub fn dir() -> Result<PathBuf, anyhow::Error> {
      Ok(data_dir()?.join(SETTINGS_FILE))
   }

   /// Load from the data directory, defaults if there is no settings file yet
   pub fn load() -> Result<Self, anyhow::Error> {
      Self::load_from(&Self::dir()?)
   }

   pub fn load_from(path: &Path) -> Result<Self, anyhow::Error> {
      if !path.exists() {
         return Ok(Self::default());
      }

      let data = std::fs::read(path)?;
      let settings = serde_json::from_slice(&data)?;
      Ok(settings)
   }

   pub fn save(&self) -> Result<(), anyhow::Error> {
      self.save_to(&Self::dir()?)
   }

   pub fn save_to(&self, path: &Path) -> Result<(), anyhow::Error> {
      let data = serde_json::to_string_pretty(self)?;
      std::fs::write(path, data)?;
      Ok(())
   }

   /// The wallet file to open
   pub fn wallet_path(&self) -> Result<PathBuf, anyhow::Error> {
      if self.wallet_file.is_absolute() {
         return Ok(self.wallet_file.clone());
      }
      Ok(data_dir()?.join(&self.wallet_file))
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn missing_file_gives_defaults() {
      let dir = tempfile::tempdir().unwrap();
      let settings = Settings::load_from(&dir.path().join(SETTINGS_FILE)).unwrap();
      assert_eq!(settings, Settings::default());
      assert_eq!(settings.address_format(), AddressFormat::CashAddr);
   }

   #[test]
   fn partial_file_keeps_defaults_for_the_rest() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join(SETTINGS_FILE);
      std::fs::write(&path, r#"{"cashaddr_format": false}"#).unwrap();

      let settings = Settings::load_from(&path).unwrap();
      assert_eq!(settings.address_format(), AddressFormat::Legacy);
      assert_eq!(settings.network, Network::Mainnet);
      assert_eq!(settings.explorer, Explorer::Blockchair);
   }

   #[test]
   fn save_and_load() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join(SETTINGS_FILE);

      let mut settings = Settings::default();
      settings.set_address_format(AddressFormat::Legacy);
      settings.explorer = Explorer::BitcoinCom;
      settings.save_to(&path).unwrap();

      assert_eq!(Settings::load_from(&path).unwrap(), settings);
   }

   #[test]
   fn absolute_wallet_path_is_kept() {
      let dir = tempfile::tempdir().unwrap();
      let mut settings = Settings::default();
      settings.wallet_file = dir.path().join("my_wallet");
      assert_eq!(settings.wallet_path().unwrap(), dir.path().join("my_wallet"));
   }
}
