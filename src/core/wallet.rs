use super::contacts::{Contact, ContactRegistry};
use super::storage::WalletStorage;
use cash_address::Network;
use std::path::PathBuf;

/// The wallet operations the contacts screen needs
pub trait WalletEngine: Send + Sync {
   /// Display name of the wallet
   fn name(&self) -> &str;

   fn network(&self) -> Network;

   /// Add `new`, or replace `old` with `new` when editing
   fn add_contact(&mut self, new: Contact, old: Option<&Contact>) -> Result<(), anyhow::Error>;

   fn remove_contact(&mut self, contact: &Contact) -> Result<(), anyhow::Error>;

   fn list_contacts(&self) -> Vec<Contact>;

   /// First contact with this address storage string
   fn find_contact(&self, address: &str) -> Option<Contact> {
      self.list_contacts().into_iter().find(|c| c.address == address)
   }

   /// Put back a snapshot taken with [WalletEngine::list_contacts]
   fn restore_contacts(&mut self, contacts: Vec<Contact>) -> Result<(), anyhow::Error>;

   /// Durably write the full wallet state
   fn persist(&mut self) -> Result<(), anyhow::Error>;
}

/// A wallet backed by a JSON file
pub struct Wallet {
   name: String,
   network: Network,
   storage: WalletStorage,
   contacts: ContactRegistry,
}

impl Wallet {
   /// Open the wallet at `path`, creating an empty one in memory if it doesn't exist
   pub fn open(path: impl Into<PathBuf>, network: Network) -> Result<Self, anyhow::Error> {
      let storage = WalletStorage::open(path)?;
      let contacts = ContactRegistry::from_storage(&storage, network);

      let name = storage
         .path()
         .file_stem()
         .map(|s| s.to_string_lossy().into_owned())
         .unwrap_or_else(|| "Wallet".to_string());

      tracing::info!(
         "Opened wallet {} with {} contacts",
         name,
         contacts.len()
      );

      Ok(Self {
         name,
         network,
         storage,
         contacts,
      })
   }

}

impl WalletEngine for Wallet {
   fn name(&self) -> &str {
      &self.name
   }

   fn network(&self) -> Network {
      self.network
   }

   fn add_contact(&mut self, new: Contact, old: Option<&Contact>) -> Result<(), anyhow::Error> {
      self.contacts.add(new, old);
      self.contacts.save(&mut self.storage)
   }

   fn remove_contact(&mut self, contact: &Contact) -> Result<(), anyhow::Error> {
      self.contacts.remove(contact);
      self.contacts.save(&mut self.storage)
   }

   fn list_contacts(&self) -> Vec<Contact> {
      self.contacts.get_all()
   }

   fn find_contact(&self, address: &str) -> Option<Contact> {
      self.contacts.find_by_address(address).cloned()
   }

   fn restore_contacts(&mut self, contacts: Vec<Contact>) -> Result<(), anyhow::Error> {
      self.contacts = ContactRegistry::from_contacts(contacts);
      self.contacts.save(&mut self.storage)
   }

   fn persist(&mut self) -> Result<(), anyhow::Error> {
      self.storage.write()
   }
}
