use super::storage::WalletStorage;
use cash_address::{Address, Network};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Wallet document key of the contact list
pub const CONTACTS_KEY: &str = "contacts2";

/// Older wallets keep contacts as `{address: [kind, name]}` under this key
pub const LEGACY_CONTACTS_KEY: &str = "contacts";

/// What a contact points to
///
/// Only [ContactKind::Address] is created by us, any other tag found on disk is kept as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ContactKind {
   #[default]
   Address,
   Other(String),
}

impl ContactKind {
   pub fn as_str(&self) -> &str {
      match self {
         Self::Address => "address",
         Self::Other(tag) => tag,
      }
   }

   pub fn from_tag(tag: &str) -> Self {
      match tag {
         "address" => Self::Address,
         other => Self::Other(other.to_string()),
      }
   }

   pub fn is_address(&self) -> bool {
      matches!(self, Self::Address)
   }
}

impl Serialize for ContactKind {
   fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
      serializer.serialize_str(self.as_str())
   }
}

impl<'de> Deserialize<'de> for ContactKind {
   fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
      let tag = String::deserialize(deserializer)?;
      Ok(Self::from_tag(&tag))
   }
}

/// On-disk form of a contact, `[name, address, kind]`
#[derive(Serialize, Deserialize)]
struct ContactRecord(String, String, ContactKind);

/// Saved contact by the user
///
/// `address` is always the storage string of the address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ContactRecord", into = "ContactRecord")]
pub struct Contact {
   pub name: String,
   pub address: String,
   pub kind: ContactKind,
}

impl From<ContactRecord> for Contact {
   fn from(record: ContactRecord) -> Self {
      Self {
         name: record.0,
         address: record.1,
         kind: record.2,
      }
   }
}

impl From<Contact> for ContactRecord {
   fn from(contact: Contact) -> Self {
      Self(contact.name, contact.address, contact.kind)
   }
}

impl Contact {
   pub fn new(name: impl Into<String>, address: &Address) -> Self {
      Self {
         name: name.into(),
         address: address.to_storage_string(),
         kind: ContactKind::Address,
      }
   }

   pub fn address(&self, network: Network) -> Result<Address, cash_address::Error> {
      Address::parse(&self.address, network)
   }

   /// Rewrite the address as its storage string
   ///
   /// Wallets written by other tools may hold CashAddr text. Contacts are matched by value, so
   /// the registry must hold the same string the list view rebuilds. Anything that doesn't parse
   /// is kept as is.
   pub fn normalized(mut self, network: Network) -> Self {
      if self.kind.is_address() {
         if let Ok(address) = Address::parse(&self.address, network) {
            self.address = address.to_storage_string();
         }
      }
      self
   }
}

/// The contacts of a single wallet
///
/// Keeps insertion order, duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRegistry {
   contacts: Vec<Contact>,
}

impl ContactRegistry {
   pub fn new() -> Self {
      Self {
         contacts: Vec::new(),
      }
   }

   pub fn from_contacts(contacts: Vec<Contact>) -> Self {
      Self { contacts }
   }

   /// Load the contacts from a wallet document
   ///
   /// Falls back to the legacy layout if the wallet has never been written with [CONTACTS_KEY].
   /// Entries that cannot be read are skipped.
   pub fn from_storage(storage: &WalletStorage, network: Network) -> Self {
      if let Some(values) = storage.get::<Vec<Value>>(CONTACTS_KEY) {
         let mut contacts = Vec::with_capacity(values.len());
         for value in values {
            match serde_json::from_value::<Contact>(value) {
               Ok(contact) => contacts.push(contact.normalized(network)),
               Err(e) => tracing::warn!("Skipping unreadable contact: {}", e),
            }
         }
         return Self { contacts };
      }

      match storage.get::<Map<String, Value>>(LEGACY_CONTACTS_KEY) {
         Some(legacy) => Self::from_legacy(legacy, network),
         None => Self::new(),
      }
   }

   fn from_legacy(legacy: Map<String, Value>, network: Network) -> Self {
      let mut contacts = Vec::with_capacity(legacy.len());

      for (address, value) in legacy {
         let (kind, name) = match serde_json::from_value::<(String, String)>(value) {
            Ok(entry) => entry,
            Err(e) => {
               tracing::warn!("Skipping legacy contact {}: {}", address, e);
               continue;
            }
         };

         let kind = ContactKind::from_tag(&kind);

         // only address contacts have an address to normalize
         let address = if kind.is_address() {
            match Address::parse(&address, network) {
               Ok(address) => address.to_storage_string(),
               Err(e) => {
                  tracing::warn!("Skipping legacy contact {}: {}", address, e);
                  continue;
               }
            }
         } else {
            address
         };

         contacts.push(Contact {
            name,
            address,
            kind,
         });
      }

      tracing::info!("Migrated {} legacy contacts", contacts.len());
      Self { contacts }
   }

   /// Write the contacts back into the wallet document
   pub fn save(&self, storage: &mut WalletStorage) -> Result<(), anyhow::Error> {
      storage.put(CONTACTS_KEY, &self.contacts)?;
      storage.remove(LEGACY_CONTACTS_KEY);
      Ok(())
   }

   /// Add a new contact, or replace `old` with `new` if `old` exists
   ///
   /// If `old` is given but not found `new` is appended.
   pub fn add(&mut self, new: Contact, old: Option<&Contact>) {
      let position = old.and_then(|old| self.contacts.iter().position(|c| c == old));

      match position {
         Some(index) => self.contacts[index] = new,
         None => self.contacts.push(new),
      }
   }

   /// Remove the first contact equal to `contact`, does nothing if there is none
   pub fn remove(&mut self, contact: &Contact) {
      if let Some(index) = self.contacts.iter().position(|c| c == contact) {
         self.contacts.remove(index);
      }
   }

   pub fn get_all(&self) -> Vec<Contact> {
      self.contacts.clone()
   }

   /// Get a contact by its storage string
   pub fn find_by_address(&self, address: &str) -> Option<&Contact> {
      self.contacts.iter().find(|c| c.address == address)
   }

   pub fn len(&self) -> usize {
      self.contacts.len()
   }

   pub fn is_empty(&self) -> bool {
      self.contacts.is_empty()
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   const ALICE: &str = "1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu";
   const BOB: &str = "1KXrWXciRDZUpQwQmuM1DbwsKDLYAYsVLR";

   fn contact(name: &str, address: &str) -> Contact {
      let address = Address::parse(address, Network::Mainnet).unwrap();
      Contact::new(name, &address)
   }

   #[test]
   fn add_appends_a_new_entry() {
      let mut registry = ContactRegistry::new();
      let alice = contact("Alice", ALICE);

      assert!(registry.is_empty());
      registry.add(alice.clone(), None);

      let all = registry.get_all();
      assert_eq!(all.iter().filter(|c| **c == alice).count(), 1);
      assert_eq!(all.len(), 1);
   }

   #[test]
   fn add_with_old_replaces_in_place() {
      let mut registry = ContactRegistry::new();
      let alice = contact("Alice", ALICE);
      let bob = contact("Bob", BOB);
      registry.add(alice.clone(), None);
      registry.add(bob.clone(), None);

      let renamed = contact("Alice Smith", ALICE);
      registry.add(renamed.clone(), Some(&alice));

      assert_eq!(registry.len(), 2);
      assert!(!registry.get_all().contains(&alice));
      // position is kept
      assert_eq!(registry.get_all()[0], renamed);
      assert_eq!(registry.get_all()[1], bob);
   }

   #[test]
   fn add_with_missing_old_appends() {
      let mut registry = ContactRegistry::new();
      let alice = contact("Alice", ALICE);
      let bob = contact("Bob", BOB);

      registry.add(bob.clone(), Some(&alice));
      assert_eq!(registry.get_all(), vec![bob]);
   }

   #[test]
   fn duplicate_names_are_allowed() {
      let mut registry = ContactRegistry::new();
      registry.add(contact("Alice", ALICE), None);
      registry.add(contact("Alice", BOB), None);
      registry.add(contact("Alice", ALICE), None);
      assert_eq!(registry.len(), 3);
   }

   #[test]
   fn remove_only_drops_one_match() {
      let mut registry = ContactRegistry::new();
      let alice = contact("Alice", ALICE);
      registry.add(alice.clone(), None);
      registry.add(alice.clone(), None);

      registry.remove(&alice);
      assert_eq!(registry.len(), 1);
   }

   #[test]
   fn remove_missing_is_a_no_op() {
      let mut registry = ContactRegistry::new();
      registry.add(contact("Alice", ALICE), None);

      registry.remove(&contact("Bob", BOB));
      assert_eq!(registry.len(), 1);
   }

   #[test]
   fn contact_serializes_as_triple() {
      let alice = contact("Alice", ALICE);
      let json = serde_json::to_value(&alice).unwrap();
      assert_eq!(json, serde_json::json!(["Alice", ALICE, "address"]));

      let back: Contact = serde_json::from_value(json).unwrap();
      assert_eq!(back, alice);
   }

   #[test]
   fn unknown_kind_is_preserved() {
      let json = serde_json::json!(["Shop", "shop.example", "openalias"]);
      let contact: Contact = serde_json::from_value(json.clone()).unwrap();
      assert_eq!(contact.kind, ContactKind::Other("openalias".to_string()));
      assert_eq!(serde_json::to_value(&contact).unwrap(), json);
   }

   #[test]
   fn find_by_storage_string() {
      let mut registry = ContactRegistry::new();
      registry.add(contact("Alice", ALICE), None);
      assert_eq!(registry.find_by_address(ALICE).map(|c| c.name.as_str()), Some("Alice"));
      assert!(registry.find_by_address(BOB).is_none());
   }

   #[test]
   fn cashaddr_entries_load_as_storage_strings() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("wallet.json");
      let doc = serde_json::json!({
         "contacts2": [
            ["Alice", "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a", "address"],
            ["Bob", "qr95sy3j9xwd2ap32xkykttr4cvcu7as4y0qverfuy", "address"],
            ["Shop", "shop.example", "openalias"],
            ["Broken", "garbage", "address"]
         ]
      });
      std::fs::write(&path, doc.to_string()).unwrap();

      let storage = WalletStorage::open(&path).unwrap();
      let mut registry = ContactRegistry::from_storage(&storage, Network::Mainnet);
      let addresses: Vec<_> = registry.get_all().into_iter().map(|c| c.address).collect();
      assert_eq!(addresses, vec![ALICE, BOB, "shop.example", "garbage"]);

      // the entry rebuilt from the parsed address is the one we hold
      registry.remove(&contact("Alice", ALICE));
      assert_eq!(registry.len(), 3);
      assert!(registry.find_by_address(ALICE).is_none());
   }
}
