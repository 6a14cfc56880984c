use crate::core::{
   Contact, ContactError, ContactModel, ContactsEvent, EventBus, Explorer, Settings, Wallet,
   WalletEngine, model::list_models,
};
use anyhow::Context as _;
use cash_address::{Address, AddressFormat, Network};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Thread-safe handle to the [ContactsContext]
///
/// Events are emitted after the lock is released so listeners are free to read the context.
#[derive(Clone)]
pub struct ContactsCtx {
   inner: Arc<RwLock<ContactsContext>>,
   events: EventBus,
}

impl ContactsCtx {
   pub fn new(settings: Settings) -> Self {
      Self {
         inner: Arc::new(RwLock::new(ContactsContext::new(settings, None))),
         events: EventBus::new(),
      }
   }

   /// Same as [ContactsCtx::new] but settings are saved to `path` instead of the data directory
   pub fn with_settings_path(settings: Settings, path: PathBuf) -> Self {
      Self {
         inner: Arc::new(RwLock::new(ContactsContext::new(settings, Some(path)))),
         events: EventBus::new(),
      }
   }

   /// Shared access to the context
   pub fn read<R>(&self, reader: impl FnOnce(&ContactsContext) -> R) -> R {
      reader(&self.inner.read().unwrap())
   }

   /// Exclusive mutable access to the context
   pub fn write<R>(&self, writer: impl FnOnce(&mut ContactsContext) -> R) -> R {
      writer(&mut self.inner.write().unwrap())
   }

   pub fn events(&self) -> EventBus {
      self.events.clone()
   }

   pub fn settings(&self) -> Settings {
      self.read(|ctx| ctx.settings().clone())
   }

   /// Network of the open wallet, or the configured one if no wallet is open
   pub fn network(&self) -> Network {
      self.read(|ctx| match &ctx.wallet {
         Some(wallet) => wallet.network(),
         None => ctx.settings.network,
      })
   }

   pub fn address_format(&self) -> AddressFormat {
      self.read(|ctx| ctx.settings.address_format())
   }

   pub fn explorer(&self) -> Explorer {
      self.read(|ctx| ctx.settings.explorer)
   }

   pub fn set_address_format(&self, format: AddressFormat) -> Result<(), anyhow::Error> {
      self.update_settings(|settings| settings.set_address_format(format))
   }

   pub fn set_explorer(&self, explorer: Explorer) -> Result<(), anyhow::Error> {
      self.update_settings(|settings| settings.explorer = explorer)
   }

   fn update_settings(&self, update: impl FnOnce(&mut Settings)) -> Result<(), anyhow::Error> {
      self.write(|ctx| {
         update(&mut ctx.settings);
         ctx.save_settings()
      })?;
      self.events.emit(ContactsEvent::SettingsChanged);
      Ok(())
   }

   pub fn open_wallet(&self, wallet: Box<dyn WalletEngine>) {
      tracing::info!("Wallet {} is now open", wallet.name());
      self.write(|ctx| ctx.wallet = Some(wallet));
      self.events.emit(ContactsEvent::WalletOpened);
   }

   /// Open the wallet file named in the settings
   pub fn open_wallet_from_settings(&self) -> Result<(), anyhow::Error> {
      let settings = self.settings();
      let path = settings.wallet_path()?;
      let wallet = Wallet::open(&path, settings.network)
         .with_context(|| format!("Failed to open wallet {}", path.display()))?;
      self.open_wallet(Box::new(wallet));
      Ok(())
   }

   pub fn close_wallet(&self) {
      let closed = self.write(|ctx| ctx.wallet.take());
      if let Some(wallet) = closed {
         tracing::info!("Wallet {} closed", wallet.name());
         self.events.emit(ContactsEvent::WalletClosed);
      }
   }

   pub fn has_wallet(&self) -> bool {
      self.read(|ctx| ctx.wallet.is_some())
   }

   pub fn wallet_name(&self) -> Option<String> {
      self.read(|ctx| ctx.wallet.as_ref().map(|w| w.name().to_string()))
   }

   /// Sorted snapshot of the contacts, `None` if no wallet is open
   pub fn contacts(&self) -> Option<Vec<ContactModel>> {
      self.read(|ctx| {
         let wallet = ctx.wallet.as_ref()?;
         Some(list_models(&wallet.list_contacts(), wallet.network()))
      })
   }

   /// Get a contact by its address
   pub fn get_contact_by_address(&self, address: &Address) -> Option<Contact> {
      let address = address.to_storage_string();
      self.read(|ctx| ctx.wallet.as_ref()?.find_contact(&address))
   }

   /// Apply `change` to the wallet's contacts and write the wallet
   ///
   /// If the change or the write fails the contacts are put back as they were, so a failed
   /// operation leaves nothing behind in memory either.
   fn update_contacts(
      &self,
      change: impl FnOnce(&mut dyn WalletEngine) -> Result<(), anyhow::Error>,
   ) -> Result<(), ContactError> {
      self.write(|ctx| {
         let wallet = ctx.wallet.as_mut().ok_or(ContactError::NoWallet)?;
         let snapshot = wallet.list_contacts();

         let result = match change(wallet.as_mut()).context("Failed to update the contacts") {
            Ok(()) => wallet.persist().context("Failed to save the wallet"),
            Err(e) => Err(e),
         };

         if let Err(e) = result {
            if let Err(restore) = wallet.restore_contacts(snapshot) {
               tracing::error!("Failed to roll back the contacts: {:#}", restore);
            }
            return Err(ContactError::Storage(e));
         }
         Ok(())
      })
   }

   /// Add `new`, or replace `old` with it, and write the wallet
   pub fn save_contact(&self, new: Contact, old: Option<Contact>) -> Result<(), ContactError> {
      let name = new.name.clone();
      self.update_contacts(|wallet| wallet.add_contact(new, old.as_ref()))?;

      if old.is_some() {
         tracing::info!("Contact {} updated", name);
      } else {
         tracing::info!("Contact {} added", name);
      }

      self.events.emit(ContactsEvent::ContactsChanged);
      Ok(())
   }

   /// Remove `contact` and write the wallet, a missing contact is not an error
   pub fn delete_contact(&self, contact: &Contact) -> Result<(), ContactError> {
      self.update_contacts(|wallet| wallet.remove_contact(contact))?;

      tracing::info!("Contact {} deleted", contact.name);
      self.events.emit(ContactsEvent::ContactsChanged);
      Ok(())
   }
}

pub struct ContactsContext {
   /// The open wallet, if any
   wallet: Option<Box<dyn WalletEngine>>,

   settings: Settings,

   /// Where settings are saved, the data directory if `None`
   settings_path: Option<PathBuf>,
}

impl ContactsContext {
   fn new(settings: Settings, settings_path: Option<PathBuf>) -> Self {
      Self {
         wallet: None,
         settings,
         settings_path,
      }
   }

   pub fn settings(&self) -> &Settings {
      &self.settings
   }

   fn save_settings(&self) -> Result<(), anyhow::Error> {
      match &self.settings_path {
         Some(path) => self.settings.save_to(path),
         None => self.settings.save(),
      }
   }
}
