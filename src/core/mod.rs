pub mod contacts;
pub mod context;
pub mod error;
pub mod events;
pub mod explorer;
pub mod form;
pub mod model;
pub mod settings;
pub mod storage;
pub mod utils;
pub mod wallet;


pub use contacts::{Contact, ContactKind, ContactRegistry};
pub use context::*;
pub use error::ContactError;
pub use events::{ContactsEvent, EventBus, RefreshFlag, SubscriptionId};
pub use explorer::Explorer;
pub use form::{ContactForm, DeleteRequest};
pub use model::{ContactArgs, ContactModel};
pub use settings::Settings;
pub use storage::WalletStorage;
pub use wallet::{Wallet, WalletEngine};
