pub mod contacts;
pub mod misc;
pub mod settings;

pub use contacts::{ContactDialog, ContactsUi, DeleteContactDialog};
pub use misc::{MsgWindow, Toast};
pub use settings::SettingsUi;
