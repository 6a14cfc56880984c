pub mod ctx;

pub use ctx::{ContactsContext, ContactsCtx};

use crate::core::utils::RT;

/// Open the configured wallet on a blocking thread
///
/// The list view picks it up through [crate::core::ContactsEvent::WalletOpened].
pub fn open_wallet_in_background(ctx: ContactsCtx) {
   RT.spawn_blocking(move || {
      if let Err(e) = ctx.open_wallet_from_settings() {
         tracing::error!("{:#}", e);
      }
   });
}
