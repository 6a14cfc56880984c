use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactError {
   #[error("Name is empty")]
   EmptyName,

   #[error("Invalid address: {0}")]
   InvalidAddress(#[from] cash_address::Error),

   #[error("No wallet is open")]
   NoWallet,

   /// Writing the wallet failed
   #[error(transparent)]
   Storage(#[from] anyhow::Error),
}

impl ContactError {
   /// Errors caused by what the user typed, the dialog stays open so they can fix it
   pub fn is_validation(&self) -> bool {
      matches!(self, Self::EmptyName | Self::InvalidAddress(_))
   }
}
