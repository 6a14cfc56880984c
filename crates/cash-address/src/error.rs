use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
   /// Nothing left after trimming the input
   #[error("Address is empty")]
   Empty,

   /// A character outside of the CashAddr or Base58 alphabet
   #[error("Invalid character '{0}' in address")]
   InvalidCharacter(char),

   /// CashAddr strings must be all lowercase or all uppercase
   #[error("Address mixes upper and lower case characters")]
   MixedCase,

   /// The CashAddr polymod or the Base58Check checksum did not verify
   #[error("Address checksum mismatch")]
   InvalidChecksum,

   /// A CashAddr prefix that does not belong to the expected network
   #[error("Address prefix '{found}' does not match the expected prefix '{expected}'")]
   PrefixMismatch {
      expected: &'static str,
      found: String,
   },

   /// Version byte that maps to no known address kind on this network
   #[error("Unknown address version byte 0x{0:02x}")]
   UnknownVersion(u8),

   /// Decoded payload has the wrong size
   #[error("Invalid address length: {0} bytes")]
   InvalidLength(usize),

   /// Non-zero padding bits in a CashAddr payload
   #[error("Invalid padding in address payload")]
   InvalidPadding,
}
