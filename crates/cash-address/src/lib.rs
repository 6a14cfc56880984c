//! Bitcoin Cash addresses
//!
//! An [Address] has two canonical text forms:
//!
//! - The storage string, legacy Base58Check, which is what we write to disk.
//! - The UI string, CashAddr or legacy depending on the user's [AddressFormat] choice.
//!
//! Both round-trip through [Address::parse].

pub mod base58;
pub mod cashaddr;
pub mod error;

pub use error::Error;

use std::fmt;
use std::str::FromStr;

pub const HASH_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Network {
   #[default]
   Mainnet,
   Testnet,
}

impl Network {
   pub fn cashaddr_prefix(&self) -> &'static str {
      match self {
         Self::Mainnet => "bitcoincash",
         Self::Testnet => "bchtest",
      }
   }

   pub fn legacy_version(&self, kind: AddressKind) -> u8 {
      match (self, kind) {
         (Self::Mainnet, AddressKind::P2PKH) => 0x00,
         (Self::Mainnet, AddressKind::P2SH) => 0x05,
         (Self::Testnet, AddressKind::P2PKH) => 0x6f,
         (Self::Testnet, AddressKind::P2SH) => 0xc4,
      }
   }

   fn kind_from_legacy_version(&self, version: u8) -> Option<AddressKind> {
      [AddressKind::P2PKH, AddressKind::P2SH]
         .into_iter()
         .find(|kind| self.legacy_version(*kind) == version)
   }

   pub fn is_mainnet(&self) -> bool {
      matches!(self, Self::Mainnet)
   }
}

impl fmt::Display for Network {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      match self {
         Self::Mainnet => write!(f, "Mainnet"),
         Self::Testnet => write!(f, "Testnet"),
      }
   }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
   /// Pay to public key hash
   P2PKH,

   /// Pay to script hash
   P2SH,
}

impl AddressKind {
   /// CashAddr version byte for a 160-bit hash
   fn cashaddr_version(&self) -> u8 {
      match self {
         Self::P2PKH => 0x00,
         Self::P2SH => 0x08,
      }
   }

   fn from_cashaddr_version(version: u8) -> Result<Self, Error> {
      match version >> 3 {
         0 => Ok(Self::P2PKH),
         1 => Ok(Self::P2SH),
         _ => Err(Error::UnknownVersion(version)),
      }
   }
}

/// How an address is presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddressFormat {
   #[default]
   CashAddr,
   Legacy,
}

impl AddressFormat {
   pub fn from_cashaddr_flag(cashaddr: bool) -> Self {
      if cashaddr { Self::CashAddr } else { Self::Legacy }
   }

   pub fn is_cashaddr(&self) -> bool {
      matches!(self, Self::CashAddr)
   }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
   network: Network,
   kind: AddressKind,
   hash: [u8; HASH_LEN],
}

impl Address {
   pub fn new(network: Network, kind: AddressKind, hash: [u8; HASH_LEN]) -> Self {
      Self {
         network,
         kind,
         hash,
      }
   }

   /// Parse an address in any supported text form
   ///
   /// Accepts CashAddr with or without the network prefix and legacy Base58Check.
   /// Surrounding whitespace is ignored.
   pub fn parse(text: &str, network: Network) -> Result<Self, Error> {
      let text = text.trim();
      if text.is_empty() {
         return Err(Error::Empty);
      }

      if text.contains(':') {
         return Self::from_cashaddr(text, network);
      }

      match Self::from_cashaddr(text, network) {
         Ok(address) => Ok(address),
         Err(cashaddr_err) => match Self::from_legacy(text, network) {
            Ok(address) => Ok(address),
            // a 160-bit CashAddr payload is always 42 characters
            Err(legacy_err) => {
               if text.len() == 42 {
                  Err(cashaddr_err)
               } else {
                  Err(legacy_err)
               }
            }
         },
      }
   }

   pub fn from_cashaddr(text: &str, network: Network) -> Result<Self, Error> {
      let (version, hash) = cashaddr::decode(text, network.cashaddr_prefix())?;
      let kind = AddressKind::from_cashaddr_version(version)?;
      let hash: [u8; HASH_LEN] = hash
         .as_slice()
         .try_into()
         .map_err(|_| Error::InvalidLength(hash.len()))?;
      Ok(Self::new(network, kind, hash))
   }

   pub fn from_legacy(text: &str, network: Network) -> Result<Self, Error> {
      let (version, hash) = base58::decode_check(text)?;
      let kind = network
         .kind_from_legacy_version(version)
         .ok_or(Error::UnknownVersion(version))?;
      let hash: [u8; HASH_LEN] = hash
         .as_slice()
         .try_into()
         .map_err(|_| Error::InvalidLength(hash.len()))?;
      Ok(Self::new(network, kind, hash))
   }

   pub fn network(&self) -> Network {
      self.network
   }

   pub fn kind(&self) -> AddressKind {
      self.kind
   }

   pub fn hash(&self) -> &[u8; HASH_LEN] {
      &self.hash
   }

   /// CashAddr including the network prefix
   pub fn to_cashaddr(&self) -> String {
      cashaddr::encode(
         self.network.cashaddr_prefix(),
         self.kind.cashaddr_version(),
         &self.hash,
      )
   }

   /// CashAddr without the network prefix
   pub fn to_cashaddr_short(&self) -> String {
      let full = self.to_cashaddr();
      match full.split_once(':') {
         Some((_, payload)) => payload.to_string(),
         None => full,
      }
   }

   pub fn to_legacy(&self) -> String {
      base58::encode_check(self.network.legacy_version(self.kind), &self.hash)
   }

   /// The form we persist to disk
   pub fn to_storage_string(&self) -> String {
      self.to_legacy()
   }

   /// The form we show to the user, CashAddr is shown without its prefix
   pub fn to_ui_string(&self, format: AddressFormat) -> String {
      match format {
         AddressFormat::CashAddr => self.to_cashaddr_short(),
         AddressFormat::Legacy => self.to_legacy(),
      }
   }

   /// Same as [Address::to_ui_string] but keeps the CashAddr prefix
   pub fn to_full_ui_string(&self, format: AddressFormat) -> String {
      match format {
         AddressFormat::CashAddr => self.to_cashaddr(),
         AddressFormat::Legacy => self.to_legacy(),
      }
   }
}

impl fmt::Display for Address {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "{}", self.to_cashaddr())
   }
}

/// Parses a mainnet address
impl FromStr for Address {
   type Err = Error;

   fn from_str(s: &str) -> Result<Self, Self::Err> {
      Self::parse(s, Network::Mainnet)
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   // (legacy, cashaddr) pairs from the CashAddr specification
   const VECTORS: [(&str, &str); 4] = [
      (
         "1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu",
         "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a",
      ),
      (
         "1KXrWXciRDZUpQwQmuM1DbwsKDLYAYsVLR",
         "bitcoincash:qr95sy3j9xwd2ap32xkykttr4cvcu7as4y0qverfuy",
      ),
      (
         "16w1D5WRVKJuZUsSRzdLp9w3YGcgoxDXb",
         "bitcoincash:qqq3728yw0y47sqn6l2na30mcw6zm78dzqre909m2r",
      ),
      (
         "3CWFddi6m4ndiGyKqzYvsFYagqDLPVMTzC",
         "bitcoincash:ppm2qsznhks23z7629mms6s4cwef74vcwvn0h829pq",
      ),
   ];

   #[test]
   fn translates_between_formats() {
      for (legacy, cash) in VECTORS {
         let from_legacy = Address::parse(legacy, Network::Mainnet).unwrap();
         let from_cash = Address::parse(cash, Network::Mainnet).unwrap();
         assert_eq!(from_legacy, from_cash);
         assert_eq!(from_legacy.to_cashaddr(), cash);
         assert_eq!(from_cash.to_legacy(), legacy);
      }
   }

   #[test]
   fn p2sh_is_detected() {
      let address = Address::parse(VECTORS[3].0, Network::Mainnet).unwrap();
      assert_eq!(address.kind(), AddressKind::P2SH);
   }

   #[test]
   fn storage_and_ui_strings_round_trip() {
      for (legacy, _) in VECTORS {
         let address = Address::parse(legacy, Network::Mainnet).unwrap();

         let storage = address.to_storage_string();
         assert_eq!(Address::parse(&storage, Network::Mainnet).unwrap(), address);

         for format in [AddressFormat::CashAddr, AddressFormat::Legacy] {
            let ui = address.to_ui_string(format);
            assert_eq!(Address::parse(&ui, Network::Mainnet).unwrap(), address);

            let full = address.to_full_ui_string(format);
            assert_eq!(Address::parse(&full, Network::Mainnet).unwrap(), address);
         }
      }
   }

   #[test]
   fn ui_string_drops_the_prefix() {
      let address = Address::parse(VECTORS[0].1, Network::Mainnet).unwrap();
      assert_eq!(
         address.to_ui_string(AddressFormat::CashAddr),
         "qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a"
      );
   }

   #[test]
   fn testnet_round_trip() {
      let hash = [7u8; HASH_LEN];
      let address = Address::new(Network::Testnet, AddressKind::P2PKH, hash);
      assert!(address.to_cashaddr().starts_with("bchtest:"));

      let legacy = address.to_legacy();
      assert_eq!(Address::parse(&legacy, Network::Testnet).unwrap(), address);
      assert_eq!(
         Address::parse(&legacy, Network::Mainnet),
         Err(Error::UnknownVersion(0x6f))
      );
   }

   #[test]
   fn trims_whitespace() {
      let text = format!("  {}\n", VECTORS[1].0);
      assert!(Address::parse(&text, Network::Mainnet).is_ok());
   }

   #[test]
   fn rejects_garbage() {
      assert_eq!(Address::parse("   ", Network::Mainnet), Err(Error::Empty));
      assert!(Address::parse("hello world", Network::Mainnet).is_err());
      assert!(Address::parse("bitcoincash:", Network::Mainnet).is_err());
   }

   #[test]
   fn reports_cashaddr_errors_for_cashaddr_shaped_input() {
      let res = Address::parse(
         "qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6q",
         Network::Mainnet,
      );
      assert_eq!(res, Err(Error::InvalidChecksum));
   }
}
