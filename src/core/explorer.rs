use cash_address::Address;
use std::fmt;

/// Block explorers we can open an address in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Explorer {
   #[default]
   Blockchair,
   BitcoinCom,
}

impl Explorer {
   pub const ALL: [Explorer; 2] = [Explorer::Blockchair, Explorer::BitcoinCom];

   /// Link to the address page
   ///
   /// Blockchair has no testnet, testnet addresses always go to a testnet explorer.
   pub fn address_url(&self, address: &Address) -> String {
      let cashaddr = address.to_cashaddr();
      if !address.network().is_mainnet() {
         return format!("https://tbch.loping.net/address/{}", cashaddr);
      }

      match self {
         Self::Blockchair => format!("https://blockchair.com/bitcoin-cash/address/{}", cashaddr),
         Self::BitcoinCom => format!("https://explorer.bitcoin.com/bch/address/{}", cashaddr),
      }
   }
}

impl fmt::Display for Explorer {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      match self {
         Self::Blockchair => write!(f, "Blockchair"),
         Self::BitcoinCom => write!(f, "Bitcoin.com"),
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use cash_address::{AddressKind, Network};

   #[test]
   fn mainnet_urls_use_the_full_cashaddr() {
      let address = Address::parse("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu", Network::Mainnet).unwrap();
      assert_eq!(
         Explorer::Blockchair.address_url(&address),
         "https://blockchair.com/bitcoin-cash/address/bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a"
      );
      assert!(Explorer::BitcoinCom.address_url(&address).starts_with("https://explorer.bitcoin.com/bch/"));
   }

   #[test]
   fn testnet_goes_to_a_testnet_explorer() {
      let address = Address::new(Network::Testnet, AddressKind::P2PKH, [1u8; 20]);
      for explorer in Explorer::ALL {
         assert!(explorer.address_url(&address).contains("/address/bchtest:"));
      }
   }
}
