//! CashAddr encoding
//!
//! A Bech32 variant with a 40-bit BCH checksum over the network prefix and
//! the base32 payload `version byte || hash`.

use crate::Error;

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const CHECKSUM_LEN: usize = 8;

/// Hash sizes in bytes indexed by the low 3 bits of the version byte
const HASH_SIZES: [usize; 8] = [20, 24, 28, 32, 40, 48, 56, 64];

fn polymod(values: &[u8]) -> u64 {
   let mut c: u64 = 1;
   for &d in values {
      let c0 = (c >> 35) as u8;
      c = ((c & 0x07_ffff_ffff) << 5) ^ d as u64;

      if c0 & 0x01 != 0 {
         c ^= 0x98_f2bc_8e61;
      }
      if c0 & 0x02 != 0 {
         c ^= 0x79_b76d_99e2;
      }
      if c0 & 0x04 != 0 {
         c ^= 0xf3_3e5f_b3c4;
      }
      if c0 & 0x08 != 0 {
         c ^= 0xae_2eab_e2a8;
      }
      if c0 & 0x10 != 0 {
         c ^= 0x1e_4f43_e470;
      }
   }
   c ^ 1
}

/// Lower 5 bits of every prefix character followed by the separator zero
fn expand_prefix(prefix: &str) -> Vec<u8> {
   let mut out: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
   out.push(0);
   out
}

fn create_checksum(prefix: &str, payload: &[u8]) -> [u8; CHECKSUM_LEN] {
   let mut input = expand_prefix(prefix);
   input.extend_from_slice(payload);
   input.extend_from_slice(&[0u8; CHECKSUM_LEN]);

   let poly = polymod(&input);
   let mut checksum = [0u8; CHECKSUM_LEN];
   for (i, value) in checksum.iter_mut().enumerate() {
      *value = ((poly >> (5 * (7 - i))) & 0x1f) as u8;
   }
   checksum
}

fn verify_checksum(prefix: &str, values: &[u8]) -> bool {
   let mut input = expand_prefix(prefix);
   input.extend_from_slice(values);
   polymod(&input) == 0
}

/// Regroup 8-bit bytes into 5-bit values, zero padding the tail
fn to_base32(data: &[u8]) -> Vec<u8> {
   let mut acc: u32 = 0;
   let mut bits: u32 = 0;
   let mut out = Vec::with_capacity((data.len() * 8).div_ceil(5));

   for &byte in data {
      acc = (acc << 8) | byte as u32;
      bits += 8;
      while bits >= 5 {
         bits -= 5;
         out.push(((acc >> bits) & 0x1f) as u8);
      }
      acc &= (1 << bits) - 1;
   }

   if bits > 0 {
      out.push(((acc << (5 - bits)) & 0x1f) as u8);
   }
   out
}

/// Regroup 5-bit values into bytes, rejecting more than 4 bits of non-zero padding
fn from_base32(values: &[u8]) -> Result<Vec<u8>, Error> {
   let mut acc: u32 = 0;
   let mut bits: u32 = 0;
   let mut out = Vec::with_capacity(values.len() * 5 / 8);

   for &value in values {
      acc = (acc << 5) | value as u32;
      bits += 5;
      if bits >= 8 {
         bits -= 8;
         out.push(((acc >> bits) & 0xff) as u8);
      }
      acc &= (1 << bits) - 1;
   }

   if bits >= 5 || acc != 0 {
      return Err(Error::InvalidPadding);
   }
   Ok(out)
}

/// Encode `version || hash` as a full CashAddr string (`prefix:payload`)
pub fn encode(prefix: &str, version: u8, hash: &[u8]) -> String {
   let mut bytes = Vec::with_capacity(hash.len() + 1);
   bytes.push(version);
   bytes.extend_from_slice(hash);

   let payload = to_base32(&bytes);
   let checksum = create_checksum(prefix, &payload);

   let mut out = String::with_capacity(prefix.len() + 1 + payload.len() + CHECKSUM_LEN);
   out.push_str(prefix);
   out.push(':');
   for value in payload.iter().chain(checksum.iter()) {
      out.push(CHARSET[*value as usize] as char);
   }
   out
}

/// Decode a CashAddr string, with or without prefix
///
/// When the prefix is missing `expected_prefix` is assumed.
/// Returns the version byte and the hash.
pub fn decode(input: &str, expected_prefix: &'static str) -> Result<(u8, Vec<u8>), Error> {
   let has_lower = input.chars().any(|c| c.is_ascii_lowercase());
   let has_upper = input.chars().any(|c| c.is_ascii_uppercase());
   if has_lower && has_upper {
      return Err(Error::MixedCase);
   }

   let lowered = input.to_ascii_lowercase();
   let (prefix, payload) = match lowered.rsplit_once(':') {
      Some((prefix, payload)) => (prefix, payload),
      None => (expected_prefix, lowered.as_str()),
   };

   if prefix != expected_prefix {
      return Err(Error::PrefixMismatch {
         expected: expected_prefix,
         found: prefix.to_string(),
      });
   }

   let mut values = Vec::with_capacity(payload.len());
   for c in payload.chars() {
      let index = CHARSET
         .iter()
         .position(|&x| x as char == c)
         .ok_or(Error::InvalidCharacter(c))?;
      values.push(index as u8);
   }

   if values.len() <= CHECKSUM_LEN {
      return Err(Error::InvalidLength(values.len()));
   }

   if !verify_checksum(prefix, &values) {
      return Err(Error::InvalidChecksum);
   }

   let data = from_base32(&values[..values.len() - CHECKSUM_LEN])?;
   let (version, hash) = data.split_first().ok_or(Error::InvalidLength(0))?;

   // the high bit is reserved
   if version & 0x80 != 0 {
      return Err(Error::UnknownVersion(*version));
   }

   let expected_len = HASH_SIZES[(version & 0x07) as usize];
   if hash.len() != expected_len {
      return Err(Error::InvalidLength(hash.len()));
   }

   Ok((*version, hash.to_vec()))
}
