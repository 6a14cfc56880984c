use crate::Error;
use sha2::{Digest, Sha256};

const CHECKSUM_LEN: usize = 4;

fn double_sha256(data: &[u8]) -> [u8; 32] {
   let first = Sha256::digest(data);
   Sha256::digest(first).into()
}

/// Base58Check encode `version || payload`
pub fn encode_check(version: u8, payload: &[u8]) -> String {
   let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
   data.push(version);
   data.extend_from_slice(payload);

   let checksum = double_sha256(&data);
   data.extend_from_slice(&checksum[..CHECKSUM_LEN]);

   bs58::encode(data).into_string()
}

/// Base58Check decode, returns the version byte and the payload
pub fn decode_check(input: &str) -> Result<(u8, Vec<u8>), Error> {
   let data = bs58::decode(input).into_vec().map_err(|e| match e {
      bs58::decode::Error::InvalidCharacter { character, .. } => Error::InvalidCharacter(character),
      bs58::decode::Error::NonAsciiCharacter { index } => {
         let c = input.get(index..).and_then(|s| s.chars().next()).unwrap_or('?');
         Error::InvalidCharacter(c)
      }
      _ => Error::InvalidLength(input.len()),
   })?;

   if data.len() <= CHECKSUM_LEN {
      return Err(Error::InvalidLength(data.len()));
   }

   let (body, checksum) = data.split_at(data.len() - CHECKSUM_LEN);
   if double_sha256(body)[..CHECKSUM_LEN] != *checksum {
      return Err(Error::InvalidChecksum);
   }

   let (version, payload) = body.split_first().ok_or(Error::InvalidLength(0))?;
   Ok((*version, payload.to_vec()))
}
