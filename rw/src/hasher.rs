use std::hash::Hasher;

use siphasher::sip::SipHasher;

#[cfg(test)]
mod tests;

pub const FNV_OFFSET_BASIS_32: u32 = 0x811c_9dc5;
pub const FNV_PRIME_32: u32 = 0x0100_0193;

/// 32-bit FNV-1a over `bytes`.
///
/// Fast with a good spread over short keys. It is not resistant to crafted input.
pub const fn fnv1a_32(bytes: &[u8]) -> u32 {
  let mut hash = FNV_OFFSET_BASIS_32;
  let mut i = 0;
  while i < bytes.len() {
    hash ^= bytes[i] as u32;
    hash = hash.wrapping_mul(FNV_PRIME_32);
    i += 1;
  }
  hash
}

/// Maps key bytes to a 32-bit hash used for shard routing.
///
/// Implementations must be pure: the same bytes always hash to the same value.
pub trait KeyHasher: Send + Sync {
  fn hash_key(&self, key: &[u8]) -> u32;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fnv1aKeyHasher;

impl KeyHasher for Fnv1aKeyHasher {
  fn hash_key(&self, key: &[u8]) -> u32 {
    fnv1a_32(key)
  }
}

/// Keyed SipHash-2-4, folded down to 32 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SipKeyHasher {
  k0: u64,
  k1: u64,
}

impl SipKeyHasher {
  pub fn new(k0: u64, k1: u64) -> Self {
    Self { k0, k1 }
  }
}

impl KeyHasher for SipKeyHasher {
  fn hash_key(&self, key: &[u8]) -> u32 {
    let mut hasher = SipHasher::new_with_keys(self.k0, self.k1);
    hasher.write(key);
    let hash = hasher.finish();
    (hash ^ (hash >> 32)) as u32
  }
}
