use rstest::rstest;

use super::*;

#[rstest]
#[case(b"", 0x811c_9dc5)]
#[case(b"a", 0xe40c_292c)]
#[case(b"b", 0xe70c_2de5)]
#[case(b"c", 0xe60c_2c52)]
#[case(b"d", 0xe10c_2473)]
#[case(b"foobar", 0xbf9c_f968)]
fn test_fnv1a_32_reference_values(#[case] input: &[u8], #[case] expected: u32) {
  assert_eq!(fnv1a_32(input), expected);
  assert_eq!(Fnv1aKeyHasher.hash_key(input), expected);
}

#[test]
fn test_fnv1a_32_is_const_evaluable() {
  const HASH: u32 = fnv1a_32(b"a");
  assert_eq!(HASH, 0xe40c_292c);
}

#[test]
fn test_sip_key_hasher_is_stable_per_key() {
  let hasher = SipKeyHasher::new(7, 11);
  let first = hasher.hash_key(b"account:42");
  for _ in 0..1_000 {
    assert_eq!(hasher.hash_key(b"account:42"), first);
  }
  assert_eq!(SipKeyHasher::new(7, 11).hash_key(b"account:42"), first);
}

#[test]
fn test_sip_key_hasher_depends_on_keys() {
  let a = SipKeyHasher::new(1, 2);
  let b = SipKeyHasher::new(3, 4);
  let differing = (0..64)
    .map(|i| format!("key-{}", i))
    .filter(|key| a.hash_key(key.as_bytes()) != b.hash_key(key.as_bytes()))
    .count();
  assert!(differing > 0, "鍵が異なればハッシュ値も変わる想定");
}
