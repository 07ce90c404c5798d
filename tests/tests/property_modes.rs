//! Property-based tests for the modes of operation

use gfmodes_algorithms::block::modes::{Cbc, Ctr, Ecb, Gcm, Verification};
use gfmodes_algorithms::sequence::{IterBlocks, SliceBlocks};
use gfmodes_tests::{IdentityCipher, Pkcs7, RotateCipher};
use proptest::prelude::*;

/// Block sizes with a designated field for the authenticated mode
fn gcm_block_size() -> impl Strategy<Value = usize> {
    prop_oneof![Just(8usize), Just(16), Just(32)]
}

/// Whole blocks of plaintext for the authenticated mode
fn whole_blocks(block_size: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=6 * block_size).prop_map(move |mut v| {
        v.truncate(v.len() / block_size * block_size);
        v
    })
}

proptest! {
    #[test]
    fn ecb_roundtrip(
        block_size in 1usize..=32,
        seed in any::<u64>(),
        data in prop::collection::vec(any::<u8>(), 0..200)
    ) {
        let cipher = RotateCipher::seeded(block_size, seed);
        let ecb = Ecb::new(&cipher, &Pkcs7).unwrap();
        let ciphertext = ecb.encrypt_to_vec(&data).unwrap();
        prop_assert_eq!(ciphertext.len() % block_size, 0);
        let plaintext = ecb.decrypt_to_vec(&ciphertext).unwrap().into_verified().unwrap();
        prop_assert_eq!(plaintext, data);
    }

    #[test]
    fn cbc_roundtrip_with_iv_first(
        block_size in 1usize..=32,
        seed in any::<u64>(),
        data in prop::collection::vec(any::<u8>(), 0..200)
    ) {
        let cipher = RotateCipher::seeded(block_size, seed);
        let iv: Vec<u8> = (0..block_size).map(|i| (i as u8) ^ (seed as u8)).collect();
        let cbc = Cbc::new(&cipher, &iv, &Pkcs7).unwrap();

        let ciphertext = cbc.encrypt_to_vec(&data).unwrap();
        prop_assert_eq!(&ciphertext[..block_size], &iv[..]);

        let plaintext = cbc.decrypt_to_vec(&ciphertext).unwrap().into_verified().unwrap();
        prop_assert_eq!(plaintext, data);
    }

    #[test]
    fn ctr_encrypt_is_decrypt(
        block_size in 2usize..=32,
        seed in any::<u64>(),
        data in prop::collection::vec(any::<u8>(), 0..200)
    ) {
        let cipher = RotateCipher::seeded(block_size, seed);
        let nonce = vec![0x5a; block_size / 2];
        let ctr = Ctr::new(&cipher, &nonce).unwrap();

        let encrypted = ctr.encrypt_to_vec(&data).unwrap();
        let (decrypted, verification) = ctr.decrypt_to_vec(&data).unwrap().into_unverified_parts();
        prop_assert_eq!(verification, Verification::NotApplicable);
        prop_assert_eq!(&encrypted, &decrypted);
        prop_assert_eq!(encrypted.len(), data.len());

        let recovered = ctr.decrypt_to_vec(&encrypted).unwrap().into_verified().unwrap();
        prop_assert_eq!(recovered, data);
    }

    #[test]
    fn gcm_roundtrip_verifies(
        (block_size, data) in gcm_block_size().prop_flat_map(|bs| (Just(bs), whole_blocks(bs))),
        seed in any::<u64>(),
        header_len in 0usize..=8
    ) {
        let cipher = RotateCipher::seeded(block_size, seed);
        let nonce = vec![0xc3; block_size / 2];
        let header = vec![0x48; header_len];
        let gcm = Gcm::new(&cipher, &nonce, &header).unwrap();

        let framed = gcm.encrypt_to_vec(&data).unwrap();
        prop_assert_eq!(framed.len(), data.len() + 2 * block_size);

        let decrypted = gcm.decrypt_to_vec(&framed).unwrap();
        prop_assert_eq!(decrypted.verification(), Verification::Verified);
        prop_assert_eq!(decrypted.into_verified().unwrap(), data);
    }

    #[test]
    fn gcm_bit_flip_fails_verification(
        blocks in 0usize..4,
        seed in any::<u64>(),
        flip in any::<prop::sample::Index>()
    ) {
        let cipher = RotateCipher::seeded(16, seed | 1);
        let gcm = Gcm::new(&cipher, &[7u8; 8], b"header").unwrap();
        let data = vec![0xab; blocks * 16];
        let mut framed = gcm.encrypt_to_vec(&data).unwrap();

        let bit = flip.index(framed.len() * 8);
        framed[bit / 8] ^= 1 << (bit % 8);

        let (plaintext, verification) = gcm.decrypt_to_vec(&framed).unwrap().into_unverified_parts();
        prop_assert_eq!(verification, Verification::Failed);
        prop_assert_eq!(plaintext.len(), data.len());
    }

    #[test]
    fn chunking_does_not_change_ciphertext(
        data in prop::collection::vec(any::<u8>(), 0..100),
    ) {
        let cipher = IdentityCipher { block_size: 8 };
        let cbc = Cbc::new(&cipher, &[1u8; 8], &Pkcs7).unwrap();

        let whole = cbc.encrypt_to_vec(&data).unwrap();
        let chunks: Vec<Vec<u8>> = data.chunks(8).map(<[u8]>::to_vec).collect();
        let streamed = cbc.encrypt(IterBlocks::new(chunks)).collect_bytes().unwrap();
        prop_assert_eq!(whole, streamed);

        // IV, then one element per chunk; an empty input still has a final chunk
        let chunk_count = ((data.len() + 7) / 8).max(1);
        let elements = cbc.encrypt(SliceBlocks::new(&data, 8).unwrap()).count();
        prop_assert_eq!(elements, 1 + chunk_count);
    }
}
