use super::*;
use crate::block::modes::testing::{FixedLengthPadding, Pkcs7, ToyCipher};
use crate::sequence::IterBlocks;
use gfmodes_api::Error;

#[test]
fn test_ecb_roundtrip_lengths() {
    let cipher = ToyCipher::new(8, 0x5c);
    let ecb = Ecb::new(&cipher, &Pkcs7).unwrap();
    for len in [0usize, 1, 7, 8, 9, 16, 23] {
        let pt: Vec<u8> = (0..len as u8).collect();
        let ct = ecb.encrypt_to_vec(&pt).unwrap();
        assert_eq!(ct.len() % 8, 0);
        assert!(ct.len() > pt.len());
        let recovered = ecb.decrypt_to_vec(&ct).unwrap();
        assert_eq!(recovered.verification(), Verification::NotApplicable);
        assert_eq!(recovered.into_verified().unwrap(), pt, "length {}", len);
    }
}

#[test]
fn test_ecb_equal_blocks_encrypt_equally() {
    let cipher = ToyCipher::new(4, 0x11);
    let ecb = Ecb::new(&cipher, &Pkcs7).unwrap();
    let ct = ecb.encrypt_to_vec(&[7u8; 8]).unwrap();
    assert_eq!(ct[..4], ct[4..8]);
}

#[test]
fn test_ecb_full_final_block_yields_two_blocks_in_one_element() {
    let cipher = ToyCipher::new(4, 0x01);
    let ecb = Ecb::new(&cipher, &Pkcs7).unwrap();
    let out: Vec<Vec<u8>> = ecb
        .encrypt(IterBlocks::new(vec![vec![1, 2, 3, 4]]))
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].len(), 8);
}

#[test]
fn test_ecb_padding_contract_violation() {
    let cipher = ToyCipher::new(4, 0x01);
    for bad_len in [0usize, 3, 12] {
        let padding = FixedLengthPadding(bad_len);
        let ecb = Ecb::new(&cipher, &padding).unwrap();
        let err = ecb.encrypt_to_vec(&[1, 2]).unwrap_err();
        assert_eq!(
            err,
            Error::PaddingScheme {
                context: "ECB encrypt",
                block_size: 4,
                actual: bad_len
            }
        );
        assert!(err.is_fatal());
    }
}

#[test]
fn test_ecb_rejects_unaligned_ciphertext() {
    let cipher = ToyCipher::new(4, 0x01);
    let ecb = Ecb::new(&cipher, &Pkcs7).unwrap();
    assert!(matches!(
        ecb.decrypt_to_vec(&[0u8; 6]),
        Err(Error::InvalidLength { .. })
    ));
}

#[test]
fn test_ecb_rejects_short_middle_chunk() {
    let cipher = ToyCipher::new(4, 0x01);
    let ecb = Ecb::new(&cipher, &Pkcs7).unwrap();
    let mut blocks = ecb.encrypt(IterBlocks::new(vec![vec![1, 2], vec![3, 4, 5, 6]]));
    assert!(matches!(blocks.next(), Some(Err(Error::InvalidLength { .. }))));
    assert!(blocks.next().is_none());
}
