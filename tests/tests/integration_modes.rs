//! End-to-end behaviour of the modes through the public API

use std::io::{self, Cursor, Read};

use gfmodes_algorithms::block::modes::{Gcm, ModeOfOperation, Verification};
use gfmodes_algorithms::field::GaloisField;
use gfmodes_algorithms::sequence::ReaderBlocks;
use gfmodes_algorithms::types::Nonce;
use gfmodes_api::Error;
use gfmodes_tests::{seeded_rng, unhex, IdentityCipher, Pkcs7, RotateCipher};

// With the identity cipher each mode's output is easy to derive by hand.

#[test]
fn identity_ecb_fixture() {
    let cipher = IdentityCipher { block_size: 4 };
    let mode = ModeOfOperation::Ecb { padding: &Pkcs7 };
    let ct = mode.encrypt_to_vec(&cipher, &unhex("ff")).unwrap();
    assert_eq!(hex::encode(&ct), "ff030303");
}

#[test]
fn identity_cbc_fixture() {
    let cipher = IdentityCipher { block_size: 4 };
    let iv = unhex("01020304");
    let mode = ModeOfOperation::Cbc {
        iv: &iv,
        padding: &Pkcs7,
    };
    let ct = mode.encrypt_to_vec(&cipher, &unhex("0a0b0c")).unwrap();
    assert_eq!(hex::encode(&ct), "010203040b090f05");
}

#[test]
fn identity_ctr_fixture() {
    let cipher = IdentityCipher { block_size: 4 };
    let nonce = unhex("aabb");
    let mode = ModeOfOperation::Ctr { nonce: &nonce };
    let ct = mode.encrypt_to_vec(&cipher, &[0u8; 10]).unwrap();
    assert_eq!(hex::encode(&ct), "aabb0000aabb0001aabb");
}

#[test]
fn identity_gcm_fixture() {
    // E(0) = 0 makes the hash key zero, so the tag collapses to EK_nonce
    let cipher = IdentityCipher { block_size: 8 };
    let nonce = unhex("01020304");
    let mode = ModeOfOperation::Gcm {
        nonce: &nonce,
        header: b"",
    };
    let framed = mode.encrypt_to_vec(&cipher, &[0u8; 8]).unwrap();
    assert_eq!(
        hex::encode(&framed),
        "0000000000000000\
         0102030400000001\
         0102030400000000"
    );
}

#[test]
fn gf8_fixtures() {
    let field = GaloisField::standard(8).unwrap();
    for (a, b, product) in [("57", "83", "c1"), ("57", "13", "fe"), ("02", "03", "06")] {
        let a = field.from_be_bytes(&unhex(a)).unwrap();
        let b = field.from_be_bytes(&unhex(b)).unwrap();
        assert_eq!(hex::encode(a.mult(&b).unwrap().to_be_bytes()), product);
    }
}

#[test]
fn random_nonces_drive_every_mode() {
    let cipher = RotateCipher::seeded(16, 99);
    let mut rng = seeded_rng(2024);
    let iv = Nonce::random(&mut rng, 16);
    let nonce = Nonce::for_counter_mode(&mut rng, 16);
    assert_eq!(nonce.len(), 8);

    let modes = [
        ModeOfOperation::Cbc {
            iv: &iv,
            padding: &Pkcs7,
        },
        ModeOfOperation::Ctr { nonce: &nonce },
        ModeOfOperation::Gcm {
            nonce: &nonce,
            header: b"integration",
        },
    ];
    let message = b"sixteen byte msg and then thirty-two more bytes ...";
    let aligned = &message[..48];
    for mode in modes {
        let input: &[u8] = if mode.is_authenticated() { aligned } else { message };
        let ct = mode.encrypt_to_vec(&cipher, input).unwrap();
        let source = ReaderBlocks::new(Cursor::new(ct), 16).unwrap();
        let pt = mode.decrypt_source(&cipher, source).unwrap();
        assert_eq!(pt.into_verified().unwrap(), input, "{}", mode.name());
    }
}

#[test]
fn tampered_gcm_stream_is_reported_not_raised() {
    let cipher = RotateCipher::seeded(16, 5);
    let gcm = Gcm::new(&cipher, &[9u8; 8], b"hdr").unwrap();
    let mut framed = gcm.encrypt_to_vec(&[0x11; 32]).unwrap();
    framed[20] ^= 0x04;

    let decrypted = gcm.decrypt_to_vec(&framed).unwrap();
    assert_eq!(decrypted.verification(), Verification::Failed);
    assert!(matches!(
        decrypted.clone().into_verified(),
        Err(Error::AuthenticationFailed { .. })
    ));
    let (plaintext, _) = decrypted.into_unverified_parts();
    assert_eq!(plaintext.len(), 32);
}

/// Reader that fails after yielding a fixed prefix
struct FailingReader {
    inner: Cursor<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away")),
            n => Ok(n),
        }
    }
}

#[test]
fn reader_failure_surfaces_as_stream_error() {
    let cipher = RotateCipher::seeded(8, 1);
    let mode = ModeOfOperation::Ecb { padding: &Pkcs7 };
    let ct = mode.encrypt_to_vec(&cipher, &[3u8; 20]).unwrap();
    let reader = FailingReader {
        inner: Cursor::new(ct[..16].to_vec()),
    };
    let result = mode.decrypt_source(&cipher, ReaderBlocks::new(reader, 8).unwrap());
    assert!(matches!(result, Err(Error::Stream { .. })));
}
