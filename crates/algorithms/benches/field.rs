//! Benchmarks for GF(2^n) arithmetic and the authenticated mode
//!
//! Field multiplication is measured for every width with a designated
//! polynomial; GCM throughput uses a trivial keyed permutation so that the
//! numbers reflect the mode and the field engine, not a real cipher.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gfmodes_algorithms::block::{BlockCipher, Gcm};
use gfmodes_algorithms::field::GaloisField;
use gfmodes_algorithms::Result;
use gfmodes_params::field::SUPPORTED_FIELD_WIDTHS;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// XOR-with-key permutation standing in for a real cipher
struct XorCipher {
    key: Vec<u8>,
}

impl BlockCipher for XorCipher {
    fn block_size(&self) -> usize {
        self.key.len()
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        block.iter_mut().zip(&self.key).for_each(|(b, k)| *b ^= k);
        Ok(())
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        self.encrypt_block(block)
    }
}

/// Benchmark field multiplication per width
fn bench_field_mult(c: &mut Criterion) {
    let mut group = c.benchmark_group("gf_mult");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for width in SUPPORTED_FIELD_WIDTHS {
        let field = GaloisField::standard(width).unwrap();
        let mut a = vec![0u8; field.byte_len()];
        let mut b = vec![0u8; field.byte_len()];
        rng.fill_bytes(&mut a);
        rng.fill_bytes(&mut b);
        let a = field.from_be_bytes(&a).unwrap();
        let b = field.from_be_bytes(&b).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |bench, _| {
            bench.iter(|| black_box(a.mult(black_box(&b)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark authenticated encryption over 16-byte blocks
fn bench_gcm_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("gcm_encrypt");
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let mut key = vec![0u8; 16];
    rng.fill_bytes(&mut key);
    let cipher = XorCipher { key };
    let gcm = Gcm::new(&cipher, &[0x42; 8], b"bench").unwrap();

    for &blocks in &[1usize, 16, 64] {
        let mut plaintext = vec![0u8; blocks * 16];
        rng.fill_bytes(&mut plaintext);
        group.throughput(Throughput::Bytes(plaintext.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &plaintext, |bench, pt| {
            bench.iter(|| black_box(gcm.encrypt_to_vec(black_box(pt)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_field_mult, bench_gcm_encrypt);
criterion_main!(benches);
