//! Byte-wise XOR shared by every chaining mode

/// XOR `src` into `dst`, element by element, over the shorter of the two
pub fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}
