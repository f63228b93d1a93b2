//! XXH32 for frame checksums.
//!
//! The frame format uses XXH32 twice: one byte of the digest guards the
//! frame descriptor and the full digest guards the uncompressed content
//! stream. Implemented here directly; only the 32-bit variant is needed.

const PRIME_1: u32 = 0x9E3779B1;
const PRIME_2: u32 = 0x85EBCA77;
const PRIME_3: u32 = 0xC2B2AE3D;
const PRIME_4: u32 = 0x27D4EB2F;
const PRIME_5: u32 = 0x165667B1;

#[inline]
fn round(acc: u32, input: u32) -> u32 {
    acc.wrapping_add(input.wrapping_mul(PRIME_2))
        .rotate_left(13)
        .wrapping_mul(PRIME_1)
}

#[inline]
fn word(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Incremental XXH32 hasher.
///
/// Feed data with [`update`](Self::update) in any chunking; the result
/// of [`digest`](Self::digest) only depends on the concatenated input.
#[derive(Clone)]
pub struct Xxh32 {
    seed: u32,
    lanes: [u32; 4],
    buf: [u8; 16],
    buf_len: usize,
    total_len: u64,
}

impl Xxh32 {
    /// Create a hasher with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            lanes: [
                seed.wrapping_add(PRIME_1).wrapping_add(PRIME_2),
                seed.wrapping_add(PRIME_2),
                seed,
                seed.wrapping_sub(PRIME_1),
            ],
            buf: [0; 16],
            buf_len: 0,
            total_len: 0,
        }
    }

    /// Absorb `data` into the hash state.
    pub fn update(&mut self, mut data: &[u8]) {
        self.total_len += data.len() as u64;

        // Top up a partially filled stripe first.
        if self.buf_len > 0 {
            let take = (16 - self.buf_len).min(data.len());
            self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
            self.buf_len += take;
            data = &data[take..];
            if self.buf_len == 16 {
                let stripe = self.buf;
                self.consume_stripe(&stripe);
                self.buf_len = 0;
            }
        }

        let mut stripes = data.chunks_exact(16);
        for stripe in &mut stripes {
            self.consume_stripe(stripe);
        }

        let rest = stripes.remainder();
        self.buf[..rest.len()].copy_from_slice(rest);
        self.buf_len = rest.len();
    }

    fn consume_stripe(&mut self, stripe: &[u8]) {
        for (lane, chunk) in self.lanes.iter_mut().zip(stripe.chunks_exact(4)) {
            *lane = round(*lane, word(chunk));
        }
    }

    /// Finalize and return the 32-bit digest. The state is not consumed;
    /// further `update` calls continue the stream.
    pub fn digest(&self) -> u32 {
        let mut acc = if self.total_len >= 16 {
            self.lanes[0]
                .rotate_left(1)
                .wrapping_add(self.lanes[1].rotate_left(7))
                .wrapping_add(self.lanes[2].rotate_left(12))
                .wrapping_add(self.lanes[3].rotate_left(18))
        } else {
            self.seed.wrapping_add(PRIME_5)
        };

        acc = acc.wrapping_add(self.total_len as u32);

        let tail = &self.buf[..self.buf_len];
        let mut words = tail.chunks_exact(4);
        for chunk in &mut words {
            acc = acc.wrapping_add(word(chunk).wrapping_mul(PRIME_3));
            acc = acc.rotate_left(17).wrapping_mul(PRIME_4);
        }
        for &byte in words.remainder() {
            acc = acc.wrapping_add(u32::from(byte).wrapping_mul(PRIME_5));
            acc = acc.rotate_left(11).wrapping_mul(PRIME_1);
        }

        // avalanche
        acc ^= acc >> 15;
        acc = acc.wrapping_mul(PRIME_2);
        acc ^= acc >> 13;
        acc = acc.wrapping_mul(PRIME_3);
        acc ^= acc >> 16;
        acc
    }
}

/// One-shot XXH32 of `data` with the given seed.
#[inline]
pub fn xxh32(data: &[u8], seed: u32) -> u32 {
    let mut hasher = Xxh32::new(seed);
    hasher.update(data);
    hasher.digest()
}
