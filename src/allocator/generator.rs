//! Short key generators
//!
//! A generator turns a length into a candidate key. The allocator only ever
//! sees the [`KeyGenerator`] trait, so tests can swap the random default for
//! a fixed sequence.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// 52 个大小写拉丁字母
pub const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// 6 bits per alphabet index
const LETTER_IDX_BITS: u32 = 6;
const LETTER_IDX_MASK: u64 = (1 << LETTER_IDX_BITS) - 1;
/// 一次 64 位随机数可以提供的索引个数
const LETTER_IDX_MAX: u32 = u64::BITS / LETTER_IDX_BITS;

/// Produces candidate keys of a requested length.
pub trait KeyGenerator: Send + Sync {
    fn generate(&self, n: usize) -> String;
}

impl<F> KeyGenerator for F
where
    F: Fn(usize) -> String + Send + Sync,
{
    fn generate(&self, n: usize) -> String {
        self(n)
    }
}

/// Uniform random keys over [`ALPHABET`].
///
/// The RNG is seeded once from the wall clock and shared behind a mutex, so
/// two callers in the same nanosecond still get different keys.
pub struct RandomGenerator {
    rng: Mutex<StdRng>,
}

impl RandomGenerator {
    pub fn new() -> Self {
        let seed = Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_else(|| Utc::now().timestamp_micros());
        Self::with_seed(seed as u64)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyGenerator for RandomGenerator {
    fn generate(&self, n: usize) -> String {
        let mut key = String::with_capacity(n);
        if n == 0 {
            return key;
        }

        let mut rng = self.rng.lock();
        let mut cache = rng.next_u64();
        let mut remain = LETTER_IDX_MAX;

        while key.len() < n {
            if remain == 0 {
                cache = rng.next_u64();
                remain = LETTER_IDX_MAX;
            }
            // 索引 >= 52 时丢弃，保持均匀分布
            let idx = (cache & LETTER_IDX_MASK) as usize;
            if idx < ALPHABET.len() {
                key.push(ALPHABET[idx] as char);
            }
            cache >>= LETTER_IDX_BITS;
            remain -= 1;
        }

        key
    }
}

/// Replays a fixed list of keys in order, wrapping around at the end.
///
/// The requested length is ignored; whatever was queued is returned as is.
pub struct SequenceGenerator {
    keys: Vec<String>,
    next: AtomicUsize,
}

impl SequenceGenerator {
    /// # Panics
    /// If `keys` is empty.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        assert!(!keys.is_empty(), "SequenceGenerator needs at least one key");
        Self {
            keys,
            next: AtomicUsize::new(0),
        }
    }

    /// Number of keys handed out so far.
    pub fn calls(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl KeyGenerator for SequenceGenerator {
    fn generate(&self, _n: usize) -> String {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.keys[i % self.keys.len()].clone()
    }
}
