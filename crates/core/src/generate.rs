//! Identifier generation
//!
//! - Version 4: 16 bytes from an [`EntropySource`], then the version and
//!   variant bits are forced.
//! - Version 5: SHA-1 over `namespace bytes || name bytes`, first 16 digest
//!   bytes, then the version and variant bits are forced.
//!
//! Entropy is an explicit handle owned by the [`Generator`]. The default
//! source is picked at build time: [`OsEntropy`] with the `os-entropy`
//! feature, [`SeededEntropy`] without it. Threads should each own a
//! generator; [`SharedEntropy`] exists for the cases where one source really
//! has to be shared.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::params::{UUID_SIZE, VARIANT_STANDARD, VERSION_NAME_SHA1, VERSION_RANDOM};
use crate::primitives::take;
use crate::sha1::Sha1;
use crate::uuid::Uuid;

/// Anything that can fill a buffer with unpredictable bytes
pub trait EntropySource {
    fn fill_random_bytes(&mut self, dest: &mut [u8]);
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn fill_random_bytes(&mut self, dest: &mut [u8]) {
        (**self).fill_random_bytes(dest);
    }
}

impl<E: EntropySource + ?Sized> EntropySource for Box<E> {
    fn fill_random_bytes(&mut self, dest: &mut [u8]) {
        (**self).fill_random_bytes(dest);
    }
}

/// Pseudo-random source seeded once, then deterministic
pub struct SeededEntropy {
    rng: StdRng,
}

/// Distinguishes seeds of instances created within the same clock tick
static SEED_SEQUENCE: AtomicU64 = AtomicU64::new(0);

impl SeededEntropy {
    /// Fixed seed; the output sequence is reproducible
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from the wall clock, the process id and a per-process sequence
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        let sequence = SEED_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let seed = nanos
            ^ (u64::from(std::process::id()) << 32)
            ^ sequence.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self::from_seed(seed)
    }
}

impl Default for SeededEntropy {
    fn default() -> Self {
        Self::from_clock()
    }
}

impl EntropySource for SeededEntropy {
    fn fill_random_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest);
    }
}

/// The operating system's random facility
///
/// If the OS refuses, the source logs a warning and switches to a
/// clock-seeded [`SeededEntropy`] for the rest of its life.
#[cfg(feature = "os-entropy")]
#[derive(Default)]
pub struct OsEntropy {
    fallback: Option<SeededEntropy>,
}

#[cfg(feature = "os-entropy")]
impl OsEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the OS facility failed and the seeded source took over
    pub fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }
}

#[cfg(feature = "os-entropy")]
impl EntropySource for OsEntropy {
    fn fill_random_bytes(&mut self, dest: &mut [u8]) {
        if let Some(fallback) = self.fallback.as_mut() {
            fallback.fill_random_bytes(dest);
            return;
        }

        let result = getrandom::getrandom(dest);
        self.fill_or_degrade(dest, result);
    }
}

#[cfg(feature = "os-entropy")]
impl OsEntropy {
    /// On an OS failure, refill `dest` from a seeded source and keep using it
    fn fill_or_degrade(&mut self, dest: &mut [u8], result: Result<(), getrandom::Error>) {
        if let Err(err) = result {
            tracing::warn!(error = %err, "OS entropy unavailable, using seeded generator");
            self.fallback
                .get_or_insert_with(SeededEntropy::from_clock)
                .fill_random_bytes(dest);
        }
    }
}

#[cfg(feature = "os-entropy")]
pub type DefaultEntropy = OsEntropy;

#[cfg(not(feature = "os-entropy"))]
pub type DefaultEntropy = SeededEntropy;

/// A source behind a mutex, cloneable across threads
pub struct SharedEntropy<E> {
    inner: Arc<Mutex<E>>,
}

impl<E: EntropySource> SharedEntropy<E> {
    pub fn new(source: E) -> Self {
        Self {
            inner: Arc::new(Mutex::new(source)),
        }
    }
}

impl<E> Clone for SharedEntropy<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: EntropySource> EntropySource for SharedEntropy<E> {
    fn fill_random_bytes(&mut self, dest: &mut [u8]) {
        // A panic mid-fill leaves no invariant to protect.
        let mut source = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        source.fill_random_bytes(dest);
    }
}

/// Version 4 identifier generator
///
/// Also an endless iterator: `generator.take(n)` yields `n` identifiers.
pub struct Generator<E = DefaultEntropy> {
    entropy: E,
}

impl Generator<DefaultEntropy> {
    pub fn new() -> Self {
        Self::with_entropy(DefaultEntropy::default())
    }
}

impl Default for Generator<DefaultEntropy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntropySource> Generator<E> {
    pub fn with_entropy(entropy: E) -> Self {
        tracing::debug!(source = core::any::type_name::<E>(), "identifier generator ready");
        Self { entropy }
    }

    /// A fresh random (version 4, standard variant) identifier
    pub fn generate(&mut self) -> Uuid {
        let mut bytes = [0u8; UUID_SIZE];
        self.entropy.fill_random_bytes(&mut bytes);
        Uuid::from_bytes(bytes).stamp(VERSION_RANDOM, VARIANT_STANDARD)
    }

    pub fn entropy(&self) -> &E {
        &self.entropy
    }

    pub fn into_entropy(self) -> E {
        self.entropy
    }
}

impl<E: EntropySource> Iterator for Generator<E> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Uuid> {
        Some(self.generate())
    }
}

/// Name-based (version 5, SHA-1) identifier
///
/// A pure function of its inputs: the same namespace and name give the same
/// identifier on every platform. Only the first 16 of the 20 digest bytes
/// are used.
pub fn generate_named(namespace: &Uuid, name: &[u8]) -> Uuid {
    let mut hasher = Sha1::new();
    hasher.update(namespace.as_bytes()).update(name);
    let digest = hasher.finish();
    Uuid::from_bytes(take::<UUID_SIZE>(digest.as_bytes(), 0))
        .stamp(VERSION_NAME_SHA1, VARIANT_STANDARD)
}

impl Uuid {
    /// Random identifier from a one-off default generator
    pub fn new_v4() -> Self {
        Generator::new().generate()
    }

    pub fn new_v5(namespace: &Uuid, name: impl AsRef<[u8]>) -> Self {
        generate_named(namespace, name.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always yields the same byte
    struct Constant(u8);

    impl EntropySource for Constant {
        fn fill_random_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(self.0);
        }
    }

    #[test]
    fn test_generate_forces_version_and_variant() {
        let mut generator = Generator::with_entropy(Constant(0xFF));
        let id = generator.generate();
        assert_eq!(id.to_string(), "FFFFFFFF-FFFF-4FFF-BFFF-FFFFFFFFFFFF");

        let mut generator = Generator::with_entropy(Constant(0x00));
        let id = generator.generate();
        assert_eq!(id.to_string(), "00000000-0000-4000-8000-000000000000");
    }

    #[test]
    fn test_seeded_entropy_is_reproducible() {
        let a: Vec<Uuid> = Generator::with_entropy(SeededEntropy::from_seed(7)).take(4).collect();
        let b: Vec<Uuid> = Generator::with_entropy(SeededEntropy::from_seed(7)).take(4).collect();
        let c: Vec<Uuid> = Generator::with_entropy(SeededEntropy::from_seed(8)).take(4).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_borrowed_source() {
        let mut source = SeededEntropy::from_seed(1);
        let first = Generator::with_entropy(&mut source).generate();
        let second = Generator::with_entropy(&mut source).generate();
        assert_ne!(first, second);
    }

    #[cfg(feature = "os-entropy")]
    #[test]
    fn test_os_entropy_not_degraded() {
        let mut source = OsEntropy::new();
        let mut buf = [0u8; 32];
        source.fill_random_bytes(&mut buf);
        assert!(!source.is_degraded());
        assert_ne!(buf, [0u8; 32]);
    }

    #[cfg(feature = "os-entropy")]
    #[test]
    fn test_os_entropy_degrades_to_seeded_source() {
        let mut source = OsEntropy::new();
        let mut buf = [0u8; 32];
        source.fill_or_degrade(&mut buf, Err(getrandom::Error::UNSUPPORTED));

        assert!(source.is_degraded());
        assert!(buf.iter().any(|&b| b != buf[0]));

        // Later requests come from the fallback without consulting the OS again
        let mut next = [0u8; 32];
        source.fill_random_bytes(&mut next);
        assert!(source.is_degraded());
        assert_ne!(next, buf);

        let mut generator = Generator::with_entropy(source);
        let id = generator.generate();
        assert_eq!(id.version(), crate::Version::Random);
        assert!(generator.entropy().is_degraded());
    }
}
