//! Blowfish engine backed by the RustCrypto `blowfish` crate

use blowfish::cipher::generic_array::GenericArray;
use blowfish::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use blowfish::Blowfish;
use tracing::debug;

use crate::cipher::{BlockCipherEngine, KeySchedule};
use crate::error::{CbcError, Result};
use crate::utils;

/// Shortest key the engine accepts
pub const MIN_KEY_LEN: usize = 1;
/// Longest key the Blowfish key schedule accepts
pub const MAX_KEY_LEN: usize = 56;

// `blowfish::Blowfish` refuses keys below this length.
const SCHEDULE_MIN_KEY_LEN: usize = 4;

/// Expanded Blowfish P-array and S-boxes for one key
pub struct BlowfishSchedule {
    inner: Blowfish,
}

impl BlowfishSchedule {
    fn new(key: &[u8]) -> Result<Self> {
        if !(MIN_KEY_LEN..=MAX_KEY_LEN).contains(&key.len()) {
            return Err(CbcError::InvalidKeyLength(key.len()));
        }

        let inner: Blowfish = Blowfish::new_from_slice(&stretch_key(key))
            .map_err(|_| CbcError::InvalidKeyLength(key.len()))?;
        Ok(Self { inner })
    }
}

/// Repeat a short key a whole number of times until it reaches
/// `SCHEDULE_MIN_KEY_LEN`.
///
/// The key schedule cycles through the key bytes, so `k` and `k || k`
/// expand to the same P-array and S-boxes.
fn stretch_key(key: &[u8]) -> Vec<u8> {
    let repeats = SCHEDULE_MIN_KEY_LEN.div_ceil(key.len());
    key.repeat(repeats)
}

impl KeySchedule for BlowfishSchedule {
    fn encipher_block(&self, left: u32, right: u32) -> (u32, u32) {
        let mut block = GenericArray::clone_from_slice(&utils::pack_words(left, right));
        self.inner.encrypt_block(&mut block);
        unpack(&block)
    }

    fn decipher_block(&self, left: u32, right: u32) -> (u32, u32) {
        let mut block = GenericArray::clone_from_slice(&utils::pack_words(left, right));
        self.inner.decrypt_block(&mut block);
        unpack(&block)
    }
}

// `Blowfish<BE>` reads and writes its words big-endian, so the byte round
// trip is exact.
fn unpack(block: &[u8]) -> (u32, u32) {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(block);
    utils::unpack_words(&bytes)
}

/// Blowfish block cipher engine
///
/// Starts without a key; [`BlowfishEngine::set_key`] builds the schedule.
///
/// # Example
///
/// ```rust
/// use blowfish_cbc::{BlockCipherEngine, BlowfishEngine};
///
/// let mut engine = BlowfishEngine::new();
/// assert!(!engine.is_initialized());
///
/// engine.set_key(b"My secret key")?;
/// assert!(engine.is_initialized());
/// # Ok::<(), blowfish_cbc::CbcError>(())
/// ```
#[derive(Default)]
pub struct BlowfishEngine {
    schedule: Option<BlowfishSchedule>,
}

impl BlowfishEngine {
    /// Create an engine with no key schedule
    pub fn new() -> Self {
        Self { schedule: None }
    }

    /// Create an engine and initialize it with `key`
    pub fn with_key(key: &[u8]) -> Result<Self> {
        let mut engine = Self::new();
        engine.set_key(key)?;
        Ok(engine)
    }

    /// Replace the key schedule with one derived from `key`
    ///
    /// On error the previous schedule, if any, is kept.
    pub fn set_key(&mut self, key: &[u8]) -> Result<()> {
        let schedule = BlowfishSchedule::new(key)?;
        debug!(key_len = key.len(), "blowfish key schedule initialized");
        self.schedule = Some(schedule);
        Ok(())
    }
}

impl BlockCipherEngine for BlowfishEngine {
    type Schedule = BlowfishSchedule;

    fn key_schedule(&self) -> Option<&BlowfishSchedule> {
        self.schedule.as_ref()
    }
}

impl std::fmt::Debug for BlowfishEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlowfishEngine")
            .field("initialized", &self.schedule.is_some())
            .finish()
    }
}
