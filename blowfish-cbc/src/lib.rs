//! # Blowfish-CBC Library
//!
//! Cipher Block Chaining (CBC) mode over a 64-bit block cipher engine.
//!
//! The mode layer owns zero padding, the initialization vector and the
//! chaining between blocks. The block transformation itself comes from an
//! engine implementing [`BlockCipherEngine`]; [`BlowfishEngine`] wraps the
//! RustCrypto `blowfish` crate.
//!
//! ## Usage
//!
//! ```rust
//! use blowfish_cbc::{BlowfishEngine, CbcCipher, Iv};
//!
//! let engine = BlowfishEngine::with_key(b"My secret key")?;
//! let cipher = CbcCipher::new(&engine, Iv::new([0u8; 8]));
//!
//! let encrypted = cipher.encrypt(b"12345678")?;
//! let decrypted = cipher.decrypt(&encrypted)?;
//! assert_eq!(decrypted, b"12345678");
//! # Ok::<(), blowfish_cbc::CbcError>(())
//! ```
//!
//! Padding is never removed: decrypting a message whose length was not a
//! multiple of 8 returns it followed by the zero bytes added on encryption.

pub mod cipher;
pub mod engine;
pub mod error;
pub mod modes;
pub mod utils;

pub use cipher::{BlockCipherEngine, KeySchedule};
pub use engine::BlowfishEngine;
pub use error::{CbcError, Result};
pub use modes::{CbcCipher, Iv};

/// Block size in bytes shared by every engine this crate drives
pub const BLOCK_SIZE: usize = 8;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dummy engine implementation for testing and demonstration
///
/// XORs each word with a word derived from the key. It should **never** be
/// used in production; it exists to exercise the chaining logic without a
/// real cipher.
///
/// # Example
///
/// ```rust
/// use blowfish_cbc::{BlockCipherEngine, CbcCipher, DummyEngine, Iv};
///
/// let engine = DummyEngine::with_key(b"testkey1")?;
/// assert!(engine.is_initialized());
///
/// let cipher = CbcCipher::new(&engine, Iv::new(*b"initialv"));
/// let encrypted = cipher.encrypt(b"hello123")?;
/// assert_eq!(cipher.decrypt(&encrypted)?, b"hello123");
/// # Ok::<(), blowfish_cbc::CbcError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DummyEngine {
    schedule: Option<DummySchedule>,
}

/// Key words of a [`DummyEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DummySchedule {
    left: u32,
    right: u32,
}

impl DummyEngine {
    /// Create a dummy engine with no key
    pub fn new() -> Self {
        Self { schedule: None }
    }

    /// Create a dummy engine keyed by `key`, repeated to fill one block
    pub fn with_key(key: &[u8]) -> Result<Self> {
        if key.is_empty() {
            return Err(CbcError::InvalidKeyLength(0));
        }

        let mut block = [0u8; BLOCK_SIZE];
        for (b, k) in block.iter_mut().zip(key.iter().cycle()) {
            *b = *k;
        }
        let (left, right) = utils::unpack_words(&block);

        Ok(Self {
            schedule: Some(DummySchedule { left, right }),
        })
    }
}

impl KeySchedule for DummySchedule {
    fn encipher_block(&self, left: u32, right: u32) -> (u32, u32) {
        (left ^ self.left, right ^ self.right)
    }

    /// XOR is its own inverse
    fn decipher_block(&self, left: u32, right: u32) -> (u32, u32) {
        self.encipher_block(left, right)
    }
}

impl BlockCipherEngine for DummyEngine {
    type Schedule = DummySchedule;

    fn key_schedule(&self) -> Option<&DummySchedule> {
        self.schedule.as_ref()
    }
}
