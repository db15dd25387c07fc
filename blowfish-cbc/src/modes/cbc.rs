//! CBC (Cipher Block Chaining) mode implementation

use std::fmt;

use rand::Rng;
use tracing::{debug, trace, warn};

use crate::cipher::{BlockCipherEngine, KeySchedule};
use crate::error::{CbcError, Result};
use crate::{utils, BLOCK_SIZE};

/// 8-byte initialization vector
///
/// Built only from exactly [`BLOCK_SIZE`] bytes; other lengths are rejected
/// rather than truncated or padded.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Iv([u8; BLOCK_SIZE]);

impl Iv {
    pub const fn new(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Draw a fresh IV from the thread-local RNG
    pub fn random() -> Self {
        let mut bytes = [0u8; BLOCK_SIZE];
        rand::thread_rng().fill(&mut bytes[..]);
        Self(bytes)
    }

    /// Parse an IV from hex text, e.g. `"fedcba9876543210"`
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = utils::decode_hex(text)?;
        Self::try_from(bytes.as_slice())
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }
}

impl From<[u8; BLOCK_SIZE]> for Iv {
    fn from(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Iv {
    type Error = CbcError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != BLOCK_SIZE {
            return Err(CbcError::InvalidIvLength(bytes.len()));
        }
        Ok(Self(utils::to_block(bytes)))
    }
}

impl fmt::Display for Iv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Iv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iv({self})")
    }
}

/// CBC mode over a borrowed 64-bit block cipher engine
///
/// Each call to [`encrypt`](Self::encrypt) or [`decrypt`](Self::decrypt)
/// starts a fresh chain from the IV; nothing carries over between calls.
/// Zero bytes pad the input up to a whole number of blocks and are never
/// stripped again, so decrypting yields the padded length.
///
/// # Example
///
/// ```rust
/// use blowfish_cbc::{BlowfishEngine, CbcCipher, Iv};
///
/// let engine = BlowfishEngine::with_key(b"My secret key")?;
/// let cipher = CbcCipher::new(&engine, Iv::new(*b"init vec"));
///
/// let encrypted = cipher.encrypt(b"this is some example plain text")?;
/// assert_eq!(encrypted.len(), 32);
///
/// let decrypted = cipher.decrypt(&encrypted)?;
/// assert_eq!(&decrypted[..31], b"this is some example plain text");
/// assert_eq!(decrypted[31], 0);
/// # Ok::<(), blowfish_cbc::CbcError>(())
/// ```
pub struct CbcCipher<'a, E: BlockCipherEngine> {
    engine: &'a E,
    iv: Iv,
}

impl<'a, E: BlockCipherEngine> CbcCipher<'a, E> {
    pub fn new(engine: &'a E, iv: Iv) -> Self {
        Self { engine, iv }
    }

    pub fn iv(&self) -> &Iv {
        &self.iv
    }

    fn schedule(&self) -> Result<&'a E::Schedule> {
        self.engine.key_schedule().ok_or(CbcError::UninitializedKey)
    }

    /// CBC mode encryption
    ///
    /// C_0 = E(P_0 ⊕ IV), C_i = E(P_i ⊕ C_{i-1})
    pub fn encrypt(&self, plain_text: &[u8]) -> Result<Vec<u8>> {
        let schedule = self.schedule()?;

        let padded = utils::add_padding(plain_text);
        let mut cipher_text = Vec::with_capacity(padded.len());
        let mut previous = *self.iv.as_bytes();

        for (index, chunk) in padded.chunks_exact(BLOCK_SIZE).enumerate() {
            let (left, right) =
                utils::unpack_words(&utils::xor_blocks(&utils::to_block(chunk), &previous));
            let (left, right) = schedule.encipher_block(left, right);

            previous = utils::pack_words(left, right);
            cipher_text.extend_from_slice(&previous);
            trace!(block = index, "cbc: block enciphered");
        }

        debug!(
            input = plain_text.len(),
            output = cipher_text.len(),
            padding = padded.len() - plain_text.len(),
            "cbc: encrypted"
        );
        Ok(cipher_text)
    }

    /// CBC mode decryption
    ///
    /// P_0 = D(C_0) ⊕ IV, P_i = D(C_i) ⊕ C_{i-1}
    ///
    /// Input that is not block aligned is zero padded first, the same way
    /// [`encrypt`](Self::encrypt) pads plaintext.
    pub fn decrypt(&self, cipher_text: &[u8]) -> Result<Vec<u8>> {
        let schedule = self.schedule()?;

        if cipher_text.len() % BLOCK_SIZE != 0 {
            warn!(
                len = cipher_text.len(),
                "cbc: ciphertext is not block aligned, zero padding it"
            );
        }

        let padded = utils::add_padding(cipher_text);
        let mut plain_text = Vec::with_capacity(padded.len());
        let mut previous = *self.iv.as_bytes();

        for (index, chunk) in padded.chunks_exact(BLOCK_SIZE).enumerate() {
            let block = utils::to_block(chunk);
            let (left, right) = utils::unpack_words(&block);
            let (left, right) = schedule.decipher_block(left, right);

            plain_text.extend_from_slice(&utils::xor_blocks(
                &utils::pack_words(left, right),
                &previous,
            ));
            previous = block;
            trace!(block = index, "cbc: block deciphered");
        }

        debug!(
            input = cipher_text.len(),
            output = plain_text.len(),
            "cbc: decrypted"
        );
        Ok(plain_text)
    }

    /// Encrypt hex-encoded plaintext, whitespace between digits ignored
    pub fn encrypt_hex(&self, plain_text: &str) -> Result<Vec<u8>> {
        let bytes = utils::decode_hex(plain_text)?;
        self.encrypt(&bytes)
    }

    /// Decrypt hex-encoded ciphertext, whitespace between digits ignored
    pub fn decrypt_hex(&self, cipher_text: &str) -> Result<Vec<u8>> {
        let bytes = utils::decode_hex(cipher_text)?;
        self.decrypt(&bytes)
    }
}

impl<E: BlockCipherEngine> Clone for CbcCipher<'_, E> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine,
            iv: self.iv,
        }
    }
}

impl<E: BlockCipherEngine> fmt::Debug for CbcCipher<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CbcCipher")
            .field("iv", &self.iv)
            .field("initialized", &self.engine.is_initialized())
            .finish()
    }
}
