//! Block cipher engine contract

/// Round state produced once by key initialization.
///
/// Implementations must not hold hidden mutable state: both transforms take
/// `&self` and are safe to call from several threads at once.
pub trait KeySchedule {
    /// Applies the forward transformation to one 64-bit block
    fn encipher_block(&self, left: u32, right: u32) -> (u32, u32);

    /// Applies the inverse transformation to one 64-bit block
    fn decipher_block(&self, left: u32, right: u32) -> (u32, u32);
}

/// Trait for a 64-bit block cipher engine that CBC mode drives
pub trait BlockCipherEngine {
    type Schedule: KeySchedule;

    /// Returns the key schedule, or `None` when no key has been set
    fn key_schedule(&self) -> Option<&Self::Schedule>;

    /// Whether a key schedule is present
    fn is_initialized(&self) -> bool {
        self.key_schedule().is_some()
    }
}
