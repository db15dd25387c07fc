//! Cipher modes implementation

pub mod cbc;

pub use cbc::{CbcCipher, Iv};
