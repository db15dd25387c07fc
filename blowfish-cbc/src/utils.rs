//! Utility functions for block handling

use crate::error::{CbcError, Result};
use crate::BLOCK_SIZE;

/// Add null padding to data
pub fn add_padding(data: &[u8]) -> Vec<u8> {
    let mut padded = data.to_vec();
    let remainder = data.len() % BLOCK_SIZE;

    if remainder != 0 {
        padded.resize(data.len() + BLOCK_SIZE - remainder, 0);
    }

    padded
}

/// XOR two blocks byte by byte
pub fn xor_blocks(a: &[u8; BLOCK_SIZE], b: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    let mut out = [0u8; BLOCK_SIZE];
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
        *o = x ^ y;
    }
    out
}

/// Copy an exactly block-sized slice into an array
pub fn to_block(chunk: &[u8]) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(chunk);
    block
}

/// Split a block into its big-endian left and right words
pub fn unpack_words(block: &[u8; BLOCK_SIZE]) -> (u32, u32) {
    let left = u32::from_be_bytes([block[0], block[1], block[2], block[3]]);
    let right = u32::from_be_bytes([block[4], block[5], block[6], block[7]]);
    (left, right)
}

/// Join two words back into a big-endian block
pub fn pack_words(left: u32, right: u32) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    block[..4].copy_from_slice(&left.to_be_bytes());
    block[4..].copy_from_slice(&right.to_be_bytes());
    block
}

/// Decode hex text into bytes, ignoring whitespace between digits
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&digits).map_err(|e| CbcError::InvalidInputType(e.to_string()))
}
