// Cipher Container
// JSON record holding one encrypted file: sizing metadata plus hex blocks

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::{CipherError, Result};

/// One encrypted file. `blocks` is ordered: each entry corresponds
/// positionally to one plaintext chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CipherContainer {
    /// Decimal digit count the key was requested at.
    pub requested_digits: u32,
    /// Actual bit length of the modulus used.
    pub modulus_bit_length: u64,
    /// Plaintext chunk width the file was split at.
    pub max_bytes_per_block: usize,
    /// Hex-encoded cipher block values.
    pub blocks: Vec<String>,
}

impl CipherContainer {
    pub fn from_blocks(
        requested_digits: u32,
        modulus_bit_length: u64,
        max_bytes_per_block: usize,
        cipher_blocks: &[BigUint],
    ) -> Self {
        Self {
            requested_digits,
            modulus_bit_length,
            max_bytes_per_block,
            blocks: cipher_blocks.iter().map(biguint_to_hex).collect(),
        }
    }

    /// Decode the stored hex strings back into block values, in order.
    pub fn cipher_blocks(&self) -> Result<Vec<BigUint>> {
        self.blocks.iter().map(|s| hex_to_biguint(s)).collect()
    }
}

fn biguint_to_hex(value: &BigUint) -> String {
    hex::encode(value.to_bytes_be())
}

fn hex_to_biguint(text: &str) -> Result<BigUint> {
    // tolerate odd-length hex such as "f3"
    let bytes = if text.len() % 2 == 1 {
        hex::decode(format!("0{text}"))
    } else {
        hex::decode(text)
    };
    match bytes {
        Ok(bytes) => Ok(BigUint::from_bytes_be(&bytes)),
        Err(_) => Err(CipherError::MalformedNumber(text.to_string())),
    }
}
