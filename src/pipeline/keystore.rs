// Key Store
// Public/private key artifacts as independent decimal-string JSON records

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::config::CipherConfig;
use crate::error::{CipherError, Result};
use crate::rsa::keygen::{KeyPair, PrivateKey, PublicKey};
use crate::util::file_ops;

/// On-disk form of the public key: { n, e } as decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyRecord {
    pub n: String,
    pub e: String,
}

/// On-disk form of the private key: { n, d } as decimal strings.
/// Shares nothing with the public artifact beyond the modulus value itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateKeyRecord {
    pub n: String,
    pub d: String,
}

/// Persist both halves of a key pair, replacing any previous artifacts.
/// No archival and no locking: the last writer wins.
pub fn save_key_pair(config: &CipherConfig, keys: &KeyPair) -> Result<()> {
    let public = PublicKeyRecord {
        n: keys.n.to_string(),
        e: keys.e.to_string(),
    };
    file_ops::write_json(&config.public_key_path, &public)?;

    let private = PrivateKeyRecord {
        n: keys.n.to_string(),
        d: keys.d.to_string(),
    };
    file_ops::write_json(&config.private_key_path, &private)
}

pub fn load_public_key(config: &CipherConfig) -> Result<PublicKey> {
    if !config.public_key_path.exists() {
        return Err(CipherError::KeyMissing(config.public_key_path.clone()));
    }
    let record: PublicKeyRecord = file_ops::read_json(&config.public_key_path)?;
    Ok(PublicKey {
        n: parse_decimal(&record.n)?,
        e: parse_decimal(&record.e)?,
    })
}

pub fn load_private_key(config: &CipherConfig) -> Result<PrivateKey> {
    if !config.private_key_path.exists() {
        return Err(CipherError::KeyMissing(config.private_key_path.clone()));
    }
    let record: PrivateKeyRecord = file_ops::read_json(&config.private_key_path)?;
    Ok(PrivateKey {
        n: parse_decimal(&record.n)?,
        d: parse_decimal(&record.d)?,
    })
}

fn parse_decimal(text: &str) -> Result<BigUint> {
    BigUint::parse_bytes(text.as_bytes(), 10)
        .ok_or_else(|| CipherError::MalformedNumber(text.to_string()))
}
