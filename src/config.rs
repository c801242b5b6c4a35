// Pipeline Configuration
// Explicit configuration passed into the cipher pipeline instead of globals

use std::path::PathBuf;

/// Default decimal digit count for the modulus when the caller does not
/// specify one.
pub const DEFAULT_MODULUS_DIGITS: u32 = 16;

/// Configuration for the file cipher pipeline
#[derive(Clone, Debug)]
pub struct CipherConfig {
    /// Where the public key artifact is written/read.
    pub public_key_path: PathBuf,
    /// Where the private key artifact is written/read.
    pub private_key_path: PathBuf,
    /// Modulus size in decimal digits used when no explicit size is given.
    pub default_digits: u32,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            public_key_path: PathBuf::from("rsa_pub.json"),
            private_key_path: PathBuf::from("rsa_priv.json"),
            default_digits: DEFAULT_MODULUS_DIGITS,
        }
    }
}

impl CipherConfig {
    pub fn with_key_paths(public: impl Into<PathBuf>, private: impl Into<PathBuf>) -> Self {
        Self {
            public_key_path: public.into(),
            private_key_path: private.into(),
            ..Self::default()
        }
    }
}
