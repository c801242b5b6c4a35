// RSA Block Cipher Library
// Key generation and whole-file encryption over big-integer blocks

pub mod config;
pub mod error;
pub mod pipeline;
pub mod rsa;
pub mod util;

pub use config::CipherConfig;
pub use error::{CipherError, Result};
pub use pipeline::{decrypt_file, encrypt_file, generate_key_pair};
pub use rsa::keygen::{KeyPair, PrivateKey, PublicKey};
