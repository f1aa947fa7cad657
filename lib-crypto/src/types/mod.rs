//! Key type definitions

pub mod keys;

pub use keys::{PrivateKey, PublicKey};
