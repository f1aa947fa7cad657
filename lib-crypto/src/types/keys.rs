//! Key type definitions for registrar signers

use anyhow::Result;
use lib_types::Address;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::hashing::hash_blake3;
use crate::post_quantum::dilithium::dilithium2_verify_detached;

/// Post-quantum public key of a signer
#[derive(Debug, Clone, Serialize, Deserialize, Hash)]
pub struct PublicKey {
    /// CRYSTALS-Dilithium2 public key
    pub dilithium_pk: Vec<u8>,
    /// Key identifier, also the signer's address
    pub key_id: [u8; 32],
}

// Constant-time equality to prevent timing attacks on cryptographic keys
impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        let dilithium_eq = self.dilithium_pk.ct_eq(&other.dilithium_pk);
        let key_id_eq = self.key_id.ct_eq(&other.key_id);
        (dilithium_eq & key_id_eq).into()
    }
}

impl Eq for PublicKey {}

impl PublicKey {
    /// Create a new public key from raw Dilithium2 bytes
    pub fn new(dilithium_pk: Vec<u8>) -> Self {
        let key_id = hash_blake3(&dilithium_pk);
        PublicKey {
            dilithium_pk,
            key_id,
        }
    }

    /// Address controlled by this key
    pub fn address(&self) -> Address {
        Address::new(self.key_id)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.dilithium_pk
    }

    /// Verify a detached signature against this public key
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool> {
        if self.dilithium_pk.is_empty() {
            return Err(anyhow::anyhow!("No Dilithium public key available"));
        }
        dilithium2_verify_detached(message, signature, &self.dilithium_pk)
    }
}

/// Dilithium2 secret key (zeroized on drop)
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    pub dilithium_sk: Vec<u8>,
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("dilithium_sk", &"<redacted>")
            .finish()
    }
}
