//! KeyPair generation for access-code signers

use anyhow::Result;

use crate::post_quantum::dilithium::{dilithium2_keypair, dilithium2_sign_detached};
use crate::types::{PrivateKey, PublicKey};

/// Dilithium2 key pair with secure memory management
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
}

impl KeyPair {
    /// Generate a new Dilithium2 key pair
    pub fn generate() -> Result<Self> {
        let (dilithium_pk, dilithium_sk) = dilithium2_keypair();

        let keypair = KeyPair {
            public_key: PublicKey::new(dilithium_pk),
            private_key: PrivateKey { dilithium_sk },
        };

        keypair.validate()?;
        Ok(keypair)
    }

    /// Validate that the keypair is properly formed
    pub fn validate(&self) -> Result<()> {
        if self.private_key.dilithium_sk.iter().all(|&x| x == 0) {
            return Err(anyhow::anyhow!("Weak Dilithium private key detected"));
        }

        // Verify that public key matches private key by doing a test signature
        let test_message = b"Registrar-KeyPair-Validation-Test";
        let signature = self.sign(test_message)?;
        if !self.public_key.verify(test_message, &signature)? {
            return Err(anyhow::anyhow!(
                "Keypair validation failed: signature verification failed"
            ));
        }

        Ok(())
    }

    /// Produce a detached signature over `message`
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        dilithium2_sign_detached(message, &self.private_key.dilithium_sk)
    }

    /// Address controlled by this key pair
    pub fn address(&self) -> lib_types::Address {
        self.public_key.address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_sign() {
        let keypair = KeyPair::generate().expect("keypair generation");
        let signature = keypair.sign(b"payload").expect("sign");
        assert!(keypair.public_key.verify(b"payload", &signature).unwrap());
    }

    #[test]
    fn test_distinct_keypairs_have_distinct_addresses() {
        let a = KeyPair::generate().unwrap();
        let b = KeyPair::generate().unwrap();
        assert_ne!(a.address(), b.address());
    }
}
