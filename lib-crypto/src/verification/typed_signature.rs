//! Domain-separated typed signatures
//!
//! A typed signature authorizes a structured payload for one specific
//! signing domain. The signed message is
//!
//! ```text
//! digest = BLAKE3(0x19 0x01 || domain_separator || struct_hash)
//! ```
//!
//! so a signature produced for one domain (contract instance, network,
//! application name/version) never verifies under another.
//!
//! Verification is a pure function from `(domain_separator, struct_hash,
//! signature)` to the signer's address. Callers compare the recovered
//! address against whichever signer they trust.

use anyhow::Result;
use lib_types::Address;

use crate::hashing::hash_blake3_multiple;
use crate::keypair::KeyPair;
use crate::types::PublicKey;

/// Prefix binding the digest to the typed-data scheme
pub const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

/// Compute the message digest that is actually signed
pub fn typed_digest(domain_separator: &[u8; 32], struct_hash: &[u8; 32]) -> [u8; 32] {
    hash_blake3_multiple(&[&TYPED_DATA_PREFIX, domain_separator, struct_hash])
}

/// A detached signature together with the public key that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedSignature {
    pub public_key: PublicKey,
    pub signature: Vec<u8>,
}

impl TypedSignature {
    /// Sign a typed payload with `keypair`
    pub fn sign(
        keypair: &KeyPair,
        domain_separator: &[u8; 32],
        struct_hash: &[u8; 32],
    ) -> Result<Self> {
        let digest = typed_digest(domain_separator, struct_hash);
        Ok(Self {
            public_key: keypair.public_key.clone(),
            signature: keypair.sign(&digest)?,
        })
    }

    /// Wire form: `len(public_key):u16 BE || public_key || signature`
    ///
    /// Fails when the public key does not fit a u16 length prefix.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let pk = self.public_key.as_bytes();
        let pk_len = u16::try_from(pk.len()).map_err(|_| {
            anyhow::anyhow!("Public key too long for wire form: {} bytes", pk.len())
        })?;
        let mut out = Vec::with_capacity(2 + pk.len() + self.signature.len());
        out.extend_from_slice(&pk_len.to_be_bytes());
        out.extend_from_slice(pk);
        out.extend_from_slice(&self.signature);
        Ok(out)
    }

    /// Parse the wire form produced by [`TypedSignature::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 2 {
            return Err(anyhow::anyhow!("Typed signature too short: {} bytes", bytes.len()));
        }
        let pk_len = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
        let rest = &bytes[2..];
        if rest.len() <= pk_len {
            return Err(anyhow::anyhow!(
                "Typed signature truncated: public key length {} exceeds payload {}",
                pk_len,
                rest.len()
            ));
        }
        let (pk, signature) = rest.split_at(pk_len);
        Ok(Self {
            public_key: PublicKey::new(pk.to_vec()),
            signature: signature.to_vec(),
        })
    }
}

/// Recover the address that signed a typed payload
///
/// Fails when the signature is malformed or does not verify against the
/// embedded public key over the domain-separated digest.
pub fn recover_signer(
    domain_separator: &[u8; 32],
    struct_hash: &[u8; 32],
    signature: &TypedSignature,
) -> Result<Address> {
    let digest = typed_digest(domain_separator, struct_hash);
    if !signature.public_key.verify(&digest, &signature.signature)? {
        tracing::debug!(
            signer = %signature.public_key.address(),
            "typed signature rejected"
        );
        return Err(anyhow::anyhow!("Typed signature does not match payload"));
    }
    Ok(signature.public_key.address())
}
