//! CRYSTALS-Dilithium2 wrapper functions for detached signatures

use anyhow::Result;
use pqcrypto_dilithium::dilithium2;
use pqcrypto_traits::sign::{
    DetachedSignature, PublicKey as SignPublicKey, SecretKey as SignSecretKey,
};

/// Generate Dilithium2 keypair (Level 2 security)
pub fn dilithium2_keypair() -> (Vec<u8>, Vec<u8>) {
    let (pk, sk) = dilithium2::keypair();
    (pk.as_bytes().to_vec(), sk.as_bytes().to_vec())
}

/// Produce a detached Dilithium2 signature over `message`
pub fn dilithium2_sign_detached(message: &[u8], secret_key: &[u8]) -> Result<Vec<u8>> {
    let sk = dilithium2::SecretKey::from_bytes(secret_key)
        .map_err(|_| anyhow::anyhow!("Invalid Dilithium2 secret key"))?;

    let signature = dilithium2::detached_sign(message, &sk);
    Ok(signature.as_bytes().to_vec())
}

/// Verify a detached Dilithium2 signature
///
/// Malformed keys or signatures are errors; a well-formed signature that
/// does not match is `Ok(false)`.
pub fn dilithium2_verify_detached(
    message: &[u8],
    signature: &[u8],
    public_key: &[u8],
) -> Result<bool> {
    let pk = dilithium2::PublicKey::from_bytes(public_key)
        .map_err(|_| anyhow::anyhow!("Invalid Dilithium2 public key"))?;
    let sig = dilithium2::DetachedSignature::from_bytes(signature)
        .map_err(|_| anyhow::anyhow!("Invalid Dilithium2 signature"))?;

    match dilithium2::verify_detached_signature(&sig, message, &pk) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}
