//! Post-quantum cryptography constants - CRYSTALS key sizes

/// CRYSTALS-Dilithium2 public key size (NIST post-quantum standard)
pub const DILITHIUM2_PUBLICKEY_BYTES: usize = 1312;

/// CRYSTALS-Dilithium2 detached signature size
pub const DILITHIUM2_SIGNATURE_BYTES: usize = 2420;
