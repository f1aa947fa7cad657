//! Registrar Cryptography Foundation Module
//!
//! BLAKE3 hashing for name nodes and digests, CRYSTALS-Dilithium2 detached
//! signatures for access codes, and the typed-signature verification used to
//! authorize signed vouchers.

// Core modules
pub mod hashing;
pub mod keypair;
pub mod post_quantum;
pub mod types;
pub mod verification;

// Re-export commonly used types and functions
pub use types::keys::{PrivateKey, PublicKey};

// Re-export hashing functionality
pub use hashing::{hash_blake3, hash_blake3_multiple};

// Re-export keypair functionality
pub use keypair::generation::KeyPair;

// Re-export typed signature verification
pub use verification::typed_signature::{
    recover_signer, typed_digest, TypedSignature, TYPED_DATA_PREFIX,
};
