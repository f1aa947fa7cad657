//! Signature verification module

pub mod typed_signature;

pub use typed_signature::{recover_signer, typed_digest, TypedSignature, TYPED_DATA_PREFIX};
