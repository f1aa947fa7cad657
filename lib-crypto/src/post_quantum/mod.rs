//! Post-quantum signature primitives
//!
//! Only CRYSTALS-Dilithium2 detached signatures are used by the registrar.

pub mod constants;
pub mod dilithium;

pub use constants::{DILITHIUM2_PUBLICKEY_BYTES, DILITHIUM2_SIGNATURE_BYTES};
pub use dilithium::{dilithium2_keypair, dilithium2_sign_detached, dilithium2_verify_detached};
