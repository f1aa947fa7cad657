//! Subdomain registrar primitives.
//! Stable, protocol-neutral, behavior-free.
//!
//! Rule: identities in registrar state are fixed-size byte arrays, never strings.

pub mod primitives;

pub use primitives::{Address, GroupId, NameNode, ParseHexError, Timestamp};
