//! Canonical Primitive Types for the Subdomain Registrar
//!
//! These types are the foundational building blocks for all registrar state.
//! They are designed to be:
//! - Fixed-size (no dynamic allocation)
//! - Deterministically serializable
//! - Efficient to copy and compare

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Wall-clock time in seconds since the Unix epoch
pub type Timestamp = u64;

/// Coarse time-bucket index used to epoch access codes
pub type GroupId = u64;

// ============================================================================
// PARSE ERRORS
// ============================================================================

/// Failure to parse a 32-byte identifier from hex
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseHexError {
    /// Input is not valid hex
    InvalidHex(String),
    /// Decoded input is not 32 bytes long
    InvalidLength(usize),
}

impl fmt::Display for ParseHexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseHexError::InvalidHex(reason) => write!(f, "invalid hex: {}", reason),
            ParseHexError::InvalidLength(len) => {
                write!(f, "expected 32 bytes, got {}", len)
            }
        }
    }
}

impl std::error::Error for ParseHexError {}

fn parse_hex32(input: &str) -> Result<[u8; 32], ParseHexError> {
    let trimmed = input.strip_prefix("0x").unwrap_or(input);
    let bytes = hex::decode(trimmed).map_err(|e| ParseHexError::InvalidHex(e.to_string()))?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| ParseHexError::InvalidLength(len))
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// 32-byte address (derived from public key)
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// Create a new Address from raw bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create a zeroed Address
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Get the underlying bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parse from a hex string, with or without a `0x` prefix
    pub fn from_hex(input: &str) -> Result<Self, ParseHexError> {
        parse_hex32(input).map(Self)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ============================================================================
// NAME TYPES
// ============================================================================

/// 32-byte name node, the hashed identity of a name in the namespace tree.
///
/// The node of a child label doubles as the id of its holder token.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord)]
pub struct NameNode(pub [u8; 32]);

impl NameNode {
    /// Create a new NameNode from raw bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The node of the empty name
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Get the underlying bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the empty-name node
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parse from a hex string, with or without a `0x` prefix
    pub fn from_hex(input: &str) -> Result<Self, ParseHexError> {
        parse_hex32(input).map(Self)
    }
}

impl fmt::Debug for NameNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameNode({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for NameNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for NameNode {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for NameNode {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_basics() {
        let addr = Address::new([3u8; 32]);
        assert!(!addr.is_zero());
        assert_eq!(addr.as_bytes(), &[3u8; 32]);
        assert!(Address::zero().is_zero());
    }

    #[test]
    fn test_address_from_hex_accepts_prefix() {
        let hex_str = "07".repeat(32);
        let plain = Address::from_hex(&hex_str).unwrap();
        let prefixed = Address::from_hex(&format!("0x{}", hex_str)).unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain, Address::new([7u8; 32]));
    }

    #[test]
    fn test_address_from_hex_rejects_bad_input() {
        assert!(matches!(
            Address::from_hex("zz"),
            Err(ParseHexError::InvalidHex(_))
        ));
        assert_eq!(
            Address::from_hex("0102"),
            Err(ParseHexError::InvalidLength(2))
        );
    }

    #[test]
    fn test_name_node_display_is_prefixed() {
        let node = NameNode::new([0xab; 32]);
        assert!(format!("{}", node).starts_with("0xabab"));
        assert!(NameNode::zero().is_zero());
    }

    #[test]
    fn test_from_array() {
        let bytes = [5u8; 32];
        let node: NameNode = bytes.into();
        assert_eq!(node.0, bytes);

        let addr: Address = bytes.into();
        assert_eq!(addr.0, bytes);
    }
}
