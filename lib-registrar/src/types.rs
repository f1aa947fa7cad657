//! Name hashing and call context shared by every registrar component.
//!
//! # Canonical Node Derivation
//!
//! ```text
//! labelhash(label)      = BLAKE3(label)
//! namehash("")          = 0x00..00
//! namehash(label.rest)  = BLAKE3(namehash(rest) || labelhash(label))
//! label_node(root, l)   = BLAKE3(root || labelhash(l))
//! ```
//!
//! Labels are compared byte-exactly. No case folding or unicode
//! normalization is applied, so `"First"` and `"first"` are distinct labels.

use lib_crypto::{hash_blake3, hash_blake3_multiple};
use lib_types::{Address, NameNode, Timestamp};

/// Hash of a single label segment
pub fn labelhash(label: &str) -> [u8; 32] {
    hash_blake3(label.as_bytes())
}

/// Node of a child label directly under `root`
pub fn label_node(root: &NameNode, label: &str) -> NameNode {
    NameNode::new(hash_blake3_multiple(&[root.as_bytes(), &labelhash(label)]))
}

/// Node of a full dotted name, e.g. `"first.sismo.eth"`
pub fn namehash(name: &str) -> NameNode {
    if name.is_empty() {
        return NameNode::zero();
    }
    name.rsplit('.')
        .fold(NameNode::zero(), |parent, label| label_node(&parent, label))
}

/// Identity and clock of the current call.
///
/// Authorization is decided from `caller` alone: administrator-only
/// operations compare it against the stored administrator address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub timestamp: Timestamp,
}

impl CallContext {
    pub fn new(caller: Address, timestamp: Timestamp) -> Self {
        Self { caller, timestamp }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namehash_empty_is_zero() {
        assert!(namehash("").is_zero());
    }

    #[test]
    fn test_namehash_chains_label_nodes() {
        let eth = label_node(&NameNode::zero(), "eth");
        let sismo = label_node(&eth, "sismo");
        let first = label_node(&sismo, "first");

        assert_eq!(namehash("eth"), eth);
        assert_eq!(namehash("sismo.eth"), sismo);
        assert_eq!(namehash("first.sismo.eth"), first);
    }

    #[test]
    fn test_labels_are_not_normalized() {
        let root = namehash("sismo.eth");
        assert_ne!(label_node(&root, "first"), label_node(&root, "First"));
        assert_ne!(label_node(&root, "first"), label_node(&root, "first "));
    }

    #[test]
    fn test_same_label_differs_across_roots() {
        assert_ne!(
            label_node(&namehash("sismo.eth"), "first"),
            label_node(&namehash("other.eth"), "first")
        );
    }
}
