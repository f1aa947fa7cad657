//! Hashing module for registrar cryptography
//!
//! BLAKE3 is the only hash function used for registrar state: name nodes,
//! label hashes, typed-data digests and consumed access-code digests.

/// Blake3 hash function - primary hash function for the registrar
pub fn hash_blake3(data: &[u8]) -> [u8; 32] {
    blake3::hash(data).into()
}

/// Hash multiple data segments as if they were concatenated
pub fn hash_blake3_multiple(data_segments: &[&[u8]]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    for segment in data_segments {
        hasher.update(segment);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_labels_hash_apart() {
        assert_ne!(hash_blake3(b"first"), hash_blake3(b"First"));
        assert_eq!(hash_blake3(b"first"), hash_blake3(b"first"));
    }

    #[test]
    fn test_segments_hash_like_concatenation() {
        let root = [3u8; 32];
        let joined: Vec<u8> = root.iter().chain(b"label".iter()).copied().collect();
        assert_eq!(hash_blake3_multiple(&[&root, b"label"]), hash_blake3(&joined));
        assert_eq!(hash_blake3_multiple(&[]), hash_blake3(&[]));
    }

    #[test]
    fn test_blake3_matches_reference() {
        let expected: [u8; 32] = blake3::hash(b"first").into();
        assert_eq!(hash_blake3(b"first"), expected);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_segmented_hash_matches_concatenation(
                data in prop::collection::vec(any::<u8>(), 0..256),
                split in 0usize..256,
            ) {
                let split = split.min(data.len());
                let (head, tail) = data.split_at(split);
                prop_assert_eq!(hash_blake3_multiple(&[head, tail]), hash_blake3(&data));
            }
        }
    }
}
