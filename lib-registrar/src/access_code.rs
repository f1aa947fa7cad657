//! Access code typed data.
//!
//! An access code is a [`TypedSignature`](lib_crypto::TypedSignature) by the
//! code signer over
//!
//! ```text
//! domain_separator = BLAKE3(DOMAIN_TYPE || len(name) || name
//!                           || len(version) || version
//!                           || chain_id_be || verifying_contract)
//! struct_hash      = BLAKE3(ACCESS_CODE_TYPE || recipient || group_id_be)
//! ```
//!
//! Lengths are u32 big-endian. A code is therefore bound to one recipient,
//! one group epoch, and one gate instance on one chain.

use lib_crypto::{hash_blake3_multiple, KeyPair, TypedSignature};
use lib_types::{Address, GroupId, Timestamp};
use serde::{Deserialize, Serialize};

pub const DOMAIN_TYPE: &[u8] =
    b"SubdomainRegistrarDomain(string name,string version,uint64 chainId,address verifyingContract)";

pub const ACCESS_CODE_TYPE: &[u8] = b"AccessCode(address receiver,uint64 groupId)";

pub const SECONDS_PER_WEEK: u64 = 604_800;

/// Signing domain of one gate instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCodeDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl AccessCodeDomain {
    pub fn separator(&self) -> [u8; 32] {
        let name_len = (self.name.len() as u32).to_be_bytes();
        let version_len = (self.version.len() as u32).to_be_bytes();
        let chain_id = self.chain_id.to_be_bytes();

        hash_blake3_multiple(&[
            DOMAIN_TYPE,
            &name_len,
            self.name.as_bytes(),
            &version_len,
            self.version.as_bytes(),
            &chain_id,
            self.verifying_contract.as_bytes(),
        ])
    }

    /// Issue an access code for `recipient` in epoch `group_id`
    ///
    /// Returns the wire form accepted by
    /// [`CodeAccessibleRegistrar::register_with_access_code`](crate::CodeAccessibleRegistrar::register_with_access_code).
    pub fn issue(
        &self,
        signer: &KeyPair,
        recipient: &Address,
        group_id: GroupId,
    ) -> anyhow::Result<Vec<u8>> {
        let struct_hash = access_code_struct_hash(recipient, group_id);
        let signature = TypedSignature::sign(signer, &self.separator(), &struct_hash)?;
        signature.to_bytes()
    }
}

pub fn access_code_struct_hash(recipient: &Address, group_id: GroupId) -> [u8; 32] {
    hash_blake3_multiple(&[
        ACCESS_CODE_TYPE,
        recipient.as_bytes(),
        &group_id.to_be_bytes(),
    ])
}

/// Week-granular epoch for `timestamp`
pub fn weekly_group_id(timestamp: Timestamp) -> GroupId {
    timestamp / SECONDS_PER_WEEK
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> AccessCodeDomain {
        AccessCodeDomain {
            name: "SubdomainRegistrar".to_string(),
            version: "1.0".to_string(),
            chain_id: 1,
            verifying_contract: Address::new([5u8; 32]),
        }
    }

    #[test]
    fn test_separator_binds_every_field() {
        let base = domain().separator();

        let mut other = domain();
        other.chain_id = 2;
        assert_ne!(other.separator(), base);

        let mut other = domain();
        other.verifying_contract = Address::new([6u8; 32]);
        assert_ne!(other.separator(), base);

        let mut other = domain();
        other.version = "2.0".to_string();
        assert_ne!(other.separator(), base);
    }

    #[test]
    fn test_length_prefix_prevents_field_shifting() {
        let mut a = domain();
        a.name = "ab".to_string();
        a.version = "c".to_string();
        let mut b = domain();
        b.name = "a".to_string();
        b.version = "bc".to_string();

        assert_ne!(a.separator(), b.separator());
    }

    #[test]
    fn test_struct_hash_binds_recipient_and_group() {
        let alice = Address::new([1u8; 32]);
        let bob = Address::new([2u8; 32]);

        assert_ne!(access_code_struct_hash(&alice, 0), access_code_struct_hash(&bob, 0));
        assert_ne!(access_code_struct_hash(&alice, 0), access_code_struct_hash(&alice, 1));
    }

    #[test]
    fn test_weekly_group_id() {
        assert_eq!(weekly_group_id(0), 0);
        assert_eq!(weekly_group_id(SECONDS_PER_WEEK - 1), 0);
        assert_eq!(weekly_group_id(SECONDS_PER_WEEK), 1);
        assert_eq!(weekly_group_id(1_650_000_000), 2728);
    }
}
