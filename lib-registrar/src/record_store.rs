//! Allocation Record Store - holder tokens for allocated subdomains
//!
//! Each allocated label is represented by one record keyed by its node. The
//! node doubles as the id of the holder token.
//!
//! # Invariants
//!
//! **R1: One record per node**
//! - A node maps to at most one record
//! - Records are never removed
//!
//! **R2: Immutable holder**
//! - The holder of a record is fixed at creation
//!
//! **R3: Consistent accounting**
//! - `total_supply` equals the number of records
//! - The sum of all balances equals `total_supply`

use std::collections::HashMap;

use lib_types::{Address, NameNode, Timestamp};
use serde::{Deserialize, Serialize};

use crate::errors::{RegistrarError, RegistrarResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub node: NameNode,
    pub holder: Address,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct AllocationRecordStore {
    /// Primary storage: node → record
    records: HashMap<NameNode, AllocationRecord>,

    /// Number of records held per address
    balances: HashMap<Address, u64>,

    /// Monotonic count of records ever created
    total_supply: u64,
}

impl AllocationRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: &NameNode) -> Option<&AllocationRecord> {
        self.records.get(node)
    }

    pub fn is_allocated(&self, node: &NameNode) -> bool {
        self.records.contains_key(node)
    }

    /// Holder of the token for `node`
    pub fn owner_of(&self, node: &NameNode) -> Option<Address> {
        self.records.get(node).map(|record| record.holder)
    }

    pub fn balance_of(&self, holder: &Address) -> u64 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Create the record for `node`
    ///
    /// # Errors
    /// `AlreadyAllocated` if the node already has a record.
    pub fn mint(
        &mut self,
        node: NameNode,
        holder: Address,
        created_at: Timestamp,
    ) -> RegistrarResult<&AllocationRecord> {
        // === VALIDATION PHASE ===
        if self.records.contains_key(&node) {
            return Err(RegistrarError::AlreadyAllocated);
        }

        // === MUTATION PHASE ===
        *self.balances.entry(holder).or_insert(0) += 1;
        self.total_supply += 1;

        Ok(self.records.entry(node).or_insert(AllocationRecord {
            node,
            holder,
            created_at,
        }))
    }

    /// All records held by `holder`
    pub fn records_of(&self, holder: &Address) -> Vec<&AllocationRecord> {
        self.records
            .values()
            .filter(|record| &record.holder == holder)
            .collect()
    }
}
