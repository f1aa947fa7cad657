//! Registrar event system
//!
//! Every successful call returns the events it emitted, in emission order,
//! and appends them to the registrar's event log. Failed calls emit nothing.

use lib_types::{Address, GroupId, NameNode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrarEvent {
    /// A subdomain was allocated; `node` is also the holder token id
    NameRegistered { owner: Address, node: NameNode },

    BookingUpdated { node: NameNode, claimant: Address },

    BookingDeleted { node: NameNode },

    MaxEmissionNumberUpdated { max_emission_number: u64 },

    /// Root name ownership handed back to the administrator
    OwnershipConceded { owner: Address },

    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },

    /// An access code was redeemed; `access_code` is its wire form
    AccessCodeConsumed {
        group_id: GroupId,
        access_code: Vec<u8>,
    },

    CodeSignerUpdated { code_signer: Address },

    GroupIdUpdated { group_id: GroupId },
}

impl RegistrarEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            RegistrarEvent::NameRegistered { .. } => "NameRegistered",
            RegistrarEvent::BookingUpdated { .. } => "BookingUpdated",
            RegistrarEvent::BookingDeleted { .. } => "BookingDeleted",
            RegistrarEvent::MaxEmissionNumberUpdated { .. } => "MaxEmissionNumberUpdated",
            RegistrarEvent::OwnershipConceded { .. } => "OwnershipConceded",
            RegistrarEvent::OwnershipTransferred { .. } => "OwnershipTransferred",
            RegistrarEvent::AccessCodeConsumed { .. } => "AccessCodeConsumed",
            RegistrarEvent::CodeSignerUpdated { .. } => "CodeSignerUpdated",
            RegistrarEvent::GroupIdUpdated { .. } => "GroupIdUpdated",
        }
    }
}
