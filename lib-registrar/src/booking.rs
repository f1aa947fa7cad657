//! Label booking registry.
//!
//! Bookings pre-assign a label to a designated claimant. They are written
//! only by the administrator (the registrar checks the caller before
//! delegating here) and consumed exactly once by a matching claim.
//!
//! Booking is last-write-wins: booking an already booked label silently
//! replaces the claimant.

use std::collections::HashMap;

use lib_types::{Address, NameNode};
use serde::{Deserialize, Serialize};

use crate::errors::{RegistrarError, RegistrarResult};
use crate::types::label_node;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub label: String,
    pub claimant: Address,
}

#[derive(Debug, Clone)]
pub struct LabelBooker {
    root: NameNode,
    bookings: HashMap<NameNode, Booking>,
}

impl LabelBooker {
    pub fn new(root: NameNode) -> Self {
        Self {
            root,
            bookings: HashMap::new(),
        }
    }

    pub fn node_of(&self, label: &str) -> NameNode {
        label_node(&self.root, label)
    }

    /// Book `label` for `claimant`, replacing any previous booking
    ///
    /// Returns the booked node.
    pub fn book(&mut self, label: &str, claimant: Address) -> RegistrarResult<NameNode> {
        if claimant.is_zero() {
            return Err(RegistrarError::InvalidClaimant);
        }
        let node = self.node_of(label);
        self.bookings.insert(
            node,
            Booking {
                label: label.to_string(),
                claimant,
            },
        );
        Ok(node)
    }

    /// Remove the booking for `label`, returning it if one existed
    pub fn unbook(&mut self, label: &str) -> Option<Booking> {
        let node = self.node_of(label);
        self.bookings.remove(&node)
    }

    /// Claimant of `label`, or the zero address when unbooked
    pub fn get_booking(&self, label: &str) -> Address {
        self.get_booking_by_node(&self.node_of(label))
    }

    pub fn get_booking_by_node(&self, node: &NameNode) -> Address {
        self.bookings
            .get(node)
            .map(|booking| booking.claimant)
            .unwrap_or_else(Address::zero)
    }

    pub fn is_booked(&self, label: &str) -> bool {
        self.bookings.contains_key(&self.node_of(label))
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
