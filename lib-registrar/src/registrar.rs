//! Subdomain registrar (allocation engine).
//!
//! Allocates child labels of one root name. Registration preconditions are
//! evaluated in a fixed order and fail fast:
//!
//! 1. The holder is not the zero address (`INVALID_RECIPIENT`)
//! 2. The label has no allocation record (`SUBDOMAIN_ALREADY_REGISTERED`)
//! 3. The label has no outstanding booking (`LABEL_BOOKED`)
//! 4. The emission cap is not reached (`TOO_MANY_EMISSION`)
//! 5. The holder owns no subdomain yet (`TOO_MANY_SUBDOMAINS`)
//! 6. During the reservation window, the label's reference-namespace owner
//!    is absent or is the holder (`SUBDOMAIN_RESERVED`)
//!
//! # Administrator exemptions
//!
//! The administrator bootstraps and maintains the namespace, so it is
//! exempt from two checks:
//!
//! - the one-per-holder limit does not apply when the administrator is the
//!   holder or the caller, so it can seed any number of labels for itself
//!   and hand out extra labels on a holder's behalf
//! - the reservation window does not apply when the administrator is the
//!   caller
//!
//! # Atomicity
//!
//! All checks run before any mutation. The naming collaborator is written
//! first; if that call fails nothing else is touched, so there is never an
//! allocation record without a matching binding.

use lib_types::{Address, NameNode, Timestamp};
use tracing::{debug, info, warn};

use crate::booking::LabelBooker;
use crate::errors::{RegistrarError, RegistrarResult};
use crate::events::RegistrarEvent;
use crate::naming::NamingCollaborator;
use crate::record_store::AllocationRecordStore;
use crate::types::CallContext;

/// Deployment parameters and mutable emission policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Node of the root name whose children are allocated
    pub root_node: NameNode,
    /// Address of this registrar instance
    pub registrar_address: Address,
    pub deployed_at: Timestamp,
    /// Length of the reservation window in seconds
    pub reservation_duration: u64,
    /// Maximum number of allocations; 0 means unbounded
    pub max_emission_number: u64,
}

#[derive(Debug)]
pub struct SubdomainRegistrar<N: NamingCollaborator> {
    naming: N,
    config: EngineConfig,
    owner: Address,
    records: AllocationRecordStore,
    booker: LabelBooker,
    events: Vec<RegistrarEvent>,
}

impl<N: NamingCollaborator> SubdomainRegistrar<N> {
    pub fn new(naming: N, config: EngineConfig, owner: Address) -> Self {
        let booker = LabelBooker::new(config.root_node);
        Self {
            naming,
            config,
            owner,
            records: AllocationRecordStore::new(),
            booker,
            events: Vec::new(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Administrator address
    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn naming(&self) -> &N {
        &self.naming
    }

    /// Mutable access to the external naming system, for state changes made
    /// outside the registrar (e.g. reference-namespace registrations)
    pub fn naming_mut(&mut self) -> &mut N {
        &mut self.naming
    }

    pub fn records(&self) -> &AllocationRecordStore {
        &self.records
    }

    pub fn booker(&self) -> &LabelBooker {
        &self.booker
    }

    pub fn node_of(&self, label: &str) -> NameNode {
        self.booker.node_of(label)
    }

    /// Claimant booked for `label`, or the zero address
    pub fn get_booking(&self, label: &str) -> Address {
        self.booker.get_booking(label)
    }

    pub fn max_emission_number(&self) -> u64 {
        self.config.max_emission_number
    }

    pub fn current_emission_count(&self) -> u64 {
        self.records.total_supply()
    }

    pub fn reservation_ends_at(&self) -> Timestamp {
        self.config
            .deployed_at
            .saturating_add(self.config.reservation_duration)
    }

    pub fn is_reservation_open(&self, now: Timestamp) -> bool {
        now < self.reservation_ends_at()
    }

    /// Every event emitted by committed calls, oldest first
    pub fn events(&self) -> &[RegistrarEvent] {
        &self.events
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Register `label` for the caller
    pub fn register(
        &mut self,
        ctx: &CallContext,
        label: &str,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.register_for(ctx, label, ctx.caller)
    }

    /// Register `label` for `holder`
    ///
    /// Only the administrator may name a holder other than itself.
    pub fn register_for(
        &mut self,
        ctx: &CallContext,
        label: &str,
        holder: Address,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        if holder != ctx.caller && !self.is_owner(ctx) {
            return Err(reject("register", RegistrarError::SenderNotAllowed));
        }
        let events = self
            .try_register(ctx, label, holder)
            .map_err(|e| reject("register", e))?;
        self.emit(&events);
        Ok(events)
    }

    /// Claim a booked label for `recipient`
    ///
    /// The caller must be the booked claimant or the administrator. The
    /// administrator may claim any booking on behalf of any recipient.
    /// Claims skip the reservation window but not the emission cap or the
    /// one-per-holder limit.
    pub fn claim(
        &mut self,
        ctx: &CallContext,
        label: &str,
        recipient: Address,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        let node = self.node_of(label);

        let claimant = self.booker.get_booking_by_node(&node);
        if claimant.is_zero() {
            return Err(reject("claim", RegistrarError::LabelNotBooked));
        }
        if ctx.caller != claimant && !self.is_owner(ctx) {
            return Err(reject("claim", RegistrarError::SenderNotAllowed));
        }
        if recipient.is_zero() {
            return Err(reject("claim", RegistrarError::InvalidRecipient));
        }
        if self.records.is_allocated(&node) {
            return Err(reject("claim", RegistrarError::AlreadyAllocated));
        }
        self.check_emission_cap().map_err(|e| reject("claim", e))?;
        self.check_holder_limit(ctx, &recipient)
            .map_err(|e| reject("claim", e))?;

        let registered = self
            .mint_and_bind(ctx, label, node, recipient)
            .map_err(|e| reject("claim", e))?;
        self.booker.unbook(label);
        info!(%node, %recipient, label, "booking claimed");

        let events = vec![registered, RegistrarEvent::BookingDeleted { node }];
        self.emit(&events);
        Ok(events)
    }

    // ========================================================================
    // Bookings (administrator only)
    // ========================================================================

    /// Book `label` for `claimant`, overwriting any previous booking
    pub fn book(
        &mut self,
        ctx: &CallContext,
        label: &str,
        claimant: Address,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.ensure_owner(ctx).map_err(|e| reject("book", e))?;
        let node = self
            .booker
            .book(label, claimant)
            .map_err(|e| reject("book", e))?;
        info!(%node, %claimant, label, "label booked");

        let events = vec![RegistrarEvent::BookingUpdated { node, claimant }];
        self.emit(&events);
        Ok(events)
    }

    /// Clear the booking for `label`; a no-op if there is none
    pub fn unbook(
        &mut self,
        ctx: &CallContext,
        label: &str,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.ensure_owner(ctx).map_err(|e| reject("unbook", e))?;

        let mut events = Vec::new();
        if self.booker.unbook(label).is_some() {
            let node = self.node_of(label);
            info!(%node, label, "booking removed");
            events.push(RegistrarEvent::BookingDeleted { node });
        }
        self.emit(&events);
        Ok(events)
    }

    // ========================================================================
    // Administration
    // ========================================================================

    /// Change the emission cap; 0 lifts it
    pub fn update_max_emission_number(
        &mut self,
        ctx: &CallContext,
        max_emission_number: u64,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.ensure_owner(ctx)
            .map_err(|e| reject("update_max_emission_number", e))?;
        if max_emission_number != 0 && max_emission_number < self.current_emission_count() {
            return Err(reject(
                "update_max_emission_number",
                RegistrarError::MaxEmissionTooLow,
            ));
        }

        self.config.max_emission_number = max_emission_number;
        info!(max_emission_number, "max emission number updated");

        let events = vec![RegistrarEvent::MaxEmissionNumberUpdated {
            max_emission_number,
        }];
        self.emit(&events);
        Ok(events)
    }

    /// Hand ownership of the root name back to the administrator
    ///
    /// Existing allocation records are kept. New allocations will fail at the
    /// naming collaborator once the root is no longer delegated.
    pub fn give_back_domain_ownership(
        &mut self,
        ctx: &CallContext,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.ensure_owner(ctx)
            .map_err(|e| reject("give_back_domain_ownership", e))?;
        self.naming
            .transfer_root(&self.config.root_node, self.owner)
            .map_err(|e| reject("give_back_domain_ownership", e.into()))?;
        info!(root = %self.config.root_node, owner = %self.owner, "root ownership conceded");

        let events = vec![RegistrarEvent::OwnershipConceded { owner: self.owner }];
        self.emit(&events);
        Ok(events)
    }

    /// Replace the administrator
    pub fn transfer_ownership(
        &mut self,
        ctx: &CallContext,
        new_owner: Address,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.ensure_owner(ctx)
            .map_err(|e| reject("transfer_ownership", e))?;
        if new_owner.is_zero() {
            return Err(reject("transfer_ownership", RegistrarError::NewOwnerIsZero));
        }

        let previous_owner = std::mem::replace(&mut self.owner, new_owner);
        info!(%previous_owner, %new_owner, "administrator changed");

        let events = vec![RegistrarEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        }];
        self.emit(&events);
        Ok(events)
    }

    // ========================================================================
    // Crate-internal building blocks
    // ========================================================================

    pub(crate) fn is_owner(&self, ctx: &CallContext) -> bool {
        ctx.caller == self.owner
    }

    pub(crate) fn ensure_owner(&self, ctx: &CallContext) -> RegistrarResult<()> {
        if self.is_owner(ctx) {
            Ok(())
        } else {
            Err(RegistrarError::CallerNotOwner)
        }
    }

    /// Run every registration check and allocate, without logging events
    pub(crate) fn try_register(
        &mut self,
        ctx: &CallContext,
        label: &str,
        holder: Address,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        if holder.is_zero() {
            return Err(RegistrarError::InvalidRecipient);
        }
        let node = self.node_of(label);

        if self.records.is_allocated(&node) {
            return Err(RegistrarError::AlreadyAllocated);
        }
        if !self.booker.get_booking_by_node(&node).is_zero() {
            return Err(RegistrarError::LabelBooked);
        }
        self.check_emission_cap()?;
        self.check_holder_limit(ctx, &holder)?;
        self.check_reservation(ctx, label, &holder)?;

        let registered = self.mint_and_bind(ctx, label, node, holder)?;
        Ok(vec![registered])
    }

    /// Append committed events to the log
    pub(crate) fn emit(&mut self, events: &[RegistrarEvent]) {
        self.events.extend_from_slice(events);
    }

    fn check_emission_cap(&self) -> RegistrarResult<()> {
        let max = self.config.max_emission_number;
        if max != 0 && self.records.total_supply() >= max {
            return Err(RegistrarError::EmissionCapReached);
        }
        Ok(())
    }

    fn check_holder_limit(&self, ctx: &CallContext, holder: &Address) -> RegistrarResult<()> {
        // Administrator may hold, and hand out, any number of subdomains
        if *holder == self.owner || self.is_owner(ctx) {
            return Ok(());
        }
        if self.records.balance_of(holder) > 0 {
            return Err(RegistrarError::TooManyAllocations);
        }
        Ok(())
    }

    fn check_reservation(
        &self,
        ctx: &CallContext,
        label: &str,
        holder: &Address,
    ) -> RegistrarResult<()> {
        // Administrator is never blocked by the reservation window
        if self.is_owner(ctx) || !self.is_reservation_open(ctx.timestamp) {
            return Ok(());
        }

        // An unreachable reference namespace counts as "no reference owner"
        let reference_owner = match self.naming.reference_owner(label) {
            Ok(owner) => owner,
            Err(error) => {
                warn!(label, %error, "reference lookup failed, treating label as unowned");
                None
            }
        };

        match reference_owner {
            Some(owner) if !owner.is_zero() && owner != *holder => {
                Err(RegistrarError::SubdomainReserved)
            }
            _ => Ok(()),
        }
    }

    fn mint_and_bind(
        &mut self,
        ctx: &CallContext,
        label: &str,
        node: NameNode,
        holder: Address,
    ) -> RegistrarResult<RegistrarEvent> {
        self.naming
            .bind_label(&self.config.root_node, label, holder)?;
        self.records.mint(node, holder, ctx.timestamp)?;
        info!(%node, %holder, label, "subdomain registered");

        Ok(RegistrarEvent::NameRegistered {
            owner: holder,
            node,
        })
    }
}

fn reject(operation: &'static str, error: RegistrarError) -> RegistrarError {
    debug!(operation, code = error.code(), "call rejected");
    error
}
