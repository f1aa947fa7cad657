//! Access-code gated registrar.
//!
//! Wraps a [`SubdomainRegistrar`] so that registration requires a one-time
//! access code signed by the code signer. Redemption order:
//!
//! 1. Caller is the recipient or the administrator
//! 2. The code parses, verifies, and was signed by the current code signer
//!    for this recipient and the current group epoch
//! 3. The code has not been redeemed before
//! 4. The wrapped registrar accepts the registration
//!
//! Only after all four pass is the code marked consumed. A failed inner
//! registration leaves the code redeemable.
//!
//! Open registration is not exposed. Bookings, claims and administration
//! of the wrapped registrar remain available.

use std::collections::HashSet;

use lib_crypto::{hash_blake3, recover_signer, TypedSignature};
use lib_types::{Address, GroupId};
use tracing::{debug, info};

use crate::access_code::{access_code_struct_hash, AccessCodeDomain};
use crate::errors::{RegistrarError, RegistrarResult};
use crate::events::RegistrarEvent;
use crate::naming::NamingCollaborator;
use crate::registrar::SubdomainRegistrar;
use crate::types::CallContext;

#[derive(Debug)]
pub struct CodeAccessibleRegistrar<N: NamingCollaborator> {
    registrar: SubdomainRegistrar<N>,
    domain: AccessCodeDomain,
    domain_separator: [u8; 32],
    code_signer: Address,
    group_id: GroupId,
    /// Digests of redeemed access codes; never shrinks
    consumed: HashSet<[u8; 32]>,
}

impl<N: NamingCollaborator> CodeAccessibleRegistrar<N> {
    pub fn new(
        registrar: SubdomainRegistrar<N>,
        domain: AccessCodeDomain,
        code_signer: Address,
        initial_group_id: GroupId,
    ) -> Self {
        let domain_separator = domain.separator();
        Self {
            registrar,
            domain,
            domain_separator,
            code_signer,
            group_id: initial_group_id,
            consumed: HashSet::new(),
        }
    }

    /// Register `label` for `recipient` by redeeming `access_code`
    ///
    /// On success the events are `NameRegistered` followed by
    /// `AccessCodeConsumed`.
    pub fn register_with_access_code(
        &mut self,
        ctx: &CallContext,
        label: &str,
        recipient: Address,
        access_code: &[u8],
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        // === VALIDATION PHASE ===
        if ctx.caller != recipient && !self.registrar.is_owner(ctx) {
            return Err(reject(RegistrarError::InvalidAccessCodeOrSender));
        }
        self.verify_access_code(&recipient, access_code)
            .map_err(reject)?;

        let digest = hash_blake3(access_code);
        if self.consumed.contains(&digest) {
            return Err(reject(RegistrarError::AccessCodeAlreadyConsumed));
        }

        let mut events = self
            .registrar
            .try_register(ctx, label, recipient)
            .map_err(reject)?;

        // === MUTATION PHASE ===
        self.consumed.insert(digest);
        info!(%recipient, label, group_id = self.group_id, "access code redeemed");

        events.push(RegistrarEvent::AccessCodeConsumed {
            group_id: self.group_id,
            access_code: access_code.to_vec(),
        });
        self.registrar.emit(&events);
        Ok(events)
    }

    /// Replace the trusted code signer; outstanding codes by the old signer
    /// stop verifying
    pub fn update_code_signer(
        &mut self,
        ctx: &CallContext,
        code_signer: Address,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.registrar.ensure_owner(ctx).map_err(reject)?;
        self.code_signer = code_signer;
        info!(%code_signer, "code signer updated");

        let events = vec![RegistrarEvent::CodeSignerUpdated { code_signer }];
        self.registrar.emit(&events);
        Ok(events)
    }

    /// Move to a new group epoch; codes issued for other epochs stop verifying
    pub fn update_group_id(
        &mut self,
        ctx: &CallContext,
        group_id: GroupId,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.registrar.ensure_owner(ctx).map_err(reject)?;
        self.group_id = group_id;
        info!(group_id, "group id updated");

        let events = vec![RegistrarEvent::GroupIdUpdated { group_id }];
        self.registrar.emit(&events);
        Ok(events)
    }

    // ========================================================================
    // Forwarded registrar operations
    // ========================================================================

    pub fn claim(
        &mut self,
        ctx: &CallContext,
        label: &str,
        recipient: Address,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.registrar.claim(ctx, label, recipient)
    }

    pub fn book(
        &mut self,
        ctx: &CallContext,
        label: &str,
        claimant: Address,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.registrar.book(ctx, label, claimant)
    }

    pub fn unbook(
        &mut self,
        ctx: &CallContext,
        label: &str,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.registrar.unbook(ctx, label)
    }

    pub fn update_max_emission_number(
        &mut self,
        ctx: &CallContext,
        max_emission_number: u64,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.registrar
            .update_max_emission_number(ctx, max_emission_number)
    }

    pub fn give_back_domain_ownership(
        &mut self,
        ctx: &CallContext,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.registrar.give_back_domain_ownership(ctx)
    }

    pub fn transfer_ownership(
        &mut self,
        ctx: &CallContext,
        new_owner: Address,
    ) -> RegistrarResult<Vec<RegistrarEvent>> {
        self.registrar.transfer_ownership(ctx, new_owner)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn registrar(&self) -> &SubdomainRegistrar<N> {
        &self.registrar
    }

    pub fn naming_mut(&mut self) -> &mut N {
        self.registrar.naming_mut()
    }

    pub fn code_signer(&self) -> Address {
        self.code_signer
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn domain(&self) -> &AccessCodeDomain {
        &self.domain
    }

    pub fn domain_separator(&self) -> [u8; 32] {
        self.domain_separator
    }

    /// Whether the code whose wire-form digest is `digest` was redeemed
    pub fn is_consumed(&self, digest: &[u8; 32]) -> bool {
        self.consumed.contains(digest)
    }

    pub fn events(&self) -> &[RegistrarEvent] {
        self.registrar.events()
    }

    fn verify_access_code(&self, recipient: &Address, access_code: &[u8]) -> RegistrarResult<()> {
        let signature = TypedSignature::from_bytes(access_code).map_err(|error| {
            debug!(%error, "malformed access code");
            RegistrarError::InvalidAccessCodeOrSender
        })?;

        let struct_hash = access_code_struct_hash(recipient, self.group_id);
        let signer = recover_signer(&self.domain_separator, &struct_hash, &signature)
            .map_err(|error| {
                debug!(%error, "access code signature rejected");
                RegistrarError::InvalidAccessCodeOrSender
            })?;

        if signer != self.code_signer {
            debug!(%signer, expected = %self.code_signer, "access code from unknown signer");
            return Err(RegistrarError::InvalidAccessCodeOrSender);
        }
        Ok(())
    }
}

fn reject(error: RegistrarError) -> RegistrarError {
    debug!(operation = "register_with_access_code", code = error.code(), "call rejected");
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::InMemoryNameRegistry;
    use crate::registrar::EngineConfig;
    use crate::types::namehash;
    use lib_crypto::KeyPair;

    fn addr(id: u8) -> Address {
        Address::new([id; 32])
    }

    fn gate(signer: &KeyPair) -> CodeAccessibleRegistrar<InMemoryNameRegistry> {
        let root_node = namehash("sismo.eth");
        let mut naming = InMemoryNameRegistry::new(addr(100));
        naming.delegate_root(root_node);
        let registrar = SubdomainRegistrar::new(
            naming,
            EngineConfig {
                root_node,
                registrar_address: addr(100),
                deployed_at: 0,
                reservation_duration: 0,
                max_emission_number: 0,
            },
            addr(200),
        );
        let domain = AccessCodeDomain {
            name: "SubdomainRegistrar".to_string(),
            version: "1.0".to_string(),
            chain_id: 1,
            verifying_contract: addr(100),
        };
        CodeAccessibleRegistrar::new(registrar, domain, signer.address(), 7)
    }

    #[test]
    fn test_garbage_code_is_invalid() {
        let signer = KeyPair::generate().unwrap();
        let mut gate = gate(&signer);
        let ctx = CallContext::new(addr(1), 10);

        let err = gate
            .register_with_access_code(&ctx, "first", addr(1), &[0xde, 0xad])
            .unwrap_err();
        assert_eq!(err, RegistrarError::InvalidAccessCodeOrSender);
    }

    #[test]
    fn test_consumed_digest_is_hash_of_wire_form() {
        let signer = KeyPair::generate().unwrap();
        let mut gate = gate(&signer);
        let code = gate.domain().issue(&signer, &addr(1), 7).unwrap();

        gate.register_with_access_code(&CallContext::new(addr(1), 10), "first", addr(1), &code)
            .unwrap();
        assert!(gate.is_consumed(&hash_blake3(&code)));
    }

    #[test]
    fn test_failed_inner_registration_keeps_code_redeemable() {
        let signer = KeyPair::generate().unwrap();
        let mut gate = gate(&signer);
        let admin = CallContext::new(addr(200), 10);
        gate.book(&admin, "first", addr(9)).unwrap();

        let code = gate.domain().issue(&signer, &addr(1), 7).unwrap();
        let ctx = CallContext::new(addr(1), 10);
        let err = gate
            .register_with_access_code(&ctx, "first", addr(1), &code)
            .unwrap_err();
        assert_eq!(err, RegistrarError::LabelBooked);
        assert!(!gate.is_consumed(&hash_blake3(&code)));

        assert!(gate
            .register_with_access_code(&ctx, "second", addr(1), &code)
            .is_ok());
    }

    #[test]
    fn test_admin_updates_require_owner() {
        let signer = KeyPair::generate().unwrap();
        let mut gate = gate(&signer);
        let stranger = CallContext::new(addr(1), 10);

        assert_eq!(
            gate.update_code_signer(&stranger, addr(3)),
            Err(RegistrarError::CallerNotOwner)
        );
        assert_eq!(
            gate.update_group_id(&stranger, 8),
            Err(RegistrarError::CallerNotOwner)
        );
        assert_eq!(gate.group_id(), 7);
        assert_eq!(gate.code_signer(), signer.address());
    }

    #[test]
    fn test_debug_includes_inner_registrar() {
        let signer = KeyPair::generate().unwrap();
        let gate = gate(&signer);
        let rendered = format!("{:?}", gate);
        assert!(rendered.starts_with("CodeAccessibleRegistrar"));
        assert!(rendered.contains("SubdomainRegistrar"));
        assert!(rendered.contains("group_id: 7"));
    }
}
