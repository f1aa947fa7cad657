//! Naming collaborator interface.
//!
//! The registrar never stores name resolution itself. It consults an
//! external naming system for reference-namespace ownership and asks it to
//! bind allocated labels. Calls are synchronous and part of the caller's
//! unit of work: a failed binding aborts the whole registrar operation.

use std::collections::HashMap;

use lib_types::{Address, NameNode};

use crate::errors::NamingError;
use crate::types::label_node;

pub trait NamingCollaborator {
    /// Owner of the same-named label in the reference namespace, if any
    fn reference_owner(&self, label: &str) -> Result<Option<Address>, NamingError>;

    /// Record `label` under `root` as owned by and resolving to `holder`
    fn bind_label(&mut self, root: &NameNode, label: &str, holder: Address)
        -> Result<(), NamingError>;

    /// Hand ownership of `root` itself to `new_owner`
    fn transfer_root(&mut self, root: &NameNode, new_owner: Address) -> Result<(), NamingError>;
}

/// In-memory naming system used by tests and local tooling.
///
/// Writes under a root only succeed while that root is owned by the
/// registrar address this instance was created for.
#[derive(Debug, Clone)]
pub struct InMemoryNameRegistry {
    registrar: Address,
    reference_owners: HashMap<String, Address>,
    root_owners: HashMap<NameNode, Address>,
    bindings: HashMap<NameNode, Address>,
    reference_available: bool,
    pending_failure: Option<NamingError>,
}

impl InMemoryNameRegistry {
    pub fn new(registrar: Address) -> Self {
        Self {
            registrar,
            reference_owners: HashMap::new(),
            root_owners: HashMap::new(),
            bindings: HashMap::new(),
            reference_available: true,
            pending_failure: None,
        }
    }

    /// Delegate `root` to the registrar this collaborator serves
    pub fn delegate_root(&mut self, root: NameNode) {
        self.root_owners.insert(root, self.registrar);
    }

    pub fn set_reference_owner(&mut self, label: &str, owner: Address) {
        self.reference_owners.insert(label.to_string(), owner);
    }

    /// Simulate a missing reference namespace
    pub fn set_reference_available(&mut self, available: bool) {
        self.reference_available = available;
    }

    /// Make the next `bind_label` or `transfer_root` call fail with `error`
    pub fn fail_next_write(&mut self, error: NamingError) {
        self.pending_failure = Some(error);
    }

    pub fn root_owner(&self, root: &NameNode) -> Option<Address> {
        self.root_owners.get(root).copied()
    }

    /// Address a child node resolves to
    pub fn resolve(&self, node: &NameNode) -> Option<Address> {
        self.bindings.get(node).copied()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    fn check_write(&mut self, root: &NameNode) -> Result<(), NamingError> {
        if let Some(error) = self.pending_failure.take() {
            return Err(error);
        }
        if self.root_owners.get(root) != Some(&self.registrar) {
            return Err(NamingError::RootNotDelegated { root: *root });
        }
        Ok(())
    }
}

impl NamingCollaborator for InMemoryNameRegistry {
    fn reference_owner(&self, label: &str) -> Result<Option<Address>, NamingError> {
        if !self.reference_available {
            return Err(NamingError::Unavailable {
                reason: "reference namespace not deployed".to_string(),
            });
        }
        Ok(self.reference_owners.get(label).copied())
    }

    fn bind_label(
        &mut self,
        root: &NameNode,
        label: &str,
        holder: Address,
    ) -> Result<(), NamingError> {
        self.check_write(root)?;
        self.bindings.insert(label_node(root, label), holder);
        Ok(())
    }

    fn transfer_root(&mut self, root: &NameNode, new_owner: Address) -> Result<(), NamingError> {
        self.check_write(root)?;
        self.root_owners.insert(*root, new_owner);
        Ok(())
    }
}
