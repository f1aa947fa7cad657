//! Subdomain Registrar
//!
//! Allocates child labels of a single root name under access-control rules:
//!
//! - **Reservation window**: for a fixed period after deployment, a label is
//!   pre-empted by whoever owns the same label in a reference namespace
//! - **One allocation per holder**: every holder except the administrator
//!   owns at most one subdomain
//! - **Emission cap**: an optional ceiling on the total number of allocations
//! - **Bookings**: administrator-assigned labels that only the designated
//!   claimant (or the administrator) can claim
//! - **Access codes**: an optional gate that admits registrations only with a
//!   single-use, epoch-bound voucher signed by a trusted code signer
//!
//! # Architecture
//!
//! ```text
//! caller --> CodeAccessibleRegistrar (optional) --> SubdomainRegistrar
//!                                                     |-- LabelBooker
//!                                                     |-- AllocationRecordStore
//!                                                     '-- NamingCollaborator (external)
//! ```
//!
//! Every entry point is an all-or-nothing unit of work: it either commits
//! all of its state changes and events, or fails with a [`RegistrarError`]
//! and leaves state untouched.

pub mod access_code;
pub mod booking;
pub mod code_accessible;
pub mod config;
pub mod errors;
pub mod events;
pub mod naming;
pub mod record_store;
pub mod registrar;
pub mod types;

pub use access_code::{access_code_struct_hash, weekly_group_id, AccessCodeDomain, SECONDS_PER_WEEK};
pub use booking::{Booking, LabelBooker};
pub use code_accessible::CodeAccessibleRegistrar;
pub use config::{AccessCodeConfig, ConfigError, RegistrarConfig};
pub use errors::{NamingError, RegistrarError, RegistrarResult};
pub use events::RegistrarEvent;
pub use naming::{InMemoryNameRegistry, NamingCollaborator};
pub use record_store::{AllocationRecord, AllocationRecordStore};
pub use registrar::{EngineConfig, SubdomainRegistrar};
pub use types::{label_node, labelhash, namehash, CallContext};

pub use lib_types::{Address, GroupId, NameNode, Timestamp};
