#![allow(dead_code)]

use lib_crypto::KeyPair;
use lib_registrar::{
    namehash, AccessCodeDomain, Address, CallContext, CodeAccessibleRegistrar, EngineConfig,
    GroupId, InMemoryNameRegistry, SubdomainRegistrar, Timestamp,
};

pub const ROOT_NAME: &str = "sismo.eth";
pub const DEPLOYED_AT: Timestamp = 1_650_000_000;
pub const RESERVATION: u64 = 604_800;

pub fn addr(id: u8) -> Address {
    Address::new([id; 32])
}

pub fn admin() -> Address {
    addr(0xad)
}

pub fn registrar_address() -> Address {
    addr(0xee)
}

pub fn during_window(caller: Address) -> CallContext {
    CallContext::new(caller, DEPLOYED_AT + 10)
}

pub fn after_window(caller: Address) -> CallContext {
    CallContext::new(caller, DEPLOYED_AT + RESERVATION)
}

/// Naming system with the root already delegated to the registrar
pub fn naming() -> InMemoryNameRegistry {
    let mut naming = InMemoryNameRegistry::new(registrar_address());
    naming.delegate_root(namehash(ROOT_NAME));
    naming
}

pub fn engine_config(max_emission_number: u64) -> EngineConfig {
    EngineConfig {
        root_node: namehash(ROOT_NAME),
        registrar_address: registrar_address(),
        deployed_at: DEPLOYED_AT,
        reservation_duration: RESERVATION,
        max_emission_number,
    }
}

pub fn registrar() -> SubdomainRegistrar<InMemoryNameRegistry> {
    SubdomainRegistrar::new(naming(), engine_config(0), admin())
}

pub fn domain() -> AccessCodeDomain {
    AccessCodeDomain {
        name: "SubdomainRegistrar".to_string(),
        version: "1.0".to_string(),
        chain_id: 1,
        verifying_contract: registrar_address(),
    }
}

pub fn gate(signer: &KeyPair, group_id: GroupId) -> CodeAccessibleRegistrar<InMemoryNameRegistry> {
    CodeAccessibleRegistrar::new(registrar(), domain(), signer.address(), group_id)
}
