//! Registrar rejections.
//!
//! Every rejection carries a stable identifier, returned by
//! [`RegistrarError::code`]. Integrators match on these identifiers
//! literally, so they must never change. The `Display` form prefixes the
//! identifier with the contract that raised it.

use lib_types::NameNode;
use thiserror::Error;

// ============================================================================
// Naming Collaborator Errors
// ============================================================================

/// Failures reported by the external naming collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// The registrar does not control the root it is trying to write under
    #[error("root {root} is not delegated to the registrar")]
    RootNotDelegated { root: NameNode },

    /// The collaborator could not be reached or is not deployed
    #[error("naming collaborator unavailable: {reason}")]
    Unavailable { reason: String },

    /// The collaborator refused the write
    #[error("naming collaborator rejected the call: {reason}")]
    Rejected { reason: String },
}

// ============================================================================
// Registrar Errors
// ============================================================================

/// Errors that can occur during registrar operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrarError {
    /// Label is pre-empted by a different owner in the reference namespace
    #[error("SUBDOMAIN_REGISTRAR: SUBDOMAIN_RESERVED")]
    SubdomainReserved,

    /// Label already has an allocation record
    #[error("SUBDOMAIN_REGISTRAR: SUBDOMAIN_ALREADY_REGISTERED")]
    AlreadyAllocated,

    /// Holder already owns a subdomain
    #[error("SUBDOMAIN_REGISTRAR: TOO_MANY_SUBDOMAINS")]
    TooManyAllocations,

    /// Label has an outstanding booking and can only be claimed
    #[error("SUBDOMAIN_REGISTRAR: LABEL_BOOKED")]
    LabelBooked,

    /// Label has no booking to claim
    #[error("SUBDOMAIN_REGISTRAR: LABEL_NOT_BOOKED")]
    LabelNotBooked,

    /// Caller is neither the claimant nor the administrator
    #[error("SUBDOMAIN_REGISTRAR: SENDER_NOT_ALLOWED")]
    SenderNotAllowed,

    /// Emission cap has been reached
    #[error("SUBDOMAIN_REGISTRAR: TOO_MANY_EMISSION")]
    EmissionCapReached,

    /// New emission cap is below the number of existing allocations
    #[error("SUBDOMAIN_REGISTRAR: NEW_MAX_EMISSION_TOO_LOW")]
    MaxEmissionTooLow,

    /// Bookings cannot name the zero address as claimant
    #[error("SUBDOMAIN_REGISTRAR: INVALID_CLAIMANT")]
    InvalidClaimant,

    /// Allocations cannot be issued to the zero address
    #[error("SUBDOMAIN_REGISTRAR: INVALID_RECIPIENT")]
    InvalidRecipient,

    /// Access code does not verify, or caller may not redeem it
    #[error("SUBDOMAIN_REGISTRAR_CODE_ACCESSIBLE: INVALID_ACCESS_CODE_OR_INVALID_SENDER")]
    InvalidAccessCodeOrSender,

    /// Access code has already been redeemed
    #[error("SUBDOMAIN_REGISTRAR_CODE_ACCESSIBLE: ACCESS_CODE_ALREADY_CONSUMED")]
    AccessCodeAlreadyConsumed,

    /// Administrator-only operation called by someone else
    #[error("Ownable: caller is not the owner")]
    CallerNotOwner,

    /// Administrator role cannot be handed to the zero address
    #[error("Ownable: new owner is the zero address")]
    NewOwnerIsZero,

    /// The naming collaborator failed; the whole call was aborted
    #[error("naming collaborator call failed: {0}")]
    Naming(#[from] NamingError),
}

impl RegistrarError {
    /// Stable identifier of this rejection
    pub fn code(&self) -> &'static str {
        match self {
            RegistrarError::SubdomainReserved => "SUBDOMAIN_RESERVED",
            RegistrarError::AlreadyAllocated => "SUBDOMAIN_ALREADY_REGISTERED",
            RegistrarError::TooManyAllocations => "TOO_MANY_SUBDOMAINS",
            RegistrarError::LabelBooked => "LABEL_BOOKED",
            RegistrarError::LabelNotBooked => "LABEL_NOT_BOOKED",
            RegistrarError::SenderNotAllowed => "SENDER_NOT_ALLOWED",
            RegistrarError::EmissionCapReached => "TOO_MANY_EMISSION",
            RegistrarError::MaxEmissionTooLow => "NEW_MAX_EMISSION_TOO_LOW",
            RegistrarError::InvalidClaimant => "INVALID_CLAIMANT",
            RegistrarError::InvalidRecipient => "INVALID_RECIPIENT",
            RegistrarError::InvalidAccessCodeOrSender => "INVALID_ACCESS_CODE_OR_INVALID_SENDER",
            RegistrarError::AccessCodeAlreadyConsumed => "ACCESS_CODE_ALREADY_CONSUMED",
            RegistrarError::CallerNotOwner => "CALLER_NOT_OWNER",
            RegistrarError::NewOwnerIsZero => "NEW_OWNER_IS_ZERO_ADDRESS",
            RegistrarError::Naming(_) => "NAMING_CALL_FAILED",
        }
    }
}

/// Result type for registrar operations
pub type RegistrarResult<T> = Result<T, RegistrarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_contract_prefix() {
        assert_eq!(
            RegistrarError::SubdomainReserved.to_string(),
            "SUBDOMAIN_REGISTRAR: SUBDOMAIN_RESERVED"
        );
        assert_eq!(
            RegistrarError::AccessCodeAlreadyConsumed.to_string(),
            "SUBDOMAIN_REGISTRAR_CODE_ACCESSIBLE: ACCESS_CODE_ALREADY_CONSUMED"
        );
        assert_eq!(
            RegistrarError::CallerNotOwner.to_string(),
            "Ownable: caller is not the owner"
        );
    }

    #[test]
    fn test_display_ends_with_code_for_policy_rejections() {
        let policy = [
            RegistrarError::SubdomainReserved,
            RegistrarError::AlreadyAllocated,
            RegistrarError::TooManyAllocations,
            RegistrarError::LabelBooked,
            RegistrarError::LabelNotBooked,
            RegistrarError::SenderNotAllowed,
            RegistrarError::EmissionCapReached,
            RegistrarError::MaxEmissionTooLow,
            RegistrarError::InvalidRecipient,
            RegistrarError::InvalidAccessCodeOrSender,
            RegistrarError::AccessCodeAlreadyConsumed,
        ];
        for err in policy {
            assert!(err.to_string().ends_with(err.code()), "{}", err);
        }
    }

    #[test]
    fn test_naming_error_converts() {
        let err: RegistrarError = NamingError::Unavailable {
            reason: "offline".to_string(),
        }
        .into();
        assert_eq!(err.code(), "NAMING_CALL_FAILED");
        assert!(err.to_string().contains("offline"));
    }
}
