//! Contract ledger statistics and trust scoring.
//!
//! A user's trust score is derived from the outcomes of every contract they
//! created or accepted. Scores are recomputed on demand and never stored.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;
pub mod stats;
pub mod trust;

#[cfg(test)]
mod tests;

pub use domain::{
    ContractId, ContractRecord, ContractStatus, ContractTemplate, UnknownStatus, UnknownTemplate,
    UserId,
};
pub use import::{ContractImportError, ContractLedgerImporter};
pub use repository::{ContractRepository, RepositoryError};
pub use router::trust_router;
pub use service::{TrustProfile, TrustService, TrustServiceError};
pub use stats::{ContractStats, StatsInput, StatsValidationError};
pub use trust::{
    calculate_trust_score, format_trust_score, TierColors, TrustAssessment, TrustBadge,
    TrustModel, TrustScore, TrustTier,
};
