use super::domain::{ContractId, ContractRecord, ContractStatus, UserId};

/// Storage abstraction over the contract ledger so the service can be exercised in isolation.
pub trait ContractRepository: Send + Sync {
    fn insert(&self, record: ContractRecord) -> Result<ContractRecord, RepositoryError>;
    fn update_status(
        &self,
        id: &ContractId,
        status: ContractStatus,
    ) -> Result<ContractRecord, RepositoryError>;
    fn fetch(&self, id: &ContractId) -> Result<Option<ContractRecord>, RepositoryError>;
    /// Contracts where `user` is creator or acceptee.
    fn involving(&self, user: &UserId) -> Result<Vec<ContractRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("contract already exists")]
    Conflict,
    #[error("contract not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
