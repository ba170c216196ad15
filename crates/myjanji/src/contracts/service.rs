use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::domain::{ContractId, ContractRecord, ContractStatus, UserId};
use super::repository::{ContractRepository, RepositoryError};
use super::stats::{ContractStats, StatsInput, StatsValidationError};
use super::trust::{TrustAssessment, TrustModel};

/// Trust standing of a single user, ready for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustProfile {
    pub user_id: UserId,
    #[serde(flatten)]
    pub assessment: TrustAssessment,
}

/// Service composing the contract ledger with the trust model.
pub struct TrustService<R> {
    repository: Arc<R>,
    model: TrustModel,
}

impl<R> TrustService<R>
where
    R: ContractRepository + 'static,
{
    pub fn new(repository: Arc<R>, model: TrustModel) -> Self {
        Self { repository, model }
    }

    pub fn model(&self) -> &TrustModel {
        &self.model
    }

    /// Record a new contract in the ledger.
    pub fn register(&self, record: ContractRecord) -> Result<ContractRecord, TrustServiceError> {
        if record.contract_id.as_str().trim().is_empty() {
            return Err(TrustServiceError::InvalidRecord(
                "contract_id must not be empty".to_string(),
            ));
        }
        if record.creator_id.is_blank() || record.acceptee_id.is_blank() {
            return Err(TrustServiceError::InvalidRecord(
                "creator and acceptee must both be set".to_string(),
            ));
        }

        let stored = self.repository.insert(record)?;
        info!(
            contract_id = %stored.contract_id,
            status = %stored.status,
            "contract registered"
        );
        Ok(stored)
    }

    pub fn update_status(
        &self,
        contract_id: &ContractId,
        status: ContractStatus,
    ) -> Result<ContractRecord, TrustServiceError> {
        let updated = self.repository.update_status(contract_id, status)?;
        info!(%contract_id, %status, "contract status updated");
        Ok(updated)
    }

    pub fn get(&self, contract_id: &ContractId) -> Result<ContractRecord, TrustServiceError> {
        let record = self
            .repository
            .fetch(contract_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Compute the user's trust profile from their current contracts.
    pub fn profile(&self, user_id: &UserId) -> Result<TrustProfile, TrustServiceError> {
        let contracts = if user_id.is_blank() {
            Vec::new()
        } else {
            self.repository.involving(user_id)?
        };

        let stats = ContractStats::collect(&contracts, Some(user_id));
        let assessment = self.model.assess(stats);
        debug!(
            %user_id,
            total = stats.total,
            score = assessment.score.value(),
            "trust profile computed"
        );

        Ok(TrustProfile {
            user_id: user_id.clone(),
            assessment,
        })
    }

    /// Score caller-supplied stats after validating them.
    pub fn assess(&self, input: StatsInput) -> Result<TrustAssessment, TrustServiceError> {
        let stats = ContractStats::try_from(input)?;
        Ok(self.model.assess(stats))
    }
}

/// Error raised by the trust service.
#[derive(Debug, thiserror::Error)]
pub enum TrustServiceError {
    #[error("invalid contract: {0}")]
    InvalidRecord(String),
    #[error(transparent)]
    Validation(#[from] StatsValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
