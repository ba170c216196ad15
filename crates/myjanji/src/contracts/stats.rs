use serde::{Deserialize, Serialize};

use super::domain::{ContractRecord, ContractStatus, UserId};

/// Per-user contract outcome counts, recomputed on demand from the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractStats {
    pub total: u32,
    pub completed: u32,
    pub expired: u32,
    pub breached: u32,
    pub ongoing: u32,
    pub pending: u32,
}

impl ContractStats {
    /// Count the contracts where `subject` is creator or acceptee.
    ///
    /// A missing or blank subject yields all-zero stats.
    pub fn collect<'a, I>(contracts: I, subject: Option<&UserId>) -> Self
    where
        I: IntoIterator<Item = &'a ContractRecord>,
    {
        let mut stats = Self::default();
        let Some(subject) = subject.filter(|user| !user.is_blank()) else {
            return stats;
        };

        for contract in contracts
            .into_iter()
            .filter(|contract| contract.involves(subject))
        {
            stats.record(contract.status);
        }

        stats
    }

    fn record(&mut self, status: ContractStatus) {
        self.total += 1;
        match status {
            ContractStatus::Completed => self.completed += 1,
            ContractStatus::Expired => self.expired += 1,
            ContractStatus::Breached => self.breached += 1,
            ContractStatus::Pending => self.pending += 1,
            ContractStatus::Ongoing | ContractStatus::Active => self.ongoing += 1,
        }
    }
}

/// Untrusted stats as they arrive over HTTP or from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsInput {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub completed: i64,
    #[serde(default)]
    pub expired: i64,
    #[serde(default)]
    pub breached: i64,
    #[serde(default)]
    pub ongoing: i64,
    #[serde(default)]
    pub pending: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsValidationError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: i64 },
    #[error("{field} exceeds the supported maximum (got {value})")]
    TooLarge { field: &'static str, value: i64 },
}

impl TryFrom<StatsInput> for ContractStats {
    type Error = StatsValidationError;

    fn try_from(input: StatsInput) -> Result<Self, Self::Error> {
        Ok(Self {
            total: count("total", input.total)?,
            completed: count("completed", input.completed)?,
            expired: count("expired", input.expired)?,
            breached: count("breached", input.breached)?,
            ongoing: count("ongoing", input.ongoing)?,
            pending: count("pending", input.pending)?,
        })
    }
}

fn count(field: &'static str, value: i64) -> Result<u32, StatsValidationError> {
    if value < 0 {
        return Err(StatsValidationError::Negative { field, value });
    }
    u32::try_from(value).map_err(|_| StatsValidationError::TooLarge { field, value })
}
