use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::contracts::domain::{ContractId, ContractRecord, ContractStatus, UserId};
use crate::contracts::repository::{ContractRepository, RepositoryError};
use crate::contracts::stats::ContractStats;
use crate::contracts::trust::TrustModel;
use crate::contracts::{trust_router, TrustService};

pub(super) fn stats(total: u32, completed: u32, expired: u32, breached: u32) -> ContractStats {
    ContractStats {
        total,
        completed,
        expired,
        breached,
        ..ContractStats::default()
    }
}

pub(super) fn contract(id: &str, creator: &str, acceptee: &str, status: ContractStatus) -> ContractRecord {
    ContractRecord::new(id, creator, acceptee, status)
}

/// Alice's ledger: three completed, one expired, plus contracts she is not party to.
pub(super) fn ledger() -> Vec<ContractRecord> {
    vec![
        contract("c-1", "alice", "bob", ContractStatus::Completed),
        contract("c-2", "carol", "alice", ContractStatus::Completed),
        contract("c-3", "alice", "dan", ContractStatus::Completed),
        contract("c-4", "erin", "alice", ContractStatus::Expired),
        contract("c-5", "bob", "carol", ContractStatus::Breached),
        contract("c-6", "carol", "dan", ContractStatus::Completed),
    ]
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<ContractId, ContractRecord>>>,
}

impl MemoryRepository {
    pub(super) fn seeded(records: Vec<ContractRecord>) -> Self {
        let repository = Self::default();
        for record in records {
            repository.insert(record).expect("seed record");
        }
        repository
    }
}

impl ContractRepository for MemoryRepository {
    fn insert(&self, record: ContractRecord) -> Result<ContractRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.contract_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.contract_id.clone(), record.clone());
        Ok(record)
    }

    fn update_status(
        &self,
        id: &ContractId,
        status: ContractStatus,
    ) -> Result<ContractRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        record.status = status;
        Ok(record.clone())
    }

    fn fetch(&self, id: &ContractId) -> Result<Option<ContractRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn involving(&self, user: &UserId) -> Result<Vec<ContractRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.involves(user))
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl ContractRepository for UnavailableRepository {
    fn insert(&self, _record: ContractRecord) -> Result<ContractRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_status(
        &self,
        _id: &ContractId,
        _status: ContractStatus,
    ) -> Result<ContractRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ContractId) -> Result<Option<ContractRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn involving(&self, _user: &UserId) -> Result<Vec<ContractRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (TrustService<MemoryRepository>, MemoryRepository) {
    let repository = MemoryRepository::seeded(ledger());
    let service = TrustService::new(Arc::new(repository.clone()), TrustModel::standard());
    (service, repository)
}

pub(super) fn router_with_service(service: TrustService<MemoryRepository>) -> axum::Router {
    trust_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
