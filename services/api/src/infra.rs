use metrics_exporter_prometheus::PrometheusHandle;
use myjanji::contracts::{
    ContractId, ContractImportError, ContractLedgerImporter, ContractRecord, ContractRepository,
    ContractStatus, RepositoryError, UserId,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local ledger standing in for the platform database.
#[derive(Default, Clone)]
pub(crate) struct InMemoryContractRepository {
    records: Arc<Mutex<HashMap<ContractId, ContractRecord>>>,
}

impl InMemoryContractRepository {
    /// Load a contract export, skipping ids that are already present.
    pub(crate) fn seed_from_path(&self, path: &Path) -> Result<usize, ContractImportError> {
        let contracts = ContractLedgerImporter::from_path(path)?;
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let mut loaded = 0;
        for contract in contracts {
            if guard.contains_key(&contract.contract_id) {
                continue;
            }
            guard.insert(contract.contract_id.clone(), contract);
            loaded += 1;
        }
        info!(path = %path.display(), loaded, "contract ledger seeded");
        Ok(loaded)
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl ContractRepository for InMemoryContractRepository {
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
        match guard.get_mut(id) {
            Some(record) => {
                record.status = status;
                Ok(record.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ContractId) -> Result<Option<ContractRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn involving(&self, user: &UserId) -> Result<Vec<ContractRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut matches: Vec<ContractRecord> = guard
            .values()
            .filter(|record| record.involves(user))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.contract_id.cmp(&b.contract_id));
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_path() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../crates/myjanji/tests/fixtures/contracts.csv")
    }

    #[test]
    fn seeding_skips_existing_contracts() {
        let repository = InMemoryContractRepository::default();
        repository
            .insert(ContractRecord::new(
                "CT-1001",
                "u-aminah",
                "u-farid",
                ContractStatus::Breached,
            ))
            .expect("insert");

        let loaded = repository
            .seed_from_path(&fixture_path())
            .expect("fixture seeds");

        assert_eq!(loaded, 7);
        assert_eq!(repository.len(), 8);
        let kept = repository
            .fetch(&ContractId::new("CT-1001"))
            .expect("fetch")
            .expect("present");
        assert_eq!(kept.status, ContractStatus::Breached);
    }

    #[test]
    fn involving_returns_contracts_in_id_order() {
        let repository = InMemoryContractRepository::default();
        repository
            .seed_from_path(&fixture_path())
            .expect("fixture seeds");

        let ids: Vec<String> = repository
            .involving(&UserId::new("u-siva"))
            .expect("query")
            .into_iter()
            .map(|record| record.contract_id.0)
            .collect();
        assert_eq!(ids, vec!["CT-1005", "CT-1006", "CT-1007"]);
    }

    #[test]
    fn update_unknown_contract_is_not_found() {
        let repository = InMemoryContractRepository::default();
        let error = repository
            .update_status(&ContractId::new("missing"), ContractStatus::Completed)
            .expect_err("missing contract");
        assert!(matches!(error, RepositoryError::NotFound));
    }
}
