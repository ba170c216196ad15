mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::domain::ContractRecord;
use parser::ParseFailure;

#[derive(Debug)]
pub enum ContractImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: usize, reason: String },
}

impl std::fmt::Display for ContractImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractImportError::Io(err) => write!(f, "failed to read contract export: {}", err),
            ContractImportError::Csv(err) => write!(f, "invalid contract CSV data: {}", err),
            ContractImportError::Row { line, reason } => {
                write!(f, "contract export line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for ContractImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContractImportError::Io(err) => Some(err),
            ContractImportError::Csv(err) => Some(err),
            ContractImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for ContractImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ParseFailure> for ContractImportError {
    fn from(err: ParseFailure) -> Self {
        match err {
            ParseFailure::Csv(err) => Self::Csv(err),
            ParseFailure::Row(row) => Self::Row {
                line: row.line,
                reason: row.reason,
            },
        }
    }
}

/// Loads a contract ledger exported from the platform database.
pub struct ContractLedgerImporter;

impl ContractLedgerImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ContractRecord>, ContractImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse the export; the first row for a given contract id wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ContractRecord>, ContractImportError> {
        let mut seen = HashSet::new();
        let mut contracts = Vec::new();

        for record in parser::parse_records(reader)? {
            if !seen.insert(record.contract_id.clone()) {
                debug!(contract_id = %record.contract_id, "skipping duplicate contract row");
                continue;
            }
            contracts.push(record);
        }

        Ok(contracts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::domain::{ContractStatus, ContractTemplate};
    use chrono::NaiveDate;
    use std::io::Cursor;

    const HEADER: &str = "contract_id,created_user_id,acceptee_user_id,status,contract_name,contract_topic,template_type,created_at,due_date\n";

    #[test]
    fn parse_date_supports_timestamps_and_plain_dates() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date");
        assert_eq!(
            parser::parse_date_for_tests("2025-03-14T09:30:00Z"),
            Some(expected)
        );
        assert_eq!(
            parser::parse_date_for_tests("2025-03-14T09:30:00.123456"),
            Some(expected)
        );
        assert_eq!(parser::parse_date_for_tests("2025-03-14"), Some(expected));
        assert_eq!(parser::parse_date_for_tests("14/03/2025"), None);
    }

    #[test]
    fn optional_columns_may_be_blank_or_absent() {
        let csv = format!("{HEADER}c-1,alice,bob,Completed,,,,,\n");
        let contracts =
            ContractLedgerImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(contracts.len(), 1);
        assert!(contracts[0].contract_name.is_none());
        assert!(contracts[0].due_date.is_none());

        let minimal = "contract_id,created_user_id,acceptee_user_id,status\nc-2,alice,bob,Pending\n";
        let contracts =
            ContractLedgerImporter::from_reader(Cursor::new(minimal)).expect("import succeeds");
        assert_eq!(contracts[0].status, ContractStatus::Pending);
    }

    #[test]
    fn descriptive_columns_are_mapped() {
        let csv = format!(
            "{HEADER}c-9,alice,bob,Ongoing,Car loan,Myvi,vehicle_loan,2025-01-02T08:00:00Z,2025-02-01\n"
        );
        let contracts =
            ContractLedgerImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        let contract = &contracts[0];

        assert_eq!(contract.contract_name.as_deref(), Some("Car loan"));
        assert_eq!(contract.template, Some(ContractTemplate::VehicleLoan));
        assert_eq!(contract.created_on, NaiveDate::from_ymd_opt(2025, 1, 2));
        assert_eq!(contract.due_date, NaiveDate::from_ymd_opt(2025, 2, 1));
    }

    #[test]
    fn unknown_status_reports_the_line() {
        let csv = format!("{HEADER}c-1,alice,bob,Completed,,,,,\nc-2,alice,bob,completed,,,,,\n");
        let error = ContractLedgerImporter::from_reader(Cursor::new(csv))
            .expect_err("lowercase status rejected");

        match error {
            ContractImportError::Row { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("completed"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_contract_ids_keep_first_row() {
        let csv = format!("{HEADER}c-1,alice,bob,Completed,,,,,\nc-1,alice,bob,Breached,,,,,\n");
        let contracts =
            ContractLedgerImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(contracts.len(), 1);
        assert_eq!(contracts[0].status, ContractStatus::Completed);
    }

    #[test]
    fn missing_required_column_is_a_csv_error() {
        let csv = "contract_id,created_user_id,status\nc-1,alice,Pending\n";
        let error = ContractLedgerImporter::from_reader(Cursor::new(csv))
            .expect_err("acceptee column required");
        assert!(matches!(error, ContractImportError::Csv(_)));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = ContractLedgerImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");

        match error {
            ContractImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
