use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::contracts::domain::{
    ContractId, ContractRecord, ContractStatus, ContractTemplate, UserId,
};

/// A row that deserialized cleanly but could not be mapped onto the domain.
#[derive(Debug)]
pub(crate) struct RowFailure {
    pub(crate) line: usize,
    pub(crate) reason: String,
}

pub(crate) enum ParseFailure {
    Csv(csv::Error),
    Row(RowFailure),
}

impl From<csv::Error> for ParseFailure {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ContractRecord>, ParseFailure> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<LedgerRow>().enumerate() {
        let row = row?;
        // header occupies line 1
        let line = index + 2;
        let record = row
            .into_record()
            .map_err(|reason| ParseFailure::Row(RowFailure { line, reason }))?;
        records.push(record);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct LedgerRow {
    contract_id: String,
    created_user_id: String,
    acceptee_user_id: String,
    status: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    contract_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    contract_topic: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    template_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    due_date: Option<String>,
}

impl LedgerRow {
    fn into_record(self) -> Result<ContractRecord, String> {
        if self.contract_id.is_empty() {
            return Err("contract_id is empty".to_string());
        }

        let status: ContractStatus = self.status.parse().map_err(|err| format!("{err}"))?;
        let template = self
            .template_type
            .as_deref()
            .map(str::parse::<ContractTemplate>)
            .transpose()
            .map_err(|err| format!("{err}"))?;
        let created_on = parse_optional_date("created_at", self.created_at.as_deref())?;
        let due_date = parse_optional_date("due_date", self.due_date.as_deref())?;

        Ok(ContractRecord {
            contract_id: ContractId(self.contract_id),
            creator_id: UserId(self.created_user_id),
            acceptee_id: UserId(self.acceptee_user_id),
            status,
            contract_name: self.contract_name,
            contract_topic: self.contract_topic,
            template,
            created_on,
            due_date,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_optional_date(column: &str, value: Option<&str>) -> Result<Option<NaiveDate>, String> {
    value
        .map(|raw| parse_date(raw).ok_or_else(|| format!("{column} '{raw}' is not a date")))
        .transpose()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    // Supabase exports timestamps without an offset.
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}
