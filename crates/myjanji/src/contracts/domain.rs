use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a platform user acting as contract creator or acceptee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for persisted contracts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(pub String);

impl ContractId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status recorded against a contract.
///
/// Labels are matched exactly and case-sensitively; `Active` is a legacy
/// synonym for `Ongoing` that older records still carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    Pending,
    Ongoing,
    Completed,
    Expired,
    Breached,
    Active,
}

impl ContractStatus {
    pub const ALL: [ContractStatus; 6] = [
        ContractStatus::Pending,
        ContractStatus::Ongoing,
        ContractStatus::Completed,
        ContractStatus::Expired,
        ContractStatus::Breached,
        ContractStatus::Active,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ContractStatus::Pending => "Pending",
            ContractStatus::Ongoing => "Ongoing",
            ContractStatus::Completed => "Completed",
            ContractStatus::Expired => "Expired",
            ContractStatus::Breached => "Breached",
            ContractStatus::Active => "Active",
        }
    }

    pub const fn is_ongoing(self) -> bool {
        matches!(self, ContractStatus::Ongoing | ContractStatus::Active)
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contract status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ContractStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Contract templates offered by the form wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractTemplate {
    Loan,
    VehicleLoan,
    Freelance,
    Deposit,
    Rental,
    Service,
}

impl ContractTemplate {
    pub const fn label(self) -> &'static str {
        match self {
            ContractTemplate::Loan => "loan",
            ContractTemplate::VehicleLoan => "vehicle_loan",
            ContractTemplate::Freelance => "freelance",
            ContractTemplate::Deposit => "deposit",
            ContractTemplate::Rental => "rental",
            ContractTemplate::Service => "service",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contract template '{0}'")]
pub struct UnknownTemplate(pub String);

impl FromStr for ContractTemplate {
    type Err = UnknownTemplate;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value
            .trim()
            .to_ascii_lowercase()
            .replace(['-', ' '], "_");
        match normalized.as_str() {
            "loan" => Ok(ContractTemplate::Loan),
            "vehicle_loan" => Ok(ContractTemplate::VehicleLoan),
            "freelance" => Ok(ContractTemplate::Freelance),
            "deposit" => Ok(ContractTemplate::Deposit),
            "rental" => Ok(ContractTemplate::Rental),
            "service" => Ok(ContractTemplate::Service),
            _ => Err(UnknownTemplate(value.to_string())),
        }
    }
}

/// Contract as persisted by the platform; this crate only reads the status and parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub contract_id: ContractId,
    pub creator_id: UserId,
    pub acceptee_id: UserId,
    pub status: ContractStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<ContractTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl ContractRecord {
    pub fn new(
        contract_id: impl Into<String>,
        creator_id: impl Into<String>,
        acceptee_id: impl Into<String>,
        status: ContractStatus,
    ) -> Self {
        Self {
            contract_id: ContractId::new(contract_id),
            creator_id: UserId::new(creator_id),
            acceptee_id: UserId::new(acceptee_id),
            status,
            contract_name: None,
            contract_topic: None,
            template: None,
            created_on: None,
            due_date: None,
        }
    }

    /// True when `user` is a party to the contract, either side.
    pub fn involves(&self, user: &UserId) -> bool {
        self.creator_id == *user || self.acceptee_id == *user
    }
}
