use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use super::domain::{DutyPreference, Member, MemberId};

/// Read-only view of the member register and its scheduling records, so
/// the service module can be exercised against in-memory fakes.
pub trait MemberDirectory: Send + Sync {
    fn active_members(&self) -> Result<Vec<Member>, DirectoryError>;
    fn preferences(&self) -> Result<HashMap<MemberId, DutyPreference>, DirectoryError>;
    fn blackouts(&self) -> Result<HashSet<(MemberId, NaiveDate)>, DirectoryError>;
    fn pairings(&self) -> Result<HashMap<MemberId, MemberId>, DirectoryError>;
    fn avoidances(&self) -> Result<HashSet<(MemberId, MemberId)>, DirectoryError>;
}

/// Error enumeration for member-directory failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("member directory unavailable: {0}")]
    Unavailable(String),
}

/// Source of assignment counts already committed by prior, published runs
/// of the same month, used to enforce monthly caps across runs.
pub trait AssignmentLedger: Send + Sync {
    fn committed_counts(
        &self,
        year: i32,
        month: u32,
    ) -> Result<HashMap<MemberId, u32>, LedgerError>;
}

/// Error enumeration for ledger failures.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("assignment ledger unavailable: {0}")]
    Unavailable(String),
}
