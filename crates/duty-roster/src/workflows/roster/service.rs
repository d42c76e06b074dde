use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::info;

use super::calendar::OperationalCalendar;
use super::diagnostics::{diagnose_empty_slot, SlotDiagnostics};
use super::domain::{DutyRole, MemberId, PreferenceError, RosterEntry};
use super::engine::{calculate_role_scarcity, RoleScarcity, RosterEngine, RosterError, SchedulingPolicy};
use super::report::RosterSummary;
use super::repository::{AssignmentLedger, DirectoryError, LedgerError, MemberDirectory};
use super::snapshot::RosterSnapshot;

/// Service composing the member directory, the assignment ledger, and the
/// generation engine behind one entry point.
pub struct RosterService<D, L> {
    directory: Arc<D>,
    ledger: Arc<L>,
    policy: SchedulingPolicy,
}

/// Generation result handed to the staging/draft workflow.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedRoster {
    pub year: i32,
    pub month: u32,
    pub entries: Vec<RosterEntry>,
    pub summary: RosterSummary,
}

impl<D, L> RosterService<D, L>
where
    D: MemberDirectory + 'static,
    L: AssignmentLedger + 'static,
{
    pub fn new(directory: Arc<D>, ledger: Arc<L>, policy: SchedulingPolicy) -> Self {
        Self {
            directory,
            ledger,
            policy,
        }
    }

    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    /// Generate a best-effort roster for one month. Omitted roles default
    /// to all four schedulable roles.
    pub fn generate(
        &self,
        year: i32,
        month: u32,
        roles: Option<Vec<DutyRole>>,
    ) -> Result<GeneratedRoster, RosterServiceError> {
        let roles = roles.unwrap_or_else(|| DutyRole::ordered().to_vec());
        let snapshot = self.load_snapshot(year, month)?;

        let engine = RosterEngine::new(snapshot, self.policy.clone());
        let entries = engine.generate(year, month, &roles)?;
        let summary = RosterSummary::from_entries(engine.snapshot(), &entries);

        info!(
            year,
            month,
            filled = summary.filled_slots,
            open = summary.open_slots,
            "duty roster generated"
        );

        Ok(GeneratedRoster {
            year,
            month,
            entries,
            summary,
        })
    }

    /// Staffing-risk indicator for one role, without running a generation.
    pub fn role_scarcity(
        &self,
        year: i32,
        month: u32,
        role: DutyRole,
    ) -> Result<RoleScarcity, RosterServiceError> {
        let snapshot = self.load_snapshot(year, month)?;
        let calendar = OperationalCalendar::new(self.policy.season);
        let dates = calendar
            .operational_dates(year, month)
            .map_err(RosterError::from)?;
        Ok(calculate_role_scarcity(&snapshot, &dates, role))
    }

    /// Re-diagnose a slot a manager manually cleared, without rerunning
    /// the whole month.
    pub fn diagnose(
        &self,
        role: DutyRole,
        date: NaiveDate,
        assigned_today: &BTreeMap<DutyRole, MemberId>,
        last_assigned: Option<&BTreeMap<DutyRole, MemberId>>,
    ) -> Result<SlotDiagnostics, RosterServiceError> {
        let snapshot = self.load_snapshot(date.year(), date.month())?;
        Ok(diagnose_empty_slot(
            role,
            date,
            &snapshot,
            &self.policy,
            &snapshot.committed_counts,
            assigned_today,
            last_assigned,
        ))
    }

    fn load_snapshot(&self, year: i32, month: u32) -> Result<RosterSnapshot, RosterServiceError> {
        let snapshot = RosterSnapshot {
            members: self.directory.active_members()?,
            preferences: self.directory.preferences()?,
            blackouts: self.directory.blackouts()?,
            pairings: self.directory.pairings()?,
            avoidances: self.directory.avoidances()?,
            committed_counts: self.ledger.committed_counts(year, month)?,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}

/// Error raised by the roster service.
#[derive(Debug, thiserror::Error)]
pub enum RosterServiceError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Preference(#[from] PreferenceError),
    #[error(transparent)]
    Roster(#[from] RosterError),
}
