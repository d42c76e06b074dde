use std::collections::{HashMap, HashSet};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use duty_roster::workflows::roster::{
    AssignmentLedger, DirectoryError, DutyPreference, DutyRole, LedgerError, Member,
    MemberDirectory, MemberId, RosterSnapshot,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Register-backed directory holding one snapshot, replaceable wholesale
/// when a fresh membership export is imported.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMemberDirectory {
    snapshot: Arc<Mutex<RosterSnapshot>>,
}

impl InMemoryMemberDirectory {
    pub(crate) fn with_snapshot(snapshot: RosterSnapshot) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(snapshot)),
        }
    }

    pub(crate) fn replace(&self, snapshot: RosterSnapshot) {
        *self.snapshot.lock().expect("directory mutex poisoned") = snapshot;
    }
}

impl MemberDirectory for InMemoryMemberDirectory {
    fn active_members(&self) -> Result<Vec<Member>, DirectoryError> {
        Ok(self
            .snapshot
            .lock()
            .expect("directory mutex poisoned")
            .members
            .clone())
    }

    fn preferences(&self) -> Result<HashMap<MemberId, DutyPreference>, DirectoryError> {
        Ok(self
            .snapshot
            .lock()
            .expect("directory mutex poisoned")
            .preferences
            .clone())
    }

    fn blackouts(&self) -> Result<HashSet<(MemberId, NaiveDate)>, DirectoryError> {
        Ok(self
            .snapshot
            .lock()
            .expect("directory mutex poisoned")
            .blackouts
            .clone())
    }

    fn pairings(&self) -> Result<HashMap<MemberId, MemberId>, DirectoryError> {
        Ok(self
            .snapshot
            .lock()
            .expect("directory mutex poisoned")
            .pairings
            .clone())
    }

    fn avoidances(&self) -> Result<HashSet<(MemberId, MemberId)>, DirectoryError> {
        Ok(self
            .snapshot
            .lock()
            .expect("directory mutex poisoned")
            .avoidances
            .clone())
    }
}

/// Committed-assignment counts from previously published rosters, keyed by
/// month.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAssignmentLedger {
    counts: Arc<Mutex<HashMap<(i32, u32), HashMap<MemberId, u32>>>>,
}

impl InMemoryAssignmentLedger {
    #[cfg(test)]
    pub(crate) fn seed(&self, year: i32, month: u32, counts: HashMap<MemberId, u32>) {
        self.counts
            .lock()
            .expect("ledger mutex poisoned")
            .insert((year, month), counts);
    }
}

impl AssignmentLedger for InMemoryAssignmentLedger {
    fn committed_counts(
        &self,
        year: i32,
        month: u32,
    ) -> Result<HashMap<MemberId, u32>, LedgerError> {
        Ok(self
            .counts
            .lock()
            .expect("ledger mutex poisoned")
            .get(&(year, month))
            .cloned()
            .unwrap_or_default())
    }
}

pub(crate) fn parse_role(value: &str) -> Result<DutyRole, String> {
    DutyRole::parse_key(value).ok_or_else(|| {
        format!(
            "unknown role '{value}'; expected one of duty_officer, assistant_duty_officer, instructor, tow_pilot"
        )
    })
}
