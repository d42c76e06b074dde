use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::workflows::roster::domain::{
    DutyPreference, DutyRole, Member, MemberId, MembershipStatus, RoleFlags,
};
use crate::workflows::roster::engine::{RosterEngine, SchedulingPolicy};
use crate::workflows::roster::repository::{
    AssignmentLedger, DirectoryError, LedgerError, MemberDirectory,
};
use crate::workflows::roster::service::RosterService;
use crate::workflows::roster::snapshot::RosterSnapshot;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

// June 2026: weekends fall on the 6/7, 13/14, 20/21, and 27/28.
pub(super) fn saturday() -> NaiveDate {
    date(2026, 6, 6)
}

pub(super) fn sunday() -> NaiveDate {
    date(2026, 6, 7)
}

pub(super) fn id(value: &str) -> MemberId {
    MemberId::new(value)
}

pub(super) fn member(member_id: &str, roles: &[DutyRole]) -> Member {
    let mut flags = RoleFlags::default();
    for role in roles {
        match role {
            DutyRole::DutyOfficer => flags.duty_officer = true,
            DutyRole::AssistantDutyOfficer => flags.assistant_duty_officer = true,
            DutyRole::Instructor => flags.instructor = true,
            DutyRole::TowPilot => flags.tow_pilot = true,
        }
    }

    Member {
        id: id(member_id),
        display_name: member_id.to_string(),
        status: MembershipStatus::Active,
        joined_on: date(2020, 1, 15),
        roles: flags,
    }
}

pub(super) fn snapshot(members: Vec<Member>) -> RosterSnapshot {
    RosterSnapshot {
        members,
        ..RosterSnapshot::default()
    }
}

pub(super) fn policy() -> SchedulingPolicy {
    SchedulingPolicy::default()
}

pub(super) fn engine(snapshot: RosterSnapshot) -> RosterEngine {
    RosterEngine::new(snapshot, policy())
}

pub(super) fn no_counts() -> HashMap<MemberId, u32> {
    HashMap::new()
}

pub(super) fn no_assignments() -> BTreeMap<DutyRole, MemberId> {
    BTreeMap::new()
}

/// Directory fake backed by a snapshot, so the service composes the same
/// inputs the engine sees.
#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    pub(super) snapshot: Arc<Mutex<RosterSnapshot>>,
}

impl MemoryDirectory {
    pub(super) fn with_snapshot(snapshot: RosterSnapshot) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(snapshot)),
        }
    }
}

impl MemberDirectory for MemoryDirectory {
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

#[derive(Default, Clone)]
pub(super) struct MemoryLedger {
    pub(super) counts: Arc<Mutex<HashMap<MemberId, u32>>>,
}

impl AssignmentLedger for MemoryLedger {
    fn committed_counts(
        &self,
        _year: i32,
        _month: u32,
    ) -> Result<HashMap<MemberId, u32>, LedgerError> {
        Ok(self
            .counts
            .lock()
            .expect("ledger mutex poisoned")
            .clone())
    }
}

pub(super) struct UnavailableDirectory;

impl MemberDirectory for UnavailableDirectory {
    fn active_members(&self) -> Result<Vec<Member>, DirectoryError> {
        Err(DirectoryError::Unavailable("register offline".to_string()))
    }

    fn preferences(&self) -> Result<HashMap<MemberId, DutyPreference>, DirectoryError> {
        Err(DirectoryError::Unavailable("register offline".to_string()))
    }

    fn blackouts(&self) -> Result<HashSet<(MemberId, NaiveDate)>, DirectoryError> {
        Err(DirectoryError::Unavailable("register offline".to_string()))
    }

    fn pairings(&self) -> Result<HashMap<MemberId, MemberId>, DirectoryError> {
        Err(DirectoryError::Unavailable("register offline".to_string()))
    }

    fn avoidances(&self) -> Result<HashSet<(MemberId, MemberId)>, DirectoryError> {
        Err(DirectoryError::Unavailable("register offline".to_string()))
    }
}

pub(super) fn build_service(
    snapshot: RosterSnapshot,
) -> RosterService<MemoryDirectory, MemoryLedger> {
    RosterService::new(
        Arc::new(MemoryDirectory::with_snapshot(snapshot)),
        Arc::new(MemoryLedger::default()),
        policy(),
    )
}
