use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{DutyRole, MemberId, RosterEntry};
use super::engine::{calculate_role_scarcity, RoleScarcity};
use super::snapshot::RosterSnapshot;

/// Staffing-risk banding derived from a role's scarcity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffingRisk {
    Comfortable,
    Tight,
    Critical,
}

impl StaffingRisk {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Comfortable => "Comfortable",
            Self::Tight => "Tight",
            Self::Critical => "Critical",
        }
    }

    pub fn from_scarcity(scarcity: &RoleScarcity) -> Self {
        if scarcity.total_members == 0 || scarcity.scarcity_score >= 4.0 {
            Self::Critical
        } else if scarcity.scarcity_score >= 2.0 {
            Self::Tight
        } else {
            Self::Comfortable
        }
    }
}

/// Per-role fill outcome with the staffing-risk indicator shown in the UI.
#[derive(Debug, Clone, Serialize)]
pub struct RoleFillEntry {
    pub role: DutyRole,
    pub role_label: &'static str,
    pub requested: usize,
    pub filled: usize,
    pub unfilled: usize,
    pub total_members: usize,
    pub scarcity_score: f64,
    pub risk: StaffingRisk,
    pub risk_label: &'static str,
}

/// How many assignments one member picked up across the generated month.
#[derive(Debug, Clone, Serialize)]
pub struct MemberLoadEntry {
    pub member: MemberId,
    pub display_name: String,
    pub assignments: usize,
}

/// Rollup of one generated roster for editing and review surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct RosterSummary {
    pub total_slots: usize,
    pub filled_slots: usize,
    pub open_slots: usize,
    pub role_fill: Vec<RoleFillEntry>,
    pub member_load: Vec<MemberLoadEntry>,
}

impl RosterSummary {
    pub fn from_entries(snapshot: &RosterSnapshot, entries: &[RosterEntry]) -> Self {
        let dates: Vec<NaiveDate> = entries.iter().map(|entry| entry.date).collect();

        let roles: BTreeSet<DutyRole> = entries
            .iter()
            .flat_map(|entry| entry.slots.keys().copied())
            .collect();

        let mut total_slots = 0;
        let mut filled_slots = 0;
        let mut load: BTreeMap<MemberId, usize> = BTreeMap::new();
        let mut role_fill = Vec::with_capacity(roles.len());

        for role in roles {
            let mut requested = 0;
            let mut filled = 0;
            for entry in entries {
                if let Some(slot) = entry.slots.get(&role) {
                    requested += 1;
                    if let Some(member) = slot {
                        filled += 1;
                        *load.entry(member.clone()).or_insert(0) += 1;
                    }
                }
            }

            total_slots += requested;
            filled_slots += filled;

            let scarcity = calculate_role_scarcity(snapshot, &dates, role);
            let risk = StaffingRisk::from_scarcity(&scarcity);
            role_fill.push(RoleFillEntry {
                role,
                role_label: role.label(),
                requested,
                filled,
                unfilled: requested - filled,
                total_members: scarcity.total_members,
                scarcity_score: scarcity.scarcity_score,
                risk,
                risk_label: risk.label(),
            });
        }

        let mut member_load: Vec<MemberLoadEntry> = load
            .into_iter()
            .map(|(member, assignments)| {
                let display_name = snapshot
                    .members
                    .iter()
                    .find(|candidate| candidate.id == member)
                    .map(|candidate| candidate.display_name.clone())
                    .unwrap_or_else(|| member.0.clone());
                MemberLoadEntry {
                    member,
                    display_name,
                    assignments,
                }
            })
            .collect();
        member_load.sort_by(|a, b| b.assignments.cmp(&a.assignments).then(a.member.cmp(&b.member)));

        Self {
            total_slots,
            filled_slots,
            open_slots: total_slots - filled_slots,
            role_fill,
            member_load,
        }
    }
}
