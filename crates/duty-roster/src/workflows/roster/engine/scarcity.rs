use chrono::NaiveDate;
use serde::Serialize;

use crate::workflows::roster::domain::DutyRole;
use crate::workflows::roster::snapshot::RosterSnapshot;

/// Staffing depth for one role across a generation window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoleScarcity {
    pub scarcity_score: f64,
    pub total_members: usize,
}

/// Score a role by how few members could ever fill it across the window.
///
/// `total_members` counts active flag holders who are not hard-opted-out
/// for the whole window. The score is the smoothed ratio of slots to
/// members, strictly decreasing in `total_members` and finite even when
/// nobody holds the flag.
pub fn calculate_role_scarcity(
    snapshot: &RosterSnapshot,
    operational_dates: &[NaiveDate],
    role: DutyRole,
) -> RoleScarcity {
    let total_members = snapshot
        .active_flag_holders(role)
        .filter(|member| {
            snapshot
                .preference(&member.id)
                .map_or(true, |pref| !pref.opted_out())
        })
        .count();

    let scarcity_score =
        (operational_dates.len() as f64 + 1.0) / (total_members as f64 + 1.0);

    RoleScarcity {
        scarcity_score,
        total_members,
    }
}
