use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::domain::{DutyRole, ExclusionReason, MemberId};
use super::engine::{PreferredDayPolicy, SchedulingPolicy};
use super::snapshot::RosterSnapshot;

/// Categorized explanation for a slot that was left empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotDiagnostics {
    pub reasons: BTreeMap<ExclusionReason, Vec<MemberId>>,
    pub summary: String,
}

/// Explain why nobody could fill `role` on `date`.
///
/// Unlike the hot-path filter this walks the full pool of active flag
/// holders and tests every constraint independently, so one member can land
/// in several buckets. The result feeds the roster-editing UI and has no
/// effect on the assignment already made.
pub fn diagnose_empty_slot(
    role: DutyRole,
    date: NaiveDate,
    snapshot: &RosterSnapshot,
    policy: &SchedulingPolicy,
    monthly_counts: &HashMap<MemberId, u32>,
    assigned_today: &BTreeMap<DutyRole, MemberId>,
    last_assigned: Option<&BTreeMap<DutyRole, MemberId>>,
) -> SlotDiagnostics {
    let mut reasons: BTreeMap<ExclusionReason, Vec<MemberId>> = BTreeMap::new();
    let mut pool = 0usize;
    let mut eligible = 0usize;

    for member in snapshot.active_flag_holders(role) {
        pool += 1;
        let mut excluded = false;
        let mut record = |reason: ExclusionReason| {
            reasons.entry(reason).or_default().push(member.id.clone());
        };

        let preference = snapshot.preference(&member.id);

        if let Some(pref) = preference {
            if pref.dont_schedule {
                record(ExclusionReason::DontSchedule);
                excluded = true;
            }
            if pref.scheduling_suspended {
                record(ExclusionReason::SchedulingSuspended);
                excluded = true;
            }
            if policy.preferred_day_policy == PreferredDayPolicy::Hard {
                if let Some(day) = pref.preferred_day {
                    if !day.matches(date.weekday()) {
                        record(ExclusionReason::PreferredDayMismatch);
                        excluded = true;
                    }
                }
            }
        }

        if snapshot.is_blacked_out(&member.id, date) {
            record(ExclusionReason::Blackout);
            excluded = true;
        }

        if assigned_today
            .iter()
            .any(|(assigned_role, assigned)| *assigned_role != role && *assigned == member.id)
        {
            record(ExclusionReason::AlreadyAssignedToday);
            excluded = true;
        }

        if let Some(last) = last_assigned {
            let weekend_double = preference.map_or(false, |pref| pref.allow_weekend_double);
            if !weekend_double && last.get(&role) == Some(&member.id) {
                record(ExclusionReason::AssignedYesterday);
                excluded = true;
            }
        }

        let cap = preference.map_or(policy.default_monthly_cap, |pref| {
            pref.monthly_cap(policy.default_monthly_cap)
        });
        if monthly_counts.get(&member.id).copied().unwrap_or(0) >= u32::from(cap) {
            record(ExclusionReason::MonthlyCapReached);
            excluded = true;
        }

        if assigned_today
            .values()
            .any(|other| snapshot.avoidance_between(&member.id, other))
        {
            record(ExclusionReason::AvoidanceConflict);
            excluded = true;
        }

        if !excluded {
            eligible += 1;
        }
    }

    let summary = summarize(role, pool, eligible, &reasons);
    SlotDiagnostics { reasons, summary }
}

fn summarize(
    role: DutyRole,
    pool: usize,
    eligible: usize,
    reasons: &BTreeMap<ExclusionReason, Vec<MemberId>>,
) -> String {
    if pool == 0 {
        return format!("no active members hold the {} flag", role.label());
    }

    let parts: Vec<String> = ExclusionReason::ordered()
        .into_iter()
        .filter_map(|reason| {
            reasons
                .get(&reason)
                .map(|members| format!("{} {}", members.len(), reason.label()))
        })
        .collect();

    if parts.is_empty() {
        format!("{eligible} of {pool} eligible")
    } else {
        format!("{eligible} of {pool} eligible: {}", parts.join(", "))
    }
}
