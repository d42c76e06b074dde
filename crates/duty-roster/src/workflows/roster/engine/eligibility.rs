use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};

use super::config::{PreferredDayPolicy, SchedulingPolicy};
use crate::workflows::roster::domain::{DutyRole, Member, MemberId};
use crate::workflows::roster::snapshot::RosterSnapshot;

/// Everything the hot-path filter needs to judge one member for one slot.
pub struct EligibilityContext<'a> {
    pub snapshot: &'a RosterSnapshot,
    pub policy: &'a SchedulingPolicy,
    /// Running assignment counts for the month, committed plus this run.
    pub monthly_counts: &'a HashMap<MemberId, u32>,
    /// Roles already filled on the date being processed.
    pub assigned_today: &'a BTreeMap<DutyRole, MemberId>,
    /// Assignments of the immediately preceding operational date.
    pub last_assigned: &'a BTreeMap<DutyRole, MemberId>,
}

/// Fast pass/fail filter over every hard constraint. Records nothing about
/// which check failed; explaining exclusions is the diagnostics module's
/// concern.
pub fn is_eligible(
    member: &Member,
    role: DutyRole,
    date: NaiveDate,
    ctx: &EligibilityContext<'_>,
) -> bool {
    if !member.roles.holds(role) || !member.is_active() {
        return false;
    }

    if ctx.snapshot.is_blacked_out(&member.id, date) {
        return false;
    }

    let preference = ctx.snapshot.preference(&member.id);

    // A member without a preference record is eligible by default; only
    // record-borne opt-outs and the preferred-day filter depend on one.
    if let Some(pref) = preference {
        if pref.opted_out() {
            return false;
        }

        if ctx.policy.preferred_day_policy == PreferredDayPolicy::Hard {
            if let Some(day) = pref.preferred_day {
                if !day.matches(date.weekday()) {
                    return false;
                }
            }
        }
    }

    // No dual-role duty on the same date.
    if ctx
        .assigned_today
        .iter()
        .any(|(assigned_role, assigned)| *assigned_role != role && *assigned == member.id)
    {
        return false;
    }

    // No back-to-back same-role duty unless the member opted into it.
    let weekend_double = preference.map_or(false, |pref| pref.allow_weekend_double);
    if !weekend_double && ctx.last_assigned.get(&role) == Some(&member.id) {
        return false;
    }

    let cap = preference.map_or(ctx.policy.default_monthly_cap, |pref| {
        pref.monthly_cap(ctx.policy.default_monthly_cap)
    });
    let count = ctx.monthly_counts.get(&member.id).copied().unwrap_or(0);
    if count >= u32::from(cap) {
        return false;
    }

    // Avoidance edges bind in either direction against anyone already on
    // duty today.
    if ctx
        .assigned_today
        .values()
        .any(|other| ctx.snapshot.avoidance_between(&member.id, other))
    {
        return false;
    }

    true
}
