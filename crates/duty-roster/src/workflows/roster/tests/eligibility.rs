use std::collections::BTreeMap;

use super::common::*;
use crate::workflows::roster::domain::{DutyPreference, DutyRole, MembershipStatus, PreferredDay};
use crate::workflows::roster::engine::{
    is_eligible, EligibilityContext, PreferredDayPolicy, SchedulingPolicy,
};

fn ctx<'a>(
    snapshot: &'a crate::workflows::roster::snapshot::RosterSnapshot,
    policy: &'a SchedulingPolicy,
    counts: &'a std::collections::HashMap<crate::workflows::roster::domain::MemberId, u32>,
    today: &'a BTreeMap<DutyRole, crate::workflows::roster::domain::MemberId>,
    last: &'a BTreeMap<DutyRole, crate::workflows::roster::domain::MemberId>,
) -> EligibilityContext<'a> {
    EligibilityContext {
        snapshot,
        policy,
        monthly_counts: counts,
        assigned_today: today,
        last_assigned: last,
    }
}

#[test]
fn member_without_preference_record_is_eligible_by_default() {
    let snap = snapshot(vec![member("m-1", &[DutyRole::Instructor])]);
    let policy = policy();
    let (counts, today, last) = (no_counts(), no_assignments(), no_assignments());

    assert!(is_eligible(
        &snap.members[0],
        DutyRole::Instructor,
        saturday(),
        &ctx(&snap, &policy, &counts, &today, &last),
    ));
}

#[test]
fn missing_role_flag_or_inactive_status_excludes() {
    let mut snap = snapshot(vec![
        member("m-1", &[DutyRole::TowPilot]),
        member("m-2", &[DutyRole::Instructor]),
    ]);
    snap.members[1].status = MembershipStatus::Inactive;
    let policy = policy();
    let (counts, today, last) = (no_counts(), no_assignments(), no_assignments());
    let ctx = ctx(&snap, &policy, &counts, &today, &last);

    assert!(!is_eligible(&snap.members[0], DutyRole::Instructor, saturday(), &ctx));
    assert!(!is_eligible(&snap.members[1], DutyRole::Instructor, saturday(), &ctx));
}

#[test]
fn blackout_excludes_regardless_of_preferences() {
    let mut snap = snapshot(vec![member("m-1", &[DutyRole::Instructor])]);
    snap.blackouts.insert((id("m-1"), saturday()));
    let policy = policy();
    let (counts, today, last) = (no_counts(), no_assignments(), no_assignments());
    let ctx = ctx(&snap, &policy, &counts, &today, &last);

    assert!(!is_eligible(&snap.members[0], DutyRole::Instructor, saturday(), &ctx));
    assert!(is_eligible(&snap.members[0], DutyRole::Instructor, sunday(), &ctx));
}

#[test]
fn hard_opt_outs_exclude() {
    let mut snap = snapshot(vec![
        member("m-1", &[DutyRole::Instructor]),
        member("m-2", &[DutyRole::Instructor]),
    ]);
    snap.preferences.insert(
        id("m-1"),
        DutyPreference {
            dont_schedule: true,
            dont_schedule_reason: Some("injury".to_string()),
            ..DutyPreference::default()
        },
    );
    snap.preferences.insert(
        id("m-2"),
        DutyPreference {
            scheduling_suspended: true,
            suspended_reason: Some("medical".to_string()),
            ..DutyPreference::default()
        },
    );
    let policy = policy();
    let (counts, today, last) = (no_counts(), no_assignments(), no_assignments());
    let ctx = ctx(&snap, &policy, &counts, &today, &last);

    assert!(!is_eligible(&snap.members[0], DutyRole::Instructor, saturday(), &ctx));
    assert!(!is_eligible(&snap.members[1], DutyRole::Instructor, saturday(), &ctx));
}

#[test]
fn preferred_day_blocks_under_hard_policy_only() {
    let mut snap = snapshot(vec![member("m-1", &[DutyRole::Instructor])]);
    snap.preferences.insert(
        id("m-1"),
        DutyPreference {
            preferred_day: Some(PreferredDay::Saturday),
            ..DutyPreference::default()
        },
    );
    let hard = policy();
    let soft = SchedulingPolicy {
        preferred_day_policy: PreferredDayPolicy::Soft,
        ..policy()
    };
    let (counts, today, last) = (no_counts(), no_assignments(), no_assignments());

    assert!(!is_eligible(
        &snap.members[0],
        DutyRole::Instructor,
        sunday(),
        &ctx(&snap, &hard, &counts, &today, &last),
    ));
    assert!(is_eligible(
        &snap.members[0],
        DutyRole::Instructor,
        sunday(),
        &ctx(&snap, &soft, &counts, &today, &last),
    ));
}

#[test]
fn no_dual_role_on_the_same_date() {
    let snap = snapshot(vec![member(
        "m-1",
        &[DutyRole::Instructor, DutyRole::TowPilot],
    )]);
    let policy = policy();
    let counts = no_counts();
    let mut today = no_assignments();
    today.insert(DutyRole::TowPilot, id("m-1"));
    let last = no_assignments();
    let ctx = ctx(&snap, &policy, &counts, &today, &last);

    assert!(!is_eligible(&snap.members[0], DutyRole::Instructor, saturday(), &ctx));
}

#[test]
fn adjacency_blocks_unless_weekend_double_allowed() {
    let mut snap = snapshot(vec![member("m-1", &[DutyRole::Instructor])]);
    let policy = policy();
    let counts = no_counts();
    let today = no_assignments();
    let mut last = no_assignments();
    last.insert(DutyRole::Instructor, id("m-1"));

    assert!(!is_eligible(
        &snap.members[0],
        DutyRole::Instructor,
        sunday(),
        &ctx(&snap, &policy, &counts, &today, &last),
    ));

    snap.preferences.insert(
        id("m-1"),
        DutyPreference {
            allow_weekend_double: true,
            ..DutyPreference::default()
        },
    );
    assert!(is_eligible(
        &snap.members[0],
        DutyRole::Instructor,
        sunday(),
        &ctx(&snap, &policy, &counts, &today, &last),
    ));
}

#[test]
fn adjacency_applies_to_the_same_role_only() {
    let snap = snapshot(vec![member(
        "m-1",
        &[DutyRole::Instructor, DutyRole::TowPilot],
    )]);
    let policy = policy();
    let counts = no_counts();
    let today = no_assignments();
    let mut last = no_assignments();
    last.insert(DutyRole::TowPilot, id("m-1"));
    let ctx = ctx(&snap, &policy, &counts, &today, &last);

    assert!(is_eligible(&snap.members[0], DutyRole::Instructor, sunday(), &ctx));
}

#[test]
fn monthly_cap_counts_prior_commitments() {
    let mut snap = snapshot(vec![member("m-1", &[DutyRole::Instructor])]);
    snap.preferences.insert(
        id("m-1"),
        DutyPreference {
            max_assignments_per_month: Some(2),
            ..DutyPreference::default()
        },
    );
    let policy = policy();
    let mut counts = no_counts();
    counts.insert(id("m-1"), 2);
    let (today, last) = (no_assignments(), no_assignments());
    let ctx = ctx(&snap, &policy, &counts, &today, &last);

    assert!(!is_eligible(&snap.members[0], DutyRole::Instructor, saturday(), &ctx));
}

#[test]
fn zero_cap_resolves_to_the_model_default_not_unlimited() {
    let mut snap = snapshot(vec![member("m-1", &[DutyRole::Instructor])]);
    snap.preferences.insert(
        id("m-1"),
        DutyPreference {
            max_assignments_per_month: Some(0),
            ..DutyPreference::default()
        },
    );
    let policy = policy();
    let mut counts = no_counts();
    counts.insert(id("m-1"), u32::from(policy.default_monthly_cap));
    let (today, last) = (no_assignments(), no_assignments());
    let ctx = ctx(&snap, &policy, &counts, &today, &last);

    assert!(!is_eligible(&snap.members[0], DutyRole::Instructor, saturday(), &ctx));
}

#[test]
fn avoidance_excludes_in_both_directions() {
    let mut snap = snapshot(vec![
        member("m-1", &[DutyRole::Instructor]),
        member("m-2", &[DutyRole::TowPilot]),
    ]);
    // Directed edge m-2 -> m-1; it must still block m-1 once m-2 is on duty.
    snap.avoidances.insert((id("m-2"), id("m-1")));
    let policy = policy();
    let counts = no_counts();
    let mut today = no_assignments();
    today.insert(DutyRole::TowPilot, id("m-2"));
    let last = no_assignments();
    let ctx = ctx(&snap, &policy, &counts, &today, &last);

    assert!(!is_eligible(&snap.members[0], DutyRole::Instructor, saturday(), &ctx));
}
