use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::Rng;

use super::config::PreferredDayPolicy;
use super::eligibility::EligibilityContext;
use crate::workflows::roster::domain::{DutyPreference, DutyRole, Member};

// Tier weights are strictly separated: one affinity point outweighs the
// whole fairness range, which in turn outweighs the pairing bonus, which
// outweighs the jitter. Ties within a tier fall through to the next.
const AFFINITY_STEP: f64 = 1_000.0;
const FAIRNESS_WEIGHT: f64 = 900.0;
const PAIRING_BONUS: f64 = 50.0;
// Soft preferred-day mode trades the hard filter for a 30-point demotion.
const PREFERRED_DAY_PENALTY: f64 = 30.0 * AFFINITY_STEP;

/// Ranking signal for a member that already passed eligibility.
pub(crate) fn score_candidate(
    member: &Member,
    role: DutyRole,
    date: NaiveDate,
    ctx: &EligibilityContext<'_>,
    rng: &mut StdRng,
) -> f64 {
    let preference = ctx.snapshot.preference(&member.id);

    let mut score = f64::from(affinity_pct(member, preference, role)) * AFFINITY_STEP;

    let count = ctx.monthly_counts.get(&member.id).copied().unwrap_or(0);
    score += FAIRNESS_WEIGHT / (1.0 + f64::from(count));

    if let Some(partner) = ctx.snapshot.preferred_partner(&member.id) {
        if ctx.assigned_today.values().any(|assigned| assigned == partner) {
            score += PAIRING_BONUS;
        }
    }

    if ctx.policy.preferred_day_policy == PreferredDayPolicy::Soft {
        if let Some(day) = preference.and_then(|pref| pref.preferred_day) {
            if !day.matches(date.weekday()) {
                score -= PREFERRED_DAY_PENALTY;
            }
        }
    }

    score + rng.gen::<f64>()
}

/// Affinity percentage for `role`. A member holding exactly one role flag
/// always scores 100 regardless of stored percentages; a member with no
/// signal splits evenly across held flags.
pub(crate) fn affinity_pct(
    member: &Member,
    preference: Option<&DutyPreference>,
    role: DutyRole,
) -> u8 {
    if member.roles.sole_role() == Some(role) {
        return 100;
    }

    match preference {
        Some(pref) if pref.affinity.has_signal() => pref.affinity.pct_for(role),
        _ => {
            let flags = member.roles.count();
            if flags == 0 {
                0
            } else {
                (100 / flags) as u8
            }
        }
    }
}
