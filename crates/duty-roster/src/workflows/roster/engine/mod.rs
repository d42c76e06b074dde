mod config;
mod eligibility;
mod scarcity;
mod scoring;

pub use config::{
    PreferredDayPolicy, SchedulingPolicy, DEFAULT_MONTHLY_CAP, DEFAULT_SHUFFLE_SEED,
};
pub use eligibility::{is_eligible, EligibilityContext};
pub use scarcity::{calculate_role_scarcity, RoleScarcity};

pub(crate) use scoring::{affinity_pct, score_candidate};

use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::calendar::{CalendarError, OperationalCalendar};
use super::diagnostics::diagnose_empty_slot;
use super::domain::{DutyRole, Member, MemberId, RosterEntry};
use super::snapshot::RosterSnapshot;

/// Errors raised before any date is processed. An unfillable slot is not
/// among them; that is a normal outcome carried on the entry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RosterError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error("no duty roles were requested")]
    NoRolesRequested,
    #[error("role {} requested more than once", .0.label())]
    DuplicateRole(DutyRole),
}

/// Day-by-day, role-by-role assignment loop over one month's operational
/// dates. Holds no state between runs; fairness counters live for the
/// duration of a single `generate` call.
pub struct RosterEngine {
    snapshot: RosterSnapshot,
    policy: SchedulingPolicy,
    calendar: OperationalCalendar,
}

impl RosterEngine {
    pub fn new(snapshot: RosterSnapshot, policy: SchedulingPolicy) -> Self {
        let calendar = OperationalCalendar::new(policy.season);
        Self {
            snapshot,
            policy,
            calendar,
        }
    }

    pub fn snapshot(&self) -> &RosterSnapshot {
        &self.snapshot
    }

    pub fn calendar(&self) -> &OperationalCalendar {
        &self.calendar
    }

    /// Produce one entry per operational date, ascending. Dates are
    /// processed strictly left to right because the adjacency rule and the
    /// running counts depend on the previous date's outcome.
    pub fn generate(
        &self,
        year: i32,
        month: u32,
        roles: &[DutyRole],
    ) -> Result<Vec<RosterEntry>, RosterError> {
        let dates = self.calendar.operational_dates(year, month)?;
        let ordered_roles = self.roles_by_scarcity(&dates, roles)?;

        let mut monthly_counts: HashMap<MemberId, u32> = self.snapshot.committed_counts.clone();
        let mut last_assigned: BTreeMap<DutyRole, MemberId> = BTreeMap::new();
        let mut rng = StdRng::seed_from_u64(self.policy.shuffle_seed);
        let mut entries = Vec::with_capacity(dates.len());

        for date in dates {
            let mut assigned_today: BTreeMap<DutyRole, MemberId> = BTreeMap::new();
            let mut diagnostics = BTreeMap::new();

            for &role in &ordered_roles {
                let picked = self.pick_candidate(
                    role,
                    date,
                    &monthly_counts,
                    &assigned_today,
                    &last_assigned,
                    &mut rng,
                );

                match picked {
                    Some(member) => {
                        debug!(%date, role = role.key(), member = %member, "slot filled");
                        *monthly_counts.entry(member.clone()).or_insert(0) += 1;
                        assigned_today.insert(role, member);
                    }
                    None => {
                        debug!(%date, role = role.key(), "slot left open");
                        let explanation = diagnose_empty_slot(
                            role,
                            date,
                            &self.snapshot,
                            &self.policy,
                            &monthly_counts,
                            &assigned_today,
                            Some(&last_assigned),
                        );
                        diagnostics.insert(role, explanation);
                    }
                }
            }

            let slots = ordered_roles
                .iter()
                .map(|role| (*role, assigned_today.get(role).cloned()))
                .collect();
            entries.push(RosterEntry {
                date,
                slots,
                diagnostics,
            });
            last_assigned = assigned_today;
        }

        Ok(entries)
    }

    /// Validate the requested role list and order it scarcest-first, so
    /// abundant roles yield their candidates to scarce ones each day. The
    /// ordering is computed once per run, not per date.
    fn roles_by_scarcity(
        &self,
        dates: &[chrono::NaiveDate],
        roles: &[DutyRole],
    ) -> Result<Vec<DutyRole>, RosterError> {
        if roles.is_empty() {
            return Err(RosterError::NoRolesRequested);
        }

        let mut unique: Vec<DutyRole> = Vec::with_capacity(roles.len());
        for &role in roles {
            if unique.contains(&role) {
                return Err(RosterError::DuplicateRole(role));
            }
            unique.push(role);
        }

        let scores: BTreeMap<DutyRole, f64> = unique
            .iter()
            .map(|&role| {
                (
                    role,
                    calculate_role_scarcity(&self.snapshot, dates, role).scarcity_score,
                )
            })
            .collect();
        unique.sort_by(|a, b| scores[b].total_cmp(&scores[a]));

        Ok(unique)
    }

    fn pick_candidate(
        &self,
        role: DutyRole,
        date: chrono::NaiveDate,
        monthly_counts: &HashMap<MemberId, u32>,
        assigned_today: &BTreeMap<DutyRole, MemberId>,
        last_assigned: &BTreeMap<DutyRole, MemberId>,
        rng: &mut StdRng,
    ) -> Option<MemberId> {
        let ctx = EligibilityContext {
            snapshot: &self.snapshot,
            policy: &self.policy,
            monthly_counts,
            assigned_today,
            last_assigned,
        };

        let mut best: Option<(f64, &Member)> = None;
        for member in &self.snapshot.members {
            if !is_eligible(member, role, date, &ctx) {
                continue;
            }
            let score = score_candidate(member, role, date, &ctx, rng);
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, member));
            }
        }

        best.map(|(_, member)| member.id.clone())
    }
}
