use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use super::domain::{DutyPreference, DutyRole, Member, MemberId, PreferenceError};

/// Immutable inputs for one generation run.
///
/// Ownership of the underlying records lives in the storage layer; the
/// engine only ever reads a snapshot fetched once before the run starts.
#[derive(Debug, Clone, Default)]
pub struct RosterSnapshot {
    pub members: Vec<Member>,
    pub preferences: HashMap<MemberId, DutyPreference>,
    pub blackouts: HashSet<(MemberId, NaiveDate)>,
    pub pairings: HashMap<MemberId, MemberId>,
    pub avoidances: HashSet<(MemberId, MemberId)>,
    pub committed_counts: HashMap<MemberId, u32>,
}

impl RosterSnapshot {
    pub fn preference(&self, member: &MemberId) -> Option<&DutyPreference> {
        self.preferences.get(member)
    }

    pub fn is_blacked_out(&self, member: &MemberId, date: NaiveDate) -> bool {
        self.blackouts.contains(&(member.clone(), date))
    }

    pub fn preferred_partner(&self, member: &MemberId) -> Option<&MemberId> {
        self.pairings.get(member)
    }

    /// Avoidance edges are directed in storage but absolute in effect.
    pub fn avoidance_between(&self, a: &MemberId, b: &MemberId) -> bool {
        self.avoidances.contains(&(a.clone(), b.clone()))
            || self.avoidances.contains(&(b.clone(), a.clone()))
    }

    /// Active members holding the flag for `role`.
    pub fn active_flag_holders(&self, role: DutyRole) -> impl Iterator<Item = &Member> {
        self.members
            .iter()
            .filter(move |member| member.is_active() && member.roles.holds(role))
    }

    /// Input validation run once per generation, before the engine starts.
    pub fn validate(&self) -> Result<(), PreferenceError> {
        for (member, preference) in &self.preferences {
            preference.validate(member)?;
        }
        Ok(())
    }
}
