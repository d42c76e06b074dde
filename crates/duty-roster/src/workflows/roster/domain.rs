use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::diagnostics::SlotDiagnostics;

/// Identifier wrapper for club members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operational roles a member can be rostered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyRole {
    DutyOfficer,
    AssistantDutyOfficer,
    Instructor,
    TowPilot,
}

impl DutyRole {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::DutyOfficer,
            Self::AssistantDutyOfficer,
            Self::Instructor,
            Self::TowPilot,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DutyOfficer => "Duty Officer",
            Self::AssistantDutyOfficer => "Assistant Duty Officer",
            Self::Instructor => "Instructor",
            Self::TowPilot => "Tow Pilot",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::DutyOfficer => "duty_officer",
            Self::AssistantDutyOfficer => "assistant_duty_officer",
            Self::Instructor => "instructor",
            Self::TowPilot => "tow_pilot",
        }
    }

    /// Parse a role from its snake_case key, label, or loose variants of either.
    pub fn parse_key(value: &str) -> Option<Self> {
        let normalized = value
            .trim()
            .to_ascii_lowercase()
            .replace([' ', '-'], "_");
        match normalized.as_str() {
            "duty_officer" | "do" => Some(Self::DutyOfficer),
            "assistant_duty_officer" | "ado" => Some(Self::AssistantDutyOfficer),
            "instructor" => Some(Self::Instructor),
            "tow_pilot" | "towpilot" => Some(Self::TowPilot),
            _ => None,
        }
    }
}

/// Membership standing as recorded in the member register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Active,
    Inactive,
}

impl MembershipStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// Boolean role qualifications held by a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFlags {
    pub duty_officer: bool,
    pub assistant_duty_officer: bool,
    pub instructor: bool,
    pub tow_pilot: bool,
}

impl RoleFlags {
    pub const fn holds(self, role: DutyRole) -> bool {
        match role {
            DutyRole::DutyOfficer => self.duty_officer,
            DutyRole::AssistantDutyOfficer => self.assistant_duty_officer,
            DutyRole::Instructor => self.instructor,
            DutyRole::TowPilot => self.tow_pilot,
        }
    }

    pub fn count(self) -> usize {
        DutyRole::ordered()
            .into_iter()
            .filter(|role| self.holds(*role))
            .count()
    }

    /// The member's only role, when exactly one flag is set.
    pub fn sole_role(self) -> Option<DutyRole> {
        let mut held = DutyRole::ordered().into_iter().filter(|role| self.holds(*role));
        match (held.next(), held.next()) {
            (Some(role), None) => Some(role),
            _ => None,
        }
    }
}

/// A club member as snapshotted from the register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub display_name: String,
    pub status: MembershipStatus,
    pub joined_on: NaiveDate,
    pub roles: RoleFlags,
}

impl Member {
    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }
}

/// Weekday a member prefers to be rostered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredDay {
    Saturday,
    Sunday,
}

impl PreferredDay {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    pub fn matches(self, weekday: Weekday) -> bool {
        match self {
            Self::Saturday => weekday == Weekday::Sat,
            Self::Sunday => weekday == Weekday::Sun,
        }
    }
}

/// Percent weighting across the four schedulable roles.
///
/// All zero means the member has expressed no preference; otherwise the
/// four values sum to exactly 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAffinity {
    pub duty_officer: u8,
    pub assistant_duty_officer: u8,
    pub instructor: u8,
    pub tow_pilot: u8,
}

impl RoleAffinity {
    pub const fn pct_for(self, role: DutyRole) -> u8 {
        match role {
            DutyRole::DutyOfficer => self.duty_officer,
            DutyRole::AssistantDutyOfficer => self.assistant_duty_officer,
            DutyRole::Instructor => self.instructor,
            DutyRole::TowPilot => self.tow_pilot,
        }
    }

    pub fn total(self) -> u16 {
        u16::from(self.duty_officer)
            + u16::from(self.assistant_duty_officer)
            + u16::from(self.instructor)
            + u16::from(self.tow_pilot)
    }

    pub fn has_signal(self) -> bool {
        self.total() > 0
    }
}

/// Scheduling preferences recorded by a member, zero-or-one per member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DutyPreference {
    pub preferred_day: Option<PreferredDay>,
    pub dont_schedule: bool,
    pub dont_schedule_reason: Option<String>,
    pub scheduling_suspended: bool,
    pub suspended_reason: Option<String>,
    pub affinity: RoleAffinity,
    pub max_assignments_per_month: Option<u8>,
    pub allow_weekend_double: bool,
}

impl DutyPreference {
    /// Whether the member has any hard opt-out set.
    pub fn opted_out(&self) -> bool {
        self.dont_schedule || self.scheduling_suspended
    }

    /// Effective monthly cap. Zero and unset both resolve to the model
    /// default; an unlimited cap must be requested explicitly with a large
    /// value.
    pub fn monthly_cap(&self, default_cap: u8) -> u8 {
        match self.max_assignments_per_month {
            Some(cap) if cap > 0 => cap,
            _ => default_cap,
        }
    }

    pub fn validate(&self, member: &MemberId) -> Result<(), PreferenceError> {
        if self.dont_schedule
            && self
                .dont_schedule_reason
                .as_deref()
                .map_or(true, |reason| reason.trim().is_empty())
        {
            return Err(PreferenceError::MissingOptOutReason {
                member: member.clone(),
            });
        }

        if self.scheduling_suspended
            && self
                .suspended_reason
                .as_deref()
                .map_or(true, |reason| reason.trim().is_empty())
        {
            return Err(PreferenceError::MissingSuspensionReason {
                member: member.clone(),
            });
        }

        let sum = self.affinity.total();
        if sum != 0 && sum != 100 {
            return Err(PreferenceError::AffinityOutOfBalance {
                member: member.clone(),
                sum,
            });
        }

        Ok(())
    }
}

/// Validation errors for stored preference records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PreferenceError {
    #[error("member {member} has role percentages summing to {sum}, expected 0 or 100")]
    AffinityOutOfBalance { member: MemberId, sum: u16 },
    #[error("member {member} is opted out without a recorded reason")]
    MissingOptOutReason { member: MemberId },
    #[error("member {member} is suspended without a recorded reason")]
    MissingSuspensionReason { member: MemberId },
}

/// Recurring month-day window bounding the operational season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonWindow {
    start_month: u32,
    start_day: u32,
    end_month: u32,
    end_day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SeasonWindowError {
    #[error("{month:02}-{day:02} is not a valid month-day pair")]
    InvalidMonthDay { month: u32, day: u32 },
    #[error("season start falls after season end")]
    Inverted,
}

impl SeasonWindow {
    pub fn new(
        start_month: u32,
        start_day: u32,
        end_month: u32,
        end_day: u32,
    ) -> Result<Self, SeasonWindowError> {
        for (month, day) in [(start_month, start_day), (end_month, end_day)] {
            // Year 2000 is a leap year, so Feb 29 is accepted as a bound.
            if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
                return Err(SeasonWindowError::InvalidMonthDay { month, day });
            }
        }

        if (start_month, start_day) > (end_month, end_day) {
            return Err(SeasonWindowError::Inverted);
        }

        Ok(Self {
            start_month,
            start_day,
            end_month,
            end_day,
        })
    }

    /// Inclusive containment check, independent of the year.
    pub fn contains(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;

        let candidate = (date.month(), date.day());
        (self.start_month, self.start_day) <= candidate
            && candidate <= (self.end_month, self.end_day)
    }
}

/// Named buckets used when explaining why a slot could not be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    DontSchedule,
    SchedulingSuspended,
    Blackout,
    AssignedYesterday,
    AlreadyAssignedToday,
    AvoidanceConflict,
    MonthlyCapReached,
    PreferredDayMismatch,
}

impl ExclusionReason {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::DontSchedule,
            Self::SchedulingSuspended,
            Self::Blackout,
            Self::AssignedYesterday,
            Self::AlreadyAssignedToday,
            Self::AvoidanceConflict,
            Self::MonthlyCapReached,
            Self::PreferredDayMismatch,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DontSchedule => "opted out",
            Self::SchedulingSuspended => "suspended",
            Self::Blackout => "blacked out",
            Self::AssignedYesterday => "assigned yesterday",
            Self::AlreadyAssignedToday => "already assigned today",
            Self::AvoidanceConflict => "avoidance conflict",
            Self::MonthlyCapReached => "over monthly cap",
            Self::PreferredDayMismatch => "preferred day mismatch",
        }
    }
}

/// One operational date's assignment outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub date: NaiveDate,
    pub slots: BTreeMap<DutyRole, Option<MemberId>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub diagnostics: BTreeMap<DutyRole, SlotDiagnostics>,
}

impl RosterEntry {
    pub fn slot(&self, role: DutyRole) -> Option<&MemberId> {
        self.slots.get(&role).and_then(|slot| slot.as_ref())
    }
}
