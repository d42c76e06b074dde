//! Duty roster generation: calendar, engine, diagnostics, and the service
//! surface wrapping them.

pub mod calendar;
pub mod diagnostics;
pub mod domain;
pub mod engine;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use calendar::{CalendarError, OperationalCalendar};
pub use diagnostics::{diagnose_empty_slot, SlotDiagnostics};
pub use domain::{
    DutyPreference, DutyRole, ExclusionReason, Member, MemberId, MembershipStatus, PreferenceError,
    PreferredDay, RoleAffinity, RoleFlags, RosterEntry, SeasonWindow, SeasonWindowError,
};
pub use engine::{
    calculate_role_scarcity, is_eligible, EligibilityContext, PreferredDayPolicy, RoleScarcity,
    RosterEngine, RosterError, SchedulingPolicy, DEFAULT_MONTHLY_CAP,
};
pub use report::{MemberLoadEntry, RoleFillEntry, RosterSummary, StaffingRisk};
pub use repository::{AssignmentLedger, DirectoryError, LedgerError, MemberDirectory};
pub use router::{
    roster_router, DiagnoseRequest, GenerateRosterRequest, ScarcityRequest,
};
pub use service::{GeneratedRoster, RosterService, RosterServiceError};
pub use snapshot::RosterSnapshot;
