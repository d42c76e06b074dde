use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::normalizer;
use super::MembershipImportError;
use crate::workflows::roster::domain::{
    DutyPreference, Member, MemberId, MembershipStatus,
};

/// One register row resolved into domain records. The preference is only
/// present when the row carried at least one preference column, so an
/// untouched member stays distinct from one who filled the form in.
#[derive(Debug)]
pub(crate) struct RegisterRecord {
    pub(crate) member: Member,
    pub(crate) preference: Option<DutyPreference>,
}

pub(crate) fn parse_records<R: Read>(
    reader: R,
) -> Result<Vec<RegisterRecord>, MembershipImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<RegisterRow>() {
        let row = row?;
        records.push(resolve_row(row)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RegisterRow {
    #[serde(rename = "Member ID")]
    member_id: String,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(rename = "Joined", default, deserialize_with = "empty_string_as_none")]
    joined: Option<String>,
    #[serde(rename = "Roles", default)]
    roles: String,
    #[serde(
        rename = "Preferred Day",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    preferred_day: Option<String>,
    #[serde(
        rename = "Monthly Cap",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    monthly_cap: Option<String>,
    #[serde(
        rename = "Weekend Double",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    weekend_double: Option<String>,
    #[serde(rename = "Opt Out", default, deserialize_with = "empty_string_as_none")]
    opt_out: Option<String>,
    #[serde(rename = "Suspended", default, deserialize_with = "empty_string_as_none")]
    suspended: Option<String>,
    #[serde(rename = "Reason", default, deserialize_with = "empty_string_as_none")]
    reason: Option<String>,
    #[serde(rename = "Affinity", default, deserialize_with = "empty_string_as_none")]
    affinity: Option<String>,
}

fn resolve_row(row: RegisterRow) -> Result<RegisterRecord, MembershipImportError> {
    let member_id = row.member_id.trim().to_string();
    if member_id.is_empty() {
        return Err(MembershipImportError::Record {
            member: "<blank>".to_string(),
            detail: "missing member id".to_string(),
        });
    }

    let record_error = |detail: String| MembershipImportError::Record {
        member: member_id.clone(),
        detail,
    };

    let status = match &row.status {
        Some(value) => normalizer::parse_status(value)
            .ok_or_else(|| record_error(format!("unknown status '{value}'")))?,
        None => MembershipStatus::Active,
    };

    let joined_on = row
        .joined
        .as_deref()
        .ok_or_else(|| record_error("missing join date".to_string()))
        .and_then(|value| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| record_error(format!("invalid join date '{value}'")))
        })?;

    let roles = normalizer::parse_roles(&row.roles).map_err(&record_error)?;

    let member = Member {
        id: MemberId::new(member_id.clone()),
        display_name: if row.name.trim().is_empty() {
            member_id.clone()
        } else {
            row.name.trim().to_string()
        },
        status,
        joined_on,
        roles,
    };

    let preference = resolve_preference(&row, &record_error)?;

    Ok(RegisterRecord { member, preference })
}

fn resolve_preference(
    row: &RegisterRow,
    record_error: &impl Fn(String) -> MembershipImportError,
) -> Result<Option<DutyPreference>, MembershipImportError> {
    let touched = row.preferred_day.is_some()
        || row.monthly_cap.is_some()
        || row.weekend_double.is_some()
        || row.opt_out.is_some()
        || row.suspended.is_some()
        || row.affinity.is_some();
    if !touched {
        return Ok(None);
    }

    let preferred_day = match &row.preferred_day {
        Some(value) => Some(
            normalizer::parse_preferred_day(value)
                .ok_or_else(|| record_error(format!("unknown preferred day '{value}'")))?,
        ),
        None => None,
    };

    let max_assignments_per_month = match &row.monthly_cap {
        Some(value) => Some(
            value
                .trim()
                .parse::<u8>()
                .map_err(|_| record_error(format!("invalid monthly cap '{value}'")))?,
        ),
        None => None,
    };

    let allow_weekend_double = match &row.weekend_double {
        Some(value) => normalizer::parse_flag(value)
            .ok_or_else(|| record_error(format!("invalid weekend double flag '{value}'")))?,
        None => false,
    };

    let dont_schedule = match &row.opt_out {
        Some(value) => normalizer::parse_flag(value)
            .ok_or_else(|| record_error(format!("invalid opt out flag '{value}'")))?,
        None => false,
    };

    let scheduling_suspended = match &row.suspended {
        Some(value) => normalizer::parse_flag(value)
            .ok_or_else(|| record_error(format!("invalid suspended flag '{value}'")))?,
        None => false,
    };

    let affinity = match &row.affinity {
        Some(value) => normalizer::parse_affinity(value).map_err(record_error)?,
        None => Default::default(),
    };

    Ok(Some(DutyPreference {
        preferred_day,
        dont_schedule,
        dont_schedule_reason: if dont_schedule { row.reason.clone() } else { None },
        scheduling_suspended,
        suspended_reason: if scheduling_suspended {
            row.reason.clone()
        } else {
            None
        },
        affinity,
        max_assignments_per_month,
        allow_weekend_double,
    }))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
