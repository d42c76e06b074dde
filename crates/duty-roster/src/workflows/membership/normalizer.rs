use crate::workflows::roster::domain::{
    DutyRole, MembershipStatus, PreferredDay, RoleAffinity, RoleFlags,
};

pub(crate) fn normalize(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match normalize(value).as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "" | "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_status(value: &str) -> Option<MembershipStatus> {
    match normalize(value).as_str() {
        "active" | "current" => Some(MembershipStatus::Active),
        "inactive" | "lapsed" | "resigned" => Some(MembershipStatus::Inactive),
        _ => None,
    }
}

pub(crate) fn parse_preferred_day(value: &str) -> Option<PreferredDay> {
    match normalize(value).as_str() {
        "saturday" | "sat" => Some(PreferredDay::Saturday),
        "sunday" | "sun" => Some(PreferredDay::Sunday),
        _ => None,
    }
}

/// Parse a delimited role list such as `instructor|tow pilot`.
pub(crate) fn parse_roles(value: &str) -> Result<RoleFlags, String> {
    let mut flags = RoleFlags::default();

    for token in value.split(['|', ',', ';']) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        match DutyRole::parse_key(token) {
            Some(DutyRole::DutyOfficer) => flags.duty_officer = true,
            Some(DutyRole::AssistantDutyOfficer) => flags.assistant_duty_officer = true,
            Some(DutyRole::Instructor) => flags.instructor = true,
            Some(DutyRole::TowPilot) => flags.tow_pilot = true,
            None => return Err(format!("unknown role '{token}'")),
        }
    }

    Ok(flags)
}

/// Parse a weighted affinity list such as `instructor:60|tow pilot:40`.
pub(crate) fn parse_affinity(value: &str) -> Result<RoleAffinity, String> {
    let mut affinity = RoleAffinity::default();

    for segment in value.split(['|', ',', ';']) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let (role_token, pct_token) = segment
            .split_once(':')
            .ok_or_else(|| format!("affinity segment '{segment}' is not role:percent"))?;
        let role = DutyRole::parse_key(role_token)
            .ok_or_else(|| format!("unknown role '{}' in affinity", role_token.trim()))?;
        let pct: u8 = pct_token
            .trim()
            .parse()
            .map_err(|_| format!("invalid percentage '{}'", pct_token.trim()))?;

        match role {
            DutyRole::DutyOfficer => affinity.duty_officer = pct,
            DutyRole::AssistantDutyOfficer => affinity.assistant_duty_officer = pct,
            DutyRole::Instructor => affinity.instructor = pct,
            DutyRole::TowPilot => affinity.tow_pilot = pct,
        }
    }

    Ok(affinity)
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize(value)
}
