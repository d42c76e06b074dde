use crate::infra::parse_role;
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use duty_roster::error::AppError;
use duty_roster::workflows::membership::MembershipRegisterImporter;
use duty_roster::workflows::roster::{
    calculate_role_scarcity, DutyPreference, DutyRole, GeneratedRoster, Member, MemberId,
    MembershipStatus, OperationalCalendar, PreferredDay, RoleAffinity, RoleFlags, RosterEngine,
    RosterError, RosterSnapshot, RosterSummary, SchedulingPolicy, StaffingRisk,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Roster year
    #[arg(long)]
    pub(crate) year: i32,
    /// Roster month (1-12)
    #[arg(long)]
    pub(crate) month: u32,
    /// Roles to schedule; defaults to all four when omitted
    #[arg(long = "role", value_parser = parse_role)]
    pub(crate) roles: Vec<DutyRole>,
    /// Membership register export to roster from; defaults to the sample club
    #[arg(long)]
    pub(crate) register_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Roster year (defaults to the upcoming month)
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// Roster month (defaults to the upcoming month)
    #[arg(long)]
    pub(crate) month: Option<u32>,
}

pub(crate) fn run_roster_generate(args: GenerateArgs) -> Result<(), AppError> {
    let GenerateArgs {
        year,
        month,
        roles,
        register_csv,
    } = args;

    let snapshot = match register_csv {
        Some(path) => MembershipRegisterImporter::from_path(path)?,
        None => sample_club(),
    };

    let roles = if roles.is_empty() {
        DutyRole::ordered().to_vec()
    } else {
        roles
    };

    let roster = generate(snapshot, year, month, &roles)?;
    render_roster(&roster);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let (year, month) = match (args.year, args.month) {
        (Some(year), Some(month)) => (year, month),
        _ => upcoming_month(),
    };

    println!("Duty roster demo (sample club)");

    let snapshot = sample_club();

    println!("\nStaffing depth for {year}-{month:02}");
    let calendar = OperationalCalendar::default();
    let dates = calendar
        .operational_dates(year, month)
        .map_err(|error| AppError::Roster(RosterError::from(error).into()))?;
    for role in DutyRole::ordered() {
        let scarcity = calculate_role_scarcity(&snapshot, &dates, role);
        let risk = StaffingRisk::from_scarcity(&scarcity);
        println!(
            "- {:<22} {} member(s), scarcity {:.2} [{}]",
            role.label(),
            scarcity.total_members,
            scarcity.scarcity_score,
            risk.label()
        );
    }

    let roster = generate(snapshot, year, month, &DutyRole::ordered())?;
    render_roster(&roster);

    Ok(())
}

fn generate(
    snapshot: RosterSnapshot,
    year: i32,
    month: u32,
    roles: &[DutyRole],
) -> Result<GeneratedRoster, AppError> {
    let engine = RosterEngine::new(snapshot, SchedulingPolicy::default());
    let entries = engine
        .generate(year, month, roles)
        .map_err(|error| AppError::Roster(error.into()))?;
    let summary = RosterSummary::from_entries(engine.snapshot(), &entries);

    Ok(GeneratedRoster {
        year,
        month,
        entries,
        summary,
    })
}

fn render_roster(roster: &GeneratedRoster) {
    println!("\nDuty roster for {}-{:02}", roster.year, roster.month);

    if roster.entries.is_empty() {
        println!("  No operational dates fall inside this month.");
        return;
    }

    for entry in &roster.entries {
        println!("  {} ({})", entry.date, entry.date.weekday());
        for (role, slot) in &entry.slots {
            match slot {
                Some(member) => println!("    {:<22} {}", role.label(), member),
                None => {
                    let explanation = entry
                        .diagnostics
                        .get(role)
                        .map(|diagnostics| diagnostics.summary.as_str())
                        .unwrap_or("unfilled");
                    println!("    {:<22} OPEN ({explanation})", role.label());
                }
            }
        }
    }

    render_summary(&roster.summary);
}

fn render_summary(summary: &RosterSummary) {
    println!(
        "\nFilled {} of {} slots ({} open)",
        summary.filled_slots, summary.total_slots, summary.open_slots
    );

    println!("Role outlook:");
    for role in &summary.role_fill {
        println!(
            "  - {:<22} {}/{} filled | {} member(s) | {}",
            role.role_label, role.filled, role.requested, role.total_members, role.risk_label
        );
    }

    if !summary.member_load.is_empty() {
        println!("Member load:");
        for load in &summary.member_load {
            println!(
                "  - {:<18} {} duty day(s)",
                load.display_name, load.assignments
            );
        }
    }
}

fn upcoming_month() -> (i32, u32) {
    let today = Local::now().date_naive();
    if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    }
}

fn sample_member(
    member_id: &str,
    display_name: &str,
    joined_on: NaiveDate,
    roles: RoleFlags,
) -> Member {
    Member {
        id: MemberId::new(member_id),
        display_name: display_name.to_string(),
        status: MembershipStatus::Active,
        joined_on,
        roles,
    }
}

/// A plausible small club: a handful of duty officers, two instructors, and
/// three tow pilots, with the usual scatter of preferences.
fn sample_club() -> RosterSnapshot {
    let mut snapshot = RosterSnapshot::default();

    snapshot.members = vec![
        sample_member(
            "gc-01",
            "Priya Nair",
            date(2015, 5, 2),
            RoleFlags {
                duty_officer: true,
                ..RoleFlags::default()
            },
        ),
        sample_member(
            "gc-02",
            "Jordan Blake",
            date(2018, 9, 14),
            RoleFlags {
                duty_officer: true,
                assistant_duty_officer: true,
                ..RoleFlags::default()
            },
        ),
        sample_member(
            "gc-03",
            "Casey Wu",
            date(2020, 2, 8),
            RoleFlags {
                duty_officer: true,
                ..RoleFlags::default()
            },
        ),
        sample_member(
            "gc-04",
            "Noor Haddad",
            date(2021, 6, 19),
            RoleFlags {
                assistant_duty_officer: true,
                ..RoleFlags::default()
            },
        ),
        sample_member(
            "gc-05",
            "Morgan Idowu",
            date(2012, 7, 30),
            RoleFlags {
                instructor: true,
                ..RoleFlags::default()
            },
        ),
        sample_member(
            "gc-06",
            "Riley Fontaine",
            date(2019, 11, 23),
            RoleFlags {
                instructor: true,
                tow_pilot: true,
                ..RoleFlags::default()
            },
        ),
        sample_member(
            "gc-07",
            "Sasha Petrov",
            date(2017, 4, 18),
            RoleFlags {
                tow_pilot: true,
                ..RoleFlags::default()
            },
        ),
        sample_member(
            "gc-08",
            "Avery Stone",
            date(2016, 8, 5),
            RoleFlags {
                tow_pilot: true,
                ..RoleFlags::default()
            },
        ),
        sample_member(
            "gc-09",
            "Drew Kealoha",
            date(2022, 3, 11),
            RoleFlags {
                assistant_duty_officer: true,
                ..RoleFlags::default()
            },
        ),
    ];

    snapshot.preferences.insert(
        MemberId::new("gc-02"),
        DutyPreference {
            affinity: RoleAffinity {
                duty_officer: 30,
                assistant_duty_officer: 70,
                ..RoleAffinity::default()
            },
            allow_weekend_double: true,
            ..DutyPreference::default()
        },
    );
    snapshot.preferences.insert(
        MemberId::new("gc-06"),
        DutyPreference {
            affinity: RoleAffinity {
                instructor: 80,
                tow_pilot: 20,
                ..RoleAffinity::default()
            },
            max_assignments_per_month: Some(2),
            ..DutyPreference::default()
        },
    );
    snapshot.preferences.insert(
        MemberId::new("gc-07"),
        DutyPreference {
            preferred_day: Some(PreferredDay::Sunday),
            ..DutyPreference::default()
        },
    );

    snapshot.pairings.insert(MemberId::new("gc-04"), MemberId::new("gc-01"));
    snapshot
        .avoidances
        .insert((MemberId::new("gc-03"), MemberId::new("gc-08")));

    snapshot
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
