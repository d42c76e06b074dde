mod normalizer;
mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::workflows::roster::domain::PreferenceError;
use crate::workflows::roster::snapshot::RosterSnapshot;

#[derive(Debug)]
pub enum MembershipImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Record { member: String, detail: String },
    Preference(PreferenceError),
}

impl std::fmt::Display for MembershipImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipImportError::Io(err) => {
                write!(f, "failed to read membership register: {}", err)
            }
            MembershipImportError::Csv(err) => {
                write!(f, "invalid membership register data: {}", err)
            }
            MembershipImportError::Record { member, detail } => {
                write!(f, "register row for member {}: {}", member, detail)
            }
            MembershipImportError::Preference(err) => {
                write!(f, "register holds an invalid preference: {}", err)
            }
        }
    }
}

impl std::error::Error for MembershipImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MembershipImportError::Io(err) => Some(err),
            MembershipImportError::Csv(err) => Some(err),
            MembershipImportError::Record { .. } => None,
            MembershipImportError::Preference(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for MembershipImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for MembershipImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<PreferenceError> for MembershipImportError {
    fn from(err: PreferenceError) -> Self {
        Self::Preference(err)
    }
}

/// Reads a club membership register export into a roster snapshot.
///
/// The register carries members and their scheduling preferences; blackout,
/// pairing, and avoidance records live in their own stores and stay empty
/// here.
pub struct MembershipRegisterImporter;

impl MembershipRegisterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RosterSnapshot, MembershipImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RosterSnapshot, MembershipImportError> {
        let mut snapshot = RosterSnapshot::default();
        let mut seen: HashSet<String> = HashSet::new();

        for record in parser::parse_records(reader)? {
            if !seen.insert(record.member.id.0.clone()) {
                return Err(MembershipImportError::Record {
                    member: record.member.id.0.clone(),
                    detail: "duplicate member id".to_string(),
                });
            }

            if let Some(preference) = record.preference {
                snapshot
                    .preferences
                    .insert(record.member.id.clone(), preference);
            }
            snapshot.members.push(record.member);
        }

        snapshot.validate()?;
        Ok(snapshot)
    }
}
