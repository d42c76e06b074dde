use serde::{Deserialize, Serialize};

use crate::workflows::roster::domain::SeasonWindow;

/// Cap applied when a member's preference record leaves the monthly
/// maximum unset or zero.
pub const DEFAULT_MONTHLY_CAP: u8 = 3;

/// Seed for the deterministic tie-break jitter when none is configured.
pub const DEFAULT_SHUFFLE_SEED: u64 = 1913;

/// Whether a recorded preferred weekday blocks assignment or merely
/// deprioritizes the member on the other day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredDayPolicy {
    Hard,
    Soft,
}

/// Knobs governing one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingPolicy {
    pub default_monthly_cap: u8,
    pub preferred_day_policy: PreferredDayPolicy,
    pub shuffle_seed: u64,
    pub season: Option<SeasonWindow>,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            default_monthly_cap: DEFAULT_MONTHLY_CAP,
            preferred_day_policy: PreferredDayPolicy::Hard,
            shuffle_seed: DEFAULT_SHUFFLE_SEED,
            season: None,
        }
    }
}
