//! # Passport Rules
//!
//! Pure verdicts over elapsed time. Callers pass `now` explicitly; nothing in
//! here reads the clock.
//!
//! | Rule | Input | Threshold | Boundary |
//! |------|-------|-----------|----------|
//! | Eligibility | time since joining a town | 14 days | inclusive (exactly 14 days is eligible) |
//! | Validity | time since last online | 14 days | inclusive (exactly 14 days is valid) |
//! | Grace | time since last online | 30 days | inclusive (exactly 30 days is grace) |

use super::passport::PassportKind;

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Minimum town membership before a passport can be issued.
pub const ELIGIBILITY_PERIOD_MS: i64 = 14 * MILLIS_PER_DAY;

/// Offline time a passport stays fully valid.
pub const VALIDITY_PERIOD_MS: i64 = 14 * MILLIS_PER_DAY;

/// Total offline time before a passport expires, validity period included.
pub const GRACE_PERIOD_MS: i64 = 30 * MILLIS_PER_DAY;

/// Eligibility verdict for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Joined their town at least [`ELIGIBILITY_PERIOD_MS`] ago.
    Eligible { elapsed_ms: i64 },
    /// Still inside the waiting period.
    NotYet { remaining_ms: i64 },
    /// Player is not a member of any town.
    NoTown,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible { .. })
    }
}

/// Validity verdict for an issued passport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// Special passports never lapse.
    Special,
    /// Within the validity period.
    Valid { remaining_ms: i64 },
    /// Past the validity period but within the grace period.
    Grace { remaining_ms: i64 },
    /// Past the grace period.
    Expired { overdue_ms: i64 },
    /// The API did not report a last-online time.
    Unknown,
}

impl Validity {
    /// Whether the holder may still travel on this passport (grace counts).
    pub fn is_usable(&self) -> bool {
        matches!(
            self,
            Validity::Special | Validity::Valid { .. } | Validity::Grace { .. }
        )
    }
}

/// Time between `since` and `now`, clamped at zero for timestamps in the future.
pub fn elapsed_ms(since: i64, now: i64) -> i64 {
    now.saturating_sub(since).max(0)
}

/// Decide eligibility from the time the player joined their current town.
pub fn eligibility(joined_town_at: Option<i64>, now: i64) -> Eligibility {
    let Some(joined) = joined_town_at else {
        return Eligibility::NoTown;
    };

    let elapsed = elapsed_ms(joined, now);
    if elapsed >= ELIGIBILITY_PERIOD_MS {
        Eligibility::Eligible { elapsed_ms: elapsed }
    } else {
        Eligibility::NotYet {
            remaining_ms: ELIGIBILITY_PERIOD_MS - elapsed,
        }
    }
}

/// Decide whether a passport of `kind` is still valid given the holder's last
/// online time.
pub fn validity(kind: &PassportKind, last_online: Option<i64>, now: i64) -> Validity {
    if kind.is_special() {
        return Validity::Special;
    }

    let Some(last_online) = last_online else {
        return Validity::Unknown;
    };

    let elapsed = elapsed_ms(last_online, now);
    if elapsed <= VALIDITY_PERIOD_MS {
        Validity::Valid {
            remaining_ms: VALIDITY_PERIOD_MS - elapsed,
        }
    } else if elapsed <= GRACE_PERIOD_MS {
        Validity::Grace {
            remaining_ms: GRACE_PERIOD_MS - elapsed,
        }
    } else {
        Validity::Expired {
            overdue_ms: elapsed - GRACE_PERIOD_MS,
        }
    }
}

/// Render a duration as its two most significant units.
///
/// `3 day(s) 4 hour(s)`, `5 hour(s) 12 minute(s)` or `42 minute(s)`.
pub fn format_duration(millis: i64) -> String {
    let total_seconds = millis.max(0) / 1000;
    let days = total_seconds / (24 * 3600);
    let hours = (total_seconds % (24 * 3600)) / 3600;
    let minutes = (total_seconds % 3600) / 60;

    if days > 0 {
        format!("{} day(s) {} hour(s)", days, hours)
    } else if hours > 0 {
        format!("{} hour(s) {} minute(s)", hours, minutes)
    } else {
        format!("{} minute(s)", minutes)
    }
}
