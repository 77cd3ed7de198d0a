//! Verdicts paired with the name they were computed for, rendered the way
//! the office prints them.

use std::fmt;

use super::passport::Passport;
use super::rules::{format_duration, Eligibility, Validity};

/// Result of an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityReport {
    /// Canonical player name from the API.
    pub name: String,
    pub verdict: Eligibility,
}

impl fmt::Display for EligibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verdict {
            Eligibility::Eligible { .. } => write!(f, "{} is eligible.", self.name),
            Eligibility::NotYet { remaining_ms } => write!(
                f,
                "{} is NOT eligible ({} left).",
                self.name,
                format_duration(remaining_ms)
            ),
            Eligibility::NoTown => write!(
                f,
                "{} is NOT eligible (not a member of any town).",
                self.name
            ),
        }
    }
}

/// Result of a validity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidityReport {
    /// The username has no row in the ledger.
    NoPassport { username: String },
    /// The ledger row exists but the API does not know the player.
    UnknownPlayer { passport: Passport },
    /// The rule was applied.
    Checked { passport: Passport, verdict: Validity },
}

impl ValidityReport {
    pub fn verdict(&self) -> Option<Validity> {
        match self {
            ValidityReport::Checked { verdict, .. } => Some(*verdict),
            _ => None,
        }
    }
}

impl fmt::Display for ValidityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidityReport::NoPassport { username } => {
                write!(f, "{}: No passport found", username)
            }
            ValidityReport::UnknownPlayer { passport } => {
                write!(f, "Unknown username: {}", passport.username)
            }
            ValidityReport::Checked { passport, verdict } => {
                let username = &passport.username;
                match verdict {
                    Validity::Special => {
                        write!(f, "{}: SPECIAL passport, always valid", username)
                    }
                    Validity::Valid { remaining_ms } => write!(
                        f,
                        "{}: VALID ({} left)",
                        username,
                        format_duration(*remaining_ms)
                    ),
                    Validity::Grace { remaining_ms } => write!(
                        f,
                        "{}: IN GRACE PERIOD ({} left)",
                        username,
                        format_duration(*remaining_ms)
                    ),
                    Validity::Expired { .. } => write!(f, "{}: NOT VALID (expired)", username),
                    Validity::Unknown => write!(
                        f,
                        "{}: validity unknown (no last-online time)",
                        username
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::passport::{PassportId, PassportKind};
    use crate::domain::rules::MILLIS_PER_DAY;

    fn passport(kind: PassportKind) -> Passport {
        Passport::new(PassportId(1), "Steve", kind)
    }

    #[test]
    fn test_eligibility_lines() {
        let report = EligibilityReport {
            name: "Steve".into(),
            verdict: Eligibility::Eligible { elapsed_ms: 0 },
        };
        assert_eq!(report.to_string(), "Steve is eligible.");

        let report = EligibilityReport {
            name: "Steve".into(),
            verdict: Eligibility::NotYet {
                remaining_ms: 90 * 60 * 1000,
            },
        };
        assert_eq!(
            report.to_string(),
            "Steve is NOT eligible (1 hour(s) 30 minute(s) left)."
        );
    }

    #[test]
    fn test_validity_lines() {
        let checked = |verdict| ValidityReport::Checked {
            passport: passport(PassportKind::Standard),
            verdict,
        };

        assert_eq!(
            checked(Validity::Valid {
                remaining_ms: 2 * MILLIS_PER_DAY
            })
            .to_string(),
            "Steve: VALID (2 day(s) 0 hour(s) left)"
        );
        assert_eq!(
            checked(Validity::Grace {
                remaining_ms: 5 * 60 * 1000
            })
            .to_string(),
            "Steve: IN GRACE PERIOD (5 minute(s) left)"
        );
        assert_eq!(
            checked(Validity::Expired { overdue_ms: 1 }).to_string(),
            "Steve: NOT VALID (expired)"
        );
        assert_eq!(
            checked(Validity::Special).to_string(),
            "Steve: SPECIAL passport, always valid"
        );
    }

    #[test]
    fn test_missing_rows() {
        let report = ValidityReport::NoPassport {
            username: "alex".into(),
        };
        assert_eq!(report.to_string(), "alex: No passport found");
        assert_eq!(report.verdict(), None);
    }
}
