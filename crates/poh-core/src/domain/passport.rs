//! # Passport Entities
//!
//! A ledger row is `id,username,type`. The first two commas split the line;
//! anything after the second comma belongs to the type field.

use std::fmt;
use std::str::FromStr;

/// Header written at the top of a fresh ledger.
pub const LEDGER_HEADER: &str = "id,username,type";

/// Sequential passport number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassportId(pub u32);

impl PassportId {
    /// The following id, or `None` once the id space is used up.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(PassportId)
    }
}

impl fmt::Display for PassportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:04}", self.0)
    }
}

/// Passport type code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PassportKind {
    /// `STD`: subject to the validity and grace periods.
    #[default]
    Standard,
    /// `SPE`: always valid.
    Special,
    /// Any other code found in the ledger, kept verbatim.
    Other(String),
}

impl PassportKind {
    pub fn code(&self) -> &str {
        match self {
            PassportKind::Standard => "STD",
            PassportKind::Special => "SPE",
            PassportKind::Other(code) => code,
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, PassportKind::Special)
    }

    /// Strict parse for newly issued passports: only `STD` and `SPE`, any case.
    pub fn issuable(code: &str) -> Option<Self> {
        code.parse()
            .ok()
            .filter(|kind| !matches!(kind, PassportKind::Other(_)))
    }
}

impl FromStr for PassportKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Ok(if code.eq_ignore_ascii_case("STD") {
            PassportKind::Standard
        } else if code.eq_ignore_ascii_case("SPE") {
            PassportKind::Special
        } else {
            PassportKind::Other(code.to_string())
        })
    }
}

impl fmt::Display for PassportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An issued passport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passport {
    pub id: PassportId,
    pub username: String,
    pub kind: PassportKind,
}

impl Passport {
    pub fn new(id: PassportId, username: impl Into<String>, kind: PassportKind) -> Self {
        Self {
            id,
            username: username.into(),
            kind,
        }
    }

    /// Parse one ledger line. Returns `None` for anything that is not a
    /// passport row: blank lines, the header, malformed ids.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.splitn(3, ',');
        let id = parts.next()?.trim().parse::<u32>().ok()?;
        let username = parts.next()?.trim();
        let kind = parts.next()?;

        if username.is_empty() {
            return None;
        }

        // Infallible parse.
        let kind = kind.parse().unwrap_or_default();
        Some(Self::new(PassportId(id), username, kind))
    }

    pub fn to_line(&self) -> String {
        format!("{},{},{}", self.id.0, self.username, self.kind.code())
    }

    pub fn belongs_to(&self, username: &str) -> bool {
        self.username.eq_ignore_ascii_case(username.trim())
    }
}

impl fmt::Display for Passport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {} [{}]", self.id, self.username, self.kind)
    }
}

/// Whether a ledger line is structural (blank or the header) rather than a
/// corrupted row worth reporting.
pub fn is_structural_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(LEDGER_HEADER)
}

/// Usernames go into a comma separated file, so commas and whitespace are
/// refused outright.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty() && !username.chars().any(|c| c == ',' || c.is_whitespace())
}

/// Type codes share the line with the other fields, so they must be
/// non-empty and free of commas and control characters.
pub fn is_valid_kind_code(code: &str) -> bool {
    !code.trim().is_empty() && !code.chars().any(|c| c == ',' || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_trims_fields() {
        let passport = Passport::parse_line(" 7 , Steve ,  SPE ").unwrap();
        assert_eq!(passport.id, PassportId(7));
        assert_eq!(passport.username, "Steve");
        assert_eq!(passport.kind, PassportKind::Special);
    }

    #[test]
    fn test_parse_line_keeps_extra_commas_in_type() {
        let passport = Passport::parse_line("3,Alex,VIP,gold").unwrap();
        assert_eq!(passport.kind, PassportKind::Other("VIP,gold".to_string()));
    }

    #[test]
    fn test_parse_line_rejects_non_rows() {
        assert!(Passport::parse_line(LEDGER_HEADER).is_none());
        assert!(Passport::parse_line("").is_none());
        assert!(Passport::parse_line("x,Steve,STD").is_none());
        assert!(Passport::parse_line("4,Steve").is_none());
        assert!(Passport::parse_line("4, ,STD").is_none());
    }

    #[test]
    fn test_kind_codes_case_insensitive() {
        assert_eq!("spe".parse::<PassportKind>().unwrap(), PassportKind::Special);
        assert_eq!("Std".parse::<PassportKind>().unwrap(), PassportKind::Standard);
        assert_eq!(PassportKind::Special.to_string(), "SPE");
    }

    #[test]
    fn test_issuable_accepts_only_known_codes() {
        assert_eq!(PassportKind::issuable("std"), Some(PassportKind::Standard));
        assert_eq!(PassportKind::issuable(" SPE "), Some(PassportKind::Special));
        assert_eq!(PassportKind::issuable("true"), None);
        assert_eq!(PassportKind::issuable(""), None);
    }

    #[test]
    fn test_kind_code_validation() {
        assert!(is_valid_kind_code("VIP"));
        assert!(!is_valid_kind_code(" "));
        assert!(!is_valid_kind_code("VIP,gold"));
        assert!(!is_valid_kind_code("STD\n9,Mallory,SPE"));
        assert!(!is_valid_kind_code("STD\r"));
        assert!(!is_valid_kind_code("S\u{7}TD"));
    }

    #[test]
    fn test_id_next_stops_at_max() {
        assert_eq!(PassportId(41).next(), Some(PassportId(42)));
        assert_eq!(PassportId(u32::MAX).next(), None);
    }

    #[test]
    fn test_id_display_is_zero_padded() {
        assert_eq!(PassportId(1).to_string(), "#0001");
        assert_eq!(PassportId(12345).to_string(), "#12345");
    }

    #[test]
    fn test_belongs_to_ignores_case() {
        let passport = Passport::new(PassportId(1), "Notch", PassportKind::Standard);
        assert!(passport.belongs_to("notch"));
        assert!(passport.belongs_to(" NOTCH "));
        assert!(!passport.belongs_to("notch2"));
    }

    #[test]
    fn test_username_validation() {
        assert!(is_valid_username("Some_Player1"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("bad,name"));
        assert!(!is_valid_username("two words"));
    }

    #[test]
    fn test_structural_lines() {
        assert!(is_structural_line("  "));
        assert!(is_structural_line("ID,Username,Type"));
        assert!(!is_structural_line("garbage"));
    }
}
