use super::lines;
use crate::domain::errors::LedgerError;
use crate::domain::passport::{Passport, PassportKind, LEDGER_HEADER};
use crate::ports::outbound::PassportLedger;

/// In-memory ledger for unit tests.
///
/// Holds raw lines so revoke and import behave exactly like `FileLedger`.
#[derive(Debug, Clone)]
pub struct InMemoryLedger {
    lines: Vec<String>,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            lines: vec![LEDGER_HEADER.to_string()],
        }
    }

    /// Ledger preloaded from file-format text.
    pub fn from_text(raw: &str) -> Self {
        Self {
            lines: raw.lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl PassportLedger for InMemoryLedger {
    fn passports(&self) -> Result<Vec<Passport>, LedgerError> {
        Ok(lines::scan(&self.lines))
    }

    fn issue(&mut self, username: &str, kind: PassportKind) -> Result<Passport, LedgerError> {
        let passport = lines::next_row(&self.lines, username, kind)?;
        self.lines.push(passport.to_line());
        Ok(passport)
    }

    fn revoke(&mut self, username: &str) -> Result<Passport, LedgerError> {
        let (revoked, kept) = lines::remove_row(&self.lines, username)?;
        self.lines = kept;
        Ok(revoked)
    }

    fn import(&mut self, raw: &str) -> Result<usize, LedgerError> {
        *self = Self::from_text(raw);
        Ok(lines::scan(&self.lines).len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_revoke_cycle() {
        let mut ledger = InMemoryLedger::new();
        ledger.issue("Steve", PassportKind::Standard).unwrap();
        ledger.issue("Alex", PassportKind::Special).unwrap();
        ledger.issue("Notch", PassportKind::Standard).unwrap();

        ledger.revoke("Alex").unwrap();

        assert_eq!(
            ledger.lines(),
            ["id,username,type", "1,Steve,STD", "3,Notch,STD"]
        );
        // Ids keep growing after a revoke.
        assert_eq!(ledger.issue("Alex", PassportKind::Standard).unwrap().id.0, 4);
    }

    #[test]
    fn test_rejects_the_same_kinds_as_the_file_ledger() {
        let mut ledger = InMemoryLedger::new();
        let forged = PassportKind::Other("STD\n9,Mallory,SPE".into());

        assert!(matches!(
            ledger.issue("Steve", forged),
            Err(LedgerError::InvalidKind(_))
        ));
        assert_eq!(ledger.lines(), ["id,username,type"]);
    }
}
