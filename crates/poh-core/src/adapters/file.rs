use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::lines;
use crate::domain::errors::LedgerError;
use crate::domain::passport::{Passport, PassportKind, LEDGER_HEADER};
use crate::ports::outbound::PassportLedger;

/// Passport ledger stored as a line-oriented text file.
///
/// The file is reread on every call so edits made outside the process (or a
/// sync from another officer) are picked up immediately.
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    /// Open the ledger at `path`, creating it with a header line when missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, format!("{}\n", LEDGER_HEADER))?;
            info!("Created new passport ledger at {}", path.display());
        } else {
            debug!("Using passport ledger at {}", path.display());
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_lines(&self) -> Result<Vec<String>, LedgerError> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(contents.lines().map(str::to_string).collect())
    }

    /// Replace the file contents via a synced temporary sibling.
    fn write_atomically(&self, contents: &str) -> Result<(), LedgerError> {
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

impl PassportLedger for FileLedger {
    fn passports(&self) -> Result<Vec<Passport>, LedgerError> {
        Ok(lines::scan(&self.read_lines()?))
    }

    fn issue(&mut self, username: &str, kind: PassportKind) -> Result<Passport, LedgerError> {
        let contents = fs::read_to_string(&self.path)?;
        let existing: Vec<&str> = contents.lines().collect();
        let passport = lines::next_row(&existing, username, kind)?;

        let mut file = fs::OpenOptions::new().append(true).open(&self.path)?;
        if !contents.is_empty() && !contents.ends_with('\n') {
            file.write_all(b"\n")?;
        }
        writeln!(file, "{}", passport.to_line())?;
        file.sync_all()?;

        info!("Issued passport {} to {}", passport.id, passport.username);
        Ok(passport)
    }

    fn revoke(&mut self, username: &str) -> Result<Passport, LedgerError> {
        let (revoked, kept) = lines::remove_row(&self.read_lines()?, username)?;
        self.write_atomically(&join_lines(&kept))?;

        info!("Revoked passport {} of {}", revoked.id, revoked.username);
        Ok(revoked)
    }

    fn import(&mut self, raw: &str) -> Result<usize, LedgerError> {
        let incoming: Vec<String> = raw.lines().map(str::to_string).collect();
        let count = lines::scan(&incoming).len();
        self.write_atomically(&join_lines(&incoming))?;

        info!("Imported {} passports into {}", count, self.path.display());
        Ok(count)
    }
}
