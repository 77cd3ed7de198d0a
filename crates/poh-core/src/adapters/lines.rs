//! Line-level ledger operations shared by the file and in-memory ledgers.

use tracing::warn;

use crate::domain::errors::LedgerError;
use crate::domain::passport::{
    is_structural_line, is_valid_kind_code, is_valid_username, Passport, PassportId,
    PassportKind,
};

/// Every passport row in `lines`, in order. Corrupted rows are logged and skipped.
pub(crate) fn scan<S: AsRef<str>>(lines: &[S]) -> Vec<Passport> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|line| match Passport::parse_line(line) {
            Some(passport) => Some(passport),
            None => {
                if !is_structural_line(line) {
                    warn!("Skipping invalid ledger line: {}", line);
                }
                None
            }
        })
        .collect()
}

/// Build the row for a new passport, checking the username against `lines`.
///
/// The row must stay a single `id,username,type` line, so both the username
/// and the type code are validated before anything is written.
pub(crate) fn next_row<S: AsRef<str>>(
    lines: &[S],
    username: &str,
    kind: PassportKind,
) -> Result<Passport, LedgerError> {
    let username = username.trim();
    if !is_valid_username(username) {
        return Err(LedgerError::InvalidUsername(username.to_string()));
    }
    if !is_valid_kind_code(kind.code()) {
        return Err(LedgerError::InvalidKind(kind.code().to_string()));
    }

    let existing = scan(lines);
    if let Some(held) = existing.iter().find(|p| p.belongs_to(username)) {
        return Err(LedgerError::AlreadyIssued {
            username: held.username.clone(),
            id: held.id.to_string(),
        });
    }

    let id = match existing.iter().map(|p| p.id).max() {
        Some(max) => max
            .next()
            .ok_or_else(|| LedgerError::IdsExhausted(max.to_string()))?,
        None => PassportId(1),
    };

    Ok(Passport::new(id, username, kind))
}

/// Split `lines` into the revoked row and everything else, order preserved.
pub(crate) fn remove_row<S: AsRef<str>>(
    lines: &[S],
    username: &str,
) -> Result<(Passport, Vec<String>), LedgerError> {
    let mut revoked = None;
    let mut kept = Vec::with_capacity(lines.len());

    for line in lines.iter().map(AsRef::as_ref) {
        match Passport::parse_line(line) {
            Some(passport) if revoked.is_none() && passport.belongs_to(username) => {
                revoked = Some(passport);
            }
            _ => kept.push(line.to_string()),
        }
    }

    revoked
        .map(|passport| (passport, kept))
        .ok_or_else(|| LedgerError::NotFound(username.trim().to_string()))
}
