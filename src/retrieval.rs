//! Read-only queries over the history store.

use chrono::NaiveDate;
use thiserror::Error;

use crate::error::StoreError;
use crate::history::{DayEntry, History};
use crate::store::Store;

/// Date keys are `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Nothing was committed for this date.
    #[error("no words recorded for {0}")]
    NotFound(NaiveDate),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parse a canonical `YYYY-MM-DD` key.
///
/// Keys that chrono would accept but that are not written back identically
/// (`2024-1-2`, `+2024-01-02`, surrounding whitespace) are rejected, so a
/// key resolves only to the history entry stored under that exact string.
pub fn parse_date_key(key: &str) -> Result<NaiveDate, RetrievalError> {
    let invalid = || RetrievalError::InvalidDate(key.to_string());
    let date = NaiveDate::parse_from_str(key, DATE_FORMAT).map_err(|_| invalid())?;
    if date.format(DATE_FORMAT).to_string() != key {
        return Err(invalid());
    }
    Ok(date)
}

/// Every committed date, most recent first. Empty if nothing is committed.
pub fn list_dates(history: &dyn Store<History>) -> Result<Vec<NaiveDate>, RetrievalError> {
    Ok(history.load()?.dates_desc())
}

/// The records committed for `date`.
pub fn get_words(
    history: &dyn Store<History>,
    date: NaiveDate,
) -> Result<DayEntry, RetrievalError> {
    history
        .load()?
        .get(date)
        .cloned()
        .ok_or(RetrievalError::NotFound(date))
}

/// [`get_words`] keyed by a date string.
pub fn get_words_by_key(
    history: &dyn Store<History>,
    key: &str,
) -> Result<DayEntry, RetrievalError> {
    get_words(history, parse_date_key(key)?)
}
