//! Participant pool: which names can be drawn.

use std::collections::HashSet;

use log::debug;
use snafu::ensure;

use crate::config::*;

/// Trims the names and drops the ones that are empty. The order is kept and
/// duplicates are kept as distinct entries.
pub fn normalize_names<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Splits a block of text with one name per line into participants.
pub fn parse_participants_text(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    normalize_names(&lines)
}

/// All the names that appear in the winners of any record of the history.
pub fn past_winners(history: &[DrawRecord]) -> HashSet<&str> {
    history
        .iter()
        .flat_map(|record| record.winners().iter())
        .map(|s| s.as_str())
        .collect()
}

/// Computes the drawable pool.
///
/// Without exclusion, this is the normalized input. With exclusion, every
/// name that won at least once (in any record currently in the history) is
/// removed, including all of its duplicates.
pub fn resolve<S: AsRef<str>>(
    raw_names: &[S],
    history: &[DrawRecord],
    exclude_past_winners: bool,
) -> Vec<String> {
    let names = normalize_names(raw_names);
    if !exclude_past_winners {
        return names;
    }
    let excluded = past_winners(history);
    debug!("resolve: excluding {:?} past winners", excluded.len());
    names
        .into_iter()
        .filter(|name| !excluded.contains(name.as_str()))
        .collect()
}

/// Same as [`resolve`], but an empty pool is an error.
///
/// The two cases are kept apart: no participants at all, or participants who
/// have all won already.
pub fn resolve_checked<S: AsRef<str>>(
    raw_names: &[S],
    history: &[DrawRecord],
    exclude_past_winners: bool,
) -> Result<Vec<String>, DrawError> {
    let participants = normalize_names(raw_names).len();
    ensure!(participants > 0, NoParticipantsSnafu {});
    let pool = resolve(raw_names, history, exclude_past_winners);
    ensure!(!pool.is_empty(), ExhaustedPoolSnafu { participants });
    Ok(pool)
}

/// Appends imported names to the existing participants.
///
/// Imported names that are already present (compared after trimming, case
/// sensitive) are skipped. Duplicates inside the imported list itself are
/// kept.
pub fn merge_imported<S: AsRef<str>, T: AsRef<str>>(existing: &[S], imported: &[T]) -> Vec<String> {
    let mut merged = normalize_names(existing);
    let present: HashSet<String> = merged.iter().cloned().collect();
    let new_names: Vec<String> = normalize_names(imported)
        .into_iter()
        .filter(|name| !present.contains(name))
        .collect();
    debug!(
        "merge_imported: {:?} existing, {:?} new names",
        merged.len(),
        new_names.len()
    );
    merged.extend(new_names);
    merged
}

/// Brings a requested number of winners back into `[1, available]`.
/// With nobody available, the count falls back to 1.
pub fn clamp_winner_count(requested: usize, available: usize) -> usize {
    if available == 0 {
        1
    } else {
        requested.clamp(1, available)
    }
}
