use chrono::{DateTime, Utc};
use log::{debug, info};
use snafu::OptionExt;

use crate::config::*;

/// The history of the draws of a session, oldest first.
///
/// Records are only appended. The only change allowed on an existing record is
/// the replacement of its winners with [`DrawLedger::edit`].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DrawLedger {
    records: Vec<DrawRecord>,
    // Identifiers are never reused, even after a reset, so that a stale id
    // cannot point to a newer record.
    next_id: u64,
}

impl DrawLedger {
    pub fn new() -> DrawLedger {
        DrawLedger {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Appends a new record, timestamped now.
    pub fn record(&mut self, winners: Vec<String>, prize: Option<PrizeSnapshot>) -> DrawRecord {
        self.record_at(winners, prize, Utc::now())
    }

    pub fn record_at(
        &mut self,
        winners: Vec<String>,
        prize: Option<PrizeSnapshot>,
        timestamp: DateTime<Utc>,
    ) -> DrawRecord {
        let id = self.fresh_id();
        let record = DrawRecord {
            id,
            winners,
            prize,
            timestamp,
            editable: true,
        };
        info!(
            "record: draw {} prize {:?} winners {:?}",
            record.id,
            record.prize.as_ref().map(|p| p.name.as_str()),
            record.winners
        );
        self.records.push(record.clone());
        record
    }

    /// Replaces the winners of the record `draw_id`.
    ///
    /// The new winners are not checked against the participants or the
    /// exclusion rules.
    pub fn edit(
        &mut self,
        draw_id: &str,
        new_winners: Vec<String>,
    ) -> Result<DrawRecord, DrawError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == draw_id)
            .context(DrawNotFoundSnafu { draw_id })?;
        debug!(
            "edit: draw {}: {:?} -> {:?}",
            draw_id, record.winners, new_winners
        );
        record.winners = new_winners;
        Ok(record.clone())
    }

    /// Forgets all the draws.
    pub fn reset(&mut self) {
        info!("reset: clearing {} draws", self.records.len());
        self.records.clear();
    }

    /// The records in insertion order.
    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    /// The records, most recent first.
    pub fn newest_first(&self) -> impl Iterator<Item = &DrawRecord> {
        self.records.iter().rev()
    }

    pub fn get(&self, draw_id: &str) -> Option<&DrawRecord> {
        self.records.iter().find(|r| r.id == draw_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn fresh_id(&mut self) -> DrawId {
        let id = format!("d{}", self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for DrawLedger {
    fn default() -> Self {
        DrawLedger::new()
    }
}
