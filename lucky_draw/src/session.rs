//! The state of a drawing session and the operations that change it.
//!
//! Every operation takes the current [`Session`] by reference and returns a
//! new one. When an operation fails, the caller still holds the previous
//! session, unchanged, and may retry once the problem is fixed.

use log::{debug, info};
use rand::Rng;
use snafu::ensure;

use crate::config::*;
use crate::ledger::DrawLedger;
use crate::pool::{clamp_winner_count, merge_imported, normalize_names, resolve, resolve_checked};
use crate::prizes::PrizeCatalog;
use crate::validate_winner_count;

/// Presentation settings and rules of a session.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SessionSettings {
    pub title: String,
    pub subtitle: String,
    /// Opaque handle to the background image of the drawing screen.
    pub background_image: Option<String>,
    pub rules: DrawRules,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            title: "Lucky Draw".to_string(),
            subtitle: "Fair and square, good luck to everyone!".to_string(),
            background_image: None,
            rules: DrawRules::DEFAULT_RULES,
        }
    }
}

/// Everything that is needed to run one draw, after all the checks passed.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DrawPlan {
    pub pool: Vec<String>,
    pub count: usize,
    pub prize: Option<PrizeSnapshot>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Session {
    participants: Vec<String>,
    settings: SessionSettings,
    catalog: PrizeCatalog,
    ledger: DrawLedger,
}

impl Session {
    pub fn new(settings: SessionSettings) -> Session {
        Session {
            participants: Vec::new(),
            settings,
            catalog: PrizeCatalog::new(),
            ledger: DrawLedger::new(),
        }
    }

    // ******** Accessors ********

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn rules(&self) -> &DrawRules {
        &self.settings.rules
    }

    pub fn catalog(&self) -> &PrizeCatalog {
        &self.catalog
    }

    pub fn history(&self) -> &DrawLedger {
        &self.ledger
    }

    /// The names that the next draw would pick from, without any check.
    pub fn available_pool(&self) -> Vec<String> {
        resolve(
            &self.participants,
            self.ledger.records(),
            self.settings.rules.exclude_previous_winners,
        )
    }

    /// The configured number of winners, brought back into the range allowed
    /// by the current pool.
    pub fn clamped_winner_count(&self) -> usize {
        clamp_winner_count(
            self.settings.rules.winners_per_draw,
            self.available_pool().len(),
        )
    }

    // ******** Participants ********

    /// Replaces the participants.
    pub fn with_participants<S: AsRef<str>>(&self, names: &[S]) -> Session {
        let mut next = self.clone();
        next.participants = normalize_names(names);
        debug!(
            "with_participants: {} participants",
            next.participants.len()
        );
        next
    }

    /// Appends typed names to the participants. Names already present are
    /// added again as distinct entries.
    pub fn with_added_participants<S: AsRef<str>>(&self, names: &[S]) -> Session {
        let mut next = self.clone();
        next.participants.extend(normalize_names(names));
        debug!(
            "with_added_participants: {} -> {} participants",
            self.participants.len(),
            next.participants.len()
        );
        next
    }

    /// Adds imported names to the participants, skipping those already present.
    pub fn with_imported_participants<S: AsRef<str>>(&self, names: &[S]) -> Session {
        let mut next = self.clone();
        next.participants = merge_imported(&self.participants, names);
        info!(
            "with_imported_participants: {} -> {} participants",
            self.participants.len(),
            next.participants.len()
        );
        next
    }

    // ******** Settings ********

    pub fn with_settings(&self, settings: SessionSettings) -> Session {
        let mut next = self.clone();
        next.settings = settings;
        next
    }

    pub fn with_winner_count(&self, count: usize) -> Session {
        let mut next = self.clone();
        next.settings.rules.winners_per_draw = count;
        next
    }

    pub fn with_exclude_previous_winners(&self, exclude: bool) -> Session {
        let mut next = self.clone();
        next.settings.rules.exclude_previous_winners = exclude;
        next
    }

    pub fn with_rolling_speed(&self, speed: RollingSpeed) -> Session {
        let mut next = self.clone();
        next.settings.rules.rolling_speed = speed;
        next
    }

    pub fn with_background_image(&self, handle: Option<String>) -> Session {
        let mut next = self.clone();
        next.settings.background_image = handle;
        next
    }

    // ******** Prizes ********

    /// Adds a prize with a generated identifier.
    pub fn with_new_prize(&self, name: &str, image_url: Option<String>) -> (Session, Prize) {
        let mut next = self.clone();
        let prize = next.catalog.add(name, image_url);
        (next, prize)
    }

    /// Adds a prize with its own identifier.
    pub fn with_prize(&self, prize: Prize) -> Result<Session, DrawError> {
        let mut next = self.clone();
        next.catalog.insert(prize)?;
        Ok(next)
    }

    /// Deletes a prize. The selection is cleared if it pointed to this prize.
    /// Past draws keep their own copy of the prize.
    pub fn without_prize(&self, prize_id: &str) -> Result<Session, DrawError> {
        let mut next = self.clone();
        next.catalog.delete(prize_id)?;
        Ok(next)
    }

    pub fn with_selected_prize(&self, prize_id: Option<&str>) -> Result<Session, DrawError> {
        let mut next = self.clone();
        next.catalog.select(prize_id)?;
        Ok(next)
    }

    // ******** Drawing ********

    /// Runs all the checks needed before a draw, in the order they are
    /// reported to the operator:
    /// - there are participants, and not all of them are excluded
    /// - the number of winners fits the pool
    /// - a prize is selected, if there are prizes at all
    pub fn prepare_draw(&self) -> Result<DrawPlan, DrawError> {
        let rules = &self.settings.rules;
        let pool = resolve_checked(
            &self.participants,
            self.ledger.records(),
            rules.exclude_previous_winners,
        )?;
        validate_winner_count(rules.winners_per_draw, pool.len())?;
        let prize = self.catalog.selected().map(PrizeSnapshot::from);
        ensure!(
            self.catalog.is_empty() || prize.is_some(),
            NoPrizeSelectedSnafu {}
        );
        Ok(DrawPlan {
            pool,
            count: rules.winners_per_draw,
            prize,
        })
    }

    /// Draws the winners and records them in the history.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(Session, DrawRecord), DrawError> {
        let plan = self.prepare_draw()?;
        let winners = crate::draw(&plan.pool, plan.count, rng)?;
        let mut next = self.clone();
        let record = next.ledger.record(winners, plan.prize);
        Ok((next, record))
    }

    /// Replaces the winners of a past draw. The names are trimmed and blank
    /// ones dropped, but no check is done against the participants: the
    /// operator is trusted.
    pub fn with_edited_draw<S: AsRef<str>>(
        &self,
        draw_id: &str,
        winners: &[S],
    ) -> Result<(Session, DrawRecord), DrawError> {
        let mut next = self.clone();
        let record = next.ledger.edit(draw_id, normalize_names(winners))?;
        Ok((next, record))
    }

    /// Forgets all the draws, which also makes every past winner eligible
    /// again.
    pub fn with_reset_history(&self) -> Session {
        let mut next = self.clone();
        next.ledger.reset();
        next
    }
}
