// ********* Data model ***********

use std::time::Duration;

use chrono::{DateTime, Utc};
use snafu::Snafu;

pub type PrizeId = String;
pub type DrawId = String;

/// A prize of the catalog, as configured by the operator.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Prize {
    pub id: PrizeId,
    pub name: String,
    /// Opaque handle to an image (data URL, path, ...). The engine never
    /// looks inside it.
    pub image_url: Option<String>,
}

/// The display fields of a prize, copied into a draw record at the time of
/// the draw. Deleting or changing the prize in the catalog afterwards does
/// not affect the records that already hold a snapshot.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PrizeSnapshot {
    pub id: PrizeId,
    pub name: String,
    pub image_url: Option<String>,
}

impl From<&Prize> for PrizeSnapshot {
    fn from(prize: &Prize) -> Self {
        PrizeSnapshot {
            id: prize.id.clone(),
            name: prize.name.clone(),
            image_url: prize.image_url.clone(),
        }
    }
}

/// One completed draw.
///
/// Only the list of winners may change after creation, and only through
/// [`crate::ledger::DrawLedger::edit`].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DrawRecord {
    pub(crate) id: DrawId,
    pub(crate) winners: Vec<String>,
    pub(crate) prize: Option<PrizeSnapshot>,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) editable: bool,
}

impl DrawRecord {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The winners, in the order they were drawn (or as last edited).
    pub fn winners(&self) -> &[String] {
        &self.winners
    }

    pub fn prize(&self) -> Option<&PrizeSnapshot> {
        self.prize.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }
}

// ********* Configuration **********

/// How fast the names cycle in the rolling preview.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RollingSpeed {
    Slow,
    Medium,
    Fast,
}

impl RollingSpeed {
    /// The delay between two refreshes of the preview.
    pub fn interval(&self) -> Duration {
        match self {
            RollingSpeed::Slow => Duration::from_millis(150),
            RollingSpeed::Medium => Duration::from_millis(70),
            RollingSpeed::Fast => Duration::from_millis(30),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RollingSpeed::Slow => "slow",
            RollingSpeed::Medium => "medium",
            RollingSpeed::Fast => "fast",
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DrawRules {
    /// The number of winners picked by each draw.
    pub winners_per_draw: usize,
    /// If set, anybody who appears in the winners of a record of the history
    /// is removed from the pool of the next draws.
    pub exclude_previous_winners: bool,
    pub rolling_speed: RollingSpeed,
}

impl DrawRules {
    pub const DEFAULT_RULES: DrawRules = DrawRules {
        winners_per_draw: 1,
        exclude_previous_winners: false,
        rolling_speed: RollingSpeed::Medium,
    };
}

impl Default for DrawRules {
    fn default() -> Self {
        DrawRules::DEFAULT_RULES
    }
}

// ********* Errors **********

/// The families of errors reported to the operator.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ErrorKind {
    /// Something must be fixed in the settings before drawing.
    Configuration,
    /// Everybody already won and the previous winners are excluded.
    ExhaustedPool,
    /// A stale reference to a draw or a prize.
    NotFound,
}

/// Errors that prevent an operation of the session from completing.
///
/// None of them is fatal: the session that was used for the failed operation
/// is left untouched and the operation can be retried once the condition is
/// corrected.
#[derive(Debug, Clone, Eq, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DrawError {
    #[snafu(display("No participants have been added. Add participants before drawing."))]
    NoParticipants {},

    #[snafu(display("The number of winners must be at least 1 (requested: {count})."))]
    WinnerCountTooSmall { count: usize },

    #[snafu(display(
        "The number of winners ({count}) cannot exceed the number of available participants ({pool_size})."
    ))]
    WinnerCountExceedsPool { count: usize, pool_size: usize },

    #[snafu(display("A prize must be selected before starting the draw."))]
    NoPrizeSelected {},

    #[snafu(display(
        "All {participants} participants have already won. Disable the exclusion of previous winners, reset the history or add new participants."
    ))]
    ExhaustedPool { participants: usize },

    #[snafu(display("The draw {draw_id} does not exist (anymore) in the history."))]
    DrawNotFound { draw_id: String },

    #[snafu(display("The prize {prize_id} does not exist (anymore) in the catalog."))]
    PrizeNotFound { prize_id: String },

    #[snafu(display("A prize with the identifier {prize_id} already exists."))]
    DuplicatePrizeId { prize_id: String },
}

impl DrawError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DrawError::NoParticipants {}
            | DrawError::WinnerCountTooSmall { .. }
            | DrawError::WinnerCountExceedsPool { .. }
            | DrawError::NoPrizeSelected {}
            | DrawError::DuplicatePrizeId { .. } => ErrorKind::Configuration,
            DrawError::ExhaustedPool { .. } => ErrorKind::ExhaustedPool,
            DrawError::DrawNotFound { .. } | DrawError::PrizeNotFound { .. } => ErrorKind::NotFound,
        }
    }
}
