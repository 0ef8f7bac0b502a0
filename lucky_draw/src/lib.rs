mod config;
pub mod ledger;
pub mod manual;
pub mod pool;
pub mod preview;
pub mod prizes;
pub mod session;

use log::debug;
use rand::Rng;
use snafu::ensure;

pub use crate::config::*;
pub use crate::ledger::DrawLedger;
pub use crate::pool::{
    clamp_winner_count, merge_imported, normalize_names, parse_participants_text, resolve,
    resolve_checked,
};
pub use crate::preview::RollingPreview;
pub use crate::prizes::{resolve_selected, PrizeCatalog};
pub use crate::session::{DrawPlan, Session, SessionSettings};

/// Checks the bounds on the number of winners for a pool of the given size.
///
/// Callers are expected to run this check before starting a draw, in order to
/// report the problem to the operator. [`draw`] runs it again.
pub fn validate_winner_count(count: usize, pool_size: usize) -> Result<(), DrawError> {
    ensure!(count >= 1, WinnerCountTooSmallSnafu { count });
    ensure!(
        count <= pool_size,
        WinnerCountExceedsPoolSnafu { count, pool_size }
    );
    Ok(())
}

/// Picks `count` distinct positions in a pool of `pool_size` elements.
///
/// Each step picks a uniformly random position among the ones that are still
/// available and removes it: every ordered selection of `count` positions has
/// the same probability (partial Fisher-Yates).
pub fn draw_indices<R: Rng + ?Sized>(
    pool_size: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, DrawError> {
    validate_winner_count(count, pool_size)?;
    let mut remaining: Vec<usize> = (0..pool_size).collect();
    let mut picked: Vec<usize> = Vec::with_capacity(count);
    for _ in 0..count {
        let pos = rng.gen_range(0..remaining.len());
        picked.push(remaining.swap_remove(pos));
    }
    Ok(picked)
}

/// Draws `count` winners from the pool, without replacement.
///
/// Names are not deduplicated: if the same name appears twice in the pool,
/// both entries can be drawn. The function has no side effect, recording the
/// outcome in the history is up to the caller.
///
/// ```
/// use lucky_draw::draw;
/// use rand::SeedableRng;
///
/// let pool = vec!["Alice".to_string(), "Bob".to_string(), "Carol".to_string()];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
/// let winners = draw(&pool, 2, &mut rng)?;
/// assert_eq!(winners.len(), 2);
/// # Ok::<(), lucky_draw::DrawError>(())
/// ```
pub fn draw<R: Rng + ?Sized>(
    pool: &[String],
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, DrawError> {
    let indices = draw_indices(pool.len(), count, rng)?;
    let winners: Vec<String> = indices.iter().map(|idx| pool[*idx].clone()).collect();
    debug!(
        "draw: pool size: {:?} count: {:?} winners: {:?}",
        pool.len(),
        count,
        winners
    );
    Ok(winners)
}
