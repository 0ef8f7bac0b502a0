// Rolling names in the terminal while the operator waits to stop the draw.

use std::io::Write;

use crate::lottery::*;

/// Shows random selections of the pool until Enter is pressed.
///
/// The names on screen are not the winners: the draw itself happens after
/// the preview is stopped.
pub fn roll_until_enter(session: &Session) -> LotteryResult<Vec<String>> {
    let plan = session.prepare_draw().context(DrawSnafu {})?;
    if let Some(prize) = &plan.prize {
        eprintln!("Prize: {}", prize.name);
    }
    eprintln!("Press Enter to stop the draw");
    let mut preview = RollingPreview::start(
        plan.pool,
        plan.count,
        session.rules().rolling_speed,
        None,
        |names| {
            let mut err = std::io::stderr();
            // Nothing to do if the terminal is gone.
            let _ = write!(err, "\r\x1b[2K  {}", names.join("  |  "));
            let _ = err.flush();
        },
    )
    .context(DrawSnafu {})?;

    let mut line = String::new();
    let read = std::io::stdin().read_line(&mut line);
    let last = preview.stop();
    eprintln!();
    read.context(ReadingInputSnafu {})?;
    debug!("roll_until_enter: stopped after {} ticks", preview.ticks());
    Ok(last)
}
