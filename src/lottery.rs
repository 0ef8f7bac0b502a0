use log::{debug, info, warn};

use lucky_draw::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::lottery::config_reader::*;

pub mod config_reader;
pub mod interactive;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod io_image;
pub mod io_text;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum LotteryError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a positive number"))]
    ParsingJsonNumber {},
    #[snafu(display("Cannot find the directory of the session file"))]
    MissingParentDir {},

    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    // Import of participants
    #[snafu(display("Error opening spreadsheet {path}: {source}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("No worksheet found in spreadsheet {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name} not found in spreadsheet {path}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("No names found in the first column of {path}"))]
    NoNamesFound { path: String },
    #[snafu(display("Error opening CSV file {path}: {source}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file: {source}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Unknown provider for participants: {provider}"))]
    UnknownProvider { provider: String },

    #[snafu(display("The image {path} is {size} bytes large, the limit is {limit} bytes"))]
    ImageTooLarge { path: String, size: u64, limit: u64 },

    #[snafu(display("Error reading the terminal input"))]
    ReadingInput { source: std::io::Error },

    #[snafu(display("{source}"))]
    Draw { source: DrawError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

impl LotteryError {
    /// The errors that come from reading a list of participants. The list of
    /// participants is left unchanged when they happen.
    pub fn is_import_error(&self) -> bool {
        matches!(
            self,
            LotteryError::OpeningExcel { .. }
                | LotteryError::EmptyExcel { .. }
                | LotteryError::MissingWorksheet { .. }
                | LotteryError::NoNamesFound { .. }
                | LotteryError::CsvOpen { .. }
                | LotteryError::CsvLineParse { .. }
        )
    }
}

pub type LotteryResult<T> = Result<T, LotteryError>;

fn read_participant_data(
    root_path: &Path,
    source: &ParticipantSource,
) -> LotteryResult<Vec<String>> {
    let p = io_common::resolve_path(root_path, &source.file_path);
    info!("Attempting to read participants file {:?}", p);
    match source.provider.as_str() {
        "excel" | "xlsx" | "ods" => {
            io_excel::read_excel_names(&p, source.worksheet_name.as_deref())
        }
        "csv" => io_csv::read_csv_names(&p),
        "text" | "txt" => io_text::read_text_names(&p),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

fn read_optional_image(
    root_path: &Path,
    image_path: &Option<String>,
) -> LotteryResult<Option<String>> {
    match image_path {
        Some(p) => {
            let handle = io_image::read_image_handle(&io_common::resolve_path(root_path, p))?;
            Ok(Some(handle))
        }
        None => Ok(None),
    }
}

fn add_prize(session: &Session, prize: &PrizeConfig, root_path: &Path) -> LotteryResult<Session> {
    let image_url = read_optional_image(root_path, &prize.image_path)?;
    match &prize.id {
        Some(id) => session
            .with_prize(Prize {
                id: id.clone(),
                name: prize.name.clone(),
                image_url,
            })
            .context(DrawSnafu {}),
        None => Ok(session.with_new_prize(&prize.name, image_url).0),
    }
}

/// Builds the initial session: settings, participants and prizes.
pub fn build_session(config: &LotteryConfig, root_path: &Path) -> LotteryResult<Session> {
    let rules = config.rules.draw_rules()?;
    let defaults = SessionSettings::default();
    let settings = SessionSettings {
        title: config
            .output_settings
            .title
            .clone()
            .unwrap_or(defaults.title),
        subtitle: config
            .output_settings
            .subtitle
            .clone()
            .unwrap_or(defaults.subtitle),
        background_image: read_optional_image(
            root_path,
            &config.output_settings.background_image_path,
        )?,
        rules,
    };

    let mut session = Session::new(settings);
    if let Some(list) = &config.participants {
        session = session.with_participants(&list.names());
    }
    for source in config.participant_sources.iter() {
        let names = read_participant_data(root_path, source)?;
        session = session.with_imported_participants(&names);
    }
    for prize in config.prizes.iter() {
        session = add_prize(&session, prize, root_path)?;
    }
    info!(
        "build_session: {} participants, {} prizes",
        session.participants().len(),
        session.catalog().prizes().len()
    );
    Ok(session)
}

/// The actions run when the session file does not list any: `num_draws`
/// draws, with the prizes handed out in catalog order.
pub fn default_actions(session: &Session, num_draws: usize) -> Vec<SessionAction> {
    let prizes = session.catalog().prizes();
    (0..num_draws)
        .map(|idx| SessionAction::Draw {
            prize_id: prizes.get(idx).map(|p| p.id.clone()),
            winners: None,
        })
        .collect()
}

pub struct RunOptions {
    pub interactive: bool,
}

fn announce(record: &DrawRecord) {
    let prize = record
        .prize()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "(no prize)".to_string());
    info!(
        "Draw {}: {} -> {}",
        record.id(),
        prize,
        record.winners().join(", ")
    );
}

/// Applies one action of the operator to the session.
pub fn apply_action(
    session: &Session,
    action: &SessionAction,
    root_path: &Path,
    rng: &mut StdRng,
    options: &RunOptions,
) -> LotteryResult<Session> {
    debug!("apply_action: {:?}", action);
    let next = match action {
        SessionAction::Draw { prize_id, winners } => {
            let mut s = session.clone();
            if let Some(id) = prize_id {
                s = s
                    .with_selected_prize(Some(id.as_str()))
                    .context(DrawSnafu {})?;
            }
            if let Some(n) = winners {
                s = s.with_winner_count(*n);
            }
            if options.interactive {
                interactive::roll_until_enter(&s)?;
            }
            let (next, record) = s.draw(rng).context(DrawSnafu {})?;
            announce(&record);
            next
        }
        SessionAction::SelectPrize { prize_id } => session
            .with_selected_prize(prize_id.as_deref())
            .context(DrawSnafu {})?,
        SessionAction::AddPrize(prize) => add_prize(session, prize, root_path)?,
        SessionAction::DeletePrize { prize_id } => {
            session.without_prize(prize_id).context(DrawSnafu {})?
        }
        SessionAction::EditDraw { draw_id, winners } => {
            let (next, record) = session
                .with_edited_draw(draw_id, winners)
                .context(DrawSnafu {})?;
            info!(
                "Draw {} edited: {}",
                record.id(),
                record.winners().join(", ")
            );
            next
        }
        SessionAction::ResetHistory {} => session.with_reset_history(),
        SessionAction::SetWinnerCount { winners } => session.with_winner_count(*winners),
        SessionAction::SetExcludePreviousWinners { enabled } => {
            session.with_exclude_previous_winners(*enabled)
        }
        SessionAction::AddParticipants { names } => session.with_added_participants(names),
        SessionAction::ImportParticipants(source) => {
            let names = read_participant_data(root_path, source)?;
            session.with_imported_participants(&names)
        }
    };
    Ok(next)
}

/// Runs all the actions in order.
///
/// Errors of the session (bad winner count, missing prize, ...) are reported
/// and the action is skipped, as an operator would dismiss the notification and
/// go on. All the other errors stop the run.
pub fn run_actions(
    session: Session,
    actions: &[SessionAction],
    root_path: &Path,
    rng: &mut StdRng,
    options: &RunOptions,
) -> LotteryResult<(Session, Vec<JSValue>)> {
    let mut cur = session;
    let mut notifications: Vec<JSValue> = Vec::new();
    for (idx, action) in actions.iter().enumerate() {
        match apply_action(&cur, action, root_path, rng, options) {
            Ok(next) => cur = next,
            Err(LotteryError::Draw { source }) => {
                warn!("Action {} skipped: {}", idx + 1, source);
                eprintln!("Action {} skipped: {}", idx + 1, source);
                notifications.push(json!({
                    "action": idx + 1,
                    "kind": error_kind_name(source.kind()),
                    "message": source.to_string(),
                }));
            }
            Err(e) if e.is_import_error() => {
                warn!("Action {} skipped: {}", idx + 1, e);
                eprintln!("Action {} skipped: {}", idx + 1, e);
                notifications.push(json!({
                    "action": idx + 1,
                    "kind": "import",
                    "message": e.to_string(),
                }));
            }
            Err(e) => return Err(e),
        }
    }
    Ok((cur, notifications))
}

fn error_kind_name(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Configuration => "configuration",
        ErrorKind::ExhaustedPool => "exhaustedPool",
        ErrorKind::NotFound => "notFound",
    }
}

fn records_to_json(ledger: &DrawLedger) -> Vec<JSValue> {
    ledger
        .records()
        .iter()
        .map(|r| {
            let prize = r.prize().map(|p| json!({"id": p.id, "name": p.name}));
            json!({"draw": r.id(), "prize": prize, "winners": r.winners()})
        })
        .collect()
}

/// The summary of a session. Timestamps are left out so that two runs with
/// the same seed produce the same summary.
pub fn build_summary_js(
    session: &Session,
    seed: Option<u64>,
    notifications: &[JSValue],
) -> JSValue {
    let settings = session.settings();
    let prizes: Vec<JSValue> = session
        .catalog()
        .prizes()
        .iter()
        .map(|p| json!({"id": p.id, "name": p.name}))
        .collect();
    json!({
        "config": {
            "title": settings.title,
            "subtitle": settings.subtitle,
            "participants": session.participants().len(),
            "winnersPerDraw": settings.rules.winners_per_draw,
            "excludePreviousWinners": settings.rules.exclude_previous_winners,
            "rollingSpeed": settings.rules.rolling_speed.as_str(),
            "randomSeed": seed,
            "prizes": prizes,
        },
        "results": records_to_json(session.history()),
        "errors": notifications,
    })
}

fn print_history(session: &Session) {
    println!("{}", session.settings().title);
    if session.history().is_empty() {
        println!("No draws yet.");
        return;
    }
    // Most recent first.
    for record in session.history().newest_first() {
        let prize = record
            .prize()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "(no prize)".to_string());
        println!(
            "[{}] {} {}",
            record.timestamp().format("%Y-%m-%d %H:%M:%S"),
            record.id(),
            prize
        );
        if record.winners().is_empty() {
            println!("    no winner");
        }
        for winner in record.winners() {
            println!("    {}", winner);
        }
    }
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> LotteryResult<()> {
    let summary_ref = read_summary(reference_path)?;
    info!("summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    Ok(())
}

pub fn run_lottery(args: &Args) -> LotteryResult<()> {
    let (config, root_path): (LotteryConfig, PathBuf) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root_p = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {})?;
            (config, root_p.to_path_buf())
        }
        None => (LotteryConfig::default(), PathBuf::from(".")),
    };
    let config = merge_args(config, args)?;
    info!("config: {:?}", config);

    let seed = match args.seed {
        Some(s) => Some(s),
        None => config.rules.seed()?,
    };
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let session = build_session(&config, &root_path)?;
    let actions = if config.actions.is_empty() {
        default_actions(&session, args.draws.unwrap_or(1))
    } else {
        config.actions.clone()
    };
    let options = RunOptions {
        interactive: args.interactive,
    };
    let (session, notifications) = run_actions(session, &actions, &root_path, &mut rng, &options)?;

    print_history(&session);

    let summary_js = build_summary_js(&session, seed, &notifications);
    let pretty_js_stats = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
    let out = args
        .out
        .clone()
        .or_else(|| config.output_settings.output_path.clone());
    match out.as_deref() {
        Some("stdout") => println!("summary:{}", pretty_js_stats),
        Some(path) => {
            fs::write(path, &pretty_js_stats).context(WritingOutputSnafu { path })?;
            info!("Summary written to {}", path);
        }
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &pretty_js_stats)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(js: JSValue) -> LotteryConfig {
        serde_json::from_value(js).unwrap()
    }

    fn run(config: &LotteryConfig, seed: u64) -> (Session, Vec<JSValue>) {
        let root = PathBuf::from(".");
        let session = build_session(config, &root).unwrap();
        let actions = if config.actions.is_empty() {
            default_actions(&session, 1)
        } else {
            config.actions.clone()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let options = RunOptions { interactive: false };
        run_actions(session, &actions, &root, &mut rng, &options).unwrap()
    }

    #[test]
    fn scripted_session() {
        let c = config(json!({
            "participants": ["Alice", "Bob", "Carol", "Dave"],
            "prizes": [{"id": "p1", "name": "Gold"}, {"id": "p2", "name": "Silver"}],
            "rules": {"winnersPerDraw": 2, "excludePreviousWinners": true},
            "actions": [
                {"action": "draw", "prizeId": "p1"},
                {"action": "deletePrize", "prizeId": "p1"},
                {"action": "draw"},
                {"action": "selectPrize", "prizeId": "p2"},
                {"action": "draw"},
                {"action": "editDraw", "drawId": "d1", "winners": ["Erin"]},
                {"action": "editDraw", "drawId": "missing", "winners": ["Erin"]}
            ]
        }));
        let (session, notifications) = run(&c, 12);
        let records = session.history().records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].winners(), &["Erin".to_string()][..]);
        assert_eq!(records[0].prize().map(|p| p.name.as_str()), Some("Gold"));
        assert_eq!(records[1].prize().map(|p| p.name.as_str()), Some("Silver"));

        // The draw without selected prize and the stale edit were reported.
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0]["action"], json!(3));
        assert_eq!(notifications[0]["kind"], json!("configuration"));
        assert_eq!(notifications[1]["kind"], json!("notFound"));
    }

    #[test]
    fn edited_winners_are_trimmed_before_exclusion() {
        let c = config(json!({
            "participants": ["Alice", "Bob"],
            "rules": {"excludePreviousWinners": true},
            "actions": [
                {"action": "draw"},
                {"action": "editDraw", "drawId": "d1", "winners": ["  Alice  ", ""]}
            ]
        }));
        let (session, notifications) = run(&c, 4);
        assert!(notifications.is_empty());
        let record = session.history().get("d1").unwrap();
        assert_eq!(record.winners(), &["Alice".to_string()][..]);
        assert_eq!(session.available_pool(), vec!["Bob"]);
    }

    #[test]
    fn typed_participants_keep_duplicates() {
        let c = config(json!({
            "participants": ["Alice", "Bob"],
            "actions": [{"action": "addParticipants", "names": ["Bob", " Carol "]}]
        }));
        let (session, _) = run(&c, 1);
        assert_eq!(session.participants(), &["Alice", "Bob", "Bob", "Carol"]);
    }

    #[test]
    fn zero_winners_at_startup_is_reported_per_draw() {
        let c = config(json!({
            "participants": ["Alice", "Bob"],
            "rules": {"winnersPerDraw": 0},
            "actions": [
                {"action": "draw"},
                {"action": "setWinnerCount", "winners": 1},
                {"action": "draw"}
            ]
        }));
        let (session, notifications) = run(&c, 2);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0]["action"], json!(1));
        assert_eq!(notifications[0]["kind"], json!("configuration"));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn same_seed_same_summary() {
        let c = config(json!({
            "participants": "Alice\nBob\nCarol\n\nDave\nErin",
            "rules": {"winnersPerDraw": "2"},
            "actions": [{"action": "draw"}, {"action": "draw"}, {"action": "draw"}]
        }));
        let (s1, n1) = run(&c, 99);
        let (s2, n2) = run(&c, 99);
        assert_eq!(s1.participants().len(), 5);
        assert_eq!(
            build_summary_js(&s1, Some(99), &n1),
            build_summary_js(&s2, Some(99), &n2)
        );
    }

    #[test]
    fn exhausted_pool_is_reported() {
        let c = config(json!({
            "participants": ["Alice", "Bob"],
            "rules": {"winnersPerDraw": 1, "excludePreviousWinners": true},
            "actions": [
                {"action": "draw"},
                {"action": "draw"},
                {"action": "draw"},
                {"action": "resetHistory"},
                {"action": "draw"}
            ]
        }));
        let (session, notifications) = run(&c, 5);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0]["kind"], json!("exhaustedPool"));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().records()[0].id(), "d3");
    }

    #[test]
    fn default_actions_hand_out_prizes_in_order() {
        let c = config(json!({
            "participants": ["Alice", "Bob", "Carol"],
            "prizes": [{"name": "Gold"}, {"name": "Silver"}]
        }));
        let session = build_session(&c, Path::new(".")).unwrap();
        let actions = default_actions(&session, 3);
        assert_eq!(
            actions,
            vec![
                SessionAction::Draw {
                    prize_id: Some("p1".to_string()),
                    winners: None
                },
                SessionAction::Draw {
                    prize_id: Some("p2".to_string()),
                    winners: None
                },
                SessionAction::Draw {
                    prize_id: None,
                    winners: None
                },
            ]
        );
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let c = config(json!({
            "participantSources": [{"provider": "pdf", "filePath": "names.pdf"}]
        }));
        let err = build_session(&c, Path::new(".")).unwrap_err();
        assert!(matches!(err, LotteryError::UnknownProvider { .. }));
    }
}
