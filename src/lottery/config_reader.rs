use crate::args::Args;
use crate::lottery::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(rename = "backgroundImagePath")]
    pub background_image_path: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
}

/// The participants typed in the session file: either a list of names or
/// a block of text with one name per line.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParticipantList {
    Names(Vec<String>),
    Text(String),
}

impl ParticipantList {
    pub fn names(&self) -> Vec<String> {
        match self {
            ParticipantList::Names(v) => normalize_names(v),
            ParticipantList::Text(s) => parse_participants_text(s),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PrizeConfig {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "imagePath")]
    pub image_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct DrawRulesConfig {
    #[serde(rename = "winnersPerDraw")]
    pub winners_per_draw: Option<JSValue>,
    #[serde(rename = "excludePreviousWinners")]
    pub exclude_previous_winners: Option<bool>,
    #[serde(rename = "rollingSpeed")]
    pub rolling_speed: Option<String>,
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<JSValue>,
}

impl DrawRulesConfig {
    pub fn draw_rules(&self) -> LotteryResult<DrawRules> {
        let winners_per_draw = match &self.winners_per_draw {
            Some(_) => read_js_int(&self.winners_per_draw)?,
            None => DrawRules::DEFAULT_RULES.winners_per_draw,
        };
        let rolling_speed = match &self.rolling_speed {
            Some(s) => parse_rolling_speed(s)?,
            None => DrawRules::DEFAULT_RULES.rolling_speed,
        };
        // A count of 0 is kept: each draw reports it, like any other
        // winner count that does not fit the pool.
        Ok(DrawRules {
            winners_per_draw,
            exclude_previous_winners: self
                .exclude_previous_winners
                .unwrap_or(DrawRules::DEFAULT_RULES.exclude_previous_winners),
            rolling_speed,
        })
    }

    pub fn seed(&self) -> LotteryResult<Option<u64>> {
        match &self.random_seed {
            Some(_) => read_js_int(&self.random_seed).map(|x| Some(x as u64)),
            None => Ok(None),
        }
    }
}

/// One step of a scripted session, as the operator would do it.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum SessionAction {
    Draw {
        #[serde(rename = "prizeId")]
        prize_id: Option<String>,
        winners: Option<usize>,
    },
    SelectPrize {
        #[serde(rename = "prizeId")]
        prize_id: Option<String>,
    },
    AddPrize(PrizeConfig),
    DeletePrize {
        #[serde(rename = "prizeId")]
        prize_id: String,
    },
    EditDraw {
        #[serde(rename = "drawId")]
        draw_id: String,
        winners: Vec<String>,
    },
    ResetHistory {},
    SetWinnerCount {
        winners: usize,
    },
    SetExcludePreviousWinners {
        enabled: bool,
    },
    AddParticipants {
        names: Vec<String>,
    },
    ImportParticipants(ParticipantSource),
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct LotteryConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(default)]
    pub participants: Option<ParticipantList>,
    #[serde(rename = "participantSources", default)]
    pub participant_sources: Vec<ParticipantSource>,
    #[serde(default)]
    pub prizes: Vec<PrizeConfig>,
    #[serde(default)]
    pub rules: DrawRulesConfig,
    #[serde(default)]
    pub actions: Vec<SessionAction>,
}

pub fn read_config(path: &str) -> LotteryResult<LotteryConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: LotteryConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> LotteryResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

pub fn parse_rolling_speed(s: &str) -> LotteryResult<RollingSpeed> {
    match s {
        "slow" => Ok(RollingSpeed::Slow),
        "medium" => Ok(RollingSpeed::Medium),
        "fast" => Ok(RollingSpeed::Fast),
        _ => whatever!("unknown rolling speed: {}", s),
    }
}

/// The command line options take precedence over the session file.
pub fn merge_args(config: LotteryConfig, args: &Args) -> LotteryResult<LotteryConfig> {
    let mut res = config;
    if let Some(title) = &args.title {
        res.output_settings.title = Some(title.clone());
    }
    if let Some(inputs) = &args.input {
        let provider = args
            .input_type
            .clone()
            .unwrap_or_else(|| "excel".to_string());
        for input in inputs.iter() {
            // Relative to the working directory, not to the session file.
            let p = fs::canonicalize(input).context(OpeningFileSnafu { path: input })?;
            res.participant_sources.push(ParticipantSource {
                provider: provider.clone(),
                file_path: p.display().to_string(),
                worksheet_name: args.excel_worksheet_name.clone(),
            });
        }
    }
    if let Some(names) = &args.participants {
        let mut all = res
            .participants
            .as_ref()
            .map(|l| l.names())
            .unwrap_or_default();
        all.extend(names.iter().cloned());
        res.participants = Some(ParticipantList::Names(all));
    }
    if let Some(winners) = args.winners {
        res.rules.winners_per_draw = Some(JSValue::from(winners));
    }
    if args.exclude_previous_winners {
        res.rules.exclude_previous_winners = Some(true);
    }
    if let Some(speed) = &args.rolling_speed {
        res.rules.rolling_speed = Some(speed.clone());
    }
    if let Some(prizes) = &args.prize {
        for name in prizes.iter() {
            res.prizes.push(PrizeConfig {
                id: None,
                name: name.clone(),
                image_path: None,
            });
        }
    }
    Ok(res)
}

fn read_js_int(x: &Option<JSValue>) -> LotteryResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s
            .trim()
            .parse::<usize>()
            .ok()
            .context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}
