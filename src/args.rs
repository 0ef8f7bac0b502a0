use clap::Parser;

/// This is a raffle / lucky draw program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the session: participants, prizes, rules and
    /// the list of actions to run. The other options override the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the summary of a session in JSON format. If provided,
    /// luckydraw will check that the summary of this run matches the reference. This only makes
    /// sense with a fixed --seed.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the session will be written in JSON
    /// format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, may be repeated) Files containing the names of the participants.
    #[clap(short, long, value_parser)]
    pub input: Option<Vec<String>>,

    /// (default excel) The type of the input files: excel, csv or text.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (name, may be repeated) Adds a participant.
    #[clap(short, long, value_parser)]
    pub participants: Option<Vec<String>>,

    /// (default 1) The number of winners picked at each draw.
    #[clap(short, long, value_parser)]
    pub winners: Option<usize>,

    /// (default 1) The number of draws to run when the session file does not list any action.
    #[clap(long, value_parser)]
    pub draws: Option<usize>,

    /// If passed, the winners of the previous draws cannot win again.
    #[clap(long, takes_value = false)]
    pub exclude_previous_winners: bool,

    /// (name, may be repeated) Adds a prize. When generating the draws, the prizes are
    /// handed out in order, one per draw.
    #[clap(long, value_parser)]
    pub prize: Option<Vec<String>>,

    /// (integer, optional) The seed of the random generator. Use it to replay a session.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    /// (default medium) The speed of the rolling names: slow, medium or fast.
    #[clap(long, value_parser)]
    pub rolling_speed: Option<String>,

    /// If passed, each draw shows the names rolling in the terminal until Enter is pressed.
    #[clap(long, takes_value = false)]
    pub interactive: bool,

    /// The title of the session.
    #[clap(long, value_parser)]
    pub title: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
