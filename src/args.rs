use clap::{error::ErrorKind, CommandFactory, Parser};
use quick_error::quick_error;
use std::{ffi::OsString, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "dspand",
    about = "Split a payload into growing test cases to locate antivirus signatures"
)]
pub struct Cli {
    /// Payload to split
    #[arg(short, long, value_name = "PAYLOAD PATH")]
    pub path: Option<PathBuf>,

    /// Split size in bytes
    #[arg(short, long, value_name = "SIZE", num_args = 0..=1, default_missing_value = "")]
    pub size: Option<String>,

    /// Extension name (optional)
    #[arg(short = 't', long, value_name = "EXTENSION")]
    pub ext: Option<String>,

    /// Folder to save the test cases
    #[arg(short, long, value_name = "FOLDER PATH", num_args = 0..=1, default_missing_value = "")]
    pub folder: Option<String>,

    /// Do not repeat the full payload as an extra final test case
    #[arg(long)]
    pub no_duplicate_final: bool,

    /// Turn verbose logging on
    #[arg(short, long)]
    pub verbose: bool,
}

quick_error! {
    #[derive(Debug)]
    pub enum ArgsError {
        Help(usage: String) {
            display("{usage}")
        }
        NoArguments(usage: String) {
            display("{usage}")
        }
        InvalidOption {
            display("[x] Invalid option.  See -h for usage")
        }
        MissingSize(usage: String) {
            display("[x] Please specify a size to split\n\n{usage}")
        }
        NonPositiveSize(size: i64) {
            display("[x] Split size must be a positive integer, got {size}")
        }
        MissingFolder(usage: String) {
            display("[x] Please specify a folder to store the test cases\n\n{usage}")
        }
        MissingPayload(usage: String) {
            display("[x] Please specify a payload to split\n\n{usage}")
        }
    }
}

/// Validated options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub payload_path: PathBuf,
    pub step: usize,
    pub extension: Option<String>,
    pub folder: PathBuf,
    pub legacy_duplicate_final_chunk: bool,
    pub verbose: bool,
}

pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

pub fn parse_from<I, T>(args: I) -> Result<Config, ArgsError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp => ArgsError::Help(err.to_string()),
        _ => ArgsError::InvalidOption,
    })?;
    Config::try_from(cli)
}

impl TryFrom<Cli> for Config {
    type Error = ArgsError;

    fn try_from(cli: Cli) -> Result<Config, ArgsError> {
        if cli.path.is_none() && cli.size.is_none() && cli.ext.is_none() && cli.folder.is_none() {
            return Err(ArgsError::NoArguments(usage()));
        }

        let size = cli
            .size
            .as_deref()
            .and_then(|size| size.trim().parse::<i64>().ok())
            .ok_or_else(|| ArgsError::MissingSize(usage()))?;
        if size <= 0 {
            return Err(ArgsError::NonPositiveSize(size));
        }
        let step = usize::try_from(size).map_err(|_| ArgsError::MissingSize(usage()))?;

        // a bare -f arrives as an empty value
        let folder = cli
            .folder
            .map(PathBuf::from)
            .filter(|folder| folder.is_dir())
            .ok_or_else(|| ArgsError::MissingFolder(usage()))?;

        let payload_path = cli
            .path
            .ok_or_else(|| ArgsError::MissingPayload(usage()))?;

        Ok(Config {
            payload_path,
            step,
            extension: cli.ext.filter(|ext| !ext.is_empty()),
            folder,
            legacy_duplicate_final_chunk: !cli.no_duplicate_final,
            verbose: cli.verbose,
        })
    }
}
