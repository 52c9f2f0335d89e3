mod app;
mod command;
mod config;
mod consts;
mod game;
mod render;
mod util;
use crate::app::App;
use crate::config::{Config, ConfigError};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use log::LevelFilter;
use simplelog::WriteLogger;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    log_level: Option<LevelFilter>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("log-level") => args.log_level = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }
}

const HELP: &str = concat!(
    "Usage: blocksnake [<options>]\n",
    "\n",
    "Play Snake in the terminal.  Steer with the arrow keys; press q or\n",
    "Ctrl-C to quit.\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>    Read configuration from the given file\n",
    "      --log-file <PATH>  Write log messages to the given file\n",
    "      --log-level <LVL>  Log messages at or above the given level\n",
    "  -h, --help             Show this help message and exit\n",
    "  -V, --version          Show the program version and exit\n",
);

fn main() -> ExitCode {
    match Command::from_parser(Parser::from_env()) {
        Ok(Command::Run(args)) => match setup(args) {
            Ok(app) => {
                let terminal = ratatui::init();
                let r = app.run(terminal);
                ratatui::restore();
                io_exit(r)
            }
            Err(e) => {
                eprintln!("blocksnake: {e:?}");
                ExitCode::from(2)
            }
        },
        Ok(Command::Help) => {
            print!("{HELP}");
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("blocksnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("blocksnake: {e}");
            ExitCode::from(2)
        }
    }
}

/// Load the configuration & start logging, producing the app to run
fn setup(args: Arguments) -> anyhow::Result<App> {
    let (config_path, allow_missing) =
        config_source(args.config).context("failed to load configuration")?;
    let config =
        Config::load(&config_path, allow_missing).context("failed to load configuration")?;
    let log_file = args.log_file.or_else(|| config.logging.file.clone());
    let log_level = args.log_level.unwrap_or(config.logging.level);
    if let Some(path) = log_file {
        let fp = fs_err::File::create(&path)?;
        WriteLogger::init(log_level, simplelog::Config::default(), fp)
            .context("failed to initialize logging")?;
    }
    log::info!("Starting blocksnake {}", env!("CARGO_PKG_VERSION"));
    log::info!("Using configuration file {}", config_path.display());
    let settings = config.settings().context("invalid configuration")?;
    Ok(App::new(settings, config.colors.palette))
}

/// Return the configuration file to read and whether it may be absent.  An
/// explicitly given file must exist; the default one need not.
fn config_source(path: Option<PathBuf>) -> Result<(PathBuf, bool), ConfigError> {
    match path {
        Some(path) => Ok((path, false)),
        None => Config::default_path().map(|path| (path, true)),
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("blocksnake").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(Arguments::default()));
    }

    #[test]
    fn all_args() {
        assert_eq!(
            parse(&[
                "-c",
                "snake.toml",
                "--log-file",
                "snake.log",
                "--log-level=debug"
            ])
            .unwrap(),
            Command::Run(Arguments {
                config: Some(PathBuf::from("snake.toml")),
                log_file: Some(PathBuf::from("snake.log")),
                log_level: Some(LevelFilter::Debug),
            })
        );
    }

    #[test]
    fn help() {
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-c", "x.toml", "-h"]).unwrap(), Command::Help);
    }

    #[test]
    fn version() {
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn bad_level() {
        assert!(parse(&["--log-level", "loud"]).is_err());
    }

    #[test]
    fn unknown_option() {
        assert!(parse(&["--wraparound"]).is_err());
    }

    #[test]
    fn explicit_config_must_exist() {
        assert_eq!(
            config_source(Some(PathBuf::from("snake.toml"))).unwrap(),
            (PathBuf::from("snake.toml"), false)
        );
    }

    #[test]
    fn default_config_may_be_missing() {
        if let Ok(path) = Config::default_path() {
            assert_eq!(config_source(None).unwrap(), (path, true));
        }
    }

    #[test]
    fn positional_argument() {
        assert!(parse(&["foo"]).is_err());
    }
}
