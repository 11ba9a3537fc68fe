mod app;
mod command;
mod config;
mod consts;
mod game;
mod high_score;
mod options;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::game::Game;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};
use lexopt::{Arg, Parser};
use std::error::Error;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run { config })
    }

    fn run(self) -> ExitCode {
        match self {
            Cli::Run { config } => match run(config.as_deref()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    if let Some(ioe) = e.downcast_ref::<io::Error>() {
                        if ioe.kind() == ErrorKind::BrokenPipe {
                            return ExitCode::SUCCESS;
                        }
                    }
                    eprintln!("snakerun: {e:?}");
                    ExitCode::from(2)
                }
            },
            Cli::Help => {
                println!("Usage: snakerun [-c|--config <path>]");
                println!();
                println!("Play Snake in your terminal");
                println!();
                println!("Options:");
                println!("  -c <path>, --config <path>");
                println!("                    Read configuration from the given file");
                println!();
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                ExitCode::SUCCESS
            }
            Cli::Version => {
                println!("snakerun {}", env!("CARGO_PKG_VERSION"));
                ExitCode::SUCCESS
            }
        }
    }
}

fn main() -> ExitCode {
    match Cli::from_parser(Parser::from_env()) {
        Ok(cli) => cli.run(),
        Err(e) => {
            eprintln!("snakerun: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => Config::load(path, false),
        None => Config::load_default(),
    }
    .context("failed to load configuration")?;
    if let Some(path) = config.log_file() {
        init_tracing(&path);
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting snakerun");
    let (store, err) = config.high_score_store();
    if let Some(e) = err {
        let e: &(dyn Error + 'static) = &e;
        warn!(error = e, "high score will not be saved");
    }
    let game = Game::new(config.options, store);
    let terminal = ratatui::init();
    if let Err(e) = set_focus_reporting(&mut io::stdout(), true) {
        let e: &(dyn Error + 'static) = &e;
        warn!(error = e, "could not enable focus change reporting");
    }
    let r = App::new(game).run(terminal);
    let _ = set_focus_reporting(&mut io::stdout(), false);
    ratatui::restore();
    r?;
    info!("exiting");
    Ok(())
}

/// Turn the terminal's reporting of focus changes on or off.  Without it,
/// losing focus never reaches the game as an event.
fn set_focus_reporting<W: Write>(out: &mut W, enabled: bool) -> io::Result<()> {
    if enabled {
        execute!(out, EnableFocusChange)
    } else {
        execute!(out, DisableFocusChange)
    }
}

/// Send log messages to the file at `path`.  If the file cannot be opened,
/// nothing is logged.
fn init_tracing(path: &Path) {
    let file = path
        .parent()
        .map_or(Ok(()), fs_err::create_dir_all)
        .and_then(|()| {
            fs_err::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
        });
    let Ok(file) = file else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
