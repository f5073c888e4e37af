use anyhow::{Context, Result, bail};
use argh::{EarlyExit, FromArgs};
use log::{error, info};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use wish::Interpreter;
use wish::config::Config;
use wish::error::ERROR_MESSAGE;
use wish::logging;

#[derive(FromArgs)]
/// A small shell. Runs commands from SCRIPT, or interactively when no script is given.
/// Commands separated by `&` on one line run in parallel.
struct Args {
    #[argh(option)]
    /// configuration file to use instead of ~/.config/wish/config.toml.
    config: Option<PathBuf>,

    #[argh(option)]
    /// log level (off, error, warn, info, debug, trace); overrides the configuration.
    log_level: Option<String>,

    #[argh(positional)]
    /// script to run.
    script: Vec<String>,
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().collect();
    let name = argv.first().map(String::as_str).unwrap_or("wish");
    let rest: Vec<&str> = argv.iter().skip(1).map(String::as_str).collect();

    let args = match Args::from_args(&[name], &rest) {
        Ok(args) => args,
        Err(EarlyExit {
            output,
            status: Ok(()),
        }) => {
            println!("{output}");
            return ExitCode::SUCCESS;
        }
        Err(EarlyExit { .. }) => return startup_failure(),
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            startup_failure()
        }
    }
}

fn startup_failure() -> ExitCode {
    eprint!("{ERROR_MESSAGE}");
    ExitCode::FAILURE
}

fn run(args: Args) -> Result<()> {
    if args.script.len() > 1 {
        bail!("expected at most one script, got {}", args.script.len());
    }

    let config = Config::load(args.config.as_deref())?;
    let level = args.log_level.as_deref().map(logging::parse_level).transpose()?;
    logging::init(&config.log, level)?;

    let mut interpreter = Interpreter::from_config(&config);
    match args.script.first() {
        Some(script) => {
            let file = File::open(script).with_context(|| format!("cannot open {script}"))?;
            info!("running script {script}");
            interpreter.run_script(BufReader::new(file))?;
        }
        None => {
            interpreter.repl(&config.prompt)?;
        }
    }
    Ok(())
}
