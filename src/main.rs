//! CLI entry point for driveclean

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use driveclean::{ConsoleReporter, Engine, EngineConfig, SilentReporter, print_json};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "driveclean")]
#[command(about = "Renames files and folders that break OneDrive and SharePoint sync")]
#[command(version)]
struct Args {
    /// Root folder to scan and fix
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Skip entries matching pattern, subtree included (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Print the run summary as JSON instead of the message log
    #[arg(long = "json")]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let root = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(&args.path)
    };

    let engine = Engine::new(EngineConfig {
        ignore_patterns: args.ignore.clone(),
    });

    if args.json {
        let mut reporter = SilentReporter;
        match engine.run(&root, &mut reporter) {
            Ok(summary) => {
                if let Err(e) = print_json(&summary) {
                    eprintln!("driveclean: error writing output: {e}");
                    process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("driveclean: {e}");
                process::exit(1);
            }
        }
    } else {
        let mut reporter = ConsoleReporter::new(should_use_color(args.color));
        if let Err(e) = engine.run(&root, &mut reporter) {
            eprintln!("driveclean: {e}");
            process::exit(1);
        }
    }
}
