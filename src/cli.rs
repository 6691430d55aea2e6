use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::config::{GameConfig, DEFAULT_MAX, DEFAULT_MIN};
use crate::games::guess::{self, Session, Status};
use crate::logging::{self, LogSink};
use crate::script;

#[derive(Parser)]
#[command(name = "guessterm")]
#[command(about = "🎯 Guess the number, in your terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play interactively in the terminal
    Play {
        #[command(flatten)]
        round: RoundArgs,

        /// Write logs to this file (the game screen hides them otherwise)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
    /// Read commands from stdin and print the game state as JSON lines
    Script {
        #[command(flatten)]
        round: RoundArgs,
    },
    /// Show how to play
    Rules,
}

#[derive(Args, Clone, Debug)]
pub struct RoundArgs {
    /// Smallest number that can be drawn
    #[arg(long, default_value_t = DEFAULT_MIN, allow_negative_numbers = true)]
    pub min: i64,

    /// Largest number that can be drawn
    #[arg(long, default_value_t = DEFAULT_MAX, allow_negative_numbers = true)]
    pub max: i64,

    /// Seed for reproducible rounds
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for RoundArgs {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            seed: None,
        }
    }
}

impl RoundArgs {
    pub fn to_config(&self) -> Result<GameConfig> {
        Ok(GameConfig::new(self.min, self.max, self.seed)?)
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { round, log_file }) => play(&round, log_file).await?,
        None => play(&RoundArgs::default(), None).await?,

        Some(Commands::Script { round }) => {
            let config = round.to_config()?;
            logging::init(LogSink::Stderr)?;
            let mut session = Session::new(&config);
            let stdin = std::io::stdin();
            script::run(&mut session, stdin.lock(), std::io::stdout().lock())?;
        }

        Some(Commands::Rules) => print_rules(),
    }

    Ok(())
}

async fn play(round: &RoundArgs, log_file: Option<PathBuf>) -> Result<()> {
    let config = round.to_config()?;
    match &log_file {
        Some(path) => logging::init(LogSink::File(path))?,
        None => logging::init(LogSink::Off)?,
    }
    info!(min = config.min(), max = config.max(), seeded = config.seed().is_some(), "starting game");

    let terminal = ratatui::init();
    let result = guess::run_game(&config, terminal).await;
    ratatui::restore();

    let snapshot = result?;
    match snapshot.status {
        Status::Won => println!("🏆 You won in {} attempts.", snapshot.attempts),
        _ if snapshot.attempts > 0 => println!("👋 Left after {} attempts.", snapshot.attempts),
        _ => println!("👋 Goodbye!"),
    }
    Ok(())
}

fn print_rules() {
    println!("🎯 Number Guessing Game");
    println!();
    println!("   A secret number is drawn between {DEFAULT_MIN} and {DEFAULT_MAX} (change with --min/--max).");
    println!("   Type a guess and press Enter; you'll hear whether it was too low or too high.");
    println!();
    println!("   [Space] Start / pause / resume   [R] Try again with a new number");
    println!("   [A] See the answer (when not playing)   [Q] or [Esc] Quit");
}
