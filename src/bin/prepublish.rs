use std::{
    fs::File,
    io::{BufReader, Read as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "prepublish", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a session script and print panel snapshots as JSON.
    Replay(ReplayArgs),
    /// Print the checkpoint transition table.
    Table,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input replay script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Snapshot after every step instead of only at `snapshot` steps.
    #[arg(long)]
    every_step: bool,

    /// Print compact JSON.
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Replay(args) => cmd_replay(args),
        Command::Table => cmd_table(),
    }
}

fn read_script(path: &Path) -> anyhow::Result<prepublish::ReplayScript> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let mut s = String::new();
    BufReader::new(f)
        .read_to_string(&mut s)
        .with_context(|| format!("read script '{}'", path.display()))?;
    let script = prepublish::ReplayScript::from_json(&s).context("parse replay script")?;
    Ok(script)
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let script = read_script(&args.in_path)?;
    let mode = if args.every_step {
        prepublish::ReplayMode::EveryStep
    } else {
        prepublish::ReplayMode::Explicit
    };
    let snapshots = prepublish::replay_with(&script, mode)?;

    let json = if args.compact {
        serde_json::to_string(&snapshots)?
    } else {
        serde_json::to_string_pretty(&snapshots)?
    };
    println!("{json}");
    Ok(())
}

fn cmd_table() -> anyhow::Result<()> {
    for state in prepublish::Checkpoint::ALL_STATES {
        for event in prepublish::CheckpointEvent::ALL {
            let next = prepublish::transition(state, event);
            if next != state {
                println!("{state:<16} {event:<20} {next}");
            }
        }
    }
    Ok(())
}
