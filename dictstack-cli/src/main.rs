use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dictstack_core::types::DictionaryList;
use dictstack_engine::traits::{DictionaryHost, SnapshotStore};
use dictstack_runtime::config_store::DictionaryConfigStore;
use dictstack_runtime::paths::{dictionaries_path, resolve_config_dir};
use dictstack_runtime::service::DictCommandService;

#[derive(Parser)]
#[command(name = "dictstack")]
#[command(about = "Reorder, toggle and solo steno dictionaries", long_about = None)]
struct Cli {
    /// Directory holding the solo backup [default: $DICTSTACK_CONFIG_DIR or the plover config dir]
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Dictionary stack file (defaults to <config-dir>/dictionaries.json)
    #[arg(long, global = true)]
    dictionaries: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run command lines such as `SOLO_DICT:+spanish/main.json` in order
    ///
    /// Each invocation is its own solo session. A SOLO_DICT in a later
    /// invocation takes over the backup file, so an END_SOLO_DICT after that
    /// in yet another invocation has nothing left to restore. Drive multi-step
    /// solo through `shell` or a single `run` with several lines.
    Run {
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Read command lines from stdin until EOF
    Shell,
    /// Print the dictionary stack
    List,
    /// Show whether a solo backup is waiting to be restored
    Status,
}

fn print_stack(list: &DictionaryList) {
    for (i, e) in list.iter().enumerate() {
        let mark = if e.enabled { "on " } else { "off" };
        println!("{:>3}  [{mark}]  {}", i + 1, e.path);
    }
}

fn run_lines<I>(
    service: &DictCommandService,
    host: &mut DictionaryConfigStore,
    lines: I,
) -> anyhow::Result<()>
where
    I: IntoIterator<Item = String>,
{
    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        service
            .dispatch(host, line)
            .with_context(|| format!("command failed: {line}"))?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config_dir = resolve_config_dir(cli.config_dir.as_deref())?;
    let dictionaries = cli
        .dictionaries
        .unwrap_or_else(|| dictionaries_path(&config_dir));
    log::debug!(
        "config dir: {}, dictionaries: {}",
        config_dir.display(),
        dictionaries.display()
    );

    let mut host = DictionaryConfigStore::at_path(dictionaries);
    let service = DictCommandService::new(&config_dir);

    match cli.command {
        Commands::Run { lines } => {
            run_lines(&service, &mut host, lines)?;
            print_stack(&host.dictionaries()?);
        }
        Commands::Shell => {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = line.context("read stdin")?;
                // A bad line is reported, not fatal: the session keeps going.
                if let Err(e) = run_lines(&service, &mut host, [line]) {
                    eprintln!("{e:#}");
                }
            }
            print_stack(&host.dictionaries()?);
        }
        Commands::List => print_stack(&host.dictionaries()?),
        Commands::Status => match service.backup().load() {
            Ok(Some(snapshot)) => {
                println!(
                    "solo backup pending ({} dictionaries): {}",
                    snapshot.len(),
                    service.backup().path().display()
                );
                print_stack(&snapshot);
            }
            Ok(None) => println!("no solo backup"),
            Err(e) => println!("solo backup unreadable: {e:#}"),
        },
    }

    Ok(())
}
