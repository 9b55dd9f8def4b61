use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use quickaction::{
    config,
    menu::{ActionItem, Activation, QuickActionMenu},
};

#[derive(Parser, Debug)]
#[command(name = "quickaction", version, about = "Quick action popup menu model")]
struct Cli {
    /// Menu definition to use instead of the resolved config path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints the entries of the configured menu.
    List,
    /// Activates entries by position, in order, as a user tapping them would.
    Activate {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
    /// Writes a starter menu definition if none exists.
    Init,
    /// Prints the config path that would be used (if any).
    ConfigPath,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("init logger")?;

    let explicit = cli.config.as_deref();
    match cli.command {
        Command::List => {
            let menu = load_menu(explicit)?;
            for (pos, item) in menu.items().iter().enumerate() {
                println!("{}", list_row(pos, item));
            }
        }
        Command::Activate { positions } => {
            let mut menu = load_menu(explicit)?;
            for pos in positions {
                let act = menu
                    .activate(pos)
                    .with_context(|| format!("activate position {pos}"))?;
                println!("{}", activation_row(&act));
            }
        }
        Command::Init => {
            let path = config::default_config_path(explicit)?;
            config::ensure_config_file_exists(&path)?;
            println!("{}", path.display());
        }
        Command::ConfigPath => {
            if let Some(path) = config::resolve_config_path(explicit) {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

fn load_menu(explicit: Option<&Path>) -> Result<QuickActionMenu> {
    let Some(cfg) = config::load_optional(explicit)? else {
        bail!("No menu definition found (run `quickaction init` or pass --config)");
    };
    config::build_menu(&cfg)
}

fn list_row(pos: usize, item: &ActionItem) -> String {
    let icon = item
        .icon()
        .map(|i| i.path().display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let sticky = if item.is_sticky() { " sticky" } else { "" };
    format!(
        "[{pos}] id={} {} (icon={icon}){sticky}",
        item.action_id(),
        item.title()
    )
}

fn activation_row(act: &Activation) -> String {
    let state = if act.dismiss { "dismissed" } else { "open" };
    format!("{} {state}", act.action_id)
}
