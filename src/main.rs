mod discover;
mod settings;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Result, WrapErr};
use ddf_data::{Database, LoadContext};
use ddf_types::KindTag;
use strum::IntoEnumIterator;

use crate::settings::{Overrides, Settings};

/// Load, link and check DDF data definitions.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// `.ddf` files, legacy `ANIMATED`/`SWITCHES` lumps, or directories
    /// containing them.
    paths: Vec<PathBuf>,

    /// Print the entries of one kind (e.g. THINGS) instead of a summary.
    #[arg(long, value_name = "KIND", value_parser = parse_kind)]
    list: Option<KindTag>,

    /// Treat recoverable errors as fatal.
    #[arg(long)]
    strict: bool,

    /// Downgrade unresolved required references to warnings.
    #[arg(long)]
    lax: bool,

    /// Settings file (default: ./ddf.toml if present).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More logging; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_kind(s: &str) -> Result<KindTag, String> {
    s.trim_matches(['<', '>']).parse().map_err(|_| {
        let kinds: Vec<&str> = KindTag::iter().map(Into::into).collect();
        format!("unknown kind '{s}' (expected one of {})", kinds.join(", "))
    })
}

fn init_logging(verbose: u8, settings: &Settings) {
    let level = match verbose {
        0 => settings.log_level.as_deref().unwrap_or("warn"),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let settings = Settings::load(
        cli.config.as_deref(),
        Overrides {
            strict: cli.strict,
            lax: cli.lax,
        },
    )
    .wrap_err("loading settings")?;
    init_logging(cli.verbose, &settings);

    let mut roots = cli.paths.clone();
    roots.extend(settings.data_dirs.iter().cloned());
    let sources = discover::find(&roots)?
        .iter()
        .map(|p| discover::read(p))
        .collect::<Result<Vec<_>>>()?;
    log::info!("{} resources found", sources.len());

    let mut ctx = LoadContext::new(settings.load_options());
    let mut db = Database::new();
    db.load_all(&sources, &mut ctx)?;
    db.link(&mut ctx)?;

    match cli.list {
        Some(kind) => {
            for (name, number) in db.list(kind) {
                match number {
                    Some(n) => println!("{name}:{n}"),
                    None => println!("{name}"),
                }
            }
        }
        None => {
            for kind in KindTag::iter() {
                println!("{:<12} {:>5}", kind.to_string(), db.count(kind));
            }
            println!("{} warnings", ctx.warning_count());
        }
    }
    Ok(())
}
