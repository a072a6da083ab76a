use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;
use thaime::{create_engine, trace_init, DictionaryFormat, EngineFactory, ThaimeConfig, ENGINES};
use tracing::info;

/// Drive a thaime session from the terminal.
///
/// Reads key tokens from stdin (`a`, `Space`, `Return`, `text:sawasdee`,
/// `mode:kedmanee`, `reset`, `quit`) and prints the notifications each one
/// produces. `Ctrl+2` style mode shortcuts need `--mode-shortcuts`.
#[derive(Parser, Debug)]
#[command(name = "thaime", version, about)]
struct Args {
    /// Engine to start (thaime-latin, thaime-kedmanee, thaime-phonetic)
    #[arg(long, default_value = "thaime-phonetic")]
    engine: String,

    /// Phonetic dictionary (JSON, TSV or compiled fst directory)
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Dictionary format
    #[arg(long, value_enum)]
    format: Option<DictionaryFormat>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter (overrides RUST_LOG)
    #[arg(long)]
    log_filter: Option<String>,

    /// Enable Ctrl+1/2/3 and Ctrl+` mode shortcuts
    #[arg(long)]
    mode_shortcuts: bool,

    /// List the advertised engines and exit
    #[arg(long)]
    list_engines: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ThaimeConfig::load_toml(path)
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ThaimeConfig::default(),
    };
    if let Some(path) = args.dictionary {
        config.dictionary = Some(path);
    }
    if let Some(format) = args.format {
        config.dictionary_format = format;
    }
    if args.mode_shortcuts {
        config.base_mut().mode_shortcuts = true;
    }

    trace_init::init_tracing(args.log_filter.as_deref(), &config.log_filter);

    if args.list_engines {
        for desc in ENGINES {
            println!(
                "{}\t{}\t{}/{}\t{}",
                desc.name, desc.long_name, desc.language, desc.layout, desc.description
            );
        }
        return Ok(());
    }

    let factory = EngineFactory::new(Arc::new(create_engine(&config)));
    let mut session = factory
        .create_engine(&args.engine)
        .ok_or_else(|| anyhow!("unknown engine: {}", args.engine))?;
    info!(engine = %args.engine, mode = %session.mode(), "ready");

    session.focus_in();
    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    thaime::host::run(&mut session, stdin.lock(), &mut out)?;
    session.focus_out();
    session.destroy();
    Ok(())
}
