use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use thaime::dictionary::{self, DictionaryFormat, Groups};

/// Compile one or more dictionary sources into `lexicon.fst` + `lexicon.bincode`.
///
/// Sources sharing a prefix are merged in command-line order, so the entry
/// order within a prefix (the tie-break for equal weights) follows the inputs.
#[derive(Parser, Debug)]
#[command(name = "convert_table")]
struct Args {
    /// Dictionary sources (TSV `prefix<TAB>text<TAB>weight` or JSON)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "data/converted")]
    out: PathBuf,

    /// Source format; picked per file by extension when `auto`
    #[arg(long, value_enum, default_value = "auto")]
    format: DictionaryFormat,
}

fn merge_into(target: &mut Groups, source: Groups) {
    for (prefix, entries) in source {
        target.entry(prefix).or_default().extend(entries);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut grouped = Groups::new();
    for input in &args.inputs {
        let groups = dictionary::read_groups(input, args.format)
            .with_context(|| format!("reading {}", input.display()))?;
        let entries: usize = groups.values().map(Vec::len).sum();
        println!(
            "{}: {} prefixes, {} entries",
            input.display(),
            groups.len(),
            entries
        );
        merge_into(&mut grouped, groups);
    }

    dictionary::write_compiled(&grouped, &args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    println!(
        "wrote {} prefixes to {}",
        grouped.len(),
        args.out.display()
    );

    // the artifact must read back unchanged
    let back = dictionary::read_groups(&args.out, DictionaryFormat::Fst)?;
    anyhow::ensure!(back == grouped, "compiled dictionary does not round-trip");

    Ok(())
}
