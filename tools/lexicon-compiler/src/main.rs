use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use rkyv::AlignedVec;
use sklon_protocol::{Case, Lexeme, LexemeId, Lexicon};
use tracing::{debug, info};

mod paradigm;

#[derive(Parser)]
#[command(author, version, about = "Compiles JSON lexicons to rkyv archives and declines their entries")]
struct Cli {
    /// Log engine decisions (anomalies, alternations) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a JSON lexicon and write it as an rkyv archive.
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Print every form of one lexicon entry.
    Paradigm {
        /// A JSON lexicon or a compiled archive.
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(long)]
        id: u32,
    },
    /// Print a number followed by a noun in agreement ("двадцать две собаки").
    Count {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(long)]
        id: u32,

        #[arg(short, long, allow_negative_numbers = true)]
        number: i64,

        #[arg(short, long, default_value = "nom")]
        case: Case,
    },
    /// Print an ordinal agreeing with a noun ("двадцать первая собака").
    Ordinal {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(long)]
        id: u32,

        #[arg(short, long, allow_negative_numbers = true)]
        number: i64,

        #[arg(short, long, default_value = "nom")]
        case: Case,

        #[arg(short, long)]
        plural: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Compile { input, output } => compile(&input, &output),
        Command::Paradigm { input, id } => {
            let lexicon = load(&input)?;
            print!("{}", paradigm::render(find(&lexicon, id)?));
            Ok(())
        }
        Command::Count { input, id, number, case } => {
            let lexicon = load(&input)?;
            let Lexeme::Noun(noun) = find(&lexicon, id)? else {
                bail!("entry {} is not a noun", LexemeId::new(id));
            };
            println!("{}", sklon_morph::count_phrase(noun, number, case));
            Ok(())
        }
        Command::Ordinal { input, id, number, case, plural } => {
            let lexicon = load(&input)?;
            let Lexeme::Noun(noun) = find(&lexicon, id)? else {
                bail!("entry {} is not a noun", LexemeId::new(id));
            };
            let ordinal = sklon_morph::ordinal(number, case, noun.properties, plural);
            println!("{} {}", ordinal, sklon_morph::noun_form(noun, case, plural));
            Ok(())
        }
    }
}

fn compile(input: &Path, output: &Path) -> anyhow::Result<()> {
    println!("📖 Reading JSON from {:?}...", input);
    let lexicon = read_json(input)?;

    println!("⚙️  Compiling lexicon version {} with {} entries...", lexicon.version, lexicon.entries.len());

    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&lexicon)
        .map_err(|e| anyhow!("failed to serialize the lexicon: {e}"))?;
    let bytes = serializer.into_serializer().into_inner();

    fs::write(output, &bytes).with_context(|| format!("failed to write {:?}", output))?;

    println!("✅ Success! {} bytes written to {:?}", bytes.len(), output);
    Ok(())
}

fn read_json(path: &Path) -> anyhow::Result<Lexicon> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
    let lexicon: Lexicon = serde_json::from_str(&text).with_context(|| format!("{:?} is not a lexicon", path))?;
    lexicon
        .validate()
        .map_err(|(id, e)| anyhow!("entry {id} is invalid: {e}"))?;
    debug!(entries = lexicon.entries.len(), "lexicon validated");
    Ok(lexicon)
}

/// Loads a JSON lexicon, or a compiled archive for any other extension.
fn load(path: &Path) -> anyhow::Result<Lexicon> {
    if path.extension().is_some_and(|ext| ext == "json") {
        return read_json(path);
    }
    let bytes = fs::read(path).with_context(|| format!("failed to read {:?}", path))?;
    // Archives must be read from an aligned buffer.
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(&bytes);
    let lexicon: Lexicon =
        rkyv::from_bytes(&aligned).map_err(|e| anyhow!("{:?} is not a valid lexicon archive: {e}", path))?;
    info!(entries = lexicon.entries.len(), version = lexicon.version, "archive loaded");
    lexicon
        .validate()
        .map_err(|(id, e)| anyhow!("entry {id} is invalid: {e}"))?;
    Ok(lexicon)
}

fn find(lexicon: &Lexicon, id: u32) -> anyhow::Result<&Lexeme> {
    let id = LexemeId::new(id);
    lexicon.find(id).with_context(|| format!("no entry {id} in the lexicon"))
}
