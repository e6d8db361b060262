//! read-idt - Decode PHI/TLG .idt catalogs

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use encoding_rs::Encoding;
use serde::Serialize;

use idt_reader::{Entry, ScanLimits, decode_text, encoding_for_label, read_idt_with_limits};
use idt_reader::{write_entry, write_entry_decoded};

#[derive(Parser)]
#[command(name = "read-idt")]
#[command(
    version,
    about = "Decode a PHI/TLG .idt catalog to pipe-delimited lines",
    long_about = None
)]
#[command(after_help = "OUTPUT:
    author_id|work_id|block|author|title|[level_id|label|...]

EXAMPLES:
    read-idt lat0474.idt                        Raw bytes, one line per work
    read-idt --encoding windows-1252 lat0474.idt
    read-idt --format json tlg0012.idt")]
struct Cli {
    /// Input .idt file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Decode display strings from this code page (e.g. windows-1252)
    #[arg(short, long, value_name = "LABEL")]
    encoding: Option<String>,

    /// Stop with an error after this many works
    #[arg(long, value_name = "N")]
    max_works: Option<usize>,

    /// Stop with an error if a work has more section labels than this
    #[arg(long, value_name = "N")]
    max_labels: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Pipe-delimited lines
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Serialize)]
struct JsonEntry {
    author_id: String,
    author: String,
    work_id: String,
    block: u16,
    title: String,
    labels: Vec<JsonLabel>,
    offset: usize,
}

#[derive(Serialize)]
struct JsonLabel {
    level: u8,
    text: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let encoding = cli
        .encoding
        .as_deref()
        .map(encoding_for_label)
        .transpose()
        .map_err(|e| e.to_string())?;

    let limits = ScanLimits {
        max_works: cli.max_works,
        max_labels: cli.max_labels,
    };

    // Decode everything before writing so a failed scan leaves stdout empty
    let entries = read_idt_with_limits(&cli.input, limits).map_err(|e| e.to_string())?;
    log::info!("{}: {} works", cli.input, entries.len());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for entry in &entries {
        match (cli.format, encoding) {
            (Format::Json, enc) => {
                let line =
                    serde_json::to_string(&to_json(entry, enc)).map_err(|e| e.to_string())?;
                writeln!(out, "{line}").map_err(|e| e.to_string())?;
            }
            (Format::Text, Some(enc)) => {
                write_entry_decoded(&mut out, entry, enc).map_err(|e| e.to_string())?
            }
            (Format::Text, None) => write_entry(&mut out, entry).map_err(|e| e.to_string())?,
        }
    }

    out.flush().map_err(|e| e.to_string())
}

fn to_json(entry: &Entry, encoding: Option<&'static Encoding>) -> JsonEntry {
    let text = |bytes: &[u8]| match encoding {
        Some(enc) => decode_text(bytes, enc).into_owned(),
        None => String::from_utf8_lossy(bytes).into_owned(),
    };

    JsonEntry {
        author_id: entry.author.id.to_string(),
        author: text(&entry.author.name),
        work_id: entry.work.id.to_string(),
        block: entry.work.block,
        title: text(&entry.work.title),
        labels: entry
            .work
            .labels
            .iter()
            .map(|label| JsonLabel {
                level: label.level,
                text: text(&label.text),
            })
            .collect(),
        offset: entry.offset,
    }
}
