//! decsv CLI - apply CSV field decoding to NDJSON event streams.
//!
//! The host integration of the processor: events come in as one JSON
//! object per line, go through the configured decodes, and come back out
//! as NDJSON. A failing event in fail-fast mode is emitted in its
//! rolled-back form with the error logged.
//!
//! ```bash
//! decsv run --config decode.json --input events.ndjson   # enrich a stream
//! decsv parse "a,b,c"                                    # debug one line
//! decsv example-config                                   # starting-point config
//! ```

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use decsv::{example_config, CsvFieldsProcessor, DecodeConfig, Event, ParseOptions};

#[derive(Parser)]
#[command(name = "decsv")]
#[command(about = "Decode CSV-encoded event fields into structured values", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a decode configuration to a stream of NDJSON events
    Run {
        /// Processor configuration file (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Input NDJSON file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output NDJSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a single CSV line and print the record as JSON
    Parse {
        /// The CSV line
        line: String,

        /// Field separator
        #[arg(short, long, default_value = ",")]
        separator: char,

        /// Trim leading whitespace from each field
        #[arg(long)]
        trim_leading_space: bool,
    },

    /// Print an example decode configuration
    ExampleConfig,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            input,
            output,
        } => cmd_run(&config, input.as_deref(), output.as_deref()),
        Commands::Parse {
            line,
            separator,
            trim_leading_space,
        } => cmd_parse(&line, separator, trim_leading_space),
        Commands::ExampleConfig => cmd_example_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_run(
    config_path: &Path,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_text = std::fs::read_to_string(config_path)?;
    let config: DecodeConfig = serde_json::from_str(&config_text)?;
    let processor = CsvFieldsProcessor::new(config)?;
    eprintln!("Loaded {processor}");

    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let mut total = 0usize;
    let mut failed = 0usize;
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut event: Event = serde_json::from_str(&line)
            .map_err(|e| format!("line {}: not a JSON object event: {e}", line_idx + 1))?;

        total += 1;
        if let Err(e) = processor.run(&mut event) {
            failed += 1;
            warn!(line = line_idx + 1, error = %e, "event decode failed");
        }

        serde_json::to_writer(&mut writer, &event)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    eprintln!("Processed {total} events, {failed} failed");
    Ok(())
}

fn cmd_parse(
    line: &str,
    separator: char,
    trim_leading_space: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !separator.is_ascii() {
        return Err(format!("separator must be a single ASCII character, got '{separator}'").into());
    }

    let options = ParseOptions {
        separator: separator as u8,
        trim_leading_space,
    };
    let record = decsv::parse_line(line, options)?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn cmd_example_config() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&example_config())?);
    Ok(())
}
