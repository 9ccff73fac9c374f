use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use reportdoc::{
    Config, JsonRenderer, Renderer, SeparatorPolicy, TextRenderer, TypstRenderer,
    document_to_pdf, parse_with_options,
};

/// Config file picked up from the input's directory when `--config` is absent.
const LOCAL_CONFIG: &str = "reportdoc.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pdf,
    Typst,
    Text,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Typst => "typ",
            Format::Text => "txt",
            Format::Json => "json",
        }
    }
}

#[derive(Parser)]
#[command(name = "reportdoc")]
#[command(about = "Render counseling report text as PDF, Typst, plain text or JSON")]
struct Cli {
    /// Input report file, `-` for stdin
    input: PathBuf,

    /// Output file (defaults to input name with the format's extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pdf)]
    format: Format,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit spacer blocks for blank lines between blocks
    #[arg(long)]
    spacers: bool,

    /// Keep the second table line as data unless it looks like a separator
    #[arg(long)]
    detect_separator: bool,

    /// Log more (repeat for trace output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let from_stdin = cli.input.as_os_str() == "-";
    let report = read_input(&cli.input, from_stdin)?;

    let mut config = load_config(&cli, from_stdin)?;
    if cli.spacers {
        config.parser.spacers = true;
    }
    if cli.detect_separator {
        config.parser.table_separator = SeparatorPolicy::Detect;
    }

    let document = parse_with_options(&report, &config.parser);
    info!("parsed {} blocks", document.len());

    let bytes = match cli.format {
        Format::Pdf => document_to_pdf(&document, &config)?,
        Format::Typst => TypstRenderer::new(&config).render(&document)?.into_bytes(),
        Format::Text => TextRenderer.render(&document)?.into_bytes(),
        Format::Json => JsonRenderer { pretty: true }.render(&document)?.into_bytes(),
    };

    // Text formats go to stdout when reading stdin without an explicit output
    let output = match cli.output {
        Some(path) => path,
        None if from_stdin && cli.format != Format::Pdf => {
            io::stdout().write_all(&bytes)?;
            return Ok(());
        }
        None if from_stdin => anyhow::bail!("--output is required for PDF output from stdin"),
        None => cli.input.with_extension(cli.format.extension()),
    };

    fs::write(&output, bytes).with_context(|| format!("writing {}", output.display()))?;
    println!("Created {}", output.display());
    Ok(())
}

fn read_input(path: &Path, from_stdin: bool) -> Result<String> {
    if from_stdin {
        let mut report = String::new();
        io::stdin()
            .read_to_string(&mut report)
            .context("reading stdin")?;
        return Ok(report);
    }
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_config(cli: &Cli, from_stdin: bool) -> Result<Config> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None if from_stdin => PathBuf::from(LOCAL_CONFIG),
        None => cli
            .input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(LOCAL_CONFIG),
    };
    Config::load(&path).with_context(|| format!("loading config {}", path.display()))
}
