use std::fs;
use std::io::{self, Write};
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use hinglish::core::{
    format_output_path, print_error_message, print_info_message, translate_document,
    HinglishOptions,
};
use hinglish::env::{core::LogLevel, core::NoColor, EnvVar};
use hinglish::translation::{RunState, TraversalMode};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Translate whole elements that hold a single text node
    Paragraphs,
    /// Translate every text node under <body>
    Text,
}

impl From<Mode> for TraversalMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Paragraphs => TraversalMode::Structural,
            Mode::Text => TraversalMode::Textual,
        }
    }
}

/// Rewrite the visible text of a web page into Hinglish
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// URL, data URL or path of the HTML document to translate
    target: String,

    /// Write output to <FILE>; supports %title% and %timestamp% (stdout by default)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Traversal mode (overrides the settings file)
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Groq API key (overrides the settings file and GROQ_API_KEY)
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// JSON file with persisted settings (translationMode, groqApiKey, ...)
    #[arg(long, value_name = "FILE")]
    settings: Option<String>,

    /// Translator config file (TOML or JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Enforce custom charset for the output document
    #[arg(short, long)]
    encoding: Option<String>,

    /// Timeout for fetching the page, in seconds
    #[arg(short, long, default_value_t = 60)]
    timeout: u64,

    /// Custom User-Agent string for fetching the page
    #[arg(short, long)]
    user_agent: Option<String>,

    /// Suppress verbosity
    #[arg(short, long)]
    silent: bool,
}

fn init_logging(silent: bool) {
    let level = if silent {
        "error".to_string()
    } else {
        LogLevel::get().unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("hinglish={level}")))
        .with_ansi(!NoColor::get_or_default(false))
        .with_writer(io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.silent);

    let options = HinglishOptions {
        api_key: cli.api_key,
        config_path: cli.config,
        encoding: cli.encoding,
        mode: cli.mode.map(TraversalMode::from),
        settings_path: cli.settings,
        silent: cli.silent,
        timeout: cli.timeout,
        user_agent: cli.user_agent,
    };

    let document = match translate_document(&options, &cli.target).await {
        Ok(document) => document,
        Err(error) => {
            print_error_message(&format!("Error: {error}"));
            process::exit(1);
        }
    };

    let write_result = match cli.output.as_deref() {
        Some(path) if path != "-" => {
            let path = format_output_path(path, document.title.as_deref());
            fs::write(&path, &document.data)
        }
        _ => io::stdout()
            .write_all(&document.data)
            .and_then(|_| io::stdout().flush()),
    };

    if let Err(error) = write_result {
        print_error_message(&format!("Error: could not write output: {error}"));
        process::exit(1);
    }

    match &document.outcome.state {
        RunState::FailedFatal(reason) => {
            print_error_message(&format!("Translation failed: {reason}"));
            process::exit(1);
        }
        _ => {
            if !options.silent {
                if let Some(report) = document.outcome.report {
                    print_info_message(&format!("Translation complete: {report}"));
                }
            }
        }
    }
}
