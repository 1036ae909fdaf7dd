use clap::Parser;
use colorsource::{
    GrammarRegistry, GrammarSource, GrammarTable, HighlightOptions, highlight_text,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "colorsource")]
#[command(version, about = "Highlight source code and print it as HTML")]
struct Args {
    /// Language name (built-in, or a grammar file on a --grammar-dir)
    #[arg(short, long, conflicts_with = "grammar")]
    language: Option<String>,

    /// Grammar definition file (.yaml, .yml or .json) to use instead of a language name
    #[arg(short, long, value_name = "FILE")]
    grammar: Option<PathBuf>,

    /// Prefix prepended to every class name
    #[arg(short, long, value_name = "P")]
    prefix: Option<String>,

    /// Directory searched for `<language>.yaml|.yml|.json` grammars (repeatable)
    #[arg(long = "grammar-dir", value_name = "DIR")]
    grammar_dirs: Vec<PathBuf>,

    /// YAML file with highlighting options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// List the available languages and exit
    #[arg(long)]
    list: bool,

    /// Input file; standard input when omitted
    input: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("no language given; use --language or --grammar")]
    NoLanguage,

    #[error(transparent)]
    Highlight(#[from] colorsource::Error),

    #[error("invalid grammar {path}: {message}")]
    Grammar { path: String, message: String },
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("colorsource: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, CliError> {
    let mut registry = GrammarRegistry::new();
    for dir in &args.grammar_dirs {
        registry.add_search_path(dir);
    }

    if args.list {
        return Ok(registry.languages().join("\n"));
    }

    let mut options = match &args.config {
        Some(path) => HighlightOptions::from_yaml_str(&read_file(path)?)?,
        None => HighlightOptions::default(),
    };
    if let Some(prefix) = &args.prefix {
        options.class_prefix = prefix.clone();
    }

    let grammar = match (&args.grammar, &args.language) {
        (Some(path), _) => Arc::new(load_grammar_file(path)?),
        (None, Some(name)) => registry.load(name).map_err(colorsource::Error::from)?,
        (None, None) => {
            let name = args
                .input
                .as_deref()
                .and_then(language_for_path)
                .ok_or(CliError::NoLanguage)?;
            registry.load(name).map_err(colorsource::Error::from)?
        }
    };

    let text = match &args.input {
        Some(path) => read_file(path)?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            text
        }
    };

    tracing::debug!(bytes = text.len(), grammar = ?grammar.name, "highlighting input");
    let pre = highlight_text(&text, &grammar, &options)?;
    Ok(pre.to_html().map_err(colorsource::Error::from)?)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn load_grammar_file(path: &Path) -> Result<GrammarTable, CliError> {
    let source = read_file(path)?;
    let parsed = if path.extension().is_some_and(|e| e == "json") {
        GrammarTable::from_json_str(&source)
    } else {
        GrammarTable::from_yaml_str(&source)
    };
    parsed.map_err(|e| CliError::Grammar {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Guess a language name from a file extension.
fn language_for_path(path: &Path) -> Option<&str> {
    match path.extension()?.to_str()? {
        "h" => Some("c"),
        "patch" => Some("diff"),
        ext => Some(ext),
    }
}
