//! Tessera CLI
//!
//! Sanitizes a stylesheet handed over as JSON and prints what survived.
//!
//! Input is either a serialized `Stylesheet` AST or, with `--input tokens`, a
//! JSON array of tokens from the host's tokenizer.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use tessera_common::warning::warn_once;
use tessera_css::parser::css_parser::parse_stylesheet;
use tessera_css::token::CSSToken;
use tessera_css::{
    Diagnostic, InputLimits, Sanitized, Severity, Stylesheet, StylesheetSanitizer,
};

/// Tessera: validate CSS against property value grammars
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Sanitize a stylesheet AST
    tessera sheet.json

    # Read tokens from stdin, allow var() anywhere and modern properties
    tokenize style.css | tessera --input tokens --extended

    # Machine-readable output
    tessera --json sheet.json
"#)]
struct Cli {
    /// JSON file to read; stdin when omitted
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// What the JSON input holds
    #[arg(long, value_enum, default_value_t = InputFormat::Ast)]
    input: InputFormat,

    /// Use the extended property set and matcher factory
    #[arg(short = 'e', long)]
    extended: bool,

    /// Print the sanitized stylesheet and diagnostics as JSON
    #[arg(long)]
    json: bool,

    /// Skip the rule count, value length, and depth checks
    #[arg(long)]
    no_limits: bool,

    /// Maximum number of rules, counting nested rules
    #[arg(long, default_value_t = InputLimits::default().max_rules)]
    max_rules: usize,
}

/// Shape of the JSON input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// A serialized `Stylesheet`
    Ast,
    /// An array of tokens
    Tokens,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let input = read_input(cli.path.as_deref())?;
    let stylesheet = match cli.input {
        InputFormat::Ast => {
            serde_json::from_str::<Stylesheet>(&input).context("input is not a JSON stylesheet")?
        }
        InputFormat::Tokens => {
            let tokens: Vec<CSSToken> =
                serde_json::from_str(&input).context("input is not a JSON token array")?;
            parse_stylesheet(&tokens)
        }
    };

    if !cli.no_limits {
        let limits = InputLimits {
            max_rules: cli.max_rules,
            ..InputLimits::default()
        };
        limits.check(&stylesheet)?;
    }

    let sanitizer = if cli.extended {
        StylesheetSanitizer::extended()
    } else {
        StylesheetSanitizer::new()
    };
    let sanitized = sanitizer.sanitize(stylesheet);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&sanitized)?);
    } else {
        print_sanitized(&sanitized);
    }
    Ok(())
}

/// Read the whole input file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    if let Some(path) = path {
        return fs::read_to_string(path).with_context(|| format!("reading {}", path.display()));
    }
    let mut input = String::new();
    let _ = io::stdin()
        .read_to_string(&mut input)
        .context("reading stdin")?;
    if input.trim().is_empty() {
        warn_once("CLI", "empty input, nothing to sanitize");
    }
    Ok(input)
}

/// Print the CSS to stdout and the diagnostics to stderr.
fn print_sanitized(sanitized: &Sanitized) {
    print!("{}", sanitized.stylesheet);

    for diagnostic in &sanitized.diagnostics {
        eprintln!("{}", render(diagnostic));
    }
    let errors = sanitized.diagnostics.error_count();
    if errors > 0 {
        eprintln!("{}", format!("{errors} node(s) dropped").bold());
    }
}

fn render(diagnostic: &Diagnostic) -> String {
    let label = format!("{}[{}]", diagnostic.severity, diagnostic.code);
    let label = match diagnostic.severity {
        Severity::Error => label.red().bold().to_string(),
        Severity::Note => label.cyan().to_string(),
    };
    let location = format!("at {}", diagnostic.location);
    format!("{label}: {} {}", diagnostic.message, location.dimmed())
}
