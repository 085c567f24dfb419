//! typegram: parse TypeScript-style sources and report grammar diagnostics.
//!
//! Usage:
//!   typegram [options] <file...>
//!   typegram --type '<type text>'

mod logging;
mod report;
mod tree;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bumpalo::Bump;
use clap::{ArgAction, Parser as ClapParser};
use miette::{Context, IntoDiagnostic, Result};
use tracing::{debug, info};
use typegram_parser::{Parser, ParserOptions};
use typegram_scanner::Scanner;

use crate::report::SyntaxDiagnostic;
use crate::tree::TreePrinter;

#[derive(ClapParser, Debug)]
#[command(name = "typegram", version, about = "Parse TypeScript-style type grammar and report diagnostics")]
struct Cli {
    /// Source files to parse.
    #[arg(value_name = "FILE", required_unless_present = "type_text")]
    files: Vec<PathBuf>,

    /// Parse this text as a single type instead of reading files.
    #[arg(long = "type", value_name = "TEXT", conflicts_with = "files")]
    type_text: Option<String>,

    /// JSON file with parser options (camelCase keys).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start every file in ambient context, as if it were a `.d.ts` file.
    #[arg(long)]
    ambient: bool,

    /// Dump the token stream instead of parsing.
    #[arg(long, conflicts_with = "tree")]
    tokens: bool,

    /// Print the syntax tree of each file.
    #[arg(long)]
    tree: bool,

    /// Raise log verbosity (-v debug, -vv trace). TYPEGRAM_LOG or RUST_LOG override.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log JSON lines to stderr.
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    let base = match &cli.config {
        Some(path) => Some(load_config(path)?),
        None => None,
    };

    if let Some(text) = &cli.type_text {
        return Ok(run_type(text, options_for(&cli, base.as_ref(), "type.ts")));
    }

    let mut failed = false;
    for path in &cli.files {
        let options = options_for(&cli, base.as_ref(), &path.to_string_lossy());
        if !run_file(&cli, path, options)? {
            failed = true;
        }
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn load_config(path: &Path) -> Result<ParserOptions> {
    let text = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    let options: ParserOptions = serde_json::from_str(&text)
        .into_diagnostic()
        .wrap_err_with(|| format!("invalid parser options in {}", path.display()))?;
    debug!(?options, "loaded config");
    Ok(options)
}

/// Config file values, then the `.d.ts` default, then flags.
fn options_for(cli: &Cli, base: Option<&ParserOptions>, file_name: &str) -> ParserOptions {
    let mut options = match base {
        Some(base) => {
            let mut options = base.clone();
            options.ambient |= ParserOptions::for_file(file_name).ambient;
            options
        }
        None => ParserOptions::for_file(file_name),
    };
    if cli.ambient {
        options.ambient = true;
    }
    options
}

/// Returns `false` when the file had any diagnostic.
fn run_file(cli: &Cli, path: &Path, options: ParserOptions) -> Result<bool> {
    let source_text = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let file_name = path.to_string_lossy();

    if cli.tokens {
        print_tokens(&source_text);
        return Ok(true);
    }

    let arena = Bump::new();
    let parser = Parser::with_options(&arena, &file_name, &source_text, options);
    match parser.parse_source_file() {
        Ok(file) => {
            info!(file = %file_name, statements = file.statements.len(), "parsed");
            if cli.tree {
                print!("{}", TreePrinter::print(&file));
            }
            for diagnostic in &file.diagnostics {
                emit(&file_name, &source_text, diagnostic);
            }
            Ok(file.diagnostics.is_empty())
        }
        Err(err) => {
            emit(&file_name, &source_text, &err.diagnostic);
            Ok(false)
        }
    }
}

fn run_type(text: &str, options: ParserOptions) -> ExitCode {
    let arena = Bump::new();
    let parser = Parser::with_options(&arena, "<type>", text, options);
    match parser.parse_standalone_type() {
        Ok(parsed) => {
            print!("{}", TreePrinter::print_type(parsed.type_node));
            for diagnostic in &parsed.diagnostics {
                emit("<type>", text, diagnostic);
            }
            if parsed.diagnostics.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
        Err(err) => {
            emit("<type>", text, &err.diagnostic);
            ExitCode::FAILURE
        }
    }
}

fn print_tokens(source_text: &str) {
    for token in Scanner::new(source_text) {
        if token.value.is_empty() {
            println!("{}..{} {:?}", token.start, token.end, token.kind);
        } else {
            println!("{}..{} {:?} {:?}", token.start, token.end, token.kind, token.value);
        }
    }
}

fn emit(file_name: &str, source_text: &str, diagnostic: &typegram_diagnostics::Diagnostic) {
    let report = miette::Report::new(SyntaxDiagnostic::new(file_name, source_text, diagnostic));
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("typegram").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_declaration_files_default_to_ambient() {
        let cli = cli(&["lib.d.ts"]);
        assert!(options_for(&cli, None, "lib.d.ts").ambient);
        assert!(!options_for(&cli, None, "main.ts").ambient);
    }

    #[test]
    fn test_ambient_flag_overrides_config() {
        let cli = cli(&["--ambient", "main.ts"]);
        let base = ParserOptions { ambient: false, ..ParserOptions::default() };
        assert!(options_for(&cli, Some(&base), "main.ts").ambient);
    }

    #[test]
    fn test_config_values_survive() {
        let cli = cli(&["main.ts"]);
        let base: ParserOptions = serde_json::from_str(r#"{"allowReturnOutsideFunction": true}"#).unwrap();
        let options = options_for(&cli, Some(&base), "main.ts");
        assert!(options.allow_return_outside_function);
        assert!(!options.ambient);
    }

    #[test]
    fn test_type_mode_needs_no_files() {
        let cli = cli(&["--type", "A | B"]);
        assert!(cli.files.is_empty());
        assert_eq!(cli.type_text.as_deref(), Some("A | B"));
    }

    #[test]
    fn test_files_required_without_type() {
        assert!(Cli::try_parse_from(["typegram"]).is_err());
    }
}
