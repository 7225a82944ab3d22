//! Command line host for the NPeg grammar tools.
//!
//! Usage:
//!   npeg validate `<file>...` [--format text|json]
//!   npeg generate `<file>` [--target nim|rust] [--entry `<rule>`] [--output `<path>`]
//!   npeg tokens `<file>`
//!   npeg locate-server
//!
//! Exit status is 0 on success, 1 when a grammar is invalid or no server was
//! found, and 2 for any other error.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use grammar::{Diagnostic, Token, ValidationResult};
use host::{load_document, FsProbe, HostConfig, HostError, Session};
use scaffold::ScaffoldResult;

const EXIT_INVALID: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "npeg", version, about = "Validate NPeg grammars and generate parser scaffolds")]
struct Cli {
    /// Configuration file (TOML).
    #[arg(long, global = true, env = "NPEG_CONFIG")]
    config: Option<PathBuf>,

    /// Log more; repeat for more detail.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check grammar files and print diagnostics, one per line. With more
    /// than one file each line is prefixed with its file.
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Generate a parser scaffold from a grammar file.
    Generate {
        file: PathBuf,

        /// Target language (nim, rust). Defaults to the configured target.
        #[arg(short, long)]
        target: Option<String>,

        /// Rule to start parsing from. Defaults to the first rule defined.
        #[arg(short, long)]
        entry: Option<String>,

        /// Write the scaffold here instead of stdout. If this is a directory
        /// the file is named after the grammar with the target's extension.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the tokens of a grammar file as JSON.
    Tokens { file: PathBuf },
    /// Print the path of the language server binary.
    LocateServer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    file: &'a str,
    result: &'a ValidationResult,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = host::init_tracing(cli.verbose) {
        eprintln!("warning: {}", err);
    }

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => HostConfig::load(path)?,
        None => HostConfig::default(),
    };

    match cli.command {
        Command::Validate { files, format } => validate(&Session::new(config), &files, format),
        Command::Generate {
            file,
            target,
            entry,
            output,
        } => generate(
            &Session::new(config),
            &file,
            target.as_deref(),
            entry.as_deref(),
            output.as_deref(),
        ),
        Command::Tokens { file } => tokens(&Session::new(config), &file),
        Command::LocateServer => locate_server(config),
    }
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        println!("{}", diagnostic);
    }
}

fn validate(session: &Session, files: &[PathBuf], format: Format) -> Result<ExitCode> {
    let documents = files
        .iter()
        .map(|path| load_document(path))
        .collect::<host::Result<Vec<_>>>()?;
    let results: Vec<ValidationResult> = documents.iter().map(|d| session.validate(d)).collect();

    for (document, result) in documents.iter().zip(&results) {
        info!(
            file = %document.file_identifier,
            valid = result.is_valid(),
            rules = result.rule_names.len(),
            "validated grammar"
        );
    }

    match format {
        Format::Text if documents.len() == 1 => print_diagnostics(&results[0].diagnostics),
        Format::Text => {
            for (document, result) in documents.iter().zip(&results) {
                for diagnostic in &result.diagnostics {
                    println!("{}:{}", document.file_identifier, diagnostic);
                }
            }
        }
        Format::Json => {
            let reports: Vec<Report> = documents
                .iter()
                .zip(&results)
                .map(|(document, result)| Report {
                    file: &document.file_identifier,
                    result,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    if results.iter().all(ValidationResult::is_valid) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_INVALID))
    }
}

fn generate(
    session: &Session,
    file: &Path,
    target: Option<&str>,
    entry: Option<&str>,
    output: Option<&Path>,
) -> Result<ExitCode> {
    let document = load_document(file)?;
    let scaffold = match session.generate(&document, target, entry) {
        Ok(scaffold) => scaffold,
        Err(HostError::InvalidGrammar { diagnostics, .. }) => {
            print_diagnostics(&diagnostics);
            return Ok(ExitCode::from(EXIT_INVALID));
        }
        Err(err) => return Err(err.into()),
    };

    match output {
        Some(output) => {
            let path = scaffold_path(output, file, &scaffold);
            fs::write(&path, &scaffold.generated_text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(
                path = %path.display(),
                target = %scaffold.target_language_id,
                entry = %scaffold.entry_rule_name,
                "wrote scaffold"
            );
        }
        None => print!("{}", scaffold.generated_text),
    }
    Ok(ExitCode::SUCCESS)
}

/// A directory output gets a file named after the grammar, using the
/// target's extension.
fn scaffold_path(output: &Path, grammar: &Path, scaffold: &ScaffoldResult) -> PathBuf {
    if !output.is_dir() {
        return output.to_owned();
    }
    let mut name = grammar
        .file_stem()
        .unwrap_or_else(|| OsStr::new("scaffold"))
        .to_owned();
    name.push(".");
    name.push(scaffold.file_extension);
    output.join(name)
}

fn tokens(session: &Session, file: &Path) -> Result<ExitCode> {
    let document = load_document(file)?;
    let tokens: Vec<Token> = session.tokens(&document).collect();
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(ExitCode::SUCCESS)
}

/// Looks for the server even when the config leaves it disabled.
fn locate_server(mut config: HostConfig) -> Result<ExitCode> {
    config.language_server.enable = true;
    let session = Session::start(config, &FsProbe);
    match session.server() {
        Some(server) => {
            println!("{}", server.program.display());
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::from(EXIT_INVALID)),
    }
}
