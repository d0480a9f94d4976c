// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Thin CLI front end: plumb bytes into [`sqllexer`]'s pure
//! string-to-string-plus-metadata core and back out again.
//!
//! Subcommands: `obfuscate`, `normalize`, `tokenize`, and
//! `obfuscate-and-normalize`. Per-field boolean flags mirror the
//! configuration structs one-to-one; fields that default to `true` in the
//! library get a paired `--no-*` flag to turn them back off, since a bare
//! `--replace-digits`-style switch can only ever turn a `false`-by-default
//! field on.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use sqllexer::{
    normalize, obfuscate, obfuscate_and_normalize, resolve_dialect, NormalizerConfig,
    ObfuscatorConfig,
};
use sqllexer::error::{Error, Result};

mod logger {
    pub(crate) fn init() -> Result<(), log::SetLoggerError> {
        fern::Dispatch::new()
            .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
            .level(
                std::env::var("SQLLEXER_LOG")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(log::LevelFilter::Off),
            )
            .chain(std::io::stderr())
            .apply()
    }
}

#[derive(Parser, Debug)]
#[command(name = "sqllexer", about = "Obfuscate and normalize SQL for safe logging", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Input file; defaults to stdin.
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Output file; defaults to stdout.
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// DBMS dialect: mssql, postgresql, mysql, oracle, snowflake, sqlite
    /// (plus the aliases sql-server/sqlserver/postgres). Unset is generic SQL.
    #[arg(long, global = true)]
    dbms: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace literal values with `?`.
    Obfuscate(ObfuscatorFlags),
    /// Collapse whitespace/aliases/placeholder lists and collect metadata.
    Normalize(NormalizerFlags),
    /// Print one line per token: `KIND\tstart..end\ttext`.
    Tokenize,
    /// Obfuscate then normalize in a single pass.
    ObfuscateAndNormalize {
        #[command(flatten)]
        obfuscator: ObfuscatorFlags,
        #[command(flatten)]
        normalizer: NormalizerFlags,
    },
}

#[derive(Args, Debug, Default)]
struct ObfuscatorFlags {
    /// Obfuscate digit runs inside identifiers.
    #[arg(long)]
    replace_digits: bool,
    /// Leave `$1`-style positional parameters untouched.
    #[arg(long)]
    no_replace_positional_parameter: bool,
    /// Leave `:name`/`@name` bind parameters untouched.
    #[arg(long)]
    no_replace_bind_parameter: bool,
    /// Leave `TRUE`/`FALSE` literals untouched.
    #[arg(long)]
    no_replace_boolean: bool,
    /// Leave `NULL` literals untouched.
    #[arg(long)]
    no_replace_null: bool,
    /// Recurse into `$func$...$func$` bodies instead of replacing them wholesale.
    #[arg(long)]
    dollar_quoted_func: bool,
    /// Do not obfuscate the right-hand operand of a JSON operator.
    #[arg(long)]
    keep_json_path: bool,
}

impl From<&ObfuscatorFlags> for ObfuscatorConfig {
    fn from(flags: &ObfuscatorFlags) -> Self {
        ObfuscatorConfig::new()
            .with_replace_digits(flags.replace_digits)
            .with_replace_positional_parameter(!flags.no_replace_positional_parameter)
            .with_replace_bind_parameter(!flags.no_replace_bind_parameter)
            .with_replace_boolean(!flags.no_replace_boolean)
            .with_replace_null(!flags.no_replace_null)
            .with_dollar_quoted_func(flags.dollar_quoted_func)
            .with_keep_json_path(flags.keep_json_path)
    }
}

#[derive(Args, Debug, Default)]
struct NormalizerFlags {
    /// Skip collecting referenced table names.
    #[arg(long)]
    no_collect_tables: bool,
    /// Skip collecting the SQL commands used.
    #[arg(long)]
    no_collect_commands: bool,
    /// Skip collecting comment text.
    #[arg(long)]
    no_collect_comments: bool,
    /// Skip collecting stored procedure names.
    #[arg(long)]
    no_collect_procedures: bool,
    /// Keep `AS` aliases instead of discarding them.
    #[arg(long)]
    keep_sql_alias: bool,
    /// Uppercase commands and keywords in the output.
    #[arg(long)]
    uppercase_keywords: bool,
    /// Drop the space directly inside parentheses/brackets.
    #[arg(long)]
    remove_space_between_parentheses: bool,
    /// Keep a single trailing semicolon instead of stripping it.
    #[arg(long)]
    keep_trailing_semicolon: bool,
    /// Keep identifier quoting instead of stripping it.
    #[arg(long)]
    keep_identifier_quotation: bool,
    /// Emit `{"sql": ..., "metadata": ...}` instead of bare SQL text.
    #[arg(long)]
    with_metadata: bool,
}

impl From<&NormalizerFlags> for NormalizerConfig {
    fn from(flags: &NormalizerFlags) -> Self {
        NormalizerConfig::new()
            .with_collect_tables(!flags.no_collect_tables)
            .with_collect_commands(!flags.no_collect_commands)
            .with_collect_comments(!flags.no_collect_comments)
            .with_collect_procedures(!flags.no_collect_procedures)
            .with_keep_sql_alias(flags.keep_sql_alias)
            .with_uppercase_keywords(flags.uppercase_keywords)
            .with_remove_space_between_parentheses(flags.remove_space_between_parentheses)
            .with_keep_trailing_semicolon(flags.keep_trailing_semicolon)
            .with_keep_identifier_quotation(flags.keep_identifier_quotation)
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    let mut buf = String::new();
    match path {
        Some(path) => {
            buf = fs::read_to_string(path).map_err(Error::Read)?;
        }
        None => {
            io::stdin().read_to_string(&mut buf).map_err(Error::Read)?;
        }
    }
    Ok(buf)
}

fn write_output(path: Option<&PathBuf>, text: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, text).map_err(Error::Write),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(text.as_bytes()).map_err(Error::Write)?;
            stdout.write_all(b"\n").map_err(Error::Write)
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let dialect = resolve_dialect(cli.dbms.as_deref());
    let input = read_input(cli.input.as_ref())?;

    match &cli.command {
        Command::Obfuscate(flags) => {
            let config = ObfuscatorConfig::from(flags);
            Ok(obfuscate(&input, &config, dialect))
        }
        Command::Normalize(flags) => {
            let config = NormalizerConfig::from(flags);
            let (sql, metadata) = normalize(&input, &config, dialect);
            render(sql, metadata, flags.with_metadata)
        }
        Command::ObfuscateAndNormalize { obfuscator, normalizer } => {
            let obf_config = ObfuscatorConfig::from(obfuscator);
            let norm_config = NormalizerConfig::from(normalizer);
            let (sql, metadata) = obfuscate_and_normalize(&input, &obf_config, &norm_config, dialect);
            render(sql, metadata, normalizer.with_metadata)
        }
        Command::Tokenize => Ok(tokenize(&input, dialect)),
    }
}

fn render(sql: String, metadata: sqllexer::StatementMetadata, with_metadata: bool) -> Result<String> {
    if !with_metadata {
        return Ok(sql);
    }
    #[derive(serde::Serialize)]
    struct Document {
        sql: String,
        metadata: sqllexer::StatementMetadata,
    }
    serde_json::to_string(&Document { sql, metadata }).map_err(Error::Serialize)
}

fn tokenize(input: &str, dialect: &'static dyn sqllexer::Dialect) -> String {
    let mut lexer = sqllexer::Lexer::new(input, dialect);
    let mut out = String::new();
    loop {
        let token = lexer.scan();
        let is_eof = token.kind == sqllexer::TokenKind::Eof;
        out.push_str(&format!(
            "{:?}\t{}..{}\t{:?}\n",
            token.kind,
            token.start,
            token.end,
            token.text(input)
        ));
        if is_eof {
            break;
        }
    }
    out
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = logger::init() {
        eprintln!("warning: failed to initialize logger: {err}");
    }

    match run(&cli).and_then(|text| write_output(cli.output.as_ref(), &text).map(|_| ())) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            eprintln!("sqllexer: {err}");
            std::process::exit(1);
        }
    }
}
