mod debug_report;

use headfinder::{HeadRuleTable, Language};
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "HEADFINDER_LOG";

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let table = match HeadRuleTable::for_language(config.language) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("error: bundled {} rules are invalid: {err}", config.language.name());
            std::process::exit(1);
        }
    };

    match config.category {
        None => debug_report::print_table(&table, config.color),
        Some(category) => {
            let children: Vec<&str> = config.children.iter().map(String::as_str).collect();
            debug_report::print_category(&table, &category, &children, config.color);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

struct CliConfig {
    language: Language,
    category: Option<String>,
    children: Vec<String>,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut language: Option<Language> = None;
    let mut positional: Vec<String> = Vec::new();
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("headfinder {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--lang" | "-l" => {
                let value = args.next().ok_or_else(|| "error: --lang expects a value".to_string())?;
                language = Some(parse_language(&value)?);
            }
            "--" => {
                positional.extend(args.by_ref());
                break;
            }
            _ if arg.starts_with("--lang=") => {
                language = Some(parse_language(arg.trim_start_matches("--lang="))?);
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => positional.push(arg),
        }
    }

    let language = language.ok_or_else(|| format!("error: --lang is required\n\n{}", help_text()))?;
    let mut positional = positional.into_iter();
    let category = positional.next();
    let children = positional.collect();

    Ok(CliConfig { language, category, children, color })
}

fn parse_language(value: &str) -> Result<Language, String> {
    Language::from_code(value).map_err(|err| format!("error: {err}"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "headfinder {version}

Inspect head rule tables.

Usage:
  headfinder --lang <code>                          Print the whole table.
  headfinder --lang <code> <CATEGORY>               Print the rules for CATEGORY.
  headfinder --lang <code> <CATEGORY> <CHILD>...    Also select the head among
                                                    children with these categories.

Options:
  -l, --lang <code>          Rule table language: en, es, fr or it.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}             Log filter (default: warn), e.g. {log_env}=trace.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or unsupported language.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
