//! Command-line interface for card templates
//! This binary is used to inspect, render and check card templates outside of an application.
//!
//! Usage:
//!   cardtmpl tokens `<path>`                                  - Print the token stream as JSON
//!   cardtmpl parse `<path>`                                   - Print the parsed tree as JSON
//!   cardtmpl render `<path>` --fields `<file>` [--config `<toml>`] - Render against field values
//!   cardtmpl check `<path>` --non-blank `<a,b,...>`            - Report whether the template is empty
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=card_template=debug`) to see what the engine is doing.

use card_template::template::{
    config::Loader, is_empty, lexing::tokenize, parse, render, FilterRegistry, RenderContext,
};
use clap::{Arg, Command};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path_arg = || {
        Arg::new("path")
            .help("Path to the template file")
            .required(true)
            .index(1)
    };

    let matches = Command::new("cardtmpl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting, rendering and checking card templates")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream as JSON")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("parse")
                .about("Print the parsed tree as JSON")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("render")
                .about("Render the template against field values")
                .arg(path_arg())
                .arg(
                    Arg::new("fields")
                        .long("fields")
                        .short('f')
                        .help("JSON or YAML file mapping field names to values")
                        .required(true),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("TOML file layered over the default messages"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Report whether the template shows no field content")
                .arg(path_arg())
                .arg(
                    Arg::new("non-blank")
                        .long("non-blank")
                        .short('n')
                        .help("Comma-separated names of the filled fields")
                        .default_value(""),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("tokens", sub)) => handle_tokens_command(required(sub, "path")),
        Some(("parse", sub)) => handle_parse_command(required(sub, "path")),
        Some(("render", sub)) => handle_render_command(
            required(sub, "path"),
            required(sub, "fields"),
            sub.get_one::<String>("config").map(String::as_str),
        ),
        Some(("check", sub)) => {
            handle_check_command(required(sub, "path"), required(sub, "non-blank"))
        }
        _ => unreachable!(),
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

type CliResult = Result<String, Box<dyn std::error::Error>>;

fn required<'a>(matches: &'a clap::ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

fn read_template(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    std::fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path, e).into())
}

/// Handle the tokens command
fn handle_tokens_command(path: &str) -> CliResult {
    let source = read_template(path)?;
    let tokens = tokenize(&source)?;
    Ok(serde_json::to_string_pretty(&tokens)?)
}

/// Handle the parse command
fn handle_parse_command(path: &str) -> CliResult {
    let source = read_template(path)?;
    let node = parse(&source)?;
    Ok(serde_json::to_string_pretty(&node)?)
}

/// Handle the render command
fn handle_render_command(path: &str, fields_path: &str, config: Option<&str>) -> CliResult {
    let source = read_template(path)?;
    let fields = read_fields(fields_path)?;

    let loader = match config {
        Some(config) => Loader::new().with_file(config),
        None => Loader::new(),
    };
    let context = RenderContext::new(loader.build()?.messages, FilterRegistry::new());

    let node = parse(&source)?;
    Ok(render(&node, &fields, &context))
}

/// Handle the check command
fn handle_check_command(path: &str, non_blank: &str) -> CliResult {
    let source = read_template(path)?;
    let non_blank: HashSet<String> = non_blank
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    let node = parse(&source)?;
    let verdict = if is_empty(&node, &non_blank) {
        "empty"
    } else {
        "non-empty"
    };
    Ok(verdict.to_string())
}

/// Field values from a JSON or YAML object, picked by file extension.
fn read_fields(path: &str) -> Result<HashMap<String, String>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path, e))?;
    let is_yaml = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    if is_yaml {
        Ok(serde_yaml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}
