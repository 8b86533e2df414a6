//! Command-line interface for doccy
//! This binary parses doccy files and prints the resulting document in one of the registered formats.
//!
//! Usage:
//!   doccy `<path>` [--format `<format>`] [--config `<file>`] [--set `<key=value>`]... [--no-prettify]
//!   doccy --list-formats                                    - List all available output formats
//!
//! Logging goes to stderr and is controlled by the `DOCCY_LOG` environment variable
//! (an `EnvFilter` directive, `warn` when unset).

use clap::{Arg, ArgAction, ArgMatches, Command};
use doccy_config::{DoccyConfig, Loader};
use doccy_parser::doccy::formats::FormatRegistry;
use doccy_parser::doccy::loader::DocumentLoader;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let matches = Command::new("doccy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse doccy markup and print the resulting document")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the doccy file")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default from configuration: xml)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .value_name("KEY=VALUE")
                .help("Override a configuration key, e.g. options.pretty_hyphens=false")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("no-prettify")
                .long("no-prettify")
                .help("Print the tree exactly as the markup describes it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    let Some(path) = matches.get_one::<String>("path") else {
        eprintln!("A path is required unless listing formats");
        std::process::exit(1);
    };
    handle_parse_command(path, &config);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("DOCCY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Layer the config file, `--set` pairs and the shorthand flags over the defaults.
fn load_config(matches: &ArgMatches) -> Result<DoccyConfig, String> {
    let mut loader = Loader::new();
    if let Some(file) = matches.get_one::<String>("config") {
        loader = loader.with_file(file);
    }

    for pair in matches.get_many::<String>("set").into_iter().flatten() {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", pair))?;
        loader = loader
            .set_override(key.trim(), value.trim())
            .map_err(|e| e.to_string())?;
    }

    if matches.get_flag("no-prettify") {
        loader = loader
            .set_override("options.wrap_floating_text", false)
            .and_then(|loader| loader.set_override("options.pretty_print_text", false))
            .map_err(|e| e.to_string())?;
    }

    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("output.format", format.as_str())
            .map_err(|e| e.to_string())?;
    }

    loader.build().map_err(|e| e.to_string())
}

/// Handle the parse command
fn handle_parse_command(path: &str, config: &DoccyConfig) {
    debug!(path, format = %config.output.format, options = ?config.options, "parsing");

    let registry = FormatRegistry::with_defaults();
    if !registry.has(&config.output.format) {
        eprintln!("Format '{}' not found", config.output.format);
        eprintln!("\nAvailable formats:");
        for name in registry.list_formats() {
            eprintln!("  {}", name);
        }
        std::process::exit(1);
    }

    let doc = DocumentLoader::from_path(path)
        .map(|loader| loader.parse_with(&config.options))
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    for diagnostic in doc.diagnostics() {
        eprintln!("{}", diagnostic);
    }

    let formatted = registry
        .serialize(&doc, &config.output.format)
        .unwrap_or_else(|e| {
            eprintln!("Error formatting document: {}", e);
            std::process::exit(1);
        });

    print!("{}", formatted);
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");

    for name in registry.list_formats() {
        let description = registry
            .get(&name)
            .map(|formatter| formatter.description())
            .unwrap_or_default();
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}
