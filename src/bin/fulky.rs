//! Command-line interface for fulky
//! This binary extracts the JavaScript examples of a Markdown file and prints them as tokens,
//! as a document or as a ready-to-run test suite.
//!
//! Usage:
//!   fulky `<path>` [--format `<format>`] [--config `<file>`]   - Process a Markdown file
//!   fulky --list-formats                                       - List all available formats
//!
//! Settings come from the built-in defaults, then `fulky.toml` in the working directory
//! (when present), then the file passed with `--config`.

use clap::{Arg, ArgAction, Command};
use fulky::config::{FulkyConfig, Loader, PROJECT_CONFIG_FILE};
use fulky::processor::{available_formats, ProcessingSpec, Processor};
use log::debug;

fn main() {
    env_logger::init();

    let matches = Command::new("fulky")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract runnable JavaScript examples from Markdown files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the Markdown file")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default: the suite for the configured framework)")
                .default_value("auto"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults and fulky.toml"),
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

    let Some(path) = matches.get_one::<String>("path") else {
        eprintln!("A path is required unless listing formats");
        std::process::exit(1);
    };
    let format = matches
        .get_one::<String>("format")
        .map_or("auto", String::as_str);
    let config = load_config(matches.get_one::<String>("config"));

    handle_process_command(&config, path, format);
}

fn load_config(config_file: Option<&String>) -> FulkyConfig {
    let mut loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    if let Some(file) = config_file {
        loader = loader.with_file(file);
    }

    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

/// Handle the process command
fn handle_process_command(config: &FulkyConfig, path: &str, format: &str) {
    let format = match format {
        "auto" => format!("suite-{}", config.render.framework),
        other => other.to_string(),
    };
    debug!("processing {} as {}", path, format);

    let spec = ProcessingSpec::from_string(&format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("\nAvailable formats:");
        for format in available_formats() {
            eprintln!("  {}", format);
        }
        std::process::exit(1);
    });

    let processor = Processor::from_config(config).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    match processor.process_file(path, &spec) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
