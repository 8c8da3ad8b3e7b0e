//! Command-line interface for yaml-structure
//! This binary prints the structure tree of yaml files and looks up nodes by offset or path.
//!
//! Usage:
//!   yaml-structure inspect `<file>` [--format `<format>`]   - Print the structure tree
//!   yaml-structure find `<file>` `<offset>`                 - Show the node at a byte offset
//!   yaml-structure get `<file>` `<path>`                    - Show the node at a path (`a.b[0].c`)
//!
//! Configuration is layered over the built-in defaults: `yaml-structure.toml` in the working
//! directory if present, then `--config <file>`, then `--format` for inspect.
//! Logging goes to stderr, filtered by `YAML_STRUCTURE_LOG`, then `RUST_LOG`, default `warn`.

use clap::{Arg, ArgMatches, Command};
use std::env;
use std::fmt::Display;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use yaml_structure::yaml::config::{Loader, StructureConfig};
use yaml_structure::yaml::formats::{self, dump_node, Format};
use yaml_structure::yaml::{StructurePath, TextDocument};

fn main() {
    init_logging();

    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    match matches.subcommand() {
        Some(("inspect", sub)) => handle_inspect_command(&matches, sub),
        Some(("find", sub)) => handle_find_command(&matches, sub),
        Some(("get", sub)) => handle_get_command(&matches, sub),
        _ => unreachable!(),
    }
}

fn cli() -> Command {
    let file_arg = || {
        Arg::new("file")
            .help("Path to the yaml file")
            .required(true)
            .index(1)
    };

    Command::new("yaml-structure")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect the indentation structure of yaml files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the structure tree")
                .arg(file_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: dump, json or yaml (default from config)"),
                ),
        )
        .subcommand(
            Command::new("find")
                .about("Show the deepest node containing a byte offset")
                .arg(file_arg())
                .arg(
                    Arg::new("offset")
                        .help("Byte offset into the file")
                        .required(true)
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("get")
                .about("Show the node at a structural path")
                .arg(file_arg())
                .arg(
                    Arg::new("path")
                        .help("Path such as 'spring.datasource.url' or 'servers[0].host'")
                        .required(true)
                        .index(2),
                ),
        )
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches, sub: &ArgMatches) {
    let mut loader = config_loader(matches);
    if let Some(format) = sub.get_one::<String>("format") {
        let format: Format = format.parse().unwrap_or_else(|e| fail(e));
        loader = loader.with_format(format).unwrap_or_else(|e| fail(e));
    }
    let config = loader.build().unwrap_or_else(|e| fail(e));
    let doc = read_document(sub, &config);

    let tree = yaml_structure::yaml::parse(&doc);
    let output = formats::serialize(&tree, &doc, config.inspect.format).unwrap_or_else(|e| fail(e));
    print!("{}", output);
}

/// Handle the find command
fn handle_find_command(matches: &ArgMatches, sub: &ArgMatches) {
    let config = config_loader(matches).build().unwrap_or_else(|e| fail(e));
    let doc = read_document(sub, &config);
    let offset = sub
        .get_one::<String>("offset")
        .expect("offset is required");
    let offset: usize = offset
        .parse()
        .unwrap_or_else(|_| fail(format!("Invalid offset '{}'", offset)));

    let tree = yaml_structure::yaml::parse(&doc);
    match tree.find_node_at(offset) {
        Some(id) => {
            let path = match StructurePath::of(&tree, id) {
                Some(path) if path.is_empty() => "<root>".to_string(),
                Some(path) => path.to_string(),
                None => "<none>".to_string(),
            };
            println!("path: {}", path);
            print!("{}", dump_node(&tree, id, &doc));
        }
        None => println!("No node at offset {}", offset),
    }
}

/// Handle the get command
fn handle_get_command(matches: &ArgMatches, sub: &ArgMatches) {
    let config = config_loader(matches).build().unwrap_or_else(|e| fail(e));
    let doc = read_document(sub, &config);
    let text = sub.get_one::<String>("path").expect("path is required");
    let path: StructurePath = text.parse().unwrap_or_else(|e| fail(e));

    let tree = yaml_structure::yaml::parse(&doc);
    match tree.traverse(tree.root(), &path) {
        Some(id) => print!("{}", dump_node(&tree, id, &doc)),
        None => fail(format!("No node at path '{}'", path)),
    }
}

fn config_loader(matches: &ArgMatches) -> Loader {
    let mut loader = Loader::new();
    if let Ok(dir) = env::current_dir() {
        loader = loader.with_project_dir(dir);
    }
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    debug!(files = ?loader.files(), "layered config files");
    loader
}

fn read_document(sub: &ArgMatches, config: &StructureConfig) -> TextDocument {
    let path = sub.get_one::<String>("file").expect("file is required");
    let source = std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("Failed to read {}: {}", path, e)));
    TextDocument::with_config(source, config.document)
}

fn fail(message: impl Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(create_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// `YAML_STRUCTURE_LOG` > `RUST_LOG` > `warn`.
///
/// A bare level in `YAML_STRUCTURE_LOG` (`debug`, `trace`) applies to this crate only; anything
/// with directives is used as-is.
fn create_filter() -> EnvFilter {
    if let Ok(level) = env::var("YAML_STRUCTURE_LOG") {
        if level.contains(|c: char| c == '=' || c == ',') {
            return EnvFilter::new(level);
        }
        return EnvFilter::new(format!("warn,yaml_structure={}", level));
    }
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }
    EnvFilter::new("warn")
}
