// Command-line interface for md2doc
//
// This binary turns manuscript Markdown into Word documents and lets authors
// inspect what the parser made of a file.
//
// Usage:
//  md2doc <input> [--to <format>] [-o <file>]      - Convert (default command)
//  md2doc convert <input> [--to <format>] [-o <file>]
//  md2doc inspect <path> [<transform>]              - Show the parse result (defaults to "blocks-list")
//  md2doc --list-transforms                         - List transforms and output formats
//
// The target format is taken from --to, else detected from the -o extension,
// else docx. Binary formats need -o.
//
// Extra Parameters:
//
// Configuration can be overridden per run with --extra-<parameter-name> <value>.
// Boolean parameters may omit the value. Example:
//  md2doc manual.md -o manual.docx --extra-qr false --extra-width-cm 21

use md2doc_cli::transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use md2doc::render::{ImageRegistry, RenderServices};
use md2doc::{parse_document, DocxConfig, FormatRegistry, SerializedDocument};
use md2doc_config::{Loader, Md2DocConfig};
use std::collections::HashMap;
use std::fs;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// `--extra-<name>` parameters that map onto configuration keys.
const CONFIG_OVERRIDES: &[(&str, &str)] = &[
    ("width-cm", "page.width_cm"),
    ("height-cm", "page.height_cm"),
    ("line-numbers", "code.show_line_numbers"),
    ("qr", "links.qr_codes"),
    ("diagram-concurrency", "diagram.concurrency"),
    ("diagram-max-width", "diagram.max_width_px"),
    ("diagram-scale", "diagram.scale"),
    ("diagram-renderer", "diagram.renderer"),
    ("toc-title", "toc.title"),
    ("log-level", "logging.level"),
];

const SUBCOMMANDS: &[&str] = &["inspect", "convert", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("md2doc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert manuscript Markdown into Word documents")
        .long_about(
            "md2doc converts a Markdown dialect (chat bubbles, callouts, manual TOC,\n\
            UI buttons, shortcuts, mermaid diagrams) into .docx files.\n\n\
            Commands:\n  \
            - convert: Produce a document (default command)\n  \
            - inspect: View the parsed block model\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration for one run.\n  \
            Boolean parameters can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            md2doc manual.md -o manual.docx               # Convert to Word\n  \
            md2doc manual.md --to json                    # Block model on stdout\n  \
            md2doc inspect manual.md                      # One line per block\n  \
            md2doc manual.md -o m.docx --extra-qr false   # No QR codes after links",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms and output formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a md2doc.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the parsed block model of a document")
                .long_about(
                    "View what the parser made of a document.\n\n\
                    Transforms:\n  \
                    - blocks-list:   One line per block (default)\n  \
                    - blocks-json:   Block model as JSON\n  \
                    - meta-json:     Preamble metadata as JSON\n  \
                    - segments-json: Inline segments of every block line\n\n\
                    Extra Parameters:\n  \
                    --extra-compact   Single-line JSON",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'blocks-list'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document (default command)")
                .long_about(
                    "Convert a Markdown document.\n\n\
                    Supported formats:\n  \
                    - docx: Word document (binary, requires -o)\n  \
                    - json: Parsed block model\n\n\
                    The target format is --to, else the -o extension, else docx.\n\n\
                    Examples:\n  \
                    md2doc convert in.md -o out.docx\n  \
                    md2doc convert in.md --to json\n  \
                    md2doc in.md -o out.docx --image logo=assets/logo.png",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (detected from -o, else docx)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout for text formats)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("image")
                        .long("image")
                        .value_name("ID=PATH")
                        .help("Register an image referenced as ![alt](img:ID)")
                        .action(ArgAction::Append)
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file argument means the default convert command
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &mut extra_params,
    );
    init_tracing(&config.logging.level);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = required(sub_matches, "path");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &extra_params);
        }
        Some(("convert", sub_matches)) => {
            reject_unknown_extras(&extra_params);
            let input = required(sub_matches, "input");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let registry = FormatRegistry::default();
            let to = match sub_matches.get_one::<String>("to") {
                Some(to) => to.clone(),
                None => output
                    .and_then(|path| registry.detect_format_from_filename(path))
                    .unwrap_or_else(|| "docx".to_string()),
            };
            let images: Vec<&String> = sub_matches
                .get_many::<String>("image")
                .map(|values| values.collect())
                .unwrap_or_default();
            handle_convert_command(&registry, input, &to, output, &images, &config).await;
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value,
        None => {
            eprintln!("Missing required argument '{name}'");
            std::process::exit(1);
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str, extra_params: &HashMap<String, String>) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let output = transforms::execute_transform(&source, transform, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{output}");
}

/// Handle the convert command
async fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    to: &str,
    output: Option<&str>,
    images: &[&String],
    config: &Md2DocConfig,
) {
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });
    let doc = parse_document(&source);
    debug!(blocks = doc.blocks.len(), "parsed {input}");

    let docx_config = DocxConfig::from(config);
    let services = RenderServices::for_config(&docx_config).with_images(load_images(images));

    let result = registry
        .export(&doc, to, &docx_config, &services)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Export error: {e}");
            std::process::exit(1);
        });

    match (output, result) {
        (Some(path), data) => {
            fs::write(path, data.into_bytes()).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            info!("wrote {path}");
        }
        (None, SerializedDocument::Text(text)) => {
            print!("{text}");
        }
        (None, SerializedDocument::Binary(_)) => {
            eprintln!("Binary formats (like docx) require an output file. Use -o <path>.");
            std::process::exit(1);
        }
    }
}

fn load_images(specs: &[&String]) -> ImageRegistry {
    let mut registry = ImageRegistry::new();
    for spec in specs {
        let Some((id, path)) = spec.split_once('=') else {
            eprintln!("Invalid --image '{spec}'. Expected ID=PATH");
            std::process::exit(1);
        };
        let bytes = fs::read(path).unwrap_or_else(|e| {
            eprintln!("Error reading image '{path}': {e}");
            std::process::exit(1);
        });
        registry.register(id.trim(), bytes);
    }
    registry
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms (inspect):\n");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }

    println!("\nConversion formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        let description = registry.get(&format_name).map(|f| f.description()).unwrap_or("");
        println!("  {format_name:<6} {description}");
    }
}

/// Load layered configuration, consuming the `--extra-*` keys that name
/// configuration values.
fn load_cli_config(
    explicit_path: Option<&str>,
    extra_params: &mut HashMap<String, String>,
) -> Md2DocConfig {
    let loader = Loader::new().with_optional_file("md2doc.toml");
    let mut loader = match explicit_path {
        Some(path) => loader.with_file(path),
        None => loader,
    };

    for (param, key) in CONFIG_OVERRIDES {
        if let Some(raw) = extra_params.remove(*param) {
            loader = loader.set_override(key, raw).unwrap_or_else(|err| {
                eprintln!("Invalid value for --extra-{param}: {err}");
                std::process::exit(1);
            });
        }
    }

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn reject_unknown_extras(extra_params: &HashMap<String, String>) {
    if let Some(key) = extra_params.keys().next() {
        let known: Vec<&str> = CONFIG_OVERRIDES.iter().map(|(param, _)| *param).collect();
        eprintln!(
            "Unknown parameter --extra-{key}. Known parameters: {}",
            known.join(", ")
        );
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn extra_args_take_values_or_default_to_true() {
        let (cleaned, extras) = parse_extra_args(&args(&[
            "md2doc",
            "in.md",
            "--extra-width-cm",
            "21",
            "--extra-qr",
            "-o",
            "out.docx",
        ]));
        assert_eq!(cleaned, args(&["md2doc", "in.md", "-o", "out.docx"]));
        assert_eq!(extras.get("width-cm").map(String::as_str), Some("21"));
        assert_eq!(extras.get("qr").map(String::as_str), Some("true"));
    }

    #[test]
    fn config_overrides_reach_the_loader() {
        let mut extras = HashMap::new();
        extras.insert("toc-title".to_string(), "Contents".to_string());
        extras.insert("qr".to_string(), "false".to_string());
        extras.insert("compact".to_string(), "true".to_string());
        let config = load_cli_config(None, &mut extras);
        assert_eq!(config.toc.title, "Contents");
        assert!(!config.links.qr_codes);
        assert_eq!(extras.len(), 1);
    }

    #[test]
    fn cli_definition_is_valid() {
        build_cli().debug_assert();
    }
}
