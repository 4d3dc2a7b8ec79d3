//! # linefmt
//!
//! Render records into fixed-width terminal lines using column templates.
//!
//! ## Usage
//!
//! ```bash
//! # Fields on the command line
//! linefmt render --template '{-*%:%a - %t}{20%:%l}' --width 40 -f a=Kino -f t=Kukushka -f l=6:40
//!
//! # A record on stdin, rendered with the configured template for its kind
//! echo '{"kind":"track","artist":"Kino","title":"Kukushka","length":400}' | linefmt render
//!
//! # Check templates before putting them in the config file
//! linefmt validate '{-50%:%a}{50%:%t}'
//! ```

use clap::{Parser, Subcommand};
use log::{debug, info};
use std::collections::HashMap;
use std::io::{self, Read};
use std::path::PathBuf;

use linefmt::config::Config;
use linefmt::error::{LinefmtError, Result};
use linefmt::layout::{Layout, SURFACES};
use linefmt::records::{Entry, Fields, Record};
use linefmt::{short_version, validate, version_string, Formatter};

/// linefmt - fixed-width line formatting for terminal UIs
#[derive(Parser)]
#[command(name = "linefmt")]
#[command(version = env!("LINEFMT_VERSION"))]
#[command(about = "Render records into fixed-width terminal lines", long_about = None)]
#[command(
    after_help = "Example:\n  echo '{\"kind\":\"dir\",\"path\":\"/music/kino\",\"name\":\"kino\"}' | linefmt render --width 20"
)]
struct Cli {
    /// Show detailed version information
    #[arg(long = "version-full")]
    version_full: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one line
    Render {
        /// Template to render (overrides --surface)
        #[arg(short, long)]
        template: Option<String>,

        /// Use the configured template of a display surface
        #[arg(short, long)]
        surface: Option<String>,

        /// Line width in characters (default: display.width from config)
        #[arg(short, long)]
        width: Option<usize>,

        /// Field value as KEY=VALUE; when absent a JSON record is read from stdin
        #[arg(short = 'f', long = "field")]
        fields: Vec<String>,

        /// Keep control characters in field values
        #[arg(long)]
        no_sanitize: bool,
    },

    /// Check templates for syntax errors
    Validate {
        /// Templates to check
        #[arg(required = true)]
        templates: Vec<String>,
    },

    /// Load a config file and check all of its templates
    CheckConfig {
        /// Config file (default: the standard location)
        path: Option<PathBuf>,
    },

    /// Generate example config file
    GenerateConfig,
}

fn main() -> Result<()> {
    // Initialize logging with WARN level by default (can be overridden with RUST_LOG env var)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    debug!("{}", short_version());

    if cli.version_full {
        print!("{}", version_string());
        return Ok(());
    }

    match cli.command {
        Some(Commands::Render {
            template,
            surface,
            width,
            fields,
            no_sanitize,
        }) => render(template, surface, width, &fields, no_sanitize),
        Some(Commands::Validate { templates }) => validate_templates(&templates),
        Some(Commands::CheckConfig { path }) => check_config(path),
        Some(Commands::GenerateConfig) => generate_config(),
        None => {
            println!("Usage: linefmt <render|validate|check-config|generate-config>");
            println!("Run 'linefmt --help' for details.");
            Ok(())
        }
    }
}

fn render(
    template: Option<String>,
    surface: Option<String>,
    width: Option<usize>,
    fields: &[String],
    no_sanitize: bool,
) -> Result<()> {
    // A broken config file is an error here, not a silent fallback to defaults.
    let config = Config::load()?;
    let width = width.unwrap_or(config.display.width);
    let sanitize = config.display.sanitize && !no_sanitize;

    let template = match (template, surface) {
        (Some(template), _) => Some(template),
        (None, Some(surface)) => Some(surface_template(&config, &surface)?.to_string()),
        (None, None) => None,
    };

    let line = if fields.is_empty() {
        let record = read_record()?;
        match template {
            Some(template) => render_template(template, &record.fields(sanitize), width)?,
            None => render_with_layout(&config, &record, width, sanitize)?,
        }
    } else {
        let template = template.ok_or_else(|| {
            LinefmtError::invalid_argument("--field requires --template or --surface")
        })?;
        let data = parse_fields(fields, sanitize)?;
        render_template(template, &data, width)?
    };

    println!("{}", line);
    Ok(())
}

fn render_template(template: String, data: &HashMap<char, String>, width: usize) -> Result<String> {
    let mut formatter = Formatter::checked(template)?;
    debug!("Rendering {:?} at width {}", formatter.template(), width);
    Ok(formatter.format(data, width))
}

fn surface_template<'a>(config: &'a Config, surface: &str) -> Result<&'a str> {
    config.formats.get(surface).ok_or_else(|| {
        LinefmtError::invalid_argument(format!(
            "unknown surface '{}' (expected one of: {})",
            surface,
            SURFACES.join(", ")
        ))
    })
}

/// Pick the surface from the record kind.
fn render_with_layout(config: &Config, record: &Record, width: usize, sanitize: bool) -> Result<String> {
    let mut layout = Layout::from_config(&config.formats)?.with_sanitize(sanitize);

    let line = match record {
        Record::Dir(dir) => layout.render_entry(&Entry::Dir(dir.clone()), width),
        Record::Track(track) => layout.render_entry(&Entry::Track(track.clone()), width),
        Record::Status(status) => layout.render_status(status, width),
        Record::Title { path } => layout.render_title(path, width),
    };
    Ok(line)
}

fn read_record() -> Result<Record> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    debug!("Read {} bytes of record JSON from stdin", buffer.len());
    Ok(serde_json::from_str(&buffer)?)
}

/// Parse `KEY=VALUE` arguments where KEY is a single character.
fn parse_fields(args: &[String], sanitize: bool) -> Result<HashMap<char, String>> {
    let mut builder = Fields::new().sanitize(sanitize);
    for arg in args {
        let (key, value) = arg.split_once('=').ok_or_else(|| {
            LinefmtError::invalid_argument(format!("field '{}' is not KEY=VALUE", arg))
        })?;
        let mut chars = key.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(LinefmtError::invalid_argument(format!(
                    "field key '{}' must be a single character",
                    key
                )))
            }
        };
        builder = builder.set(key, value);
    }
    Ok(builder.build())
}

fn validate_templates(templates: &[String]) -> Result<()> {
    let mut failed = 0;
    for template in templates {
        match validate(template) {
            Ok(()) => println!("ok      {}", template),
            Err(e) => {
                failed += 1;
                println!("invalid {}: {}", template, e);
            }
        }
    }

    if failed > 0 {
        return Err(LinefmtError::invalid_argument(format!(
            "{} of {} templates are invalid",
            failed,
            templates.len()
        )));
    }
    Ok(())
}

fn check_config(path: Option<PathBuf>) -> Result<()> {
    let config = match path {
        Some(path) => {
            info!("Checking config file {}", path.display());
            Config::load_from_file(&path)?
        }
        None => Config::load()?,
    };

    for (key, template) in config.formats.templates() {
        println!("{:<15} {:?}", key, template);
    }
    println!("All templates are valid.");
    Ok(())
}

fn generate_config() -> Result<()> {
    let config_path = Config::default_config_path()?;
    println!("Generating example config file at: {:?}", config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&config_path, Config::example_toml())?;
    println!("Config file generated successfully!");
    println!("Edit {} to customize settings", config_path.display());
    Ok(())
}
