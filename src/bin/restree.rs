//! `restree` command-line entry point.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`; `-v` raises the
//! default level to `debug`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use restree::config::{load_config, RestreeConfig};
use restree::curl::generate_curl_command;
use restree::parser::parse_request_partial;
use restree::scaffold;
use restree::variables::process_env;
use restree::{normalize_path, HttpRequest, ResolveOptions, Resolver};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{self, Path, PathBuf};
use std::process::ExitCode;

/// Resolve .http request files through a tree of headers files and init scripts
#[derive(Parser, Debug)]
#[command(name = "restree", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a request file and print the complete request
    Build(BuildArgs),
    /// Write a starter tree into a directory
    Init(InitArgs),
}

#[derive(clap::Args, Debug)]
struct BuildArgs {
    /// Path to the .http file
    file: PathBuf,

    /// Root directory of the cascade [default: current directory]
    #[arg(short = 'D', long = "directory", value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Output file, use '-' for stdout
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    output: String,

    /// Expand placeholders in the request body
    #[arg(long)]
    expand_body_variables: bool,

    /// Replace the body with the contents of a file, or '-' for stdin
    #[arg(short, long, value_name = "FILE")]
    body: Option<String>,

    /// Overlay a partial request file on the resolved request
    #[arg(long, value_name = "FILE")]
    patch: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(clap::Args, Debug)]
struct InitArgs {
    /// Directory to scaffold [default: current directory]
    #[arg(short = 'D', long = "directory", value_name = "DIR")]
    directory: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Normalized request-file text
    Text,
    /// A cURL command
    Curl,
    /// The request as a JSON object
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Build(args) => build(args, config),
        Command::Init(args) => init(args, &config),
    }
}

fn build(args: BuildArgs, config: RestreeConfig) -> Result<()> {
    let root = absolute_dir(args.directory.as_deref())?;
    let target = path::absolute(&args.file)
        .map(|target| normalize_path(&target))
        .with_context(|| format!("invalid file path {}", args.file.display()))?;

    let options = ResolveOptions {
        expand_body: args.expand_body_variables || config.expand_body_variables,
    };
    let resolver = Resolver::new(config);
    let mut request = resolver.resolve(&root, &target, &process_env(), options)?;

    if let Some(patch) = &args.patch {
        apply_patch(&mut request, patch)?;
    }
    if let Some(body) = &args.body {
        request.body = read_body(body)?;
    }

    write_output(&args.output, &render(&request, args.format)?)
}

fn render(request: &HttpRequest, format: Format) -> Result<String> {
    Ok(match format {
        Format::Text => request.to_string(),
        Format::Curl => generate_curl_command(request),
        Format::Json => serde_json::to_string_pretty(request)?,
    })
}

fn init(args: InitArgs, config: &RestreeConfig) -> Result<()> {
    let dir = absolute_dir(args.directory.as_deref())?;
    for path in scaffold::init(&dir, config)? {
        println!("created {}", path.display());
    }
    Ok(())
}

fn absolute_dir(dir: Option<&Path>) -> Result<PathBuf> {
    match dir {
        Some(dir) => path::absolute(dir)
            .map(|dir| normalize_path(&dir))
            .with_context(|| format!("invalid directory {}", dir.display())),
        None => std::env::current_dir().context("could not get current working directory"),
    }
}

fn apply_patch(request: &mut HttpRequest, patch: &Path) -> Result<()> {
    let content = fs::read_to_string(patch)
        .with_context(|| format!("unable to read {}", patch.display()))?;
    let partial = parse_request_partial(&content)
        .with_context(|| format!("failed to parse {}", patch.display()))?;
    request.apply(&partial);
    Ok(())
}

fn read_body(source: &str) -> Result<String> {
    let mut body = String::new();
    if source == "-" {
        io::stdin()
            .read_to_string(&mut body)
            .context("failed to read body from stdin")?;
    } else {
        File::open(source)
            .and_then(|mut file| file.read_to_string(&mut body))
            .with_context(|| format!("failed to read body from {}", source))?;
    }
    Ok(body)
}

fn write_output(destination: &str, rendered: &str) -> Result<()> {
    let mut out: Box<dyn Write> = if destination == "-" {
        Box::new(io::stdout().lock())
    } else {
        Box::new(
            File::create(destination)
                .with_context(|| format!("failed to create output file {}", destination))?,
        )
    };

    out.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
