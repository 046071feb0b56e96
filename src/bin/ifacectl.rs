//! ifacectl - inspect and edit /etc/network/interfaces
//!
//! Loads the interfaces file (with everything it sources) and prints or
//! updates single fields.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use libifaces::{IfacesConfig, InterfacesFile, SaveOptions};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Debian interfaces file tool
#[derive(Parser, Debug)]
#[command(name = "ifacectl")]
#[command(version)]
#[command(about = "Inspect and edit Debian-style network interfaces files", long_about = None)]
struct Args {
    /// Tool configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interfaces file, overrides the configured path
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List interfaces and mappings in every loaded file
    List,

    /// Print one interface or mapping as it would be written
    Show { name: String },

    /// Print an option of an interface or mapping
    Get { name: String, key: String },

    /// Set an option of an interface and save
    Set {
        name: String,
        key: String,
        value: String,
        /// Save included files as well
        #[arg(short, long)]
        recursive: bool,
    },

    /// Print the rendered file, or the whole tree as JSON
    Dump {
        #[arg(long)]
        json: bool,
    },

    /// Print the content hash of the top-level file
    Hash,
}

fn init_logging(args: &Args) {
    let log_level = if args.verbose {
        "debug"
    } else {
        args.log_level.as_str()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("ifacectl={},libifaces={}", log_level, log_level))
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let config = match &args.config {
        Some(path) => IfacesConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => IfacesConfig::default(),
    };

    let filename = args.file.clone().unwrap_or_else(|| config.paths.interfaces.clone());
    let filename = std::path::absolute(&filename)
        .with_context(|| format!("resolving {}", filename.display()))?;
    debug!("Using interfaces file {}", filename.display());

    let mut file = InterfacesFile::load_with(&filename, &config.load_options()?)
        .with_context(|| format!("loading {}", filename.display()))?;

    match args.command {
        Commands::List => list(&file),
        Commands::Show { name } => {
            if let Some(iface) = file.find_interface(&name) {
                print!("{}", iface);
            } else if let Some(mapping) = file.find_mapping(&name) {
                print!("{}", mapping);
            } else {
                bail!("no interface or mapping named '{}'", name);
            }
        }
        Commands::Get { name, key } => {
            let value = match file.find_interface(&name) {
                Some(iface) => iface.field(&key)?,
                None => match file.find_mapping(&name) {
                    Some(mapping) => mapping.field(&key)?,
                    None => bail!("no interface or mapping named '{}'", name),
                },
            };
            println!("{}", value);
        }
        Commands::Set {
            name,
            key,
            value,
            recursive,
        } => {
            let before = owning_file(&file, &name)?.content_hash();
            file.find_interface_mut(&name)
                .with_context(|| format!("no interface named '{}'", name))?
                .set(&key, &value);

            let owner = owning_file(&file, &name)?;
            if recursive {
                file.save(&SaveOptions::recursive())?;
            } else {
                owner.save(&SaveOptions::default())?;
            }
            info!(
                "Updated {} in {} (hash {:x} -> {:x})",
                name,
                owner.path().display(),
                before,
                owner.content_hash()
            );
        }
        Commands::Dump { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&file)?);
            } else {
                print!("{}", file.render());
            }
        }
        Commands::Hash => println!("{:016x}", file.content_hash()),
    }

    Ok(())
}

fn list(file: &InterfacesFile) {
    for f in file.iter_files() {
        println!("{}", f.path().display());
        for iface in &f.interfaces {
            let startups: Vec<String> = iface.startups.iter().map(|s| s.mode.clone()).collect();
            println!(
                "  iface   {:<12} {:<6} {:<10} {}",
                iface.name,
                iface.address_family,
                iface.method,
                startups.join(",")
            );
        }
        for mapping in &f.mappings {
            println!("  mapping {}", mapping.name);
        }
    }
}

/// The file in the tree that declares interface `name`
fn owning_file<'a>(file: &'a InterfacesFile, name: &str) -> Result<&'a InterfacesFile> {
    file.iter_files()
        .find(|f| f.interfaces.iter().any(|i| i.name == name))
        .with_context(|| format!("no interface named '{}'", name))
}
