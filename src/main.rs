use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use runtime_version::config::{CodecConfig, RELEASE_FILE_NAME};
use runtime_version::logging::init_tracing;
use runtime_version::version::{
    VersionPattern, encode, read_custom_jvm_version, read_launcher_version,
    read_release_version_with_key, read_version, write_version,
};

#[derive(Parser)]
#[command(name = "runtime-version")]
#[command(version, about = "Encode application and runtime versions for launchers")]
struct Cli {
    /// Configuration file (defaults to the data directory's config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a version string into an integer
    Encode {
        /// Pattern whose capturing groups are the version segments
        #[arg(long)]
        pattern: Option<String>,
        text: String,
    },
    /// Print the version recorded in a marker file (-1 if none)
    Read { path: PathBuf },
    /// Record a version in a marker file
    Write {
        path: PathBuf,
        #[arg(allow_negative_numbers = true)]
        version: i64,
    },
    /// Encode the runtime version of a JVM release file or runtime directory
    Release {
        path: PathBuf,
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Print the JAVA_VERSION property of a custom runtime descriptor
    CustomJvm { path: PathBuf },
    /// Print the launcher version recorded in a runtime's conf directory
    LauncherVersion { runtime_dir: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CodecConfig::load(cli.config.as_deref()).context("failed to load config")?;
    let _guard = init_tracing(&config.log_level, config.log_file.as_deref(), config.log_json);

    let pattern = |custom: Option<String>| -> anyhow::Result<VersionPattern> {
        let source = custom.unwrap_or_else(|| config.java_version_regex.clone());
        VersionPattern::new(&source).with_context(|| format!("invalid pattern '{source}'"))
    };

    match cli.command {
        Command::Encode { pattern: custom, text } => {
            println!("{}", encode(&pattern(custom)?, &text));
        }
        Command::Read { path } => {
            println!("{}", read_version(&path));
        }
        Command::Write { path, version } => {
            write_version(&path, version)
                .with_context(|| format!("failed to record version {version}"))?;
        }
        Command::Release { path, pattern: custom } => {
            let path = if path.is_dir() {
                path.join(RELEASE_FILE_NAME)
            } else {
                path
            };
            let version =
                read_release_version_with_key(&path, &config.release_key, &pattern(custom)?);
            println!("{version}");
        }
        Command::CustomJvm { path } => {
            println!("{}", read_custom_jvm_version(&path));
        }
        Command::LauncherVersion { runtime_dir } => {
            println!("{}", read_launcher_version(&runtime_dir));
        }
    }

    Ok(())
}
