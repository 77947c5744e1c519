//! Command-line argument definitions.
//!
//! Only depends on clap and clap_complete so `build.rs` can include it
//! directly for man page generation.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "aploc",
    version,
    about = "Bulk-update access-point locations on an OmniVista controller",
    long_about = "Reads a delimited file of access-point MAC addresses and new locations,\n\
        updates each AP on the OmniVista controller in file order, and writes a\n\
        timestamped results file with the old location, new location and outcome\n\
        of every row.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, env = "APLOC_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long, env = "APLOC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Update AP locations from a CSV file
    Relocate(RelocateArgs),

    /// Inspect configuration and store credentials
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Relocate ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
#[command(
    group(ArgGroup::new("controller").args(["ov_ip", "ov_fqdn"])),
    group(ArgGroup::new("tls").args(["insecure", "check_certificates"]))
)]
pub struct RelocateArgs {
    /// OmniVista IP address
    #[arg(long, short = 'i')]
    pub ov_ip: Option<String>,

    /// OmniVista FQDN
    #[arg(long, short = 'f')]
    pub ov_fqdn: Option<String>,

    /// Skip TLS certificate validation (default)
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// Validate the controller's TLS certificate
    #[arg(long, short = 'c')]
    pub check_certificates: bool,

    /// OmniVista username [default: admin]
    #[arg(long, short = 'u')]
    pub ov_username: Option<String>,

    /// OmniVista password (prompted for when not supplied)
    #[arg(long, short = 'p')]
    pub ov_password: Option<String>,

    /// Input file: column 1 AP MAC, column 2 AP location
    #[arg(long, short = 'x', value_name = "FILE")]
    pub csv_input_file: PathBuf,

    /// Field delimiter for input and results [default: ,]
    #[arg(long, short = 'd', value_name = "CHAR")]
    pub csv_delimiter: Option<String>,

    /// Directory for the results file [default: current directory]
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display the resolved configuration (passwords masked)
    Show,

    /// Store a profile's password in the system keyring
    SetPassword {
        /// Profile name (defaults to --profile or the configured default)
        #[arg(long = "for", value_name = "PROFILE")]
        target: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
