use std::path::PathBuf;

use apksign::{PackageId, SchemeVersion};
use clap::{Args, Parser, Subcommand};

/// apksign - batch APK signing with zipalign and apksigner
#[derive(Parser, Debug)]
#[command(name = "apksign")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Tool paths and defaults are read from ~/.config/apksign/config.toml.")]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Align and sign APKs
    Sign(SignArgs),

    /// Print the signing certificates of APKs
    Inspect {
        /// APK files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Files processed at the same time
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Manage recorded signing profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Show the recorded profile that `sign` would use for a file
    Suggest {
        /// APK files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct SignArgs {
    /// APK files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub key: KeyArgs,

    /// Output directory (defaults to next to each input)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Run zipalign before signing
    #[arg(long, overrides_with = "no_align")]
    pub align: bool,

    /// Skip zipalign
    #[arg(long, overrides_with = "align")]
    pub no_align: bool,

    /// Signature scheme to enable (repeatable, or comma separated)
    #[arg(long = "scheme", value_name = "VERSION", value_delimiter = ',')]
    pub schemes: Vec<SchemeVersion>,

    /// Files signed at the same time
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Do not record the profile for the signed package
    #[arg(long)]
    pub no_remember: bool,
}

impl SignArgs {
    /// `Some` when `--align` or `--no-align` was given
    pub fn zip_align(&self) -> Option<bool> {
        if self.align {
            Some(true)
        } else if self.no_align {
            Some(false)
        } else {
            None
        }
    }
}

/// Keystore selection; omitted `--keystore` means auto-match
#[derive(Args)]
pub struct KeyArgs {
    /// Keystore file
    #[arg(long, value_name = "PATH")]
    pub keystore: Option<PathBuf>,

    /// Key alias inside the keystore
    #[arg(long)]
    pub alias: Option<String>,

    /// Keystore password
    #[arg(long, env = "APKSIGN_STORE_PASSWORD", hide_env_values = true)]
    pub store_password: Option<String>,

    /// Key password (defaults to the keystore password)
    #[arg(long, env = "APKSIGN_KEY_PASSWORD", hide_env_values = true)]
    pub key_password: Option<String>,
}

impl std::fmt::Debug for KeyArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyArgs")
            .field("keystore", &self.keystore)
            .field("alias", &self.alias)
            .field("store_password", &self.store_password.as_ref().map(|_| "***"))
            .field("key_password", &self.key_password.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Show the profile recorded for a package
    Get { package: PackageId },

    /// Record a profile for a package
    Put {
        package: PackageId,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Forget the profile recorded for a package
    Remove { package: PackageId },

    /// List recorded profiles
    List,
}
