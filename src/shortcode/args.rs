use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, with the git hash appended for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "shortcode", version = get_version())]
#[command(about = "Shorten URLs to six-letter codes and look them up again", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Mapping file to use (overrides shortcode.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Discard an unreadable mapping file instead of failing
    #[arg(long, global = true)]
    pub reset_corrupt: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shorten a URL
    #[command(alias = "a")]
    Add {
        /// The URL to shorten
        url: String,
    },

    /// Look up the URL behind a code
    #[command(alias = "g")]
    Get {
        /// Six-letter code
        code: String,
    },

    /// Show all mappings
    #[command(alias = "ls")]
    List,

    /// Interactive menu (default)
    Shell,
}
