use clap::{Parser, Subcommand, ValueEnum};

use crate::duplicates::resolver::DeleteStrategy;

/// CloudSweep — duplicate finder and file manager for storage backends
#[derive(Parser, Debug)]
#[command(
    name = "cloudsweep",
    version,
    about = "Find and clean duplicate files in a storage namespace",
    long_about = "CloudSweep lists, copies, uploads, and deletes files in a storage\n\
                   namespace, and finds duplicates by content, name, size, or image\n\
                   dimensions — or all of them at once.",
    after_help = "EXAMPLES:\n  \
        cloudsweep ls photos                        List a directory\n  \
        cloudsweep ls --recursive photos            List a full subtree\n  \
        cloudsweep dup photos                       Find byte-identical files\n  \
        cloudsweep dup photos -m filename,size      Match on name and size\n  \
        cloudsweep dup photos -m size -t 5          Sizes within 5%\n  \
        cloudsweep dup photos -m content,dimensions,combined\n                                              Files matching on everything\n  \
        cloudsweep dup photos --strategy newest     Preview what a cleanup keeps\n  \
        cloudsweep rm a/x.jpg b/x.jpg --strategy newest\n                                              Delete all but the newest x.jpg\n  \
        cloudsweep cp in/a.png out/a.png            Copy within the namespace\n  \
        cloudsweep put ./local.bin backups/         Upload a local file"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root directory of the storage namespace
    #[arg(long, global = true, default_value = ".", value_name = "DIR", env = "CLOUDSWEEP_ROOT")]
    pub root: String,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode — minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List files and directories
    Ls {
        /// Path to list, relative to the root
        #[arg(default_value = "")]
        path: String,

        /// Descend into subdirectories
        #[arg(long, short)]
        recursive: bool,
    },

    /// Find duplicate files
    Dup {
        /// Path to scan, relative to the root
        #[arg(default_value = "")]
        path: String,

        /// Detection methods: content, filename, size, dimensions, combined
        #[arg(long, short, value_delimiter = ',')]
        methods: Option<Vec<String>>,

        /// Size tolerance percentage for the size method (0-100)
        #[arg(long, short)]
        tolerance: Option<f64>,

        /// Descend into subdirectories
        #[arg(long, short)]
        recursive: bool,

        /// Only consider image files
        #[arg(long)]
        image_only: bool,

        /// Preview which member each cluster would keep under a strategy
        #[arg(long)]
        strategy: Option<DeleteStrategy>,

        /// Show individual files in each cluster
        #[arg(long)]
        detailed: bool,
    },

    /// Delete files, keeping one member per same-named group
    Rm {
        /// Paths to delete
        #[arg(required = true)]
        paths: Vec<String>,

        /// Which member of a same-named group to keep
        #[arg(long)]
        strategy: Option<DeleteStrategy>,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Copy a file within the namespace
    Cp {
        /// Source path
        from: String,
        /// Destination path
        to: String,
    },

    /// Upload a local file into the namespace
    Put {
        /// Local file to upload
        file: std::path::PathBuf,

        /// Target path; directories get the filename appended
        #[arg(default_value = "")]
        path: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset to default configuration
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Initialize the CloudSweep data directory and default config
    Init,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
