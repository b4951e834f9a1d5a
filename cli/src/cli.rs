use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Parser, Debug)]
#[command(
    name = "hwameidoc",
    about = "Hwameictl is the command-line tool for Hwameistor.",
    version,
    long_about = "Hwameictl is a tool that can manage all Hwameistor resources and their entire lifecycle.\nComplete documentation is available at https://hwameistor.io/"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Kubeconfig file path (defaults to $HOME/.kube/config)
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current context
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Seconds to wait for the API server before giving up
    #[arg(long, global = true, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout: u64,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t)]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use emojis in table output for better visual representation
    #[arg(long, global = true)]
    pub emoji: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Table,
    Wide,
    Json,
    Yaml,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Manage the Hwameistor's LocalVolume
    #[command(
        visible_alias = "lv",
        mut_subcommand("get", |get| get.after_help("Example:\n  hwameidoc volume get pvc-1187f716-db92-47ac-a5fc-44fd19047a81")),
        mut_subcommand("reset", |reset| reset.after_help("Example:\n  hwameidoc volume reset pvc-1187f716-db92-47ac-a5fc-44fd19047a81"))
    )]
    Volume {
        #[command(subcommand)]
        action: Option<ResourceAction>,
    },
    /// Manage the Hwameistor's volumereplica. Hwameistor provides LVM-based data volumes,
    /// which offer read and write performance comparable to that of native disks.
    #[command(
        name = "volumereplica",
        visible_alias = "lvr",
        mut_subcommand("get", |get| get.after_help("Example:\n  hwameidoc volumereplica get pvc-1187f716-db92-47ac-a5fc-44fd19047a81-fsnjsf")),
        mut_subcommand("reset", |reset| reset.after_help("Example:\n  hwameidoc volumereplica reset pvc-1187f716-db92-47ac-a5fc-44fd19047a81-fsnjsf"))
    )]
    VolumeReplica {
        #[command(subcommand)]
        action: Option<ResourceAction>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ResourceAction {
    /// Get the resource's detail information
    Get {
        /// Resource name, e.g. pvc-1187f716-db92-47ac-a5fc-44fd19047a81
        name: String,
    },
    /// Reset the resource's status as NotReady
    Reset {
        /// Resource name, e.g. pvc-1187f716-db92-47ac-a5fc-44fd19047a81
        name: String,
    },
}

/// Exit code for a failed parse: 0 for `--help` and `--version`, 1 for usage
/// errors so every failure shares the same code.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    i32::from(err.use_stderr())
}
