use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::types::ModeSelection;

pub mod archive;
pub mod transfer;

pub use archive::ArchiveCliArgs;
pub use transfer::TransferCliArgs;

#[derive(Parser, Debug)]
#[command(
    name = "duty-transfer",
    about = "Process duty batch manifests into chunked, retried file transfers",
    long_about = "duty-transfer reads the manifests produced by the duty pipeline, resolves their destinations, \
    splits the transfer jobs into command-safe batches, runs the transfer program for every batch and archives \
    each manifest once all of its batches succeeded.\n\n\
    Quick Start:\n  \
    duty-transfer run --config-file duty-transfer.yaml\n  \
    duty-transfer run --config-file duty-transfer.yaml --manifest run__WES__01.csv",
    after_help = "Examples:\n  \
    duty-transfer run --config-file duty-transfer.yaml --mode test\n  \
    duty-transfer plan --config-file duty-transfer.yaml --manifest 002_NGS501__MokaPipe__01.csv"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transfer and archive manifests
    #[command(long_about = "Process one manifest (--manifest) or every manifest in the selected root.\n\n\
        Examples:\n  \
        duty-transfer run --config-file duty-transfer.yaml\n  \
        duty-transfer run --manifest /duty/run__WES__01.csv")]
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
    /// Show the batches a manifest would produce, without creating directories or transferring
    Plan {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
}

#[derive(Parser, Debug, Clone, Default)]
pub struct RunCmd {
    /// Path to YAML configuration file
    ///
    /// Example: --config-file /path/to/duty-transfer.yaml
    #[arg(env = "DUTY_TRANSFER_CONFIG_FILE", long, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Manifest to process. When omitted every manifest in the selected root is processed.
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// How to choose between the TEST and PROD roots
    #[arg(env = "DUTY_TRANSFER_MODE", long, value_enum)]
    pub mode: Option<ModeSelection>,

    #[clap(flatten, next_help_heading = "Transfer")]
    pub transfer_args: TransferCliArgs,

    #[clap(flatten, next_help_heading = "Archive")]
    pub archive_args: ArchiveCliArgs,
}
