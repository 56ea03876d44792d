use clap::Args;

/// Parameters used to configure the transfer program and batching.
/// Optional when using --config-file (used as override)
#[derive(Debug, Clone, Args, Default)]
pub struct TransferCliArgs {
    /// Program invoked once per batch
    #[arg(env = "DUTY_TRANSFER_PROGRAM", long)]
    pub program: Option<String>,

    /// Fixed arguments placed before the batch argument (repeatable)
    #[arg(env = "DUTY_TRANSFER_PROGRAM_ARGS", long = "program-arg", value_delimiter = ',')]
    pub program_args: Option<Vec<String>>,

    /// Max characters in a single batch argument
    #[arg(env = "DUTY_TRANSFER_CHAR_LIMIT", long)]
    pub char_limit: Option<usize>,

    /// Attempts per batch before the run is aborted
    #[arg(env = "DUTY_TRANSFER_MAX_ATTEMPTS", long)]
    pub max_attempts: Option<u32>,

    /// URL substring routing jobs to the secondary site
    #[arg(env = "DUTY_TRANSFER_SITE_FILTER", long)]
    pub site_filter: Option<String>,
}
