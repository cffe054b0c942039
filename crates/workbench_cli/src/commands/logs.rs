//! Logs command - Show container logs.

use anyhow::{Context as _, Result};
use clap::Args;

use workbench_core::{lifecycle, LogsOptions};

use super::{Context, EnvArgs};

#[derive(Args)]
pub struct LogsArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    /// Follow log output
    #[arg(short, long)]
    pub follow: bool,

    /// Only show logs of these services
    #[arg(value_name = "SERVICE")]
    pub services: Vec<String>,
}

pub async fn execute(args: LogsArgs, ctx: &Context) -> Result<()> {
    let env = ctx.environment(args.env.location());
    let options = LogsOptions {
        follow: args.follow,
        services: args.services,
    };

    lifecycle::logs(&env, &ctx.executor, &options, &ctx.cancel)
        .await
        .with_context(|| format!("Failed to fetch logs of environment {}", args.env.name))
}
