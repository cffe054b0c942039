//! Down command - Stop an environment.

use anyhow::{Context as _, Result};
use clap::Args;

use workbench_core::{lifecycle, DownOptions, DEFAULT_DOWN_TIMEOUT};

use super::{Context, EnvArgs};

#[derive(Args)]
pub struct DownArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    /// Seconds to wait for containers to stop
    #[arg(short, long, default_value_t = DEFAULT_DOWN_TIMEOUT)]
    pub timeout: u32,

    /// Remove named and anonymous volumes
    #[arg(short, long)]
    pub volumes: bool,
}

pub async fn execute(args: DownArgs, ctx: &Context) -> Result<()> {
    let env = ctx.environment(args.env.location());
    let options = DownOptions {
        timeout: args.timeout,
        volumes: args.volumes,
    };

    lifecycle::down(&env, &ctx.executor, &options, &ctx.cancel)
        .await
        .with_context(|| format!("Failed to stop environment {}", args.env.name))
}
