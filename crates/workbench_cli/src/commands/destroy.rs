//! Destroy command - Stop an environment and delete it.

use anyhow::{Context as _, Result};
use clap::Args;

use workbench_core::{lifecycle, DEFAULT_DOWN_TIMEOUT};

use super::{Context, EnvArgs};

#[derive(Args)]
pub struct DestroyArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    /// Seconds to wait for containers to stop
    #[arg(short, long, default_value_t = DEFAULT_DOWN_TIMEOUT)]
    pub timeout: u32,
}

pub async fn execute(args: DestroyArgs, ctx: &Context) -> Result<()> {
    let env = ctx.environment(args.env.location());

    lifecycle::destroy(&env, &ctx.executor, args.timeout, &ctx.cancel)
        .await
        .with_context(|| format!("Failed to destroy environment {}", args.env.name))
}
