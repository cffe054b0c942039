//! Configure command - Re-render configuration of an environment.

use anyhow::{Context as _, Result};
use clap::Args;

use workbench_core::lifecycle;

use super::{Context, EnvArgs};

#[derive(Args)]
pub struct ConfigureArgs {
    #[command(flatten)]
    pub env: EnvArgs,
}

pub async fn execute(args: ConfigureArgs, ctx: &Context) -> Result<()> {
    let env = ctx.environment(args.env.location());
    lifecycle::configure(&env)
        .with_context(|| format!("Failed to configure environment {}", args.env.name))?;
    Ok(())
}
