//! Create-env command - Scaffold and configure an environment.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use workbench_core::{lifecycle, CreateOptions};

use super::{Context, EnvArgs};

#[derive(Args)]
pub struct CreateEnvArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    /// Overwrite existing scaffold files
    #[arg(short, long)]
    pub overwrite: bool,

    /// Use this file as values.yaml instead of the default config
    #[arg(long, value_name = "FILE")]
    pub with_config: Option<PathBuf>,

    /// Use this file as docker-compose.yaml instead of the default one
    #[arg(long, value_name = "FILE")]
    pub with_docker_compose: Option<PathBuf>,
}

pub async fn execute(args: CreateEnvArgs, ctx: &Context) -> Result<()> {
    let env = ctx.environment(args.env.location());

    let options = CreateOptions {
        overwrite: args.overwrite,
        with_config: args.with_config,
        with_compose: args.with_docker_compose,
    };
    lifecycle::create_env(&env, &options)
        .with_context(|| format!("Failed to create environment {}", args.env.name))?;

    info!("Environment ready at {:?}", env.path());
    Ok(())
}
