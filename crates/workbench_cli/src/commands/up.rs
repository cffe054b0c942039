//! Up command - Create, configure and start an environment.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use workbench_config::{EnvLocation, DEFAULT_ENV_DIR, DEFAULT_ENV_NAME};
use workbench_core::{lifecycle, CreateOptions, UpOptions};

use super::Context;

#[derive(Args)]
pub struct UpArgs {
    /// Directory containing environments
    #[arg(long, env = "WORKBENCH_ENV_DIR", default_value = DEFAULT_ENV_DIR)]
    pub env_dir: PathBuf,

    /// Name of the environment to start
    #[arg(short = 'n', long, env = "WORKBENCH_ENV_NAME", default_value = DEFAULT_ENV_NAME)]
    pub name: String,

    /// Don't render configuration files before starting containers
    #[arg(long)]
    pub no_configure: bool,

    /// Overwrite existing scaffold files
    #[arg(short, long)]
    pub overwrite: bool,

    /// Run containers in the background
    #[arg(short, long)]
    pub detach: bool,

    /// Build images before starting containers
    #[arg(short, long)]
    pub build: bool,

    /// Do not use cache when building images
    #[arg(short = 'c', long)]
    pub no_cache: bool,

    /// Use this file as values.yaml instead of the default config
    #[arg(long, value_name = "FILE")]
    pub with_config: Option<PathBuf>,

    /// Use this file as docker-compose.yaml instead of the default one
    #[arg(long, value_name = "FILE")]
    pub with_docker_compose: Option<PathBuf>,
}

pub async fn execute(args: UpArgs, ctx: &Context) -> Result<()> {
    let env = ctx.environment(EnvLocation::new(&args.env_dir, &args.name));

    let options = UpOptions {
        create: CreateOptions {
            overwrite: args.overwrite,
            with_config: args.with_config,
            with_compose: args.with_docker_compose,
        },
        no_configure: args.no_configure,
        detach: args.detach,
        build: args.build,
        no_cache: args.no_cache,
    };

    lifecycle::up(&env, &ctx.executor, &options, &ctx.cancel)
        .await
        .with_context(|| format!("Failed to start environment {}", args.name))
}
