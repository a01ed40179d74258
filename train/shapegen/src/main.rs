use std::path::PathBuf;

use clap::Parser;
use shapegen::{
    DatasetCfg, MAX_SHAPES, RenderCfg,
    dataset::DEFAULT_REPLICAS,
    render::{DEFAULT_IMAGE_SIZE, DEFAULT_OUT_DIR},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shapegen")]
#[command(about = "Render labeled images of distinct colored shapes")]
struct Cmd {
    /// Directory receiving the PNG files and data.csv
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,
    /// Image size parameter; the PNG side is this many pixels
    #[arg(long, default_value_t = DEFAULT_IMAGE_SIZE)]
    image_size: u32,
    /// Images per shape count
    #[arg(long, default_value_t = DEFAULT_REPLICAS)]
    replicas: usize,
    #[arg(long, default_value_t = MAX_SHAPES)]
    max_shapes: usize,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cmd = Cmd::parse();
    let render = RenderCfg {
        out_dir: cmd.out_dir,
        image_size: cmd.image_size,
    };
    let config = DatasetCfg {
        replicas_per_category: cmd.replicas,
        max_shapes: cmd.max_shapes,
        seed: cmd.seed,
    };

    let dataset = shapegen::generate(&render, &config)?;
    tracing::info!("Generated {} images", dataset.files.len());

    Ok(())
}
