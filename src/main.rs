use std::path::PathBuf;

use anyhow::Result;

mod animation;
mod assets;
mod camera;
mod config;
mod engine;
mod math;
mod model;
mod page;
mod scene_graph;
mod showcase;
mod window;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = config::ShowcaseConfig::resolve(config_path.as_deref())?;

    window::run(&config)?;

    Ok(())
}
