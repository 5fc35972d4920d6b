use anyhow::Result;
use shower_rs::{run, Config};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // optional path to the config file, config.toml otherwise
    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::new()?,
    };
    run(cfg)?;
    Ok(())
}
