//! `phishscan config` – show config path and effective values.

use anyhow::Result;
use phishscan_core::config::{self, PhishscanConfig};

pub fn run_config(cfg: &PhishscanConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", cfg.to_toml()?);
    Ok(())
}
