use anyhow::{bail, Result};

use crate::cli::Cli;

/// Runtime configuration derived from CLI/env.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub page_size: usize,
    pub seed_demo: bool,
}

impl ServerConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if cli.page_size == 0 {
            bail!("--page-size must be at least 1");
        }
        Ok(Self {
            listen_addr: cli.listen_addr.clone(),
            page_size: cli.page_size,
            seed_demo: cli.seed_demo,
        })
    }
}
