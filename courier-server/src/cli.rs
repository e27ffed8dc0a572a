use clap::Parser;

/// CLI for the courier HTTP daemon.
#[derive(Debug, Clone, Parser)]
#[command(name = "courier", about = "Hypermedia notification backend")]
pub struct Cli {
    /// Listen address for the HTTP endpoints
    #[arg(long, env = "COURIER_ADDR", default_value = "127.0.0.1:8080")]
    pub listen_addr: String,

    /// Default page size for collection listings
    #[arg(long, env = "COURIER_PAGE_SIZE", default_value_t = 25)]
    pub page_size: usize,

    /// Preload a small demo data set (two targets, a template, an audience,
    /// one notification)
    #[arg(long)]
    pub seed_demo: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}
