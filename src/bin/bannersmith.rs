use std::{path::PathBuf, time::Duration};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bannersmith::{
    AssetFetcher, BannerRequest, Catalog, FetchConfig, RemoteAssets, render_banner_to_file,
};

#[derive(Parser, Debug)]
#[command(
    name = "bannersmith",
    version,
    about = "Render a clan banner PNG from player-selected component ids"
)]
struct Cli {
    /// Reference database (SQLite) holding the component catalogs.
    #[arg(long)]
    db: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Decal id.
    #[arg(long)]
    decal_id: u32,

    /// Decal primary color id.
    #[arg(long)]
    decal_color_id: u32,

    /// Decal background color id.
    #[arg(long)]
    decal_background_color_id: u32,

    /// Gonfalon (banner) id.
    #[arg(long)]
    gonfalon_id: u32,

    /// Gonfalon color id.
    #[arg(long)]
    gonfalon_color_id: u32,

    /// Gonfalon detail id.
    #[arg(long)]
    gonfalon_detail_id: u32,

    /// Gonfalon detail color id.
    #[arg(long)]
    gonfalon_detail_color_id: u32,

    /// Content host serving the banner art.
    #[arg(long, default_value = bannersmith::DEFAULT_BASE_URL)]
    base_url: String,

    /// Network timeout in seconds for asset downloads.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = Catalog::open(&cli.db)?;
    let fetcher = AssetFetcher::new(&FetchConfig {
        base_url: cli.base_url,
        timeout: Duration::from_secs(cli.timeout_secs),
    })?;
    let mut assets = RemoteAssets::new(catalog, fetcher);

    let request = BannerRequest {
        decal_id: cli.decal_id,
        decal_color_id: cli.decal_color_id,
        decal_background_color_id: cli.decal_background_color_id,
        gonfalon_id: cli.gonfalon_id,
        gonfalon_color_id: cli.gonfalon_color_id,
        gonfalon_detail_id: cli.gonfalon_detail_id,
        gonfalon_detail_color_id: cli.gonfalon_detail_color_id,
    };

    render_banner_to_file(&mut assets, &request, &cli.out)?;

    eprintln!("wrote {}", cli.out.display());
    Ok(())
}
