use anyhow::{Context, Result};
use clap::Parser;
use quakemap::{
    core::config::{MarkerScale, OutputFormat, QuakeMapConfig},
    data::feed::{FeedMagnitude, FeedPeriod},
    rendering::renderer_for,
    runtime::RefreshLoop,
    FeatureEncoder, Map,
};
use std::{ops::ControlFlow, path::PathBuf, time::Duration};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a live earthquake feed as a depth-colored marker map"
)]
struct Args {
    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// GeoJSON feed URL
    #[arg(long, conflicts_with = "file")]
    feed: Option<String>,

    /// Local GeoJSON file instead of a URL
    #[arg(long)]
    file: Option<PathBuf>,

    /// USGS feed magnitude class: significant, 4.5, 2.5, 1.0 or all
    #[arg(long, conflicts_with_all = ["feed", "file"])]
    magnitude: Option<FeedMagnitude>,

    /// USGS feed window: hour, day, week or month
    #[arg(long, conflicts_with_all = ["feed", "file"])]
    period: Option<FeedPeriod>,

    /// Marker scale: compact, pixels, meters or pixels per magnitude unit
    #[arg(long)]
    scale: Option<MarkerScale>,

    /// Output format: html or json
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Output file
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Re-fetch and re-render every SECS seconds
    #[arg(long, value_name = "SECS")]
    watch: Option<u64>,

    /// Stop after N refresh cycles (with --watch)
    #[arg(long, requires = "watch")]
    cycles: Option<u64>,
}

impl Args {
    fn load_config(&self) -> Result<QuakeMapConfig> {
        let mut config = match &self.config {
            Some(path) => QuakeMapConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => QuakeMapConfig::default(),
        };

        if let Some(url) = &self.feed {
            config.feed.url = Some(url.clone());
            config.feed.file = None;
        }
        if let Some(path) = &self.file {
            config.feed.file = Some(path.clone());
        }
        if self.magnitude.is_some() || self.period.is_some() {
            config.feed.url = None;
            config.feed.file = None;
        }
        if let Some(magnitude) = self.magnitude {
            config.feed.usgs.magnitude = magnitude;
        }
        if let Some(period) = self.period {
            config.feed.usgs.period = period;
        }
        if let Some(scale) = self.scale {
            config.encoder.marker_scale = scale;
        }
        if let Some(format) = self.format {
            config.output.format = format;
            if self.output.is_none() {
                let extension = renderer_for(format).file_extension();
                config.output.path = config.output.path.with_extension(extension);
            }
        }
        if let Some(path) = &self.output {
            config.output.path = path.clone();
        }
        if let Some(secs) = self.watch {
            config.output.refresh_secs = Some(secs);
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn write_output(config: &QuakeMapConfig, map: &Map) -> Result<()> {
    let renderer = renderer_for(config.output.format);
    let rendered = renderer.render(map).context("failed to render map")?;
    std::fs::write(&config.output.path, rendered)
        .with_context(|| format!("failed to write {}", config.output.path.display()))?;
    log::info!("wrote {}", config.output.path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.load_config()?;

    let source = config
        .feed
        .source()
        .context("failed to set up feed source")?;
    let encoder = FeatureEncoder::from_config(&config.encoder);
    let mut map = quakemap::init_map(&config.map, &config.encoder.palette)
        .context("failed to initialise map")?;

    let Some(secs) = config.output.refresh_secs else {
        let layer = quakemap::render_pass(source.as_ref(), &encoder).await;
        map.set_earthquakes(layer)?;
        return write_output(&config, &map);
    };

    let mut refresh = RefreshLoop::new(source, encoder, Duration::from_secs(secs))?;
    if let Some(cycles) = args.cycles {
        refresh = refresh.with_max_cycles(cycles);
    }
    log::info!("refreshing every {}s into {}", secs, config.output.path.display());

    let mut failure = None;
    let run = refresh.run(|_, layer| {
        let written = map
            .set_earthquakes(layer)
            .map_err(anyhow::Error::from)
            .and_then(|_| write_output(&config, &map));
        match written {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                failure = Some(e);
                ControlFlow::Break(())
            }
        }
    });

    tokio::select! {
        cycles = run => log::info!("finished after {} cycles", cycles),
        _ = tokio::signal::ctrl_c() => log::info!("interrupted, stopping"),
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
