//! `postergen`: export event posters from the command line.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use poster_gen_core::model::parse_hex_color;
use poster_gen_core::{
    templates, AppState, ExportConfig, Exporter, ExternalSyncSettings, PosterData, PosterEdit,
    PosterField, RasterConfig, Snapshot, SyncConfig, Template, UnreachableSync, VectorContainer,
    THEME_PRESETS,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "postergen", version, about = "Event poster generator")]
struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render, rasterize and save a poster, then sync it if configured
    Export {
        #[command(flatten)]
        poster: PosterArgs,
        #[command(flatten)]
        raster: RasterArgs,
        #[arg(long, short, default_value = ".")]
        output_dir: PathBuf,
        #[arg(long, env = "NOTION_API_KEY", hide_env_values = true, default_value = "")]
        api_key: String,
        #[arg(long, env = "NOTION_DATABASE_ID", default_value = "")]
        database_id: String,
        #[arg(long, default_value_t = 1500, help = "Simulated sync latency in milliseconds")]
        sync_latency_ms: u64,
        #[arg(long, default_value_t = false, help = "Use a sync service that always fails")]
        simulate_sync_failure: bool,
    },
    /// Print the scaled SVG container that would be rasterized
    Svg {
        #[command(flatten)]
        poster: PosterArgs,
        #[command(flatten)]
        raster: RasterArgs,
    },
    /// List theme color presets and templates
    Presets,
    /// Write the default poster as JSON
    Init {
        #[arg(default_value = "poster.json")]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Args, Debug)]
struct PosterArgs {
    #[arg(long, help = "Poster JSON file (defaults to the sample poster)")]
    input: Option<PathBuf>,
    #[arg(long)]
    template: Option<Template>,
    #[arg(long, help = "Theme color as #RGB or #RRGGBB")]
    theme: Option<String>,
    #[arg(long)]
    speaker: Option<String>,
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args, Debug)]
struct RasterArgs {
    #[arg(long, default_value_t = 300)]
    dpi: u32,
    #[arg(long, help = "Override target width in pixels")]
    width: Option<u32>,
    #[arg(long, help = "Override target height in pixels")]
    height: Option<u32>,
    #[arg(long, default_value_t = 95)]
    quality: u8,
}

impl PosterArgs {
    fn load(&self) -> Result<PosterData> {
        let mut data = match &self.input {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => PosterData::default(),
        };

        if let Some(template) = self.template {
            data.apply(PosterEdit::SetTemplate(template))?;
        }
        if let Some(theme) = &self.theme {
            data.apply(PosterEdit::SetThemeColor(theme.clone()))?;
        }
        if let Some(speaker) = &self.speaker {
            data.apply(PosterEdit::SetField(PosterField::SpeakerName, speaker.clone()))?;
        }
        if let Some(title) = &self.title {
            data.apply(PosterEdit::SetField(PosterField::Title, title.clone()))?;
        }
        if parse_hex_color(&data.theme_color).is_none() {
            bail!(
                "theme color '{}' is not a #RGB or #RRGGBB hex color",
                data.theme_color
            );
        }
        Ok(data)
    }
}

impl RasterArgs {
    fn config(&self) -> RasterConfig {
        let a4 = RasterConfig::a4(self.dpi);
        let mut config = RasterConfig::with_size(
            self.width.unwrap_or(a4.target_width),
            self.height.unwrap_or(a4.target_height),
        )
        .jpeg_quality(self.quality);
        config.dpi = self.dpi;
        config
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("{:?}", cli.command);

    match cli.command {
        Commands::Export {
            poster,
            raster,
            output_dir,
            api_key,
            database_id,
            sync_latency_ms,
            simulate_sync_failure,
        } => {
            let data = poster.load()?;
            let config = ExportConfig::new(output_dir)
                .raster(raster.config())
                .sync(SyncConfig::with_latency(Duration::from_millis(sync_latency_ms)));

            let mut exporter = Exporter::new(config)?;
            if simulate_sync_failure {
                exporter = exporter.with_sync(Arc::new(UnreachableSync));
            }

            let mut state = AppState::new(data, ExternalSyncSettings::new(api_key, database_id));
            let outcome = exporter.export(&mut state).await;
            if let Some(notice) = state.notice() {
                eprintln!("{:?}: {}", notice.kind, notice.text);
            }
            let outcome = outcome?;

            println!(
                "Saved {} ({}x{}, {} bytes, sync {:?}) in {:?}",
                outcome.path.display(),
                outcome.image.width,
                outcome.image.height,
                outcome.image.data.len(),
                outcome.sync,
                outcome.duration
            );
        }
        Commands::Svg { poster, raster } => {
            let data = poster.load()?;
            let config = raster.config();
            config.validate()?;
            let view = templates::render_preview(&data);
            let container = VectorContainer::build(&Snapshot::capture(&view), &config)?;
            println!("{}", container.svg);
        }
        Commands::Presets => {
            println!("Theme colors:");
            for preset in THEME_PRESETS {
                println!("  {:<8} {}", preset.name, preset.hex);
            }
            println!("Templates:");
            for template in Template::ALL {
                println!("  {}", template);
            }
        }
        Commands::Init { path, force } => write_default_poster(&path, force)?,
    }

    Ok(())
}

fn write_default_poster(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let json = serde_json::to_string_pretty(&PosterData::default())?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
