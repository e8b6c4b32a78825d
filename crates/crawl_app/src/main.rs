//! Crawl CLI
//!
//! Lay out, render and play perspective text crawls without a window.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crawl_animation::AnimationEvent;
use crawl_app::{AppConfig, CrawlController, HeadlessPlayer, LogNotifier};
use crawl_core::{DrawCommand, RecordingContext};
use crawl_text::{load_system_face, FontFace, Typeface};
use crawl_view::CrawlView;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "crawl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Perspective text crawl renderer", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Font file (overrides the configured font)
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    /// Installed font family to use when no font file is given
    #[arg(long, global = true)]
    family: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a crawl from start to finish
    Play {
        /// Text file to crawl
        #[arg(short, long)]
        text: PathBuf,

        /// Frames per second (overrides the configured rate)
        #[arg(long)]
        fps: Option<u32>,
    },

    /// Record one frame and print its draw commands
    Frame {
        /// Text file to crawl
        #[arg(short, long)]
        text: PathBuf,

        /// Scroll position between 0 and 1
        #[arg(short, long, default_value = "0")]
        position: f32,
    },

    /// Print line breaks and the paragraph height
    Layout {
        /// Text file to lay out
        #[arg(short, long)]
        text: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(font) = cli.font {
        config.font = Some(font);
    }
    let typeface = resolve_typeface(config.font.as_deref(), cli.family.as_deref())?;

    match cli.command {
        Commands::Play { text, fps } => cmd_play(&config, typeface, &text, fps),
        Commands::Frame { text, position } => cmd_frame(&config, typeface, &text, position),
        Commands::Layout { text } => cmd_layout(&config, typeface, &text),
    }
}

/// Font file first, then an installed family, then estimated metrics
fn resolve_typeface(font: Option<&Path>, family: Option<&str>) -> Result<Typeface> {
    if let Some(path) = font {
        let face = FontFace::from_file(path)
            .with_context(|| format!("Failed to load font {}", path.display()))?;
        info!("Using font '{}'", face.family_name());
        return Ok(Typeface::Face(Arc::new(face)));
    }

    if let Some(family) = family {
        match load_system_face(Some(family)) {
            Ok(face) => {
                info!("Using system font '{}'", face.family_name());
                return Ok(Typeface::Face(face));
            }
            Err(e) => warn!("{}; using estimated metrics", e),
        }
    }

    Ok(Typeface::Fallback)
}

fn build_view(config: &AppConfig, typeface: Typeface, text_path: &Path) -> Result<CrawlView> {
    let text = fs::read_to_string(text_path)
        .with_context(|| format!("Failed to read {}", text_path.display()))?;

    let mut view = CrawlView::from_config(&config.crawl).context("Invalid crawl configuration")?;
    view.set_typeface(typeface);
    view.set_padding(config.padding.into());
    view.on_surface_resized(config.surface.width, config.surface.height);
    view.set_text(&text);
    Ok(view)
}

fn cmd_play(config: &AppConfig, typeface: Typeface, text: &Path, fps: Option<u32>) -> Result<()> {
    let fps = fps.unwrap_or(config.playback.fps);
    if fps == 0 {
        anyhow::bail!("Frame rate must be at least 1");
    }
    let frame_ms = 1000.0 / fps as f32;

    let view = build_view(config, typeface, text)?;
    let mut controller = CrawlController::new(view, HeadlessPlayer::new(), LogNotifier)
        .with_base_duration(config.playback.base_duration_ms);
    if let Some(track) = &config.soundtrack {
        controller = controller.with_soundtrack(track.clone());
    }

    controller.on_click();
    info!(
        "Playing {} at {} fps over {:.1}s",
        text.display(),
        fps,
        config.playback.base_duration_ms / 1000.0
    );

    let mut ctx = RecordingContext::new();
    let mut frame: u64 = 0;
    loop {
        let event = controller.tick(frame_ms);
        ctx.clear();
        controller.render(&mut ctx);
        frame += 1;

        if frame % fps as u64 == 0 || event.is_some() {
            info!(
                "frame {:>6}  position {:.3}  runs {}",
                frame,
                controller.view().state().scroll_position,
                ctx.text_runs().count()
            );
        }
        if event == Some(AnimationEvent::Finished) || !controller.is_scrolling() {
            break;
        }
    }

    info!("Crawl finished after {} frames", frame);
    Ok(())
}

fn cmd_frame(config: &AppConfig, typeface: Typeface, text: &Path, position: f32) -> Result<()> {
    let mut view = build_view(config, typeface, text)?;
    view.set_scroll_position(position);

    let mut ctx = RecordingContext::new();
    view.render(&mut ctx);

    for command in ctx.commands() {
        match command {
            DrawCommand::DrawText {
                text,
                origin,
                transform,
                ..
            } => {
                let screen = transform.map_point(*origin);
                match screen {
                    Some(p) => println!(
                        "text ({:8.1}, {:8.1}) -> ({:8.1}, {:8.1})  {}",
                        origin.x, origin.y, p.x, p.y, text
                    ),
                    None => println!(
                        "text ({:8.1}, {:8.1}) -> behind camera  {}",
                        origin.x, origin.y, text
                    ),
                }
            }
            other => println!("{:?}", other),
        }
    }
    Ok(())
}

fn cmd_layout(config: &AppConfig, typeface: Typeface, text: &Path) -> Result<()> {
    let mut view = build_view(config, typeface, text)?;
    view.recompute_if_dirty();

    let Some(layout) = view.layout() else {
        warn!("Nothing to lay out");
        return Ok(());
    };

    for (i, line) in layout.lines().iter().enumerate() {
        println!(
            "{:>4}  x {:7.1}  w {:7.1}  baseline {:8.1}  {}",
            i, line.x, line.width, line.baseline, line.text
        );
    }
    println!(
        "{} lines, height {:.1}, width {:.1}",
        layout.line_count(),
        layout.height(),
        layout.width()
    );
    Ok(())
}
