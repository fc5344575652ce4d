//! Tokmeter - Token usage estimation for multimodal LLM requests

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tokmeter::format::{render, render_budget, render_request};
use tokmeter::tokens::image::{count_image_tokens, scale_for_tiling, tile_count, ImageDetail};
use tokmeter::types::attachment::{parse_manifest, MAX_FILE_SIZE};
use tokmeter::usage::AccumulatedTokens;
use tokmeter::util::default_usage_path;
use tokmeter::{Attachment, Estimator, EstimatorConfig, FileType};

#[derive(Parser, Debug)]
#[command(name = "tokmeter")]
#[command(about = "Tokmeter - Token usage estimation for multimodal LLM requests")]
#[command(version)]
struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "TOKMETER_CONFIG")]
    config: Option<PathBuf>,

    /// Persisted session usage file (defaults to the user data directory)
    #[arg(long, global = true, env = "TOKMETER_USAGE")]
    usage: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate tokens for a draft message and its attachments.
    Estimate {
        /// Draft message text.
        #[arg(value_name = "TEXT", default_value = "")]
        text: String,

        /// JSON array of attachment records from the upload pipeline.
        #[arg(short, long, value_name = "FILE")]
        attachments: Option<PathBuf>,

        /// Local image or text file to attach (repeatable).
        #[arg(short, long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,

        /// Image detail mode (overrides config).
        #[arg(long)]
        detail: Option<ImageDetail>,

        /// Add this turn to the persisted session usage.
        #[arg(long)]
        record: bool,

        /// Print the breakdown as JSON instead of a report.
        #[arg(long)]
        json: bool,
    },

    /// Compute the token cost of a single image.
    Image {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Image detail mode.
        #[arg(long, default_value = "high")]
        detail: ImageDetail,
    },

    /// Show or reset the persisted session usage.
    Usage {
        /// Zero the persisted totals.
        #[arg(long)]
        reset: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.debug { "debug" } else { "warn" };
    // Logs go to stderr so reports on stdout stay machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match args.command {
        Command::Estimate {
            text,
            attachments,
            files,
            detail,
            record,
            json,
        } => {
            let mut config = load_config(args.config.as_deref())?;
            if let Some(detail) = detail {
                config.image_detail = detail;
            }
            let usage_path = resolve_usage_path(args.usage)?;

            let mut records = match attachments {
                Some(path) => {
                    let content = std::fs::read_to_string(&path).with_context(|| {
                        format!("Failed to read attachment manifest {}", path.display())
                    })?;
                    parse_manifest(&content)?
                }
                None => Vec::new(),
            };
            for path in &files {
                if let Some(attachment) = attachment_from_file(path)? {
                    records.push(attachment);
                }
            }

            let budget = config.budget;
            let estimator = Estimator::new(config);
            let breakdown = estimator.compute_breakdown(&text, &records);

            let mut accumulated = AccumulatedTokens::load_or_default(&usage_path)?;
            if record {
                accumulated.record_breakdown(&breakdown);
                accumulated.save(&usage_path)?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            } else {
                println!("{}", render(&breakdown, &accumulated));
                println!();
                println!("{}", render_request(&breakdown));
                if let Some(budget) = budget {
                    // Once recorded, the turn is already part of the totals
                    let status = if record {
                        budget.check_projected(accumulated.total_tokens)
                    } else {
                        budget.check(&accumulated, &breakdown)
                    };
                    println!("{}", render_budget(&status));
                }
            }
        }

        Command::Image {
            width,
            height,
            detail,
        } => {
            if width == 0 || height == 0 {
                bail!("Image dimensions must be positive, got {}x{}", width, height);
            }
            let tokens = count_image_tokens(width, height, detail);
            if detail == ImageDetail::Low {
                println!("{}x{} ({}): {} tokens", width, height, detail, tokens);
            } else {
                let (w, h) = scale_for_tiling(width, height);
                println!(
                    "{}x{} ({}): scaled to {}x{}, {} tiles, {} tokens",
                    width,
                    height,
                    detail,
                    w,
                    h,
                    tile_count(w, h),
                    tokens
                );
            }
        }

        Command::Usage { reset } => {
            let usage_path = resolve_usage_path(args.usage)?;
            let mut accumulated = AccumulatedTokens::load_or_default(&usage_path)?;
            if reset {
                accumulated.reset();
                accumulated.save(&usage_path)?;
            }
            println!(
                "Input: {}\nOutput: {}\nTotal: {}",
                tokmeter::format::format_token_count(accumulated.total_input_tokens),
                tokmeter::format::format_token_count(accumulated.total_output_tokens),
                tokmeter::format::format_token_count(accumulated.total_tokens),
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EstimatorConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match EstimatorConfig::default_config_path() {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "Using default estimator config");
                return Ok(EstimatorConfig::default());
            }
        },
    };
    EstimatorConfig::from_file(&path)
}

fn resolve_usage_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    explicit
        .or_else(default_usage_path)
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory; pass --usage"))
}

/// Builds an attachment for a local file.
///
/// Images are counted without dimensions. Office documents need text
/// extraction upstream, so they are skipped with a warning.
fn attachment_from_file(path: &Path) -> Result<Option<Attachment>> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let Some(file_type) = FileType::from_extension(ext) else {
        bail!("Unsupported file type: {}", path.display());
    };

    let size = std::fs::metadata(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .len();
    if size > MAX_FILE_SIZE {
        bail!("File exceeds 10MB limit: {}", path.display());
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    match file_type {
        FileType::Image => Ok(Some(Attachment::image(name, None, None))),
        FileType::Text => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(Some(Attachment::text(name, content)))
        }
        FileType::Document => {
            warn!(file = %path.display(), "Skipping document; pass extracted text via --attachments");
            Ok(None)
        }
    }
}
