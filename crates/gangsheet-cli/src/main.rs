use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use gangsheet_core::{
    PackConfig, PackError, PackItem, PackStats, Page, Picture, PictureStyle, pack, render_pdf,
};
use serde_json::json;
use tracing::{error, info};

mod args;
mod units;

fn main() -> ExitCode {
    let matches = args::command().get_matches();
    let cli = match args::parse(&matches) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(1);
        }
    };
    init_tracing_with_level(cli.quiet, cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(PackError::DoesNotFit { rejected }) = e.downcast_ref::<PackError>() {
                for r in rejected {
                    error!(
                        picture = %r.key,
                        width = r.width,
                        height = r.height,
                        "picture too large for page"
                    );
                }
                ExitCode::from(2)
            } else {
                error!("{e:#}");
                ExitCode::from(1)
            }
        }
    }
}

fn run(cli: &args::Cli) -> anyhow::Result<()> {
    if cli.margin < 0.0
        || cli.page_width <= cli.margin * 2.0
        || cli.page_height <= cli.margin * 2.0
    {
        anyhow::bail!(
            "margin {}mm leaves no usable space on a {}x{}mm page",
            cli.margin,
            cli.page_width,
            cli.page_height
        );
    }

    let pictures = resolve_pictures(&cli.pictures, cli.progress && !cli.quiet)?;
    info!(count = pictures.len(), "resolved pictures");

    let cfg = PackConfig::builder()
        .with_page_size(
            cli.page_width - cli.margin * 2.0,
            cli.page_height - cli.margin * 2.0,
        )
        .build();
    let items = pictures
        .into_iter()
        .map(|picture| {
            let (width, height) = (picture.width, picture.height);
            PackItem::new(picture, width, height)
        })
        .collect();
    let pages = pack(items, &cfg)?;

    let stats = PackStats::from_pages(&pages);
    info!("{}", stats.summary());

    if let Some(path) = &cli.layout_json {
        write_layout_json(path, cli, &pages)
            .with_context(|| format!("write layout {}", path.display()))?;
    }

    render_pdf(
        &cli.output,
        cli.page_width,
        cli.page_height,
        cli.margin,
        &pages,
    )
    .with_context(|| format!("write {}", cli.output.display()))?;
    info!(pages = pages.len(), output = %cli.output.display(), "wrote PDF");
    Ok(())
}

fn resolve_pictures(
    specs: &[(PathBuf, PictureStyle)],
    progress: bool,
) -> anyhow::Result<Vec<Picture>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress && !specs.is_empty() {
        let b = ProgressBar::new(specs.len() as u64);
        b.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} resolving {pos}/{len} [{elapsed_precise}] {wide_msg}",
            )
            .unwrap(),
        );
        Some(b)
    } else {
        None
    };
    let mut list = Vec::with_capacity(specs.len());
    for (path, style) in specs {
        let msg = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        let picture =
            Picture::open(path, style).with_context(|| format!("read {}", path.display()))?;
        list.push(picture);
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(list)
}

/// Export the computed layout as JSON, one record per page.
fn write_layout_json(path: &Path, cli: &args::Cli, pages: &[Page<Picture>]) -> anyhow::Result<()> {
    let pages_val: Vec<serde_json::Value> = pages
        .iter()
        .map(|page| {
            let placements: Vec<serde_json::Value> = page
                .placements
                .iter()
                .map(|location| {
                    json!({
                        "picture": location.key.to_string(),
                        "x": location.x,
                        "y": location.y,
                        "width": location.width,
                        "height": location.height,
                        "rotated": location.rotated,
                    })
                })
                .collect();
            json!({
                "index": page.index,
                "width": page.width,
                "height": page.height,
                "placements": placements,
            })
        })
        .collect();
    let doc = json!({
        "page": { "width": cli.page_width, "height": cli.page_height, "margin": cli.margin },
        "pages": pages_val,
    });
    std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;
    Ok(())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
