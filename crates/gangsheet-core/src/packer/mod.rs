//! The packing engine: guillotine best-area-fit with rotation, across an
//! unbounded sequence of identically-sized pages.

use std::fmt::Display;

use tracing::{debug, instrument};

use crate::config::PackConfig;
use crate::error::{PackError, Result};
use crate::model::{Page, PackItem, Placement, Rejected};

mod guillotine;

use guillotine::{Fit, PageSpace};

/// Pack `items` onto as few pages as the heuristic manages.
///
/// Rectangles are placed largest-area first. Each one goes into the
/// smallest-area free rectangle across all open pages that can contain it
/// (either orientation when rotation is allowed); when no open page can, a
/// new page is opened. Rectangles too large for an empty page in both
/// orientations can never be placed and fail the whole call with
/// [`PackError::DoesNotFit`], which lists every offender at once.
///
/// Deterministic: identical input yields identical output. Ties between
/// equally good fits resolve by smaller free-rectangle perimeter, then lowest
/// page index, then free-list position.
#[instrument(skip_all, fields(count = items.len()))]
pub fn pack<K: Display>(items: Vec<PackItem<K>>, cfg: &PackConfig) -> Result<Vec<Page<K>>> {
    cfg.validate()?;
    for item in &items {
        if !(item.width.is_finite() && item.height.is_finite())
            || item.width <= 0.0
            || item.height <= 0.0
        {
            return Err(PackError::InvalidDimension {
                width: item.width,
                height: item.height,
            });
        }
    }

    // Largest areas first; the sort is stable, so equal areas keep their
    // input order.
    let mut items = items;
    items.sort_by(|a, b| (b.width * b.height).total_cmp(&(a.width * a.height)));

    let mut spaces: Vec<PageSpace> = Vec::new();
    let mut pages: Vec<Page<K>> = Vec::new();
    let mut rejected: Vec<Rejected> = Vec::new();

    for item in items {
        let (w, h) = (item.width, item.height);

        let mut best: Option<(usize, Fit)> = None;
        for (page_index, space) in spaces.iter().enumerate() {
            if let Some(fit) = space.best_fit(w, h, cfg.allow_rotation) {
                if best.is_none_or(|(_, b)| fit.beats(&b)) {
                    best = Some((page_index, fit));
                }
            }
        }

        let (page_index, fit) = match best {
            Some(found) => found,
            None => {
                // No open page can host it; trial a fresh page. If even an
                // empty page cannot, the rectangle can never be placed and no
                // page is consumed for it.
                let space = PageSpace::new(cfg.page_width, cfg.page_height);
                match space.best_fit(w, h, cfg.allow_rotation) {
                    Some(fit) => {
                        let page_index = spaces.len();
                        spaces.push(space);
                        pages.push(Page {
                            index: page_index,
                            width: cfg.page_width,
                            height: cfg.page_height,
                            placements: Vec::new(),
                        });
                        debug!(page = page_index, "opened page");
                        (page_index, fit)
                    }
                    None => {
                        debug!(key = %item.key, w, h, "does not fit an empty page");
                        rejected.push(Rejected {
                            key: item.key.to_string(),
                            width: w,
                            height: h,
                        });
                        continue;
                    }
                }
            }
        };

        let (pw, ph) = if fit.rotated { (h, w) } else { (w, h) };
        let placed = spaces[page_index].place(fit.free_index, pw, ph);
        pages[page_index].placements.push(Placement {
            key: item.key,
            x: placed.x,
            y: placed.y,
            width: placed.w,
            height: placed.h,
            rotated: fit.rotated,
        });
    }

    if !rejected.is_empty() {
        return Err(PackError::DoesNotFit { rejected });
    }
    debug!(pages = pages.len(), "packed");
    Ok(pages)
}
