use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page units (mm throughout this workspace).
/// `x,y` is the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
    pub fn area(&self) -> f64 {
        self.w * self.h
    }
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.w + self.h)
    }
    /// Right edge coordinate (`x + w`).
    pub fn right(&self) -> f64 {
        self.x + self.w
    }
    /// Bottom edge coordinate (`y + h`).
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
    /// Returns true if `r` is fully inside `self` (inclusive edges).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
}

/// One rectangle to pack: an opaque caller-owned key plus its resolved
/// physical size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackItem<K = String> {
    pub key: K,
    pub width: f64,
    pub height: f64,
}

impl<K> PackItem<K> {
    pub fn new(key: K, width: f64, height: f64) -> Self {
        Self { key, width, height }
    }
}

/// A placed rectangle within a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement<K = String> {
    /// User-specified key (e.g., a resolved picture).
    pub key: K,
    /// Top-left corner in margin-free page-local coordinates.
    pub x: f64,
    pub y: f64,
    /// Placed (post-rotation) width/height.
    pub width: f64,
    pub height: f64,
    /// True if the rectangle was rotated 90° when placed.
    pub rotated: bool,
}

/// A single output page (logical record). Pages are identically sized and
/// created on demand, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<K = String> {
    pub index: usize,
    pub width: f64,
    pub height: f64,
    pub placements: Vec<Placement<K>>,
}

/// A rectangle that could not be placed on any page, reported with its
/// original (unrotated) dimensions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rejected {
    pub key: String,
    pub width: f64,
    pub height: f64,
}

/// Statistics about packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    /// Total number of pages in the layout.
    pub num_pages: usize,
    /// Total number of placed rectangles.
    pub num_placements: usize,
    /// Sum of page areas.
    pub total_page_area: f64,
    /// Sum of placed rectangle areas.
    pub used_area: f64,
    /// used_area / total_page_area (0.0 to 1.0). Higher is better.
    pub occupancy: f64,
    /// Number of rotated placements.
    pub num_rotated: usize,
}

impl PackStats {
    /// Computes statistics over a packed layout.
    pub fn from_pages<K>(pages: &[Page<K>]) -> Self {
        let mut num_placements = 0;
        let mut total_page_area = 0.0;
        let mut used_area = 0.0;
        let mut num_rotated = 0;

        for page in pages {
            total_page_area += page.width * page.height;
            for placement in &page.placements {
                num_placements += 1;
                used_area += placement.width * placement.height;
                if placement.rotated {
                    num_rotated += 1;
                }
            }
        }

        let occupancy = if total_page_area > 0.0 {
            used_area / total_page_area
        } else {
            0.0
        };

        PackStats {
            num_pages: pages.len(),
            num_placements,
            total_page_area,
            used_area,
            occupancy,
            num_rotated,
        }
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Pages: {}, Pictures: {}, Occupancy: {:.2}%, Page Area: {:.0} mm², Used Area: {:.0} mm², Rotated: {}",
            self.num_pages,
            self.num_placements,
            self.occupancy * 100.0,
            self.total_page_area,
            self.used_area,
            self.num_rotated,
        )
    }

    /// Returns wasted space in mm².
    pub fn wasted_area(&self) -> f64 {
        (self.total_page_area - self.used_area).max(0.0)
    }
}
