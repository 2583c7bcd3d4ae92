//! Core library for arranging photographs onto fixed-size pages.
//!
//! - Packing engine: guillotine best-area-fit with 90° rotation and
//!   minimize-area splits, across an unbounded sequence of pages
//! - Picture resolver: crop/scale geometry, alignment, orientation matching
//!   and resolution capping
//! - Renderer: draws a packed layout into a paginated PDF
//!
//! Quick example:
//! ```ignore
//! use gangsheet_core::{pack, PackConfig, PackItem, Picture, PictureStyle};
//! # fn main() -> gangsheet_core::Result<()> {
//! let style = PictureStyle::default();
//! let pictures = vec![
//!     Picture::open("a.jpg", &style)?,
//!     Picture::open("b.jpg", &style)?,
//! ];
//! let items = pictures
//!     .into_iter()
//!     .map(|p| PackItem::new(p.clone(), p.width, p.height))
//!     .collect();
//! let cfg = PackConfig::builder().with_page_size(200.0, 287.0).build();
//! let pages = pack(items, &cfg)?;
//! println!("pages: {}", pages.len());
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod packer;
pub mod picture;
pub mod render;

pub use config::*;
pub use error::*;
pub use model::*;
pub use packer::*;
pub use picture::*;
pub use render::*;

/// Convenience prelude for common types and functions.
/// Importing `gangsheet_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{PackConfig, PackConfigBuilder};
    pub use crate::error::{PackError, Result};
    pub use crate::model::{Page, PackItem, PackStats, Placement, Rect, Rejected};
    pub use crate::packer::pack;
    pub use crate::picture::{FitMode, Picture, PictureStyle};
    pub use crate::render::render_pdf;
}
