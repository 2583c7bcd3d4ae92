use serde::{Deserialize, Serialize};

/// Packing configuration: the usable page size and rotation policy.
///
/// The engine is unit-agnostic; the rest of this workspace uses millimeters.
/// `page_width`/`page_height` describe the area available for placements, so
/// callers subtract any page margin before building a config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackConfig {
    /// Usable page width.
    pub page_width: f64,
    /// Usable page height.
    pub page_height: f64,
    /// Allow 90° rotations for placements where beneficial.
    pub allow_rotation: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        // A4, margin-free.
        Self {
            page_width: 210.0,
            page_height: 297.0,
            allow_rotation: true,
        }
    }
}

impl PackConfig {
    /// Create a fluent builder for `PackConfig`.
    pub fn builder() -> PackConfigBuilder {
        PackConfigBuilder::new()
    }

    /// Validates the page dimensions.
    ///
    /// Returns `InvalidDimension` if either dimension is non-finite, zero or
    /// negative.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::PackError;

        if !(self.page_width.is_finite() && self.page_height.is_finite())
            || self.page_width <= 0.0
            || self.page_height <= 0.0
        {
            return Err(PackError::InvalidDimension {
                width: self.page_width,
                height: self.page_height,
            });
        }
        Ok(())
    }
}

/// Builder for `PackConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackConfigBuilder {
    cfg: PackConfig,
}

impl PackConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackConfig::default(),
        }
    }
    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.cfg.page_width = width;
        self.cfg.page_height = height;
        self
    }
    pub fn allow_rotation(mut self, v: bool) -> Self {
        self.cfg.allow_rotation = v;
        self
    }
    pub fn build(self) -> PackConfig {
        self.cfg
    }
}
