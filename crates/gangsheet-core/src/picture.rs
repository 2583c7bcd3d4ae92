//! Resolving pictures against a style: closed-form crop/scale geometry plus
//! pixel access for the renderer.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use image::RgbImage;
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

use crate::error::{PackError, Result};

/// How a picture is fitted into its desired width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Scale and crop the picture so it fully fills the desired area.
    Crop,
    /// Scale the picture down to fit within the desired area, not necessarily
    /// completely filling it.
    Scale,
}

impl FromStr for FitMode {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "crop" => Ok(Self::Crop),
            "scale" => Ok(Self::Scale),
            _ => Err(()),
        }
    }
}

/// Style options captured at the moment a picture is resolved.
///
/// The CLI mutates a running cursor of these as arguments are parsed; each
/// picture keeps the snapshot that applied to it, so later style changes
/// never affect earlier pictures.
#[derive(Debug, Clone, PartialEq)]
pub struct PictureStyle {
    /// Desired placement size, in mm.
    pub desired_width: f64,
    pub desired_height: f64,
    pub fit_mode: FitMode,
    /// Alignment of the picture prior to cropping, each in `0.0..=1.0`.
    /// (0.5, 0.5) crops to the center; (0, 0) keeps the top/left edge.
    pub x_alignment: f64,
    pub y_alignment: f64,
    /// Swap the desired width/height when that better matches the picture's
    /// aspect ratio.
    pub rotate_for_best_fit: bool,
    /// Resolution cap; `None` keeps the source resolution.
    pub pixels_per_mm: Option<f64>,
}

impl Default for PictureStyle {
    fn default() -> Self {
        Self {
            // 3x4 inch prints at up to 300 dpi.
            desired_width: 76.2,
            desired_height: 101.6,
            fit_mode: FitMode::Crop,
            x_alignment: 0.5,
            y_alignment: 0.5,
            rotate_for_best_fit: true,
            pixels_per_mm: Some(300.0 / 25.4),
        }
    }
}

/// A picture resolved against a [`PictureStyle`]: its final visible size on
/// the page plus everything the renderer needs to reproduce the crop.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub filename: PathBuf,

    /// The image content must be rotated 90° clockwise after decoding.
    pub rotate_image: bool,

    /// Resample target in pixels, after any content rotation. When this
    /// differs from the decoded-and-rotated size, the image is resampled.
    pub image_width: u32,
    pub image_height: u32,

    /// The visible area of this picture on the page, in mm.
    pub width: f64,
    pub height: f64,

    /// Scaling factor converting pixels to mm at the resolved size.
    pub scale: f64,

    /// Translation applied after scaling but before cropping to the rectangle
    /// `(0, 0, width, height)`. Non-positive in crop mode.
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Picture {
    /// Probe `path` for its pixel dimensions and resolve it against `style`.
    pub fn open(path: impl Into<PathBuf>, style: &PictureStyle) -> Result<Self> {
        let path = path.into();
        let (width, height) = image::image_dimensions(&path)?;
        Self::from_dimensions(path, width, height, style)
    }

    /// Resolve a picture whose pixel dimensions are already known. Pure
    /// geometry; the file is not touched.
    pub fn from_dimensions(
        path: impl Into<PathBuf>,
        image_width: u32,
        image_height: u32,
        style: &PictureStyle,
    ) -> Result<Self> {
        if !(style.desired_width.is_finite() && style.desired_height.is_finite())
            || style.desired_width <= 0.0
            || style.desired_height <= 0.0
        {
            return Err(PackError::InvalidDimension {
                width: style.desired_width,
                height: style.desired_height,
            });
        }

        let (mut iw, mut ih) = (image_width, image_height);
        let (mut x_alignment, mut y_alignment) = (style.x_alignment, style.y_alignment);
        let mut image_aspect = ih as f64 / iw as f64;
        let mut rotate_image = false;

        if style.rotate_for_best_fit {
            let desired_aspect = style.desired_height / style.desired_width;
            if image_aspect != 1.0
                && desired_aspect != 1.0
                && (desired_aspect > 1.0) != (image_aspect > 1.0)
            {
                std::mem::swap(&mut iw, &mut ih);
                std::mem::swap(&mut x_alignment, &mut y_alignment);
                image_aspect = 1.0 / image_aspect;
                rotate_image = true;
            }
        }

        let (width, height, mut scale, x_offset, y_offset) = match style.fit_mode {
            FitMode::Crop => {
                let width = style.desired_width;
                let height = style.desired_height;

                let scale_to_fit_width = width / iw as f64;
                let scale_to_fit_height = height / ih as f64;
                let scale = scale_to_fit_width.max(scale_to_fit_height);

                let scaled_width = iw as f64 * scale;
                let scaled_height = ih as f64 * scale;
                let x_offset = -((scaled_width - width) * x_alignment);
                let y_offset = -((scaled_height - height) * y_alignment);
                (width, height, scale, x_offset, y_offset)
            }
            FitMode::Scale => {
                let (width, height) = if style.desired_width * image_aspect <= style.desired_height
                {
                    (style.desired_width, style.desired_width * image_aspect)
                } else {
                    (style.desired_height / image_aspect, style.desired_height)
                };
                (width, height, width / iw as f64, 0.0, 0.0)
            }
        };

        if let Some(pixels_per_mm) = style.pixels_per_mm {
            if pixels_per_mm < 1.0 / scale {
                let rescale = pixels_per_mm * scale;
                iw = (iw as f64 * rescale) as u32;
                ih = (ih as f64 * rescale) as u32;
                scale = 1.0 / pixels_per_mm;
            }
        }

        Ok(Self {
            filename: path.into(),
            rotate_image,
            image_width: iw,
            image_height: ih,
            width,
            height,
            scale,
            x_offset,
            y_offset,
        })
    }

    /// Decode, rotate and resample the picture to its resolved pixel size.
    pub fn load(&self) -> Result<RgbImage> {
        let mut img = image::open(&self.filename)?;
        if self.rotate_image {
            img = img.rotate90();
        }
        if img.width() != self.image_width || img.height() != self.image_height {
            img = img.resize_exact(self.image_width, self.image_height, FilterType::CatmullRom);
        }
        Ok(img.to_rgb8())
    }

    /// The pixels inside the visible window `(0, 0, width, height)`, with any
    /// crop-mode overflow removed.
    pub fn visible_pixels(&self) -> Result<RgbImage> {
        let img = self.load()?;
        let (iw, ih) = img.dimensions();
        let vw = ((self.width / self.scale).round() as u32).clamp(1, iw);
        let vh = ((self.height / self.scale).round() as u32).clamp(1, ih);
        let vx = ((-self.x_offset / self.scale).round() as u32).min(iw - vw);
        let vy = ((-self.y_offset / self.scale).round() as u32).min(ih - vh);
        if (vx, vy, vw, vh) == (0, 0, iw, ih) {
            return Ok(img);
        }
        Ok(imageops::crop_imm(&img, vx, vy, vw, vh).to_image())
    }
}

impl fmt::Display for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.filename.display().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORTRAIT: (u32, u32) = (192, 256);
    const LANDSCAPE: (u32, u32) = (256, 192);
    const SQUARE: (u32, u32) = (256, 256);

    fn style(dw: f64, dh: f64, fit_mode: FitMode, rotate: bool) -> PictureStyle {
        PictureStyle {
            desired_width: dw,
            desired_height: dh,
            fit_mode,
            rotate_for_best_fit: rotate,
            pixels_per_mm: None,
            ..PictureStyle::default()
        }
    }

    fn resolve((iw, ih): (u32, u32), style: &PictureStyle) -> Picture {
        Picture::from_dimensions("test.jpg", iw, ih, style).unwrap()
    }

    #[test]
    fn crop_mode_uses_desired_size_exactly() {
        let p = resolve(PORTRAIT, &style(1.25, 2.5, FitMode::Crop, false));
        assert_eq!(p.width, 1.25);
        assert_eq!(p.height, 2.5);
    }

    #[test]
    fn scale_mode_fits_within_desired_size() {
        // (image, desired, expected visible size)
        let cases = [
            // Space is taller than needed
            (PORTRAIT, (3.0, 5.0), (3.0, 4.0)),
            (LANDSCAPE, (3.0, 5.0), (3.0, 2.25)),
            (LANDSCAPE, (3.0, 3.0), (3.0, 2.25)),
            (LANDSCAPE, (3.0, 2.5), (3.0, 2.25)),
            (SQUARE, (3.0, 5.0), (3.0, 3.0)),
            // Space is wider than needed
            (PORTRAIT, (2.5, 3.0), (2.25, 3.0)),
            (PORTRAIT, (3.0, 3.0), (2.25, 3.0)),
            (PORTRAIT, (3.5, 3.0), (2.25, 3.0)),
            (LANDSCAPE, (8.0, 3.0), (4.0, 3.0)),
            (SQUARE, (5.0, 3.0), (3.0, 3.0)),
            // Space is exactly right
            (PORTRAIT, (3.0, 4.0), (3.0, 4.0)),
            (LANDSCAPE, (4.0, 3.0), (4.0, 3.0)),
            (SQUARE, (3.0, 3.0), (3.0, 3.0)),
        ];
        for (image, (dw, dh), (ew, eh)) in cases {
            let p = resolve(image, &style(dw, dh, FitMode::Scale, false));
            assert_eq!((p.width, p.height), (ew, eh), "{image:?} into {dw}x{dh}");
        }
    }

    #[test]
    fn rotate_for_best_fit_swaps_mismatched_orientations() {
        let p = resolve(PORTRAIT, &style(4.0, 3.0, FitMode::Crop, true));
        assert!(p.rotate_image);
        assert_eq!((p.image_width, p.image_height), (256, 192));
        assert_eq!((p.width, p.height), (4.0, 3.0));

        let l = resolve(LANDSCAPE, &style(3.0, 4.0, FitMode::Crop, true));
        assert!(l.rotate_image);
        assert_eq!((l.image_width, l.image_height), (192, 256));
        assert_eq!((l.width, l.height), (3.0, 4.0));
    }

    #[test]
    fn square_pictures_never_rotate() {
        for desired in [(3.0, 4.0), (4.0, 3.0), (3.0, 3.0)] {
            let p = resolve(SQUARE, &style(desired.0, desired.1, FitMode::Crop, true));
            assert!(!p.rotate_image);
            assert_eq!((p.width, p.height), desired);
        }
    }

    #[test]
    fn alignment_moves_the_crop_window() {
        let centered = resolve(PORTRAIT, &style(1.0, 2.0, FitMode::Crop, false));
        assert!(centered.x_offset != 0.0 || centered.y_offset != 0.0);

        let mut top_left = style(1.0, 2.0, FitMode::Crop, false);
        top_left.x_alignment = 0.0;
        top_left.y_alignment = 0.0;
        let p = resolve(PORTRAIT, &top_left);
        assert_eq!(p.x_offset, 0.0);
        assert_eq!(p.y_offset, 0.0);
    }

    #[test]
    fn pixels_per_mm_caps_the_resample_target() {
        let base = style(25.6, 19.2, FitMode::Crop, false);

        // No cap: native resolution.
        let p1 = resolve(LANDSCAPE, &base);
        assert_eq!(p1.scale, 1.0 / 10.0);
        assert_eq!((p1.image_width, p1.image_height), (256, 192));

        // Resolution must be halved.
        let mut halved = base.clone();
        halved.pixels_per_mm = Some(5.0);
        let p2 = resolve(LANDSCAPE, &halved);
        assert_eq!(p2.scale, 1.0 / 5.0);
        assert_eq!((p2.image_width, p2.image_height), (128, 96));

        // Resolution is exactly sufficient: no change.
        let mut exact = base.clone();
        exact.pixels_per_mm = Some(10.0);
        let p3 = resolve(LANDSCAPE, &exact);
        assert_eq!(p3.scale, 1.0 / 10.0);
        assert_eq!((p3.image_width, p3.image_height), (256, 192));

        // Source resolution below the cap: no change.
        let mut loose = base.clone();
        loose.pixels_per_mm = Some(20.0);
        let p4 = resolve(LANDSCAPE, &loose);
        assert_eq!(p4.scale, 1.0 / 10.0);
        assert_eq!((p4.image_width, p4.image_height), (256, 192));
    }

    #[test]
    fn non_positive_desired_size_is_rejected() {
        let bad = style(0.0, 4.0, FitMode::Crop, false);
        assert!(matches!(
            Picture::from_dimensions("test.jpg", 100, 100, &bad),
            Err(PackError::InvalidDimension { .. })
        ));
    }
}
