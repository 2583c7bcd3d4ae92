//! Paginated PDF output for packed pictures.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::imageops;
use printpdf::{ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::Page;
use crate::picture::Picture;

/// Points per millimeter.
const PT_PER_MM: f64 = 2.8346457;

fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_MM
}

/// Render a packed set of pictures into a PDF file.
///
/// Placement coordinates are mm relative to the top-left of the area inside
/// the page margin, with y growing downward; `page_width`/`page_height` are
/// the physical page size and `margin` the border that was subtracted before
/// packing. An empty layout still produces a single blank page.
#[instrument(skip(pages), fields(pages = pages.len()))]
pub fn render_pdf(
    path: &Path,
    page_width: f64,
    page_height: f64,
    margin: f64,
    pages: &[Page<Picture>],
) -> Result<()> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "gangsheet",
        Mm(page_width as f32),
        Mm(page_height as f32),
        "pictures",
    );

    for (number, page) in pages.iter().enumerate() {
        let layer = if number == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = doc.add_page(Mm(page_width as f32), Mm(page_height as f32), "pictures");
            doc.get_page(p).get_layer(l)
        };

        for location in &page.placements {
            let picture = &location.key;
            debug!(picture = %picture, x = location.x, y = location.y, rotated = location.rotated, "drawing");

            let pixels = picture.visible_pixels()?;
            let pixels = if location.rotated {
                imageops::rotate90(&pixels)
            } else {
                pixels
            };
            let (px_w, px_h) = pixels.dimensions();

            // printpdf's origin is the bottom-left page corner, y up.
            let x = margin + location.x;
            let y = page_height - margin - location.y - location.height;

            let image = Image::from(ImageXObject {
                width: Px(px_w as usize),
                height: Px(px_h as usize),
                color_space: ColorSpace::Rgb,
                bits_per_component: ColorBits::Bit8,
                interpolate: true,
                image_data: pixels.into_raw(),
                image_filter: None,
                clipping_bbox: None,
                smask: None,
            });

            // At 72 dpi one pixel is one point; scale each axis to the placed
            // size.
            image.add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(Mm(x as f32)),
                    translate_y: Some(Mm(y as f32)),
                    scale_x: Some((mm_to_pt(location.width) / px_w as f64) as f32),
                    scale_y: Some((mm_to_pt(location.height) / px_h as f64) as f32),
                    dpi: Some(72.0),
                    ..Default::default()
                },
            );
        }
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))?;
    Ok(())
}
