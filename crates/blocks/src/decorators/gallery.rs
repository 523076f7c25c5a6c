// ABOUTME: Product gallery decorator: one main display plus a thumbnail strip.
// ABOUTME: Rows without a locatable image are skipped; zero images aborts decoration entirely.

//! Product gallery.
//!
//! Each block row contributes the first image found inside a `<picture>`;
//! rows without one are simply excluded. With zero images the decorator
//! aborts and the block stays untouched, so [`decorate`] returns `None`.
//! The main display always shows the selected image eager-loaded at the
//! large width; thumbnails are lazy at the small width and exactly one
//! carries the active marker.

use scraper::{Html, Selector};

use crate::media::{Breakpoint, PictureSource};
use crate::model::Block;
use crate::render::escape_attr;

const MAIN_WIDTH: u32 = 600;
const THUMB_WIDTH: u32 = 150;

/// One gallery image, reduced to its source URL and alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
}

/// A decorated product gallery.
#[derive(Debug, Clone)]
pub struct ProductGallery {
    images: Vec<GalleryImage>,
    selected: usize,
}

/// Decorates a gallery block. Returns `None` when no row holds a
/// locatable image, leaving the original content unchanged.
pub fn decorate(block: &Block) -> Option<ProductGallery> {
    let sel = Selector::parse("picture img").unwrap();
    let mut images = Vec::new();

    for row in block.rows() {
        for cell in row.cells() {
            let fragment = Html::parse_fragment(cell.html());
            if let Some(img) = fragment.select(&sel).next() {
                images.push(GalleryImage {
                    src: img.value().attr("src").unwrap_or("").to_string(),
                    alt: img.value().attr("alt").unwrap_or("").to_string(),
                });
                break;
            }
        }
    }

    if images.is_empty() {
        return None;
    }
    Some(ProductGallery {
        images,
        selected: 0,
    })
}

impl ProductGallery {
    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Shows the image at `idx` in the main display and moves the active
    /// marker to its thumbnail. Out-of-range indices are ignored.
    pub fn select(&mut self, idx: usize) {
        if idx < self.images.len() {
            self.selected = idx;
        }
    }

    /// Renders the main display and thumbnail strip for the current
    /// selection. Only the main image is eager-loaded.
    pub fn render(&self, pictures: &dyn PictureSource) -> String {
        let current = &self.images[self.selected];
        let mut out = String::from("<div class=\"product-gallery-main\">");
        out.push_str(&pictures.optimized_picture(
            &current.src,
            &current.alt,
            true,
            &[Breakpoint::new(MAIN_WIDTH)],
        ));
        out.push_str("</div><div class=\"product-gallery-thumbs\">");

        for (idx, image) in self.images.iter().enumerate() {
            let class = if idx == self.selected {
                "product-gallery-thumb active"
            } else {
                "product-gallery-thumb"
            };
            let label = if image.alt.is_empty() {
                format!("Product image {}", idx + 1)
            } else {
                image.alt.clone()
            };
            out.push_str(&format!(
                "<button class=\"{}\" aria-label=\"{}\">",
                class,
                escape_attr(&label)
            ));
            out.push_str(&pictures.optimized_picture(
                &image.src,
                &image.alt,
                false,
                &[Breakpoint::new(THUMB_WIDTH)],
            ));
            out.push_str("</button>");
        }
        out.push_str("</div>");
        out
    }
}
