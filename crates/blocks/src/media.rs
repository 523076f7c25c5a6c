// ABOUTME: Responsive picture collaborator seam consumed by the decorators.
// ABOUTME: Defines Breakpoint, the PictureSource trait, and a default fragment generator.

//! Picture optimization collaborator.
//!
//! Decorators never build responsive markup themselves: they hand a source
//! URL, alt text, an eager-load flag, and breakpoint widths to a
//! [`PictureSource`] and insert whatever fragment comes back. The default
//! implementation generates a `<picture>` with one webp `<source>` per
//! breakpoint and a fallback `<img>`; swap in another implementation to
//! integrate a real image service.

use crate::render::escape_attr;

/// A responsive breakpoint, expressed as a target width in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub width: u32,
}

impl Breakpoint {
    pub fn new(width: u32) -> Self {
        Self { width }
    }
}

/// Produces ready-to-insert responsive image fragments.
pub trait PictureSource {
    fn optimized_picture(
        &self,
        src: &str,
        alt: &str,
        eager: bool,
        breakpoints: &[Breakpoint],
    ) -> String;
}

/// Default picture generator with width-suffixed URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPictures;

impl PictureSource for DefaultPictures {
    fn optimized_picture(
        &self,
        src: &str,
        alt: &str,
        eager: bool,
        breakpoints: &[Breakpoint],
    ) -> String {
        let mut out = String::from("<picture>");
        for bp in breakpoints {
            out.push_str(&format!(
                "<source type=\"image/webp\" srcset=\"{}?width={}&amp;format=webply&amp;optimize=medium\">",
                escape_attr(src),
                bp.width
            ));
        }
        let fallback_width = breakpoints.first().map(|bp| bp.width).unwrap_or(750);
        out.push_str(&format!(
            "<img loading=\"{}\" src=\"{}?width={}&amp;optimize=medium\" alt=\"{}\">",
            if eager { "eager" } else { "lazy" },
            escape_attr(src),
            fallback_width,
            escape_attr(alt)
        ));
        out.push_str("</picture>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pictures_emit_source_per_breakpoint() {
        let html = DefaultPictures.optimized_picture(
            "/media/phone.png",
            "Móvil",
            false,
            &[Breakpoint::new(150), Breakpoint::new(600)],
        );
        assert_eq!(html.matches("<source").count(), 2);
        assert!(html.contains("width=150"));
        assert!(html.contains("width=600"));
        assert!(html.contains("loading=\"lazy\""));
        assert!(html.contains("alt=\"Móvil\""));
    }

    #[test]
    fn eager_flag_switches_loading_attribute() {
        let html =
            DefaultPictures.optimized_picture("a.jpg", "", true, &[Breakpoint::new(600)]);
        assert!(html.contains("loading=\"eager\""));
    }
}
