// ABOUTME: Two-phase document cleanup around the extraction pass.
// ABOUTME: Before: removes whole source-only regions. After: strips tracking attributes and inert elements.

//! Pre/post cleanup transform.
//!
//! Runs twice per migrated document. The `Before` hook fires while the
//! source markup is still intact and drops regions that have no
//! authored counterpart (breadcrumb wrappers, carousel chrome). The
//! `After` hook fires once every pattern has been replaced and strips
//! what remains of the source platform: tracking attributes, behavior
//! hooks, and inert elements.

use dom_query::Document;

/// Whole elements removed before extraction. These are navigation and
/// animation chrome around the patterns, never content.
const REGIONS_BEFORE: &[&str] = &[
    ".ws10-m-with-breadcrumb",
    ".ws10-c-carousel__animation-menu",
    ".ws10-c-carousel__bullets",
    ".ws10-c-carousel__play",
];

/// Attributes stripped from every element after extraction.
const TRACKING_ATTRS: &[&str] = &[
    "data-analytics-category",
    "data-analytics-context",
    "data-analytics-element",
    "data-analytics-id",
    "data-analytics-link",
    "data-analytics-product",
    "data-sq-get",
    "data-sq-mod",
    "data-vfes-seo-empathy-offer-details",
    "data-vfes-seo-empathy-price",
    "data-vfes-seo-empathy-promoperiod",
    "data-vfes-seo-empathy-promoprice",
    "data-config",
    "data-initialized",
];

/// Elements that carry no content once scripts and styles are gone.
const INERT_ELEMENTS: &[&str] = &["noscript", "iframe", "link"];

/// Which side of the extraction pass the transform is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    Before,
    After,
}

/// Applies the cleanup phase selected by `hook` to the whole document.
pub fn transform(hook: Hook, doc: &Document) {
    match hook {
        Hook::Before => remove_regions(doc),
        Hook::After => {
            strip_tracking_attrs(doc);
            remove_inert_elements(doc);
        }
    }
}

fn remove_regions(doc: &Document) {
    for css in REGIONS_BEFORE {
        if let Some(found) = doc.try_select(css) {
            found.remove();
        }
    }
}

fn strip_tracking_attrs(doc: &Document) {
    let all = doc.select("*");
    for sel in all.iter() {
        for attr in TRACKING_ATTRS {
            sel.remove_attr(attr);
        }
    }
}

fn remove_inert_elements(doc: &Document) {
    for css in INERT_ELEMENTS {
        if let Some(found) = doc.try_select(css) {
            found.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    #[test]
    fn before_hook_drops_source_only_regions() {
        let doc = Document::from(
            "<body>\
               <nav class=\"ws10-m-with-breadcrumb\"><a href=\"/\">Inicio</a></nav>\
               <div class=\"ws10-c-carousel\">\
                 <div class=\"ws10-c-carousel__bullets\"><span></span></div>\
                 <div class=\"ws10-c-carousel__play\"></div>\
                 <div class=\"ws10-c-carousel__list-element\"><p>oferta</p></div>\
               </div>\
             </body>",
        );
        transform(Hook::Before, &doc);

        assert!(!doc.select(".ws10-m-with-breadcrumb").exists());
        assert!(!doc.select(".ws10-c-carousel__bullets").exists());
        assert!(!doc.select(".ws10-c-carousel__play").exists());
        // The carousel content itself survives for extraction.
        assert!(doc.select(".ws10-c-carousel__list-element").exists());
    }

    #[test]
    fn after_hook_strips_tracking_attributes() {
        let doc = Document::from(
            "<body><div data-analytics-category=\"promo\" data-sq-mod=\"banner\" class=\"keep\">\
               <a href=\"/ofertas\" data-analytics-link=\"cta\" data-vfes-seo-empathy-price=\"30\">ver</a>\
             </div></body>",
        );
        transform(Hook::After, &doc);

        let div = doc.select("div.keep");
        assert!(div.attr("data-analytics-category").is_none());
        assert!(div.attr("data-sq-mod").is_none());
        let link = doc.select("a");
        assert!(link.attr("data-analytics-link").is_none());
        assert!(link.attr("data-vfes-seo-empathy-price").is_none());
        assert_eq!(link.attr("href").map(|h| h.to_string()), Some("/ofertas".into()));
    }

    #[test]
    fn after_hook_removes_inert_elements() {
        let doc = Document::from(
            "<body>\
               <noscript><img src=\"pixel.gif\"></noscript>\
               <iframe src=\"https://example.com/widget\"></iframe>\
               <p>contenido</p>\
             </body>",
        );
        transform(Hook::After, &doc);

        assert!(!doc.select("noscript").exists());
        assert!(!doc.select("iframe").exists());
        assert!(doc.select("p").exists());
    }

    #[test]
    fn before_hook_leaves_tracking_attributes_alone() {
        let doc = Document::from(
            "<body><div class=\"ws10-c-banner-slim\" data-sq-get=\"slot\"></div></body>",
        );
        transform(Hook::Before, &doc);
        assert!(doc.select("div").attr("data-sq-get").is_some());
    }
}
