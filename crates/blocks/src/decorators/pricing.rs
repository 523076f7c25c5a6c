// ABOUTME: Pricing card list decorator: classifies row containers and builds highlight/price-box structure.
// ABOUTME: Splits image vs body regions, promotes the best-seller badge, and groups pre-boundary content.

//! Pricing cards.
//!
//! Each block row becomes one card: its cells merge into a single list
//! item, every container is classified as an image region (holds a
//! `<picture>`, or has no element children) or a body region, and the
//! first body region is restructured:
//!
//! 1. A leading paragraph whose `<strong>` matches the best-seller marker
//!    becomes a highlight tab prepended to the card.
//! 2. Everything before the boundary (first inline feature list, else
//!    first link-bearing paragraph) moves into a price box; empty
//!    paragraphs are discarded on the way.
//! 3. Price-box paragraphs get amount styling (monthly price pattern) or
//!    features styling (leading dash).
//!
//! Finally every picture is swapped for an optimized responsive fragment.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::media::PictureSource;
use crate::model::{Block, Cell};
use crate::render::{rewrite_pictures, tag_root};

static HIGHLIGHT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)más vendida").unwrap());
static MONTHLY_PRICE: Lazy<Regex> = Lazy::new(|| Regex::new(r"€/mes").unwrap());

const IMAGE_CLASS: &str = "cards-pricing-card-image";
const BODY_CLASS: &str = "cards-pricing-card-body";

/// Decorates a pricing block, returning the replacement markup for the
/// block content (a `<ul>` of classified cards).
pub fn decorate(block: &Block, pictures: &dyn PictureSource) -> String {
    let mut out = String::from("<ul>");
    for row in block.rows() {
        out.push_str(&decorate_card(row.cells()));
    }
    out.push_str("</ul>");
    rewrite_pictures(&out, pictures, 750)
}

fn decorate_card(cells: &[Cell]) -> String {
    let mut regions = String::new();
    let mut highlight = None;
    let mut body_seen = false;

    for cell in cells {
        let is_image = cell.has_picture() || cell.top_level_element_count() == 0;
        if is_image {
            regions.push_str(&format!("<div class=\"{}\">{}</div>", IMAGE_CLASS, cell.html()));
        } else if !body_seen {
            body_seen = true;
            let body = process_body(cell.html());
            highlight = body.highlight;
            regions.push_str(&format!("<div class=\"{}\">{}</div>", BODY_CLASS, body.html));
        } else {
            regions.push_str(&format!("<div class=\"{}\">{}</div>", BODY_CLASS, cell.html()));
        }
    }

    let mut li = String::new();
    match &highlight {
        Some(text) => {
            li.push_str("<li class=\"highlighted\">");
            li.push_str(&format!(
                "<div class=\"cards-pricing-highlight-tab\">{}</div>",
                crate::render::escape_text(text)
            ));
        }
        None => li.push_str("<li>"),
    }
    li.push_str(&regions);
    li.push_str("</li>");
    li
}

struct ProcessedBody {
    highlight: Option<String>,
    html: String,
}

/// Restructures one body region: highlight promotion, boundary detection,
/// and price-box grouping.
fn process_body(html: &str) -> ProcessedBody {
    let fragment = Html::parse_fragment(html);
    let root = fragment.root_element();
    let strong_sel = Selector::parse("strong").unwrap();
    let a_sel = Selector::parse("a").unwrap();
    let img_sel = Selector::parse("img").unwrap();

    let children: Vec<_> = root.children().collect();

    // Highlight badge lives in the first element child, and only if it is
    // a paragraph with a matching <strong>.
    let mut highlight = None;
    let mut skip_id = None;
    if let Some(first_el) = children.iter().filter_map(|n| ElementRef::wrap(*n)).next() {
        if first_el.value().name() == "p" {
            if let Some(strong) = first_el.select(&strong_sel).next() {
                let text = strong.text().collect::<String>();
                if HIGHLIGHT_MARKER.is_match(&text) {
                    highlight = Some(text.trim().to_string());
                    skip_id = Some(first_el.id());
                }
            }
        }
    }

    // Boundary: the first inline feature list wins over the first
    // link-bearing paragraph.
    let remaining: Vec<_> = children
        .iter()
        .filter(|n| Some(n.id()) != skip_id)
        .copied()
        .collect();
    let boundary_id = remaining
        .iter()
        .filter_map(|n| ElementRef::wrap(*n))
        .find(|el| el.value().name() == "ul")
        .or_else(|| {
            remaining
                .iter()
                .filter_map(|n| ElementRef::wrap(*n))
                .find(|el| el.value().name() == "p" && el.select(&a_sel).next().is_some())
        })
        .map(|el| el.id());

    let Some(boundary_id) = boundary_id else {
        // No boundary: body stays as-is (minus a removed highlight).
        let mut html = String::new();
        for node in &remaining {
            push_node(node, &mut html);
        }
        return ProcessedBody { highlight, html };
    };

    let mut price_box = String::new();
    let mut price_items = 0usize;
    let mut rest = String::new();
    let mut before_boundary = true;

    for node in &remaining {
        if node.id() == boundary_id {
            before_boundary = false;
        }
        if !before_boundary {
            push_node(node, &mut rest);
            continue;
        }
        match node.value() {
            Node::Element(_) => {
                let el = ElementRef::wrap(*node).unwrap();
                if el.value().name() == "p" {
                    let text = el.text().collect::<String>();
                    let has_img = el.select(&img_sel).next().is_some();
                    if text.trim().is_empty() && !has_img {
                        continue; // discard empty paragraphs
                    }
                    price_box.push_str(&classify_price_paragraph(&el, &text));
                    price_items += 1;
                } else {
                    price_box.push_str(&el.html());
                    price_items += 1;
                }
            }
            _ => push_node(node, &mut price_box),
        }
    }

    let mut html = String::new();
    if price_items > 0 {
        html.push_str("<div class=\"cards-pricing-price-box\">");
        html.push_str(&price_box);
        html.push_str("</div>");
    }
    html.push_str(&rest);
    ProcessedBody { highlight, html }
}

fn classify_price_paragraph(el: &ElementRef, text: &str) -> String {
    let trimmed = text.trim();
    if MONTHLY_PRICE.is_match(trimmed) {
        tag_root(&el.html(), &["cards-pricing-amount"], false)
    } else if trimmed.starts_with('-') {
        tag_root(&el.html(), &["cards-pricing-features"], false)
    } else {
        el.html()
    }
}

fn push_node(node: &ego_tree::NodeRef<Node>, out: &mut String) {
    match node.value() {
        Node::Text(t) => out.push_str(&**t),
        Node::Element(_) => {
            if let Some(el) = ElementRef::wrap(*node) {
                out.push_str(&el.html());
            }
        }
        _ => {}
    }
}
