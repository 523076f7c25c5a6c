// ABOUTME: The parameterized extraction template: variant dispatch, item iteration, cell synthesis.
// ABOUTME: Replaces the matched source element with a synthesized named block.

//! Extraction template.
//!
//! All parser rules share one routine: dispatch the variant, walk its
//! items, and run each column's field table in order, concatenating the
//! synthesized fragments into one cell. The result is a small state
//! machine - {detect variant} then {apply field template} then
//! {emit rows} - with every per-block difference living in data.

use dom_query::Selection;
use edgekit_blocks::{build_block, Block, Cell, Row};

use crate::fields::synthesize;
use crate::rules::{BlockRule, Variant};

/// Returns the first variant whose detection matches the source element
/// (by its own marker class or a descendant), or `None`.
pub fn detect_variant<'r>(rule: &'r BlockRule, source: &Selection) -> Option<&'r Variant> {
    rule.variants.iter().find(|variant| {
        variant
            .detect
            .iter()
            .any(|css| source.is(css) || matches_within(source, css))
    })
}

fn matches_within(source: &Selection, css: &str) -> bool {
    source
        .try_select(css)
        .map(|found| found.exists())
        .unwrap_or(false)
}

/// Extracts a cell grid from a source element. Unmatched input yields an
/// empty grid; no failure is signaled.
pub fn extract_grid(rule: &BlockRule, source: &Selection) -> Block {
    let Some(variant) = detect_variant(rule, source) else {
        return Block::default();
    };

    let mut rows = Vec::new();
    if variant.items.is_empty() {
        // The source element itself is the single item.
        rows.push(build_row(variant, source));
    } else {
        for css in &variant.items {
            let Some(items) = source.try_select(css) else {
                continue;
            };
            if !items.exists() {
                continue;
            }
            for item in items.iter() {
                rows.push(build_row(variant, &item));
            }
            break;
        }
    }
    Block::from_rows(rows)
}

fn build_row(variant: &Variant, item: &Selection) -> Row {
    let cells = variant
        .columns
        .iter()
        .map(|fields| {
            let mut html = String::new();
            for field in fields {
                html.push_str(&synthesize(field, item));
            }
            Cell::new(html)
        })
        .collect();
    Row::new(cells)
}

/// Extracts a grid and replaces the source element in its document with
/// the synthesized named block.
pub fn parse_and_replace(rule: &BlockRule, source: &Selection) {
    let grid = extract_grid(rule, source);
    let block = build_block(&rule.block_name, &grid);
    source.replace_with_html(block);
}
