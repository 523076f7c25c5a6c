// ABOUTME: Field synthesis: evaluates selector fallback chains and builds fresh cell fragments.
// ABOUTME: Missing sub-fields are silently omitted; partial links are dropped; CTA hrefs deduplicate.

//! Field extraction and synthesis.
//!
//! Every field is looked up through an ordered selector fallback chain:
//! the most specific selector first, then increasingly generic ones, the
//! first selector yielding a match wins. Absence of any match omits the
//! field rather than erroring. Synthesized fragments are always freshly
//! built markup, never references into the source tree.

use std::collections::HashSet;

use dom_query::Selection;
use edgekit_blocks::render::{escape_attr, escape_text};
use scraper::{ElementRef, Html, Node};

use crate::rules::FieldRule;

/// Returns the first selector match from an ordered fallback chain.
pub fn first_match<'a>(scope: &Selection<'a>, chain: &[String]) -> Option<Selection<'a>> {
    for css in chain {
        if let Some(found) = scope.try_select(css) {
            if found.exists() {
                return Some(found.first());
            }
        }
    }
    None
}

/// All matches from the first selector in the chain that yields any.
pub fn all_matches<'a>(scope: &Selection<'a>, chain: &[String]) -> Option<Selection<'a>> {
    for css in chain {
        if let Some(found) = scope.try_select(css) {
            if found.exists() {
                return Some(found);
            }
        }
    }
    None
}

/// Trimmed text of the first chain match, if non-empty.
pub fn chain_text(scope: &Selection, chain: &[String]) -> Option<String> {
    let found = first_match(scope, chain)?;
    let text = found.text().trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Synthesizes the markup a field rule contributes to a cell.
pub fn synthesize(field: &FieldRule, item: &Selection) -> String {
    match field {
        FieldRule::Image { selectors } => image(item, selectors),
        FieldRule::Title { selectors } => chain_text(item, selectors)
            .map(|t| format!("<p><strong>{}</strong></p>", escape_text(&t)))
            .unwrap_or_default(),
        FieldRule::Text {
            selectors,
            drop_link_text,
        } => text(item, selectors, *drop_link_text),
        FieldRule::LinkedText { text } => linked_text(item, text),
        FieldRule::Cta { selectors } => cta(item, selectors),
        FieldRule::Price {
            selectors,
            amount,
            recurrence,
            note,
            strong_note,
        } => price(item, selectors, amount, recurrence, note, *strong_note),
        FieldRule::Badge {
            selectors,
            outstanding,
            content,
        } => badge(item, selectors, outstanding, content),
        FieldRule::Heading { selectors } => chain_text(item, selectors)
            .map(|t| format!("<h2>{}</h2>", escape_text(&t)))
            .unwrap_or_default(),
        FieldRule::Paragraphs {
            selectors,
            skip_linked,
        } => paragraphs(item, selectors, *skip_linked),
        FieldRule::FeatureList { selectors } => feature_list(item, selectors),
        FieldRule::ImageSet { selectors } => image_set(item, selectors),
    }
}

fn clone_image(sel: &Selection) -> String {
    let name = sel
        .nodes()
        .first()
        .and_then(|n| n.node_name())
        .map(|n| n.to_lowercase())
        .unwrap_or_default();
    if name == "picture" {
        // Pictures carry their own sources; clone the whole element.
        return sel.html().to_string();
    }
    let src = sel.attr("src").map(|v| v.to_string()).unwrap_or_default();
    let alt = sel.attr("alt").map(|v| v.to_string()).unwrap_or_default();
    format!(
        "<img src=\"{}\" alt=\"{}\">",
        escape_attr(&src),
        escape_attr(&alt)
    )
}

fn image(item: &Selection, chain: &[String]) -> String {
    first_match(item, chain)
        .map(|sel| clone_image(&sel))
        .unwrap_or_default()
}

fn image_set(item: &Selection, chain: &[String]) -> String {
    let Some(matches) = all_matches(item, chain) else {
        return String::new();
    };
    let mut imgs = String::new();
    for sel in matches.iter() {
        imgs.push_str(&clone_image(&sel));
    }
    if imgs.is_empty() {
        String::new()
    } else {
        format!("<div>{}</div>", imgs)
    }
}

fn text(item: &Selection, chain: &[String], drop_link_text: bool) -> String {
    let Some(found) = first_match(item, chain) else {
        return String::new();
    };
    let text = if drop_link_text {
        text_without_anchors(&found.html())
    } else {
        found.text().to_string()
    };
    let text = text.trim();
    if text.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", escape_text(text))
    }
}

/// Text content of a fragment with every `<a>` subtree excluded. Reading
/// nodes rather than erasing substrings keeps prose intact when it happens
/// to repeat the link's own wording.
fn text_without_anchors(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    collect_non_anchor_text(fragment.root_element(), &mut out);
    out
}

fn collect_non_anchor_text(el: ElementRef, out: &mut String) {
    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            if child_el.value().name().eq_ignore_ascii_case("a") {
                continue;
            }
            collect_non_anchor_text(child_el, out);
        } else if let Node::Text(t) = child.value() {
            out.push_str(&**t);
        }
    }
}

fn linked_text(item: &Selection, text_chain: &[String]) -> String {
    let link = if item.is("a") {
        Some(item.clone())
    } else {
        let anchors = item.select("a");
        anchors.exists().then(|| anchors.first())
    };

    let href = link
        .as_ref()
        .and_then(|l| l.attr("href"))
        .map(|v| v.trim().to_string())
        .unwrap_or_default();
    let text = chain_text(item, text_chain)
        .or_else(|| {
            link.as_ref()
                .map(|l| l.text().trim().to_string())
                .filter(|t| !t.is_empty())
        })
        .unwrap_or_else(|| item.text().trim().to_string());

    if !href.is_empty() && !text.is_empty() {
        format!(
            "<a href=\"{}\">{}</a>",
            escape_attr(&href),
            escape_text(&text)
        )
    } else if !text.is_empty() {
        escape_text(&text)
    } else {
        String::new()
    }
}

fn cta(item: &Selection, chain: &[String]) -> String {
    let Some(candidates) = all_matches(item, chain) else {
        return String::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for link in candidates.iter() {
        let href = link
            .attr("href")
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        let text = link.text().trim().to_string();
        // Partial links are dropped; identical hrefs emit once, first seen.
        if href.is_empty() || text.is_empty() || !seen.insert(href.clone()) {
            continue;
        }
        links.push(format!(
            "<a href=\"{}\">{}</a>",
            escape_attr(&href),
            escape_text(&text)
        ));
    }

    if links.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", links.join(" "))
    }
}

fn price(
    item: &Selection,
    chain: &[String],
    amount: &[String],
    recurrence: &[String],
    note: &[String],
    strong_note: bool,
) -> String {
    let Some(root) = first_match(item, chain) else {
        return String::new();
    };

    let amount_text = chain_text(&root, amount).unwrap_or_default();
    let mut out = format!("<p><strong>{}</strong>", escape_text(&amount_text));
    if let Some(rec) = chain_text(&root, recurrence) {
        out.push_str(&escape_text(&rec));
    }
    out.push_str("</p>");

    if let Some(note_text) = chain_text(&root, note) {
        if strong_note {
            out.push_str(&format!(
                "<p><strong>{}</strong></p>",
                escape_text(&note_text)
            ));
        } else {
            out.push_str(&format!("<p>{}</p>", escape_text(&note_text)));
        }
    }
    out
}

fn badge(
    item: &Selection,
    chain: &[String],
    outstanding: &[String],
    content: &[String],
) -> String {
    let Some(root) = first_match(item, chain) else {
        return String::new();
    };
    let mut out = String::new();
    for sub in [outstanding, content] {
        if let Some(text) = chain_text(&root, sub) {
            out.push_str(&format!("<p><strong>{}</strong></p>", escape_text(&text)));
        }
    }
    out
}

fn paragraphs(item: &Selection, chain: &[String], skip_linked: bool) -> String {
    let Some(matches) = all_matches(item, chain) else {
        return String::new();
    };
    let mut out = String::new();
    for p in matches.iter() {
        if skip_linked && p.select("a").exists() {
            continue;
        }
        let text = p.text().trim().to_string();
        if !text.is_empty() {
            out.push_str(&format!("<p>{}</p>", escape_text(&text)));
        }
    }
    out
}

fn feature_list(item: &Selection, chain: &[String]) -> String {
    let Some(list) = first_match(item, chain) else {
        return String::new();
    };
    let mut items = String::new();
    for li in list.select("li").iter() {
        let text = li.text().trim().to_string();
        if !text.is_empty() {
            items.push_str(&format!("<li>{}</li>", escape_text(&text)));
        }
    }
    if items.is_empty() {
        String::new()
    } else {
        format!("<ul>{}</ul>", items)
    }
}
