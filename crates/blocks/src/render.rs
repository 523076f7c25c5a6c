// ABOUTME: Fragment serialization helpers with an element-level transform hook.
// ABOUTME: Supports picture rewriting and root tagging used by the decorators.

//! Render helpers.
//!
//! Decoration rewrites markup by parsing a fragment and re-serializing it,
//! optionally replacing individual elements along the way. The transform
//! hook receives each element in document order; returning `Some(html)`
//! substitutes the element wholesale, `None` keeps it and recurses.

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};

use crate::media::{Breakpoint, PictureSource};

/// Escapes a string for use inside an attribute value.
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes a string for use as element text content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Check if tag is a void element.
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Serializes a fragment's content, passing every element through `transform`.
pub fn serialize_fragment_with<F>(html: &str, transform: &mut F) -> String
where
    F: FnMut(&ElementRef) -> Option<String>,
{
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    for child in fragment.root_element().children() {
        serialize_node(child, transform, &mut out);
    }
    out
}

fn serialize_node<F>(node: NodeRef<Node>, transform: &mut F, out: &mut String)
where
    F: FnMut(&ElementRef) -> Option<String>,
{
    match node.value() {
        Node::Text(t) => out.push_str(&**t),
        Node::Comment(c) => {
            out.push_str("<!--");
            out.push_str(&**c);
            out.push_str("-->");
        }
        Node::Element(_) => {
            let el = ElementRef::wrap(node).unwrap();
            if let Some(replacement) = transform(&el) {
                out.push_str(&replacement);
                return;
            }
            serialize_open_tag(&el, None, out);
            if is_void_element(el.value().name()) {
                return;
            }
            for child in node.children() {
                serialize_node(child, transform, out);
            }
            out.push_str("</");
            out.push_str(el.value().name());
            out.push('>');
        }
        _ => {}
    }
}

/// Attribute overrides applied while opening a tag: classes merged into the
/// existing class attribute, and an optional forced inline style.
struct AttrOverride<'a> {
    add_classes: &'a [&'a str],
    style: Option<&'a str>,
}

fn serialize_open_tag(el: &ElementRef, over: Option<&AttrOverride>, out: &mut String) {
    out.push('<');
    out.push_str(el.value().name());

    let mut wrote_class = false;
    for (name, value) in el.value().attrs() {
        if let Some(over) = over {
            if name == "style" && over.style.is_some() {
                continue;
            }
            if name == "class" && !over.add_classes.is_empty() {
                let merged = format!("{} {}", value, over.add_classes.join(" "));
                push_attr(out, "class", merged.trim());
                wrote_class = true;
                continue;
            }
        }
        push_attr(out, name, value);
    }
    if let Some(over) = over {
        if !wrote_class && !over.add_classes.is_empty() {
            push_attr(out, "class", &over.add_classes.join(" "));
        }
        if let Some(style) = over.style {
            push_attr(out, "style", style);
        }
    }

    if is_void_element(el.value().name()) {
        out.push_str(" />");
    } else {
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

/// Re-serializes a fragment with extra classes (and optionally a hiding
/// style) applied to its first top-level element. Fragments tagged this way
/// only ever carry a display override written by us, so showing an element
/// simply drops the forced style.
pub fn tag_root(html: &str, classes: &[&str], hidden: bool) -> String {
    let fragment = Html::parse_fragment(html);
    let over = AttrOverride {
        add_classes: classes,
        style: hidden.then_some("display: none"),
    };

    let mut out = String::new();
    let mut tagged = false;
    for child in fragment.root_element().children() {
        match child.value() {
            Node::Element(_) if !tagged => {
                tagged = true;
                let el = ElementRef::wrap(child).unwrap();
                serialize_open_tag(&el, Some(&over), &mut out);
                if !is_void_element(el.value().name()) {
                    for grandchild in child.children() {
                        serialize_node(grandchild, &mut |_| None, &mut out);
                    }
                    out.push_str("</");
                    out.push_str(el.value().name());
                    out.push('>');
                }
            }
            _ => serialize_node(child, &mut |_| None, &mut out),
        }
    }
    out
}

/// Replaces every `<picture>` containing an `<img>` with an optimized
/// responsive fragment from the collaborator. Pictures without an image
/// are left untouched.
pub fn rewrite_pictures(html: &str, source: &dyn PictureSource, width: u32) -> String {
    let img_sel = Selector::parse("img").unwrap();
    serialize_fragment_with(html, &mut |el| {
        if !el.value().name().eq_ignore_ascii_case("picture") {
            return None;
        }
        let img = el.select(&img_sel).next()?;
        let src = img.value().attr("src").unwrap_or("");
        let alt = img.value().attr("alt").unwrap_or("");
        Some(source.optimized_picture(src, alt, false, &[Breakpoint::new(width)]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::DefaultPictures;
    use pretty_assertions::assert_eq;

    #[test]
    fn serialize_round_trips_plain_markup() {
        let html = "<p>hola <strong>mundo</strong></p><ul><li>a</li></ul>";
        let out = serialize_fragment_with(html, &mut |_| None);
        assert_eq!(out, html);
    }

    #[test]
    fn transform_replaces_matched_elements() {
        let html = "<div><span>x</span><em>y</em></div>";
        let out = serialize_fragment_with(html, &mut |el| {
            (el.value().name() == "span").then(|| "<b>z</b>".to_string())
        });
        assert_eq!(out, "<div><b>z</b><em>y</em></div>");
    }

    #[test]
    fn tag_root_adds_classes_and_style() {
        let out = tag_root("<div class=\"wrapper\"><p>a</p></div>", &["tab-0"], true);
        assert_eq!(
            out,
            "<div class=\"wrapper tab-0\" style=\"display: none\"><p>a</p></div>"
        );
    }

    #[test]
    fn tag_root_without_class_attribute() {
        let out = tag_root("<div><p>a</p></div>", &["x", "y"], false);
        assert_eq!(out, "<div class=\"x y\"><p>a</p></div>");
    }

    #[test]
    fn rewrite_pictures_swaps_picture_for_optimized_fragment() {
        let html = "<p>antes</p><picture><img src=\"tv.jpg\" alt=\"TV\"></picture>";
        let out = rewrite_pictures(html, &DefaultPictures, 750);

        assert!(out.starts_with("<p>antes</p><picture>"));
        assert!(out.contains("tv.jpg?width=750"));
        assert!(out.contains("alt=\"TV\""));
        assert!(out.contains("loading=\"lazy\""));
    }

    #[test]
    fn rewrite_pictures_leaves_imageless_pictures_alone() {
        let html = "<picture><source srcset=\"a.webp\"></picture>";
        let out = rewrite_pictures(html, &DefaultPictures, 750);
        assert!(out.contains("<source"));
        assert!(!out.contains("width=750"));
    }
}
