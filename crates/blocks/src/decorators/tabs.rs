// ABOUTME: Customer tabs decorator: builds a tab bar and claims subsequent page siblings as tab content.
// ABOUTME: Owns the selected index; section visibility renders as a pure function of it.

//! Customer tabs.
//!
//! Block rows are `{label, meta}` pairs; a row is marked active when its
//! meta column's trimmed text equals the literal marker, in which case its
//! content is discarded. The first button always starts active regardless
//! of the authored marker (observed behavior, kept on purpose).
//!
//! Tab 0's content does not live in the block: the surrounding
//! page-composition layer hands over a [`SectionRange`] of sibling
//! fragments, which are scanned until an accordion wrapper or a
//! section-boundary heading and tagged as tab-0 content. Tab 1 gets a
//! placeholder inserted after the last claimed sibling. Without a section
//! range the tab bar still renders, but scanning and click wiring are
//! skipped silently.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::model::Block;
use crate::render::{escape_text, tag_root};

static SECTION_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Somos transparentes|Llévatelo").unwrap());

const ACTIVE_MARKER: &str = "active";
const FALLBACK_PLACEHOLDER: &str = "<p>Accede a Mi Vodafone.</p>";
const STOP_CLASS: &str = "accordion-wrapper";

/// One authored tab: label, body content, and the authored active marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry {
    pub label: String,
    pub content: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
struct SectionItem {
    html: String,
    tab: Option<usize>,
    visible: bool,
}

/// The sibling fragments following the block's wrapper, in page order.
///
/// This is the explicit content-range capability requested from the
/// page-composition collaborator instead of walking the live tree.
#[derive(Debug, Clone, Default)]
pub struct SectionRange {
    items: Vec<SectionItem>,
}

impl SectionRange {
    pub fn from_fragments(fragments: Vec<String>) -> Self {
        Self {
            items: fragments
                .into_iter()
                .map(|html| SectionItem {
                    html,
                    tab: None,
                    visible: true,
                })
                .collect(),
        }
    }
}

/// A decorated customer-tabs component.
#[derive(Debug, Clone)]
pub struct CustomerTabs {
    tabs: Vec<TabEntry>,
    selected: usize,
    section: Option<SectionRange>,
}

/// Decorates a customer-tabs block. `section` is the sibling range after
/// the block's wrapper; `None` means the block has no enclosing wrapper.
pub fn decorate(block: &Block, section: Option<SectionRange>) -> CustomerTabs {
    let tabs: Vec<TabEntry> = block
        .rows()
        .iter()
        .map(|row| {
            let label = row.cell(0).map(|c| c.text()).unwrap_or_default();
            let meta = row.cell(1).map(|c| c.text()).unwrap_or_default();
            let is_active = meta == ACTIVE_MARKER;
            TabEntry {
                label,
                content: if is_active {
                    String::new()
                } else {
                    row.cell(1).map(|c| c.html().to_string()).unwrap_or_default()
                },
                is_active,
            }
        })
        .collect();

    let section = section.map(|range| claim_section(range, &tabs));
    CustomerTabs {
        tabs,
        selected: 0,
        section,
    }
}

/// Scans the sibling range, tags claimed fragments as tab 0, and inserts
/// the tab-1 placeholder after the last claimed fragment.
fn claim_section(mut range: SectionRange, tabs: &[TabEntry]) -> SectionRange {
    let mut claimed = 0;
    for item in range.items.iter_mut() {
        if is_stop_fragment(&item.html) {
            break;
        }
        item.tab = Some(0);
        item.visible = true;
        claimed += 1;
    }

    let content = tabs.get(1).map(|t| t.content.trim()).unwrap_or("");
    let placeholder = format!(
        "<div class=\"customer-tabs-placeholder\">{}</div>",
        if content.is_empty() {
            FALLBACK_PLACEHOLDER
        } else {
            content
        }
    );
    range.items.insert(
        claimed,
        SectionItem {
            html: placeholder,
            tab: Some(1),
            visible: false,
        },
    );
    range
}

fn is_stop_fragment(html: &str) -> bool {
    let fragment = Html::parse_fragment(html);
    let root = fragment.root_element();

    if let Some(first) = root.children().filter_map(ElementRef::wrap).next() {
        if first.value().classes().any(|c| c == STOP_CLASS) {
            return true;
        }
    }

    let h2 = Selector::parse("h2").unwrap();
    fragment
        .select(&h2)
        .any(|el| SECTION_END.is_match(&el.text().collect::<String>()))
}

impl CustomerTabs {
    pub fn tabs(&self) -> &[TabEntry] {
        &self.tabs
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Exclusive tab activation. A no-op when the block had no enclosing
    /// wrapper: without a section there is nothing wired to switch.
    pub fn select(&mut self, idx: usize) {
        let Some(section) = self.section.as_mut() else {
            return;
        };
        if idx >= self.tabs.len() {
            return;
        }
        self.selected = idx;
        for item in section.items.iter_mut() {
            if let Some(tab) = item.tab {
                item.visible = tab == idx;
            }
        }
    }

    /// Renders the tab bar; the selected button carries the active class.
    pub fn render_bar(&self) -> String {
        let mut out = String::from("<div class=\"customer-tabs-bar\">");
        for (idx, tab) in self.tabs.iter().enumerate() {
            let class = if idx == self.selected {
                "customer-tabs-btn active"
            } else {
                "customer-tabs-btn"
            };
            out.push_str(&format!(
                "<button class=\"{}\" data-tab=\"{}\">{}</button>",
                class,
                idx,
                escape_text(&tab.label)
            ));
        }
        out.push_str("</div>");
        out
    }

    /// Renders the claimed sibling fragments with their tab tags and
    /// current visibility. Untagged fragments pass through unchanged.
    /// Empty when no section range was provided.
    pub fn render_section(&self) -> Vec<String> {
        let Some(section) = self.section.as_ref() else {
            return Vec::new();
        };
        section
            .items
            .iter()
            .map(|item| match item.tab {
                Some(tab) => {
                    let tab_class = format!("customer-tab-{}", tab);
                    tag_root(
                        &item.html,
                        &["customer-tab-content", &tab_class],
                        !item.visible,
                    )
                }
                None => item.html.clone(),
            })
            .collect()
    }
}
