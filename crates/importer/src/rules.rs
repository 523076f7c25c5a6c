// ABOUTME: Data model for parser rules: tagged variants with per-column field-mapping tables.
// ABOUTME: Provides the RuleRegistry and the builtin rules embedded as JSON.

//! Parser rule definitions.
//!
//! Every source-markup pattern is described as data rather than code: a
//! [`BlockRule`] names the block it produces and lists its known
//! structural [`Variant`]s. A variant carries detection selectors, an
//! item selector fallback chain, and one field-mapping table per output
//! column. Selector chains are always ordered most-specific first; the
//! first selector that matches wins.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// One field synthesizer inside a column template. Each value produces
/// zero or more fragments for the cell being built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldRule {
    /// First matching image (or whole `<picture>`), cloned into the cell.
    Image { selectors: Vec<String> },
    /// Strong-wrapped title paragraph from the first matching element.
    Title { selectors: Vec<String> },
    /// Plain text paragraph; optionally with nested link text removed.
    Text {
        selectors: Vec<String>,
        #[serde(default)]
        drop_link_text: bool,
    },
    /// Anchor built from the item's own link plus a text selector chain.
    LinkedText {
        #[serde(default)]
        text: Vec<String>,
    },
    /// Call-to-action links: require href and text, deduplicated by href.
    Cta { selectors: Vec<String> },
    /// Composite price: emphasized amount + recurrence, optional note.
    Price {
        selectors: Vec<String>,
        amount: Vec<String>,
        recurrence: Vec<String>,
        note: Vec<String>,
        #[serde(default)]
        strong_note: bool,
    },
    /// Highlight/label badge: outstanding and content sub-texts.
    Badge {
        selectors: Vec<String>,
        outstanding: Vec<String>,
        content: Vec<String>,
    },
    /// Normalized `<h2>` from the first matching heading.
    Heading { selectors: Vec<String> },
    /// Every matching paragraph's text, optionally skipping link-bearing ones.
    Paragraphs {
        selectors: Vec<String>,
        #[serde(default)]
        skip_linked: bool,
    },
    /// Feature list rebuilt from trimmed `<li>` texts.
    FeatureList { selectors: Vec<String> },
    /// All matching images gathered into one container.
    ImageSet { selectors: Vec<String> },
}

/// One known structural shape of a source pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    /// A variant matches when the source element itself, or any
    /// descendant, matches one of these selectors.
    pub detect: Vec<String>,
    /// Item selector fallback chain; empty means the source element
    /// itself is the single item.
    #[serde(default)]
    pub items: Vec<String>,
    /// One field-mapping table per output column.
    pub columns: Vec<Vec<FieldRule>>,
}

/// A complete parser rule for one block type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRule {
    /// Registry key, e.g. "cards-benefit".
    pub name: String,
    /// Block header label, e.g. "Cards-Benefit".
    pub block_name: String,
    pub variants: Vec<Variant>,
}

/// Registry for looking up parser rules by block name.
#[derive(Debug, Default, Clone)]
pub struct RuleRegistry {
    map: HashMap<String, BlockRule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, rule: BlockRule) {
        self.map.insert(rule.name.clone(), rule);
    }

    pub fn get(&self, name: &str) -> Option<&BlockRule> {
        self.map.get(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Parses a registry from a JSON array of block rules.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let rules: Vec<BlockRule> = serde_json::from_str(json).map_err(ImportError::rules)?;
        let mut registry = Self::new();
        for rule in rules {
            registry.register(rule);
        }
        Ok(registry)
    }
}

/// Embedded JSON containing the builtin parser rules.
const BUILTIN_RULES_JSON: &str = include_str!("../data/parser_rules.json");

/// Loads the builtin rule registry from embedded JSON.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed.
pub fn load_builtin_rules() -> RuleRegistry {
    RuleRegistry::from_json(BUILTIN_RULES_JSON).expect("failed to parse builtin parser rules")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_load() {
        let registry = load_builtin_rules();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn builtin_rules_cover_all_source_patterns() {
        let registry = load_builtin_rules();
        for name in [
            "cards-benefit",
            "cards-category",
            "cards-feature",
            "cards-pricing",
            "cards-quicklink",
            "carousel-promo",
            "columns-media",
            "columns-promo",
        ] {
            assert!(registry.get(name).is_some(), "{} rule not found", name);
        }
    }

    #[test]
    fn benefit_rule_has_two_variants() {
        let registry = load_builtin_rules();
        let rule = registry.get("cards-benefit").unwrap();
        assert_eq!(rule.block_name, "Cards-Benefit");
        assert_eq!(rule.variants.len(), 2);
        assert_eq!(rule.variants[0].columns.len(), 2);
    }

    #[test]
    fn serde_round_trip() {
        let rule = BlockRule {
            name: "cards-demo".into(),
            block_name: "Cards-Demo".into(),
            variants: vec![Variant {
                name: "plain".into(),
                detect: vec![".demo".into()],
                items: vec![".demo__item".into()],
                columns: vec![vec![
                    FieldRule::Title {
                        selectors: vec![".demo__title".into()],
                    },
                    FieldRule::Cta {
                        selectors: vec!["a".into()],
                    },
                ]],
            }],
        };

        let json = serde_json::to_string(&rule).expect("serialize");
        let parsed: BlockRule = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.name, "cards-demo");
        assert_eq!(parsed.variants[0].columns[0].len(), 2);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = RuleRegistry::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("failed to parse rules"));
    }
}
