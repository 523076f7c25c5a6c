// ABOUTME: Extraction library mapping variant-laden source markup onto uniform cell grids.
// ABOUTME: Drives data-defined parser rules, field synthesis, and the pre/post cleanup transform.

//! edgekit-importer - extraction engine for the one-time migration pass.
//!
//! Where the decoration side consumes authored blocks, this side produces
//! them: each [`BlockRule`] describes a source-markup pattern as a closed
//! set of tagged variants with per-column field-mapping tables. A single
//! parameterized template dispatches the variant, walks its items, and
//! synthesizes one cell grid - rows of freshly built fragments,
//! structurally valid input to the `edgekit_blocks::Block` model.
//!
//! Extraction never fails: unmatched variants yield empty grids, missing
//! sub-fields are silently omitted, and partial links are dropped.
//!
//! # Example
//!
//! ```
//! use dom_query::Document;
//! use edgekit_importer::{extract_grid, load_builtin_rules};
//!
//! let rules = load_builtin_rules();
//! let doc = Document::from(
//!     "<div class=\"ws10-m-banner-slim\">\
//!        <div class=\"ws10-c-banner-slim\">\
//!          <span class=\"ws10-c-banner-slim__title\">Cobertura</span>\
//!          <a href=\"/cobertura\">ver</a>\
//!        </div>\
//!      </div>",
//! );
//! let source = doc.select(".ws10-m-banner-slim");
//! let grid = extract_grid(rules.get("cards-quicklink").unwrap(), &source);
//! assert_eq!(grid.rows().len(), 1);
//! ```

pub mod cleanup;
pub mod error;
pub mod extract;
pub mod fields;
pub mod rules;

pub use cleanup::{transform, Hook};
pub use error::ImportError;
pub use extract::{extract_grid, parse_and_replace};
pub use rules::{load_builtin_rules, BlockRule, FieldRule, RuleRegistry, Variant};
