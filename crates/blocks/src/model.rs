// ABOUTME: The Block cell-grid data model shared by decoration and extraction.
// ABOUTME: Parses authored row/column markup into rows of cells and serializes grids back out.

//! Block data model.
//!
//! A [`Block`] is an ordered sequence of [`Row`]s; a [`Row`] is an ordered
//! sequence of [`Cell`]s. A cell is an opaque content container (text,
//! images, links, nested lists) with no fixed schema until a decorator
//! classifies it. Extraction produces the same shape, so every extracted
//! grid is valid decoration input.

use scraper::{ElementRef, Html, Selector};

use crate::error::BlockError;
use crate::render::escape_text;

/// An opaque content container holding one HTML fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    html: String,
}

impl Cell {
    /// Creates a cell from an HTML fragment.
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Creates a cell holding escaped plain text.
    pub fn text_only(text: &str) -> Self {
        Self {
            html: escape_text(text),
        }
    }

    /// The raw inner HTML of this cell.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The trimmed text content of this cell.
    pub fn text(&self) -> String {
        let fragment = Html::parse_fragment(&self.html);
        fragment
            .root_element()
            .text()
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// True when the cell holds no markup at all.
    pub fn is_empty(&self) -> bool {
        self.html.trim().is_empty()
    }

    /// True when the cell contains a `<picture>` element.
    pub fn has_picture(&self) -> bool {
        let fragment = Html::parse_fragment(&self.html);
        let sel = Selector::parse("picture").unwrap();
        fragment.select(&sel).next().is_some()
    }

    /// Number of top-level element children in the cell fragment.
    pub fn top_level_element_count(&self) -> usize {
        let fragment = Html::parse_fragment(&self.html);
        fragment
            .root_element()
            .children()
            .filter(|n| n.value().is_element())
            .count()
    }
}

/// One row of a block: an ordered list of cells, one per semantic column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at a column position, if present.
    pub fn cell(&self, idx: usize) -> Option<&Cell> {
        self.cells.get(idx)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The authored unit: an ordered sequence of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    rows: Vec<Row>,
}

impl Block {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reads the generic authored markup: the fragment's top-level element
    /// children are rows, and each row's element children are cells.
    ///
    /// Markup with no element content at all is the one unusable input.
    pub fn parse(html: &str) -> Result<Self, BlockError> {
        let fragment = Html::parse_fragment(html);
        let root = fragment.root_element();

        let mut rows = Vec::new();
        let mut saw_element = false;
        for node in root.children() {
            let Some(row_el) = ElementRef::wrap(node) else {
                continue;
            };
            saw_element = true;
            let cells = row_el
                .children()
                .filter_map(ElementRef::wrap)
                .map(|cell_el| Cell::new(cell_el.inner_html()))
                .collect();
            rows.push(Row::new(cells));
        }

        if !saw_element {
            return Err(BlockError::EmptyMarkup);
        }
        Ok(Self { rows })
    }

    /// Serializes the grid back to the generic div markup. The round-trip
    /// invariant is `Block::parse(b.to_html()) == b` for any grid produced
    /// by extraction or [`Block::parse`].
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str("<div>");
            for cell in row.cells() {
                out.push_str("<div>");
                out.push_str(cell.html());
                out.push_str("</div>");
            }
            out.push_str("</div>");
        }
        out
    }
}

/// Assembles a named block table from a cell grid, ready for the external
/// markdown serializer: one header row carrying the block name, then one
/// table row per grid row.
pub fn build_block(name: &str, grid: &Block) -> String {
    let span = grid.rows().iter().map(Row::len).max().unwrap_or(0).max(1);

    let mut out = String::from("<table>");
    out.push_str(&format!(
        "<tr><th colspan=\"{}\">{}</th></tr>",
        span,
        escape_text(name)
    ));
    for row in grid.rows() {
        out.push_str("<tr>");
        for cell in row.cells() {
            out.push_str("<td>");
            out.push_str(cell.html());
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
    out
}
