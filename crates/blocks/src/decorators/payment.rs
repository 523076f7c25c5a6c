// ABOUTME: Payment options decorator: tab bar plus one card panel per row.
// ABOUTME: Pure exclusive selection by index; no coupling to surrounding page content.

//! Payment options.
//!
//! Block rows are `{label, cards[]}`: the first cell is the tab label and
//! every following non-empty cell becomes one card in that row's panel.
//! Selection toggles buttons and panels by index only, making this the
//! self-contained sibling of the customer tabs decorator.

use crate::model::Block;
use crate::render::escape_text;

/// One payment option: a tab label and its card fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOption {
    pub label: String,
    pub cards: Vec<String>,
}

/// A decorated payment-options component.
#[derive(Debug, Clone)]
pub struct PaymentOptions {
    options: Vec<PaymentOption>,
    selected: usize,
}

/// Decorates a payment-options block.
pub fn decorate(block: &Block) -> PaymentOptions {
    let options = block
        .rows()
        .iter()
        .map(|row| PaymentOption {
            label: row.cell(0).map(|c| c.text()).unwrap_or_default(),
            cards: row
                .cells()
                .iter()
                .skip(1)
                .map(|c| c.html().trim().to_string())
                .filter(|html| !html.is_empty())
                .collect(),
        })
        .collect();

    PaymentOptions {
        options,
        selected: 0,
    }
}

impl PaymentOptions {
    pub fn options(&self) -> &[PaymentOption] {
        &self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Exclusive selection by index; out-of-range indices are ignored.
    pub fn select(&mut self, idx: usize) {
        if idx < self.options.len() {
            self.selected = idx;
        }
    }

    /// Renders the tab bar and panels. Exactly one button and one panel
    /// carry the active class, both at the selected index.
    pub fn render(&self) -> String {
        let mut out = String::from("<div class=\"payment-options-tabs\">");
        for (idx, opt) in self.options.iter().enumerate() {
            let class = if idx == self.selected {
                "payment-options-tab active"
            } else {
                "payment-options-tab"
            };
            out.push_str(&format!(
                "<button class=\"{}\" data-tab=\"{}\">{}</button>",
                class,
                idx,
                escape_text(&opt.label)
            ));
        }
        out.push_str("</div>");

        for (idx, opt) in self.options.iter().enumerate() {
            let class = if idx == self.selected {
                "payment-options-panel active"
            } else {
                "payment-options-panel"
            };
            out.push_str(&format!(
                "<div class=\"{}\" data-panel=\"{}\"><div class=\"payment-options-cards\">",
                class, idx
            ));
            for card in &opt.cards {
                out.push_str("<div class=\"payment-options-card\">");
                out.push_str(card);
                out.push_str("</div>");
            }
            out.push_str("</div></div>");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Row};
    use pretty_assertions::assert_eq;

    fn options_block() -> Block {
        Block::from_rows(vec![
            Row::new(vec![
                Cell::new("Pago mensual"),
                Cell::new("<p>Tarjeta</p>"),
                Cell::new("   "),
                Cell::new("<p>Domiciliación</p>"),
            ]),
            Row::new(vec![Cell::new("Pago único"), Cell::new("<p>Contado</p>")]),
        ])
    }

    #[test]
    fn rows_become_labels_and_filtered_cards() {
        let options = decorate(&options_block());
        assert_eq!(options.options().len(), 2);
        assert_eq!(options.options()[0].label, "Pago mensual");
        // The empty cell is dropped.
        assert_eq!(
            options.options()[0].cards,
            vec!["<p>Tarjeta</p>", "<p>Domiciliación</p>"]
        );
    }

    #[test]
    fn first_tab_and_panel_start_active() {
        let options = decorate(&options_block());
        let html = options.render();
        assert!(html.contains("payment-options-tab active\" data-tab=\"0\""));
        assert!(html.contains("payment-options-panel active\" data-panel=\"0\""));
        assert!(!html.contains("payment-options-panel active\" data-panel=\"1\""));
    }

    #[test]
    fn select_moves_the_active_pair_exclusively() {
        let mut options = decorate(&options_block());
        options.select(1);
        let html = options.render();
        assert!(html.contains("payment-options-tab active\" data-tab=\"1\""));
        assert!(html.contains("payment-options-panel active\" data-panel=\"1\""));
        assert!(!html.contains("payment-options-tab active\" data-tab=\"0\""));
        assert!(!html.contains("payment-options-panel active\" data-panel=\"0\""));
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut options = decorate(&options_block());
        options.select(7);
        assert_eq!(options.selected(), 0);
    }

    #[test]
    fn panels_wrap_each_card_fragment() {
        let options = decorate(&options_block());
        let html = options.render();
        assert!(html.contains(
            "<div class=\"payment-options-card\"><p>Tarjeta</p></div>\
             <div class=\"payment-options-card\"><p>Domiciliación</p></div>"
        ));
    }
}
