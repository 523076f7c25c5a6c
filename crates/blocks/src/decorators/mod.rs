// ABOUTME: Per-block-type decorators consuming a Block and producing a styled component.
// ABOUTME: Each decorator reads rows, classifies content, wires interaction, and replaces markup.

//! Decorators.
//!
//! No shared engine exists across block types; each decorator is a
//! self-contained variant of the same shape: read rows, classify and
//! relabel, wire interaction, replace content. Decoration is one-shot and
//! destructive; re-running a decorator on its own output is out of
//! contract.

pub mod gallery;
pub mod payment;
pub mod pricing;
pub mod tabs;
