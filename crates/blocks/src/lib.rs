// ABOUTME: Block decoration library turning authored row/column blocks into styled interactive components.
// ABOUTME: Provides the Block cell-grid model, fragment render helpers, the picture collaborator seam, and decorators.

//! edgekit-blocks - decoration engine for authored content blocks.
//!
//! An authored block is an ordered grid of rows and cells; row and cell
//! ordering is the only structural signal available, so column position
//! (not naming) carries meaning. Each decorator consumes a [`Block`] and
//! produces a purpose-specific component: pricing cards, customer tabs,
//! payment option panels, or a product gallery. Interactive components
//! own a single selected index and render as a pure function of it.
//!
//! # Example
//!
//! ```
//! use edgekit_blocks::{decorators::payment, Block};
//!
//! let block = Block::parse(
//!     "<div><div>Pago mensual</div><div><p>Tarjeta</p></div></div>",
//! ).unwrap();
//! let mut options = payment::decorate(&block);
//! options.select(0);
//! let html = options.render();
//! assert!(html.contains("payment-options-tab"));
//! ```

pub mod decorators;
pub mod error;
pub mod media;
pub mod model;
pub mod render;

pub use error::BlockError;
pub use media::{Breakpoint, DefaultPictures, PictureSource};
pub use model::{build_block, Block, Cell, Row};
