//! # Font Axes
//!
//! Reads the variation axes of a font as an [`AxisTable`].
//!
//! The table is the raw, unvalidated shape handed to the styles block: every
//! field is optional because a table can also arrive as host-provided JSON.
//! Validation happens on the consuming side.
//!
//! ## Example
//!
//! ```no_run
//! use font_axes::read_axis_table;
//!
//! let data = std::fs::read("variable.ttf").unwrap();
//! match read_axis_table(&data).unwrap() {
//!     Some(table) => {
//!         for axis in table.iter() {
//!             println!("{:?}", axis.tag);
//!         }
//!     }
//!     None => println!("not a variable font"),
//! }
//! ```

mod error;
mod parser;
mod table;

pub use error::{Error, Result};
pub use parser::{FileParser, FontParser, FontSource, read_axis_table};
pub use table::{AxisTable, RawAxis};
