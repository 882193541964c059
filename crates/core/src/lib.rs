//! # Variable font styles
//!
//! State model for a block that previews named styles of one variable font.
//!
//! A [`State`] holds the font's axes ([`AxisDescriptor`]) and any number of
//! [`Style`]s, each with its own [`EditableAxis`] per font axis. The
//! [`Reducer`] is the only way to change it. When a new font is attached,
//! [`reconcile`] validates its axis table and every style's axes are rebuilt.
//!
//! ## Example
//!
//! ```
//! use varfont_core::{Action, AxisDescriptor, AxisEdit, Reducer, SequentialIds, State};
//!
//! let mut reducer = Reducer::new(SequentialIds::default());
//! let mut state = State::default();
//!
//! let wght = AxisDescriptor::new("wght", 100.0, 400.0, 900.0);
//! reducer.apply(&mut state, Action::SetDimensions([("wght".to_string(), wght)].into_iter().collect()));
//! let id = reducer.apply(&mut state, Action::Add).unwrap();
//!
//! reducer.apply(
//!     &mut state,
//!     Action::EditDimensions { id: id.clone(), tag: "wght".into(), partial: AxisEdit::value(700.0) },
//! );
//! assert_eq!(state.styles[&id].dimensions["wght"].value, 700.0);
//! ```

pub mod asset;
pub mod axis;
pub mod block;
pub mod config;
pub mod css;
mod error;
pub mod persist;
pub mod rate_limit;
pub mod reconcile;
pub mod reducer;
pub mod state;
pub mod style;

pub use asset::FontAsset;
pub use axis::{AxisDescriptor, AxisEdit, EditableAxis};
pub use block::{AssetSync, Block};
pub use config::Options;
pub use error::{Error, FontError, Result};
pub use persist::{MemoryRepository, SettingsDocument, SettingsRepository, migrate};
pub use reconcile::{AssetGate, GateCheck, reconcile};
pub use reducer::{Action, IdGenerator, NanoIds, Reducer, SequentialIds};
pub use state::{DefaultDimensions, State};
pub use style::{Color, Style, StyleEdit, StyleId};
