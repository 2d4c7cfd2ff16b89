//! Data-driven laboratory definitions.
//!
//! A laboratory can be described in a RON, TOML or JSON file listing its raw
//! substances, its reactions and optional starting stock. The format is
//! picked from the file extension.
//!
//! ```toml
//! substances = ["water", "salt"]
//!
//! [[reactions]]
//! product = "brine"
//! ingredients = [
//!     { amount = 1.0, substance = "water" },
//!     { amount = 0.25, substance = "salt" },
//! ]
//!
//! [stock]
//! water = 10.0
//! ```

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, Format, load_laboratory, load_laboratory_from_dir};
pub use schema::LabDefinition;
