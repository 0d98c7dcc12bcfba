//! Style property table and change detection.
//!
//! A style is a [`PropertyTable`]: one row per [`Control`], one `u32` per
//! property. Style files do not store the whole table, only the
//! [`StyleChange`]s against a baseline, computed by [`compute_change_list`].

// Submodule declarations
pub mod control;
pub mod diff;
pub mod table;

// Re-exports for convenience
pub use control::{
    BASE_PROPERTY_COUNT, CONTROL_COUNT, Control, EXTENDED_PROPERTY_COUNT, PROPERTY_COUNT, property,
    property_name,
};
pub use diff::{StyleChange, changes, compute_change_list, count_changes};
pub use table::PropertyTable;
