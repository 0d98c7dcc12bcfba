//! Change detection between a live table and its baseline.
//!
//! The change list is what every style writer persists. Its order is part of
//! the file contract: `DEFAULT` first, then controls by id, each with its
//! properties by id. All writers and the change counter walk the same
//! [`changes`] iterator, so they can never disagree on order or length.

use super::control::{CONTROL_COUNT, PROPERTY_COUNT};
use super::table::PropertyTable;

/// One persisted property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleChange {
    /// Control id (0 = `DEFAULT`)
    pub control: u16,
    /// Property id within the control
    pub property: u16,
    /// New value
    pub value: u32,
}

impl StyleChange {
    pub const fn new(control: u16, property: u16, value: u32) -> Self {
        Self {
            control,
            property,
            value,
        }
    }
}

/// Iterate over the properties of `current` worth persisting against
/// `baseline`.
///
/// `DEFAULT` properties are reported whenever they differ from the baseline.
/// Any other control's property is reported only if it differs from the
/// baseline *and* from the live `DEFAULT` value it would otherwise inherit.
pub fn changes<'a>(
    current: &'a PropertyTable,
    baseline: &'a PropertyTable,
) -> impl Iterator<Item = StyleChange> + 'a {
    let defaults = (0..PROPERTY_COUNT).filter_map(move |prop| {
        let value = current.get(0, prop);
        (value != baseline.get(0, prop)).then(|| StyleChange::new(0, prop as u16, value))
    });

    let controls = (1..CONTROL_COUNT).flat_map(move |control| {
        (0..PROPERTY_COUNT).filter_map(move |prop| {
            let value = current.get(control, prop);
            let changed = value != baseline.get(control, prop);
            let inherited = value == current.get(0, prop);
            (changed && !inherited)
                .then(|| StyleChange::new(control as u16, prop as u16, value))
        })
    });

    defaults.chain(controls)
}

/// Collect the ordered change list of `current` against `baseline`.
///
/// # Examples
///
/// ```
/// use rgs_codec::style::{PropertyTable, StyleChange, compute_change_list};
///
/// let baseline = PropertyTable::new();
/// let mut current = baseline.clone();
/// current.set(0, 1, 0xFF00FF00);
/// current.set(3, 2, 0x11223344);
///
/// assert_eq!(
///     compute_change_list(&current, &baseline),
///     vec![StyleChange::new(0, 1, 0xFF00FF00), StyleChange::new(3, 2, 0x11223344)]
/// );
/// ```
pub fn compute_change_list(current: &PropertyTable, baseline: &PropertyTable) -> Vec<StyleChange> {
    changes(current, baseline).collect()
}

/// Number of entries [`compute_change_list`] would return.
pub fn count_changes(current: &PropertyTable, baseline: &PropertyTable) -> usize {
    changes(current, baseline).count()
}
