//! The per-control property table.

use super::control::{BASE_PROPERTY_COUNT, CONTROL_COUNT, Control, PROPERTY_COUNT, property};
use super::diff::StyleChange;

// Text alignment values
const TEXT_ALIGN_LEFT: u32 = 0;
const TEXT_ALIGN_CENTER: u32 = 1;
const TEXT_ALIGN_RIGHT: u32 = 2;
const TEXT_ALIGN_MIDDLE: u32 = 1;
const SCROLLBAR_RIGHT_SIDE: u32 = 1;

/// A full set of style values: one `u32` per (control, property) slot.
///
/// Colors are packed as `0xRRGGBBAA`; every other property is a plain
/// integer. Row 0 (`DEFAULT`) holds the values other controls inherit.
///
/// The table is a plain value. Snapshots for diffing are taken with
/// `clone()`, and nothing in the crate keeps a table behind the caller's
/// back.
///
/// # Examples
///
/// ```
/// use rgs_codec::style::{Control, PropertyTable, property};
///
/// let mut table = PropertyTable::raygui_default();
/// assert_eq!(table.get(Control::Button.id(), property::BORDER_WIDTH), 2);
///
/// table.set(Control::Button.id(), property::BORDER_WIDTH, 3);
/// assert_eq!(table.get(Control::Button.id(), property::BORDER_WIDTH), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyTable {
    values: [[u32; PROPERTY_COUNT]; CONTROL_COUNT],
}

impl Default for PropertyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyTable {
    /// Create a table with every slot set to zero.
    pub fn new() -> Self {
        Self {
            values: [[0; PROPERTY_COUNT]; CONTROL_COUNT],
        }
    }

    /// The toolkit's built-in default style.
    ///
    /// This is the table a fresh editor session starts from and the usual
    /// baseline for [`compute_change_list`](super::compute_change_list).
    pub fn raygui_default() -> Self {
        use Control::*;
        use property::*;

        let mut table = Self::new();

        let defaults = [
            (BORDER_COLOR_NORMAL, 0x838383ff),
            (BASE_COLOR_NORMAL, 0xc9c9c9ff),
            (TEXT_COLOR_NORMAL, 0x686868ff),
            (BORDER_COLOR_FOCUSED, 0x5bb2d9ff),
            (BASE_COLOR_FOCUSED, 0xc9effeff),
            (TEXT_COLOR_FOCUSED, 0x6c9bbcff),
            (BORDER_COLOR_PRESSED, 0x0492c7ff),
            (BASE_COLOR_PRESSED, 0x97e8ffff),
            (TEXT_COLOR_PRESSED, 0x368bafff),
            (BORDER_COLOR_DISABLED, 0xb5c1c2ff),
            (BASE_COLOR_DISABLED, 0xe6e9e9ff),
            (TEXT_COLOR_DISABLED, 0xaeb7b8ff),
            (BORDER_WIDTH, 1),
            (TEXT_PADDING, 0),
            (TEXT_ALIGNMENT, TEXT_ALIGN_CENTER),
        ];
        for (prop, value) in defaults {
            table.set_inherited(Default.id(), prop, value);
        }

        let control_specific = [
            (Label, TEXT_ALIGNMENT, TEXT_ALIGN_LEFT),
            (Button, BORDER_WIDTH, 2),
            (Slider, TEXT_PADDING, 4),
            (ProgressBar, TEXT_PADDING, 4),
            (CheckBox, TEXT_PADDING, 4),
            (CheckBox, TEXT_ALIGNMENT, TEXT_ALIGN_RIGHT),
            (DropdownBox, TEXT_PADDING, 0),
            (DropdownBox, TEXT_ALIGNMENT, TEXT_ALIGN_CENTER),
            (TextBox, TEXT_PADDING, 4),
            (TextBox, TEXT_ALIGNMENT, TEXT_ALIGN_LEFT),
            (ValueBox, TEXT_PADDING, 0),
            (ValueBox, TEXT_ALIGNMENT, TEXT_ALIGN_LEFT),
            (StatusBar, TEXT_PADDING, 8),
            (StatusBar, TEXT_ALIGNMENT, TEXT_ALIGN_LEFT),
        ];
        for (control, prop, value) in control_specific {
            table.set(control.id(), prop, value);
        }

        let extended = [
            (Default, TEXT_SIZE, 10),
            (Default, TEXT_SPACING, 1),
            (Default, LINE_COLOR, 0x90abb5ff),
            (Default, BACKGROUND_COLOR, 0xf5f5f5ff),
            (Default, TEXT_LINE_SPACING, 15),
            (Default, TEXT_ALIGNMENT_VERTICAL, TEXT_ALIGN_MIDDLE),
            (Toggle, 16, 2),
            (Slider, 16, 16),
            (Slider, 17, 1),
            (ProgressBar, 16, 1),
            (CheckBox, 16, 1),
            (ComboBox, 16, 32),
            (ComboBox, 17, 2),
            (DropdownBox, 16, 16),
            (DropdownBox, 17, 2),
            (ValueBox, 16, 24),
            (ValueBox, 17, 2),
            (ScrollBar, BORDER_WIDTH, 0),
            (ScrollBar, 16, 6),
            (ScrollBar, 17, 0),
            (ScrollBar, 18, 0),
            (ScrollBar, 19, 16),
            (ScrollBar, 20, 0),
            (ScrollBar, 21, 12),
            (ListView, 16, 28),
            (ListView, 17, 2),
            (ListView, 18, 12),
            (ListView, 19, SCROLLBAR_RIGHT_SIDE),
            (ColorPicker, 16, 8),
            (ColorPicker, 17, 16),
            (ColorPicker, 18, 8),
            (ColorPicker, 19, 8),
            (ColorPicker, 20, 2),
        ];
        for (control, prop, value) in extended {
            table.set(control.id(), prop, value);
        }

        table
    }

    /// Value of one property slot.
    ///
    /// # Panics
    ///
    /// Panics if `control` or `property` is out of range.
    #[inline]
    pub fn get(&self, control: usize, property: usize) -> u32 {
        Self::check_bounds(control, property);
        self.values[control][property]
    }

    /// Overwrite one property slot and nothing else.
    ///
    /// # Panics
    ///
    /// Panics if `control` or `property` is out of range.
    #[inline]
    pub fn set(&mut self, control: usize, property: usize, value: u32) {
        Self::check_bounds(control, property);
        self.values[control][property] = value;
    }

    /// Set a property the way the toolkit does when a style is loaded:
    /// a base property set on `DEFAULT` is copied to every other control,
    /// which may then override it with its own entry.
    pub fn set_inherited(&mut self, control: usize, property: usize, value: u32) {
        self.set(control, property, value);
        if control == Control::Default.id() && property < BASE_PROPERTY_COUNT {
            for row in self.values.iter_mut().skip(1) {
                row[property] = value;
            }
        }
    }

    /// Apply a change list slot by slot, without inheritance.
    pub fn apply(&mut self, changes: &[StyleChange]) {
        for change in changes {
            self.set(change.control as usize, change.property as usize, change.value);
        }
    }

    /// Apply a change list with load semantics (see [`Self::set_inherited`]).
    ///
    /// Starting from [`PropertyTable::raygui_default`] this reproduces what
    /// the toolkit shows after loading the style file.
    pub fn load(&mut self, changes: &[StyleChange]) {
        for change in changes {
            self.set_inherited(change.control as usize, change.property as usize, change.value);
        }
    }

    /// Whether (control, property) addresses a slot of the table.
    #[inline]
    pub fn contains(control: usize, property: usize) -> bool {
        control < CONTROL_COUNT && property < PROPERTY_COUNT
    }

    #[inline]
    fn check_bounds(control: usize, property: usize) {
        assert!(
            Self::contains(control, property),
            "property slot out of range: control {} (max {}), property {} (max {})",
            control,
            CONTROL_COUNT - 1,
            property,
            PROPERTY_COUNT - 1
        );
    }
}
