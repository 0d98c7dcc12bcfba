//! Control kinds and property identifiers of the widget toolkit.
//!
//! Property ids below [`BASE_PROPERTY_COUNT`] mean the same thing for every
//! control (colors per state, border width, padding, alignment). Ids from
//! [`BASE_PROPERTY_COUNT`] upwards are "extended" and their meaning depends
//! on the control: on `DEFAULT` they are global settings such as the text
//! size, on a slider they hold the slider width, and so on.

/// Number of control kinds, `DEFAULT` included.
pub const CONTROL_COUNT: usize = 16;
/// Properties shared by every control.
pub const BASE_PROPERTY_COUNT: usize = 16;
/// Control-specific properties stored after the base ones.
pub const EXTENDED_PROPERTY_COUNT: usize = 8;
/// Property slots per control.
pub const PROPERTY_COUNT: usize = BASE_PROPERTY_COUNT + EXTENDED_PROPERTY_COUNT;

/// A widget kind whose visual properties live in one row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum Control {
    /// Supplies inherited values for every other control
    Default = 0,
    Label,
    Button,
    Toggle,
    Slider,
    ProgressBar,
    CheckBox,
    ComboBox,
    DropdownBox,
    TextBox,
    ValueBox,
    /// Slot formerly used by the spinner, kept for layout compatibility
    Control11,
    ListView,
    ColorPicker,
    ScrollBar,
    StatusBar,
}

impl Control {
    /// All controls in id order.
    pub const ALL: [Control; CONTROL_COUNT] = [
        Control::Default,
        Control::Label,
        Control::Button,
        Control::Toggle,
        Control::Slider,
        Control::ProgressBar,
        Control::CheckBox,
        Control::ComboBox,
        Control::DropdownBox,
        Control::TextBox,
        Control::ValueBox,
        Control::Control11,
        Control::ListView,
        Control::ColorPicker,
        Control::ScrollBar,
        Control::StatusBar,
    ];

    /// Look a control up by its numeric id.
    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    /// Numeric id as stored in style files.
    #[inline]
    pub const fn id(self) -> usize {
        self as usize
    }

    /// Upper-case name used in text styles and generated sources.
    pub const fn name(self) -> &'static str {
        match self {
            Control::Default => "DEFAULT",
            Control::Label => "LABEL",
            Control::Button => "BUTTON",
            Control::Toggle => "TOGGLE",
            Control::Slider => "SLIDER",
            Control::ProgressBar => "PROGRESSBAR",
            Control::CheckBox => "CHECKBOX",
            Control::ComboBox => "COMBOBOX",
            Control::DropdownBox => "DROPDOWNBOX",
            Control::TextBox => "TEXTBOX",
            Control::ValueBox => "VALUEBOX",
            Control::Control11 => "CONTROL11",
            Control::ListView => "LISTVIEW",
            Control::ColorPicker => "COLORPICKER",
            Control::ScrollBar => "SCROLLBAR",
            Control::StatusBar => "STATUSBAR",
        }
    }

    /// Names of this control's extended properties, indexed from
    /// [`BASE_PROPERTY_COUNT`]. Slots past the end are unnamed.
    fn extended_names(self) -> &'static [&'static str] {
        match self {
            Control::Default => &[
                "TEXT_SIZE",
                "TEXT_SPACING",
                "LINE_COLOR",
                "BACKGROUND_COLOR",
                "TEXT_LINE_SPACING",
                "TEXT_ALIGNMENT_VERTICAL",
                "TEXT_WRAP_MODE",
            ],
            Control::Toggle => &["GROUP_PADDING"],
            Control::Slider => &["SLIDER_WIDTH", "SLIDER_PADDING"],
            Control::ProgressBar => &["PROGRESS_PADDING"],
            Control::CheckBox => &["CHECK_PADDING"],
            Control::ComboBox => &["COMBO_BUTTON_WIDTH", "COMBO_BUTTON_SPACING"],
            Control::DropdownBox => &["ARROW_PADDING", "DROPDOWN_ITEMS_SPACING"],
            Control::TextBox => &["TEXT_READONLY"],
            Control::ValueBox => &["SPIN_BUTTON_WIDTH", "SPIN_BUTTON_SPACING"],
            Control::ListView => &[
                "LIST_ITEMS_HEIGHT",
                "LIST_ITEMS_SPACING",
                "SCROLLBAR_WIDTH",
                "SCROLLBAR_SIDE",
            ],
            Control::ColorPicker => &[
                "COLOR_SELECTOR_SIZE",
                "HUEBAR_WIDTH",
                "HUEBAR_PADDING",
                "HUEBAR_SELECTOR_HEIGHT",
                "HUEBAR_SELECTOR_OVERFLOW",
            ],
            Control::ScrollBar => &[
                "ARROWS_SIZE",
                "ARROWS_VISIBLE",
                "SCROLL_SLIDER_PADDING",
                "SCROLL_SLIDER_SIZE",
                "SCROLL_PADDING",
                "SCROLL_SPEED",
            ],
            Control::Label | Control::Button | Control::Control11 | Control::StatusBar => &[],
        }
    }
}

/// Base property ids, valid for every control.
pub mod property {
    pub const BORDER_COLOR_NORMAL: usize = 0;
    pub const BASE_COLOR_NORMAL: usize = 1;
    pub const TEXT_COLOR_NORMAL: usize = 2;
    pub const BORDER_COLOR_FOCUSED: usize = 3;
    pub const BASE_COLOR_FOCUSED: usize = 4;
    pub const TEXT_COLOR_FOCUSED: usize = 5;
    pub const BORDER_COLOR_PRESSED: usize = 6;
    pub const BASE_COLOR_PRESSED: usize = 7;
    pub const TEXT_COLOR_PRESSED: usize = 8;
    pub const BORDER_COLOR_DISABLED: usize = 9;
    pub const BASE_COLOR_DISABLED: usize = 10;
    pub const TEXT_COLOR_DISABLED: usize = 11;
    pub const BORDER_WIDTH: usize = 12;
    pub const TEXT_PADDING: usize = 13;
    pub const TEXT_ALIGNMENT: usize = 14;

    // Extended properties of DEFAULT
    pub const TEXT_SIZE: usize = 16;
    pub const TEXT_SPACING: usize = 17;
    pub const LINE_COLOR: usize = 18;
    pub const BACKGROUND_COLOR: usize = 19;
    pub const TEXT_LINE_SPACING: usize = 20;
    pub const TEXT_ALIGNMENT_VERTICAL: usize = 21;
    pub const TEXT_WRAP_MODE: usize = 22;
}

const BASE_NAMES: [&str; BASE_PROPERTY_COUNT - 1] = [
    "BORDER_COLOR_NORMAL",
    "BASE_COLOR_NORMAL",
    "TEXT_COLOR_NORMAL",
    "BORDER_COLOR_FOCUSED",
    "BASE_COLOR_FOCUSED",
    "TEXT_COLOR_FOCUSED",
    "BORDER_COLOR_PRESSED",
    "BASE_COLOR_PRESSED",
    "TEXT_COLOR_PRESSED",
    "BORDER_COLOR_DISABLED",
    "BASE_COLOR_DISABLED",
    "TEXT_COLOR_DISABLED",
    "BORDER_WIDTH",
    "TEXT_PADDING",
    "TEXT_ALIGNMENT",
];

/// Symbolic name of a (control, property) pair, e.g.
/// `DEFAULT_BORDER_COLOR_NORMAL` or `SLIDER_SLIDER_WIDTH`.
///
/// Slots without a meaning get a positional name (`BUTTON_EXTENDED02`,
/// `LABEL_RESERVED`) so every id pair still has a stable label.
///
/// # Examples
///
/// ```
/// use rgs_codec::style::property_name;
///
/// assert_eq!(property_name(0, 0), "DEFAULT_BORDER_COLOR_NORMAL");
/// assert_eq!(property_name(0, 16), "DEFAULT_TEXT_SIZE");
/// assert_eq!(property_name(4, 16), "SLIDER_SLIDER_WIDTH");
/// ```
pub fn property_name(control: usize, property: usize) -> String {
    let control_name = Control::from_id(control)
        .map(Control::name)
        .map(str::to_string)
        .unwrap_or_else(|| format!("CONTROL{:02}", control));

    let property_name = if property < BASE_NAMES.len() {
        BASE_NAMES[property].to_string()
    } else if property < BASE_PROPERTY_COUNT {
        "RESERVED".to_string()
    } else {
        let slot = property - BASE_PROPERTY_COUNT;
        Control::from_id(control)
            .and_then(|c| c.extended_names().get(slot).copied())
            .map(str::to_string)
            .unwrap_or_else(|| format!("EXTENDED{:02}", slot))
    };

    format!("{}_{}", control_name, property_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_ids_are_dense() {
        for (i, control) in Control::ALL.iter().enumerate() {
            assert_eq!(control.id(), i);
            assert_eq!(Control::from_id(i), Some(*control));
        }
        assert_eq!(Control::from_id(CONTROL_COUNT), None);
    }

    #[test]
    fn test_property_names() {
        assert_eq!(property_name(2, property::BORDER_WIDTH), "BUTTON_BORDER_WIDTH");
        assert_eq!(property_name(0, property::LINE_COLOR), "DEFAULT_LINE_COLOR");
        assert_eq!(property_name(14, 21), "SCROLLBAR_SCROLL_SPEED");
        assert_eq!(property_name(1, 15), "LABEL_RESERVED");
        assert_eq!(property_name(2, 18), "BUTTON_EXTENDED02");
        assert_eq!(property_name(0, 23), "DEFAULT_EXTENDED07");
        assert_eq!(property_name(20, 0), "CONTROL20_BORDER_COLOR_NORMAL");
    }

    #[test]
    fn test_extended_names_fit_slots() {
        for control in Control::ALL {
            assert!(control.extended_names().len() <= EXTENDED_PROPERTY_COUNT);
        }
    }
}
