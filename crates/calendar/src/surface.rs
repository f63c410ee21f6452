//! The page as the picker sees it.
//!
//! [`Surface`] is implemented over web-sys in the frontend crate and by an
//! in-memory fake in tests. Implementations decode DOM events into [`UiEvent`]s
//! and feed them back to [`crate::DatePicker::handle`].

use crate::selected::Direction;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Half-open on the right and bottom edges.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Fixed-position placement of the popup container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
    pub z_index: i32,
}

/// A group of DOM listeners the picker installs and removes together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Click on the bound field opens the popup.
    FieldClick { field_id: String },
    /// Arrows, selects, enabled day cells and the popup click guard.
    Calendar { container_id: String },
    /// Keydown on the document and capturing click on the root element.
    Document,
}

/// Data attributes of a clicked day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    /// 0-based.
    pub month: u32,
    pub year: i32,
}

impl DayCell {
    /// Reads `data-day`, `data-month` and `data-year`. `None` when any is missing.
    pub fn from_attributes(day: Option<&str>, month: Option<&str>, year: Option<&str>) -> Option<Self> {
        Some(Self {
            day: day?.trim().parse().ok()?,
            month: month?.trim().parse().ok()?,
            year: year?.trim().parse().ok()?,
        })
    }
}

/// A DOM event, already decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    FieldClicked { field_id: String },
    PopupClicked,
    DayClicked(Option<DayCell>),
    ArrowClicked(Direction),
    /// Raw `value` of the month `<select>`.
    MonthSelected(String),
    /// Raw `value` of the year `<select>`.
    YearSelected(String),
    /// Capturing click anywhere in the document, viewport coordinates.
    DocumentClicked { x: f64, y: f64 },
    KeyDown,
}

pub trait Surface {
    /// Creates an empty popup container and appends it to the body.
    fn create_container(&mut self, container_id: &str);
    fn remove_container(&mut self, container_id: &str);

    fn field_value(&self, field_id: &str) -> Option<String>;
    fn set_field_value(&mut self, field_id: &str, value: &str);
    fn focus_field(&mut self, field_id: &str);
    /// Fire-and-forget; there is no way to cancel it.
    fn blur_field_later(&mut self, field_id: &str, delay_ms: u32);

    /// Is a `.datepicker` node already inside the container?
    fn has_calendar(&self, container_id: &str) -> bool;
    /// Appends a `.datepicker` node holding `markup`.
    fn mount_calendar(&mut self, container_id: &str, markup: &str);
    /// Replaces the inner markup of the existing `.datepicker` node.
    fn update_calendar(&mut self, container_id: &str, markup: &str);
    fn clear_container(&mut self, container_id: &str);

    fn bounding_rect(&self, element_id: &str) -> Option<Rect>;
    /// Bounding rectangle of the `.datepicker` node inside the container.
    fn calendar_rect(&self, container_id: &str) -> Option<Rect>;
    fn place(&mut self, container_id: &str, placement: Placement);

    /// Attaching a listener group that is already attached does nothing.
    fn attach(&mut self, listener: Listener);
    fn detach(&mut self, listener: &Listener);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect {
            left: 10.0,
            top: 20.0,
            right: 110.0,
            bottom: 220.0,
        };
        assert!(rect.contains(10.0, 20.0));
        assert!(rect.contains(109.9, 219.9));
        assert!(!rect.contains(110.0, 100.0));
        assert!(!rect.contains(50.0, 220.0));
        assert!(!rect.contains(9.0, 100.0));
    }

    #[test]
    fn test_day_cell_from_attributes() {
        assert_eq!(
            DayCell::from_attributes(Some("10"), Some("1"), Some("2024")),
            Some(DayCell {
                day: 10,
                month: 1,
                year: 2024
            })
        );
        assert_eq!(DayCell::from_attributes(None, Some("1"), Some("2024")), None);
        assert_eq!(DayCell::from_attributes(Some("x"), Some("1"), Some("2024")), None);
    }
}
