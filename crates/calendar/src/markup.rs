//! String templates for the popup.
//!
//! Class names are a public contract: pages style `.datepicker`,
//! `.datepicker-header`, `.datepicker-day-today` and friends directly.

use std::fmt::Write;

use crate::date::{MONTH_NAMES, WEEKDAY_NAMES};
use crate::options::{DisabledDates, PickerOptions, MAX_YEAR_SPAN};
use crate::selected::SelectedDate;

pub const CALENDAR_CLASS: &str = "datepicker";
pub const DAY_CLASS: &str = "datepicker-day";
pub const DAY_TODAY_CLASS: &str = "datepicker-day-today";
pub const DAY_SELECTED_CLASS: &str = "datepicker-day-selected";
pub const DAY_DISABLED_CLASS: &str = "datepicker-day-disabled";
pub const ARROW_PREV_CLASS: &str = "datepicker-arrow-prev";
pub const ARROW_NEXT_CLASS: &str = "datepicker-arrow-next";
pub const MONTH_SELECT_CLASS: &str = "datepicker-date-month";
pub const YEAR_SELECT_CLASS: &str = "datepicker-date-year";

/// Everything needed to render one month.
pub struct Calendar<'a> {
    pub selected: &'a SelectedDate,
    /// Year of today's date; bounds the year selector.
    pub current_year: i32,
    pub options: &'a PickerOptions,
    pub disabled: &'a DisabledDates,
}

impl Calendar<'_> {
    /// Inner markup of the `.datepicker` node.
    pub fn render(&self) -> String {
        let mut html = self.header();
        html.push_str(&self.body());
        html
    }

    pub fn header(&self) -> String {
        format!(
            "<div class=\"datepicker-header\">\
             <div class=\"datepicker-arrow {ARROW_PREV_CLASS}\"></div>\
             <div class=\"datepicker-date\">{}&nbsp;&nbsp;{}</div>\
             <div class=\"datepicker-arrow {ARROW_NEXT_CLASS}\"></div>\
             </div>",
            self.months(),
            self.years()
        )
    }

    pub fn months(&self) -> String {
        let mut html = format!("<select class=\"{MONTH_SELECT_CLASS}\">");
        for (index, name) in MONTH_NAMES.iter().enumerate() {
            let selected = if index as u32 == self.selected.month {
                " selected"
            } else {
                ""
            };
            let _ = write!(html, "<option value=\"{index}\"{selected}>{name}</option>");
        }
        html.push_str("</select>");
        html
    }

    pub fn years(&self) -> String {
        // Options built in code may not have been through `validate`.
        let before = self.options.years_before.clamp(0, MAX_YEAR_SPAN);
        let after = self.options.years_after.clamp(0, MAX_YEAR_SPAN);
        let first = self.selected.year - before;
        let last = self.current_year + after;

        let mut html = format!("<select class=\"{YEAR_SELECT_CLASS}\">");
        for year in first..=last {
            let selected = if year == self.selected.year {
                " selected"
            } else {
                ""
            };
            let _ = write!(html, "<option value=\"{year}\"{selected}>{year}</option>");
        }
        html.push_str("</select>");
        html
    }

    pub fn body(&self) -> String {
        let mut html = String::from("<div class=\"datepicker-calendar\"><table><tr>");
        for name in WEEKDAY_NAMES {
            let _ = write!(html, "<td><div class=\"datepicker-week\">{name}</div></td>");
        }
        html.push_str("</tr><tr>");

        let padding = self.selected.row_padding();
        let days = self.selected.days_in_month();
        let mut column = 0;
        for _ in 0..padding {
            html.push_str("<td></td>");
            column = wrap_row(&mut html, column);
        }
        for day in 1..=days {
            let _ = write!(html, "<td>{}</td>", self.day_cell(day));
            column = wrap_row(&mut html, column);
        }
        html.push_str("</tr></table></div>");
        html
    }

    fn day_cell(&self, day: u32) -> String {
        let SelectedDate { month, year, .. } = *self.selected;
        let mut class = String::from(DAY_CLASS);
        if day == self.selected.day {
            class.push(' ');
            class.push_str(DAY_TODAY_CLASS);
        }
        if self.disabled.is_disabled(day, month, year) {
            class.push(' ');
            class.push_str(DAY_DISABLED_CLASS);
        }
        format!(
            "<div class=\"{class}\" data-day=\"{day}\" data-month=\"{month}\" data-year=\"{year}\">{day}</div>"
        )
    }
}

/// Closes the row after every seventh cell.
fn wrap_row(html: &mut String, column: u32) -> u32 {
    let column = column + 1;
    if column % 7 == 0 {
        html.push_str("</tr><tr>");
        0
    } else {
        column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn selected(year: i32, month: u32, day: u32) -> SelectedDate {
        SelectedDate::from_date(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    fn render_body(selected: &SelectedDate, disabled: &DisabledDates) -> String {
        let options = PickerOptions::default();
        Calendar {
            selected,
            current_year: 2024,
            options: &options,
            disabled,
        }
        .body()
    }

    #[test]
    fn test_body_for_leap_february() {
        let selected = selected(2024, 2, 15);
        let html = render_body(&selected, &DisabledDates::default());

        assert_eq!(html.matches("class=\"datepicker-week\"").count(), 7);
        assert_eq!(html.matches("data-day=").count(), 29);
        assert_eq!(html.matches("<td></td>").count(), 3);
        assert_eq!(html.matches(DAY_TODAY_CLASS).count(), 1);
        assert!(html.contains(
            "<div class=\"datepicker-day datepicker-day-today\" data-day=\"15\" data-month=\"1\" data-year=\"2024\">15</div>"
        ));
        assert!(!html.contains("data-day=\"30\""));
    }

    #[test]
    fn test_body_rows_have_seven_cells() {
        let selected = selected(2024, 9, 1);
        let html = render_body(&selected, &DisabledDates::default());
        let grid = html.split("</tr><tr>").skip(1);
        for row in grid {
            assert!(row.matches("<td").count() <= 7);
        }
        // September 2024 starts on Sunday: six blanks, then 1..30 fills five rows.
        assert_eq!(html.matches("<td></td>").count(), 6);
    }

    #[test]
    fn test_body_marks_disabled_days() {
        let selected = selected(2024, 12, 1);
        let disabled = DisabledDates::from_strings(&["25-12-2024", "26-12-2024"]);
        let html = render_body(&selected, &disabled);
        assert_eq!(html.matches(DAY_DISABLED_CLASS).count(), 2);
        assert!(html.contains("datepicker-day datepicker-day-disabled\" data-day=\"25\""));
    }

    #[test]
    fn test_months_marks_selected() {
        let selected = selected(2024, 3, 1);
        let options = PickerOptions::default();
        let disabled = DisabledDates::default();
        let calendar = Calendar {
            selected: &selected,
            current_year: 2024,
            options: &options,
            disabled: &disabled,
        };
        let html = calendar.months();
        assert_eq!(html.matches("<option").count(), 12);
        assert!(html.contains("<option value=\"2\" selected>Maa</option>"));
        assert_eq!(html.matches(" selected").count(), 1);
    }

    #[test]
    fn test_years_range() {
        let selected = selected(2010, 1, 1);
        let options = PickerOptions::default();
        let disabled = DisabledDates::default();
        let calendar = Calendar {
            selected: &selected,
            current_year: 2024,
            options: &options,
            disabled: &disabled,
        };
        let html = calendar.years();
        assert!(html.starts_with("<select class=\"datepicker-date-year\"><option value=\"1990\">"));
        assert!(html.ends_with("<option value=\"2029\">2029</option></select>"));
        assert_eq!(html.matches("<option").count(), 40);
        assert!(html.contains("<option value=\"2010\" selected>2010</option>"));
    }

    #[test]
    fn test_years_clamps_unvalidated_span() {
        let selected = selected(2024, 1, 1);
        let disabled = DisabledDates::default();
        let options = PickerOptions {
            years_before: -10,
            years_after: i32::MAX,
            ..PickerOptions::default()
        };
        let calendar = Calendar {
            selected: &selected,
            current_year: 2024,
            options: &options,
            disabled: &disabled,
        };
        let html = calendar.years();
        assert!(html.starts_with("<select class=\"datepicker-date-year\"><option value=\"2024\" selected>"));
        assert_eq!(html.matches("<option").count(), 1 + MAX_YEAR_SPAN as usize);
    }

    #[test]
    fn test_header_layout() {
        let selected = selected(2024, 1, 1);
        let options = PickerOptions::default();
        let disabled = DisabledDates::default();
        let calendar = Calendar {
            selected: &selected,
            current_year: 2024,
            options: &options,
            disabled: &disabled,
        };
        let html = calendar.render();
        assert!(html.starts_with("<div class=\"datepicker-header\"><div class=\"datepicker-arrow datepicker-arrow-prev\">"));
        assert!(html.contains("</select>&nbsp;&nbsp;<select class=\"datepicker-date-year\">"));
        assert!(html.contains("<div class=\"datepicker-calendar\"><table>"));
    }
}
