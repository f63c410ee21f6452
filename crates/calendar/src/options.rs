use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::parse_field_value;
use crate::error::OptionsError;

/// Upper bound for `yearsBefore` and `yearsAfter`.
pub const MAX_YEAR_SPAN: i32 = 500;

/// Per-picker settings, usually handed over from JavaScript as a plain object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerOptions {
    /// Years offered before the selected year.
    pub years_before: i32,
    /// Years offered after the current calendar year.
    pub years_after: i32,
    /// How far the popup overlaps the bottom edge of the field, in px.
    pub vertical_offset: f64,
    pub z_index: i32,
    /// Delay between focusing and blurring the field after a pick.
    pub blur_delay_ms: u32,
    /// Days that cannot be picked, as `dd-mm-yyyy`.
    pub disabled: Vec<String>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            years_before: 20,
            years_after: 5,
            vertical_offset: 7.0,
            z_index: 99999,
            blur_delay_ms: 100,
            disabled: Vec::new(),
        }
    }
}

impl PickerOptions {
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()
    }

    /// Rejects year spans that would leave the year selector empty or huge.
    pub fn validate(self) -> Result<Self, OptionsError> {
        for (name, value) in [("yearsBefore", self.years_before), ("yearsAfter", self.years_after)] {
            if !(0..=MAX_YEAR_SPAN).contains(&value) {
                return Err(OptionsError::OutOfRange {
                    name,
                    value,
                    max: MAX_YEAR_SPAN,
                });
            }
        }
        Ok(self)
    }

    pub fn disabled_dates(&self) -> DisabledDates {
        DisabledDates::from_strings(&self.disabled)
    }
}

/// Set of days rendered as `datepicker-day-disabled`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabledDates(BTreeSet<NaiveDate>);

impl DisabledDates {
    /// Unparsable entries are skipped with a warning.
    pub fn from_strings<S: AsRef<str>>(values: &[S]) -> Self {
        let dates = values
            .iter()
            .filter_map(|value| match parse_field_value(value.as_ref()) {
                Ok(date) => Some(date),
                Err(err) => {
                    log::warn!("datepicker: ignoring disabled date {:?}: {}", value.as_ref(), err);
                    None
                }
            })
            .collect();
        Self(dates)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    /// Is this (day, 0-based month, year) disabled?
    pub fn is_disabled(&self, day: u32, month: u32, year: i32) -> bool {
        NaiveDate::from_ymd_opt(year, month + 1, day).is_some_and(|date| self.contains(date))
    }

}

impl FromIterator<NaiveDate> for DisabledDates {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_fills_defaults() {
        let options = PickerOptions::from_json(r#"{"yearsAfter": 10, "disabled": ["01-01-2024"]}"#)
            .unwrap();
        assert_eq!(options.years_after, 10);
        assert_eq!(options.years_before, 20);
        assert_eq!(options.blur_delay_ms, 100);
        assert!(options.disabled_dates().contains(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
    }

    #[test]
    fn test_from_json_rejects_bad_json() {
        assert!(PickerOptions::from_json("{yearsAfter: ").is_err());
    }

    #[test]
    fn test_from_json_rejects_negative_year_span() {
        let err = PickerOptions::from_json(r#"{"yearsBefore": -10}"#).unwrap_err();
        assert!(matches!(
            err,
            OptionsError::OutOfRange {
                name: "yearsBefore",
                value: -10,
                ..
            }
        ));
    }

    #[test]
    fn test_from_json_rejects_huge_year_span() {
        let err = PickerOptions::from_json(r#"{"yearsBefore": 2147483647}"#).unwrap_err();
        assert!(matches!(err, OptionsError::OutOfRange { name: "yearsBefore", .. }));

        let err = PickerOptions::from_json(r#"{"yearsAfter": 501}"#).unwrap_err();
        assert!(matches!(err, OptionsError::OutOfRange { name: "yearsAfter", .. }));

        let options = PickerOptions::from_json(r#"{"yearsBefore": 0, "yearsAfter": 500}"#).unwrap();
        assert_eq!(options.years_after, MAX_YEAR_SPAN);
    }

    #[test]
    fn test_disabled_dates_skip_invalid_entries() {
        let disabled = DisabledDates::from_strings(&["25-12-2024", "31-02-2024", "nope"]);
        assert_eq!(disabled, [NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()].into_iter().collect::<DisabledDates>());
        assert!(disabled.is_disabled(25, 11, 2024));
        assert!(!disabled.is_disabled(24, 11, 2024));
        assert!(!disabled.is_disabled(31, 1, 2024));
    }
}
