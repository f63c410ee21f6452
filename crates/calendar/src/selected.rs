use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::date::{days_in_month, format_date, parse_field_value, row_padding};

/// Arrow direction in the calendar header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// The date the popup currently displays and highlights.
///
/// Not necessarily committed to the field yet: navigation moves `month`/`year`
/// while the field keeps its old value until a day is picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectedDate {
    pub day: u32,
    /// 0-based.
    pub month: u32,
    pub year: i32,
    pub date: Option<NaiveDate>,
    pub formatted_date: Option<String>,
}

impl SelectedDate {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.month0(),
            year: date.year(),
            date: Some(date),
            formatted_date: Some(format_date(date.day(), date.month0(), date.year())),
        }
    }

    /// Reads the field text, falling back to `today` when it is empty or not a date.
    pub fn from_field(value: Option<&str>, today: NaiveDate) -> Self {
        let date = match value.map(parse_field_value) {
            Some(Ok(date)) => date,
            Some(Err(err)) => {
                log::debug!("datepicker: {}, showing {}", err, today);
                today
            }
            None => today,
        };
        Self::from_date(date)
    }

    pub fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Next if self.month == 11 => {
                self.month = 0;
                self.year += 1;
            }
            Direction::Next => self.month += 1,
            Direction::Prev if self.month == 0 => {
                self.month = 11;
                self.year -= 1;
            }
            Direction::Prev => self.month -= 1,
        }
    }

    /// Ignores anything outside 0..12.
    pub fn set_month(&mut self, month: u32) {
        if month < 12 {
            self.month = month;
        }
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    /// Commits a picked day and returns the text to write into the field.
    pub fn pick(&mut self, day: u32, month: u32, year: i32) -> String {
        self.day = day;
        self.set_month(month);
        self.year = year;
        self.date = NaiveDate::from_ymd_opt(year, self.month + 1, day);
        let formatted = format_date(day, self.month, year);
        self.formatted_date = Some(formatted.clone());
        formatted
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn row_padding(&self) -> u32 {
        row_padding(self.year, self.month)
    }
}
