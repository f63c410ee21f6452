/// Why a field value could not be read as a `dd-mm-yyyy` date.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DateParseError {
    #[error("Field value is empty")]
    Empty,

    #[error("Field value `{value}` should have the form dd-mm-yyyy")]
    Malformed { value: String },

    #[error("Date component `{part}` should be a number")]
    NotANumber { part: String },

    #[error("Day ({day}), month ({month}) and year ({year}) do not make a valid date")]
    OutOfRange { day: u32, month: u32, year: i32 },
}

#[derive(thiserror::Error, Debug)]
pub enum OptionsError {
    #[error("Picker options are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Option `{name}` should be between 0 and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: i32,
        max: i32,
    },
}
