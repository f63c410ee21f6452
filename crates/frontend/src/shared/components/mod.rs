pub mod date_picker_field;

pub use date_picker_field::DatePickerField;
