pub mod components;
pub mod date_picker;
