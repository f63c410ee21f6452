//! Platform-independent core of the inline date picker.
//!
//! Everything that does not need a browser lives here: date arithmetic, the
//! `dd-mm-yyyy` field format, calendar markup, the picker state machine and the
//! [`picker::DatePicker`] controller, which talks to the page only through the
//! [`surface::Surface`] trait.

pub mod date;
pub mod error;
pub mod markup;
pub mod options;
pub mod picker;
pub mod selected;
pub mod state;
pub mod surface;

pub use error::{DateParseError, OptionsError};
pub use options::{DisabledDates, PickerOptions};
pub use picker::{container_id_for, DatePicker};
pub use selected::{Direction, SelectedDate};
pub use state::{Effect, PickerEvent, PickerState};
pub use surface::{DayCell, Listener, Placement, Rect, Surface, UiEvent};
