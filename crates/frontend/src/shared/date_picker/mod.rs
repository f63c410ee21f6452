//! Pickers attached to fields on the current page.
//!
//! Each bound field gets its own [`DatePicker`]. The picker is kept alive in a
//! thread-local registry until [`release`] is called; its DOM listeners only hold
//! a weak handle back to it.

pub mod dom_surface;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use calendar::{DatePicker, PickerOptions, UiEvent};
use chrono::NaiveDate;

pub use dom_surface::{Dispatch, DomSurface};

type SharedPicker = Rc<RefCell<DatePicker<DomSurface>>>;

thread_local! {
    static PICKERS: RefCell<HashMap<String, SharedPicker>> = RefCell::new(HashMap::new());
}

/// Binds a picker to the input `field_id`.
///
/// Returns `false` when no such element exists. Attaching an already bound
/// field keeps the existing picker.
pub fn attach(field_id: &str, options: PickerOptions) -> bool {
    let bound = PICKERS.with(|pickers| pickers.borrow().contains_key(field_id));
    if bound {
        log::debug!("datepicker: {} already attached", field_id);
        return true;
    }

    let exists = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(field_id))
        .is_some();
    if !exists {
        log::warn!("datepicker: cannot attach, no element with id {}", field_id);
        return false;
    }

    let picker: SharedPicker = Rc::new_cyclic(|weak: &Weak<RefCell<DatePicker<DomSurface>>>| {
        let weak = weak.clone();
        let dispatch: Dispatch = Rc::new(move |event: UiEvent| {
            let Some(picker) = weak.upgrade() else {
                return;
            };
            match picker.try_borrow_mut() {
                Ok(mut picker) => picker.handle(event),
                Err(_) => log::warn!("datepicker: dropped {:?}, picker busy", event),
            };
        });
        RefCell::new(DatePicker::new(
            DomSurface::new(dispatch),
            options,
            Box::new(today),
        ))
    });
    picker.borrow_mut().initialize(field_id);

    PICKERS.with(|pickers| pickers.borrow_mut().insert(field_id.to_string(), picker));
    log::debug!("datepicker: attached to {}", field_id);
    true
}

/// Unbinds the picker of `field_id` and removes its popup container.
pub fn release(field_id: &str) {
    let Some(picker) = PICKERS.with(|pickers| pickers.borrow_mut().remove(field_id)) else {
        return;
    };
    match picker.try_borrow_mut() {
        Ok(mut picker) => picker.dispose(),
        Err(_) => log::warn!("datepicker: {} released while handling an event", field_id),
    };
}

pub fn is_attached(field_id: &str) -> bool {
    PICKERS.with(|pickers| pickers.borrow().contains_key(field_id))
}

/// Today in the browser's local time zone.
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_else(|| chrono::Local::now().date_naive())
}
