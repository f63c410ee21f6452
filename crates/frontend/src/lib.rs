pub mod app;
pub mod shared;

use calendar::PickerOptions;
use wasm_bindgen::prelude::*;

/// Mounts the demo page.
#[wasm_bindgen]
pub fn hydrate() {
    leptos::mount::mount_to_body(app::App);
}

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}

/// Binds a popup calendar to the input with id `fieldId`.
///
/// `options` may be omitted or a plain object with any of `yearsBefore`,
/// `yearsAfter`, `verticalOffset`, `zIndex`, `blurDelayMs` and `disabled`.
#[wasm_bindgen(js_name = attachDatepicker)]
pub fn attach_datepicker(field_id: &str, options: JsValue) -> Result<(), JsValue> {
    let options = if options.is_undefined() || options.is_null() {
        PickerOptions::default()
    } else {
        serde_wasm_bindgen::from_value::<PickerOptions>(options)?
            .validate()
            .map_err(|err| JsValue::from_str(&err.to_string()))?
    };

    if shared::date_picker::attach(field_id, options) {
        Ok(())
    } else {
        Err(JsValue::from_str(&format!("no element with id `{}`", field_id)))
    }
}

#[wasm_bindgen(js_name = detachDatepicker)]
pub fn detach_datepicker(field_id: &str) {
    shared::date_picker::release(field_id);
}
