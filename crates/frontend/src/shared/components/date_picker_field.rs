use calendar::PickerOptions;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::date_picker;

/// Text input in `dd-mm-yyyy` format with the popup calendar attached.
#[component]
pub fn DatePickerField(
    /// Element id of the input; the popup container becomes `datepicker-<id>`
    #[prop(into)]
    id: String,
    /// Initial text of the field
    #[prop(optional, into)]
    value: Option<String>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional)] options: Option<PickerOptions>,
) -> impl IntoView {
    let field_id = id.clone();
    let options = options.unwrap_or_default();

    Effect::new(move |_| {
        let field_id = field_id.clone();
        let options = options.clone();
        spawn_local(async move {
            // Let the input land in the document first
            gloo_timers::future::TimeoutFuture::new(0).await;
            date_picker::attach(&field_id, options);
        });
    });

    let release_id = id.clone();
    on_cleanup(move || date_picker::release(&release_id));

    view! {
        <input
            type="text"
            id=id
            class="datepicker-field"
            autocomplete="off"
            placeholder=placeholder.unwrap_or_else(|| "dd-mm-yyyy".to_string())
            value=value.unwrap_or_default()
        />
    }
}
