use calendar::PickerOptions;
use leptos::prelude::*;

use crate::shared::components::DatePickerField;

#[component]
pub fn App() -> impl IntoView {
    let delivery = PickerOptions {
        years_before: 1,
        years_after: 2,
        disabled: vec!["25-12-2026".to_string(), "26-12-2026".to_string()],
        ..PickerOptions::default()
    };

    view! {
        <main class="datepicker-demo">
            <h1>"Date picker"</h1>
            <p>
                <label for="start-date">"Start date"</label>
                <DatePickerField id="start-date" />
            </p>
            <p>
                <label for="delivery-date">"Delivery (no Christmas)"</label>
                <DatePickerField id="delivery-date" value="24-12-2026" options=delivery />
            </p>
        </main>
    }
}
