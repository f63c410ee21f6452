//! [`Surface`] over the real document.
//!
//! Listener closures are owned here, grouped by [`Listener`], so a group can be
//! removed as a whole when the calendar markup is replaced or the popup closes.

use std::collections::HashMap;
use std::rc::Rc;

use calendar::markup::{
    ARROW_NEXT_CLASS, ARROW_PREV_CLASS, CALENDAR_CLASS, DAY_CLASS, DAY_DISABLED_CLASS,
    DAY_SELECTED_CLASS, MONTH_SELECT_CLASS, YEAR_SELECT_CLASS,
};
use calendar::{DayCell, Direction, Listener, Placement, Rect, Surface, UiEvent};
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, DomRect, Element, Event, EventTarget, HtmlElement, HtmlInputElement,
    HtmlSelectElement, MouseEvent,
};

/// Routes decoded events back to the owning picker.
pub type Dispatch = Rc<dyn Fn(UiEvent)>;

struct Registration {
    target: EventTarget,
    kind: &'static str,
    capture: bool,
    closure: Closure<dyn FnMut(Event)>,
}

impl Registration {
    fn new(
        target: EventTarget,
        kind: &'static str,
        capture: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let _ = target.add_event_listener_with_callback_and_bool(
            kind,
            closure.as_ref().unchecked_ref(),
            capture,
        );
        Self {
            target,
            kind,
            capture,
            closure,
        }
    }

    fn remove(&self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            self.kind,
            self.closure.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

pub struct DomSurface {
    dispatch: Dispatch,
    listeners: HashMap<Listener, Vec<Registration>>,
}

impl DomSurface {
    pub fn new(dispatch: Dispatch) -> Self {
        Self {
            dispatch,
            listeners: HashMap::new(),
        }
    }

    fn field_listeners(&self, field_id: &str) -> Vec<Registration> {
        let Some(field) = element(field_id) else {
            log::warn!("datepicker: no element with id {}", field_id);
            return Vec::new();
        };

        let dispatch = self.dispatch.clone();
        let field_id = field_id.to_string();
        vec![Registration::new(field.into(), "click", false, move |_| {
            dispatch(UiEvent::FieldClicked {
                field_id: field_id.clone(),
            })
        })]
    }

    fn calendar_listeners(&self, container_id: &str) -> Vec<Registration> {
        let Some(container) = element(container_id) else {
            return Vec::new();
        };
        let mut registrations = Vec::new();

        for (class, direction) in [
            (ARROW_PREV_CLASS, Direction::Prev),
            (ARROW_NEXT_CLASS, Direction::Next),
        ] {
            for arrow in elements_by_class(&container, class) {
                let dispatch = self.dispatch.clone();
                registrations.push(Registration::new(arrow.into(), "click", false, move |event| {
                    event.prevent_default();
                    event.stop_propagation();
                    dispatch(UiEvent::ArrowClicked(direction));
                }));
            }
        }

        let selects: [(&str, fn(String) -> UiEvent); 2] = [
            (MONTH_SELECT_CLASS, UiEvent::MonthSelected),
            (YEAR_SELECT_CLASS, UiEvent::YearSelected),
        ];
        for (class, to_event) in selects {
            for select in elements_by_class(&container, class) {
                let dispatch = self.dispatch.clone();
                registrations.push(Registration::new(select.into(), "change", false, move |event: Event| {
                    if let Some(select) = event
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                    {
                        dispatch(to_event(select.value()));
                    }
                }));
            }
        }

        for day in elements_by_class(&container, DAY_CLASS) {
            if day.class_list().contains(DAY_DISABLED_CLASS) {
                continue;
            }
            let dispatch = self.dispatch.clone();
            registrations.push(Registration::new(day.into(), "click", false, move |event: Event| {
                let cell = event
                    .current_target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|day| {
                        let _ = day.class_list().add_1(DAY_SELECTED_CLASS);
                        DayCell::from_attributes(
                            day.get_attribute("data-day").as_deref(),
                            day.get_attribute("data-month").as_deref(),
                            day.get_attribute("data-year").as_deref(),
                        )
                    });
                dispatch(UiEvent::DayClicked(cell));
            }));
        }

        let dispatch = self.dispatch.clone();
        registrations.push(Registration::new(container.into(), "click", false, move |event: Event| {
            event.stop_propagation();
            dispatch(UiEvent::PopupClicked);
        }));

        registrations
    }

    fn document_listeners(&self) -> Vec<Registration> {
        let Some(document) = document() else {
            return Vec::new();
        };
        let mut registrations = Vec::new();

        let dispatch = self.dispatch.clone();
        registrations.push(Registration::new(document.clone().into(), "keydown", false, move |_| {
            dispatch(UiEvent::KeyDown)
        }));

        // Capture phase on the root: sees every click before the popup's own handlers.
        if let Some(root) = document.document_element() {
            let dispatch = self.dispatch.clone();
            registrations.push(Registration::new(root.into(), "click", true, move |event: Event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    dispatch(UiEvent::DocumentClicked {
                        x: mouse.client_x() as f64,
                        y: mouse.client_y() as f64,
                    });
                }
            }));
        }

        registrations
    }
}

impl Surface for DomSurface {
    fn create_container(&mut self, container_id: &str) {
        let Some(document) = document() else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        if let Ok(container) = document.create_element("div") {
            container.set_id(container_id);
            let _ = body.append_child(&container);
        }
    }

    fn remove_container(&mut self, container_id: &str) {
        if let Some(container) = element(container_id) {
            container.remove();
        }
    }

    fn field_value(&self, field_id: &str) -> Option<String> {
        input(field_id).map(|field| field.value())
    }

    fn set_field_value(&mut self, field_id: &str, value: &str) {
        if let Some(field) = input(field_id) {
            field.set_value(value);
        }
    }

    fn focus_field(&mut self, field_id: &str) {
        if let Some(field) = html_element(field_id) {
            let _ = field.focus();
        }
    }

    fn blur_field_later(&mut self, field_id: &str, delay_ms: u32) {
        let field_id = field_id.to_string();
        Timeout::new(delay_ms, move || {
            if let Some(field) = html_element(&field_id) {
                let _ = field.blur();
            }
        })
        .forget();
    }

    fn has_calendar(&self, container_id: &str) -> bool {
        calendar_node(container_id).is_some()
    }

    fn mount_calendar(&mut self, container_id: &str, markup: &str) {
        let (Some(document), Some(container)) = (document(), element(container_id)) else {
            return;
        };
        if let Ok(calendar) = document.create_element("div") {
            calendar.set_class_name(CALENDAR_CLASS);
            calendar.set_inner_html(markup);
            let _ = container.append_child(&calendar);
        }
    }

    fn update_calendar(&mut self, container_id: &str, markup: &str) {
        if let Some(calendar) = calendar_node(container_id) {
            calendar.set_inner_html(markup);
        }
    }

    fn clear_container(&mut self, container_id: &str) {
        if let Some(container) = element(container_id) {
            container.set_inner_html("");
        }
    }

    fn bounding_rect(&self, element_id: &str) -> Option<Rect> {
        element(element_id).map(|e| to_rect(&e.get_bounding_client_rect()))
    }

    fn calendar_rect(&self, container_id: &str) -> Option<Rect> {
        calendar_node(container_id).map(|e| to_rect(&e.get_bounding_client_rect()))
    }

    fn place(&mut self, container_id: &str, placement: Placement) {
        let Some(container) = html_element(container_id) else {
            return;
        };
        let style = container.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("top", &format!("{}px", placement.top));
        let _ = style.set_property("left", &format!("{}px", placement.left));
        let _ = style.set_property("z-index", &placement.z_index.to_string());
    }

    fn attach(&mut self, listener: Listener) {
        if self.listeners.contains_key(&listener) {
            return;
        }
        let registrations = match &listener {
            Listener::FieldClick { field_id } => self.field_listeners(field_id),
            Listener::Calendar { container_id } => self.calendar_listeners(container_id),
            Listener::Document => self.document_listeners(),
        };
        // Nothing to listen on yet; a later attach may find the element.
        if registrations.is_empty() {
            return;
        }
        self.listeners.insert(listener, registrations);
    }

    fn detach(&mut self, listener: &Listener) {
        let Some(registrations) = self.listeners.remove(listener) else {
            return;
        };
        for registration in &registrations {
            registration.remove();
        }
        // The running handler may be one of these; drop the closures on the next tick.
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            drop(registrations);
        });
    }
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

fn element(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

fn html_element(id: &str) -> Option<HtmlElement> {
    element(id)?.dyn_into::<HtmlElement>().ok()
}

fn input(id: &str) -> Option<HtmlInputElement> {
    element(id)?.dyn_into::<HtmlInputElement>().ok()
}

fn calendar_node(container_id: &str) -> Option<Element> {
    element(container_id)?
        .query_selector(&format!(".{}", CALENDAR_CLASS))
        .ok()
        .flatten()
}

fn elements_by_class(root: &Element, class: &str) -> Vec<Element> {
    let collection = root.get_elements_by_class_name(class);
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

fn to_rect(rect: &DomRect) -> Rect {
    Rect {
        left: rect.left(),
        top: rect.top(),
        right: rect.right(),
        bottom: rect.bottom(),
    }
}
