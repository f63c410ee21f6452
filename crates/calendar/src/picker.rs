use chrono::{Datelike, NaiveDate};

use crate::date::month_from_short_name;
use crate::markup::Calendar;
use crate::options::{DisabledDates, PickerOptions};
use crate::selected::{Direction, SelectedDate};
use crate::state::{Effect, PickerEvent, PickerState};
use crate::surface::{DayCell, Listener, Placement, Surface, UiEvent};

/// Id of the popup container created next to a field.
pub fn container_id_for(field_id: &str) -> String {
    format!("datepicker-{}", field_id)
}

/// Popup calendar bound to one or more text fields.
///
/// All page access goes through `S`; DOM events come back in through
/// [`DatePicker::handle`]. At most one popup is open at a time.
pub struct DatePicker<S> {
    surface: S,
    options: PickerOptions,
    disabled: DisabledDates,
    selected: SelectedDate,
    state: PickerState,
    /// Fields bound with `initialize`.
    fields: Vec<String>,
    /// Field and container of the open popup.
    field_id: Option<String>,
    container_id: Option<String>,
    today: Box<dyn Fn() -> NaiveDate>,
}

impl<S: Surface> DatePicker<S> {
    pub fn new(surface: S, options: PickerOptions, today: Box<dyn Fn() -> NaiveDate>) -> Self {
        let disabled = options.disabled_dates();
        Self {
            surface,
            options,
            disabled,
            selected: SelectedDate::default(),
            state: PickerState::Closed,
            fields: Vec::new(),
            field_id: None,
            container_id: None,
            today,
        }
    }

    /// Resets the picker and binds it to `field_id`.
    ///
    /// Binding a field twice does not create a second container.
    pub fn initialize(&mut self, field_id: &str) {
        if self.state.is_open() {
            self.tear_down();
        }
        self.selected = SelectedDate::default();
        self.disabled = self.options.disabled_dates();
        self.state = PickerState::Closed;

        if self.fields.iter().any(|f| f == field_id) {
            log::debug!("datepicker: {} is already bound", field_id);
            return;
        }
        self.surface.attach(Listener::FieldClick {
            field_id: field_id.to_string(),
        });
        self.surface.create_container(&container_id_for(field_id));
        self.fields.push(field_id.to_string());
    }

    pub fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::FieldClicked { field_id } => self.show(&field_id),
            UiEvent::PopupClicked => {
                self.transition(PickerEvent::PopupClicked);
            }
            UiEvent::DayClicked(cell) => self.select(cell),
            UiEvent::ArrowClicked(direction) => self.change_month(direction),
            UiEvent::MonthSelected(value) => {
                let month = value
                    .trim()
                    .parse()
                    .ok()
                    .or_else(|| month_from_short_name(&value));
                match month {
                    Some(month) => self.calendar_update(Some(month), None),
                    None => log::warn!("datepicker: unexpected month option {:?}", value),
                }
            }
            UiEvent::YearSelected(value) => match value.trim().parse() {
                Ok(year) => self.calendar_update(None, Some(year)),
                Err(_) => log::warn!("datepicker: unexpected year option {:?}", value),
            },
            UiEvent::DocumentClicked { x, y } => {
                let inside = self
                    .container_id
                    .as_deref()
                    .and_then(|id| self.surface.calendar_rect(id))
                    .is_some_and(|rect| rect.contains(x, y));
                let effect = self.transition(PickerEvent::OutsideClick { inside });
                self.perform(effect);
            }
            UiEvent::KeyDown => {
                let effect = self.transition(PickerEvent::KeyDown);
                self.perform(effect);
            }
        }
    }

    /// Opens the popup under `field_id`.
    pub fn show(&mut self, field_id: &str) {
        if self.state.is_open() && self.field_id.as_deref() != Some(field_id) {
            self.tear_down();
            self.state = PickerState::Closed;
        }
        self.field_id = Some(field_id.to_string());
        self.container_id = Some(container_id_for(field_id));

        let effect = self.transition(PickerEvent::FieldClicked);
        self.perform(effect);
        self.place();
    }

    /// Closes the popup, unless a click inside it is still being handled.
    ///
    /// Right after navigation the popup stays open and the field gets focus back.
    pub fn hide(&mut self) {
        let effect = self.transition(PickerEvent::Hide);
        self.perform(effect);
    }

    /// Replaces the disabled days, re-rendering an open popup.
    pub fn disable<I: IntoIterator<Item = NaiveDate>>(&mut self, dates: I) {
        self.disabled = dates.into_iter().collect();
        if self.state.is_open() {
            self.perform(Effect::Rerender);
        }
    }

    /// Closes the popup and unbinds every field, removing their containers.
    pub fn dispose(&mut self) {
        if self.state.is_open() {
            self.tear_down();
            self.state = PickerState::Closed;
        }
        for field_id in std::mem::take(&mut self.fields) {
            self.surface.detach(&Listener::FieldClick {
                field_id: field_id.clone(),
            });
            self.surface.remove_container(&container_id_for(&field_id));
        }
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn selected(&self) -> &SelectedDate {
        &self.selected
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn field_id(&self) -> Option<&str> {
        self.field_id.as_deref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn transition(&mut self, event: PickerEvent) -> Effect {
        let (next, effect) = self.state.transition(event);
        log::trace!(
            "datepicker: {:?} --{:?}--> {:?} ({:?})",
            self.state,
            event,
            next,
            effect
        );
        self.state = next;
        effect
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::None | Effect::Commit => {}
            Effect::Build => self.build(),
            Effect::Rerender => self.rerender(),
            Effect::Refocus => {
                if let Some(field_id) = self.field_id.clone() {
                    self.surface.focus_field(&field_id);
                }
            }
            Effect::TearDown => self.tear_down(),
        }
    }

    fn build(&mut self) {
        let (Some(field_id), Some(container_id)) = (self.field_id.clone(), self.container_id.clone())
        else {
            return;
        };

        if !self.surface.has_calendar(&container_id) {
            let today = (self.today)();
            let value = self
                .surface
                .field_value(&field_id)
                .filter(|v| !v.trim().is_empty());
            self.selected = SelectedDate::from_field(value.as_deref(), today);

            let markup = self.markup(today);
            self.surface.mount_calendar(&container_id, &markup);
            self.surface.attach(Listener::Calendar { container_id });
        }

        self.surface.attach(Listener::Document);
    }

    fn place(&mut self) {
        let (Some(field_id), Some(container_id)) = (self.field_id.as_deref(), self.container_id.as_deref())
        else {
            return;
        };
        let Some(rect) = self.surface.bounding_rect(field_id) else {
            log::warn!("datepicker: field {} has no layout, popup not placed", field_id);
            return;
        };
        let placement = Placement {
            top: rect.bottom - self.options.vertical_offset,
            left: rect.left,
            z_index: self.options.z_index,
        };
        let container_id = container_id.to_string();
        self.surface.place(&container_id, placement);
    }

    fn select(&mut self, cell: Option<DayCell>) {
        if self.transition(PickerEvent::DayPicked) != Effect::Commit {
            return;
        }

        match (cell, self.field_id.clone()) {
            (Some(cell), Some(field_id)) => {
                let value = self.selected.pick(cell.day, cell.month, cell.year);
                self.surface.set_field_value(&field_id, &value);
                self.surface.focus_field(&field_id);
                self.surface
                    .blur_field_later(&field_id, self.options.blur_delay_ms);
            }
            (None, _) => log::debug!("datepicker: clicked day cell carries no date"),
            _ => {}
        }

        self.hide();
    }

    fn change_month(&mut self, direction: Direction) {
        if self.transition(PickerEvent::Navigated) == Effect::Rerender {
            self.selected.step(direction);
            self.perform(Effect::Rerender);
        }
    }

    fn calendar_update(&mut self, month: Option<u32>, year: Option<i32>) {
        if self.transition(PickerEvent::Navigated) != Effect::Rerender {
            return;
        }
        if let Some(month) = month {
            self.selected.set_month(month);
        }
        if let Some(year) = year {
            self.selected.set_year(year);
        }
        self.perform(Effect::Rerender);
    }

    /// Calendar nodes are replaced, so their listeners go with them.
    fn rerender(&mut self) {
        let Some(container_id) = self.container_id.clone() else {
            return;
        };
        let listener = Listener::Calendar {
            container_id: container_id.clone(),
        };
        self.surface.detach(&listener);
        let markup = self.markup((self.today)());
        self.surface.update_calendar(&container_id, &markup);
        self.surface.attach(listener);
    }

    fn tear_down(&mut self) {
        if let Some(container_id) = self.container_id.take() {
            self.surface.detach(&Listener::Calendar {
                container_id: container_id.clone(),
            });
            self.surface.clear_container(&container_id);
        }
        self.surface.detach(&Listener::Document);
        self.field_id = None;
    }

    fn markup(&self, today: NaiveDate) -> String {
        Calendar {
            selected: &self.selected,
            current_year: today.year(),
            options: &self.options,
            disabled: &self.disabled,
        }
        .render()
    }
}
