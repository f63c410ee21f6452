//! Popup lifecycle as an explicit state machine.
//!
//! A click inside the popup must not be mistaken for a click outside it. A pick
//! must close the popup even though it is also a click inside. Navigation must
//! keep the popup open. Each case is one row of [`PickerState::transition`].

/// Where the popup is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PickerState {
    #[default]
    Closed,
    /// Shown, nothing clicked inside yet.
    Open,
    /// A click landed inside the popup; keyboard input is left alone.
    Engaged,
    /// Month or year changed since the popup was last settled.
    Navigating,
    /// A day was picked; the next `Hide` tears the popup down.
    JustPicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    FieldClicked,
    PopupClicked,
    DayPicked,
    Navigated,
    OutsideClick { inside: bool },
    KeyDown,
    Hide,
}

/// Work the controller performs after a transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Effect {
    #[default]
    None,
    /// Render the popup if it is not there yet and listen to the document.
    Build,
    /// Replace the calendar markup for the new month.
    Rerender,
    /// Write the picked day into the field.
    Commit,
    /// Give focus back to the field, leave the popup open.
    Refocus,
    /// Detach listeners and empty the container.
    TearDown,
}

impl PickerState {
    pub fn is_open(self) -> bool {
        self != PickerState::Closed
    }

    pub fn transition(self, event: PickerEvent) -> (PickerState, Effect) {
        use Effect as E;
        use PickerEvent as Ev;
        use PickerState as S;

        match (self, event) {
            (_, Ev::FieldClicked) => (S::Open, E::Build),
            (S::Closed, _) => (S::Closed, E::None),

            (S::JustPicked, Ev::OutsideClick { .. } | Ev::KeyDown | Ev::Hide) => {
                (S::Closed, E::TearDown)
            }
            (S::JustPicked, _) => (S::JustPicked, E::None),

            (_, Ev::PopupClicked) => (S::Engaged, E::None),
            (_, Ev::DayPicked) => (S::JustPicked, E::Commit),
            (_, Ev::Navigated) => (S::Navigating, E::Rerender),
            (_, Ev::OutsideClick { inside: true }) => (S::Open, E::None),
            (_, Ev::OutsideClick { inside: false }) => (S::Closed, E::TearDown),

            (S::Engaged, Ev::KeyDown | Ev::Hide) => (S::Engaged, E::None),
            (_, Ev::KeyDown) => (S::Closed, E::TearDown),
            (S::Navigating, Ev::Hide) => (S::Open, E::Refocus),
            (_, Ev::Hide) => (S::Closed, E::TearDown),
        }
    }
}
