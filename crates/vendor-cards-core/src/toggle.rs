//! Detail-view toggle.
//!
//! Tracks which single card's detail panel is open on one rendered gallery.
//! Every transition replaces the state in one step, so switching from one
//! card to another never passes through a state with zero or two panels
//! visible. The page scroll lock is derived from the state rather than
//! stored, which ties its release to the transition into `Closed`.

use crate::{Error, Result};
use std::collections::HashSet;
use tracing::debug;
use vendor_cards_types::{ClickTarget, ToggleEvent, ToggleState, VendorId};

/// Observable effect of one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Opened(VendorId),
    Switched { from: VendorId, to: VendorId },
    Closed(VendorId),
    Unchanged,
}

#[derive(Debug, Clone, Default)]
pub struct DetailToggle {
    state: ToggleState,
    rendered: HashSet<VendorId>,
}

impl DetailToggle {
    /// Create a toggle for a page showing `rendered` cards, all panels hidden.
    #[must_use]
    pub fn new<I>(rendered: I) -> Self
    where
        I: IntoIterator<Item = VendorId>,
    {
        Self {
            state: ToggleState::Closed,
            rendered: rendered.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &ToggleState {
        &self.state
    }

    #[must_use]
    pub fn active(&self) -> Option<&VendorId> {
        self.state.active()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, ToggleState::Open(_))
    }

    #[must_use]
    pub fn is_panel_visible(&self, id: &VendorId) -> bool {
        self.active() == Some(id)
    }

    /// Panels currently visible. Never more than one.
    #[must_use]
    pub fn visible_panels(&self) -> impl Iterator<Item = &VendorId> {
        self.active().into_iter()
    }

    /// Background scrolling is locked while any panel is open.
    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.is_open()
    }

    fn check_rendered(&self, id: &VendorId) -> Result<()> {
        if self.rendered.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownCardId(id.clone()))
        }
    }

    /// Show `id`'s panel, hiding any other in the same step.
    ///
    /// An id that is not on the page leaves the state untouched.
    pub fn select_card(&mut self, id: &VendorId) -> Transition {
        if let Err(e) = self.check_rendered(id) {
            debug!("Ignoring card selection: {}", e);
            return Transition::Unchanged;
        }

        let previous = std::mem::replace(&mut self.state, ToggleState::Open(id.clone()));
        match previous {
            ToggleState::Closed => Transition::Opened(id.clone()),
            ToggleState::Open(from) if from == *id => Transition::Unchanged,
            ToggleState::Open(from) => Transition::Switched {
                from,
                to: id.clone(),
            },
        }
    }

    /// Hide every panel. A no-op when already closed.
    pub fn close(&mut self) -> Transition {
        match std::mem::take(&mut self.state) {
            ToggleState::Closed => Transition::Unchanged,
            ToggleState::Open(id) => Transition::Closed(id),
        }
    }

    pub fn dispatch(&mut self, event: &ToggleEvent) -> Transition {
        match event {
            ToggleEvent::SelectCard { id } => self.select_card(id),
            ToggleEvent::Close => self.close(),
        }
    }

    /// Route a click: cards open, the close control and backdrop close, and
    /// clicks inside the panel body do nothing.
    pub fn handle_click(&mut self, target: &ClickTarget) -> Transition {
        match target.to_event() {
            Some(event) => self.dispatch(&event),
            None => Transition::Unchanged,
        }
    }

    /// Replace the set of cards on the page after a re-render. Closes the
    /// open panel if its card is gone.
    pub fn set_rendered<I>(&mut self, rendered: I) -> Transition
    where
        I: IntoIterator<Item = VendorId>,
    {
        self.rendered = rendered.into_iter().collect();
        let vanished = self
            .active()
            .is_some_and(|id| !self.rendered.contains(id));
        if vanished {
            self.close()
        } else {
            Transition::Unchanged
        }
    }
}
