//! Search input state machine
//!
//! Routes raw search-box text and key presses to a [`SearchSession`]:
//!
//! ```text
//! Navigating --input--> Searching --Enter (found)--> QuickNav
//!      ^                    |                           |
//!      +------Escape--------+--------any key------------+
//! ```

use std::fmt::Debug;

use super::query::Query;
use super::session::{QuickNavMap, SearchOutcome, SearchSession};
use super::tree::OutlineView;
use crate::util::Throttle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

/// A key press as seen by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Arrow(NavDirection),
    Enter,
    Escape,
}

/// What the host should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerAction<H> {
    None,
    /// Move the selection in the outline
    Navigate(NavDirection),
    /// Reveal the item bound to a quick-nav key
    Jump(H),
    /// The search ended and the view is back to plain labels
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Navigating,
    Searching,
    QuickNav,
}

pub struct SearchController<H> {
    session: Option<SearchSession<H>>,
    quick_nav: Option<QuickNavMap<H>>,
    last_outcome: SearchOutcome,
    throttle: Throttle,
}

impl<H: Copy + Eq + Debug> SearchController<H> {
    pub fn new(nav_throttle_ms: u64) -> Self {
        Self {
            session: None,
            quick_nav: None,
            last_outcome: SearchOutcome::default(),
            throttle: Throttle::from_millis(nav_throttle_ms),
        }
    }

    pub fn state(&self) -> ControllerState {
        match (&self.session, &self.quick_nav) {
            (None, _) => ControllerState::Navigating,
            (Some(_), None) => ControllerState::Searching,
            (Some(_), Some(_)) => ControllerState::QuickNav,
        }
    }

    pub fn last_outcome(&self) -> SearchOutcome {
        self.last_outcome
    }

    pub fn quick_nav(&self) -> Option<&QuickNavMap<H>> {
        self.quick_nav.as_ref()
    }

    /// Handle new search-box text. Empty text stops the search.
    pub fn on_input<V: OutlineView<Handle = H>>(
        &mut self,
        view: &mut V,
        root: H,
        text: &str,
    ) -> Option<SearchOutcome> {
        let Some(query) = Query::parse_input(text) else {
            self.stop(view);
            return None;
        };

        // Typing again drops any assigned jump keys
        self.quick_nav = None;

        let outcome = match self.session.as_mut() {
            Some(session) => session.search(view, root, query),
            None => {
                let (session, outcome) = SearchSession::start(view, root, query);
                self.session = Some(session);
                outcome
            }
        };
        self.last_outcome = outcome;
        Some(outcome)
    }

    pub fn on_key<V: OutlineView<Handle = H>>(
        &mut self,
        view: &mut V,
        key: KeyInput,
    ) -> ControllerAction<H> {
        match self.state() {
            ControllerState::QuickNav => {
                let target = match (key, &self.quick_nav) {
                    (KeyInput::Char(ch), Some(map)) => map.get(ch),
                    _ => None,
                };
                self.stop(view);
                match target {
                    Some(handle) => ControllerAction::Jump(handle),
                    None => ControllerAction::Stopped,
                }
            }
            ControllerState::Searching => match key {
                KeyInput::Enter if self.last_outcome.found_any => {
                    if let Some(session) = self.session.as_mut() {
                        self.quick_nav = Some(session.assign_quick_nav_keys(view));
                    }
                    ControllerAction::None
                }
                KeyInput::Escape => {
                    self.stop(view);
                    ControllerAction::Stopped
                }
                _ => ControllerAction::None,
            },
            ControllerState::Navigating => match key {
                KeyInput::Arrow(direction) if self.throttle.ready() => {
                    ControllerAction::Navigate(direction)
                }
                _ => ControllerAction::None,
            },
        }
    }

    /// Tear down the session, if any
    pub fn stop<V: OutlineView<Handle = H>>(&mut self, view: &mut V) {
        self.quick_nav = None;
        self.last_outcome = SearchOutcome::default();
        if let Some(session) = self.session.take() {
            session.teardown(view);
        }
    }
}
