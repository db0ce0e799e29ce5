//! Live search over a rendered outline tree

pub mod controller;
pub mod query;
pub mod session;
pub mod tree;

pub use controller::{ControllerAction, ControllerState, KeyInput, NavDirection, SearchController};
pub use query::{Predicate, Query, SearchMode};
pub use session::{QuickNavMap, SearchOutcome, SearchSession, SearchStats, QUICK_NAV_KEYS};
pub use tree::{
    Evaluation, MatchState, NodeId, OutlineView, TreeMirror, TreeNode, EMPHASIS_CLOSE,
    EMPHASIS_OPEN,
};
