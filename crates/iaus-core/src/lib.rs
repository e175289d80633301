//! Infinite Axis Utility System: utility-based action selection.
//!
//! Every decision tick an agent's [`Selector`] scores its candidate actions
//! and returns the single best one. Scoring is layered:
//!
//! ```text
//! Selector::find_next ──▶ Action::score ──▶ Consideration::calculate ──▶ ResponseCurve::compute
//!   sort by category        category + bonus     raw domain value          normalize into [0, 1]
//!   momentum bonus          × compensated        (ratio, distance, ...)
//!   pick best score           consideration scores
//! ```
//!
//! # Modules
//!
//! - [`curve`]: Response curve families, sanitizing and presets
//! - [`consideration`]: The consideration trait and ready-made considerations
//! - [`action`]: Priority categories, action profiles and compensated scoring
//! - [`action_set`]: Named groups of actions
//! - [`selector`]: Per-agent selection with pruning and momentum
//! - [`config`]: TOML configuration for momentum and named curves

pub mod action;
pub mod action_set;
pub mod config;
pub mod consideration;
pub mod curve;
pub mod selector;

// Re-export curve types
pub use curve::{presets, sanitize, CurveType, ParseCurveTypeError, ResponseCurve};

// Re-export consideration types
pub use consideration::{Consideration, FnConsideration, RatioConsideration};

// Re-export action types
pub use action::{
    compare_priority, Action, ActionIdentity, ActionKind, ActionProfile, Category, FnAction,
    InvalidCategory,
};
pub use action_set::ActionSet;

// Re-export selection types
pub use selector::{SelectError, Selector, DEFAULT_MOMENTUM_BONUS};

// Re-export config types
pub use config::{
    default_config_toml, ConfigError, EngineConfig, SelectorConfig, TomlSerializeError,
};
