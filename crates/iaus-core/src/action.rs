//! Actions: candidate decisions and their scoring.
//!
//! An action bundles a priority [`Category`] with an ordered list of
//! considerations. Its score starts at the category weight (plus any
//! momentum bonus) and is multiplied by each compensated consideration
//! score in turn.

use serde::{Deserialize, Serialize};
use std::any::{type_name, Any, TypeId};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

use crate::consideration::Consideration;

/// Priority tier of an action. Higher tiers win ties and score higher.
///
/// The numeric value doubles as the base score weight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Normal priority
    #[default]
    Idle = 1,
    /// Eating, sleeping, and other needs that can wait until it is safe
    Survival = 2,
    /// Combat or dangerous situations that are not emergencies
    Combat = 3,
    /// Must be dealt with immediately (on fire, trapped)
    Emergency = 4,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Idle,
        Category::Survival,
        Category::Combat,
        Category::Emergency,
    ];

    /// Base score contributed by this tier.
    pub fn weight(self) -> f64 {
        f64::from(self as u8)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Idle => "idle",
            Category::Survival => "survival",
            Category::Combat => "combat",
            Category::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for category values outside 1..=4 or unrecognized names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCategory {
    #[error("invalid category value {0} (expected 1..=4)")]
    Value(u8),
    #[error("unknown category '{0}' (expected idle, survival, combat or emergency)")]
    Name(String),
}

impl TryFrom<u8> for Category {
    type Error = InvalidCategory;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Category::ALL
            .into_iter()
            .find(|c| *c as u8 == value)
            .ok_or(InvalidCategory::Value(value))
    }
}

impl FromStr for Category {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InvalidCategory::Name(s.to_string()))
    }
}

/// Identity of an action's concrete type.
///
/// Momentum is granted per kind: every instance of the type that won the
/// previous tick receives the bonus.
#[derive(Clone, Copy)]
pub struct ActionKind {
    id: TypeId,
    name: &'static str,
}

impl ActionKind {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Full type name, for logging.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ActionKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ActionKind {}

impl Hash for ActionKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActionKind").field(&self.name).finish()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Reports the concrete kind behind an action, including through `dyn Action`.
///
/// Implemented automatically for every [`Action`].
pub trait ActionIdentity {
    fn action_kind(&self) -> ActionKind;
}

impl<T: Action + 'static> ActionIdentity for T {
    fn action_kind(&self) -> ActionKind {
        ActionKind::of::<T>()
    }
}

/// Data shared by every action: name, description, tier and considerations.
///
/// Considerations are kept in insertion order; scoring visits them in that
/// order, so put the cheapest or most decisive ones first to prune early.
pub struct ActionProfile {
    name: String,
    description: String,
    category: Category,
    considerations: Vec<Box<dyn Consideration>>,
}

impl ActionProfile {
    /// Creates an [`Category::Idle`] profile with no considerations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: Category::default(),
            considerations: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_consideration(mut self, consideration: impl Consideration + 'static) -> Self {
        self.considerations.push(Box::new(consideration));
        self
    }

    /// Appends a consideration after the existing ones.
    pub fn push_consideration(&mut self, consideration: Box<dyn Consideration>) {
        self.considerations.push(consideration);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn considerations(&self) -> &[Box<dyn Consideration>] {
        &self.considerations
    }

    /// Scores the profile.
    ///
    /// Starts from `category weight + bonus` and multiplies in every
    /// consideration, each boosted by the compensation factor
    /// `1 - 1/n` so that many factors do not drag the product toward zero.
    ///
    /// As soon as the running product drops below `prune_threshold` the
    /// partial product is returned without evaluating the remaining
    /// considerations.
    ///
    /// A profile without considerations scores `category weight + bonus`.
    pub fn score(&self, bonus: f64, prune_threshold: f64) -> f64 {
        let mut final_score = self.category.weight() + bonus;

        // Only consumed inside the loop, so an empty list never sees 1/0.
        let compensation = 1.0 - 1.0 / self.considerations.len() as f64;

        for consideration in &self.considerations {
            let mut score = consideration.calculate();
            let modification = (1.0 - score) * compensation;
            score += modification * score;

            final_score *= score;

            if final_score < prune_threshold {
                tracing::trace!(
                    action = %self.name,
                    consideration = consideration.name(),
                    partial = final_score,
                    threshold = prune_threshold,
                    "pruned"
                );
                break;
            }
        }

        final_score
    }
}

impl fmt::Debug for ActionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionProfile")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("considerations", &self.considerations)
            .finish()
    }
}

/// A candidate decision.
///
/// Implementors hold an [`ActionProfile`] and define what happens when the
/// action is chosen. Everything else has a default built on the profile.
pub trait Action: ActionIdentity {
    fn profile(&self) -> &ActionProfile;

    /// Mutable access to the profile, for appending considerations to an
    /// action that is already boxed.
    fn profile_mut(&mut self) -> &mut ActionProfile;

    /// Called by the owner after the action has been selected.
    fn run(&mut self);

    fn name(&self) -> &str {
        self.profile().name()
    }

    fn description(&self) -> &str {
        self.profile().description()
    }

    fn category(&self) -> Category {
        self.profile().category()
    }

    fn considerations(&self) -> &[Box<dyn Consideration>] {
        self.profile().considerations()
    }

    /// See [`ActionProfile::score`].
    fn score(&self, bonus: f64, prune_threshold: f64) -> f64 {
        self.profile().score(bonus, prune_threshold)
    }
}

impl fmt::Debug for dyn Action + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("kind", &self.action_kind())
            .field("profile", self.profile())
            .finish()
    }
}

/// Orders actions by category alone; equal categories compare equal.
///
/// This is only a partial ranking. Sort with a stable sort so that actions
/// of the same category keep their relative input order.
pub fn compare_priority(a: &dyn Action, b: &dyn Action) -> Ordering {
    a.category().cmp(&b.category())
}

/// An action whose `run` is a closure.
///
/// Each closure has its own type, so two `FnAction`s built from different
/// closures are different kinds for momentum purposes.
pub struct FnAction<F> {
    profile: ActionProfile,
    on_run: F,
}

impl<F> FnAction<F>
where
    F: FnMut(),
{
    pub fn new(profile: ActionProfile, on_run: F) -> Self {
        Self { profile, on_run }
    }
}

impl<F> Action for FnAction<F>
where
    F: FnMut() + 'static,
{
    fn profile(&self) -> &ActionProfile {
        &self.profile
    }

    fn profile_mut(&mut self) -> &mut ActionProfile {
        &mut self.profile
    }

    fn run(&mut self) {
        (self.on_run)();
    }
}
