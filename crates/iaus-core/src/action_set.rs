//! Named groupings of actions.
//!
//! Sets are typically used for archetypes (guard, shopkeeper, monster) or to
//! package related behaviors together. A set has no behavior of its own; a
//! [`Selector`](crate::Selector) can be built directly on top of one.

use std::fmt;

use crate::action::Action;

/// A named, ordered list of actions.
pub struct ActionSet {
    name: String,
    actions: Vec<Box<dyn Action>>,
}

impl ActionSet {
    pub fn new(name: impl Into<String>, actions: Vec<Box<dyn Action>>) -> Self {
        Self {
            name: name.into(),
            actions,
        }
    }

    /// Creates an empty set to be filled with [`with_action`](Self::with_action).
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn with_action(mut self, action: impl Action + 'static) -> Self {
        self.actions.push(Box::new(action));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actions(&self) -> &[Box<dyn Action>] {
        &self.actions
    }

    /// Mutable access for selection passes, which reorder the actions by
    /// priority.
    pub fn actions_mut(&mut self) -> &mut [Box<dyn Action>] {
        &mut self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Looks up the first action with the given name.
    pub fn get(&self, name: &str) -> Option<&dyn Action> {
        self.actions
            .iter()
            .map(|a| &**a)
            .find(|a| a.name() == name)
    }

    pub fn into_actions(self) -> Vec<Box<dyn Action>> {
        self.actions
    }
}

impl fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSet")
            .field("name", &self.name)
            .field(
                "actions",
                &self.actions.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
