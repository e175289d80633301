//! Per-agent action selection.
//!
//! Each decision tick the selector:
//! 1. Stable-sorts the actions ascending by category
//! 2. Scores each one, passing the best score so far as the pruning threshold
//!    and a momentum bonus if it is the same kind as last tick's winner
//! 3. Keeps the highest positive score; ties go to the later action, which
//!    after the sort means the higher (or equal) category
//! 4. Remembers the winner's kind for the next tick

use thiserror::Error;

use crate::action::{compare_priority, Action, ActionKind};
use crate::action_set::ActionSet;
use crate::config::{ConfigError, SelectorConfig};

/// Bonus added to actions of the kind that won the previous tick.
pub const DEFAULT_MOMENTUM_BONUS: f64 = 1.25;

/// Errors returned by [`Selector::find_next`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// Every candidate scored zero or below. The caller decides the fallback.
    #[error("no valid action among {candidates} candidates")]
    NoValidAction { candidates: usize },
}

/// Chooses the best action for one agent, tick after tick.
///
/// The selector borrows the caller's actions and reorders them in place on
/// every pass. Keep one selector per agent for the agent's lifetime: the
/// only state it carries is the kind of the last winner.
pub struct Selector<'a> {
    actions: &'a mut [Box<dyn Action>],
    last_winner: Option<ActionKind>,
    momentum_bonus: f64,
}

impl<'a> Selector<'a> {
    pub fn new(actions: &'a mut [Box<dyn Action>]) -> Self {
        Self {
            actions,
            last_winner: None,
            momentum_bonus: DEFAULT_MOMENTUM_BONUS,
        }
    }

    /// Selects among the actions of a set.
    pub fn from_set(set: &'a mut ActionSet) -> Self {
        Self::new(set.actions_mut())
    }

    /// Applies selection settings, rejecting an invalid momentum bonus.
    pub fn with_config(mut self, config: &SelectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        self.momentum_bonus = config.momentum_bonus;
        Ok(self)
    }

    /// Kind of the action chosen by the last successful pass.
    pub fn last_winner(&self) -> Option<ActionKind> {
        self.last_winner
    }

    pub fn momentum_bonus(&self) -> f64 {
        self.momentum_bonus
    }

    /// The actions in their current (last sorted) order.
    pub fn actions(&self) -> &[Box<dyn Action>] {
        &*self.actions
    }

    /// Runs one selection pass and returns the winning action.
    ///
    /// The sort must stay stable: among equal categories the later action in
    /// input order wins ties, and an unstable sort would change that.
    ///
    /// Scores that are not strictly positive (NaN included) are never
    /// selected. On failure the remembered winner is left untouched.
    pub fn find_next(&mut self) -> Result<&mut dyn Action, SelectError> {
        self.actions.sort_by(|a, b| compare_priority(&**a, &**b));

        let mut best_score = 0.0;
        let mut best_index = None;

        for (index, action) in self.actions.iter().enumerate() {
            let action: &dyn Action = &**action;
            let kind = action.action_kind();

            let bonus = if self.last_winner == Some(kind) {
                self.momentum_bonus
            } else {
                0.0
            };

            let score = action.score(bonus, best_score);
            tracing::debug!(
                action = action.name(),
                category = %action.category(),
                bonus,
                score,
                best = best_score,
                "scored action"
            );

            // Can never win
            if score.is_nan() || score <= 0.0 {
                continue;
            }

            if score < best_score {
                continue;
            }

            best_score = score;
            best_index = Some(index);
        }

        let Some(index) = best_index else {
            tracing::warn!(candidates = self.actions.len(), "no valid action");
            return Err(SelectError::NoValidAction {
                candidates: self.actions.len(),
            });
        };

        let winner: &mut dyn Action = &mut *self.actions[index];
        let kind = winner.action_kind();
        if self.last_winner != Some(kind) {
            tracing::debug!(
                from = ?self.last_winner.map(|k| k.name()),
                to = kind.name(),
                "switching action kind"
            );
        }
        self.last_winner = Some(kind);

        tracing::debug!(action = winner.name(), score = best_score, "selected action");
        Ok(winner)
    }
}

impl std::fmt::Debug for Selector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector")
            .field(
                "actions",
                &self.actions.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .field("last_winner", &self.last_winner)
            .field("momentum_bonus", &self.momentum_bonus)
            .finish()
    }
}
