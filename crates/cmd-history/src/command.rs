#![forbid(unsafe_code)]

//! Reversible command contract.
//!
//! A [`Command`] encodes one mutation of a target as a pair of in-place
//! operations: [`forward`](Command::forward) applies it and
//! [`backward`](Command::backward) applies its exact inverse.
//!
//! # Invariants
//!
//! - `forward` followed by `backward` restores the target's relevant fields
//!   exactly, provided nothing else touched them in between.
//! - Both operations are total. Validation and clamping happen before the
//!   command is built, never inside it.
//! - Commands carry deltas, not snapshots, so their size does not depend on
//!   the size of the target.
//!
//! # Variants
//!
//! When the set of mutations is known, model it as an `enum` and implement
//! [`Command`] once for the enum. When it must stay open, record
//! `Box<dyn Command<T>>`, which implements [`Command`] by delegation.

use std::fmt;

/// A reversible mutation of a target of type `T`.
pub trait Command<T: ?Sized> {
    /// Apply the mutation to `target` in place.
    fn forward(&self, target: &mut T);

    /// Apply the exact inverse of [`forward`](Command::forward) to `target`.
    fn backward(&self, target: &mut T);
}

/// Human-readable label for a command, used by history listings and HUDs.
pub trait Describe {
    /// Short description (e.g., "Move").
    fn description(&self) -> &str;
}

impl<T: ?Sized, C: Command<T> + ?Sized> Command<T> for Box<C> {
    fn forward(&self, target: &mut T) {
        (**self).forward(target);
    }

    fn backward(&self, target: &mut T) {
        (**self).backward(target);
    }
}

impl<D: Describe + ?Sized> Describe for Box<D> {
    fn description(&self) -> &str {
        (**self).description()
    }
}

impl<T: ?Sized> fmt::Debug for dyn Command<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn Command")
    }
}

/// A group of commands recorded as a single history entry.
///
/// Children run in insertion order on [`forward`](Command::forward) and in
/// reverse order on [`backward`](Command::backward), so the batch is an exact
/// inverse whenever every child is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBatch<C> {
    /// Commands in execution order.
    commands: Vec<C>,
    /// Label shown in history listings.
    description: String,
}

impl<C> CommandBatch<C> {
    /// Create an empty batch with the given label.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            commands: Vec::new(),
            description: description.into(),
        }
    }

    /// Append a command to the batch.
    pub fn push(&mut self, command: C) {
        self.commands.push(command);
    }

    /// Builder form of [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, command: C) -> Self {
        self.commands.push(command);
        self
    }

    /// Number of commands in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the children in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.commands.iter()
    }
}

impl<C> FromIterator<C> for CommandBatch<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
            description: "Batch".to_string(),
        }
    }
}

impl<T: ?Sized, C: Command<T>> Command<T> for CommandBatch<C> {
    fn forward(&self, target: &mut T) {
        for command in &self.commands {
            command.forward(target);
        }
    }

    fn backward(&self, target: &mut T) {
        for command in self.commands.iter().rev() {
            command.backward(target);
        }
    }
}

impl<C> Describe for CommandBatch<C> {
    fn description(&self) -> &str {
        &self.description
    }
}
