//! # Edit Sessions
//!
//! An [`EditSession`] is the single authoritative edit buffer for one open
//! dictionary. Edits touch only the buffer; [`EditSession::commit`] is the one
//! path from buffer to [`RuleStore`].
//!
//! ## Autosave
//!
//! Every edit (re)schedules a commit at `now + delay`, replacing any earlier
//! pending one. The owner calls [`EditSession::poll`] from its event loop; the
//! commit runs once the deadline has passed.
//!
//! ## Ordering
//!
//! [`EditSession::switch_to`] and [`EditSession::close`] commit immediately,
//! without waiting for the deadline. A switch loads the next dictionary only
//! after the previous buffer has been committed, so the last edit is never lost.
//!
//! A commit needs `&mut self`, so nothing reachable from inside a commit can
//! start another one on the same session.
//!
//! Rule indices are 0-based. Positions reported in [`DictError::RuleNotFound`]
//! are 1-based, as shown to users.

use crate::error::{DictError, Result};
use crate::model::{Rule, RuleStats};
use crate::store::{RuleStore, StorageBackend};
use std::time::{Duration, Instant};

/// Source of the current time for autosave deadlines.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

pub struct EditSession<C: Clock = SystemClock> {
    name: String,
    buffer: Vec<Rule>,
    dirty: bool,
    pending: Option<Instant>,
    delay: Duration,
    clock: C,
}

impl<C: Clock> EditSession<C> {
    /// Open `name`, copying its rules into a fresh buffer.
    pub fn open<B: StorageBackend>(
        store: &RuleStore<B>,
        name: &str,
        delay: Duration,
        clock: C,
    ) -> Self {
        log::debug!("opening dictionary '{}' for editing", name);
        Self {
            name: name.to_string(),
            buffer: store.rules(name).to_vec(),
            dirty: false,
            pending: None,
            delay,
            clock,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.buffer
    }

    pub fn stats(&self) -> RuleStats {
        RuleStats::of(&self.buffer)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Deadline of the scheduled autosave, if any.
    pub fn pending_commit(&self) -> Option<Instant> {
        self.pending
    }

    /// Append a rule, returning its index.
    pub fn add_rule(&mut self, rule: Rule) -> usize {
        self.buffer.push(rule);
        self.touch();
        self.buffer.len() - 1
    }

    pub fn remove_rule(&mut self, index: usize) -> Result<Rule> {
        self.check_index(index)?;
        let removed = self.buffer.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Swap a rule with its neighbour. Returns false, without scheduling a
    /// commit, when the rule is already at that edge.
    pub fn move_rule(&mut self, index: usize, direction: MoveDirection) -> Result<bool> {
        self.check_index(index)?;
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.buffer.len() => index + 1,
            _ => return Ok(false),
        };
        self.buffer.swap(index, target);
        self.touch();
        Ok(true)
    }

    pub fn edit_rule(&mut self, index: usize, rule: Rule) -> Result<()> {
        self.check_index(index)?;
        self.buffer[index] = rule;
        self.touch();
        Ok(())
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        self.check_index(index)?;
        self.buffer[index].enabled = enabled;
        self.touch();
        Ok(())
    }

    /// Commit if the autosave deadline has passed. Returns whether a commit ran.
    pub fn poll<B: StorageBackend>(&mut self, store: &mut RuleStore<B>) -> Result<bool> {
        match self.pending {
            Some(deadline) if self.clock.now() >= deadline => {
                log::debug!("autosave firing for '{}'", self.name);
                self.commit(store)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Write the buffer into the store and persist it.
    ///
    /// Cancels any scheduled autosave. A clean buffer is not written. If the
    /// save fails the store still holds the new rules in memory and the
    /// buffer stays dirty, so a later commit retries.
    pub fn commit<B: StorageBackend>(&mut self, store: &mut RuleStore<B>) -> Result<()> {
        self.pending = None;
        if !self.dirty {
            return Ok(());
        }

        *store.rules_of(&self.name) = self.buffer.clone();
        match store.save() {
            Ok(()) => {
                self.dirty = false;
                log::info!(
                    "committed {} rules to '{}'",
                    self.buffer.len(),
                    self.name
                );
                Ok(())
            }
            Err(e) => {
                log::warn!("commit of '{}' failed: {}", self.name, e);
                Err(e)
            }
        }
    }

    /// Commit the current buffer, then open `name`. A failed commit aborts
    /// the switch and keeps the current buffer.
    pub fn switch_to<B: StorageBackend>(
        &mut self,
        store: &mut RuleStore<B>,
        name: &str,
    ) -> Result<()> {
        self.commit(store)?;
        log::debug!("switching from '{}' to '{}'", self.name, name);
        self.name = name.to_string();
        self.buffer = store.rules(name).to_vec();
        self.dirty = false;
        self.pending = None;
        Ok(())
    }

    /// Commit immediately instead of waiting for the autosave.
    pub fn close<B: StorageBackend>(&mut self, store: &mut RuleStore<B>) -> Result<()> {
        self.commit(store)
    }

    fn touch(&mut self) {
        self.dirty = true;
        let deadline = self.clock.now() + self.delay;
        self.pending = Some(deadline);
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.buffer.len() {
            Ok(())
        } else {
            Err(DictError::RuleNotFound {
                dictionary: self.name.clone(),
                index: index + 1,
            })
        }
    }
}
