//! Rule editing commands.
//!
//! Every mutation opens an [`EditSession`] on the dictionary, applies one
//! edit, and closes it, which commits and saves before returning. Positions
//! are 1-based.

use super::helpers::{position_to_index, require_dictionary, rule_listings};
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Rule;
use crate::session::{EditSession, MoveDirection, SystemClock};
use crate::store::{RuleStore, StorageBackend};
use std::time::Duration;

/// Replacement text for an existing rule; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct RuleUpdate {
    pub src: Option<String>,
    pub dst: Option<String>,
}

pub fn list<B: StorageBackend>(store: &RuleStore<B>, name: &str) -> Result<CmdResult> {
    require_dictionary(store, name)?;
    let mut result = CmdResult::default().with_rules(rule_listings(store.rules(name)));
    if result.rules.is_empty() {
        result.add_message(CmdMessage::info(format!("Dictionary '{}' has no rules", name)));
    }
    Ok(result)
}

pub fn add<B: StorageBackend>(store: &mut RuleStore<B>, name: &str, rule: Rule) -> Result<CmdResult> {
    let mut session = open(store, name)?;
    let index = session.add_rule(rule);
    if !session.rules()[index].is_active() {
        log::debug!("rule {} in '{}' added inactive", index + 1, name);
    }
    finish(store, session, format!("Rule {} added to '{}'", index + 1, name))
}

pub fn update<B: StorageBackend>(
    store: &mut RuleStore<B>,
    name: &str,
    position: usize,
    update: RuleUpdate,
) -> Result<CmdResult> {
    let index = position_to_index(name, position)?;
    let mut session = open(store, name)?;
    let mut rule = session
        .rules()
        .get(index)
        .cloned()
        .unwrap_or_default();
    if let Some(src) = update.src {
        rule.src = src;
    }
    if let Some(dst) = update.dst {
        rule.dst = dst;
    }
    session.edit_rule(index, rule)?;
    finish(store, session, format!("Rule {} updated in '{}'", position, name))
}

pub fn remove<B: StorageBackend>(
    store: &mut RuleStore<B>,
    name: &str,
    position: usize,
) -> Result<CmdResult> {
    let index = position_to_index(name, position)?;
    let mut session = open(store, name)?;
    let removed = session.remove_rule(index)?;
    finish(
        store,
        session,
        format!(
            "Rule {} removed from '{}': {} -> {}",
            position, name, removed.src, removed.dst
        ),
    )
}

pub fn move_rule<B: StorageBackend>(
    store: &mut RuleStore<B>,
    name: &str,
    position: usize,
    direction: MoveDirection,
) -> Result<CmdResult> {
    let index = position_to_index(name, position)?;
    let mut session = open(store, name)?;
    if !session.move_rule(index, direction)? {
        let mut result = CmdResult::default().with_rules(rule_listings(session.rules()));
        result.add_message(CmdMessage::warning(format!(
            "Rule {} is already at the {}",
            position,
            match direction {
                MoveDirection::Up => "top",
                MoveDirection::Down => "bottom",
            }
        )));
        return Ok(result);
    }
    let new_position = match direction {
        MoveDirection::Up => position - 1,
        MoveDirection::Down => position + 1,
    };
    finish(
        store,
        session,
        format!("Rule {} moved to position {}", position, new_position),
    )
}

pub fn set_enabled<B: StorageBackend>(
    store: &mut RuleStore<B>,
    name: &str,
    position: usize,
    enabled: bool,
) -> Result<CmdResult> {
    let index = position_to_index(name, position)?;
    let mut session = open(store, name)?;
    session.set_enabled(index, enabled)?;
    let state = if enabled { "enabled" } else { "disabled" };
    finish(store, session, format!("Rule {} {} in '{}'", position, state, name))
}

// One-shot commands commit on close, so no autosave delay is needed.
fn open<B: StorageBackend>(store: &RuleStore<B>, name: &str) -> Result<EditSession<SystemClock>> {
    require_dictionary(store, name)?;
    Ok(EditSession::open(store, name, Duration::ZERO, SystemClock))
}

fn finish<B: StorageBackend>(
    store: &mut RuleStore<B>,
    mut session: EditSession<SystemClock>,
    message: String,
) -> Result<CmdResult> {
    session.close(store)?;
    let mut result = CmdResult::default().with_rules(rule_listings(session.rules()));
    result.add_message(CmdMessage::success(message));
    Ok(result)
}
