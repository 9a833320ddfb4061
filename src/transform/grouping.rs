//! Row grouping fold state.
//!
//! Rows sharing a key (the legacy id column) are one group. The state is owned
//! by one file transformation and threaded through its row loop; nothing about
//! the previous row lives anywhere else.

use std::collections::HashSet;
use std::mem;

use crate::data::Fact;
use crate::hash::stable_hash_str;
use crate::stamp::Stamp;
use crate::types::GroupKey;

/// Position of a row relative to its group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// First row of a new group.
    Start,
    /// Another row of the group opened by an earlier row.
    Continue,
}

/// A key reappeared after its group had already closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReopenedGroup(pub GroupKey);

/// Facts computed for one row, held until the row's group closes.
#[derive(Clone, Debug)]
pub struct PendingRow {
    /// 1-based line.
    pub line: usize,
    /// Stamp of the row's session.
    pub stamp: Stamp,
    /// Facts to compose in that session.
    pub facts: Vec<Fact>,
}

/// Fold state for one file: previous key, group accumulator, pending rows.
pub struct GroupState<G> {
    previous: Option<GroupKey>,
    current: Option<G>,
    pending: Vec<PendingRow>,
    closed: Option<HashSet<u64>>,
    groups: usize,
}

impl<G> GroupState<G> {
    /// Fresh state. With `validate_order`, closed keys are remembered by hash
    /// and a reappearing key is reported.
    ///
    /// The closed set holds one `u64` per group for the whole file, so memory
    /// grows with the group count. Keys are compared by 64-bit hash only: two
    /// distinct keys that collide report a false [`ReopenedGroup`]. Pass
    /// `false` to skip both.
    pub fn new(validate_order: bool) -> Self {
        Self {
            previous: None,
            current: None,
            pending: Vec::new(),
            closed: validate_order.then(HashSet::new),
            groups: 0,
        }
    }

    /// Classify the row carrying `key` and update the previous key.
    ///
    /// On `Start` the accumulator of the prior group is cleared; the caller
    /// must flush the pending rows before opening the next group.
    pub fn observe(&mut self, key: &str) -> Result<Boundary, ReopenedGroup> {
        if self.previous.as_deref() == Some(key) {
            return Ok(Boundary::Continue);
        }
        if let Some(closed) = self.closed.as_mut() {
            if closed.contains(&stable_hash_str(key)) {
                return Err(ReopenedGroup(key.to_string()));
            }
            if let Some(previous) = self.previous.as_deref() {
                closed.insert(stable_hash_str(previous));
            }
        }
        self.previous = Some(key.to_string());
        self.current = None;
        self.groups += 1;
        Ok(Boundary::Start)
    }

    /// Install the accumulator of the group that just started.
    pub fn open(&mut self, group: G) {
        self.current = Some(group);
    }

    /// Accumulator of the open group.
    pub fn current(&self) -> Option<&G> {
        self.current.as_ref()
    }

    /// Hold `row` until the group closes.
    pub fn push(&mut self, row: PendingRow) {
        self.pending.push(row);
    }

    /// Remove and return the rows of the open group.
    pub fn take_pending(&mut self) -> Vec<PendingRow> {
        mem::take(&mut self.pending)
    }

    /// Number of groups started so far.
    pub fn groups(&self) -> usize {
        self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_equal_keys_continue_a_group() {
        let mut state: GroupState<()> = GroupState::new(true);
        let boundaries: Vec<Boundary> = ["100", "100", "200"]
            .into_iter()
            .map(|key| state.observe(key).unwrap())
            .collect();
        assert_eq!(
            boundaries,
            vec![Boundary::Start, Boundary::Continue, Boundary::Start]
        );
        assert_eq!(state.groups(), 2);
    }

    #[test]
    fn reopened_keys_are_reported_when_validating() {
        let mut state: GroupState<()> = GroupState::new(true);
        state.observe("100").unwrap();
        state.observe("200").unwrap();
        assert_eq!(
            state.observe("100"),
            Err(ReopenedGroup("100".to_string()))
        );
    }

    #[test]
    fn reopened_keys_start_new_groups_without_validation() {
        let mut state: GroupState<()> = GroupState::new(false);
        for key in ["100", "200", "100"] {
            assert_eq!(state.observe(key), Ok(Boundary::Start));
        }
        assert_eq!(state.groups(), 3);
    }

    #[test]
    fn closed_keys_are_kept_only_when_validating() {
        let mut validating: GroupState<()> = GroupState::new(true);
        let mut plain: GroupState<()> = GroupState::new(false);
        for key in ["1", "1", "2", "3", "4"] {
            validating.observe(key).unwrap();
            plain.observe(key).unwrap();
        }
        // The open group "4" is not in the closed set yet.
        assert_eq!(validating.closed.as_ref().map(HashSet::len), Some(3));
        assert!(plain.closed.is_none());
    }

    #[test]
    fn start_clears_the_accumulator() {
        let mut state = GroupState::new(true);
        state.observe("1").unwrap();
        state.open(7_u32);
        assert_eq!(state.current(), Some(&7));
        state.observe("1").unwrap();
        assert_eq!(state.current(), Some(&7));
        state.observe("2").unwrap();
        assert_eq!(state.current(), None);
    }
}
