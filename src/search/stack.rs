// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Explicit stack for the branch-and-bound column search.

/// Values tried at each row, in symmetry rank order.
pub const BRANCH_VALUES: [i8; 3] = [0, 1, -1];

/// Index of `value` in [`BRANCH_VALUES`].
#[inline]
pub fn value_index(value: i8) -> usize {
    match value {
        0 => 0,
        1 => 1,
        _ => 2,
    }
}

/// One pending assignment: `row` gets `value`, and `remaining` counts how
/// many zeros, `+1` and `-1` are still to be placed in the rows after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub row: usize,
    pub value: i8,
    pub remaining: [usize; 3],
}

impl Frame {
    /// The frame assigning `BRANCH_VALUES[index]` to the next row, if any of
    /// that value is left.
    pub fn child(&self, index: usize) -> Option<Frame> {
        if self.remaining[index] == 0 {
            return None;
        }
        let mut remaining = self.remaining;
        remaining[index] -= 1;
        Some(Frame {
            row: self.row + 1,
            value: BRANCH_VALUES[index],
            remaining,
        })
    }
}

/// LIFO stack of frames, owned by one worker and reused between parents.
#[derive(Debug, Default)]
pub struct BranchStack {
    frames: Vec<Frame>,
}

impl BranchStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack with room for the frames of a column of length `rows`.
    pub fn with_rows(rows: usize) -> Self {
        Self {
            frames: Vec::with_capacity(3 * rows),
        }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
