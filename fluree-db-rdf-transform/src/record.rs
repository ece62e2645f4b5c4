//! Row/record iteration controller
//!
//! A [`RecordModel`] is the cursor a node evaluates under. It is created per
//! evaluation pass (by the root call, or derived from the parent for object
//! nodes) and never stored on a node, so a node tree can be evaluated for
//! several rows concurrently.
//!
//! States:
//! - `Idle`: nothing to evaluate
//! - `Row`: a single row
//! - `Record`: a record whose rows are visited on demand
//! - `RecordPerRow`: an object of a record-scoped parent that must be
//!   evaluated once for every row of the parent's record

use std::ops::Range;

/// A group of contiguous rows treated as one logical record
///
/// `[from_row, to_row)` is half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub from_row: usize,
    pub to_row: usize,
}

impl Record {
    pub fn new(from_row: usize, to_row: usize) -> Self {
        Self { from_row, to_row }
    }

    pub fn rows(&self) -> Range<usize> {
        self.from_row..self.to_row
    }

    pub fn is_empty(&self) -> bool {
        self.from_row >= self.to_row
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CursorState {
    #[default]
    Idle,
    Row {
        row: usize,
    },
    Record {
        record: Record,
        cursor: Option<usize>,
    },
    RecordPerRow {
        record: Record,
        cursor: Option<usize>,
    },
}

/// Live cursor for one evaluation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordModel {
    state: CursorState,
}

impl RecordModel {
    /// Cursor for a root evaluation over a single row
    pub fn root_row(row: usize) -> Self {
        Self {
            state: CursorState::Row { row },
        }
    }

    /// Cursor for a root evaluation over a record
    pub fn root_record(record: Record) -> Self {
        Self {
            state: CursorState::Record {
                record,
                cursor: None,
            },
        }
    }

    /// Cursor for an object node evaluated under `parent`
    ///
    /// A parent positioned on a row (row mode, or a record iteration in
    /// progress) hands that row down. A record-scoped parent that is not on a
    /// row hands down its record, to be visited once per row.
    pub fn for_object(parent: &RecordModel) -> Self {
        if let Some(row) = parent.row() {
            return Self::root_row(row);
        }
        match parent.record() {
            Some(record) => Self {
                state: CursorState::RecordPerRow {
                    record,
                    cursor: None,
                },
            },
            None => Self::default(),
        }
    }

    /// True in `Record` and `RecordPerRow` states
    pub fn is_record_mode(&self) -> bool {
        matches!(
            self.state,
            CursorState::Record { .. } | CursorState::RecordPerRow { .. }
        )
    }

    pub fn is_record_per_row(&self) -> bool {
        matches!(self.state, CursorState::RecordPerRow { .. })
    }

    /// True when positioned on a row
    pub fn is_row_mode(&self) -> bool {
        self.row().is_some()
    }

    pub fn is_set(&self) -> bool {
        !matches!(self.state, CursorState::Idle)
    }

    /// Current row, if positioned on one
    pub fn row(&self) -> Option<usize> {
        match self.state {
            CursorState::Idle => None,
            CursorState::Row { row } => Some(row),
            CursorState::Record { cursor, .. } | CursorState::RecordPerRow { cursor, .. } => cursor,
        }
    }

    pub fn record(&self) -> Option<Record> {
        match self.state {
            CursorState::Record { record, .. } | CursorState::RecordPerRow { record, .. } => {
                Some(record)
            }
            _ => None,
        }
    }

    /// Advance to the next row of the record
    ///
    /// The first call positions on `from_row`. Returns `false` (and drops the
    /// position) once `to_row` is reached. Always `false` outside record mode.
    pub fn row_next(&mut self) -> bool {
        match &mut self.state {
            CursorState::Record { record, cursor }
            | CursorState::RecordPerRow { record, cursor } => {
                let next = match *cursor {
                    None => record.from_row,
                    Some(row) => row + 1,
                };
                if next < record.to_row {
                    *cursor = Some(next);
                    true
                } else {
                    *cursor = None;
                    false
                }
            }
            _ => false,
        }
    }

    /// Drop the row position so the record can be visited again
    pub fn row_reset(&mut self) {
        if let CursorState::Record { cursor, .. } | CursorState::RecordPerRow { cursor, .. } =
            &mut self.state
        {
            *cursor = None;
        }
    }

    /// Return to `Idle`
    pub fn clear(&mut self) {
        self.state = CursorState::Idle;
    }
}
