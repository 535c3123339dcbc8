//! The component reader: a stateful decoding session over a row source.
//!
//! The first row pulled from the source is the header; it is resolved
//! against the schema registry into column descriptors and result slots.
//! Each subsequent row is decoded into the slots and returned as owned
//! snapshots. Any failure latches the session permanently; clearing the
//! session ([`ComponentReader::clear`]) discards descriptors, slots, and
//! the latch, after which the next row is once again expected to be a
//! header. This is useful when the same stream contains multiple tables
//! of data.

use tracing::{debug, trace, warn};

use crate::component::ComponentValue;
use crate::descriptor::DescriptorSet;
use crate::error::DecodeError;
use crate::schema::SchemaRegistry;
use crate::source::RowSource;
use crate::value::{CoerceFailure, FieldValue};

/// One header-to-clear cycle of the session.
#[derive(Debug)]
enum SessionState {
    /// Initial; the next row read is resolved as a header.
    AwaitingHeader,
    /// Descriptors built; data rows decode against them.
    Ready(DescriptorSet),
    /// Terminal until cleared; the latched condition replays on every
    /// read without touching the source.
    Failed(Latch),
}

#[derive(Debug, Clone)]
enum Latch {
    Error(DecodeError),
    EndOfStream,
}

/// Decodes component data from a row source.
///
/// This is thread compatible: safe for non-concurrent use, and callable
/// concurrently when combined with external synchronization.
pub struct ComponentReader<'r, S> {
    source: S,
    registry: &'r SchemaRegistry,
    state: SessionState,
}

impl<'r, S: RowSource> ComponentReader<'r, S> {
    /// Creates a reader over `source` resolving headers against
    /// `registry`. The registry is borrowed for the reader's lifetime and
    /// cannot change underneath a session.
    pub fn new(source: S, registry: &'r SchemaRegistry) -> Self {
        Self {
            source,
            registry,
            state: SessionState::AwaitingHeader,
        }
    }

    /// Reads the next row and returns typed component data.
    ///
    /// The first row after construction or [`clear`](Self::clear) is the
    /// header used to build the column descriptors that direct decoding.
    ///
    /// Returns one snapshot per distinct component named in the header, in
    /// first-seen order. A component with no populated field in this row
    /// still yields its zeroed default instance. The snapshots are owned
    /// copies, safe to retain across subsequent reads.
    ///
    /// Returns `Ok(None)` once the source is exhausted, and keeps
    /// returning it without further reads. When an error is returned it is
    /// latched: every following call returns the same error until
    /// `clear()`. A call never returns both data and an error.
    pub fn read(&mut self) -> Result<Option<Vec<ComponentValue>>, DecodeError> {
        if let SessionState::Failed(latch) = &self.state {
            return match latch {
                Latch::EndOfStream => Ok(None),
                Latch::Error(err) => Err(err.clone()),
            };
        }

        if matches!(self.state, SessionState::AwaitingHeader) {
            match self.read_header() {
                Ok(set) => self.state = SessionState::Ready(set),
                Err(err) => {
                    warn!(error = %err, "header failed; session latched");
                    self.state = SessionState::Failed(Latch::Error(err.clone()));
                    return Err(err);
                }
            }
        }

        let outcome = {
            let SessionState::Ready(set) = &mut self.state else {
                // Failed returned above; AwaitingHeader just became Ready.
                return Ok(None);
            };
            decode_row(&mut self.source, set)
        };

        match outcome {
            Ok(Some(components)) => Ok(Some(components)),
            Ok(None) => {
                trace!("row source exhausted");
                self.state = SessionState::Failed(Latch::EndOfStream);
                Ok(None)
            }
            Err(err) => {
                warn!(error = %err, "row decode failed; session latched");
                self.state = SessionState::Failed(Latch::Error(err.clone()));
                Err(err)
            }
        }
    }

    /// Resets the session so parsing can resume: descriptors and slots are
    /// discarded, the latched condition is cleared, and the next row read
    /// is expected to be a header row. Idempotent.
    pub fn clear(&mut self) {
        debug!("session cleared");
        self.state = SessionState::AwaitingHeader;
    }

    fn read_header(&mut self) -> Result<DescriptorSet, DecodeError> {
        // End of stream before any header is an error, unlike the normal
        // exhaustion signal after decoding has started.
        let row = self
            .source
            .next_row()?
            .ok_or(DecodeError::MissingHeader)?;
        DescriptorSet::from_header(self.registry, &row)
    }
}

/// Decodes one data row into the slot set and snapshots the result.
fn decode_row<S: RowSource>(
    source: &mut S,
    set: &mut DescriptorSet,
) -> Result<Option<Vec<ComponentValue>>, DecodeError> {
    let row = match source.next_row()? {
        Some(row) => row,
        None => return Ok(None),
    };

    for slot in &mut set.slots {
        slot.reset();
    }

    for descriptor in &set.columns {
        // A row shorter than the header leaves the missing columns at
        // their defaults, like the empty-cell rule.
        let Some(cell) = row.get(descriptor.column) else {
            continue;
        };
        if cell.is_empty() {
            continue;
        }

        match FieldValue::coerce(descriptor.ty, cell) {
            Ok(value) => set.slots[descriptor.slot].set_at(descriptor.field_index, value),
            Err(failure) => {
                let layout = set.slots[descriptor.slot].layout();
                let component = layout.name.clone();
                let field = layout.fields[descriptor.field_index].name.clone();
                return Err(match failure {
                    CoerceFailure::Coercion(kind) => DecodeError::Coercion {
                        component,
                        field,
                        kind,
                        cell: cell.clone(),
                    },
                    CoerceFailure::UnsupportedType => {
                        DecodeError::UnsupportedFieldType { component, field }
                    }
                });
            }
        }
    }

    trace!(components = set.slots.len(), "decoded row");

    // Snapshots, never aliases into the reused slot storage.
    Ok(Some(set.slots.clone()))
}
