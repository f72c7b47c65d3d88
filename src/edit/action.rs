use super::transform::Transformation;
use crate::buffer::TextBuffer;
use crate::error::Result;

/// Built-in edit policies.
///
/// Each policy has a point form, used for insertions at a single offset, and
/// a span form, used for everything that touches a `start..end` range. A
/// policy ignores the form it has no use for. A `None` payload is a no-op.
#[derive(Debug)]
pub enum EditAction {
    Delete,
    InsertAt(Option<String>),
    /// Inserts `before` at the span start and `after` at the span end.
    /// Empty spans are left alone.
    InsertAround {
        before: Option<String>,
        after: Option<String>,
    },
    Replace(Option<String>),
    Transform(Transformation),
    /// Swaps the contents of every two consecutive spans visited.
    Swap,
}

/// Per-invocation memory of the edits already made.
///
/// One state lives for exactly one walk and is handed to every edit of that
/// walk; starting a new pattern run starts from a fresh state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditState {
    last_span: Option<(usize, usize)>,
    pending_swap: Option<(usize, usize)>,
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The span of an unpaired swap, if any.
    pub fn pending_swap(&self) -> Option<(usize, usize)> {
        self.pending_swap
    }
}

impl EditAction {
    pub fn execute_at(&self, buffer: &mut TextBuffer, offset: usize) -> Result<()> {
        match self {
            EditAction::InsertAt(Some(text)) => buffer.insert(offset, text),
            _ => Ok(()),
        }
    }

    pub fn execute_span(
        &self,
        buffer: &mut TextBuffer,
        state: &mut EditState,
        start: usize,
        end: usize,
    ) -> Result<()> {
        match self {
            EditAction::Delete => buffer.delete(start, end),
            EditAction::InsertAt(_) | EditAction::Replace(None) => Ok(()),
            EditAction::InsertAround { before, after } => {
                if start == end || (before.is_none() && after.is_none()) {
                    return Ok(());
                }
                buffer.insert(end, after.as_deref().unwrap_or(""))?;
                buffer.insert(start, before.as_deref().unwrap_or(""))
            }
            EditAction::Replace(Some(text)) => buffer.replace(start, end, text),
            EditAction::Transform(transformation) => {
                let current = buffer.substring(start, end)?;
                buffer.replace(start, end, &transformation.apply(&current))
            }
            EditAction::Swap => match state.pending_swap.take() {
                None => {
                    state.pending_swap = Some((start, end));
                    Ok(())
                }
                // The pending span lies after this one, so rewriting it first
                // leaves `start..end` where it was.
                Some((there_start, there_end)) => {
                    let here = buffer.substring(start, end)?;
                    let there = buffer.substring(there_start, there_end)?;
                    buffer.replace(there_start, there_end, &here)?;
                    buffer.replace(start, end, &there)
                }
            },
        }
    }

    /// Runs the point form at `from`, then the span form over the ordered
    /// pair, unless that exact span was the last one handed to this state.
    ///
    /// The repeat check is what keeps `around` from editing the seam between
    /// two matches twice: the seam is the "after" of one match and the
    /// "before" of the next, and both arrive back to back.
    pub fn execute_from_to(
        &self,
        buffer: &mut TextBuffer,
        state: &mut EditState,
        from: usize,
        to: usize,
    ) -> Result<()> {
        let span = (from.min(to), from.max(to));

        self.execute_at(buffer, from)?;

        if state.last_span == Some(span) {
            log::trace!("span {}..{} already edited, skipping", span.0, span.1);
        } else {
            self.execute_span(buffer, state, span.0, span.1)?;
        }

        state.last_span = Some(span);
        Ok(())
    }
}
