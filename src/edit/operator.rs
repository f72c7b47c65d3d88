use super::action::{EditAction, EditState};
use crate::buffer::TextBuffer;
use crate::error::Result;
use crate::matching::collect;
use crate::walker::{Neighborhood, walk};
use regex::Regex;

/// Which spans around each match an edit is applied to.
///
/// | Operator                 | Edited span(s)                                           |
/// |--------------------------|----------------------------------------------------------|
/// | `After`                  | `match_end..next_start`                                  |
/// | `Before`                 | `previous_end..match_start`                              |
/// | `Inside`, `OnMatches`    | `match_start..match_end`                                 |
/// | `Around`, `OnNoMatches`  | `match_end..next_start`, then `previous_end..match_start` |
///
/// `InsertAround` is the exception: `Around` wraps the match itself, so
/// `insert("(", ")").around(..)` brackets every match. Use `OnNoMatches` to
/// bracket the text between matches instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    After,
    Before,
    Around,
    Inside,
    OnMatches,
    OnNoMatches,
}

impl Operator {
    fn resolve(self, action: &EditAction) -> Operator {
        match (action, self) {
            (EditAction::InsertAround { .. }, Operator::Around) => Operator::Inside,
            (_, operator) => operator,
        }
    }

    fn edit(
        self,
        action: &EditAction,
        buffer: &mut TextBuffer,
        state: &mut EditState,
        hood: &Neighborhood,
    ) -> Result<()> {
        match self {
            Operator::After => {
                action.execute_from_to(buffer, state, hood.match_end, hood.next_start)
            }
            Operator::Before => {
                action.execute_from_to(buffer, state, hood.match_start, hood.previous_end)
            }
            Operator::Inside | Operator::OnMatches => {
                action.execute_from_to(buffer, state, hood.match_start, hood.match_end)
            }
            Operator::Around | Operator::OnNoMatches => {
                action.execute_from_to(buffer, state, hood.match_end, hood.next_start)?;
                action.execute_from_to(buffer, state, hood.match_start, hood.previous_end)
            }
        }
    }
}

/// Applies `action` at `operator` for every region of `pattern` in
/// `snapshot` and returns the edited text.
pub fn apply(
    snapshot: &str,
    pattern: &Regex,
    action: &EditAction,
    operator: Operator,
) -> Result<String> {
    let operator = operator.resolve(action);
    let regions = collect(snapshot, pattern);
    log::debug!(
        "{action:?} {operator:?} `{}` over {} region(s)",
        pattern.as_str(),
        regions.len()
    );

    let mut state = EditState::new();
    let mut edit = |buffer: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
        operator.edit(action, buffer, &mut state, hood)
    };

    walk(snapshot, &regions, &mut edit)
}
