use crate::error::{Result, XtringError};
use regex::Regex;

const NEGATION_MARKER: &str = r"\(!!([^)]*)\)";

/// A find pattern with negated groups.
///
/// Every `(!!expr)` group is matched as `(.*)`, and the text it captures must
/// not match `expr` in full. Negations are paired with regions from the back:
/// the last region against the last negation, and so on.
#[derive(Debug, Clone)]
pub struct NegatedPattern {
    positive: String,
    negations: Vec<Regex>,
}

impl NegatedPattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let marker = Regex::new(NEGATION_MARKER)
            .map_err(|e| XtringError::invalid_pattern(NEGATION_MARKER, e))?;

        let negations = marker
            .captures_iter(pattern)
            .map(|caps| {
                let expr = &caps[1];
                Regex::new(&format!("^(?:{expr})$"))
                    .map_err(|e| XtringError::invalid_pattern(expr, e))
            })
            .collect::<Result<Vec<_>>>()?;

        let positive = marker.replace_all(pattern, "(.*)").into_owned();

        Ok(Self {
            positive,
            negations,
        })
    }

    /// The pattern with every negated group rewritten to `(.*)`.
    pub fn positive(&self) -> &str {
        &self.positive
    }

    pub fn has_negations(&self) -> bool {
        !self.negations.is_empty()
    }

    /// Whether `text` is acceptable for the region `from_end` places before
    /// the last one. Regions without a paired negation always pass.
    pub fn allows(&self, from_end: usize, text: &str) -> bool {
        match self.negations.len().checked_sub(from_end + 1) {
            Some(index) => !self.negations[index].is_match(text),
            None => true,
        }
    }
}
