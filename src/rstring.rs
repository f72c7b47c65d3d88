//! Chainable, owning front end to the transformation engine.
//!
//! ```
//! use xtring::r;
//!
//! let mut text = r("testing the test");
//! text.delete().after("the")?;
//! assert_eq!(text.to_string(), "testing the");
//!
//! let mut text = r("testing the test");
//! text.replace("wabba").around("ing( the )te")?;
//! assert_eq!(text.to_string(), "wabba the wabba");
//! # Ok::<(), xtring::XtringError>(())
//! ```

use crate::config::RcConfig;
use crate::edit::{self, EditAction, Operator, Transformation};
use crate::error::Result;
use regex::Regex;
use std::fmt;

/// Shorthand for [`RString::new`].
pub fn r(text: impl Into<String>) -> RString {
    RString::new(text)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RString {
    text: String,
    config: RcConfig,
}

impl RString {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            config: RcConfig::default(),
        }
    }

    /// Patterns given as strings are compiled with `config`.
    pub fn with_config(text: impl Into<String>, config: RcConfig) -> Self {
        Self {
            text: text.into(),
            config,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Selects an arbitrary edit policy.
    pub fn edit(&mut self, action: EditAction) -> Position<'_> {
        Position { target: self, action }
    }

    pub fn delete(&mut self) -> Position<'_> {
        self.edit(EditAction::Delete)
    }

    pub fn insert(&mut self, text: impl Into<String>) -> Position<'_> {
        self.edit(EditAction::InsertAt(Some(text.into())))
    }

    /// Inserts `before` and `after` on either side of each edited span.
    pub fn insert_pair(
        &mut self,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Position<'_> {
        self.edit(EditAction::InsertAround {
            before: Some(before.into()),
            after: Some(after.into()),
        })
    }

    pub fn replace(&mut self, text: impl Into<String>) -> Position<'_> {
        self.edit(EditAction::Replace(Some(text.into())))
    }

    pub fn transform<F>(&mut self, f: F) -> Position<'_>
    where
        F: Fn(&str) -> String + 'static,
    {
        self.edit(EditAction::Transform(Transformation::custom(f)))
    }

    pub fn to_lower_case(&mut self) -> Position<'_> {
        self.edit(EditAction::Transform(Transformation::Lowercase))
    }

    pub fn to_upper_case(&mut self) -> Position<'_> {
        self.edit(EditAction::Transform(Transformation::Uppercase))
    }

    pub fn capitalize(&mut self) -> Position<'_> {
        self.edit(EditAction::Transform(Transformation::Capitalize))
    }

    pub fn decapitalize(&mut self) -> Position<'_> {
        self.edit(EditAction::Transform(Transformation::Decapitalize))
    }

    /// Swaps every two consecutive edited spans. With an odd number of spans
    /// the first one is left where it is.
    pub fn change_places(&mut self) -> Position<'_> {
        self.edit(EditAction::Swap)
    }

    /// Keeps only the regions of `pattern`, dropping everything around them.
    pub fn extract(&mut self, pattern: &str) -> Result<&mut Self> {
        self.delete().around(pattern)
    }
}

/// An edit policy waiting for a pattern and a position.
///
/// Every method runs one full pass over the text and hands the `RString`
/// back so the next edit can be chained onto the result.
#[derive(Debug)]
pub struct Position<'a> {
    target: &'a mut RString,
    action: EditAction,
}

impl<'a> Position<'a> {
    /// Runs the edit against an already compiled pattern.
    pub fn at(self, pattern: &Regex, operator: Operator) -> Result<&'a mut RString> {
        let edited = edit::apply(&self.target.text, pattern, &self.action, operator)?;
        self.target.text = edited;
        Ok(self.target)
    }

    fn at_str(self, pattern: &str, operator: Operator) -> Result<&'a mut RString> {
        let regex = self.target.config.compile(pattern)?;
        self.at(&regex, operator)
    }

    pub fn after(self, pattern: &str) -> Result<&'a mut RString> {
        self.at_str(pattern, Operator::After)
    }

    pub fn before(self, pattern: &str) -> Result<&'a mut RString> {
        self.at_str(pattern, Operator::Before)
    }

    pub fn around(self, pattern: &str) -> Result<&'a mut RString> {
        self.at_str(pattern, Operator::Around)
    }

    pub fn inside(self, pattern: &str) -> Result<&'a mut RString> {
        self.at_str(pattern, Operator::Inside)
    }

    pub fn on_matches(self, pattern: &str) -> Result<&'a mut RString> {
        self.at_str(pattern, Operator::OnMatches)
    }

    pub fn on_no_matches(self, pattern: &str) -> Result<&'a mut RString> {
        self.at_str(pattern, Operator::OnNoMatches)
    }

    pub fn words(self) -> Result<&'a mut RString> {
        self.on_matches(r"\w+")
    }

    pub fn first_word(self) -> Result<&'a mut RString> {
        self.on_matches(r"^\w+")
    }

    pub fn last_word(self) -> Result<&'a mut RString> {
        self.on_matches(r"\w+$")
    }

    pub fn first_and_last_word(self) -> Result<&'a mut RString> {
        self.on_matches(r"^\w+|\w+$")
    }
}

impl fmt::Display for RString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for RString {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<&str> for RString {
    fn from(text: &str) -> Self {
        RString::new(text)
    }
}

impl From<String> for RString {
    fn from(text: String) -> Self {
        RString::new(text)
    }
}

impl PartialEq<str> for RString {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for RString {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}
