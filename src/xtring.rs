//! Immutable front end: bind a pattern, then walk its regions with a custom
//! callback.
//!
//! Callbacks see the regions from the last one to the first. That makes it
//! safe to insert or delete text at any offset from `previous_end` onwards,
//! but anything collected inside a callback arrives in reverse order.

use crate::buffer::TextBuffer;
use crate::config::RcConfig;
use crate::error::Result;
use crate::matching::{MatchRegion, NegatedPattern, collect};
use crate::walker::{Neighborhood, RegionCallback, walk};
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Default)]
pub struct Xtring {
    text: String,
    pattern: Option<Regex>,
    config: RcConfig,
}

impl Xtring {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pattern: None,
            config: RcConfig::default(),
        }
    }

    pub fn with_config(text: impl Into<String>, config: RcConfig) -> Self {
        Self {
            text: text.into(),
            pattern: None,
            config,
        }
    }

    fn derive(&self, text: String) -> Xtring {
        Xtring {
            text,
            pattern: None,
            config: self.config.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Binds `pattern` to a copy of this text. A malformed pattern fails
    /// here, before anything is walked.
    pub fn on(&self, pattern: &str) -> Result<Xtring> {
        let regex = self.config.compile(pattern)?;
        Ok(self.on_regex(regex))
    }

    pub fn on_regex(&self, pattern: Regex) -> Xtring {
        Xtring {
            text: self.text.clone(),
            pattern: Some(pattern),
            config: self.config.clone(),
        }
    }

    /// Regions of the bound pattern; empty when nothing is bound.
    pub fn regions(&self) -> Vec<MatchRegion> {
        match &self.pattern {
            Some(pattern) => collect(&self.text, pattern),
            None => Vec::new(),
        }
    }

    /// Walks every region of the bound pattern, last to first, and returns
    /// the edited text. Without a bound pattern the text comes back as is.
    pub fn run<C>(&self, callback: &mut C) -> Result<Xtring>
    where
        C: RegionCallback + ?Sized,
    {
        let text = walk(&self.text, &self.regions(), callback)?;
        Ok(self.derive(text))
    }

    /// The first region of `pattern`, if any.
    pub fn find(&self, pattern: &str) -> Result<Option<Xtring>> {
        Ok(self.find_all(pattern)?.into_iter().next())
    }

    /// Every region of `pattern` in source order.
    ///
    /// A `(!!expr)` group matches like `(.*)` but rejects text that matches
    /// `expr` in full; a single rejected region empties the whole result.
    pub fn find_all(&self, pattern: &str) -> Result<Vec<Xtring>> {
        let negated = NegatedPattern::parse(pattern)?;
        let bound = self.on(negated.positive())?;

        let mut found = Vec::new();
        let mut rejected = false;
        let mut gather = |buffer: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
            if rejected {
                return Ok(());
            }
            let text = buffer.substring(hood.match_start, hood.match_end)?;
            if !negated.allows(found.len(), &text) {
                log::debug!("`{text}` rejected by a negated group");
                rejected = true;
                return Ok(());
            }
            found.push(self.derive(text));
            Ok(())
        };
        bound.run(&mut gather)?;

        if rejected {
            return Ok(Vec::new());
        }
        found.reverse();
        Ok(found)
    }

    /// The first non-empty stretch of text between regions of `pattern`
    /// (including before the first and after the last).
    pub fn negative_find(&self, pattern: &str) -> Result<Option<Xtring>> {
        let bound = self.on(pattern)?;

        let mut gaps = Vec::new();
        let mut gather = |buffer: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
            for gap in [hood.next(), hood.previous()] {
                if !gap.is_empty() {
                    gaps.push(buffer.substring(gap.start, gap.end)?);
                }
            }
            Ok(())
        };
        bound.run(&mut gather)?;

        Ok(gaps.pop().map(|text| self.derive(text)))
    }
}

impl fmt::Display for Xtring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Xtring {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Xtring {
    fn from(text: &str) -> Self {
        Xtring::new(text)
    }
}

impl From<String> for Xtring {
    fn from(text: String) -> Self {
        Xtring::new(text)
    }
}

// Equality and hashing only look at the text.
impl PartialEq for Xtring {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Xtring {}

impl Hash for Xtring {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialEq<str> for Xtring {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Xtring {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl PartialEq<String> for Xtring {
    fn eq(&self, other: &String) -> bool {
        &self.text == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XtringError;

    #[test]
    fn test_equality() {
        assert_eq!(Xtring::new("text"), Xtring::new("text"));
        assert_eq!(Xtring::new("text"), "text");
        assert_eq!(Xtring::new("text"), "text".to_string());
        assert_ne!(Xtring::new("text"), Xtring::new("other"));
        // the bound pattern does not take part
        assert_eq!(Xtring::new("text").on("t").unwrap(), Xtring::new("text"));
    }

    #[test]
    fn test_find() {
        let text = Xtring::new("testing the test");
        assert_eq!(text.find("t.e").unwrap().unwrap(), "the");
        assert_eq!(text.find("not exists").unwrap(), None);
        // only the first group
        assert_eq!(text.find("testing (the) (test)").unwrap().unwrap(), "the");
        assert_eq!(text.find("testing (.*) test").unwrap().unwrap(), "the");
    }

    #[test]
    fn test_find_all() {
        let result = Xtring::new("taste the test").find_all("taste|test").unwrap();
        assert_eq!(result, vec![Xtring::new("taste"), Xtring::new("test")]);

        assert!(Xtring::new("testing the test").find_all("not exists").unwrap().is_empty());
    }

    #[test]
    fn test_negated_groups() {
        let text = Xtring::new("testing the test");
        assert_eq!(text.find("testing (!!mambo) test").unwrap().unwrap(), "the");
        assert_eq!(text.find("testing (!!the) test").unwrap(), None);

        let results = text.find_all("testing (!!mambo) (!!jambo)").unwrap();
        assert_eq!(results, vec![Xtring::new("the"), Xtring::new("test")]);

        assert!(text.find_all("testing (!!mambo) (!!test)").unwrap().is_empty());
    }

    #[test]
    fn test_negative_find() {
        let text = Xtring::new("testing the test");
        assert_eq!(text.negative_find(" the ").unwrap().unwrap(), "testing");
        assert_eq!(text.negative_find("testing").unwrap().unwrap(), " the test");
        assert_eq!(text.negative_find("testing the test").unwrap(), None);
    }

    #[test]
    fn test_nested_groups_are_one_region() {
        let text = Xtring::new("yabcx");
        assert_eq!(text.negative_find("(a(b)c)").unwrap().unwrap(), "y");
        assert_eq!(text.find_all("(a(b)c)").unwrap(), vec![Xtring::new("abc")]);
    }

    #[test]
    fn test_binding_is_not_carried_into_results() {
        let text = Xtring::new("testing the test");
        assert!(text.pattern().is_none());

        let bound = text.on("t(es)t").unwrap();
        assert_eq!(bound.pattern().map(Regex::as_str), Some("t(es)t"));
        assert_eq!(bound.regions(), vec![MatchRegion::new(1, 3), MatchRegion::new(13, 15)]);

        let mut strip = |buffer: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
            buffer.delete(hood.match_start, hood.match_end)
        };
        let edited = bound.run(&mut strip).unwrap();
        assert_eq!(edited, "tting the tt");
        assert!(edited.pattern().is_none());
    }

    #[test]
    fn test_multiple_groups_arrive_last_first() {
        let mut seen = Vec::new();
        let mut record = |buffer: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
            seen.push(buffer.substring(hood.match_start, hood.match_end)?);
            Ok(())
        };
        Xtring::new("testing the xtring")
            .on("(t.st).*(xt.i)")
            .unwrap()
            .run(&mut record)
            .unwrap();

        assert_eq!(seen, vec!["xtri", "test"]);
    }

    #[test]
    fn test_transforming() {
        let mut brackets = |buffer: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
            buffer.insert(hood.next_start, ")")?;
            buffer.insert(hood.match_end, "(")?;
            buffer.insert(hood.match_start, ")")?;
            buffer.insert(hood.previous_end, "(")
        };
        let result = Xtring::new("testing the xtring")
            .on(r"\s*the\s*")
            .unwrap()
            .run(&mut brackets)
            .unwrap();

        assert_eq!(result, "(testing) the (xtring)");
    }

    #[test]
    fn test_one_binding_many_runs() {
        let match_t = Xtring::new("testing the xtring").on("t").unwrap();

        let mut strip = |buffer: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
            buffer.delete(hood.match_start, hood.match_end)
        };
        assert_eq!(match_t.run(&mut strip).unwrap(), "esing he xring");

        let mut fence = |buffer: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
            buffer.insert(hood.match_end, "|")?;
            buffer.insert(hood.match_start, "|")
        };
        assert_eq!(match_t.run(&mut fence).unwrap(), "|t|es|t|ing |t|he x|t|ring");
    }

    #[test]
    fn test_run_without_pattern_is_identity() {
        let mut never = |_: &mut TextBuffer, _: &Neighborhood| -> Result<()> {
            panic!("no pattern is bound")
        };
        let text = Xtring::new("untouched");
        assert_eq!(text.run(&mut never).unwrap(), "untouched");
    }

    #[test]
    fn test_chained_runs_feed_output_forward() {
        let mut upper = |buffer: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
            let word = buffer.substring(hood.match_start, hood.match_end)?;
            buffer.replace(hood.match_start, hood.match_end, &word.to_uppercase())
        };
        let once = Xtring::new("a b c").on("[ab]").unwrap().run(&mut upper).unwrap();
        let mut bang = |buffer: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
            buffer.insert(hood.match_end, "!")
        };
        let twice = once.on("[A-Z]").unwrap().run(&mut bang).unwrap();
        assert_eq!(twice, "A! B! c");
    }

    #[test]
    fn test_bad_pattern_fails_at_bind() {
        let err = Xtring::new("text").on("[").unwrap_err();
        assert!(matches!(err, XtringError::InvalidPattern { .. }));
    }
}
