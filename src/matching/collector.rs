use regex::{Captures, Regex};
use std::cmp::Reverse;
use std::ops::Range;

/// Half-open `start..end` span into the snapshot a pattern was run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchRegion {
    pub start: usize,
    pub end: usize,
}

impl MatchRegion {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<regex::Match<'_>> for MatchRegion {
    fn from(mat: regex::Match<'_>) -> Self {
        Self::new(mat.start(), mat.end())
    }
}

/// Collects every match of `pattern` in `snapshot`, left to right.
///
/// A pattern without capture groups yields one region per match. A pattern
/// with groups yields one region per participating group, in text order,
/// and the whole-match span is dropped. Wrap a group in `(?:...)` to get the
/// whole match back.
///
/// Nested groups keep only the outermost one, so `(a(b)c)` yields the span
/// of `abc` alone. The regions never overlap.
pub fn collect(snapshot: &str, pattern: &Regex) -> Vec<MatchRegion> {
    // captures_len counts the implicit whole-match group
    let group_count = pattern.captures_len() - 1;

    let regions: Vec<MatchRegion> = if group_count == 0 {
        pattern.find_iter(snapshot).map(MatchRegion::from).collect()
    } else {
        pattern
            .captures_iter(snapshot)
            .flat_map(|caps| outermost_groups(&caps, group_count))
            .collect()
    };

    log::debug!(
        "pattern `{}` produced {} region(s) over {} bytes",
        pattern.as_str(),
        regions.len(),
        snapshot.len()
    );

    regions
}

fn outermost_groups(caps: &Captures<'_>, group_count: usize) -> Vec<MatchRegion> {
    let mut groups: Vec<MatchRegion> = (1..=group_count)
        .filter_map(|i| caps.get(i).map(MatchRegion::from))
        .collect();
    // a repeated group keeps its last iteration, which can sit before a
    // lower-numbered group
    groups.sort_by_key(|group| (group.start, Reverse(group.end)));

    let mut kept: Vec<MatchRegion> = Vec::with_capacity(groups.len());
    for group in groups {
        match kept.last().copied() {
            Some(outer) if group.start < outer.end => {
                log::trace!(
                    "group {}..{} nested in {}..{}, dropped",
                    group.start,
                    group.end,
                    outer.start,
                    outer.end
                );
            }
            _ => kept.push(group),
        }
    }
    kept
}
