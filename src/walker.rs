use crate::buffer::TextBuffer;
use crate::error::{Result, XtringError};
use crate::matching::MatchRegion;

/// The boundaries around one region, relative to its neighbours in the
/// ordered region list. All offsets point into the pre-edit snapshot.
///
/// ```text
/// "testing the xtring" with " the "
///
///  previous_end = 0 (no earlier region)
///  match_start  = 7
///  match_end    = 12
///  next_start   = 18 (no later region)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    pub previous_end: usize,
    pub match_start: usize,
    pub match_end: usize,
    pub next_start: usize,
    pub is_first: bool,
    pub is_last: bool,
}

impl Neighborhood {
    /// Text between the previous region (or the start) and this one.
    pub fn previous(&self) -> MatchRegion {
        MatchRegion::new(self.previous_end, self.match_start)
    }

    pub fn matched(&self) -> MatchRegion {
        MatchRegion::new(self.match_start, self.match_end)
    }

    /// Text between this region and the next one (or the end).
    pub fn next(&self) -> MatchRegion {
        MatchRegion::new(self.match_end, self.next_start)
    }

    pub fn is_unique(&self) -> bool {
        self.is_first && self.is_last
    }
}

/// Edits the buffer for one region.
///
/// Regions arrive last to first. Any offset at or after `previous_end` may be
/// edited freely; offsets before it belong to regions not visited yet.
pub trait RegionCallback {
    fn on_region(&mut self, buffer: &mut TextBuffer, hood: &Neighborhood) -> Result<()>;
}

impl<F> RegionCallback for F
where
    F: FnMut(&mut TextBuffer, &Neighborhood) -> Result<()>,
{
    fn on_region(&mut self, buffer: &mut TextBuffer, hood: &Neighborhood) -> Result<()> {
        self(buffer, hood)
    }
}

fn check_region(snapshot: &str, region: &MatchRegion) -> Result<()> {
    if region.start > region.end || region.end > snapshot.len() {
        return Err(XtringError::RegionOutOfRange {
            start: region.start,
            end: region.end,
            len: snapshot.len(),
        });
    }
    for offset in [region.start, region.end] {
        if !snapshot.is_char_boundary(offset) {
            return Err(XtringError::NotCharBoundary { offset });
        }
    }
    Ok(())
}

/// Runs `callback` over every region, from the last one to the first, against
/// one buffer built from `snapshot`, and returns the edited text.
///
/// Walking backwards means an edit never moves the offsets of the regions
/// still to be visited, so no remapping is needed. Regions must be sorted
/// and must not overlap; otherwise `OverlappingRegions` is returned before
/// anything is edited, which keeps `previous_end <= match_start <= match_end
/// <= next_start` for every neighborhood. With no regions the
/// snapshot comes back untouched and the callback is never called.
pub fn walk<C>(snapshot: &str, matches: &[MatchRegion], callback: &mut C) -> Result<String>
where
    C: RegionCallback + ?Sized,
{
    if matches.is_empty() {
        return Ok(snapshot.to_string());
    }

    // Validate everything up front so a bad region never leaves half the
    // edits applied.
    for region in matches {
        check_region(snapshot, region)?;
    }
    for pair in matches.windows(2) {
        if pair[1].start < pair[0].end {
            return Err(XtringError::OverlappingRegions {
                start: pair[1].start,
                end: pair[1].end,
                previous_end: pair[0].end,
            });
        }
    }

    let mut buffer = TextBuffer::from_string(snapshot.to_string());
    let last = matches.len() - 1;

    for index in (0..=last).rev() {
        let region = matches[index];
        let hood = Neighborhood {
            previous_end: if index > 0 { matches[index - 1].end } else { 0 },
            match_start: region.start,
            match_end: region.end,
            next_start: if index < last {
                matches[index + 1].start
            } else {
                snapshot.len()
            },
            is_first: index == 0,
            is_last: index == last,
        };

        log::trace!("region {index}: {hood:?}");
        callback.on_region(&mut buffer, &hood)?;
    }

    Ok(buffer.get_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::collect;
    use regex::Regex;

    fn regions(text: &str, pattern: &str) -> Vec<MatchRegion> {
        collect(text, &Regex::new(pattern).unwrap())
    }

    fn neighborhoods(text: &str, pattern: &str) -> Vec<Neighborhood> {
        let mut seen = Vec::new();
        let mut record = |_: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
            seen.push(*hood);
            Ok(())
        };
        walk(text, &regions(text, pattern), &mut record).unwrap();
        seen
    }

    #[test]
    fn test_no_regions_returns_snapshot() {
        let mut calls = 0;
        let mut count = |_: &mut TextBuffer, _: &Neighborhood| -> Result<()> {
            calls += 1;
            Ok(())
        };
        let result = walk("testing the test", &[], &mut count).unwrap();
        assert_eq!(result, "testing the test");
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_single_region_neighborhood() {
        let text = "testing the xtring";
        let seen = neighborhoods(text, " the ");

        assert_eq!(
            seen,
            vec![Neighborhood {
                previous_end: 0,
                match_start: 7,
                match_end: 12,
                next_start: 18,
                is_first: true,
                is_last: true,
            }]
        );
        assert!(seen[0].is_unique());
        assert_eq!(&text[seen[0].previous().as_range()], "testing");
        assert_eq!(&text[seen[0].next().as_range()], "xtring");
    }

    #[test]
    fn test_group_region_neighborhood() {
        let text = "testing the xtring";
        let hood = neighborhoods(text, r" (\w+) ")[0];

        assert_eq!(&text[hood.previous().as_range()], "testing ");
        assert_eq!(&text[hood.matched().as_range()], "the");
        assert_eq!(&text[hood.next().as_range()], " xtring");
    }

    #[test]
    fn test_regions_visited_last_to_first() {
        let seen: Vec<_> = neighborhoods("testing the xtring", "t")
            .into_iter()
            .map(|h| (h.previous_end, h.match_start, h.next_start, h.is_first, h.is_last))
            .collect();

        assert_eq!(
            seen,
            vec![
                (9, 13, 18, false, true),
                (4, 8, 13, false, false),
                (1, 3, 8, false, false),
                (0, 0, 3, true, false),
            ]
        );
    }

    #[test]
    fn test_wrapping_the_text_between_matches() {
        let text = "testing the xtring";
        let mut wrap = |buffer: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
            if hood.is_last {
                buffer.insert(hood.next_start, ")")?;
                buffer.insert(hood.match_end, "(")?;
            }
            if hood.previous().is_empty() {
                return Ok(());
            }
            buffer.insert(hood.match_start, ")")?;
            buffer.insert(hood.previous_end, "(")
        };

        let result = walk(text, &regions(text, "t"), &mut wrap).unwrap();
        assert_eq!(result, "t(es)t(ing )t(he x)t(ring)");
    }

    #[test]
    fn test_backward_walk_keeps_offsets_valid() {
        let text = "a-bb-ccc";
        let found = regions(text, "[a-z]+");
        let mut widen = |buffer: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
            let word = buffer.substring(hood.match_start, hood.match_end)?;
            buffer.replace(hood.match_start, hood.match_end, &format!("<{word}{word}>"))
        };

        let walked = walk(text, &found, &mut widen).unwrap();
        assert_eq!(walked, "<aa>-<bbbb>-<cccccc>");

        // The same edits applied first to last land on stale offsets.
        let mut naive = TextBuffer::from_string(text.to_string());
        for region in &found {
            let word = naive.substring(region.start, region.end).unwrap();
            naive
                .replace(region.start, region.end, &format!("<{word}{word}>"))
                .unwrap();
        }
        assert_ne!(naive.get_text(), walked);
        assert!(naive.get_text().ends_with("-bb-ccc"));
    }

    #[test]
    fn test_out_of_range_region_fails_before_editing() {
        let mut calls = 0;
        let mut count = |_: &mut TextBuffer, _: &Neighborhood| -> Result<()> {
            calls += 1;
            Ok(())
        };
        let bad = [MatchRegion::new(1, 2), MatchRegion::new(3, 9)];

        let err = walk("short", &bad, &mut count).unwrap_err();
        assert_eq!(err, XtringError::RegionOutOfRange { start: 3, end: 9, len: 5 });
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_overlapping_regions_fail_before_editing() {
        let mut calls = 0;
        let mut count = |_: &mut TextBuffer, _: &Neighborhood| -> Result<()> {
            calls += 1;
            Ok(())
        };

        let nested = [MatchRegion::new(0, 3), MatchRegion::new(1, 2)];
        assert_eq!(
            walk("abc", &nested, &mut count),
            Err(XtringError::OverlappingRegions {
                start: 1,
                end: 2,
                previous_end: 3,
            })
        );

        let unsorted = [MatchRegion::new(3, 4), MatchRegion::new(0, 1)];
        assert!(matches!(
            walk("abcd", &unsorted, &mut count),
            Err(XtringError::OverlappingRegions { .. })
        ));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_nested_groups_keep_neighborhoods_ordered() {
        for (text, pattern) in [
            ("xabcx", "(a(b)c)"),
            ("abcabc", "(a(b))(c)"),
            ("ab ab", "((a)(b))"),
        ] {
            let hoods = neighborhoods(text, pattern);
            assert!(!hoods.is_empty());
            for hood in hoods {
                assert!(hood.previous_end <= hood.match_start, "{pattern}: {hood:?}");
                assert!(hood.match_start <= hood.match_end, "{pattern}: {hood:?}");
                assert!(hood.match_end <= hood.next_start, "{pattern}: {hood:?}");
            }
        }
    }

    #[test]
    fn test_callback_error_aborts_walk() {
        let text = "one two three";
        let mut overrun = |buffer: &mut TextBuffer, hood: &Neighborhood| -> Result<()> {
            buffer.delete(hood.match_start, hood.match_end + 100)
        };
        let result = walk(text, &regions(text, r"\w+"), &mut overrun);
        assert!(matches!(result, Err(XtringError::RegionOutOfRange { .. })));
    }
}
