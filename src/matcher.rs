//! The `Matcher` driver: the entry-point search loop, the find iterator,
//! and the replace/split helpers.
//!
//! Generalized from matching over `&str` to matching over `&[T]`, and from
//! a single stateless `find` call to the stateful cursor-owning `Matcher`.

use std::fmt;

use crate::capture::Captures;
use crate::matching::find_quantified;
use crate::node::{effective_must_be_first, effective_must_be_last, Span};
use crate::Pattern;

/// A successful match: `[start, end)` plus capture groups.
///
/// `groups()[0]` is always the whole match span. `complete` distinguishes a
/// genuine consumption from a zero-length optional-tail fallback; most
/// callers never need to inspect it directly — it only affects which match
/// `Matcher::find` prefers when several candidates exist at different start
/// positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    start: usize,
    end: usize,
    complete: bool,
    groups: Vec<Span>,
}

impl Match {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn size(&self) -> usize {
        self.end - self.start
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// All capture spans, sorted by ascending `start`; index 0 is the whole
    /// match.
    pub fn groups(&self) -> &[Span] {
        &self.groups
    }

    /// The span of capture group `index`, or `None` if it doesn't exist —
    /// an out-of-range group surfaces as an absent value, never an error.
    pub fn group(&self, index: usize) -> Option<Span> {
        self.groups.get(index).copied()
    }

    pub fn as_span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// A borrowing view letting callers slice the original input by group
    /// index.
    pub fn captures<'t, T>(&self, items: &'t [T]) -> Captures<'t, T> {
        Captures::new(items, &self.groups)
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) ({} group{})",
            self.start,
            self.end,
            self.groups.len(),
            if self.groups.len() == 1 { "" } else { "s" }
        )
    }
}

/// Owns a cursor and the last [`Match`] over a borrowed pattern and input.
/// Not safe to share across threads; each concurrent consumer should
/// own its own `Matcher` over a shared, read-only [`Pattern`].
pub struct Matcher<'p, 't, T> {
    pattern: &'p Pattern<T>,
    items: &'t [T],
    current: Option<Match>,
}

impl<'p, 't, T> Matcher<'p, 't, T> {
    pub(crate) fn new(pattern: &'p Pattern<T>, items: &'t [T]) -> Self {
        Matcher {
            pattern,
            items,
            current: None,
        }
    }

    /// Clears the last match, so the next `find()` scans from the start.
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// The search loop: scans forward from the end of the last
    /// match (or 0), honoring `must_be_first`/`must_be_last`, preferring a
    /// complete match but falling back to the earliest incomplete
    /// "challenger" if no complete match ever appears.
    pub fn find(&mut self) -> bool {
        let start_pos = self.current.as_ref().map(|m| m.end).unwrap_or(0);
        let arena = self.pattern.arena();
        let root = self.pattern.root();
        let len = self.items.len();
        let must_first = effective_must_be_first(root, arena);
        let must_last = effective_must_be_last(root, arena);

        let mut challenger: Option<Match> = None;
        let mut i = start_pos;
        while i < len {
            if i > 0 && must_first {
                self.current = None;
                return false;
            }
            let raw = find_quantified(root, self.items, i, arena);
            if raw.success && raw.size() > 0 && (!must_last || i + raw.size() == len) {
                let candidate = Match {
                    start: i,
                    end: raw.end,
                    complete: raw.complete,
                    groups: raw.captures.clone(),
                };
                if raw.complete {
                    self.current = Some(candidate);
                    return true;
                } else if challenger.is_none() {
                    challenger = Some(candidate);
                }
            }
            i += 1;
        }

        match challenger {
            Some(c) => {
                self.current = Some(c);
                true
            }
            None => {
                self.current = None;
                false
            }
        }
    }

    pub fn start(&self) -> Option<usize> {
        self.current.as_ref().map(Match::start)
    }

    pub fn end(&self) -> Option<usize> {
        self.current.as_ref().map(Match::end)
    }

    pub fn size(&self) -> Option<usize> {
        self.current.as_ref().map(Match::size)
    }

    pub fn groups(&self) -> Option<&[Span]> {
        self.current.as_ref().map(|m| m.groups())
    }

    /// The last match produced by `find()`, if any.
    pub fn current_match(&self) -> Option<&Match> {
        self.current.as_ref()
    }

    /// An iterator of every non-overlapping match from the start of the
    /// input (resets the cursor first).
    pub fn find_iter(&mut self) -> FindIter<'_, 'p, 't, T> {
        self.reset();
        FindIter { matcher: self }
    }

    /// Lazily splits the input on every match (resets the cursor
    /// first). Yields nothing for a zero-length input.
    pub fn split(&mut self) -> SplitIter<'_, 'p, 't, T> {
        self.reset();
        let empty_input = self.items.is_empty();
        SplitIter {
            matcher: self,
            last_end: 0,
            done: empty_input,
        }
    }

    /// Replaces every match with the list returned by `f`, applied
    /// right-to-left so earlier offsets stay valid.
    pub fn replace_with_list_fn(&mut self, f: impl Fn(&Match) -> Vec<T>) -> Vec<T>
    where
        T: Clone,
    {
        self.reset();
        let mut matches = Vec::new();
        while self.find() {
            if let Some(m) = self.current_match() {
                matches.push(m.clone());
            }
        }
        let mut result = self.items.to_vec();
        for m in matches.iter().rev() {
            let replacement = f(m);
            result.splice(m.start()..m.end(), replacement);
        }
        result
    }

    /// Replaces every match with (a clone of) `list`.
    pub fn replace_with_list(&mut self, list: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        self.replace_with_list_fn(|_| list.to_vec())
    }

    /// Replaces every match with the single value returned by `f`.
    pub fn replace_with_fn(&mut self, f: impl Fn(&Match) -> T) -> Vec<T>
    where
        T: Clone,
    {
        self.replace_with_list_fn(|m| vec![f(m)])
    }

    /// Replaces every match with (a clone of) `value`.
    pub fn replace_with(&mut self, value: T) -> Vec<T>
    where
        T: Clone,
    {
        self.replace_with_list_fn(|_| vec![value.clone()])
    }
}

/// Iterator of every non-overlapping [`Match`].
pub struct FindIter<'m, 'p, 't, T> {
    matcher: &'m mut Matcher<'p, 't, T>,
}

impl<'m, 'p, 't, T> Iterator for FindIter<'m, 'p, 't, T> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        if self.matcher.find() {
            self.matcher.current_match().cloned()
        } else {
            None
        }
    }
}

/// Lazy split iterator.
pub struct SplitIter<'m, 'p, 't, T> {
    matcher: &'m mut Matcher<'p, 't, T>,
    last_end: usize,
    done: bool,
}

impl<'m, 'p, 't, T> Iterator for SplitIter<'m, 'p, 't, T> {
    type Item = &'t [T];

    fn next(&mut self) -> Option<&'t [T]> {
        if self.done {
            return None;
        }
        if self.matcher.find() {
            let m = self
                .matcher
                .current_match()
                .expect("find() returned true without a current match");
            let piece = &self.matcher.items[self.last_end..m.start()];
            self.last_end = m.end();
            Some(piece)
        } else {
            self.done = true;
            Some(&self.matcher.items[self.last_end..])
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::PatternBuilder;

    #[test]
    fn find_reports_strictly_increasing_starts() {
        let pattern = PatternBuilder::<i32>::new()
            .token(|n: &i32| n % 10 == 2)
            .build();
        let seq = [2, 15, 42, 42, 15];
        let mut m = pattern.matcher(&seq);
        let mut starts = Vec::new();
        while m.find() {
            starts.push(m.start().unwrap());
        }
        assert_eq!(starts, vec![0, 2, 3]);
    }

    #[test]
    fn zero_length_input_never_matches() {
        let pattern = PatternBuilder::<i32>::new().any().build();
        let seq: [i32; 0] = [];
        let mut m = pattern.matcher(&seq);
        assert!(!m.find());
        assert_eq!(m.split().count(), 0);
    }
}
