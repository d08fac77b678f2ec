//! # Sequence Alignment
//!
//! A Ratcliff–Obershelp "gestalt" matcher: find the longest contiguous
//! matching block, then recurse on the pieces to its left and right. The
//! resulting matching blocks are turned into an opcode list describing how to
//! turn `a` into `b`.
//!
//! ## Popular elements
//!
//! When `b` has at least [`AUTOJUNK_MIN_LEN`] elements, any element that occurs
//! more than `len(b) / 100 + 1` times is not used to *seed* a match. This keeps
//! long texts from degenerating into quadratic work on spaces and common
//! letters. Popular elements can still be absorbed while a seeded match is
//! extended.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

pub const AUTOJUNK_MIN_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    Equal,
    Replace,
    Insert,
    Delete,
}

/// `a[i1..i2]` relates to `b[j1..j2]` as described by `tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub tag: OpTag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

impl Opcode {
    pub fn a_range(&self) -> Range<usize> {
        self.i1..self.i2
    }
}

/// `a[a_start..a_start + size] == b[b_start..b_start + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        Self::with_autojunk(a, b, true)
    }

    pub fn with_autojunk(a: &'a [T], b: &'a [T], autojunk: bool) -> Self {
        let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }

        if autojunk && b.len() >= AUTOJUNK_MIN_LEN {
            let threshold = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= threshold);
        }

        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`. Ties go to
    /// the block starting earliest in `a`, then earliest in `b`.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (a, b) = (self.a, self.b);
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // j2len[j] = length of the longest match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next;
        }

        // Popular elements never seed a match; let them extend one.
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        Match {
            a_start: best_i,
            b_start: best_j,
            size: best_size,
        }
    }

    /// Non-overlapping matching blocks in increasing order, adjacent blocks
    /// merged, terminated by a zero-size sentinel at `(len(a), len(b))`.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a_start && blo < m.b_start {
                queue.push((alo, m.a_start, blo, m.b_start));
            }
            if m.a_start + m.size < ahi && m.b_start + m.size < bhi {
                queue.push((m.a_start + m.size, ahi, m.b_start + m.size, bhi));
            }
        }
        blocks.sort();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.size == block.a_start
                        && last.b_start + last.size == block.b_start =>
                {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(Match {
            a_start: la,
            b_start: lb,
            size: 0,
        });
        merged
    }

    pub fn opcodes(&self) -> Vec<Opcode> {
        let (mut i, mut j) = (0, 0);
        let mut ops = Vec::new();

        for m in self.matching_blocks() {
            let tag = match (i < m.a_start, j < m.b_start) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Delete),
                (false, true) => Some(OpTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                ops.push(Opcode {
                    tag,
                    i1: i,
                    i2: m.a_start,
                    j1: j,
                    j2: m.b_start,
                });
            }
            i = m.a_start + m.size;
            j = m.b_start + m.size;
            if m.size > 0 {
                ops.push(Opcode {
                    tag: OpTag::Equal,
                    i1: m.a_start,
                    i2: i,
                    j1: m.b_start,
                    j2: j,
                });
            }
        }
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn op(tag: OpTag, i1: usize, i2: usize, j1: usize, j2: usize) -> Opcode {
        Opcode {
            tag,
            i1,
            i2,
            j1,
            j2,
        }
    }

    #[test]
    fn identical_sequences_are_one_equal_block() {
        let a = chars("hello");
        let ops = SequenceMatcher::new(&a, &a).opcodes();
        assert_eq!(ops, vec![op(OpTag::Equal, 0, 5, 0, 5)]);
    }

    #[test]
    fn empty_sequences_produce_no_opcodes() {
        let a: Vec<char> = Vec::new();
        assert!(SequenceMatcher::new(&a, &a).opcodes().is_empty());
    }

    #[test]
    fn classic_qabxcd_example() {
        let a = chars("qabxcd");
        let b = chars("abycdf");
        let ops = SequenceMatcher::new(&a, &b).opcodes();
        assert_eq!(
            ops,
            vec![
                op(OpTag::Delete, 0, 1, 0, 0),
                op(OpTag::Equal, 1, 3, 0, 2),
                op(OpTag::Replace, 3, 4, 2, 3),
                op(OpTag::Equal, 4, 6, 3, 5),
                op(OpTag::Insert, 6, 6, 5, 6),
            ]
        );
    }

    #[test]
    fn longest_match_prefers_earliest_block() {
        let a = chars(" abcd");
        let b = chars("abcd abcd");
        let m = SequenceMatcher::new(&a, &b).find_longest_match(0, 5, 0, 9);
        assert_eq!(
            m,
            Match {
                a_start: 0,
                b_start: 4,
                size: 5
            }
        );
    }

    #[test]
    fn matching_blocks_end_with_sentinel() {
        let a = chars("abxcd");
        let b = chars("abcd");
        let blocks = SequenceMatcher::new(&a, &b).matching_blocks();
        assert_eq!(
            blocks,
            vec![
                Match {
                    a_start: 0,
                    b_start: 0,
                    size: 2
                },
                Match {
                    a_start: 3,
                    b_start: 2,
                    size: 2
                },
                Match {
                    a_start: 5,
                    b_start: 4,
                    size: 0
                },
            ]
        );
    }

    #[test]
    fn popular_elements_do_not_seed_matches_in_long_inputs() {
        // 'x' makes up most of b, so it is too popular to seed a match, but
        // the run is still found because 'y' seeds it and extension absorbs
        // the surrounding x's.
        let a: Vec<char> = "x".repeat(150).chars().chain("y".chars()).collect();
        let b: Vec<char> = "x".repeat(300).chars().chain("y".chars()).collect();
        let matcher = SequenceMatcher::new(&a, &b);
        let m = matcher.find_longest_match(0, a.len(), 0, b.len());
        assert_eq!(m.size, 151);
        assert_eq!(m.a_start, 0);
        assert_eq!(m.b_start, 150);
    }

    #[test]
    fn opcodes_cover_both_sequences_contiguously() {
        let a = chars("the quick brown fox jumps");
        let b = chars("a quick red fox leaps high");
        let ops = SequenceMatcher::new(&a, &b).opcodes();

        let (mut i, mut j) = (0, 0);
        for o in &ops {
            assert_eq!(o.i1, i);
            assert_eq!(o.j1, j);
            i = o.i2;
            j = o.j2;
        }
        assert_eq!((i, j), (a.len(), b.len()));
    }
}
