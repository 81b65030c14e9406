// Sat Oct 17 2026 - Alex

use std::fmt;
use std::ops::{Index, IndexMut};

/// Kind of a run of lines in a line diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Lines present in both revisions
    Equal,
    /// Lines only in the head revision
    Inserted,
    /// Lines only in the base revision
    Deleted,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Equal => "equal",
            BlockKind::Inserted => "inserted",
            BlockKind::Deleted => "deleted",
        }
    }
}

/// A maximal run of lines with the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffBlock {
    pub kind: BlockKind,
    pub lines: usize,
}

impl DiffBlock {
    pub fn new(kind: BlockKind, lines: usize) -> Self {
        Self { kind, lines }
    }
}

impl fmt::Display for DiffBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.kind.as_str(), self.lines)
    }
}

/// Line-granularity diff between two texts, computed with the linear-space
/// variant of Myers' O(ND) algorithm.
#[derive(Debug, Clone, Default)]
pub struct LineDiff {
    blocks: Vec<DiffBlock>,
    deleted: usize,
    inserted: usize,
}

impl LineDiff {
    pub fn compute(base: &[u8], head: &[u8]) -> Self {
        let old = split_lines(base);
        let new = split_lines(head);

        let max_d = max_d(old.len(), new.len());
        let mut forward = Frontier::new(max_d);
        let mut backward = Frontier::new(max_d);

        let mut diff = Self::default();
        diff.conquer(&old, &new, &mut forward, &mut backward);
        diff.flush();
        diff
    }

    pub fn blocks(&self) -> &[DiffBlock] {
        &self.blocks
    }

    pub fn is_unchanged(&self) -> bool {
        self.blocks.iter().all(|b| b.kind == BlockKind::Equal)
    }

    /// Emits the edit script for `a` to `b`: trims the common ends, then
    /// splits at the middle snake and recurses on both halves.
    fn conquer(&mut self, a: &[&[u8]], b: &[&[u8]], forward: &mut Frontier, backward: &mut Frontier) {
        let prefix = common_prefix(a, b);
        self.equal(prefix);
        let (a, b) = (&a[prefix..], &b[prefix..]);

        let suffix = common_suffix(a, b);
        let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);

        if a.is_empty() {
            self.inserted += b.len();
        } else if b.is_empty() {
            self.deleted += a.len();
        } else {
            match middle_snake(a, b, forward, backward) {
                Some((x, y)) if x <= a.len() && y <= b.len() && (x, y) != (0, 0) && (x, y) != (a.len(), b.len()) => {
                    self.conquer(&a[..x], &b[..y], forward, backward);
                    self.conquer(&a[x..], &b[y..], forward, backward);
                }
                _ => {
                    self.deleted += a.len();
                    self.inserted += b.len();
                }
            }
        }

        self.equal(suffix);
    }

    fn equal(&mut self, lines: usize) {
        if lines > 0 {
            self.flush();
            self.push(BlockKind::Equal, lines);
        }
    }

    // Pending edits between two equal runs go out deletions first.
    fn flush(&mut self) {
        let (deleted, inserted) = (self.deleted, self.inserted);
        self.deleted = 0;
        self.inserted = 0;
        self.push(BlockKind::Deleted, deleted);
        self.push(BlockKind::Inserted, inserted);
    }

    fn push(&mut self, kind: BlockKind, lines: usize) {
        if lines == 0 {
            return;
        }
        match self.blocks.last_mut() {
            Some(last) if last.kind == kind => last.lines += lines,
            _ => self.blocks.push(DiffBlock::new(kind, lines)),
        }
    }
}

/// Splits on `\n` without decoding. A trailing newline does not start an
/// extra line and empty input has no lines.
pub fn split_lines(text: &[u8]) -> Vec<&[u8]> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix(b"\n").unwrap_or(text);
    body.split(|b| *b == b'\n').collect()
}

/// Furthest-reaching x per diagonal k, for k in `-max_d..max_d`.
struct Frontier {
    offset: isize,
    v: Vec<isize>,
}

impl Frontier {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            v: vec![0; 2 * max_d],
        }
    }
}

impl Index<isize> for Frontier {
    type Output = isize;

    fn index(&self, k: isize) -> &isize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut isize {
        &mut self.v[(k + self.offset) as usize]
    }
}

fn max_d(n: usize, m: usize) -> usize {
    (n + m + 1) / 2 + 1
}

fn common_prefix(a: &[&[u8]], b: &[&[u8]]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[&[u8]], b: &[&[u8]]) -> usize {
    a.iter().rev().zip(b.iter().rev()).take_while(|(x, y)| x == y).count()
}

/// Runs the forward and backward searches until they overlap and returns the
/// point where the overlapping path can be split. `backward` holds x counted
/// from the end of both sequences.
fn middle_snake(a: &[&[u8]], b: &[&[u8]], forward: &mut Frontier, backward: &mut Frontier) -> Option<(usize, usize)> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let delta = n - m;
    let odd = delta & 1 == 1;

    forward[1] = 0;
    backward[1] = 0;

    for d in 0..max_d(a.len(), b.len()) as isize {
        let mut k = d;
        while k >= -d {
            let mut x = if k == -d || (k != d && forward[k - 1] < forward[k + 1]) {
                forward[k + 1]
            } else {
                forward[k - 1] + 1
            };
            let y = x - k;
            let (x0, y0) = (x, y);
            if x < n && y >= 0 && y < m {
                x += common_prefix(&a[x as usize..], &b[y as usize..]) as isize;
            }
            forward[k] = x;
            if odd && (k - delta).abs() < d && forward[k] + backward[-(k - delta)] >= n {
                return Some((x0.max(0) as usize, y0.max(0) as usize));
            }
            k -= 2;
        }

        let mut k = d;
        while k >= -d {
            let mut x = if k == -d || (k != d && backward[k - 1] < backward[k + 1]) {
                backward[k + 1]
            } else {
                backward[k - 1] + 1
            };
            let mut y = x - k;
            if x < n && y >= 0 && y < m {
                let run = common_suffix(&a[..(n - x) as usize], &b[..(m - y) as usize]) as isize;
                x += run;
                y += run;
            }
            backward[k] = x;
            if !odd && (k - delta).abs() <= d && backward[k] + forward[-(k - delta)] >= n {
                return Some(((n - x).max(0) as usize, (m - y).max(0) as usize));
            }
            k -= 2;
        }
    }

    None
}
