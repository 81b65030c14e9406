// Sat Oct 17 2026 - Alex

use crate::diff::{BlockKind, LineDiff};
use crate::structure::StructLayout;
use std::collections::{BTreeSet, HashMap};

/// A struct whose declaration was touched, with its previous version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedStruct {
    /// Version in the head revision.
    pub head: StructLayout,
    /// Same-named struct in the base revision, absent for new structs.
    pub base: Option<StructLayout>,
}

impl ChangedStruct {
    pub fn new(head: StructLayout, base: Option<StructLayout>) -> Self {
        Self { head, base }
    }

    pub fn name(&self) -> &str {
        self.head.name()
    }

    pub fn is_new(&self) -> bool {
        self.base.is_none()
    }
}

/// Head-revision line numbers touched by the edit from `base` to `head`.
///
/// Inserted lines are recorded as themselves. A deletion is anchored at the
/// head line right before it, which is 0 when the deletion is at the top.
pub fn changed_lines(base: &[u8], head: &[u8]) -> BTreeSet<usize> {
    let diff = LineDiff::compute(base, head);

    let mut acc = 0usize;
    let mut lines = BTreeSet::new();
    for block in diff.blocks() {
        match block.kind {
            BlockKind::Deleted => {
                lines.insert(acc);
            }
            BlockKind::Inserted => {
                lines.extend(acc + 1..=acc + block.lines);
                acc += block.lines;
            }
            BlockKind::Equal => acc += block.lines,
        }
    }
    lines
}

/// Structs with at least one changed line inside their declaration, in the
/// order given.
pub fn structs_touching<'a>(lines: &BTreeSet<usize>, structs: &'a [StructLayout]) -> Vec<&'a StructLayout> {
    structs
        .iter()
        .filter(|s| {
            let range = s.lines();
            lines.range(range.start..=range.end).next().is_some()
        })
        .collect()
}

/// Touched head structs paired with their base-revision counterparts.
pub fn changed_structs(
    base: &[u8],
    head: &[u8],
    base_structs: &[StructLayout],
    head_structs: &[StructLayout],
) -> Vec<ChangedStruct> {
    let lines = changed_lines(base, head);
    log::trace!("changed lines: {:?}", lines);

    let mut by_name: HashMap<&str, &StructLayout> = HashMap::with_capacity(base_structs.len());
    for s in base_structs {
        by_name.entry(s.name()).or_insert(s);
    }

    structs_touching(&lines, head_structs)
        .into_iter()
        .map(|s| ChangedStruct::new(s.clone(), by_name.get(s.name()).map(|b| (*b).clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{compute_layout, FieldSpec, LineRange};
    use proptest::prelude::*;

    fn decl(name: &str, start: usize, end: usize) -> StructLayout {
        let fields = compute_layout(&[FieldSpec::leaf("A", "int", 8, 8)]).unwrap();
        StructLayout::new(name, LineRange::new(start, end), fields)
    }

    fn numbered(count: usize) -> String {
        (1..=count).map(|i| format!("line {}\n", i)).collect()
    }

    #[test]
    fn test_single_insertion_is_recorded() {
        let base = numbered(5);
        let head = "line 1\nline 2\nnew\nline 3\nline 4\nline 5\n";
        let lines = changed_lines(base.as_bytes(), head.as_bytes());
        assert_eq!(lines.into_iter().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_deletion_is_anchored_before() {
        let base = numbered(5);
        let head = "line 1\nline 2\nline 4\nline 5\n";
        let lines = changed_lines(base.as_bytes(), head.as_bytes());
        assert_eq!(lines.into_iter().collect::<Vec<_>>(), vec![2]);

        let head = "line 2\nline 3\nline 4\nline 5\n";
        let lines = changed_lines(base.as_bytes(), head.as_bytes());
        assert_eq!(lines.into_iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_modified_line() {
        let base = numbered(4);
        let head = "line 1\nline two\nline 3\nline 4\n";
        let lines = changed_lines(base.as_bytes(), head.as_bytes());
        assert_eq!(lines.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_new_file_marks_every_line() {
        let lines = changed_lines(b"", b"a\nb\nc\n");
        assert_eq!(lines.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_structs_touching_bounds_are_inclusive() {
        let structs = vec![decl("Bar", 6, 9), decl("Qux", 15, 23), decl("Mux", 25, 27)];

        let lines: BTreeSet<usize> = [15].into_iter().collect();
        let names: Vec<&str> = structs_touching(&lines, &structs).iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Qux"]);

        let lines: BTreeSet<usize> = [9, 24].into_iter().collect();
        let names: Vec<&str> = structs_touching(&lines, &structs).iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Bar"]);
    }

    #[test]
    fn test_changed_structs_inside_range() {
        let base = numbered(30);
        let mut head_lines: Vec<String> = (1..=30).map(|i| format!("line {}", i)).collect();
        head_lines.insert(17, "inserted".to_string());
        let head = head_lines.join("\n") + "\n";

        let base_structs = vec![decl("Bar", 6, 9), decl("Qux", 15, 23)];
        let head_structs = vec![decl("Bar", 6, 9), decl("Qux", 15, 24)];

        let changed = changed_structs(base.as_bytes(), head.as_bytes(), &base_structs, &head_structs);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].name(), "Qux");
        assert_eq!(changed[0].base.as_ref().map(|b| b.lines()), Some(LineRange::new(15, 23)));
    }

    #[test]
    fn test_new_struct_has_no_base() {
        let base = numbered(3);
        let head = format!("{}type Mux struct {{\n\tA int\n}}\n", base);

        let head_structs = vec![decl("Mux", 4, 6)];
        let changed = changed_structs(base.as_bytes(), head.as_bytes(), &[], &head_structs);
        assert_eq!(changed.len(), 1);
        assert!(changed[0].is_new());
    }

    #[test]
    fn test_untouched_file_reports_nothing() {
        let text = numbered(10);
        let structs = vec![decl("Bar", 2, 5)];
        assert!(changed_structs(text.as_bytes(), text.as_bytes(), &structs, &structs).is_empty());
    }

    fn splice(base_len: usize, at: usize, removed: usize, added: usize) -> String {
        let mut lines: Vec<String> = (1..=base_len).map(|i| format!("line {}", i)).collect();
        lines.splice(at..at + removed, (0..added).map(|i| format!("added {}", i)));
        lines.iter().map(|l| format!("{}\n", l)).collect()
    }

    prop_compose! {
        fn insertion()(base_len in 0usize..60)(base_len in Just(base_len), at in 0..=base_len, added in 1usize..6) -> (usize, usize, usize) {
            (base_len, at, added)
        }
    }

    prop_compose! {
        fn deletion()(base_len in 1usize..60)(base_len in Just(base_len), at in 0..base_len) -> (usize, usize) {
            (base_len, at)
        }
    }

    proptest! {
        #[test]
        fn test_every_inserted_line_is_recorded((base_len, at, added) in insertion()) {
            let base = numbered(base_len);
            let head = splice(base_len, at, 0, added);

            let lines = changed_lines(base.as_bytes(), head.as_bytes());
            prop_assert_eq!(lines.into_iter().collect::<Vec<_>>(), (at + 1..=at + added).collect::<Vec<_>>());
        }

        #[test]
        fn test_deletion_records_its_anchor((base_len, at) in deletion(), removed in 1usize..6) {
            let removed = removed.min(base_len - at);
            let base = numbered(base_len);
            let head = splice(base_len, at, removed, 0);

            let lines = changed_lines(base.as_bytes(), head.as_bytes());
            prop_assert_eq!(lines.into_iter().collect::<Vec<_>>(), vec![at]);
        }
    }
}
