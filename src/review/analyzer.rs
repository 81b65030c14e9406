// Sat Oct 17 2026 - Alex

use crate::config::Config;
use crate::diff::changed_structs;
use crate::extract::{extractor_for, GoExtractor, ManifestExtractor, StructExtractor};
use crate::output::GoRenderer;
use crate::review::advisor::Advisor;
use crate::structure::{FieldOptimizer, StructLayout, StructureValidator};
use crate::utils::logging::ScopedTimer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// One file of a reviewed change. A missing side means the file was added
/// (no base) or deleted (no head).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: PathBuf,
    pub base: Option<Vec<u8>>,
    pub head: Option<Vec<u8>>,
}

impl FileChange {
    pub fn new(path: impl Into<PathBuf>, base: Option<Vec<u8>>, head: Option<Vec<u8>>) -> Self {
        Self { path: path.into(), base, head }
    }
}

/// A review comment anchored to a line of the head revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub file: PathBuf,
    pub line: usize,
    pub text: String,
}

/// Runs extraction, change mapping and advice over the files of a change.
pub struct Analyzer {
    go: GoExtractor,
    manifest: ManifestExtractor,
    advisor: Advisor,
    validator: StructureValidator,
    parallel: bool,
    exclude_vendored: bool,
}

impl Analyzer {
    pub fn new(config: &Config) -> Self {
        let calculator = config.calculator();
        let advisor = Advisor::new(FieldOptimizer::new(calculator), Box::new(GoRenderer::new()))
            .with_regressions(config.report_regressions);

        Self {
            go: GoExtractor::new(config.word_size, calculator),
            manifest: ManifestExtractor::new(calculator),
            advisor,
            validator: StructureValidator::new(),
            parallel: config.parallel,
            exclude_vendored: config.exclude_vendored,
        }
    }

    pub fn extractor(&self, path: &Path) -> &dyn StructExtractor {
        extractor_for(path, &self.go, &self.manifest)
    }

    /// Comments for every file, in input order.
    pub fn review(&self, changes: &[FileChange]) -> Vec<Comment> {
        let _timer = ScopedTimer::new(&format!("review of {} files", changes.len()));

        let per_file: Vec<Vec<Comment>> = if self.parallel {
            changes.par_iter().map(|c| self.comments_for_change(c)).collect()
        } else {
            changes.iter().map(|c| self.comments_for_change(c)).collect()
        };

        per_file.into_iter().flatten().collect()
    }

    pub fn comments_for_change(&self, change: &FileChange) -> Vec<Comment> {
        let Some(head) = change.head.as_deref() else {
            return Vec::new();
        };

        let path = change.path.as_path();
        if self.exclude_vendored && is_vendored(path) {
            log::debug!("skipping vendored file {}", path.display());
            return Vec::new();
        }

        log::info!("analyzing {}", path.display());
        let extractor = self.extractor(path);

        let head_structs = match extractor.extract(path, head) {
            Ok(structs) => self.valid_structs(structs),
            Err(e) => {
                log::error!("unable to get structs from head revision of {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        log::debug!(
            "structs found in head: {}",
            head_structs.iter().map(StructLayout::name).collect::<Vec<_>>().join(", ")
        );

        let base = change.base.as_deref().unwrap_or_default();
        let base_structs = match change.base.as_deref().map(|b| extractor.extract(path, b)) {
            Some(Ok(structs)) => self.valid_structs(structs),
            Some(Err(e)) => {
                log::warn!("unable to get structs from base revision of {}: {}", path.display(), e);
                Vec::new()
            }
            None => Vec::new(),
        };

        let changed = changed_structs(base, head, &base_structs, &head_structs);
        log::debug!(
            "these structs changed: {}",
            changed.iter().map(|c| c.name()).collect::<Vec<_>>().join(", ")
        );

        let fence = self.advisor.renderer().fence();
        self.advisor
            .advise_all(&changed)
            .into_iter()
            .map(|s| {
                log::debug!("comment was added with suggestions for struct {}", s.struct_name);
                Comment {
                    file: change.path.clone(),
                    line: s.line,
                    text: s.comment_text(fence),
                }
            })
            .collect()
    }

    fn valid_structs(&self, structs: Vec<StructLayout>) -> Vec<StructLayout> {
        structs
            .into_iter()
            .filter(|s| match self.validator.validate(s) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("skipping struct {} with invalid layout: {}", s.name(), e);
                    false
                }
            })
            .collect()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// True when any directory of `path` is named `vendor`.
pub fn is_vendored(path: &Path) -> bool {
    let Some(dir) = path.parent() else {
        return false;
    };
    dir.components().any(|c| c == Component::Normal(OsStr::new("vendor")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "package p

type Config struct {
\tName string
\tPort int
}

type Point struct {
\tX int64
\tY int64
}
";

    const HEAD: &str = "package p

type Config struct {
\tName    string
\tEnabled bool
\tPort    int
\tDebug   bool
}

type Point struct {
\tX int64
\tY int64
}
";

    fn change(path: &str, base: Option<&str>, head: Option<&str>) -> FileChange {
        FileChange::new(path, base.map(|b| b.as_bytes().to_vec()), head.map(|h| h.as_bytes().to_vec()))
    }

    #[test]
    fn test_edited_struct_gets_a_comment() {
        let comments = Analyzer::default().comments_for_change(&change("pkg/config.go", Some(BASE), Some(HEAD)));

        assert_eq!(comments.len(), 1);
        let comment = &comments[0];
        assert_eq!(comment.file, PathBuf::from("pkg/config.go"));
        assert_eq!(comment.line, 3);
        assert!(comment.text.contains("Enabled bool: 16-17 (size 1, align 1)"));
        assert!(comment.text.contains("grows the padding of `Config` from 0 to 14 bytes"));
        assert!(comment.text.ends_with(
            "```go\ntype Config struct {\n\tName    string\n\tPort    int\n\tDebug   bool\n\tEnabled bool\n}\n```"
        ));
    }

    #[test]
    fn test_new_file_checks_every_struct() {
        let comments = Analyzer::default().comments_for_change(&change("new.go", None, Some(HEAD)));
        assert_eq!(comments.iter().map(|c| c.line).collect::<Vec<_>>(), vec![3]);
        assert!(!comments[0].text.contains("grows the padding"));
    }

    #[test]
    fn test_deleted_and_vendored_files_are_skipped() {
        let analyzer = Analyzer::default();
        assert!(analyzer.comments_for_change(&change("gone.go", Some(BASE), None)).is_empty());
        assert!(analyzer
            .comments_for_change(&change("vendor/lib/config.go", Some(BASE), Some(HEAD)))
            .is_empty());

        let keep_vendor = Analyzer::new(&Config::new().with_vendored_excluded(false));
        assert_eq!(
            keep_vendor
                .comments_for_change(&change("vendor/lib/config.go", Some(BASE), Some(HEAD)))
                .len(),
            1
        );
    }

    #[test]
    fn test_unparsable_head_is_skipped() {
        let comments = Analyzer::default().comments_for_change(&change("bad.go", Some(BASE), Some("type X struct {\n")));
        assert!(comments.is_empty());
    }

    #[test]
    fn test_unparsable_base_treats_structs_as_new() {
        let comments = Analyzer::default().comments_for_change(&change("p.go", Some("type {{{"), Some(HEAD)));
        assert_eq!(comments.len(), 1);
        assert!(!comments[0].text.contains("grows the padding"));
    }

    #[test]
    fn test_review_keeps_input_order() {
        let changes = vec![
            change("a.go", Some(BASE), Some(HEAD)),
            change("vendor/b.go", None, Some(HEAD)),
            change("c.go", None, Some(HEAD)),
            change("d.go", Some(HEAD), Some(HEAD)),
        ];

        let parallel = Analyzer::default().review(&changes);
        let sequential = Analyzer::new(&Config::new().with_parallel(false)).review(&changes);

        let files: Vec<&Path> = parallel.iter().map(|c| c.file.as_path()).collect();
        assert_eq!(files, vec![Path::new("a.go"), Path::new("c.go")]);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_manifest_files_use_the_manifest_extractor() {
        let manifest = r#"{"structs": [{"name": "S", "lines": {"start": 1, "end": 4}, "fields": [
            {"name": "a", "type": "bool", "size": 1, "align": 1},
            {"name": "b", "type": "int64", "size": 8, "align": 8},
            {"name": "c", "type": "bool", "size": 1, "align": 1}
        ]}]}"#;
        let comments = Analyzer::default().comments_for_change(&change("layout.json", None, Some(manifest)));
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].line, 1);
    }

    #[test]
    fn test_named_field_layout_is_not_credited() {
        let inner = "package p\n\ntype Inner struct {\n\ta bool\n\tb int64\n\tc bool\n}\n\n";
        let base = format!("{}type Outer struct {{\n\tin Inner\n}}\n", inner);
        let head = format!("{}type Outer struct {{\n\tin Inner\n\tok bool\n}}\n", inner);

        let comments = Analyzer::default().comments_for_change(&change("outer.go", Some(base.as_str()), Some(head.as_str())));
        assert!(comments.is_empty());

        let grown = head.replace("\tc bool\n", "\tc bool\n\td bool\n");
        let comments = Analyzer::default().comments_for_change(&change("outer.go", Some(head.as_str()), Some(grown.as_str())));
        assert_eq!(comments.iter().map(|c| c.line).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_is_vendored() {
        assert!(is_vendored(Path::new("vendor/x.go")));
        assert!(is_vendored(Path::new("a/vendor/b/x.go")));
        assert!(!is_vendored(Path::new("vendor.go")));
        assert!(!is_vendored(Path::new("src/vendoring/x.go")));
    }
}
