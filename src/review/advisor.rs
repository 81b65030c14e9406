// Sat Oct 17 2026 - Alex

use crate::diff::ChangedStruct;
use crate::output::{GoRenderer, Renderer};
use crate::structure::{FieldOptimizer, LayoutError};
use serde::Serialize;

/// The base revision had less padding than the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Regression {
    pub base_padding: u64,
    pub head_padding: u64,
}

/// A proposed reordering for one struct, ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub struct_name: String,
    /// First line of the declaration in the head revision.
    pub line: usize,
    /// One line per field of the current layout, padding included.
    pub before: Vec<String>,
    /// The proposed declaration.
    pub after: String,
    pub current_padding: u64,
    pub optimized_padding: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regression: Option<Regression>,
}

impl Suggestion {
    pub fn saved_bytes(&self) -> u64 {
        self.current_padding.saturating_sub(self.optimized_padding)
    }

    /// Review comment body, with the declaration in a code block tagged
    /// `fence`.
    pub fn comment_text(&self, fence: &str) -> String {
        let mut text = String::from("We've detected the memory layout could be improved to reduce padding.");
        text.push_str("\n\n**Struct info:**\n");
        for line in &self.before {
            text.push_str(line);
            text.push('\n');
        }
        if let Some(regression) = &self.regression {
            text.push_str(&format!(
                "\nThis change grows the padding of `{}` from {} to {} bytes.\n",
                self.struct_name, regression.base_padding, regression.head_padding
            ));
        }
        text.push_str(&format!("\nHere's the proposed layout:\n\n```{}\n{}\n```", fence, self.after));
        text
    }
}

/// Decides, per changed struct, whether a better layout is worth reporting.
pub struct Advisor {
    optimizer: FieldOptimizer,
    renderer: Box<dyn Renderer>,
    report_regressions: bool,
}

impl Advisor {
    pub fn new(optimizer: FieldOptimizer, renderer: Box<dyn Renderer>) -> Self {
        Self {
            optimizer,
            renderer,
            report_regressions: true,
        }
    }

    pub fn with_regressions(mut self, report: bool) -> Self {
        self.report_regressions = report;
        self
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    /// Returns a suggestion only when the optimized layout has strictly less
    /// padding than the head layout.
    pub fn advise(&self, changed: &ChangedStruct) -> Result<Option<Suggestion>, LayoutError> {
        let head = &changed.head;
        let optimized = self.optimizer.optimize(head)?;

        log::debug!(
            "for struct {} padding was {}, but could be optimized to {}",
            head.name(),
            head.padding(),
            optimized.padding()
        );

        if optimized.padding() >= head.padding() {
            return Ok(None);
        }

        let regression = changed
            .base
            .as_ref()
            .filter(|_| self.report_regressions)
            .filter(|base| base.padding() < head.padding())
            .map(|base| Regression {
                base_padding: base.padding(),
                head_padding: head.padding(),
            });

        Ok(Some(Suggestion {
            struct_name: head.name().to_string(),
            line: head.lines().start,
            before: head.fields().iter().map(ToString::to_string).collect(),
            after: self.renderer.render(&optimized),
            current_padding: head.padding(),
            optimized_padding: optimized.padding(),
            regression,
        }))
    }

    /// Advises on every struct. A struct whose layout fails is logged and
    /// skipped.
    pub fn advise_all(&self, changed: &[ChangedStruct]) -> Vec<Suggestion> {
        changed
            .iter()
            .filter_map(|c| match self.advise(c) {
                Ok(suggestion) => suggestion,
                Err(e) => {
                    log::warn!("skipping struct {}: {}", c.name(), e);
                    None
                }
            })
            .collect()
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(FieldOptimizer::default(), Box::new(GoRenderer::new()))
    }
}
