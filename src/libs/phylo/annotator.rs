use super::error::TreeError;
use super::parser::{parse_newick, Clade};
use super::resolver::LabelResolver;
use super::token::{is_branch_token, Classifier};
use std::ops::Range;

/// Re-writes a Newick tree with one `:<label>` per branch.
///
/// Existing annotations are dropped. Each branch token gets its resolved label
/// right after its name. A node without a token keeps an annotation only if
/// it had one, and then receives the default label.
///
/// Edits are spliced in by byte offset, so names that are prefixes of other
/// names (`AB`, `ABC`) never interfere, and brackets, commas, comments and
/// whitespace pass through untouched.
#[derive(Debug, Clone)]
pub struct Annotator<'a> {
    resolver: LabelResolver<'a>,
    classifier: Classifier,
}

impl<'a> Annotator<'a> {
    pub fn new(resolver: LabelResolver<'a>) -> Self {
        Self {
            resolver,
            classifier: is_branch_token,
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// ```
    /// use gloss::libs::phylo::{Annotator, LabelResolver, LabelTable};
    /// let table: LabelTable = [("A", "2.0")].into_iter().collect();
    /// let annotator = Annotator::new(LabelResolver::new(&table));
    /// assert_eq!(
    ///     annotator.annotate("((A,B),C);").unwrap(),
    ///     "((A:2.0,B:1.0),C:1.0);"
    /// );
    /// ```
    pub fn annotate(&self, text: &str) -> Result<String, TreeError> {
        let root = parse_newick(text)?;
        Ok(self.annotate_clade(text, &root))
    }

    /// Annotates `text`, which `root` must have been scanned from.
    pub fn annotate_clade(&self, text: &str, root: &Clade) -> String {
        let edits = self.edits(root);
        log::debug!("{} edits to apply", edits.len());
        splice(text, &edits)
    }

    fn edits(&self, root: &Clade) -> Vec<(Range<usize>, String)> {
        let mut edits = Vec::new();

        // postorder visits names and annotations left to right
        for clade in root.postorder() {
            let token = clade
                .name
                .as_ref()
                .filter(|name| (self.classifier)(&name.text));

            match (token, &clade.annotation) {
                (Some(name), annotation) => {
                    let label = self.resolver.resolve(&name.text);
                    log::trace!("{} => {}", name.text, label);
                    edits.push((name.span.end..name.span.end, format!(":{}", label)));
                    if let Some(span) = annotation {
                        edits.push((span.clone(), String::new()));
                    }
                }
                (None, Some(span)) => {
                    edits.push((span.clone(), format!(":{}", self.resolver.default_label())));
                }
                (None, None) => {}
            }
        }

        edits
    }
}

// Edits must be sorted and must not overlap
fn splice(text: &str, edits: &[(Range<usize>, String)]) -> String {
    let extra: usize = edits.iter().map(|(_, s)| s.len()).sum();
    let mut out = String::with_capacity(text.len() + extra);
    let mut cursor = 0;
    for (span, replacement) in edits {
        out.push_str(&text[cursor..span.start]);
        out.push_str(replacement);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}
