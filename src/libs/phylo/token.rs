use super::error::TreeError;
use super::parser::{parse_newick, Clade};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use std::ops::Range;

lazy_static! {
    static ref NUMERIC: Regex = Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)$").unwrap();
}

/// Decides whether a node name is a branch token.
pub type Classifier = fn(&str) -> bool;

/// The default classifier: any non-empty name that is not purely numeric.
///
/// Numeric names are support values written in the label slot of internal
/// nodes (`(A,B)95`), not branch identifiers.
///
/// ```
/// use gloss::libs::phylo::token::is_branch_token;
/// assert!(is_branch_token("Homo_sapiens"));
/// assert!(is_branch_token("AB1"));
/// assert!(!is_branch_token("95"));
/// assert!(!is_branch_token("0.87"));
/// assert!(!is_branch_token(""));
/// ```
pub fn is_branch_token(name: &str) -> bool {
    !name.is_empty() && !NUMERIC.is_match(name)
}

/// A named branch at a fixed position of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub span: Range<usize>,
    pub is_leaf: bool,
}

/// The result of tokenizing a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    /// The tree with every `:<value>` annotation removed
    pub cleared: String,
    /// Branch tokens in left-to-right order; spans refer to the original text
    pub branches: Vec<Branch>,
}

impl Tokenized {
    /// Branch names in order of first appearance, each once.
    pub fn distinct(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.branches
            .iter()
            .map(|b| b.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

/// Branch tokens of a scanned tree, in textual order.
pub fn branches(root: &Clade, classifier: Classifier) -> Vec<Branch> {
    root.postorder()
        .into_iter()
        .filter_map(|clade| {
            let name = clade.name.as_ref()?;
            if !classifier(&name.text) {
                return None;
            }
            Some(Branch {
                name: name.text.clone(),
                span: name.span.clone(),
                is_leaf: clade.is_leaf(),
            })
        })
        .collect()
}

/// Removes every existing annotation of a scanned tree from `text`.
pub fn clear(text: &str, root: &Clade) -> String {
    let mut cleared = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in root.postorder().iter().filter_map(|c| c.annotation.clone()) {
        cleared.push_str(&text[cursor..span.start]);
        cursor = span.end;
    }
    cleared.push_str(&text[cursor..]);
    cleared
}

/// Removes every `:<value>` annotation, at any depth.
///
/// ```
/// use gloss::libs::phylo::token::strip_annotations;
/// let cleared = strip_annotations("((A:0.1,B:0.2):0.05,C:0.3);").unwrap();
/// assert_eq!(cleared, "((A,B),C);");
/// ```
pub fn strip_annotations(text: &str) -> Result<String, TreeError> {
    let root = parse_newick(text)?;
    Ok(clear(text, &root))
}

/// Strips annotations and lists branch tokens with the default classifier.
pub fn tokenize(text: &str) -> Result<Tokenized, TreeError> {
    tokenize_with(text, is_branch_token)
}

pub fn tokenize_with(text: &str, classifier: Classifier) -> Result<Tokenized, TreeError> {
    let root = parse_newick(text)?;
    Ok(Tokenized {
        cleared: clear(text, &root),
        branches: branches(&root, classifier),
    })
}
