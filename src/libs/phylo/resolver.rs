use super::table::LabelTable;

/// Label given to branches missing from the table.
pub const DEFAULT_LABEL: &str = "1.0";

/// Looks up the label to attach to a branch.
#[derive(Debug, Clone)]
pub struct LabelResolver<'a> {
    table: &'a LabelTable,
    default: String,
}

impl<'a> LabelResolver<'a> {
    pub fn new(table: &'a LabelTable) -> Self {
        Self {
            table,
            default: DEFAULT_LABEL.to_string(),
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    pub fn default_label(&self) -> &str {
        &self.default
    }

    /// The mapped label, verbatim, or the default label.
    ///
    /// ```
    /// use gloss::libs::phylo::{LabelResolver, LabelTable};
    /// let table: LabelTable = [("Homo_sapiens", "Foreground")].into_iter().collect();
    /// let resolver = LabelResolver::new(&table);
    /// assert_eq!(resolver.resolve("Homo_sapiens"), "Foreground");
    /// assert_eq!(resolver.resolve("Mus_musculus"), "1.0");
    /// ```
    pub fn resolve(&self, token: &str) -> &str {
        self.table.get(token).unwrap_or(self.default.as_str())
    }
}
