use super::error::TreeError;
use std::collections::BTreeMap;
use std::io::BufRead;

/// Branch name -> label, loaded from two-column text.
///
/// Each non-blank line holds `<name> <label>`, separated by a tab, or by
/// whitespace when the line has no tab. Columns past the second are ignored.
/// A name listed twice keeps the label of its last line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LabelTable {
    label_of: BTreeMap<String, String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a table from text.
    ///
    /// ```
    /// use gloss::libs::phylo::LabelTable;
    /// let table = LabelTable::from_reader("Homo_sapiens\tForeground\n\nMus 2.0\n".as_bytes()).unwrap();
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.get("Homo_sapiens"), Some("Foreground"));
    /// assert_eq!(table.get("Mus"), Some("2.0"));
    ///
    /// assert!(LabelTable::from_reader("Homo_sapiens\n".as_bytes()).is_err());
    /// ```
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, TreeError> {
        let mut table = Self::new();
        table.extend_from_reader(reader)?;
        Ok(table)
    }

    /// Adds the rows of a file, `stdin`, or a `.gz` file; they override
    /// entries already present.
    pub fn extend_from_file(&mut self, infile: &str) -> Result<(), TreeError> {
        self.load(crate::reader(infile)?, infile)
    }

    /// Adds the rows of `reader`; they override entries already present.
    pub fn extend_from_reader<R: BufRead>(&mut self, reader: R) -> Result<(), TreeError> {
        self.load(reader, "input")
    }

    fn load<R: BufRead>(&mut self, reader: R, path: &str) -> Result<(), TreeError> {
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| TreeError::ReadError {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
            // byte order mark
            let row = if i == 0 {
                line.strip_prefix('\u{feff}').unwrap_or(&line)
            } else {
                &line
            };
            if row.trim().is_empty() {
                continue;
            }

            let (name, label) = split_row(row).ok_or_else(|| TreeError::MalformedTableRow {
                line: i + 1,
                content: row.to_string(),
            })?;
            self.insert(name, label);
        }

        Ok(())
    }

    /// Sets the label of `name`, returning the label it replaces.
    pub fn insert(&mut self, name: impl Into<String>, label: impl Into<String>) -> Option<String> {
        let name = name.into();
        let label = label.into();
        let previous = self.label_of.insert(name.clone(), label.clone());
        if let Some(prev) = &previous {
            if *prev != label {
                log::warn!("Label of {} redefined: {} -> {}", name, prev, label);
            }
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.label_of.get(name).map(|s| s.as_str())
    }

    /// Names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.label_of.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.label_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.label_of.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, label) in iter {
            table.insert(name, label);
        }
        table
    }
}

fn split_row(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut fields: Vec<&str> = if line.contains('\t') {
        line.split('\t').map(|f| f.trim()).collect()
    } else {
        line.split_whitespace().collect()
    };
    fields.retain(|f| !f.is_empty());

    match fields.as_slice() {
        [name, label, ..] => Some((*name, *label)),
        _ => None,
    }
}
