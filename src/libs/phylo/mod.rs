pub mod annotator;
pub mod error;
pub mod parser;
pub mod resolver;
pub mod table;
pub mod token;

pub use annotator::Annotator;
pub use error::TreeError;
pub use resolver::{LabelResolver, DEFAULT_LABEL};
pub use table::LabelTable;
pub use token::{Branch, Tokenized};
