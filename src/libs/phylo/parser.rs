use super::error::TreeError;
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while},
    character::complete::{char, multispace0},
    combinator::{cut, eof, map, opt, recognize},
    error::{context, ContextError, ErrorKind, FromExternalError, ParseError},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded},
    IResult, Offset, Parser,
};
use std::ops::Range;

// ================================================================================================
// Error Handling Structures
// ================================================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum DetailedErrorKind {
    Context(&'static str),
    Nom(ErrorKind),
}

/// A custom error type for nom that accumulates context and error kinds.
/// This allows for more informative error messages when parsing fails.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailedError<'a> {
    pub errors: Vec<(&'a str, DetailedErrorKind)>,
}

impl<'a> ParseError<&'a str> for DetailedError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        DetailedError {
            errors: vec![(input, DetailedErrorKind::Nom(kind))],
        }
    }

    fn append(input: &'a str, kind: ErrorKind, mut other: Self) -> Self {
        other.errors.push((input, DetailedErrorKind::Nom(kind)));
        other
    }
}

impl<'a> ContextError<&'a str> for DetailedError<'a> {
    fn add_context(input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        other.errors.push((input, DetailedErrorKind::Context(ctx)));
        other
    }
}

impl<'a, E> FromExternalError<&'a str, E> for DetailedError<'a> {
    fn from_external_error(input: &'a str, kind: ErrorKind, _e: E) -> Self {
        DetailedError {
            errors: vec![(input, DetailedErrorKind::Nom(kind))],
        }
    }
}

// ================================================================================================
// Span Model
// ================================================================================================

/// A node name as it appears in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// The name with quotes removed (`'Homo sapiens'` -> `Homo sapiens`)
    pub text: String,
    /// Byte range of the name in the source, quotes included
    pub span: Range<usize>,
}

/// One node of a scanned Newick tree.
///
/// Only positions are kept: the source text itself is never copied into the
/// model, so a re-serializer can splice edits into the original string by
/// offset instead of searching for names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clade {
    pub name: Option<Name>,
    /// Byte range of an existing `:<value>` annotation, colon included
    pub annotation: Option<Range<usize>>,
    pub children: Vec<Clade>,
}

impl Clade {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Children before parents.
    ///
    /// In Newick an internal node's name follows the text of its children, so
    /// this is also the left-to-right order of names in the source.
    pub fn postorder(&self) -> Vec<&Clade> {
        let mut out = Vec::new();
        self.collect_postorder(&mut out);
        out
    }

    fn collect_postorder<'a>(&'a self, out: &mut Vec<&'a Clade>) {
        for child in &self.children {
            child.collect_postorder(out);
        }
        out.push(self);
    }
}

// ================================================================================================
// Intermediate Structure
// ================================================================================================

/// Borrowed form of a `Clade`, holding sub-slices of the input instead of
/// offsets. Converted once the whole tree has been recognized.
#[derive(Debug)]
struct ParsedClade<'a> {
    name: Option<&'a str>,
    annotation: Option<&'a str>,
    children: Vec<ParsedClade<'a>>,
}

impl<'a> ParsedClade<'a> {
    fn to_clade(self, source: &str) -> Clade {
        let span_of = |s: &str| {
            let start = source.offset(s);
            start..start + s.len()
        };

        Clade {
            name: self.name.map(|raw| Name {
                text: unquote(raw),
                span: span_of(raw),
            }),
            annotation: self.annotation.map(span_of),
            children: self
                .children
                .into_iter()
                .map(|child| child.to_clade(source))
                .collect(),
        }
    }
}

fn unquote(raw: &str) -> String {
    for q in ['\'', '"'] {
        if raw.len() >= 2 && raw.starts_with(q) && raw.ends_with(q) {
            let doubled = format!("{}{}", q, q);
            return raw[1..raw.len() - 1].replace(&doubled, &q.to_string());
        }
    }
    raw.to_string()
}

// ================================================================================================
// Parsers
// ================================================================================================

// Newick structural characters; unquoted labels and annotation values stop at these
const RESERVED: &str = "():;,[]";

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

fn trimmed(s: &str) -> Option<&str> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// Label
// Returns the raw slice: quotes are kept so the span covers them.
// - Unquoted strings stop at reserved chars and are trimmed
// - 'single quoted', with '' as an escaped quote
// - "double quoted", with "" as an escaped quote
fn parse_label(input: &str) -> IResult<&str, Option<&str>, DetailedError<'_>> {
    let unquoted = map(take_while(|c: char| !RESERVED.contains(c)), trimmed);

    let single_quoted = recognize(delimited(
        char('\''),
        many0(alt((is_not("'"), tag("''")))),
        char('\''),
    ));

    let double_quoted = recognize(delimited(
        char('"'),
        many0(alt((is_not("\""), tag("\"\"")))),
        char('"'),
    ));

    context(
        "label",
        alt((
            map(ws(single_quoted), Some),
            map(ws(double_quoted), Some),
            unquoted,
        )),
    )
    .parse(input)
}

// Annotation
// A colon and everything up to the next structural character. Branch lengths
// are the usual payload, but tags written by a previous run (`:Foreground`)
// are recognized the same way so they can be replaced.
fn parse_annotation(input: &str) -> IResult<&str, &str, DetailedError<'_>> {
    context(
        "annotation",
        map(
            preceded(
                multispace0,
                recognize((char(':'), take_while(|c: char| !RESERVED.contains(c)))),
            ),
            str::trim_end,
        ),
    )
    .parse(input)
}

// Comment
// [anything but a closing bracket], possibly several in a row. Comments are
// left in the text untouched.
fn parse_comments(input: &str) -> IResult<&str, Vec<&str>, DetailedError<'_>> {
    context(
        "comment",
        many0(preceded(
            multispace0,
            delimited(char('['), take_while(|c: char| c != ']'), cut(char(']'))),
        )),
    )
    .parse(input)
}

// Subtree
// (child1, child2, ...)[Comment]Label[Comment]:Annotation[Comment]
fn parse_subtree(input: &str) -> IResult<&str, ParsedClade<'_>, DetailedError<'_>> {
    // Once a '(' is seen, a missing ')' is an error rather than a reason to backtrack
    let (input, children) = context(
        "children",
        opt(preceded(
            ws(char('(')),
            cut((
                separated_list1(ws(char(',')), parse_subtree),
                ws(char(')')),
            )),
        )),
    )
    .parse(input)?;

    let (input, _) = parse_comments(input)?;
    let (input, name) = parse_label(input)?;
    let (input, _) = parse_comments(input)?;
    let (input, annotation) = opt(parse_annotation).parse(input)?;
    let (input, _) = parse_comments(input)?;

    let node = ParsedClade {
        name,
        annotation,
        children: children.map(|(c, _)| c).unwrap_or_default(),
    };

    Ok((input, node))
}

// ================================================================================================
// Entry Point
// ================================================================================================

/// Scans a single Newick tree, recording the position of every name and
/// annotation.
///
/// The tree must end with `;`, and nothing but whitespace may follow it. A
/// leading byte order mark is skipped; spans still index into `input`.
///
/// # Example
/// ```
/// use gloss::libs::phylo::parser::parse_newick;
///
/// let input = "(A:0.1,B:0.2)Root;";
/// let root = parse_newick(input).unwrap();
/// let name = root.name.as_ref().unwrap();
/// assert_eq!(name.text, "Root");
/// assert_eq!(&input[name.span.clone()], "Root");
///
/// let a = &root.children[0];
/// assert_eq!(&input[a.annotation.clone().unwrap()], ":0.1");
///
/// assert!(parse_newick("((A,B);").is_err());
/// ```
pub fn parse_newick(input: &str) -> Result<Clade, TreeError> {
    let body = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut parser = (ws(parse_subtree), ws(char(';')), eof);

    match parser.parse(body) {
        Ok((_, (root, _, _))) => Ok(root.to_clade(input)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(make_tree_error(body, e)),
        Err(nom::Err::Incomplete(_)) => Err(TreeError::ParseError {
            message: "Incomplete input".to_string(),
            line: 0,
            column: 0,
            snippet: "".to_string(),
        }),
    }
}

// Helper to convert nom errors into friendly TreeError
fn make_tree_error(input: &str, e: DetailedError) -> TreeError {
    let remaining = e.errors.first().map(|(r, _)| *r).unwrap_or(input);
    let offset = input.offset(remaining);

    // Calculate line/col
    let prefix = &input[..offset];
    let line = prefix.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = prefix.rfind('\n').map(|p| p + 1).unwrap_or(0);
    let column = prefix[last_newline..].chars().count() + 1;

    let mut msg = String::new();
    for (_, kind) in e.errors.iter().rev() {
        match kind {
            DetailedErrorKind::Context(ctx) => {
                msg.push_str(&format!("while parsing {}:\n", ctx));
            }
            DetailedErrorKind::Nom(k) => {
                msg.push_str(&format!("  error: {:?}\n", k));
            }
        }
    }

    TreeError::ParseError {
        message: msg,
        line,
        column,
        snippet: remaining.chars().take(50).collect(),
    }
}
