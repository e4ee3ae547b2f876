use crate::libs::phylo::TreeError;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};

/// Opens `input` for reading. `stdin` reads standard input, `.gz` files are
/// decompressed on the fly.
///
/// ```
/// use std::io::BufRead;
/// let reader = gloss::reader("tests/newick/abc.nwk").unwrap();
/// assert_eq!(reader.lines().count(), 1);
///
/// assert!(gloss::reader("tests/newick/not-there.nwk").is_err());
/// ```
pub fn reader(input: &str) -> Result<Box<dyn BufRead>, TreeError> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path).map_err(|why| TreeError::MissingInputFile {
            path: path.display().to_string(),
            reason: why.to_string(),
        })?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

/// Reads the whole of `input` into memory.
pub fn read_to_string(input: &str) -> Result<String, TreeError> {
    let mut reader = reader(input)?;
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|why| TreeError::ReadError {
            path: input.to_string(),
            reason: why.to_string(),
        })?;

    Ok(content)
}

pub fn writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        Box::new(BufWriter::new(std::fs::File::create(output)?))
    };

    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_to_string() {
        let content = read_to_string("tests/newick/abc.nwk").unwrap();
        assert_eq!(content.trim(), "((A,B),C);");
    }

    #[test]
    fn test_missing_file() {
        match read_to_string("tests/newick/missing.nwk") {
            Err(TreeError::MissingInputFile { path, .. }) => {
                assert_eq!(path, "tests/newick/missing.nwk")
            }
            other => panic!("Expected MissingInputFile, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"((A,\xff),C);").unwrap();
        let infile = file.path().to_str().unwrap().to_string();

        match read_to_string(&infile) {
            Err(TreeError::ReadError { path, .. }) => assert_eq!(path, infile),
            other => panic!("Expected ReadError, got {:?}", other),
        }
    }
}
