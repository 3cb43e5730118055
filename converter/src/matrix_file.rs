//! Reading matrix files back into grids.
//!
//! Two readers share one tokenizer:
//! - [`read_blocks`] walks a whole file and uses each header's declared row
//!   count to find where the block ends. Blank lines between blocks are
//!   optional.
//! - [`read_body_grid`] reads a single grid whose header is decoration only;
//!   the dimensions come from the rows actually present.
//!
//! Every malformed token or ragged row is reported with its 1-based line
//! number rather than silently truncated.

use std::io::{self, BufRead};

use ndarray::Array2;
use thiserror::Error;

use crate::grid::GridShape;

/// Errors raised while parsing a matrix file.
#[derive(Error, Debug)]
pub enum MatrixFileError {
    #[error("I/O error reading matrix file: {0}")]
    Io(#[from] io::Error),
    #[error("Line {line}: invalid header {text:?}, expected \"<lines> <columns>\"")]
    BadHeader { line: usize, text: String },
    #[error("Line {line}: token {token:?} is not a number")]
    BadToken { line: usize, token: String },
    #[error("Line {line}: expected {expected} values, found {found}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Block at line {header_line} declares {expected} rows but only {found} follow")]
    Truncated {
        header_line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Line {line}: unexpected content after the grid body: {source}")]
    TrailingData {
        line: usize,
        #[source]
        source: Box<MatrixFileError>,
    },
    #[error("Matrix file contains no grid rows")]
    Empty,
}

/// One parsed block: its declared shape and its cells.
#[derive(Debug, Clone, PartialEq)]
pub struct GridBlock {
    pub shape: GridShape,
    pub cells: Array2<f64>,
}

/// Every block of a matrix file, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatrixFile {
    pub blocks: Vec<GridBlock>,
}

impl MatrixFile {
    /// Parse from any buffered reader. See [`read_blocks`].
    pub fn read<R: BufRead>(reader: R) -> Result<Self, MatrixFileError> {
        read_blocks(reader).map(|blocks| Self { blocks })
    }

    /// The first block, which holds the image or random matrix.
    pub fn primary(&self) -> Option<&GridBlock> {
        self.blocks.first()
    }
}

fn parse_row(line_no: usize, text: &str) -> Result<Vec<f64>, MatrixFileError> {
    text.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| MatrixFileError::BadToken {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect()
}

fn parse_header(line_no: usize, text: &str) -> Result<GridShape, MatrixFileError> {
    let bad = || MatrixFileError::BadHeader {
        line: line_no,
        text: text.to_string(),
    };
    let mut tokens = text.split_whitespace();
    let (Some(lines), Some(columns), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(bad());
    };
    let lines = lines.parse::<usize>().map_err(|_| bad())?;
    let columns = columns.parse::<usize>().map_err(|_| bad())?;
    GridShape::new(lines, columns).ok_or_else(bad)
}

/// Number lines from 1 and drop the blank ones.
fn non_blank<I>(lines: I) -> impl Iterator<Item = Result<(usize, String), io::Error>>
where
    I: Iterator<Item = (usize, io::Result<String>)>,
{
    lines
        .map(|(idx, line)| line.map(|l| (idx + 1, l)))
        .filter(|res| !matches!(res, Ok((_, l)) if l.trim().is_empty()))
}

/// Parse header-delimited blocks from numbered, non-blank lines.
fn parse_blocks<I>(mut lines: I) -> Result<Vec<GridBlock>, MatrixFileError>
where
    I: Iterator<Item = Result<(usize, String), io::Error>>,
{
    let mut blocks = Vec::new();

    while let Some(header) = lines.next() {
        let (header_line, text) = header?;
        let shape = parse_header(header_line, &text)?;
        let mut values = Vec::new();

        for found in 0..shape.lines {
            let Some(row) = lines.next() else {
                return Err(MatrixFileError::Truncated {
                    header_line,
                    expected: shape.lines,
                    found,
                });
            };
            let (line_no, text) = row?;
            let row = parse_row(line_no, &text)?;
            if row.len() != shape.columns {
                return Err(MatrixFileError::RowWidth {
                    line: line_no,
                    expected: shape.columns,
                    found: row.len(),
                });
            }
            values.extend(row);
        }

        let cells = Array2::from_shape_vec((shape.lines, shape.columns), values)
            .expect("row widths checked against header");
        log::debug!("Parsed {shape} block at line {header_line}");
        blocks.push(GridBlock { shape, cells });
    }

    Ok(blocks)
}

/// Parse every header-delimited block of a matrix file.
///
/// Block boundaries come from the declared row counts; the blank line the
/// writers emit after each block is accepted but never required.
pub fn read_blocks<R: BufRead>(reader: R) -> Result<Vec<GridBlock>, MatrixFileError> {
    parse_blocks(non_blank(reader.lines().enumerate()))
}

/// Read a single grid whose header line is decoration.
///
/// The first line is skipped. The body runs until the first blank line or
/// end of input; its row count and the token count of its first row define
/// the grid. Every later row must match that width. A header that disagrees
/// with the body is logged, not rejected.
///
/// Anything after the blank line must be well-formed header-delimited blocks
/// (the kernel of an exported file, for instance); those are skipped. Other
/// content is [`MatrixFileError::TrailingData`].
pub fn read_body_grid<R: BufRead>(reader: R) -> Result<Array2<f64>, MatrixFileError> {
    let mut lines = reader.lines().enumerate();
    let header = match lines.next() {
        Some((_, line)) => line?,
        None => return Err(MatrixFileError::Empty),
    };

    let mut width = None;
    let mut rows = 0usize;
    let mut values = Vec::new();

    for (idx, line) in lines.by_ref() {
        let text = line?;
        if text.trim().is_empty() {
            break;
        }
        let line_no = idx + 1;
        let row = parse_row(line_no, &text)?;
        let expected = *width.get_or_insert(row.len());
        if row.len() != expected {
            return Err(MatrixFileError::RowWidth {
                line: line_no,
                expected,
                found: row.len(),
            });
        }
        values.extend(row);
        rows += 1;
    }

    let mut trailing = non_blank(lines);
    if let Some(first) = trailing.next() {
        let (line, text) = first?;
        match parse_blocks(std::iter::once(Ok((line, text))).chain(trailing)) {
            Ok(blocks) => log::debug!("Skipped {} block(s) after the grid body", blocks.len()),
            Err(MatrixFileError::Io(e)) => return Err(MatrixFileError::Io(e)),
            Err(cause) => {
                return Err(MatrixFileError::TrailingData {
                    line,
                    source: Box::new(cause),
                })
            }
        }
    }

    let Some(columns) = width else {
        return Err(MatrixFileError::Empty);
    };

    let declared = parse_header(1, &header).ok();
    if declared != GridShape::new(rows, columns) {
        log::warn!(
            "Header {:?} does not match body of {} rows x {} columns",
            header.trim(),
            rows,
            columns
        );
    }

    Ok(Array2::from_shape_vec((rows, columns), values).expect("row widths checked"))
}
