//! Text reader and writer for segment lists and intersection sets.
//!
//! The input format is one segment per line as four whitespace
//! separated reals `x1 y1 x2 y2`, preceded by a count line. The count
//! is informational and is not required to match the number of
//! segments that follow. The output format mirrors it: a count line
//! followed by one `x y` intersection per line.

use std::fmt;
use std::io::{self, BufRead, Write};

use geo::{Coordinate, Line};

/// Error reading a segment list.
///
/// Malformed input fails fast with the offending line number; it never
/// reaches the sweep.
#[derive(Debug)]
pub enum ReadSegmentsError {
    Io(io::Error),
    /// A segment line did not have exactly four fields.
    TokenCount { line: usize, found: usize },
    /// A field could not be parsed as a real number.
    InvalidNumber { line: usize, token: String },
}

impl fmt::Display for ReadSegmentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadSegmentsError::Io(e) => write!(f, "failed to read segment list: {}", e),
            ReadSegmentsError::TokenCount { line, found } => write!(
                f,
                "line {}: expected 4 coordinates `x1 y1 x2 y2`, found {} fields",
                line, found
            ),
            ReadSegmentsError::InvalidNumber { line, token } => {
                write!(f, "line {}: invalid coordinate {:?}", line, token)
            }
        }
    }
}

impl std::error::Error for ReadSegmentsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadSegmentsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReadSegmentsError {
    fn from(e: io::Error) -> Self {
        ReadSegmentsError::Io(e)
    }
}

/// Read a segment list.
///
/// The first line (the segment count) is discarded; blank lines are
/// skipped.
pub fn read_segments<R: BufRead>(reader: R) -> Result<Vec<Line<f64>>, ReadSegmentsError> {
    let mut lines = reader.lines();
    if let Some(count_line) = lines.next() {
        count_line?;
    }

    let mut segments = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        let lineno = idx + 2;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != 4 {
            return Err(ReadSegmentsError::TokenCount {
                line: lineno,
                found: tokens.len(),
            });
        }

        let mut coords = [0f64; 4];
        for (value, token) in coords.iter_mut().zip(&tokens) {
            *value = token.parse().map_err(|_| ReadSegmentsError::InvalidNumber {
                line: lineno,
                token: (*token).to_string(),
            })?;
        }
        segments.push(Line::new(
            Coordinate {
                x: coords[0],
                y: coords[1],
            },
            Coordinate {
                x: coords[2],
                y: coords[3],
            },
        ));
    }
    Ok(segments)
}

/// Write an intersection set: a count line, then one `x y` per line.
pub fn write_intersections<W: Write>(
    mut writer: W,
    points: &[Coordinate<f64>],
) -> io::Result<()> {
    writeln!(writer, "{}", points.len())?;
    for pt in points {
        writeln!(writer, "{} {}", pt.x, pt.y)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_segments() {
        let input = "2\n0 0 2 2\n0.5 2.0 2.5 0.0\n";
        let segments = read_segments(input.as_bytes()).unwrap();
        assert_eq!(
            segments,
            vec![
                Line::from([(0., 0.), (2., 2.)]),
                Line::from([(0.5, 2.), (2.5, 0.)]),
            ]
        );
    }

    #[test]
    fn test_count_line_is_informational() {
        // The count does not have to match.
        let input = "7\n0 0 1 1\n";
        assert_eq!(read_segments(input.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn test_skips_blank_lines() {
        let input = "1\n\n0 0 1 1\n\n";
        assert_eq!(read_segments(input.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn test_wrong_token_count() {
        let input = "1\n0 0 1\n";
        match read_segments(input.as_bytes()) {
            Err(ReadSegmentsError::TokenCount { line: 2, found: 3 }) => {}
            other => panic!("expected TokenCount error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_number() {
        let input = "1\n0 0 1 one\n";
        match read_segments(input.as_bytes()) {
            Err(ReadSegmentsError::InvalidNumber { line: 2, token }) => {
                assert_eq!(token, "one");
            }
            other => panic!("expected InvalidNumber error, got {:?}", other),
        }
    }

    #[test]
    fn test_write_intersections() {
        let points = vec![Coordinate { x: 1., y: 1. }, Coordinate { x: 2.5, y: 0.5 }];
        let mut out = Vec::new();
        write_intersections(&mut out, &points).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2\n1 1\n2.5 0.5\n");
    }
}
