//! # Point list export
//!
//! Points are written one per line as `y,x`, without a header, using the shortest decimal form
//! that reads back to the same value.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use log::info;

use crate::auto::loc::Point;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Could not open point file {0}: {1}")]
    FileError(String, std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Expected 2 fields on line {0}, found {1}")]
    WrongFieldCount(u64, usize),

    #[error("Could not parse {0:?} on line {1}")]
    ParseError(String, u64),
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Write the points to the writer in order.
pub fn write_points<W: Write>(writer: W, points: &[Point]) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for p in points {
        wtr.write_record(&[p.y.to_string(), p.x.to_string()])?;
    }

    wtr.flush().map_err(csv::Error::from)?;

    Ok(())
}

/// Write the points to a new file at the given path, replacing any existing file.
pub fn save_points<P: AsRef<Path>>(path: P, points: &[Point]) -> Result<(), ExportError> {
    let file = File::create(path.as_ref())
        .map_err(|e| ExportError::FileError(format!("{:?}", path.as_ref()), e))?;

    write_points(file, points)?;

    info!("Saved {} points to {:?}", points.len(), path.as_ref());

    Ok(())
}

/// Read points written by [`write_points`].
pub fn read_points<R: Read>(reader: R) -> Result<Vec<Point>, ExportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut points = Vec::new();

    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let line = i as u64 + 1;

        if record.len() != 2 {
            return Err(ExportError::WrongFieldCount(line, record.len()));
        }

        let parse = |s: &str| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| ExportError::ParseError(s.to_string(), line))
        };

        let y = parse(&record[0])?;
        let x = parse(&record[1])?;

        points.push(Point::new(x, y));
    }

    Ok(points)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format() {
        let points = vec![Point::new(1.0, 2.5), Point::new(-0.1, 1e-7)];
        let mut buf = Vec::new();

        write_points(&mut buf, &points).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "2.5,1\n0.0000001,-0.1\n");
    }

    #[test]
    fn test_round_trip() {
        let points = vec![
            Point::new(0.1 + 0.2, -1.0 / 3.0),
            Point::new(123456.789, 0.0),
            Point::new(std::f64::consts::PI, -std::f64::consts::E),
            Point::new(0.1 + 0.2, -1.0 / 3.0),
        ];
        let mut buf = Vec::new();

        write_points(&mut buf, &points).unwrap();
        let read = read_points(buf.as_slice()).unwrap();

        assert_eq!(read, points);
    }

    #[test]
    fn test_empty_and_bad_input() {
        let mut buf = Vec::new();
        write_points(&mut buf, &[]).unwrap();
        assert!(buf.is_empty());
        assert!(read_points(buf.as_slice()).unwrap().is_empty());

        assert!(matches!(
            read_points("1.0,abc\n".as_bytes()),
            Err(ExportError::ParseError(_, 1))
        ));
    }
}
