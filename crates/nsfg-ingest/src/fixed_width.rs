//! Fixed-width record reading driven by a [`Dictionary`].

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use polars::prelude::*;
use tracing::info;

use nsfg_model::{Dictionary, Variable};

use crate::error::{IngestError, Result};

/// Compression applied to a data file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Plain text.
    None,
    /// gzip stream.
    Gzip,
    /// gzip when the path ends in `.gz`, plain text otherwise.
    #[default]
    Infer,
}

impl Compression {
    fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Infer => {
                let is_gz = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
                if is_gz { Self::Gzip } else { Self::None }
            }
            other => other,
        }
    }
}

/// Options for [`read_fixed_width`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedWidthOptions {
    pub compression: Compression,
    /// Stop after this many records; `None` reads the whole file.
    pub nrows: Option<usize>,
}

impl FixedWidthOptions {
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    #[must_use]
    pub fn with_nrows(mut self, nrows: Option<usize>) -> Self {
        self.nrows = nrows;
        self
    }
}

/// Reads a fixed-width file into a DataFrame with one column per dictionary
/// variable, in dictionary order.
pub fn read_fixed_width(
    path: &Path,
    dictionary: &Dictionary,
    options: &FixedWidthOptions,
) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let reader: Box<dyn Read> = match options.compression.resolve(path) {
        Compression::Gzip => Box::new(GzDecoder::new(file)),
        _ => Box::new(file),
    };
    let df = read_fixed_width_from(BufReader::new(reader), dictionary, options.nrows)
        .map_err(|err| match err {
            IngestError::FileRead { source, .. } => IngestError::io(path, source),
            other => other,
        })?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read fixed-width file"
    );
    Ok(df)
}

/// Reads fixed-width records from any buffered reader.
///
/// Read failures surface as [`IngestError::FileRead`] with an empty path;
/// [`read_fixed_width`] fills in the real one.
pub fn read_fixed_width_from<R: BufRead>(
    mut reader: R,
    dictionary: &Dictionary,
    nrows: Option<usize>,
) -> Result<DataFrame> {
    if dictionary.is_empty() {
        return Err(IngestError::EmptyDictionary);
    }
    let mut builders: Vec<ColumnBuilder> = dictionary
        .variables
        .iter()
        .map(ColumnBuilder::for_variable)
        .collect();

    let mut buf = Vec::new();
    let mut line_no = 0usize;
    let mut records = 0usize;
    loop {
        if nrows.is_some_and(|limit| records >= limit) {
            break;
        }
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| IngestError::FileRead {
                path: Default::default(),
                source,
            })?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = trim_line_ending(&buf);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        for (variable, builder) in dictionary.variables.iter().zip(builders.iter_mut()) {
            let (start, end) = variable.byte_range(line.len());
            let field = String::from_utf8_lossy(&line[start..end]);
            builder.push(field.trim(), variable, line_no)?;
        }
        records += 1;
    }

    let columns: Vec<Column> = dictionary
        .variables
        .iter()
        .zip(builders)
        .map(|(variable, builder)| builder.finish(&variable.name))
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

enum ColumnBuilder {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Str(Vec<Option<String>>),
}

impl ColumnBuilder {
    fn for_variable(variable: &Variable) -> Self {
        if variable.kind.is_integer() {
            Self::Int(Vec::new())
        } else if variable.kind.is_float() {
            Self::Float(Vec::new())
        } else {
            Self::Str(Vec::new())
        }
    }

    fn push(&mut self, field: &str, variable: &Variable, line: usize) -> Result<()> {
        let parse_error = || IngestError::FieldParse {
            line,
            column: variable.name.clone(),
            value: field.to_string(),
        };
        match self {
            Self::Int(values) => {
                let value = if field.is_empty() {
                    None
                } else {
                    Some(field.parse::<i64>().map_err(|_| parse_error())?)
                };
                values.push(value);
            }
            Self::Float(values) => {
                let value = if field.is_empty() {
                    None
                } else {
                    Some(field.parse::<f64>().map_err(|_| parse_error())?)
                };
                values.push(value);
            }
            Self::Str(values) => {
                values.push((!field.is_empty()).then(|| field.to_string()));
            }
        }
        Ok(())
    }

    fn finish(self, name: &str) -> Column {
        match self {
            Self::Int(values) => Column::new(name.into(), values),
            Self::Float(values) => Column::new(name.into(), values),
            Self::Str(values) => Column::new(name.into(), values),
        }
    }
}
