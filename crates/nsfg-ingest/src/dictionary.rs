//! Stata `infile dictionary` parsing.
//!
//! Only `_column(n)` entries are read; every other line (the
//! `infile dictionary {` header, the closing brace, comments) is skipped.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use nsfg_model::{Dictionary, Variable, VariableType};

use crate::error::{IngestError, Result};

static COLUMN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_column\(\s*(\d+)\s*\)").expect("Invalid _column regex"));

/// Leading width of a display format: `%12s` -> 12, `%8.2f` -> 8.
static FORMAT_WIDTH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^%-?(\d+)").expect("Invalid format width regex"));

/// Reads and parses a dictionary file.
pub fn read_dictionary(path: &Path) -> Result<Dictionary> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let dictionary = parse_dictionary(&text)?;
    debug!(
        path = %path.display(),
        variables = dictionary.len(),
        "parsed dictionary"
    );
    Ok(dictionary)
}

/// Parses dictionary text.
///
/// Each variable ends where the next one starts. The last variable's width
/// comes from its display format, or it runs to the end of the line when the
/// format carries no width. Start columns must strictly increase.
pub fn parse_dictionary(text: &str) -> Result<Dictionary> {
    let mut variables: Vec<Variable> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let Some(captures) = COLUMN_REGEX.captures(line) else {
            continue;
        };
        let malformed = || IngestError::MalformedDictionaryLine {
            line: line_no,
            text: line.trim().to_string(),
        };
        let start: usize = captures[1].parse().map_err(|_| malformed())?;
        if start == 0 {
            return Err(malformed());
        }
        if let Some(previous) = variables.last().map(|v| v.start)
            && start <= previous
        {
            return Err(IngestError::UnorderedColumn {
                line: line_no,
                start,
                previous,
            });
        }
        let rest = &line[captures.get(0).map_or(line.len(), |m| m.end())..];
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        let [kind, name, format, description @ ..] = tokens.as_slice() else {
            return Err(malformed());
        };
        let kind: VariableType = kind.parse().map_err(|kind| IngestError::UnknownType {
            kind,
            line: line_no,
        })?;
        // Overwritten by the next start unless this turns out to be the last column.
        let end = match format_width(format) {
            Some(width) => Some(start.checked_add(width).ok_or_else(malformed)?),
            None => None,
        };
        variables.push(Variable {
            start,
            end,
            kind,
            name: name.to_lowercase(),
            format: (*format).to_string(),
            description: description.join(" ").trim_matches('"').to_string(),
        });
    }

    if variables.is_empty() {
        return Err(IngestError::EmptyDictionary);
    }

    let next_starts: Vec<usize> = variables.iter().skip(1).map(|v| v.start).collect();
    for (variable, next_start) in variables.iter_mut().zip(next_starts) {
        variable.end = Some(next_start);
    }

    Ok(Dictionary::new(variables))
}

fn format_width(format: &str) -> Option<usize> {
    FORMAT_WIDTH_REGEX
        .captures(format)
        .and_then(|captures| captures[1].parse().ok())
        .filter(|width| *width > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESP_DCT: &str = r#"infile dictionary {
    _column(1)      str12      caseid     %12s  "RESPONDENT ID NUMBER"
    _column(13)     byte     rscrinf      %1f  "WHETHER R IS SCREENER INFORMANT"
    _column(14)     byte     rdormres     %1f  "WHICH PARENT DOES R LIVE WITH"
    _column(15)     byte     rostscrn     %2f  "NUMBER OF HOUSEHOLD MEMBERS IN ROSTER"
    _column(17)     byte      pregnum     %2f  "CAPI-BASED TOTAL NUMBER OF PREGNANCIES"
}
"#;

    #[test]
    fn test_parse_nsfg_style_dictionary() {
        let dct = parse_dictionary(RESP_DCT).unwrap();
        assert_eq!(dct.len(), 5);

        let caseid = &dct.variables[0];
        assert_eq!(caseid.name, "caseid");
        assert_eq!(caseid.kind, VariableType::Str(12));
        assert_eq!(caseid.start, 1);
        assert_eq!(caseid.end, Some(13));
        assert_eq!(caseid.format, "%12s");
        assert_eq!(caseid.description, "RESPONDENT ID NUMBER");

        let pregnum = dct.get("pregnum").unwrap();
        assert_eq!(pregnum.kind, VariableType::Byte);
        assert_eq!(pregnum.start, 17);
        assert_eq!(pregnum.end, Some(19));
    }

    #[test]
    fn test_names_are_lowercased() {
        let dct = parse_dictionary("_column(1) int CASEID %5f \"ID\"").unwrap();
        assert_eq!(dct.variables[0].name, "caseid");
    }

    #[test]
    fn test_last_column_without_width_reads_to_end() {
        let dct = parse_dictionary("_column(1) str caseid %s \"ID\"").unwrap();
        assert_eq!(dct.variables[0].end, None);
    }

    #[test]
    fn test_decimal_format_width() {
        let dct = parse_dictionary("_column(4) double finalwgt %8.2f \"WEIGHT\"").unwrap();
        assert_eq!(dct.variables[0].end, Some(12));
    }

    #[test]
    fn test_unknown_type_is_error() {
        let err = parse_dictionary("_column(1) date when %td \"DATE\"").unwrap_err();
        assert!(matches!(err, IngestError::UnknownType { line: 1, .. }));
    }

    #[test]
    fn test_truncated_line_is_error() {
        let err = parse_dictionary("_column(1) byte pregnum").unwrap_err();
        assert!(matches!(
            err,
            IngestError::MalformedDictionaryLine { line: 1, .. }
        ));
    }

    #[test]
    fn test_oversized_column_is_error() {
        let err = parse_dictionary("_column(18446744073709551615) byte x %2f \"X\"").unwrap_err();
        assert!(matches!(
            err,
            IngestError::MalformedDictionaryLine { line: 1, .. }
        ));
    }

    #[test]
    fn test_out_of_order_columns_are_error() {
        let text = "_column(3) byte b %1f \"B\"\n_column(1) byte a %1f \"A\"\n";
        let err = parse_dictionary(text).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnorderedColumn {
                line: 2,
                start: 1,
                previous: 3
            }
        ));
    }

    #[test]
    fn test_repeated_column_is_error() {
        let text = "_column(1) byte a %1f \"A\"\n_column(1) byte b %1f \"B\"\n";
        let err = parse_dictionary(text).unwrap_err();
        assert!(matches!(err, IngestError::UnorderedColumn { line: 2, .. }));
    }

    #[test]
    fn test_empty_dictionary_is_error() {
        let err = parse_dictionary("infile dictionary {\n}\n").unwrap_err();
        assert!(matches!(err, IngestError::EmptyDictionary));
    }
}
