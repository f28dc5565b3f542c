//! Row reconstruction and the record grammar.

use crate::error::ExtractionError;
use crate::models::Record;

use super::patterns::{EMISSION_CODE_MARKER, ROW_PATTERN};

/// Rebuild a single logical line from a possibly wrapped table row.
///
/// Heuristic for the common wrap where the tail of the company name moved to
/// the next physical line while the emission code and numbers stayed on the
/// first one: `"Name BG123 1 2 3\nTail"` becomes `"Name Tail BG123 1 2 3"`.
/// When the marker is not on the first physical line every line is joined
/// with single spaces. Wraps over more than two physical lines get the same
/// treatment and may misorder the company name.
pub fn reconstruct_line(row: &str) -> String {
    let trimmed = row.trim();
    if !trimmed.contains('\n') {
        return trimmed.to_string();
    }

    let lines: Vec<&str> = trimmed.split('\n').collect();
    let first = lines[0];

    match first.find(EMISSION_CODE_MARKER) {
        Some(pos) if pos > 0 => {
            let prefix = first[..pos].trim();
            let suffix = first[pos..].trim();
            let remaining = lines[1..].join(" ");
            format!("{} {} {}", prefix, remaining.trim(), suffix)
        }
        _ => lines.join(" "),
    }
}

/// Parse one candidate line into a [`Record`].
///
/// The line may contain embedded line breaks; see [`reconstruct_line`].
pub fn parse_line(line: &str) -> Result<Record, ExtractionError> {
    if line.trim().is_empty() {
        return Err(ExtractionError::EmptyRow);
    }

    let text = reconstruct_line(line);
    let caps = ROW_PATTERN
        .captures(&text)
        .ok_or_else(|| ExtractionError::RowRejected { text: text.clone() })?;

    Ok(Record {
        company: caps["company"].trim().to_string(),
        emission_code: caps["emission_code"].trim().to_string(),
        total_shares: parse_count("Total Shares", &caps["total_shares"])?,
        free_float: parse_count("Free Float", &caps["free_float"])?,
        shareholders: parse_count("Shareholders", &caps["shareholders"])?,
    })
}

/// Join the non-null cells of a table row with single spaces.
pub fn join_cells(cells: &[Option<String>]) -> String {
    cells
        .iter()
        .flatten()
        .filter(|c| !c.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn parse_count(field: &str, value: &str) -> Result<u64, ExtractionError> {
    value.parse().map_err(|_| ExtractionError::Parse {
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_single_line() {
        let record = parse_line("  Софарма АД   BG11SOSOBT18 134797899 45000000 5612 ").unwrap();

        assert_eq!(
            record,
            Record {
                company: "Софарма АД".to_string(),
                emission_code: "BG11SOSOBT18".to_string(),
                total_shares: 134797899,
                free_float: 45000000,
                shareholders: 5612,
            }
        );
    }

    #[test]
    fn test_company_with_inner_spacing_and_digits() {
        let record = parse_line("Агро Финанс 2010 АДСИЦ BG1100003059 10000000 2500000 120").unwrap();
        assert_eq!(record.company, "Агро Финанс 2010 АДСИЦ");
        assert_eq!(record.emission_code, "BG1100003059");
        assert_eq!(record.shareholders, 120);
    }

    #[test]
    fn test_wrapped_company_name_is_reassembled() {
        let row = "Първа инвестиционна BG1100106050 110000000 30000000 4100\nбанка АД";
        let record = parse_line(row).unwrap();

        assert_eq!(record.company, "Първа инвестиционна банка АД");
        assert_eq!(record.emission_code, "BG1100106050");
        assert_eq!(record.total_shares, 110000000);
        assert_eq!(record.free_float, 30000000);
        assert_eq!(record.shareholders, 4100);
    }

    #[test]
    fn test_wrap_without_marker_on_first_line_joins_naively() {
        let row = "Доверие Обединен\nХолдинг АД BG1100036984 21496342 9000000 3300";
        assert_eq!(
            reconstruct_line(row),
            "Доверие Обединен Холдинг АД BG1100036984 21496342 9000000 3300"
        );
        assert_eq!(parse_line(row).unwrap().company, "Доверие Обединен Холдинг АД");
    }

    #[test]
    fn test_marker_at_line_start_joins_naively() {
        assert_eq!(reconstruct_line("BG123 1 2 3\nName"), "BG123 1 2 3 Name");
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!(parse_line(""), Err(ExtractionError::EmptyRow));
        assert_eq!(parse_line("  \n\t "), Err(ExtractionError::EmptyRow));
    }

    #[test]
    fn test_rejects_non_numeric_fields() {
        let err = parse_line("Софарма АД BG11SOSOBT18 n/a 45000000 5612").unwrap_err();
        assert_eq!(
            err,
            ExtractionError::RowRejected {
                text: "Софарма АД BG11SOSOBT18 n/a 45000000 5612".to_string()
            }
        );

        assert!(parse_line("Софарма АД BG11SOSOBT18 134797899 4.5 5612").is_err());
        assert!(parse_line("Софарма АД BG11SOSOBT18 134797899 45000000 много").is_err());
    }

    #[test]
    fn test_rejects_wrong_country_prefix() {
        assert!(parse_line("Foreign Co RO1234567890 100 50 2").is_err());
    }

    #[test]
    fn test_overflowing_count_is_a_parse_error() {
        let err = parse_line("Огромно АД BG100 99999999999999999999999 1 1").unwrap_err();
        assert!(matches!(err, ExtractionError::Parse { ref field, .. } if field == "Total Shares"));
    }

    #[test]
    fn test_join_cells_skips_nulls() {
        let cells = vec![
            Some("Софарма АД".to_string()),
            None,
            Some("BG11SOSOBT18".to_string()),
            Some(String::new()),
            Some("1".to_string()),
        ];
        assert_eq!(join_cells(&cells), "Софарма АД BG11SOSOBT18 1");
        assert_eq!(join_cells(&[None, None]), "");
    }
}
