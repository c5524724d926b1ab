//! Spreadsheet ingestion: CSV lines to deduplicated festival records.
//!
//! Every stage is a pure function; fetching and persistence live in `sync`.

pub mod csv;
pub mod dedup;
pub mod normalize;

pub use dedup::dedupe_by_name;
pub use normalize::{normalize_row, ColumnMap};

use crate::models::FestivalRecord;

/// Number of non-data header lines at the top of the sheet export.
pub const HEADER_ROWS: usize = 3;

/// Turn a raw sheet export into normalized records, in row order.
///
/// Drops the header lines and blank lines, then parses and normalizes each
/// remaining line. Rows the normalizer skips are left out. Duplicates are
/// kept; see [`dedupe_by_name`].
pub fn parse_sheet(raw: &str, columns: &ColumnMap, synced_at: &str) -> Vec<FestivalRecord> {
    raw.lines()
        .skip(HEADER_ROWS)
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| normalize_row(&csv::parse_row(line), columns, synced_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: &str = "2025-01-01T00:00:00.000Z";

    #[test]
    fn test_parse_sheet_skips_headers_blanks_and_comments() {
        let raw = "Festival Watch,,,\n\
                   Updated weekly,,,\n\
                   Name,Notes,Type,Month,Deadline\n\
                   Pixel Fest,,Online,March,2025-03-01\n\
                   \n\
                   # Closed for good,,,\n\
                   ,,Online,April\n\
                   Indie Days,,In person,May,TBA\n";

        let records = parse_sheet(raw, &ColumnMap::default(), NOW);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Pixel Fest");
        assert_eq!(records[0].deadline.as_deref(), Some("2025-03-01"));
        assert_eq!(records[1].name, "Indie Days");
        assert_eq!(records[1].deadline, None);
    }

    #[test]
    fn test_parse_sheet_handles_crlf() {
        let raw = "h1\r\nh2\r\nh3\r\nPixel Fest,,Online\r\n";
        let records = parse_sheet(raw, &ColumnMap::default(), NOW);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind.as_deref(), Some("Online"));
    }

    #[test]
    fn test_parse_sheet_with_only_headers() {
        assert!(parse_sheet("a\nb\nc\n", &ColumnMap::default(), NOW).is_empty());
        assert!(parse_sheet("", &ColumnMap::default(), NOW).is_empty());
    }

    #[test]
    fn test_parse_sheet_keeps_duplicates_in_order() {
        let raw = "h\nh\nh\nX,,,,,,A\nX,,,,,,C\n";
        let records = parse_sheet(raw, &ColumnMap::default(), NOW);
        let prices: Vec<_> = records.iter().map(|r| r.price.as_deref()).collect();
        assert_eq!(prices, vec![Some("A"), Some("C")]);
    }
}
