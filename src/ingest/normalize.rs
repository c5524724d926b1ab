//! Row normalization from positional sheet fields to festival records.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::FestivalRecord;

static DEADLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("deadline regex"));

/// Column positions of each festival field in a sheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub kind: usize,
    pub month: usize,
    pub deadline: usize,
    pub price: usize,
    pub steam_feature: usize,
    pub worth_it: usize,
    pub description: usize,
    pub official_url: usize,
    pub steam_url: usize,
}

impl Default for ColumnMap {
    /// Layout of the festival sheet export. Columns 1 and 5 are unused.
    fn default() -> Self {
        Self {
            name: 0,
            kind: 2,
            month: 3,
            deadline: 4,
            price: 6,
            steam_feature: 7,
            worth_it: 8,
            description: 9,
            official_url: 10,
            steam_url: 11,
        }
    }
}

/// Build a record from one parsed row, or `None` when the row has no usable name.
///
/// A name is unusable when it is empty after trimming or starts with `#`,
/// which the sheet uses to mark comment rows.
pub fn normalize_row(
    fields: &[String],
    columns: &ColumnMap,
    synced_at: &str,
) -> Option<FestivalRecord> {
    let name = text(fields, columns.name)?;
    if name.starts_with('#') {
        return None;
    }

    Some(FestivalRecord {
        name,
        kind: text(fields, columns.kind),
        month: text(fields, columns.month),
        deadline: deadline(fields, columns.deadline),
        price: text(fields, columns.price),
        steam_feature: steam_feature(fields, columns.steam_feature),
        worth_it: text(fields, columns.worth_it),
        description: text(fields, columns.description),
        official_url: text(fields, columns.official_url),
        steam_url: text(fields, columns.steam_url),
        last_synced: synced_at.to_string(),
    })
}

/// Trimmed cell text; missing and blank cells are `None`.
fn text(fields: &[String], index: usize) -> Option<String> {
    let value = fields.get(index)?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Deadline cell, kept only when it is literally `YYYY-MM-DD`.
///
/// The match is syntactic; `2024-13-40` is kept.
fn deadline(fields: &[String], index: usize) -> Option<String> {
    text(fields, index).filter(|value| DEADLINE_RE.is_match(value))
}

fn steam_feature(fields: &[String], index: usize) -> bool {
    fields
        .get(index)
        .is_some_and(|cell| cell.to_lowercase().contains("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: &str = "2025-01-01T00:00:00.000Z";

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn full_row() -> Vec<String> {
        row(&[
            "  Pixel Fest ",
            "unused",
            "Online",
            "March",
            " 2025-03-01 ",
            "unused",
            "Free",
            "Yes",
            "Absolutely",
            "A showcase of pixel art games",
            "https://pixelfest.example",
            "https://store.steampowered.com/sale/pixelfest",
        ])
    }

    #[test]
    fn test_full_row_maps_every_column() {
        let record = normalize_row(&full_row(), &ColumnMap::default(), NOW).unwrap();

        assert_eq!(record.name, "Pixel Fest");
        assert_eq!(record.kind.as_deref(), Some("Online"));
        assert_eq!(record.month.as_deref(), Some("March"));
        assert_eq!(record.deadline.as_deref(), Some("2025-03-01"));
        assert_eq!(record.price.as_deref(), Some("Free"));
        assert!(record.steam_feature);
        assert_eq!(record.worth_it.as_deref(), Some("Absolutely"));
        assert_eq!(
            record.description.as_deref(),
            Some("A showcase of pixel art games")
        );
        assert_eq!(
            record.official_url.as_deref(),
            Some("https://pixelfest.example")
        );
        assert_eq!(
            record.steam_url.as_deref(),
            Some("https://store.steampowered.com/sale/pixelfest")
        );
        assert_eq!(record.last_synced, NOW);
    }

    #[test]
    fn test_rows_without_usable_name_are_skipped() {
        let columns = ColumnMap::default();
        assert!(normalize_row(&row(&[""]), &columns, NOW).is_none());
        assert!(normalize_row(&row(&["   ", "x", "Online"]), &columns, NOW).is_none());
        assert!(normalize_row(&row(&["# Archived", "x", "Online"]), &columns, NOW).is_none());
        assert!(normalize_row(&row(&["  #note"]), &columns, NOW).is_none());
        assert!(normalize_row(&[], &columns, NOW).is_none());
    }

    #[test]
    fn test_short_row_leaves_missing_columns_absent() {
        let record = normalize_row(&row(&["Indie Days", "", "In person"]), &ColumnMap::default(), NOW)
            .unwrap();
        assert_eq!(record.kind.as_deref(), Some("In person"));
        assert_eq!(record.month, None);
        assert_eq!(record.deadline, None);
        assert_eq!(record.steam_url, None);
        assert!(!record.steam_feature);
    }

    #[test]
    fn test_blank_cells_become_absent() {
        let mut cells = full_row();
        cells[2] = "   ".to_string();
        cells[6] = String::new();
        let record = normalize_row(&cells, &ColumnMap::default(), NOW).unwrap();
        assert_eq!(record.kind, None);
        assert_eq!(record.price, None);
    }

    #[test]
    fn test_deadline_requires_exact_pattern() {
        let cases = [
            ("2025-03-01", Some("2025-03-01")),
            ("2024-13-40", Some("2024-13-40")),
            ("March", None),
            ("TBA", None),
            ("", None),
            ("2025-3-1", None),
            ("2025-03-01 (extended)", None),
            ("Due 2025-03-01", None),
        ];
        for (cell, expected) in cases {
            let mut cells = full_row();
            cells[4] = cell.to_string();
            let record = normalize_row(&cells, &ColumnMap::default(), NOW).unwrap();
            assert_eq!(record.deadline.as_deref(), expected, "cell {:?}", cell);
        }
    }

    #[test]
    fn test_steam_feature_flag() {
        let cases = [
            ("Yes", true),
            ("yes, pending", true),
            ("YES!", true),
            ("Maybe... yes", true),
            ("", false),
            ("No", false),
        ];
        for (cell, expected) in cases {
            let mut cells = full_row();
            cells[7] = cell.to_string();
            let record = normalize_row(&cells, &ColumnMap::default(), NOW).unwrap();
            assert_eq!(record.steam_feature, expected, "cell {:?}", cell);
        }
    }

    #[test]
    fn test_custom_column_map() {
        let columns = ColumnMap {
            name: 1,
            ..ColumnMap::default()
        };
        let record = normalize_row(&row(&["ignored", "Other Fest"]), &columns, NOW).unwrap();
        assert_eq!(record.name, "Other Fest");
    }
}
