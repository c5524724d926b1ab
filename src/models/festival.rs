//! Festival model matching the directory UI's Festival interface.

use serde::{Deserialize, Serialize};

/// One festival as normalized from a spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FestivalRecord {
    /// Natural key, never empty
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// Submission deadline, always a `YYYY-MM-DD` literal when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub steam_feature: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worth_it: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steam_url: Option<String>,
    /// Timestamp of the run that produced this record
    pub last_synced: String,
}

/// A festival row as persisted, with its storage id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFestival {
    pub id: i64,
    #[serde(flatten)]
    pub record: FestivalRecord,
}

/// Sort orders offered by the directory listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FestivalSort {
    /// Soonest deadline first, undated festivals last
    #[default]
    Deadline,
    Name,
    /// Free festivals first
    Price,
}

impl FestivalSort {
    /// SQL `ORDER BY` clause for this sort.
    pub fn order_by(&self) -> &'static str {
        match self {
            FestivalSort::Deadline => "deadline IS NULL, deadline, name",
            FestivalSort::Name => "name",
            FestivalSort::Price => "CASE WHEN price = 'Free' THEN 0 ELSE 1 END, name",
        }
    }
}

/// Filters for listing festivals.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FestivalQuery {
    /// Exact category match
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Only festivals priced "Free"
    #[serde(default)]
    pub free: bool,
    /// Only festivals with a Steam feature
    #[serde(default)]
    pub steam: bool,
    /// Only festivals whose deadline has not passed (undated ones count as open)
    #[serde(default)]
    pub open: bool,
    /// Case-insensitive substring of name or description
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort: FestivalSort,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FestivalRecord {
        FestivalRecord {
            name: "Pixel Fest".to_string(),
            kind: Some("Online".to_string()),
            month: None,
            deadline: Some("2025-03-01".to_string()),
            price: Some("Free".to_string()),
            steam_feature: true,
            worth_it: None,
            description: None,
            official_url: Some("https://pixelfest.example".to_string()),
            steam_url: None,
            last_synced: "2025-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["type"], "Online");
        assert_eq!(json["steamFeature"], true);
        assert_eq!(json["officialUrl"], "https://pixelfest.example");
        assert_eq!(json["lastSynced"], "2025-01-01T00:00:00.000Z");
        assert!(json.get("month").is_none());
        assert!(json.get("steamUrl").is_none());
    }

    #[test]
    fn test_stored_festival_flattens_record() {
        let stored = StoredFestival {
            id: 7,
            record: record(),
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Pixel Fest");
    }

    #[test]
    fn test_sort_parses_lowercase() {
        let sort: FestivalSort = serde_json::from_str("\"price\"").unwrap();
        assert_eq!(sort, FestivalSort::Price);
        assert_eq!(FestivalSort::default(), FestivalSort::Deadline);
    }
}
