//! Free float record model.

use serde::{Deserialize, Serialize};

/// Output column names, in schema order.
pub const COLUMNS: [&str; 5] = [
    "Company",
    "Emission Code",
    "Total Shares",
    "Free Float",
    "Shareholders",
];

/// One row of the free float table.
///
/// Field order is the output schema; the serde names are the column headers
/// written to CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Issuer name as printed in the report.
    #[serde(rename = "Company")]
    pub company: String,

    /// Country-prefixed security identifier (e.g. `BG11SOSOBT18`).
    #[serde(rename = "Emission Code")]
    pub emission_code: String,

    /// Total number of shares in the emission.
    #[serde(rename = "Total Shares")]
    pub total_shares: u64,

    /// Shares available for public trading.
    #[serde(rename = "Free Float")]
    pub free_float: u64,

    /// Number of shareholders.
    #[serde(rename = "Shareholders")]
    pub shareholders: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names_match_columns() {
        let record = Record {
            company: "Софарма АД".to_string(),
            emission_code: "BG11SOSOBT18".to_string(),
            total_shares: 134_797_899,
            free_float: 45_000_000,
            shareholders: 5_612,
        };

        let value = serde_json::to_value(&record).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for column in COLUMNS {
            assert!(keys.contains(&column), "missing column {column}");
        }
    }
}
