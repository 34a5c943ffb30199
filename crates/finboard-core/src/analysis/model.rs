//! Analysis record domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serde_util::string_or_number;

/// One group of named metrics, in the order the backend produced them.
pub type MetricGroup = Map<String, Value>;

/// The computed analysis, grouped into the five fixed categories.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Resultado {
    #[serde(default)]
    pub income_status: MetricGroup,
    #[serde(default)]
    pub margins: MetricGroup,
    #[serde(default)]
    pub balance_sheet: MetricGroup,
    #[serde(default)]
    pub financial_ratios: MetricGroup,
    #[serde(default)]
    pub stock_information: MetricGroup,
}

impl Resultado {
    /// Iterates the categories in display order with their wire keys.
    pub fn categories(&self) -> [(&'static str, &MetricGroup); 5] {
        [
            ("income_status", &self.income_status),
            ("margins", &self.margins),
            ("balance_sheet", &self.balance_sheet),
            ("financial_ratios", &self.financial_ratios),
            ("stock_information", &self.stock_information),
        ]
    }
}

/// A financial analysis of one asset over a year range.
///
/// Immutable once created; identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: i64,
    pub document_id: String,
    /// Asset symbol
    pub activo: String,
    /// Start of the range; a year or a date, depending on the backend
    #[serde(deserialize_with = "string_or_number")]
    pub inicio: String,
    /// End of the range
    #[serde(deserialize_with = "string_or_number")]
    pub fin: String,
    pub resultado: Resultado,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub locale: Option<String>,
}

impl AnalysisRecord {
    pub fn start_year(&self) -> Option<i32> {
        leading_year(&self.inicio)
    }

    pub fn end_year(&self) -> Option<i32> {
        leading_year(&self.fin)
    }
}

/// Extracts the year from `"2020"` or `"2020-01-01..."`.
fn leading_year(value: &str) -> Option<i32> {
    let digits: String = value.trim().chars().take_while(char::is_ascii_digit).collect();
    if digits.len() == 4 { digits.parse().ok() } else { None }
}

/// Normalized payload for `POST /api/analisis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub year1: i32,
    pub year2: i32,
}
