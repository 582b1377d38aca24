//! Analysis result returned by the Form 16 endpoint
//!
//! The record only lives for one render pass. Scalar amounts may be numbers,
//! numeric strings or anything else (rendered as "N/A"); the collections
//! must have the right shape.

use crate::currency::parse_lenient;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// An amount as the backend sends it: a number, a numeric string, or junk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Amount {
    /// Numeric value, with `,` separators stripped from strings
    pub fn value(&self) -> Option<f64> {
        match self {
            Amount::Number(n) if n.is_finite() => Some(*n),
            Amount::Number(_) => None,
            Amount::Text(s) => parse_lenient(&s.replace(',', "")),
            Amount::Other(_) => None,
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

/// One claimed deduction, e.g. section `80C`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deduction {
    pub section: String,
    pub amount: Option<Amount>,
}

/// A tax-saving suggestion shown as a card
///
/// Card text is taken from whatever JSON scalar the backend sends; `null`
/// reads as empty. A non-string link is treated as absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Opportunity {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(deserialize_with = "lenient_link")]
    pub link: Option<String>,
}

/// Successful response body of the analysis endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub gross_salary: Option<Amount>,
    #[serde(default)]
    pub exemptions: Option<Amount>,
    #[serde(default)]
    pub taxable_income: Option<Amount>,
    #[serde(default)]
    pub total_tax_due: Option<Amount>,
    #[serde(default)]
    pub tax_paid_tds: Option<Amount>,
    #[serde(default)]
    pub refund_payable: Option<Amount>,
    /// Kept in the order the backend sent them
    #[serde(default, deserialize_with = "ordered_deductions")]
    pub claimed_deductions: Vec<Deduction>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub tax_saving_opportunities: Vec<Opportunity>,
}

impl AnalysisResult {
    /// Parse a response body
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

fn ordered_deductions<'de, D>(deserializer: D) -> Result<Vec<Deduction>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DeductionsVisitor;

    impl<'de> Visitor<'de> for DeductionsVisitor {
        type Value = Vec<Deduction>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of section label to amount")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }

        fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
            let mut deductions = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((section, amount)) = map.next_entry::<String, Option<Amount>>()? {
                deductions.push(Deduction { section, amount });
            }
            Ok(deductions)
        }
    }

    deserializer.deserialize_option(DeductionsVisitor)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_link<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r##"{
        "gross_salary": "2000000",
        "exemptions": 500000,
        "taxable_income": "1,500,000",
        "total_tax_due": "150000",
        "tax_paid_tds": "120000",
        "refund_payable": "30000",
        "claimed_deductions": {"80C": "150000", "80D": "25000"},
        "tax_saving_opportunities": [
            {"title": "NPS Investment", "description": "Save an additional 50,000", "link": "#tax-saving-options/nps"},
            {"title": "Savings Account Interest", "description": "Claim up to 10,000"}
        ]
    }"##;

    #[test]
    fn test_parse_full_response() {
        let result = AnalysisResult::from_json(SAMPLE).unwrap();
        assert_eq!(result.gross_salary, Some(Amount::Text("2000000".to_string())));
        assert_eq!(result.exemptions, Some(Amount::Number(500000.0)));
        assert_eq!(result.taxable_income.as_ref().and_then(Amount::value), Some(1_500_000.0));
        assert_eq!(result.tax_saving_opportunities.len(), 2);
        assert_eq!(result.tax_saving_opportunities[1].link, None);
    }

    #[test]
    fn test_deductions_keep_document_order() {
        let result =
            AnalysisResult::from_json(r#"{"claimed_deductions": {"80D": 1, "80C": 2, "24B": 3}}"#)
                .unwrap();
        let sections: Vec<&str> = result
            .claimed_deductions
            .iter()
            .map(|d| d.section.as_str())
            .collect();
        assert_eq!(sections, vec!["80D", "80C", "24B"]);
    }

    #[test]
    fn test_missing_fields_default() {
        let result = AnalysisResult::from_json("{}").unwrap();
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn test_null_collections_are_empty() {
        let result = AnalysisResult::from_json(
            r#"{"claimed_deductions": null, "tax_saving_opportunities": null, "gross_salary": null}"#,
        )
        .unwrap();
        assert!(result.claimed_deductions.is_empty());
        assert!(result.tax_saving_opportunities.is_empty());
        assert_eq!(result.gross_salary, None);
    }

    #[test]
    fn test_odd_scalar_is_kept_as_other() {
        let result = AnalysisResult::from_json(r#"{"refund_payable": true}"#).unwrap();
        assert_eq!(
            result.refund_payable,
            Some(Amount::Other(serde_json::Value::Bool(true)))
        );
        assert_eq!(result.refund_payable.as_ref().and_then(Amount::value), None);
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        assert!(AnalysisResult::from_json(r#"{"claimed_deductions": [1, 2]}"#).is_err());
        assert!(AnalysisResult::from_json(r#"{"tax_saving_opportunities": {}}"#).is_err());
        assert!(AnalysisResult::from_json("null").is_err());
        assert!(AnalysisResult::from_json("<html>").is_err());
    }

    #[test]
    fn test_opportunity_fields_are_lenient() {
        let result = AnalysisResult::from_json(
            r##"{"tax_saving_opportunities": [
                {"title": null, "description": 80, "link": false},
                {"title": "HRA", "description": true, "link": "#hra"}
            ]}"##,
        )
        .unwrap();
        let cards = &result.tax_saving_opportunities;
        assert_eq!(cards[0].title, "");
        assert_eq!(cards[0].description, "80");
        assert_eq!(cards[0].link, None);
        assert_eq!(cards[1].description, "true");
        assert_eq!(cards[1].link.as_deref(), Some("#hra"));
    }

    #[test]
    fn test_amount_value() {
        assert_eq!(Amount::from("2,000,000").value(), Some(2_000_000.0));
        assert_eq!(Amount::from(12.5).value(), Some(12.5));
        assert_eq!(Amount::from("").value(), None);
    }
}
