use std::fmt;

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Deserializer, Serialize};

pub type Amount = f64;

/// One cash movement. Positive amounts are income, negative are expenses;
/// there is a single implicit currency.
///
/// A transaction is immutable once created: the `id` is assigned when the
/// record enters the ledger and is the only handle used to remove it later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: Amount,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn new(id: String, description: String, amount: Amount, date: DateTime<Utc>) -> Self {
        Transaction { id, description, amount, date }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = format!("{:.2}", self.amount);
        let amount = if self.amount < 0.0 {
            amount.red()
        } else {
            amount.green()
        };
        write!(
            f,
            "{} {}: {}",
            self.date.format("%Y-%m-%d"),
            self.description.bold(),
            amount
        )
    }
}

/// Older payloads sometimes carry the amount as a string rather than a
/// number. Arithmetic must never see a string, so anything that does not
/// coerce to a number is decoded as NaN and counted as zero by the balance.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let amount = match &raw {
        serde_json::Value::Number(number) => number.as_f64().unwrap_or(Amount::NAN),
        serde_json::Value::String(text) => text.trim().parse().unwrap_or(Amount::NAN),
        _ => Amount::NAN,
    };
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    #[fixture]
    fn salary() -> Transaction {
        Transaction::new(
            "1704412800000".to_string(),
            "Salary".to_string(),
            1000.0,
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
        )
    }

    #[fixture]
    fn salary_json() -> serde_json::Value {
        json!({
            "id": "1704412800000",
            "description": "Salary",
            "amount": 1000.0,
            "date": "2024-01-05T00:00:00Z"
        })
    }

    #[rstest]
    fn serialize(salary: Transaction, salary_json: serde_json::Value) {
        let value = serde_json::to_value(&salary).unwrap();
        assert_eq!(value, salary_json);
    }

    #[rstest]
    fn deserialize(salary: Transaction, salary_json: serde_json::Value) {
        let parsed = serde_json::from_value::<Transaction>(salary_json).unwrap();
        assert_eq!(parsed, salary);
    }

    #[rstest]
    #[case(json!("250.75"), 250.75)]
    #[case(json!("  -3 "), -3.0)]
    #[case(json!(42), 42.0)]
    fn amount_coerced_to_number(#[case] raw: serde_json::Value, #[case] expected: Amount) {
        let value = json!({
            "id": "1",
            "description": "coerced",
            "amount": raw,
            "date": "2024-01-05T00:00:00Z"
        });
        let parsed = serde_json::from_value::<Transaction>(value).unwrap();
        assert_eq!(parsed.amount, expected);
    }

    #[rstest]
    #[case(json!("abc"))]
    #[case(json!(null))]
    #[case(json!([1, 2]))]
    fn non_numeric_amount_becomes_nan(#[case] raw: serde_json::Value) {
        let value = json!({
            "id": "1",
            "description": "garbage",
            "amount": raw,
            "date": "2024-01-05T00:00:00Z"
        });
        let parsed = serde_json::from_value::<Transaction>(value).unwrap();
        assert!(parsed.amount.is_nan());
    }

    #[rstest]
    fn can_print(salary: Transaction) {
        colored::control::set_override(false);
        assert_eq!(salary.to_string(), "2024-01-05 Salary: 1000.00");
    }

    #[test]
    fn prints_expense_with_sign() {
        colored::control::set_override(false);
        let rent = Transaction::new(
            "2".to_string(),
            "Rent".to_string(),
            -450.5,
            Utc.with_ymd_and_hms(2024, 2, 1, 12, 30, 0).unwrap(),
        );
        assert_eq!(rent.to_string(), "2024-02-01 Rent: -450.50");
    }
}
