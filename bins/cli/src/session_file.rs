//! Session document read by `yoanoto settle`.
//!
//! ```json
//! {
//!   "participants": ["Ana", "Beto", "Caro"],
//!   "expenses": [
//!     { "payer": "Ana", "amount": "12.500", "category": "carne" },
//!     { "payer": "Beto", "amount": 3000, "split_among": ["Beto", "Caro"] }
//!   ],
//!   "aliases": { "Ana": "ana.mp" }
//! }
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use yoanoto_core::split::{Category, ExpenseDraft, Participant, SplitSession, SplitTarget};
use yoanoto_shared::types::parse_pesos;
use yoanoto_shared::{AppConfig, AppError, AppResult};

/// Group roster, expenses and payment aliases as stored on disk.
#[derive(Debug, Deserialize)]
pub struct SessionDocument {
    /// Roster in display order.
    pub participants: Vec<String>,
    /// Expenses in entry order.
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
    /// Payment aliases by participant.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// One expense line.
#[derive(Debug, Deserialize)]
pub struct ExpenseEntry {
    /// Who paid.
    pub payer: String,
    /// Amount paid.
    pub amount: AmountField,
    /// Who shares the cost; everyone when absent.
    #[serde(default)]
    pub split_among: Option<Vec<String>>,
    /// Category id or free text.
    #[serde(default)]
    pub category: Category,
}

/// An amount written either as a peso string (`"1.234,50"`) or a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    /// Peso-formatted text.
    Written(String),
    /// Plain JSON number.
    Exact(Decimal),
}

impl AmountField {
    /// Resolves the amount in pesos.
    pub fn value(&self) -> Decimal {
        match self {
            Self::Written(text) => parse_pesos(text),
            Self::Exact(amount) => *amount,
        }
    }
}

impl SessionDocument {
    /// Parses a document from JSON text.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::Validation(format!("invalid session file: {e}")))
    }

    /// Replays the document into a validated session.
    pub fn into_session(self, config: &AppConfig) -> AppResult<SplitSession> {
        let mut session = SplitSession::with_config(config);

        for name in &self.participants {
            session.add_participant(name)?;
        }

        for (idx, entry) in self.expenses.into_iter().enumerate() {
            let split = match entry.split_among {
                None => SplitTarget::Everyone,
                Some(names) => {
                    SplitTarget::Only(names.into_iter().map(Participant::from).collect())
                }
            };
            let draft = ExpenseDraft {
                payer: Participant::from(entry.payer),
                amount: entry.amount.value(),
                split,
                category: entry.category,
            };
            session.add_expense(draft).map_err(|err| {
                AppError::Validation(format!("expense #{}: {err}", idx + 1))
            })?;
        }

        for (name, alias) in &self.aliases {
            session.set_alias(name, alias)?;
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"{
        "participants": ["Ana", "Beto", "Caro"],
        "expenses": [
            { "payer": "Ana", "amount": "1.500", "category": "carne" },
            { "payer": "Beto", "amount": 600, "split_among": ["Beto", "Caro"] }
        ],
        "aliases": { "Ana": "ana.mp" }
    }"#;

    #[test]
    fn test_document_replays_into_session() {
        let session = SessionDocument::from_json(SAMPLE)
            .unwrap()
            .into_session(&AppConfig::default())
            .unwrap();

        assert_eq!(session.participants().len(), 3);
        assert_eq!(session.total(), dec!(2100));
        assert_eq!(session.expenses()[0].category(), &Category::Carne);
        assert_eq!(session.expenses()[1].split_among().len(), 2);
        assert_eq!(session.alias("Ana"), Some("ana.mp"));
    }

    #[test]
    fn test_peso_text_amounts() {
        let entry: ExpenseEntry =
            serde_json::from_str(r#"{ "payer": "Ana", "amount": "1.234,50" }"#).unwrap();
        assert_eq!(entry.amount.value(), dec!(1234.50));
        assert_eq!(entry.category, Category::default());
    }

    #[test]
    fn test_invalid_expense_is_reported_by_position() {
        let raw = r#"{ "participants": ["Ana", "Beto"], "expenses": [
            { "payer": "Ana", "amount": 10 },
            { "payer": "Zoe", "amount": 10 }
        ] }"#;
        let err = SessionDocument::from_json(raw)
            .unwrap()
            .into_session(&AppConfig::default())
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(ref msg) if msg.starts_with("expense #2")));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SessionDocument::from_json("{"),
            Err(AppError::Validation(_))
        ));
    }
}
