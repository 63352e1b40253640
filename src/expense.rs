//! Expense models for trip snapshots and ledger input.

use crate::money::Money;
use log::warn;
use serde::Deserialize;

/// How much of an expense one traveler paid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayerContribution {
    /// Traveler display name.
    pub name: String,

    /// Amount this traveler put towards the expense.
    pub amount: Money,
}

impl PayerContribution {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        PayerContribution {
            name: name.into(),
            amount,
        }
    }
}

/// Raw expense record as stored by the trip app.
///
/// Older records carry a single `paidBy` name instead of a `payers` list, and
/// may omit `participants` entirely.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub title: String,

    pub amount: Money,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub payers: Option<Vec<PayerContribution>>,

    /// Legacy single-payer field.
    #[serde(default)]
    pub paid_by: Option<String>,

    #[serde(default)]
    pub participants: Option<Vec<String>>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl From<ExpenseRecord> for Expense {
    fn from(record: ExpenseRecord) -> Self {
        let payers = match (record.payers, record.paid_by) {
            (Some(payers), _) if !payers.is_empty() => payers,
            (_, Some(name)) if !name.trim().is_empty() => {
                vec![PayerContribution::new(name, record.amount)]
            }
            (payers, _) => {
                warn!(
                    "Expense {:?} has no payers; nothing will be credited for it",
                    record.title
                );
                payers.unwrap_or_default()
            }
        };

        Expense {
            id: record.id,
            title: record.title,
            amount: record.amount,
            date: record.date,
            category: record.category,
            payers,
            participants: record.participants.unwrap_or_default(),
            notes: record.notes,
        }
    }
}

/// A single shared cost.
///
/// An empty `participants` list means "every current traveler". It is
/// resolved by [`Expense::effective_participants`] each time balances are
/// computed, so travelers added later are included retroactively.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ExpenseRecord")]
pub struct Expense {
    pub id: Option<String>,
    pub title: String,

    /// Total cost. Payer contributions are expected to sum to this.
    pub amount: Money,

    pub date: Option<String>,
    pub category: Option<String>,
    pub payers: Vec<PayerContribution>,

    /// Travelers sharing the cost equally. Empty means all travelers.
    pub participants: Vec<String>,

    pub notes: Option<String>,
}

impl Expense {
    /// Creates an expense with no payers and implicit participants.
    pub fn new(title: impl Into<String>, amount: Money) -> Self {
        Expense {
            id: None,
            title: title.into(),
            amount,
            date: None,
            category: None,
            payers: Vec::new(),
            participants: Vec::new(),
            notes: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Adds a payer contribution.
    pub fn paid_by(mut self, name: impl Into<String>, amount: Money) -> Self {
        self.payers.push(PayerContribution::new(name, amount));
        self
    }

    /// Sets an explicit participant list.
    pub fn shared_by<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sum of all payer contributions.
    pub fn payers_total(&self) -> Money {
        self.payers.iter().map(|p| p.amount).sum()
    }

    /// Returns `payers_total - amount` when the two differ by at least the
    /// tolerance, `None` when the payers cover the expense.
    pub fn payer_discrepancy(&self) -> Option<Money> {
        let diff = self.payers_total() - self.amount;
        if diff.is_negligible() {
            None
        } else {
            Some(diff)
        }
    }

    /// Returns `true` if the participant list is unset and every traveler
    /// shares the cost.
    pub fn is_shared_by_all(&self) -> bool {
        self.participants.is_empty()
    }

    /// Resolves who shares this expense against the current traveler list.
    ///
    /// Explicit participants are deduplicated in first-seen order. An empty
    /// list resolves to `travelers` as they are now.
    pub fn effective_participants<'a>(&'a self, travelers: &'a [String]) -> Vec<&'a str> {
        let source: &[String] = if self.participants.is_empty() {
            travelers
        } else {
            &self.participants
        };

        let mut resolved: Vec<&str> = Vec::with_capacity(source.len());
        for name in source {
            if !resolved.contains(&name.as_str()) {
                resolved.push(name.as_str());
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_multiple_payers() {
        let json = r#"{
            "id": "e1",
            "title": "Dinner",
            "amount": 50,
            "date": "2024-05-01",
            "category": "Food",
            "payers": [{"name": "A", "amount": 30}, {"name": "B", "amount": 20}],
            "participants": ["A", "B", "C", "D"]
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id.as_deref(), Some("e1"));
        assert_eq!(expense.amount, money("50"));
        assert_eq!(expense.payers.len(), 2);
        assert_eq!(expense.payers[1], PayerContribution::new("B", money("20")));
        assert_eq!(expense.participants, names(&["A", "B", "C", "D"]));
        assert_eq!(expense.category.as_deref(), Some("Food"));
    }

    #[test]
    fn test_parse_legacy_paid_by() {
        let json = r#"{"title": "Taxi", "amount": 42.5, "paidBy": "C"}"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.payers, vec![PayerContribution::new("C", money("42.5"))]);
        assert!(expense.is_shared_by_all());
    }

    #[test]
    fn test_parse_prefers_payers_over_paid_by() {
        let json = r#"{
            "title": "Hotel",
            "amount": 10,
            "paidBy": "A",
            "payers": [{"name": "B", "amount": 10}]
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.payers, vec![PayerContribution::new("B", money("10"))]);
    }

    #[test]
    fn test_parse_without_payers() {
        let json = r#"{"title": "Mystery", "amount": 10}"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert!(expense.payers.is_empty());
        assert_eq!(expense.payer_discrepancy(), Some(money("-10")));
    }

    #[test]
    fn test_parse_rejects_missing_amount() {
        let json = r#"{"title": "Nothing", "paidBy": "A"}"#;
        assert!(serde_json::from_str::<Expense>(json).is_err());
    }

    #[test]
    fn test_payer_discrepancy_within_tolerance() {
        let expense = Expense::new("Lunch", money("30"))
            .paid_by("A", money("10.004"))
            .paid_by("B", money("20"));

        assert_eq!(expense.payers_total(), money("30.004"));
        assert_eq!(expense.payer_discrepancy(), None);
    }

    #[test]
    fn test_payer_discrepancy_reported() {
        let expense = Expense::new("Lunch", money("30"))
            .paid_by("A", money("10"))
            .paid_by("B", money("15"));

        assert_eq!(expense.payer_discrepancy(), Some(money("-5")));
    }

    #[test]
    fn test_effective_participants_explicit() {
        let travelers = names(&["A", "B", "C"]);
        let expense = Expense::new("Museum", money("20")).shared_by(["C", "A"]);

        assert_eq!(expense.effective_participants(&travelers), vec!["C", "A"]);
    }

    #[test]
    fn test_effective_participants_defaults_to_current_travelers() {
        let expense = Expense::new("Fuel", money("60"));

        let before = names(&["A", "B"]);
        assert_eq!(expense.effective_participants(&before), vec!["A", "B"]);

        let after = names(&["A", "B", "C"]);
        assert_eq!(expense.effective_participants(&after), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_effective_participants_deduplicates() {
        let travelers = names(&["A", "B"]);
        let expense = Expense::new("Snacks", money("9")).shared_by(["A", "B", "A"]);

        assert_eq!(expense.effective_participants(&travelers), vec!["A", "B"]);
    }
}
