//! Trip snapshot as exported by the trip planner.

use crate::error::Result;
use crate::expense::Expense;
use serde::Deserialize;
use std::io::Read;

/// The parts of a trip the split engine reads.
///
/// Other fields of the stored trip (dates, budget, destinations, agenda) are
/// ignored when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    /// Traveler display names, unique and case-sensitive.
    pub travelers: Vec<String>,

    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Trip {
    pub fn new<I, S>(name: impl Into<String>, travelers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Trip {
            id: None,
            name: name.into(),
            travelers: travelers.into_iter().map(Into::into).collect(),
            expenses: Vec::new(),
        }
    }

    pub fn with_expense(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }

    pub fn add_traveler(&mut self, name: impl Into<String>) {
        self.travelers.push(name.into());
    }

    /// Reads a trip from JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SplitError;
    use crate::money::Money;

    #[test]
    fn test_read_stored_trip_ignores_extra_fields() {
        let json = r#"{
            "id": "t1",
            "name": "Lisbon",
            "description": "Spring break",
            "startDate": "2024-04-01",
            "endDate": "2024-04-07",
            "budget": 2000,
            "destinations": ["Lisbon", "Porto"],
            "travelers": ["Ana", "Ben"],
            "agenda": [{"id": "a1", "title": "Tram 28", "date": "2024-04-02"}],
            "expenses": [
                {"id": "e1", "title": "Dinner", "amount": 80, "date": "2024-04-01",
                 "payers": [{"name": "Ana", "amount": 80}], "participants": []}
            ]
        }"#;

        let trip = Trip::from_reader(json.as_bytes()).unwrap();

        assert_eq!(trip.id.as_deref(), Some("t1"));
        assert_eq!(trip.travelers, vec!["Ana".to_string(), "Ben".to_string()]);
        assert_eq!(trip.expenses.len(), 1);
        assert_eq!(trip.expenses[0].amount, Money::from(80));
        assert!(trip.expenses[0].is_shared_by_all());
    }

    #[test]
    fn test_null_travelers_is_rejected() {
        let err = Trip::from_reader(r#"{"name": "x", "travelers": null}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, SplitError::Json(_)));
    }

    #[test]
    fn test_missing_expenses_defaults_to_empty() {
        let trip = Trip::from_reader(r#"{"travelers": ["A"]}"#.as_bytes()).unwrap();
        assert!(trip.expenses.is_empty());
        assert_eq!(trip.name, "");
    }
}
