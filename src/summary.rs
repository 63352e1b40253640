//! Trip-level totals shown next to the split.

use crate::expense::Expense;
use crate::money::Money;

/// Category label for expenses without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Aggregate figures for a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSummary {
    /// Sum of all expense amounts.
    pub total_expenses: Money,

    pub traveler_count: usize,

    /// `total_expenses / traveler_count`, `None` without travelers.
    pub fair_share: Option<Money>,

    /// Totals per category in first-seen order.
    pub by_category: Vec<(String, Money)>,

    /// Totals paid per traveler. Trip travelers first, then payers missing
    /// from the traveler list.
    pub paid_by_traveler: Vec<(String, Money)>,
}

impl TripSummary {
    pub fn compute(travelers: &[String], expenses: &[Expense]) -> Self {
        let total_expenses: Money = expenses.iter().map(|e| e.amount).sum();

        let mut by_category: Vec<(String, Money)> = Vec::new();
        for expense in expenses {
            let category = expense
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(UNCATEGORIZED);
            add_to(&mut by_category, category, expense.amount);
        }

        let mut paid_by_traveler: Vec<(String, Money)> = travelers
            .iter()
            .map(|name| (name.clone(), Money::ZERO))
            .collect();
        for payer in expenses.iter().flat_map(|e| &e.payers) {
            add_to(&mut paid_by_traveler, &payer.name, payer.amount);
        }

        TripSummary {
            total_expenses,
            traveler_count: travelers.len(),
            fair_share: total_expenses.split(travelers.len()),
            by_category,
            paid_by_traveler,
        }
    }

    pub fn category_total(&self, category: &str) -> Option<Money> {
        lookup(&self.by_category, category)
    }

    pub fn paid_by(&self, name: &str) -> Option<Money> {
        lookup(&self.paid_by_traveler, name)
    }
}

fn add_to(totals: &mut Vec<(String, Money)>, key: &str, amount: Money) {
    match totals.iter_mut().find(|(k, _)| k == key) {
        Some((_, total)) => *total += amount,
        None => totals.push((key.to_string(), amount)),
    }
}

fn lookup(totals: &[(String, Money)], key: &str) -> Option<Money> {
    totals.iter().find(|(k, _)| k == key).map(|(_, m)| *m)
}
