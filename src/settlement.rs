//! Greedy settle-up planning over net balances.
//!
//! Travelers are sorted by balance and two cursors walk inwards: the largest
//! remaining debtor pays the largest remaining creditor as much as one of them
//! needs, then whichever side reached zero is retired. Every transfer retires
//! at least one traveler, so `n` travelers with non-zero balances need at most
//! `n - 1` transfers.
//!
//! This is a heuristic. It does not search for the globally smallest set of
//! transfers (for example it will not find that two debtors exactly match two
//! creditors pairwise if the sort order interleaves them).

use crate::money::Money;
use log::{debug, warn};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A recommended payment from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settlement {
    /// Traveler who pays.
    pub from: String,

    /// Traveler who receives.
    pub to: String,

    /// Full-precision amount, always at least [`Money::TOLERANCE`].
    pub amount: Money,
}

impl Settlement {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: Money) -> Self {
        Settlement {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// Plans transfers that bring every balance within the tolerance of zero.
///
/// `traveler_order` fixes the order among equal balances: the sort is stable,
/// so ties keep the order given here. Names in `balances` that are missing
/// from `traveler_order` are placed after it, sorted by name. Names in
/// `traveler_order` without a balance are ignored.
///
/// Never mutates `balances`. Returns an empty list for fewer than two
/// travelers or when everyone is already settled.
pub fn compute_settlements(
    balances: &HashMap<String, Money>,
    traveler_order: &[String],
) -> Vec<Settlement> {
    let mut working = ordered_balances(balances, traveler_order);
    working.sort_by(|a, b| a.1.cmp(&b.1));

    let mut settlements = Vec::new();
    if working.len() < 2 {
        return settlements;
    }

    let mut i = 0;
    let mut j = working.len() - 1;

    while i < j {
        if working[i].1.is_negligible() {
            i += 1;
            continue;
        }
        if working[j].1.is_negligible() {
            j -= 1;
            continue;
        }

        // Only reachable when the balances do not sum to zero
        if working[i].1.is_positive() || working[j].1.is_negative() {
            let residual: Money = working[i..=j].iter().map(|(_, b)| *b).sum();
            warn!(
                "Stopping settlement with {} unaccounted for; balances do not sum to zero",
                residual
            );
            break;
        }

        let amount = working[i].1.abs().min(working[j].1);
        if amount >= Money::TOLERANCE {
            debug!("{} pays {} {}", working[i].0, working[j].0, amount);
            settlements.push(Settlement::new(working[i].0, working[j].0, amount));
            working[i].1 += amount;
            working[j].1 -= amount;
        }

        if working[i].1.is_negligible() {
            i += 1;
        }
        if working[j].1.is_negligible() {
            j -= 1;
        }
    }

    settlements
}

/// Lays out balances in traveler order, then any remaining names sorted.
fn ordered_balances<'a>(
    balances: &'a HashMap<String, Money>,
    traveler_order: &'a [String],
) -> Vec<(&'a str, Money)> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(balances.len());
    let mut working: Vec<(&str, Money)> = Vec::with_capacity(balances.len());

    for name in traveler_order {
        if let Some(&balance) = balances.get(name) {
            if seen.insert(name.as_str()) {
                working.push((name.as_str(), balance));
            }
        }
    }

    let mut rest: Vec<(&str, Money)> = balances
        .iter()
        .filter(|(name, _)| !seen.contains(name.as_str()))
        .map(|(name, &balance)| (name.as_str(), balance))
        .collect();
    rest.sort_by(|a, b| a.0.cmp(b.0));
    working.extend(rest);

    working
}
