//! Ledger accumulation: what each traveler paid, what they owe, and the net.
//!
//! Maintains the invariant `balance == paid - owed` for every traveler, and
//! `sum(paid) == sum(owed)` across the ledger whenever every expense has at
//! least one participant and its payers cover the amount.

use crate::error::{Result, SplitError};
use crate::expense::Expense;
use crate::money::Money;
use crate::settlement::{compute_settlements, Settlement};
use log::{debug, warn};
use std::collections::HashMap;

/// One traveler's part in a single expense.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInvolvement {
    /// Position of the expense in the input list.
    pub expense_index: usize,

    pub expense_id: Option<String>,
    pub title: String,

    /// Amount this traveler paid towards the expense. Duplicate payer entries
    /// are summed here.
    pub paid: Money,

    /// This traveler's equal share. Zero when they only paid.
    pub share: Money,

    pub payer: bool,
    pub participant: bool,
}

impl ExpenseInvolvement {
    fn new(expense_index: usize, expense: &Expense) -> Self {
        ExpenseInvolvement {
            expense_index,
            expense_id: expense.id.clone(),
            title: expense.title.clone(),
            paid: Money::ZERO,
            share: Money::ZERO,
            payer: false,
            participant: false,
        }
    }

    /// What this expense contributes to the traveler's balance.
    pub fn net(&self) -> Money {
        self.paid - self.share
    }
}

/// A traveler's accumulated totals.
///
/// # Invariants
///
/// - `paid` is the sum of `paid` over `involvements`
/// - `owed` is the sum of `share` over `involvements`
/// - `balance() == paid - owed`; positive means the traveler is owed money
#[derive(Debug, Clone, PartialEq)]
pub struct TravelerBalance {
    /// Traveler display name.
    pub name: String,

    /// Total contributed across all expenses.
    pub paid: Money,

    /// Total of equal shares across the expenses they participate in.
    pub owed: Money,

    /// `false` for names referenced by expenses but absent from the trip's
    /// traveler list, usually a traveler removed after the expense was added.
    pub known: bool,

    /// Expenses this traveler paid for or shares, in input order.
    pub involvements: Vec<ExpenseInvolvement>,
}

impl TravelerBalance {
    /// Creates an entry with zero totals.
    pub fn new(name: impl Into<String>, known: bool) -> Self {
        TravelerBalance {
            name: name.into(),
            paid: Money::ZERO,
            owed: Money::ZERO,
            known,
            involvements: Vec::new(),
        }
    }

    /// Net position: `paid - owed`.
    pub fn balance(&self) -> Money {
        self.paid - self.owed
    }

    /// Returns `true` if the balance is within the tolerance of zero.
    pub fn is_settled(&self) -> bool {
        self.balance().is_negligible()
    }

    /// Records a payer contribution.
    fn credit(&mut self, expense_index: usize, expense: &Expense, amount: Money) {
        self.paid += amount;
        let involvement = self.involvement_mut(expense_index, expense);
        involvement.paid += amount;
        involvement.payer = true;
    }

    /// Records a participant share.
    fn charge(&mut self, expense_index: usize, expense: &Expense, share: Money) {
        self.owed += share;
        let involvement = self.involvement_mut(expense_index, expense);
        involvement.share += share;
        involvement.participant = true;
    }

    /// Expenses are accumulated in order, so the current one is always last.
    fn involvement_mut(&mut self, expense_index: usize, expense: &Expense) -> &mut ExpenseInvolvement {
        let is_current = self
            .involvements
            .last()
            .map(|inv| inv.expense_index == expense_index)
            .unwrap_or(false);
        if !is_current {
            self.involvements
                .push(ExpenseInvolvement::new(expense_index, expense));
        }
        let last = self.involvements.len() - 1;
        &mut self.involvements[last]
    }

    /// Verifies the totals match the involvement breakdown.
    #[cfg(debug_assertions)]
    pub fn check_invariant(&self) -> bool {
        let paid: Money = self.involvements.iter().map(|inv| inv.paid).sum();
        let owed: Money = self.involvements.iter().map(|inv| inv.share).sum();
        paid == self.paid && owed == self.owed
    }
}

/// Per-traveler balances for one trip snapshot.
///
/// Entries keep the trip's traveler order; names only found in expenses are
/// appended in the order they were first seen.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<TravelerBalance>,
    index: HashMap<String, usize>,
}

impl Ledger {
    /// Seeds a zeroed entry per traveler, rejecting repeated names.
    fn with_travelers(travelers: &[String]) -> Result<Self> {
        let mut ledger = Ledger::default();
        for name in travelers {
            if ledger.index.contains_key(name) {
                return Err(SplitError::DuplicateTraveler { name: name.clone() });
            }
            ledger.push(name, true);
        }
        Ok(ledger)
    }

    fn push(&mut self, name: &str, known: bool) -> usize {
        let idx = self.entries.len();
        self.entries.push(TravelerBalance::new(name, known));
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Returns the entry for `name`, creating an unknown one if needed.
    fn entry_mut(&mut self, name: &str) -> &mut TravelerBalance {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                warn!(
                    "Expense references unknown traveler {:?}, tracking separately",
                    name
                );
                self.push(name, false)
            }
        };
        &mut self.entries[idx]
    }

    pub fn get(&self, name: &str) -> Option<&TravelerBalance> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }

    /// Shorthand for `get(name).map(|t| t.balance())`.
    pub fn balance_of(&self, name: &str) -> Option<Money> {
        self.get(name).map(TravelerBalance::balance)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TravelerBalance> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Traveler names in ledger order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|t| t.name.clone()).collect()
    }

    /// Net balance per traveler, the input to settlement planning.
    pub fn net_balances(&self) -> HashMap<String, Money> {
        self.entries
            .iter()
            .map(|t| (t.name.clone(), t.balance()))
            .collect()
    }

    pub fn total_paid(&self) -> Money {
        self.entries.iter().map(|t| t.paid).sum()
    }

    pub fn total_owed(&self) -> Money {
        self.entries.iter().map(|t| t.owed).sum()
    }

    /// Sum of all balances. Anything beyond the tolerance means some expense
    /// had payers not matching its amount, or no one to share it.
    pub fn imbalance(&self) -> Money {
        self.entries.iter().map(TravelerBalance::balance).sum()
    }

    /// Names referenced by expenses but missing from the traveler list.
    pub fn unknown_travelers(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|t| !t.known)
            .map(|t| t.name.as_str())
    }

    /// Plans the transfers that settle this ledger.
    pub fn settlements(&self) -> Vec<Settlement> {
        compute_settlements(&self.net_balances(), &self.names())
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a TravelerBalance;
    type IntoIter = std::slice::Iter<'a, TravelerBalance>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Computes paid, owed and net balance for every traveler.
///
/// Expenses without explicit participants are split across `travelers` as
/// given here, so the implied participant set always reflects the current
/// trip. Payer totals are not validated; a mismatch is logged and the expense
/// is counted as given.
///
/// # Errors
///
/// Returns [`SplitError::DuplicateTraveler`] if a name repeats in `travelers`.
pub fn compute_balances(travelers: &[String], expenses: &[Expense]) -> Result<Ledger> {
    let mut ledger = Ledger::with_travelers(travelers)?;

    for (expense_index, expense) in expenses.iter().enumerate() {
        if let Some(diff) = expense.payer_discrepancy() {
            warn!(
                "Expense #{} {:?}: payers total {} but amount is {} (difference {})",
                expense_index,
                expense.title,
                expense.payers_total(),
                expense.amount,
                diff
            );
        }

        for payer in &expense.payers {
            ledger
                .entry_mut(&payer.name)
                .credit(expense_index, expense, payer.amount);
        }

        let participants = expense.effective_participants(travelers);
        let share = match expense.amount.split(participants.len()) {
            Some(share) => share,
            None => {
                debug!(
                    "Expense #{} {:?} has no participants, skipping shares",
                    expense_index, expense.title
                );
                continue;
            }
        };

        for name in participants {
            ledger.entry_mut(name).charge(expense_index, expense, share);
        }

        debug!(
            "Expense #{} {:?}: {} split at {} each",
            expense_index, expense.title, expense.amount, share
        );
    }

    Ok(ledger)
}
