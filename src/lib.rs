//! # Trip Settle
//!
//! Tracks shared trip expenses and works out who owes whom, so a group can
//! settle up with few payments.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: Full-precision `rust_decimal` money, rounded
//!   to cents only for display
//! - **One-cent tolerance**: Balances and transfers under `0.01` count as zero
//! - **Recompute on read**: Balances and settlements are pure functions of a
//!   trip snapshot; nothing is stored
//! - **Deterministic output**: Travelers keep trip order, ties included
//!
//! ## Example
//!
//! ```
//! use trip_settle::{compute_balances, Expense, Money};
//!
//! let travelers = vec!["A".to_string(), "B".to_string()];
//! let expenses = vec![Expense::new("Dinner", Money::from(100))
//!     .paid_by("A", Money::from(100))
//!     .shared_by(["A", "B"])];
//!
//! let ledger = compute_balances(&travelers, &expenses).unwrap();
//! assert_eq!(ledger.balance_of("B"), Some(Money::from(-50)));
//!
//! let settlements = ledger.settlements();
//! assert_eq!(settlements[0].from, "B");
//! assert_eq!(settlements[0].to, "A");
//! assert_eq!(settlements[0].amount, Money::from(50));
//! ```

pub mod engine;
pub mod error;
pub mod expense;
pub mod ledger;
pub mod money;
pub mod settlement;
pub mod summary;
pub mod trip;

pub use engine::{Report, SplitEngine};
pub use error::{Result, SplitError};
pub use expense::{Expense, ExpenseRecord, PayerContribution};
pub use ledger::{compute_balances, ExpenseInvolvement, Ledger, TravelerBalance};
pub use money::Money;
pub use settlement::{compute_settlements, Settlement};
pub use summary::TripSummary;
pub use trip::Trip;
