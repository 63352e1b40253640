//! Split engine over a single trip snapshot.
//!
//! The engine holds an immutable copy of the trip and recomputes balances,
//! settlements and totals on every call. Nothing is cached, so a caller that
//! edits expenses builds a new engine from the new snapshot.

use crate::error::{Result, SplitError};
use crate::ledger::{compute_balances, Ledger};
use crate::settlement::Settlement;
use crate::summary::TripSummary;
use crate::trip::Trip;
use csv::WriterBuilder;
use log::{debug, warn};
use std::io::{Read, Write};
use std::str::FromStr;

/// Which CSV report to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Report {
    /// `from,to,amount` transfers.
    #[default]
    Settlements,

    /// `traveler,paid,owed,balance` per traveler.
    Balances,

    /// `item,value` trip totals.
    Summary,
}

impl FromStr for Report {
    type Err = SplitError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "settlements" => Ok(Report::Settlements),
            "balances" => Ok(Report::Balances),
            "summary" => Ok(Report::Summary),
            _ => Err(SplitError::UnknownReport(s.to_string())),
        }
    }
}

/// The expense split engine.
///
/// # Output
///
/// All monetary values in reports are rounded to cents. Computation itself
/// runs at full precision.
pub struct SplitEngine {
    trip: Trip,
}

impl SplitEngine {
    pub fn new(trip: Trip) -> Self {
        SplitEngine { trip }
    }

    /// Loads a trip snapshot from JSON.
    pub fn from_json<R: Read>(reader: R) -> Result<Self> {
        let trip = Trip::from_reader(reader)?;
        debug!(
            "Loaded trip {:?} with {} travelers and {} expenses",
            trip.name,
            trip.travelers.len(),
            trip.expenses.len()
        );
        Ok(SplitEngine::new(trip))
    }

    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    /// Computes per-traveler balances.
    ///
    /// Logs a warning when the balances do not net to zero, which means the
    /// stored payer amounts disagree with expense totals.
    pub fn ledger(&self) -> Result<Ledger> {
        let ledger = compute_balances(&self.trip.travelers, &self.trip.expenses)?;

        let imbalance = ledger.imbalance();
        if !imbalance.is_negligible() {
            warn!(
                "Balances for trip {:?} are off by {}; check payer amounts",
                self.trip.name, imbalance
            );
        }

        Ok(ledger)
    }

    /// Plans the transfers needed to settle up.
    pub fn settlements(&self) -> Result<Vec<Settlement>> {
        Ok(self.ledger()?.settlements())
    }

    pub fn summary(&self) -> TripSummary {
        TripSummary::compute(&self.trip.travelers, &self.trip.expenses)
    }

    pub fn write_report<W: Write>(&self, report: Report, writer: W) -> Result<()> {
        match report {
            Report::Settlements => self.write_settlements(writer),
            Report::Balances => self.write_balances(writer),
            Report::Summary => self.write_summary(writer),
        }
    }

    /// Writes one row per traveler in ledger order.
    pub fn write_balances<W: Write>(&self, writer: W) -> Result<()> {
        let ledger = self.ledger()?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["traveler", "paid", "owed", "balance"])?;

        for traveler in &ledger {
            csv_writer.write_record([
                traveler.name.clone(),
                traveler.paid.to_string(),
                traveler.owed.to_string(),
                traveler.balance().to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes transfers in planning order.
    ///
    /// The header is always written, even when nobody owes anything.
    pub fn write_settlements<W: Write>(&self, writer: W) -> Result<()> {
        let settlements = self.settlements()?;
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        csv_writer.write_record(["from", "to", "amount"])?;

        for settlement in &settlements {
            csv_writer.serialize(settlement)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes totals, fair share, settlement count, then per-category and
    /// per-payer totals.
    pub fn write_summary<W: Write>(&self, writer: W) -> Result<()> {
        let summary = self.summary();
        let settlement_count = self.settlements()?.len();
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["item", "value"])?;
        csv_writer.write_record(["total_expenses".to_string(), summary.total_expenses.to_string()])?;
        csv_writer.write_record(["travelers".to_string(), summary.traveler_count.to_string()])?;
        csv_writer.write_record([
            "fair_share".to_string(),
            summary
                .fair_share
                .map(|m| m.to_string())
                .unwrap_or_default(),
        ])?;
        csv_writer.write_record(["settlements".to_string(), settlement_count.to_string()])?;

        for (category, total) in &summary.by_category {
            csv_writer.write_record([format!("category:{}", category), total.to_string()])?;
        }
        for (name, paid) in &summary.paid_by_traveler {
            csv_writer.write_record([format!("paid:{}", name), paid.to_string()])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
