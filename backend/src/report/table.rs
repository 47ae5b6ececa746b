//! Balance-sheet roll-forward table
//!
//! Rows follow a fixed order: Cash, HQLA, Loans, RealEstate, Deposits,
//! Wholesale, Equity, then the computed balance check
//! `assets − (liabilities + equity)`.

use crate::models::category::{AssetCategory, LiabilityCategory};
use crate::models::snapshot::{PeriodSnapshot, SimulationResult};
use serde::Serialize;
use std::fmt;

/// Row of the roll-forward table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableRow {
    Asset(AssetCategory),
    Liability(LiabilityCategory),
    Equity,
    BalanceCheck,
}

impl TableRow {
    /// Rows in display order
    pub const ORDER: [TableRow; 8] = [
        TableRow::Asset(AssetCategory::Cash),
        TableRow::Asset(AssetCategory::Hqla),
        TableRow::Asset(AssetCategory::Loans),
        TableRow::Asset(AssetCategory::RealEstate),
        TableRow::Liability(LiabilityCategory::Deposits),
        TableRow::Liability(LiabilityCategory::Wholesale),
        TableRow::Equity,
        TableRow::BalanceCheck,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TableRow::Asset(category) => category.label(),
            TableRow::Liability(category) => category.label(),
            TableRow::Equity => "Equity",
            TableRow::BalanceCheck => "Balance Check",
        }
    }

    fn value(&self, snapshot: &PeriodSnapshot) -> f64 {
        match self {
            TableRow::Asset(category) => snapshot.closing_assets.get(*category),
            TableRow::Liability(category) => snapshot.closing_liabilities.get(*category),
            TableRow::Equity => snapshot.equity,
            TableRow::BalanceCheck => snapshot.balance_check(),
        }
    }
}

/// Closing balances, one column per period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheetTable {
    periods: Vec<usize>,
    rows: Vec<(TableRow, Vec<f64>)>,
}

impl BalanceSheetTable {
    pub fn from_result(result: &SimulationResult) -> Self {
        Self::from_snapshots(result.snapshots())
    }

    pub fn from_snapshots(snapshots: &[PeriodSnapshot]) -> Self {
        let periods = snapshots.iter().map(|s| s.period).collect();
        let rows = TableRow::ORDER
            .iter()
            .map(|row| (*row, snapshots.iter().map(|s| row.value(s)).collect()))
            .collect();
        Self { periods, rows }
    }

    pub fn periods(&self) -> &[usize] {
        &self.periods
    }

    pub fn rows(&self) -> &[(TableRow, Vec<f64>)] {
        &self.rows
    }

    /// Values of one row across periods
    pub fn row(&self, row: TableRow) -> Option<&[f64]> {
        self.rows
            .iter()
            .find(|(r, _)| *r == row)
            .map(|(_, values)| values.as_slice())
    }

    /// Value of `row` at `period`
    pub fn value(&self, row: TableRow, period: usize) -> Option<f64> {
        let column = self.periods.iter().position(|p| *p == period)?;
        self.row(row).and_then(|values| values.get(column).copied())
    }

    /// Largest absolute balance-check value in the table
    pub fn max_balance_error(&self) -> f64 {
        self.row(TableRow::BalanceCheck)
            .map(|values| values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs())))
            .unwrap_or(0.0)
    }
}

impl fmt::Display for BalanceSheetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<14}", "")?;
        for period in &self.periods {
            write!(f, "{:>12}", format!("Period {}", period))?;
        }
        writeln!(f)?;

        for (row, values) in &self.rows {
            write!(f, "{:<14}", row.label())?;
            for value in values {
                match row {
                    TableRow::BalanceCheck => write!(f, "{:>12.6}", value)?,
                    _ => write!(f, "{:>12.2}", value)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
