//! Breach policies and the survival state machine

use crate::survival::metrics::PeriodMetrics;
use crate::survival::FUNDING_TOLERANCE;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which definition of "failure" the simulation uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreachPolicy {
    /// Breach when equity ≤ 0, LCR < 1, or total assets ≤ 0
    #[default]
    RatioThreshold,
    /// Breach when the withdrawal or the cash floor cannot be funded
    FundingFeasibility,
}

impl FromStr for BreachPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ratio" | "ratio_threshold" | "ratio-threshold" | "RatioThreshold" => {
                Ok(BreachPolicy::RatioThreshold)
            }
            "funding" | "funding_feasibility" | "funding-feasibility" | "FundingFeasibility" => {
                Ok(BreachPolicy::FundingFeasibility)
            }
            _ => Err(format!(
                "Invalid breach policy: '{}'. Must be 'ratio_threshold' or 'funding_feasibility'",
                s
            )),
        }
    }
}

/// Individual condition that triggered a breach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreachReason {
    NonPositiveEquity,
    LcrBelowOne,
    AssetsExhausted,
    UnfundedWithdrawal,
    CashFloorUnrestorable,
}

impl fmt::Display for BreachReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BreachReason::NonPositiveEquity => "equity is zero or negative",
            BreachReason::LcrBelowOne => "LCR below 1",
            BreachReason::AssetsExhausted => "total assets exhausted",
            BreachReason::UnfundedWithdrawal => "withdrawal could not be funded",
            BreachReason::CashFloorUnrestorable => "cash floor could not be restored",
        };
        f.write_str(text)
    }
}

/// Everything the evaluator needs to judge one period
#[derive(Debug, Clone, Copy)]
pub struct PeriodCheck {
    pub period: usize,
    pub metrics: PeriodMetrics,
    /// Withdrawal amount left unfunded after the withdrawal pass
    pub remaining_need: f64,
    /// Closing cash balance
    pub cash: f64,
    pub min_cash: Option<f64>,
    /// True when every non-cash category in the priority list is empty
    pub non_cash_priority_exhausted: bool,
}

/// Survival state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SurvivalState {
    Running,
    Breached {
        period: usize,
        reasons: Vec<BreachReason>,
    },
}

/// Applies a [`BreachPolicy`] period by period
///
/// # Example
/// ```
/// use bank_survival_core_rs::survival::{BreachPolicy, SurvivalEvaluator};
///
/// let evaluator = SurvivalEvaluator::new(BreachPolicy::RatioThreshold, false);
/// assert!(!evaluator.is_breached());
/// assert_eq!(evaluator.survival_period(), None);
/// ```
#[derive(Debug, Clone)]
pub struct SurvivalEvaluator {
    policy: BreachPolicy,
    halt_on_unfunded_withdrawal: bool,
    state: SurvivalState,
}

impl SurvivalEvaluator {
    /// Create an evaluator in the `Running` state
    ///
    /// `halt_on_unfunded_withdrawal` adds the unfunded-withdrawal check to
    /// the ratio policy. The funding policy always includes it.
    pub fn new(policy: BreachPolicy, halt_on_unfunded_withdrawal: bool) -> Self {
        Self {
            policy,
            halt_on_unfunded_withdrawal,
            state: SurvivalState::Running,
        }
    }

    pub fn policy(&self) -> BreachPolicy {
        self.policy
    }

    pub fn state(&self) -> &SurvivalState {
        &self.state
    }

    pub fn is_breached(&self) -> bool {
        matches!(self.state, SurvivalState::Breached { .. })
    }

    /// First period at which a breach occurred
    pub fn survival_period(&self) -> Option<usize> {
        match &self.state {
            SurvivalState::Running => None,
            SurvivalState::Breached { period, .. } => Some(*period),
        }
    }

    /// Conditions that hold for `check` under the configured policy
    pub fn breach_reasons(&self, check: &PeriodCheck) -> Vec<BreachReason> {
        let mut reasons = Vec::new();
        let unfunded = check.remaining_need > FUNDING_TOLERANCE;

        match self.policy {
            BreachPolicy::RatioThreshold => {
                if check.metrics.equity <= 0.0 {
                    reasons.push(BreachReason::NonPositiveEquity);
                }
                if check.metrics.lcr < 1.0 {
                    reasons.push(BreachReason::LcrBelowOne);
                }
                if check.metrics.total_assets <= 0.0 {
                    reasons.push(BreachReason::AssetsExhausted);
                }
                if self.halt_on_unfunded_withdrawal && unfunded {
                    reasons.push(BreachReason::UnfundedWithdrawal);
                }
            }
            BreachPolicy::FundingFeasibility => {
                if unfunded {
                    reasons.push(BreachReason::UnfundedWithdrawal);
                }
                if let Some(min_cash) = check.min_cash {
                    if check.cash < min_cash - FUNDING_TOLERANCE && check.non_cash_priority_exhausted {
                        reasons.push(BreachReason::CashFloorUnrestorable);
                    }
                }
            }
        }

        reasons
    }

    /// Evaluate one period; a breach moves the machine to `Breached`
    ///
    /// Once breached, further calls leave the state untouched.
    pub fn evaluate(&mut self, check: &PeriodCheck) -> &SurvivalState {
        if self.is_breached() {
            return &self.state;
        }

        let reasons = self.breach_reasons(check);
        if !reasons.is_empty() {
            info!(
                "Survival breach at period {} under {:?}: {:?}",
                check.period, self.policy, reasons
            );
            self.state = SurvivalState::Breached {
                period: check.period,
                reasons,
            };
        }

        &self.state
    }
}
