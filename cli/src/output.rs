//! Terminal and JSON rendering of a simulation run

use anyhow::Result;
use bank_survival_core_rs::report::{narratives, ratio_series};
use bank_survival_core_rs::{
    BalanceSheetTable, PeriodNarrative, SimulationConfig, SimulationResult, SurvivalIndicator,
};
use colored::Colorize;
use serde::Serialize;

/// Everything a run produces, in one JSON document
#[derive(Serialize)]
pub struct RunReport<'a> {
    pub indicator: SurvivalIndicator,
    pub config: &'a SimulationConfig,
    pub result: &'a SimulationResult,
    pub narratives: Vec<PeriodNarrative>,
}

impl<'a> RunReport<'a> {
    pub fn new(config: &'a SimulationConfig, result: &'a SimulationResult) -> Self {
        Self {
            indicator: SurvivalIndicator::from_result(result),
            config,
            result,
            narratives: narratives(result, config.min_cash),
        }
    }
}

pub fn print_json(config: &SimulationConfig, result: &SimulationResult) -> Result<()> {
    let report = RunReport::new(config, result);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn print_human(config: &SimulationConfig, result: &SimulationResult) {
    println!("{}", "=== Bank Balance-Sheet Survival ===".bright_green().bold());
    println!("{} {}", "Run:".bright_cyan(), result.run_id());
    println!("{} {}", "Config hash:".bright_cyan(), result.config_hash());
    println!("{} {:?}", "Breach policy:".bright_cyan(), result.breach_policy());
    match config.min_cash {
        Some(floor) => println!("{} {:.2}", "Cash floor:".bright_cyan(), floor),
        None => println!("{} none", "Cash floor:".bright_cyan()),
    }
    let priority: Vec<String> = config.priority.iter().map(|c| c.to_string()).collect();
    println!("{} {}", "Priority:".bright_cyan(), priority.join(" > "));

    println!("\n{}", "Balance sheet roll-forward".bright_yellow());
    print!("{}", BalanceSheetTable::from_result(result));

    let ratios = ratio_series(result);
    if !ratios.is_empty() {
        println!("\n{}", "Ratios".bright_yellow());
        for point in &ratios {
            println!(
                "  {} LCR {:>10.4}  NSFR {:>8.4}",
                format!("Period {}", point.period).dimmed(),
                point.lcr,
                point.nsfr
            );
        }
    }

    println!("\n{}", "What happened".bright_yellow());
    for story in narratives(result, config.min_cash) {
        println!("{}", story);
    }

    println!("\n{} {:.2}", "Total haircut loss:".bright_cyan(), result.total_realized_loss());
    let indicator = SurvivalIndicator::from_result(result);
    if indicator.is_breach() {
        println!("{}", indicator.to_string().red().bold());
    } else {
        println!("{}", indicator.to_string().green().bold());
    }
}
