//! Simulation configuration loading and command-line overrides

use anyhow::{Context, Result};
use bank_survival_core_rs::scenario::{parse_withdrawal_list, read_withdrawal_table};
use bank_survival_core_rs::{BreachPolicy, SimulationConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Flags that replace parts of the loaded configuration
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// Delimited withdrawal list ("50,80;120")
    pub withdrawals: Option<String>,
    /// CSV file holding a withdrawal column
    pub csv: Option<PathBuf>,
    pub column: String,
    pub min_cash: Option<f64>,
    pub policy: Option<BreachPolicy>,
    pub strict: bool,
}

/// Read a JSON configuration file; missing fields take their defaults
pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: SimulationConfig = serde_json::from_str(&text)
        .with_context(|| format!("Invalid simulation config in {}", path.display()))?;
    Ok(config)
}

/// Build the configuration for a run: file (or defaults), then overrides
pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<SimulationConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(list) = &overrides.withdrawals {
        config.withdrawals = parse_withdrawal_list(list).context("Invalid --withdrawals list")?;
    } else if let Some(csv) = &overrides.csv {
        config.withdrawals = read_withdrawal_table(csv, &overrides.column)
            .with_context(|| format!("Failed to read withdrawals from {}", csv.display()))?;
    }

    if overrides.min_cash.is_some() {
        config.min_cash = overrides.min_cash;
    }
    if let Some(policy) = overrides.policy {
        config.breach_policy = policy;
    }
    if overrides.strict {
        config.halt_on_unfunded_withdrawal = true;
    }

    config.validate().context("Simulation config rejected")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn overrides() -> Overrides {
        Overrides {
            column: "withdrawal".to_string(),
            ..Overrides::default()
        }
    }

    #[test]
    fn test_no_file_uses_defaults() {
        let config = resolve(None, &overrides()).unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"withdrawals": [10, 20], "min_cash": 5}}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.withdrawals, vec![10.0, 20.0]);
        assert_eq!(config.min_cash, Some(5.0));
        assert_eq!(config.priority, SimulationConfig::default().priority);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"withdrawls": [10]}}"#).unwrap();
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_withdrawal_list_overrides_file() {
        let flags = Overrides {
            withdrawals: Some("5, 6; 7".to_string()),
            min_cash: Some(20.0),
            policy: Some(BreachPolicy::FundingFeasibility),
            strict: true,
            ..overrides()
        };
        let config = resolve(None, &flags).unwrap();
        assert_eq!(config.withdrawals, vec![5.0, 6.0, 7.0]);
        assert_eq!(config.min_cash, Some(20.0));
        assert_eq!(config.breach_policy, BreachPolicy::FundingFeasibility);
        assert!(config.halt_on_unfunded_withdrawal);
    }

    #[test]
    fn test_withdrawals_from_csv() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "period,withdrawal\n1,40\n2,60\n").unwrap();
        let flags = Overrides {
            csv: Some(file.path().to_path_buf()),
            ..overrides()
        };
        let config = resolve(None, &flags).unwrap();
        assert_eq!(config.withdrawals, vec![40.0, 60.0]);
    }

    #[test]
    fn test_negative_floor_fails_validation() {
        let flags = Overrides {
            min_cash: Some(-1.0),
            ..overrides()
        };
        assert!(resolve(None, &flags).is_err());
    }
}
