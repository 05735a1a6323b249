use crate::domain::config::CalculatorConfig;
use crate::error::Result;
use config::{Config, Environment, File};
use std::path::Path;
use tracing::info;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "FEECALC";

/// Loads the calculator configuration.
///
/// Sources are layered: compiled-in defaults, then the optional file at
/// `path` (TOML or JSON, chosen by extension), then `FEECALC_*` environment
/// variables using `__` to separate nested keys, e.g.
/// `FEECALC_SCHEDULE__AGENT_REVSHARE=0.4`.
pub fn load(path: Option<&Path>) -> Result<CalculatorConfig> {
    load_with_env(path, Environment::with_prefix(ENV_PREFIX))
}

fn load_with_env(path: Option<&Path>, env: Environment) -> Result<CalculatorConfig> {
    let defaults = Config::try_from(&CalculatorConfig::default())?;

    let mut builder = Config::builder().add_source(defaults);
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config: CalculatorConfig = builder
        .add_source(env.prefix_separator("_").separator("__"))
        .build()?
        .try_deserialize()?;

    config.validate()?;

    info!(
        agent_revshare = %config.schedule.agent_revshare.value(),
        dual_rate = %config.dual.gross_profit_rate.value(),
        flat_rate = %config.flat.gross_profit_rate.value(),
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use crate::error::CalcError;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = load_with_env(None, no_env()).unwrap();
        assert_eq!(config, CalculatorConfig::default());
    }

    #[test]
    fn test_toml_file_overrides_single_fee() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[schedule.monthly]").unwrap();
        writeln!(file, "gateway = 12.5").unwrap();
        writeln!(file, "[dual]").unwrap();
        writeln!(file, "gross_profit_rate = 0.02").unwrap();

        let config = load_with_env(Some(file.path()), no_env()).unwrap();
        assert_eq!(config.schedule.monthly.gateway, Money::new(dec!(12.5)));
        assert_eq!(
            config.schedule.monthly.account_on_file,
            Money::new(dec!(7.50))
        );
        assert_eq!(config.dual.gross_profit_rate.value(), dec!(0.02));
        assert!(config.dual.charges_compliance_fee);
    }

    #[test]
    fn test_env_overrides_nested_key() {
        let vars = HashMap::from([
            (
                "FEECALC_SCHEDULE__AGENT_REVSHARE".to_string(),
                "0.4".to_string(),
            ),
            (
                "FEECALC_SCHEDULE__POLICY__MOBILE_FEE_COUNTS_AGAINST_AGENT".to_string(),
                "false".to_string(),
            ),
        ]);
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(vars));

        let config = load_with_env(None, env).unwrap();
        assert_eq!(config.schedule.agent_revshare.value(), dec!(0.4));
        assert!(!config.schedule.policy.mobile_fee_counts_against_agent);
    }

    #[test]
    fn test_out_of_range_rate_rejected() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "flat": {{ "gross_profit_rate": 1.5 }} }}"#).unwrap();

        let result = load_with_env(Some(file.path()), no_env());
        assert!(matches!(result, Err(CalcError::ConfigError(_))));
    }

    #[test]
    fn test_negative_fee_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[schedule.one_time]").unwrap();
        writeln!(file, "stand_cost = -35").unwrap();

        let result = load_with_env(Some(file.path()), no_env());
        assert!(matches!(result, Err(CalcError::ValidationError(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_with_env(Some(Path::new("does/not/exist.toml")), no_env());
        assert!(matches!(result, Err(CalcError::ConfigError(_))));
    }
}
