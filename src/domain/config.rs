use super::money::{Money, Rate};
use super::setup::TerminalType;
use crate::error::{CalcError, Result};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two pricing models compared side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingModel {
    Dual,
    Flat,
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingModel::Dual => f.write_str("Dual Pricing"),
            PricingModel::Flat => f.write_str("Flat Rate"),
        }
    }
}

/// Per-model profit assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingModelConfig {
    pub model: PricingModel,
    /// Heading shown in reports, e.g. "Dual Pricing (3.99%)".
    pub label: String,
    /// Processor profit as a fraction of monthly volume.
    pub gross_profit_rate: Rate,
    pub charges_compliance_fee: bool,
}

impl PricingModelConfig {
    pub fn dual() -> Self {
        Self {
            model: PricingModel::Dual,
            label: "Dual Pricing (3.99%)".to_string(),
            gross_profit_rate: Rate(dec!(0.015)),
            charges_compliance_fee: true,
        }
    }

    pub fn flat() -> Self {
        Self {
            model: PricingModel::Flat,
            label: "Flat Rate (2.95% + $0.30)".to_string(),
            gross_profit_rate: Rate(dec!(0.01)),
            charges_compliance_fee: false,
        }
    }
}

/// Recurring per-merchant fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyFeeSchedule {
    pub account_on_file: Money,
    pub gateway: Money,
    pub first_terminal: Money,
    /// Charged per terminal beyond the first.
    pub additional_terminal: Money,
    /// Charged per mobile device.
    pub mobile_device_monthly: Money,
}

impl Default for MonthlyFeeSchedule {
    fn default() -> Self {
        Self {
            account_on_file: Money(dec!(7.50)),
            gateway: Money(dec!(10.00)),
            first_terminal: Money(dec!(4.00)),
            additional_terminal: Money(dec!(2.00)),
            mobile_device_monthly: Money(dec!(10.00)),
        }
    }
}

/// One-time hardware cost for each terminal choice, `None` included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareCosts {
    pub none: Money,
    pub terminal_a: Money,
    pub terminal_b: Money,
    pub terminal_c: Money,
}

impl HardwareCosts {
    pub fn cost(&self, terminal: TerminalType) -> Money {
        match terminal {
            TerminalType::None => self.none,
            TerminalType::TerminalA => self.terminal_a,
            TerminalType::TerminalB => self.terminal_b,
            TerminalType::TerminalC => self.terminal_c,
        }
    }
}

impl Default for HardwareCosts {
    fn default() -> Self {
        Self {
            none: Money::ZERO,
            terminal_a: Money(dec!(310.00)),
            terminal_b: Money(dec!(446.50)),
            terminal_c: Money(dec!(166.75)),
        }
    }
}

/// Setup fees charged once per merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneTimeFeeSchedule {
    pub hardware: HardwareCosts,
    /// `TerminalA` only.
    pub stand_cost: Money,
    /// Charged per mobile device.
    pub mobile_app_download: Money,
    pub compliance_fee: Money,
}

impl Default for OneTimeFeeSchedule {
    fn default() -> Self {
        Self {
            hardware: HardwareCosts::default(),
            stand_cost: Money(dec!(35.00)),
            mobile_app_download: Money(dec!(30.00)),
            compliance_fee: Money(dec!(3.00)),
        }
    }
}

/// Business rules that have changed over time, kept as explicit switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeePolicy {
    /// Whether mobile monthly fees reduce agent profit when fees are absorbed.
    pub mobile_fee_counts_against_agent: bool,
    /// Terminal count assumed when none is given, and the floor for given counts.
    pub default_minimum_terminal_count: u32,
    /// When false, the Dual compliance fee is only charged to setups that opt in.
    pub compliance_fee_always_applies_to_dual: bool,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            mobile_fee_counts_against_agent: true,
            default_minimum_terminal_count: 1,
            compliance_fee_always_applies_to_dual: true,
        }
    }
}

/// Fee amounts shared by both pricing models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    pub monthly: MonthlyFeeSchedule,
    pub one_time: OneTimeFeeSchedule,
    /// Fraction of gross profit paid to the agent.
    pub agent_revshare: Rate,
    pub policy: FeePolicy,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            monthly: MonthlyFeeSchedule::default(),
            one_time: OneTimeFeeSchedule::default(),
            agent_revshare: Rate(dec!(0.50)),
            policy: FeePolicy::default(),
        }
    }
}

/// Everything the engine needs, loaded once and then read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub schedule: FeeSchedule,
    pub dual: PricingModelConfig,
    pub flat: PricingModelConfig,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            schedule: FeeSchedule::default(),
            dual: PricingModelConfig::dual(),
            flat: PricingModelConfig::flat(),
        }
    }
}

impl CalculatorConfig {
    pub fn model(&self, model: PricingModel) -> &PricingModelConfig {
        match model {
            PricingModel::Dual => &self.dual,
            PricingModel::Flat => &self.flat,
        }
    }

    /// Rejects negative fee amounts and mislabeled model sections.
    pub fn validate(&self) -> Result<()> {
        let monthly = &self.schedule.monthly;
        let one_time = &self.schedule.one_time;
        let hardware = &one_time.hardware;
        let fees = [
            ("monthly.account_on_file", monthly.account_on_file),
            ("monthly.gateway", monthly.gateway),
            ("monthly.first_terminal", monthly.first_terminal),
            ("monthly.additional_terminal", monthly.additional_terminal),
            ("monthly.mobile_device_monthly", monthly.mobile_device_monthly),
            ("one_time.hardware.none", hardware.none),
            ("one_time.hardware.terminal_a", hardware.terminal_a),
            ("one_time.hardware.terminal_b", hardware.terminal_b),
            ("one_time.hardware.terminal_c", hardware.terminal_c),
            ("one_time.stand_cost", one_time.stand_cost),
            ("one_time.mobile_app_download", one_time.mobile_app_download),
            ("one_time.compliance_fee", one_time.compliance_fee),
        ];
        if let Some((name, fee)) = fees.iter().find(|(_, fee)| fee.is_negative()) {
            return Err(CalcError::ValidationError(format!(
                "Fee {name} must not be negative, got {}",
                fee.value()
            )));
        }

        if self.dual.model != PricingModel::Dual || self.flat.model != PricingModel::Flat {
            return Err(CalcError::ValidationError(
                "Pricing model sections must match their model".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CalculatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_hardware_lookup_is_total() {
        let hardware = HardwareCosts::default();
        assert_eq!(hardware.cost(TerminalType::None), Money::ZERO);
        assert_eq!(hardware.cost(TerminalType::TerminalA), Money(dec!(310.00)));
        assert_eq!(hardware.cost(TerminalType::TerminalB), Money(dec!(446.50)));
        assert_eq!(hardware.cost(TerminalType::TerminalC), Money(dec!(166.75)));
    }

    #[test]
    fn test_negative_fee_rejected() {
        let mut config = CalculatorConfig::default();
        config.schedule.monthly.gateway = Money(dec!(-1));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CalcError::ValidationError(msg) if msg.contains("monthly.gateway")));
    }

    #[test]
    fn test_swapped_models_rejected() {
        let mut config = CalculatorConfig::default();
        config.flat = PricingModelConfig::dual();
        assert!(matches!(
            config.validate(),
            Err(CalcError::ValidationError(_))
        ));
    }

    #[test]
    fn test_model_lookup() {
        let config = CalculatorConfig::default();
        assert_eq!(
            config.model(PricingModel::Dual).gross_profit_rate.value(),
            dec!(0.015)
        );
        assert_eq!(
            config.model(PricingModel::Flat).gross_profit_rate.value(),
            dec!(0.01)
        );
        assert!(!config.model(PricingModel::Flat).charges_compliance_fee);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "schedule": { "monthly": { "gateway": "12.00" } } }"#;
        let config: CalculatorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.schedule.monthly.gateway, Money(dec!(12.00)));
        assert_eq!(config.schedule.monthly.account_on_file, Money(dec!(7.50)));
        assert_eq!(config.flat, PricingModelConfig::flat());
    }
}
