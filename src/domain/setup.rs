use super::config::FeePolicy;
use super::money::{Money, parse_currency};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Largest monthly volume accepted from raw input: one trillion dollars.
pub const MAX_MONTHLY_VOLUME: Decimal = dec!(1000000000000);

/// The card terminal hardware a merchant buys, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalType {
    #[default]
    None,
    #[serde(alias = "p8")]
    TerminalA,
    #[serde(alias = "p18")]
    TerminalB,
    #[serde(alias = "p12-mini")]
    TerminalC,
}

impl TerminalType {
    /// Only `TerminalA` has a stand option.
    pub fn supports_stand(&self) -> bool {
        matches!(self, TerminalType::TerminalA)
    }
}

impl fmt::Display for TerminalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TerminalType::None => "None",
            TerminalType::TerminalA => "Dejavoo P8",
            TerminalType::TerminalB => "Dejavoo P18",
            TerminalType::TerminalC => "Dejavoo P12 Mini",
        };
        f.write_str(label)
    }
}

/// A validated merchant hardware and channel setup.
///
/// Built through [`SetupInput::normalize`] in normal use; every count is
/// already clamped to its valid range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchantSetup {
    /// Dollar volume processed per month.
    pub monthly_volume: Money,
    pub terminal_type: TerminalType,
    /// Ignored unless `terminal_type` is `TerminalA`.
    pub wants_stand: bool,
    /// Drives per-terminal monthly fees, independent of `terminal_type`.
    pub terminal_count: u32,
    /// Zero means mobile payments are not used.
    pub mobile_device_count: u32,
    /// Number of identical merchants in a portfolio report. Always at least one.
    pub merchant_count: u32,
    /// Only consulted when the Dual compliance fee is optional.
    pub compliance_fee_opt_in: bool,
}

impl MerchantSetup {
    pub fn new(monthly_volume: Money) -> Self {
        Self {
            monthly_volume,
            terminal_type: TerminalType::None,
            wants_stand: false,
            terminal_count: 1,
            mobile_device_count: 0,
            merchant_count: 1,
            compliance_fee_opt_in: true,
        }
    }

    pub fn with_terminal(mut self, terminal_type: TerminalType, wants_stand: bool) -> Self {
        self.terminal_type = terminal_type;
        self.wants_stand = wants_stand;
        self
    }

    pub fn with_terminal_count(mut self, terminal_count: u32) -> Self {
        self.terminal_count = terminal_count;
        self
    }

    pub fn with_mobile_devices(mut self, mobile_device_count: u32) -> Self {
        self.mobile_device_count = mobile_device_count;
        self
    }

    pub fn with_merchant_count(mut self, merchant_count: u32) -> Self {
        self.merchant_count = merchant_count.max(1);
        self
    }

    pub fn with_compliance_opt_in(mut self, opt_in: bool) -> Self {
        self.compliance_fee_opt_in = opt_in;
        self
    }

    /// True when a stand is both requested and available for the terminal.
    pub fn includes_stand(&self) -> bool {
        self.wants_stand && self.terminal_type.supports_stand()
    }
}

/// Raw, untrusted setup values as typed by a user or read from a file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetupInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub terminal: Option<TerminalType>,
    #[serde(default)]
    pub stand: Option<bool>,
    #[serde(default)]
    pub terminals: Option<i64>,
    #[serde(default)]
    pub mobile_devices: Option<i64>,
    #[serde(default)]
    pub merchants: Option<i64>,
    #[serde(default)]
    pub compliance: Option<bool>,
}

impl SetupInput {
    /// Turns raw input into a valid `MerchantSetup`.
    ///
    /// Unparseable volume becomes zero, negative values are clamped, volume
    /// is capped at [`MAX_MONTHLY_VOLUME`] and the terminal count never drops
    /// below the policy's minimum.
    pub fn normalize(&self, policy: &FeePolicy) -> MerchantSetup {
        let mut volume = Money::new(parse_currency(&self.volume));
        if volume.is_negative() {
            warn!(volume = %volume, "negative monthly volume clamped to zero");
            volume = Money::ZERO;
        } else if volume.value() > MAX_MONTHLY_VOLUME {
            warn!(volume = %volume, "monthly volume too large, capped");
            volume = Money::new(MAX_MONTHLY_VOLUME);
        }

        let terminal_type = self.terminal.unwrap_or_default();
        let wants_stand = self.stand.unwrap_or(false);
        if wants_stand && !terminal_type.supports_stand() {
            warn!(
                terminal = %terminal_type,
                "stand requested for a terminal without one, ignoring"
            );
        }

        let minimum = policy.default_minimum_terminal_count;
        let terminal_count =
            clamp_count("terminals", self.terminals.unwrap_or(i64::from(minimum))).max(minimum);
        let mobile_device_count = clamp_count("mobile_devices", self.mobile_devices.unwrap_or(0));
        let merchant_count = clamp_count("merchants", self.merchants.unwrap_or(1)).max(1);

        MerchantSetup {
            monthly_volume: volume,
            terminal_type,
            wants_stand: wants_stand && terminal_type.supports_stand(),
            terminal_count,
            mobile_device_count,
            merchant_count,
            compliance_fee_opt_in: self.compliance.unwrap_or(true),
        }
    }
}

fn clamp_count(field: &'static str, value: i64) -> u32 {
    match u32::try_from(value) {
        Ok(count) => count,
        Err(_) if value < 0 => {
            warn!(
                field = field,
                value = value,
                "negative count clamped to zero"
            );
            0
        }
        Err(_) => {
            warn!(field = field, value = value, "count too large, capped");
            u32::MAX
        }
    }
}
