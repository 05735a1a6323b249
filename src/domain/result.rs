use super::config::PricingModel;
use super::money::Money;
use super::setup::MerchantSetup;
use serde::Serialize;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Itemized recurring fees for one merchant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MonthlyFeeBreakdown {
    pub account_on_file: Money,
    pub gateway: Money,
    pub first_terminal: Money,
    pub additional_terminals: Money,
    pub mobile_devices: Money,
}

impl MonthlyFeeBreakdown {
    pub fn total(&self) -> Money {
        [
            self.account_on_file,
            self.gateway,
            self.first_terminal,
            self.additional_terminals,
            self.mobile_devices,
        ]
        .into_iter()
        .sum()
    }
}

/// Monthly fees as shown to the user and as charged to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyFees {
    pub breakdown: MonthlyFeeBreakdown,
    pub total: Money,
    /// The part deducted from agent share when fees are absorbed.
    pub agent_responsible: Money,
}

/// Itemized setup fees for one merchant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OneTimeFeeBreakdown {
    pub hardware: Money,
    pub stand: Money,
    pub mobile_app_download: Money,
    pub compliance: Money,
}

impl OneTimeFeeBreakdown {
    pub fn total(&self) -> Money {
        [self.hardware, self.stand, self.mobile_app_download, self.compliance]
            .into_iter()
            .sum()
    }
}

/// Per-merchant economics of one pricing model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingResult {
    pub model: PricingModel,
    pub gross_profit: Money,
    pub agent_share: Money,
    pub monthly_fees: MonthlyFeeBreakdown,
    pub monthly_fee_total: Money,
    pub monthly_fee_agent_responsible: Money,
    /// Fees billed to the merchant; equals `agent_share`.
    pub net_monthly_passing: Money,
    /// May be negative when fees exceed the agent share.
    pub net_monthly_absorbing: Money,
    pub yearly_passing: Money,
    pub yearly_absorbing: Money,
    pub one_time_fees: OneTimeFeeBreakdown,
    pub one_time_fee_total: Money,
    /// Present only when the setup covers more than one merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<PortfolioFigures>,
}

impl PricingResult {
    /// Multiplies every per-merchant figure by `merchant_count`.
    pub fn scaled(&self, merchant_count: u32) -> PortfolioFigures {
        PortfolioFigures {
            merchant_count,
            gross_profit: self.gross_profit.times(merchant_count),
            agent_share: self.agent_share.times(merchant_count),
            monthly_fee_total: self.monthly_fee_total.times(merchant_count),
            monthly_fee_agent_responsible: self
                .monthly_fee_agent_responsible
                .times(merchant_count),
            net_monthly_passing: self.net_monthly_passing.times(merchant_count),
            net_monthly_absorbing: self.net_monthly_absorbing.times(merchant_count),
            yearly_passing: self.yearly_passing.times(merchant_count),
            yearly_absorbing: self.yearly_absorbing.times(merchant_count),
            one_time_fee_total: self.one_time_fee_total.times(merchant_count),
        }
    }
}

/// Portfolio totals across `merchant_count` identical merchants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioFigures {
    pub merchant_count: u32,
    pub gross_profit: Money,
    pub agent_share: Money,
    pub monthly_fee_total: Money,
    pub monthly_fee_agent_responsible: Money,
    pub net_monthly_passing: Money,
    pub net_monthly_absorbing: Money,
    pub yearly_passing: Money,
    pub yearly_absorbing: Money,
    pub one_time_fee_total: Money,
}

/// Both pricing models evaluated for the same setup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub setup: MerchantSetup,
    pub dual: PricingResult,
    pub flat: PricingResult,
}

impl Comparison {
    pub fn results(&self) -> [&PricingResult; 2] {
        [&self.dual, &self.flat]
    }
}
