use crate::domain::config::{CalculatorConfig, FeeSchedule, PricingModel, PricingModelConfig};
use crate::domain::money::Money;
use crate::domain::result::{
    Comparison, MONTHS_PER_YEAR, MonthlyFeeBreakdown, MonthlyFees, OneTimeFeeBreakdown,
    PricingResult,
};
use crate::domain::setup::{MerchantSetup, TerminalType};
use tracing::debug;

/// Itemizes the one-time setup fees for a merchant under one pricing model.
pub fn one_time_fee_breakdown(
    setup: &MerchantSetup,
    model: &PricingModelConfig,
    schedule: &FeeSchedule,
) -> OneTimeFeeBreakdown {
    let fees = &schedule.one_time;

    let stand = if setup.terminal_type == TerminalType::TerminalA && setup.wants_stand {
        fees.stand_cost
    } else {
        Money::ZERO
    };

    // Dual compliance may be opt-in under older policies.
    let compliance_applies = model.charges_compliance_fee
        && (schedule.policy.compliance_fee_always_applies_to_dual || setup.compliance_fee_opt_in);
    let compliance = if compliance_applies {
        fees.compliance_fee
    } else {
        Money::ZERO
    };

    OneTimeFeeBreakdown {
        hardware: fees.hardware.cost(setup.terminal_type),
        stand,
        mobile_app_download: fees.mobile_app_download.times(setup.mobile_device_count),
        compliance,
    }
}

/// Total one-time setup fees for a merchant under one pricing model.
pub fn compute_one_time_fee(
    setup: &MerchantSetup,
    model: &PricingModelConfig,
    schedule: &FeeSchedule,
) -> Money {
    one_time_fee_breakdown(setup, model, schedule).total()
}

/// Recurring monthly fees, both in total and as charged against the agent.
///
/// The two amounts only differ when the policy keeps mobile fees off the
/// agent's books.
pub fn compute_monthly_fees(setup: &MerchantSetup, schedule: &FeeSchedule) -> MonthlyFees {
    let fees = &schedule.monthly;

    let first_terminal = if setup.terminal_count >= 1 {
        fees.first_terminal
    } else {
        Money::ZERO
    };
    let additional_terminals = fees
        .additional_terminal
        .times(setup.terminal_count.saturating_sub(1));

    let breakdown = MonthlyFeeBreakdown {
        account_on_file: fees.account_on_file,
        gateway: fees.gateway,
        first_terminal,
        additional_terminals,
        mobile_devices: fees.mobile_device_monthly.times(setup.mobile_device_count),
    };

    let total = breakdown.total();
    let agent_responsible = if schedule.policy.mobile_fee_counts_against_agent {
        total
    } else {
        total - breakdown.mobile_devices
    };

    MonthlyFees {
        breakdown,
        total,
        agent_responsible,
    }
}

/// Projects gross profit, agent share and net figures for one pricing model.
///
/// Negative volume is treated as zero. Net figures under the absorbing policy
/// may be negative.
pub fn compute_profit(
    setup: &MerchantSetup,
    model: &PricingModelConfig,
    schedule: &FeeSchedule,
) -> PricingResult {
    let gross_profit = setup.monthly_volume.non_negative() * model.gross_profit_rate;
    let agent_share = gross_profit * schedule.agent_revshare;

    let monthly = compute_monthly_fees(setup, schedule);
    let net_monthly_passing = agent_share;
    let net_monthly_absorbing = agent_share - monthly.agent_responsible;

    let one_time_fees = one_time_fee_breakdown(setup, model, schedule);

    let mut result = PricingResult {
        model: model.model,
        gross_profit,
        agent_share,
        monthly_fees: monthly.breakdown,
        monthly_fee_total: monthly.total,
        monthly_fee_agent_responsible: monthly.agent_responsible,
        net_monthly_passing,
        net_monthly_absorbing,
        yearly_passing: net_monthly_passing.times(MONTHS_PER_YEAR),
        yearly_absorbing: net_monthly_absorbing.times(MONTHS_PER_YEAR),
        one_time_fee_total: one_time_fees.total(),
        one_time_fees,
        portfolio: None,
    };

    let merchant_count = setup.merchant_count.max(1);
    if merchant_count > 1 {
        result.portfolio = Some(result.scaled(merchant_count));
    }

    debug!(
        model = ?result.model,
        gross_profit = %result.gross_profit,
        net_monthly_absorbing = %result.net_monthly_absorbing,
        one_time_fee_total = %result.one_time_fee_total,
        merchant_count = merchant_count,
        "computed pricing result"
    );

    result
}

/// Evaluates merchant setups against an immutable calculator configuration.
///
/// `FeeEngine` holds no mutable state, so one instance can be shared freely
/// between callers.
#[derive(Debug, Clone, Default)]
pub struct FeeEngine {
    config: CalculatorConfig,
}

impl FeeEngine {
    /// Creates a new `FeeEngine` from an already validated configuration.
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Computes the result for a single pricing model.
    pub fn quote(&self, setup: &MerchantSetup, model: PricingModel) -> PricingResult {
        compute_profit(setup, self.config.model(model), &self.config.schedule)
    }

    /// Computes Dual Pricing and Flat Rate side by side.
    pub fn compare(&self, setup: &MerchantSetup) -> Comparison {
        Comparison {
            setup: setup.clone(),
            dual: self.quote(setup, PricingModel::Dual),
            flat: self.quote(setup, PricingModel::Flat),
        }
    }
}
