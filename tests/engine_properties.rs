//! Property-based tests for the fee and profit engine.
//!
//! These tests use proptest to check that the pricing invariants hold across
//! randomly generated merchant setups.

use feecalc::application::engine::{compute_monthly_fees, compute_one_time_fee, compute_profit};
use feecalc::domain::config::{FeeSchedule, PricingModelConfig};
use feecalc::domain::money::Money;
use feecalc::domain::setup::{MerchantSetup, TerminalType};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Monthly volume in whole cents, up to $10M.
fn volume_strategy() -> impl Strategy<Value = Money> {
    (0i64..=1_000_000_000i64).prop_map(|cents| Money::new(Decimal::new(cents, 2)))
}

fn terminal_strategy() -> impl Strategy<Value = TerminalType> {
    prop_oneof![
        Just(TerminalType::None),
        Just(TerminalType::TerminalA),
        Just(TerminalType::TerminalB),
        Just(TerminalType::TerminalC),
    ]
}

fn model_strategy() -> impl Strategy<Value = PricingModelConfig> {
    prop_oneof![
        Just(PricingModelConfig::dual()),
        Just(PricingModelConfig::flat()),
    ]
}

fn setup_strategy() -> impl Strategy<Value = MerchantSetup> {
    (
        volume_strategy(),
        terminal_strategy(),
        any::<bool>(),
        0u32..=50,
        0u32..=20,
        1u32..=500,
    )
        .prop_map(|(volume, terminal, stand, terminals, mobile, merchants)| {
            MerchantSetup::new(volume)
                .with_terminal(terminal, stand)
                .with_terminal_count(terminals)
                .with_mobile_devices(mobile)
                .with_merchant_count(merchants)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Doubling the volume doubles the gross profit.
    #[test]
    fn gross_profit_is_linear_in_volume(setup in setup_strategy(), model in model_strategy()) {
        let schedule = FeeSchedule::default();
        let mut doubled = setup.clone();
        doubled.monthly_volume = setup.monthly_volume + setup.monthly_volume;

        let single = compute_profit(&setup, &model, &schedule);
        let double = compute_profit(&doubled, &model, &schedule);

        prop_assert_eq!(double.gross_profit, single.gross_profit + single.gross_profit);
        prop_assert_eq!(
            single.gross_profit.value(),
            setup.monthly_volume.value() * model.gross_profit_rate.value()
        );
    }

    /// Agent share is exactly the revenue share of gross profit.
    #[test]
    fn agent_share_is_revshare_of_gross(setup in setup_strategy(), model in model_strategy()) {
        let schedule = FeeSchedule::default();
        let result = compute_profit(&setup, &model, &schedule);

        prop_assert_eq!(
            result.agent_share.value(),
            result.gross_profit.value() * schedule.agent_revshare.value()
        );
        prop_assert_eq!(result.net_monthly_passing, result.agent_share);
        prop_assert_eq!(
            result.net_monthly_absorbing,
            result.agent_share - result.monthly_fee_agent_responsible
        );
    }

    /// Identical input always yields identical output.
    #[test]
    fn compute_profit_is_idempotent(setup in setup_strategy(), model in model_strategy()) {
        let schedule = FeeSchedule::default();
        prop_assert_eq!(
            compute_profit(&setup, &model, &schedule),
            compute_profit(&setup, &model, &schedule)
        );
    }

    /// One more terminal costs exactly one additional-terminal fee.
    #[test]
    fn extra_terminal_adds_one_fee(setup in setup_strategy(), model in model_strategy()) {
        prop_assume!(setup.terminal_count >= 1);
        let schedule = FeeSchedule::default();
        let more = setup.clone().with_terminal_count(setup.terminal_count + 1);

        let before = compute_profit(&setup, &model, &schedule);
        let after = compute_profit(&more, &model, &schedule);

        prop_assert_eq!(
            after.monthly_fee_total - before.monthly_fee_total,
            schedule.monthly.additional_terminal
        );
        prop_assert!(
            before.net_monthly_absorbing - after.net_monthly_absorbing
                <= schedule.monthly.additional_terminal
        );
    }

    /// Flat never charges the compliance fee; Dual always does.
    #[test]
    fn compliance_fee_follows_model(setup in setup_strategy()) {
        let schedule = FeeSchedule::default();
        let dual = compute_one_time_fee(&setup, &PricingModelConfig::dual(), &schedule);
        let flat = compute_one_time_fee(&setup, &PricingModelConfig::flat(), &schedule);

        prop_assert_eq!(dual - flat, schedule.one_time.compliance_fee);
        prop_assert!(!flat.is_negative());
    }

    /// Portfolio figures are exactly N times the per-merchant figures.
    #[test]
    fn portfolio_scales_linearly(setup in setup_strategy(), model in model_strategy()) {
        let schedule = FeeSchedule::default();
        let result = compute_profit(&setup, &model, &schedule);
        let n = setup.merchant_count;
        let scaled = result.scaled(n);

        prop_assert_eq!(scaled.gross_profit, result.gross_profit.times(n));
        prop_assert_eq!(scaled.agent_share, result.agent_share.times(n));
        prop_assert_eq!(scaled.monthly_fee_total, result.monthly_fee_total.times(n));
        prop_assert_eq!(scaled.net_monthly_passing, result.net_monthly_passing.times(n));
        prop_assert_eq!(scaled.net_monthly_absorbing, result.net_monthly_absorbing.times(n));
        prop_assert_eq!(scaled.yearly_passing, result.yearly_passing.times(n));
        prop_assert_eq!(scaled.yearly_absorbing, result.yearly_absorbing.times(n));
        prop_assert_eq!(scaled.one_time_fee_total, result.one_time_fee_total.times(n));

        if n > 1 {
            prop_assert_eq!(result.portfolio, Some(scaled));
        } else {
            prop_assert_eq!(result.portfolio, None);
        }
    }

    /// Mobile fees vanish entirely without mobile devices.
    #[test]
    fn no_mobile_devices_means_no_mobile_fees(setup in setup_strategy(), model in model_strategy()) {
        let schedule = FeeSchedule::default();
        let setup = setup.with_mobile_devices(0);

        let monthly = compute_monthly_fees(&setup, &schedule);
        let result = compute_profit(&setup, &model, &schedule);

        prop_assert_eq!(monthly.breakdown.mobile_devices, Money::ZERO);
        prop_assert_eq!(result.one_time_fees.mobile_app_download, Money::ZERO);
    }
}
