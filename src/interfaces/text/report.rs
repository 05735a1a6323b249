use crate::domain::config::{CalculatorConfig, PricingModel};
use crate::domain::money::Money;
use crate::domain::result::{Comparison, PortfolioFigures, PricingResult};
use crate::domain::setup::MerchantSetup;
use rust_decimal::Decimal;
use std::io::{self, Write};

const DISCLAIMER: &str = "These are only estimates. BIN mix and method of processing \
(Card Not Present, Swipe, MOTO) can all change the exact profit for any merchant.";

/// Renders a Dual vs Flat comparison as a plain-text report.
///
/// Optional line items (terminals, mobile devices, hardware, stand) are only
/// listed when non-zero. A portfolio section follows when the
/// setup covers more than one merchant.
pub fn render_comparison<W: Write>(
    out: &mut W,
    comparison: &Comparison,
    config: &CalculatorConfig,
) -> io::Result<()> {
    render_setup(out, &comparison.setup)?;

    writeln!(out)?;
    writeln!(out, "Results (Single Merchant)")?;
    let revshare = percent(config.schedule.agent_revshare.value());
    for result in comparison.results() {
        writeln!(out)?;
        render_result(out, result, &comparison.setup, config, &revshare)?;
    }

    if let Some(first) = comparison.dual.portfolio.as_ref() {
        writeln!(out)?;
        writeln!(
            out,
            "Results (Portfolio, {} merchants)",
            first.merchant_count
        )?;
        for result in comparison.results() {
            if let Some(portfolio) = result.portfolio.as_ref() {
                writeln!(out)?;
                render_portfolio(out, &config.model(result.model).label, portfolio)?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{DISCLAIMER}")?;
    Ok(())
}

fn render_setup<W: Write>(out: &mut W, setup: &MerchantSetup) -> io::Result<()> {
    writeln!(out, "Merchant Setup")?;
    writeln!(out, "  Monthly processing volume: {}", setup.monthly_volume)?;
    let stand = if setup.includes_stand() { " (with stand)" } else { "" };
    writeln!(out, "  Terminal type: {}{}", setup.terminal_type, stand)?;
    writeln!(out, "  Number of terminals: {}", setup.terminal_count)?;
    writeln!(
        out,
        "  Number of mobile devices: {}",
        setup.mobile_device_count
    )?;
    if setup.merchant_count > 1 {
        writeln!(out, "  Number of merchants: {}", setup.merchant_count)?;
    }
    Ok(())
}

fn render_result<W: Write>(
    out: &mut W,
    result: &PricingResult,
    setup: &MerchantSetup,
    config: &CalculatorConfig,
    revshare: &str,
) -> io::Result<()> {
    let model = config.model(result.model);
    writeln!(out, "{}", model.label)?;
    writeln!(
        out,
        "  Gross profit (processor, monthly): {}",
        result.gross_profit
    )?;
    writeln!(
        out,
        "  Agent share ({revshare}, monthly): {}",
        result.agent_share
    )?;

    let monthly = &result.monthly_fees;
    writeln!(out, "  Monthly fees (total): {}", result.monthly_fee_total)?;
    writeln!(
        out,
        "    - Account on file (bank): {}",
        monthly.account_on_file
    )?;
    writeln!(out, "    - Gateway: {}", monthly.gateway)?;
    line_if_nonzero(out, "First terminal", monthly.first_terminal)?;
    line_if_nonzero(out, "Additional terminals", monthly.additional_terminals)?;
    line_if_nonzero(out, "Mobile devices", monthly.mobile_devices)?;
    if result.monthly_fee_agent_responsible != result.monthly_fee_total {
        writeln!(
            out,
            "    (agent-responsible when absorbing: {})",
            result.monthly_fee_agent_responsible
        )?;
    }

    writeln!(
        out,
        "  Net to agent (passing monthly fees): {}",
        result.net_monthly_passing
    )?;
    writeln!(
        out,
        "  Net to agent (absorbing monthly fees): {}",
        result.net_monthly_absorbing
    )?;
    writeln!(
        out,
        "  Yearly net (passing monthly fees): {}",
        result.yearly_passing
    )?;
    writeln!(
        out,
        "  Yearly net (absorbing monthly fees): {}",
        result.yearly_absorbing
    )?;

    let one_time = &result.one_time_fees;
    writeln!(out, "  One-time setup fees: {}", result.one_time_fee_total)?;
    if !one_time.hardware.is_zero() {
        writeln!(
            out,
            "    - Terminal hardware ({}): {}",
            setup.terminal_type, one_time.hardware
        )?;
    }
    line_if_nonzero(out, "Terminal stand", one_time.stand)?;
    if !one_time.mobile_app_download.is_zero() {
        writeln!(
            out,
            "    - Mobile app download ({} device(s)): {}",
            setup.mobile_device_count, one_time.mobile_app_download
        )?;
    }

    let compliance_label = format!("{} compliance fee", PricingModel::Dual);
    if !one_time.compliance.is_zero() {
        writeln!(out, "    - {compliance_label}: {}", one_time.compliance)?;
    } else if model.charges_compliance_fee {
        writeln!(
            out,
            "    - {compliance_label}: {} (not selected)",
            Money::ZERO
        )?;
    } else {
        writeln!(
            out,
            "    - {compliance_label}: {} (not charged on {})",
            Money::ZERO,
            result.model.to_string().to_lowercase()
        )?;
    }
    Ok(())
}

fn render_portfolio<W: Write>(
    out: &mut W,
    label: &str,
    portfolio: &PortfolioFigures,
) -> io::Result<()> {
    writeln!(out, "{label}")?;
    writeln!(out, "  Gross profit (monthly): {}", portfolio.gross_profit)?;
    writeln!(out, "  Agent share (monthly): {}", portfolio.agent_share)?;
    writeln!(
        out,
        "  Monthly fees (total): {}",
        portfolio.monthly_fee_total
    )?;
    writeln!(
        out,
        "  Net to agent (passing monthly fees): {}",
        portfolio.net_monthly_passing
    )?;
    writeln!(
        out,
        "  Net to agent (absorbing monthly fees): {}",
        portfolio.net_monthly_absorbing
    )?;
    writeln!(
        out,
        "  Yearly net (passing monthly fees): {}",
        portfolio.yearly_passing
    )?;
    writeln!(
        out,
        "  Yearly net (absorbing monthly fees): {}",
        portfolio.yearly_absorbing
    )?;
    writeln!(
        out,
        "  One-time setup fees: {}",
        portfolio.one_time_fee_total
    )?;
    Ok(())
}

fn line_if_nonzero<W: Write>(out: &mut W, label: &str, amount: Money) -> io::Result<()> {
    if amount.is_zero() {
        return Ok(());
    }
    writeln!(out, "    - {label}: {amount}")
}

fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
