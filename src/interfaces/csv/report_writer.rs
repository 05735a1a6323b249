use crate::domain::config::PricingModel;
use crate::domain::money::Money;
use crate::domain::result::{Comparison, PricingResult};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    merchant: &'a str,
    model: PricingModel,
    merchants: u32,
    gross_profit: Money,
    agent_share: Money,
    monthly_fee_total: Money,
    monthly_fee_agent_responsible: Money,
    net_monthly_passing: Money,
    net_monthly_absorbing: Money,
    yearly_passing: Money,
    yearly_absorbing: Money,
    one_time_fee_total: Money,
    portfolio_gross_profit: Money,
    portfolio_agent_share: Money,
    portfolio_monthly_fee_total: Money,
    portfolio_monthly_fee_agent_responsible: Money,
    portfolio_net_monthly_passing: Money,
    portfolio_net_monthly_absorbing: Money,
    portfolio_yearly_passing: Money,
    portfolio_yearly_absorbing: Money,
    portfolio_one_time_fee_total: Money,
}

impl<'a> ReportRow<'a> {
    fn new(merchant: &'a str, merchants: u32, result: &PricingResult) -> Self {
        let portfolio = result.scaled(merchants);
        Self {
            merchant,
            model: result.model,
            merchants,
            gross_profit: result.gross_profit,
            agent_share: result.agent_share,
            monthly_fee_total: result.monthly_fee_total,
            monthly_fee_agent_responsible: result.monthly_fee_agent_responsible,
            net_monthly_passing: result.net_monthly_passing,
            net_monthly_absorbing: result.net_monthly_absorbing,
            yearly_passing: result.yearly_passing,
            yearly_absorbing: result.yearly_absorbing,
            one_time_fee_total: result.one_time_fee_total,
            portfolio_gross_profit: portfolio.gross_profit,
            portfolio_agent_share: portfolio.agent_share,
            portfolio_monthly_fee_total: portfolio.monthly_fee_total,
            portfolio_monthly_fee_agent_responsible: portfolio.monthly_fee_agent_responsible,
            portfolio_net_monthly_passing: portfolio.net_monthly_passing,
            portfolio_net_monthly_absorbing: portfolio.net_monthly_absorbing,
            portfolio_yearly_passing: portfolio.yearly_passing,
            portfolio_yearly_absorbing: portfolio.yearly_absorbing,
            portfolio_one_time_fee_total: portfolio.one_time_fee_total,
        }
    }
}

/// Writes comparisons as CSV, one row per merchant per pricing model.
///
/// Money columns are written in cents precision without currency symbols.
/// Every per-merchant figure is followed by a `portfolio_` column scaled by
/// the merchant count.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_comparison(&mut self, merchant: &str, comparison: &Comparison) -> Result<()> {
        let merchants = comparison.setup.merchant_count.max(1);
        for result in comparison.results() {
            self.writer.serialize(ReportRow::new(merchant, merchants, result))?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
