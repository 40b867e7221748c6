//! Plain-text reports for calculation results.

use std::fmt::Write;

use fincalc_core::calculations::CalculationOutput;
use fincalc_core::config::DisplaySettings;
use fincalc_core::format::{format_currency, format_number, format_optional, format_optional_currency, format_percent};

const RULE: &str = "═══════════════════════════════════════";

/// Label/value lines under a boxed title.
struct Report<'a> {
    out: String,
    display: &'a DisplaySettings,
}

impl<'a> Report<'a> {
    fn new(title: &str, label: &str, display: &'a DisplaySettings) -> Self {
        let mut out = String::new();
        let heading = if label.is_empty() {
            title.to_uppercase()
        } else {
            format!("{} - {}", title.to_uppercase(), label)
        };
        let _ = writeln!(out, "{}\n  {}\n{}", RULE, heading, RULE);
        Report { out, display }
    }

    fn section(&mut self, name: &str) -> &mut Self {
        let _ = writeln!(self.out, "\n{}:", name);
        self
    }

    fn line(&mut self, name: &str, value: impl AsRef<str>) -> &mut Self {
        let _ = writeln!(self.out, "  {:<28} {}", format!("{}:", name), value.as_ref());
        self
    }

    fn money(&mut self, name: &str, value: f64) -> &mut Self {
        let text = format_currency(value, self.display);
        self.line(name, text)
    }

    fn percent(&mut self, name: &str, value: f64) -> &mut Self {
        let text = format_percent(value, self.display);
        self.line(name, text)
    }

    fn verdict(&mut self, text: &str) -> &mut Self {
        let _ = writeln!(self.out, "\n{}\n  {}\n{}", RULE, text, RULE);
        self
    }

    fn finish(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[SHORT]"
    }
}

/// Render `output` as a text report titled with `label`.
pub fn render(output: &CalculationOutput, label: &str, display: &DisplaySettings) -> String {
    let d = display;
    match output {
        CalculationOutput::Loan(r) => {
            let mut report = Report::new("Loan", label, d);
            report
                .money("Monthly payment", r.monthly_payment)
                .money("Total paid", r.total_paid)
                .money("Total interest", r.total_interest)
                .percent("Interest share of payments", r.interest_share_percent());
            if let Some(extra) = &r.extra_payment {
                report
                    .section("With extra payments")
                    .line("Payoff", format!("{} months ({} sooner)", extra.payoff_months, extra.months_saved))
                    .money("Total interest", extra.total_interest)
                    .money("Interest saved", extra.interest_saved);
            }
            if !r.yearly_summary.is_empty() {
                report.section("By year");
                for year in &r.yearly_summary {
                    report.line(
                        &format!("Year {}", year.year),
                        format!(
                            "principal {}  interest {}  balance {}",
                            format_currency(year.principal_paid, d),
                            format_currency(year.interest_paid, d),
                            format_currency(year.ending_balance, d)
                        ),
                    );
                }
            }
            if !r.schedule.is_empty() {
                report.section("Schedule");
                for row in &r.schedule {
                    report.line(
                        &format!("Month {}", row.period),
                        format!(
                            "payment {}  principal {}  interest {}  balance {}",
                            format_currency(row.payment, d),
                            format_currency(row.principal, d),
                            format_currency(row.interest, d),
                            format_currency(row.balance, d)
                        ),
                    );
                }
            }
            report.finish()
        }
        CalculationOutput::Apr(r) => {
            let mut report = Report::new("APR", label, d);
            report
                .money("Monthly payment", r.monthly_payment)
                .money("Amount financed", r.amount_financed)
                .money("Finance charge", r.finance_charge)
                .percent("APR", r.apr_percent)
                .percent("Spread over note rate", r.apr_spread_percent)
                .percent("Effective annual rate", r.effective_annual_percent);
            if !r.converged {
                report.verdict(&format!("Solver stopped after {} iterations without converging", r.iterations));
            }
            report.finish()
        }
        CalculationOutput::Fire(r) => {
            let mut report = Report::new("FIRE", label, d);
            report
                .money("FIRE number", r.fire_number)
                .line("Years to FIRE", format_optional(r.years_to_fire, d))
                .line("FIRE age", format_optional(r.fire_age, d))
                .line("Reached within horizon", status_icon(r.reached))
                .money("Balance at FIRE", r.final_balance)
                .line("Savings rate", r.savings_rate_percent.map_or_else(|| d.placeholder.clone(), |p| format_percent(p, d)))
                .line("Coast FIRE number", format_optional_currency(r.coast_fire_number, d));
            if let Some(reached) = r.coast_fire_reached {
                report.line("Coast FIRE reached", status_icon(reached));
            }
            report.finish()
        }
        CalculationOutput::Retirement(r) => {
            let mut report = Report::new("Retirement", label, d);
            report
                .line("Years to retirement", r.years_to_retirement.to_string())
                .money("Projected balance", r.projected_balance)
                .money("In today's money", r.real_balance)
                .money("Total contributed", r.total_contributed)
                .money("Investment growth", r.investment_growth)
                .money("Sustainable income", r.sustainable_annual_income)
                .money("Desired income (inflated)", r.inflated_desired_income)
                .money("Required balance", r.required_balance)
                .money("Shortfall", r.shortfall)
                .money("Extra monthly needed", r.additional_monthly_needed)
                .verdict(&format!("ON TRACK: {}", status_icon(r.on_track)));
            report.finish()
        }
        CalculationOutput::SavingsGoal(r) => {
            let when = match r.years_and_months {
                Some((years, months)) => format!("{} years {} months", years, months),
                None => d.placeholder.clone(),
            };
            let mut report = Report::new("Savings goal", label, d);
            report
                .line("Months to goal", format_optional(r.months_to_goal, d))
                .line("Time to goal", when)
                .money("Final balance", r.final_balance)
                .money("Total contributed", r.total_contributed)
                .money("Interest earned", r.interest_earned)
                .line("Required monthly", format_optional_currency(r.required_monthly_contribution, d));
            report.finish()
        }
        CalculationOutput::Currency(r) => {
            let mut report = Report::new("Currency exchange", label, d);
            report
                .line("At mid-market", format_number(r.converted_at_mid, d.decimals))
                .line("You receive", format_number(r.converted_at_offered, d.decimals))
                .percent("Rate markup", r.markup_percent)
                .line("Spread cost", format_number(r.spread_cost, d.decimals))
                .line("Fee (target currency)", format_number(r.fee_in_target, d.decimals))
                .line("Total cost", format_number(r.total_cost, d.decimals))
                .percent("Total cost share", r.total_cost_percent)
                .line("Effective rate", format_number(r.effective_rate, 6));
            report.finish()
        }
        CalculationOutput::WireTransfer(r) => {
            let mut report = Report::new("Transfer comparison", label, d);
            report.line("At mid-market", format_number(r.converted_at_mid, d.decimals));
            report.section("Providers (cheapest first)");
            for provider in &r.ranked {
                report.line(
                    &provider.name,
                    format!(
                        "receives {}  cost {} ({})",
                        format_number(provider.amount_received, d.decimals),
                        format_number(provider.total_cost, d.decimals),
                        format_percent(provider.total_cost_percent, d)
                    ),
                );
            }
            report.verdict(&format!(
                "CHEAPEST: {} (saves {} vs most expensive)",
                r.cheapest,
                format_number(r.savings_vs_most_expensive, d.decimals)
            ));
            report.finish()
        }
        CalculationOutput::OilFutures(r) => {
            let mut report = Report::new("Oil futures", label, d);
            report
                .line("Barrels", format_number(r.barrels, 0))
                .money("Price change", r.price_change)
                .money("Gross P/L", r.gross_pnl)
                .money("Commissions", r.commissions)
                .money("Net P/L", r.net_pnl)
                .money("P/L per $1 move", r.pnl_per_dollar_move)
                .money("Notional value", r.notional_value)
                .line("Margin posted", format_optional_currency(r.total_margin, d))
                .line(
                    "Return on margin",
                    r.return_on_margin_percent.map_or_else(|| d.placeholder.clone(), |p| format_percent(p, d)),
                );
            report.section("Sensitivity");
            for row in &r.sensitivity {
                report.line(
                    &format!("{:+} $/bbl", row.price_move),
                    format!("at {}  net {}", format_currency(row.price, d), format_currency(row.net_pnl, d)),
                );
            }
            report.finish()
        }
        CalculationOutput::CrackSpread(r) => {
            let mut report = Report::new("Crack spread", label, d);
            report
                .line("Ratio", r.ratio.code())
                .money("Gasoline per barrel", r.gasoline_per_bbl)
                .money("Distillate per barrel", r.distillate_per_bbl)
                .money("Product value", r.product_value)
                .money("Crude cost", r.crude_cost)
                .money("Spread per barrel", r.spread_per_bbl)
                .percent("Margin", r.margin_percent);
            report.finish()
        }
        CalculationOutput::Margin(r) => {
            let mut report = Report::new("Margin", label, d);
            report
                .money("Gross profit", r.gross_profit)
                .percent("Margin", r.margin_percent)
                .line(
                    "Markup",
                    r.markup_percent.map_or_else(|| d.placeholder.clone(), |p| format_percent(p, d)),
                )
                .line("Price for target margin", format_optional_currency(r.price_for_target_margin, d));
            report.finish()
        }
        CalculationOutput::BreakEven(r) => {
            let mut report = Report::new("Break-even", label, d);
            report
                .money("Contribution margin", r.contribution_margin)
                .percent("Contribution ratio", r.contribution_margin_ratio_percent)
                .line("Break-even units", r.break_even_units.to_string())
                .money("Break-even revenue", r.break_even_revenue)
                .line("Units for target profit", r.units_for_target_profit.to_string());
            report.finish()
        }
        CalculationOutput::Dscr(r) => {
            let mut report = Report::new("DSCR", label, d);
            report
                .money("Monthly payment", r.monthly_payment)
                .money("Annual debt service", r.annual_debt_service)
                .line("DSCR", format_number(r.dscr, 2))
                .money("Cash flow after debt", r.cash_flow_after_debt)
                .money("Max loan at target", r.max_loan_amount)
                .verdict(&format!("RATING: {} ({})", r.rating, r.rating.description()));
            report.finish()
        }
        CalculationOutput::Tax(r) => {
            let mut report = Report::new("Income tax", label, d);
            report
                .money("Deductions", r.deductions)
                .money("Taxable income", r.taxable_income)
                .money("Tax", r.tax)
                .percent("Effective rate", r.effective_rate_percent)
                .percent("Marginal rate", r.marginal_rate_percent)
                .money("After-tax income", r.after_tax_income);
            report.section("Brackets");
            for row in &r.breakdown {
                let range = match row.upper_bound {
                    Some(upper) => format!("{} - {}", format_currency(row.lower_bound, d), format_currency(upper, d)),
                    None => format!("{} +", format_currency(row.lower_bound, d)),
                };
                report.line(
                    &range,
                    format!("{} on {}", format_currency(row.tax, d), format_currency(row.taxable_in_bracket, d)),
                );
            }
            report.finish()
        }
        CalculationOutput::Dividend(r) => {
            let mut report = Report::new("Dividend", label, d);
            report
                .money("Annual income", r.annual_income)
                .money("Per payment", r.income_per_payment)
                .percent("Yield", r.yield_percent)
                .money("Position value", r.position_value)
                .line("Ex-dividend date", format_optional(r.ex_dividend_date, d))
                .line("Last day to buy", format_optional(r.last_day_to_buy, d));
            report.finish()
        }
    }
}
