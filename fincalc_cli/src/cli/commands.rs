// ============================================================
// Subcommands and their flags
// ============================================================
// One subcommand per calculator. Each *Args struct converts into
// the matching fincalc_core input record; the core never sees clap
// types. `eval` reads a tagged JSON CalculationItem instead.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use fincalc_core::calculations::dividend::{DividendInput, SettlementCycle};
use fincalc_core::calculations::fire::{FireInput, DEFAULT_WITHDRAWAL_RATE_PERCENT};
use fincalc_core::calculations::oil::{CrackRatio, CrackSpreadInput, OilFuturesInput, Position, STANDARD_CONTRACT_BBL};
use fincalc_core::calculations::tax::{TaxBracket, TaxInput};
use fincalc_core::calculations::wire_transfer::{ProviderQuote, WireTransferInput};
use fincalc_core::calculations::{
    AprInput, BreakEvenInput, CalculationItem, CurrencyInput, DscrInput, LoanInput, MarginInput, RetirementInput,
    SavingsGoalInput,
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Monthly payment, total interest and schedule for a fixed-rate loan
    Loan(LoanArgs),

    /// APR of a loan once up-front fees are counted
    Apr(AprArgs),

    /// FIRE number and years to financial independence
    Fire(FireArgs),

    /// Retirement savings projection and shortfall
    Retirement(RetirementArgs),

    /// Months needed to reach a savings goal
    Savings(SavingsArgs),

    /// Real cost of a currency exchange (markup plus fee)
    Currency(CurrencyArgs),

    /// Compare international transfer providers
    Wire(WireArgs),

    /// Crude oil futures profit and loss
    Oil(OilArgs),

    /// Refinery crack spread
    Crack(CrackArgs),

    /// Profit margin and markup
    Margin(MarginArgs),

    /// Units needed to cover fixed costs
    BreakEven(BreakEvenArgs),

    /// Debt service coverage ratio
    Dscr(DscrArgs),

    /// Progressive income-tax estimate
    Tax(TaxArgs),

    /// Dividend income and ex-dividend date
    Dividend(DividendArgs),

    /// Evaluate a JSON calculation document (`-` reads stdin)
    Eval(EvalArgs),
}

impl Commands {
    /// The calculation this subcommand describes; `None` for `eval`.
    pub fn into_item(self) -> Option<CalculationItem> {
        let item = match self {
            Commands::Loan(args) => CalculationItem::Loan(args.into()),
            Commands::Apr(args) => CalculationItem::Apr(args.into()),
            Commands::Fire(args) => CalculationItem::Fire(args.into()),
            Commands::Retirement(args) => CalculationItem::Retirement(args.into()),
            Commands::Savings(args) => CalculationItem::SavingsGoal(args.into()),
            Commands::Currency(args) => CalculationItem::Currency(args.into()),
            Commands::Wire(args) => CalculationItem::WireTransfer(args.into()),
            Commands::Oil(args) => CalculationItem::OilFutures(args.into()),
            Commands::Crack(args) => CalculationItem::CrackSpread(args.into()),
            Commands::Margin(args) => CalculationItem::Margin(args.into()),
            Commands::BreakEven(args) => CalculationItem::BreakEven(args.into()),
            Commands::Dscr(args) => CalculationItem::Dscr(args.into()),
            Commands::Tax(args) => CalculationItem::Tax(args.into()),
            Commands::Dividend(args) => CalculationItem::Dividend(args.into()),
            Commands::Eval(_) => return None,
        };
        Some(item)
    }
}

// ------------------------------------------------------------
// Loans
// ------------------------------------------------------------

#[derive(Args, Debug)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: f64,

    /// Annual rate in percent
    #[arg(long)]
    pub apr: f64,

    /// Term in years
    #[arg(long, conflicts_with = "months", required_unless_present = "months")]
    pub years: Option<u32>,

    /// Term in months
    #[arg(long)]
    pub months: Option<u32>,

    /// Extra principal paid each month
    #[arg(long, default_value_t = 0.0)]
    pub extra: f64,

    /// Print the month-by-month schedule
    #[arg(long)]
    pub schedule: bool,

    #[arg(long, default_value = "")]
    pub label: String,
}

/// `--months` wins; `--years` is converted. Zero falls through to validation.
fn term_months(years: Option<u32>, months: Option<u32>) -> u32 {
    months.or_else(|| years.map(|y| y.saturating_mul(12))).unwrap_or(0)
}

impl From<LoanArgs> for LoanInput {
    fn from(a: LoanArgs) -> Self {
        LoanInput {
            label: a.label,
            principal: a.principal,
            apr_percent: a.apr,
            term_months: term_months(a.years, a.months),
            extra_monthly_payment: a.extra,
            include_schedule: a.schedule,
        }
    }
}

#[derive(Args, Debug)]
pub struct AprArgs {
    #[arg(long)]
    pub amount: f64,

    /// Note rate in percent
    #[arg(long)]
    pub rate: f64,

    #[arg(long, conflicts_with = "months", required_unless_present = "months")]
    pub years: Option<u32>,

    #[arg(long)]
    pub months: Option<u32>,

    /// Up-front fees and points
    #[arg(long, default_value_t = 0.0)]
    pub fees: f64,

    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<AprArgs> for AprInput {
    fn from(a: AprArgs) -> Self {
        AprInput {
            label: a.label,
            loan_amount: a.amount,
            note_rate_percent: a.rate,
            term_months: term_months(a.years, a.months),
            fees: a.fees,
        }
    }
}

#[derive(Args, Debug)]
pub struct DscrArgs {
    /// Annual net operating income
    #[arg(long)]
    pub noi: f64,

    #[arg(long)]
    pub loan: f64,

    #[arg(long)]
    pub apr: f64,

    #[arg(long, conflicts_with = "months", required_unless_present = "months")]
    pub years: Option<u32>,

    #[arg(long)]
    pub months: Option<u32>,

    /// Lender's minimum DSCR
    #[arg(long, default_value_t = 1.25)]
    pub target: f64,

    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<DscrArgs> for DscrInput {
    fn from(a: DscrArgs) -> Self {
        DscrInput {
            label: a.label,
            net_operating_income: a.noi,
            loan_amount: a.loan,
            apr_percent: a.apr,
            term_months: term_months(a.years, a.months),
            target_dscr: a.target,
        }
    }
}

// ------------------------------------------------------------
// Savings and retirement
// ------------------------------------------------------------

#[derive(Args, Debug)]
pub struct FireArgs {
    #[arg(long)]
    pub expenses: f64,

    #[arg(long, default_value_t = 0.0)]
    pub savings: f64,

    /// Amount invested per year
    #[arg(long, default_value_t = 0.0)]
    pub contribution: f64,

    /// Expected annual return in percent
    #[arg(long = "return", default_value_t = 7.0)]
    pub return_percent: f64,

    /// Safe withdrawal rate in percent
    #[arg(long, default_value_t = DEFAULT_WITHDRAWAL_RATE_PERCENT)]
    pub withdrawal_rate: f64,

    #[arg(long)]
    pub age: Option<u32>,

    /// Annual take-home income, for the savings rate
    #[arg(long)]
    pub income: Option<f64>,

    /// Age for the coast-FIRE check
    #[arg(long)]
    pub retire_at: Option<u32>,

    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<FireArgs> for FireInput {
    fn from(a: FireArgs) -> Self {
        FireInput {
            label: a.label,
            annual_expenses: a.expenses,
            withdrawal_rate_percent: a.withdrawal_rate,
            current_savings: a.savings,
            annual_contribution: a.contribution,
            expected_return_percent: a.return_percent,
            current_age: a.age,
            annual_income: a.income,
            target_retirement_age: a.retire_at,
        }
    }
}

#[derive(Args, Debug)]
pub struct RetirementArgs {
    #[arg(long)]
    pub age: u32,

    #[arg(long)]
    pub retire_at: u32,

    #[arg(long, default_value_t = 0.0)]
    pub savings: f64,

    #[arg(long, default_value_t = 0.0)]
    pub monthly: f64,

    #[arg(long = "return", default_value_t = 7.0)]
    pub return_percent: f64,

    #[arg(long, default_value_t = 3.0)]
    pub inflation: f64,

    /// Desired income in today's money
    #[arg(long, default_value_t = 0.0)]
    pub income: f64,

    #[arg(long, default_value_t = DEFAULT_WITHDRAWAL_RATE_PERCENT)]
    pub withdrawal_rate: f64,

    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<RetirementArgs> for RetirementInput {
    fn from(a: RetirementArgs) -> Self {
        RetirementInput {
            label: a.label,
            current_age: a.age,
            retirement_age: a.retire_at,
            current_savings: a.savings,
            monthly_contribution: a.monthly,
            annual_return_percent: a.return_percent,
            inflation_percent: a.inflation,
            desired_annual_income: a.income,
            withdrawal_rate_percent: a.withdrawal_rate,
        }
    }
}

#[derive(Args, Debug)]
pub struct SavingsArgs {
    #[arg(long)]
    pub goal: f64,

    #[arg(long, default_value_t = 0.0)]
    pub savings: f64,

    #[arg(long, default_value_t = 0.0)]
    pub monthly: f64,

    #[arg(long = "return", default_value_t = 0.0)]
    pub return_percent: f64,

    /// Months available, to compute the required contribution
    #[arg(long)]
    pub deadline: Option<u32>,

    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<SavingsArgs> for SavingsGoalInput {
    fn from(a: SavingsArgs) -> Self {
        SavingsGoalInput {
            label: a.label,
            goal: a.goal,
            current_savings: a.savings,
            monthly_contribution: a.monthly,
            annual_return_percent: a.return_percent,
            deadline_months: a.deadline,
        }
    }
}

// ------------------------------------------------------------
// Currency
// ------------------------------------------------------------

#[derive(Args, Debug)]
pub struct CurrencyArgs {
    #[arg(long)]
    pub amount: f64,

    /// Mid-market rate (target per source unit)
    #[arg(long)]
    pub mid: f64,

    /// Rate offered by the provider
    #[arg(long)]
    pub offered: f64,

    #[arg(long, default_value_t = 0.0)]
    pub fee: f64,

    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<CurrencyArgs> for CurrencyInput {
    fn from(a: CurrencyArgs) -> Self {
        CurrencyInput {
            label: a.label,
            amount: a.amount,
            mid_market_rate: a.mid,
            offered_rate: a.offered,
            fee: a.fee,
        }
    }
}

#[derive(Args, Debug)]
pub struct WireArgs {
    #[arg(long)]
    pub amount: f64,

    #[arg(long)]
    pub mid: f64,

    /// Provider quote as NAME:FIXED_FEE:PERCENT_FEE:FX_MARKUP (repeatable)
    #[arg(long = "provider", value_parser = parse_provider)]
    pub providers: Vec<ProviderQuote>,

    #[arg(long, default_value = "")]
    pub label: String,
}

fn parse_provider(s: &str) -> Result<ProviderQuote, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let &[name, fixed, percent, markup] = parts.as_slice() else {
        return Err(format!("expected NAME:FIXED:PERCENT:MARKUP, got '{}'", s));
    };
    let number = |field: &str, value: &str| -> Result<f64, String> {
        value
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("{} '{}': {}", field, value, e))
    };
    Ok(ProviderQuote::new(
        name.trim(),
        number("fixed fee", fixed)?,
        number("percent fee", percent)?,
        number("fx markup", markup)?,
    ))
}

impl From<WireArgs> for WireTransferInput {
    fn from(a: WireArgs) -> Self {
        WireTransferInput {
            label: a.label,
            amount: a.amount,
            mid_market_rate: a.mid,
            providers: a.providers,
        }
    }
}

// ------------------------------------------------------------
// Oil
// ------------------------------------------------------------

#[derive(Args, Debug)]
pub struct OilArgs {
    #[arg(long, default_value_t = 1)]
    pub contracts: u32,

    /// Entry price per barrel
    #[arg(long)]
    pub entry: f64,

    /// Exit price per barrel
    #[arg(long)]
    pub exit: f64,

    /// Short position instead of long
    #[arg(long)]
    pub short: bool,

    #[arg(long, default_value_t = STANDARD_CONTRACT_BBL)]
    pub contract_size: f64,

    #[arg(long, default_value_t = 0.0)]
    pub commission: f64,

    /// Initial margin per contract
    #[arg(long)]
    pub margin: Option<f64>,

    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<OilArgs> for OilFuturesInput {
    fn from(a: OilArgs) -> Self {
        OilFuturesInput {
            label: a.label,
            contracts: a.contracts,
            entry_price: a.entry,
            exit_price: a.exit,
            position: if a.short { Position::Short } else { Position::Long },
            contract_size_bbl: a.contract_size,
            commission_per_contract: a.commission,
            initial_margin_per_contract: a.margin,
        }
    }
}

#[derive(Args, Debug)]
pub struct CrackArgs {
    /// Crude price per barrel
    #[arg(long)]
    pub crude: f64,

    /// Gasoline price per gallon
    #[arg(long)]
    pub gasoline: f64,

    /// Heating oil / diesel price per gallon
    #[arg(long)]
    pub distillate: f64,

    /// 3-2-1, 5-3-2 or 2-1-1
    #[arg(long, default_value = "3-2-1")]
    pub ratio: CrackRatio,

    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<CrackArgs> for CrackSpreadInput {
    fn from(a: CrackArgs) -> Self {
        CrackSpreadInput {
            label: a.label,
            crude_price: a.crude,
            gasoline_price: a.gasoline,
            distillate_price: a.distillate,
            ratio: a.ratio,
        }
    }
}

// ------------------------------------------------------------
// Business
// ------------------------------------------------------------

#[derive(Args, Debug)]
pub struct MarginArgs {
    #[arg(long)]
    pub cost: f64,

    #[arg(long)]
    pub revenue: f64,

    /// Suggest a price for this margin (percent)
    #[arg(long)]
    pub target: Option<f64>,

    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<MarginArgs> for MarginInput {
    fn from(a: MarginArgs) -> Self {
        MarginInput {
            label: a.label,
            cost: a.cost,
            revenue: a.revenue,
            target_margin_percent: a.target,
        }
    }
}

#[derive(Args, Debug)]
pub struct BreakEvenArgs {
    #[arg(long)]
    pub fixed: f64,

    #[arg(long)]
    pub price: f64,

    #[arg(long)]
    pub variable: f64,

    #[arg(long, default_value_t = 0.0)]
    pub target_profit: f64,

    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<BreakEvenArgs> for BreakEvenInput {
    fn from(a: BreakEvenArgs) -> Self {
        BreakEvenInput {
            label: a.label,
            fixed_costs: a.fixed,
            price_per_unit: a.price,
            variable_cost_per_unit: a.variable,
            target_profit: a.target_profit,
        }
    }
}

// ------------------------------------------------------------
// Tax and dividends
// ------------------------------------------------------------

#[derive(Args, Debug)]
pub struct TaxArgs {
    /// Gross annual income
    #[arg(long)]
    pub income: f64,

    /// Total deductions (standard deduction when omitted)
    #[arg(long)]
    pub deductions: Option<f64>,

    /// Bracket as LOWER_BOUND:RATE_PERCENT (repeatable, ascending)
    #[arg(long = "bracket", value_parser = parse_bracket)]
    pub brackets: Vec<TaxBracket>,

    #[arg(long, default_value = "")]
    pub label: String,
}

fn parse_bracket(s: &str) -> Result<TaxBracket, String> {
    let (lower, rate) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LOWER:RATE, got '{}'", s))?;
    let lower = lower.trim().parse::<f64>().map_err(|e| format!("lower bound '{}': {}", lower, e))?;
    let rate = rate.trim().parse::<f64>().map_err(|e| format!("rate '{}': {}", rate, e))?;
    Ok(TaxBracket::new(lower, rate))
}

impl From<TaxArgs> for TaxInput {
    fn from(a: TaxArgs) -> Self {
        TaxInput {
            label: a.label,
            gross_income: a.income,
            deductions: a.deductions,
            brackets: a.brackets,
        }
    }
}

#[derive(Args, Debug)]
pub struct DividendArgs {
    #[arg(long)]
    pub shares: f64,

    /// Annual dividend per share
    #[arg(long)]
    pub dividend: f64,

    #[arg(long)]
    pub price: f64,

    #[arg(long, default_value_t = 4)]
    pub payments: u32,

    /// Record date (YYYY-MM-DD)
    #[arg(long)]
    pub record_date: Option<NaiveDate>,

    /// T+1 or T+2
    #[arg(long, default_value = "T+1")]
    pub settlement: SettlementCycle,

    #[arg(long, default_value = "")]
    pub label: String,
}

impl From<DividendArgs> for DividendInput {
    fn from(a: DividendArgs) -> Self {
        DividendInput {
            label: a.label,
            shares: a.shares,
            annual_dividend_per_share: a.dividend,
            share_price: a.price,
            payments_per_year: a.payments,
            record_date: a.record_date,
            settlement: a.settlement,
        }
    }
}

// ------------------------------------------------------------
// Eval
// ------------------------------------------------------------

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// JSON file holding a tagged calculation, or `-` for stdin
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_months() {
        assert_eq!(term_months(Some(30), None), 360);
        assert_eq!(term_months(None, Some(84)), 84);
        assert_eq!(term_months(None, None), 0);
    }

    #[test]
    fn test_parse_provider() {
        let quote = parse_provider("Bank:45:0:3").unwrap();
        assert_eq!(quote.name, "Bank");
        assert_eq!(quote.fixed_fee, 45.0);
        assert_eq!(quote.fx_markup_percent, 3.0);
        assert!(parse_provider("Bank:45").is_err());
        assert!(parse_provider("Bank:x:0:3").is_err());
    }

    #[test]
    fn test_parse_bracket() {
        assert_eq!(parse_bracket("11600:12").unwrap(), TaxBracket::new(11_600.0, 12.0));
        assert!(parse_bracket("12").is_err());
    }
}
