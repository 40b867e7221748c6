//! # Dividend Income and Ex-Dividend Date
//!
//! Annual and per-payment income from a dividend stock, its yield, and the
//! last day to buy the shares to receive the next payment.
//!
//! Date rules are a rule of thumb: weekends are skipped but exchange
//! holidays are not. Under T+1 settlement the ex-dividend date is the record
//! date itself; under T+2 it is one business day earlier. Shares must be
//! bought before the ex-dividend date.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fincalc_core::calculations::dividend::{calculate, DividendInput, SettlementCycle};
//!
//! let input = DividendInput {
//!     label: "KO".to_string(),
//!     shares: 100.0,
//!     annual_dividend_per_share: 1.94,
//!     share_price: 60.0,
//!     payments_per_year: 4,
//!     record_date: NaiveDate::from_ymd_opt(2024, 3, 18),
//!     settlement: SettlementCycle::T1,
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.annual_income - 194.0).abs() < 1e-9);
//! // Monday record date → buy by the previous Friday
//! assert_eq!(result.last_day_to_buy, NaiveDate::from_ymd_opt(2024, 3, 15));
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};

/// Trade settlement convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SettlementCycle {
    /// US equities since May 2024
    #[default]
    #[serde(rename = "T+1")]
    T1,
    #[serde(rename = "T+2")]
    T2,
}

impl fmt::Display for SettlementCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementCycle::T1 => write!(f, "T+1"),
            SettlementCycle::T2 => write!(f, "T+2"),
        }
    }
}

impl FromStr for SettlementCycle {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "T+1" | "T1" => Ok(SettlementCycle::T1),
            "T+2" | "T2" => Ok(SettlementCycle::T2),
            other => Err(CalcError::invalid_input("settlement", other, "Expected T+1 or T+2")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendInput {
    #[serde(default)]
    pub label: String,
    pub shares: f64,
    pub annual_dividend_per_share: f64,
    pub share_price: f64,
    /// 4 for quarterly, 12 for monthly
    pub payments_per_year: u32,
    /// Company's record date for the next payment
    #[serde(default)]
    pub record_date: Option<NaiveDate>,
    #[serde(default)]
    pub settlement: SettlementCycle,
}

impl DividendInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("shares", self.shares)?;
        require_non_negative("annual_dividend_per_share", self.annual_dividend_per_share)?;
        require_positive("share_price", self.share_price)?;
        if self.payments_per_year == 0 || self.payments_per_year > 365 {
            return Err(CalcError::invalid_input(
                "payments_per_year",
                self.payments_per_year.to_string(),
                "Payments per year must be between 1 and 365",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendResult {
    pub annual_income: f64,
    pub income_per_payment: f64,
    /// `annual dividend / share price`, in percent
    pub yield_percent: f64,
    pub position_value: f64,
    pub ex_dividend_date: Option<NaiveDate>,
    pub last_day_to_buy: Option<NaiveDate>,
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn day_before(date: NaiveDate) -> CalcResult<NaiveDate> {
    date.pred_opt()
        .ok_or_else(|| CalcError::calculation_failed("dividend", "Date is out of range"))
}

/// `date` itself when it is a business day, else the business day before it.
pub fn roll_back_to_business_day(date: NaiveDate) -> CalcResult<NaiveDate> {
    let mut current = date;
    while !is_business_day(current) {
        current = day_before(current)?;
    }
    Ok(current)
}

/// The business day strictly before `date`.
pub fn previous_business_day(date: NaiveDate) -> CalcResult<NaiveDate> {
    roll_back_to_business_day(day_before(date)?)
}

/// Ex-dividend date for a record date under `settlement`.
pub fn ex_dividend_date(record_date: NaiveDate, settlement: SettlementCycle) -> CalcResult<NaiveDate> {
    match settlement {
        SettlementCycle::T1 => roll_back_to_business_day(record_date),
        SettlementCycle::T2 => previous_business_day(record_date),
    }
}

pub fn calculate(input: &DividendInput) -> CalcResult<DividendResult> {
    input.validate()?;

    let annual_income = input.shares * input.annual_dividend_per_share;

    let (ex_dividend_date, last_day_to_buy) = match input.record_date {
        Some(record_date) => {
            let ex_date = ex_dividend_date(record_date, input.settlement)?;
            (Some(ex_date), Some(previous_business_day(ex_date)?))
        }
        None => (None, None),
    };

    tracing::debug!(label = %input.label, ?ex_dividend_date, "dividend calculated");

    Ok(DividendResult {
        annual_income,
        income_per_payment: annual_income / input.payments_per_year as f64,
        yield_percent: input.annual_dividend_per_share / input.share_price * 100.0,
        position_value: input.shares * input.share_price,
        ex_dividend_date,
        last_day_to_buy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn holding(record_date: Option<NaiveDate>, settlement: SettlementCycle) -> DividendInput {
        DividendInput {
            label: "Utility".to_string(),
            shares: 250.0,
            annual_dividend_per_share: 2.0,
            share_price: 50.0,
            payments_per_year: 4,
            record_date,
            settlement,
        }
    }

    #[test]
    fn test_income_and_yield() {
        let result = calculate(&holding(None, SettlementCycle::T1)).unwrap();
        assert!((result.annual_income - 500.0).abs() < 1e-12);
        assert!((result.income_per_payment - 125.0).abs() < 1e-12);
        assert!((result.yield_percent - 4.0).abs() < 1e-12);
        assert_eq!(result.ex_dividend_date, None);
        assert_eq!(result.last_day_to_buy, None);
    }

    #[test]
    fn test_t1_friday_record_date() {
        let result = calculate(&holding(Some(date(2024, 3, 15)), SettlementCycle::T1)).unwrap();
        assert_eq!(result.ex_dividend_date, Some(date(2024, 3, 15)));
        assert_eq!(result.last_day_to_buy, Some(date(2024, 3, 14)));
    }

    #[test]
    fn test_t2_monday_record_date_skips_weekend() {
        let result = calculate(&holding(Some(date(2024, 3, 18)), SettlementCycle::T2)).unwrap();
        assert_eq!(result.ex_dividend_date, Some(date(2024, 3, 15)));
        assert_eq!(result.last_day_to_buy, Some(date(2024, 3, 14)));
    }

    #[test]
    fn test_weekend_record_date_rolls_back() {
        // Saturday
        let ex = ex_dividend_date(date(2024, 3, 16), SettlementCycle::T1).unwrap();
        assert_eq!(ex, date(2024, 3, 15));
        assert_eq!(previous_business_day(date(2024, 3, 18)).unwrap(), date(2024, 3, 15));
    }

    #[test]
    fn test_settlement_parsing() {
        assert_eq!("t+2".parse::<SettlementCycle>().unwrap(), SettlementCycle::T2);
        assert_eq!("T1".parse::<SettlementCycle>().unwrap(), SettlementCycle::T1);
        assert!("T+3".parse::<SettlementCycle>().is_err());
    }

    #[test]
    fn test_settlement_serde_names() {
        let json = serde_json::to_string(&SettlementCycle::T2).unwrap();
        assert_eq!(json, "\"T+2\"");
    }

    #[test]
    fn test_rejects_zero_payments() {
        let mut input = holding(None, SettlementCycle::T1);
        input.payments_per_year = 0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.field(), Some("payments_per_year"));
    }
}
