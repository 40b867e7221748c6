//! # Crude Oil Futures
//!
//! Profit and loss on a crude futures position, its sensitivity to price
//! moves, and the crack spread as a rough refining-margin proxy.
//!
//! ## Contract Conventions
//!
//! - Standard crude contract: 1,000 barrels, priced in $/bbl
//! - Mini contract: 500 barrels
//! - Refined products (gasoline, distillate) are priced in $/gal; one barrel
//!   is 42 gallons

use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, require_non_negative, require_positive, CalcError, CalcResult};

/// Barrels per standard crude contract
pub const STANDARD_CONTRACT_BBL: f64 = 1_000.0;

/// Gallons per barrel
pub const GALLONS_PER_BARREL: f64 = 42.0;

/// Price moves (in $/bbl) shown in the sensitivity table
pub const SENSITIVITY_MOVES: [f64; 6] = [-10.0, -5.0, -1.0, 1.0, 5.0, 10.0];

fn default_contract_size() -> f64 {
    STANDARD_CONTRACT_BBL
}

/// Direction of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Position {
    /// Profits when prices rise
    #[default]
    Long,
    /// Profits when prices fall
    Short,
}

impl Position {
    /// +1 for long, −1 for short
    pub fn sign(self) -> f64 {
        match self {
            Position::Long => 1.0,
            Position::Short => -1.0,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Long => write!(f, "Long"),
            Position::Short => write!(f, "Short"),
        }
    }
}

// ============================================================================
// Futures P/L
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OilFuturesInput {
    #[serde(default)]
    pub label: String,
    pub contracts: u32,
    /// $/bbl
    pub entry_price: f64,
    /// $/bbl
    pub exit_price: f64,
    #[serde(default)]
    pub position: Position,
    #[serde(default = "default_contract_size")]
    pub contract_size_bbl: f64,
    /// Round-trip commission per contract
    #[serde(default)]
    pub commission_per_contract: f64,
    /// Initial margin posted per contract
    #[serde(default)]
    pub initial_margin_per_contract: Option<f64>,
}

impl OilFuturesInput {
    pub fn validate(&self) -> CalcResult<()> {
        if self.contracts == 0 {
            return Err(CalcError::invalid_input("contracts", "0", "At least one contract is required"));
        }
        // Prices may go negative (WTI, April 2020)
        require_finite("entry_price", self.entry_price)?;
        require_finite("exit_price", self.exit_price)?;
        require_positive("contract_size_bbl", self.contract_size_bbl)?;
        require_non_negative("commission_per_contract", self.commission_per_contract)?;
        if let Some(margin) = self.initial_margin_per_contract {
            require_positive("initial_margin_per_contract", margin)?;
        }
        Ok(())
    }

    /// Barrels controlled by the whole position
    pub fn barrels(&self) -> f64 {
        f64::from(self.contracts) * self.contract_size_bbl
    }
}

/// P/L for a hypothetical move from the entry price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRow {
    /// $/bbl move from entry
    pub price_move: f64,
    pub price: f64,
    /// Net of commissions
    pub net_pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OilFuturesResult {
    pub barrels: f64,
    /// `exit − entry`
    pub price_change: f64,
    pub gross_pnl: f64,
    pub commissions: f64,
    pub net_pnl: f64,
    /// P/L per $1/bbl move in the position's favour
    pub pnl_per_dollar_move: f64,
    /// Notional value at entry
    pub notional_value: f64,
    pub total_margin: Option<f64>,
    pub return_on_margin_percent: Option<f64>,
    pub sensitivity: Vec<SensitivityRow>,
}

pub fn calculate_futures(input: &OilFuturesInput) -> CalcResult<OilFuturesResult> {
    input.validate()?;

    let barrels = input.barrels();
    let sign = input.position.sign();
    let commissions = input.commission_per_contract * f64::from(input.contracts);
    let pnl_for_move = |price_move: f64| sign * price_move * barrels;

    let price_change = input.exit_price - input.entry_price;
    let gross_pnl = pnl_for_move(price_change);
    let net_pnl = gross_pnl - commissions;

    let total_margin = input
        .initial_margin_per_contract
        .map(|m| m * f64::from(input.contracts));
    let return_on_margin_percent = total_margin.map(|margin| net_pnl / margin * 100.0);

    let sensitivity = SENSITIVITY_MOVES
        .iter()
        .map(|&price_move| SensitivityRow {
            price_move,
            price: input.entry_price + price_move,
            net_pnl: pnl_for_move(price_move) - commissions,
        })
        .collect();

    tracing::debug!(label = %input.label, position = %input.position, net_pnl, "oil futures P/L");

    Ok(OilFuturesResult {
        barrels,
        price_change,
        gross_pnl,
        commissions,
        net_pnl,
        pnl_per_dollar_move: barrels,
        notional_value: barrels * input.entry_price,
        total_margin,
        return_on_margin_percent,
        sensitivity,
    })
}

// ============================================================================
// Crack spread
// ============================================================================

/// Crude : gasoline : distillate barrel ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrackRatio {
    /// 3 crude → 2 gasoline + 1 distillate
    #[default]
    #[serde(rename = "3-2-1")]
    ThreeTwoOne,
    /// 5 crude → 3 gasoline + 2 distillate
    #[serde(rename = "5-3-2")]
    FiveThreeTwo,
    /// 2 crude → 1 gasoline + 1 distillate
    #[serde(rename = "2-1-1")]
    TwoOneOne,
}

impl CrackRatio {
    /// `(crude, gasoline, distillate)` barrels
    pub fn barrels(self) -> (f64, f64, f64) {
        match self {
            CrackRatio::ThreeTwoOne => (3.0, 2.0, 1.0),
            CrackRatio::FiveThreeTwo => (5.0, 3.0, 2.0),
            CrackRatio::TwoOneOne => (2.0, 1.0, 1.0),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            CrackRatio::ThreeTwoOne => "3-2-1",
            CrackRatio::FiveThreeTwo => "5-3-2",
            CrackRatio::TwoOneOne => "2-1-1",
        }
    }
}

impl std::str::FromStr for CrackRatio {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "3-2-1" => Ok(CrackRatio::ThreeTwoOne),
            "5-3-2" => Ok(CrackRatio::FiveThreeTwo),
            "2-1-1" => Ok(CrackRatio::TwoOneOne),
            other => Err(CalcError::invalid_input("ratio", other, "Expected 3-2-1, 5-3-2 or 2-1-1")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrackSpreadInput {
    #[serde(default)]
    pub label: String,
    /// $/bbl
    pub crude_price: f64,
    /// $/gal
    pub gasoline_price: f64,
    /// $/gal (heating oil / ULSD)
    pub distillate_price: f64,
    #[serde(default)]
    pub ratio: CrackRatio,
}

impl CrackSpreadInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("crude_price", self.crude_price)?;
        require_positive("gasoline_price", self.gasoline_price)?;
        require_positive("distillate_price", self.distillate_price)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrackSpreadResult {
    pub ratio: CrackRatio,
    pub gasoline_per_bbl: f64,
    pub distillate_per_bbl: f64,
    /// Value of the product barrels in the ratio
    pub product_value: f64,
    /// Cost of the crude barrels in the ratio
    pub crude_cost: f64,
    /// Margin per barrel of crude
    pub spread_per_bbl: f64,
    /// Spread as a share of the crude price
    pub margin_percent: f64,
}

pub fn calculate_crack_spread(input: &CrackSpreadInput) -> CalcResult<CrackSpreadResult> {
    input.validate()?;

    let (crude_bbl, gasoline_bbl, distillate_bbl) = input.ratio.barrels();
    let gasoline_per_bbl = input.gasoline_price * GALLONS_PER_BARREL;
    let distillate_per_bbl = input.distillate_price * GALLONS_PER_BARREL;
    let product_value = gasoline_bbl * gasoline_per_bbl + distillate_bbl * distillate_per_bbl;
    let crude_cost = crude_bbl * input.crude_price;
    let spread_per_bbl = (product_value - crude_cost) / crude_bbl;

    Ok(CrackSpreadResult {
        ratio: input.ratio,
        gasoline_per_bbl,
        distillate_per_bbl,
        product_value,
        crude_cost,
        spread_per_bbl,
        margin_percent: spread_per_bbl / input.crude_price * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_two() -> OilFuturesInput {
        OilFuturesInput {
            label: "CL".to_string(),
            contracts: 2,
            entry_price: 75.0,
            exit_price: 78.5,
            position: Position::Long,
            contract_size_bbl: STANDARD_CONTRACT_BBL,
            commission_per_contract: 5.0,
            initial_margin_per_contract: Some(6_000.0),
        }
    }

    #[test]
    fn test_long_profit() {
        let result = calculate_futures(&long_two()).unwrap();
        assert!((result.gross_pnl - 7_000.0).abs() < 1e-9);
        assert!((result.net_pnl - 6_990.0).abs() < 1e-9);
        assert_eq!(result.pnl_per_dollar_move, 2_000.0);
        assert!((result.return_on_margin_percent.unwrap() - 6_990.0 / 12_000.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_loses_on_rally() {
        let mut input = long_two();
        input.position = Position::Short;
        let result = calculate_futures(&input).unwrap();
        assert!((result.gross_pnl + 7_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_sensitivity_table() {
        let result = calculate_futures(&long_two()).unwrap();
        assert_eq!(result.sensitivity.len(), SENSITIVITY_MOVES.len());
        let up_one = result.sensitivity.iter().find(|row| row.price_move == 1.0).unwrap();
        assert!((up_one.net_pnl - (2_000.0 - 10.0)).abs() < 1e-9);
        assert!((up_one.price - 76.0).abs() < 1e-12);
    }

    #[test]
    fn test_mini_contract() {
        let mut input = long_two();
        input.contract_size_bbl = 500.0;
        let result = calculate_futures(&input).unwrap();
        assert!((result.gross_pnl - 3_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_zero_contracts() {
        let mut input = long_two();
        input.contracts = 0;
        assert!(calculate_futures(&input).is_err());
    }

    #[test]
    fn test_three_two_one_crack() {
        let input = CrackSpreadInput {
            label: String::new(),
            crude_price: 80.0,
            gasoline_price: 2.50,
            distillate_price: 3.00,
            ratio: CrackRatio::ThreeTwoOne,
        };
        let result = calculate_crack_spread(&input).unwrap();
        // (2·105 + 126 − 240) / 3 = 32
        assert!((result.spread_per_bbl - 32.0).abs() < 1e-9);
        assert!((result.margin_percent - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_parsing_and_serde() {
        assert_eq!("5-3-2".parse::<CrackRatio>().unwrap(), CrackRatio::FiveThreeTwo);
        assert!("4-2-2".parse::<CrackRatio>().is_err());
        assert_eq!(serde_json::to_string(&CrackRatio::TwoOneOne).unwrap(), "\"2-1-1\"");
    }
}
