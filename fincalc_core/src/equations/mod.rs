//! # Financial Equations
//!
//! The numeric kernels every calculator shares. Keeping them in one place
//! means the amortization, bisection and projection formulas are written
//! and tested once.
//!
//! ## Modules
//!
//! - [`amortization`] - Level-payment loan formulas and schedules
//! - [`solver`] - Bounded bisection and the APR rate solver
//! - [`growth`] - Capped compounding projections
//!
//! ## Conventions
//!
//! - Annual rates are nominal and compound monthly (`r = apr/100/12`)
//! - Payments are made at the end of each period
//! - Every formula special-cases `r = 0`

pub mod amortization;
pub mod growth;
pub mod solver;

pub use amortization::{
    amortization_schedule,
    amortized_payment,
    future_value_of_annuity,
    future_value_of_lump_sum,
    level_schedule,
    loan_totals,
    monthly_rate,
    present_value,
    remaining_balance,
    AmortizationRow,
};

pub use growth::{grow, project_for, project_until, Projection};

pub use solver::{bisect, solve_monthly_rate, Monotonic, SolverOutcome};
