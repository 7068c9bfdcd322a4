pub mod bs_analytic;

pub use bs_analytic::{analytical_price, analytical_price_for, bs_call_price, bs_put_price};
