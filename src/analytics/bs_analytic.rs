// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! # Degenerate Inputs
//!
//! d₁ and d₂ divide by σ√T. Two branches are handled before that division:
//! - `T ≤ 0`: the option is at expiry, value is the undiscounted intrinsic payoff at S
//! - `σ ≤ 0`: S_T is the deterministic forward S·e^(rT), value is its discounted payoff
//!
//! The Greeks follow the same branches and return their limiting values
//! (zero for gamma, vega and theta) instead of NaN.

use crate::math_utils::{norm_cdf, norm_pdf};
use crate::mc::payoffs::{OptionType, Payoff};
use crate::models::ModelParams;

#[inline]
fn is_degenerate(sigma: f64, t: f64) -> bool {
    t <= 0.0 || sigma <= 0.0
}

/// d₁ and d₂ for non-degenerate inputs
#[inline]
fn d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let sqrt_t = t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * sqrt_t);
    (d1, d1 - sigma * sqrt_t)
}

/// Terminal price the degenerate branches settle on
#[inline]
fn degenerate_terminal(s: f64, r: f64, t: f64) -> f64 {
    if t <= 0.0 {
        s
    } else {
        s * (r * t).exp()
    }
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C(S,K,r,σ,T) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return (s - k).max(0.0);
    }
    if sigma <= 0.0 {
        let forward = s * (r * t).exp();
        return (-r * t).exp() * (forward - k).max(0.0);
    }
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes European put option price
///
/// # Formula
/// ```text
/// P(S,K,r,σ,T) = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// ```
pub fn bs_put_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return (k - s).max(0.0);
    }
    if sigma <= 0.0 {
        let forward = s * (r * t).exp();
        return (-r * t).exp() * (k - forward).max(0.0);
    }
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    k * (-r * t).exp() * norm_cdf(-d2) - s * norm_cdf(-d1)
}

/// Closed-form price of `option_type` struck at `params.k`
pub fn analytical_price(params: &ModelParams, option_type: OptionType) -> f64 {
    match option_type {
        OptionType::Call => bs_call_price(params.s0, params.k, params.r, params.sigma, params.t),
        OptionType::Put => bs_put_price(params.s0, params.k, params.r, params.sigma, params.t),
    }
}

/// Closed-form price of `payoff` under the model in `params`.
///
/// The payoff's own strike is used, so a control payoff struck away from
/// `params.k` gets its own reference value.
pub fn analytical_price_for(payoff: &Payoff, params: &ModelParams) -> f64 {
    let params = ModelParams {
        k: payoff.strike(),
        ..*params
    };
    analytical_price(&params, payoff.option_type())
}

/// Black-Scholes Delta (∂V/∂S) for European call
///
/// # Formula
/// ```text
/// Δ = ∂C/∂S = Φ(d₁)
/// ```
pub fn bs_call_delta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if is_degenerate(sigma, t) {
        return if degenerate_terminal(s, r, t) > k { 1.0 } else { 0.0 };
    }
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    norm_cdf(d1)
}

/// Put delta, Φ(d₁) - 1
pub fn bs_put_delta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    bs_call_delta(s, k, r, sigma, t) - 1.0
}

/// Black-Scholes Gamma (∂²V/∂S²), identical for calls and puts
///
/// # Formula
/// ```text
/// Γ = φ(d₁) / (S * σ * √T)
/// ```
pub fn bs_gamma(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if is_degenerate(sigma, t) {
        return 0.0;
    }
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    norm_pdf(d1) / (s * sigma * t.sqrt())
}

/// Black-Scholes Vega (∂V/∂σ), identical for calls and puts
///
/// # Formula
/// ```text
/// ν = S * φ(d₁) * √T
/// ```
///
/// Per unit of volatility, so a 1% move changes the price by ν/100.
pub fn bs_vega(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if is_degenerate(sigma, t) {
        return 0.0;
    }
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    s * norm_pdf(d1) * t.sqrt()
}

/// Black-Scholes Theta (∂V/∂t) for European call
///
/// # Formula
/// ```text
/// Θ = -S*φ(d₁)*σ/(2√T) - r*K*e^(-rT)*Φ(d₂)
/// ```
///
/// Per year of calendar time; usually negative for long options.
pub fn bs_call_theta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if is_degenerate(sigma, t) {
        return 0.0;
    }
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    (-s * norm_pdf(d1) * sigma) / (2.0 * t.sqrt()) - r * k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes Rho (∂V/∂r) for European call
///
/// # Formula
/// ```text
/// ρ = K * T * e^(-rT) * Φ(d₂)
/// ```
pub fn bs_call_rho(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if sigma <= 0.0 {
        let itm = degenerate_terminal(s, r, t) > k;
        return if itm { k * t * (-r * t).exp() } else { 0.0 };
    }
    let (_, d2) = d1_d2(s, k, r, sigma, t);
    k * t * (-r * t).exp() * norm_cdf(d2)
}

/// Put rho, -K * T * e^(-rT) * Φ(-d₂)
pub fn bs_put_rho(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    bs_call_rho(s, k, r, sigma, t) - k * t * (-r * t).exp()
}
