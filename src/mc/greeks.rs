// src/mc/greeks.rs
//! Finite-difference Greeks on top of any pricing function
//!
//! # Bump Rules
//!
//! ```text
//! Δ = [V(S+dS) - V(S-dS)] / (2 dS)            dS = 1% of S
//! Γ = [V(S+dS) - 2V(S) + V(S-dS)] / dS²
//! ν = [V(σ+0.01) - V(σ)] / 0.01
//! Θ = [V(T-1/365) - V(T)] / (-1/365)          skipped when T - 1/365 ≤ 0
//! ρ = [V(r+0.01) - V(r)] / 0.01
//! ```
//!
//! Θ is the sensitivity to remaining maturity, ∂V/∂T, so it has the opposite
//! sign to calendar-time theta.
//!
//! With a Monte Carlo pricer every leg is an independent run with fresh
//! draws, so each Greek carries sampling noise on top of the truncation
//! error of the difference quotient.

use crate::error::PricerResult;
use crate::mc::mc_engine::{self, PricingRequest};
use crate::models::ModelParams;
use crate::rng::NormalRng;
use bitflags::bitflags;

/// Relative spot bump
pub const SPOT_BUMP: f64 = 0.01;
/// Absolute volatility bump
pub const VOL_BUMP: f64 = 0.01;
/// Absolute rate bump
pub const RATE_BUMP: f64 = 0.01;
/// One calendar day, in years
pub const TIME_BUMP: f64 = 1.0 / 365.0;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GreeksSelection: u32 {
        const DELTA = 1 << 0;
        const GAMMA = 1 << 1;
        const VEGA  = 1 << 2;
        const THETA = 1 << 3;
        const RHO   = 1 << 4;
        const ALL = Self::DELTA.bits()
            | Self::GAMMA.bits()
            | Self::VEGA.bits()
            | Self::THETA.bits()
            | Self::RHO.bits();
    }
}

impl Default for GreeksSelection {
    fn default() -> Self {
        GreeksSelection::ALL
    }
}

/// Sensitivities of one option; unrequested or skipped entries are 0.0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

/// Apply the bump rules to `price_fn`, re-pricing only the legs the
/// selection needs.
pub fn finite_difference_greeks<F>(
    params: &ModelParams,
    selection: GreeksSelection,
    mut price_fn: F,
) -> PricerResult<Greeks>
where
    F: FnMut(&ModelParams) -> PricerResult<f64>,
{
    let mut greeks = Greeks::default();

    let needs_base = selection.intersects(
        GreeksSelection::GAMMA | GreeksSelection::VEGA | GreeksSelection::THETA | GreeksSelection::RHO,
    );
    let base = if needs_base { price_fn(params)? } else { 0.0 };

    if selection.intersects(GreeksSelection::DELTA | GreeksSelection::GAMMA) {
        let ds = params.s0 * SPOT_BUMP;
        let up = price_fn(&ModelParams { s0: params.s0 + ds, ..*params })?;
        let down = price_fn(&ModelParams { s0: params.s0 - ds, ..*params })?;

        if selection.contains(GreeksSelection::DELTA) {
            greeks.delta = (up - down) / (2.0 * ds);
        }
        if selection.contains(GreeksSelection::GAMMA) {
            greeks.gamma = (up - 2.0 * base + down) / (ds * ds);
        }
    }

    if selection.contains(GreeksSelection::VEGA) {
        let bumped = price_fn(&ModelParams { sigma: params.sigma + VOL_BUMP, ..*params })?;
        greeks.vega = (bumped - base) / VOL_BUMP;
    }

    if selection.contains(GreeksSelection::THETA) {
        let t = params.t - TIME_BUMP;
        if t > 0.0 {
            let bumped = price_fn(&ModelParams { t, ..*params })?;
            greeks.theta = (bumped - base) / -TIME_BUMP;
        } else {
            tracing::debug!(maturity = params.t, "theta skipped, maturity within one day");
        }
    }

    if selection.contains(GreeksSelection::RHO) {
        let bumped = price_fn(&ModelParams { r: params.r + RATE_BUMP, ..*params })?;
        greeks.rho = (bumped - base) / RATE_BUMP;
    }

    Ok(greeks)
}

/// Monte Carlo Greeks for `request`, every leg priced with the same path
/// count and variance-reduction settings.
///
/// Single-threaded legs draw from `rng` in sequence; parallel legs use fresh
/// worker seeds and leave `rng` untouched.
pub fn greeks_selected(
    rng: &mut NormalRng,
    request: &PricingRequest,
    use_parallel: bool,
    selection: GreeksSelection,
) -> PricerResult<Greeks> {
    request.params.validate()?;
    finite_difference_greeks(&request.params, selection, |params| {
        let leg = request.with_params(*params);
        let result = if use_parallel {
            mc_engine::price_parallel(&leg)?
        } else {
            mc_engine::price(rng, &leg)?
        };
        Ok(result.price)
    })
}

/// All five Greeks
pub fn greeks(
    rng: &mut NormalRng,
    request: &PricingRequest,
    use_parallel: bool,
) -> PricerResult<Greeks> {
    greeks_selected(rng, request, use_parallel, GreeksSelection::ALL)
}
