// tests/greeks_test.rs
use approx::assert_relative_eq;
use mc_pricer::analytics::bs_analytic;
use mc_pricer::mc::greeks::{finite_difference_greeks, greeks, GreeksSelection};
use mc_pricer::mc::{OptionType, Payoff, PricingRequest};
use mc_pricer::rng::NormalRng;
use mc_pricer::{ModelParams, MonteCarloPricer, PricingConfig};

#[test]
fn test_mc_greeks_vs_analytic() {
    let config = PricingConfig {
        n_paths: 1_000_000,
        ..Default::default()
    };
    let (s0, k, r, sigma, t) = (config.s0, config.k, config.r, config.sigma, config.t);

    let mut pricer = MonteCarloPricer::new(0);
    let g = pricer.compute_greeks(&config, true).expect("Valid configuration");

    let analytic_delta = bs_analytic::bs_call_delta(s0, k, r, sigma, t);
    let analytic_vega = bs_analytic::bs_vega(s0, k, r, sigma, t);

    println!("\nMC Delta: {}  Analytic: {}", g.delta, analytic_delta);
    println!("MC Gamma: {}", g.gamma);
    println!("MC Vega: {}  Analytic: {}", g.vega, analytic_vega);
    println!("MC Theta (dV/dT): {}", g.theta);
    println!("MC Rho: {}", g.rho);

    assert!(g.delta > 0.0 && g.delta < 1.0, "Delta out of (0,1): {}", g.delta);
    assert!((g.delta - analytic_delta).abs() < 0.05, "Delta too far from analytic: {}", g.delta);
    assert!(g.vega >= 0.0, "Vega negative: {}", g.vega);
    assert!(g.rho > 0.0, "Call rho should be positive: {}", g.rho);
}

#[test]
fn test_perfect_control_greeks_match_closed_form_differences() {
    let params = ModelParams::default();
    let request = PricingRequest {
        params,
        n_paths: 100_000,
        use_control_variate: true,
        control_payoff: Some(Payoff::call(params.k)),
        control_analytical: bs_analytic::bs_call_price(params.s0, params.k, params.r, params.sigma, params.t),
        ..Default::default()
    };

    // Each leg collapses to the closed form, so the MC Greeks equal the
    // same bump rules applied to the analytical price.
    let mc = greeks(&mut NormalRng::new(5), &request, false).unwrap();
    let reference = finite_difference_greeks(&params, GreeksSelection::ALL, |p| {
        Ok(bs_analytic::analytical_price(p, OptionType::Call))
    })
    .unwrap();

    println!("\nMC (perfect control): {:?}", mc);
    println!("Closed-form bumps:    {:?}", reference);

    assert!(mc.delta > 0.0 && mc.delta < 1.0);
    assert!(mc.gamma > 0.0, "Gamma should be positive: {}", mc.gamma);
    assert!(mc.vega >= 0.0);
    assert_relative_eq!(mc.delta, reference.delta, max_relative = 1e-8);
    assert_relative_eq!(mc.gamma, reference.gamma, max_relative = 1e-6);
    assert_relative_eq!(mc.vega, reference.vega, max_relative = 1e-8);
    assert_relative_eq!(mc.theta, reference.theta, max_relative = 1e-8);
    assert_relative_eq!(mc.rho, reference.rho, max_relative = 1e-8);
}

#[test]
fn test_put_greeks_signs() {
    let config = PricingConfig {
        option_type: "put".to_string(),
        n_paths: 200_000,
        use_control_variate: true,
        ..Default::default()
    };
    let g = MonteCarloPricer::new(17).compute_greeks(&config, false).unwrap();

    println!("\nPut Greeks: {:?}", g);

    assert!(g.delta < 0.0 && g.delta > -1.0, "Put delta out of (-1,0): {}", g.delta);
    assert!(g.gamma > 0.0);
    assert!(g.rho < 0.0, "Put rho should be negative: {}", g.rho);
}

#[test]
fn test_theta_skipped_for_short_maturity() {
    let config = PricingConfig {
        t: 0.5 / 365.0,
        n_paths: 20_000,
        ..Default::default()
    };
    let g = MonteCarloPricer::new(3).compute_greeks(&config, false).unwrap();
    assert_eq!(g.theta, 0.0);
}

#[test]
fn test_selected_greeks_only() {
    let config = PricingConfig {
        n_paths: 50_000,
        ..Default::default()
    };
    let g = MonteCarloPricer::new(8)
        .compute_greeks_selected(&config, false, GreeksSelection::VEGA | GreeksSelection::RHO)
        .unwrap();

    assert_eq!(g.delta, 0.0);
    assert_eq!(g.gamma, 0.0);
    assert_eq!(g.theta, 0.0);
    assert!(g.vega != 0.0);
    assert!(g.rho != 0.0);
}
