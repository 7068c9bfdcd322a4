// demos/demo.rs
use mc_pricer::analytics::bs_analytic;
use mc_pricer::mc::{price, OptionType, Payoff, PricingRequest, PricingResult};
use mc_pricer::rng::NormalRng;
use mc_pricer::ModelParams;

fn print_row(label: &str, result: &PricingResult, analytic: f64) {
    println!(
        "{:<13} {:.6}  std.err {:.6}  CI({:.0}%)=[{:.6}, {:.6}]    BS: {:.6}",
        label,
        result.price,
        result.std_error,
        result.confidence_level * 100.0,
        result.ci_lower,
        result.ci_upper,
        analytic
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let n_paths = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(100_000);
    let seed = args.get(2).and_then(|a| a.parse().ok()).unwrap_or(0);

    let mut rng = NormalRng::new(seed);
    tracing::info!(n_paths, seed = rng.seed(), "running demo");

    let params = ModelParams::new(100.0, 100.0, 0.05, 0.2, 1.0);
    let call_bs = bs_analytic::bs_call_price(params.s0, params.k, params.r, params.sigma, params.t);
    let put_bs = bs_analytic::bs_put_price(params.s0, params.k, params.r, params.sigma, params.t);

    let base = PricingRequest {
        params,
        n_paths,
        ..Default::default()
    };
    let call = PricingRequest { option_type: OptionType::Call, ..base.clone() };
    let put = PricingRequest { option_type: OptionType::Put, ..base.clone() };

    let run = |rng: &mut NormalRng, req: &PricingRequest| price(rng, req).expect("Valid configuration");

    println!("======== Antithetic Variates (no control variate) ========");
    print_row("Call (MC):", &run(&mut rng, &call), call_bs);
    print_row("Put  (MC):", &run(&mut rng, &put), put_bs);

    println!("\n======== Antithetic + Control Variate ========");
    let call_cv = run(
        &mut rng,
        &PricingRequest {
            use_control_variate: true,
            control_payoff: Some(Payoff::call(params.k)),
            control_analytical: call_bs,
            ..call.clone()
        },
    );
    let put_cv = run(
        &mut rng,
        &PricingRequest {
            use_control_variate: true,
            control_payoff: Some(Payoff::put(params.k)),
            control_analytical: put_bs,
            ..put.clone()
        },
    );
    print_row("Call (MC+CV):", &call_cv, call_bs);
    print_row("Put  (MC+CV):", &put_cv, put_bs);
    if call_cv.control_variate_used {
        println!("  Call control adjustment: {:.6}", call_bs - call_cv.control_payoff_mc);
    }
    if put_cv.control_variate_used {
        println!("  Put control adjustment: {:.6}", put_bs - put_cv.control_payoff_mc);
    }

    println!("\n======== No Antithetic Variates ========");
    print_row("Call (MC):", &run(&mut rng, &PricingRequest { use_antithetic: false, ..call }), call_bs);
    print_row("Put  (MC):", &run(&mut rng, &PricingRequest { use_antithetic: false, ..put }), put_bs);
}
