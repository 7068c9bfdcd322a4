// demos/error_handling_demo.rs
use mc_pricer::{MonteCarloPricer, PricingConfig};

fn main() {
    println!("Error Handling Demo for mc-pricer");
    println!("=================================\n");

    let mut pricer = MonteCarloPricer::new(42);

    // Test 1: Unknown option type
    println!("1. Testing unknown option type...");
    let bad_type = PricingConfig {
        option_type: "straddle".to_string(),
        ..Default::default()
    };
    match pricer.price_mc(&bad_type) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Unknown control option type
    println!("\n2. Testing unknown control option type...");
    let bad_control = PricingConfig {
        use_control_variate: true,
        control_option_type: "barrier".to_string(),
        ..Default::default()
    };
    match pricer.price_mc(&bad_control) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Negative spot
    println!("\n3. Testing negative spot price...");
    let bad_spot = PricingConfig {
        s0: -100.0,
        ..Default::default()
    };
    match pricer.price_mc_parallel(&bad_spot) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Degenerate inputs that fall back instead of failing
    println!("\n4. Testing degenerate but valid inputs...");
    let cases = [
        ("zero paths", PricingConfig { n_paths: 0, ..Default::default() }),
        ("zero volatility", PricingConfig { sigma: 0.0, n_paths: 1_000, ..Default::default() }),
        ("expired option", PricingConfig { t: 0.0, s0: 110.0, n_paths: 1_000, ..Default::default() }),
        ("confidence 1.5", PricingConfig { confidence_level: 1.5, n_paths: 1_000, ..Default::default() }),
    ];
    for (label, config) in cases.iter() {
        match pricer.price_mc(config) {
            Ok(result) => println!(
                "   ✓ {}: price {:.6}, std.err {}, confidence {}",
                label, result.price, result.std_error, result.confidence_level
            ),
            Err(e) => println!("   Unexpected error for {}: {}", label, e),
        }
    }

    println!("\nAll error handling tests completed!");
}
