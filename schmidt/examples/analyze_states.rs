//! Analyzes every catalog state, a few manual inputs and some random states
//!
//! Run with: cargo run --example analyze_states
//! Set RUST_LOG=schmidt=debug to see per-decomposition logs.

use schmidt::{presets, AnalysisConfig, AnalysisRequest, Analyzer};
use tracing_subscriber::EnvFilter;

fn main() -> schmidt::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AnalysisConfig::from_toml_str(
        r#"
        seed = 42
        "#,
    )?;
    let mut analyzer = Analyzer::new(config);

    println!("=== Schmidt Decomposition Demo ===\n");

    // Example 1: preset catalog
    println!("1. Preset states:\n");
    for entry in presets() {
        let analysis = analyzer.analyze(AnalysisRequest::preset(entry.key))?;
        println!("{}", analysis.report());
    }

    // Example 2: manual input
    println!("2. Manual input:\n");
    for (text, dim_a, dim_b) in [
        ("[1, 0, 0, 1]", 2, 2),
        ("1, i, -i, 1", 2, 2),
        ("0.5 0.5 0 0 0.5 0.5", 2, 3),
    ] {
        let analysis = analyzer.analyze(AnalysisRequest::manual(text, dim_a, dim_b))?;
        println!("   input: {text}");
        println!("{}", analysis.report());
    }

    // Example 3: random states with a prescribed Schmidt rank
    println!("3. Random states:\n");
    for target_rank in 1..=3 {
        let analysis = analyzer.analyze(AnalysisRequest::random(3, 3, Some(target_rank)))?;
        println!("   target rank: {target_rank}");
        println!("{}", analysis.report());
    }

    // Example 4: JSON output
    println!("4. JSON report:\n");
    let analysis = analyzer.analyze(AnalysisRequest::preset("partial_entangled"))?;
    println!("   {}\n", analysis.to_json()?);

    // Example 5: rejected input
    println!("5. Rejected input:\n");
    match analyzer.analyze(AnalysisRequest::manual("1, 0, 0", 2, 2)) {
        Ok(_) => println!("   unexpectedly accepted"),
        Err(err) => println!("   Error: {err}"),
    }

    Ok(())
}
