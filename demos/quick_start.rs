//! Quick start: both experiment styles plus the one-shot helper
//!
//! Run with `RUST_LOG=simple_ab=debug cargo run --example quick_start`
//! to see side resolution events.

use simple_ab::selector::{self, RandomSelector};
use simple_ab::{quick_test, simple_ab, AbTest, ConfigurableAb};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== simple-ab quick start ===\n");

    // Declarative style: letter-named producers
    let mut headline = simple_ab!("Headline" => {
        A => "Ship faster with simple-ab",
        B => "A/B testing in one line",
        C => "Stop guessing, start testing",
    })?;
    println!("{headline}");
    for _ in 0..3 {
        let text = headline.test(None)?;
        println!("  side {:?}: {text}", headline.current_side());
    }
    println!("  forced C: {}\n", headline.test(Some("C"))?);

    // Configurable style: named sides, seeded selector for reproducible runs
    let mut pricing = ConfigurableAb::builder("Pricing")
        .literal("control", 9.99)
        .producer("discount", || 9.99 * 0.8)
        .selector(RandomSelector::seeded(42))
        .build()?;
    println!("{pricing}");
    for _ in 0..3 {
        let price = pricing.test(None)?;
        println!("  side {:?}: {price:.2}", pricing.current_side());
    }
    println!(
        "  summary: {}\n",
        serde_json::to_string(&pricing.describe())?
    );

    // One-shot helper with a custom strategy
    let banner: &str = quick_test(
        "Banner",
        [("A", "blue"), ("B", "green")],
        Some(Box::new(selector::from_fn(|| "B"))),
        None,
    )?;
    println!("quick_test Banner -> {banner}");

    // Lookup failures surface directly
    match headline.test(Some("Z")) {
        Ok(_) => println!("unexpected side Z"),
        Err(err) => println!("forced Z -> {err}"),
    }

    Ok(())
}
