use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use footprint_engine::Candle;
use footprint_engine::utils::TimeUtils;

/// Print a seeded random-walk 1-minute candle series as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of candles
    #[arg(long, default_value_t = 240)]
    count: usize,

    /// Epoch seconds of the first candle
    #[arg(long, default_value_t = 1_700_000_040)]
    start: i64,

    /// Opening price of the first candle
    #[arg(long, default_value_t = 100.0)]
    price: f64,

    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Leave out volume so the synthesizer draws placeholders
    #[arg(long, default_value_t = false)]
    omit_volume: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let candles = random_walk(&args);

    serde_json::to_writer_pretty(io::stdout().lock(), &candles)
        .context("Failed to write candles")?;
    println!();
    Ok(())
}

fn random_walk(args: &Args) -> Vec<Candle> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut last_close = args.price;

    (0..args.count)
        .map(|i| {
            let open = last_close;
            let close = open * (1.0 + rng.gen_range(-0.003..0.003));
            let (body_low, body_high) = (open.min(close), open.max(close));
            let high = body_high * (1.0 + rng.gen_range(0.0..0.002));
            let low = body_low * (1.0 - rng.gen_range(0.0..0.002));
            let volume = (!args.omit_volume).then(|| rng.gen_range(50.0..500.0_f64).round());
            last_close = close;

            Candle::new(
                args.start + i as i64 * TimeUtils::SECS_IN_MIN,
                open,
                high,
                low,
                close,
                volume,
            )
        })
        .collect()
}
