use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use serde::Serialize;

use footprint_engine::config::HTF;
use footprint_engine::utils::time_utils::epoch_sec_to_utc;
use footprint_engine::{
    Candle, Cli, FootprintCandle, HtfCandle, HtfPeriod, IndicatorKind, IndicatorPoint,
    accumulate_cumulative_delta, aggregate, aggregate_with_value_area, compute_indicator,
    synthesize_series,
};

#[derive(Serialize)]
struct IndicatorReport<'a> {
    kind: IndicatorKind,
    period: usize,
    points: &'a [IndicatorPoint],
}

#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    period_minutes: i64,
    footprints: &'a [FootprintCandle],
    htf: &'a [HtfCandle],
    indicator: Option<IndicatorReport<'a>>,
}

fn main() -> Result<()> {
    // A. Init Logging (RUST_LOG overrides the default)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::debug!("Parsed arguments: {:?}", args);

    // Validate up front so a bad period fails before any work is done
    let period = HtfPeriod::from_minutes(args.period_minutes)?;

    // C. Load candles
    let candles = load_candles(args.input.as_deref())?;
    log::info!("Loaded {} candles", candles.len());

    // D. Footprints
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut footprints =
        synthesize_series(&candles, seed).context("Footprint synthesis failed")?;
    let final_cvd = accumulate_cumulative_delta(&mut footprints);
    log::info!(
        "Synthesized {} footprint candles (seed {}), cumulative delta {}",
        footprints.len(),
        seed,
        final_cvd
    );

    // E. Higher timeframe
    let htf = if args.value_area {
        aggregate_with_value_area(&footprints, period.minutes(), HTF.value_area_pct)
    } else {
        aggregate(&footprints, period.minutes())
    }
    .context("Higher-timeframe aggregation failed")?;
    log::info!("Aggregated into {} {} candles", htf.len(), period.label());

    // F. Indicator
    let indicator = match args.indicator {
        Some(kind) => {
            let ind_period = args.indicator_period.unwrap_or_else(|| kind.default_period());
            let points = compute_indicator(kind, &candles, ind_period)
                .with_context(|| format!("Failed to compute {}({})", kind, ind_period))?;
            Some((kind, ind_period, points))
        }
        None => None,
    };

    // G. Output
    if args.json {
        let report = Report {
            seed,
            period_minutes: period.minutes(),
            footprints: &footprints,
            htf: &htf,
            indicator: indicator.as_ref().map(|(kind, ind_period, points)| IndicatorReport {
                kind: *kind,
                period: *ind_period,
                points,
            }),
        };
        serde_json::to_writer_pretty(io::stdout().lock(), &report)
            .context("Failed to write JSON report")?;
        println!();
    } else {
        print_summary(period, &htf);
        if let Some((kind, ind_period, points)) = &indicator {
            print_indicator(*kind, *ind_period, points);
        }
    }

    Ok(())
}

fn load_candles(path: Option<&Path>) -> Result<Vec<Candle>> {
    let candles: Vec<Candle> = match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse candles from {:?}", path))?
        }
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read candles from stdin")?;
            serde_json::from_str(&raw).context("Failed to parse candles from stdin")?
        }
    };
    Ok(candles)
}

fn print_summary(period: HtfPeriod, htf: &[HtfCandle]) {
    println!("{} candles ({}):", period.label(), htf.len());
    for candle in htf {
        let value_area = match (candle.value_area_low, candle.value_area_high) {
            (Some(low), Some(high)) => format!("  VA {:.4}..{:.4}", low, high),
            _ => String::new(),
        };
        println!(
            "{}  O {:.4} H {:.4} L {:.4} C {:.4}  V {:>8}  Δ {:>+7}  POC {:.4}  levels {}{}",
            epoch_sec_to_utc(candle.time),
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.volume,
            candle.delta(),
            candle.poc_price,
            candle.levels.len(),
            value_area
        );
    }
}

fn print_indicator(kind: IndicatorKind, period: usize, points: &[IndicatorPoint]) {
    const TAIL: usize = 5;
    let tail = points
        .iter()
        .skip(points.len().saturating_sub(TAIL))
        .map(|p| format!("{} = {:.4}", epoch_sec_to_utc(p.time), p.value))
        .join(", ");
    println!("{}({}): {} points; last: {}", kind, period, points.len(), tail);
}
