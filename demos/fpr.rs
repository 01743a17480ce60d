#![allow(clippy::uninlined_format_args)]
use colored::Colorize;
use comfy_table::{
    Cell, CellAlignment, ContentArrangement, Table,
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};
use fixed_bloom_rs::BloomFilter;
use fixed_bloom_rs::common::bytes2hr;
use rand::{Rng, distr::Alphanumeric};
use std::collections::HashSet;
use tracing_subscriber::EnvFilter;

const TEST_SAMPLES: usize = 10_000; // Number of unknown elements to test for FPR

fn generate_random_string(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("╔═════════════════════════════════════════════╗");
    println!("║  Bloom Filter - False Positive Rate Tester  ║");
    println!("╚═════════════════════════════════════════════╝\n");

    let capacities = [1_000, 10_000, 100_000];
    let target_fprs = [0.01, 0.05, 0.1];

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Capacity").set_alignment(CellAlignment::Center),
            Cell::new("Target FPR").set_alignment(CellAlignment::Center),
            Cell::new("Bits / Hashes").set_alignment(CellAlignment::Center),
            Cell::new("Memory").set_alignment(CellAlignment::Center),
            Cell::new("Estimated FPR").set_alignment(CellAlignment::Center),
            Cell::new("Observed FPR").set_alignment(CellAlignment::Center),
            Cell::new("Deviation").set_alignment(CellAlignment::Center),
        ]);

    for &capacity in &capacities {
        for &target_fpr in &target_fprs {
            let mut filter = BloomFilter::new(capacity, target_fpr)?;

            let known: HashSet<String> =
                (0..capacity).map(|_| generate_random_string(32)).collect();
            for element in &known {
                filter.insert(element);
            }

            let missed = known.iter().filter(|e| !filter.contains(e)).count();
            if missed > 0 {
                return Err(format!("{} false negatives", missed).into());
            }

            let mut tested = 0;
            let mut false_positives = 0;
            while tested < TEST_SAMPLES {
                let unknown = generate_random_string(32);
                if known.contains(&unknown) {
                    continue;
                }
                tested += 1;
                if filter.contains(&unknown) {
                    false_positives += 1;
                }
            }

            let observed = false_positives as f64 / TEST_SAMPLES as f64;
            let deviation = (observed - target_fpr) / target_fpr * 100.0;
            let deviation_cell = if deviation.abs() <= 25.0 {
                format!("{:+.1}%", deviation).green()
            } else {
                format!("{:+.1}%", deviation).red()
            };

            table.add_row(vec![
                Cell::new(capacity),
                Cell::new(format!("{:.2}%", target_fpr * 100.0)),
                Cell::new(format!(
                    "{} / {}",
                    filter.bit_array_size(),
                    filter.hash_count()
                )),
                Cell::new(bytes2hr(filter.memory_usage())),
                Cell::new(format!(
                    "{:.3}%",
                    filter.estimated_false_positive_rate() * 100.0
                )),
                Cell::new(format!("{:.3}%", observed * 100.0)),
                Cell::new(deviation_cell.to_string()),
            ]);
        }
    }

    println!("{table}");
    Ok(())
}
