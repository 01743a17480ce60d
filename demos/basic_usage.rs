#![allow(clippy::uninlined_format_args)]
use fixed_bloom_rs::common::bits2hr;
use fixed_bloom_rs::{BloomFilter, BloomResult};
use tracing_subscriber::EnvFilter;

fn main() -> BloomResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    println!("🌸 Bloom Filter Basic Example");
    println!("==============================");

    basic_workflow_example()?;
    explicit_parameters_example()?;
    merge_example()?;

    Ok(())
}

fn basic_workflow_example() -> BloomResult<()> {
    println!("\n📝 Basic Workflow Example");
    println!("---------------------------");

    let mut filter = BloomFilter::new(1_000_000, 0.01)?;

    println!("Created bloom filter:");
    println!("  Capacity: {}", filter.capacity());
    println!("  Target FPR: {:.2}%", filter.false_positive_rate() * 100.0);
    println!("  Bit array size: {} bits", filter.bit_array_size());
    println!("  Bit array in memory: {}", bits2hr(filter.bit_array_size()));
    println!("  Bits per item: {:.2}", filter.bits_per_item());
    println!("  Hash functions: {}", filter.hash_count());

    let items = ["apple", "banana", "cherry", "date", "elderberry"];
    for item in &items {
        filter.insert(item);
        println!("  ✅ Inserted: {}", item);
    }

    println!("\nQuerying items:");
    for item in items.iter().chain(&["grape", "kiwi", "lemon"]) {
        let verdict = if filter.contains(item) {
            "might be present"
        } else {
            "definitely absent"
        };
        println!("  🔍 {}: {}", item, verdict);
    }

    println!("\n{}", filter.stats());
    Ok(())
}

fn explicit_parameters_example() -> BloomResult<()> {
    println!("\n⚙️  Explicit Parameters Example");
    println!("-------------------------------");

    let mut filter = BloomFilter::with_params(10_000, 5, 1_000)?;
    println!(
        "  m = {}, k = {}, computed FPR at capacity: {:.4}%",
        filter.bit_array_size(),
        filter.hash_count(),
        filter.false_positive_rate() * 100.0
    );

    for i in 0..1_000 {
        filter.insert(format!("user_{}", i));
    }
    println!(
        "  After {} inserts: {} bits set, estimated FPR {:.4}%",
        filter.size(),
        filter.count_set_bits(),
        filter.estimated_false_positive_rate() * 100.0
    );

    filter.clear();
    println!("  Cleared: size = {}, set bits = {}", filter.size(), filter.count_set_bits());
    Ok(())
}

fn merge_example() -> BloomResult<()> {
    println!("\n🔗 Merge Example");
    println!("-----------------");

    let mut left = BloomFilter::new(10_000, 0.01)?;
    let mut right = BloomFilter::new(10_000, 0.01)?;
    left.insert("from-left");
    right.insert("from-right");

    left.union(&right)?;
    println!("  from-left: {}", left.contains("from-left"));
    println!("  from-right: {}", left.contains("from-right"));
    println!("  merged size: {}", left.size());
    Ok(())
}
