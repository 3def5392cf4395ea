use anyhow::{Context, Result};
use clap::Parser;
use rust_tree_heaps::PyramidalHeap;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_VALUES: [i64; 11] = [70, 40, 50, 20, 60, 100, 80, 30, 10, 90, 53];
const DEFAULT_CHANGES: [(usize, i64); 4] = [(10, 99), (8, 120), (2, 7), (1, 5)];

#[derive(Parser, Debug)]
#[command(
    name = "pyramid-demo",
    about = "Build a tree heap, update it in place and draw it"
)]
struct Cli {
    /// Maximum number of values the heap may hold (unbounded if omitted).
    #[arg(long)]
    capacity: Option<usize>,
    /// Values to insert, in order. Replaces the built-in sequence and its updates.
    #[arg(long, num_args = 0.., value_delimiter = ',', allow_negative_numbers = true)]
    values: Option<Vec<i64>>,
    /// Positional update applied after inserting, as `index=value`. Repeatable.
    #[arg(long = "change", value_parser = parse_change)]
    changes: Vec<(usize, i64)>,
    /// Print the in-order traversal after drawing.
    #[arg(long)]
    in_order: bool,
    /// Remove every value after drawing and print the extraction order.
    #[arg(long)]
    drain: bool,
}

fn parse_change(raw: &str) -> Result<(usize, i64), String> {
    let (index, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected index=value, got `{raw}`"))?;
    let index = index
        .trim()
        .parse()
        .map_err(|e| format!("bad index `{index}`: {e}"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("bad value `{value}`: {e}"))?;
    Ok((index, value))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (values, changes) = match cli.values {
        Some(values) => (values, cli.changes),
        None if cli.changes.is_empty() => (DEFAULT_VALUES.to_vec(), DEFAULT_CHANGES.to_vec()),
        None => (DEFAULT_VALUES.to_vec(), cli.changes),
    };

    let mut heap: PyramidalHeap<i64> = match cli.capacity {
        Some(capacity) => PyramidalHeap::bounded(capacity),
        None => PyramidalHeap::new(),
    };

    for value in values {
        heap.insert(value)
            .with_context(|| format!("failed to insert {value}"))?;
    }
    info!(len = heap.len(), "inserted values");

    for (index, value) in changes {
        let old = heap
            .change(index, value)
            .with_context(|| format!("failed to change position {index} to {value}"))?;
        info!(index, old, new = value, "changed value");
    }

    match heap.draw() {
        Some(drawing) => println!("{drawing}"),
        None => println!("pyramidal heap is empty"),
    }

    if cli.in_order {
        if let Some(values) = heap.in_order() {
            let values: Vec<String> = values.map(|v| v.to_string()).collect();
            println!("in-order: {}", values.join(" "));
        }
    }

    if cli.drain {
        let mut drained = Vec::with_capacity(heap.len());
        while !heap.is_empty() {
            drained.push(heap.remove().context("failed to remove maximum")?.to_string());
        }
        println!("drained: {}", drained.join(" "));
    }

    Ok(())
}
