use std::collections::BTreeMap;
use std::env;
use std::fs;

use cardsift::clause::{classify_tier, normalize_clause, split_clauses};
use cardsift::corpus::load_rows;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn csv_field(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let Some(corpus_path) = args.next() else {
        eprintln!("usage: mine_ability_patterns <corpus.json> [out.csv]");
        std::process::exit(2);
    };
    let out_path = args.next();

    let rows = load_rows(&corpus_path)?;

    // One count per (tier, normalized clause) pattern.
    let mut patterns: BTreeMap<(&'static str, String), u64> = BTreeMap::new();

    for row in &rows {
        let oracle_text = row.oracle_text();
        if oracle_text.trim().is_empty() {
            continue;
        }
        for clause in split_clauses(oracle_text) {
            let Some(tier) = classify_tier(&clause) else {
                continue;
            };
            let normalized = normalize_clause(&clause);
            *patterns.entry((tier.as_str(), normalized)).or_insert(0) += 1;
        }
    }

    let mut sorted: Vec<_> = patterns.into_iter().collect();
    sorted.sort_by(|a, b| a.0.0.cmp(&b.0.0).then_with(|| b.1.cmp(&a.1)));

    let mut out = String::from("tier,normalized_clause,count\n");
    for ((tier, normalized), count) in &sorted {
        out.push_str(&format!("{},{},{}\n", tier, csv_field(normalized), count));
    }

    match out_path {
        Some(path) => {
            fs::write(&path, &out)?;
            println!("Found {} unique (tier, pattern) combos.", sorted.len());
            println!("Wrote patterns to: {path}");
        }
        None => print!("{out}"),
    }

    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
