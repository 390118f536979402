use std::env;

use cardsift::card::card_from_row;
use cardsift::corpus::load_rows;
use cardsift::scoring::build_engine_table;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let Some(corpus_path) = args.next() else {
        eprintln!("usage: build_engine_report <corpus.json> [--json]");
        std::process::exit(2);
    };
    let as_json = args.any(|arg| arg == "--json");

    let rows = load_rows(&corpus_path)?;
    let cards: Vec<_> = rows.iter().map(card_from_row).collect();
    let table = build_engine_table(&cards);

    if as_json {
        for row in &table {
            println!("{}", serde_json::to_string(row)?);
        }
        return Ok(());
    }

    println!("{:<40} {:>6} {:>5}  engine structure", "name", "score", "mv");
    for row in &table {
        println!(
            "{:<40} {:>6.2} {:>5.1}  triggers={} results={} costs={}",
            row.name,
            row.engine_score,
            row.mana_value,
            row.triggers.join("|"),
            row.results.join("|"),
            row.costs.join("|"),
        );
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
