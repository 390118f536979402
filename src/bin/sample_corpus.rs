use std::env;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use cardsift::card::{Card, card_from_row, summarize_card_engine};
use cardsift::corpus::load_rows;
use cardsift::scoring::{FeedDirection, card_synergy, engine_score, feed_report};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn print_card(card: &Card) {
    println!("{}", "=".repeat(78));
    println!(
        "{} — MV: {} | Cost: {} | Colors: {}",
        card.name,
        card.mana_value,
        card.mana_cost,
        if card.colors.is_empty() {
            "Colorless".to_string()
        } else {
            card.colors.letters()
        }
    );
    println!();
    println!("Oracle Text:");
    if card.oracle_text.is_empty() {
        println!("(no oracle text)");
    } else {
        println!("{}", card.oracle_text);
    }
    println!();
    println!("Engine score (rough): {:.2}", engine_score(card));

    if card.effects.is_empty() {
        println!("No parsed effects.");
        return;
    }

    println!("Effects:");
    for effect in &card.effects {
        println!("  - [{}] {}", effect.effect_type.as_str(), effect.raw_text);
    }
    println!("Card summary: {:?}", summarize_card_engine(card));
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let Some(corpus_path) = args.next() else {
        eprintln!("usage: sample_corpus <corpus.json> [count] [seed]");
        std::process::exit(2);
    };
    let count: usize = args
        .next()
        .map(|v| v.parse())
        .transpose()?
        .unwrap_or(20);
    let seed: u64 = args
        .next()
        .map(|v| v.parse())
        .transpose()?
        .unwrap_or(42);

    let rows = load_rows(&corpus_path)?;
    if rows.is_empty() {
        eprintln!("error: corpus is empty");
        std::process::exit(1);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    indices.shuffle(&mut rng);
    indices.truncate(count.min(rows.len()));

    let cards: Vec<Card> = indices.iter().map(|&i| card_from_row(&rows[i])).collect();

    for card in &cards {
        print_card(card);
        println!();
    }

    // Pairwise feeds within the sample, strongest first.
    let mut pairs = Vec::new();
    for i in 0..cards.len() {
        for j in (i + 1)..cards.len() {
            let score = card_synergy(&cards[i], &cards[j]);
            if score > 0.0 {
                pairs.push((i, j, score));
            }
        }
    }
    pairs.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

    println!("{}", "#".repeat(78));
    println!("Pairwise synergy and event feeds (top {})", pairs.len().min(10));
    println!("{}", "#".repeat(78));

    for (i, j, score) in pairs.into_iter().take(10) {
        let a = &cards[i];
        let b = &cards[j];
        let report = feed_report(a, b);

        println!("  {} <-> {}", a.name, b.name);
        println!("      synergy score = {score:.2}");
        println!("      A -> B feeds  = {:?}", report.a_to_b);
        println!("      B -> A feeds  = {:?}", report.b_to_a);
        match report.direction() {
            FeedDirection::BothDirections => {
                println!("      -> Potential 2-card loop (both directions feed).");
            }
            FeedDirection::OneDirection => {
                println!("      -> One-direction engine (could be part of a larger loop).");
            }
            FeedDirection::NoFeed => {
                println!("      -> No direct event-tag feed detected.");
            }
        }
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
