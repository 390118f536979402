use std::env;
use std::io::{self, Read};

use cardsift::{engine_score, summarize_card_engine};
use cardsift::card::card_from_row;
use cardsift::corpus::CardRow;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn main() {
    init_tracing();

    let name = env::args().nth(1).unwrap_or_else(|| "Unnamed Card".to_string());

    let mut oracle_text = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut oracle_text) {
        eprintln!("error: failed to read oracle text from stdin: {err}");
        std::process::exit(1);
    }

    let row = CardRow {
        name,
        oracle_text: Some(oracle_text.trim().to_string()),
        ..Default::default()
    };
    let card = card_from_row(&row);

    println!("{}", "=".repeat(78));
    println!("{}", card.name);
    println!();
    println!("Oracle Text:");
    if card.oracle_text.is_empty() {
        println!("(no oracle text)");
    } else {
        println!("{}", card.oracle_text);
    }
    println!();
    println!("Engine score (rough): {:.2}", engine_score(&card));
    println!();

    if card.effects.is_empty() {
        println!("No parsed effects.");
        return;
    }

    println!("Effects:");
    for effect in &card.effects {
        println!("  - [{}] {}", effect.effect_type.as_str(), effect.raw_text);
        if let Some(trigger) = &effect.trigger_text {
            println!("     trigger_text: {trigger}");
        }
        if let Some(cost) = &effect.cost_text {
            println!("     cost_text:    {cost}");
        }
        if !effect.result_text.is_empty() && effect.result_text != effect.raw_text {
            println!("     result_text:  {}", effect.result_text);
        }

        if !effect.trigger_tags.is_empty() {
            let mut tags: Vec<String> = effect.trigger_tags.iter().map(|t| t.short()).collect();
            tags.sort();
            println!("     trigger_tags: {}", tags.join(", "));
        }
        if !effect.cost_tags.is_empty() {
            let mut tags: Vec<String> = effect.cost_tags.iter().map(|t| t.short()).collect();
            tags.sort();
            println!("     cost_tags:    {}", tags.join(", "));
        }
        if !effect.result_tags.is_empty() {
            let mut tags: Vec<String> = effect.result_tags.iter().map(|t| t.short()).collect();
            tags.sort();
            println!("     result_tags:  {}", tags.join(", "));
        }

        if !effect.cost_atoms.is_empty() {
            println!("     cost_atoms:   {:?}", effect.cost_atoms);
        }
        if !effect.result_atoms.is_empty() {
            println!("     result_atoms: {:?}", effect.result_atoms);
        }
        if !effect.result_actions.is_empty() {
            let labels: Vec<&str> = effect
                .result_actions
                .iter()
                .map(|a| a.kind.map(|k| k.as_str()).unwrap_or(a.verb.as_str()))
                .collect();
            println!("     result_actions: {labels:?}");
        }
    }
    println!();

    println!("Card summary:");
    println!("{:?}", summarize_card_engine(&card));
}
