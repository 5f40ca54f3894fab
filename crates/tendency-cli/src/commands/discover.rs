//! Discover command: ranked pairs plus the correlation heat map

use anyhow::{bail, Result};

use tendency_core::{Attribute, CorrelationMatrix, InsightEngine, MiningConfig, Strength};

use crate::state::AppState;

const RED: &str = "\x1b[91m"; // strong
const ORANGE: &str = "\x1b[38;5;208m"; // moderate
const YELLOW: &str = "\x1b[93m"; // weak
const RESET: &str = "\x1b[0m";

pub fn cmd_discover(state: &AppState, all: bool) -> Result<()> {
    if state.repo.is_empty() {
        bail!("No data loaded. Use 'load <file.csv>' first.");
    }

    let attributes: &[Attribute] = if all { &Attribute::ALL } else { &Attribute::CORE };
    println!("{}x{} heat map over {} attribute pairs", attributes.len(), attributes.len(), attributes.len() * (attributes.len() - 1) / 2);
    println!();

    let engine = InsightEngine::with_config(MiningConfig::load());
    let matrix = CorrelationMatrix::build(
        &engine,
        state.repo.all(),
        state.store.blocked_keys(),
        attributes,
    );

    if matrix.ranked().is_empty() {
        println!("No attribute pair produced any insights.");
        return Ok(());
    }

    print_ranking(&matrix);
    print_grid(&matrix);

    println!();
    println!("Use 'pair <attr1> <attr2>' to explore a pairing in detail.");
    Ok(())
}

fn print_ranking(matrix: &CorrelationMatrix) {
    println!("TOP 10 STRONGEST RELATIONSHIPS:");
    println!("============================================");
    println!();

    for (i, pair) in matrix.top(10).iter().enumerate() {
        let bar = "#".repeat(pair.bar_length());
        println!("{}. {} <-> {}", i + 1, pair.attr_x, pair.attr_y);
        println!("   Avg Score: {}/100  {}", pair.rounded_score(), bar);
        println!("   Insights Found: {}", pair.insight_count);
        println!();
    }
}

fn print_grid(matrix: &CorrelationMatrix) {
    println!("============================================");
    println!("CORRELATION STRENGTH MATRIX:");
    println!("============================================");
    println!();
    println!(
        "Color Scale: {}<50{} (weak)  {}50-65{} (moderate)  {}>65{} (strong)",
        YELLOW, RESET, ORANGE, RESET, RED, RESET
    );
    println!();

    // column header uses 4-char attribute abbreviations
    print!("{:8}", "");
    for attr in matrix.attributes() {
        print!("{:<6}", truncated(attr, 4));
    }
    println!();

    for &row in matrix.attributes() {
        print!("{:<8}", truncated(&row, 7));
        for &col in matrix.attributes() {
            match matrix.cell(row, col) {
                Some(avg) => {
                    let score = avg.round().clamp(0.0, 100.0) as u8;
                    let color = match Strength::classify(score) {
                        Strength::Strong => RED,
                        Strength::Moderate => ORANGE,
                        Strength::Weak => YELLOW,
                    };
                    print!("{}{:>4}{}  ", color, score, RESET);
                }
                // diagonal and empty pairs render the same blank sentinel
                None => print!("{:>4}  ", "--"),
            }
        }
        println!();
    }
}

fn truncated(attr: &Attribute, max: usize) -> String {
    let name = attr.as_str();
    name[..name.len().min(max)].to_string()
}
