//! Insight commands: generate, pair, keep, discard, saved, blocked

use anyhow::{bail, Result};

use tendency_core::{Insight, InsightEngine, MiningConfig};

use crate::state::AppState;

pub fn cmd_generate(state: &AppState) -> Result<()> {
    let engine = InsightEngine::with_config(MiningConfig::load());
    let insights = state
        .store
        .filter_blocked(engine.generate(state.repo.all(), state.store.blocked_keys()));

    print_listing(&insights);
    state.record_generated(&insights)?;
    Ok(())
}

pub fn cmd_pair(state: &AppState, attr_x: &str, attr_y: &str) -> Result<()> {
    let engine = InsightEngine::with_config(MiningConfig::load());
    let insights = state.store.filter_blocked(engine.generate_generic(
        state.repo.all(),
        state.store.blocked_keys(),
        attr_x,
        attr_y,
    ));

    if insights.is_empty() {
        println!("No insights matched '{}' and '{}'.", attr_x, attr_y);
    } else {
        print_listing(&insights);
    }
    state.record_generated(&insights)?;
    Ok(())
}

pub fn cmd_keep(state: &mut AppState, indexes: &[usize]) -> Result<()> {
    let last = state.last_generated()?;
    if last.is_empty() {
        bail!("No insights generated yet. Run 'generate' or 'pair' first.");
    }

    let chosen = select(&last, indexes);
    if chosen.is_empty() {
        bail!("No valid indexes (listing has {} insights).", last.len());
    }

    for insight in &chosen {
        println!("Kept insight: {}", insight.description);
    }
    state.retain_useful(&chosen)?;
    println!("Retained {} insight(s).", chosen.len());
    Ok(())
}

pub fn cmd_discard(state: &mut AppState, indexes: &[usize]) -> Result<()> {
    let last = state.last_generated()?;
    if last.is_empty() {
        bail!("No insights generated yet. Run 'generate' or 'pair' first.");
    }

    let chosen = select(&last, indexes);
    if chosen.is_empty() {
        bail!("No valid indexes (listing has {} insights).", last.len());
    }

    for insight in &chosen {
        state.store.add_blocked_key(insight.key.clone());
        println!("Discarded insight: {}", insight.description);
    }
    state.persist_blocked()?;
    println!("Blocked {} key(s); they will not be generated again.", chosen.len());
    Ok(())
}

pub fn cmd_saved(state: &AppState) -> Result<()> {
    let saved = state.store.useful();
    if saved.is_empty() {
        println!("No saved insights.");
        return Ok(());
    }
    for (i, insight) in saved.iter().enumerate() {
        println!("{}) {} (score={})", i, insight.description, insight.score);
    }
    Ok(())
}

pub fn cmd_blocked(state: &AppState) -> Result<()> {
    let blocked = state.store.blocked_keys();
    if blocked.is_empty() {
        println!("No blocked keys.");
        return Ok(());
    }
    for key in blocked {
        println!("{}", key);
    }
    Ok(())
}

pub fn cmd_unblock(state: &mut AppState, key: &str) -> Result<()> {
    if !state.store.remove_blocked_key(key) {
        bail!("Key is not blocked: {}", key);
    }
    state.persist_blocked()?;
    println!("Unblocked: {}", key);
    Ok(())
}

fn print_listing(insights: &[Insight]) {
    println!("Generated {} insights.", insights.len());
    for (i, insight) in insights.iter().enumerate() {
        println!("{}) [Score {}] {}", i, insight.score, insight.description);
    }
}

/// Pick the listed insights by index, ignoring out-of-range entries
fn select(last: &[Insight], indexes: &[usize]) -> Vec<Insight> {
    let mut chosen = Vec::new();
    for &idx in indexes {
        match last.get(idx) {
            Some(insight) => chosen.push(insight.clone()),
            None => println!("Ignoring invalid index: {}", idx),
        }
    }
    chosen
}
