use anyhow::Result;
use chrono::{DateTime, Utc};
use polars::prelude::*;

use crate::aggregate;

fn format_ts_millis(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ts)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ts.to_string())
}

fn format_mean(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

fn format_percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}%", v * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Headline metrics for the current selection. An empty selection prints n/a
/// values rather than failing.
pub fn summary(df: &DataFrame) -> Result<()> {
    println!("== Player Summary ==");
    println!("Players: {}", df.height());
    println!(
        "Mean win rate: {}",
        format_percent(df.column("win_rate")?.mean())
    );
    println!("Mean KDA: {}", format_mean(df.column("kda")?.mean()));

    let starts = df.column("game_start")?.cast(&DataType::Int64)?;
    let starts = starts.i64()?;
    if let (Some(first), Some(last)) = (starts.min(), starts.max()) {
        println!(
            "Game starts: {} -> {}",
            format_ts_millis(first),
            format_ts_millis(last)
        );
    }

    Ok(())
}

pub fn winrate(df: &DataFrame, cohort: usize) -> Result<()> {
    println!("== Win Rate ==");

    let by_role = aggregate::group_mean(df, "pref_role", "win_rate")?;
    println!("Mean win rate by role:\n{}", by_role);

    // Ladder-ordered copy for display; the shared table is never re-typed.
    let by_rank = aggregate::group_mean(df, "rank", "win_rate")?;
    let by_rank = aggregate::sort_by_rank_order(&by_rank, "rank")?;
    println!("Mean win rate by rank:\n{}", by_rank);

    print_cohort(df, cohort, true)?;
    print_cohort(df, cohort, false)?;

    Ok(())
}

fn print_cohort(df: &DataFrame, cohort: usize, descending: bool) -> Result<()> {
    let slice = aggregate::top_n(df, "win_rate", cohort, descending)?;
    let label = if descending { "highest" } else { "lowest" };
    println!("Top {} - {} win rate:", cohort, label);
    println!(
        "  Most common rank: {}",
        aggregate::most_common(&slice, "rank")?.unwrap_or_else(|| "n/a".to_string())
    );
    println!(
        "  Most common role: {}",
        aggregate::most_common(&slice, "pref_role")?.unwrap_or_else(|| "n/a".to_string())
    );
    Ok(())
}

pub fn distribution(df: &DataFrame) -> Result<()> {
    println!("== Player Distribution ==");
    println!("Players by rank:\n{}", aggregate::group_count(df, "rank")?);
    println!(
        "Players by role:\n{}",
        aggregate::group_count(df, "pref_role")?
    );
    Ok(())
}

pub fn damage(df: &DataFrame) -> Result<()> {
    println!("== Damage ==");
    println!(
        "Mean total damage dealt by role:\n{}",
        aggregate::group_mean(df, "pref_role", "total_damage_dealt")?
    );
    println!(
        "Mean damage by role and rank:\n{}",
        aggregate::mean_matrix(df, "pref_role", "rank", "total_damage_dealt")?
    );
    Ok(())
}

pub fn vision(df: &DataFrame) -> Result<()> {
    println!("== Vision ==");
    println!(
        "Mean vision score by role:\n{}",
        aggregate::group_mean(df, "pref_role", "vision_score")?
    );
    println!(
        "Mean vision score by rank:\n{}",
        aggregate::group_mean(df, "rank", "vision_score")?
    );
    Ok(())
}

pub fn farm(df: &DataFrame) -> Result<()> {
    println!("== Farm ==");
    println!(
        "Mean minions killed by role:\n{}",
        aggregate::group_mean(df, "pref_role", "minions_killed")?
    );
    println!(
        "Mean minions killed by rank:\n{}",
        aggregate::group_mean(df, "rank", "minions_killed")?
    );
    Ok(())
}
