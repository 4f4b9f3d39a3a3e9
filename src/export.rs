use std::fs;
use std::path::Path;

use anyhow::Result;
use csv::Writer;
use polars::prelude::*;
use serde::Serialize;

#[derive(Serialize)]
struct GroupSummaryRow {
    group: String,
    players: u32,
    mean_win_rate: Option<f64>,
    mean_kda: Option<f64>,
    mean_damage_dealt: Option<f64>,
    mean_vision_score: Option<f64>,
    mean_minions_killed: Option<f64>,
}

/// Writes per-role and per-rank summary CSVs to the output directory.
pub fn write_reports(df: &DataFrame, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    write_group_summary(df, "pref_role", &out_dir.join("summary_by_role.csv"))?;
    write_group_summary(df, "rank", &out_dir.join("summary_by_rank.csv"))?;

    Ok(())
}

fn write_group_summary(df: &DataFrame, by: &str, out_file: &Path) -> Result<()> {
    let mut writer = Writer::from_path(out_file)?;
    for row in group_summary_rows(df, by)? {
        writer.serialize(row)?;
    }
    writer.flush()?;

    eprintln!("Wrote {}", out_file.display());
    Ok(())
}

fn group_summary_rows(df: &DataFrame, by: &str) -> Result<Vec<GroupSummaryRow>> {
    let grouped = df
        .clone()
        .lazy()
        .group_by([col(by)])
        .agg([
            len().alias("players"),
            col("win_rate")
                .cast(DataType::Float64)
                .mean()
                .alias("mean_win_rate"),
            col("kda").cast(DataType::Float64).mean().alias("mean_kda"),
            col("total_damage_dealt")
                .cast(DataType::Float64)
                .mean()
                .alias("mean_damage_dealt"),
            col("vision_score")
                .cast(DataType::Float64)
                .mean()
                .alias("mean_vision_score"),
            col("minions_killed")
                .cast(DataType::Float64)
                .mean()
                .alias("mean_minions_killed"),
        ])
        .sort(by, SortOptions::default())
        .collect()?;

    let groups = grouped.column(by)?.str()?;
    let players = grouped.column("players")?.u32()?;
    let win_rates = grouped.column("mean_win_rate")?.f64()?;
    let kdas = grouped.column("mean_kda")?.f64()?;
    let damage = grouped.column("mean_damage_dealt")?.f64()?;
    let vision = grouped.column("mean_vision_score")?.f64()?;
    let minions = grouped.column("mean_minions_killed")?.f64()?;

    let mut rows = Vec::with_capacity(grouped.height());
    for i in 0..grouped.height() {
        rows.push(GroupSummaryRow {
            group: groups.get(i).unwrap_or("").to_string(),
            players: players.get(i).unwrap_or(0),
            mean_win_rate: win_rates.get(i),
            mean_kda: kdas.get(i),
            mean_damage_dealt: damage.get(i),
            mean_vision_score: vision.get(i),
            mean_minions_killed: minions.get(i),
        });
    }

    Ok(rows)
}
