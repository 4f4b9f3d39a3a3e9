use std::path::{Path, PathBuf};

use polars::prelude::*;
use thiserror::Error;

/// Raw CSV header names mapped to the vocabulary used throughout the crate.
/// Columns not listed here pass through unchanged.
pub const COLUMN_RENAMES: [(&str, &str); 21] = [
    ("summonerName", "summoner_name"),
    ("summonerLevel", "summoner_level"),
    ("rank", "rank"),
    ("wins", "wins"),
    ("losses", "losses"),
    ("winRate", "win_rate"),
    ("kills", "kills"),
    ("deaths", "deaths"),
    ("assists", "assists"),
    ("prefLane", "pref_role"),
    ("campsKilled", "camps_killed"),
    ("minionsKilled", "minions_killed"),
    ("goldEarned", "gold_earned"),
    ("turretTakedowns", "turret_takedowns"),
    ("visionScore", "vision_score"),
    ("dragonKills", "dragon_kills"),
    ("longestTimeSpentLiving", "longest_time_alive"),
    ("totalDamageDealt", "total_damage_dealt"),
    ("totalDamageTaken", "total_damage_taken"),
    ("gameDuration", "game_duration"),
    ("gameStart", "game_start"),
];

/// Sentinel role value for players without a declared position.
const ROLE_NONE: &str = "NONE";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read player stats from {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("missing expected columns: {columns:?}")]
    MissingColumns { columns: Vec<String> },
    #[error("data preparation failed: {0}")]
    Prepare(#[from] PolarsError),
}

/// Reads the raw player stats CSV and runs the cleaning pipeline on it.
pub fn load_player_stats(path: &Path) -> Result<DataFrame, DataError> {
    let raw = CsvReader::from_path(path)
        .and_then(|reader| reader.has_header(true).finish())
        .map_err(|source| DataError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    prepare(raw)
}

/// Cleaning pipeline: schema check, rename, drop all rows whose summoner name
/// is duplicated in the raw input, drop undeclared roles, derive KDA.
///
/// Duplicated names are removed wholesale rather than collapsed to one row;
/// ambiguous identities are treated as untrustworthy.
pub fn prepare(mut raw: DataFrame) -> Result<DataFrame, DataError> {
    let missing: Vec<String> = {
        let present = raw.get_column_names();
        COLUMN_RENAMES
            .iter()
            .filter(|(raw_name, _)| !present.iter().any(|name| name == raw_name))
            .map(|(raw_name, _)| (*raw_name).to_string())
            .collect()
    };

    if !missing.is_empty() {
        return Err(DataError::MissingColumns { columns: missing });
    }

    for (raw_name, target) in COLUMN_RENAMES {
        if raw_name != target {
            raw.rename(raw_name, target)?;
        }
    }

    let cleaned = raw
        .lazy()
        .filter(len().over([col("summoner_name")]).eq(lit(1)))
        .filter(col("pref_role").neq(lit(ROLE_NONE)))
        .with_column(
            ((col("kills") + col("assists")).cast(DataType::Float64)
                / when(col("deaths").eq(lit(0)))
                    .then(lit(1))
                    .otherwise(col("deaths"))
                    .cast(DataType::Float64))
            .alias("kda"),
        )
        .collect()?;

    Ok(cleaned)
}
