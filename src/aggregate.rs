use std::collections::HashMap;

use polars::prelude::*;

use crate::filters;

/// Ranked ladder, lowest tier first.
pub const RANK_ORDER: [&str; 8] = [
    "IRON", "BRONZE", "SILVER", "GOLD", "PLATINUM", "EMERALD", "DIAMOND", "MASTER",
];

/// Per-group mean of a numeric column, groups sorted by name.
pub fn group_mean(df: &DataFrame, by: &str, value: &str) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .group_by([col(by)])
        .agg([col(value).cast(DataType::Float64).mean().alias("mean")])
        .sort(by, SortOptions::default())
        .collect()
}

/// Per-group row count, groups sorted by name.
pub fn group_count(df: &DataFrame, by: &str) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .group_by([col(by)])
        .agg([len().alias("players")])
        .sort(by, SortOptions::default())
        .collect()
}

/// The n rows with the largest (or smallest) values of a column.
pub fn top_n(df: &DataFrame, by_column: &str, n: usize, descending: bool) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .sort(
            by_column,
            SortOptions {
                descending,
                nulls_last: true,
                ..Default::default()
            },
        )
        .limit(n.try_into().unwrap_or(u32::MAX))
        .collect()
}

/// Modal value of a categorical column; None on an empty table.
pub fn most_common(df: &DataFrame, column: &str) -> PolarsResult<Option<String>> {
    let counts = df
        .clone()
        .lazy()
        .group_by([col(column)])
        .agg([len().alias("count")])
        .sort(
            "count",
            SortOptions {
                descending: true,
                nulls_last: true,
                ..Default::default()
            },
        )
        .limit(1)
        .collect()?;

    if counts.height() == 0 {
        return Ok(None);
    }

    Ok(counts.column(column)?.str()?.get(0).map(str::to_string))
}

/// A copy of `df` ordered by the ranked ladder, unknown tiers last. The input
/// frame is left untouched; chart-local ordering must never leak into the
/// shared cached table.
pub fn sort_by_rank_order(df: &DataFrame, rank_col: &str) -> PolarsResult<DataFrame> {
    let idx: Vec<u32> = df
        .column(rank_col)?
        .str()?
        .into_iter()
        .map(|tier| {
            tier.and_then(ladder_position)
                .map(|pos| pos as u32)
                .unwrap_or(u32::MAX)
        })
        .collect();

    let mut keyed = df.clone();
    keyed.with_column(Series::new("__ladder_idx", idx))?;

    let sorted = keyed
        .lazy()
        .sort("__ladder_idx", SortOptions::default())
        .collect()?;
    sorted.drop("__ladder_idx")
}

fn ladder_position(tier: &str) -> Option<usize> {
    RANK_ORDER.iter().position(|candidate| *candidate == tier)
}

/// Wide table of per-cell means over two categorical columns (the heatmap
/// table), rows sorted by name and columns in ladder order. Assembled by hand
/// from the long group-by so no re-typed copy of the input is needed.
pub fn mean_matrix(
    df: &DataFrame,
    row_col: &str,
    col_col: &str,
    value: &str,
) -> PolarsResult<DataFrame> {
    let long = df
        .clone()
        .lazy()
        .group_by([col(row_col), col(col_col)])
        .agg([col(value).cast(DataType::Float64).mean().alias("mean")])
        .collect()?;

    let mut cells: HashMap<(String, String), f64> = HashMap::new();
    let row_values = long.column(row_col)?.str()?;
    let col_values = long.column(col_col)?.str()?;
    let means = long.column("mean")?.f64()?;
    for i in 0..long.height() {
        if let (Some(row), Some(column), Some(mean)) =
            (row_values.get(i), col_values.get(i), means.get(i))
        {
            cells.insert((row.to_string(), column.to_string()), mean);
        }
    }

    let mut row_labels = filters::distinct_values(df, row_col)?;
    row_labels.sort();

    let mut col_labels = filters::distinct_values(df, col_col)?;
    col_labels.sort_by_key(|tier| ladder_position(tier).unwrap_or(usize::MAX));

    let mut columns = vec![Series::new(row_col, row_labels.clone())];
    for tier in &col_labels {
        let values: Vec<Option<f64>> = row_labels
            .iter()
            .map(|row| cells.get(&(row.clone(), tier.clone())).copied())
            .collect();
        columns.push(Series::new(tier.as_str(), values));
    }

    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked_frame() -> DataFrame {
        df!(
            "summoner_name" => &["Ahri", "Brand", "Corki"],
            "pref_role" => &["MIDDLE", "SUPPORT", "MIDDLE"],
            "rank" => &["IRON", "GOLD", "GOLD"],
            "win_rate" => &[0.4f64, 0.6, 0.5],
        )
        .expect("ranked test frame")
    }

    fn column_strings(df: &DataFrame, column: &str) -> Vec<String> {
        df.column(column)
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn group_mean_averages_win_rate_per_rank() {
        let means = group_mean(&ranked_frame(), "rank", "win_rate").unwrap();

        assert_eq!(column_strings(&means, "rank"), vec!["GOLD", "IRON"]);
        let values = means.column("mean").unwrap().f64().unwrap();
        assert_eq!(values.get(0), Some(0.55));
        assert_eq!(values.get(1), Some(0.4));
    }

    #[test]
    fn group_count_counts_rows_per_role() {
        let counts = group_count(&ranked_frame(), "pref_role").unwrap();

        assert_eq!(column_strings(&counts, "pref_role"), vec!["MIDDLE", "SUPPORT"]);
        let players = counts.column("players").unwrap().u32().unwrap();
        assert_eq!(players.get(0), Some(2));
        assert_eq!(players.get(1), Some(1));
    }

    #[test]
    fn aggregations_are_total_on_empty_input() {
        let empty = ranked_frame().head(Some(0));

        assert_eq!(group_mean(&empty, "rank", "win_rate").unwrap().height(), 0);
        assert_eq!(group_count(&empty, "rank").unwrap().height(), 0);
        assert_eq!(top_n(&empty, "win_rate", 100, true).unwrap().height(), 0);
        assert_eq!(most_common(&empty, "rank").unwrap(), None);
    }

    #[test]
    fn top_n_takes_the_largest_values() {
        let top = top_n(&ranked_frame(), "win_rate", 2, true).unwrap();

        assert_eq!(column_strings(&top, "summoner_name"), vec!["Brand", "Corki"]);
    }

    #[test]
    fn most_common_returns_the_modal_value() {
        assert_eq!(
            most_common(&ranked_frame(), "rank").unwrap(),
            Some("GOLD".to_string())
        );
    }

    #[test]
    fn rank_sort_follows_the_ladder_and_copies() {
        let df = df!(
            "rank" => &["GOLD", "IRON", "MASTER", "BRONZE"],
            "mean" => &[0.5f64, 0.4, 0.6, 0.45],
        )
        .unwrap();

        let sorted = sort_by_rank_order(&df, "rank").unwrap();
        assert_eq!(
            column_strings(&sorted, "rank"),
            vec!["IRON", "BRONZE", "GOLD", "MASTER"]
        );

        // The input frame keeps its original order.
        assert_eq!(
            column_strings(&df, "rank"),
            vec!["GOLD", "IRON", "MASTER", "BRONZE"]
        );
        assert!(!df.get_column_names().contains(&"__ladder_idx"));
    }

    #[test]
    fn mean_matrix_orders_columns_by_ladder() {
        let df = df!(
            "pref_role" => &["MIDDLE", "MIDDLE", "SUPPORT"],
            "rank" => &["GOLD", "IRON", "GOLD"],
            "total_damage_dealt" => &[100_000i64, 80_000, 40_000],
        )
        .unwrap();

        let matrix = mean_matrix(&df, "pref_role", "rank", "total_damage_dealt").unwrap();

        assert_eq!(matrix.get_column_names(), vec!["pref_role", "IRON", "GOLD"]);
        assert_eq!(column_strings(&matrix, "pref_role"), vec!["MIDDLE", "SUPPORT"]);

        let iron = matrix.column("IRON").unwrap().f64().unwrap();
        assert_eq!(iron.get(0), Some(80_000.0));
        assert_eq!(iron.get(1), None);

        let gold = matrix.column("GOLD").unwrap().f64().unwrap();
        assert_eq!(gold.get(0), Some(100_000.0));
        assert_eq!(gold.get(1), Some(40_000.0));
    }
}
