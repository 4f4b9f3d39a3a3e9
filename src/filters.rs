use polars::prelude::*;

/// Role and rank values admitted by the current view. Defaults to every value
/// present in the cleaned table, mirroring the dashboard's multi-selects.
#[derive(Debug, Clone)]
pub struct Selection {
    pub roles: Vec<String>,
    pub ranks: Vec<String>,
}

impl Selection {
    /// Selection covering all role and rank values in the table.
    pub fn all(df: &DataFrame) -> PolarsResult<Self> {
        Ok(Self {
            roles: distinct_values(df, "pref_role")?,
            ranks: distinct_values(df, "rank")?,
        })
    }

    /// Builds a selection from optional comma-separated CLI lists, falling
    /// back to all present values where a list is not given.
    pub fn from_args(
        df: &DataFrame,
        roles: Option<&str>,
        ranks: Option<&str>,
    ) -> PolarsResult<Self> {
        let defaults = Self::all(df)?;
        Ok(Self {
            roles: roles.map(parse_list).unwrap_or(defaults.roles),
            ranks: ranks.map(parse_list).unwrap_or(defaults.ranks),
        })
    }

    /// Intersects the table against both value sets. An empty set yields an
    /// empty table, not an error.
    pub fn apply(&self, df: &DataFrame) -> PolarsResult<DataFrame> {
        let roles = Series::new("roles_filter", self.roles.clone());
        let ranks = Series::new("ranks_filter", self.ranks.clone());

        df.clone()
            .lazy()
            .filter(col("pref_role").is_in(lit(roles)))
            .filter(col("rank").is_in(lit(ranks)))
            .collect()
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|value| value.trim().to_uppercase())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Distinct string values of a column.
pub fn distinct_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<String>> {
    let unique = df.column(column)?.unique()?;
    Ok(unique
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect())
}
