//! Query strings for the REST dialect.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Query string parameters for a single table request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Columns and embedded relations to return.
    #[must_use]
    pub(crate) fn select(self, columns: &str) -> Self {
        self.push("select", columns.to_string())
    }

    #[must_use]
    pub(crate) fn eq(self, column: &str, value: impl Display) -> Self {
        self.push(column, format!("eq.{value}"))
    }

    #[must_use]
    pub(crate) fn in_list<V: Display>(
        self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values: Vec<String> = values.into_iter().map(|value| value.to_string()).collect();

        self.push(column, format!("in.({})", values.join(",")))
    }

    #[must_use]
    pub(crate) fn order(self, column: &str, direction: Direction) -> Self {
        self.push("order", format!("{column}.{}", direction.as_str()))
    }

    #[must_use]
    pub(crate) fn limit(self, limit: usize) -> Self {
        self.push("limit", limit.to_string())
    }

    pub(crate) fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    fn push(mut self, key: &str, value: String) -> Self {
        self.pairs.push((key.to_string(), value));
        self
    }
}
