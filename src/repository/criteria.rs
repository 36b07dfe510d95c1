//! Composable lookup predicates compiled into SQL WHERE clauses

use sqlx::{Postgres, QueryBuilder};

/// A single equality predicate on a catalog column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// `name` column, present on both `author` and `book`
    NameEquals(String),
}

impl Criterion {
    fn column(&self, alias: &str) -> String {
        match self {
            Criterion::NameEquals(_) => format!("{}.name", alias),
        }
    }

    fn value(&self) -> &str {
        match self {
            Criterion::NameEquals(v) => v,
        }
    }
}

/// Conjunction of predicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    criteria: Vec<Criterion>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Append ` WHERE a AND b ...` with bound values; no-op when empty
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>, alias: &str) {
        if self.criteria.is_empty() {
            return;
        }

        builder.push(" WHERE ");
        let mut separated = builder.separated(" AND ");
        for criterion in &self.criteria {
            separated.push(format!("{} = ", criterion.column(alias)));
            separated.push_bind_unseparated(criterion.value().to_string());
        }
    }
}

impl From<Criterion> for Criteria {
    fn from(criterion: Criterion) -> Self {
        Criteria::new().and(criterion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(criteria: &Criteria, alias: &str) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM author a");
        criteria.push_where(&mut builder, alias);
        builder.sql().to_string()
    }

    #[test]
    fn test_empty_criteria_adds_nothing() {
        assert_eq!(compile(&Criteria::new(), "a"), "SELECT * FROM author a");
    }

    #[test]
    fn test_single_criterion() {
        let criteria = Criteria::from(Criterion::NameEquals("Александр".into()));
        assert_eq!(compile(&criteria, "a"), "SELECT * FROM author a WHERE a.name = $1");
    }

    #[test]
    fn test_conjunction() {
        let criteria = Criteria::new()
            .and(Criterion::NameEquals("Александр".into()))
            .and(Criterion::NameEquals("Лев".into()));
        assert_eq!(
            compile(&criteria, "a"),
            "SELECT * FROM author a WHERE a.name = $1 AND a.name = $2"
        );
    }

    #[test]
    fn test_column_follows_alias() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM book b");
        Criteria::from(Criterion::NameEquals("Хамелеон".into())).push_where(&mut builder, "b");
        assert_eq!(builder.sql(), "SELECT * FROM book b WHERE b.name = $1");
    }
}
