//! Parameterized statement assembly for the `songs` table.
//!
//! Column and operator names come from closed enums and are the only text
//! spliced into the SQL; every value is bound positionally (`$1`, `$2`, ...)
//! in exactly the order it was added.

use chrono::NaiveDate;
use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
  Id,
  GroupName,
  SongName,
  ReleaseDate,
  Text,
  Link,
  CreatedAt,
}

impl Column {
  pub const fn as_str(self) -> &'static str {
    match self {
      Column::Id => "id",
      Column::GroupName => "group_name",
      Column::SongName => "song_name",
      Column::ReleaseDate => "release_date",
      Column::Text => "text",
      Column::Link => "link",
      Column::CreatedAt => "created_at",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
  /// Exact match.
  Eq,
  /// Case-insensitive pattern match; the caller supplies the wildcards.
  ILike,
}

impl Operator {
  pub const fn as_str(self) -> &'static str {
    match self {
      Operator::Eq => "=",
      Operator::ILike => "ILIKE",
    }
  }
}

/// A bound argument together with its SQL type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
  Text(String),
  Date(NaiveDate),
  BigInt(i64),
  Uuid(Uuid),
}

impl SqlValue {
  /// `%value%`, for use with `Operator::ILike`.
  pub fn contains(value: &str) -> Self {
    SqlValue::Text(format!("%{value}%"))
  }
}

#[derive(Debug, Clone, PartialEq)]
struct Clause {
  column: Column,
  op: Operator,
  value: SqlValue,
}

/// Statement text plus its arguments in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
  pub sql: String,
  pub args: Vec<SqlValue>,
}

impl BuiltQuery {
  /// Hands the statement to diesel, one typed bind per argument.
  pub fn into_diesel(self) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
    let BuiltQuery { sql, args } = self;

    args.into_iter().fold(diesel::sql_query(sql).into_boxed(), |query, arg| match arg {
      SqlValue::Text(v) => query.bind::<sql_types::Text, _>(v),
      SqlValue::Date(v) => query.bind::<sql_types::Date, _>(v),
      SqlValue::BigInt(v) => query.bind::<sql_types::BigInt, _>(v),
      SqlValue::Uuid(v) => query.bind::<sql_types::Uuid, _>(v),
    })
  }
}

/// Incremental SELECT builder: base statement, AND-joined filters in call
/// order, optional ordering, then LIMIT/OFFSET.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
  base: &'static str,
  clauses: Vec<Clause>,
  order_by: Vec<Column>,
  limit: i64,
  offset: i64,
}

impl QueryBuilder {
  pub fn new(base: &'static str) -> Self {
    Self { base, clauses: Vec::new(), order_by: Vec::new(), limit: 0, offset: 0 }
  }

  pub fn add_filter(&mut self, column: Column, op: Operator, value: SqlValue) -> &mut Self {
    self.clauses.push(Clause { column, op, value });
    self
  }

  pub fn order_by(&mut self, column: Column) -> &mut Self {
    self.order_by.push(column);
    self
  }

  /// Values `<= 0` drop the corresponding clause. A zero limit therefore
  /// means an unbounded result set.
  pub fn set_pagination(&mut self, limit: i64, offset: i64) -> &mut Self {
    self.limit = limit;
    self.offset = offset;
    self
  }

  pub fn build(self) -> BuiltQuery {
    let mut sql = String::from(self.base);
    let mut args = Vec::with_capacity(self.clauses.len() + 2);

    if !self.clauses.is_empty() {
      let mut conditions = Vec::with_capacity(self.clauses.len());
      for clause in self.clauses {
        args.push(clause.value);
        conditions.push(format!("{} {} ${}", clause.column.as_str(), clause.op.as_str(), args.len()));
      }
      sql.push_str(" WHERE ");
      sql.push_str(&conditions.join(" AND "));
    }

    if !self.order_by.is_empty() {
      let columns: Vec<&str> = self.order_by.iter().map(|c| c.as_str()).collect();
      sql.push_str(" ORDER BY ");
      sql.push_str(&columns.join(", "));
    }

    if self.limit > 0 {
      args.push(SqlValue::BigInt(self.limit));
      sql.push_str(&format!(" LIMIT ${}", args.len()));
    }

    if self.offset > 0 {
      args.push(SqlValue::BigInt(self.offset));
      sql.push_str(&format!(" OFFSET ${}", args.len()));
    }

    BuiltQuery { sql, args }
  }
}

/// `UPDATE <table> SET a = $1, b = $2 WHERE key = $3`.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
  table: &'static str,
  assignments: Vec<(Column, SqlValue)>,
  key: Option<(Column, SqlValue)>,
}

impl UpdateBuilder {
  pub fn new(table: &'static str) -> Self {
    Self { table, assignments: Vec::new(), key: None }
  }

  pub fn set(&mut self, column: Column, value: SqlValue) -> &mut Self {
    self.assignments.push((column, value));
    self
  }

  pub fn where_eq(&mut self, column: Column, value: SqlValue) -> &mut Self {
    self.key = Some((column, value));
    self
  }

  pub fn is_empty(&self) -> bool {
    self.assignments.is_empty()
  }

  /// `None` when there is nothing to assign; an UPDATE without SET is not SQL.
  pub fn build(self) -> Option<BuiltQuery> {
    if self.assignments.is_empty() {
      return None;
    }

    let mut args = Vec::with_capacity(self.assignments.len() + 1);
    let mut sets = Vec::with_capacity(self.assignments.len());
    for (column, value) in self.assignments {
      args.push(value);
      sets.push(format!("{} = ${}", column.as_str(), args.len()));
    }

    let mut sql = format!("UPDATE {} SET {}", self.table, sets.join(", "));
    if let Some((column, value)) = self.key {
      args.push(value);
      sql.push_str(&format!(" WHERE {} = ${}", column.as_str(), args.len()));
    }

    Some(BuiltQuery { sql, args })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const BASE: &str = "SELECT id FROM songs";

  #[test]
  fn no_filters_means_no_where() {
    let built = QueryBuilder::new(BASE).build();
    assert_eq!(built.sql, BASE);
    assert!(built.args.is_empty());
  }

  #[test]
  fn filters_are_and_joined_in_call_order() {
    let mut qb = QueryBuilder::new(BASE);
    qb.add_filter(Column::SongName, Operator::ILike, SqlValue::contains("black"))
      .add_filter(Column::GroupName, Operator::ILike, SqlValue::contains("muse"));
    let built = qb.build();

    assert_eq!(built.sql, "SELECT id FROM songs WHERE song_name ILIKE $1 AND group_name ILIKE $2");
    assert_eq!(built.sql.matches("WHERE").count(), 1);
    assert_eq!(built.args, vec![SqlValue::Text("%black%".into()), SqlValue::Text("%muse%".into())]);
  }

  #[test]
  fn pagination_placeholders_follow_filter_values() {
    let date = NaiveDate::from_ymd_opt(2006, 7, 16).unwrap();
    let mut qb = QueryBuilder::new(BASE);
    qb.add_filter(Column::ReleaseDate, Operator::Eq, SqlValue::Date(date)).set_pagination(10, 20);
    let built = qb.build();

    assert_eq!(built.sql, "SELECT id FROM songs WHERE release_date = $1 LIMIT $2 OFFSET $3");
    assert_eq!(built.args, vec![SqlValue::Date(date), SqlValue::BigInt(10), SqlValue::BigInt(20)]);
  }

  #[test]
  fn non_positive_bounds_are_omitted() {
    let mut qb = QueryBuilder::new(BASE);
    qb.set_pagination(0, 0);
    assert_eq!(qb.build().sql, BASE);

    let mut qb = QueryBuilder::new(BASE);
    qb.set_pagination(10, 0);
    let built = qb.build();
    assert_eq!(built.sql, "SELECT id FROM songs LIMIT $1");
    assert_eq!(built.args, vec![SqlValue::BigInt(10)]);

    let mut qb = QueryBuilder::new(BASE);
    qb.set_pagination(-5, -50);
    assert_eq!(qb.build().sql, BASE);
  }

  #[test]
  fn ordering_sits_between_where_and_limit() {
    let mut qb = QueryBuilder::new(BASE);
    qb.add_filter(Column::GroupName, Operator::Eq, SqlValue::Text("Muse".into()))
      .order_by(Column::CreatedAt)
      .order_by(Column::Id)
      .set_pagination(5, 5);

    assert_eq!(
      qb.build().sql,
      "SELECT id FROM songs WHERE group_name = $1 ORDER BY created_at, id LIMIT $2 OFFSET $3"
    );
  }

  #[test]
  fn update_binds_key_last() {
    let id = Uuid::new_v4();
    let mut ub = UpdateBuilder::new("songs");
    ub.set(Column::Text, SqlValue::Text("new".into()))
      .set(Column::Link, SqlValue::Text(String::new()))
      .where_eq(Column::Id, SqlValue::Uuid(id));
    let built = ub.build().unwrap();

    assert_eq!(built.sql, "UPDATE songs SET text = $1, link = $2 WHERE id = $3");
    assert_eq!(
      built.args,
      vec![SqlValue::Text("new".into()), SqlValue::Text(String::new()), SqlValue::Uuid(id)]
    );
  }

  #[test]
  fn update_without_assignments_builds_nothing() {
    let mut ub = UpdateBuilder::new("songs");
    ub.where_eq(Column::Id, SqlValue::Uuid(Uuid::new_v4()));

    assert!(ub.is_empty());
    assert!(ub.build().is_none());
  }
}
