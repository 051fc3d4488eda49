use sqlx::{Postgres, QueryBuilder};

use crate::core::pagination::Pagination;
use crate::models::PersonFilter;

/// Columns selected for every person query, in `Person` field order
pub const PERSON_COLUMNS: &str = "id, name, surname, patronymic, age, gender, nationality, \
                                  nationality_probability, created_at, updated_at";

/// Filterable columns of the `people` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Surname,
    Patronymic,
    Gender,
    Nationality,
    Age,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Surname => "surname",
            Column::Patronymic => "patronymic",
            Column::Gender => "gender",
            Column::Nationality => "nationality",
            Column::Age => "age",
        }
    }
}

/// A single typed condition of the list query
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive substring match; `pattern` is already an escaped ILIKE pattern
    Contains { column: Column, pattern: String },
    Equals { column: Column, value: String },
    AtLeast { column: Column, value: i32 },
    AtMost { column: Column, value: i32 },
}

impl Predicate {
    pub fn column(&self) -> Column {
        match self {
            Predicate::Contains { column, .. }
            | Predicate::Equals { column, .. }
            | Predicate::AtLeast { column, .. }
            | Predicate::AtMost { column, .. } => *column,
        }
    }

    fn operator(&self) -> &'static str {
        match self {
            Predicate::Contains { .. } => " ILIKE ",
            Predicate::Equals { .. } => " = ",
            Predicate::AtLeast { .. } => " >= ",
            Predicate::AtMost { .. } => " <= ",
        }
    }
}

/// Translate a filter into its AND-ed predicates.
///
/// The order is fixed (name, surname, patronymic, gender, age lower bound, age
/// upper bound, nationality) so equal filters always render the same SQL.
pub fn predicates(filter: &PersonFilter) -> Vec<Predicate> {
    let mut predicates = Vec::new();

    let substrings = [
        (Column::Name, &filter.name),
        (Column::Surname, &filter.surname),
        (Column::Patronymic, &filter.patronymic),
    ];
    for (column, value) in substrings {
        if let Some(value) = value {
            predicates.push(Predicate::Contains {
                column,
                pattern: contains_pattern(value),
            });
        }
    }

    if let Some(gender) = &filter.gender {
        predicates.push(Predicate::Equals {
            column: Column::Gender,
            value: gender.clone(),
        });
    }
    if let Some(age_from) = filter.age_from {
        predicates.push(Predicate::AtLeast {
            column: Column::Age,
            value: age_from,
        });
    }
    if let Some(age_to) = filter.age_to {
        predicates.push(Predicate::AtMost {
            column: Column::Age,
            value: age_to,
        });
    }
    if let Some(nationality) = &filter.nationality {
        predicates.push(Predicate::Equals {
            column: Column::Nationality,
            value: nationality.clone(),
        });
    }

    predicates
}

/// ILIKE pattern matching `value` anywhere, with LIKE wildcards in `value` escaped
pub fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Append the WHERE clause for `predicates`, binding one argument per predicate.
///
/// Both the count and the page query go through here so `total` always describes
/// the same row set the page is cut from.
pub fn push_where(builder: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        builder
            .push(if i == 0 { " WHERE " } else { " AND " })
            .push(predicate.column().as_str())
            .push(predicate.operator());

        match predicate {
            Predicate::Contains { pattern, .. } => builder.push_bind(pattern.clone()),
            Predicate::Equals { value, .. } => builder.push_bind(value.clone()),
            Predicate::AtLeast { value, .. } | Predicate::AtMost { value, .. } => {
                builder.push_bind(*value)
            }
        };
    }
}

/// `SELECT COUNT(*)` over the rows matching `predicates`
pub fn count_query(predicates: &[Predicate]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM people");
    push_where(&mut builder, predicates);
    builder
}

/// One page of matching rows, newest (highest id) first
pub fn page_query(predicates: &[Predicate], pagination: Pagination) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {PERSON_COLUMNS} FROM people"));
    push_where(&mut builder, predicates);
    builder
        .push(" ORDER BY id DESC LIMIT ")
        .push_bind(pagination.limit())
        .push(" OFFSET ")
        .push_bind(pagination.offset());
    builder
}
