//! SQL for the train search.
//!
//! The search joins trains to their availability records and narrows the
//! result with a list of equality predicates. The class predicate is only
//! present when the caller asked for a specific class. Every value goes
//! through `push_bind`, so user input never reaches the SQL text.

use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder};

use crate::domain::SearchCriteria;

const SELECT_TRAINS: &str = "SELECT t.train_no, t.train_name, t.departure_time, t.arrival_time, \
     t.duration, a.class_type, a.status \
     FROM trains t \
     JOIN availability a ON t.train_no = a.train_no";

const ORDER_TRAINS: &str = " ORDER BY t.departure_time, t.train_no, a.class_type";

/// Distinct station names from both ends of every train, byte-ordered.
pub const SELECT_STATIONS: &str = "SELECT station FROM (\
     SELECT from_station AS station FROM trains \
     UNION \
     SELECT to_station FROM trains\
     ) stations \
     ORDER BY station COLLATE \"C\"";

pub const INSERT_BOOKING: &str = "INSERT INTO bookings \
     (user_name, user_email, user_phone, train_no, journey_date, class_type) \
     VALUES ($1, $2, $3, $4, $5, $6) \
     RETURNING booking_id";

/// One `column = $n` condition of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'a> {
    Origin(&'a str),
    Destination(&'a str),
    JourneyDate(NaiveDate),
    ClassType(&'a str),
}

impl<'a> Predicate<'a> {
    /// Qualified column this predicate constrains.
    pub fn column(&self) -> &'static str {
        match self {
            Predicate::Origin(_) => "t.from_station",
            Predicate::Destination(_) => "t.to_station",
            Predicate::JourneyDate(_) => "a.journey_date",
            Predicate::ClassType(_) => "a.class_type",
        }
    }

    fn push(&self, builder: &mut QueryBuilder<'a, Postgres>) {
        builder.push(self.column()).push(" = ");
        match *self {
            Predicate::Origin(v) | Predicate::Destination(v) | Predicate::ClassType(v) => {
                builder.push_bind(v);
            }
            Predicate::JourneyDate(d) => {
                builder.push_bind(d);
            }
        }
    }
}

/// A train search, ready to be turned into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainQuery<'a> {
    predicates: Vec<Predicate<'a>>,
}

impl<'a> TrainQuery<'a> {
    /// Select the predicates for a search.
    pub fn for_criteria(criteria: &'a SearchCriteria) -> Self {
        let mut predicates = vec![
            Predicate::Origin(&criteria.origin),
            Predicate::Destination(&criteria.destination),
            Predicate::JourneyDate(criteria.journey_date),
        ];
        if let Some(class) = criteria.class.class_type() {
            predicates.push(Predicate::ClassType(class));
        }

        Self { predicates }
    }

    #[cfg(test)]
    fn predicates(&self) -> &[Predicate<'a>] {
        &self.predicates
    }

    /// Assemble the parameterised query.
    pub fn build(&self) -> QueryBuilder<'a, Postgres> {
        let mut builder = QueryBuilder::new(SELECT_TRAINS);

        for (i, predicate) in self.predicates.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            predicate.push(&mut builder);
        }
        builder.push(ORDER_TRAINS);

        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClassFilter;

    fn criteria(origin: &str, class: ClassFilter) -> SearchCriteria {
        SearchCriteria::new(
            origin,
            "Delhi",
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            class,
        )
    }

    #[test]
    fn all_classes_has_no_class_predicate() {
        let c = criteria("Mumbai", ClassFilter::All);
        let query = TrainQuery::for_criteria(&c);

        assert_eq!(query.predicates().len(), 3);
        assert!(
            !query
                .predicates()
                .iter()
                .any(|p| matches!(p, Predicate::ClassType(_)))
        );

        let builder = query.build();
        let sql = builder.sql();
        assert!(sql.contains(
            "WHERE t.from_station = $1 AND t.to_station = $2 AND a.journey_date = $3 ORDER BY"
        ));
        assert!(!sql.contains("a.class_type ="));
        assert!(sql.contains("a.class_type, a.status"));
    }

    #[test]
    fn specific_class_adds_class_predicate() {
        let c = criteria("Mumbai", ClassFilter::Only("Sleeper".into()));
        let query = TrainQuery::for_criteria(&c);

        assert_eq!(
            query.predicates().last(),
            Some(&Predicate::ClassType("Sleeper"))
        );

        let builder = query.build();
        assert!(builder.sql().contains("AND a.class_type = $4 ORDER BY"));
    }

    #[test]
    fn values_are_bound_not_interpolated() {
        let hostile = "Mumbai'; DROP TABLE bookings; --";
        let c = criteria(hostile, ClassFilter::Only("3A' OR '1'='1".into()));
        let query = TrainQuery::for_criteria(&c);
        let builder = query.build();
        let sql = builder.sql();

        assert!(!sql.contains("Mumbai"));
        assert!(!sql.contains("DROP"));
        assert!(!sql.contains("3A"));
        assert!(!sql.contains("2024"));
        assert!(!sql.contains('\''));
    }

    #[test]
    fn join_is_on_train_number() {
        let c = criteria("Mumbai", ClassFilter::All);
        let builder = TrainQuery::for_criteria(&c).build();
        assert!(
            builder
                .sql()
                .contains("FROM trains t JOIN availability a ON t.train_no = a.train_no")
        );
    }

    #[test]
    fn static_statements_use_placeholders() {
        for n in 1..=6 {
            assert!(INSERT_BOOKING.contains(&format!("${n}")));
        }
        assert!(INSERT_BOOKING.ends_with("RETURNING booking_id"));
        assert!(SELECT_STATIONS.contains("UNION"));
    }
}
