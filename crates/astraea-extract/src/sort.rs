//! Sort-order parsing.
//!
//! A sort expression is a comma-separated list of field names; a leading
//! `-` selects descending order for that field (`"-age,name"`).

use serde::Serialize;
use std::fmt;

/// Sort direction for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// One sorted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    name: String,
    direction: Direction,
}

impl Order {
    /// Creates an order entry.
    #[must_use]
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

/// A parsed sort expression.
///
/// # Example
///
/// ```rust
/// use astraea_extract::{Direction, Sort};
///
/// let sort = Sort::parse(Some("-age,name"));
/// assert_eq!(sort.orders()[0].name(), "age");
/// assert_eq!(sort.orders()[0].direction(), Direction::Desc);
/// assert_eq!(sort.orders()[1].direction(), Direction::Asc);
///
/// assert!(Sort::parse(None).is_unsorted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    /// Returns the empty, unsorted value.
    #[must_use]
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Parses a sort expression. `None` and the empty string yield the
    /// unsorted value; empty segments are skipped.
    #[must_use]
    pub fn parse(expression: Option<&str>) -> Self {
        let Some(expression) = expression else {
            return Self::unsorted();
        };
        if expression.is_empty() {
            return Self::unsorted();
        }

        let orders = expression
            .split(',')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                segment.strip_prefix('-').map_or_else(
                    || Order::new(segment, Direction::Asc),
                    |name| Order::new(name, Direction::Desc),
                )
            })
            .collect();
        Self { orders }
    }

    /// Returns the order entries.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Returns true when no order was requested.
    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascending_field() {
        let sort = Sort::parse(Some("age"));
        let first = &sort.orders()[0];

        assert_eq!(first.name(), "age");
        assert_eq!(first.direction(), Direction::Asc);
    }

    #[test]
    fn test_descending_field() {
        let sort = Sort::parse(Some("-age"));
        let first = &sort.orders()[0];

        assert_eq!(first.name(), "age");
        assert_eq!(first.direction(), Direction::Desc);
    }

    #[test]
    fn test_multiple_fields() {
        let sort = Sort::parse(Some("-created_at,name,-score"));

        assert_eq!(sort.orders().len(), 3);
        assert_eq!(sort.orders()[0].direction(), Direction::Desc);
        assert_eq!(sort.orders()[1].direction(), Direction::Asc);
        assert_eq!(sort.orders()[2].name(), "score");
    }

    #[test]
    fn test_none_and_empty_are_unsorted() {
        assert_eq!(Sort::parse(None), Sort::unsorted());
        assert_eq!(Sort::parse(Some("")), Sort::unsorted());
        assert!(Sort::parse(None).is_unsorted());
    }

    #[test]
    fn test_empty_segments_are_skipped() {
        let sort = Sort::parse(Some("age,,name,"));

        assert_eq!(sort.orders().len(), 2);
        assert_eq!(sort.orders()[1].name(), "name");
    }

    #[test]
    fn test_serialization_uses_lowercase_direction() {
        let sort = Sort::parse(Some("-age"));
        let json = serde_json::to_value(&sort).unwrap();

        assert_eq!(json["orders"][0]["name"], "age");
        assert_eq!(json["orders"][0]["direction"], "desc");
    }
}
