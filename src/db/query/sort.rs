//! Post ordering
//!
//! Every search is ordered by the requested field and then by post id
//! descending, so posts that tie on the primary key keep a stable order
//! between pages.

use super::predicate::Column;
use crate::models::{SearchRequest, SortField};
use sqlx::{Database, QueryBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// One `column direction` entry of an ORDER BY list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm {
    pub column: Column,
    pub direction: SortDirection,
}

impl OrderTerm {
    pub fn new(column: Column, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

/// Primary sort key followed by the id tiebreaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostOrder {
    primary: OrderTerm,
    tiebreaker: OrderTerm,
}

impl Default for PostOrder {
    fn default() -> Self {
        Self::from_request(&SearchRequest::default())
    }
}

impl PostOrder {
    pub fn from_request(request: &SearchRequest) -> Self {
        let column = match request.sort {
            SortField::View => Column::PostViewCount,
            SortField::Like => Column::PostLikeCount,
            SortField::CreatedAt => Column::PostCreatedAt,
            SortField::UpdatedAt => Column::PostUpdatedAt,
        };
        let direction = if request.ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };

        Self {
            primary: OrderTerm::new(column, direction),
            tiebreaker: OrderTerm::new(Column::PostId, SortDirection::Desc),
        }
    }

    pub fn terms(&self) -> [OrderTerm; 2] {
        [self.primary, self.tiebreaker]
    }

    pub fn write_order_by<DB: Database>(&self, builder: &mut QueryBuilder<'_, DB>) {
        builder.push(" ORDER BY ");
        let mut terms = builder.separated(", ");
        for term in self.terms() {
            terms.push(format_args!("{} {}", term.column.qualified(), term.direction.as_sql()));
        }
    }
}
