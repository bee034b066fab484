//! Order arithmetic for a collection of `N` entities ranked `1..=N`.
//!
//! Everything here is pure: given the current size and positions it works
//! out which span of orders must shift and by how much. Applying the plan
//! against a store is the position manager's job.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Inclusive range of order values. `to: None` is unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpan {
    pub from: i64,
    pub to: Option<i64>,
}

impl OrderSpan {
    #[must_use]
    pub const fn between(from: i64, to: i64) -> Self {
        Self { from, to: Some(to) }
    }

    #[must_use]
    pub const fn starting_at(from: i64) -> Self {
        Self { from, to: None }
    }

    #[must_use]
    pub fn contains(&self, order: i64) -> bool {
        order >= self.from && self.to.map_or(true, |to| order <= to)
    }
}

/// Add `delta` to the order of every entity inside `span`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub span: OrderSpan,
    pub delta: i64,
}

/// Outcome of planning a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePlan {
    /// Target equals current order; nothing is written.
    Unchanged,
    /// Shift the entities between old and new slot, then place the
    /// moved entity at `target`.
    Relocate { shift: Shift, target: i64 },
}

/// How a new entity gets its order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPlan {
    /// Take `N + 1`.
    Append(i64),
    /// Take `N + 1`, then move to the requested slot.
    AppendThenMove { append: i64, target: i64 },
}

/// Order assigned to the next appended entity.
#[must_use]
pub const fn next_order(len: i64) -> i64 {
    len + 1
}

/// Plan moving the entity at `current` to `target` in a collection of `len`.
///
/// # Errors
///
/// [`DomainError::InvalidOrder`] if `target` is outside `1..=len`.
pub fn plan_move(current: i64, target: i64, len: i64) -> Result<MovePlan, DomainError> {
    if target < 1 || target > len {
        return Err(DomainError::InvalidOrder {
            requested: target,
            max: len,
        });
    }

    let plan = match target.cmp(&current) {
        std::cmp::Ordering::Equal => MovePlan::Unchanged,
        // Moving down the list: close the gap behind us.
        std::cmp::Ordering::Greater => MovePlan::Relocate {
            shift: Shift {
                span: OrderSpan::between(current + 1, target),
                delta: -1,
            },
            target,
        },
        std::cmp::Ordering::Less => MovePlan::Relocate {
            shift: Shift {
                span: OrderSpan::between(target, current - 1),
                delta: 1,
            },
            target,
        },
    };
    Ok(plan)
}

/// Compaction after removing the entity that held `removed`.
#[must_use]
pub const fn plan_delete(removed: i64) -> Shift {
    Shift {
        span: OrderSpan::starting_at(removed + 1),
        delta: -1,
    }
}

/// Plan an insert into a collection of `len`, optionally at an explicit slot.
///
/// # Errors
///
/// [`DomainError::InvalidOrder`] if `explicit` is outside `1..=len + 1`.
pub fn plan_insert(explicit: Option<i64>, len: i64) -> Result<InsertPlan, DomainError> {
    let append = next_order(len);
    match explicit {
        None => Ok(InsertPlan::Append(append)),
        Some(target) if target == append => Ok(InsertPlan::Append(append)),
        Some(target) if (1..append).contains(&target) => {
            Ok(InsertPlan::AppendThenMove { append, target })
        }
        Some(target) => Err(DomainError::InvalidOrder {
            requested: target,
            max: append,
        }),
    }
}

/// True when `orders` is exactly `{1, ..., N}` for `N` items.
#[must_use]
pub fn is_contiguous(orders: impl IntoIterator<Item = i64>) -> bool {
    let mut orders: Vec<i64> = orders.into_iter().collect();
    orders.sort_unstable();
    orders.iter().zip(1..).all(|(order, expected)| *order == expected)
}
