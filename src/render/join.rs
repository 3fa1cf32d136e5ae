//! Keyless data join: datum `i` is bound to element `i`.

use std::ops::Range;

/// Index plan for reconciling `existing` elements with `incoming` data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Join {
    /// Elements that survive and are re-bound to new data.
    pub update: Range<usize>,
    /// Data indices that need a new element.
    pub enter: Range<usize>,
    /// Trailing elements with no datum left.
    pub exit: Range<usize>,
}

impl Join {
    pub fn enter_count(&self) -> usize {
        self.enter.len()
    }

    pub fn exit_count(&self) -> usize {
        self.exit.len()
    }
}

pub fn reconcile(existing: usize, incoming: usize) -> Join {
    let shared = existing.min(incoming);
    Join {
        update: 0..shared,
        enter: shared..incoming,
        exit: shared..existing,
    }
}

/// Apply a keyless join to `elements`: drop the exit tail, build entering
/// elements with `enter`, then run `update` over every element bound to data
/// (surviving and entering alike).
pub fn join_marks<T, M>(
    elements: &mut Vec<M>,
    data: &[T],
    mut enter: impl FnMut(&T) -> M,
    mut update: impl FnMut(&mut M, &T),
) -> Join {
    let plan = reconcile(elements.len(), data.len());

    elements.truncate(plan.update.end);
    elements.extend(data[plan.enter.clone()].iter().map(&mut enter));
    for (element, datum) in elements.iter_mut().zip(data) {
        update(element, datum);
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growing() {
        assert_eq!(
            reconcile(2, 5),
            Join {
                update: 0..2,
                enter: 2..5,
                exit: 2..2
            }
        );
    }

    #[test]
    fn shrinking_exits_the_tail() {
        let plan = reconcile(7, 3);
        assert_eq!(plan.update, 0..3);
        assert_eq!(plan.enter_count(), 0);
        assert_eq!(plan.exit, 3..7);
        assert_eq!(plan.exit_count(), 4);
    }

    #[test]
    fn join_keeps_enter_only_attributes() {
        // (value, created_generation)
        let mut elems: Vec<(i32, u8)> = Vec::new();
        join_marks(&mut elems, &[1, 2], |v| (*v, 0), |e, v| e.0 = *v);
        assert_eq!(elems, vec![(1, 0), (2, 0)]);

        let plan = join_marks(&mut elems, &[10, 20, 30], |v| (*v, 1), |e, v| e.0 = *v);
        assert_eq!(plan.enter_count(), 1);
        assert_eq!(elems, vec![(10, 0), (20, 0), (30, 1)]);

        let plan = join_marks(&mut elems, &[7], |v| (*v, 2), |e, v| e.0 = *v);
        assert_eq!(plan.exit_count(), 2);
        assert_eq!(elems, vec![(7, 0)]);
    }
}
