//! Optimistic mutations of a local state.
//!
//! A [`Mutation`] is applied to the local state before the backend confirms
//! it. If the confirming request fails, exactly the inverse [`Mutation`]
//! returned by [`Mutation::apply()`] is applied, restoring the state.

use std::{error::Error, fmt, future::Future};

/// Mutation of a local state `S` which can be reverted.
pub trait Mutation<S: ?Sized> {
    /// [`Mutation`] reverting this one.
    type Inverse: Mutation<S>;

    /// Applies this [`Mutation`] to the `state`, returning its inverse.
    fn apply(self, state: &mut S) -> Self::Inverse;
}

/// Outcome of a confirmed optimistic [`Mutation`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Committed<T>(pub T);

/// Outcome of a rejected optimistic [`Mutation`] which has been reverted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RolledBack<E>(pub E);

impl<E: fmt::Display> fmt::Display for RolledBack<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "change rolled back: {}", self.0)
    }
}

impl<E: Error + 'static> Error for RolledBack<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

/// Applies the `mutation` to the `state` and awaits the `request` confirming
/// it.
///
/// # Errors
///
/// If the `request` fails, in which case the `state` is restored by applying
/// the inverse of the `mutation`.
pub async fn attempt<S, M, F, T, E>(
    state: &mut S,
    mutation: M,
    request: F,
) -> Result<Committed<T>, RolledBack<E>>
where
    S: ?Sized,
    M: Mutation<S>,
    F: Future<Output = Result<T, E>>,
{
    let inverse = mutation.apply(state);
    match request.await {
        Ok(ok) => Ok(Committed(ok)),
        Err(e) => {
            _ = inverse.apply(state);
            Err(RolledBack(e))
        }
    }
}

/// Moves an element of a list from one position to another.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Move {
    /// Position to take the element from.
    pub from: usize,

    /// Position to put the element at.
    pub to: usize,
}

impl<T> Mutation<[T]> for Move {
    type Inverse = Self;

    fn apply(self, list: &mut [T]) -> Self::Inverse {
        let Self { from, to } = self;
        if from < to {
            list[from..=to].rotate_left(1);
        } else if to < from {
            list[to..=from].rotate_right(1);
        }
        Self { from: to, to: from }
    }
}

impl<T> Mutation<Vec<T>> for Move {
    type Inverse = Self;

    fn apply(self, list: &mut Vec<T>) -> Self::Inverse {
        Mutation::<[T]>::apply(self, list.as_mut_slice())
    }
}

/// Replaces a value with another one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Replace<T>(pub T);

impl<T> Mutation<T> for Replace<T> {
    type Inverse = Self;

    fn apply(self, state: &mut T) -> Self::Inverse {
        Self(std::mem::replace(state, self.0))
    }
}

#[cfg(test)]
mod spec {
    use futures::executor::block_on;

    use super::{attempt, Committed, Move, Mutation as _, Replace, RolledBack};

    #[test]
    fn moves_forward_and_back() {
        let mut list = vec!['a', 'b', 'c', 'd'];

        let inverse = Move { from: 0, to: 2 }.apply(&mut list);
        assert_eq!(list, ['b', 'c', 'a', 'd']);

        _ = inverse.apply(&mut list);
        assert_eq!(list, ['a', 'b', 'c', 'd']);

        let inverse = Move { from: 3, to: 1 }.apply(&mut list);
        assert_eq!(list, ['a', 'd', 'b', 'c']);
        _ = inverse.apply(&mut list);
        assert_eq!(list, ['a', 'b', 'c', 'd']);
    }

    #[test]
    fn keeps_confirmed_mutation() {
        let mut active = false;

        let res = block_on(attempt(
            &mut active,
            Replace(true),
            async { Ok::<_, &str>(42) },
        ));

        assert_eq!(res, Ok(Committed(42)));
        assert!(active);
    }

    #[test]
    fn rolls_back_rejected_mutation() {
        let mut list = vec![1, 2, 3];

        let res = block_on(attempt(
            &mut list,
            Move { from: 2, to: 0 },
            async { Err::<(), _>("backend unavailable") },
        ));

        assert_eq!(res, Err(RolledBack("backend unavailable")));
        assert_eq!(list, [1, 2, 3]);
    }
}
