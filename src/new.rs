//! Tree-shaped literals for initialising arrays.

use super::{Coord, Error, Result};

/// A literal value for an array of rank `R`: `R` levels of [`Nested::List`]
/// around [`Nested::Leaf`] values.
///
/// Usually written with the [`nested!`] macro.
///
/// [`nested!`]: crate::nested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nested<T> {
    Leaf(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Applies `f` to every leaf, keeping the tree structure.
    ///
    /// ```
    /// use multidim_array::{nested, MaskCell};
    /// let mask = nested!([[1, 0], [0, 1]]).map(MaskCell::from);
    /// ```
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Nested<U> {
        self.map_inner(&mut f)
    }

    fn map_inner<U>(self, f: &mut impl FnMut(T) -> U) -> Nested<U> {
        match self {
            Self::Leaf(t) => Nested::Leaf(f(t)),
            Self::List(items) => Nested::List(items.into_iter().map(|n| n.map_inner(f)).collect()),
        }
    }

    /// Returns the length of the lists at each level, checking that `self`
    /// has depth `R` and is not ragged.
    ///
    /// ```
    /// use multidim_array::{nested, Error};
    /// assert_eq!(nested!([[1, 2, 3], [4, 5, 6]]).shape::<2>(), Ok([2, 3]));
    /// assert_eq!(
    ///     nested!([[1, 2, 3], [4, 5]]).shape::<2>(),
    ///     Err(Error::LiteralShape {dim: 1, expected: 3, got: 2}),
    /// );
    /// ```
    pub fn shape<const R: usize>(&self) -> Result<[usize; R]> {
        // The first path from the root fixes the expected lengths.
        let mut shape = [0; R];
        let mut node = self;
        for level in 0..R {
            match node {
                Self::Leaf(_) => return Err(Error::LiteralDepth {expected: R, got: level}),
                Self::List(items) => {
                    shape[level] = items.len();
                    match items.first() {
                        Some(first) => { node = first; },
                        // Deeper levels have length 0 on every path.
                        None => break,
                    }
                },
            }
        }
        // Every other path must agree.
        let mut stack = vec![(self, 0)];
        while let Some((node, level)) = stack.pop() {
            match node {
                Self::Leaf(_) if level == R => {},
                Self::Leaf(_) => return Err(Error::LiteralDepth {expected: R, got: level}),
                Self::List(_) if level == R => return Err(Error::LiteralDepth {expected: R, got: R + 1}),
                Self::List(items) => {
                    if items.len() != shape[level] {
                        return Err(Error::LiteralShape {dim: level, expected: shape[level], got: items.len()});
                    }
                    stack.extend(items.iter().map(|n| (n, level + 1)));
                },
            }
        }
        Ok(shape)
    }

    /// Calls `f` for every leaf with its coordinate, in nested-loop order.
    ///
    /// `self` must already have passed [`Self::shape()`] for the same `R`.
    pub(crate) fn for_each_leaf<const R: usize>(self, mut f: impl FnMut(&Coord<R>, T)) {
        let mut coord = [0; R];
        let mut stack = match self {
            Self::Leaf(t) => { f(&coord, t); return; },
            Self::List(items) => vec![items.into_iter()],
        };
        while !stack.is_empty() {
            let level = stack.len() - 1;
            let next = stack[level].next();
            match next {
                None => {
                    stack.pop();
                    if let Some(parent) = level.checked_sub(1) { coord[parent] += 1; }
                },
                Some(Self::Leaf(t)) => {
                    f(&coord, t);
                    coord[level] += 1;
                },
                Some(Self::List(inner)) => {
                    if let Some(c) = coord.get_mut(level + 1) { *c = 0; }
                    stack.push(inner.into_iter());
                },
            }
        }
    }
}

impl<T> From<Vec<Nested<T>>> for Nested<T> {
    fn from(items: Vec<Nested<T>>) -> Self { Self::List(items) }
}

/// Builds a [`Nested`] literal from bracketed lists.
///
/// Each leaf must be a single token tree, so wrap compound expressions such
/// as `-1` in parentheses.
///
/// ```
/// use multidim_array::{nested, Nested};
/// let n: Nested<i32> = nested!([[1, 2], [3, (-4)]]);
/// assert_eq!(n, Nested::List(vec![
///     Nested::List(vec![Nested::Leaf(1), Nested::Leaf(2)]),
///     Nested::List(vec![Nested::Leaf(3), Nested::Leaf(-4)]),
/// ]));
/// ```
#[macro_export]
macro_rules! nested {
    ([$($item:tt),* $(,)?]) => {
        $crate::Nested::List(::std::vec![$($crate::nested!($item)),*])
    };
    ($leaf:expr) => {
        $crate::Nested::Leaf($leaf)
    };
}

// ----------------------------------------------------------------------------
