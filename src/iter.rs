//! Traversals of a [`MultiDimArray`].
//!
//! There are two orders:
//!
//! - Storage order visits the storage buffer sequentially. It is the
//!   cheapest, and the coordinate of each element is computed only on
//!   request.
//! - Coordinate order visits coordinates as nested loops over dimensions
//!   `0..R` would, incrementing the last dimension fastest. It does not
//!   depend on the storage order. See [`Odometer`].
//!
//! The two agree on which value is at which coordinate, but generally not on
//! the sequence. All traversals of an unresolved array fail with
//! [`Error::UnresolvedExtent`].
//!
//! [`Error::UnresolvedExtent`]: super::Error::UnresolvedExtent

use super::{Coord, Layout, MultiDimArray, Odometer, Result};

impl<T, const R: usize> MultiDimArray<T, R> {
    /// Iterates over the storage buffer in storage order. Empty if the array
    /// is unresolved.
    pub fn iter(&self) -> std::slice::Iter<'_, T> { self.as_slice().iter() }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> { self.as_mut_slice().iter_mut() }

    /// Calls `f(index, element)` for every element in storage order.
    pub fn each_indexed_mut(&mut self, mut f: impl FnMut(usize, &mut T)) -> Result<()> {
        self.resolved_layout()?;
        for (i, t) in self.iter_mut().enumerate() { f(i, t); }
        Ok(())
    }

    /// Calls `f(coord, index, element)` for every element in storage order.
    ///
    /// ```
    /// use multidim_array::{MultiDimArray, Order};
    /// let a = MultiDimArray::from_fn([2, 2], Order::column_major(), |[i, j]| 10 * i + j);
    /// let mut visited = Vec::new();
    /// a.each_with_coord(|coord, _, &x| visited.push((*coord, x)))?;
    /// assert_eq!(visited, [([0, 0], 0), ([1, 0], 10), ([0, 1], 1), ([1, 1], 11)]);
    /// # Ok::<(), multidim_array::Error>(())
    /// ```
    pub fn each_with_coord(&self, mut f: impl FnMut(&Coord<R>, usize, &T)) -> Result<()> {
        let layout = *self.resolved_layout()?;
        for (i, t) in self.iter().enumerate() { f(&layout.from_usize(i), i, t); }
        Ok(())
    }

    pub fn each_with_coord_mut(&mut self, mut f: impl FnMut(&Coord<R>, usize, &mut T)) -> Result<()> {
        let layout = *self.resolved_layout()?;
        for (i, t) in self.iter_mut().enumerate() { f(&layout.from_usize(i), i, t); }
        Ok(())
    }

    /// Calls `f(coord, index, count, element)` for every element in
    /// coordinate order. `index` is the storage offset of `coord` and `count`
    /// is the number of elements visited before this one.
    ///
    /// ```
    /// use multidim_array::{MultiDimArray, Order};
    /// let a = MultiDimArray::from_fn([2, 2], Order::column_major(), |[i, j]| 10 * i + j);
    /// let mut visited = Vec::new();
    /// a.each_by_coord(|_, index, count, &x| visited.push((index, count, x)))?;
    /// assert_eq!(visited, [(0, 0, 0), (2, 1, 1), (1, 2, 10), (3, 3, 11)]);
    /// # Ok::<(), multidim_array::Error>(())
    /// ```
    pub fn each_by_coord(&self, mut f: impl FnMut(&Coord<R>, usize, usize, &T)) -> Result<()> {
        let layout = *self.resolved_layout()?;
        let items = self.as_slice();
        for (count, coord) in layout.coords().enumerate() {
            let index = layout.to_usize(&coord);
            f(&coord, index, count, &items[index]);
        }
        Ok(())
    }

    pub fn each_by_coord_mut(&mut self, mut f: impl FnMut(&Coord<R>, usize, usize, &mut T)) -> Result<()> {
        let layout = *self.resolved_layout()?;
        let items = self.as_mut_slice();
        for (count, coord) in layout.coords().enumerate() {
            let index = layout.to_usize(&coord);
            f(&coord, index, count, &mut items[index]);
        }
        Ok(())
    }

    /// Iterates over `(coord, element)` pairs in coordinate order.
    pub fn iter_by_coord(&self) -> Result<ByCoord<'_, T, R>> {
        let layout = *self.resolved_layout()?;
        Ok(ByCoord {items: self.as_slice(), layout, coords: layout.coords()})
    }
}

// ----------------------------------------------------------------------------

/// The return type of [`MultiDimArray::iter_by_coord()`].
#[derive(Debug, Clone)]
pub struct ByCoord<'a, T, const R: usize> {
    items: &'a [T],
    layout: Layout<R>,
    coords: Odometer<R>,
}

impl<'a, T, const R: usize> Iterator for ByCoord<'a, T, R> {
    type Item = (Coord<R>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let coord = self.coords.next()?;
        Some((coord, &self.items[self.layout.to_usize(&coord)]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.coords.size_hint() }
}

impl<'a, T, const R: usize> ExactSizeIterator for ByCoord<'a, T, R> {}

// ----------------------------------------------------------------------------
