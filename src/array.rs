use tracing::{debug, warn};

use super::{index, Coord, Extent, Order, Layout, Nested, Error, Result};

/// How [`MultiDimArray::resize()`] fills the resized storage buffer.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Grow or shrink the flat buffer in place. Existing offsets keep their
    /// old values even if they now belong to a different coordinate. New
    /// slots hold `T::default()`.
    ///
    /// Use this when the data is about to be overwritten anyway.
    PreserveOldData,

    /// Move every value to the same coordinate in the new layout, dropping
    /// values whose coordinate no longer exists. New slots hold
    /// `T::default()`.
    #[default]
    CoordinationCopy,

    /// Discard the old contents. Every slot holds `T::default()`.
    Uninitialized,

    /// Discard the old contents and reset every slot to `T::default()`.
    InitialValue,
}

// ----------------------------------------------------------------------------

/// A dense array of `T`s with `R` dimensions and a configurable storage
/// order.
///
/// Each dimension is declared either with a fixed size or as
/// [`Extent::Dynamic`]. Until every dimension has a size the array has no
/// storage, and operations that need a [`Layout`] return
/// [`Error::UnresolvedExtent`].
///
/// Cloning performs a deep copy.
///
/// ```
/// use multidim_array::{nested, Extent, MultiDimArray};
/// let a: MultiDimArray<i32, 2> = MultiDimArray::from_nested(Extent::dynamic(), nested!([[1, 2, 3], [4, 5, 6]]))?;
/// assert_eq!(a.resolved_sizes(), Some([2, 3]));
/// assert_eq!(a[[1, 0]], 4);
/// assert_eq!(a.as_slice(), [1, 2, 3, 4, 5, 6]);
/// # Ok::<(), multidim_array::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MultiDimArray<T, const R: usize> {
    shape: [Extent; R],
    order: Order<R>,
    layout: Option<Layout<R>>,
    items: Vec<T>,
}

impl<T, const R: usize> MultiDimArray<T, R> {
    /// An array with every dimension [`Extent::Dynamic`] and no storage.
    pub fn dynamic() -> Self {
        Self {shape: Extent::dynamic(), order: Order::default(), layout: None, items: Vec::new()}
    }

    /// Constructs an array of size `sizes` by calling `f` once per storage
    /// slot, in storage order. The dimensions are not fixed, so the array
    /// can later be resized.
    ///
    /// ```
    /// use multidim_array::{MultiDimArray, Order};
    /// let a = MultiDimArray::from_fn([2, 3], Order::column_major(), |[i, j]| 10 * i + j);
    /// assert_eq!(a.as_slice(), [0, 10, 1, 11, 2, 12]);
    /// assert_eq!(a[[1, 2]], 12);
    /// ```
    pub fn from_fn(sizes: [usize; R], order: Order<R>, mut f: impl FnMut(Coord<R>) -> T) -> Self {
        let layout = Layout::new(sizes, order);
        let items = (0..layout.len()).map(|i| f(layout.from_usize(i))).collect();
        Self {shape: Extent::dynamic(), order, layout: Some(layout), items}
    }

    /// The declared extents, as passed to the constructor.
    pub fn declared(&self) -> &[Extent; R] { &self.shape }

    /// The current extent of each dimension.
    pub fn sizes(&self) -> [Extent; R] {
        match &self.layout {
            Some(layout) => Extent::fixed(*layout.sizes()),
            None => self.shape,
        }
    }

    /// The size of each dimension, or `None` while any dimension is dynamic.
    pub fn resolved_sizes(&self) -> Option<[usize; R]> { self.layout.map(|l| *l.sizes()) }

    /// The number of elements, or `None` while any dimension is dynamic.
    pub fn total_size(&self) -> Option<usize> { self.layout.map(|l| l.len()) }

    /// The stride of each dimension. See [`Layout::strides()`].
    pub fn strides(&self) -> Option<[usize; R]> { self.layout.map(|l| *l.strides()) }

    /// The storage order. Kept while the array is unresolved.
    pub fn order(&self) -> Order<R> { self.order }

    pub fn layout(&self) -> Option<&Layout<R>> { self.layout.as_ref() }

    /// `true` once every dimension has a size and the storage exists.
    pub fn is_resolved(&self) -> bool { self.layout.is_some() }

    /// The storage buffer, in storage order.
    pub fn as_slice(&self) -> &[T] { &self.items }

    pub fn as_mut_slice(&mut self) -> &mut [T] { &mut self.items }

    /// Returns the storage buffer.
    pub fn into_vec(self) -> Vec<T> { self.items }

    pub(crate) fn resolved_layout(&self) -> Result<&Layout<R>> {
        self.layout.as_ref().ok_or_else(|| Error::UnresolvedExtent {
            dims: (0..R).filter(|&d| self.shape[d].is_dynamic()).collect(),
        })
    }

    /// Returns the element at `coord`.
    pub fn get(&self, coord: Coord<R>) -> Result<&T> {
        let index = self.checked_index(coord)?;
        Ok(&self.items[index])
    }

    pub fn get_mut(&mut self, coord: Coord<R>) -> Result<&mut T> {
        let index = self.checked_index(coord)?;
        Ok(&mut self.items[index])
    }

    fn checked_index(&self, coord: Coord<R>) -> Result<usize> {
        let layout = self.resolved_layout()?;
        if !layout.contains(&coord) {
            return Err(Error::OutOfBounds {coord: coord.to_vec(), sizes: layout.sizes().to_vec()});
        }
        Ok(layout.to_usize(&coord))
    }

    /// Replaces every element with `f(coord, index, old)`, visiting the
    /// storage slots in storage order.
    ///
    /// ```
    /// use multidim_array::{MultiDimArray, Order};
    /// let mut a = MultiDimArray::from_fn([2, 2], Order::column_major(), |_| 0);
    /// a.set_with(|_, index, _| index)?;
    /// assert_eq!(a[[1, 0]], 1);
    /// assert_eq!(a[[0, 1]], 2);
    /// # Ok::<(), multidim_array::Error>(())
    /// ```
    pub fn set_with(&mut self, mut f: impl FnMut(&Coord<R>, usize, &T) -> T) -> Result<()> {
        let layout = *self.resolved_layout()?;
        for (i, item) in self.items.iter_mut().enumerate() {
            let coord = layout.from_usize(i);
            *item = f(&coord, i, &*item);
        }
        Ok(())
    }
}

impl<T: Clone + Default, const R: usize> MultiDimArray<T, R> {
    /// An array with the given extents and the default storage order.
    pub fn new(shape: [Extent; R]) -> Self { Self::with_order(shape, Order::default()) }

    /// An array with the given extents and storage order. If every extent
    /// is fixed, the storage is filled with `T::default()`.
    ///
    /// ```
    /// use multidim_array::{Extent, MultiDimArray, Order};
    /// let a: MultiDimArray<u8, 2> = MultiDimArray::with_order(Extent::fixed([2, 3]), Order::column_major());
    /// assert_eq!(a.strides(), Some([1, 2]));
    /// assert_eq!(a.total_size(), Some(6));
    /// ```
    pub fn with_order(shape: [Extent; R], order: Order<R>) -> Self {
        let layout = index::resolve(&shape).ok().map(|sizes| Layout::new(sizes, order));
        let items = layout.map_or_else(Vec::new, |l| vec![T::default(); l.len()]);
        Self {shape, order, layout, items}
    }

    /// Constructs an array from a nested literal. Dynamic extents take
    /// their size from `literal`; fixed extents must match it.
    pub fn from_nested(shape: [Extent; R], literal: Nested<T>) -> Result<Self> {
        Self::from_nested_with_order(shape, literal, Order::default())
    }

    /// Like [`Self::from_nested()`], but with an explicit storage order.
    ///
    /// ```
    /// use multidim_array::{nested, Extent, MultiDimArray, Order};
    /// let a = MultiDimArray::from_nested_with_order(
    ///     Extent::fixed([2, 3]),
    ///     nested!([[1, 2, 3], [4, 5, 6]]),
    ///     Order::column_major(),
    /// )?;
    /// assert_eq!(a.as_slice(), [1, 4, 2, 5, 3, 6]);
    /// # Ok::<(), multidim_array::Error>(())
    /// ```
    pub fn from_nested_with_order(shape: [Extent; R], literal: Nested<T>, order: Order<R>) -> Result<Self> {
        let mut array = Self::with_order(shape, order);
        array.set_nested(literal)?;
        Ok(array)
    }

    /// Overwrites every element from a nested literal, placing each leaf at
    /// its coordinate under the current storage order.
    ///
    /// If the array is resolved, `literal` must have exactly its sizes.
    /// Otherwise the array is first resolved to the sizes of `literal`.
    pub fn set_nested(&mut self, literal: Nested<T>) -> Result<()> {
        let literal_sizes = literal.shape::<R>().map_err(|e| {
            warn!(error = %e, "rejected nested literal");
            e
        })?;
        let expected = match &self.layout {
            Some(layout) => Extent::fixed(*layout.sizes()),
            None => self.shape,
        };
        for d in 0..R {
            if let Extent::Fixed(size) = expected[d] {
                if size != literal_sizes[d] {
                    warn!(dim = d, expected = size, got = literal_sizes[d], "nested literal does not match array size");
                    return Err(Error::LiteralShape {dim: d, expected: size, got: literal_sizes[d]});
                }
            }
        }
        if self.layout.is_none() {
            self.resize(Extent::fixed(literal_sizes), self.order, ResizePolicy::InitialValue)?;
        }
        let layout = *self.resolved_layout()?;
        let items = &mut self.items;
        literal.for_each_leaf::<R>(|coord, t| { items[layout.to_usize(coord)] = t; });
        Ok(())
    }

    /// Resizes to `sizes`, keeping the storage order and values by
    /// coordinate.
    pub fn set_dim_size(&mut self, sizes: [usize; R]) -> Result<()> {
        self.resize(Extent::fixed(sizes), self.order, ResizePolicy::default())
    }

    /// Resizes to `sizes` and changes the storage order, keeping values by
    /// coordinate.
    ///
    /// ```
    /// use multidim_array::{MultiDimArray, Order};
    /// let mut a = MultiDimArray::from_fn([2, 2], Order::row_major(), |[i, j]| 10 * i + j);
    /// a.set_dim_size_ordered([3, 2], Order::column_major())?;
    /// assert_eq!(a.as_slice(), [0, 10, 0, 1, 11, 0]);
    /// # Ok::<(), multidim_array::Error>(())
    /// ```
    pub fn set_dim_size_ordered(&mut self, sizes: [usize; R], order: Order<R>) -> Result<()> {
        self.resize(Extent::fixed(sizes), order, ResizePolicy::default())
    }

    /// Changes the size and storage order of the array.
    ///
    /// Fails without modifying `self` if any of `extents` is
    /// [`Extent::Dynamic`], or if it changes a dimension that was declared
    /// with a fixed size. Otherwise the storage is rebuilt according to
    /// `policy`.
    pub fn resize(&mut self, extents: [Extent; R], order: Order<R>, policy: ResizePolicy) -> Result<()> {
        let sizes = index::resolve(&extents).map_err(|e| {
            warn!(error = %e, "cannot resize to an unresolved size");
            e
        })?;
        for d in 0..R {
            if let Extent::Fixed(fixed) = self.shape[d] {
                if fixed != sizes[d] {
                    warn!(dim = d, fixed, requested = sizes[d], "cannot resize a fixed dimension");
                    return Err(Error::FixedExtent {dim: d, fixed, requested: sizes[d]});
                }
            }
        }
        let layout = Layout::new(sizes, order);
        let old = self.layout.replace(layout);
        self.order = order;
        let len = layout.len();
        match policy {
            ResizePolicy::PreserveOldData => {
                self.items.resize(len, T::default());
            },
            ResizePolicy::Uninitialized | ResizePolicy::InitialValue => {
                self.items.clear();
                self.items.resize(len, T::default());
            },
            ResizePolicy::CoordinationCopy => {
                let mut items = vec![T::default(); len];
                if let Some(old) = old {
                    for (i, item) in std::mem::take(&mut self.items).into_iter().enumerate() {
                        let coord = old.from_usize(i);
                        if layout.contains(&coord) { items[layout.to_usize(&coord)] = item; }
                    }
                }
                self.items = items;
            },
        }
        debug!(
            old = ?old.map(|l| *l.sizes()),
            new = ?sizes,
            order = ?order.as_array(),
            ?policy,
            "resized array"
        );
        Ok(())
    }
}

impl<T, const R: usize> std::ops::Index<Coord<R>> for MultiDimArray<T, R> {
    type Output = T;
    fn index(&self, coord: Coord<R>) -> &T {
        match self.get(coord) {
            Ok(t) => t,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T, const R: usize> std::ops::IndexMut<Coord<R>> for MultiDimArray<T, R> {
    fn index_mut(&mut self, coord: Coord<R>) -> &mut T {
        match self.get_mut(coord) {
            Ok(t) => t,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Indexes the storage buffer directly.
impl<T, const R: usize> std::ops::Index<usize> for MultiDimArray<T, R> {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: usize) -> &T { &self.items[index] }
}

impl<T, const R: usize> std::ops::IndexMut<usize> for MultiDimArray<T, R> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut T { &mut self.items[index] }
}

impl<T, const R: usize> std::convert::AsRef<[T]> for MultiDimArray<T, R> {
    fn as_ref(&self) -> &[T] { &self.items }
}

impl<T, const R: usize> std::convert::AsMut<[T]> for MultiDimArray<T, R> {
    fn as_mut(&mut self) -> &mut [T] { &mut self.items }
}

impl<T, const R: usize> Default for MultiDimArray<T, R> {
    fn default() -> Self { Self::dynamic() }
}

// ----------------------------------------------------------------------------
