//! Mapping between coordinates and flat storage offsets.
//!
//! Every other part of the crate goes through the functions in this module
//! to convert a [`Coord`] into an offset into the storage buffer and back.
//! The mapping is controlled by a per-dimension size and an [`Order`], which
//! says which dimension varies fastest in memory.

use super::{Error, Result};

/// A position in an array of rank `R`.
///
/// Components are signed so that neighbourhood arithmetic (see
/// [`MultiDimArray::gather_by_mask()`]) can step outside the array before
/// being resolved.
///
/// [`MultiDimArray::gather_by_mask()`]: super::MultiDimArray::gather_by_mask
pub type Coord<const R: usize> = [isize; R];

// ----------------------------------------------------------------------------

/// The declared size of one dimension of an array.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Extent {
    /// Not known yet. Resolved by a resize or by a nested literal.
    Dynamic,

    /// A known number of elements.
    Fixed(usize),
}

impl Extent {
    /// `R` dynamic extents.
    pub fn dynamic<const R: usize>() -> [Self; R] { [Self::Dynamic; R] }

    /// `R` fixed extents.
    ///
    /// ```
    /// use multidim_array::Extent;
    /// assert_eq!(Extent::fixed([2, 3]), [Extent::Fixed(2), Extent::Fixed(3)]);
    /// ```
    pub fn fixed<const R: usize>(sizes: [usize; R]) -> [Self; R] { sizes.map(Self::Fixed) }

    /// The size, if known.
    pub fn size(self) -> Option<usize> {
        match self {
            Self::Dynamic => None,
            Self::Fixed(size) => Some(size),
        }
    }

    /// `true` for [`Extent::Dynamic`].
    pub fn is_dynamic(self) -> bool { self == Self::Dynamic }
}

impl From<usize> for Extent {
    fn from(size: usize) -> Self { Self::Fixed(size) }
}

/// Returns the sizes of `extents`, or an error listing the dimensions that
/// are still [`Extent::Dynamic`].
pub fn resolve<const R: usize>(extents: &[Extent; R]) -> Result<[usize; R]> {
    let dims: Vec<usize> = (0..R).filter(|&d| extents[d].is_dynamic()).collect();
    if !dims.is_empty() {
        return Err(Error::UnresolvedExtent {dims});
    }
    Ok(extents.map(|e| e.size().unwrap_or_default()))
}

// ----------------------------------------------------------------------------

/// A storage order: a permutation of `0..R`.
///
/// `order[0]` names the dimension with stride `1`, i.e. the one that is
/// contiguous in memory. `order[R-1]` names the dimension with the largest
/// stride.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Order<const R: usize>([usize; R]);

impl<const R: usize> Order<R> {
    /// Checks that `dims` is a permutation of `0..R`.
    ///
    /// ```
    /// use multidim_array::Order;
    /// assert!(Order::new([1, 0, 2]).is_ok());
    /// assert!(Order::new([1, 1, 2]).is_err());
    /// assert!(Order::new([0, 1, 3]).is_err());
    /// ```
    pub fn new(dims: [usize; R]) -> Result<Self> {
        let mut seen = [false; R];
        for &d in &dims {
            if d >= R || seen[d] {
                return Err(Error::InvalidOrder {order: dims.to_vec()});
            }
            seen[d] = true;
        }
        Ok(Self(dims))
    }

    /// `[R-1, ..., 1, 0]`: the last dimension is contiguous, like a C array.
    /// This is the default.
    ///
    /// ```
    /// use multidim_array::Order;
    /// assert_eq!(Order::<3>::row_major().as_array(), &[2, 1, 0]);
    /// assert_eq!(Order::<3>::default(), Order::row_major());
    /// ```
    pub fn row_major() -> Self { Self(std::array::from_fn(|i| R - 1 - i)) }

    /// `[0, 1, ..., R-1]`: the first dimension is contiguous.
    pub fn column_major() -> Self { Self(std::array::from_fn(|i| i)) }

    pub fn as_array(&self) -> &[usize; R] { &self.0 }
}

impl<const R: usize> Default for Order<R> {
    fn default() -> Self { Self::row_major() }
}

impl<const R: usize> TryFrom<[usize; R]> for Order<R> {
    type Error = Error;
    fn try_from(dims: [usize; R]) -> Result<Self> { Self::new(dims) }
}

// ----------------------------------------------------------------------------

/// Computes strides such that `order[0]` has stride `1` and each following
/// dimension in `order` steps over all of the previous ones.
pub fn strides<const R: usize>(sizes: &[usize; R], order: &Order<R>) -> [usize; R] {
    let mut strides = [0; R];
    let mut stride = 1;
    for &d in order.as_array() {
        strides[d] = stride;
        stride *= sizes[d];
    }
    strides
}

/// Returns `sum(strides[d] * coord[d])`.
///
/// No bounds checking is done; use [`is_out_of_bounds()`] first if
/// necessary.
#[inline(always)]
pub fn coord_to_index<const R: usize>(coord: &Coord<R>, strides: &[usize; R]) -> usize {
    let mut index: isize = 0;
    for d in 0..R {
        index += strides[d] as isize * coord[d];
    }
    index as usize
}

/// The inverse of [`coord_to_index()`], given the `order` the `strides`
/// were computed from.
pub fn index_to_coord<const R: usize>(
    index: usize,
    strides: &[usize; R],
    order: &Order<R>,
) -> Coord<R> {
    let mut coord = [0; R];
    let mut rest = index;
    for &d in order.as_array().iter().rev() {
        // Zero strides only occur in arrays with no elements.
        if strides[d] == 0 { continue; }
        coord[d] = (rest / strides[d]) as isize;
        rest %= strides[d];
    }
    coord
}

/// Returns `true` if any component of `coord` is negative or not less than
/// the corresponding size.
#[inline(always)]
pub fn is_out_of_bounds<const R: usize>(coord: &Coord<R>, sizes: &[usize; R]) -> bool {
    (0..R).any(|d| coord[d] < 0 || coord[d] as usize >= sizes[d])
}

// ----------------------------------------------------------------------------

/// The resolved sizes, storage order and strides of an array.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Layout<const R: usize> {
    sizes: [usize; R],
    order: Order<R>,
    strides: [usize; R],
}

impl<const R: usize> Layout<R> {
    /// Computes the strides of `sizes` under `order`.
    ///
    /// ```
    /// use multidim_array::{Layout, Order};
    /// let layout = Layout::new([2, 3], Order::row_major());
    /// assert_eq!(layout.strides(), &[3, 1]);
    /// assert_eq!(layout.to_usize(&[1, 2]), 5);
    /// assert_eq!(layout.from_usize(4), [1, 1]);
    /// ```
    pub fn new(sizes: [usize; R], order: Order<R>) -> Self {
        Self {sizes, order, strides: strides(&sizes, &order)}
    }

    /// The size of each dimension.
    pub fn sizes(&self) -> &[usize; R] { &self.sizes }

    pub fn order(&self) -> &Order<R> { &self.order }

    /// The distance in the storage buffer between neighbours in each
    /// dimension.
    pub fn strides(&self) -> &[usize; R] { &self.strides }

    /// The number of elements.
    pub fn len(&self) -> usize { self.sizes.iter().product() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    #[inline(always)]
    pub fn to_usize(&self, coord: &Coord<R>) -> usize { coord_to_index(coord, &self.strides) }

    pub fn from_usize(&self, index: usize) -> Coord<R> {
        index_to_coord(index, &self.strides, &self.order)
    }

    #[inline(always)]
    pub fn contains(&self, coord: &Coord<R>) -> bool { !is_out_of_bounds(coord, &self.sizes) }

    /// Every coordinate in nested-loop order. See [`Odometer`].
    pub fn coords(&self) -> Odometer<R> { Odometer::new(self.sizes) }
}

// ----------------------------------------------------------------------------

/// Iterates over every coordinate less than `limits`, incrementing the last
/// dimension fastest, like nested `for` loops over dimensions `0..R`.
///
/// The order is independent of any storage order.
///
/// ```
/// use multidim_array::Odometer;
/// let coords: Vec<_> = Odometer::new([2, 3]).collect();
/// assert_eq!(coords, [[0, 0], [0, 1], [0, 2], [1, 0], [1, 1], [1, 2]]);
/// ```
#[derive(Debug, Clone)]
pub struct Odometer<const R: usize> {
    limits: [usize; R],
    next: Option<Coord<R>>,
    remaining: usize,
}

impl<const R: usize> Odometer<R> {
    pub fn new(limits: [usize; R]) -> Self {
        let remaining: usize = limits.iter().product();
        let next = if remaining == 0 { None } else { Some([0; R]) };
        Self {limits, next, remaining}
    }
}

impl<const R: usize> Iterator for Odometer<R> {
    type Item = Coord<R>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.remaining -= 1;
        let mut following = current;
        for level in (0..R).rev() {
            following[level] += 1;
            if (following[level] as usize) < self.limits[level] {
                self.next = Some(following);
                break;
            }
            following[level] = 0;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<const R: usize> ExactSizeIterator for Odometer<R> {}

// ----------------------------------------------------------------------------
