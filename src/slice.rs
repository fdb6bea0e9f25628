use tracing::{debug, warn};

use super::{Coord, Order, MultiDimArray, Error, Result};

/// Selects part of one dimension for [`MultiDimArray::slice()`].
///
/// Usually written using the `From` conversions:
///
/// ```
/// use multidim_array::SliceSpec;
/// assert_eq!(SliceSpec::from(3), SliceSpec::Single(3));
/// assert_eq!(SliceSpec::from(2..4), SliceSpec::Range(2, 4));
/// assert_eq!(SliceSpec::from(..), SliceSpec::All);
/// ```
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum SliceSpec {
    /// One index. The dimension is kept, with size `1`.
    Single(usize),

    /// The half-open range `start..end`.
    Range(usize, usize),

    /// The whole dimension.
    All,
}

impl SliceSpec {
    /// Returns the first selected index and the number of selected indices
    /// in a dimension of size `size`.
    fn bounds(self, size: usize) -> Option<(usize, usize)> {
        match self {
            Self::Single(index) if index < size => Some((index, 1)),
            Self::Range(start, end) if start <= end && end <= size => Some((start, end - start)),
            Self::All => Some((0, size)),
            _ => None,
        }
    }
}

impl From<usize> for SliceSpec {
    fn from(index: usize) -> Self { Self::Single(index) }
}

impl From<std::ops::Range<usize>> for SliceSpec {
    fn from(range: std::ops::Range<usize>) -> Self { Self::Range(range.start, range.end) }
}

impl From<std::ops::RangeFull> for SliceSpec {
    fn from(_: std::ops::RangeFull) -> Self { Self::All }
}

// ----------------------------------------------------------------------------

impl<T: Clone, const R: usize> MultiDimArray<T, R> {
    /// Copies a rectangular region into a new array.
    ///
    /// Each dimension of the result has the size selected by `spec`; a
    /// [`SliceSpec::Single`] dimension has size `1`. The element at `coord`
    /// in the result is the element at `coord + start` in `self`. The result
    /// owns its storage, has the default storage order, and its dimensions
    /// are not fixed.
    ///
    /// ```
    /// use multidim_array::{MultiDimArray, Order, SliceSpec};
    /// let a = MultiDimArray::from_fn([3, 4], Order::row_major(), |[i, j]| 10 * i + j);
    /// let s = a.slice([SliceSpec::Single(1), (1..3).into()])?;
    /// assert_eq!(s.resolved_sizes(), Some([1, 2]));
    /// assert_eq!(s.as_slice(), [11, 12]);
    /// # Ok::<(), multidim_array::Error>(())
    /// ```
    pub fn slice(&self, spec: [SliceSpec; R]) -> Result<Self> {
        let layout = *self.resolved_layout()?;
        let mut starts = [0; R];
        let mut sizes = [0; R];
        for d in 0..R {
            let size = layout.sizes()[d];
            let (start, len) = spec[d].bounds(size).ok_or_else(|| {
                warn!(dim = d, spec = ?spec[d], size, "slice does not fit the array");
                Error::InvalidSlice {dim: d, spec: spec[d], size}
            })?;
            starts[d] = start as isize;
            sizes[d] = len;
        }
        let items = self.as_slice();
        let result = Self::from_fn(sizes, Order::default(), |coord| {
            let source: Coord<R> = std::array::from_fn(|d| coord[d] + starts[d]);
            items[layout.to_usize(&source)].clone()
        });
        debug!(from = ?layout.sizes(), to = ?sizes, "sliced array");
        Ok(result)
    }
}

// ----------------------------------------------------------------------------
