//! Neighbourhood gathers driven by a mask array.
//!
//! A [`Mask`] is laid over the source array so that its cell `center` sits
//! on `anchor`. Every enabled cell then picks up the source element beneath
//! it. Cells that land outside the source are handled by a [`BorderMode`].

use tracing::{debug, warn};

use super::{Coord, MultiDimArray, Error, Result};

/// One cell of a [`Mask`].
///
/// ```
/// use multidim_array::MaskCell;
/// assert!(MaskCell::Bool(true).is_enabled());
/// assert!(MaskCell::Int(-3).is_enabled());
/// assert!(!MaskCell::Int(0).is_enabled());
/// assert!(!MaskCell::default().is_enabled());
/// ```
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum MaskCell {
    Bool(bool),

    /// Enabled unless zero.
    Int(i32),
}

impl MaskCell {
    pub fn is_enabled(self) -> bool {
        match self {
            Self::Bool(b) => b,
            Self::Int(i) => i != 0,
        }
    }
}

impl Default for MaskCell {
    fn default() -> Self { Self::Bool(false) }
}

impl From<bool> for MaskCell {
    fn from(b: bool) -> Self { Self::Bool(b) }
}

impl From<i32> for MaskCell {
    fn from(i: i32) -> Self { Self::Int(i) }
}

/// A mask of rank `R`.
pub type Mask<const R: usize> = MultiDimArray<MaskCell, R>;

// ----------------------------------------------------------------------------

/// What to do with a mask cell that falls outside the source array.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub enum BorderMode {
    /// Skip the cell.
    #[default]
    NoPadding,

    /// Wrap around: `... 2 3 | 0 1 2 3 | 0 1 ...`.
    Repeat,

    /// Mirror, repeating the edge element: `... 1 0 | 0 1 2 3 | 3 2 ...`.
    Reflect,

    /// Mirror without repeating the edge element: `... 2 1 | 0 1 2 3 | 2 1 ...`.
    Reflect101,

    /// Pad with a constant. There is no way to supply the constant, so
    /// gathers reject this mode.
    Constant,
}

impl BorderMode {
    /// Maps one component of a coordinate into `0..size`, or returns `None`
    /// if the cell should be skipped.
    ///
    /// ```
    /// use multidim_array::BorderMode::*;
    /// assert_eq!(NoPadding.resolve(2, 4), Some(2));
    /// assert_eq!(NoPadding.resolve(4, 4), None);
    /// assert_eq!(Repeat.resolve(-1, 4), Some(3));
    /// assert_eq!(Repeat.resolve(9, 4), Some(1));
    /// assert_eq!(Reflect.resolve(-2, 4), Some(1));
    /// assert_eq!(Reflect.resolve(5, 4), Some(2));
    /// assert_eq!(Reflect101.resolve(-1, 4), Some(1));
    /// assert_eq!(Reflect101.resolve(4, 4), Some(2));
    /// ```
    pub fn resolve(self, coord: isize, size: usize) -> Option<isize> {
        let n = size as isize;
        if (0..n).contains(&coord) { return Some(coord); }
        if n == 0 { return None; }
        match self {
            Self::NoPadding | Self::Constant => None,
            Self::Repeat => Some(coord.rem_euclid(n)),
            Self::Reflect => {
                let c = if coord < 0 { -coord - 1 } else { coord };
                let period = 2 * n;
                let c = c % period;
                Some(if c >= n { period - c - 1 } else { c })
            },
            Self::Reflect101 => {
                // A single element is its own mirror image.
                if n == 1 { return Some(0); }
                let c = if coord < 0 { -coord } else { coord };
                let period = 2 * n - 2;
                let c = c % period;
                Some(if c >= n { period - c } else { c })
            },
        }
    }
}

// ----------------------------------------------------------------------------

/// Options for [`MultiDimArray::gather_by_mask_with()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GatherOptions<const R: usize> {
    /// The mask cell that is placed on the anchor.
    pub center: Coord<R>,

    pub border: BorderMode,
}

impl<const R: usize> GatherOptions<R> {
    pub fn with_center(mut self, center: Coord<R>) -> Self {
        self.center = center;
        self
    }

    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = border;
        self
    }
}

impl<const R: usize> Default for GatherOptions<R> {
    fn default() -> Self { Self {center: [0; R], border: BorderMode::default()} }
}

// ----------------------------------------------------------------------------

impl<T: Clone, const R: usize> MultiDimArray<T, R> {
    /// Gathers with the mask's origin on `anchor` and no padding.
    ///
    /// ```
    /// use multidim_array::{nested, Extent, Mask, MaskCell, MultiDimArray, Order};
    /// let a = MultiDimArray::from_fn([3, 3], Order::row_major(), |[i, j]| 10 * i + j);
    /// let mask = Mask::from_nested(Extent::dynamic(), nested!([[1, 0], [1, 1]]).map(MaskCell::from))?;
    /// assert_eq!(a.gather_by_mask(&mask, [1, 1])?, [11, 21, 22]);
    /// assert_eq!(a.gather_by_mask(&mask, [2, 2])?, [22]);
    /// # Ok::<(), multidim_array::Error>(())
    /// ```
    pub fn gather_by_mask(&self, mask: &Mask<R>, anchor: Coord<R>) -> Result<Vec<T>> {
        self.gather_by_mask_with(mask, anchor, GatherOptions::default())
    }

    /// Returns one element for each enabled cell of `mask`, in the
    /// coordinate order of `mask`.
    ///
    /// Mask cell `m` reads the element at `anchor + m - options.center`.
    /// Components outside the array are mapped by `options.border`; if that
    /// gives `None` the cell contributes nothing. An array with no elements
    /// gives an empty result.
    ///
    /// Fails if either array is unresolved, or if `options.border` is
    /// [`BorderMode::Constant`].
    ///
    /// ```
    /// use multidim_array::{nested, BorderMode, Extent, GatherOptions, Mask, MaskCell, MultiDimArray, Order};
    /// let a = MultiDimArray::from_fn([4], Order::row_major(), |[i]| i);
    /// let mask = Mask::from_nested(Extent::dynamic(), nested!([1, 1, 1]).map(MaskCell::from))?;
    /// let options = GatherOptions::default().with_center([1]).with_border(BorderMode::Repeat);
    /// assert_eq!(a.gather_by_mask_with(&mask, [0], options)?, [3, 0, 1]);
    /// # Ok::<(), multidim_array::Error>(())
    /// ```
    pub fn gather_by_mask_with(
        &self,
        mask: &Mask<R>,
        anchor: Coord<R>,
        options: GatherOptions<R>,
    ) -> Result<Vec<T>> {
        let GatherOptions {center, border} = options;
        if border == BorderMode::Constant {
            warn!(mode = ?border, "unsupported border mode");
            return Err(Error::UnsupportedBorderMode {mode: border});
        }
        let layout = *self.resolved_layout()?;
        let mut gathered = Vec::new();
        if layout.is_empty() {
            debug!(sizes = ?layout.sizes(), "gathered nothing from an empty array");
            return Ok(gathered);
        }
        let items = self.as_slice();
        mask.each_by_coord(|mask_coord, _, _, cell| {
            if !cell.is_enabled() { return; }
            let mut source = [0; R];
            for d in 0..R {
                match border.resolve(anchor[d] + mask_coord[d] - center[d], layout.sizes()[d]) {
                    Some(c) => { source[d] = c; },
                    None => return,
                }
            }
            gathered.push(items[layout.to_usize(&source)].clone());
        })?;
        debug!(?anchor, ?center, ?border, count = gathered.len(), "gathered by mask");
        Ok(gathered)
    }
}

// ----------------------------------------------------------------------------
