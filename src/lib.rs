//! Dense N-dimensional arrays with a configurable storage order.
//!
//! [`MultiDimArray<T, R>`] stores a grid of `T` with `R` dimensions in a
//! single flat buffer. Which dimension is contiguous in memory is chosen by
//! an [`Order`], a permutation of the dimensions, and can be changed at any
//! time without changing which value is at which [`Coord`]. All conversions
//! between coordinates and buffer offsets go through a [`Layout`].
//!
//! Each dimension is declared with an [`Extent`]: either a fixed size, or
//! [`Extent::Dynamic`] to be decided later by a resize or by a [`Nested`]
//! literal. Resizing can keep values by coordinate or by offset, as chosen
//! by a [`ResizePolicy`].
//!
//! There are two ways to derive new data from an array:
//!
//! - [`MultiDimArray::slice()`] copies a rectangular region, selected per
//!   dimension by a [`SliceSpec`].
//! - [`MultiDimArray::gather_by_mask_with()`] lays a [`Mask`] over the array
//!   and collects the values under its enabled cells. Cells that fall off the
//!   edge are handled according to a [`BorderMode`].
//!
//! Operations that are given invalid input return an [`Error`] and log a
//! warning through [`tracing`].
//!
//! ```
//! use multidim_array::{nested, Extent, MultiDimArray, Order, SliceSpec};
//! let mut a: MultiDimArray<i32, 2> = MultiDimArray::from_nested(
//!     Extent::dynamic(),
//!     nested!([[1, 2, 3], [4, 5, 6]]),
//! )?;
//! a.set_dim_size_ordered([2, 3], Order::column_major())?;
//! assert_eq!(a.as_slice(), [1, 4, 2, 5, 3, 6]);
//! let column = a.slice([SliceSpec::All, SliceSpec::Single(1)])?;
//! assert_eq!(column.as_slice(), [2, 5]);
//! # Ok::<(), multidim_array::Error>(())
//! ```

pub mod index;
pub use index::{Coord, Extent, Order, Layout, Odometer};

mod new;
pub use new::{Nested};

mod array;
pub use array::{MultiDimArray, ResizePolicy};

mod iter;
pub use iter::{ByCoord};

mod slice;
pub use slice::{SliceSpec};

mod mask;
pub use mask::{MaskCell, Mask, BorderMode, GatherOptions};

mod error;
pub use error::{Error, Result};
