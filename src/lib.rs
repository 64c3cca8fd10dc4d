//! An ordered set of unique keys backed by a skip list.
//!
//! ```
//! use turtle_skiplist::SkipList;
//!
//! let mut l = SkipList::new();
//! for i in 1..10 {
//!     l.insert(i);
//! }
//! assert!(l.contain(&5));
//! assert!(l.remove(&5));
//! assert!(!l.contain(&5));
//! ```

mod error;
mod options;
mod skiplist;

pub use crate::error::{Error, Result};
pub use crate::options::{Options, DEFAULT_MAX_HEIGHT};
pub use crate::skiplist::SkipList;
