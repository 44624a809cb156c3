//! td-core: stable foundation for turbodes.
//!
//! Contains:
//! - ids (compact identifiers for assembly children and fields)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

pub use error::{CoreError, CoreResult};
pub use ids::{CompId, FieldId, VarHandle};
pub use numeric::{Real, Tolerances, ensure_finite, nearly_equal};
