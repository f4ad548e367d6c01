//! Shared status-code taxonomy and error extension trait.
//!
//! Every component crate defines its own `snafu`-derived error enum and
//! implements [`ErrorExt`] for it, classifying each variant with a
//! [`StatusCode`] from the shared taxonomy below. This keeps error *shape*
//! local to each component (so messages stay specific) while keeping error
//! *classification* (retryable? log it? what category?) uniform across the
//! whole workspace.

mod ext;
mod status_code;

pub use ext::BoxedError;
pub use ext::ErrorExt;
pub use ext::Location;
pub use ext::PlainError;
pub use ext::boxed;
pub use status_code::StatusCategory;
pub use status_code::StatusCode;
pub use status_code::StatusMeta;
