//! models — user-facing metric learners.
//!
//! - [`nca`]: [`NcaModel`], its objective wrapper [`NcaProblem`] and the
//!   [`NcaFitInfo`] summary.
//! - [`mahalanobis`]: the [`MahalanobisTransform`] trait shared by learners
//!   that produce a linear map.

pub mod mahalanobis;
pub mod nca;

pub use self::mahalanobis::MahalanobisTransform;
pub use self::nca::{NcaFitInfo, NcaInputs, NcaModel, NcaProblem};
