//! rust_metric_learn — Neighborhood Components Analysis with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! NCA metric learning to Python via the `_rust_metric_learn` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing class and submodule used by the `rust_metric_learn`
//! package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`metric_learning` and `optimization`)
//!   as the public crate surface.
//! - Define the `NCA` `#[pyclass]` wrapper and the `#[pymodule]` initializer
//!   for the `_rust_metric_learn` Python extension.
//! - Create and register the `metric_learning` Python submodule under
//!   `rust_metric_learn` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input conversion, and error mapping.
//! - The Python-visible `NCA` mirrors the options and invariants of
//!   [`NcaModel`](crate::metric_learning::models::nca::NcaModel).
//!
//! Conventions
//! -----------
//! - `X` is passed as a 2-D float64 array-like (rows are samples); labels as
//!   a 1-D sequence of integers or strings.
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `PyErr` values at the PyO3 boundary.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules and
//!   by `tests/integration_nca_pipeline.rs`.

pub mod metric_learning;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    metric_learning::{
        errors::NcaError,
        models::{mahalanobis::MahalanobisTransform, nca::NcaModel},
    },
    utils::{build_nca_model, extract_f64_matrix, extract_labels, fit_with_labels},
};

/// NCA — Python-facing wrapper for Neighborhood Components Analysis.
///
/// Purpose
/// -------
/// Expose [`NcaModel`] to Python with a scikit-learn style surface:
/// `NCA(num_dims=None, max_iter=100, tol=None, verbose=False).fit(X, y)`.
///
/// Key behaviors
/// -------------
/// - `fit(X, y)` learns the transform and returns `self`.
/// - `transform(X)` projects samples with the learned transform.
/// - `transformer_`, `n_iter_`, `converged_` expose fit results; `metric()`
///   returns the Mahalanobis matrix `LᵗL`.
///
/// Notes
/// -----
/// - Marked `unsendable`: the model carries a non-`Send` progress reporter.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_metric_learn.metric_learning", unsendable)]
pub struct NCA {
    pub inner: NcaModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl NCA {
    #[new]
    #[pyo3(
        signature = (
            num_dims = None,
            max_iter = 100,
            tol = None,
            verbose = false,
            line_searcher = None,
            lbfgs_mem = None,
        ),
        text_signature = "(num_dims=None, max_iter=100, tol=None, verbose=False, \
                          line_searcher=None, lbfgs_mem=None)"
    )]
    pub fn new(
        num_dims: Option<usize>, max_iter: usize, tol: Option<f64>, verbose: bool,
        line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
    ) -> PyResult<Self> {
        let inner = build_nca_model(num_dims, max_iter, tol, verbose, line_searcher, lbfgs_mem)?;
        Ok(NCA { inner })
    }

    #[pyo3(text_signature = "(self, X, y, /)")]
    pub fn fit<'py>(
        mut slf: PyRefMut<'py, Self>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>,
    ) -> PyResult<PyRefMut<'py, Self>> {
        let x_mat = extract_f64_matrix(x)?;
        let labels = extract_labels(y)?;
        fit_with_labels(&mut slf.inner, &x_mat, &labels)?;
        Ok(slf)
    }

    #[pyo3(text_signature = "(self, X, /)")]
    pub fn transform<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let x_mat = extract_f64_matrix(x)?;
        let embedded = self.inner.transform(x_mat.view())?;
        Ok(embedded.into_pyarray(py))
    }

    #[pyo3(text_signature = "(self, /)")]
    pub fn metric<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        Ok(self.inner.mahalanobis_matrix()?.into_pyarray(py))
    }

    #[pyo3(text_signature = "(self, a, b, /)")]
    pub fn pair_distances<'py>(
        &self, py: Python<'py>, a: &Bound<'py, PyAny>, b: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let a_mat = extract_f64_matrix(a)?;
        let b_mat = extract_f64_matrix(b)?;
        Ok(self.inner.pair_distances(a_mat.view(), b_mat.view())?.into_pyarray(py))
    }

    #[getter]
    pub fn transformer_<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        Ok(self.inner.transformer()?.clone().into_pyarray(py))
    }

    #[getter]
    pub fn n_iter_(&self) -> PyResult<usize> {
        match self.inner.fit_info() {
            Some(info) => Ok(info.n_iter),
            None => Err(NcaError::ModelNotFitted.into()),
        }
    }

    #[getter]
    pub fn converged_(&self) -> PyResult<bool> {
        match self.inner.fit_info() {
            Some(info) => Ok(info.converged),
            None => Err(NcaError::ModelNotFitted.into()),
        }
    }
}

/// Populate the `metric_learning` submodule and attach it to the parent.
#[cfg(feature = "python-bindings")]
fn metric_learning<'py>(
    _py: Python<'py>, m: &Bound<'py, PyModule>, metric_learning_mod: &Bound<'py, PyModule>,
) -> PyResult<()> {
    metric_learning_mod.add_class::<NCA>()?;
    m.add_submodule(metric_learning_mod)?;
    Ok(())
}

/// _rust_metric_learn — PyO3 module initializer for the Python extension.
///
/// Creates the `metric_learning` submodule, attaches it to the parent and
/// registers it in `sys.modules` so it is importable via a dotted path.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_metric_learn<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let metric_learning_mod = PyModule::new(_py, "metric_learning")?;
    metric_learning(_py, m, &metric_learning_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_metric_learn.metric_learning", metric_learning_mod)?;
    Ok(())
}
