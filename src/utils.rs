#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use crate::{
    metric_learning::{
        core::{init::Init, options::NcaOptions},
        errors::NcaError,
        models::nca::{NcaFitInfo, NcaModel},
    },
    optimization::objective_optimizer::LineSearcher,
};

#[cfg(feature = "python-bindings")]
use numpy::{PyReadonlyArray1, PyReadonlyArray2};

/// Labels as received from Python: integer codes or strings.
#[cfg(feature = "python-bindings")]
#[derive(Debug, Clone, PartialEq)]
pub enum PyLabels {
    Int(Vec<i64>),
    Str(Vec<String>),
}

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_matrix<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or nested sequence of float64",
        )
    })?;
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != n_cols) {
        return Err(PyValueError::new_err("all rows of X must have the same length"));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    let n_rows = if n_cols == 0 { 0 } else { flat.len() / n_cols };
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|err| PyValueError::new_err(format!("could not build X: {err}")))
}

#[cfg(feature = "python-bindings")]
pub fn extract_labels<'py>(raw_labels: &Bound<'py, PyAny>) -> PyResult<PyLabels> {
    if let Ok(arr_ro) = raw_labels.extract::<PyReadonlyArray1<i64>>() {
        return Ok(PyLabels::Int(arr_ro.as_array().to_vec()));
    }
    if let Ok(ints) = raw_labels.extract::<Vec<i64>>() {
        return Ok(PyLabels::Int(ints));
    }
    if let Ok(obj) = raw_labels.call_method0("tolist") {
        if let Ok(strings) = obj.extract::<Vec<String>>() {
            return Ok(PyLabels::Str(strings));
        }
    }
    raw_labels.extract::<Vec<String>>().map(PyLabels::Str).map_err(|_| {
        PyTypeError::new_err("expected y to be a 1-D sequence of integer or string labels")
    })
}

#[cfg(feature = "python-bindings")]
pub fn build_nca_model(
    num_dims: Option<usize>, max_iter: usize, tol: Option<f64>, verbose: bool,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<NcaModel> {
    use std::str::FromStr;

    // LineSearcher::from_str -> OptResult<LineSearcher> -> NcaError -> PyErr
    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(NcaError::from)?,
        None => LineSearcher::MoreThuente,
    };

    let opts = NcaOptions::new(num_dims, max_iter, tol, verbose, ls, lbfgs_mem, Init::Scaling)?;
    Ok(NcaModel::new(opts))
}

#[cfg(feature = "python-bindings")]
pub fn fit_with_labels<'a>(
    model: &'a mut NcaModel, x: &Array2<f64>, labels: &PyLabels,
) -> PyResult<&'a NcaFitInfo> {
    let info = match labels {
        PyLabels::Int(codes) => model.fit(x.view(), codes.as_slice())?,
        PyLabels::Str(names) => model.fit(x.view(), names.as_slice())?,
    };
    Ok(info)
}
