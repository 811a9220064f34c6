//! Integration tests for NCA metric learning.
//!
//! Purpose
//! -------
//! - Validate the end-to-end NCA pipeline: from raw features and labels,
//!   through the initial transform and L-BFGS fitting, to projection and
//!   Mahalanobis helpers.
//! - Check the behavioral guarantees users rely on: fitting improves every
//!   point's class probability on a symmetric toy problem, accepted
//!   iterations never increase the cost, and non-convergence is advisory.
//!
//! Coverage
//! --------
//! - `metric_learning::core`:
//!   - `scaling_init` on zero-variance features.
//!   - `neighbor_probabilities` / `class_probabilities` before and after
//!     fitting.
//! - `metric_learning::models`:
//!   - `NcaModel::fit`, `transform`, `NcaFitInfo`, and
//!     `MahalanobisTransform` on a reduced embedding dimension.
//! - `optimization::objective_optimizer`:
//!   - Cost trace recorded from the L-BFGS run, both line searches.
//!
//! Exclusions
//! ----------
//! - Finite-difference gradient checks and numerical-stability edge cases;
//!   these are covered by unit tests next to the objective.
//! - Python bindings.
use approx::assert_relative_eq;
use ndarray::{Array1, Array2, Axis, array};
use rust_metric_learn::{
    metric_learning::{
        core::{
            data::{SameClassMask, encode_labels},
            init::{Init, scaling_init},
            objective::{class_probabilities, neighbor_probabilities, pairwise_sq_distances},
            options::NcaOptions,
            state::TerminationState,
        },
        models::{mahalanobis::MahalanobisTransform, nca::NcaModel},
    },
    optimization::objective_optimizer::LineSearcher,
};

/// Per-sample same-class probabilities of `x` embedded by `l`.
fn class_probs(x: &Array2<f64>, l: &Array2<f64>, y: &[usize]) -> Array1<f64> {
    let (codes, _) = encode_labels(y);
    let mask = SameClassMask::from_labels(&codes);
    let p = neighbor_probabilities(x.dot(&l.t()).view());
    class_probabilities(p.view(), &mask).expect("mask matches")
}

/// Two loose clusters per class in 2-D, interleaved so the identity metric
/// is not already optimal.
fn toy_dataset() -> (Array2<f64>, Vec<usize>) {
    let x = array![
        [0.0, 0.0],
        [0.1, 1.0],
        [-0.1, 2.0],
        [0.05, 3.0],
        [1.0, 0.2],
        [1.1, 1.1],
        [0.9, 2.1],
        [1.05, 2.9],
    ];
    (x, vec![0, 0, 0, 0, 1, 1, 1, 1])
}

#[test]
// Purpose
// -------
// Fitting improves the class probability of every point in the 4-point
// square scenario.
//
// Given
// -----
// - Class 0 at (0,0), (0,1); class 1 at (1,0), (1,1). Both ranges are 1,
//   so L₀ is the identity and every p_i starts at e⁻¹/(2e⁻¹ + e⁻²) ≈ 0.42.
//
// Expect
// ------
// - After fitting, every p_i is strictly larger than before.
fn four_point_square_improves_every_class_probability() {
    // Arrange
    let x = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
    let y = [0usize, 0, 1, 1];
    let l0 = scaling_init(x.view(), 2);
    let before = class_probs(&x, &l0, &y);
    let mut model = NcaModel::new(NcaOptions::default());

    // Act
    model.fit(x.view(), &y).expect("fit succeeds");
    let after = class_probs(&x, model.transformer().expect("fitted"), &y);

    // Assert
    assert_eq!(l0, Array2::eye(2));
    let expected = (-1f64).exp() / (2.0 * (-1f64).exp() + (-2f64).exp());
    for (&b, &a) in before.iter().zip(after.iter()) {
        assert_relative_eq!(b, expected, epsilon = 1e-12);
        assert!(a > b, "p_i should improve: before {b}, after {a}");
    }
}

#[test]
// Purpose
// -------
// The cost of accepted iterations never increases, for both line searches.
//
// Expect
// ------
// - Neither run aborts; `cost_trace` is non-empty, one entry per
//   iteration, and non-increasing.
// - The un-signed objective at the result beats the starting loss.
fn accepted_iteration_costs_are_non_increasing() {
    for ls in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
        // Arrange
        let (x, y) = toy_dataset();
        let start_loss = class_probs(&x, &scaling_init(x.view(), 2), &y).sum();
        let opts = NcaOptions::new(None, 50, None, false, ls, None, Init::Scaling).unwrap();
        let mut model = NcaModel::new(opts);

        // Act
        let info = model.fit(x.view(), &y).expect("fit succeeds").clone();

        // Assert
        assert!(
            !matches!(info.status, TerminationState::Failed(_)),
            "{ls:?} aborted: {}",
            info.message
        );
        assert!(!info.cost_trace.is_empty(), "{ls:?} recorded no iterations");
        assert_eq!(info.cost_trace.len(), info.n_iter);
        for pair in info.cost_trace.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-12, "{ls:?} cost increased: {pair:?}");
        }
        assert!(info.objective > start_loss);
    }
}

#[test]
// Purpose
// -------
// A zero-variance feature is scaled by 1/ε and does not break fitting.
//
// Expect
// ------
// - `L₀[1][1] == 1/ε`.
// - Fitting succeeds with a finite transform.
fn zero_variance_feature_is_floored_and_fit_stays_finite() {
    // Arrange
    let x = array![[0.0, 5.0], [0.3, 5.0], [2.0, 5.0], [2.4, 5.0]];
    let y = ["a", "a", "b", "b"];
    let opts = NcaOptions { max_iter: 5, ..NcaOptions::default() };
    let mut model = NcaModel::new(opts);

    // Act
    let l0 = scaling_init(x.view(), 2);
    let fitted = model.fit(x.view(), &y);

    // Assert
    assert_eq!(l0[[1, 1]], 1.0 / f64::EPSILON);
    assert_relative_eq!(l0[[0, 0]], 1.0 / 2.4, epsilon = 1e-12);
    assert!(fitted.is_ok());
    assert!(model.transformer().unwrap().iter().all(|v| v.is_finite()));
}

#[test]
// Purpose
// -------
// A reduced embedding dimension yields a k-row transform, k-dimensional
// embeddings, and metric helpers consistent with them.
//
// Given
// -----
// - 3-D data, `embedding_dim = Some(2)`.
//
// Expect
// ------
// - Transform is 2×3; `transform(X)` is n×2.
// - `pair_distances` equals the distances between embedded rows.
// - `mahalanobis_matrix` is 3×3 and symmetric.
fn reduced_embedding_dimension_projects_into_k_space() {
    // Arrange
    let x = array![
        [0.0, 0.0, 0.3],
        [0.2, 1.0, -0.1],
        [0.1, 2.0, 0.4],
        [1.0, 0.1, 0.0],
        [1.2, 1.1, 0.2],
        [0.9, 2.1, -0.3],
    ];
    let y = [0, 0, 0, 1, 1, 1];
    let opts = NcaOptions { embedding_dim: Some(2), ..NcaOptions::default() };
    let mut model = NcaModel::new(opts);

    // Act
    model.fit(x.view(), &y).expect("fit succeeds");
    let embedded = model.transform(x.view()).unwrap();
    let m = model.mahalanobis_matrix().unwrap();
    let a = x.select(Axis(0), &[0, 1, 2]);
    let b = x.select(Axis(0), &[3, 4, 5]);
    let pair = model.pair_distances(a.view(), b.view()).unwrap();

    // Assert
    assert_eq!(model.transformer().unwrap().dim(), (2, 3));
    assert_eq!(embedded.dim(), (6, 2));
    assert_eq!(m.dim(), (3, 3));
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(m[[i, j]], m[[j, i]], epsilon = 1e-9);
        }
    }
    let dist = pairwise_sq_distances(embedded.view());
    for i in 0..3 {
        assert_relative_eq!(pair[i], dist[[i, i + 3]].sqrt(), epsilon = 1e-9, max_relative = 1e-9);
    }
}

#[test]
// Purpose
// -------
// Hitting the iteration cap is advisory: the fit returns a transform and
// records the status instead of failing.
fn iteration_cap_is_advisory() {
    // Arrange
    let x = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
    let y = [0, 0, 1, 1];
    let opts = NcaOptions { max_iter: 1, ..NcaOptions::default() };
    let mut model = NcaModel::new(opts);

    // Act
    let info = model.fit(x.view(), &y).expect("cap is not an error").clone();

    // Assert
    assert!(!info.converged);
    assert_eq!(info.status, TerminationState::IterationLimitReached);
    assert_eq!(info.n_iter, 1);
    assert!(!info.message.is_empty());
    assert!(model.transform(x.view()).is_ok());
}
