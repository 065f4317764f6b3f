//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use text_processing::FeatureVector;
use crate::config::{Solver, TrainParameters};

/// A binary problem with targets of +1 and -1.
pub(crate) struct BinaryProblem<'a> {
    pub features: &'a [&'a FeatureVector],
    pub targets: Vec<f64>,
    pub dimension: usize,
}

/// A trained linear function `w * x + bias`.
pub(crate) struct LinearFunction {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub iterations: usize,
}

impl Solver {
    pub(crate) fn train_binary(&self, problem: &BinaryProblem, parameters: &TrainParameters, seed: u64) -> LinearFunction {
        match self {
            Solver::LinearSvm => dual_coordinate_descent(problem, parameters, seed),
            Solver::LogisticRegression => accelerated_logistic_regression(problem, parameters),
        }
    }
}

/// Splits the augmented weights into the weights and the effective bias.
fn split_augmented(mut augmented: Vec<f64>, bias: f64, iterations: usize) -> LinearFunction {
    let bias_weight = augmented.pop().unwrap_or_default();
    LinearFunction {
        weights: augmented,
        bias: bias_weight * bias,
        iterations,
    }
}

/// Dual coordinate descent for the L2-regularized L2-loss SVC.
///
/// Minimizes `0.5 a^T (Q + D) a - e^T a` with `a >= 0` and `D_ii = 1 / (2C)`.
/// The bias is learned as the weight of a constant feature.
fn dual_coordinate_descent(problem: &BinaryProblem, parameters: &TrainParameters, seed: u64) -> LinearFunction {
    let dimension = problem.dimension;
    let bias = parameters.bias;
    let diag = 0.5 / parameters.cost;

    let mut w = vec![0.0; dimension + 1];
    let mut alpha = vec![0.0; problem.features.len()];
    let qd = problem
        .features
        .iter()
        .map(|x| diag + x.squared_norm() + bias * bias)
        .collect::<Vec<_>>();
    let mut order = (0..problem.features.len()).collect::<Vec<_>>();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut iterations = 0;
    while iterations < parameters.max_iterations {
        iterations += 1;
        order.shuffle(&mut rng);
        let mut pg_max = f64::NEG_INFINITY;
        let mut pg_min = f64::INFINITY;
        for &i in &order {
            let y = problem.targets[i];
            let x = problem.features[i];
            let g = y * (x.dot(&w[..dimension]) + w[dimension] * bias) - 1.0 + alpha[i] * diag;
            let pg = if alpha[i] == 0.0 { g.min(0.0) } else { g };
            pg_max = pg_max.max(pg);
            pg_min = pg_min.min(pg);
            if pg.abs() > 1e-12 {
                let old = alpha[i];
                alpha[i] = (old - g / qd[i]).max(0.0);
                let delta = (alpha[i] - old) * y;
                for (idx, value) in x.entries() {
                    w[*idx as usize] += delta * value;
                }
                w[dimension] += delta * bias;
            }
        }
        if pg_max - pg_min <= parameters.epsilon {
            break;
        }
    }
    if iterations == parameters.max_iterations {
        log::debug!("Dual coordinate descent reached the iteration limit of {iterations}.");
    }

    split_augmented(w, bias, iterations)
}

/// Numerically stable `1 / (1 + exp(margin))`.
fn loss_slope(margin: f64) -> f64 {
    if margin >= 0.0 {
        let e = (-margin).exp();
        e / (1.0 + e)
    } else {
        1.0 / (1.0 + margin.exp())
    }
}

/// Nesterov accelerated gradient descent for the L2-regularized logistic regression.
///
/// Minimizes `1 / (2Cn) |w|^2 + 1/n sum log(1 + exp(-y (w x + b)))`, the bias is not regularized.
/// The step is the inverse of an upper bound of the Lipschitz constant of the gradient.
fn accelerated_logistic_regression(problem: &BinaryProblem, parameters: &TrainParameters) -> LinearFunction {
    let dimension = problem.dimension;
    let bias = parameters.bias;
    let n = problem.features.len() as f64;
    let lambda = 1.0 / (parameters.cost * n);
    let mean_squared_norm = problem
        .features
        .iter()
        .map(|x| x.squared_norm() + bias * bias)
        .sum::<f64>()
        / n;
    let step = 1.0 / (lambda + 0.25 * mean_squared_norm);

    let gradient = |w: &[f64]| -> Vec<f64> {
        let mut grad = vec![0.0; dimension + 1];
        for (x, y) in problem.features.iter().zip(problem.targets.iter()) {
            let margin = y * (x.dot(&w[..dimension]) + w[dimension] * bias);
            let coefficient = -y * loss_slope(margin) / n;
            for (idx, value) in x.entries() {
                grad[*idx as usize] += coefficient * value;
            }
            grad[dimension] += coefficient * bias;
        }
        for (g, w) in grad[..dimension].iter_mut().zip(&w[..dimension]) {
            *g += lambda * w;
        }
        grad
    };

    let mut w = vec![0.0; dimension + 1];
    let mut previous = w.clone();
    let mut iterations = 0;
    while iterations < parameters.max_iterations {
        let momentum = iterations as f64 / (iterations as f64 + 3.0);
        iterations += 1;
        let lookahead = w
            .iter()
            .zip(previous.iter())
            .map(|(current, previous)| current + momentum * (current - previous))
            .collect::<Vec<_>>();
        let grad = gradient(&lookahead);
        let grad_norm = grad.iter().map(|g| g * g).sum::<f64>().sqrt();
        previous = std::mem::replace(&mut w, lookahead);
        if grad_norm <= parameters.epsilon {
            break;
        }
        for (w, g) in w.iter_mut().zip(grad.iter()) {
            *w -= step * g;
        }
    }

    split_augmented(w, bias, iterations)
}
