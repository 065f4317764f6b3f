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

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use crate::error::ClassifierError;

/// The family of the binary discriminators trained per category.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Solver {
    /// L2-regularized L2-loss support vector classification, solved in the dual.
    #[default]
    #[strum(to_string = "linear-svm", serialize = "LinearSvm")]
    LinearSvm,
    /// L2-regularized logistic regression, solved in the primal.
    #[strum(to_string = "logistic-regression", serialize = "LogisticRegression")]
    LogisticRegression,
}

/// The parameters for training a one-vs-rest classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainParameters {
    #[serde(default)]
    pub solver: Solver,
    /// The inverse regularization strength.
    #[serde(default = "_default_cost")]
    pub cost: f64,
    /// The stopping tolerance of the solver.
    #[serde(default = "_default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "_default_max_iterations")]
    pub max_iterations: usize,
    /// The value of the constant feature used to learn the bias, 0 disables the bias.
    #[serde(default = "_default_bias")]
    pub bias: f64,
    #[serde(default)]
    pub seed: u64,
}

const fn _default_cost() -> f64 {
    1.0
}

const fn _default_epsilon() -> f64 {
    1e-3
}

const fn _default_max_iterations() -> usize {
    1000
}

const fn _default_bias() -> f64 {
    1.0
}

impl TrainParameters {
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if !(self.cost.is_finite() && self.cost > 0.0) {
            return Err(ClassifierError::InvalidParameter {
                name: "cost",
                reason: format!("{} is not a positive number", self.cost),
            });
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ClassifierError::InvalidParameter {
                name: "epsilon",
                reason: format!("{} is not a positive number", self.epsilon),
            });
        }
        if self.max_iterations == 0 {
            return Err(ClassifierError::InvalidParameter {
                name: "max_iterations",
                reason: "at least one iteration is necessary".to_string(),
            });
        }
        if !(self.bias.is_finite() && self.bias >= 0.0) {
            return Err(ClassifierError::InvalidParameter {
                name: "bias",
                reason: format!("{} is negative or not finite", self.bias),
            });
        }
        Ok(())
    }
}

impl Default for TrainParameters {
    fn default() -> Self {
        Self {
            solver: Solver::default(),
            cost: _default_cost(),
            epsilon: _default_epsilon(),
            max_iterations: _default_max_iterations(),
            bias: _default_bias(),
            seed: 0,
        }
    }
}
