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

use std::collections::BTreeSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use text_processing::FeatureVector;
use crate::config::{Solver, TrainParameters};
use crate::error::ClassifierError;
use crate::solver::BinaryProblem;

/// A struct implementing this is used as train data.
pub trait TrainingExample {
    /// The category of the entry
    fn label(&self) -> &str;

    /// The vectorized document of the entry
    fn features(&self) -> &FeatureVector;
}

impl<L> TrainingExample for (L, FeatureVector) where L: AsRef<str> {
    fn label(&self) -> &str {
        self.0.as_ref()
    }

    fn features(&self) -> &FeatureVector {
        &self.1
    }
}

/// A one-vs-rest linear classifier over a closed set of categories.
///
/// The labels are kept in lexical order. When several categories reach the same
/// highest score, the first of them in this order wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierModel {
    labels: Vec<String>,
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
    dimension: usize,
    solver: Solver,
}

impl ClassifierModel {
    /// Assembles a model from already learned parameters.
    pub fn from_parts(
        labels: Vec<String>,
        weights: Vec<Vec<f64>>,
        biases: Vec<f64>,
        dimension: usize,
        solver: Solver,
    ) -> Result<Self, ClassifierError> {
        if labels.is_empty() || labels.len() != weights.len() || labels.len() != biases.len() {
            return Err(ClassifierError::MalformedModel {
                labels: labels.len(),
                weights: weights.len(),
                biases: biases.len(),
            });
        }
        if let Some(found) = weights.iter().map(Vec::len).find(|len| *len != dimension) {
            return Err(ClassifierError::DimensionMismatch { expected: dimension, found });
        }
        if !labels.iter().tuple_windows().all(|(a, b)| a < b) {
            return Err(ClassifierError::InvalidParameter {
                name: "labels",
                reason: "the labels have to be unique and sorted".to_string(),
            });
        }
        Ok(Self {
            labels,
            weights,
            biases,
            dimension,
            solver,
        })
    }

    /// Trains one binary discriminator per category against all other categories.
    pub fn fit<T: TrainingExample>(examples: &[T], parameters: &TrainParameters) -> Result<Self, ClassifierError> {
        parameters.validate()?;
        let first = examples.first().ok_or(ClassifierError::EmptyTrainingData)?;
        let dimension = first.features().dimension();
        if let Some(found) = examples
            .iter()
            .map(|example| example.features().dimension())
            .find(|found| *found != dimension)
        {
            return Err(ClassifierError::DimensionMismatch { expected: dimension, found });
        }

        let labels = examples
            .iter()
            .map(|example| example.label())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect_vec();
        let features = examples.iter().map(|example| example.features()).collect_vec();

        log::info!(
            "Train {} classifier for {} categories with {} examples of dimension {}.",
            parameters.solver,
            labels.len(),
            examples.len(),
            dimension
        );

        let mut weights = Vec::with_capacity(labels.len());
        let mut biases = Vec::with_capacity(labels.len());
        for (position, label) in labels.iter().enumerate() {
            let problem = BinaryProblem {
                features: &features,
                targets: examples
                    .iter()
                    .map(|example| if example.label() == label { 1.0 } else { -1.0 })
                    .collect(),
                dimension,
            };
            let function = parameters.solver.train_binary(
                &problem,
                parameters,
                parameters.seed.wrapping_add(position as u64),
            );
            log::debug!("Trained {label:?} vs rest in {} iterations.", function.iterations);
            weights.push(function.weights);
            biases.push(function.bias);
        }

        Self::from_parts(labels, weights, biases, dimension, parameters.solver)
    }

    /// The decision value of every category, in label order.
    pub fn scores<'a>(&'a self, vector: &FeatureVector) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        let scores = self
            .weights
            .iter()
            .zip(self.biases.iter())
            .map(|(weights, bias)| vector.dot(weights) + bias)
            .collect_vec();
        self.labels.iter().map(String::as_str).zip(scores)
    }

    /// Returns the highest scoring category.
    pub fn predict(&self, vector: &FeatureVector) -> &str {
        let mut scores = self.scores(vector);
        // from_parts guarantees at least one label
        let (mut best_label, mut best_score) = scores.next().unwrap_or(("", f64::NEG_INFINITY));
        for (label, score) in scores {
            if score > best_score {
                best_label = label;
                best_score = score;
            }
        }
        best_label
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn solver(&self) -> Solver {
        self.solver
    }
}

#[cfg(test)]
mod test {
    use text_processing::FeatureVector;
    use crate::config::{Solver, TrainParameters};
    use crate::error::ClassifierError;
    use super::ClassifierModel;

    fn examples() -> Vec<(&'static str, FeatureVector)> {
        vec![
            ("Data Scientist", FeatureVector::from_dense(&[1.0, 0.0, 0.0])),
            ("Data Scientist", FeatureVector::from_dense(&[0.9, 0.1, 0.0])),
            ("Software Engineer", FeatureVector::from_dense(&[0.0, 1.0, 0.0])),
            ("Software Engineer", FeatureVector::from_dense(&[0.1, 0.9, 0.0])),
            ("Accountant", FeatureVector::from_dense(&[0.0, 0.0, 1.0])),
            ("Accountant", FeatureVector::from_dense(&[0.0, 0.1, 0.9])),
        ]
    }

    #[test]
    fn separable_categories_are_learned() {
        for solver in [Solver::LinearSvm, Solver::LogisticRegression] {
            let parameters = TrainParameters {
                solver,
                ..TrainParameters::default()
            };
            let model = ClassifierModel::fit(&examples(), &parameters).unwrap();
            assert_eq!(model.labels(), &["Accountant", "Data Scientist", "Software Engineer"]);
            for (label, vector) in examples() {
                assert_eq!(model.predict(&vector), label, "{solver}");
            }
        }
    }

    #[test]
    fn training_and_prediction_are_deterministic() {
        let a = ClassifierModel::fit(&examples(), &TrainParameters::default()).unwrap();
        let b = ClassifierModel::fit(&examples(), &TrainParameters::default()).unwrap();
        let probe = FeatureVector::from_dense(&[0.4, 0.5, 0.3]);
        let first = a.predict(&probe).to_string();
        for _ in 0..10 {
            assert_eq!(a.predict(&probe), first);
            assert_eq!(b.predict(&probe), first);
        }
        assert_eq!(
            a.scores(&probe).collect::<Vec<_>>(),
            b.scores(&probe).collect::<Vec<_>>()
        );
    }

    #[test]
    fn ties_go_to_the_first_label() {
        let model = ClassifierModel::from_parts(
            vec!["Accountant".to_string(), "Designer".to_string(), "Engineer".to_string()],
            vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 0.0]],
            vec![0.0, 0.0, 0.0],
            2,
            Solver::LinearSvm,
        )
        .unwrap();
        assert_eq!(model.predict(&FeatureVector::zero(2)), "Accountant");
        assert_eq!(model.predict(&FeatureVector::from_dense(&[1.0, 0.0])), "Designer");
        assert_eq!(model.predict(&FeatureVector::from_dense(&[1.0, 1.0])), "Accountant");
    }

    #[test]
    fn invalid_input_is_rejected() {
        let empty: Vec<(&str, FeatureVector)> = Vec::new();
        assert!(matches!(
            ClassifierModel::fit(&empty, &TrainParameters::default()),
            Err(ClassifierError::EmptyTrainingData)
        ));
        let mixed = vec![
            ("a", FeatureVector::from_dense(&[1.0, 0.0])),
            ("b", FeatureVector::from_dense(&[1.0])),
        ];
        assert!(matches!(
            ClassifierModel::fit(&mixed, &TrainParameters::default()),
            Err(ClassifierError::DimensionMismatch { expected: 2, found: 1 })
        ));
        assert!(ClassifierModel::from_parts(
            vec!["b".to_string(), "a".to_string()],
            vec![vec![0.0], vec![0.0]],
            vec![0.0, 0.0],
            1,
            Solver::LinearSvm,
        )
        .is_err());
    }

    #[test]
    fn survives_persistence() {
        let model = ClassifierModel::fit(&examples(), &TrainParameters::default()).unwrap();
        let restored: ClassifierModel = bincode::deserialize(&bincode::serialize(&model).unwrap()).unwrap();
        let probe = FeatureVector::from_dense(&[0.2, 0.3, 0.9]);
        assert_eq!(
            restored.scores(&probe).collect::<Vec<_>>(),
            model.scores(&probe).collect::<Vec<_>>()
        );
    }
}
