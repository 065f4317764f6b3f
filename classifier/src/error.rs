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

use thiserror::Error;

/// An error from training or assembling a classifier
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Can not train a classifier without examples.")]
    EmptyTrainingData,
    #[error("Expected feature vectors of dimension {expected} but found {found}.")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("The parameter {name} is invalid: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("The model has {labels} labels but {weights} weight vectors and {biases} biases.")]
    MalformedModel {
        labels: usize,
        weights: usize,
        biases: usize,
    },
}
