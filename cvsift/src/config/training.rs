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

/// Config of the offline training
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename(serialize = "Training"))]
pub struct TrainingConfig {
    /// The share of the corpus held out for the evaluation.
    #[serde(default = "_default_test_size")]
    pub test_size: f64,
    /// The seed of the shuffle before splitting.
    #[serde(default = "_default_seed")]
    pub seed: u64,
    /// The column with the document text
    #[serde(default = "_default_text_column")]
    pub text_column: String,
    /// The column with the category
    #[serde(default = "_default_label_column")]
    pub label_column: String,
}

const fn _default_test_size() -> f64 {
    0.3
}

const fn _default_seed() -> u64 {
    42
}

fn _default_text_column() -> String {
    "Resume".to_string()
}

fn _default_label_column() -> String {
    "Category".to_string()
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: _default_test_size(),
            seed: _default_seed(),
            text_column: _default_text_column(),
            label_column: _default_label_column(),
        }
    }
}
