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

use camino::Utf8PathBuf;
use classifier::{Solver, TrainParameters};
use text_processing::{Norm, NormalizerConfig, StopWordRepository, VectorizerSettings, Weighting};
use crate::config::{Configs, ExtractionConfig, PathsConfig, SystemConfig, TrainingConfig};

pub const EXAMPLE_CONFIG_FILE: &str = "example_config.json";

pub fn create_example_config() -> Configs {
    Configs {
        system: SystemConfig {
            log_level: log::LevelFilter::Info,
            log_to_file: true,
            workers: 4,
        },
        paths: PathsConfig {
            root: Utf8PathBuf::from("./cvsift_data"),
            models: Some(Utf8PathBuf::from("./cvsift_data/models")),
        },
        normalizer: NormalizerConfig {
            stop_words: vec![StopWordRepository::English],
            fold_accents: true,
            stemmer: None,
        },
        vectorizer: VectorizerSettings {
            weighting: Weighting::TfIdf,
            max_features: 5000,
            norm: Norm::L2,
        },
        classifier: TrainParameters {
            solver: Solver::LinearSvm,
            ..TrainParameters::default()
        },
        extraction: ExtractionConfig {
            name_scan_lines: 3,
            ..ExtractionConfig::default()
        },
        training: TrainingConfig {
            test_size: 0.2,
            ..TrainingConfig::default()
        },
    }
}
