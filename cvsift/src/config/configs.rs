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

use camino::Utf8Path;
use classifier::TrainParameters;
use config::Config;
use serde::{Deserialize, Serialize};
use text_processing::{NormalizerConfig, VectorizerSettings};
use crate::config::extraction::ExtractionConfig;
use crate::config::paths::PathsConfig;
use crate::config::system::SystemConfig;
use crate::config::training::TrainingConfig;

/// A collection of all config used for training and screening.
/// Can be shared across threads
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default, rename(serialize = "Config"))]
pub struct Configs {
    pub system: SystemConfig,
    pub paths: PathsConfig,
    pub normalizer: NormalizerConfig,
    pub vectorizer: VectorizerSettings,
    pub classifier: TrainParameters,
    pub extraction: ExtractionConfig,
    pub training: TrainingConfig,
}

impl Configs {
    pub fn load_from<P: AsRef<Utf8Path>>(folder: P) -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("./cvsift").required(false))
            .add_source(
                config::File::with_name(folder.as_ref().join("cvsift").as_str()).required(false),
            )
            .add_source(config::Environment::with_prefix("CVSIFT").separator("."))
            .build()?
            .try_deserialize()
    }

    /// Reads `./cvsift` and `./cvsift_data/cvsift` if present, falls back to the defaults otherwise.
    /// A config file that exists but can not be read is an error.
    pub fn discover_or_default() -> Result<Self, config::ConfigError> {
        Self::discover_in(".")
    }

    fn discover_in<P: AsRef<Utf8Path>>(working_dir: P) -> Result<Self, config::ConfigError> {
        let working_dir = working_dir.as_ref();
        Config::builder()
            .add_source(config::File::with_name(working_dir.join("cvsift").as_str()).required(false))
            .add_source(
                config::File::with_name(working_dir.join("cvsift_data").join("cvsift").as_str()).required(false),
            )
            .add_source(config::Environment::with_prefix("CVSIFT").separator("."))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;
    use classifier::Solver;
    use text_processing::Weighting;
    use crate::config::Configs;

    #[test]
    fn can_load_partial_config() {
        let folder = camino_tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(folder.path().join("cvsift.json")).unwrap();
        write!(
            &mut file,
            r#"{{
                "classifier": {{"solver": "LogisticRegression", "cost": 2.0}},
                "vectorizer": {{"weighting": "RawCounts", "norm": "None"}},
                "training": {{"test_size": 0.5}}
            }}"#
        )
        .unwrap();
        drop(file);

        let configs = Configs::load_from(folder.path()).unwrap();
        assert_eq!(configs.classifier.solver, Solver::LogisticRegression);
        assert_eq!(configs.classifier.max_iterations, 1000);
        assert_eq!(configs.vectorizer.weighting, Weighting::RawCounts);
        assert_eq!(configs.vectorizer.max_features, 5000);
        assert_eq!(configs.training.label_column, "Category");
        assert_eq!(configs.extraction.name_scan_lines, 5);
    }

    #[test]
    fn discovery_falls_back_to_the_defaults() {
        let folder = camino_tempfile::tempdir().unwrap();
        let configs = Configs::discover_in(folder.path()).unwrap();
        assert_eq!(configs.vectorizer.max_features, 5000);
        assert_eq!(configs.training.label_column, "Category");
    }

    #[test]
    fn discovery_reports_broken_files() {
        let folder = camino_tempfile::tempdir().unwrap();
        std::fs::write(folder.path().join("cvsift.json"), r#"{"vectorizer": {"max_features": 12"#).unwrap();
        assert!(Configs::discover_in(folder.path()).is_err());

        std::fs::remove_file(folder.path().join("cvsift.json")).unwrap();
        std::fs::create_dir_all(folder.path().join("cvsift_data")).unwrap();
        std::fs::write(folder.path().join("cvsift_data").join("cvsift.json"), r#"{"vectorizer": {"max_features": 12}}"#).unwrap();
        assert_eq!(Configs::discover_in(folder.path()).unwrap().vectorizer.max_features, 12);
    }

    #[test]
    fn default_config_round_trips_as_json() {
        let configs = Configs::default();
        let json = serde_json::to_string(&configs).unwrap();
        let restored: Configs = serde_json::from_str(&json).unwrap();
        assert_eq!(serde_json::to_value(&restored).unwrap(), serde_json::to_value(&configs).unwrap());
    }
}
