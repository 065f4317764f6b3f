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

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Config of the paths used by the application
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename(serialize = "Paths"))]
pub struct PathsConfig {
    /// The root path where the application runs
    #[serde(default = "_default_root_folder")]
    pub root: Utf8PathBuf,
    /// The directory with the published models. (default: <root>/models)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Utf8PathBuf>,
}

fn _default_root_folder() -> Utf8PathBuf {
    Utf8PathBuf::from("./cvsift_data")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: _default_root_folder(),
            models: None,
        }
    }
}

impl PathsConfig {
    pub fn root_path(&self) -> &Utf8Path {
        self.root.as_path()
    }

    pub fn dir_models(&self) -> Utf8PathBuf {
        match &self.models {
            Some(models) => models.clone(),
            None => self.root.join("models"),
        }
    }

    pub fn file_log(&self) -> Utf8PathBuf {
        self.root.join("cvsift.log")
    }
}

#[cfg(test)]
mod test {
    use camino::Utf8PathBuf;
    use super::PathsConfig;

    #[test]
    fn models_default_to_the_root() {
        let mut paths = PathsConfig::default();
        assert_eq!(paths.dir_models(), Utf8PathBuf::from("./cvsift_data/models"));
        paths.models = Some(Utf8PathBuf::from("/srv/models"));
        assert_eq!(paths.dir_models(), Utf8PathBuf::from("/srv/models"));
    }
}
