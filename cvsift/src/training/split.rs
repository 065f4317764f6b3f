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

/// The number of held out items, rounded up. At least one item stays for training.
pub fn test_count(total: usize, test_size: f64) -> usize {
    if total < 2 {
        return 0;
    }
    ((total as f64 * test_size).ceil() as usize).min(total - 1)
}

/// Shuffles [items] with [seed] and splits them into a training and a test part.
pub fn train_test_split<T>(mut items: Vec<T>, test_size: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);
    let test = items.split_off(items.len() - test_count(items.len(), test_size));
    (items, test)
}
