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

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Accuracy and per category metrics of predictions against the truth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub classes: Vec<ClassMetrics>,
    pub macro_average: ClassMetrics,
    pub weighted_average: ClassMetrics,
}

#[derive(Default)]
struct Counts {
    true_positive: usize,
    predicted: usize,
    support: usize,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

impl ClassificationReport {
    /// Compares [predicted] with [truth] pairwise. Undefined ratios count as 0.
    pub fn evaluate<A, B>(truth: &[A], predicted: &[B]) -> Self
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut counts: BTreeMap<&str, Counts> = BTreeMap::new();
        let mut correct = 0usize;
        let total = truth.len().min(predicted.len());
        for (truth, predicted) in truth.iter().zip(predicted.iter()) {
            let (truth, predicted) = (truth.as_ref(), predicted.as_ref());
            counts.entry(truth).or_default().support += 1;
            counts.entry(predicted).or_default().predicted += 1;
            if truth == predicted {
                correct += 1;
                counts.entry(truth).or_default().true_positive += 1;
            }
        }

        let classes = counts
            .into_iter()
            .map(|(label, counts)| {
                let precision = ratio(counts.true_positive, counts.predicted);
                let recall = ratio(counts.true_positive, counts.support);
                ClassMetrics {
                    label: label.to_string(),
                    precision,
                    recall,
                    f1: f1(precision, recall),
                    support: counts.support,
                }
            })
            .collect::<Vec<_>>();

        let class_count = classes.len().max(1) as f64;
        let macro_average = ClassMetrics {
            label: "macro avg".to_string(),
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / class_count,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / class_count,
            f1: classes.iter().map(|c| c.f1).sum::<f64>() / class_count,
            support: total,
        };
        let weight = |select: fn(&ClassMetrics) -> f64| {
            if total == 0 {
                0.0
            } else {
                classes.iter().map(|c| select(c) * c.support as f64).sum::<f64>() / total as f64
            }
        };
        let weighted_average = ClassMetrics {
            label: "weighted avg".to_string(),
            precision: weight(|c| c.precision),
            recall: weight(|c| c.recall),
            f1: weight(|c| c.f1),
            support: total,
        };

        Self {
            accuracy: ratio(correct, total),
            classes,
            macro_average,
            weighted_average,
        }
    }

    pub fn total(&self) -> usize {
        self.macro_average.support
    }
}

impl Display for ClassificationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.len())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or_default();
        writeln!(f, "{:>width$} {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1-score", "support")?;
        writeln!(f)?;
        let row = |f: &mut Formatter<'_>, c: &ClassMetrics| {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.label, c.precision, c.recall, c.f1, c.support
            )
        };
        for class in &self.classes {
            row(f, class)?;
        }
        writeln!(f)?;
        writeln!(f, "{:>width$} {:>9} {:>9} {:>9.2} {:>9}", "accuracy", "", "", self.accuracy, self.total())?;
        row(f, &self.macro_average)?;
        row(f, &self.weighted_average)
    }
}

#[cfg(test)]
mod test {
    use float_cmp::approx_eq;
    use super::ClassificationReport;

    #[test]
    fn metrics_follow_the_definitions() {
        let truth = ["a", "a", "b", "b", "c"];
        let predicted = ["a", "b", "b", "b", "a"];
        let report = ClassificationReport::evaluate(&truth, &predicted);
        assert!(approx_eq!(f64, report.accuracy, 0.6));
        assert_eq!(report.classes.len(), 3);

        let a = &report.classes[0];
        assert!(approx_eq!(f64, a.precision, 0.5));
        assert!(approx_eq!(f64, a.recall, 0.5));
        assert_eq!(a.support, 2);

        let b = &report.classes[1];
        assert!(approx_eq!(f64, b.precision, 2.0 / 3.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, b.recall, 1.0));
        assert!(approx_eq!(f64, b.f1, 0.8, epsilon = 1e-12));

        let c = &report.classes[2];
        assert!(approx_eq!(f64, c.precision, 0.0));
        assert!(approx_eq!(f64, c.f1, 0.0));

        assert!(approx_eq!(f64, report.macro_average.recall, 0.5));
        assert!(approx_eq!(f64, report.weighted_average.recall, 0.6, epsilon = 1e-12));
        assert_eq!(report.total(), 5);
        assert!(report.to_string().contains("weighted avg"));
    }

    #[test]
    fn empty_input_is_all_zero() {
        let empty: [&str; 0] = [];
        let report = ClassificationReport::evaluate(&empty, &empty);
        assert!(approx_eq!(f64, report.accuracy, 0.0));
        assert!(report.classes.is_empty());
    }
}
