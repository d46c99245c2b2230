//! Squared-error regression tree used as the boosting weak learner
//!
//! Trees are stored as a flat node array with the root at index 0. A sample
//! goes left when `row[feature] <= threshold`.

use serde::{Deserialize, Serialize};

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 3,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

/// Best split found at a node
#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

struct TreeBuilder<'a> {
    rows: &'a [Vec<f64>],
    targets: &'a [f64],
    feature_order: &'a [usize],
    params: TreeParams,
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Fit a tree to `targets`.
    ///
    /// Features are examined in `feature_order`; when two features give the
    /// same gain the one visited first wins.
    pub fn fit(
        rows: &[Vec<f64>],
        targets: &[f64],
        feature_order: &[usize],
        params: TreeParams,
    ) -> Self {
        let mut builder = TreeBuilder {
            rows,
            targets,
            feature_order,
            params,
            nodes: Vec::new(),
        };
        let samples: Vec<usize> = (0..rows.len()).collect();
        builder.grow(samples, 0);

        Self {
            nodes: builder.nodes,
        }
    }

    /// Predict the target for one row
    pub(crate) fn predict(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                None => return 0.0,
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    /// Length of the longest root-to-leaf path, counted in splits
    pub fn depth(&self) -> usize {
        fn depth_from(nodes: &[Node], index: usize) -> usize {
            match &nodes[index] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => {
                    1 + depth_from(nodes, *left).max(depth_from(nodes, *right))
                }
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            depth_from(&self.nodes, 0)
        }
    }

    /// Highest feature index referenced by any split
    pub fn max_feature_index(&self) -> Option<usize> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Split { feature, .. } => Some(*feature),
                Node::Leaf { .. } => None,
            })
            .max()
    }
}

impl TreeBuilder<'_> {
    /// Grow the subtree for `samples` and return its node index
    fn grow(&mut self, samples: Vec<usize>, depth: usize) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node::Leaf {
            value: self.mean_target(&samples),
        });

        let splittable = depth < self.params.max_depth
            && samples.len() >= self.params.min_samples_split
            && samples.len() >= 2 * self.params.min_samples_leaf;
        if !splittable {
            return index;
        }

        let Some(split) = self.best_split(&samples) else {
            return index;
        };

        let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
            .iter()
            .partition(|&&sample| self.rows[sample][split.feature] <= split.threshold);

        let left = self.grow(left_samples, depth + 1);
        let right = self.grow(right_samples, depth + 1);
        self.nodes[index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        index
    }

    fn mean_target(&self, samples: &[usize]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().map(|&s| self.targets[s]).sum::<f64>() / samples.len() as f64
    }

    /// Find the split with the largest squared-error reduction, if any
    fn best_split(&self, samples: &[usize]) -> Option<SplitCandidate> {
        let n = samples.len();
        if n < 2 {
            return None;
        }
        let total: f64 = samples.iter().map(|&s| self.targets[s]).sum();
        let parent_score = total * total / n as f64;
        let min_leaf = self.params.min_samples_leaf.max(1);

        let mut best: Option<SplitCandidate> = None;
        let mut order = samples.to_vec();

        for &feature in self.feature_order {
            order.sort_by(|&a, &b| self.rows[a][feature].total_cmp(&self.rows[b][feature]));

            let mut left_sum = 0.0;
            for position in 0..n - 1 {
                let sample = order[position];
                left_sum += self.targets[sample];

                let here = self.rows[sample][feature];
                let next = self.rows[order[position + 1]][feature];
                if here == next {
                    continue;
                }

                let left_count = position + 1;
                let right_count = n - left_count;
                if left_count < min_leaf || right_count < min_leaf {
                    continue;
                }

                // SSE reduction = sum_l^2/n_l + sum_r^2/n_r - sum^2/n
                let right_sum = total - left_sum;
                let gain = left_sum * left_sum / left_count as f64
                    + right_sum * right_sum / right_count as f64
                    - parent_score;

                if gain > best.map_or(0.0, |b| b.gain) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: midpoint(here, next),
                        gain,
                    });
                }
            }
        }

        best
    }
}

/// Midpoint between two adjacent sorted values that still separates them
fn midpoint(low: f64, high: f64) -> f64 {
    let mid = low + (high - low) / 2.0;
    if mid >= high || mid.is_infinite() {
        low
    } else {
        mid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_features(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_constant_targets_make_single_leaf() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let targets = vec![7.0, 7.0, 7.0];

        let tree = RegressionTree::fit(&rows, &targets, &all_features(2), TreeParams::default());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict(&[100.0, 100.0]), 7.0);
    }

    #[test]
    fn test_step_function_is_learned() {
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = (0..10).map(|i| if i < 5 { 1.0 } else { 9.0 }).collect();

        let tree = RegressionTree::fit(&rows, &targets, &all_features(1), TreeParams::default());
        assert_eq!(tree.predict(&[2.0]), 1.0);
        assert_eq!(tree.predict(&[7.0]), 9.0);
        // The first split lands halfway between 4 and 5
        assert_eq!(tree.predict(&[4.4]), 1.0);
        assert_eq!(tree.predict(&[4.6]), 9.0);
    }

    #[test]
    fn test_depth_limit_is_respected() {
        let rows: Vec<Vec<f64>> = (0..64).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = (0..64).map(|i| (i * i) as f64).collect();

        let params = TreeParams {
            max_depth: 2,
            ..Default::default()
        };
        let tree = RegressionTree::fit(&rows, &targets, &all_features(1), params);
        assert!(tree.depth() <= 2);
        assert!(tree.leaf_count() <= 4);
    }

    #[test]
    fn test_min_samples_leaf_blocks_small_leaves() {
        let rows: Vec<Vec<f64>> = (0..4).map(|i| vec![i as f64]).collect();
        let targets = vec![0.0, 0.0, 0.0, 100.0];

        let params = TreeParams {
            max_depth: 3,
            min_samples_split: 2,
            min_samples_leaf: 2,
        };
        let tree = RegressionTree::fit(&rows, &targets, &all_features(1), params);
        // Only the 2/2 split is allowed, so no leaf isolates the outlier
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.predict(&[3.0]), 50.0);
    }

    #[test]
    fn test_feature_order_breaks_ties() {
        // Both features separate the targets identically
        let rows = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        let targets = vec![0.0, 1.0];
        let params = TreeParams {
            max_depth: 1,
            ..Default::default()
        };

        let first = RegressionTree::fit(&rows, &targets, &[1, 0], params);
        assert_eq!(first.max_feature_index(), Some(1));

        let second = RegressionTree::fit(&rows, &targets, &[0, 1], params);
        assert_eq!(second.max_feature_index(), Some(0));
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(midpoint(1.0, 2.0), 1.5);
        assert_eq!(midpoint(-1.0, 1.0), 0.0);
    }
}
