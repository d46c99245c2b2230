//! Skill model: training, inference and persistence
//!
//! A [`SkillModel`] is produced by [`train`] and is immutable afterwards, so a
//! single instance can serve concurrent read-only predictions. The trained
//! model is passed around as an explicit value rather than held globally.

use crate::error::{BalancerError, Result};
use crate::features::encoder::{
    encode, FeatureVector, PlayerStatisticsRecord, FEATURE_LEN, FEATURE_NAMES,
};
use crate::skill::gbdt::{Ensemble, GradientBoostingConfig};
use crate::types::{PlayerId, Roster};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info};

/// One labelled training row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub features: Vec<f64>,
    pub label: f64,
}

impl TrainingExample {
    pub fn new(features: Vec<f64>, label: f64) -> Self {
        Self { features, label }
    }

    /// Encode a statistics record and pair it with its label
    pub fn from_record(record: &PlayerStatisticsRecord, label: f64) -> Result<Self> {
        Ok(Self {
            features: encode(record)?.into_inner(),
            label,
        })
    }
}

/// Input accepted by [`predict`]: a raw record or an already encoded vector
#[derive(Debug, Clone, Copy)]
pub enum SkillInput<'a> {
    Record(&'a PlayerStatisticsRecord),
    Vector(&'a [f64]),
}

impl<'a> From<&'a PlayerStatisticsRecord> for SkillInput<'a> {
    fn from(record: &'a PlayerStatisticsRecord) -> Self {
        SkillInput::Record(record)
    }
}

impl<'a> From<&'a FeatureVector> for SkillInput<'a> {
    fn from(vector: &'a FeatureVector) -> Self {
        SkillInput::Vector(vector.as_slice())
    }
}

impl<'a> From<&'a [f64]> for SkillInput<'a> {
    fn from(values: &'a [f64]) -> Self {
        SkillInput::Vector(values)
    }
}

/// Trained skill estimator.
///
/// `SkillModel::default()` is an unfitted model; every prediction on it fails
/// with [`BalancerError::UnfittedModel`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillModel {
    ensemble: Option<Ensemble>,
}

/// Train a skill model with the default boosting configuration
pub fn train(examples: &[TrainingExample]) -> Result<SkillModel> {
    train_with_config(examples, &GradientBoostingConfig::default())
}

/// Train a skill model with an explicit boosting configuration
pub fn train_with_config(
    examples: &[TrainingExample],
    config: &GradientBoostingConfig,
) -> Result<SkillModel> {
    if examples.is_empty() {
        return Err(BalancerError::EmptyTrainingSet.into());
    }
    config.validate()?;

    for (index, example) in examples.iter().enumerate() {
        if example.features.len() != FEATURE_LEN {
            return Err(BalancerError::length_mismatch(
                format!("training example {} features", index),
                FEATURE_LEN,
                example.features.len(),
            )
            .into());
        }
        if !example.label.is_finite() {
            return Err(BalancerError::Validation {
                field: format!("training example {} label", index),
                expected: "finite value".to_string(),
                actual: example.label.to_string(),
            }
            .into());
        }
        if let Some((position, value)) = example
            .features
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(BalancerError::Validation {
                field: format!("training example {} {}", index, FEATURE_NAMES[position]),
                expected: "finite value".to_string(),
                actual: value.to_string(),
            }
            .into());
        }
    }

    let rows: Vec<Vec<f64>> = examples.iter().map(|e| e.features.clone()).collect();
    let labels: Vec<f64> = examples.iter().map(|e| e.label).collect();

    debug!("Training skill model on {} examples", examples.len());
    let ensemble = Ensemble::fit(&rows, &labels, config);
    info!(
        "Skill model trained: {} stages, initial prediction {:.4}",
        ensemble.trees.len(),
        ensemble.init
    );

    Ok(SkillModel {
        ensemble: Some(ensemble),
    })
}

/// Predict the skill score for a record or feature vector
pub fn predict<'a>(model: &SkillModel, input: impl Into<SkillInput<'a>>) -> Result<f64> {
    match input.into() {
        SkillInput::Record(record) => model.predict(record),
        SkillInput::Vector(values) => model.predict_vector(values),
    }
}

impl SkillModel {
    /// Whether this model was produced by training
    pub fn is_fitted(&self) -> bool {
        self.ensemble.is_some()
    }

    /// Number of boosting stages, 0 when unfitted
    pub fn n_stages(&self) -> usize {
        self.ensemble.as_ref().map_or(0, |e| e.trees.len())
    }

    /// Predict the skill score for a raw statistics record
    pub fn predict(&self, record: &PlayerStatisticsRecord) -> Result<f64> {
        let ensemble = self.fitted()?;
        let vector = encode(record)?;
        Ok(ensemble.predict(vector.as_slice()))
    }

    /// Predict the skill score for an encoded vector
    pub fn predict_vector(&self, values: &[f64]) -> Result<f64> {
        let ensemble = self.fitted()?;
        if values.len() != ensemble.n_features {
            return Err(BalancerError::length_mismatch(
                "feature vector",
                ensemble.n_features,
                values.len(),
            )
            .into());
        }
        Ok(ensemble.predict(values))
    }

    fn fitted(&self) -> Result<&Ensemble> {
        self.ensemble
            .as_ref()
            .ok_or_else(|| BalancerError::UnfittedModel.into())
    }

    /// Persist the model as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create model file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("Failed to write model file {}", path.display()))?;
        info!("Saved skill model to {}", path.display());
        Ok(())
    }

    /// Load a model written by [`SkillModel::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open model file {}", path.display()))?;
        let model: SkillModel = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse model file {}", path.display()))?;
        model.check_layout()?;
        Ok(model)
    }

    /// Reject models whose trees cannot apply to the current vector layout
    fn check_layout(&self) -> Result<()> {
        let Some(ensemble) = &self.ensemble else {
            return Ok(());
        };
        if ensemble.n_features != FEATURE_LEN {
            return Err(BalancerError::length_mismatch(
                "model feature count",
                FEATURE_LEN,
                ensemble.n_features,
            )
            .into());
        }
        let max_feature = ensemble
            .trees
            .iter()
            .filter_map(|tree| tree.max_feature_index())
            .max();
        if let Some(feature) = max_feature {
            if feature >= FEATURE_LEN {
                return Err(BalancerError::Validation {
                    field: "model split feature".to_string(),
                    expected: format!("index below {}", FEATURE_LEN),
                    actual: feature.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Anything that can turn a statistics record into a skill score
#[cfg_attr(test, mockall::automock)]
pub trait SkillEstimator: Send + Sync {
    fn estimate(&self, record: &PlayerStatisticsRecord) -> Result<f64>;
}

impl SkillEstimator for SkillModel {
    fn estimate(&self, record: &PlayerStatisticsRecord) -> Result<f64> {
        self.predict(record)
    }
}

/// Score every player and collect the results into a roster.
///
/// Fails on the first estimation error or on a repeated player id.
pub fn score_roster(
    estimator: &dyn SkillEstimator,
    players: &[(PlayerId, PlayerStatisticsRecord)],
) -> Result<Roster> {
    let mut roster = Roster::new();
    for (player_id, record) in players {
        let score = estimator
            .estimate(record)
            .with_context(|| format!("Failed to score player {}", player_id))?;
        if roster.insert(player_id.clone(), score).is_some() {
            return Err(BalancerError::Validation {
                field: "player_id".to_string(),
                expected: "unique identifiers".to_string(),
                actual: format!("duplicate {}", player_id),
            }
            .into());
        }
        debug!("Scored player {}: {:.4}", player_id, score);
    }
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tier: u8, kda: f64) -> PlayerStatisticsRecord {
        PlayerStatisticsRecord {
            tier,
            division: 2,
            league_points: 30,
            win_rate: 0.5,
            account_level: 120,
            avg_kda: kda,
            top_mastery_scores: vec![10_000, 5_000, 1_000],
            lane_distribution: vec![0.2; 5],
            ..Default::default()
        }
    }

    #[test]
    fn test_train_empty_set_fails() {
        let err = train(&[]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BalancerError>(),
            Some(&BalancerError::EmptyTrainingSet)
        );
    }

    #[test]
    fn test_train_rejects_mismatched_vector() {
        let examples = vec![
            TrainingExample::from_record(&record(3, 2.0), 1000.0).unwrap(),
            TrainingExample::new(vec![1.0; 22], 900.0),
        ];

        let err = train(&examples).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BalancerError>(),
            Some(BalancerError::Validation { .. })
        ));
    }

    #[test]
    fn test_train_rejects_non_finite_label() {
        let rec = record(3, 2.0);
        let examples = vec![
            TrainingExample::from_record(&rec, f64::NAN).unwrap(),
            TrainingExample::from_record(&rec, 1.0).unwrap(),
        ];

        let err = train(&examples).unwrap_err();
        match err.downcast_ref::<BalancerError>() {
            Some(BalancerError::Validation { field, .. }) => {
                assert_eq!(field, "training example 0 label");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_train_rejects_non_finite_feature() {
        let mut rec = record(3, 2.0);
        rec.avg_kda = f64::INFINITY;
        let examples = vec![
            TrainingExample::from_record(&record(2, 1.0), 1.0).unwrap(),
            TrainingExample::from_record(&rec, 2.0).unwrap(),
        ];

        let err = train(&examples).unwrap_err();
        match err.downcast_ref::<BalancerError>() {
            Some(BalancerError::Validation { field, actual, .. }) => {
                assert_eq!(field, "training example 1 avg_kda");
                assert_eq!(actual, "inf");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_trained_model_has_default_stage_count() {
        let model = train(&[TrainingExample::from_record(&record(4, 3.0), 10.0).unwrap()]).unwrap();
        assert!(model.is_fitted());
        assert_eq!(model.n_stages(), 100);
        assert_eq!(SkillModel::default().n_stages(), 0);
    }

    #[test]
    fn test_identical_examples_predict_label() {
        let rec = record(4, 3.0);
        let examples = vec![
            TrainingExample::from_record(&rec, 1500.0).unwrap(),
            TrainingExample::from_record(&rec, 1500.0).unwrap(),
        ];

        let model = train(&examples).unwrap();
        let prediction = predict(&model, &rec).unwrap();
        assert!((prediction - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_unfitted_model_fails() {
        let model = SkillModel::default();
        assert!(!model.is_fitted());

        let err = predict(&model, &record(1, 1.0)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BalancerError>(),
            Some(&BalancerError::UnfittedModel)
        );
    }

    #[test]
    fn test_predict_record_and_vector_agree() {
        let examples: Vec<TrainingExample> = (1..=8)
            .map(|tier| {
                TrainingExample::from_record(&record(tier, tier as f64), tier as f64 * 100.0)
                    .unwrap()
            })
            .collect();
        let model = train(&examples).unwrap();

        let rec = record(5, 5.0);
        let vector = encode(&rec).unwrap();
        assert_eq!(
            predict(&model, &rec).unwrap(),
            predict(&model, &vector).unwrap()
        );
    }

    #[test]
    fn test_predict_vector_rejects_wrong_length() {
        let rec = record(2, 2.0);
        let model = train(&[TrainingExample::from_record(&rec, 1.0).unwrap()]).unwrap();

        let short = vec![0.0; 5];
        assert!(predict(&model, short.as_slice()).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let examples: Vec<TrainingExample> = (1..=6)
            .map(|tier| TrainingExample::from_record(&record(tier, 2.0), tier as f64).unwrap())
            .collect();
        let model = train(&examples).unwrap();

        let path = std::env::temp_dir().join(format!(
            "team-balancer-model-{}.json",
            std::process::id()
        ));
        model.save(&path).unwrap();
        let loaded = SkillModel::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let rec = record(3, 2.0);
        assert_eq!(model.predict(&rec).unwrap(), loaded.predict(&rec).unwrap());
    }

    #[test]
    fn test_score_roster_uses_estimator() {
        let mut estimator = MockSkillEstimator::new();
        estimator
            .expect_estimate()
            .times(2)
            .returning(|record| Ok(f64::from(record.tier) * 10.0));

        let players = vec![
            ("alice".to_string(), record(3, 1.0)),
            ("bob".to_string(), record(7, 1.0)),
        ];
        let roster = score_roster(&estimator, &players).unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster["alice"], 30.0);
        assert_eq!(roster["bob"], 70.0);
    }

    #[test]
    fn test_score_roster_rejects_duplicates() {
        let mut estimator = MockSkillEstimator::new();
        estimator.expect_estimate().returning(|_| Ok(1.0));

        let players = vec![
            ("alice".to_string(), record(3, 1.0)),
            ("alice".to_string(), record(4, 1.0)),
        ];
        assert!(score_roster(&estimator, &players).is_err());
    }

    #[test]
    fn test_score_roster_propagates_errors() {
        let mut estimator = MockSkillEstimator::new();
        estimator
            .expect_estimate()
            .returning(|_| Err(BalancerError::UnfittedModel.into()));

        let players = vec![("alice".to_string(), record(3, 1.0))];
        let err = score_roster(&estimator, &players).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BalancerError>(),
            Some(&BalancerError::UnfittedModel)
        );
    }
}
