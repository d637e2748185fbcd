use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{AnalysisModel, ImageAnalysisModel, ModelError, TextAnalysisModel};
use crate::features::ml::models::{
    ModelInfo, ModelInput, PerformanceRecord, PerformanceStats, Prediction, RecordKind,
    TrainingReport,
};
use crate::shared::validation::{MODEL_TYPE_REGEX, MODEL_VERSION_REGEX};

pub const TEXT_ANALYSIS: &str = "text_analysis";
pub const IMAGE_ANALYSIS: &str = "image_analysis";

/// Most recent records kept per model type
pub const PERFORMANCE_LOG_CAPACITY: usize = 1000;

const RECENT_PREDICTIONS: usize = 10;
const RECENT_TRAININGS: usize = 5;

#[derive(Default)]
struct Registry {
    models: HashMap<String, BTreeMap<String, Arc<dyn AnalysisModel>>>,
    active: HashMap<String, String>,
    performance: HashMap<String, VecDeque<PerformanceRecord>>,
}

impl Registry {
    /// Resolve an explicit or active version to a registered model
    fn resolve(
        &self,
        model_type: &str,
        version: Option<&str>,
    ) -> Result<(String, Arc<dyn AnalysisModel>), ModelError> {
        let versions = self
            .models
            .get(model_type)
            .ok_or_else(|| ModelError::UnknownModelType(model_type.to_string()))?;

        let version = match version {
            Some(version) => version.to_string(),
            None => self
                .active
                .get(model_type)
                .cloned()
                .ok_or_else(|| ModelError::NoActiveVersion(model_type.to_string()))?,
        };

        let model = versions
            .get(&version)
            .cloned()
            .ok_or_else(|| ModelError::UnknownVersion {
                model_type: model_type.to_string(),
                version: version.clone(),
            })?;

        Ok((version, model))
    }

    fn track(&mut self, model_type: &str, record: PerformanceRecord) {
        let log = self.performance.entry(model_type.to_string()).or_default();
        log.push_back(record);
        while log.len() > PERFORMANCE_LOG_CAPACITY {
            log.pop_front();
        }
    }
}

/// Versioned registry of analysis models with per-type active versions
pub struct ModelManager {
    registry: RwLock<Registry>,
}

impl Default for ModelManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelManager {
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
        }
    }

    /// Registry with the built-in text and image models registered and active
    pub async fn with_default_models() -> Result<Self, ModelError> {
        let manager = Self::new();
        manager
            .register(TEXT_ANALYSIS, "1.0.0", Arc::new(TextAnalysisModel::default()))
            .await?;
        manager.set_active(TEXT_ANALYSIS, "1.0.0").await?;
        manager
            .register(IMAGE_ANALYSIS, "1.0.0", Arc::new(ImageAnalysisModel::default()))
            .await?;
        manager.set_active(IMAGE_ANALYSIS, "1.0.0").await?;
        Ok(manager)
    }

    /// Register a model; an existing registration of the same version is replaced
    pub async fn register(
        &self,
        model_type: &str,
        version: &str,
        model: Arc<dyn AnalysisModel>,
    ) -> Result<(), ModelError> {
        if !MODEL_TYPE_REGEX.is_match(model_type) {
            return Err(ModelError::InvalidIdentifier(model_type.to_string()));
        }
        if !MODEL_VERSION_REGEX.is_match(version) {
            return Err(ModelError::InvalidIdentifier(version.to_string()));
        }

        let mut registry = self.registry.write().await;
        registry
            .models
            .entry(model_type.to_string())
            .or_default()
            .insert(version.to_string(), model);

        tracing::info!("Registered model {} v{}", model_type, version);
        Ok(())
    }

    pub async fn set_active(&self, model_type: &str, version: &str) -> Result<(), ModelError> {
        let mut registry = self.registry.write().await;
        registry.resolve(model_type, Some(version))?;
        registry
            .active
            .insert(model_type.to_string(), version.to_string());

        tracing::info!("Set active model for {} to v{}", model_type, version);
        Ok(())
    }

    /// Model for `version`, or the active version when `None`
    pub async fn get(
        &self,
        model_type: &str,
        version: Option<&str>,
    ) -> Result<Arc<dyn AnalysisModel>, ModelError> {
        let registry = self.registry.read().await;
        registry.resolve(model_type, version).map(|(_, model)| model)
    }

    /// Registered versions per type; an unknown type lists no versions
    pub async fn list(&self, model_type: Option<&str>) -> BTreeMap<String, Vec<String>> {
        let registry = self.registry.read().await;
        let versions_of = |model_type: &str| -> Vec<String> {
            registry
                .models
                .get(model_type)
                .map(|versions| versions.keys().cloned().collect())
                .unwrap_or_default()
        };

        match model_type {
            Some(model_type) => BTreeMap::from([(model_type.to_string(), versions_of(model_type))]),
            None => registry
                .models
                .keys()
                .map(|model_type| (model_type.clone(), versions_of(model_type)))
                .collect(),
        }
    }

    pub async fn active_versions(&self) -> BTreeMap<String, String> {
        let registry = self.registry.read().await;
        registry
            .active
            .iter()
            .map(|(model_type, version)| (model_type.clone(), version.clone()))
            .collect()
    }

    pub async fn load(&self, model_type: &str, version: Option<&str>) -> Result<ModelInfo, ModelError> {
        let model = self.get(model_type, version).await?;
        model.load()?;
        Ok(model.info())
    }

    pub async fn predict(
        &self,
        model_type: &str,
        input: &ModelInput,
        version: Option<&str>,
    ) -> Result<Prediction, ModelError> {
        let (resolved, model) = {
            let registry = self.registry.read().await;
            registry.resolve(model_type, version)?
        };

        let prediction = model.predict(input)?;
        self.track(model_type, resolved, RecordKind::Prediction, &prediction)
            .await;
        Ok(prediction)
    }

    pub async fn train(
        &self,
        model_type: &str,
        training: &[Value],
        validation: &[Value],
        version: Option<&str>,
    ) -> Result<TrainingReport, ModelError> {
        let (resolved, model) = {
            let registry = self.registry.read().await;
            registry.resolve(model_type, version)?
        };

        let report = model.train(training, validation)?;
        self.track(model_type, resolved, RecordKind::Training, &report)
            .await;
        Ok(report)
    }

    async fn track<T: Serialize>(
        &self,
        model_type: &str,
        version: String,
        kind: RecordKind,
        result: &T,
    ) {
        let result = match serde_json::to_value(result) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to serialize {:?} result for {}: {}", kind, model_type, e);
                Value::Null
            }
        };

        let record = PerformanceRecord {
            model_version: version,
            timestamp: Utc::now(),
            result,
            kind,
        };
        self.registry.write().await.track(model_type, record);
    }

    pub async fn performance_stats(&self, model_type: &str) -> Result<PerformanceStats, ModelError> {
        let registry = self.registry.read().await;
        if !registry.models.contains_key(model_type) {
            return Err(ModelError::UnknownModelType(model_type.to_string()));
        }

        let empty = VecDeque::new();
        let records = registry.performance.get(model_type).unwrap_or(&empty);

        let of_kind = |kind: RecordKind| -> Vec<&PerformanceRecord> {
            records.iter().filter(|r| r.kind == kind).collect()
        };
        let predictions = of_kind(RecordKind::Prediction);
        let trainings = of_kind(RecordKind::Training);

        let tail = |records: &[&PerformanceRecord], n: usize| -> Vec<PerformanceRecord> {
            records[records.len().saturating_sub(n)..]
                .iter()
                .map(|r| (*r).clone())
                .collect()
        };

        Ok(PerformanceStats {
            model_type: model_type.to_string(),
            total_predictions: predictions.len(),
            total_trainings: trainings.len(),
            recent_predictions: tail(&predictions, RECENT_PREDICTIONS),
            recent_trainings: tail(&trainings, RECENT_TRAININGS),
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_default_models() {
        let manager = ModelManager::with_default_models().await.unwrap();

        let listed = manager.list(None).await;
        assert_eq!(listed.get(TEXT_ANALYSIS), Some(&vec!["1.0.0".to_string()]));
        assert_eq!(listed.get(IMAGE_ANALYSIS), Some(&vec!["1.0.0".to_string()]));

        let active = manager.active_versions().await;
        assert_eq!(active.get(TEXT_ANALYSIS).map(String::as_str), Some("1.0.0"));

        let model = manager.get(TEXT_ANALYSIS, None).await.unwrap();
        assert_eq!(model.info().model_name, "bert-base-uncased");
    }

    #[tokio::test]
    async fn test_list_unknown_type_is_empty() {
        let manager = ModelManager::with_default_models().await.unwrap();
        let listed = manager.list(Some("audio_analysis")).await;
        assert_eq!(listed.get("audio_analysis"), Some(&Vec::new()));
    }

    #[tokio::test]
    async fn test_set_active_rejects_unknown() {
        let manager = ModelManager::with_default_models().await.unwrap();

        assert!(matches!(
            manager.set_active("audio_analysis", "1.0.0").await,
            Err(ModelError::UnknownModelType(_))
        ));
        assert!(matches!(
            manager.set_active(TEXT_ANALYSIS, "9.9.9").await,
            Err(ModelError::UnknownVersion { .. })
        ));
        // active version unchanged
        let active = manager.active_versions().await;
        assert_eq!(active.get(TEXT_ANALYSIS).map(String::as_str), Some("1.0.0"));
    }

    #[tokio::test]
    async fn test_register_replaces_and_activates_new_version() {
        let manager = ModelManager::with_default_models().await.unwrap();
        manager
            .register(
                TEXT_ANALYSIS,
                "1.1.0",
                Arc::new(TextAnalysisModel::new("distilbert", "1.1.0")),
            )
            .await
            .unwrap();
        manager.set_active(TEXT_ANALYSIS, "1.1.0").await.unwrap();

        let model = manager.get(TEXT_ANALYSIS, None).await.unwrap();
        assert_eq!(model.info().model_name, "distilbert");

        let pinned = manager.get(TEXT_ANALYSIS, Some("1.0.0")).await.unwrap();
        assert_eq!(pinned.info().model_name, "bert-base-uncased");

        manager
            .register(
                TEXT_ANALYSIS,
                "1.1.0",
                Arc::new(TextAnalysisModel::new("roberta", "1.1.0")),
            )
            .await
            .unwrap();
        let replaced = manager.get(TEXT_ANALYSIS, None).await.unwrap();
        assert_eq!(replaced.info().model_name, "roberta");
        assert_eq!(manager.list(Some(TEXT_ANALYSIS)).await[TEXT_ANALYSIS].len(), 2);
    }

    #[tokio::test]
    async fn test_register_validates_identifiers() {
        let manager = ModelManager::new();
        let model: Arc<dyn AnalysisModel> = Arc::new(TextAnalysisModel::default());

        assert!(matches!(
            manager.register("Text Analysis", "1.0.0", model.clone()).await,
            Err(ModelError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            manager.register(TEXT_ANALYSIS, "v1", model).await,
            Err(ModelError::InvalidIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn test_get_without_active_version() {
        let manager = ModelManager::new();
        manager
            .register(TEXT_ANALYSIS, "1.0.0", Arc::new(TextAnalysisModel::default()))
            .await
            .unwrap();

        assert!(matches!(
            manager.get(TEXT_ANALYSIS, None).await,
            Err(ModelError::NoActiveVersion(_))
        ));
    }

    #[tokio::test]
    async fn test_load_marks_model_loaded() {
        let manager = ModelManager::with_default_models().await.unwrap();
        let info = manager.load(IMAGE_ANALYSIS, None).await.unwrap();
        assert!(info.is_loaded);
        assert_eq!(info.model_name, "resnet50");
    }

    #[tokio::test]
    async fn test_predict_and_train_are_tracked() {
        let manager = ModelManager::with_default_models().await.unwrap();

        for i in 0..12 {
            manager
                .predict(TEXT_ANALYSIS, &ModelInput::Text(format!("report number {}", i)), None)
                .await
                .unwrap();
        }
        for _ in 0..6 {
            manager
                .train(TEXT_ANALYSIS, &[json!({})], &[], Some("1.0.0"))
                .await
                .unwrap();
        }

        let stats = manager.performance_stats(TEXT_ANALYSIS).await.unwrap();
        assert_eq!(stats.total_predictions, 12);
        assert_eq!(stats.total_trainings, 6);
        assert_eq!(stats.recent_predictions.len(), 10);
        assert_eq!(stats.recent_trainings.len(), 5);
        assert!(stats
            .recent_predictions
            .iter()
            .all(|r| r.model_version == "1.0.0" && r.kind == RecordKind::Prediction));
        assert_eq!(
            stats.recent_predictions.last().unwrap().result["text_length"],
            json!("report number 11".len())
        );
    }

    #[tokio::test]
    async fn test_performance_log_is_bounded() {
        let manager = ModelManager::with_default_models().await.unwrap();
        let input = ModelInput::Bytes(vec![0u8; 10]);
        for _ in 0..(PERFORMANCE_LOG_CAPACITY + 5) {
            manager.predict(IMAGE_ANALYSIS, &input, None).await.unwrap();
        }

        let stats = manager.performance_stats(IMAGE_ANALYSIS).await.unwrap();
        assert_eq!(stats.total_predictions, PERFORMANCE_LOG_CAPACITY);
    }

    #[tokio::test]
    async fn test_failed_predictions_are_not_tracked() {
        let manager = ModelManager::with_default_models().await.unwrap();
        let result = manager
            .predict(IMAGE_ANALYSIS, &ModelInput::Text("oops".into()), None)
            .await;
        assert!(matches!(result, Err(ModelError::UnsupportedInput { .. })));

        let stats = manager.performance_stats(IMAGE_ANALYSIS).await.unwrap();
        assert_eq!(stats.total_predictions, 0);

        assert!(matches!(
            manager.performance_stats("audio_analysis").await,
            Err(ModelError::UnknownModelType(_))
        ));
    }
}
