use steward_core::errors::SignalError;
use steward_core::models::QualityReport;
use steward_core::traits::IQualityProvider;
use steward_core::Asset;

/// Reads the corpus-side `quality_score` metadata field. Assets without a
/// parseable score are left out of the report.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataQualityProvider;

impl IQualityProvider for MetadataQualityProvider {
    fn name(&self) -> &str {
        "metadata-quality"
    }

    fn score(&self, assets: &[Asset]) -> Result<QualityReport, SignalError> {
        let scores = assets
            .iter()
            .filter_map(|a| a.metadata_quality_score().map(|s| (a.id.clone(), s.clamp(0.0, 1.0))))
            .collect();
        Ok(QualityReport::new(scores))
    }
}
