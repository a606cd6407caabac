use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use pathfinder::config::DataSourceConfig;
use pathfinder::eligibility::{EligibilityEngine, EligibilityService, ProfileSubmission};
use pathfinder::error::AppError;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the eligibility service from configured (or bundled) data sources.
///
/// `catalog_override` replaces the configured catalog directory when present.
pub(crate) fn load_service(
    data: &DataSourceConfig,
    catalog_override: Option<PathBuf>,
) -> Result<EligibilityService, AppError> {
    let data = match catalog_override {
        Some(dir) => DataSourceConfig {
            catalog_dir: Some(dir),
            tables_dir: data.tables_dir.clone(),
        },
        None => data.clone(),
    };

    let tables = data.load_tables()?;
    let catalog = data.load_catalog()?;
    info!(
        programs = catalog.len(),
        datasets = catalog.versions().len(),
        "program catalog loaded"
    );

    Ok(EligibilityService::new(EligibilityEngine::new(tables), catalog))
}

pub(crate) fn read_submission(path: &Path) -> Result<ProfileSubmission, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_service_loads_without_directories() {
        let service = load_service(&DataSourceConfig::default(), None).expect("bundled data loads");
        assert!(!service.catalog().is_empty());
        assert!(service.program("uk-swv").is_ok());
    }

    #[test]
    fn catalog_override_must_exist() {
        let error = load_service(
            &DataSourceConfig::default(),
            Some(PathBuf::from("/definitely/not/a/catalog/dir")),
        )
        .err()
        .expect("missing directory is an error");
        assert!(matches!(error, AppError::Catalog(_)));
    }

    #[test]
    fn unreadable_submission_surfaces_io_error() {
        let error = read_submission(Path::new("/definitely/not/a/profile.json"))
            .expect_err("missing file is an error");
        assert!(matches!(error, AppError::Io(_)));
    }
}
