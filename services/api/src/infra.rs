use chrono::{DateTime, Utc};
use conservador::config::SiteConfig;
use conservador::registry::RegistryCatalog;
use conservador::site::PageRenderer;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: &'static RegistryCatalog,
    pub(crate) site: Arc<SiteConfig>,
    pub(crate) started_at: DateTime<Utc>,
}

impl AppState {
    pub(crate) fn new(metrics: PrometheusHandle, site: SiteConfig) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            catalog: RegistryCatalog::standard(),
            site: Arc::new(site),
            started_at: Utc::now(),
        }
    }

    pub(crate) fn renderer(&self) -> PageRenderer<'static> {
        PageRenderer::new(self.catalog, self.site.as_ref().clone())
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .build_recorder()
        .handle();
    AppState::new(handle, SiteConfig::default())
}
