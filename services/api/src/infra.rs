use insurance_desk::affiliate::SeededVariants;
use insurance_desk::config::AffiliateConfig;
use insurance_desk::OperationsDesk;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Desk with the standard partner directory and offer catalogue. A configured seed
/// makes the A/B stream reproducible across restarts.
pub(crate) fn build_desk(config: &AffiliateConfig) -> OperationsDesk {
    let desk = OperationsDesk::default();
    match config.variant_seed {
        Some(seed) => desk.with_variants(SeededVariants::from_seed(seed)),
        None => desk,
    }
}
