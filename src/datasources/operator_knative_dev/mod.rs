//! Data sources for `operator.knative.dev`

use std::sync::Arc;

use crate::provider::DataSource;

pub mod common;
pub mod knative_eventing_v1beta1;
pub mod knative_serving_v1beta1;

/// All data sources of this module
pub fn data_sources() -> Vec<Arc<dyn DataSource>> {
    vec![
        Arc::new(knative_eventing_v1beta1::KnativeEventingV1beta1ManifestDataSource),
        Arc::new(knative_serving_v1beta1::KnativeServingV1beta1ManifestDataSource),
    ]
}
