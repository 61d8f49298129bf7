//! Built-in manifest data sources, one module per API group

use std::sync::Arc;

use crate::provider::DataSource;

pub mod machineconfiguration_openshift_io;
pub mod operator_knative_dev;

/// Every built-in data source
pub fn all() -> Vec<Arc<dyn DataSource>> {
    let mut data_sources = Vec::new();
    data_sources.extend(machineconfiguration_openshift_io::data_sources());
    data_sources.extend(operator_knative_dev::data_sources());
    data_sources
}
