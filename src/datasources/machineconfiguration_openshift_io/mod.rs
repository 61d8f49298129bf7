//! Data sources for `machineconfiguration.openshift.io`

use std::sync::Arc;

use crate::provider::DataSource;

pub mod container_runtime_config_v1;
pub mod kubelet_config_v1;
pub mod machine_config_pool_v1;
pub mod machine_config_v1;

/// All data sources of this module
pub fn data_sources() -> Vec<Arc<dyn DataSource>> {
    vec![
        Arc::new(container_runtime_config_v1::ContainerRuntimeConfigV1ManifestDataSource),
        Arc::new(kubelet_config_v1::KubeletConfigV1ManifestDataSource),
        Arc::new(machine_config_pool_v1::MachineConfigPoolV1ManifestDataSource),
        Arc::new(machine_config_v1::MachineConfigV1ManifestDataSource),
    ]
}
