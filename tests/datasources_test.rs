use k8s_manifests::Provider;
use rstest::rstest;
use serde_json::{json, Value};

fn provider() -> Provider {
    Provider::with_builtin_data_sources().unwrap()
}

fn parse(yaml: &str) -> serde_yaml::Value {
    serde_yaml::from_str(yaml).unwrap()
}

#[rstest]
#[case(
    "k8s_machineconfiguration_openshift_io_machine_config_v1_manifest",
    json!({"metadata": {"name": "example"}}),
    "machineconfiguration.openshift.io/v1",
    "MachineConfig",
    true
)]
#[case(
    "k8s_machineconfiguration_openshift_io_machine_config_pool_v1_manifest",
    json!({"metadata": {"name": "worker"}}),
    "machineconfiguration.openshift.io/v1",
    "MachineConfigPool",
    true
)]
#[case(
    "k8s_machineconfiguration_openshift_io_kubelet_config_v1_manifest",
    json!({"metadata": {"name": "set-max-pods"}}),
    "machineconfiguration.openshift.io/v1",
    "KubeletConfig",
    true
)]
#[case(
    "k8s_machineconfiguration_openshift_io_container_runtime_config_v1_manifest",
    json!({"metadata": {"name": "set-log-level"}}),
    "machineconfiguration.openshift.io/v1",
    "ContainerRuntimeConfig",
    true
)]
#[case(
    "k8s_operator_knative_dev_knative_serving_v1beta1_manifest",
    json!({"metadata": {"name": "knative-serving", "namespace": "knative-serving"}}),
    "operator.knative.dev/v1beta1",
    "KnativeServing",
    false
)]
#[case(
    "k8s_operator_knative_dev_knative_eventing_v1beta1_manifest",
    json!({"metadata": {"name": "knative-eventing", "namespace": "knative-eventing"}}),
    "operator.knative.dev/v1beta1",
    "KnativeEventing",
    false
)]
#[tokio::test]
async fn test_minimal_read(
    #[case] type_name: &str,
    #[case] config: Value,
    #[case] api_version: &str,
    #[case] kind: &str,
    #[case] has_id: bool,
) {
    let provider = provider();

    let schema = provider.schema(type_name).unwrap();
    assert!(schema.validate_implementation().is_empty());
    assert_eq!(schema.get("id").is_some(), has_id);

    let response = provider
        .read_data_source(type_name, config.clone())
        .await
        .unwrap();
    assert!(response.diagnostics.is_empty(), "{}", response.diagnostics);

    let yaml = response.yaml().unwrap();
    assert!(yaml.starts_with(&format!("apiVersion: {api_version}\nkind: {kind}\nmetadata:\n")));
    assert!(!yaml.contains("spec"));
    assert!(!yaml.contains("null"));

    let manifest = parse(yaml);
    assert_eq!(manifest["metadata"]["name"], config["metadata"]["name"].as_str().unwrap());

    let expected_id = has_id.then(|| config["metadata"]["name"].as_str().unwrap());
    assert_eq!(response.id(), expected_id);
}

#[tokio::test]
async fn test_machine_config_manifest_prefix() {
    let response = provider()
        .read_data_source(
            "k8s_machineconfiguration_openshift_io_machine_config_v1_manifest",
            json!({"metadata": {"name": "example"}}),
        )
        .await
        .unwrap();

    assert_eq!(
        response.yaml(),
        Some("apiVersion: machineconfiguration.openshift.io/v1\nkind: MachineConfig\nmetadata:\n  name: example\n")
    );
    assert_eq!(response.id(), Some("example"));
}

#[tokio::test]
async fn test_machine_config_round_trip() {
    let config = json!({
        "metadata": {
            "name": "99-worker-kargs",
            "labels": {"machineconfiguration.openshift.io/role": "worker"}
        },
        "spec": {
            "kernel_arguments": ["nosmt", "mitigations=auto"],
            "kernel_type": "realtime",
            "fips": true,
            "os_image_url": "quay.io/openshift/os@sha256:abc",
            "config": {"ignition": {"version": "3.2.0"}}
        }
    });

    let response = provider()
        .read_data_source(
            "k8s_machineconfiguration_openshift_io_machine_config_v1_manifest",
            config.clone(),
        )
        .await
        .unwrap();
    let manifest = parse(response.yaml().unwrap());

    assert_eq!(
        manifest["metadata"]["labels"]["machineconfiguration.openshift.io/role"],
        "worker"
    );
    assert_eq!(manifest["spec"]["kernelArguments"][1], "mitigations=auto");
    assert_eq!(manifest["spec"]["kernelType"], "realtime");
    assert_eq!(manifest["spec"]["fips"], true);
    assert_eq!(manifest["spec"]["osImageURL"], "quay.io/openshift/os@sha256:abc");
    assert_eq!(manifest["spec"]["config"]["ignition"]["version"], "3.2.0");
    assert!(manifest["spec"].get("extensions").is_none());
    assert!(manifest["spec"].get("kernel_arguments").is_none());

    let state = response.state.unwrap();
    assert_eq!(state["spec"], config["spec"]);
    assert_eq!(state["id"], "99-worker-kargs");
}

#[tokio::test]
async fn test_machine_config_pool_selectors() {
    let response = provider()
        .read_data_source(
            "k8s_machineconfiguration_openshift_io_machine_config_pool_v1_manifest",
            json!({
                "metadata": {"name": "infra"},
                "spec": {
                    "machine_config_selector": {
                        "match_expressions": [{
                            "key": "machineconfiguration.openshift.io/role",
                            "operator": "In",
                            "values": ["worker", "infra"]
                        }]
                    },
                    "node_selector": {
                        "match_labels": {"node-role.kubernetes.io/infra": ""}
                    },
                    "max_unavailable": "10%",
                    "paused": false
                }
            }),
        )
        .await
        .unwrap();
    let manifest = parse(response.yaml().unwrap());
    let spec = &manifest["spec"];

    assert_eq!(spec["machineConfigSelector"]["matchExpressions"][0]["operator"], "In");
    assert_eq!(spec["machineConfigSelector"]["matchExpressions"][0]["values"][1], "infra");
    assert_eq!(spec["nodeSelector"]["matchLabels"]["node-role.kubernetes.io/infra"], "");
    assert_eq!(spec["maxUnavailable"], "10%");
    assert_eq!(spec["paused"], false);
}

#[tokio::test]
async fn test_kubelet_config_round_trip() {
    let response = provider()
        .read_data_source(
            "k8s_machineconfiguration_openshift_io_kubelet_config_v1_manifest",
            json!({
                "metadata": {"name": "set-max-pods"},
                "spec": {
                    "kubelet_config": {"maxPods": 500},
                    "log_level": 4,
                    "machine_config_pool_selector": {
                        "match_labels": {"pools.operator.machineconfiguration.openshift.io/worker": ""}
                    },
                    "tls_security_profile": {
                        "type": "Custom",
                        "custom": {"ciphers": ["ECDHE-RSA-AES128-GCM-SHA256"], "min_tls_version": "VersionTLS12"}
                    }
                }
            }),
        )
        .await
        .unwrap();
    let manifest = parse(response.yaml().unwrap());
    let spec = &manifest["spec"];

    assert_eq!(spec["kubeletConfig"]["maxPods"], 500);
    assert_eq!(spec["logLevel"], 4);
    assert_eq!(spec["tlsSecurityProfile"]["type"], "Custom");
    assert_eq!(spec["tlsSecurityProfile"]["custom"]["minTLSVersion"], "VersionTLS12");
}

#[tokio::test]
async fn test_container_runtime_config_round_trip() {
    let response = provider()
        .read_data_source(
            "k8s_machineconfiguration_openshift_io_container_runtime_config_v1_manifest",
            json!({
                "metadata": {"name": "set-pids-limit"},
                "spec": {
                    "container_runtime_config": {
                        "pids_limit": 2048,
                        "log_level": "debug",
                        "default_runtime": "crun"
                    }
                }
            }),
        )
        .await
        .unwrap();
    let manifest = parse(response.yaml().unwrap());
    let runtime = &manifest["spec"]["containerRuntimeConfig"];

    assert_eq!(runtime["pidsLimit"], 2048);
    assert_eq!(runtime["logLevel"], "debug");
    assert_eq!(runtime["defaultRuntime"], "crun");
    assert!(runtime.get("overlaySize").is_none());
}

#[tokio::test]
async fn test_knative_serving_round_trip() {
    let response = provider()
        .read_data_source(
            "k8s_operator_knative_dev_knative_serving_v1beta1_manifest",
            json!({
                "metadata": {"name": "knative-serving", "namespace": "knative-serving"},
                "spec": {
                    "version": "1.12",
                    "high_availability": {"replicas": 3},
                    "config": {"network": {"ingress-class": "kourier.ingress.networking.knative.dev"}},
                    "ingress": {"kourier": {"enabled": true, "service_type": "LoadBalancer"}},
                    "controller_custom_certs": {"name": "registry-certs", "type": "Secret"},
                    "workloads": [{"name": "activator", "replicas": 2}]
                }
            }),
        )
        .await
        .unwrap();
    assert!(response.id().is_none());

    let manifest = parse(response.yaml().unwrap());
    let spec = &manifest["spec"];

    assert_eq!(manifest["metadata"]["namespace"], "knative-serving");
    assert_eq!(spec["version"], "1.12");
    assert_eq!(spec["high-availability"]["replicas"], 3);
    assert_eq!(
        spec["config"]["network"]["ingress-class"],
        "kourier.ingress.networking.knative.dev"
    );
    assert_eq!(spec["ingress"]["kourier"]["enabled"], true);
    assert_eq!(spec["ingress"]["kourier"]["service-type"], "LoadBalancer");
    assert_eq!(spec["controller-custom-certs"]["type"], "Secret");
    assert_eq!(spec["workloads"][0]["name"], "activator");
    assert!(spec.get("registry").is_none());
    assert!(spec.get("security").is_none());
}

#[tokio::test]
async fn test_knative_eventing_round_trip() {
    let response = provider()
        .read_data_source(
            "k8s_operator_knative_dev_knative_eventing_v1beta1_manifest",
            json!({
                "metadata": {"name": "knative-eventing", "namespace": "knative-eventing"},
                "spec": {
                    "default_broker_class": "MTChannelBasedBroker",
                    "sink_binding_selection_mode": "inclusion",
                    "source": {"kafka": {"enabled": true}},
                    "registry": {"override": {"eventing-controller/eventing-controller": "example.com/controller:v1"}}
                }
            }),
        )
        .await
        .unwrap();
    let manifest = parse(response.yaml().unwrap());
    let spec = &manifest["spec"];

    assert_eq!(spec["defaultBrokerClass"], "MTChannelBasedBroker");
    assert_eq!(spec["sinkBindingSelectionMode"], "inclusion");
    assert_eq!(spec["source"]["kafka"]["enabled"], true);
    assert!(spec["source"].get("github").is_none());
    assert_eq!(
        spec["registry"]["override"]["eventing-controller/eventing-controller"],
        "example.com/controller:v1"
    );
}

#[tokio::test]
async fn test_null_attributes_are_omitted() {
    let response = provider()
        .read_data_source(
            "k8s_machineconfiguration_openshift_io_machine_config_v1_manifest",
            json!({
                "id": null,
                "yaml": null,
                "metadata": {"name": "example", "labels": null, "annotations": null},
                "spec": {"fips": null, "kernel_type": null, "extensions": ["usbguard"]}
            }),
        )
        .await
        .unwrap();

    assert_eq!(
        response.yaml(),
        Some("apiVersion: machineconfiguration.openshift.io/v1\nkind: MachineConfig\nmetadata:\n  name: example\nspec:\n  extensions:\n  - usbguard\n")
    );
}

#[rstest]
#[case(json!({"metadata": {"name": "example"}, "spec": {"kernel_type": "vanilla"}}), "spec.kernel_type")]
#[case(json!({"metadata": {"name": "Example"}}), "metadata.name")]
#[case(json!({"metadata": {"name": "example"}, "spec": {"fips": "yes"}}), "spec.fips")]
#[case(json!({"metadata": {"name": "example"}, "yaml": "kind: Other"}), "yaml")]
#[case(json!({"metadata": {"name": "example"}, "spec": {"osImageURL": "x"}}), "spec.osImageURL")]
#[case(json!({"spec": {}}), "metadata")]
#[tokio::test]
async fn test_invalid_config_is_rejected(#[case] config: Value, #[case] path: &str) {
    let response = provider()
        .read_data_source(
            "k8s_machineconfiguration_openshift_io_machine_config_v1_manifest",
            config,
        )
        .await
        .unwrap();

    assert!(response.state.is_none());
    assert!(response.has_error());
    assert!(
        response
            .diagnostics
            .iter()
            .any(|d| d.path.as_deref() == Some(path)),
        "{}",
        response.diagnostics
    );
}

#[tokio::test]
async fn test_knative_namespace_is_required() {
    let response = provider()
        .read_data_source(
            "k8s_operator_knative_dev_knative_serving_v1beta1_manifest",
            json!({"metadata": {"name": "knative-serving"}}),
        )
        .await
        .unwrap();

    assert!(response.has_error());
    assert_eq!(
        response.diagnostics.iter().next().and_then(|d| d.path.as_deref()),
        Some("metadata.namespace")
    );
}
