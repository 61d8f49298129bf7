//! Naming rules shared by data sources and the code generator

/// Root attribute names the host reserves for its own meta-arguments
pub const RESERVED_ROOT_NAMES: &[&str] = &[
    "connection",
    "count",
    "depends_on",
    "for_each",
    "lifecycle",
    "provider",
    "provisioner",
];

/// Rust keywords that cannot be used as plain field identifiers
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use",
    "where", "while", "yield", "abstract", "become", "box", "do", "final", "macro", "override",
    "priv", "typeof", "unsized", "virtual",
];

/// Keywords that cannot be raw identifiers either
const RESERVED_PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Convert a camelCase, PascalCase or dotted name into snake_case.
///
/// Acronyms stay together: `osImageURL` becomes `os_image_url` and
/// `baseOSExtensionsContainerImage` becomes `base_os_extensions_container_image`.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if c == '.' || c == '-' || c == '/' || c == '_' || c == ' ' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
        }

        out.extend(c.to_lowercase());
    }

    out.trim_end_matches('_').to_string()
}

/// Convert a name into PascalCase, e.g. `machineConfigSelector` to `MachineConfigSelector`
pub fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;

    for c in name.chars() {
        if c == '.' || c == '-' || c == '/' || c == '_' || c == ' ' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out
}

/// Data source type name for a CRD version, e.g.
/// `k8s_machineconfiguration_openshift_io_machine_config_v1_manifest`
pub fn manifest_type_name(provider: &str, group: &str, kind: &str, version: &str) -> String {
    format!(
        "{provider}_{}_{}_{}_manifest",
        snake_case(group),
        snake_case(kind),
        snake_case(version)
    )
}

/// Whether a name is usable as an attribute name
pub fn is_valid_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Rust identifier for a field, escaping keywords as raw identifiers.
///
/// `crate`, `self`, `Self` and `super` get a trailing underscore instead.
pub fn rust_field_name(attribute_name: &str) -> String {
    if RESERVED_PATH_KEYWORDS.contains(&attribute_name) {
        format!("{attribute_name}_")
    } else if RUST_KEYWORDS.contains(&attribute_name) {
        format!("r#{attribute_name}")
    } else {
        attribute_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_acronyms() {
        assert_eq!(snake_case("osImageURL"), "os_image_url");
        assert_eq!(
            snake_case("baseOSExtensionsContainerImage"),
            "base_os_extensions_container_image"
        );
        assert_eq!(snake_case("KnativeServing"), "knative_serving");
        assert_eq!(snake_case("MachineConfig"), "machine_config");
        assert_eq!(snake_case("fips"), "fips");
        assert_eq!(snake_case("v1beta1"), "v1beta1");
    }

    #[test]
    fn test_snake_case_groups() {
        assert_eq!(
            snake_case("machineconfiguration.openshift.io"),
            "machineconfiguration_openshift_io"
        );
        assert_eq!(snake_case("edc.example-corp.com"), "edc_example_corp_com");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("machineConfigSelector"), "MachineConfigSelector");
        assert_eq!(pascal_case("knative_serving"), "KnativeServing");
        assert_eq!(pascal_case("v1beta1"), "V1beta1");
    }

    #[test]
    fn test_manifest_type_name() {
        assert_eq!(
            manifest_type_name("k8s", "machineconfiguration.openshift.io", "MachineConfig", "v1"),
            "k8s_machineconfiguration_openshift_io_machine_config_v1_manifest"
        );
        assert_eq!(
            manifest_type_name("k8s", "operator.knative.dev", "KnativeServing", "v1beta1"),
            "k8s_operator_knative_dev_knative_serving_v1beta1_manifest"
        );
    }

    #[test]
    fn test_attribute_names() {
        assert!(is_valid_attribute_name("os_image_url"));
        assert!(is_valid_attribute_name("_private"));
        assert!(!is_valid_attribute_name("osImageURL"));
        assert!(!is_valid_attribute_name("1st"));
        assert!(!is_valid_attribute_name(""));
    }

    #[test]
    fn test_rust_field_name() {
        assert_eq!(rust_field_name("type"), "r#type");
        assert_eq!(rust_field_name("name"), "name");
        assert_eq!(rust_field_name("crate"), "crate_");
        assert_eq!(rust_field_name("self"), "self_");
        assert_eq!(rust_field_name("Self"), "Self_");
        assert_eq!(rust_field_name("super"), "super_");
    }
}
