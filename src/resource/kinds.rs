//! Kind registry: maps type tokens and document kinds to canonical kinds.

use serde::{Deserialize, Serialize};

/// One registered resource kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindInfo {
    /// Canonical kind, e.g. `Pod`
    pub kind: String,
    /// Lowercase singular resource name, e.g. `pod`
    pub singular: String,
    /// Lowercase plural resource name, e.g. `pods`
    pub plural: String,
    #[serde(default)]
    pub short_names: Vec<String>,
    pub namespaced: bool,
}

impl KindInfo {
    pub fn new(kind: &str, plural: &str, short_names: &[&str], namespaced: bool) -> Self {
        Self {
            kind: kind.to_string(),
            singular: kind.to_lowercase(),
            plural: plural.to_string(),
            short_names: short_names.iter().map(|s| s.to_string()).collect(),
            namespaced,
        }
    }

    fn matches_resource(&self, token: &str) -> bool {
        self.plural == token
            || self.singular == token
            || self.kind.eq_ignore_ascii_case(token)
            || self.short_names.iter().any(|s| s == token)
    }
}

/// Kind declared in configuration (`[[kinds]]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindConfig {
    pub kind: String,
    #[serde(default)]
    pub plural: Option<String>,
    #[serde(default)]
    pub short_names: Vec<String>,
    #[serde(default = "default_namespaced")]
    pub namespaced: bool,
}

fn default_namespaced() -> bool {
    true
}

impl From<&KindConfig> for KindInfo {
    fn from(config: &KindConfig) -> Self {
        let singular = config.kind.to_lowercase();
        let plural = config
            .plural
            .as_ref()
            .map(|p| p.to_lowercase())
            .unwrap_or_else(|| format!("{}s", singular));
        Self {
            kind: config.kind.clone(),
            singular,
            plural,
            short_names: config.short_names.iter().map(|s| s.to_lowercase()).collect(),
            namespaced: config.namespaced,
        }
    }
}

/// Registry of known kinds. Passed explicitly to the resolver.
#[derive(Debug, Clone)]
pub struct KindRegistry {
    kinds: Vec<KindInfo>,
}

impl KindRegistry {
    pub fn empty() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Registry seeded with the core workload and config kinds.
    pub fn builtin() -> Self {
        let kinds = vec![
            KindInfo::new("Pod", "pods", &["po"], true),
            KindInfo::new("Service", "services", &["svc"], true),
            KindInfo::new("Deployment", "deployments", &["deploy"], true),
            KindInfo::new("ReplicaSet", "replicasets", &["rs"], true),
            KindInfo::new("StatefulSet", "statefulsets", &["sts"], true),
            KindInfo::new("DaemonSet", "daemonsets", &["ds"], true),
            KindInfo::new("Job", "jobs", &[], true),
            KindInfo::new("CronJob", "cronjobs", &["cj"], true),
            KindInfo::new("ConfigMap", "configmaps", &["cm"], true),
            KindInfo::new("Secret", "secrets", &[], true),
            KindInfo::new("ServiceAccount", "serviceaccounts", &["sa"], true),
            KindInfo::new("Ingress", "ingresses", &["ing"], true),
            KindInfo::new("PersistentVolumeClaim", "persistentvolumeclaims", &["pvc"], true),
            KindInfo::new("PersistentVolume", "persistentvolumes", &["pv"], false),
            KindInfo::new("Namespace", "namespaces", &["ns"], false),
            KindInfo::new("Node", "nodes", &["no"], false),
        ];
        Self { kinds }
    }

    /// Add or replace a kind. Later registrations win.
    pub fn register(&mut self, info: KindInfo) {
        self.kinds.retain(|k| k.kind != info.kind);
        self.kinds.push(info);
    }

    pub fn with_configured(mut self, configured: &[KindConfig]) -> Self {
        for kind in configured {
            self.register(KindInfo::from(kind));
        }
        self
    }

    /// Look up a positional type token (`pods`, `po`, `Pod`, `deployments.apps`).
    pub fn lookup_resource(&self, token: &str) -> Option<&KindInfo> {
        let token = token.trim().to_lowercase();
        let resource = token.split('.').next().unwrap_or_default();
        if resource.is_empty() {
            return None;
        }
        self.kinds.iter().find(|k| k.matches_resource(resource))
    }

    /// Look up the `kind` field of a document. Exact match preferred.
    pub fn lookup_kind(&self, kind: &str) -> Option<&KindInfo> {
        self.kinds
            .iter()
            .find(|k| k.kind == kind)
            .or_else(|| self.kinds.iter().find(|k| k.kind.eq_ignore_ascii_case(kind)))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
