// ── WAN interface label lookup ──
//
// Display-only reference data keyed by label id.

use std::collections::HashMap;

use tracing::warn;

use cgx_api::WanInterfaceLabel;

const UNKNOWN: &str = "unknown";

/// Display fields of a WAN interface label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelInfo {
    /// Circuit category.
    pub name: String,
    pub label: String,
    pub description: String,
}

impl LabelInfo {
    /// Stand-in for an interface whose label id is not in the tenant's set.
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN.into(),
            label: UNKNOWN.into(),
            description: UNKNOWN.into(),
        }
    }
}

impl From<WanInterfaceLabel> for LabelInfo {
    fn from(label: WanInterfaceLabel) -> Self {
        Self {
            name: label.name.unwrap_or_default(),
            label: label.label.unwrap_or_default(),
            description: label.description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct LabelIndex {
    labels: HashMap<String, LabelInfo>,
}

impl LabelIndex {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn get(&self, label_id: &str) -> Option<&LabelInfo> {
        self.labels.get(label_id)
    }

    /// Look up a label, substituting [`LabelInfo::unknown`] when the id is
    /// missing or not part of the fetched set.
    pub fn resolve(&self, label_id: Option<&str>) -> LabelInfo {
        match label_id.and_then(|id| self.get(id)) {
            Some(info) => info.clone(),
            None => {
                warn!(label_id = label_id.unwrap_or("<none>"), "no label metadata for interface");
                LabelInfo::unknown()
            }
        }
    }
}

impl FromIterator<WanInterfaceLabel> for LabelIndex {
    fn from_iter<I: IntoIterator<Item = WanInterfaceLabel>>(iter: I) -> Self {
        let labels = iter
            .into_iter()
            .map(|label| (label.id.clone(), LabelInfo::from(label)))
            .collect();
        Self { labels }
    }
}
