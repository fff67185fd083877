// ── Matching predicates ──

use cgx_api::Site;

/// Cluster role of data-center hub sites.
pub const HUB_ROLE: &str = "HUB";

/// Case-insensitive substring test: does `circuit_name` contain `match_text`?
pub fn circuit_matches(circuit_name: &str, match_text: &str) -> bool {
    circuit_name.to_lowercase().contains(&match_text.to_lowercase())
}

/// Whether a site's WAN interfaces should be scanned.
///
/// Hub sites are skipped only while `exclude_hub_sites` is set.
pub fn site_is_eligible(site: &Site, exclude_hub_sites: bool) -> bool {
    !exclude_hub_sites || site.element_cluster_role.as_deref() != Some(HUB_ROLE)
}
