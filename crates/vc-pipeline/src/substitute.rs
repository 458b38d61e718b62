//! Off-model long-tier substitution.
//!
//! Long-tier facilities are not built separately; each long-tier selection
//! folds onto a nearby short-tier site, so one physical location hosts both
//! roles.  Greedy first-match over a spatial index of the short-tier
//! selection: earlier long sites claim first, later ones probe past already
//! claimed sites.  The claimed set guarantees distinct substitutes.  No
//! joint re-optimization happens here.

use rustc_hash::FxHashSet;
use tracing::warn;

use vc_core::SiteId;

use crate::catalog::SiteCatalog;

/// Map each long-tier selection to its nearest unclaimed short-tier site.
///
/// Probes up to `probe_k` nearest short-tier sites per long site; a long
/// site whose probes are all claimed gets no substitute (logged).  Output
/// order follows the long-tier selection.
pub fn substitute_into_short(
    long_selection: &[SiteId],
    short_selection: &[SiteId],
    catalog: &SiteCatalog,
    probe_k: usize,
) -> Vec<SiteId> {
    if long_selection.is_empty() || short_selection.is_empty() {
        return Vec::new();
    }

    let tree = catalog.rtree_of(short_selection);
    let mut claimed: FxHashSet<SiteId> = FxHashSet::default();
    let mut out = Vec::with_capacity(long_selection.len());

    for &long_site in long_selection {
        let Some(site) = catalog.get(long_site) else {
            warn!("long-tier site {long_site} missing from catalog");
            continue;
        };
        let pick = tree
            .nearest_neighbor_iter(&[site.pos.x, site.pos.y])
            .take(probe_k)
            .map(|e| e.id)
            .find(|id| !claimed.contains(id));
        match pick {
            Some(id) => {
                claimed.insert(id);
                out.push(id);
            }
            None => {
                warn!("no unclaimed short-tier site within {probe_k} probes of {long_site}");
            }
        }
    }
    out
}
