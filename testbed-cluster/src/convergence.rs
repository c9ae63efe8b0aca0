//! Node-readiness verification.
//!
//! Reconciles locally known membership against what the cluster tooling
//! reports. One check is a pure comparison; the caller wraps it in the
//! retry primitive because tooling needs time to register new nodes.

use std::collections::BTreeSet;

use crate::error::ClusterError;

/// Parse a `get nodes` listing into the set of observed node addresses.
///
/// The first line is a header and is discarded; every remaining non-empty
/// line contributes its first whitespace-delimited token. Duplicates
/// collapse; order is irrelevant.
pub(crate) fn parse_observed_addresses(listing: &str) -> BTreeSet<String> {
    listing
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_owned)
        .collect()
}

/// Verify that every expected address was observed.
///
/// Cardinality is compared first: a size mismatch fails with
/// [`ClusterError::Divergence`] carrying both sets, without proceeding to
/// per-address comparison. With sizes equal, the first expected address not
/// observed fails with [`ClusterError::MissingNode`].
pub(crate) fn verify_membership(
    observed: &BTreeSet<String>,
    expected: &BTreeSet<String>,
) -> Result<(), ClusterError> {
    if observed.len() != expected.len() {
        return Err(ClusterError::Divergence {
            observed: observed.clone(),
            expected: expected.clone(),
        });
    }

    for address in expected {
        if !observed.contains(address) {
            return Err(ClusterError::MissingNode {
                address: address.clone(),
            });
        }
    }

    Ok(())
}
