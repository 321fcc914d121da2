//! Content-addressed reference resolution.
//!
//! Cover images and story text live behind opaque `ipfs://<cid>`
//! references; fetchable URLs come from a fixed gateway-prefix
//! substitution. A missing or placeholder reference resolves to an
//! empty string so display layers fall back to their own
//! placeholders instead of erroring.

pub const DEFAULT_GATEWAY: &str = "https://gateway.pinata.cloud/ipfs/";
pub const PLACEHOLDER_REF: &str = "ipfs://placeholder";

const IPFS_SCHEME: &str = "ipfs://";

pub fn resolve(reference: &str) -> String {
    resolve_with_gateway(reference, DEFAULT_GATEWAY)
}

pub fn resolve_with_gateway(reference: &str, gateway: &str) -> String {
    if reference.is_empty() || reference == PLACEHOLDER_REF {
        return String::new();
    }
    let cid = reference.strip_prefix(IPFS_SCHEME).unwrap_or(reference);
    if cid.is_empty() {
        return String::new();
    }
    format!("{gateway}{cid}")
}
