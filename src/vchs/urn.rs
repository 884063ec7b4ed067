//! vCloud URN helpers

pub const VDC_URN_PREFIX: &str = "urn:vcloud:vdc:";
pub const VM_URN_PREFIX: &str = "urn:vcloud:vm:";

/// Identifier portion after `prefix`, or `None` when `id` does not start with it
pub fn strip_prefix<'a>(id: &'a str, prefix: &str) -> Option<&'a str> {
    id.strip_prefix(prefix)
}

/// e.g. "urn:vcloud:vdc:4b7a..." -> "4b7a..."
pub fn vdc_suffix(id: &str) -> Option<&str> {
    strip_prefix(id, VDC_URN_PREFIX)
}

pub fn vm_suffix(id: &str) -> Option<&str> {
    strip_prefix(id, VM_URN_PREFIX)
}
