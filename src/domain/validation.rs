/// Validates a user-chosen pool or provider name.
///
/// Checks:
/// - Non-empty
/// - Every character is an ASCII letter, digit, or '-'
pub fn validate_resource_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Validates a value quoted into an attribute-condition clause (`'<value>'`).
pub fn validate_claim_value(value: &str) -> bool {
    !value.trim().is_empty() && !value.contains(['\'', '\\'])
}

/// Reduces a full resource path (`projects/.../workloadIdentityPools/my-pool`)
/// to its trailing segment.
pub fn trailing_segment(identifier: &str) -> &str {
    identifier.rsplit('/').next().unwrap_or(identifier)
}
