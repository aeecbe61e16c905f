/// Checks the shared manager secret
///
/// Plain equality on a plaintext secret; this gates a UI control, it is
/// not an authentication system. Callers refuse silently on a mismatch
/// instead of raising an error.
pub fn verify_admin_secret(provided: &str, expected: &str) -> bool {
    !expected.is_empty() && provided == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_secret_passes() {
        assert!(verify_admin_secret("admin", "admin"));
    }

    #[test]
    fn wrong_secret_fails() {
        assert!(!verify_admin_secret("Admin", "admin"));
        assert!(!verify_admin_secret("admin ", "admin"));
        assert!(!verify_admin_secret("", "admin"));
    }

    #[test]
    fn empty_expected_secret_never_passes() {
        assert!(!verify_admin_secret("", ""));
        assert!(!verify_admin_secret("anything", ""));
    }
}
