//! Monitoring endpoints that bypass the cookie check.
//!
//! Consulted only when a request would otherwise fail with `NO_COOKIES`:
//! health probes carry no browser cookie state and must not be blocked.

/// Health, readiness and liveness probe paths. Matched exactly.
pub const EXEMPT_PATHS: [&str; 3] = ["/healthz", "/readyz", "/livez"];

pub fn is_exempt(path: &str) -> bool {
    EXEMPT_PATHS.contains(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_paths_are_exempt() {
        for path in EXEMPT_PATHS {
            assert!(is_exempt(path), "{path} should be exempt");
        }
    }

    #[test]
    fn match_is_exact() {
        assert!(!is_exempt("/healthz/"));
        assert!(!is_exempt("/healthz/deep"));
        assert!(!is_exempt("/HEALTHZ"));
        assert!(!is_exempt("/my-hof-journey"));
        assert!(!is_exempt(""));
    }
}
