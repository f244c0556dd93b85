//! Stable machine-readable error codes.

/// Implemented by every service error so responses carry a code clients can
/// branch on without parsing messages.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
