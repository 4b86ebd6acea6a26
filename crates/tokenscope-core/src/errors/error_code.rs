//! ErrorCode trait for the UI boundary.

/// Every error enum implements this to provide a structured code string
/// the UI panel can switch on.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "HOST_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted UI string: `[ERROR_CODE] message`.
    fn ui_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const HOST_ERROR: &str = "HOST_ERROR";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const FONT_UNAVAILABLE: &str = "FONT_UNAVAILABLE";
pub const CANCELLED: &str = "CANCELLED";
pub const TOKEN_NOT_FOUND: &str = "TOKEN_NOT_FOUND";
pub const INCOMPATIBLE_TOKEN: &str = "INCOMPATIBLE_TOKEN";
pub const NO_TARGETS: &str = "NO_TARGETS";
pub const PARTIAL_FAILURE: &str = "PARTIAL_FAILURE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PROTOCOL_ERROR: &str = "PROTOCOL_ERROR";
