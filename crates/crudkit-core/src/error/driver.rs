/// Error when the backing store rejects an operation.
#[derive(Debug)]
pub(super) struct DriverError {
    detail: String,
}

impl DriverError {
    pub(super) fn operation_failed(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl std::error::Error for DriverError {}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "driver operation failed: {}", self.detail)
    }
}
