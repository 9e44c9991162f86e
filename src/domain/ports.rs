use crate::utils::error::Result;

/// Destination for rendered batch reports.
pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}
