//! Platform-specific directory resolution.

use std::path::PathBuf;

use crate::constants::APP_DIR_NAME;
use crate::error::{SfError, SfResult};

/// Configuration directory.
///
/// - Windows: `%APPDATA%/Sigfox`
/// - macOS: `~/Library/Application Support/Sigfox`
/// - Linux: `~/.config/Sigfox`
pub fn config_dir() -> SfResult<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| SfError::Config("could not determine config directory".into()))?;
    Ok(base.join(APP_DIR_NAME))
}

/// Data directory, used for log files.
///
/// - Linux: `~/.local/share/Sigfox`
pub fn data_dir() -> SfResult<PathBuf> {
    let base = dirs::data_dir()
        .ok_or_else(|| SfError::Config("could not determine data directory".into()))?;
    Ok(base.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_end_with_app_name() {
        if let Ok(dir) = config_dir() {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
        if let Ok(dir) = data_dir() {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
    }
}
