//! Error adapter for converting StoreshotError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use storeshot::{StoreshotError, device::DeviceSize};

/// Adapter giving a [`StoreshotError`] a diagnostic code and, where useful,
/// a hint on how to fix it.
pub struct ErrorAdapter<'a>(pub &'a StoreshotError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StoreshotError::CanvasAllocation { .. } => "storeshot::canvas",
            StoreshotError::Io(_) => "storeshot::io",
            StoreshotError::Config(_) => "storeshot::config",
            StoreshotError::Decode(_) => "storeshot::decode",
            StoreshotError::UnknownDevice(_) => "storeshot::device",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            StoreshotError::UnknownDevice(_) => {
                let known = DeviceSize::preset_ids().collect::<Vec<_>>().join(", ");
                Some(Box::new(format!("known devices: {known}")))
            }
            StoreshotError::CanvasAllocation { .. } => {
                Some(Box::new("the device size must be non-zero and fit in memory"))
            }
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use storeshot::device::UnknownDevice;

    use super::*;

    #[test]
    fn test_codes() {
        let err = StoreshotError::CanvasAllocation {
            width: 0,
            height: 0,
        };
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "storeshot::canvas");

        let err = StoreshotError::Config("bad".to_string());
        assert_eq!(
            ErrorAdapter(&err).code().unwrap().to_string(),
            "storeshot::config"
        );
    }

    #[test]
    fn test_unknown_device_help_lists_presets() {
        let err = StoreshotError::from(UnknownDevice("pixel-9".to_string()));
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.to_string(), "unknown device preset `pixel-9`");
        let help = adapter.help().unwrap().to_string();
        assert!(help.contains("iphone-6.7"));
        assert!(help.contains("ipad-13"));
    }

    #[test]
    fn test_io_has_no_help() {
        let err = StoreshotError::Io(std::io::Error::other("disk full"));
        assert!(ErrorAdapter(&err).help().is_none());
    }
}
