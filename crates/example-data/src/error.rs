//! Error types for the example-data crate.
//!
//! Registry loading and validation failures share one semantic enum, following
//! the project's error handling conventions with `thiserror`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or validating a demo registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no blocks.
    #[error("registry contains no blocks")]
    EmptyBlocks,

    /// Two blocks share the same (upper-cased) code.
    #[error("duplicate block code '{code}'")]
    DuplicateBlockCode {
        /// The repeated block code.
        code: String,
    },

    /// The apartment layout cannot be expanded.
    #[error("invalid apartment layout: {message}")]
    InvalidLayout {
        /// Description of the layout problem.
        message: String,
    },

    /// A resident references an apartment the layout does not produce.
    #[error("resident '{resident}' references unknown apartment '{code}'")]
    UnknownApartment {
        /// Full name of the resident.
        resident: String,
        /// The unresolved apartment code.
        code: String,
    },

    /// A vehicle references a resident that is not in the registry.
    #[error("vehicle '{plate}' references unknown resident '{name}'")]
    UnknownResident {
        /// Plate number of the vehicle.
        plate: String,
        /// The unresolved resident name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_io_formats_correctly() {
        let err = RegistryError::IoError {
            path: PathBuf::from("/tmp/demo.json"),
            message: "file not found".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read registry file at '/tmp/demo.json': file not found"
        );
    }

    #[test]
    fn registry_error_version_formats_correctly() {
        let err = RegistryError::UnsupportedVersion {
            expected: 1,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "unsupported registry version: expected 1, found 2"
        );
    }

    #[test]
    fn registry_error_unknown_apartment_formats_correctly() {
        let err = RegistryError::UnknownApartment {
            resident: "Ngô Thị Kim".to_owned(),
            code: "Z-999".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "resident 'Ngô Thị Kim' references unknown apartment 'Z-999'"
        );
    }

    #[test]
    fn registry_error_unknown_resident_formats_correctly() {
        let err = RegistryError::UnknownResident {
            plate: "51A-12345".to_owned(),
            name: "Nobody".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "vehicle '51A-12345' references unknown resident 'Nobody'"
        );
    }
}
