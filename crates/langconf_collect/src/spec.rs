//! Collect specification models, copy events and top-level error types.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Base name of the files the collector looks for.
pub const C_NAME_LANGUAGE_CONFIGURATION: &str = "language-configuration.json";

/// Name of the output directory placed next to the program.
pub const C_NAME_DIR_RESOURCES: &str = "resources";

////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// One matched file about to be copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCopyEvent {
    /// Matched source file, as reached from the source root.
    pub path_file_src: PathBuf,
    /// Mirrored destination directory under the resources root.
    pub path_dir_dst: PathBuf,
}

impl fmt::Display for SpecCopyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Copy: {} => {}",
            self.path_file_src.display(),
            self.path_dir_dst.display()
        )
    }
}

/// Receiver for copy events, notified before each copy is performed.
pub trait SinkCopyEvent {
    fn on_copy(&mut self, event: &SpecCopyEvent);
}

impl<F> SinkCopyEvent for F
where
    F: FnMut(&SpecCopyEvent),
{
    fn on_copy(&mut self, event: &SpecCopyEvent) {
        self(event)
    }
}

/// Fatal errors. Any of these terminates the run; nothing is rolled back.
#[derive(Debug)]
pub enum CollectError {
    /// Source path does not exist.
    SourceNotFound(PathBuf),
    /// A matched file's directory does not lie under the source root.
    OutsideSourceRoot {
        /// Directory holding the match.
        path: PathBuf,
        /// Source root being scanned.
        root: PathBuf,
    },
    /// Resources root could not be derived from the program location.
    ResourcesRootUnresolved(String),
    /// Listing a directory failed.
    ReadDirFailed {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Inspecting an entry failed.
    MetadataFailed {
        /// Entry being inspected.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Creating a destination directory failed.
    CreateDirFailed {
        /// Directory being created.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Copying a matched file failed.
    CopyFailed {
        /// Matched source file.
        path_src: PathBuf,
        /// Destination file.
        path_dst: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotFound(path) => write!(f, "{} does not exist", path.display()),
            Self::OutsideSourceRoot { path, root } => write!(
                f,
                "{} is not under source root {}",
                path.display(),
                root.display()
            ),
            Self::ResourcesRootUnresolved(msg) => {
                write!(f, "Failed to resolve resources directory: {msg}")
            }
            Self::ReadDirFailed { path, source } => {
                write!(f, "Failed to read directory {} ({source})", path.display())
            }
            Self::MetadataFailed { path, source } => {
                write!(f, "Failed to inspect {} ({source})", path.display())
            }
            Self::CreateDirFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {} ({source})",
                    path.display()
                )
            }
            Self::CopyFailed {
                path_src,
                path_dst,
                source,
            } => write!(
                f,
                "Failed to copy {} to {} ({source})",
                path_src.display(),
                path_dst.display()
            ),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadDirFailed { source, .. }
            | Self::MetadataFailed { source, .. }
            | Self::CreateDirFailed { source, .. }
            | Self::CopyFailed { source, .. } => Some(source),
            Self::SourceNotFound(_)
            | Self::OutsideSourceRoot { .. }
            | Self::ResourcesRootUnresolved(_) => None,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::PathBuf;

    use super::{CollectError, SpecCopyEvent};

    #[test]
    fn copy_event_renders_progress_line() {
        let event = SpecCopyEvent {
            path_file_src: PathBuf::from("src/foo/language-configuration.json"),
            path_dir_dst: PathBuf::from("/opt/tool/resources/foo"),
        };
        assert_eq!(
            event.to_string(),
            "Copy: src/foo/language-configuration.json => /opt/tool/resources/foo"
        );
    }

    #[test]
    fn collect_error_chains_io_source() {
        let err = CollectError::CreateDirFailed {
            path: PathBuf::from("/r/a"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("Failed to create directory /r/a"));
        assert!(err.source().is_some());

        let err = CollectError::SourceNotFound(PathBuf::from("missing"));
        assert_eq!(err.to_string(), "missing does not exist");
        assert!(err.source().is_none());
    }
}
