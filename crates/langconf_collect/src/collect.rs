//! Filesystem traversal and language-configuration copy orchestration.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::report::{ReportCollect, ReportCollectBuilder};
use crate::spec::{C_NAME_LANGUAGE_CONFIGURATION, CollectError, SinkCopyEvent, SpecCopyEvent};
use crate::util::{derive_destination_dir, normalize_path};

#[derive(Debug, Clone)]
struct SpecDirEntry {
    path_dir_src_sub: PathBuf,
    name_dir: OsString,
    if_is_symlink: bool,
}

#[derive(Debug, Clone)]
struct SpecFileEntry {
    path_file_src: PathBuf,
    name_file: OsString,
    if_is_special: bool,
}

struct SpecCollectContext<'a> {
    path_dir_src: PathBuf,
    path_dir_resources: PathBuf,
    builder_report: ReportCollectBuilder,
    sink: &'a mut dyn SinkCopyEvent,
}

/// Copy every `language-configuration.json` under `dir_source` into a
/// mirrored tree under `dir_resources`.
///
/// The walk is top-down: files of a directory (sorted by name) are handled
/// before its subdirectories (sorted by name). Symlinked directories are not
/// descended. For each match the mirrored destination directory is created if
/// missing, `sink` is notified, and the file is copied over any existing file
/// of the same name.
///
/// Fails with [`CollectError::SourceNotFound`] before touching the filesystem
/// when `dir_source` does not exist. Any IO failure afterwards aborts the run;
/// copies already made stay in place.
pub fn collect_language_configurations<P, Q, S>(
    dir_source: P,
    dir_resources: Q,
    sink: &mut S,
) -> Result<ReportCollect, CollectError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    S: SinkCopyEvent,
{
    let path_dir_src = dir_source.as_ref().to_path_buf();
    let path_dir_resources = dir_resources.as_ref().to_path_buf();

    if !path_dir_src.exists() {
        return Err(CollectError::SourceNotFound(path_dir_src));
    }

    let mut spec_ctx = SpecCollectContext {
        path_dir_src: path_dir_src.clone(),
        path_dir_resources,
        builder_report: ReportCollectBuilder::default(),
        sink,
    };

    if !path_dir_src.is_dir() {
        spec_ctx.builder_report.add_warning(format!(
            "Source is not a directory, nothing to scan: {}",
            path_dir_src.display()
        ));
        return Ok(spec_ctx.builder_report.build());
    }

    walk_directory(&path_dir_src, &mut spec_ctx)?;
    Ok(spec_ctx.builder_report.build())
}

fn walk_directory(path_root: &Path, spec_ctx: &mut SpecCollectContext) -> Result<(), CollectError> {
    let mut l_dirs: Vec<SpecDirEntry> = Vec::new();
    let mut l_files: Vec<SpecFileEntry> = Vec::new();

    let iter_entries = fs::read_dir(path_root).map_err(|e| CollectError::ReadDirFailed {
        path: path_root.to_path_buf(),
        source: e,
    })?;

    for entry_res in iter_entries {
        let entry = entry_res.map_err(|e| CollectError::ReadDirFailed {
            path: path_root.to_path_buf(),
            source: e,
        })?;

        let path_entry = entry.path();
        let cfg_file_type = entry
            .file_type()
            .map_err(|e| CollectError::MetadataFailed {
                path: path_entry.clone(),
                source: e,
            })?;

        let b_is_symlink = cfg_file_type.is_symlink();
        let b_is_dir = cfg_file_type.is_dir() || (b_is_symlink && path_entry.is_dir());
        if b_is_dir {
            l_dirs.push(SpecDirEntry {
                path_dir_src_sub: path_entry,
                name_dir: entry.file_name(),
                if_is_symlink: b_is_symlink,
            });
        } else {
            l_files.push(SpecFileEntry {
                path_file_src: path_entry,
                name_file: entry.file_name(),
                if_is_special: !cfg_file_type.is_file() && !b_is_symlink,
            });
        }
    }

    l_files.sort_by(|a, b| a.name_file.cmp(&b.name_file));
    l_dirs.sort_by(|a, b| a.name_dir.cmp(&b.name_dir));

    for file_entry in l_files {
        spec_ctx.builder_report.add_scanned();
        if file_entry.name_file == C_NAME_LANGUAGE_CONFIGURATION {
            handle_match(file_entry, path_root, spec_ctx)?;
        } else if file_entry.if_is_special {
            spec_ctx.builder_report.add_warning(format!(
                "Special file skipped: {}",
                file_entry.path_file_src.display()
            ));
        }
    }

    for dir_entry in l_dirs {
        if should_descend(&dir_entry, spec_ctx) {
            walk_directory(&dir_entry.path_dir_src_sub, spec_ctx)?;
        }
    }

    Ok(())
}

fn should_descend(spec_dir_entry: &SpecDirEntry, spec_ctx: &mut SpecCollectContext) -> bool {
    if spec_dir_entry.if_is_symlink {
        tracing::debug!(
            "Symlinked directory not followed: {}",
            spec_dir_entry.path_dir_src_sub.display()
        );
        spec_ctx.builder_report.add_pruned();
        return false;
    }

    if is_resources_root(&spec_dir_entry.path_dir_src_sub, spec_ctx) {
        spec_ctx.builder_report.add_warning(format!(
            "Resources directory inside source tree not scanned: {}",
            spec_dir_entry.path_dir_src_sub.display()
        ));
        spec_ctx.builder_report.add_pruned();
        return false;
    }

    true
}

fn is_resources_root(path_dir: &Path, spec_ctx: &SpecCollectContext) -> bool {
    if path_dir.file_name() != spec_ctx.path_dir_resources.file_name() {
        return false;
    }
    normalize_path(path_dir) == normalize_path(&spec_ctx.path_dir_resources)
}

fn handle_match(
    spec_file_entry: SpecFileEntry,
    path_dir_parent: &Path,
    spec_ctx: &mut SpecCollectContext,
) -> Result<(), CollectError> {
    spec_ctx.builder_report.add_matched();

    let path_dir_dst = derive_destination_dir(
        path_dir_parent,
        &spec_ctx.path_dir_src,
        &spec_ctx.path_dir_resources,
    )?;
    let path_file_dst = path_dir_dst.join(&spec_file_entry.name_file);

    // Only regular files (or links to them) are copied; anything else ends the run.
    let stat_src = fs::metadata(&spec_file_entry.path_file_src).map_err(|e| {
        CollectError::CopyFailed {
            path_src: spec_file_entry.path_file_src.clone(),
            path_dst: path_file_dst.clone(),
            source: e,
        }
    })?;
    if !stat_src.is_file() {
        return Err(CollectError::CopyFailed {
            path_src: spec_file_entry.path_file_src,
            path_dst: path_file_dst,
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "source is not a regular file",
            ),
        });
    }

    if !path_dir_dst.is_dir() {
        fs::create_dir_all(&path_dir_dst).map_err(|e| CollectError::CreateDirFailed {
            path: path_dir_dst.clone(),
            source: e,
        })?;
        tracing::debug!("Created directory: {}", path_dir_dst.display());
        spec_ctx.builder_report.add_dir_created();
    }

    let event = SpecCopyEvent {
        path_file_src: spec_file_entry.path_file_src,
        path_dir_dst,
    };
    spec_ctx.sink.on_copy(&event);

    if path_file_dst.exists()
        && normalize_path(&event.path_file_src) == normalize_path(&path_file_dst)
    {
        return Err(CollectError::CopyFailed {
            path_src: event.path_file_src,
            path_dst: path_file_dst,
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "source and destination are the same file",
            ),
        });
    }

    fs::copy(&event.path_file_src, &path_file_dst).map_err(|e| CollectError::CopyFailed {
        path_src: event.path_file_src.clone(),
        path_dst: path_file_dst.clone(),
        source: e,
    })?;
    tracing::debug!(
        "Copied {} -> {}",
        event.path_file_src.display(),
        path_file_dst.display()
    );
    spec_ctx.builder_report.add_copied();
    Ok(())
}
