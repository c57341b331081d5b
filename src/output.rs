//! Output formatting and compression
//!
//! This module provides functionality for:
//! - Writing BGZF-compressed output beside the destination path
//! - Tabix indexing of the finished file
//! - Publishing the file and its index only once both are complete
//!
//! Until [`IndexedOutput::publish`] runs, everything lives in temporary files
//! that are removed on drop, so a failed conversion leaves nothing behind.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use noodles::{
    bgzf, tabix,
    vcf::{self, variant::io::Write as _},
};
use tempfile::{NamedTempFile, TempPath};

use crate::error::{ConvertError, Result};

const TEMP_PREFIX: &str = ".stripy2vcf-";

/// Path of the tabix index that accompanies `path`
pub fn index_path(path: &Path) -> PathBuf {
    let mut index = path.as_os_str().to_owned();
    index.push(".tbi");
    PathBuf::from(index)
}

fn temp_file_beside(path: &Path, suffix: &str) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir)
        .and_then(|()| {
            tempfile::Builder::new()
                .prefix(TEMP_PREFIX)
                .suffix(suffix)
                .tempfile_in(dir)
        })
        .map_err(|source| ConvertError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Temporary files are created owner-only; published files should not be.
#[cfg(unix)]
fn make_world_readable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn make_world_readable(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// BGZF-compressed VCF writer whose output is published only after it has been indexed
pub struct BgzOutput {
    writer: vcf::io::Writer<bgzf::io::Writer<NamedTempFile>>,
    path: PathBuf,
}

impl BgzOutput {
    /// Start a new output for `path`. Nothing is created at `path` itself yet.
    pub fn new(path: &Path) -> Result<Self> {
        let file = temp_file_beside(path, ".vcf.gz")?;
        debug!("Writing to temporary file {}", file.path().display());

        Ok(BgzOutput {
            writer: vcf::io::Writer::new(bgzf::io::Writer::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Final destination of this output
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the VCF header
    pub fn write_header(&mut self, header: &vcf::Header) -> Result<()> {
        self.writer
            .write_header(header)
            .map_err(|source| self.write_error(source))
    }

    /// Write one record under `header`
    pub fn write_record(
        &mut self,
        header: &vcf::Header,
        record: &vcf::variant::RecordBuf,
    ) -> Result<()> {
        self.writer
            .write_variant_record(header, record)
            .map_err(|source| self.write_error(source))
    }

    /// Close the BGZF stream and build its tabix index
    pub fn finalize(self) -> Result<IndexedOutput> {
        let BgzOutput { writer, path } = self;

        let file = writer
            .into_inner()
            .finish()
            .and_then(|file| file.as_file().sync_all().map(|()| file))
            .map_err(|source| ConvertError::Write {
                path: path.clone(),
                source,
            })?;
        let data = file.into_temp_path();

        debug!("Creating tabix index for {}", data.display());
        let index = vcf::fs::index(&data).map_err(|source| ConvertError::Index {
            path: path.clone(),
            source,
        })?;

        let index_file = temp_file_beside(&path, ".vcf.gz.tbi")?.into_temp_path();
        tabix::fs::write(&index_file, &index).map_err(|source| ConvertError::Index {
            path: path.clone(),
            source,
        })?;

        Ok(IndexedOutput {
            data,
            index: index_file,
            path,
        })
    }

    fn write_error(&self, source: io::Error) -> ConvertError {
        ConvertError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// A complete, indexed output still held in temporary files
pub struct IndexedOutput {
    data: TempPath,
    index: TempPath,
    path: PathBuf,
}

impl IndexedOutput {
    /// Temporary location of the compressed VCF
    pub fn data_path(&self) -> &Path {
        &self.data
    }

    /// Temporary location of the tabix index
    pub fn index_path(&self) -> &Path {
        &self.index
    }

    /// Move the file and its index to their final paths
    ///
    /// If the index cannot be moved, the already moved file is removed again.
    pub fn publish(self) -> Result<PathBuf> {
        let IndexedOutput { data, index, path } = self;
        let final_index = index_path(&path);

        make_world_readable(&data)
            .and_then(|()| make_world_readable(&index))
            .map_err(|source| ConvertError::Write {
                path: path.clone(),
                source,
            })?;

        data.persist(&path).map_err(|err| ConvertError::Write {
            path: path.clone(),
            source: err.error,
        })?;

        if let Err(err) = index.persist(&final_index) {
            let _ = fs::remove_file(&path);
            return Err(ConvertError::Write {
                path: final_index,
                source: err.error,
            });
        }

        Ok(path)
    }
}
