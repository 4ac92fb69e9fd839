//! The resize run: identify → plan → resize → stat.
//!
//! A run is strictly sequential and holds at most one decoded image. Every
//! failure is fatal; nothing is retried and a partially written output is not
//! cleaned up.
//!
//! ## Failure classes
//!
//! | Class | Raised when |
//! |---|---|
//! | [`ErrorClass::Input`] | source missing, unreadable, corrupt, or zero width |
//! | [`ErrorClass::Processing`] | unsupported format, empty target raster, resample/encode failure |
//! | [`ErrorClass::Output`] | output cannot be written or stat'ed |
//!
//! The source is identified before anything is written, so an input failure
//! never creates or modifies the output file.

use crate::config::ResizeConfig;
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, PngCompression, ResizeParams, get_dimensions,
    plan_resize, resize_to_width,
};
use crate::report::{FileSizes, SizeReport};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Cannot read source image {path}: {source}")]
    InvalidSource { path: PathBuf, source: BackendError },
    #[error("Source image {0} has zero width or an unrepresentable scaled height")]
    Degenerate(PathBuf),
    #[error("Image processing failed: {0}")]
    Processing(#[source] BackendError),
    #[error("Cannot write output {path}: {source}")]
    Output { path: PathBuf, source: io::Error },
}

/// Coarse classification of a [`ResizeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Input,
    Processing,
    Output,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorClass::Input => "input error",
            ErrorClass::Processing => "processing error",
            ErrorClass::Output => "output error",
        };
        f.write_str(name)
    }
}

impl ResizeError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ResizeError::SourceNotFound(_)
            | ResizeError::InvalidSource { .. }
            | ResizeError::Degenerate(_) => ErrorClass::Input,
            ResizeError::Processing(_) => ErrorClass::Processing,
            ResizeError::Output { .. } => ErrorClass::Output,
        }
    }

    /// Classify a failure of the identify step.
    fn from_identify(path: &Path, err: BackendError) -> Self {
        match err {
            BackendError::Io(e) if e.kind() == io::ErrorKind::NotFound => {
                ResizeError::SourceNotFound(path.to_path_buf())
            }
            err @ BackendError::Unsupported(_) => ResizeError::Processing(err),
            err => ResizeError::InvalidSource {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Classify a failure of the decode → resample → encode → write step.
    fn from_resize(params: &ResizeParams, err: BackendError) -> Self {
        match err {
            BackendError::Write { path, source } => ResizeError::Output { path, source },
            BackendError::Io(e) if e.kind() == io::ErrorKind::NotFound => {
                ResizeError::SourceNotFound(params.source.clone())
            }
            err @ (BackendError::Io(_) | BackendError::Decode { .. }) => {
                ResizeError::InvalidSource {
                    path: params.source.clone(),
                    source: err,
                }
            }
            err => ResizeError::Processing(err),
        }
    }
}

/// Identify the source and compute the resize without touching pixels.
///
/// Returns the source dimensions and the parameters a full run would use.
pub fn plan(
    backend: &impl ImageBackend,
    config: &ResizeConfig,
) -> Result<(Dimensions, ResizeParams), ResizeError> {
    let original = get_dimensions(backend, &config.source)
        .map_err(|e| ResizeError::from_identify(&config.source, e))?;
    log::info!(
        "{} is {}x{}",
        config.source.display(),
        original.width,
        original.height
    );

    let params = plan_resize(
        &config.source,
        &config.output,
        original,
        config.target_width,
        PngCompression::from_optimize(config.optimize),
    )
    .ok_or_else(|| ResizeError::Degenerate(config.source.clone()))?;
    log::debug!("planned resize: {:?}", params);

    Ok((original, params))
}

/// Resample according to `params` and measure both files.
///
/// `original` is carried through into the report unchanged.
pub fn execute(
    backend: &impl ImageBackend,
    original: Dimensions,
    params: &ResizeParams,
) -> Result<SizeReport, ResizeError> {
    if params.height == 0 {
        return Err(ResizeError::Processing(BackendError::ProcessingFailed(
            format!(
                "{}x{} scales to a zero-height image at width {}",
                original.width, original.height, params.width
            ),
        )));
    }

    let resized =
        resize_to_width(backend, params).map_err(|e| ResizeError::from_resize(params, e))?;
    log::info!(
        "wrote {} ({}x{})",
        params.output.display(),
        resized.width,
        resized.height
    );

    let sizes = FileSizes {
        original_bytes: file_len(&params.source).map_err(|e| {
            ResizeError::InvalidSource {
                path: params.source.clone(),
                source: BackendError::Io(e),
            }
        })?,
        new_bytes: file_len(&params.output).map_err(|source| ResizeError::Output {
            path: params.output.clone(),
            source,
        })?,
    };

    Ok(SizeReport {
        original,
        resized,
        sizes,
    })
}

/// Run the whole operation for `config`.
pub fn run(backend: &impl ImageBackend, config: &ResizeConfig) -> Result<SizeReport, ResizeError> {
    let (original, params) = plan(backend, config)?;
    execute(backend, original, &params)
}

fn file_len(path: &Path) -> io::Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}
