use std::path::{Path, PathBuf};

pub type DrawResult<T> = Result<T, DrawError>;

/// Fatal error kinds. Every variant terminates the process with a distinct
/// exit code; nothing is retried or recovered mid-run.
#[derive(thiserror::Error, Debug)]
pub enum DrawError {
    #[error("invalid arguments: {0}")]
    Args(String),

    #[error("cannot access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported input image '{0}'")]
    UnsupportedFormat(PathBuf),

    #[error("cannot allocate a {width}x{height} canvas")]
    Allocation { width: u32, height: u32 },
}

impl DrawError {
    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            DrawError::Args(_) => 1,
            DrawError::Io { .. } => 2,
            DrawError::UnsupportedFormat(_) => 3,
            DrawError::Allocation { .. } => 255,
        }
    }

    /// Classify a decode failure from the image codec: broken file handles
    /// map to `Io`, everything else means the codec cannot read the format.
    pub fn read_image(err: image::ImageError, path: &Path) -> Self {
        match err {
            image::ImageError::IoError(source) => DrawError::Io {
                path: path.to_path_buf(),
                source,
            },
            _ => DrawError::UnsupportedFormat(path.to_path_buf()),
        }
    }

    /// Classify an encode failure on the output path.
    pub fn write_image(err: image::ImageError, path: &Path) -> Self {
        let source = match err {
            image::ImageError::IoError(source) => source,
            other => std::io::Error::other(other),
        };
        DrawError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
