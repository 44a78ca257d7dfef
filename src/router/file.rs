//! Serving files from disk.

use std::io::ErrorKind;
use std::path::Path;

use crate::http::StatusCode;
use crate::router::error::Error;
use crate::router::response::ResponseWriter;

/// Content type used when the caller does not name one.
pub const DEFAULT_FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// Write the file at `path` as the response body.
///
/// On success the `Content-Type` header is set to `content_type` (or
/// `application/octet-stream` when empty) and the number of bytes written is
/// returned. An empty path or a missing file is answered with a 404
/// structured error and [`Error::FileNotFound`]; any other read failure with
/// a 500 structured error and [`Error::FileIo`].
pub fn serve_file(
    writer: &mut ResponseWriter,
    content_type: &str,
    path: impl AsRef<Path>,
    type_uri: &str,
) -> Result<usize, Error> {
    let path = path.as_ref();

    if path.as_os_str().is_empty() {
        writer.error(StatusCode::NOT_FOUND, "no path to file provided", type_uri)?;
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    match std::fs::read(path) {
        Ok(contents) => {
            let content_type = if content_type.is_empty() {
                DEFAULT_FILE_CONTENT_TYPE
            } else {
                content_type
            };
            writer.headers_mut().set("Content-Type", content_type);
            Ok(writer.write(&contents))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("file {} not found", path.display());
            writer.error(StatusCode::NOT_FOUND, &e.to_string(), type_uri)?;
            Err(Error::FileNotFound(path.to_path_buf()))
        }
        Err(e) => {
            log::error!("error reading file {}: {e}", path.display());
            writer.error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string(), type_uri)?;
            Err(Error::FileIo {
                path: path.to_path_buf(),
                source: e,
            })
        }
    }
}
