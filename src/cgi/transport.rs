//! One-request-per-process serving over standard input and output.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::cgi::config::CgiConfig;
use crate::cgi::env::CgiEnv;
use crate::http::StatusCode;
use crate::router::{Error, ResponseWriter, Serve, ABOUT_BLANK};

/// Serve the single request of this invocation.
///
/// Reads up to `min(CONTENT_LENGTH, max_body_size)` body bytes from
/// `reader`, serves the request with `entry` and writes the composed
/// response to `writer`. The response is written even when serving fails;
/// the serve error is returned afterwards.
pub async fn serve_io<S, R, W>(
    entry: &mut S,
    env: CgiEnv,
    reader: &mut R,
    writer: &mut W,
    config: &CgiConfig,
) -> Result<(), Error>
where
    S: Serve + ?Sized,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let limit = env.content_length.unwrap_or(0).min(config.max_body_size);
    let mut body = Vec::with_capacity(limit);
    reader.take(limit as u64).read_to_end(&mut body).await?;

    let request = match env.into_request(body, config) {
        Ok(request) => request,
        Err(e) => {
            let mut response = ResponseWriter::new(config.default_version);
            response.error(StatusCode::BAD_REQUEST, &format!("Error reading request: {e}"), ABOUT_BLANK)?;
            writer.write_all(response.as_bytes()).await?;
            writer.flush().await?;
            return Err(Error::Http(e));
        }
    };

    let mut response = ResponseWriter::new(request.version);
    let result = entry.serve(&request, &mut response);
    if let Err(e) = &result {
        log::error!("Error serving {} {}: {e}", request.method, request.path);
    }
    response.finish();

    writer.write_all(response.as_bytes()).await?;
    writer.flush().await?;

    result
}

/// Serve the request described by the process environment with the default
/// configuration.
pub fn serve<S: Serve + ?Sized>(entry: &mut S) -> Result<(), Error> {
    serve_with_config(entry, &CgiConfig::default())
}

/// Serve the request described by the process environment.
///
/// Builds a current-thread runtime, reads the body from standard input and
/// writes the response to standard output.
pub fn serve_with_config<S: Serve + ?Sized>(entry: &mut S, config: &CgiConfig) -> Result<(), Error> {
    let runtime = tokio::runtime::Builder::new_current_thread().build()?;

    runtime.block_on(async {
        let env = CgiEnv::from_process();
        let mut stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        serve_io(entry, env, &mut stdin, &mut stdout, config).await
    })
}
