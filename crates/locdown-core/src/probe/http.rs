//! libcurl transfers: status probes and whole-file fetches.
//!
//! Transfers are blocking; the async entry points run them on tokio's
//! blocking pool.

use std::fs::{self, File};
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::boundary::Validity;
use crate::retry::{run_with_retry, FetchError, RetryPolicy};

use super::template::UrlTemplate;

fn easy_for(url: &str) -> Result<curl::easy::Easy, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;
    Ok(easy)
}

/// GET `url`, discard the body, return the final HTTP status.
pub fn status(url: &str) -> Result<u32, FetchError> {
    let mut easy = easy_for(url)?;
    easy.timeout(Duration::from_secs(30))?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| Ok(data.len()))?;
        transfer.perform()?;
    }
    Ok(easy.response_code()?)
}

/// Turns a [`UrlTemplate`] into a probe for [`crate::boundary::BoundaryFinder`].
///
/// Any 2xx is valid; other statuses and transport errors are invalid.
#[derive(Debug, Clone)]
pub struct HttpProber {
    template: UrlTemplate,
}

impl HttpProber {
    pub fn new(template: UrlTemplate) -> Self {
        Self { template }
    }

    pub fn probe(&self, id: u64) -> impl Future<Output = Validity> + Send + 'static {
        let url = self.template.expand(id);
        async move {
            match tokio::task::spawn_blocking(move || status(&url)).await {
                Ok(Ok(code)) if (200..300).contains(&code) => Validity::Valid,
                Ok(Ok(code)) => {
                    tracing::debug!(id, code, "probe: not found");
                    Validity::Invalid
                }
                Ok(Err(e)) => {
                    tracing::debug!(id, "probe failed, treating as invalid: {}", e);
                    Validity::Invalid
                }
                Err(e) => {
                    tracing::warn!(id, "probe worker failed: {}", e);
                    Validity::Invalid
                }
            }
        }
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

fn fetch_once(url: &str, part: &Path, cancel: &CancellationToken) -> Result<u64, FetchError> {
    let mut file = File::create(part)?;
    let mut written = 0u64;
    let mut write_err: Option<std::io::Error> = None;
    let mut aborted = false;

    let mut easy = easy_for(url)?;
    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if cancel.is_cancelled() {
                aborted = true;
                return Ok(0);
            }
            match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        transfer.perform()
    };

    if aborted {
        return Err(FetchError::Aborted);
    }
    if let Some(e) = write_err {
        return Err(FetchError::Storage(e));
    }
    performed?;

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    file.sync_all()?;
    Ok(written)
}

/// Download `url` into `dest` via `dest.part`, retrying transient failures.
/// The partial file is removed on failure. Returns the bytes written.
pub fn fetch_to_file(
    url: &str,
    dest: &Path,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> Result<u64, FetchError> {
    let part = part_path(dest);
    match run_with_retry(policy, || fetch_once(url, &part, cancel)) {
        Ok(bytes) => {
            fs::rename(&part, dest)?;
            tracing::debug!(url, bytes, dest = %dest.display(), "fetched");
            Ok(bytes)
        }
        Err(e) => {
            let _ = fs::remove_file(&part);
            Err(e)
        }
    }
}

/// Async wrapper around [`fetch_to_file`].
pub async fn fetch(
    url: String,
    dest: PathBuf,
    policy: RetryPolicy,
    cancel: CancellationToken,
) -> Result<u64, FetchError> {
    tokio::task::spawn_blocking(move || fetch_to_file(&url, &dest, &policy, &cancel))
        .await
        .map_err(|e| FetchError::Worker(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_path_appends_suffix() {
        assert_eq!(
            part_path(Path::new("/tmp/out/8134.bin")),
            PathBuf::from("/tmp/out/8134.bin.part")
        );
    }

    #[tokio::test]
    async fn unreachable_host_probes_invalid() {
        // Port 9 on localhost (discard) is closed in test environments.
        let prober = HttpProber::new(UrlTemplate::parse("http://127.0.0.1:9/{id}").unwrap());
        assert_eq!(prober.probe(1).await, Validity::Invalid);
    }

    #[test]
    fn cancelled_fetch_leaves_no_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("1.bin");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = fetch_to_file("http://127.0.0.1:9/1", &dest, &RetryPolicy::none(), &cancel)
            .unwrap_err();
        assert!(matches!(err, FetchError::Curl(_) | FetchError::Aborted));
        assert!(!dest.exists());
        assert!(!part_path(&dest).exists());
    }
}
