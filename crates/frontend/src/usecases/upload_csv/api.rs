use contracts::products::dto::{UploadResponse, UploadStatusDto};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, RequestTimeout, REQUEST_TIMEOUT_MS};

/// Ошибка POST /products/upload; обрыв по таймеру различаем отдельно,
/// чтобы форма показала специальное сообщение
#[derive(Debug)]
pub enum UploadError {
    TimedOut,
    Transport(String),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::TimedOut => write!(f, "request timed out"),
            UploadError::Transport(e) => write!(f, "{}", e),
        }
    }
}

/// Отправить CSV multipart-формой (поле `file`)
pub async fn upload_csv(file: &web_sys::File) -> Result<UploadResponse, UploadError> {
    let form = web_sys::FormData::new().map_err(|e| UploadError::Transport(format!("{e:?}")))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| UploadError::Transport(format!("{e:?}")))?;

    let timeout = RequestTimeout::start(REQUEST_TIMEOUT_MS);
    let signal = timeout.as_ref().map(|t| t.signal());

    let response = Request::post(&api_url("/products/upload"))
        .abort_signal(signal.as_ref())
        .body(form)
        .map_err(|e| UploadError::Transport(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| {
            if timeout.as_ref().is_some_and(|t| t.timed_out()) {
                UploadError::TimedOut
            } else {
                UploadError::Transport(format!("Request failed: {}", e))
            }
        })?;

    if !response.ok() {
        return Err(UploadError::Transport(format!(
            "HTTP error: {}",
            response.status()
        )));
    }

    response
        .json()
        .await
        .map_err(|e| UploadError::Transport(format!("Failed to parse response: {}", e)))
}

/// Статус одного job. Ошибка здесь — transient: раунд опроса переживёт её
/// и вернётся к job'у на следующем тике.
pub async fn fetch_upload_status(job_id: &str) -> Result<UploadStatusDto, String> {
    let timeout = RequestTimeout::start(REQUEST_TIMEOUT_MS);
    let signal = timeout.as_ref().map(|t| t.signal());

    let url = api_url(&format!(
        "/products/upload-status/{}",
        urlencoding::encode(job_id)
    ));
    let response = Request::get(&url)
        .abort_signal(signal.as_ref())
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
