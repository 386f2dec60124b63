//! Чистая часть конечного автомата загрузки: фазы, валидация файла,
//! guard повторной отправки и тексты сообщений. Браузерная обвязка — в
//! `view.rs`, здесь всё тестируется без WASM.

use contracts::products::status::StatusAggregate;

/// Лимит размера файла: 1 GiB
pub const MAX_FILE_SIZE_BYTES: f64 = 1024.0 * 1024.0 * 1024.0;

pub const MSG_SENDING: &str = "Sending file...";
pub const MSG_PROCESSING_STARTED: &str = "File uploaded. Processing on the backend...";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
    Processing,
    Completed,
    Failed,
}

impl UploadPhase {
    /// Пока идёт отправка или обработка, повторный submit запрещён
    pub fn is_busy(&self) -> bool {
        matches!(self, UploadPhase::Uploading | UploadPhase::Processing)
    }

    pub fn action_label(&self) -> &'static str {
        match self {
            UploadPhase::Idle => "Upload",
            UploadPhase::Uploading => "Sending...",
            UploadPhase::Processing => "Processing...",
            UploadPhase::Completed => "Upload Completed",
            UploadPhase::Failed => "Try Again",
        }
    }
}

/// Клиентская валидация выбранного файла. Размер приходит из
/// `web_sys::File::size()` как f64 — в нём и сравниваем.
pub fn validate_file(mime_type: &str, byte_size: f64) -> Result<(), String> {
    if mime_type != "text/csv" {
        return Err("Please select a valid CSV file.".to_string());
    }
    if byte_size > MAX_FILE_SIZE_BYTES {
        return Err("File size exceeds 1GB limit.".to_string());
    }
    Ok(())
}

pub fn can_submit(has_file: bool, phase: UploadPhase) -> bool {
    has_file && !phase.is_busy()
}

pub fn progress_message(aggregate: &StatusAggregate) -> String {
    format!(
        "Processing... ({} rows processed, {} errors)",
        aggregate.total_processed, aggregate.total_errors
    )
}

/// Job со статусом `failed` не делает фазу Failed: транспорт отработал,
/// построчные ошибки показываются списком ниже
pub fn completion_message(total_errors: usize) -> String {
    if total_errors > 0 {
        "Upload completed with errors. Check below.".to_string()
    } else {
        "Upload completed successfully!".to_string()
    }
}

/// Транспортная ошибка; обрыв по таймеру показываем отдельной формулировкой
pub fn failure_message(error: &str, timed_out: bool) -> String {
    if timed_out {
        "Upload timed out.".to_string()
    } else {
        format!("Upload error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_csv_mime() {
        let err = validate_file("application/pdf", 10.0).unwrap_err();
        assert_eq!(err, "Please select a valid CSV file.");
        assert!(validate_file("", 10.0).is_err());
    }

    #[test]
    fn rejects_oversized_file() {
        let err = validate_file("text/csv", MAX_FILE_SIZE_BYTES + 1.0).unwrap_err();
        assert_eq!(err, "File size exceeds 1GB limit.");
    }

    #[test]
    fn accepts_csv_up_to_limit() {
        assert!(validate_file("text/csv", 0.0).is_ok());
        assert!(validate_file("text/csv", MAX_FILE_SIZE_BYTES).is_ok());
    }

    #[test]
    fn submit_needs_file_and_free_phase() {
        assert!(can_submit(true, UploadPhase::Idle));
        assert!(can_submit(true, UploadPhase::Completed));
        assert!(can_submit(true, UploadPhase::Failed));
        assert!(!can_submit(true, UploadPhase::Uploading));
        assert!(!can_submit(true, UploadPhase::Processing));
        assert!(!can_submit(false, UploadPhase::Idle));
    }

    #[test]
    fn progress_message_reports_totals() {
        let aggregate = StatusAggregate {
            total_processed: 120,
            total_errors: 3,
            all_terminal: false,
        };
        assert_eq!(
            progress_message(&aggregate),
            "Processing... (120 rows processed, 3 errors)"
        );
    }

    #[test]
    fn completion_message_flags_errors() {
        assert_eq!(completion_message(0), "Upload completed successfully!");
        assert_eq!(
            completion_message(2),
            "Upload completed with errors. Check below."
        );
    }

    #[test]
    fn timeout_has_dedicated_message() {
        assert_eq!(failure_message("whatever", true), "Upload timed out.");
        assert_eq!(
            failure_message("connection refused", false),
            "Upload error: connection refused"
        );
    }
}
