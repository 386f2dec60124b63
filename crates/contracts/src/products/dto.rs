use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Курсы валют для строки товара (ключи — коды валют, как отдаёт backend)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    #[serde(rename = "USD")]
    pub usd: f64,
    #[serde(rename = "EUR")]
    pub eur: f64,
    #[serde(rename = "GBP")]
    pub gbp: f64,
    #[serde(rename = "JPY")]
    pub jpy: f64,
    #[serde(rename = "BRL")]
    pub brl: f64,
}

/// DTO строки товара из GET /products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: i64,
    /// Имя может содержать сырую разметку — зачистка на стороне клиента
    pub name: String,
    pub price: f64,
    pub expiration: NaiveDate,
    #[serde(rename = "exchangeRates")]
    pub exchange_rates: ExchangeRates,
}

/// Ответ GET /products (одна страница, полная замена предыдущей)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub data: Vec<ProductDto>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// Ответ POST /products/upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    #[serde(rename = "jobIds")]
    pub job_ids: Vec<String>,
}

/// Статус одного job CSV-импорта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// Построчная ошибка обработки, сообщённая backend'ом
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvError {
    pub line: u32,
    pub error: String,
}

/// Ответ GET /products/upload-status/{jobId}.
/// Заменяется целиком при каждом опросе, поля никогда не мержатся.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadStatusDto {
    pub status: JobStatus,
    #[serde(default)]
    pub processed: Option<u64>,
    #[serde(default)]
    pub errors: Vec<CsvError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_status_optional_fields_default() {
        let dto: UploadStatusDto = serde_json::from_str(r#"{"status":"pending"}"#).unwrap();
        assert_eq!(dto.status, JobStatus::Pending);
        assert_eq!(dto.processed, None);
        assert!(dto.errors.is_empty());
    }

    #[test]
    fn upload_status_wire_names() {
        let dto: UploadStatusDto = serde_json::from_str(
            r#"{"status":"completed","processed":42,"errors":[{"line":3,"error":"bad price"}]}"#,
        )
        .unwrap();
        assert_eq!(dto.status, JobStatus::Completed);
        assert_eq!(dto.processed, Some(42));
        assert_eq!(dto.errors[0].line, 3);
    }

    #[test]
    fn upload_response_uses_camel_case_job_ids() {
        let resp: UploadResponse =
            serde_json::from_str(r#"{"message":"ok","jobIds":["j1","j2"]}"#).unwrap();
        assert_eq!(resp.job_ids, vec!["j1".to_string(), "j2".to_string()]);
    }

    #[test]
    fn product_list_response_wire_names() {
        let resp: ProductListResponse = serde_json::from_str(
            r#"{
                "data": [{
                    "id": 1,
                    "name": "Milk",
                    "price": 4.5,
                    "expiration": "2026-01-31",
                    "exchangeRates": {"USD": 1.0, "EUR": 0.9, "GBP": 0.8, "JPY": 150.0, "BRL": 5.1}
                }],
                "total": 1,
                "page": 1,
                "limit": 10,
                "totalPages": 1
            }"#,
        )
        .unwrap();
        assert_eq!(resp.total_pages, 1);
        assert_eq!(resp.data[0].exchange_rates.jpy, 150.0);
        assert_eq!(
            resp.data[0].expiration,
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
        );
    }
}
