use contracts::products::dto::ProductListResponse;
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, RequestTimeout, REQUEST_TIMEOUT_MS};

/// Получить страницу товаров с фильтрами и сортировкой
pub async fn fetch_products(
    page: u32,
    limit: u32,
    name: &str,
    price: &str,
    expiration: &str,
    sort_by: Option<&'static str>,
    order: Option<&'static str>,
) -> Result<ProductListResponse, String> {
    let mut params = format!("page={}&limit={}", page, limit);
    if !name.is_empty() {
        params += &format!("&name={}", urlencoding::encode(name));
    }
    if !price.is_empty() {
        params += &format!("&price={}", urlencoding::encode(price));
    }
    if !expiration.is_empty() {
        params += &format!("&expiration={}", urlencoding::encode(expiration));
    }
    if let Some(sort_by) = sort_by {
        params += &format!("&sortBy={}", sort_by);
    }
    if let Some(order) = order {
        params += &format!("&order={}", order);
    }

    let timeout = RequestTimeout::start(REQUEST_TIMEOUT_MS);
    let signal = timeout.as_ref().map(|t| t.signal());

    let response = Request::get(&api_url(&format!("/products?{}", params)))
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
