//! Fetching dataset CSVs from the page's origin.

use nat_db::DatasetKind;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Whether a `Content-Type` header value denotes CSV text.
pub fn is_csv_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("text/csv"))
}

/// GET `url` and return the body if the server answered 2xx with CSV text.
///
/// Static hosts that answer unknown paths with `index.html` are rejected by
/// the content-type check.
pub async fn fetch_csv(url: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or("no window")?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("{url}: fetch failed: {e:?}"))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| format!("{url}: fetch did not return a Response"))?;
    if !response.ok() {
        return Err(format!("{url}: HTTP {}", response.status()));
    }

    let content_type = response
        .headers()
        .get("content-type")
        .ok()
        .flatten()
        .unwrap_or_default();
    if !is_csv_content_type(&content_type) {
        return Err(format!("{url}: not CSV ({content_type})"));
    }

    let text = response.text().map_err(|e| format!("{url}: {e:?}"))?;
    JsFuture::from(text)
        .await
        .map_err(|e| format!("{url}: reading body failed: {e:?}"))?
        .as_string()
        .ok_or_else(|| format!("{url}: body is not text"))
}

/// Fetch every dataset from its served path, in `DatasetKind::ALL` order.
/// A dataset that could not be fetched is `None`.
pub async fn fetch_served_datasets() -> Vec<(DatasetKind, Option<String>)> {
    let mut fetched = Vec::with_capacity(DatasetKind::ALL.len());
    for kind in DatasetKind::ALL {
        let text = match fetch_csv(&kind.served_path()).await {
            Ok(text) => Some(text),
            Err(e) => {
                log::info!("[NAT] {} not served: {}", kind, e);
                None
            }
        };
        fetched.push((kind, text));
    }
    fetched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_content_types() {
        assert!(is_csv_content_type("text/csv; charset=utf-8"));
        assert!(is_csv_content_type("Text/CSV"));
        assert!(!is_csv_content_type("text/html; charset=utf-8"));
        assert!(!is_csv_content_type(""));
    }
}
