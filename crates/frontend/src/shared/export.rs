/// Экспорт табличных данных в CSV и скачивание через браузер
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Trait для типов, которые могут быть выгружены в CSV
pub trait CsvExportable {
    /// Заголовки колонок
    fn headers() -> Vec<&'static str>;

    /// Значения одной строки (до экранирования)
    fn to_csv_row(&self) -> Vec<String>;
}

/// Чистая сборка CSV-документа: запятая как разделитель, '\n' в конце
/// каждой строки, экранирование по правилам RFC 4180
pub fn build_csv_document<T: CsvExportable>(rows: &[T]) -> String {
    let mut csv_content = String::new();

    csv_content.push_str(&T::headers().join(","));
    csv_content.push('\n');

    for item in rows {
        let escaped_row: Vec<String> = item
            .to_csv_row()
            .iter()
            .map(|cell| escape_csv_cell(cell))
            .collect();
        csv_content.push_str(&escaped_row.join(","));
        csv_content.push('\n');
    }

    csv_content
}

/// Ячейка с разделителем, кавычкой или переводом строки оборачивается в
/// кавычки, внутренние кавычки удваиваются
fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        let escaped = cell.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        cell.to_string()
    }
}

/// Скачивание готового CSV-документа файлом
pub fn download_csv(content: &str, filename: &str) -> Result<(), String> {
    let blob = create_csv_blob(content)?;
    download_blob(&blob, filename)
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);

    anchor.click();

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(Vec<String>);

    impl CsvExportable for Row {
        fn headers() -> Vec<&'static str> {
            vec!["a", "b"]
        }

        fn to_csv_row(&self) -> Vec<String> {
            self.0.clone()
        }
    }

    fn row(cells: &[&str]) -> Row {
        Row(cells.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn plain_cells_stay_unquoted() {
        let csv = build_csv_document(&[row(&["x", "y"])]);
        assert_eq!(csv, "a,b\nx,y\n");
    }

    #[test]
    fn separator_and_quotes_trigger_quoting() {
        let csv = build_csv_document(&[row(&["x,y", "he said \"hi\""])]);
        assert_eq!(csv, "a,b\n\"x,y\",\"he said \"\"hi\"\"\"\n");
    }

    #[test]
    fn empty_page_exports_header_only() {
        let csv = build_csv_document::<Row>(&[]);
        assert_eq!(csv, "a,b\n");
    }
}
