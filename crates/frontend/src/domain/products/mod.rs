pub mod api;
pub mod ui;

use contracts::products::dto::ProductDto;

use crate::shared::export::CsvExportable;
use crate::shared::sanitize::strip_markup;

impl CsvExportable for ProductDto {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Price", "Expiration", "USD", "EUR", "GBP", "JPY", "BRL"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        let rates = &self.exchange_rates;
        vec![
            // имя зачищается от разметки до CSV-экранирования
            strip_markup(&self.name),
            self.price.to_string(),
            self.expiration.format("%Y-%m-%d").to_string(),
            format!("{:.2}", rates.usd),
            format!("{:.2}", rates.eur),
            format!("{:.2}", rates.gbp),
            format!("{:.2}", rates.jpy),
            format!("{:.2}", rates.brl),
        ]
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use contracts::products::dto::{ExchangeRates, ProductDto};

    use crate::shared::export::build_csv_document;

    fn product(name: &str) -> ProductDto {
        ProductDto {
            id: 1,
            name: name.to_string(),
            price: 10.5,
            expiration: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            exchange_rates: ExchangeRates {
                usd: 1.0,
                eur: 0.9,
                gbp: 0.856,
                jpy: 150.0,
                brl: 5.1,
            },
        }
    }

    #[test]
    fn export_has_fixed_header() {
        let csv = build_csv_document(&[product("Milk")]);
        assert!(csv.starts_with("Name,Price,Expiration,USD,EUR,GBP,JPY,BRL\n"));
    }

    #[test]
    fn export_strips_markup_and_doubles_quotes() {
        let csv = build_csv_document(&[product("<b>A&B \"C\"</b>")]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("\"A&amp;B \"\"C\"\"\","));
        assert!(!row.contains('<'));
    }

    #[test]
    fn export_renders_rates_with_two_decimals() {
        let csv = build_csv_document(&[product("Milk")]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "Milk,10.5,2026-03-15,1.00,0.90,0.86,150.00,5.10");
    }
}
