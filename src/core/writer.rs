use crate::core::Product;
use crate::utils::error::{EtlError, Result};
use serde::Serialize;

pub const HEADER: [&str; 4] = ["SR", "Name", "Price", "Rating"];

#[derive(Serialize)]
struct CsvRow<'a> {
    sr: usize,
    name: &'a str,
    price: &'a str,
    rating: &'a str,
}

/// Render products as CSV with a 1-based `SR` column.
///
/// Rows end in `\r\n` and fields are quoted only when they contain a comma,
/// a quote or a line break, so padding spaces are written as-is.
pub fn to_csv_bytes(products: &[Product]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for (idx, product) in products.iter().enumerate() {
        writer.serialize(CsvRow {
            sr: idx + 1,
            name: &product.name,
            price: &product.price,
            rating: &product.rating,
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: &str, rating: &str) -> Product {
        Product {
            name: name.to_string(),
            price: price.to_string(),
            rating: rating.to_string(),
        }
    }

    #[test]
    fn test_header_and_numbered_rows() {
        let products = vec![
            product("  Sapiens  ", "  ₹54.23  ", "  Five stars  "),
            product("  Cosmos  ", "  ₹10.00  ", "  One stars  "),
        ];

        let csv = String::from_utf8(to_csv_bytes(&products).unwrap()).unwrap();

        assert_eq!(
            csv,
            "SR,Name,Price,Rating\r\n\
             1,  Sapiens  ,  ₹54.23  ,  Five stars  \r\n\
             2,  Cosmos  ,  ₹10.00  ,  One stars  \r\n"
        );
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let products = vec![product(
            "  Gödel, Escher, Bach: an \"Eternal\" Braid  ",
            "  ₹1.00  ",
            "  Two stars  ",
        )];

        let csv = String::from_utf8(to_csv_bytes(&products).unwrap()).unwrap();
        let row = csv.lines().nth(1).unwrap();

        assert_eq!(
            row,
            "1,\"  Gödel, Escher, Bach: an \"\"Eternal\"\" Braid  \",  ₹1.00  ,  Two stars  "
        );
    }

    #[test]
    fn test_empty_input_still_writes_header() {
        let csv = to_csv_bytes(&[]).unwrap();
        assert_eq!(csv, b"SR,Name,Price,Rating\r\n");
    }

    #[test]
    fn test_sr_column_counts_from_one() {
        let products: Vec<Product> = (0..12)
            .map(|i| product(&format!("Book {i}"), "£1", "One stars"))
            .collect();

        let bytes = to_csv_bytes(&products).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let srs: Vec<usize> = reader
            .records()
            .map(|r| r.unwrap()[0].parse().unwrap())
            .collect();

        assert_eq!(srs, (1..=12).collect::<Vec<_>>());
    }
}
