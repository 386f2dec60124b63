pub mod upload_csv;
