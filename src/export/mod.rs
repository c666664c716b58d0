mod csv;


pub use csv::{
    parse_csv, parse_csv_with, to_csv_string, write_csv, CsvError, CSV_FILENAME, CSV_HEADER,
};
