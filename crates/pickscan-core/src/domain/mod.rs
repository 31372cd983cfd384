//! Pure domain types: validated barcodes and product records.

pub mod barcode;
pub mod product;
