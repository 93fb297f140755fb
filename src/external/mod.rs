pub mod source;
pub mod big_mac_csv;
pub mod currency_codes;
