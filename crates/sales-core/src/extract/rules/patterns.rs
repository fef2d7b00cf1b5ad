//! Field shape patterns for raw sales lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Product code: exactly six digits, word-bounded
    pub static ref PRODUCT_CODE: Regex = Regex::new(
        r"\b[0-9]{6}\b"
    ).unwrap();

    // Price: 99.5 or 1250.00. Group 1 is the price. The guards only reject a
    // neighbouring digit or a dot joined to more digits, so USD99.50,
    // 99.50COP and a sentence-final "99.50." still match
    pub static ref PRICE: Regex = Regex::new(
        r"(?:^|[^0-9.])([0-9]+\.[0-9]{1,2})(?:$|[^0-9.]|\.(?:$|[^0-9]))"
    ).unwrap();

    // Purchase date: DD/MM/YY, shape only
    pub static ref PURCHASE_DATE: Regex = Regex::new(
        r"\b[0-9]{2}/[0-9]{2}/[0-9]{2}\b"
    ).unwrap();

    // Phone: +57 3001234567
    pub static ref PHONE: Regex = Regex::new(
        r"\+[0-9]{1,3} [0-9]{9,10}\b"
    ).unwrap();

    // Email. The local part stops at whitespace and common column delimiters
    pub static ref EMAIL: Regex = Regex::new(
        r#"[^\s@,;:"'<>()\[\]]+@(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,}\b"#
    ).unwrap();

    // Customer name: two capitalized words separated by one space
    pub static ref NAME: Regex = Regex::new(
        r"\b\p{Lu}\p{Ll}+ \p{Lu}\p{Ll}+\b"
    ).unwrap();
}
