use std::fmt;

use chrono::NaiveDate;
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 6;

/// Human-readable invoice code, `INV-<YYYYMMDD>-<6 upper-case alphanumerics>`.
///
/// Generation does not guarantee uniqueness; the unique index on
/// `orders.invoice_code` does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvoiceCode(String);

impl InvoiceCode {
    pub fn generate(date: NaiveDate) -> Self {
        Self::generate_with(&mut OsRng, date)
    }

    pub fn generate_with<R: Rng + CryptoRng>(rng: &mut R, date: NaiveDate) -> Self {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| char::from(CHARSET[rng.gen_range(0..CHARSET.len())]))
            .collect();
        Self(format!("INV-{}-{}", date.format("%Y%m%d"), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
