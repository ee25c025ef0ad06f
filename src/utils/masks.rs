//! Progressive display masks for Brazilian tax ids and phone numbers.
//!
//! Every mask re-derives its output from the digit sequence alone, so masking
//! is idempotent and partial inputs get partial punctuation. Digits beyond a
//! format's maximum are dropped.

pub const CPF_DIGITS: usize = 11;
pub const CNPJ_DIGITS: usize = 14;
pub const PHONE_MAX_DIGITS: usize = 11;

/// Strip a value down to its digits.
pub fn unmask(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn digits_truncated(value: &str, max: usize) -> String {
    unmask(value).chars().take(max).collect()
}

/// `000.000.000-00`
pub fn mask_cpf(value: &str) -> String {
    let digits = digits_truncated(value, CPF_DIGITS);
    let mut out = String::with_capacity(CPF_DIGITS + 3);
    for (i, ch) in digits.chars().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(ch);
    }
    out
}

/// `00.000.000/0000-00`
pub fn mask_cnpj(value: &str) -> String {
    let digits = digits_truncated(value, CNPJ_DIGITS);
    let mut out = String::with_capacity(CNPJ_DIGITS + 4);
    for (i, ch) in digits.chars().enumerate() {
        match i {
            2 | 5 => out.push('.'),
            8 => out.push('/'),
            12 => out.push('-'),
            _ => {}
        }
        out.push(ch);
    }
    out
}

/// `(00) 0000-0000` for landlines, `(00) 00000-0000` once a ninth local
/// digit shows up.
pub fn mask_phone(value: &str) -> String {
    let digits = digits_truncated(value, PHONE_MAX_DIGITS);
    if digits.is_empty() {
        return String::new();
    }
    if digits.len() <= 2 {
        return format!("({}", digits);
    }

    let (ddd, rest) = digits.split_at(2);
    let split = if rest.len() > 8 { 5 } else { 4 };
    if rest.len() > split {
        format!("({}) {}-{}", ddd, &rest[..split], &rest[split..])
    } else {
        format!("({}) {}", ddd, rest)
    }
}
