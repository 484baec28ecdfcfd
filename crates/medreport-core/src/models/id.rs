//! Patient identifier generation.
//!
//! Identifiers look like `MR-k3xq-7GQ2ZA`: four trailing base-36 digits of
//! the current epoch milliseconds, then six upper-case base-36 digits of
//! randomness. Nothing here checks uniqueness. Within one time window there
//! are 36^6 (about 2.2e9) suffixes, so two records made in the same window
//! collide with probability ~4.6e-10; the wizard re-checks the store and
//! retries on the rare hit.

/// Prefix shared by every patient identifier.
pub const PATIENT_ID_PREFIX: &str = "MR-";

const TIME_DIGITS: usize = 4;
const RANDOM_DIGITS: usize = 6;

/// Generate a new patient identifier.
pub fn generate_patient_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u128;
    let timestamp = to_base36(millis);
    let time_part = &timestamp[timestamp.len().saturating_sub(TIME_DIGITS)..];

    format!(
        "{}{:0>4}-{}",
        PATIENT_ID_PREFIX,
        time_part,
        random_suffix().to_uppercase()
    )
}

/// Check the `MR-XXXX-YYYYYY` shape.
pub fn is_valid_patient_id(id: &str) -> bool {
    let Some(rest) = id.strip_prefix(PATIENT_ID_PREFIX) else {
        return false;
    };
    let mut parts = rest.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(time), Some(random), None) => {
            time.len() == TIME_DIGITS
                && time.chars().all(|c| c.is_ascii_alphanumeric())
                && random.len() == RANDOM_DIGITS
                && random
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        }
        _ => false,
    }
}

fn random_suffix() -> String {
    // Low 62 bits of a v4 UUID are random (the variant bits sit above them).
    let bits = uuid::Uuid::new_v4().as_u128() & ((1u128 << 62) - 1);
    let digits = to_base36(bits % 36u128.pow(RANDOM_DIGITS as u32));
    format!("{:0>6}", digits)
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
