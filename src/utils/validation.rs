use anyhow::{anyhow, Result};

/// Longest duration accepted at creation or extension, in days.
pub const MAX_DURATION_DAYS: u32 = 3650;

pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();

    if email.len() < 6 {
        return Err(anyhow!("Email must be at least 6 characters long"));
    }

    if !email.contains('@') {
        return Err(anyhow!("Email must contain '@'"));
    }

    if !email.contains('.') {
        return Err(anyhow!("Email must contain '.'"));
    }

    Ok(())
}

/// Parses a duration entered as free text. Accepts whole numbers of days
/// in 1..=3650 only; everything else re-prompts the wizard.
pub fn parse_duration_days(input: &str) -> Result<u32> {
    let input = input.trim();

    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(anyhow!("Duration must be a whole number of days, e.g. 30"));
    }

    let days: u32 = input
        .parse()
        .map_err(|_| anyhow!("Duration must be a whole number of days, e.g. 30"))?;

    if days == 0 || days > MAX_DURATION_DAYS {
        return Err(anyhow!(
            "Duration must be between 1 and {MAX_DURATION_DAYS} days"
        ));
    }

    Ok(days)
}

/// Strips every non-digit character from a phone number.
pub fn extract_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn validate_phone(phone: &str) -> Result<String> {
    let digits = extract_digits(phone);

    if digits.len() < 8 {
        return Err(anyhow!("Phone number must contain at least 8 digits"));
    }

    Ok(digits)
}

/// Masks a phone number for display: first 4 characters + `****` + last 4.
/// Counted in characters, not bytes: sheet cells edited by hand can hold
/// non-ASCII digits. Shorter than 8 characters is returned unchanged.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() >= 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}****{tail}")
    } else {
        phone.to_string()
    }
}

/// Lowercased, trimmed email used as the identity key within one table.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
