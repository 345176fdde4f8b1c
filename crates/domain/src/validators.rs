const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Checks a domain name in presentation form, with or without the trailing dot.
pub fn validate_domain_name(name: &str) -> Result<(), String> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);

    if trimmed.is_empty() {
        return Err("domain name cannot be empty".to_string());
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(format!(
            "domain name cannot exceed {MAX_NAME_LEN} characters"
        ));
    }

    for label in trimmed.split('.') {
        validate_label(label)?;
    }
    Ok(())
}

/// Checks a single label (a wordlist candidate, an SRV service label).
///
/// Labels are restricted to ASCII letters, digits, `-`, `_` and `*`, the
/// characters that go on the wire exactly as written. Internationalized
/// labels must be given in their `xn--` form.
pub fn validate_label(label: &str) -> Result<(), String> {
    if label.is_empty() {
        return Err("empty label".to_string());
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(format!(
            "label '{label}' exceeds {MAX_LABEL_LEN} characters"
        ));
    }
    if label.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(format!("label '{label}' contains whitespace"));
    }
    if let Some(c) = label.chars().find(|&c| !is_label_char(c)) {
        return Err(format!("label '{label}' contains unsupported character {c:?}"));
    }
    Ok(())
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '*')
}
