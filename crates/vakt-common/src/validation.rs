use anyhow::{bail, Result};

const MAX_USERNAME_LEN: usize = 64;
const MAX_PASSWORD_LEN: usize = 128;
const MAX_EMAIL_LEN: usize = 254;

/// Validates a registration request body.
/// Errors are returned as Err with a message naming the offending field.
pub fn validate_registration(username: &str, password: &str, email: &str) -> Result<()> {
    validate_username(username)?;
    validate_password(password)?;
    validate_email(email)?;
    Ok(())
}

/// Validates a login request body.
pub fn validate_login(username: &str, password: &str) -> Result<()> {
    validate_username(username)?;
    validate_password(password)?;
    Ok(())
}

fn validate_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        bail!("username must not be empty");
    }
    if username.len() > MAX_USERNAME_LEN {
        bail!("username must be at most {} characters", MAX_USERNAME_LEN);
    }
    if username.chars().any(char::is_whitespace) {
        bail!("username must not contain whitespace");
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        bail!("password must not be empty");
    }
    if password.len() > MAX_PASSWORD_LEN {
        bail!("password must be at most {} characters", MAX_PASSWORD_LEN);
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        bail!("email must not be empty");
    }
    if email.len() > MAX_EMAIL_LEN {
        bail!("email must be at most {} characters", MAX_EMAIL_LEN);
    }
    // Not a full RFC 5322 parse; just enough to reject obvious garbage
    let Some((local, domain)) = email.split_once('@') else {
        bail!("email must contain '@'");
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        bail!("email is malformed");
    }
    if email.chars().any(char::is_whitespace) {
        bail!("email must not contain whitespace");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration("alice", "p1", "a@x.com").is_ok());
    }

    #[test]
    fn test_empty_username_rejected() {
        let err = validate_registration("", "p1", "a@x.com").unwrap_err();
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_whitespace_username_rejected() {
        assert!(validate_registration("   ", "p1", "a@x.com").is_err());
        assert!(validate_registration("al ice", "p1", "a@x.com").is_err());
    }

    #[test]
    fn test_overlong_username_rejected() {
        let name = "a".repeat(MAX_USERNAME_LEN + 1);
        assert!(validate_registration(&name, "p1", "a@x.com").is_err());
    }

    #[test]
    fn test_empty_password_rejected() {
        let err = validate_registration("alice", "", "a@x.com").unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn test_overlong_password_rejected() {
        let password = "p".repeat(MAX_PASSWORD_LEN + 1);
        assert!(validate_registration("alice", &password, "a@x.com").is_err());
    }

    #[test]
    fn test_email_without_at_rejected() {
        assert!(validate_registration("alice", "p1", "not-an-email").is_err());
    }

    #[test]
    fn test_email_without_domain_dot_rejected() {
        assert!(validate_registration("alice", "p1", "a@localhost").is_err());
    }

    #[test]
    fn test_email_with_empty_local_part_rejected() {
        assert!(validate_registration("alice", "p1", "@x.com").is_err());
    }

    #[test]
    fn test_login_validation_skips_email() {
        assert!(validate_login("alice", "p1").is_ok());
        assert!(validate_login("", "p1").is_err());
        assert!(validate_login("alice", "").is_err());
    }
}
