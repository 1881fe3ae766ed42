use crate::database::models::Permission;
use crate::error::ApiError;

pub const PROJECT_TITLE_MAX: usize = 50;
pub const BOARD_TITLE_MAX: usize = 50;
pub const LIST_TITLE_MAX: usize = 32;
pub const TASK_TITLE_MAX: usize = 50;
pub const LABEL_NAME_MAX: usize = 32;

const NICKNAME_MIN: usize = 3;
const NICKNAME_MAX: usize = 32;

/// Non-empty and at most `max` characters
pub fn validate_title(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(ApiError::bad_request(format!("{} must not be empty", field)));
    }
    if value.chars().count() > max {
        return Err(ApiError::bad_request(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

pub fn validate_nickname(nickname: &str) -> Result<(), ApiError> {
    let len = nickname.chars().count();
    if len < NICKNAME_MIN || len > NICKNAME_MAX {
        return Err(ApiError::bad_request(format!(
            "Nickname must be between {} and {} characters",
            NICKNAME_MIN, NICKNAME_MAX
        )));
    }

    // Only allow alphanumeric, hyphens, and underscores
    if !nickname.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(ApiError::bad_request(
            "Nickname can only contain letters, numbers, hyphens, and underscores",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ApiError::bad_request("Email address is not valid")),
    }
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.is_empty() {
        return Err(ApiError::bad_request("Password must not be empty"));
    }
    Ok(())
}

/// Shape check shared by grants and default permissions
pub fn validate_permissions(permissions: &Permission) -> Result<(), ApiError> {
    permissions.validate().map_err(ApiError::from)
}

/// Updates replace a grant outright, so they must carry at least one flag
pub fn validate_grant_update(permissions: &Permission) -> Result<(), ApiError> {
    validate_permissions(permissions)?;
    if permissions.is_empty() {
        return Err(ApiError::bad_request(
            "Permission update must grant at least read access",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_bounded() {
        assert!(validate_title("Title", "Sprint 1", LIST_TITLE_MAX).is_ok());
        assert!(validate_title("Title", "   ", LIST_TITLE_MAX).is_err());
        assert!(validate_title("Title", &"x".repeat(33), LIST_TITLE_MAX).is_err());
        assert!(validate_title("Title", &"x".repeat(50), TASK_TITLE_MAX).is_ok());
    }

    #[test]
    fn nicknames_follow_format() {
        assert!(validate_nickname("alice_01").is_ok());
        assert!(validate_nickname("al").is_err());
        assert!(validate_nickname("alice smith").is_err());
        assert!(validate_nickname(&"a".repeat(33)).is_err());
    }

    #[test]
    fn emails_need_both_sides_of_at() {
        assert!(validate_email("a@b.io").is_ok());
        assert!(validate_email("@b.io").is_err());
        assert!(validate_email("alice").is_err());
    }

    #[test]
    fn grant_updates_reject_empty_and_malformed() {
        let err = validate_grant_update(&Permission::default()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        let err = validate_grant_update(&Permission::new(true, false, true)).unwrap_err();
        assert_eq!(err.message(), "Admin permission requires write permission");
        assert!(validate_grant_update(&Permission::new(true, false, false)).is_ok());
    }
}
