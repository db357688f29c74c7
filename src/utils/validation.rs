//! 输入验证工具函数
//!
//! 提供各种输入参数的验证功能，在调用存储层或远端之前拒绝无效输入

use regex::Regex;
use std::sync::OnceLock;

/// 密码最短长度
pub const PASSWORD_MIN_LEN: usize = 8;
/// 密码最长长度
pub const PASSWORD_MAX_LEN: usize = 12;

/// 验证电影ID是否有效（必须为正整数）
///
/// # 参数
/// - `id`: 电影ID
///
/// # 返回
/// - `Ok(())`: 验证通过
/// - `Err(String)`: 错误信息
pub fn validate_movie_id(id: i64) -> Result<(), String> {
    if id <= 0 {
        return Err(format!("无效的电影 ID: {}", id));
    }
    Ok(())
}

/// 验证邮箱格式
pub fn validate_email(email: &str) -> Result<(), String> {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("邮箱正则应当合法")
    });
    if !re.is_match(email) {
        return Err(format!("无效的邮箱地址: {}", email));
    }
    Ok(())
}

/// 验证密码长度（8-12个字符）
pub fn validate_password(password: &str) -> Result<(), String> {
    let len = password.chars().count();
    if len < PASSWORD_MIN_LEN {
        return Err(format!("密码长度不能少于 {} 个字符", PASSWORD_MIN_LEN));
    }
    if len > PASSWORD_MAX_LEN {
        return Err(format!("密码长度不能超过 {} 个字符", PASSWORD_MAX_LEN));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_movie_id() {
        assert!(validate_movie_id(27205).is_ok());
        assert!(validate_movie_id(0).is_err());
        assert!(validate_movie_id(-1).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a b@example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("123456789012").is_ok());
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("1234567890123").is_err());
    }
}
