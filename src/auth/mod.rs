// 身份模块 - 用户注册/登录与本地会话
//
// 凭据校验完全委托给外部身份后端，这里只做输入验证、
// 失败分类和会话记录；具体后端在 firebase.rs

mod firebase;

pub use firebase::FirebaseIdentityClient;

use crate::cookies::CookieJar;
use crate::event_bus::{AppEvent, EventBus};
use crate::utils::{validate_email, validate_password};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// 会话 Cookie 名称（存放已登录用户ID，无过期时间）
pub const SESSION_COOKIE: &str = "loggedInUserId";

/// 身份操作失败分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// 邮箱已被注册
    AlreadyExists,
    /// 邮箱或密码不正确
    InvalidCredentials,
    /// 输入在本地就被拒绝（邮箱格式、密码长度）
    InvalidInput(String),
    /// 其他后端或网络错误
    Unknown(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::AlreadyExists => write!(f, "邮箱已被注册"),
            AuthError::InvalidCredentials => write!(f, "邮箱或密码不正确"),
            AuthError::InvalidInput(msg) => write!(f, "输入无效: {}", msg),
            AuthError::Unknown(msg) => write!(f, "身份后端错误: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

/// 用户档案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// 邮箱
    pub email: String,
    /// 用户名
    pub username: String,
}

/// 身份后端接口
///
/// 成功返回后端分配的用户ID，失败返回分类后的错误
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 注册新用户并写入档案
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<String, AuthError>;

    /// 用邮箱+密码登录
    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError>;

    /// 读取用户档案，不存在时返回 None
    async fn profile(&self, user_id: &str) -> Result<Option<UserProfile>, AuthError>;
}

/// 本地会话存储 - 记录当前登录用户ID
///
/// 会话级记录，不设置过期时间，登出时清除
pub struct SessionStore {
    jar: Arc<dyn CookieJar>,
    event_bus: Arc<EventBus>,
}

impl SessionStore {
    pub fn new(jar: Arc<dyn CookieJar>, event_bus: Arc<EventBus>) -> Self {
        Self { jar, event_bus }
    }

    /// 当前登录用户ID
    pub fn current_user(&self) -> Option<String> {
        self.jar.get(SESSION_COOKIE)
    }

    /// 记录登录用户
    pub fn remember(&self, user_id: &str) {
        self.jar.set(SESSION_COOKIE, user_id, None);
        self.event_bus.publish(AppEvent::UserSignedIn {
            user_id: user_id.to_string(),
        });
    }

    /// 清除会话（登出）
    pub fn clear(&self) {
        self.jar.remove(SESSION_COOKIE);
        self.event_bus.publish(AppEvent::UserSignedOut);
    }
}

/// 身份服务 - 渲染表面使用的高层入口
///
/// 在调用后端之前做本地输入验证，成功后维护会话记录
pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    session: SessionStore,
}

impl AuthService {
    pub fn new(provider: Arc<dyn IdentityProvider>, session: SessionStore) -> Self {
        Self { provider, session }
    }

    /// 注册并自动登录，返回用户ID
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<String, AuthError> {
        validate_email(email).map_err(AuthError::InvalidInput)?;
        validate_password(password).map_err(AuthError::InvalidInput)?;

        let user_id = self.provider.sign_up(email, password, username).await?;
        info!("用户注册成功: {}", user_id);
        self.session.remember(&user_id);
        Ok(user_id)
    }

    /// 登录，返回用户ID
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        validate_email(email).map_err(AuthError::InvalidInput)?;

        let user_id = self.provider.sign_in(email, password).await?;
        info!("用户登录成功: {}", user_id);
        self.session.remember(&user_id);
        Ok(user_id)
    }

    /// 登出，清除本地会话
    pub fn logout(&self) {
        info!("用户退出登录");
        self.session.clear();
    }

    /// 当前登录用户ID
    pub fn current_user(&self) -> Option<String> {
        self.session.current_user()
    }

    /// 当前登录用户的档案，未登录返回 None
    pub async fn current_profile(&self) -> Result<Option<UserProfile>, AuthError> {
        match self.session.current_user() {
            Some(user_id) => self.provider.profile(&user_id).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::MemoryCookieJar;

    /// 测试用的假后端
    struct StubProvider {
        existing_email: String,
    }

    #[async_trait]
    impl IdentityProvider for StubProvider {
        async fn sign_up(
            &self,
            email: &str,
            _password: &str,
            _username: &str,
        ) -> Result<String, AuthError> {
            if email == self.existing_email {
                return Err(AuthError::AlreadyExists);
            }
            Ok("uid-new".to_string())
        }

        async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError> {
            if email == self.existing_email && password == "password1" {
                Ok("uid-1".to_string())
            } else {
                Err(AuthError::InvalidCredentials)
            }
        }

        async fn profile(&self, user_id: &str) -> Result<Option<UserProfile>, AuthError> {
            if user_id == "uid-1" {
                Ok(Some(UserProfile {
                    email: self.existing_email.clone(),
                    username: "tester".to_string(),
                }))
            } else {
                Ok(None)
            }
        }
    }

    fn service() -> AuthService {
        let jar = Arc::new(MemoryCookieJar::new());
        let bus = Arc::new(EventBus::new(100));
        AuthService::new(
            Arc::new(StubProvider {
                existing_email: "user@example.com".to_string(),
            }),
            SessionStore::new(jar, bus),
        )
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let service = service();
        let result = service.register("new@example.com", "short", "newbie").await;
        assert!(matches!(result, Err(AuthError::InvalidInput(_))));
        assert!(service.current_user().is_none());
    }

    #[tokio::test]
    async fn test_register_classifies_existing_email() {
        let service = service();
        let result = service
            .register("user@example.com", "password1", "dupe")
            .await;
        assert_eq!(result, Err(AuthError::AlreadyExists));
    }

    #[tokio::test]
    async fn test_login_and_logout_manage_session() {
        let service = service();
        let uid = service.login("user@example.com", "password1").await.unwrap();
        assert_eq!(uid, "uid-1");
        assert_eq!(service.current_user().as_deref(), Some("uid-1"));

        let profile = service.current_profile().await.unwrap().unwrap();
        assert_eq!(profile.username, "tester");

        service.logout();
        assert!(service.current_user().is_none());
        assert!(service.current_profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_with_bad_password() {
        let service = service();
        let result = service.login("user@example.com", "wrong-pass").await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert!(service.current_user().is_none());
    }
}
