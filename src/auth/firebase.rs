// Firebase 身份后端
// 通过 Identity Toolkit REST 接口完成注册/登录，
// 用户档案存放在 Firestore 的 users/{uid} 文档

use super::{AuthError, IdentityProvider, UserProfile};
use crate::models::AuthConfig;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{info, warn};

const IDENTITY_API_BASE: &str = "https://identitytoolkit.googleapis.com/v1";
const FIRESTORE_API_BASE: &str = "https://firestore.googleapis.com/v1";

/// 把后端错误码映射为分类错误
fn classify_error(code: &str) -> AuthError {
    if code.contains("EMAIL_EXISTS") {
        AuthError::AlreadyExists
    } else if code.contains("INVALID_LOGIN_CREDENTIALS")
        || code.contains("INVALID_PASSWORD")
        || code.contains("EMAIL_NOT_FOUND")
    {
        AuthError::InvalidCredentials
    } else {
        AuthError::Unknown(code.to_string())
    }
}

/// 从错误响应体中取出错误码
fn error_code(body: &Value) -> String {
    body["error"]["message"]
        .as_str()
        .unwrap_or("UNKNOWN_ERROR")
        .to_string()
}

/// 从 Firestore 文档解析用户档案
fn profile_from_document(doc: &Value) -> Option<UserProfile> {
    let fields = doc.get("fields")?;
    Some(UserProfile {
        email: fields["email"]["stringValue"].as_str()?.to_string(),
        username: fields["username"]["stringValue"].as_str()?.to_string(),
    })
}

/// Firebase 身份客户端
#[derive(Clone)]
pub struct FirebaseIdentityClient {
    config: AuthConfig,
    client: Client,
}

impl FirebaseIdentityClient {
    /// 创建新的身份客户端
    pub fn new(config: AuthConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(anyhow::anyhow!("身份后端 API Key 不能为空"));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self { config, client })
    }

    /// 调用一个账号接口（signUp / signInWithPassword），返回用户ID
    async fn account_request(&self, action: &str, email: &str, password: &str) -> Result<String, AuthError> {
        let url = format!(
            "{}/accounts:{}?key={}",
            IDENTITY_API_BASE, action, self.config.api_key
        );
        let payload = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AuthError::Unknown(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| AuthError::Unknown(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_error(&error_code(&body)));
        }

        body["localId"]
            .as_str()
            .map(|id| id.to_string())
            .ok_or_else(|| AuthError::Unknown("响应中缺少用户ID".to_string()))
    }

    /// 写入用户档案文档
    ///
    /// 档案写入失败不影响账号本身，只记录告警
    async fn save_profile(&self, user_id: &str, profile: &UserProfile) {
        let url = format!(
            "{}/projects/{}/databases/(default)/documents/users/{}?key={}",
            FIRESTORE_API_BASE, self.config.project_id, user_id, self.config.api_key
        );
        let payload = json!({
            "fields": {
                "email": { "stringValue": profile.email },
                "username": { "stringValue": profile.username },
            }
        });

        match self.client.patch(&url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                info!("用户档案已写入: {}", user_id);
            }
            Ok(response) => {
                warn!("写入用户档案失败: {}", response.status());
            }
            Err(e) => {
                warn!("写入用户档案失败: {}", e);
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<String, AuthError> {
        let user_id = self.account_request("signUp", email, password).await?;
        self.save_profile(
            &user_id,
            &UserProfile {
                email: email.to_string(),
                username: username.to_string(),
            },
        )
        .await;
        Ok(user_id)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError> {
        self.account_request("signInWithPassword", email, password)
            .await
    }

    async fn profile(&self, user_id: &str) -> Result<Option<UserProfile>, AuthError> {
        let url = format!(
            "{}/projects/{}/databases/(default)/documents/users/{}?key={}",
            FIRESTORE_API_BASE, self.config.project_id, user_id, self.config.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AuthError::Unknown(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AuthError::Unknown(format!(
                "读取用户档案失败: {}",
                response.status()
            )));
        }

        let doc: Value = response
            .json()
            .await
            .map_err(|e| AuthError::Unknown(e.to_string()))?;
        Ok(profile_from_document(&doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_error() {
        assert_eq!(classify_error("EMAIL_EXISTS"), AuthError::AlreadyExists);
        assert_eq!(
            classify_error("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            classify_error("EMAIL_NOT_FOUND"),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            classify_error("INVALID_PASSWORD : wrong"),
            AuthError::InvalidCredentials
        );
        assert!(matches!(
            classify_error("TOO_MANY_ATTEMPTS_TRY_LATER"),
            AuthError::Unknown(_)
        ));
    }

    #[test]
    fn test_error_code_extraction() {
        let body = json!({"error": {"code": 400, "message": "EMAIL_EXISTS"}});
        assert_eq!(error_code(&body), "EMAIL_EXISTS");

        let empty = json!({});
        assert_eq!(error_code(&empty), "UNKNOWN_ERROR");
    }

    #[test]
    fn test_profile_from_document() {
        let doc = json!({
            "name": "projects/demo/databases/(default)/documents/users/uid-1",
            "fields": {
                "email": {"stringValue": "user@example.com"},
                "username": {"stringValue": "tester"},
            }
        });
        let profile = profile_from_document(&doc).unwrap();
        assert_eq!(profile.email, "user@example.com");
        assert_eq!(profile.username, "tester");

        // 字段不完整的文档返回 None
        assert!(profile_from_document(&json!({"fields": {}})).is_none());
        assert!(profile_from_document(&json!({})).is_none());
    }

    #[test]
    fn test_client_requires_api_key() {
        assert!(FirebaseIdentityClient::new(AuthConfig::default()).is_err());
    }
}
