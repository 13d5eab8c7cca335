// src/utils/config.rs

use crate::services::sigv4::AwsCredentials;
use crate::utils::logger::LogLevel;
use crate::utils::{AuthError, AuthResult};
use secrecy::SecretString;
use url::Url;
use worker::Env;

pub const S3_BUCKET_REGION: &str = "S3_BUCKET_REGION";
pub const S3_BUCKET: &str = "S3_BUCKET";
pub const S3_OBJECT: &str = "S3_OBJECT";
pub const CF_DOMAIN: &str = "CF_DOMAIN";
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const ORIGIN_URL: &str = "ORIGIN_URL";
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Reads a binding from the worker environment, vars first, then secrets.
pub fn env_lookup(env: &Env, key: &str) -> Option<String> {
    env.var(key)
        .map(|v| v.to_string())
        .or_else(|_| env.secret(key).map(|v| v.to_string()))
        .ok()
}

fn required<F>(lookup: &F, key: &str) -> AuthResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthError::missing_config(key))
}

/// Target object of the signed-URL issuer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerConfig {
    pub s3_bucket_region: String,
    pub s3_bucket: String,
    /// Object key without a leading `/`
    pub s3_object: String,
    /// Host that replaces the S3 host in issued URLs
    pub cf_domain: String,
}

impl SignerConfig {
    pub fn from_lookup<F>(lookup: F) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let s3_object = required(&lookup, S3_OBJECT)?
            .trim_start_matches('/')
            .to_string();
        if s3_object.is_empty() {
            return Err(AuthError::missing_config(S3_OBJECT));
        }

        Ok(Self {
            s3_bucket_region: required(&lookup, S3_BUCKET_REGION)?,
            s3_bucket: required(&lookup, S3_BUCKET)?,
            s3_object,
            cf_domain: required(&lookup, CF_DOMAIN)?,
        })
    }

    pub fn from_env(env: &Env) -> AuthResult<Self> {
        Self::from_lookup(|key| env_lookup(env, key))
    }

    /// Virtual-hosted S3 URL of the configured object.
    pub fn object_url(&self) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.s3_bucket, self.s3_bucket_region, self.s3_object
        )
    }
}

impl AwsCredentials {
    pub fn from_lookup<F>(lookup: F) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            access_key_id: required(&lookup, AWS_ACCESS_KEY_ID)?,
            secret_access_key: SecretString::new(required(&lookup, AWS_SECRET_ACCESS_KEY)?),
            session_token: lookup(AWS_SESSION_TOKEN).filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn from_env(env: &Env) -> AuthResult<Self> {
        Self::from_lookup(|key| env_lookup(env, key))
    }
}

/// Settings of the worker entry point itself
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerConfig {
    pub log_level: LogLevel,
    /// Upstream that authenticated requests are forwarded to
    pub origin_url: Option<Url>,
}

impl WorkerConfig {
    pub fn from_lookup<F>(lookup: F) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup(LOG_LEVEL)
            .map(|level| LogLevel::from_string(&level))
            .unwrap_or(LogLevel::Info);

        let origin_url = match lookup(ORIGIN_URL).filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(Url::parse(raw.trim()).map_err(|e| {
                AuthError::config_error(format!("Invalid {}: {}", ORIGIN_URL, e))
            })?),
            None => None,
        };

        Ok(Self {
            log_level,
            origin_url,
        })
    }

    pub fn from_env(env: &Env) -> AuthResult<Self> {
        Self::from_lookup(|key| env_lookup(env, key))
    }
}
