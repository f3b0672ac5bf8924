//! Redis-backed OTP store
//!
//! Each identifier maps to one key, `<prefix>:entry:<sha256(identifier)>`,
//! holding the JSON-encoded entry. Keys carry a Redis TTL matching the
//! entry's remaining validity, so the server expires them on its own and
//! [`OtpStore::purge_expired`] has nothing to do. Raw identifiers (phone
//! numbers) never appear in key names.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::Script;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use pv_core::domain::entities::OtpEntry;
use pv_core::services::otp::OtpStore;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Delete the key only while it still holds the given entry id
const CONSUME_SCRIPT: &str = r#"
local value = redis.call('GET', KEYS[1])
if value and cjson.decode(value).id == ARGV[1] then
    return redis.call('DEL', KEYS[1])
end
return 0
"#;

/// OTP store on top of [`RedisClient`]
pub struct RedisOtpStore {
    client: RedisClient,
    consume_script: Script,
}

impl RedisOtpStore {
    pub fn new(client: RedisClient) -> Self {
        Self {
            client,
            consume_script: Script::new(CONSUME_SCRIPT),
        }
    }

    fn entry_key(&self, identifier: &str) -> String {
        self.client
            .make_key(&format!("entry:{}", hash_identifier(identifier)))
    }
}

/// Hex SHA-256 of an identifier
pub(crate) fn hash_identifier(identifier: &str) -> String {
    format!("{:x}", Sha256::digest(identifier.as_bytes()))
}

/// Redis TTL for an entry, at least one second
pub(crate) fn ttl_seconds(entry: &OtpEntry) -> u64 {
    let remaining = (entry.expires_at - entry.issued_at).num_seconds();
    remaining.max(1) as u64
}

fn to_store_error(error: InfrastructureError) -> String {
    error.to_string()
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn get(&self, identifier: &str) -> Result<Option<OtpEntry>, String> {
        let raw = self
            .client
            .get(&self.entry_key(identifier))
            .await
            .map_err(to_store_error)?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| to_store_error(e.into())),
            None => Ok(None),
        }
    }

    async fn put(&self, entry: &OtpEntry) -> Result<(), String> {
        let json = serde_json::to_string(entry).map_err(|e| to_store_error(e.into()))?;
        self.client
            .set_with_expiry(&self.entry_key(&entry.identifier), &json, ttl_seconds(entry))
            .await
            .map_err(to_store_error)
    }

    async fn delete(&self, identifier: &str) -> Result<bool, String> {
        self.client
            .delete(&self.entry_key(identifier))
            .await
            .map_err(to_store_error)
    }

    async fn consume(&self, identifier: &str, entry_id: Uuid) -> Result<bool, String> {
        let id = entry_id.to_string();
        let deleted = self
            .client
            .eval_script(&self.consume_script, &self.entry_key(identifier), &[id.as_str()])
            .await
            .map_err(to_store_error)?;
        Ok(deleted > 0)
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, String> {
        // Redis expires keys itself
        Ok(0)
    }
}
