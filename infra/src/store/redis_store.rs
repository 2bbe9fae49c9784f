//! Redis-backed verification record store
//!
//! One JSON document per phone number under the `verification:code`
//! namespace. The verify-time mutation runs as a Lua script so the
//! false→true transition of `verified` is a true compare-and-set: two
//! concurrent verify attempts against the same pending record cannot both
//! observe the transition.
//!
//! Keys carry a TTL slightly past the record's `expires_at`. Expiry is
//! still decided at read time by the core; the Redis TTL only garbage
//! collects inert records out of band.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use otp_core::domain::entities::verification_record::VerificationRecord;
use otp_core::services::verification::RecordStore;
use otp_shared::config::CacheConfig;
use otp_shared::utils::phone::mask_phone;

use crate::InfrastructureError;

/// Key namespace reserved for verification records
const RECORD_KEY_PREFIX: &str = "verification:code";

/// How long a key outlives the record's `expires_at`. Within the grace
/// window a just-expired code reports `Expired` rather than `NotFound`.
const GC_GRACE_SECONDS: i64 = 60;

/// Compare-and-set for the verify-time mutation. Returns 1 when this call
/// performed the false→true transition, 0 when the record is missing or
/// already verified.
const MARK_VERIFIED_SCRIPT: &str = r#"
local raw = redis.call('GET', KEYS[1])
if not raw then
    return 0
end
local record = cjson.decode(raw)
if record['verified'] then
    return 0
end
record['verified'] = true
record['verified_at'] = ARGV[1]
redis.call('SET', KEYS[1], cjson.encode(record), 'KEEPTTL')
return 1
"#;

/// Redis implementation of the verification record store
#[derive(Clone)]
pub struct RedisRecordStore {
    /// Multiplexed connection shared across request handlers
    connection: MultiplexedConnection,
}

impl RedisRecordStore {
    /// Connect to Redis with retry and exponential backoff
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::connect_with_retry(client, config.max_retries, config.retry_delay_ms).await?;

        info!("Redis record store connected");
        Ok(Self { connection })
    }

    async fn connect_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Connecting to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    fn record_key(phone: &str) -> String {
        format!("{}:{}", RECORD_KEY_PREFIX, phone)
    }

    /// Key TTL: time until the record expires, plus the GC grace window
    fn storage_ttl_seconds(record: &VerificationRecord, now: DateTime<Utc>) -> i64 {
        let remaining = (record.expires_at - now).num_seconds().max(0);
        remaining + GC_GRACE_SECONDS
    }

    async fn put_record(&self, record: &VerificationRecord) -> Result<(), InfrastructureError> {
        let key = Self::record_key(&record.phone);
        let json = serde_json::to_string(record)?;
        let ttl = Self::storage_ttl_seconds(record, Utc::now());

        let mut conn = self.connection.clone();
        // Plain SET: a reissue replaces the previous document wholesale
        conn.set_ex::<_, _, ()>(&key, json, ttl as u64).await?;

        debug!(
            phone = %mask_phone(&record.phone),
            ttl_seconds = ttl,
            "Stored verification record"
        );
        Ok(())
    }

    async fn get_record(
        &self,
        phone: &str,
    ) -> Result<Option<VerificationRecord>, InfrastructureError> {
        let key = Self::record_key(phone);
        let mut conn = self.connection.clone();

        let raw: Option<String> = conn.get(&key).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn cas_verified(
        &self,
        phone: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<bool, InfrastructureError> {
        let key = Self::record_key(phone);
        let mut conn = self.connection.clone();

        let transitioned: i64 = redis::Script::new(MARK_VERIFIED_SCRIPT)
            .key(&key)
            .arg(verified_at.to_rfc3339_opts(SecondsFormat::Micros, true))
            .invoke_async(&mut conn)
            .await?;

        debug!(
            phone = %mask_phone(phone),
            transitioned = transitioned == 1,
            "Ran verify-time compare-and-set"
        );
        Ok(transitioned == 1)
    }
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    async fn put(&self, record: &VerificationRecord) -> Result<(), String> {
        self.put_record(record).await.map_err(|e| e.to_string())
    }

    async fn get(&self, phone: &str) -> Result<Option<VerificationRecord>, String> {
        self.get_record(phone).await.map_err(|e| e.to_string())
    }

    async fn mark_verified(
        &self,
        phone: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<bool, String> {
        self.cas_verified(phone, verified_at)
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use otp_core::domain::entities::verification_record::DeliveryMethod;

    #[test]
    fn test_record_key_namespace() {
        assert_eq!(
            RedisRecordStore::record_key("+819012345678"),
            "verification:code:+819012345678"
        );
    }

    #[test]
    fn test_storage_ttl_adds_grace_window() {
        let record =
            VerificationRecord::new("+819012345678".to_string(), DeliveryMethod::Sms);
        let ttl = RedisRecordStore::storage_ttl_seconds(&record, record.created_at);
        assert_eq!(ttl, 5 * 60 + GC_GRACE_SECONDS);
    }

    #[test]
    fn test_storage_ttl_for_already_expired_record_is_just_grace() {
        let record =
            VerificationRecord::new("+819012345678".to_string(), DeliveryMethod::Sms);
        let later = record.expires_at + Duration::minutes(10);
        assert_eq!(
            RedisRecordStore::storage_ttl_seconds(&record, later),
            GC_GRACE_SECONDS
        );
    }

    #[test]
    fn test_cas_script_arg_matches_serde_format() {
        // the script splices verified_at into the stored JSON; the value
        // must deserialize back through serde's RFC3339 parser
        let now = Utc::now();
        let formatted = now.to_rfc3339_opts(SecondsFormat::Micros, true);
        let parsed: DateTime<Utc> =
            serde_json::from_str(&format!("\"{}\"", formatted)).unwrap();
        assert_eq!(parsed.timestamp_micros(), now.timestamp_micros());
    }
}
