//! Redis client with connection retry and the primitives the OTP store needs
//!
//! Every operation runs on a multiplexed connection and is retried with
//! exponential backoff on transient errors. Counter increments are not
//! idempotent and only retry when the server refused the command outright.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use og_shared::CacheConfig;

use crate::InfrastructureError;

/// Upper bound for the backoff between two attempts
const MAX_BACKOFF_MS: u64 = 5000;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Which failures an operation may be repeated after
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RetryMode {
    /// Idempotent commands: any transient error
    Transient,
    /// Non-idempotent commands: only errors where the server did not run it.
    /// A lost reply on a committed `INCR` must not be replayed.
    RejectedOnly,
}

impl RetryMode {
    pub(crate) fn allows(&self, error: &RedisError) -> bool {
        match self {
            RetryMode::Transient => is_retriable_error(error),
            RetryMode::RejectedOnly => is_rejected_before_execution(error),
        }
    }
}

/// Retry mode of the counter pipeline
pub(crate) const COUNTER_RETRY: RetryMode = RetryMode::RejectedOnly;

/// Redis client with automatic retry of transient failures
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Maximum number of attempts per operation
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect using the retry settings from `config`
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        info!(
            url = %mask_url(&config.url),
            max_connections = config.max_connections,
            "Creating Redis client"
        );

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let max_retries = config.max_retries.max(1);
        let connect = Self::create_connection_with_retry(client, max_retries, config.retry_delay_ms);
        let connection = tokio::time::timeout(
            Duration::from_secs(config.connection_timeout.max(1) * u64::from(max_retries)),
            connect,
        )
        .await
        .map_err(|_| InfrastructureError::Config("Timed out connecting to Redis".to_string()))??;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            max_retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = next_delay(delay);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Set a value that expires after `expiry_seconds`
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}' with expiry {}s", key, expiry_seconds);

        self.execute_with_retry(RetryMode::Transient, |mut conn| {
            let key = key.to_string();
            let value = value.to_string();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Get a value; `None` when missing or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        self.execute_with_retry(RetryMode::Transient, |mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to get key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Delete keys, returning how many existed
    pub async fn delete(&self, keys: &[String]) -> Result<u32, InfrastructureError> {
        if keys.is_empty() {
            return Ok(0);
        }
        debug!("Deleting keys {:?}", keys);

        self.execute_with_retry(RetryMode::Transient, |mut conn| {
            let keys = keys.to_vec();
            Box::pin(async move { conn.del::<_, u32>(keys).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to delete keys {:?}: {}", keys, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Increment a counter and reset its expiry in one `MULTI`/`EXEC`
    pub async fn increment_with_ttl(
        &self,
        key: &str,
        expiry_seconds: u64,
    ) -> Result<i64, InfrastructureError> {
        let ttl = i64::try_from(expiry_seconds).unwrap_or(i64::MAX);

        let (count,): (i64,) = self
            .execute_with_retry(COUNTER_RETRY, |mut conn| {
                let key = key.to_string();
                Box::pin(async move {
                    redis::pipe()
                        .atomic()
                        .incr(&key, 1)
                        .expire(&key, ttl)
                        .ignore()
                        .query_async(&mut conn)
                        .await
                })
            })
            .await
            .map_err(|e| {
                error!("Failed to increment counter '{}': {}", key, e);
                InfrastructureError::Cache(e)
            })?;

        debug!("Counter '{}' incremented to {}", key, count);
        Ok(count)
    }

    /// Remaining lifetime in seconds, `None` if the key is missing or has no
    /// expiry
    pub async fn ttl(&self, key: &str) -> Result<Option<u64>, InfrastructureError> {
        let ttl = self
            .execute_with_retry(RetryMode::Transient, |mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.ttl::<_, i64>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to get TTL for key '{}': {}", key, e);
                InfrastructureError::Cache(e)
            })?;

        // -2: missing, -1: no expiry
        Ok(u64::try_from(ttl).ok())
    }

    /// PING the server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(RetryMode::Transient, |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await
            .map_err(|e| {
                error!("Redis health check failed: {}", e);
                InfrastructureError::Cache(e)
            })?;

        if response == "PONG" {
            Ok(true)
        } else {
            warn!("Redis health check returned unexpected response: {}", response);
            Ok(false)
        }
    }

    async fn execute_with_retry<F, T>(&self, mode: RetryMode, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            match operation(self.connection.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && mode.allows(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = next_delay(delay);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn next_delay(delay: u64) -> u64 {
    delay.saturating_mul(2).min(MAX_BACKOFF_MS)
}

/// Transient errors worth another attempt
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// The server answered without executing the command
pub(crate) fn is_rejected_before_execution(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::BusyLoadingError | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.find('@'), url.find("://")) {
        if proto_end < at_pos {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}
