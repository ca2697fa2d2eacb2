//! Mock implementations for testing the OTP services

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::OtpCode;
use crate::services::otp::{CodeGenerator, DispatchGateway, EphemeralStore};

// In-memory store with a clock that only moves when told to
pub struct MockStore {
    entries: Mutex<HashMap<String, (String, u64)>>, // key -> (value, expires_at)
    now: AtomicU64,
    pub should_fail: AtomicBool,
}

impl MockStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
            now: AtomicU64::new(0),
            should_fail: AtomicBool::new(false),
        })
    }

    /// Move the clock forward
    pub fn advance(&self, seconds: u64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }

    pub fn fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Live value, bypassing the failure switch
    pub fn peek(&self, key: &str) -> Option<String> {
        let now = self.now.load(Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(value, _)| value.clone())
    }

    pub fn remaining(&self, key: &str) -> Option<u64> {
        let now = self.now.load(Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(_, expires_at)| expires_at - now)
    }

    pub fn put(&self, key: &str, value: &str, ttl_seconds: u64) {
        let now = self.now.load(Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), now + ttl_seconds));
    }

    fn check(&self) -> Result<(), String> {
        if self.should_fail.load(Ordering::SeqCst) {
            Err("Store connection refused".to_string())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EphemeralStore for MockStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.check()?;
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.check()?;
        self.put(key, value, ttl_seconds);
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<(), String> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }

    async fn increment_with_ttl(&self, key: &str, ttl_seconds: u64) -> Result<i64, String> {
        self.check()?;
        let current = self
            .peek(key)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0);
        let next = current + 1;
        self.put(key, &next.to_string(), ttl_seconds);
        Ok(next)
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, String> {
        self.check()?;
        Ok(self.remaining(key))
    }

    async fn ping(&self) -> Result<(), String> {
        self.check()
    }
}

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub recipient: String,
    pub subject: String,
    pub template_id: String,
    pub data: HashMap<String, String>,
}

// Records every message instead of sending it
pub struct MockDispatch {
    pub sent: Mutex<Vec<SentMessage>>,
    pub should_fail: AtomicBool,
}

impl MockDispatch {
    pub fn new(should_fail: bool) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(should_fail),
        })
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<SentMessage> {
        self.sent.lock().unwrap().last().cloned()
    }

    pub fn last_code(&self) -> Option<String> {
        self.last().and_then(|m| m.data.get("otp").cloned())
    }
}

#[async_trait]
impl DispatchGateway for MockDispatch {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        template_id: &str,
        data: &HashMap<String, String>,
    ) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("Mail provider rejected the message".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMessage {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            template_id: template_id.to_string(),
            data: data.clone(),
        });
        Ok(format!("mock-msg-{}", sent.len()))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

// Hands out predetermined codes, then repeats the last one
pub struct FixedCodeGenerator {
    codes: Mutex<VecDeque<OtpCode>>,
    last: Mutex<Option<OtpCode>>,
}

impl FixedCodeGenerator {
    pub fn new(codes: &[&str]) -> Box<Self> {
        Box::new(Self {
            codes: Mutex::new(codes.iter().filter_map(|c| OtpCode::parse(c)).collect()),
            last: Mutex::new(None),
        })
    }
}

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> OtpCode {
        let mut last = self.last.lock().unwrap();
        if let Some(code) = self.codes.lock().unwrap().pop_front() {
            *last = Some(code);
        }
        last.clone().expect("FixedCodeGenerator needs at least one code")
    }
}
