#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use qrlink::application::services::{LinkService, QrService};
use qrlink::domain::entities::{NewQrCode, NewShortLink, QrCode, ShortLink};
use qrlink::domain::repositories::{QrCodeRepository, ShortLinkRepository};
use qrlink::error::AppError;
use qrlink::infrastructure::storage::QrImageStore;
use qrlink::state::AppState;
use qrlink::utils::code_generator::ShortLinkGenerator;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

pub const BASE_URL: &str = "http://sho.rt";

/// In-memory short link store with the same conflict semantics as the
/// PostgreSQL one.
#[derive(Default)]
pub struct InMemoryShortLinks {
    links: Mutex<HashMap<String, ShortLink>>,
    unreachable: AtomicBool,
}

impl InMemoryShortLinks {
    pub fn records(&self) -> Vec<ShortLink> {
        self.links.lock().unwrap().values().cloned().collect()
    }

    pub fn insert(&self, short_link: &str, long_url: &str) {
        let link = ShortLink::new(
            short_link.to_string(),
            long_url.to_string(),
            Utc::now(),
            "127.0.0.1".to_string(),
            None,
        );
        self.links
            .lock()
            .unwrap()
            .insert(short_link.to_string(), link);
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> Result<(), AppError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(AppError::storage("Database error", json!({})));
        }
        Ok(())
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryShortLinks {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        self.check_reachable()?;
        let mut links = self.links.lock().unwrap();
        if links.contains_key(&new_link.short_link) {
            return Err(AppError::conflict("Short link already exists", json!({})));
        }
        let link = new_link.into_short_link(Utc::now());
        links.insert(link.short_link.clone(), link.clone());
        Ok(link)
    }

    async fn find_by_short_link(&self, short_link: &str) -> Result<Option<ShortLink>, AppError> {
        self.check_reachable()?;
        Ok(self.links.lock().unwrap().get(short_link).cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.check_reachable()?;
        Ok(self.links.lock().unwrap().len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_reachable()
    }
}

/// In-memory QR record store. Inserts can be made to fail.
#[derive(Default)]
pub struct InMemoryQrCodes {
    codes: Mutex<HashMap<Uuid, QrCode>>,
    fail_inserts: AtomicBool,
}

impl InMemoryQrCodes {
    pub fn records(&self) -> Vec<QrCode> {
        self.codes.lock().unwrap().values().cloned().collect()
    }

    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl QrCodeRepository for InMemoryQrCodes {
    async fn create(&self, new_qr: NewQrCode) -> Result<QrCode, AppError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::storage("Database error", json!({})));
        }
        let mut codes = self.codes.lock().unwrap();
        if codes.contains_key(&new_qr.qr_id) {
            return Err(AppError::conflict("QR code already exists", json!({})));
        }
        let qr = new_qr.into_qr_code(Utc::now());
        codes.insert(qr.qr_id, qr.clone());
        Ok(qr)
    }

    async fn find_by_id(&self, qr_id: Uuid) -> Result<Option<QrCode>, AppError> {
        Ok(self.codes.lock().unwrap().get(&qr_id).cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.codes.lock().unwrap().len() as i64)
    }
}

pub struct TestContext {
    pub state: AppState,
    pub links: Arc<InMemoryShortLinks>,
    pub qr_codes: Arc<InMemoryQrCodes>,
}

/// Builds application state over in-memory stores, writing images to
/// `content_dir`. URLs are rendered against [`BASE_URL`].
pub fn create_test_state(content_dir: &Path) -> TestContext {
    create_test_state_with_base(content_dir, Some(BASE_URL))
}

pub fn create_test_state_with_base(content_dir: &Path, base_url: Option<&str>) -> TestContext {
    let links = Arc::new(InMemoryShortLinks::default());
    let qr_codes = Arc::new(InMemoryQrCodes::default());
    let images = Arc::new(QrImageStore::new(content_dir));

    let state = AppState {
        link_service: Arc::new(LinkService::new(
            links.clone(),
            Arc::new(ShortLinkGenerator::from_seed(42)),
        )),
        qr_service: Arc::new(QrService::new(qr_codes.clone(), images)),
        base_url: base_url.map(str::to_string),
    };

    TestContext {
        state,
        links,
        qr_codes,
    }
}

pub fn png_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".png"))
        .collect()
}
