//! Fixtures and test doubles shared by unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::auth::JwtSigner;
use crate::cache::{Cache, MemoryCache};
use crate::error::{Error, Result};
use crate::notify::{NotificationMessage, Notifier};
use crate::service::AdminService;
use crate::store::{SqliteStore, Store};
use crate::types::*;

/// An [`AdminService`] over an in-memory store with observable doubles.
pub struct TestHarness {
    pub store: Arc<TestStore>,
    pub cache: Arc<TestCache>,
    pub notifier: Arc<RecordingNotifier>,
    pub service: AdminService,
}

impl TestHarness {
    pub const SECRET: &'static [u8] = b"unit-test-secret";

    pub fn new() -> Self {
        let store = Arc::new(TestStore::new());
        store.initialize().unwrap();
        let cache = Arc::new(TestCache::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = AdminService::new(
            store.clone(),
            cache.clone(),
            notifier.clone(),
            Arc::new(JwtSigner::new(Self::SECRET).unwrap()),
        );
        Self {
            store,
            cache,
            notifier,
            service,
        }
    }
}

/// In-memory SQLite store that counts reference reads and can be told to
/// fail notification lookups and writes.
pub struct TestStore {
    inner: SqliteStore,
    reference_reads: AtomicUsize,
    fail_token_reads: AtomicBool,
    fail_receipt_writes: AtomicBool,
}

impl TestStore {
    pub fn new() -> Self {
        Self {
            inner: SqliteStore::in_memory().unwrap(),
            reference_reads: AtomicUsize::new(0),
            fail_token_reads: AtomicBool::new(false),
            fail_receipt_writes: AtomicBool::new(false),
        }
    }

    /// Number of `list_references` calls, one per reference kind read.
    pub fn reference_reads(&self) -> usize {
        self.reference_reads.load(Ordering::SeqCst)
    }

    pub fn fail_token_reads(&self, fail: bool) {
        self.fail_token_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_receipt_writes(&self, fail: bool) {
        self.fail_receipt_writes.store(fail, Ordering::SeqCst);
    }
}

fn io_failure() -> Error {
    Error::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
        Some("disk I/O error".to_string()),
    ))
}

impl Store for TestStore {
    fn initialize(&self) -> Result<()> {
        self.inner.initialize()
    }

    fn upsert_admin(&self, username: &str, password_hash: &str) -> Result<ObjectId> {
        self.inner.upsert_admin(username, password_hash)
    }

    fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>> {
        self.inner.get_admin_by_username(username)
    }

    fn has_admin(&self) -> Result<bool> {
        self.inner.has_admin()
    }

    fn create_task(&self, task: &Task) -> Result<()> {
        self.inner.create_task(task)
    }

    fn upsert_task(&self, task: &Task) -> Result<()> {
        self.inner.upsert_task(task)
    }

    fn get_task(&self, id: &ObjectId) -> Result<Option<Task>> {
        self.inner.get_task(id)
    }

    fn list_tasks(&self) -> Result<Vec<Task>> {
        self.inner.list_tasks()
    }

    fn delete_task(&self, id: &ObjectId) -> Result<bool> {
        self.inner.delete_task(id)
    }

    fn create_student(&self, student: &Student) -> Result<()> {
        self.inner.create_student(student)
    }

    fn list_students(&self) -> Result<Vec<Student>> {
        self.inner.list_students()
    }

    fn create_submission(&self, submission: &Submission) -> Result<()> {
        self.inner.create_submission(submission)
    }

    fn get_submission(&self, id: &ObjectId) -> Result<Option<Submission>> {
        self.inner.get_submission(id)
    }

    fn update_submission_status(&self, id: &ObjectId, status: Status) -> Result<Submission> {
        self.inner.update_submission_status(id, status)
    }

    fn list_submission_views(&self, student_id: Option<&ObjectId>) -> Result<Vec<SubmissionView>> {
        self.inner.list_submission_views(student_id)
    }

    fn create_mentor(&self, mentor: &Mentor) -> Result<()> {
        self.inner.create_mentor(mentor)
    }

    fn upsert_mentor(&self, mentor: &Mentor) -> Result<()> {
        self.inner.upsert_mentor(mentor)
    }

    fn get_mentor(&self, id: &ObjectId) -> Result<Option<Mentor>> {
        self.inner.get_mentor(id)
    }

    fn list_mentors(&self) -> Result<Vec<Mentor>> {
        self.inner.list_mentors()
    }

    fn upsert_reference(&self, kind: ReferenceKind, item: &ReferenceItem) -> Result<()> {
        self.inner.upsert_reference(kind, item)
    }

    fn list_references(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>> {
        self.reference_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_references(kind)
    }

    fn set_notification_token(&self, token: &NotificationToken) -> Result<()> {
        self.inner.set_notification_token(token)
    }

    fn get_notification_token(&self, student_id: &ObjectId) -> Result<Option<NotificationToken>> {
        if self.fail_token_reads.load(Ordering::SeqCst) {
            return Err(io_failure());
        }
        self.inner.get_notification_token(student_id)
    }

    fn create_notification(&self, receipt: &NotificationReceipt) -> Result<()> {
        if self.fail_receipt_writes.load(Ordering::SeqCst) {
            return Err(io_failure());
        }
        self.inner.create_notification(receipt)
    }

    fn list_notifications(&self, student_id: &ObjectId) -> Result<Vec<NotificationReceipt>> {
        self.inner.list_notifications(student_id)
    }
}

/// Memory cache that counts writes and can be told to fail.
#[derive(Default)]
pub struct TestCache {
    inner: MemoryCache,
    sets: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl TestCache {
    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Cache for TestCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Cache("read refused".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Cache("write refused".to_string()));
        }
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, ttl).await
    }
}

/// Notifier that records every message it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<NotificationMessage>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<NotificationMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// When set, `send` returns an error without recording.
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &NotificationMessage) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Notification("provider unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub fn sample_student(username: &str) -> Student {
    let now = Utc::now();
    Student {
        id: ObjectId::new(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: username.to_string(),
        middle_name: String::new(),
        last_name: "Tester".to_string(),
        domains: vec!["ai".to_string()],
        dob: "2001-04-12".to_string(),
        gender: "female".to_string(),
        phone_number: "5550100".to_string(),
        phone_number_alt: String::new(),
        college: "State College".to_string(),
        course: "BTech".to_string(),
        specialization: "CS".to_string(),
        has_arrears: false,
        place: "Springfield".to_string(),
        semester: "S5".to_string(),
        district: "Central".to_string(),
        state: "Kerala".to_string(),
        country: "India".to_string(),
        date_of_joining: String::new(),
        course_ending_date: String::new(),
        password_hash: "not-a-real-hash".to_string(),
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_task(title: &str) -> Task {
    let now = Utc::now();
    Task {
        id: ObjectId::new(),
        semester: "S5".to_string(),
        domain: "ai".to_string(),
        title: title.to_string(),
        detail: "Write it up".to_string(),
        creator_id: ObjectId::new(),
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_submission(student_id: &ObjectId, task_id: &ObjectId) -> Submission {
    Submission {
        id: ObjectId::new(),
        task_id: *task_id,
        student_id: *student_id,
        file_url: "https://files.example.com/report.pdf".to_string(),
        comment: "done".to_string(),
        status: Status::Pending,
        updated_at: Utc::now(),
    }
}
