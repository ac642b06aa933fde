use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tempfile::TempDir;
use tokio::task::JoinHandle;

use mentorboard::auth::JwtSigner;
use mentorboard::cache::MemoryCache;
use mentorboard::notify::LogNotifier;
use mentorboard::server::{AppState, create_router};
use mentorboard::service::{AdminService, provision_admin};
use mentorboard::store::{SqliteStore, Store};
use mentorboard::types::{ObjectId, Status, Student, Submission, Task};

pub const ADMIN_USERNAME: &str = "root";
pub const ADMIN_PASSWORD: &str = "s3cret-pass";
pub const JWT_SECRET: &[u8] = b"integration-secret";

/// A server running on an ephemeral port inside the test's runtime.
pub struct TestServer {
    pub temp_dir: TempDir,
    pub base_url: String,
    pub admin_token: String,
    /// The server's own store, for seeding rows no endpoint creates.
    pub store: Arc<SqliteStore>,
    server_task: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = Arc::new(
            SqliteStore::new(temp_dir.path().join("mentorboard.db")).expect("open store"),
        );
        store.initialize().expect("initialize store");
        provision_admin(store.as_ref(), ADMIN_USERNAME, ADMIN_PASSWORD).expect("provision admin");

        let service = AdminService::new(
            store.clone(),
            Arc::new(MemoryCache::new()),
            Arc::new(LogNotifier),
            Arc::new(JwtSigner::new(JWT_SECRET).expect("signer")),
        );
        let app = create_router(Arc::new(AppState {
            service: Arc::new(service),
        }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let server_task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self::wait_for_ready(&base_url).await;
        let admin_token = Self::login(&base_url).await;

        Self {
            temp_dir,
            base_url,
            admin_token,
            store,
            server_task: Some(server_task),
        }
    }

    async fn wait_for_ready(base_url: &str) {
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client
                .get(format!("{}/health", base_url))
                .send()
                .await
                .is_ok()
            {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        panic!("Server did not become ready");
    }

    async fn login(base_url: &str) -> String {
        let resp: serde_json::Value = reqwest::Client::new()
            .post(format!("{}/login", base_url))
            .json(&serde_json::json!({
                "username": ADMIN_USERNAME,
                "password": ADMIN_PASSWORD,
            }))
            .send()
            .await
            .expect("login")
            .json()
            .await
            .expect("parse login response");
        resp["data"]["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn seed_student(&self, username: &str) -> Student {
        let now = Utc::now();
        let student = Student {
            id: ObjectId::new(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: username.to_string(),
            middle_name: String::new(),
            last_name: "Learner".to_string(),
            domains: vec!["web".to_string()],
            dob: "2002-01-30".to_string(),
            gender: "male".to_string(),
            phone_number: "5550199".to_string(),
            phone_number_alt: String::new(),
            college: "City College".to_string(),
            course: "BSc".to_string(),
            specialization: "Maths".to_string(),
            has_arrears: false,
            place: "Riverside".to_string(),
            semester: "S3".to_string(),
            district: "North".to_string(),
            state: "Goa".to_string(),
            country: "India".to_string(),
            date_of_joining: String::new(),
            course_ending_date: String::new(),
            password_hash: "$argon2id$placeholder".to_string(),
            created_at: now,
            updated_at: now,
        };
        self.store.create_student(&student).expect("seed student");
        student
    }

    pub fn seed_task(&self, title: &str) -> Task {
        let now = Utc::now();
        let task = Task {
            id: ObjectId::new(),
            semester: "S3".to_string(),
            domain: "web".to_string(),
            title: title.to_string(),
            detail: "Build a landing page".to_string(),
            creator_id: ObjectId::new(),
            created_at: now,
            updated_at: now,
        };
        self.store.create_task(&task).expect("seed task");
        task
    }

    pub fn seed_submission(&self, student_id: &ObjectId, task_id: &ObjectId) -> Submission {
        let submission = Submission {
            id: ObjectId::new(),
            task_id: *task_id,
            student_id: *student_id,
            file_url: "https://files.example.com/landing.zip".to_string(),
            comment: "first try".to_string(),
            status: Status::Pending,
            updated_at: Utc::now(),
        };
        self.store
            .create_submission(&submission)
            .expect("seed submission");
        submission
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(task) = self.server_task.take() {
            task.abort();
        }
    }
}
