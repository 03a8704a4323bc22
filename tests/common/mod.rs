//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which builds the application through the
//! factory with an in-memory database and serves it on a random port for
//! HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use legalai_core::config::{Config, IN_MEMORY_DB};
use legalai_core::{CaseDetails, Role};
use legalai_db::models::{CourtCase, NewUser, User, UserProfile};
use legalai_db::pool::{DbPool, PooledConnection};
use legalai_server::{create_app, AppContext};

/// Password used by every account the harness creates.
pub const PASSWORD: &str = "correct-horse-battery";

/// A running application backed by an in-memory database.
pub struct TestHarness {
    pub ctx: AppContext,
    pub db: DbPool,
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

/// Default test configuration: in-memory DB and the cheapest bcrypt cost.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.server.db_path = IN_MEMORY_DB.into();
    config.auth.bcrypt_cost = 4;
    config
}

impl TestHarness {
    /// Start a server with the default test configuration.
    pub async fn start() -> Self {
        Self::with_config(test_config()).await
    }

    /// Start a server with a custom configuration on a random port.
    pub async fn with_config(config: Config) -> Self {
        let app = create_app(config).expect("factory failed");
        let ctx = app.context().clone();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            app.serve_with_shutdown(listener, std::future::pending())
                .await
                .ok();
        });

        Self {
            db: ctx.db.clone(),
            ctx,
            addr,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a database connection from the pool.
    pub fn conn(&self) -> PooledConnection {
        legalai_db::pool::get_conn(&self.db).expect("failed to get db connection")
    }

    /// Insert an account directly, bypassing the HTTP API.
    pub fn create_user(&self, email: &str, role: Role) -> User {
        let hash = bcrypt::hash(PASSWORD, 4).expect("bcrypt failed");
        legalai_db::queries::users::create_user(
            &self.conn(),
            &NewUser {
                first_name: "Test".into(),
                last_name: role.to_string(),
                email: email.into(),
                password_hash: hash,
                role,
                profile: UserProfile {
                    address: "12 Court Road".into(),
                    phone: "9876543210".into(),
                    ..UserProfile::default()
                },
            },
        )
        .expect("failed to create user")
    }

    /// Log in over HTTP and return the bearer token.
    pub async fn login(&self, email: &str) -> String {
        let resp = self
            .client
            .post(self.url("/api/v1/accounts/login"))
            .json(&serde_json::json!({ "email": email, "password": PASSWORD }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200, "login failed for {email}");
        let json: serde_json::Value = resp.json().await.unwrap();
        json["token"].as_str().unwrap().to_string()
    }

    /// Create an account with `role` and return a token for it.
    pub async fn token_for(&self, email: &str, role: Role) -> String {
        self.create_user(email, role);
        self.login(email).await
    }

    /// Insert a court case directly.
    pub fn create_case(&self, title: &str) -> CourtCase {
        legalai_db::queries::cases::create_case(&self.conn(), &sample_case(title))
            .expect("failed to create case")
    }
}

/// A case with every mandatory field filled in.
pub fn sample_case(title: &str) -> CaseDetails {
    CaseDetails {
        case_title: title.into(),
        case_number: "CR-2024-118".into(),
        filing_number: "F-77".into(),
        filing_date: "2024-01-10".into(),
        filing_year: "2024".into(),
        listing_date: "2024-02-01".into(),
        plaintiff_name: "State".into(),
        defendant_name: "R. Kumar".into(),
        plaintiff_lawyer_name: "A. Mehta".into(),
        defendant_lawyer_name: "S. Rao".into(),
        judge_name: "J. Iyer".into(),
        ..CaseDetails::default()
    }
}
