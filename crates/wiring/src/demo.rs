//! Sample module graph
//!
//! ```text
//! app ──imports──▶ users ──imports──▶ database
//!  ├─ UsersController (transient)      ├─ DATABASE_URL (value)
//!  └─ RequestContext (transient)       └─ DatabasePool (async factory, exported)
//!                   ├─ UserRepository (private)
//!                   └─ UserService (exported)
//! ```
//!
//! The pool factory simulates a slow connection, so the controller is only
//! reachable once bootstrap has waited for it.

use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use once_cell::sync::Lazy;
use tracing::debug;
use wiring_domain::module::ModuleDescriptor;
use wiring_domain::ports::{Dependencies, Injectable};
use wiring_domain::provider::{ClassProvider, FactoryProvider, ValueProvider};
use wiring_domain::value_objects::Token;
use wiring_infrastructure::di::ContainerSummary;

/// Connection string the demo pool connects to
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/wiring";

/// Simulated connection latency
pub const DEFAULT_CONNECT_DELAY: Duration = Duration::from_millis(50);

/// Token of the connection string value
pub static DATABASE_URL: Lazy<Token> = Lazy::new(|| Token::symbol("DATABASE_URL"));

/// Connection pool produced by an asynchronous factory
#[derive(Debug)]
pub struct DatabasePool {
    url: String,
    connect_time: Duration,
}

impl DatabasePool {
    /// Simulate connecting to `url`
    pub async fn connect(url: &str, delay: Duration) -> Self {
        tokio::time::sleep(delay).await;
        debug!(url, ?delay, "Database pool connected");
        Self {
            url: url.to_string(),
            connect_time: delay,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn connect_time(&self) -> Duration {
        self.connect_time
    }
}

/// Data access, private to the users module
pub struct UserRepository {
    pool: Arc<DatabasePool>,
}

impl UserRepository {
    pub fn find_name(&self, id: u64) -> String {
        format!("user-{id}@{}", self.pool.url())
    }
}

impl Injectable for UserRepository {
    fn dependencies() -> Vec<Token> {
        vec![Token::of::<DatabasePool>()]
    }

    fn construct(deps: &mut Dependencies) -> anyhow::Result<Self> {
        Ok(Self { pool: deps.next()? })
    }
}

/// Business logic exported by the users module
pub struct UserService {
    repository: Arc<UserRepository>,
}

impl UserService {
    pub fn greet(&self, id: u64) -> String {
        format!("Hello, {}", self.repository.find_name(id))
    }
}

impl Injectable for UserService {
    fn dependencies() -> Vec<Token> {
        vec![Token::of::<UserRepository>()]
    }

    fn construct(deps: &mut Dependencies) -> anyhow::Result<Self> {
        Ok(Self {
            repository: deps.next()?,
        })
    }
}

/// Source of request ids
#[derive(Debug, Default)]
pub struct RequestCounter(AtomicU64);

impl RequestCounter {
    fn next_id(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Per-request state, created fresh for every controller
pub struct RequestContext {
    id: u64,
}

impl RequestContext {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Injectable for RequestContext {
    fn dependencies() -> Vec<Token> {
        vec![Token::of::<RequestCounter>()]
    }

    fn construct(deps: &mut Dependencies) -> anyhow::Result<Self> {
        let counter = deps.next::<RequestCounter>()?;
        Ok(Self {
            id: counter.next_id(),
        })
    }
}

/// Entry point of the app module
pub struct UsersController {
    service: Arc<UserService>,
    request: Arc<RequestContext>,
}

impl UsersController {
    pub fn handle(&self, user_id: u64) -> String {
        format!("[request {}] {}", self.request.id(), self.service.greet(user_id))
    }

    pub fn service(&self) -> &Arc<UserService> {
        &self.service
    }

    pub fn request(&self) -> &Arc<RequestContext> {
        &self.request
    }
}

impl Injectable for UsersController {
    fn dependencies() -> Vec<Token> {
        vec![Token::of::<UserService>(), Token::of::<RequestContext>()]
    }

    fn construct(deps: &mut Dependencies) -> anyhow::Result<Self> {
        Ok(Self {
            service: deps.next()?,
            request: deps.next()?,
        })
    }
}

/// Module owning the connection string and the pool
pub fn database_module(url: &str, connect_delay: Duration) -> Arc<ModuleDescriptor> {
    ModuleDescriptor::new("database")
        .provider(ValueProvider::new(DATABASE_URL.clone(), url.to_string()))
        .provider(FactoryProvider::new_async(
            Token::of::<DatabasePool>(),
            [DATABASE_URL.clone()],
            move |mut deps| async move {
                let url = deps.next::<String>()?;
                Ok::<_, anyhow::Error>(DatabasePool::connect(&url, connect_delay).await)
            },
        ))
        .export(Token::of::<DatabasePool>())
        .build()
}

/// Module exposing [`UserService`] and hiding its repository
pub fn users_module(database: Arc<ModuleDescriptor>) -> Arc<ModuleDescriptor> {
    ModuleDescriptor::new("users")
        .import(database)
        .provider(ClassProvider::of::<UserRepository>())
        .provider(ClassProvider::of::<UserService>())
        .export(Token::of::<UserService>())
        .build()
}

/// Root module of the demo application
pub fn app_module(url: &str, connect_delay: Duration) -> Arc<ModuleDescriptor> {
    ModuleDescriptor::new("app")
        .import(users_module(database_module(url, connect_delay)))
        .provider(ValueProvider::new(
            Token::of::<RequestCounter>(),
            RequestCounter::default(),
        ))
        .provider(ClassProvider::of::<RequestContext>().transient())
        .provider(ClassProvider::of::<UsersController>().transient())
        .build()
}

/// Plain-text rendering of a container summary
pub fn render_summary(summary: &ContainerSummary) -> String {
    let mut out = format!("root module: {}\n", summary.root);
    for module in &summary.modules {
        let _ = writeln!(out, "module {}", module.name);
        for provider in &module.providers {
            let _ = writeln!(
                out,
                "  {:<20} {:<14} {:<10} {:<10}{}",
                provider.token,
                provider.kind,
                provider.scope.as_str(),
                format!("{:?}", provider.state).to_lowercase(),
                if provider.exported { " exported" } else { "" }
            );
        }
        if !module.imported.is_empty() {
            let _ = writeln!(out, "  imports: {}", module.imported.join(", "));
        }
    }
    out
}
