//! Bootstrap and lifecycle tests

use std::sync::Arc;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use wiring_domain::error::Error;
use wiring_domain::module::ModuleDescriptor;
use wiring_domain::provider::{ClassProvider, FactoryProvider, ValueProvider};
use wiring_domain::value_objects::Token;
use wiring_infrastructure::config::ContainerConfig;
use wiring_infrastructure::di::{
    Application, Bootstrapper, LifecycleState, ResolutionState,
};

use crate::test_utils::{CONNECT_DELAY, Chicken, Clock, Counter, Egg, Pool, Repository, Scheduler};

static DATABASE_URL: Lazy<Token> = Lazy::new(|| Token::symbol("DATABASE_URL"));

fn database_url() -> Token {
    DATABASE_URL.clone()
}

fn pool_factory(delay: Duration) -> FactoryProvider {
    FactoryProvider::new_async(Token::of::<Pool>(), [database_url()], move |mut deps| async move {
        let url = deps.next::<String>()?;
        tokio::time::sleep(delay).await;
        Ok::<_, anyhow::Error>(Pool {
            url: url.as_str().to_string(),
        })
    })
}

fn app_module(delay: Duration) -> Arc<ModuleDescriptor> {
    ModuleDescriptor::new("app")
        .provider(ValueProvider::new(
            database_url(),
            "postgres://localhost/app".to_string(),
        ))
        .provider(pool_factory(delay))
        .provider(ClassProvider::of::<Repository>())
        .build()
}

#[tokio::test]
async fn test_bootstrap_waits_for_async_factories() {
    let started = Instant::now();

    let app = Application::bootstrap(app_module(CONNECT_DELAY), ContainerConfig::default())
        .await
        .expect("bootstrap");

    assert!(started.elapsed() >= CONNECT_DELAY);
    assert!(app.bootstrap_duration() >= CONNECT_DELAY);
    assert_eq!(app.state(), LifecycleState::Ready);
    assert_eq!(
        app.container().state(&Token::of::<Pool>()),
        Some(ResolutionState::Resolved)
    );

    let repository = app.get::<Repository>().await.expect("repository");
    assert_eq!(repository.pool.url, "postgres://localhost/app");
}

#[tokio::test]
async fn test_async_rejection_aborts_bootstrap() {
    let root = ModuleDescriptor::new("app")
        .provider(FactoryProvider::new_async(
            Token::of::<Pool>(),
            Vec::<Token>::new(),
            |_deps| async { Err::<Pool, _>(anyhow::anyhow!("connection refused")) },
        ))
        .build();
    let bootstrapper = Bootstrapper::new(root, ContainerConfig::default());
    let mut ready = bootstrapper.subscribe();

    let err = bootstrapper.run().await.unwrap_err();

    assert!(
        matches!(err, Error::AsyncProviderRejection { ref message, .. } if message.contains("connection refused"))
    );
    assert!(matches!(ready.state(), LifecycleState::Failed(_)));
    assert!(ready.wait().await.is_err());
}

#[tokio::test]
async fn test_bootstrap_timeout() {
    let config = ContainerConfig::default().with_bootstrap_timeout(Duration::from_millis(10));

    let err = Application::bootstrap(app_module(Duration::from_secs(5)), config)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::BootstrapTimeout { elapsed_ms } if elapsed_ms >= 10));
}

#[tokio::test]
async fn test_ready_signal_observes_spawned_bootstrap() {
    let bootstrapper = Bootstrapper::new(app_module(CONNECT_DELAY), ContainerConfig::default());
    let mut ready = bootstrapper.subscribe();
    assert_eq!(ready.state(), LifecycleState::Created);

    let handle = tokio::spawn(bootstrapper.run());
    ready.wait().await.expect("ready");

    assert_eq!(ready.state(), LifecycleState::Ready);
    let app = handle.await.expect("join").expect("bootstrap");
    app.get::<Repository>().await.expect("repository");
}

#[tokio::test]
async fn test_dropped_bootstrapper_fails_waiters() {
    let bootstrapper = Bootstrapper::new(app_module(CONNECT_DELAY), ContainerConfig::default());
    let mut ready = bootstrapper.subscribe();
    drop(bootstrapper);

    let err = ready.wait().await.unwrap_err();

    assert!(matches!(err, Error::Bootstrap { .. }));
}

#[tokio::test]
async fn test_validation_rejects_graph_before_factories_run() {
    let counter = Arc::new(Counter::default());
    let calls = Arc::clone(&counter);
    let root = ModuleDescriptor::new("app")
        .provider(FactoryProvider::new_async(Token::of::<Pool>(), Vec::<Token>::new(), move |_deps| {
            let calls = Arc::clone(&calls);
            async move {
                calls.bump();
                Ok::<_, anyhow::Error>(Pool { url: String::new() })
            }
        }))
        .provider(ClassProvider::of::<Scheduler>())
        .build();

    let err = Application::bootstrap(root, ContainerConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::TokenNotFound { .. }));
    assert_eq!(counter.get(), 0);
}

#[tokio::test]
async fn test_unvalidated_cycle_fails_on_request_without_hanging() {
    let root = ModuleDescriptor::new("app")
        .provider(ClassProvider::of::<Chicken>())
        .provider(ClassProvider::of::<Egg>())
        .build();
    let config = ContainerConfig::default().with_validate_graph(false);

    let app = Application::bootstrap(root, config)
        .await
        .expect("bootstrap skips graph validation");
    let (chicken, egg) = tokio::time::timeout(Duration::from_secs(2), async {
        tokio::join!(app.get::<Chicken>(), app.get::<Egg>())
    })
    .await
    .expect("cycle resolution must not hang");

    assert!(matches!(chicken, Err(Error::CircularDependency { .. })));
    assert!(matches!(egg, Err(Error::CircularDependency { .. })));
}

#[tokio::test]
async fn test_eager_singletons_resolve_during_bootstrap() {
    let counter = Arc::new(Counter::default());
    let root = ModuleDescriptor::new("app")
        .provider(ValueProvider::from_arc(Token::of::<Counter>(), counter.clone()))
        .provider(ClassProvider::of::<Clock>())
        .build();
    let config = ContainerConfig::default().with_eager_singletons(true);

    let app = Application::bootstrap(root, config).await.expect("bootstrap");

    assert_eq!(counter.get(), 1);
    assert_eq!(
        app.container().state(&Token::of::<Clock>()),
        Some(ResolutionState::Resolved)
    );
}

#[tokio::test]
async fn test_lazy_singletons_wait_for_first_request() {
    let counter = Arc::new(Counter::default());
    let root = ModuleDescriptor::new("app")
        .provider(ValueProvider::from_arc(Token::of::<Counter>(), counter.clone()))
        .provider(ClassProvider::of::<Clock>())
        .build();

    let app = Application::bootstrap(root, ContainerConfig::default())
        .await
        .expect("bootstrap");

    assert_eq!(counter.get(), 0);
    app.get::<Clock>().await.expect("clock");
    assert_eq!(counter.get(), 1);
}

#[tokio::test]
async fn test_shutdown_publishes_state() {
    let app = Application::bootstrap(app_module(Duration::ZERO), ContainerConfig::default())
        .await
        .expect("bootstrap");
    let signal = app.subscribe();

    let released = app.shutdown().await;

    assert_eq!(released, 1);
    assert_eq!(signal.state(), LifecycleState::ShutDown);
    assert!(matches!(app.get::<Repository>().await, Err(Error::ShutDown)));
}

#[test]
fn test_lifecycle_state_serializes_tagged() {
    let json = serde_json::to_value(LifecycleState::Failed("boom".to_string())).expect("json");

    assert_eq!(json["state"], "failed");
    assert_eq!(json["message"], "boom");
    assert!(!LifecycleState::Bootstrapping.is_settled());
    assert!(LifecycleState::Ready.is_settled());
}
