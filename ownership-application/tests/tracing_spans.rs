use ownership_application::context::AppContext;
use ownership_application::{ProjectParams, ProjectsEndpoint};
use ownership_domain::authorization::GuardConfig;
use ownership_domain::identity::{Identity, UserId};
use ownership_domain::persist::InMemoryProjectRepository;
use std::io;
use std::sync::{Arc, Mutex};

/// 收集格式化后的日志输出
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[tokio::test]
async fn correlation_id_is_recorded_on_handler_spans() -> anyhow::Result<()> {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let repo = Arc::new(InMemoryProjectRepository::new());
    let endpoint = ProjectsEndpoint::new(repo, GuardConfig::default())?;
    let ctx = AppContext::builder()
        .identity(Identity::new(UserId::generate()))
        .correlation_id("cor-7f3a")
        .build();

    let out = endpoint.create(&ctx, ProjectParams::named("Traced")).await;
    assert_eq!(out.status(), 302);
    let out = endpoint.index(&AppContext::guest()).await;
    assert_eq!(out.status(), 302);

    let logs = captured.text();
    assert!(logs.contains("project created"), "{logs}");
    assert!(logs.contains("cor-7f3a"), "{logs}");
    assert!(logs.contains("request rejected"), "{logs}");
    Ok(())
}
