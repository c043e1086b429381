use ownership_application::context::AppContext;
use ownership_application::outcome::Outcome;
use ownership_application::{ProjectParams, ProjectsEndpoint};
use ownership_domain::authorization::GuardConfig;
use ownership_domain::identity::{Identity, UserId};
use ownership_domain::persist::{InMemoryProjectRepository, ProjectRepository};
use ownership_domain::project::ProjectId;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn print(step: &str, out: &Outcome) {
    let detail = match (out.location(), out.errors()) {
        (Some(location), _) => format!("-> {location}"),
        (None, Some(errors)) => errors.full_messages().join(", "),
        (None, None) => out
            .body()
            .map(|b| b.to_string())
            .unwrap_or_default(),
    };
    println!("{step:<40} {} {detail}", out.status());
}

/// 从跳转地址中取出新项目的标识
fn created_id(out: &Outcome) -> anyhow::Result<ProjectId> {
    let location = out
        .location()
        .ok_or_else(|| anyhow::anyhow!("create did not redirect"))?;
    let id = location
        .rsplit('/')
        .next()
        .ok_or_else(|| anyhow::anyhow!("unexpected location {location}"))?;
    Ok(id.parse::<ProjectId>()?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let config: GuardConfig = match std::env::var("GUARD_CONFIG") {
        Ok(raw) => serde_json::from_str(&raw)?,
        Err(_) => GuardConfig::default(),
    };

    let repo = Arc::new(InMemoryProjectRepository::new());
    let endpoint = ProjectsEndpoint::new(repo.clone(), config)?;

    let alice = AppContext::builder()
        .identity(Identity::new(UserId::generate()))
        .correlation_id("demo-alice")
        .build();
    let bob = AppContext::signed_in(Identity::new(UserId::generate()));
    let guest = AppContext::guest();

    let out = endpoint
        .create(&alice, ProjectParams::named("Same Old Name"))
        .await;
    print("alice creates \"Same Old Name\"", &out);
    let project = created_id(&out)?;

    print(
        "alice creates it again",
        &endpoint
            .create(&alice, ProjectParams::named("Same Old Name"))
            .await,
    );
    print(
        "alice creates a blank project",
        &endpoint.create(&alice, ProjectParams::default()).await,
    );
    print(
        "bob creates \"Same Old Name\"",
        &endpoint
            .create(&bob, ProjectParams::named("Same Old Name"))
            .await,
    );
    print(
        "guest creates a project",
        &endpoint.create(&guest, ProjectParams::named("x")).await,
    );

    print("alice lists", &endpoint.index(&alice).await);
    print("guest lists", &endpoint.index(&guest).await);
    print("bob shows alice's project", &endpoint.show(&bob, project).await);
    print(
        "bob renames alice's project",
        &endpoint
            .update(&bob, project, ProjectParams::named("New Name"))
            .await,
    );
    print(
        "alice renames her project",
        &endpoint
            .update(&alice, project, ProjectParams::named("New Name"))
            .await,
    );
    print("guest deletes it", &endpoint.destroy(&guest, project).await);
    print("alice deletes it", &endpoint.destroy(&alice, project).await);
    print(
        "alice shows it again",
        &endpoint.show(&alice, project).await,
    );

    println!("projects left: {}", repo.count().await?);
    Ok(())
}
