use ownership_application::bus::{CommandBus, QueryBus};
use ownership_application::context::AppContext;
use ownership_application::error::AppError;
use ownership_application::projects::{CreateProject, ListProjects, ProjectHandlers};
use ownership_application::{InMemoryCommandBus, InMemoryQueryBus};
use ownership_domain::authorization::OwnershipGuard;
use ownership_domain::identity::{Identity, UserId};
use ownership_domain::persist::InMemoryProjectRepository;
use ownership_domain::project::ProjectId;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let repo = Arc::new(InMemoryProjectRepository::new());
    let handlers = Arc::new(ProjectHandlers::new(repo, OwnershipGuard::default()));

    let commands = InMemoryCommandBus::new();
    commands.register::<CreateProject, _>(handlers.clone())?;
    let queries = InMemoryQueryBus::new();
    queries.register::<ListProjects, _>(handlers)?;

    let alice = AppContext::builder()
        .identity(Identity::new(UserId::generate()))
        .correlation_id("cor-1")
        .build();

    for name in ["Website", "Backend"] {
        commands
            .dispatch(
                &alice,
                CreateProject {
                    project_id: ProjectId::generate(),
                    name: name.into(),
                },
            )
            .await?;
    }

    // 同一所有者下重名 -> 校验错误
    let dup = CreateProject {
        project_id: ProjectId::generate(),
        name: "Website".into(),
    };
    if let Err(AppError::Validation(errors)) = commands.dispatch(&alice, dup).await {
        println!("rejected: {}", errors.full_messages().join(", "));
    }

    // 访客 -> 未认证
    if let Err(err) = queries.dispatch(&AppContext::guest(), ListProjects).await {
        println!("guest: {err}");
    }

    let list = queries.dispatch(&alice, ListProjects).await?;
    for p in &list.projects {
        println!("{} {}", p.id, p.name);
    }
    Ok(())
}
