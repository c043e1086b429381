use ownership_domain::authorization::{GuardConfig, Operation, OwnershipGuard};
use ownership_domain::identity::{Identity, UserId};
use ownership_domain::project::{Project, ProjectId};
use ownership_domain::validation::UniquenessValidator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config: GuardConfig = serde_json::from_str(r#"{ "sign_in_path": "/login" }"#)?;
    let guard = OwnershipGuard::new(config)?;
    let validator = UniquenessValidator::new();

    let alice = Identity::new(UserId::generate());
    let bob = Identity::new(UserId::generate());
    let website = Project::candidate(ProjectId::generate(), alice.id(), "Website");

    for (who, identity) in [("alice", Some(&alice)), ("bob", Some(&bob)), ("guest", None)] {
        match guard.authorize_on_resource(identity, &website, Operation::Update) {
            Ok(()) => println!("{who}: allowed"),
            Err(denied) => {
                let redirect = guard.redirect_for(&denied);
                println!("{who}: {denied} -> {} {}", redirect.status, redirect.location);
            }
        }
    }

    // 同一所有者下重名被拒绝，其他所有者可以同名
    let dup = Project::candidate(ProjectId::generate(), alice.id(), "Website");
    if let Err(errors) = validator.validate(&dup, [&website]) {
        println!("alice again: {errors}");
    }
    let bobs = Project::candidate(ProjectId::generate(), bob.id(), "Website");
    println!("bob: {:?}", validator.validate(&bobs, [&website]));
    Ok(())
}
