use ownership_macros::entity_id;
use uuid::Uuid;

#[entity_id]
struct TicketId(Uuid);

#[entity_id]
struct Slug(String);

fn main() {
    let id = TicketId::generate();
    let copied = id;
    assert_eq!(id, copied);

    let parsed: TicketId = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);

    let raw: Uuid = id.into();
    assert_eq!(TicketId::from(raw), id);

    let slug = Slug::new("alpha".to_string());
    let inner: &String = slug.as_ref();
    assert_eq!(inner, "alpha");
    assert!(Slug::new("a".into()) < Slug::new("b".into()));
}
