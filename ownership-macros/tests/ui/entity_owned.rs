use ownership_domain::entity::Entity;
use ownership_domain::identity::UserId;
use ownership_domain::ownership::Owned;
use ownership_macros::{entity, entity_id};
use uuid::Uuid;

#[entity_id]
struct NoteId(Uuid);

#[entity(id = NoteId, owner = author)]
struct Note {
    title: String,
    author: UserId,
}

fn main() {
    let mut note = Note::new(NoteId::generate());
    assert_eq!(note.version(), 0);
    assert!(!note.is_persisted());

    let author = UserId::generate();
    note.author = author;
    note.title = "draft".into();
    assert_eq!(note.owner_id(), &author);
    assert!(note.is_owned_by(&author));
}
