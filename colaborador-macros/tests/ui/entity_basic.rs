use colaborador_domain::entity::Entity;
use colaborador_domain::value_object::Version;
use colaborador_macros::entity;

#[entity]
#[derive(Clone)]
struct Badge {
    label: String,
}

#[entity(id = u64, debug = false)]
struct Counter {
    value: i64,
}

fn main() {
    let badge = Badge::default();
    assert!(badge.id().is_none());
    assert!(badge.version().is_none());
    assert!(!badge.is_persisted());
    let _ = format!("{:?}", badge.clone());
    let _ = badge.label;

    let counter = Counter {
        id: Some(7),
        version: Some(Version::new()),
        value: 1,
    };
    assert_eq!(counter.id(), Some(&7));
    assert_eq!(counter.version(), Some(Version::new()));
    let _ = counter.value;
}
