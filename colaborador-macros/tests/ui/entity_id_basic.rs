use colaborador_macros::entity_id;
use uuid::Uuid;

#[entity_id]
struct CollaboratorId(String);

#[entity_id(debug = false)]
struct BadgeId(Uuid);

impl std::fmt::Debug for BadgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BadgeId(..)")
    }
}

fn main() {
    let id = CollaboratorId::new("c-1".to_string());
    assert_eq!(id.as_str(), "c-1");
    assert_eq!(id.to_string(), "c-1");
    let parsed: CollaboratorId = "c-1".parse().unwrap();
    assert_eq!(parsed, id);
    let raw: String = id.into_inner();
    assert_eq!(raw, "c-1");

    let badge = BadgeId::new(Uuid::new_v4());
    let _ = format!("{:?}", badge); // 使用手写 Debug
}
