use super::*;

fn user() -> User {
    User {
        id: "u1".to_owned(),
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
    }
}

#[test]
fn user_record_round_trips_through_storage_encoding() {
    let encoded = encode_user(&user());
    let decoded = decode_user(&encoded).expect("decode");
    assert_eq!(decoded, user());
}

#[test]
fn decode_user_rejects_unreadable_records() {
    assert!(decode_user("").is_none());
    assert!(decode_user("not json").is_none());
    assert!(decode_user("{\"name\": \"Ada\"}").is_none());
}
