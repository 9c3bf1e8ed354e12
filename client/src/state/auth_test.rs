use super::*;

fn user() -> User {
    User {
        id: "u1".to_owned(),
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
    }
}

#[test]
fn auth_state_default_is_signed_out() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(state.token.is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn sign_in_installs_user_and_token() {
    let mut state = AuthState {
        loading: true,
        ..AuthState::default()
    };
    state.sign_in(user(), "tok".to_owned());

    assert!(state.is_authenticated());
    assert_eq!(state.user.as_ref().map(|u| u.name.as_str()), Some("Ada"));
    assert_eq!(state.token.as_deref(), Some("tok"));
    assert!(!state.loading);
}

#[test]
fn sign_out_drops_session() {
    let mut state = AuthState::default();
    state.sign_in(user(), "tok".to_owned());
    state.sign_out();

    assert!(!state.is_authenticated());
    assert!(state.user.is_none());
    assert!(state.token.is_none());
}
