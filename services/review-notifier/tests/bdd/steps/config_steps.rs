//! BDD step definitions for startup configuration

use cucumber::{given, then, when};

use review_notifier::Secrets;

use crate::world::ReviewNotifierWorld;

#[given(expr = "environment variable {string} is set to {string}")]
fn env_set(world: &mut ReviewNotifierWorld, name: String, value: String) {
    world.env.push((name, value));
}

#[given(expr = "environment variable {string} is empty")]
fn env_empty(world: &mut ReviewNotifierWorld, name: String) {
    world.env.push((name, String::new()));
}

#[when("the secrets are loaded")]
fn load_secrets(world: &mut ReviewNotifierWorld) {
    let env = world.env.clone();
    world.secrets_result = Some(Secrets::from_lookup(|name| {
        env.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }));
}

#[then(expr = "the chat id should be {string}")]
fn chat_id_is(world: &mut ReviewNotifierWorld, expected: String) {
    let secrets = world
        .secrets_result
        .as_ref()
        .expect("secrets not loaded")
        .as_ref()
        .unwrap();
    assert_eq!(secrets.telegram_chat_id, expected);
}

#[then(expr = "loading should fail mentioning {string}")]
fn loading_fails(world: &mut ReviewNotifierWorld, name: String) {
    let result = world.secrets_result.as_ref().expect("secrets not loaded");
    let err = result.as_ref().expect_err("secrets loaded");
    assert!(err.to_string().contains(&name), "{err}");
}
