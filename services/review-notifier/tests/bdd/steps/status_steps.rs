//! BDD step definitions for response validation and status interpretation

use cucumber::gherkin::Step;
use cucumber::{given, then, when};

use review_notifier::response::extract_first_homework;
use review_notifier::status::parse_status;
use review_notifier::ReviewNotifierError;

use crate::world::ReviewNotifierWorld;

#[given("the API response")]
fn api_response(world: &mut ReviewNotifierWorld, step: &Step) {
    let body = step.docstring.as_deref().expect("response docstring missing");
    world.response = Some(serde_json::from_str(body).expect("invalid JSON in feature"));
}

#[when("the most recent homework is rendered")]
fn render_first(world: &mut ReviewNotifierWorld) {
    let response = world.response.as_ref().expect("response not set");
    world.rendered = Some(extract_first_homework(response).and_then(parse_status));
}

#[then(expr = "the message should be {string}")]
fn message_is(world: &mut ReviewNotifierWorld, expected: String) {
    let rendered = world.rendered.as_ref().expect("nothing rendered");
    assert_eq!(rendered.as_ref().unwrap(), &expected);
}

#[then(expr = "rendering should fail with a {string} error")]
fn rendering_fails(world: &mut ReviewNotifierWorld, expected: String) {
    let rendered = world.rendered.as_ref().expect("nothing rendered");
    let err = rendered.as_ref().expect_err("rendering succeeded");
    let actual = match err {
        ReviewNotifierError::ResponseType(_) => "wrong type",
        ReviewNotifierError::MissingKey { .. } => "missing key",
        ReviewNotifierError::EmptyHomeworks => "empty homework list",
        ReviewNotifierError::UnknownStatus(_) => "unknown status",
        other => panic!("unexpected error {other:?}"),
    };
    assert_eq!(actual, expected, "{err}");
}
