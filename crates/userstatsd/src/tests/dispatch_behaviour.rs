//! Behavioural tests for request/reply dispatch over the in-process bus.

use std::cell::RefCell;
use std::time::Duration;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use tokio::runtime::Runtime;

use crate::dispatch::Dispatcher;

use super::support::{Fixture, SUBJECT};

const REPLY_TIMEOUT: Duration = Duration::from_secs(2);

struct DispatchWorld {
    fixture: Fixture,
    dispatcher: Dispatcher,
    reply: Option<Value>,
    runtime: Runtime,
}

impl DispatchWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build test runtime");
        let fixture = Fixture::new();
        let mut dispatcher = fixture.dispatcher(REPLY_TIMEOUT);
        runtime
            .block_on(dispatcher.connect())
            .expect("subscribe dispatcher");
        Self {
            fixture,
            dispatcher,
            reply: None,
            runtime,
        }
    }

    fn send(&mut self, body: &str) {
        let reply = self
            .runtime
            .block_on(self.fixture.bus.request(
                SUBJECT,
                body.as_bytes().to_vec(),
                REPLY_TIMEOUT,
            ))
            .expect("reply received");
        let decoded = serde_json::from_slice(&reply.payload).expect("reply is JSON");
        self.reply = Some(decoded);
    }

    fn reply(&self) -> &Value {
        self.reply.as_ref().expect("a request was sent")
    }
}

impl Drop for DispatchWorld {
    fn drop(&mut self) {
        self.runtime.block_on(self.dispatcher.disconnect());
    }
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"')
}

fn parse_json(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|error| panic!("invalid JSON {text:?}: {error}"))
}

#[fixture]
fn world() -> RefCell<DispatchWorld> {
    RefCell::new(DispatchWorld::new())
}

#[given("the store answers {method} with {payload}")]
fn given_store_answer(world: &RefCell<DispatchWorld>, method: String, payload: String) {
    let store_method = match strip_quotes(&method) {
        "user_stats" => "user_stats",
        "top_users_by_kudos" => "top_users_by_kudos",
        other => panic!("unsupported store method {other}"),
    };
    world
        .borrow()
        .fixture
        .store
        .respond(store_method, parse_json(&payload));
}

#[given("the store fails with {message}")]
fn given_store_failure(world: &RefCell<DispatchWorld>, message: String) {
    world
        .borrow()
        .fixture
        .store
        .fail_with(strip_quotes(&message));
}

#[when("the request {request} is sent")]
fn when_request_sent(world: &RefCell<DispatchWorld>, request: String) {
    world.borrow_mut().send(&request);
}

#[when("the raw body {body} is sent")]
fn when_raw_body_sent(world: &RefCell<DispatchWorld>, body: String) {
    world.borrow_mut().send(strip_quotes(&body));
}

#[then("the reply is {expected}")]
fn then_reply_is(world: &RefCell<DispatchWorld>, expected: String) {
    assert_eq!(world.borrow().reply(), &parse_json(&expected));
}

#[then("the reply has no command field")]
fn then_no_command(world: &RefCell<DispatchWorld>) {
    let state = world.borrow();
    assert!(
        state.reply().get("command").is_none(),
        "unexpected command in {:?}",
        state.reply()
    );
}

#[then("the reply command is {command}")]
fn then_reply_command(world: &RefCell<DispatchWorld>, command: String) {
    let state = world.borrow();
    assert_eq!(
        state.reply().get("command").and_then(Value::as_str),
        Some(strip_quotes(&command))
    );
}

#[then("the reply error is {error}")]
fn then_reply_error(world: &RefCell<DispatchWorld>, error: String) {
    let state = world.borrow();
    let reply = state.reply();
    assert_eq!(reply.get("success"), Some(&Value::Bool(false)));
    assert!(reply.get("data").is_none(), "failure carried data: {reply:?}");
    assert_eq!(
        reply.get("error").and_then(Value::as_str),
        Some(strip_quotes(&error))
    );
}

#[then("the reply data field {field} is {value}")]
fn then_reply_data_field(world: &RefCell<DispatchWorld>, field: String, value: String) {
    let state = world.borrow();
    let data = state.reply().get("data").expect("reply carries data");
    assert_eq!(
        data.get(strip_quotes(&field)).and_then(Value::as_str),
        Some(strip_quotes(&value))
    );
}

#[scenario(
    path = "tests/features/daemon_dispatch.feature",
    name = "Known command is answered with the store payload"
)]
fn known_command(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_dispatch.feature",
    name = "Missing parameter is a validation failure"
)]
fn missing_parameter(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_dispatch.feature",
    name = "Missing command is rejected without echo"
)]
fn missing_command(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_dispatch.feature",
    name = "Unknown command is echoed back"
)]
fn unknown_command(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_dispatch.feature",
    name = "Requests for another service are refused"
)]
fn service_mismatch(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_dispatch.feature",
    name = "Malformed body is answered"
)]
fn malformed_body(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_dispatch.feature",
    name = "Store failures are normalised"
)]
fn store_failure(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_dispatch.feature",
    name = "Health reflects the running responder"
)]
fn health(world: RefCell<DispatchWorld>) {
    drop(world);
}
