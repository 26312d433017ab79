use greeter_core::blocking::{self, Connection};
use greeter_core::greeter_service::{GreeterServer, GreetingService};
use greeter_core::{ConnectError, ConnectOptions, ConnectionTracker, Error};
use rand::Rng;
use stub_greeter_impl::{FailingGreeter, spawn_greeting_server, unused_address};
use tonic::Code;


fn random_name(rng: &mut impl Rng) -> String {
    let len = rng.random_range(0..64);
    (0..len)
        .map(|_| match rng.random_range(0..4) {
            0 => rng.random_range(' '..='~'),
            1 => rng.random_range('\u{0}'..='\u{1f}'),
            2 => rng.random_range('\u{a0}'..='\u{d7ff}'),
            _ => rng.random_range('\u{1f300}'..='\u{1f6ff}'),
        })
        .collect()
}

#[test]
fn test_blocking_round_trip_for_random_names() {
    let mut rng = rand::rng();
    let mut conn = Connection::from_service(GreeterServer::new(GreetingService)).unwrap();

    for _ in 0..200 {
        let name = random_name(&mut rng);
        let message = conn.say_hello(&name).unwrap();
        assert_eq!(message, format!("Hello, {name}"));
    }
}

#[test]
fn test_scoped_connections_are_all_released() {
    let tracker = ConnectionTracker::new();
    let failing = FailingGreeter::default();

    for i in 0..1000 {
        let result = if i % 2 == 0 {
            Connection::from_service(GreeterServer::new(GreetingService))
                .unwrap()
                .tracked(&tracker)
                .scoped(|conn| conn.say_hello("you"))
        } else {
            Connection::from_service(GreeterServer::new(failing.clone()))
                .unwrap()
                .tracked(&tracker)
                .scoped(|conn| conn.say_hello("you"))
        };

        assert_eq!(result.is_ok(), i % 2 == 0);
        assert_eq!(tracker.active(), 0, "connection leaked on invocation {i}");
    }

    assert_eq!(tracker.acquired(), 1000);
    assert_eq!(tracker.released(), 1000);
    assert_eq!(failing.calls(), 500);
}

#[test]
fn test_scoped_connection_is_released_on_panic() {
    let tracker = ConnectionTracker::new();

    let conn = Connection::from_service(GreeterServer::new(GreetingService))
        .unwrap()
        .tracked(&tracker);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
        conn.scoped::<()>(|_| panic!("boom"))
    }));

    assert!(result.is_err());
    assert_eq!(tracker.active(), 0);
    assert_eq!(tracker.released(), 1);
}

#[test]
fn test_blocking_error_is_not_retried() {
    let service = FailingGreeter::default();
    let mut conn = Connection::from_service(GreeterServer::new(service.clone())).unwrap();

    let err = conn.say_hello("you").unwrap_err();

    assert_eq!(err.code, Code::Unavailable);
    assert_eq!(service.calls(), 1);
}

#[test]
fn test_blocking_connect_to_closed_port_fails() {
    let addr = unused_address();

    let result = Connection::connect(&addr.to_string());

    assert!(matches!(result, Err(ConnectError::Unreachable { .. })));
}

#[test]
fn test_say_hello_once_against_live_server() {
    let server_runtime = tokio::runtime::Runtime::new().unwrap();
    let addr = server_runtime.block_on(spawn_greeting_server());

    let message =
        blocking::say_hello_once(&addr.to_string(), "you", ConnectOptions::default()).unwrap();

    assert_eq!(message, "Hello, you");
}

#[test]
fn test_say_hello_once_reports_connection_error() {
    let addr = unused_address();

    let result = blocking::say_hello_once(&addr.to_string(), "you", ConnectOptions::default());

    assert!(matches!(result, Err(Error::Connect(_))));
}
