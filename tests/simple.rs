use futures_util::{stream, StreamExt};
use sse_tail::{Dispatcher, Event, EventBody, Outcome};

#[tokio::test]
async fn parse_hyper_body_as_event() {
    let mut events = hyper::Body::from("event:stdout\ndata:hi there\n\n").into_events();

    let ev = events.next().await.expect("Event").expect("Parses");
    assert_eq!(ev, Event::new("stdout", "hi there"));

    assert!(events.next().await.is_none());
}

#[tokio::test]
async fn sequence_stops_at_graceful_exit() {
    let body = hyper::Body::wrap_stream(stream::iter(vec![
        Ok::<_, std::io::Error>("event:stdout\ndata:hello"),
        Ok("event:stderr\ndata:careful"),
        Ok("event:error\ndata:"),
        Ok("event:stdout\ndata:too late"),
    ]));

    let mut dispatcher = Dispatcher::new(Vec::new(), Vec::new());
    let outcome = dispatcher.run(body.into_events()).await.expect("run");
    assert_eq!(outcome, Outcome::Exit(0));

    let (out, err) = dispatcher.into_inner();
    assert_eq!(out, b"hello\n");
    assert_eq!(err, b"careful\n");
}

#[tokio::test]
async fn remote_failure_exits_with_one() {
    // The response body a server sends when the remote command failed.
    let body = hyper::Body::wrap_stream(stream::iter(vec![
        Ok::<_, std::io::Error>("event:stdout\ndata:hi there\n\n"),
        Ok("event:stderr\ndata:error\n\n"),
        Ok("event:error\ndata:exit status 1\n\n"),
    ]));

    let mut dispatcher = Dispatcher::new(Vec::new(), Vec::new());
    let outcome = dispatcher.run(body.into_events()).await.expect("run");
    assert_eq!(outcome, Outcome::Exit(1));
    assert_eq!(outcome.exit_code(), 1);

    let (out, err) = dispatcher.into_inner();
    assert_eq!(out, b"hi there\n");
    assert_eq!(err, b"error\nexit status 1\n");
}

#[tokio::test]
async fn malformed_chunks_never_stop_the_stream() {
    let body = hyper::Body::wrap_stream(stream::iter(vec![
        Ok::<_, std::io::Error>("data:no event field"),
        Ok("data:x\nevent:wrong order"),
        Ok("event:stdout\ndata:still here"),
    ]));

    let mut dispatcher = Dispatcher::new(Vec::new(), Vec::new());
    let outcome = dispatcher.run(body.into_events()).await.expect("run");
    assert_eq!(outcome, Outcome::Ended);

    let (out, err) = dispatcher.into_inner();
    assert_eq!(String::from_utf8(out).expect("utf8"), "\n\nstill here\n");

    let err = String::from_utf8(err).expect("utf8");
    assert_eq!(
        err,
        "failed to parse event\n\"data:no event field\"\n\
         failed to parse event\n\"data:x\\nevent:wrong order\"\n"
    );
}
