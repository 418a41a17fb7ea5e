use super::*;
use crate::config::ExecutorConfig;
use crate::execution::http::client::ClientFactory;
use crate::types::{BodySource, FilePart};
use mockito::Matcher;

fn transport_for(descriptor: &RequestDescriptor) -> TransportClient {
    ClientFactory::new(&ExecutorConfig::default())
        .unwrap()
        .client_for(descriptor)
        .unwrap()
}

#[tokio::test]
async fn get_never_carries_a_body() {
    let descriptor = RequestDescriptor::builder(Method::Get, "http://localhost/items")
        .form_param("q", "ignored")
        .build()
        .unwrap();
    let wire = build_wire_request(&descriptor).await.unwrap();
    assert_eq!(wire.method, Method::Get);
    assert!(wire.body.is_empty());

    let descriptor = RequestDescriptor::builder(Method::Get, "http://localhost/blob")
        .binary(b"payload".to_vec())
        .build()
        .unwrap();
    let wire = build_wire_request(&descriptor).await.unwrap();
    assert!(wire.body.is_empty());
}

#[tokio::test]
async fn blank_raw_payload_falls_back_to_form() {
    let descriptor = RequestDescriptor::builder(Method::Post, "http://localhost/form")
        .raw_payload("   ", Some("application/json"), None)
        .form_param("a", "1")
        .form_param("b", "two words")
        .build()
        .unwrap();
    let wire = build_wire_request(&descriptor).await.unwrap();
    assert_eq!(wire.body.as_bytes(), Some(&b"a=1&b=two%20words"[..]));
    assert_eq!(
        wire.body.content_type().unwrap(),
        "application/x-www-form-urlencoded"
    );
}

#[tokio::test]
async fn raw_payload_wins_over_form_and_replaces_content_type_header() {
    let descriptor = RequestDescriptor::builder(Method::Put, "http://localhost/doc")
        .header("Content-Type", "application/xml")
        .raw_payload("{\"k\":1}", Some("application/json"), None)
        .form_param("a", "1")
        .build()
        .unwrap();
    let wire = build_wire_request(&descriptor).await.unwrap();
    assert_eq!(wire.method, Method::Put);
    assert_eq!(wire.body.as_bytes(), Some(&b"{\"k\":1}"[..]));
    assert_eq!(
        wire.body.content_type().unwrap(),
        "application/json; charset=utf-8"
    );
    assert!(wire.headers.get(CONTENT_TYPE).is_none());
}

#[tokio::test]
async fn body_level_headers_are_kept_apart() {
    let descriptor = RequestDescriptor::builder(Method::Put, "http://localhost/chunk")
        .header("Content-MD5", "Q2hlY2sgSW50ZWdyaXR5IQ==")
        .header("Content-Range", "bytes 0-6/7")
        .header("X-Trace", "abc")
        .binary(b"payload".to_vec())
        .build()
        .unwrap();
    let wire = build_wire_request(&descriptor).await.unwrap();
    assert_eq!(wire.headers.get("x-trace").unwrap(), "abc");
    assert!(wire.headers.get("content-md5").is_none());
    assert_eq!(
        wire.body_headers.get("content-md5").unwrap(),
        "Q2hlY2sgSW50ZWdyaXR5IQ=="
    );
    assert_eq!(wire.body_headers.get("content-range").unwrap(), "bytes 0-6/7");
    assert_eq!(wire.body.as_bytes(), Some(&b"payload"[..]));
    assert!(wire.body.content_type().is_none());
}

#[tokio::test]
async fn multipart_forces_post_and_keeps_first_file_only() {
    let descriptor = RequestDescriptor::builder(Method::Put, "http://localhost/upload")
        .header("Content-Type", "text/plain")
        .multipart_text("foo", "bar")
        .multipart_file(FilePart::new("doc", "a.txt", b"first".to_vec()))
        .multipart_text("baz", "qux")
        .multipart_file(FilePart::new("doc2", "b.txt", b"second".to_vec()))
        .build()
        .unwrap();
    let wire = build_wire_request(&descriptor).await.unwrap();
    assert_eq!(wire.method, Method::Post);
    assert!(wire.headers.get(CONTENT_TYPE).is_none());

    let WireBody::Multipart(body) = wire.body else {
        panic!("expected multipart body");
    };
    assert_eq!(body.text_names(), vec!["foo", "baz"]);
    assert_eq!(body.file(), Some(("doc", "a.txt")));
    assert_eq!(body.dropped_files, 1);
}

#[tokio::test]
async fn missing_file_surfaces_io_error() {
    let descriptor = RequestDescriptor::builder(Method::Post, "http://localhost/upload")
        .binary(BodySource::from_file("/definitely/not/here.bin"))
        .build()
        .unwrap();
    let err = build_wire_request(&descriptor).await.unwrap_err();
    assert!(matches!(err, WireError::IoError(_)), "{err:?}");
}

#[tokio::test]
async fn form_body_reaches_the_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/form")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body("a=1&b=two%20words")
        .with_status(200)
        .create_async()
        .await;

    let descriptor = RequestDescriptor::builder(Method::Post, format!("{}/form", server.url()))
        .form_param("a", "1")
        .form_param("b", "two words")
        .build()
        .unwrap();
    let transport = transport_for(&descriptor);
    let wire = build_wire_request(&descriptor).await.unwrap();
    let response = wire
        .into_request_builder(&transport, ReadMode::FullBody)
        .unwrap()
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    mock.assert_async().await;
}

#[tokio::test]
async fn multipart_names_are_quoted_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .match_header("content-type", Matcher::Regex("^multipart/form-data; boundary=".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="foo""#.into()),
            Matcher::Regex(r#"name="doc"; filename="a.txt""#.into()),
            Matcher::Regex("first".into()),
        ]))
        .with_status(201)
        .create_async()
        .await;

    let descriptor = RequestDescriptor::builder(Method::Post, format!("{}/upload", server.url()))
        .multipart_text("foo", "bar")
        .multipart_file(FilePart::new("doc", "a.txt", b"first".to_vec()))
        .build()
        .unwrap();
    let transport = transport_for(&descriptor);
    let wire = build_wire_request(&descriptor).await.unwrap();
    let response = wire
        .into_request_builder(&transport, ReadMode::FullBody)
        .unwrap()
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 201);
    mock.assert_async().await;
}

#[tokio::test]
async fn descriptor_timeout_covers_body_only_when_buffering() {
    let descriptor = RequestDescriptor::builder(Method::Get, "http://localhost/download")
        .timeout(std::time::Duration::from_millis(400))
        .build()
        .unwrap();
    let transport = transport_for(&descriptor);
    assert_eq!(
        transport.request_timeout,
        Some(std::time::Duration::from_millis(400))
    );

    let buffered = build_wire_request(&descriptor)
        .await
        .unwrap()
        .into_request_builder(&transport, ReadMode::FullBody)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        buffered.timeout(),
        Some(&std::time::Duration::from_millis(400))
    );

    let streamed = build_wire_request(&descriptor)
        .await
        .unwrap()
        .into_request_builder(&transport, ReadMode::HeadersOnly)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(streamed.timeout(), None);
}
