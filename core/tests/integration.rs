//! Full CRUD lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every service
//! operation over real HTTP through `UreqTransport`. Validates that request
//! building, the transport, and response parsing agree with the server.

use std::time::Duration;

use awx_client::{
    ApiError, AwxClient, ClientConfig, ExecutionEnvironment, FieldValue, Fields, QueryParams,
};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn fields(pairs: &[(&str, FieldValue)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn crud_lifecycle() {
    let base_url = start_server();
    let config = ClientConfig::new(base_url).with_timeout(Duration::from_secs(5));
    let client = AwxClient::from_config(&config);
    let ees = client.execution_environments();

    // Step 1: list: should be empty.
    let (results, page) = ees.list(None).unwrap();
    assert!(results.is_empty(), "expected empty list");
    assert_eq!(page.pagination.count, 0);

    // Step 2: create without image: rejected locally.
    let err = ees
        .create(&fields(&[("name", "No image".into())]), None)
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation { ref missing } if missing == &["image"]));

    // Step 3: list: the failed create never reached the server.
    let (results, _) = ees.list(None).unwrap();
    assert!(results.is_empty());

    // Step 4: create.
    let created = ees
        .create(
            &fields(&[
                ("name", "Integration EE".into()),
                ("image", "quay.io/ansible/awx-ee:latest".into()),
                ("pull", "missing".into()),
                ("organization", FieldValue::Integer(1)),
            ]),
            None,
        )
        .unwrap();
    assert_eq!(created.name, "Integration EE");
    assert_eq!(created.pull, "missing");
    assert_eq!(created.organization, Some(1));
    assert!(created.created.is_some());
    let id = created.id;

    // Step 5: get the created environment.
    let fetched = ees.get_by_id(id, None).unwrap();
    assert_eq!(fetched, created);

    // Step 6: partial update.
    let updated = ees
        .update(id, &fields(&[("image", "quay.io/ansible/awx-ee:24.0.0".into())]), None)
        .unwrap();
    assert_eq!(updated.name, "Integration EE");
    assert_eq!(updated.image, "quay.io/ansible/awx-ee:24.0.0");

    // Step 7: null clears a nullable field.
    let updated = ees
        .update(id, &fields(&[("organization", FieldValue::Null)]), None)
        .unwrap();
    assert_eq!(updated.organization, None);

    // Step 8: a second environment, then page through one at a time.
    ees.create(
        &fields(&[("name", "Second EE".into()), ("image", "quay.io/second".into())]),
        None,
    )
    .unwrap();
    let mut params = QueryParams::from([("page_size".to_string(), "1".to_string())]);
    let (first, page) = ees.list(Some(&params)).unwrap();
    assert_eq!(page.pagination.count, 2);
    assert_eq!(first.len(), 1);
    assert!(page.pagination.next.is_some());
    params.insert("page".to_string(), "2".to_string());
    let (second, page) = ees.list(Some(&params)).unwrap();
    assert_eq!(second.len(), 1);
    assert_ne!(first[0].id, second[0].id);
    assert!(page.pagination.next.is_none());

    // Step 9: server-side filter passes through verbatim.
    let filter = QueryParams::from([("name".to_string(), "Second EE".to_string())]);
    let (filtered, _) = ees.list(Some(&filter)).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].image, "quay.io/second");

    // Step 10: delete: 204 decodes to a zero-value object.
    let deleted = ees.delete(id).unwrap();
    assert_eq!(deleted, ExecutionEnvironment::default());

    // Step 11: get after delete: NotFound.
    let err = ees.get_by_id(id, None).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 12: delete again: NotFound.
    let err = ees.delete(id).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 13: update after delete: NotFound.
    let err = ees
        .update(id, &fields(&[("name", "ghost".into())]), None)
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let config = ClientConfig::new(format!("http://{addr}")).with_timeout(Duration::from_secs(2));
    let client = AwxClient::from_config(&config);

    let err = client.execution_environments().get_by_id(1, None).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}
