use httpmock::prelude::*;
use owncloud_adapter::{DavClient, OcsConfig, OwnCloudAdapter};
use std::time::Duration;

const DAV_ROOT: &str = "/remote.php/webdav/";

fn adapter(server: &MockServer, prefix: Option<&str>) -> OwnCloudAdapter<DavClient> {
    let dav = DavClient::new(
        &server.url(DAV_ROOT),
        "alice",
        "secret",
        Duration::from_secs(5),
    )
    .unwrap();
    let ocs = OcsConfig {
        share_api: server.url("/ocs/v1.php/apps/files_sharing/api/v1/shares"),
        user_name: "alice".to_string(),
        password: "secret".to_string(),
    };
    OwnCloudAdapter::new(dav, prefix.map(str::to_string), true, Some(ocs)).unwrap()
}

#[tokio::test]
async fn rename_moves_with_absolute_destination() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.path("/remote.php/webdav/team/docs/q1-report.pdf")
                .header(
                    "Destination",
                    server.url("/remote.php/webdav/team/archive/q1-report.pdf"),
                )
                .header("Authorization", "Basic YWxpY2U6c2VjcmV0");
            then.status(201);
        })
        .await;

    let moved = adapter(&server, Some("team"))
        .rename("docs/q1-report.pdf", "archive/q1-report.pdf")
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(moved);
}

#[tokio::test]
async fn rename_with_no_content_reply_is_true() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/remote.php/webdav/a.txt");
            then.status(204);
        })
        .await;

    assert!(adapter(&server, None).rename("a.txt", "b.txt").await.unwrap());
}

#[tokio::test]
async fn rename_of_missing_source_is_false() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.path("/remote.php/webdav/missing.txt");
            then.status(404).body("Not Found");
        })
        .await;

    let moved = adapter(&server, None)
        .rename("missing.txt", "other.txt")
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(!moved);
}

#[tokio::test]
async fn rename_conflict_is_false() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/remote.php/webdav/a.txt");
            then.status(409).body("Conflict");
        })
        .await;

    assert!(!adapter(&server, None).rename("a.txt", "x/b.txt").await.unwrap());
}

#[tokio::test]
async fn list_contents_parses_multistatus() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/remote.php/webdav/docs").header("Depth", "1");
            then.status(207).body(
                r#"<?xml version="1.0"?>
<d:multistatus xmlns:d="DAV:">
  <d:response>
    <d:href>/remote.php/webdav/docs/</d:href>
    <d:propstat>
      <d:prop><d:resourcetype><d:collection/></d:resourcetype></d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
  <d:response>
    <d:href>/remote.php/webdav/docs/report.pdf</d:href>
    <d:propstat>
      <d:prop><d:resourcetype/><d:getcontentlength>12</d:getcontentlength></d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"#,
            );
        })
        .await;

    let entries = adapter(&server, None).list_contents("docs").await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, "docs/report.pdf");
    assert_eq!(entries[0].content_length, Some(12));
    assert!(!entries[0].is_collection);
}

#[tokio::test]
async fn read_and_write_go_through_prefix() {
    let server = MockServer::start_async().await;
    let put = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/remote.php/webdav/team/notes.txt")
                .body("hello");
            then.status(201);
        })
        .await;
    let get = server
        .mock_async(|when, then| {
            when.method(GET).path("/remote.php/webdav/team/notes.txt");
            then.status(200).body("hello");
        })
        .await;

    let adapter = adapter(&server, Some("team"));
    adapter.write("notes.txt", b"hello".to_vec()).await.unwrap();
    let data = adapter.read("notes.txt").await.unwrap();

    put.assert_async().await;
    get.assert_async().await;
    assert_eq!(data, b"hello");
}
