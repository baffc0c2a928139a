use anyhow::Result;
use httpmock::prelude::*;
use odds_fetch::{app, CliConfig, FetchError, TomlConfig};
use std::io::{Read, Write};
use std::net::TcpListener;
use tempfile::TempDir;

const ODDS_PATH: &str = "/v4/sports/soccer_epl/odds/";

fn config_for(endpoint: String) -> CliConfig {
    CliConfig {
        endpoint,
        api_key: Some("test-key".to_string()),
        regions: "us".to_string(),
        markets: "h2h".to_string(),
        timeout_secs: Some(5),
        config: None,
        verbose: false,
        log_json: false,
    }
}

/// 回應內容以 2 個空格縮排輸出，並附上結尾換行
#[tokio::test]
async fn test_prints_indented_response() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path(ODDS_PATH)
            .query_param("apiKey", "test-key")
            .query_param("regions", "us")
            .query_param("markets", "h2h");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(r#"{"a": 1, "b": [2,3]}"#);
    });

    let mut out = Vec::new();
    app::run(&config_for(server.url(ODDS_PATH)), &mut out).await?;

    api_mock.assert();
    assert_eq!(
        String::from_utf8(out)?,
        "{\n  \"a\": 1,\n  \"b\": [\n    2,\n    3\n  ]\n}\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_preserves_key_order_as_received() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(ODDS_PATH);
        then.status(200)
            .body(r#"[{"id": "e1", "sport_key": "soccer_epl", "commence_time": "2026-10-18T14:00:00Z", "bookmakers": []}]"#);
    });

    let mut out = Vec::new();
    app::run(&config_for(server.url(ODDS_PATH)), &mut out).await?;

    let text = String::from_utf8(out)?;
    let positions: Vec<usize> = ["\"id\"", "\"sport_key\"", "\"commence_time\"", "\"bookmakers\""]
        .iter()
        .map(|key| text.find(key).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(text.contains("\"bookmakers\": []"));
    Ok(())
}

#[tokio::test]
async fn test_non_json_body_is_decode_failure() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(ODDS_PATH);
        then.status(200).body("not json");
    });

    let mut out = Vec::new();
    let result = app::run(&config_for(server.url(ODDS_PATH)), &mut out).await;

    api_mock.assert();
    let err = result.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
    assert_eq!(err.exit_code(), 4);
    assert!(out.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_connection_failure_is_transport_failure() -> Result<()> {
    // 取得一個目前沒有人監聽的埠
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };

    let mut out = Vec::new();
    let result = app::run(
        &config_for(format!("http://127.0.0.1:{}{}", port, ODDS_PATH)),
        &mut out,
    )
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert_eq!(err.exit_code(), 3);
    assert!(out.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_error_status_is_transport_failure() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(ODDS_PATH);
        then.status(401)
            .body(r#"{"message": "API key is not valid"}"#);
    });

    let mut out = Vec::new();
    let result = app::run(&config_for(server.url(ODDS_PATH)), &mut out).await;

    api_mock.assert();
    match result {
        Err(FetchError::HttpStatus { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("API key is not valid"));
        }
        other => panic!("expected HttpStatus error, got {:?}", other),
    }
    assert!(out.is_empty());
    Ok(())
}

/// 錯誤回應的 body 讀取中斷時，仍回報狀態碼，body 為空
#[tokio::test]
async fn test_truncated_error_body_still_reports_status() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let server = std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(
                b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 100\r\n\r\npartial",
            );
        }
    });

    let mut out = Vec::new();
    let result = app::run(&config_for(format!("http://{}{}", addr, ODDS_PATH)), &mut out).await;
    let _ = server.join();

    match result {
        Err(FetchError::HttpStatus { status, body }) => {
            assert_eq!(status, 503);
            assert!(body.is_empty());
        }
        other => panic!("expected HttpStatus error, got {:?}", other),
    }
    assert!(out.is_empty());
    Ok(())
}

/// 非 ASCII 字元轉為 \uXXXX，超長整數原樣保留
#[tokio::test]
async fn test_output_is_ascii_and_keeps_wide_integers() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(ODDS_PATH);
        then.status(200)
            .header("Content-Type", "application/json; charset=utf-8")
            .body(r#"{"home_team": "Atlético Madrid", "id": 123456789012345678901234567890, "price": 2.15}"#);
    });

    let mut out = Vec::new();
    app::run(&config_for(server.url(ODDS_PATH)), &mut out).await?;

    assert_eq!(
        String::from_utf8(out)?,
        "{\n  \"home_team\": \"Atl\\u00e9tico Madrid\",\n  \"id\": 123456789012345678901234567890,\n  \"price\": 2.15\n}\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_repeated_runs_are_byte_identical() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(ODDS_PATH);
        then.status(200)
            .header("x-requests-remaining", "498")
            .header("x-requests-used", "2")
            .body(r#"{"home_team": "Arsenal", "odds": [1.85, 4.2, 3.6], "live": false, "note": null}"#);
    });

    let config = config_for(server.url(ODDS_PATH));
    let mut first = Vec::new();
    let mut second = Vec::new();
    app::run(&config, &mut first).await?;
    app::run(&config, &mut second).await?;

    api_mock.assert_hits(2);
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn test_missing_api_key_makes_no_request() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(ODDS_PATH);
        then.status(200).body("{}");
    });

    let mut config = config_for(server.url(ODDS_PATH));
    config.api_key = None;

    let mut out = Vec::new();
    let err = app::run(&config, &mut out).await.unwrap_err();

    assert!(matches!(err, FetchError::MissingConfigError { .. }));
    assert_eq!(err.exit_code(), 2);
    api_mock.assert_hits(0);
    assert!(out.is_empty());
    Ok(())
}

/// 從 TOML 設定檔讀取來源參數
#[tokio::test]
async fn test_toml_config_drives_request() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v4/sports/basketball_nba/odds/")
            .query_param("apiKey", "from-env")
            .query_param("regions", "eu")
            .query_param("markets", "totals");
        then.status(200).body(r#"[]"#);
    });

    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("odds.toml");
    let config_content = format!(
        r#"
[source]
endpoint = "{}"
regions = "eu"
markets = "totals"
"#,
        server.url("/v4/sports/basketball_nba/odds/")
    );
    tokio::fs::write(&config_path, config_content).await?;

    let config = TomlConfig::from_file(&config_path)?.with_api_key_fallback(Some("from-env".to_string()));

    let mut out = Vec::new();
    app::run(&config, &mut out).await?;

    api_mock.assert();
    assert_eq!(String::from_utf8(out)?, "[]\n");
    Ok(())
}
