use anyhow::Result;
use recipes_bot::liveness::{serve, ALIVE_PAYLOAD};
use tokio::net::TcpListener;

#[tokio::test]
async fn test_root_returns_alive_payload() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(serve(listener));

    let response = reqwest::get(format!("http://{addr}/")).await?;
    assert!(response.status().is_success());
    assert_eq!(response.text().await?, ALIVE_PAYLOAD);

    Ok(())
}

#[tokio::test]
async fn test_unknown_path_is_not_found() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(serve(listener));

    let response = reqwest::get(format!("http://{addr}/recipes")).await?;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    Ok(())
}
