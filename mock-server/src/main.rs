use mock_server::MockFile;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;

    let files = mock_server::files([(
        "/hello.txt",
        MockFile::new("Hello World").last_modified("Sat, 01 Jan 2000 00:00:00 GMT"),
    )]);
    tracing::info!(%addr, "listening");
    mock_server::run(listener, files).await
}
