//! Accepts TCP connections, parses one HTTP/1.1 request from each and logs it.
//!
//! Nothing is written back to the client: once the request is parsed, or parsing failed, the
//! connection is dropped.

use micro_request::connection::read_request;
use micro_request::protocol::Request;
use tokio::net::TcpListener;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

const LISTEN_ADDRESS: &str = "0.0.0.0:42069";

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let tcp_listener = match TcpListener::bind(LISTEN_ADDRESS).await {
        Ok(tcp_listener) => tcp_listener,
        Err(e) => {
            error!(cause = %e, address = LISTEN_ADDRESS, "bind listener error");
            return;
        }
    };
    info!(address = LISTEN_ADDRESS, "start listening");

    loop {
        let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };

        tokio::spawn(async move {
            match read_request(tcp_stream).await {
                Ok(request) => log_request(&request),
                Err(e) if e.is_stream_error() => {
                    warn!(%remote_addr, cause = %e, "connection closed before a full request arrived");
                }
                Err(e) => {
                    error!(%remote_addr, cause = %e, "can't parse request, connection shutdown");
                }
            }
        });
    }
}

fn log_request(request: &Request) {
    info!(method = request.method(), request_target = request.target(), version = request.http_version(), "request line");

    let mut headers = request.headers().iter().collect::<Vec<_>>();
    headers.sort_unstable();
    for (field, value) in headers {
        info!(field, value, "header");
    }

    info!(body_len = request.body().len(), body = %String::from_utf8_lossy(request.body()), "body");
}
