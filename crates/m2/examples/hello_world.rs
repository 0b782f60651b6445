use bytes::{Bytes, BytesMut};
use http::StatusCode;
use micro_m2::codec::netstring;
use micro_m2::handler::make_handler;
use micro_m2::protocol::{Request, ResponseCollector};
use micro_m2::server::Server;
use micro_m2::transport::{ChannelTransport, Transport};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

fn hello_world(request: Request, response: &mut ResponseCollector) {
    info!(method = %request.method(), uri = %request.uri(), "receive request");

    if request.uri().path() != "/" {
        response.set_status(StatusCode::NOT_FOUND);
        response.write("Not Found\r\n");
        return;
    }

    response.headers_mut().insert("Content-Type", "text/plain; charset=utf-8");
    response.write("Hello World!\r\n");
}

fn request_frame(connection_id: u32, uri: &str) -> Bytes {
    let headers = format!(r#"{{"METHOD":"GET","VERSION":"HTTP/1.1","URI":"{uri}","Host":"localhost:6767","Accept":"*/*"}}"#);

    let mut frame = BytesMut::from(format!("54c6755b-9628-40a4-9a2d-cc82a816345e {connection_id} / ").as_bytes());
    netstring::encode_to(headers.as_bytes(), &mut frame);
    netstring::encode_to(b"", &mut frame);
    frame.freeze()
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let server = match Server::builder()
        .identity("82209006-86FF-4982-B5EA-D1E29E55D481")
        .pull_address("inproc://requests")
        .publish_address("inproc://replies")
        .build()
    {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "build server error");
            return;
        }
    };

    // stand in for mongrel2: push a few requests, then hang up
    let (mut mongrel2_push, pull) = ChannelTransport::pair(16);
    let (mut mongrel2_sub, publish) = ChannelTransport::pair(16);
    for (id, uri) in [(1, "/"), (2, "/missing")] {
        mongrel2_push.send(request_frame(id, uri)).await.expect("channel is open");
    }
    mongrel2_push.send(Bytes::from_static(b"this is not an envelope")).await.expect("channel is open");
    drop(mongrel2_push);

    if let Err(e) = server.start(pull, publish, make_handler(hello_world)).await {
        info!(cause = %e, "server stopped");
    }

    while let Ok(reply) = mongrel2_sub.receive().await {
        println!("{}\n", String::from_utf8_lossy(&reply));
    }
}
