use crate::context::EngineContext;
use crate::error::EngineError;
use crate::opt::PontoonOpt;
use crate::EngineResult;
use hyper::service::{make_service_fn, service_fn};
use hyper::{header::CONTENT_TYPE, Body, Method, Request, Response, Server, StatusCode};
use request_handlers::RequestHandler;
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Starts up the query proxy http server.
pub async fn listen(cx: Arc<EngineContext>, opts: &PontoonOpt) -> EngineResult<()> {
    let service = make_service_fn(move |_| {
        let cx = cx.clone();
        async move { Ok::<_, hyper::Error>(service_fn(move |req| routes(cx.clone(), req))) }
    });

    let ip = opts.host.parse().map_err(|_| {
        EngineError::Configuration(format!("`{}` is not a valid IP address", opts.host))
    })?;
    let addr = SocketAddr::new(ip, opts.port);

    let server = Server::bind(&addr).tcp_nodelay(true).serve(service);

    info!(
        ip = %server.local_addr().ip(),
        port = %server.local_addr().port(),
        "Started query proxy http server on http://{}",
        server.local_addr()
    );

    server.await?;

    Ok(())
}

pub(crate) async fn routes(
    cx: Arc<EngineContext>,
    req: Request<Body>,
) -> Result<Response<Body>, hyper::Error> {
    let start = Instant::now();

    let mut res = match (req.method(), req.uri().path()) {
        (&Method::POST, "/") => request_handler(cx, req).await?,
        (&Method::GET, "/status") => build_json_response(StatusCode::OK, &json!({"status": "ok"})),

        _ => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::empty())
            .unwrap(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    res.headers_mut().insert("x-elapsed", elapsed.into());

    Ok(res)
}

/// The main query handler. Decodes the body once, routes the intent, and
/// renders whatever comes back.
async fn request_handler(
    cx: Arc<EngineContext>,
    req: Request<Body>,
) -> Result<Response<Body>, hyper::Error> {
    let buffer = hyper::body::to_bytes(req.into_body()).await?;

    let handler = RequestHandler::new(&cx.schema, cx.executor());
    let handled = handler.handle(buffer.as_ref()).await;

    let status =
        StatusCode::from_u16(handled.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut res = build_json_response(status, &handled.body);

    if handled.omitted_rows > 0 {
        res.headers_mut()
            .insert("x-omitted-rows", (handled.omitted_rows as u64).into());
    }

    Ok(res)
}

fn build_json_response<T>(status: StatusCode, value: &T) -> Response<Body>
where
    T: Serialize,
{
    let body = serde_json::to_vec(value).unwrap_or_else(|_| b"{}".to_vec());

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}
