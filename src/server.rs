//! HTTP front end.
//!
//! A single endpoint answers every path: `GET /?fen=<position>` with an
//! optional `callback` for JSONP. Probing does blocking file I/O, so each
//! query is resolved on the blocking thread pool.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{
        HeaderValue, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::{
    config::Config,
    error::{QueryError, StartupError},
    probe::SyzygyProber,
    resolver::Resolver,
    response,
    variant::Rules,
};

struct AppState<P: Rules> {
    resolver: Resolver<P>,
    cors: bool,
}

#[derive(Debug, Deserialize)]
struct ApiQuery {
    fen: Option<String>,
    callback: Option<String>,
}

pub fn router<P: Rules>(resolver: Resolver<P>, cors: bool) -> Router {
    let state = Arc::new(AppState { resolver, cors });
    Router::new().fallback(get_api::<P>).with_state(state)
}

async fn get_api<P: Rules>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<ApiQuery>,
) -> Response {
    let cors = state.cors;
    let mut response = answer(state, query).await;
    if cors {
        response
            .headers_mut()
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
    response
}

async fn answer<P: Rules>(state: Arc<AppState<P>>, query: ApiQuery) -> Response {
    let Some(fen) = query.fen.filter(|fen| !fen.is_empty()) else {
        return bad_request(QueryError::MissingPosition);
    };

    let resolving = Arc::clone(&state);
    let result = match tokio::task::spawn_blocking(move || resolving.resolver.resolve(&fen)).await
    {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => return bad_request(err),
        Err(err) => {
            error!(%err, "resolver task failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let callback = query.callback.filter(|callback| !callback.is_empty());
    match response::render(&result, state.resolver.has_dtm(), callback.as_deref()) {
        Ok(body) => ([(CONTENT_TYPE, body.content_type)], body.text).into_response(),
        Err(err) => {
            error!(%err, "could not serialize response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn bad_request(err: QueryError) -> Response {
    match &err {
        QueryError::IllegalPosition(reason) => debug!(%reason, "rejected query: {err}"),
        _ => debug!("rejected query: {err}"),
    }
    (StatusCode::BAD_REQUEST, err.to_string()).into_response()
}

/// Load the tables named in `config` and serve until the process ends.
pub async fn serve<P: Rules>(config: &Config) -> Result<(), StartupError> {
    info!(variant = P::NAME, "syzygy initialization");
    let tables = SyzygyProber::<P>::open(&config.syzygy)?;
    // DTM backends are attached by library users through `Resolver::with_dtm`.
    let resolver = Resolver::new(tables);
    info!(
        paths = ?config.syzygy,
        cardinality = resolver.max_pieces(),
        "tablebases ready"
    );

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    info!("{} tbserve listening on http://{addr} ...", P::NAME);

    axum::serve(listener, router(resolver, config.cors)).await?;
    Ok(())
}
