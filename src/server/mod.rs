//! Preview server for a blog site directory
//!
//! Files are served as-is. When watching, the index and article pages get a
//! small client that listens on `/__events` and reloads only for changes that
//! concern it: the index page for index changes, an article page for its own
//! post, both for any other static file. A change that leaves the post index
//! unreadable is reported instead of reloading into an empty list.

mod watch;

pub use watch::{classify, resolve, PreviewEvent, SiteChange};

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::validate_index;
use crate::controller::fetch_index;
use crate::fetch::{Fetcher, SiteFetcher};
use crate::Blog;

/// Client for `/__events`
const EVENT_CLIENT: &str = r#"<script>
(function() {
    var slug = new URLSearchParams(location.search).get('slug');
    var events = new WebSocket('ws://' + location.host + '/__events');
    events.onmessage = function(msg) {
        var event = JSON.parse(msg.data);
        if (event.kind === 'broken') {
            console.warn('Post index no longer loads: ' + event.message);
            return;
        }
        if (event.kind === 'asset'
            || (event.kind === 'index' && !slug)
            || (event.kind === 'post' && event.slug === slug)) {
            location.reload();
        }
    };
})();
</script>
"#;

struct PreviewState {
    config: SiteConfig,
    fetcher: SiteFetcher,
    events: broadcast::Sender<PreviewEvent>,
    watching: bool,
}

/// Serve the site directory until interrupted
pub async fn start(blog: &Blog, ip: &str, port: u16, watch: bool) -> Result<()> {
    let fetcher = SiteFetcher::new(&blog.site_dir);
    match fetch_index(&fetcher, &blog.config).await {
        Ok(posts) => {
            for issue in validate_index(&posts) {
                tracing::warn!("{}", issue);
            }
            tracing::info!("{} posts in {}", posts.len(), blog.config.index_path());
        }
        Err(e) => tracing::warn!("Post index does not load yet: {}", e),
    }

    let (events, _) = broadcast::channel(16);
    if watch {
        watch::spawn(blog.site_dir.clone(), blog.config.clone(), events.clone())?;
    }

    let state = Arc::new(PreviewState {
        config: blog.config.clone(),
        fetcher,
        events,
        watching: watch,
    });

    let app = Router::new()
        .route("/__events", get(events_handler))
        .fallback(serve_file)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let host = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    println!(
        "Previewing {} at http://{}:{}/{}",
        blog.site_dir.display(),
        ip,
        port,
        blog.config.index_page
    );
    if watch {
        println!("Watching for changes. Press Ctrl+C to stop.");
    }

    axum::serve(listener, app).await?;
    Ok(())
}

async fn events_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<PreviewState>>,
) -> impl IntoResponse {
    let events = state.events.subscribe();
    ws.on_upgrade(move |socket| push_events(socket, events))
}

/// Forward preview events to one page until it goes away
async fn push_events(mut socket: WebSocket, mut events: broadcast::Receiver<PreviewEvent>) {
    loop {
        tokio::select! {
            event = events.recv() => {
                let event = match event {
                    Ok(event) => event,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!("Preview client lagged by {} events", skipped);
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                let Ok(text) = serde_json::to_string(&event) else {
                    continue;
                };
                if socket.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                if matches!(incoming, None | Some(Err(_)) | Some(Ok(Message::Close(_)))) {
                    break;
                }
            }
        }
    }
}

/// Serve a file, giving the blog pages the event client when watching
async fn serve_file(State(state): State<Arc<PreviewState>>, request: Request<Body>) -> Response {
    let page = preview_page(request.uri().path(), &state.config).map(str::to_string);

    if let (Some(page), true) = (page, state.watching) {
        return match state.fetcher.get(&page).await {
            Ok(response) if response.is_success() => {
                Html(with_event_client(&response.body)).into_response()
            }
            Ok(response) => {
                let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::NOT_FOUND);
                (status, response.body).into_response()
            }
            Err(e) => {
                tracing::error!("Failed to read {}: {}", page, e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        };
    }

    let mut files = ServeDir::new(state.fetcher.root()).append_index_html_on_directories(true);
    match files.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// The blog page a request path refers to, if any; `/` is the index page
fn preview_page<'a>(path: &str, config: &'a SiteConfig) -> Option<&'a str> {
    let path = path.trim_start_matches('/');
    if path.is_empty() || path == config.index_page {
        Some(&config.index_page)
    } else if path == config.article_page {
        Some(&config.article_page)
    } else {
        None
    }
}

/// Insert the event client before the closing body tag
fn with_event_client(html: &str) -> String {
    match html.rfind("</body>") {
        Some(at) => format!("{}{}{}", &html[..at], EVENT_CLIENT, &html[at..]),
        None => format!("{}{}", html, EVENT_CLIENT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_page() {
        let config = SiteConfig::default();
        assert_eq!(preview_page("/", &config), Some("index.html"));
        assert_eq!(preview_page("/index.html", &config), Some("index.html"));
        assert_eq!(preview_page("/post.html", &config), Some("post.html"));
        assert_eq!(preview_page("/posts/index.json", &config), None);
        assert_eq!(preview_page("/assets/app.css", &config), None);
    }

    #[test]
    fn test_with_event_client() {
        let html = with_event_client("<html><body><p>hi</p></body></html>");
        assert!(html.contains("/__events"));
        assert!(html.ends_with("</script>\n</body></html>"));
        assert!(html.starts_with("<html><body><p>hi</p><script>"));

        let fragment = with_event_client("<p>no body</p>");
        assert!(fragment.starts_with("<p>no body</p><script>"));
    }
}
