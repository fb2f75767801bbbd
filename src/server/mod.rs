// Server module - Pingora HTTP application and service setup

use async_trait::async_trait;
use http::{Method, Response};
use pingora_core::apps::http_app::{HttpServer, ServeHttp};
use pingora_core::protocols::http::ServerSession;
use pingora_core::server::configuration::Opt as ServerOpt;
use pingora_core::server::Server;
use pingora_core::services::listening::Service;
use std::sync::Arc;

use crate::config::Config;
use crate::gallery::Gallery;
use crate::presentation::{EndpointResponse, RENDER_ERROR_BODY};
use crate::resource::{FsResourceReader, ResourceReader};
use crate::watermark::WatermarkError;

/// Path of the gallery page
pub const GALLERY_PATH: &str = "/";

/// Methods accepted on the gallery page
pub const ALLOWED_METHODS: &str = "GET";

/// Where a request goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Gallery,
    MethodNotAllowed,
    NotFound,
}

/// Match a request line against the single route.
pub fn route(method: &Method, path: &str) -> Route {
    if path != GALLERY_PATH {
        return Route::NotFound;
    }
    if method == Method::GET {
        Route::Gallery
    } else {
        Route::MethodNotAllowed
    }
}

/// Pingora application serving the gallery page
#[derive(Debug, Clone)]
pub struct GalleryApp {
    gallery: Gallery,
}

impl GalleryApp {
    pub fn new(gallery: Gallery) -> Self {
        Self { gallery }
    }

    /// Build the app from configuration, reading assets from the configured root.
    pub fn from_config(config: &Config) -> Result<Self, WatermarkError> {
        let reader: Arc<dyn ResourceReader> = Arc::new(FsResourceReader::new(&config.assets.root));
        let gallery = Gallery::new(config.gallery.clone(), reader)?;
        Ok(Self::new(gallery))
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Produce the response for a request line.
    ///
    /// Rendering is CPU-bound and runs on the blocking pool; a render that
    /// panics becomes a 500 for this request only.
    pub async fn handle(&self, method: &Method, path: &str) -> EndpointResponse {
        match route(method, path) {
            Route::Gallery => {
                let gallery = self.gallery.clone();
                match tokio::task::spawn_blocking(move || gallery.render_page()).await {
                    Ok(response) => response,
                    Err(e) => {
                        tracing::error!(error = %e, "Gallery render task failed");
                        EndpointResponse::internal_error(RENDER_ERROR_BODY)
                    }
                }
            }
            Route::MethodNotAllowed => EndpointResponse::method_not_allowed(ALLOWED_METHODS),
            Route::NotFound => EndpointResponse::not_found(),
        }
    }
}

#[async_trait]
impl ServeHttp for GalleryApp {
    async fn response(&self, http_session: &mut ServerSession) -> Response<Vec<u8>> {
        let header = http_session.req_header();
        let method = header.method.clone();
        let path = header.uri.path().to_string();

        let response = self.handle(&method, &path).await;

        tracing::info!(
            method = %method,
            path = %path,
            status = response.status,
            "Request completed"
        );

        response.into_http_response()
    }
}

/// Create the listening service for the gallery app.
pub fn build_service(config: &Config, app: GalleryApp) -> Service<HttpServer<GalleryApp>> {
    let mut service = Service::new(
        "watermark-preview".to_string(),
        HttpServer::new_app(app),
    );
    service.add_tcp(&config.server.listen_address());
    service.threads = Some(config.server.threads);
    service
}

/// Create and bootstrap the Pingora server with the gallery service registered.
pub fn build_server(config: &Config) -> Result<Server, String> {
    let app = GalleryApp::from_config(config)
        .map_err(|e| format!("Invalid gallery configuration: {}", e))?;

    let opt = ServerOpt::default();

    let mut server =
        Server::new(Some(opt)).map_err(|e| format!("Failed to create Pingora server: {}", e))?;
    server.bootstrap();
    server.add_service(build_service(config, app));

    Ok(server)
}
