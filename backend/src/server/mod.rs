//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::{info, warn};

use form_intake::Trace;
#[cfg(debug_assertions)]
use form_intake::doc::ApiDoc;
use form_intake::domain::{FormExportService, FormSubmissionService};
use form_intake::inbound::http;
use form_intake::inbound::http::cors::cors_policy;
use form_intake::inbound::http::health::HealthState;
use form_intake::inbound::http::state::HttpState;
use form_intake::outbound::persistence::{DbPool, DieselFormRecordRepository};
use form_intake::outbound::spreadsheet::XlsxSpreadsheetWriter;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

/// Wire the domain services over the Diesel repository, or fall back to
/// fixtures when no pool is configured.
fn build_http_state(db_pool: Option<&DbPool>) -> HttpState {
    match db_pool {
        Some(pool) => {
            let repository = Arc::new(DieselFormRecordRepository::new(pool.clone()));
            HttpState::new(
                Arc::new(FormSubmissionService::new(
                    repository.clone(),
                    Arc::new(DefaultClock),
                )),
                Arc::new(FormExportService::new(
                    repository,
                    Arc::new(XlsxSpreadsheetWriter::new()),
                )),
            )
        }
        None => {
            warn!("no database pool configured; serving fixture ports");
            HttpState::fixtures()
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(cors_policy())
        .wrap(Trace)
        .configure(http::configure);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(config.db_pool.as_ref()));
    let ServerConfig { bind_addr, .. } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "form intake server listening");
    health_state.mark_ready();
    actix_web::rt::spawn(fail_liveness_on(health_state, shutdown_signal()));
    Ok(server)
}

/// Flip `/health/live` to 503 once `signal` resolves.
///
/// Actix drains in-flight requests on the same signal; failing liveness first
/// lets the orchestrator stop routing traffic here during the drain.
async fn fail_liveness_on<F>(health_state: web::Data<HealthState>, signal: F)
where
    F: Future<Output = ()>,
{
    signal.await;
    health_state.mark_unhealthy();
    info!("shutdown signal received; liveness now failing");
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    () = ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(error) => {
                warn!(%error, "SIGTERM handler unavailable; watching Ctrl-C only");
                ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    ctrl_c().await;
}

async fn ctrl_c() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{StatusCode, header};
    use actix_web::test as actix_test;
    use form_intake::domain::TRACE_ID_HEADER;

    fn deps() -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(build_http_state(None)),
        }
    }

    #[actix_web::test]
    async fn app_serves_banner_with_trace_header() {
        let app = actix_test::init_service(build_app(deps())).await;
        let req = actix_test::TestRequest::get().uri("/").to_request();

        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[actix_web::test]
    async fn app_applies_cors_policy() {
        let app = actix_test::init_service(build_app(deps())).await;
        let req = actix_test::TestRequest::get()
            .uri("/health/ready")
            .insert_header((header::ORIGIN, "https://aljulio.github.io"))
            .to_request();

        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[actix_web::test]
    async fn liveness_fails_after_shutdown_signal() {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        let app = actix_test::init_service(build_app(AppDependencies {
            health_state: health_state.clone(),
            http_state: web::Data::new(build_http_state(None)),
        }))
        .await;

        fail_liveness_on(health_state.clone(), std::future::ready(())).await;

        let req = actix_test::TestRequest::get().uri("/health/live").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!health_state.is_alive());
    }

    #[actix_web::test]
    async fn liveness_holds_until_shutdown_signal() {
        let health_state = web::Data::new(HealthState::new());
        let (trigger, signal) = tokio::sync::oneshot::channel::<()>();
        let watcher = actix_web::rt::spawn(fail_liveness_on(health_state.clone(), async move {
            let _ = signal.await;
        }));

        tokio::task::yield_now().await;
        assert!(health_state.is_alive());

        trigger.send(()).expect("watcher still listening");
        watcher.await.expect("watcher completes");
        assert!(!health_state.is_alive());
    }

    #[actix_web::test]
    async fn fixture_ports_report_empty_export() {
        let app = actix_test::init_service(build_app(deps())).await;
        let req = actix_test::TestRequest::get().uri("/export").to_request();

        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
