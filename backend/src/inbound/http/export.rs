//! Spreadsheet export handlers.
//!
//! ```text
//! GET /export
//! GET /descargar-excel  (legacy alias)
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use tracing::info;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Download every stored record as a single-sheet workbook.
#[utoipa::path(
    get,
    path = "/export",
    responses(
        (
            status = 200,
            description = "Workbook attachment",
            content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            body = Vec<u8>,
            headers(("Content-Disposition" = String, description = "Attachment file name"))
        ),
        (status = 404, description = "No records to export", body = ErrorSchema),
        (status = 500, description = "Store or encoder failure", body = ErrorSchema)
    ),
    tags = ["forms"],
    operation_id = "exportForms"
)]
pub async fn export_forms(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let export = state.exports.export_all().await?;
    info!(rows = export.row_count, "form export sent");
    Ok(HttpResponse::Ok()
        .content_type(export.content_type)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", export.file_name),
        ))
        .body(export.bytes))
}

/// Register the export routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["/export", "/descargar-excel"]).route(web::get().to(export_forms)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        FixtureFormSubmissionCommand, MockFormExportQuery, SpreadsheetExport,
    };
    use crate::domain::{EXPORT_FILE_NAME, Error};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

    async fn get(exports: MockFormExportQuery, uri: &str) -> actix_web::dev::ServiceResponse {
        let state = HttpState::new(Arc::new(FixtureFormSubmissionCommand), Arc::new(exports));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;
        let req = actix_test::TestRequest::get().uri(uri).to_request();
        actix_test::call_service(&app, req).await
    }

    #[rstest]
    #[case("/export")]
    #[case("/descargar-excel")]
    #[actix_web::test]
    async fn export_streams_workbook_attachment(#[case] uri: &str) {
        let mut exports = MockFormExportQuery::new();
        exports.expect_export_all().times(1).return_once(|| {
            Ok(SpreadsheetExport {
                file_name: EXPORT_FILE_NAME,
                content_type: XLSX,
                bytes: b"PK\x03\x04".to_vec(),
                row_count: 1,
            })
        });

        let res = get(exports, uri).await;

        assert_eq!(res.status(), StatusCode::OK);
        let headers = res.headers();
        assert_eq!(
            headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some(XLSX)
        );
        assert_eq!(
            headers
                .get(header::CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok()),
            Some("attachment; filename=todos_los_registros_formulario.xlsx")
        );
        let body = actix_test::read_body(res).await;
        assert_eq!(body.as_ref(), b"PK\x03\x04");
    }

    #[rstest]
    #[actix_web::test]
    async fn empty_store_is_not_found() {
        let mut exports = MockFormExportQuery::new();
        exports
            .expect_export_all()
            .times(1)
            .return_once(|| Err(Error::not_found("no records to export")));

        let res = get(exports, "/export").await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "no records to export");
        assert_eq!(body["code"], "not_found");
    }

    #[rstest]
    #[actix_web::test]
    async fn post_is_not_routed_to_export() {
        let mut exports = MockFormExportQuery::new();
        exports.expect_export_all().times(0);
        let state = HttpState::new(Arc::new(FixtureFormSubmissionCommand), Arc::new(exports));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::post().uri("/export").to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
