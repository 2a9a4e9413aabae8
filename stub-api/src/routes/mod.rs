//! The backend's REST surface, table by table.
//!
//! Handlers are generic over the table they serve; [`api_services`] wires
//! each endpoint path to one of them.

use actix_multipart::Multipart;
use actix_web::error::PayloadError;
use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{
    HttpRequest, HttpResponse, Responder, ResponseError, Scope, body::BoxBody,
    web,
};
use futures::TryStreamExt;
use serde_json::{Value, json};

use crate::store::{Database, Part, RecordedRequest, Row, StoreError, as_id};

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

/// All routes, mounted under `/api`.
pub fn api_services() -> Scope {
    web::scope("/api")
        .route("/health_check", web::get().to(health_check))
        .service(list_staff("staff/all_admin"))
        .service(create("staff/addNew", "staff"))
        .service(update("staff/updateNew/{id}", "staff"))
        .service(delete("staff/deleteNew", "staff", "staff_id"))
        .service(list("user/allNew", "user", false))
        .service(create("user/add", "user"))
        .service(update("user/update/{id}", "user"))
        .service(delete("user/delete", "user", "id"))
        .service(list_services("services/allNew"))
        .service(create("services/add", "services"))
        .service(update("services/update/{id}", "services"))
        .service(delete("services/delete", "services", "service_id"))
        .service(list("subservices/allNew", "subservices", true))
        .service(create("subservices/add_new", "subservices"))
        .service(update("subservices/updateNew/{id}", "subservices"))
        .service(delete("subservices/delete", "subservices", "sub_service_id"))
        .service(list("booking/all", "booking", false))
        .service(update("booking/updatestatus/{id}", "booking"))
        .service(update("booking/updateamountNew/{id}", "booking"))
        .service(update("booking/assignWorker/{id}", "booking"))
        .service(list("earning/all", "earning", false))
        .service(update("earning/update/{id}", "earning"))
        .service(list("discount/allnew", "discount", false))
        .service(create("discount/addNew", "discount"))
        .service(update("discount/updateNew/{id}", "discount"))
        .service(delete("discount/delete", "discount", "id"))
        .service(list("complaint/all", "complaint", false))
        .service(update("complaint/update/{id}", "complaint"))
        .service(list("notification/all", "notification", false))
        .service(create("notification/add", "notification"))
        .service(push("send/send-data-to-all"))
        .service(list("testimonial/all", "testimonial", false))
        .service(create("testimonial/add", "testimonial"))
        .service(update("testimonial/update/{id}", "testimonial"))
        .service(delete("testimonial/delete", "testimonial", "id"))
        .service(list("member/all", "member", false))
        .service(create("member/add", "member"))
        .service(update("member/update/{id}", "member"))
        .service(delete("member/delete", "member", "id"))
        .service(list("blog/all", "blog", false))
        .service(create("blog/add", "blog"))
        .service(update("blog/update/{id}", "blog"))
        .service(delete("blog/delete", "blog", "id"))
        .service(list("contact/all", "contact", false))
        .service(update("contact/update/{id}", "contact"))
        .service(delete("contact/delete", "contact", "id"))
        .service(list("privacy/all", "privacy", false))
        .service(create("privacy/add", "privacy"))
        .service(update("privacy/update/{id}", "privacy"))
        .service(delete("privacy/delete", "privacy", "id"))
        .service(list("account_delete/all", "account_delete", false))
        .service(update("account_delete/update/{id}", "account_delete"))
        .service(delete("account_delete/delete", "account_delete", "id"))
}

/// Stub errors. Only the top-level message and its source are sent.
#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Bad request")]
    BadRequest(#[source] anyhow::Error),
    #[error("Not found")]
    NotFound(#[source] anyhow::Error),
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::BadRequest(e) => {
                HttpResponse::BadRequest().body(format!("{self}: {e}"))
            }
            Self::NotFound(e) => {
                HttpResponse::NotFound().body(format!("{self}: {e}"))
            }
            Self::UnexpectedError(_) => {
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::RowNotFound { .. } => APIError::NotFound(e.into()),
            StoreError::UnknownTable(_) => APIError::UnexpectedError(e.into()),
            _ => APIError::BadRequest(e.into()),
        }
    }
}

fn list(path: &str, table: &'static str, wrapped: bool) -> actix_web::Resource {
    web::resource(format!("/{path}")).route(web::get().to(
        move |req: HttpRequest, body: web::Bytes, db: web::Data<Database>| {
            list_rows(table, wrapped, req, body, db)
        },
    ))
}

fn list_staff(path: &str) -> actix_web::Resource {
    web::resource(format!("/{path}")).route(web::get().to(
        |req: HttpRequest, body: web::Bytes, db: web::Data<Database>| {
            staff_rows(req, body, db)
        },
    ))
}

fn list_services(path: &str) -> actix_web::Resource {
    web::resource(format!("/{path}")).route(web::get().to(
        |req: HttpRequest, body: web::Bytes, db: web::Data<Database>| {
            service_rows(req, body, db)
        },
    ))
}

fn create(path: &str, table: &'static str) -> actix_web::Resource {
    web::resource(format!("/{path}")).route(web::post().to(
        move |req: HttpRequest, body: web::Bytes, db: web::Data<Database>| {
            create_row(table, req, body, db)
        },
    ))
}

fn update(path: &str, table: &'static str) -> actix_web::Resource {
    web::resource(format!("/{path}")).route(web::put().to(
        move |id: web::Path<i64>,
              req: HttpRequest,
              body: web::Bytes,
              db: web::Data<Database>| {
            update_row(table, id.into_inner(), req, body, db)
        },
    ))
}

fn delete(
    path: &str,
    table: &'static str,
    key: &'static str,
) -> actix_web::Resource {
    web::resource(format!("/{path}")).route(web::post().to(
        move |req: HttpRequest, body: web::Bytes, db: web::Data<Database>| {
            delete_row(table, key, req, body, db)
        },
    ))
}

fn push(path: &str) -> actix_web::Resource {
    web::resource(format!("/{path}")).route(web::post().to(
        |req: HttpRequest, body: web::Bytes, db: web::Data<Database>| {
            push_all(req, body, db)
        },
    ))
}

#[tracing::instrument(skip(req, body, db))]
async fn list_rows(
    table: &'static str,
    wrapped: bool,
    req: HttpRequest,
    body: web::Bytes,
    db: web::Data<Database>,
) -> Result<HttpResponse, APIError> {
    if let Some(fault) = intercept(&req, &body, &db) {
        return Ok(fault);
    }
    let rows = db.list(table)?;
    Ok(rows_response(&db, rows, wrapped).await)
}

/// Staff rows joined with the account fields of their user row.
#[tracing::instrument(skip_all)]
async fn staff_rows(
    req: HttpRequest,
    body: web::Bytes,
    db: web::Data<Database>,
) -> Result<HttpResponse, APIError> {
    if let Some(fault) = intercept(&req, &body, &db) {
        return Ok(fault);
    }
    let mut rows = db.list("staff")?;
    for row in &mut rows {
        let Some(user_id) = row.get("staff_user_id").and_then(as_id) else {
            continue;
        };
        let Some(user) = db.row("user", user_id)? else {
            continue;
        };
        for field in ["name", "email", "phone", "image"] {
            if let Some(value) = user.get(field)
                && !row.contains_key(field)
            {
                row.insert(field.to_string(), value.clone());
            }
        }
    }
    Ok(rows_response(&db, rows, false).await)
}

/// Categories with the number of sub-services that point at them.
#[tracing::instrument(skip_all)]
async fn service_rows(
    req: HttpRequest,
    body: web::Bytes,
    db: web::Data<Database>,
) -> Result<HttpResponse, APIError> {
    if let Some(fault) = intercept(&req, &body, &db) {
        return Ok(fault);
    }
    let subservices = db.list("subservices")?;
    let mut rows = db.list("services")?;
    for row in &mut rows {
        let id = row.get("service_id").and_then(as_id);
        let count = subservices
            .iter()
            .filter(|sub| sub.get("service_id").and_then(as_id) == id)
            .count();
        row.insert("subservices_count".into(), Value::from(count));
    }
    Ok(rows_response(&db, rows, true).await)
}

#[tracing::instrument(skip(req, body, db))]
async fn create_row(
    table: &'static str,
    req: HttpRequest,
    body: web::Bytes,
    db: web::Data<Database>,
) -> Result<HttpResponse, APIError> {
    if let Some(fault) = intercept(&req, &body, &db) {
        return Ok(fault);
    }
    let row = parse_body(&req, &body).await?;
    let key = db.key(table)?;
    let id = db.insert(table, row)?;
    tracing::info!(id, "row created");
    let mut echo = json!({
        "id": id,
        "message": format!("{table} added successfully"),
    });
    echo[key] = Value::from(id);
    Ok(HttpResponse::Ok().json(echo))
}

#[tracing::instrument(skip(req, body, db))]
async fn update_row(
    table: &'static str,
    id: i64,
    req: HttpRequest,
    body: web::Bytes,
    db: web::Data<Database>,
) -> Result<HttpResponse, APIError> {
    if let Some(fault) = intercept(&req, &body, &db) {
        return Ok(fault);
    }
    let changes = parse_body(&req, &body).await?;
    db.update(table, id, changes)?;
    Ok(message(format!("{table} updated successfully")))
}

#[tracing::instrument(skip(req, body, db))]
async fn delete_row(
    table: &'static str,
    key: &'static str,
    req: HttpRequest,
    body: web::Bytes,
    db: web::Data<Database>,
) -> Result<HttpResponse, APIError> {
    if let Some(fault) = intercept(&req, &body, &db) {
        return Ok(fault);
    }
    let id = parse_body(&req, &body).await?
        .get(key)
        .and_then(as_id)
        .ok_or(StoreError::MissingId)?;
    db.delete(table, id)?;
    Ok(message(format!("{table} deleted successfully")))
}

/// Broadcast push. Nothing is stored; the request log is the only trace.
#[tracing::instrument(skip_all)]
async fn push_all(
    req: HttpRequest,
    body: web::Bytes,
    db: web::Data<Database>,
) -> Result<HttpResponse, APIError> {
    if let Some(fault) = intercept(&req, &body, &db) {
        return Ok(fault);
    }
    let message = parse_body(&req, &body).await?;
    if !message.get("title").is_some_and(Value::is_string) {
        return Err(StoreError::InvalidBody("push needs a title".into()).into());
    }
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Record the request, and answer it with a queued failure if there is one.
fn intercept(
    req: &HttpRequest,
    body: &web::Bytes,
    db: &Database,
) -> Option<HttpResponse> {
    let path = req.path();
    db.record(RecordedRequest {
        method: req.method().to_string(),
        path: path.strip_prefix("/api/").unwrap_or(path).to_string(),
        content_type: content_type(req).map(str::to_string),
        body: body.to_vec(),
    });
    let status = db.take_fault()?;
    tracing::info!(status, path, "injecting failure");
    let status = StatusCode::from_u16(status)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Some(HttpResponse::build(status).body("Injected failure"))
}

fn content_type(req: &HttpRequest) -> Option<&str> {
    req.headers().get(CONTENT_TYPE)?.to_str().ok()
}

/// Read a JSON object or a `multipart/form-data` body into row fields.
async fn parse_body(
    req: &HttpRequest,
    body: &web::Bytes,
) -> Result<Row, StoreError> {
    if content_type(req).is_some_and(|ct| ct.starts_with("multipart/")) {
        return Ok(multipart_parts(req, body.clone())
            .await?
            .into_iter()
            .map(|part| (part.name.clone(), part.value()))
            .collect());
    }
    if body.is_empty() {
        return Ok(Row::new());
    }
    match serde_json::from_slice(body) {
        Ok(Value::Object(row)) => Ok(row),
        Ok(_) => Err(StoreError::InvalidBody("expected a JSON object".into())),
        Err(e) => Err(StoreError::InvalidBody(e.to_string())),
    }
}

/// Split a multipart body already read off the wire into its fields.
async fn multipart_parts(
    req: &HttpRequest,
    body: web::Bytes,
) -> Result<Vec<Part>, StoreError> {
    let invalid = |e: actix_multipart::MultipartError| {
        StoreError::InvalidBody(format!("multipart: {e}"))
    };
    let chunk: Result<web::Bytes, PayloadError> = Ok(body);
    let stream = futures::stream::once(async move { chunk });
    let mut multipart = Multipart::new(req.headers(), stream);

    let mut parts = Vec::new();
    while let Some(mut field) = multipart.try_next().await.map_err(invalid)? {
        let name = field
            .name()
            .ok_or_else(|| StoreError::InvalidBody("unnamed part".into()))?
            .to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let content_type = field.content_type().map(|m| m.to_string());
        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(invalid)? {
            data.extend_from_slice(&chunk);
        }
        parts.push(Part {
            name,
            file_name,
            content_type,
            data,
        });
    }
    Ok(parts)
}

fn message(text: String) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": text }))
}

async fn rows_response(
    db: &Database,
    rows: Vec<Row>,
    wrapped: bool,
) -> HttpResponse {
    if let Some(delay) = db.take_list_delay() {
        actix_web::rt::time::sleep(delay).await;
    }
    if wrapped {
        HttpResponse::Ok().json(json!({ "success": true, "data": rows }))
    } else {
        HttpResponse::Ok().json(rows)
    }
}
