use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};

use crate::spawn_stub;

#[tokio::test]
async fn category_lists_are_wrapped() -> anyhow::Result<()> {
    let stub = spawn_stub();
    stub.db.seed("services", [json!({"service_name": "Cleaning"})])?;
    stub.db.seed(
        "subservices",
        [json!({"service_id": 1}), json!({"service_id": 1})],
    )?;

    let body: Value = stub
        .client
        .get(stub.url("services/allNew"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"][0]["service_id"], json!(1));
    assert_eq!(body["data"][0]["subservices_count"], json!(2));

    let bookings: Value =
        stub.client.get(stub.url("booking/all")).send().await?.json().await?;
    assert_eq!(bookings, json!([]));
    Ok(())
}

#[tokio::test]
async fn create_echoes_new_id() -> anyhow::Result<()> {
    let stub = spawn_stub();

    let echo: Value = stub
        .client
        .post(stub.url("discount/addNew"))
        .json(&json!({"promo_code": "EID25"}))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(echo["id"], json!(1));
    assert_eq!(echo["discount_id"], json!(1));
    let rows = stub.db.list("discount")?;
    assert_eq!(rows[0]["promo_code"], json!("EID25"));
    Ok(())
}

#[tokio::test]
async fn multipart_fields_are_stored() -> anyhow::Result<()> {
    let stub = spawn_stub();
    stub.db.seed("blog", [json!({"blog_id": 3, "title": "Old"})])?;

    let form = Form::new().text("title", "New").part(
        "image",
        Part::bytes(b"img".to_vec())
            .file_name("cover.jpg")
            .mime_str("image/jpeg")?,
    );
    let response = stub
        .client
        .put(stub.url("blog/update/3"))
        .multipart(form)
        .send()
        .await?;

    assert!(response.status().is_success());
    let row = stub.db.row("blog", 3)?.unwrap();
    assert_eq!(row["title"], json!("New"));
    assert_eq!(row["image"], json!("/uploads/cover.jpg"));
    assert!(stub.db.last_request().unwrap().is_multipart());
    Ok(())
}

#[tokio::test]
async fn missing_rows_are_not_found() -> anyhow::Result<()> {
    let stub = spawn_stub();

    let delete = stub
        .client
        .post(stub.url("contact/delete"))
        .json(&json!({"id": 4}))
        .send()
        .await?;
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);

    let update = stub
        .client
        .put(stub.url("complaint/update/4"))
        .json(&json!({"status": "Resolved"}))
        .send()
        .await?;
    assert_eq!(update.status(), StatusCode::NOT_FOUND);

    let no_id = stub
        .client
        .post(stub.url("contact/delete"))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(no_id.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn queued_failures_answer_first() -> anyhow::Result<()> {
    let stub = spawn_stub();
    stub.db.fail_next(503);

    let failed = stub.client.get(stub.url("blog/all")).send().await?;
    assert_eq!(failed.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(failed.text().await?, "Injected failure");

    let ok = stub.client.get(stub.url("blog/all")).send().await?;
    assert!(ok.status().is_success());
    assert_eq!(stub.db.requests_to("blog/all").len(), 2);
    Ok(())
}

#[tokio::test]
async fn staff_rows_carry_account_fields() -> anyhow::Result<()> {
    let stub = spawn_stub();
    stub.db.seed("user", [json!({"id": 9, "name": "Abdi", "password": "x"})])?;
    stub.db.seed("staff", [json!({"staff_id": 1, "staff_user_id": "9"})])?;

    let rows: Value = stub
        .client
        .get(stub.url("staff/all_admin"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(rows[0]["name"], json!("Abdi"));
    assert!(rows[0].get("password").is_none());
    Ok(())
}
