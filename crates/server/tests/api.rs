use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use engine::Engine;
use server::{MediaError, MediaUploader, ServerState, UploadedFile, router};

const BOUNDARY: &str = "catalog-test-boundary";

struct FakeUploader;

#[async_trait]
impl MediaUploader for FakeUploader {
    async fn upload(&self, file: UploadedFile) -> Result<String, MediaError> {
        Ok(format!("https://cdn.test/{}", file.file_name))
    }
}

struct FailingUploader;

#[async_trait]
impl MediaUploader for FailingUploader {
    async fn upload(&self, _file: UploadedFile) -> Result<String, MediaError> {
        Err(MediaError::Rejected {
            status: 401,
            message: "Invalid Signature".to_string(),
        })
    }
}

/// Records how many files reached the media host.
#[derive(Default)]
struct CountingUploader {
    uploads: AtomicUsize,
}

#[async_trait]
impl MediaUploader for CountingUploader {
    async fn upload(&self, file: UploadedFile) -> Result<String, MediaError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://cdn.test/{}", file.file_name))
    }
}

async fn app_with(media: Arc<dyn MediaUploader>) -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    router(ServerState::new(engine, media))
}

async fn app() -> Router {
    app_with(Arc::new(FakeUploader)).await
}

fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart(method: Method, uri: &str, fields: &[(&str, &str)], file: Option<&str>) -> Request<Body> {
    let body = multipart_body(fields, file.map(|name| (name, b"png-bytes".as_slice())));
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_category(app: &Router, name: &str, tax: Option<&str>) -> Value {
    let mut fields = vec![("name", name), ("description", "Category description")];
    match tax {
        Some(tax) => {
            fields.push(("isTaxApplicable", "true"));
            fields.push(("tax", tax));
            fields.push(("taxType", "GST"));
        }
        None => fields.push(("isTaxApplicable", "false")),
    }
    let (status, body) = send(
        app,
        multipart(
            Method::POST,
            "/api/v1/category/createCategory",
            &fields,
            Some("category.png"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"].clone()
}

async fn create_sub_category(app: &Router, category_id: &str, name: &str) -> Value {
    let (status, body) = send(
        app,
        multipart(
            Method::POST,
            "/api/v1/subcategory/createSubCategory",
            &[
                ("categoryId", category_id),
                ("name", name),
                ("description", "Sub category description"),
            ],
            Some("sub.png"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"].clone()
}

async fn create_item(app: &Router, sub_category_id: &str, base: &str, discount: &str) -> Value {
    let (status, body) = send(
        app,
        multipart(
            Method::POST,
            "/api/v1/item/createItem",
            &[
                ("sub_categoryId", sub_category_id),
                ("name", "Green tea"),
                ("description", "Loose leaf"),
                ("isTaxApplicable", "true"),
                ("tax", "5"),
                ("baseAmount", base),
                ("discount", discount),
            ],
            Some("tea.png"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"].clone()
}

#[tokio::test]
async fn create_category_stores_uploaded_image_url() {
    let app = app().await;

    let (status, body) = send(
        &app,
        multipart(
            Method::POST,
            "/api/v1/category/createCategory",
            &[
                ("name", "Beverages"),
                ("description", "Drinks"),
                ("isTaxApplicable", "true"),
                ("tax", "18"),
                ("taxType", "GST"),
            ],
            Some("drinks.png"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Category created successfully");
    assert_eq!(body["data"]["name"], "Beverages");
    assert_eq!(body["data"]["image"], "https://cdn.test/drinks.png");
    assert_eq!(body["data"]["isTaxApplicable"], true);
    assert_eq!(body["data"]["tax"], 18.0);
    assert_eq!(body["data"]["taxType"], "GST");

    let id = body["data"]["_id"].as_str().unwrap();
    let (status, fetched) = send(&app, get(&format!("/api/v1/category/getCategory?_id={id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["message"], "Data found successfully");
    assert_eq!(fetched["data"]["_id"], id);
}

#[tokio::test]
async fn create_category_reports_every_missing_field() {
    let app = app().await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/category/createCategory",
            json!({ "description": "Drinks", "isTaxApplicable": false }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["missingFields"], json!(["name", "image"]));
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn duplicate_category_name_is_a_conflict() {
    let app = app().await;
    create_category(&app, "Snacks", None).await;

    let (status, body) = send(
        &app,
        multipart(
            Method::POST,
            "/api/v1/category/createCategory",
            &[
                ("name", "Snacks"),
                ("description", "Again"),
                ("isTaxApplicable", "false"),
            ],
            Some("snacks.png"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Category already exists");
}

#[tokio::test]
async fn failed_upload_is_internal_and_stores_nothing() {
    let app = app_with(Arc::new(FailingUploader)).await;

    let (status, body) = send(
        &app,
        multipart(
            Method::POST,
            "/api/v1/category/createCategory",
            &[
                ("name", "Frozen"),
                ("description", "Cold"),
                ("isTaxApplicable", "false"),
            ],
            Some("frozen.png"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Something went wrong");

    let (status, _) = send(&app, get("/api/v1/category/getAllCategory")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_category_validates_the_id() {
    let app = app().await;

    let (status, body) = send(&app, get("/api/v1/category/getCategory")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["missingFields"], json!(["_id"]));

    let (status, _) = send(&app, get("/api/v1/category/getCategory?_id=not-an-id")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/v1/category/getCategory?_id={}", Uuid::new_v4());
    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Category not found");
}

#[tokio::test]
async fn edit_category_clears_tax_when_not_applicable() {
    let app = app().await;
    let category = create_category(&app, "Dairy", Some("12")).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/category/editCategory",
            json!({ "_id": category["_id"], "isTaxApplicable": false, "description": "Milk" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Category updated successfully");
    assert_eq!(body["data"]["isTaxApplicable"], false);
    assert_eq!(body["data"]["tax"], 0.0);
    assert_eq!(body["data"]["taxType"], "");
    assert_eq!(body["data"]["description"], "Milk");
    assert_eq!(body["data"]["name"], "Dairy");
}

#[tokio::test]
async fn edit_category_requires_id_and_rejects_taken_names() {
    let app = app().await;
    create_category(&app, "Bakery", None).await;
    let other = create_category(&app, "Produce", None).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/category/editCategory",
            json!({ "name": "Bakery" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["missingFields"], json!(["_id"]));

    let (status, _) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/category/editCategory",
            json!({ "_id": other["_id"], "name": "Bakery" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/category/editCategory",
            json!({ "_id": Uuid::new_v4(), "name": "Fresh" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_category_replaces_image_from_multipart() {
    let app = app().await;
    let category = create_category(&app, "Frozen", None).await;
    let id = category["_id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        multipart(
            Method::PUT,
            "/api/v1/category/editCategory",
            &[("_id", id)],
            Some("new.png"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["image"], "https://cdn.test/new.png");
}

#[tokio::test]
async fn sub_category_needs_existing_parent_and_copies_its_tax() {
    let app = app().await;
    let missing = Uuid::new_v4().to_string();

    let (status, body) = send(
        &app,
        multipart(
            Method::POST,
            "/api/v1/subcategory/createSubCategory",
            &[
                ("categoryId", missing.as_str()),
                ("name", "Orphan"),
                ("description", "No parent"),
            ],
            Some("orphan.png"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Category not found");

    let category = create_category(&app, "Beverages", Some("18")).await;
    let sub = create_sub_category(&app, category["_id"].as_str().unwrap(), "Tea").await;
    assert_eq!(sub["categoryId"], category["_id"]);
    assert_eq!(sub["isTaxApplicable"], true);
    assert_eq!(sub["tax"], 18.0);
    assert_eq!(sub["image"], "https://cdn.test/sub.png");

    let uri = format!("/api/v1/subcategory/getSubCategory?_id={}", sub["_id"].as_str().unwrap());
    let (status, fetched) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["name"], "Tea");
}

#[tokio::test]
async fn sub_categories_under_category() {
    let app = app().await;
    let category = create_category(&app, "Beverages", None).await;
    let category_id = category["_id"].as_str().unwrap();

    let uri = format!("/api/v1/subcategory/subCategoryUnderCategory/{category_id}");
    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Data not found");

    create_sub_category(&app, category_id, "Tea").await;
    tokio::time::sleep(Duration::from_millis(2)).await;
    create_sub_category(&app, category_id, "Coffee").await;

    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|sub| sub["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Coffee", "Tea"]);
}

#[tokio::test]
async fn edit_sub_category_moves_to_existing_category_only() {
    let app = app().await;
    let first = create_category(&app, "Beverages", None).await;
    let second = create_category(&app, "Snacks", None).await;
    let sub = create_sub_category(&app, first["_id"].as_str().unwrap(), "Juice").await;

    let (status, _) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/subcategory/editSubcategory",
            json!({ "_id": sub["_id"], "categoryId": Uuid::new_v4() }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/subcategory/editSubcategory",
            json!({ "_id": sub["_id"], "categoryId": second["_id"], "name": "Chips" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Sub category updated successfully");
    assert_eq!(body["data"]["categoryId"], second["_id"]);
    assert_eq!(body["data"]["name"], "Chips");
}

#[tokio::test]
async fn item_total_follows_base_amount_and_discount() {
    let app = app().await;
    let category = create_category(&app, "Beverages", Some("18")).await;
    let sub = create_sub_category(&app, category["_id"].as_str().unwrap(), "Tea").await;
    let item = create_item(&app, sub["_id"].as_str().unwrap(), "100", "20").await;

    assert_eq!(item["sub_categoryId"], sub["_id"]);
    assert_eq!(item["baseAmount"], 100.0);
    assert_eq!(item["discount"], 20.0);
    assert_eq!(item["totalAmount"], 80.0);

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/item/editItem",
            json!({ "_id": item["_id"], "discount": 30 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Item updated successfully");
    assert_eq!(body["data"]["totalAmount"], 70.0);

    let uri = format!("/api/v1/item/getItem/{}", item["_id"].as_str().unwrap());
    let (status, fetched) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["discount"], 30.0);
    assert_eq!(fetched["data"]["totalAmount"], 70.0);
}

#[tokio::test]
async fn item_edit_clears_tax_and_rejects_bad_amounts() {
    let app = app().await;
    let category = create_category(&app, "Beverages", None).await;
    let sub = create_sub_category(&app, category["_id"].as_str().unwrap(), "Tea").await;
    let item = create_item(&app, sub["_id"].as_str().unwrap(), "50", "5").await;
    assert_eq!(item["tax"], 5.0);

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/item/editItem",
            json!({ "_id": item["_id"], "isTaxApplicable": "false" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["tax"], 0.0);

    let (status, _) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/item/editItem",
            json!({ "_id": item["_id"], "baseAmount": -1 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/item/editItem",
            json!({ "_id": item["_id"], "baseAmount": "lots" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn item_requires_existing_sub_category() {
    let app = app().await;
    let missing = Uuid::new_v4().to_string();

    let (status, body) = send(
        &app,
        multipart(
            Method::POST,
            "/api/v1/item/createItem",
            &[
                ("sub_categoryId", missing.as_str()),
                ("name", "Ghost"),
                ("description", "Nowhere"),
                ("isTaxApplicable", "false"),
                ("baseAmount", "10"),
                ("discount", "0"),
            ],
            Some("ghost.png"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Sub category not found");
}

#[tokio::test]
async fn items_under_sub_category() {
    let app = app().await;
    let category = create_category(&app, "Beverages", None).await;
    let sub = create_sub_category(&app, category["_id"].as_str().unwrap(), "Tea").await;
    let sub_id = sub["_id"].as_str().unwrap();
    create_item(&app, sub_id, "10", "1").await;
    create_item(&app, sub_id, "20", "2").await;

    let (status, body) = send(
        &app,
        get(&format!("/api/v1/item/getItemsUnderSubCategory/{sub_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = send(
        &app,
        get(&format!(
            "/api/v1/item/getItemsUnderSubCategory/{}",
            Uuid::new_v4()
        )),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_filters_pages_and_sorts_newest_first() {
    let app = app().await;
    for name in ["Food 0", "Drink 1", "Food 2", "Drink 3", "Food 4"] {
        create_category(&app, name, None).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let (status, body) = send(
        &app,
        get("/api/v1/category/getAllCategory?search=food&page=2&limit=2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data found successfully");

    let page = &body["data"];
    let names: Vec<_> = page["docs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|doc| doc["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Food 0"]);
    assert_eq!(page["totalDocs"], 3);
    assert_eq!(page["limit"], 2);
    assert_eq!(page["page"], 2);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["pagingCounter"], 3);
    assert_eq!(page["hasPrevPage"], true);
    assert_eq!(page["hasNextPage"], false);
    assert_eq!(page["prevPage"], 1);
    assert_eq!(page["nextPage"], Value::Null);

    let (status, body) = send(&app, get("/api/v1/category/getAllCategory?limit=abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["limit"], 15);
    assert_eq!(body["data"]["docs"][0]["name"], "Food 4");

    let (status, body) = send(&app, get("/api/v1/category/getAllCategory?search=cheese")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Data not found");
}

#[tokio::test]
async fn list_sub_categories_and_items() {
    let app = app().await;

    let (status, _) = send(&app, get("/api/v1/subcategory/getAllSubCategory")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, get("/api/v1/item/getAllItem")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let category = create_category(&app, "Beverages", None).await;
    let sub = create_sub_category(&app, category["_id"].as_str().unwrap(), "Tea").await;
    create_item(&app, sub["_id"].as_str().unwrap(), "10", "0").await;

    let (status, body) = send(&app, get("/api/v1/subcategory/getAllSubCategory?search=TE")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalDocs"], 1);

    let (status, body) = send(&app, get("/api/v1/item/getAllItem?search=green")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["docs"][0]["name"], "Green tea");
}

#[tokio::test]
async fn urlencoded_edits_are_accepted() {
    let app = app().await;
    let category = create_category(&app, "Bakery", None).await;
    let id = category["_id"].as_str().unwrap();

    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/v1/category/editCategory")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("_id={id}&description=Bread")))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["description"], "Bread");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = app().await;

    let (status, body) = send(&app, get("/api/v1/nothing/here")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn invalid_values_are_rejected_before_upload() {
    let uploader = Arc::new(CountingUploader::default());
    let app = app_with(uploader.clone()).await;

    let (status, _) = send(
        &app,
        multipart(
            Method::POST,
            "/api/v1/category/createCategory",
            &[
                ("name", "   "),
                ("description", "Blank"),
                ("isTaxApplicable", "false"),
            ],
            Some("blank.png"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(uploader.uploads.load(Ordering::SeqCst), 0);

    let category = create_category(&app, "Beverages", None).await;
    let sub = create_sub_category(&app, category["_id"].as_str().unwrap(), "Tea").await;
    assert_eq!(uploader.uploads.load(Ordering::SeqCst), 2);

    let (status, _) = send(
        &app,
        multipart(
            Method::POST,
            "/api/v1/item/createItem",
            &[
                ("sub_categoryId", sub["_id"].as_str().unwrap()),
                ("name", "Oolong"),
                ("description", "Rolled"),
                ("isTaxApplicable", "false"),
                ("baseAmount", "-5"),
                ("discount", "0"),
            ],
            Some("oolong.png"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        multipart(
            Method::PUT,
            "/api/v1/subcategory/editSubcategory",
            &[("_id", sub["_id"].as_str().unwrap()), ("name", " ")],
            Some("renamed.png"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(uploader.uploads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn out_of_range_paging_answers_instead_of_failing() {
    let app = app().await;
    create_category(&app, "Beverages", None).await;

    let (status, body) = send(
        &app,
        get("/api/v1/category/getAllCategory?limit=18446744073709551615"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["limit"], 100);
    assert_eq!(body["data"]["totalDocs"], 1);

    let (status, body) = send(
        &app,
        get("/api/v1/category/getAllCategory?page=9999999999999999999"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Data not found");
}

#[tokio::test]
async fn search_matches_accented_names() {
    let app = app().await;
    create_category(&app, "Éclairs", None).await;

    for term in ["%C3%A9clair", "%C3%89clair", "ECLAIR"] {
        let (status, body) = send(
            &app,
            get(&format!("/api/v1/category/getAllCategory?search={term}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "search {term}");
        assert_eq!(body["data"]["docs"][0]["name"], "Éclairs");
    }
}

#[tokio::test]
async fn tax_edit_on_untaxed_category_keeps_zero() {
    let app = app().await;
    let category = create_category(&app, "Stationery", None).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/v1/category/editCategory",
            json!({ "_id": category["_id"], "tax": 12, "taxType": "GST" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["isTaxApplicable"], false);
    assert_eq!(body["data"]["tax"], 0.0);
    assert_eq!(body["data"]["taxType"], "");
}
