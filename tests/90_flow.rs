//! End-to-end flows against a real database.
//!
//! Run with `DATABASE_URL` pointing at a disposable database:
//! `cargo test --test 90_flow -- --ignored`

mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use uuid::Uuid;

use asset_desk::database::DatabaseManager;
use asset_desk::services::{NewUser, UserService};
use asset_desk::types::{RecordStatus, Role};

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

async fn seed_user(role: Role) -> Result<(String, String)> {
    let config = common::test_config();
    let pool = DatabaseManager::build_pool(&config.database)?;
    DatabaseManager::migrate(&pool).await?;

    let email = format!("{}@example.com", unique("flow"));
    let password = "correct horse battery".to_string();
    UserService::new(&pool)
        .create(NewUser {
            email: email.clone(),
            password: password.clone(),
            role,
            first_name: "Flow".to_string(),
            last_name: "Test".to_string(),
            mobile_number: unique("04"),
            employee_id: None,
            status: RecordStatus::Active,
        })
        .await?;
    Ok((email, password))
}

async fn sign_in(app: &axum::Router, email: &str, password: &str) -> Result<String> {
    let body = serde_json::json!({ "email": email, "password": password }).to_string();
    let res = common::send(app, Method::POST, "/api/auth/signin", None, Some(&body)).await?;
    assert_eq!(res.status, StatusCode::OK);
    let cookie = res.set_cookie().unwrap_or_default();
    Ok(cookie.split(';').next().unwrap_or_default().to_string())
}

/// POST a JSON body expecting 201 and return the new record's id
async fn create(app: &axum::Router, cookie: &str, uri: &str, body: serde_json::Value) -> Result<String> {
    let res = common::send(app, Method::POST, uri, Some(cookie), Some(&body.to_string())).await?;
    assert_eq!(res.status, StatusCode::CREATED, "{} {}", uri, res.body);
    Ok(res.body["id"].as_str().unwrap_or_default().to_string())
}

async fn patch(app: &axum::Router, cookie: &str, uri: &str, body: serde_json::Value) -> Result<common::TestResponse> {
    common::send(app, Method::PATCH, uri, Some(cookie), Some(&body.to_string())).await
}

#[tokio::test]
#[ignore]
async fn signin_rejects_wrong_password() -> Result<()> {
    let (email, _) = seed_user(Role::Admin).await?;
    let app = common::app();

    let body = serde_json::json!({ "email": email, "password": "nope" }).to_string();
    let res = common::send(&app, Method::POST, "/api/auth/signin", None, Some(&body)).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.error(), "Invalid email or password.");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn department_names_are_unique() -> Result<()> {
    let (email, password) = seed_user(Role::Admin).await?;
    let app = common::app();
    let cookie = sign_in(&app, &email, &password).await?;

    let name = unique("dept");
    let body = serde_json::json!({ "departmentName": name, "status": "ACTIVE" }).to_string();
    let res = common::send(&app, Method::POST, "/api/departments", Some(&cookie), Some(&body)).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["name"], name.as_str());

    let res = common::send(&app, Method::POST, "/api/departments", Some(&cookie), Some(&body)).await?;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.error(), "A department with that name already exists.");

    let res = common::send(&app, Method::GET, "/api/departments?limit=1", Some(&cookie), None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["items"].as_array().map(Vec::len), Some(1));
    assert!(res.body["total"].as_i64().unwrap_or_default() >= 1);
    Ok(())
}

#[tokio::test]
#[ignore]
async fn assignment_is_returned_once() -> Result<()> {
    let (admin_email, admin_password) = seed_user(Role::Admin).await?;
    let (user_email, user_password) = seed_user(Role::User).await?;
    let app = common::app();
    let admin = sign_in(&app, &admin_email, &admin_password).await?;
    let user = sign_in(&app, &user_email, &user_password).await?;

    let category = serde_json::json!({ "categoryName": unique("cat"), "status": "ACTIVE" }).to_string();
    let res = common::send(&app, Method::POST, "/api/asset-category", Some(&admin), Some(&category)).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    let category_id = res.body["id"].as_str().unwrap_or_default().to_string();

    let asset = serde_json::json!({
        "assetName": unique("laptop"),
        "assetDescription": "14 inch",
        "serialNumber": unique("SN"),
        "categoryId": category_id,
        "status": "ACTIVE",
    })
    .to_string();
    let res = common::send(&app, Method::POST, "/api/asset", Some(&admin), Some(&asset)).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    let asset_id = res.body["id"].as_str().unwrap_or_default().to_string();

    let res = common::send(
        &app,
        Method::GET,
        &format!("/api/users/search?email={}", user_email),
        Some(&admin),
        None,
    )
    .await?;
    let user_id = res.body[0]["id"].as_str().unwrap_or_default().to_string();

    let issue = serde_json::json!({ "userId": user_id, "assetId": asset_id, "issueDate": "2024-03-01" }).to_string();
    let res = common::send(&app, Method::POST, "/api/asset-assignment", Some(&admin), Some(&issue)).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    let assignment_id = res.body["id"].as_str().unwrap_or_default().to_string();

    // The asset cannot be issued twice while open
    let res = common::send(&app, Method::POST, "/api/asset-assignment", Some(&admin), Some(&issue)).await?;
    assert_eq!(res.status, StatusCode::CONFLICT);

    let res = common::send(&app, Method::GET, "/api/asset-assignment", Some(&user), None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["total"], 1);
    assert_eq!(res.body["items"][0]["assignedTo"]["email"], user_email.as_str());

    let ret = serde_json::json!({ "id": assignment_id, "returnReason": "Upgrade" }).to_string();
    let res = common::send(&app, Method::PATCH, "/api/asset-assignment", Some(&user), Some(&ret)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["isReturned"], true);
    assert!(res.body["returnDate"].is_string());

    let res = common::send(&app, Method::PATCH, "/api/asset-assignment", Some(&user), Some(&ret)).await?;
    assert_eq!(res.status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
#[ignore]
async fn category_parents_cannot_form_a_cycle() -> Result<()> {
    let (email, password) = seed_user(Role::Admin).await?;
    let app = common::app();
    let admin = sign_in(&app, &email, &password).await?;

    let root_name = unique("root");
    let root = create(
        &app,
        &admin,
        "/api/asset-category",
        serde_json::json!({ "categoryName": root_name, "parentCategoryId": "", "status": "ACTIVE" }),
    )
    .await?;
    let child = create(
        &app,
        &admin,
        "/api/asset-category",
        serde_json::json!({ "categoryName": unique("child"), "parentCategoryId": root, "status": "ACTIVE" }),
    )
    .await?;

    let res = patch(
        &app,
        &admin,
        "/api/asset-category",
        serde_json::json!({ "id": root, "categoryName": root_name, "parentCategoryId": root, "status": "ACTIVE" }),
    )
    .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "A category cannot be its own parent.");

    let res = patch(
        &app,
        &admin,
        "/api/asset-category",
        serde_json::json!({ "id": root, "categoryName": root_name, "parentCategoryId": child, "status": "ACTIVE" }),
    )
    .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Parent category would create a cycle.");

    let res = patch(
        &app,
        &admin,
        "/api/asset-category",
        serde_json::json!({ "id": root, "categoryName": root_name, "parentCategoryId": Uuid::new_v4(), "status": "ACTIVE" }),
    )
    .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.error(), "Parent category not found.");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn employee_links_to_one_user() -> Result<()> {
    let (email, password) = seed_user(Role::Admin).await?;
    let app = common::app();
    let admin = sign_in(&app, &email, &password).await?;

    let designation = create(
        &app,
        &admin,
        "/api/designations",
        serde_json::json!({ "designationName": unique("desig"), "status": "ACTIVE" }),
    )
    .await?;
    let employee_type = create(
        &app,
        &admin,
        "/api/employee-types",
        serde_json::json!({ "employeeTypeName": unique("type"), "status": "ACTIVE" }),
    )
    .await?;
    let employee = create(
        &app,
        &admin,
        "/api/employees",
        serde_json::json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "departmentId": "",
            "designationId": designation,
            "employeeTypeId": employee_type,
            "contractId": "",
            "phoneNo": unique("04"),
            "status": "ACTIVE",
        }),
    )
    .await?;

    let user = |tag: &str| {
        serde_json::json!({
            "email": format!("{}@example.com", unique(tag)),
            "password": "correct horse battery",
            "role": "USER",
            "firstName": "Grace",
            "lastName": "Hopper",
            "mobileNumber": unique("04"),
            "employeeId": employee,
            "status": "ACTIVE",
        })
    };
    create(&app, &admin, "/api/users", user("linked")).await?;

    let res = common::send(
        &app,
        Method::POST,
        "/api/users",
        Some(&admin),
        Some(&user("second").to_string()),
    )
    .await?;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.error(), "Employee is already linked to a user.");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn users_cannot_return_each_others_assets() -> Result<()> {
    let (admin_email, admin_password) = seed_user(Role::Admin).await?;
    let (owner_email, _) = seed_user(Role::User).await?;
    let (other_email, other_password) = seed_user(Role::User).await?;
    let app = common::app();
    let admin = sign_in(&app, &admin_email, &admin_password).await?;
    let other = sign_in(&app, &other_email, &other_password).await?;

    let category = create(
        &app,
        &admin,
        "/api/asset-category",
        serde_json::json!({ "categoryName": unique("cat"), "status": "ACTIVE" }),
    )
    .await?;
    let asset = create(
        &app,
        &admin,
        "/api/asset",
        serde_json::json!({
            "assetName": unique("phone"),
            "assetDescription": "Handset",
            "serialNumber": unique("SN"),
            "categoryId": category,
            "status": "ACTIVE",
        }),
    )
    .await?;

    let res = common::send(
        &app,
        Method::GET,
        &format!("/api/users/search?email={}", owner_email),
        Some(&admin),
        None,
    )
    .await?;
    let owner_id = res.body[0]["id"].as_str().unwrap_or_default().to_string();

    let assignment = create(
        &app,
        &admin,
        "/api/asset-assignment",
        serde_json::json!({ "userId": owner_id, "assetId": asset, "issueDate": "2024-03-01" }),
    )
    .await?;

    let res = common::send(&app, Method::GET, "/api/asset-assignment", Some(&other), None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["total"], 0);

    let res = patch(
        &app,
        &other,
        "/api/asset-assignment",
        serde_json::json!({ "id": assignment, "returnReason": "Not mine" }),
    )
    .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.error(), "Asset assignment not found.");

    // Still open for the admin to return
    let res = patch(&app, &admin, "/api/asset-assignment", serde_json::json!({ "id": assignment })).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["isReturned"], true);
    Ok(())
}

#[tokio::test]
#[ignore]
async fn inventory_updates_are_partial() -> Result<()> {
    let (email, password) = seed_user(Role::Admin).await?;
    let app = common::app();
    let admin = sign_in(&app, &email, &password).await?;

    let category = create(
        &app,
        &admin,
        "/api/asset-category",
        serde_json::json!({ "categoryName": unique("cat"), "status": "ACTIVE" }),
    )
    .await?;
    let asset = create(
        &app,
        &admin,
        "/api/asset",
        serde_json::json!({
            "assetName": unique("cable"),
            "assetDescription": "USB-C",
            "serialNumber": unique("SN"),
            "categoryId": category,
            "status": "ACTIVE",
        }),
    )
    .await?;
    let entry = create(
        &app,
        &admin,
        "/api/inventory",
        serde_json::json!({ "assetId": asset, "inventoryType": "PURCHASE", "quantity": 10, "remarks": "Initial stock" }),
    )
    .await?;

    let res = patch(&app, &admin, "/api/inventory", serde_json::json!({ "id": entry, "quantity": -2 })).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["quantity"], -2);
    assert_eq!(res.body["inventoryType"], "PURCHASE");
    assert_eq!(res.body["assetId"], asset.as_str());
    assert_eq!(res.body["remarks"], "Initial stock");

    let res = patch(&app, &admin, "/api/inventory", serde_json::json!({ "id": entry, "quantity": 0 })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = patch(&app, &admin, "/api/inventory", serde_json::json!({ "id": entry, "remarks": null })).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["remarks"].is_null());
    assert_eq!(res.body["quantity"], -2);
    Ok(())
}
