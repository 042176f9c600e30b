// handlers/protected/employees.rs - /api/employees

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::page_response;
use crate::api::payload::{blank_as_none, require, require_text, text};
use crate::api::{ApiResponse, ApiResult, Page, PageQuery};
use crate::app::AppState;
use crate::database::models::Employee;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::{EmployeeInput, EmployeeService};
use crate::types::RecordStatus;

const REQUIRED: &str = "firstName, lastName, designationId, employeeTypeId, phoneNo, status are required.";

/// `employeeId` is the legacy name of the employee code, not a row id
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<Uuid>,
    #[serde(alias = "employeeId")]
    pub employee_code: Option<String>,
    #[serde(alias = "employeeFirstName")]
    pub first_name: Option<String>,
    #[serde(alias = "employeeLastName")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub department_id: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub designation_id: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub employee_type_id: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub contract_id: Option<Uuid>,
    pub phone_no: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<RecordStatus>,
}

impl EmployeePayload {
    fn into_input(self, message: &str) -> Result<EmployeeInput, ApiError> {
        Ok(EmployeeInput {
            employee_code: text(self.employee_code),
            first_name: require_text(self.first_name, message)?,
            last_name: require_text(self.last_name, message)?,
            department_id: self.department_id,
            designation_id: require(self.designation_id, message)?,
            employee_type_id: require(self.employee_type_id, message)?,
            contract_id: self.contract_id,
            phone_no: require_text(self.phone_no, message)?,
            status: require(self.status, message)?,
        })
    }
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<Employee>> {
    user.require_admin()?;
    let page = query.resolve(&state.config.api);
    page_response(EmployeeService::new(&state.pool).list(page).await)
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<EmployeePayload>, JsonRejection>,
) -> ApiResult<Employee> {
    user.require_admin()?;
    let Json(body) = payload?;
    let input = body.into_input(REQUIRED)?;

    let employee = EmployeeService::new(&state.pool).create(input).await?;
    Ok(ApiResponse::created(employee))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<EmployeePayload>, JsonRejection>,
) -> ApiResult<Employee> {
    user.require_admin()?;
    let Json(body) = payload?;
    let message = format!("id, {}", REQUIRED);
    let id = require(body.id, &message)?;
    let input = body.into_input(&message)?;

    let employee = EmployeeService::new(&state.pool).update(id, input).await?;
    Ok(ApiResponse::success(employee))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_employee_fields_map_to_current_names() {
        let body: EmployeePayload = serde_json::from_str(
            r#"{
                "employeeId": "E-001",
                "employeeFirstName": "Grace",
                "employeeLastName": "Hopper",
                "designationId": "0b7e3c1a-1d2f-4e5a-8b9c-0d1e2f3a4b5c",
                "employeeTypeId": "1c8f4d2b-2e3a-4f6b-9cad-1e2f3a4b5c6d",
                "phoneNo": "0400111222",
                "status": "ACTIVE"
            }"#,
        )
        .unwrap();
        let input = body.into_input(REQUIRED).unwrap();
        assert_eq!(input.employee_code.as_deref(), Some("E-001"));
        assert_eq!(input.first_name, "Grace");
        assert!(input.department_id.is_none());
    }

    #[test]
    fn blank_employee_code_is_absent() {
        let body: EmployeePayload = serde_json::from_str(
            r#"{
                "employeeCode": "",
                "firstName": "Grace",
                "lastName": "Hopper",
                "designationId": "0b7e3c1a-1d2f-4e5a-8b9c-0d1e2f3a4b5c",
                "employeeTypeId": "1c8f4d2b-2e3a-4f6b-9cad-1e2f3a4b5c6d",
                "phoneNo": "0400111222",
                "status": "INACTIVE"
            }"#,
        )
        .unwrap();
        assert!(body.into_input(REQUIRED).unwrap().employee_code.is_none());
    }

    #[test]
    fn unselected_department_and_contract_are_null() {
        let body: EmployeePayload = serde_json::from_str(
            r#"{
                "firstName": "Grace",
                "lastName": "Hopper",
                "departmentId": "",
                "designationId": "0b7e3c1a-1d2f-4e5a-8b9c-0d1e2f3a4b5c",
                "employeeTypeId": "1c8f4d2b-2e3a-4f6b-9cad-1e2f3a4b5c6d",
                "contractId": "",
                "phoneNo": "0400111222",
                "status": "ACTIVE"
            }"#,
        )
        .unwrap();
        let input = body.into_input(REQUIRED).unwrap();
        assert!(input.department_id.is_none());
        assert!(input.contract_id.is_none());
    }

    #[test]
    fn unselected_required_select_reports_required_fields() {
        let body: EmployeePayload = serde_json::from_str(
            r#"{
                "firstName": "Grace",
                "lastName": "Hopper",
                "designationId": "",
                "employeeTypeId": "1c8f4d2b-2e3a-4f6b-9cad-1e2f3a4b5c6d",
                "phoneNo": "0400111222",
                "status": ""
            }"#,
        )
        .unwrap();
        let err = body.into_input(REQUIRED).unwrap_err();
        assert_eq!(err.message(), REQUIRED);
    }
}
