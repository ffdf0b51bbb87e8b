//! A fake MDMS search service.

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, ResponseError, post, web};
use payloads::requests::MdmsSearch;
use payloads::responses::{
    ErrorDetail, ErrorResponse, MdmsRes, MdmsResponse, ResponseInfo,
};
use serde::Deserialize;
use std::net::TcpListener;
use std::sync::Mutex;
use uuid::Uuid;

use crate::mock::MdmsDataset;

const ACTIVE_ONLY_FILTER: &str = "[?(@.active==true)]";

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    /// Origins the UI may call from. "*" allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        use std::env::var;

        Ok(Config {
            ip: var("IP_ADDRESS").unwrap_or_else(|_| "127.0.0.1".into()),
            port: match var("PORT") {
                Ok(port) => port.parse()?,
                Err(_) => 8090,
            },
            allowed_origins: var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .collect(),
        })
    }
}

/// Shared state of the fake service: its data, the requests it received and
/// an optional forced failure.
#[derive(Default)]
pub struct MdmsState {
    pub dataset: MdmsDataset,
    requests: Mutex<Vec<MdmsSearch>>,
    failure: Mutex<Option<StatusCode>>,
    garbled: Mutex<bool>,
}

impl MdmsState {
    pub fn new(dataset: MdmsDataset) -> Self {
        Self {
            dataset,
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<MdmsSearch> {
        self.requests.lock().unwrap().clone()
    }

    /// Answer every following search with `status` until cleared with None.
    pub fn fail_with(&self, status: Option<u16>) {
        *self.failure.lock().unwrap() =
            status.map(|code| StatusCode::from_u16(code).unwrap());
    }

    /// Answer following searches with 200 and an HTML page instead of JSON,
    /// like a misconfigured gateway.
    pub fn garble_responses(&self, garbled: bool) {
        *self.garbled.lock().unwrap() = garbled;
    }

    fn search(&self, body: &MdmsSearch) -> MdmsRes {
        let tenant_id = body.criteria.tenant_id.0.as_str();
        let mut mdms_res = MdmsRes::new();

        for module in &body.criteria.module_details {
            let module_name = module.module_name.0.as_str();
            for master in &module.master_details {
                let Some(records) =
                    self.dataset.records(tenant_id, module_name, &master.name)
                else {
                    continue;
                };
                let records = match master.filter.as_deref() {
                    Some(ACTIVE_ONLY_FILTER) => records
                        .iter()
                        .filter(|r| r["active"] == serde_json::Value::Bool(true))
                        .cloned()
                        .collect(),
                    _ => records.clone(),
                };
                mdms_res
                    .entry(module_name.to_string())
                    .or_default()
                    .insert(master.name.clone(), records);
            }
        }
        mdms_res
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MdmsError {
    #[error("tenantId is mandatory")]
    TenantMissing,
    #[error("tenantId {query} in the query does not match {criteria} in MdmsCriteria")]
    TenantMismatch { query: String, criteria: String },
    #[error("forced failure")]
    Forced(StatusCode),
}

impl ResponseError for MdmsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::TenantMissing | Self::TenantMismatch { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Forced(status) => *status,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = match self {
            Self::TenantMissing => "EG_MDMS_TENANT_MANDATORY",
            Self::TenantMismatch { .. } => "EG_MDMS_TENANT_MISMATCH",
            Self::Forced(_) => "EG_MDMS_UNAVAILABLE",
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            response_info: None,
            errors: vec![ErrorDetail {
                code: code.into(),
                message: self.to_string(),
                description: None,
            }],
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub tenant_id: Option<String>,
}

impl SearchParams {
    /// The body's tenant must be set and agree with `?tenantId=` when given.
    fn check_tenant(&self, body: &MdmsSearch) -> Result<(), MdmsError> {
        let criteria = body.criteria.tenant_id.0.as_str();
        if criteria.is_empty() {
            return Err(MdmsError::TenantMissing);
        }
        match self.tenant_id.as_deref() {
            Some(query) if !query.is_empty() && query != criteria => {
                Err(MdmsError::TenantMismatch {
                    query: query.to_string(),
                    criteria: criteria.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[tracing::instrument(skip(body, state))]
#[post("/egov-mdms-service/v1/_search")]
pub async fn search(
    params: web::Query<SearchParams>,
    body: web::Json<MdmsSearch>,
    state: web::Data<MdmsState>,
) -> Result<HttpResponse, MdmsError> {
    let body = body.into_inner();
    state.requests.lock().unwrap().push(body.clone());

    if let Some(status) = *state.failure.lock().unwrap() {
        return Err(MdmsError::Forced(status));
    }
    params.check_tenant(&body)?;
    if *state.garbled.lock().unwrap() {
        return Ok(HttpResponse::Ok()
            .content_type("application/json")
            .body("<html>gateway page</html>"));
    }

    let mdms_res = state.search(&body);
    tracing::debug!(modules = mdms_res.len(), "answering search");

    Ok(HttpResponse::Ok().json(MdmsResponse {
        response_info: Some(ResponseInfo {
            api_id: Some(body.request_info.api_id),
            ver: Some("1.0".into()),
            ts: Some(jiff::Timestamp::now().as_millisecond()),
            res_msg_id: Some(Uuid::new_v4().to_string()),
            msg_id: Some(body.request_info.msg_id),
            status: Some("successful".into()),
        }),
        mdms_res,
    }))
}

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(
    config: &mut Config,
    state: web::Data<MdmsState>,
) -> std::io::Result<Server> {
    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let allowed_origins = config.allowed_origins.clone();
    let server = actix_web::HttpServer::new(move || {
        let cors = if allowed_origins.iter().any(|origin| origin == "*") {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
        } else {
            allowed_origins.iter().fold(
                Cors::default()
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials(),
                |cors, origin| cors.allowed_origin(origin),
            )
        };

        App::new()
            .wrap(cors)
            .service(search)
            .app_data(state.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
