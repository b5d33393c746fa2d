//! HTTP implementation of `SessionGateway`.

use crate::config_service::ClientConfig;
use crate::dto::{
    AddMultiRecordRequest, ApiResponse, AttendanceRequest, AttendanceResponse, EndSessionRequest,
    RecordsResponse, add_record_body,
};
use async_trait::async_trait;
use mentorly_core::record::{Record, RecordType};
use mentorly_core::session::{AttendanceInfo, AttendanceStatus, MenteeId, SessionId};
use mentorly_core::{MentorlyError, Result, SessionGateway};
use reqwest::header::COOKIE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Maps a reqwest failure to a transport error.
pub fn transport_error(err: reqwest::Error) -> MentorlyError {
    if err.is_timeout() {
        MentorlyError::transport(format!("request timed out: {err}"))
    } else {
        MentorlyError::transport(err.to_string())
    }
}

/// Gateway talking to the mentor session API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSessionGateway {
    client: Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl HttpSessionGateway {
    /// Builds a gateway whose requests time out after the configured
    /// duration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(transport_error)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_cookie: config.session_cookie.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_cookie(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.with_cookie(self.client.get(self.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.with_cookie(self.client.post(self.url(path)))
    }

    /// Sends `request` and decodes the JSON body.
    ///
    /// Error statuses are decoded too so the server message surfaces; a body
    /// that is not the expected JSON is a transport failure.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await.map_err(transport_error)?;

        tracing::debug!("[HttpGateway] {} -> {}", url, status);

        serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                MentorlyError::transport(format!("invalid response from {url}: {e}"))
            } else {
                MentorlyError::transport(format!("{url} returned {status}"))
            }
        })
    }

    fn query(session_id: SessionId, mentee_id: MenteeId) -> [(&'static str, String); 2] {
        [
            ("session_id", session_id.to_string()),
            ("mentee_id", mentee_id.to_string()),
        ]
    }
}

#[async_trait]
impl SessionGateway for HttpSessionGateway {
    async fn start_session(&self, session_id: SessionId) -> Result<()> {
        let path = format!("/api/mentor/session/{session_id}/start");
        let response: ApiResponse = self.send(self.post(&path)).await?;
        response.into_result()
    }

    async fn fetch_records(
        &self,
        session_id: SessionId,
        mentee_id: MenteeId,
    ) -> Result<Vec<(RecordType, Vec<Record>)>> {
        let request = self
            .get("/api/mentor/session/get_records")
            .query(&Self::query(session_id, mentee_id));
        let response: RecordsResponse = self.send(request).await?;
        response.into_records()
    }

    async fn fetch_attendance(
        &self,
        session_id: SessionId,
        mentee_id: MenteeId,
    ) -> Result<AttendanceInfo> {
        let request = self
            .get("/api/mentor/session/get_attendance")
            .query(&Self::query(session_id, mentee_id));
        let response: AttendanceResponse = self.send(request).await?;
        response.into_info()
    }

    async fn set_attendance(
        &self,
        session_id: SessionId,
        mentee_id: MenteeId,
        status: AttendanceStatus,
    ) -> Result<()> {
        let body = AttendanceRequest {
            session_id,
            mentee_id,
            status,
        };
        let request = self.post("/api/mentor/session/attendance").json(&body);
        let response: ApiResponse = self.send(request).await?;
        response.into_result()
    }

    async fn add_record(
        &self,
        session_id: SessionId,
        mentee_id: MenteeId,
        record_type: RecordType,
        record: &Record,
    ) -> Result<()> {
        let body = add_record_body(session_id, mentee_id, record_type, record)?;
        let request = self.post("/api/mentor/session/add_record").json(&body);
        let response: ApiResponse = self.send(request).await?;
        response.into_result()
    }

    async fn add_multi_record(
        &self,
        session_id: SessionId,
        mentee_id: MenteeId,
        record_type: RecordType,
        records: &[Record],
        course_type: Option<String>,
    ) -> Result<()> {
        let body = AddMultiRecordRequest {
            mentee_id,
            session_id,
            form_type: record_type,
            records,
            course_type,
        };
        let request = self.post("/api/mentor/session/add_multi_record").json(&body);
        let response: ApiResponse = self.send(request).await?;
        response.into_result()
    }

    async fn end_session(&self, session_id: SessionId) -> Result<()> {
        let request = self
            .post("/api/mentor/session/end")
            .json(&EndSessionRequest { session_id });
        let response: ApiResponse = self.send(request).await?;
        response.into_result()
    }
}
