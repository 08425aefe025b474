//! Report generation.

use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::error::CoinbaseError;
use crate::rest::endpoints::{private, segment};
use crate::rest::{CoinbaseRestClient, Method, Param, Params, Transport};
use crate::types::codec;
use crate::types::{ReportFormat, ReportType};

/// A generated or pending report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Report {
    /// Report ID.
    pub id: String,
    /// Report type.
    #[serde(rename = "type")]
    pub report_type: ReportType,
    /// Creation time.
    #[serde(with = "codec::timestamp")]
    pub created_at: OffsetDateTime,
    /// Completion time.
    #[serde(default, with = "codec::timestamp::option")]
    pub completed_at: Option<OffsetDateTime>,
    /// When the download link expires.
    #[serde(default, with = "codec::timestamp::option")]
    pub expires_at: Option<OffsetDateTime>,
    /// `pending`, `creating`, `ready` or `failed`.
    pub status: String,
    /// Requesting user.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Download link, once ready.
    #[serde(default)]
    pub file_url: Option<String>,
    /// Parameters the report was generated with.
    #[serde(default)]
    pub params: Option<ReportParams>,
    /// Number of files.
    #[serde(default)]
    pub file_count: Option<String>,
}

/// Parameters of a [`Report`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportParams {
    /// Start of the covered period.
    #[serde(default, with = "codec::timestamp::option")]
    pub start_date: Option<OffsetDateTime>,
    /// End of the covered period.
    #[serde(default, with = "codec::timestamp::option")]
    pub end_date: Option<OffsetDateTime>,
    /// Output format.
    #[serde(default)]
    pub format: Option<ReportFormat>,
    /// Product filter.
    #[serde(default)]
    pub product_id: Option<String>,
    /// Account filter.
    #[serde(default)]
    pub account_id: Option<String>,
    /// Profile filter.
    #[serde(default)]
    pub profile_id: Option<String>,
    /// Notification address.
    #[serde(default)]
    pub email: Option<String>,
    /// Requesting user.
    #[serde(default)]
    pub user: Option<ReportUser>,
    /// Whether the user is a New York state resident.
    #[serde(default)]
    pub new_york_state: Option<bool>,
}

/// User details embedded in [`ReportParams`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportUser {
    /// User ID.
    pub id: String,
    /// Account creation time.
    #[serde(default, with = "codec::timestamp::option")]
    pub created_at: Option<OffsetDateTime>,
    /// First activity.
    #[serde(default, with = "codec::timestamp::option")]
    pub active_at: Option<OffsetDateTime>,
    /// Name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Roles.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Whether the user is banned.
    #[serde(default)]
    pub is_banned: bool,
    /// User type.
    #[serde(default)]
    pub user_type: Option<String>,
    /// Whether the user meets current onboarding requirements.
    #[serde(default)]
    pub fulfills_new_requirements: Value,
    /// Feature flags.
    #[serde(default)]
    pub flags: Value,
    /// Free-form details.
    #[serde(default)]
    pub details: Value,
    /// Preferences.
    #[serde(default)]
    pub preferences: Value,
    /// Whether a default profile exists.
    #[serde(default)]
    pub has_default: bool,
    /// State or region code.
    #[serde(default)]
    pub state_code: Option<String>,
    /// Whether the data came from cache.
    #[serde(default)]
    pub cb_data_from_cache: Option<bool>,
    /// Second factor method.
    #[serde(default)]
    pub two_factor_method: Option<String>,
    /// Legal name.
    #[serde(default)]
    pub legal_name: Option<String>,
    /// When the terms were accepted.
    #[serde(default, with = "codec::timestamp::option")]
    pub terms_accepted: Option<OffsetDateTime>,
    /// Pending clawback payment.
    #[serde(default)]
    pub has_clawback_payment_pending: Option<bool>,
    /// Restricted assets held.
    #[serde(default)]
    pub has_restricted_assets: Option<bool>,
}

/// Acknowledgement of a report request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportCreated {
    /// Report ID; poll [`CoinbaseRestClient::get_report`] with it.
    pub id: String,
    /// Report type.
    #[serde(rename = "type")]
    pub report_type: ReportType,
    /// Initial status.
    pub status: String,
}

/// Filters for [`CoinbaseRestClient::get_reports`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportsRequest {
    /// Only reports of this portfolio.
    pub portfolio_id: Option<String>,
    /// Only reports created after this time.
    pub after: Option<OffsetDateTime>,
    /// Maximum number of results.
    pub limit: u32,
    /// Report type.
    pub report_type: ReportType,
    /// Skip expired reports.
    pub ignore_expired: bool,
}

impl Default for ReportsRequest {
    fn default() -> Self {
        Self {
            portfolio_id: None,
            after: None,
            limit: 100,
            report_type: ReportType::Fills,
            ignore_expired: true,
        }
    }
}

impl ReportsRequest {
    /// Create a request listing fills reports.
    pub fn new() -> Self {
        Self::default()
    }

    /// List reports of this type.
    pub fn report_type(mut self, report_type: ReportType) -> Self {
        self.report_type = report_type;
        self
    }

    /// Set the result limit.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Only reports created after this time.
    pub fn after(mut self, after: OffsetDateTime) -> Self {
        self.after = Some(after);
        self
    }
}

/// A report to generate with [`CoinbaseRestClient::create_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    /// Report type.
    pub report_type: ReportType,
    /// Start of the covered period.
    pub start_date: Option<OffsetDateTime>,
    /// End of the covered period.
    pub end_date: Option<OffsetDateTime>,
    /// Tax year, for 1099-K reports.
    pub year: Option<String>,
    /// Output format.
    pub format: ReportFormat,
    /// Product filter; `ALL` for every product.
    pub product_id: String,
    /// Account filter; `ALL` for every account.
    pub account_id: String,
    /// Notification address.
    pub email: Option<String>,
    /// Profile to report on.
    pub profile_id: Option<String>,
}

impl NewReport {
    /// Report of `report_type` over all products and accounts, as PDF.
    pub fn new(report_type: ReportType) -> Self {
        Self {
            report_type,
            start_date: None,
            end_date: None,
            year: None,
            format: ReportFormat::Pdf,
            product_id: "ALL".to_string(),
            account_id: "ALL".to_string(),
            email: None,
            profile_id: None,
        }
    }

    /// Cover `[start, end]`.
    pub fn period(mut self, start: OffsetDateTime, end: OffsetDateTime) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Set the tax year.
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Set the output format.
    pub fn format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Restrict to one product.
    pub fn product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = product_id.into();
        self
    }

    /// Restrict to one account.
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = account_id.into();
        self
    }

    /// Email the report when ready.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Report on a specific profile.
    pub fn profile_id(mut self, profile_id: impl Into<String>) -> Self {
        self.profile_id = Some(profile_id.into());
        self
    }
}

impl<T: Transport> CoinbaseRestClient<T> {
    /// Get a single report.
    pub async fn get_report(&self, report_id: &str) -> Result<Report, CoinbaseError> {
        let path = format!("{}/{}", private::REPORTS, segment(report_id));
        self.dispatch(Method::Get, &path, None).await
    }

    /// List reports.
    pub async fn get_reports(&self, request: &ReportsRequest) -> Result<Vec<Report>, CoinbaseError> {
        let path = Params::new()
            .insert("portfolio_id", request.portfolio_id.clone())
            .insert("after", request.after.as_ref().map(codec::rfc3339_param).transpose()?)
            .insert("limit", request.limit)
            .insert("type", Param::converted(Some(request.report_type), codec::display_param))
            .insert("ignore_expired", request.ignore_expired)
            .path_with_query(private::REPORTS)?;

        self.dispatch(Method::Get, &path, None).await
    }

    /// Request a report. Generation is asynchronous; poll with
    /// [`get_report`](Self::get_report).
    pub async fn create_report(&self, report: &NewReport) -> Result<ReportCreated, CoinbaseError> {
        let body = Params::new()
            .insert("start_date", Param::converted(report.start_date, codec::timestamp_param))
            .insert("end_date", Param::converted(report.end_date, codec::timestamp_param))
            .insert("type", Param::converted(Some(report.report_type), codec::display_param))
            .insert("year", report.year.clone())
            .insert("format", Param::converted(Some(report.format), codec::display_param))
            .insert("product_id", report.product_id.as_str())
            .insert("account_id", report.account_id.as_str())
            .insert("email", report.email.clone())
            .insert("profile_id", report.profile_id.clone())
            .to_body();

        self.dispatch(Method::Post, private::REPORTS, Some(body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::mock::{MockTransport, mock_client};
    use time::macros::datetime;

    #[tokio::test]
    async fn test_create_report() {
        let body = r#"{"id":"0428b97b","type":"fills","status":"pending"}"#;
        let client = mock_client(MockTransport::with_response(200, body));
        let report = NewReport::new(ReportType::Fills)
            .period(datetime!(2021-01-01 0:00 UTC), datetime!(2021-01-02 0:00 UTC))
            .format(ReportFormat::Csv);

        let created = client.create_report(&report).await.unwrap();

        assert_eq!(created.report_type, ReportType::Fills);
        assert_eq!(created.status, "pending");
        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.body.as_deref(),
            Some(
                r#"{"start_date":1609459200000,"end_date":1609545600000,"type":"fills","format":"csv","product_id":"ALL","account_id":"ALL"}"#
            )
        );
    }

    #[tokio::test]
    async fn test_get_reports_query() {
        let client = mock_client(MockTransport::with_response(200, "[]"));
        let request = ReportsRequest::new().report_type(ReportType::Account).limit(5);

        client.get_reports(&request).await.unwrap();

        assert_eq!(
            client.transport().last_request().unwrap().path,
            "/reports?limit=5&type=account&ignore_expired=true"
        );
    }

    #[tokio::test]
    async fn test_get_report_with_params() {
        let body = r#"{
            "id": "0428b97b",
            "type": "account",
            "created_at": "2021-03-01T12:00:00Z",
            "completed_at": "2021-03-01T12:00:05Z",
            "expires_at": "2021-03-08T12:00:05Z",
            "status": "ready",
            "user_id": "u1",
            "file_url": "https://example.com/report.csv",
            "params": {
                "start_date": "2021-01-01T00:00:00Z",
                "end_date": "2021-02-01T00:00:00Z",
                "format": "csv",
                "product_id": "ALL",
                "account_id": "ALL",
                "user": {"id": "u1", "name": "Test", "roles": [], "is_banned": false, "has_default": true}
            }
        }"#;
        let client = mock_client(MockTransport::with_response(200, body));

        let report = client.get_report("0428b97b").await.unwrap();

        assert_eq!(report.report_type, ReportType::Account);
        let params = report.params.unwrap();
        assert_eq!(params.format, Some(ReportFormat::Csv));
        assert_eq!(params.user.unwrap().name.as_deref(), Some("Test"));
        assert_eq!(client.transport().last_request().unwrap().path, "/reports/0428b97b");
    }
}
