//! Optional semantic oracle for subjective adequacy checks.
//!
//! The oracle is best-effort. [`consult`] bounds every attempt with a timeout,
//! retries at most once, and degrades to an indeterminate outcome (counted as
//! passed, flagged for manual review) whenever the oracle is missing or fails.

use std::time::Duration;

use dpr_config::{OracleConfig, RETRY_CAP};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::catalog::Verdict;
use crate::error::OracleError;

/// Characters of subsection text included in a prompt.
pub const EXCERPT_CHARS: usize = 500;

/// One adequacy question about one subsection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRequest {
    pub check_id: String,
    pub subsection: String,
    pub question: String,
    pub excerpt: String,
}

impl OracleRequest {
    #[must_use]
    pub fn new(
        check_id: impl Into<String>,
        subsection: impl Into<String>,
        question: impl Into<String>,
        body: &str,
    ) -> Self {
        Self {
            check_id: check_id.into(),
            subsection: subsection.into(),
            question: question.into(),
            excerpt: body.chars().take(EXCERPT_CHARS).collect(),
        }
    }

    /// Prompt text sent to the oracle.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "{}\n\n{} section:\n{}\n\nAnswer with PASS or FAIL followed by a one-sentence reason.",
            self.question, self.subsection, self.excerpt
        )
    }
}

/// A decided oracle answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleVerdict {
    pub pass: bool,
    pub reason: String,
}

/// Judge of subsection adequacy. Implementations must be safe to share across
/// concurrent section validations.
pub trait SemanticOracle: Send + Sync {
    fn judge(&self, request: OracleRequest) -> BoxFuture<'_, Result<OracleVerdict, OracleError>>;
}

/// Timeout and retry budget for oracle calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleSettings {
    pub timeout: Duration,
    pub max_retries: u32,
}

impl OracleSettings {
    #[must_use]
    pub fn from_config(config: &OracleConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            max_retries: config.effective_retries(),
        }
    }
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self::from_config(&OracleConfig::default())
    }
}

/// Ask the oracle, degrading to [`Verdict::indeterminate`] on absence, error, or timeout.
pub async fn consult(
    oracle: Option<&dyn SemanticOracle>,
    request: OracleRequest,
    settings: OracleSettings,
) -> Verdict {
    let Some(oracle) = oracle else {
        return Verdict::indeterminate(format!(
            "{}: semantic oracle not configured; manual review needed",
            request.subsection
        ));
    };

    let attempts = settings.max_retries.min(RETRY_CAP) + 1;
    for attempt in 1..=attempts {
        let error = match tokio::time::timeout(settings.timeout, oracle.judge(request.clone())).await
        {
            Ok(Ok(verdict)) => {
                let message = format!("{}: {}", request.subsection, verdict.reason.trim());
                return if verdict.pass {
                    Verdict::pass(message)
                } else {
                    Verdict::fail(message)
                };
            }
            Ok(Err(error)) => error,
            Err(_) => OracleError::Timeout(settings.timeout.as_millis()),
        };
        tracing::warn!(check = %request.check_id, attempt, %error, "oracle attempt failed");
    }

    Verdict::indeterminate(format!(
        "{}: semantic oracle unavailable; manual review needed",
        request.subsection
    ))
}

// ---------------------------------------------------------------------------
// HTTP oracle
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct OraclePayload<'a> {
    model: &'a str,
    prompt: String,
}

#[derive(Debug, Deserialize)]
struct OracleAnswer {
    verdict: String,
    #[serde(default)]
    reason: String,
}

impl OracleAnswer {
    fn into_verdict(self) -> Result<OracleVerdict, OracleError> {
        let head = self.verdict.trim_start().to_ascii_uppercase();
        let pass = if head.starts_with("PASS") {
            true
        } else if head.starts_with("FAIL") {
            false
        } else {
            return Err(OracleError::Malformed(self.verdict));
        };
        let reason = if self.reason.trim().is_empty() {
            self.verdict.trim().to_string()
        } else {
            self.reason
        };
        Ok(OracleVerdict { pass, reason })
    }
}

/// Return the response unchanged on success, otherwise [`OracleError::Api`].
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, OracleError> {
    if !resp.status().is_success() {
        return Err(OracleError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Oracle reached over HTTP: POSTs `{model, prompt}` and reads `{verdict, reason}`.
pub struct HttpOracle {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpOracle {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &OracleConfig) -> Result<Self, OracleError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("dprv/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let api_key = Some(config.api_key.trim())
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }
}

impl SemanticOracle for HttpOracle {
    fn judge(&self, request: OracleRequest) -> BoxFuture<'_, Result<OracleVerdict, OracleError>> {
        async move {
            let payload = OraclePayload {
                model: &self.model,
                prompt: request.prompt(),
            };
            let mut builder = self.http.post(&self.endpoint).json(&payload);
            if let Some(key) = &self.api_key {
                builder = builder.bearer_auth(key);
            }
            let resp = check_response(builder.send().await?).await?;
            let answer: OracleAnswer = resp.json().await?;
            answer.into_verdict()
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use dpr_core::CheckOutcome;
    use pretty_assertions::assert_eq;

    use super::*;

    struct Fixed(bool);

    impl SemanticOracle for Fixed {
        fn judge(&self, _: OracleRequest) -> BoxFuture<'_, Result<OracleVerdict, OracleError>> {
            let verdict = OracleVerdict {
                pass: self.0,
                reason: "judged".into(),
            };
            async move { Ok(verdict) }.boxed()
        }
    }

    #[derive(Default)]
    struct Broken {
        calls: AtomicUsize,
    }

    impl SemanticOracle for Broken {
        fn judge(&self, _: OracleRequest) -> BoxFuture<'_, Result<OracleVerdict, OracleError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            async { Err(OracleError::Malformed("maybe".into())) }.boxed()
        }
    }

    struct Slow;

    impl SemanticOracle for Slow {
        fn judge(&self, _: OracleRequest) -> BoxFuture<'_, Result<OracleVerdict, OracleError>> {
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(OracleVerdict {
                    pass: false,
                    reason: "too late".into(),
                })
            }
            .boxed()
        }
    }

    fn request() -> OracleRequest {
        OracleRequest::new("C1.2", "Cluster Profile", "Is it adequate?", "The cluster...")
    }

    fn fast() -> OracleSettings {
        OracleSettings {
            timeout: Duration::from_millis(20),
            max_retries: 1,
        }
    }

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[test]
    fn excerpt_is_truncated_by_chars() {
        let body = "₹".repeat(600);
        let request = OracleRequest::new("C1.2", "Cluster Profile", "q", &body);
        assert_eq!(request.excerpt.chars().count(), EXCERPT_CHARS);
        assert!(request.prompt().contains("Cluster Profile section:"));
    }

    #[tokio::test]
    async fn missing_oracle_is_indeterminate() {
        let verdict = consult(None, request(), fast()).await;
        assert_eq!(verdict.outcome, CheckOutcome::Indeterminate);
        assert!(verdict.message.contains("manual review needed"));
    }

    #[tokio::test]
    async fn oracle_verdicts_pass_through() {
        let verdict = consult(Some(&Fixed(true)), request(), fast()).await;
        assert_eq!(verdict, Verdict::pass("Cluster Profile: judged"));
        let verdict = consult(Some(&Fixed(false)), request(), fast()).await;
        assert_eq!(verdict.outcome, CheckOutcome::Fail);
    }

    #[tokio::test]
    async fn errors_retry_once_then_degrade() {
        let oracle = Broken::default();
        let settings = OracleSettings {
            max_retries: 7,
            ..fast()
        };
        let verdict = consult(Some(&oracle), request(), settings).await;
        assert_eq!(verdict.outcome, CheckOutcome::Indeterminate);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn timeouts_degrade() {
        let verdict = consult(Some(&Slow), request(), fast()).await;
        assert_eq!(verdict.outcome, CheckOutcome::Indeterminate);
        assert!(verdict.outcome.passed());
    }

    #[test]
    fn answers_must_start_with_pass_or_fail() {
        let answer = OracleAnswer {
            verdict: " pass - well described".into(),
            reason: String::new(),
        };
        let verdict = answer.into_verdict().unwrap();
        assert!(verdict.pass);
        assert_eq!(verdict.reason, "pass - well described");

        let answer = OracleAnswer {
            verdict: "Unsure".into(),
            reason: "no idea".into(),
        };
        assert!(matches!(answer.into_verdict(), Err(OracleError::Malformed(_))));
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let err = check_response(mock_response(503, "overloaded")).await.unwrap_err();
        assert!(matches!(err, OracleError::Api { status: 503, ref message } if message == "overloaded"));
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }

    #[test]
    fn settings_follow_config() {
        let config = OracleConfig {
            timeout_secs: 3,
            max_retries: 9,
            ..OracleConfig::default()
        };
        let settings = OracleSettings::from_config(&config);
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.max_retries, 1);
    }

    #[test]
    fn http_oracle_ignores_blank_key() {
        let config = OracleConfig {
            api_key: "   ".into(),
            endpoint: "http://localhost:9/judge".into(),
            ..OracleConfig::default()
        };
        let oracle = HttpOracle::new(&config).unwrap();
        assert!(oracle.api_key.is_none());
        assert_eq!(oracle.model, "gemini-2.0-flash-exp");
    }
}
