//! Executing `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the seam between the I/O-free core and whatever HTTP stack
//! the host runs. Implementations must return 4xx/5xx answers as
//! `HttpResponse` data and reserve `Err` for requests that never got an
//! answer; status interpretation belongs to the `parse_*` methods.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use ureq::typestate::WithBody;
    use ureq::{Agent, RequestBuilder};

    use super::Transport;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};

    /// Blocking transport backed by a ureq agent.
    ///
    /// The agent keeps a cookie jar, so the session cookie set by
    /// `/auth/login` rides along on every credentialed request. Requests
    /// with `include_credentials == false` go through a second agent whose
    /// jar never sees the session.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: Agent,
        anonymous: Agent,
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl UreqTransport {
        pub fn new() -> Self {
            Self {
                agent: new_agent(),
                anonymous: new_agent(),
            }
        }
    }

    /// Disables ureq's status-code-as-error behavior so 4xx/5xx come back
    /// as data.
    fn new_agent() -> Agent {
        Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent()
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            let agent = if request.include_credentials {
                &self.agent
            } else {
                &self.anonymous
            };
            let url = request.path.as_str();
            let body = request.body.as_ref().map(RequestBody::as_bytes);

            let result = match request.method {
                HttpMethod::Get => {
                    let mut builder = agent.get(url);
                    for (name, value) in &request.headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    builder.call()
                }
                HttpMethod::Delete => {
                    let mut builder = agent.delete(url);
                    for (name, value) in &request.headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    builder.call()
                }
                HttpMethod::Post => send(agent.post(url), request, body),
                HttpMethod::Put => send(agent.put(url), request, body),
                HttpMethod::Patch => send(agent.patch(url), request, body),
            };
            let mut response = result.map_err(|e| ApiError::Transport(Box::new(e)))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_string(), value.to_string()))
                })
                .collect();
            let bytes = response
                .body_mut()
                .read_to_vec()
                .map_err(|e| ApiError::Transport(Box::new(e)))?;
            // The bytes arrived; anything unreadable in them is a decode failure.
            let body = String::from_utf8(bytes)
                .map_err(|e| ApiError::Deserialization(e.to_string()))?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    fn send(
        mut builder: RequestBuilder<WithBody>,
        request: &HttpRequest,
        body: Option<&[u8]>,
    ) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        match body {
            Some(bytes) => builder.send(bytes),
            None => builder.send_empty(),
        }
    }
}
