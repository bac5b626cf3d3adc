use std::time::Duration;

use tonic::metadata::{Ascii, MetadataKey, MetadataValue};
use tonic::service::Interceptor;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tonic::{Request, Status};
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const TLS_PORT: u16 = 443;

/// Attaches the broker credentials to every outgoing call.
#[derive(Clone)]
pub struct AuthInterceptor {
    entries: Vec<(MetadataKey<Ascii>, MetadataValue<Ascii>)>,
}

impl AuthInterceptor {
    pub fn new(token: &str, app_name: &str) -> Result<Self, String> {
        let headers = [
            ("authorization", format!("Bearer {token}")),
            ("x-app-name", app_name.to_string()),
        ];
        Ok(Self {
            entries: metadata_entries(&headers)?,
        })
    }
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let metadata = request.metadata_mut();
        for (key, value) in &self.entries {
            metadata.insert(key.clone(), value.clone());
        }
        Ok(request)
    }
}

fn metadata_entries(
    headers: &[(&str, String)],
) -> Result<Vec<(MetadataKey<Ascii>, MetadataValue<Ascii>)>, String> {
    headers
        .iter()
        .map(|(key, value)| {
            let lower = key.to_ascii_lowercase();
            let name = MetadataKey::from_bytes(lower.as_bytes())
                .map_err(|err| format!("Invalid metadata key '{key}': {err}"))?;
            let value = MetadataValue::try_from(value.as_str())
                .map_err(|err| format!("Invalid metadata value for '{key}': {err}"))?;
            Ok((name, value))
        })
        .collect()
}

/// Builds the shared channel. No connection is attempted until the first call.
pub fn connect_lazy(target: &str) -> Result<Channel, String> {
    let normalized = normalize_target(target)?;
    let mut endpoint = Endpoint::from_shared(normalized.clone())
        .map_err(|err| format!("Invalid gRPC target {target}: {err}"))?
        .connect_timeout(CONNECT_TIMEOUT);

    if normalized.starts_with("https://") {
        endpoint = endpoint
            .tls_config(ClientTlsConfig::new().with_native_roots())
            .map_err(|err| format!("TLS setup failed for {target}: {err}"))?;
    }

    tracing::debug!("gRPC target resolved to {normalized}");
    Ok(endpoint.connect_lazy())
}

pub(crate) fn normalize_target(target: &str) -> Result<String, String> {
    let target = target.trim();
    if let Some(rest) = target.strip_prefix("grpc://") {
        return Ok(format!("http://{rest}"));
    }
    if let Some(rest) = target.strip_prefix("grpcs://") {
        return Ok(format!("https://{rest}"));
    }

    if target.contains("://") {
        let url = Url::parse(target).map_err(|err| format!("Invalid gRPC target URL: {err}"))?;
        return match url.scheme() {
            "http" | "https" => Ok(url.to_string()),
            other => Err(format!(
                "Unsupported gRPC target scheme '{other}'. Use host:port, grpc://, grpcs://, http://, or https://"
            )),
        };
    }

    // Bare host:port. Port 443 implies TLS.
    let probe = Url::parse(&format!("http://{target}"))
        .map_err(|err| format!("Invalid gRPC target '{target}': {err}"))?;
    if probe.host_str().is_none() {
        return Err(format!("Invalid gRPC target '{target}': missing host"));
    }
    if probe.port() == Some(TLS_PORT) {
        Ok(format!("https://{target}"))
    } else {
        Ok(format!("http://{target}"))
    }
}
