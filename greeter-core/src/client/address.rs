//! Parsing of `host:port` addresses into plaintext `tonic` endpoints.
use super::ConnectError;
use tonic::transport::Endpoint;

/// Turns `host:port` or `http://host:port` into an [`Endpoint`].
///
/// A bare `host:port` is treated as `http://host:port`. Any other scheme is rejected, since
/// connections carry no transport security.
pub(super) fn endpoint(addr: &str) -> Result<Endpoint, ConnectError> {
    let addr = addr.trim();

    let uri = match addr.split_once("://") {
        Some(("http", _)) => addr.to_string(),
        Some((scheme, _)) => {
            return Err(ConnectError::UnsupportedScheme {
                address: addr.to_string(),
                scheme: scheme.to_string(),
            });
        }
        None => format!("http://{addr}"),
    };

    let endpoint =
        Endpoint::from_shared(uri).map_err(|source| ConnectError::InvalidAddress {
            address: addr.to_string(),
            source,
        })?;

    if endpoint.uri().port_u16().is_none() {
        return Err(ConnectError::MissingPort(addr.to_string()));
    }

    Ok(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_port_gets_http_scheme() {
        let endpoint = endpoint("localhost:50051").unwrap();

        assert_eq!(endpoint.uri().scheme_str(), Some("http"));
        assert_eq!(endpoint.uri().host(), Some("localhost"));
        assert_eq!(endpoint.uri().port_u16(), Some(50051));
    }

    #[test]
    fn test_explicit_http_scheme_is_kept() {
        let endpoint = endpoint("http://127.0.0.1:8080").unwrap();

        assert_eq!(endpoint.uri().host(), Some("127.0.0.1"));
        assert_eq!(endpoint.uri().port_u16(), Some(8080));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert!(endpoint("  localhost:50051\n").is_ok());
    }

    #[test]
    fn test_https_is_rejected() {
        match endpoint("https://localhost:50051") {
            Err(ConnectError::UnsupportedScheme { scheme, .. }) => assert_eq!(scheme, "https"),
            other => panic!("Expected UnsupportedScheme, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_port_is_rejected() {
        assert!(matches!(
            endpoint("localhost"),
            Err(ConnectError::MissingPort(_))
        ));
    }

    #[test]
    fn test_malformed_address_is_rejected() {
        assert!(matches!(
            endpoint("not a valid address:50051"),
            Err(ConnectError::InvalidAddress { .. })
        ));
    }
}
