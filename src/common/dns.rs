use std::collections::HashMap;
use std::future::Future;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::ProtoErrorKind;
use hickory_resolver::{ResolveError, TokioResolver};
use thiserror::Error;
use tracing::{debug, trace};

use super::domain;

/// Resolver failure. Absence of records is never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("timeout")]
    Timeout,
    #[error("SERVFAIL: server failure")]
    ServFail,
    #[error("REFUSED: query refused")]
    Refused,
    #[error("no name servers reachable")]
    NoConnections,
    #[error("DNS error: {0}")]
    Other(String),
}

/// DNS resolver trait for abstracting DNS lookups.
///
/// Implementations answer an empty `Vec` for NXDOMAIN and NODATA; `Err` is
/// reserved for resolution that could not complete.
pub trait DnsResolver: Clone + Send + Sync + 'static {
    fn query_txt(&self, domain: &str) -> impl Future<Output = Result<Vec<String>, LookupError>> + Send;
    /// MX exchange hostnames, lowest preference first, without the trailing dot.
    fn query_mx(&self, domain: &str) -> impl Future<Output = Result<Vec<String>, LookupError>> + Send;
}

/// MX exchange hostnames for `domain`. An empty result means no MX is published.
pub async fn lookup_mx<R: DnsResolver>(resolver: &R, domain: &str) -> Result<Vec<String>, LookupError> {
    let name = domain::normalize(domain);
    debug!(domain = %name, "looking up MX records");

    let hosts = resolver.query_mx(&name).await?;
    trace!(domain = %name, count = hosts.len(), "MX records");
    Ok(hosts)
}

/// Hickory DNS resolver implementation
#[derive(Clone)]
pub struct HickoryResolver {
    resolver: TokioResolver,
}

impl HickoryResolver {
    /// Resolver using the system configuration with overridden options.
    pub fn from_system_conf_with_opts(opts: ResolverOpts) -> Result<Self, ResolveError> {
        let resolver = TokioResolver::builder_tokio()?.with_options(opts).build();
        Ok(Self { resolver })
    }

    pub fn with_config(config: ResolverConfig, opts: ResolverOpts) -> Self {
        let resolver = TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(opts)
            .build();
        Self { resolver }
    }

    /// `None` means the error only signals that no records exist.
    ///
    /// Hickory reports SERVFAIL, REFUSED and other failure codes as
    /// `NoRecordsFound` too, so only NXDOMAIN and NOERROR count as absence.
    fn classify_error(e: &ResolveError) -> Option<LookupError> {
        match e.proto().map(|p| p.kind()) {
            Some(ProtoErrorKind::NoRecordsFound { response_code, .. }) => {
                return match *response_code {
                    ResponseCode::NoError | ResponseCode::NXDomain => None,
                    ResponseCode::ServFail => Some(LookupError::ServFail),
                    ResponseCode::Refused => Some(LookupError::Refused),
                    code => Some(LookupError::Other(format!("response code {code}"))),
                };
            }
            Some(ProtoErrorKind::Timeout) => return Some(LookupError::Timeout),
            _ => {}
        }

        let msg = e.to_string().to_lowercase();
        if msg.contains("no connections available") {
            Some(LookupError::NoConnections)
        } else if msg.contains("timed out") || msg.contains("timeout") {
            Some(LookupError::Timeout)
        } else {
            Some(LookupError::Other(e.to_string()))
        }
    }
}

impl DnsResolver for HickoryResolver {
    async fn query_txt(&self, domain: &str) -> Result<Vec<String>, LookupError> {
        match self.resolver.txt_lookup(domain).await {
            Ok(lookup) => Ok(lookup.iter().map(|txt| txt.to_string()).collect()),
            Err(e) => match Self::classify_error(&e) {
                Some(err) => Err(err),
                None => Ok(Vec::new()),
            },
        }
    }

    async fn query_mx(&self, domain: &str) -> Result<Vec<String>, LookupError> {
        match self.resolver.mx_lookup(domain).await {
            Ok(lookup) => {
                let mut records: Vec<(u16, String)> = lookup
                    .iter()
                    .map(|mx| (mx.preference(), mx.exchange().to_string().trim_end_matches('.').to_string()))
                    .collect();
                records.sort_by_key(|(pref, _)| *pref);
                Ok(records.into_iter().map(|(_, host)| host).collect())
            }
            Err(e) => match Self::classify_error(&e) {
                Some(err) => Err(err),
                None => Ok(Vec::new()),
            },
        }
    }
}

/// Mock DNS resolver for testing
#[derive(Clone, Default)]
pub struct MockResolver {
    txt_records: HashMap<String, Result<Vec<String>, LookupError>>,
    mx_records: HashMap<String, Result<Vec<String>, LookupError>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_txt(mut self, domain: &str, records: Vec<&str>) -> Self {
        let records = records.into_iter().map(String::from).collect();
        self.txt_records.insert(domain.to_lowercase(), Ok(records));
        self
    }

    pub fn with_txt_err(mut self, domain: &str, err: LookupError) -> Self {
        self.txt_records.insert(domain.to_lowercase(), Err(err));
        self
    }

    pub fn with_mx(mut self, domain: &str, hosts: Vec<&str>) -> Self {
        let hosts = hosts.into_iter().map(String::from).collect();
        self.mx_records.insert(domain.to_lowercase(), Ok(hosts));
        self
    }

    pub fn with_mx_err(mut self, domain: &str, err: LookupError) -> Self {
        self.mx_records.insert(domain.to_lowercase(), Err(err));
        self
    }
}

impl DnsResolver for MockResolver {
    async fn query_txt(&self, domain: &str) -> Result<Vec<String>, LookupError> {
        self.txt_records
            .get(&domain.to_lowercase())
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn query_mx(&self, domain: &str) -> Result<Vec<String>, LookupError> {
        self.mx_records
            .get(&domain.to_lowercase())
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
