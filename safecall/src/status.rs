//! The closed registry of HTTP status codes and their symbolic names.
//!
//! [`StatusName`] is the registry: every variant is one (code, name) pair.
//! Lookups go both ways through exhaustive matches, so neither direction
//! scans the table. Codes outside the registry are unclassified and map to
//! `None`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! status_registry {
    ($($(#[$doc:meta])* $variant:ident = $code:literal => $name:literal,)+) => {
        /// A registered HTTP status. The discriminant is the numeric code.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        #[repr(u16)]
        pub enum StatusName {
            $($(#[$doc])* $variant = $code,)+
        }

        impl StatusName {
            /// Every registry entry, in ascending code order.
            pub const ALL: &'static [StatusName] = &[$(StatusName::$variant,)+];

            /// The symbolic name, e.g. `NOT_FOUND`.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(StatusName::$variant => $name,)+
                }
            }

            /// Reverse lookup. Returns `None` for codes the registry does not know.
            pub const fn from_code(code: u16) -> Option<Self> {
                match code {
                    $($code => Some(StatusName::$variant),)+
                    _ => None,
                }
            }

            fn from_exact_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(StatusName::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

status_registry! {
    /// The initial part of the request was received and not yet rejected.
    Continue = 100 => "CONTINUE",
    /// The server agrees to switch protocols via the `Upgrade` header.
    SwitchingProtocols = 101 => "SWITCHING_PROTOCOLS",
    /// The full request was accepted but is still being processed.
    Processing = 102 => "PROCESSING",
    Ok = 200 => "OK",
    /// A new resource was created.
    Created = 201 => "CREATED",
    /// Accepted for processing; processing has not completed.
    Accepted = 202 => "ACCEPTED",
    /// The payload was modified by a transforming proxy.
    NonAuthoritativeInformation = 203 => "NON_AUTHORITATIVE_INFORMATION",
    NoContent = 204 => "NO_CONTENT",
    ResetContent = 205 => "RESET_CONTENT",
    /// A range request was served.
    PartialContent = 206 => "PARTIAL_CONTENT",
    MultiStatus = 207 => "MULTI_STATUS",
    ImUsed = 226 => "IM_USED",
    MultipleChoices = 300 => "MULTIPLE_CHOICES",
    MovedPermanently = 301 => "MOVED_PERMANENTLY",
    Found = 302 => "FOUND",
    SeeOther = 303 => "SEE_OTHER",
    /// A conditional GET whose condition evaluated to false.
    NotModified = 304 => "NOT_MODIFIED",
    /// Temporary redirect that must keep the request method.
    TemporaryRedirect = 307 => "TEMPORARY_REDIRECT",
    /// Permanent redirect that must keep the request method.
    PermanentRedirect = 308 => "PERMANENT_REDIRECT",
    BadRequest = 400 => "BAD_REQUEST",
    /// Missing or invalid authentication credentials.
    Unauthorized = 401 => "UNAUTHORIZED",
    /// Reserved.
    PaymentRequired = 402 => "PAYMENT_REQUIRED",
    /// Understood, but the server refuses to authorize it.
    Forbidden = 403 => "FORBIDDEN",
    NotFound = 404 => "NOT_FOUND",
    MethodNotAllowed = 405 => "METHOD_NOT_ALLOWED",
    NotAcceptable = 406 => "NOT_ACCEPTABLE",
    ProxyAuthenticationRequired = 407 => "PROXY_AUTHENTICATION_REQUIRED",
    RequestTimeout = 408 => "REQUEST_TIMEOUT",
    /// Conflicts with the current state of the resource.
    Conflict = 409 => "CONFLICT",
    /// Gone, and likely permanently.
    Gone = 410 => "GONE",
    LengthRequired = 411 => "LENGTH_REQUIRED",
    PreconditionFailed = 412 => "PRECONDITION_FAILED",
    PayloadTooLarge = 413 => "PAYLOAD_TOO_LARGE",
    UriTooLong = 414 => "URI_TOO_LONG",
    UnsupportedMediaType = 415 => "UNSUPPORTED_MEDIA_TYPE",
    RangeNotSatisfiable = 416 => "RANGE_NOT_SATISFIABLE",
    ExpectationFailed = 417 => "EXPECTATION_FAILED",
    /// Well-formed content whose instructions could not be processed.
    UnprocessableEntity = 422 => "UNPROCESSABLE_ENTITY",
    Locked = 423 => "LOCKED",
    FailedDependency = 424 => "FAILED_DEPENDENCY",
    UpgradeRequired = 426 => "UPGRADE_REQUIRED",
    PreconditionRequired = 428 => "PRECONDITION_REQUIRED",
    /// Rate limited.
    TooManyRequests = 429 => "TOO_MANY_REQUESTS",
    RequestHeaderFieldsTooLarge = 431 => "REQUEST_HEADER_FIELDS_TOO_LARGE",
    UnavailableForLegalReasons = 451 => "UNAVAILABLE_FOR_LEGAL_REASONS",
    InternalServerError = 500 => "INTERNAL_SERVER_ERROR",
    NotImplemented = 501 => "NOT_IMPLEMENTED",
    /// Invalid response from an upstream server.
    BadGateway = 502 => "BAD_GATEWAY",
    /// Temporary overload or maintenance.
    ServiceUnavailable = 503 => "SERVICE_UNAVAILABLE",
    /// No timely response from an upstream server.
    GatewayTimeout = 504 => "GATEWAY_TIMEOUT",
    HttpVersionNotSupported = 505 => "HTTP_VERSION_NOT_SUPPORTED",
    VariantAlsoNegotiates = 506 => "VARIANT_ALSO_NEGOTIATES",
    InsufficientStorage = 507 => "INSUFFICIENT_STORAGE",
    NetworkAuthenticationRequired = 511 => "NETWORK_AUTHENTICATION_REQUIRED",
}

impl StatusName {
    /// The numeric status code.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// The response class this status belongs to.
    pub const fn class(self) -> StatusClass {
        match self.code() {
            100..=199 => StatusClass::Informational,
            200..=299 => StatusClass::Success,
            300..=399 => StatusClass::Redirection,
            400..=499 => StatusClass::ClientError,
            _ => StatusClass::ServerError,
        }
    }
}

impl std::fmt::Display for StatusName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a string names no registry entry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown HTTP status name: {0}")]
pub struct UnknownStatusName(pub String);

impl FromStr for StatusName {
    type Err = UnknownStatusName;

    /// Accepts the canonical name in any case, with `-` or spaces in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        StatusName::from_exact_name(&normalized).ok_or_else(|| UnknownStatusName(s.to_string()))
    }
}

impl TryFrom<u16> for StatusName {
    type Error = u16;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        StatusName::from_code(code).ok_or(code)
    }
}

/// The five HTTP response classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// 1xx
    Informational,
    /// 2xx
    Success,
    /// 3xx
    Redirection,
    /// 4xx
    ClientError,
    /// 5xx
    ServerError,
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                StatusClass::Informational => "informational",
                StatusClass::Success => "success",
                StatusClass::Redirection => "redirection",
                StatusClass::ClientError => "client_error",
                StatusClass::ServerError => "server_error",
            }
        )
    }
}
