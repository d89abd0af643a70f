//!
//! Base IPP definitions and tags
//!
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use enum_primitive_derive::Primitive;

/// IPP protocol version
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IppVersion(pub u16);

impl IppVersion {
    pub const fn v1_0() -> Self {
        IppVersion(0x0100)
    }
    pub const fn v1_1() -> Self {
        IppVersion(0x0101)
    }
    pub const fn v2_0() -> Self {
        IppVersion(0x0200)
    }

    /// Major version number
    pub fn major(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Minor version number
    pub fn minor(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
}

impl fmt::Display for IppVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

/// IPP operation constants
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Operation {
    PrintJob = 0x0002,
}

/// job-state constants
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq)]
pub enum JobState {
    Pending = 3,
    PendingHeld = 4,
    Processing = 5,
    ProcessingStopped = 6,
    Canceled = 7,
    Aborted = 8,
    Completed = 9,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let keyword = match self {
            JobState::Pending => "pending",
            JobState::PendingHeld => "pending-held",
            JobState::Processing => "processing",
            JobState::ProcessingStopped => "processing-stopped",
            JobState::Canceled => "canceled",
            JobState::Aborted => "aborted",
            JobState::Completed => "completed",
        };
        write!(f, "{}", keyword)
    }
}

/// group delimiter tags
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Primitive, Debug, Copy, Clone, PartialEq, Hash, Eq)]
pub enum DelimiterTag {
    OperationAttributes = 0x01,
    JobAttributes = 0x02,
    EndOfAttributes = 0x03,
    PrinterAttributes = 0x04,
    UnsupportedAttributes = 0x05,
}

/// IPP value tags for the syntaxes this client decodes. Any other tag
/// >= 0x10 on the wire is recognized but unsupported.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ValueTag {
    Integer = 0x21,
    Enum = 0x23,
    TextWithoutLanguage = 0x41,
    Keyword = 0x44,
    Uri = 0x45,
    Charset = 0x47,
    NaturalLanguage = 0x48,
}

/// IPP status codes
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq)]
pub enum StatusCode {
    SuccessfulOk = 0x0000,
    SuccessfulOkIgnoredOrSubstitutedAttributes = 0x0001,
    SuccessfulOkConflictingAttributes = 0x0002,
    ClientErrorBadRequest = 0x0400,
    ClientErrorForbidden = 0x0401,
    ClientErrorNotAuthenticated = 0x0402,
    ClientErrorNotAuthorized = 0x0403,
    ClientErrorNotPossible = 0x0404,
    ClientErrorTimeout = 0x0405,
    ClientErrorNotFound = 0x0406,
    ClientErrorGone = 0x0407,
    ClientErrorRequestEntityTooLong = 0x0408,
    ClientErrorRequestValueTooLong = 0x0409,
    ClientErrorDocumentFormatNotSupported = 0x040A,
    ClientErrorAttributesOrValuesNotSupported = 0x040B,
    ClientErrorUriSchemeNotSupported = 0x040C,
    ClientErrorCharsetNotSupported = 0x040D,
    ClientErrorConflictingAttributes = 0x040E,
    ClientErrorCompressionNotSupported = 0x040F,
    ClientErrorCompressionError = 0x0410,
    ClientErrorDocumentFormatError = 0x0411,
    ClientErrorDocumentAccessError = 0x0412,
    ServerErrorInternalError = 0x0500,
    ServerErrorOperationNotSupported = 0x0501,
    ServerErrorServiceUnavailable = 0x0502,
    ServerErrorVersionNotSupported = 0x0503,
    ServerErrorDeviceError = 0x0504,
    ServerErrorTemporaryError = 0x0505,
    ServerErrorNotAcceptingJobs = 0x0506,
    ServerErrorBusy = 0x0507,
    ServerErrorJobCanceled = 0x0508,
    ServerErrorMultipleDocumentJobsNotSupported = 0x0509,
    UnknownStatusCode = 0xffff,
}

impl StatusCode {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            StatusCode::SuccessfulOk
                | StatusCode::SuccessfulOkIgnoredOrSubstitutedAttributes
                | StatusCode::SuccessfulOkConflictingAttributes
        )
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self {
            StatusCode::SuccessfulOk => "successful-ok",
            StatusCode::SuccessfulOkIgnoredOrSubstitutedAttributes => "ignored or substituted attributes",
            StatusCode::SuccessfulOkConflictingAttributes => "conflicting attributes",
            StatusCode::ClientErrorBadRequest => "bad request",
            StatusCode::ClientErrorForbidden => "forbidden",
            StatusCode::ClientErrorNotAuthenticated => "not authenticated",
            StatusCode::ClientErrorNotAuthorized => "not authorized",
            StatusCode::ClientErrorNotPossible => "not possible",
            StatusCode::ClientErrorTimeout => "timeout",
            StatusCode::ClientErrorNotFound => "not found",
            StatusCode::ClientErrorGone => "gone",
            StatusCode::ClientErrorRequestEntityTooLong => "request entity too long",
            StatusCode::ClientErrorRequestValueTooLong => "request value too long",
            StatusCode::ClientErrorDocumentFormatNotSupported => "document format not supported",
            StatusCode::ClientErrorAttributesOrValuesNotSupported => "attributes or values not supported",
            StatusCode::ClientErrorUriSchemeNotSupported => "uri scheme not supported",
            StatusCode::ClientErrorCharsetNotSupported => "charset not supported",
            StatusCode::ClientErrorConflictingAttributes => "conflicting attributes",
            StatusCode::ClientErrorCompressionNotSupported => "compression not supported",
            StatusCode::ClientErrorCompressionError => "compression error",
            StatusCode::ClientErrorDocumentFormatError => "document format error",
            StatusCode::ClientErrorDocumentAccessError => "document access error",
            StatusCode::ServerErrorInternalError => "internal error",
            StatusCode::ServerErrorOperationNotSupported => "operation not supported",
            StatusCode::ServerErrorServiceUnavailable => "service unavailable",
            StatusCode::ServerErrorVersionNotSupported => "version not supported",
            StatusCode::ServerErrorDeviceError => "device error",
            StatusCode::ServerErrorTemporaryError => "temporary error",
            StatusCode::ServerErrorNotAcceptingJobs => "not accepting jobs",
            StatusCode::ServerErrorBusy => "busy",
            StatusCode::ServerErrorJobCanceled => "job canceled",
            StatusCode::ServerErrorMultipleDocumentJobsNotSupported => "multiple document jobs not supported",
            StatusCode::UnknownStatusCode => "unknown status code",
        };
        write!(f, "{}", message)
    }
}
