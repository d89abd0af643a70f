//!
//! Minimal IPP Print-Job client for Rust. This crate submits a single print
//! job to an IPP printer or print server over HTTP and decodes the response
//! into a list of named, typed attributes. It can be used in two ways:
//! * using the built-in blocking HTTP client (`client` feature, enabled by default).
//! * serializing the request manually and sending it with any HTTP client.
//!
//! Only the Print-Job operation is implemented. The decoder understands the
//! integer, enum, textWithoutLanguage, keyword, uri, charset and
//! naturalLanguage syntaxes; values of any other syntax are consumed and kept
//! as raw bytes so one unknown attribute never aborts the parse.
//!
//! Usage example:
//!
//!```rust,no_run
//! use std::io::BufReader;
//! use printjob::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let uri: Uri = "ipp://localhost:631/printers/test-printer".parse()?;
//!     let mut request = IppRequestResponse::new(
//!         IppVersion::v1_1(),
//!         Operation::PrintJob,
//!         Some(&uri),
//!         Charset::UsAscii,
//!     );
//!     *request.payload_mut() =
//!         IppPayload::new(BufReader::new(std::fs::File::open("document.pdf")?));
//!
//!     let client = IppClient::new(uri);
//!     let response = client.send(request)?;
//!     if response.header().status_code().is_success() {
//!         println!("{:?}", response.attributes());
//!     }
//!     Ok(())
//! }
//!```

use bytes::{BufMut, Bytes, BytesMut};
use num_traits::FromPrimitive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{IppVersion, StatusCode};

pub mod attribute;
pub mod charset;
#[cfg(feature = "client")]
pub mod client;
pub mod error;
pub mod model;
pub mod parser;
pub mod payload;
pub mod reader;
pub mod request;
pub mod value;

pub mod prelude {
    //!
    //! Common imports
    //!
    pub use http::Uri;
    pub use num_traits::FromPrimitive as _;

    pub use crate::{
        attribute::{IppAttribute, IppAttributeGroup, IppAttributes},
        charset::Charset,
        model::*,
        parser::{IppParser, UnknownTagPolicy},
        payload::IppPayload,
        request::IppRequestResponse,
        value::IppValue,
    };

    pub use super::error::IppError;

    #[cfg(feature = "client")]
    pub use super::client::IppClient;

    pub use super::IppHeader;
}

/// IPP request and response header
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct IppHeader {
    /// IPP protocol version
    pub version: IppVersion,
    /// Operation tag for requests, status for responses
    pub operation_or_status: u16,
    /// ID of the request
    pub request_id: u32,
}

impl IppHeader {
    /// Create IPP header
    pub fn new(version: IppVersion, operation_or_status: u16, request_id: u32) -> IppHeader {
        IppHeader {
            version,
            operation_or_status,
            request_id,
        }
    }

    /// Write header to a byte array
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::new();
        buffer.put_u16(self.version.0);
        buffer.put_u16(self.operation_or_status);
        buffer.put_u32(self.request_id);

        buffer.freeze()
    }

    /// Decode and get IPP status code from the header
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.operation_or_status).unwrap_or(StatusCode::UnknownStatusCode)
    }
}
