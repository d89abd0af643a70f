//!
//! Command-line utility to submit a document to an IPP printer and display
//! the decoded response
//!

#![allow(clippy::result_large_err)]

use std::{
    fs,
    io::{self, BufReader},
    path::PathBuf,
    time::Duration,
};

use clap::Parser;

use printjob::prelude::*;

#[derive(Parser)]
#[clap(about = "IPP Print-Job utility", name = "printjob", rename_all = "kebab-case")]
struct PrintParams {
    #[clap(help = "Printer URI (ipp, ipps, http or https scheme)")]
    uri: String,

    #[clap(
        long = "file",
        short = 'f',
        help = "Input file name to print [default: standard input]"
    )]
    file: Option<PathBuf>,

    #[clap(
        long = "charset",
        short = 'c',
        default_value = "us-ascii",
        help = "Charset for string attributes: us-ascii or utf-8"
    )]
    charset: Charset,

    #[clap(
        long = "timeout",
        short = 't',
        help = "Request timeout in seconds, default = no timeout"
    )]
    timeout: Option<u64>,

    #[clap(long = "header", short = 'H', help = "Extra HTTP headers in key=value format")]
    headers: Vec<String>,

    #[clap(
        long = "status-only",
        short = 's',
        help = "Print only the IPP status code of the response"
    )]
    status_only: bool,
}

fn new_client(uri: Uri, params: &PrintParams) -> IppClient {
    let mut builder = IppClient::builder(uri);
    if let Some(timeout) = params.timeout {
        builder = builder.request_timeout(Duration::from_secs(timeout));
    }

    for param in &params.headers {
        if let Some((k, v)) = param.split_once('=') {
            builder = builder.http_header(k, v);
        }
    }

    builder.build()
}

fn new_payload(params: &PrintParams) -> io::Result<IppPayload> {
    let payload = match params.file {
        Some(ref filename) => IppPayload::new(BufReader::new(fs::File::open(filename)?)),
        None => IppPayload::new(BufReader::new(io::stdin())),
    };
    Ok(payload)
}

fn display_value(attr: &IppAttribute) -> String {
    if attr.name() == IppAttribute::JOB_STATE {
        if let Some(state) = attr.value().as_enum().and_then(|v| JobState::from_i32(*v)) {
            return format!("{} ({})", attr.value(), state);
        }
    }
    attr.value().to_string()
}

fn do_print(params: &PrintParams) -> Result<(), IppError> {
    let uri: Uri = params.uri.parse()?;
    let client = new_client(uri.clone(), params);

    let mut request = IppRequestResponse::new(
        IppVersion::v1_1(),
        Operation::PrintJob,
        Some(&uri),
        params.charset,
    );
    *request.payload_mut() = new_payload(params).map_err(IppError::from)?;

    let response = client.send(request)?;
    let header = response.header();

    if params.status_only {
        println!("ipp status: {:04X}", header.operation_or_status);
        return Ok(());
    }

    println!("version {}", header.version);
    println!("status {:04X} ({})", header.operation_or_status, header.status_code());
    println!("request id {}", header.request_id);

    for group in response.attributes().groups() {
        println!("group {:02X}", group.tag());
        for attr in group.attributes() {
            println!("  {} ({:#04x}) = {}", attr.name(), attr.value().to_tag(), display_value(attr));
        }
    }

    let status = header.status_code();
    if !status.is_success() {
        return Err(IppError::StatusError(status));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let params = PrintParams::parse();
    do_print(&params)?;
    Ok(())
}
