use crate::addr::ResolvedAddr;
use crate::base::cancel::ContextError;
use crate::base::error::{Error, ExecError, LookupError};
use std::io;

#[test]
fn test_exec_error_wrapped_with_prefix() {
    let err = Error::Exec(ExecError::ExitStatus {
        code: 1,
        stderr: "ERROR! No Consul servers found.".into(),
    });
    assert_eq!(
        err.to_string(),
        "failed to retrieve IP addresses from executable: \
         executable failed with exit code 1: ERROR! No Consul servers found."
    );
}

#[test]
fn test_dns_error_names_host() {
    let err = Error::Dns {
        host: "invalidDNSname".into(),
        source: LookupError::NoAddresses,
    };
    assert_eq!(
        err.to_string(),
        "failed to resolve DNS name: invalidDNSname: no addresses returned"
    );
}

#[test]
fn test_invalid_address_message() {
    let parse_err = "172.25.16.77:8080".parse::<ResolvedAddr>().unwrap_err();
    let err = ExecError::from(parse_err);
    assert_eq!(
        err.to_string(),
        "executable returned invalid IP address: 172.25.16.77:8080"
    );
}

#[test]
fn test_launch_error_keeps_os_cause() {
    let err = ExecError::Launch {
        command: "sample_scripts/not_found.sh".into(),
        source: io::Error::from(io::ErrorKind::NotFound),
    };
    assert!(err.to_string().starts_with("sample_scripts/not_found.sh: "));

    let source = std::error::Error::source(&err).expect("launch error has a source");
    let io_err = source.downcast_ref::<io::Error>().unwrap();
    assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn test_context_error_lookup() {
    let dns = Error::Dns {
        host: "example.com".into(),
        source: LookupError::Context(ContextError::Canceled),
    };
    assert_eq!(dns.context_error(), Some(ContextError::Canceled));

    let exec = Error::Exec(ExecError::Context(ContextError::DeadlineExceeded));
    assert_eq!(exec.context_error(), Some(ContextError::DeadlineExceeded));

    let other = Error::Exec(ExecError::NoOutput);
    assert_eq!(other.context_error(), None);
}
