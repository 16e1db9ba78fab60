use std::io;

use assay_common::asset::AssetType;
use assay_core::detector::Detector;
use assay_core::error::{DetectError, DnsError};

use crate::util::{FakeTransport, Reply, detector};

/*************************************************************
                     Exclusive categories
**************************************************************/

#[test]
fn exclusive_categories_never_touch_dns() {
    let transport = FakeTransport::always(Reply::noerror());
    let detector = detector(&[], &transport);

    let cases = [
        ("192.0.2.1", AssetType::IP),
        ("192.0.2.1/32", AssetType::IP),
        ("2001:db8::1", AssetType::IP),
        ("2001:db8::1/128", AssetType::IP),
        ("192.0.2.0/24", AssetType::IPRange),
        ("arn:aws:iam::123456789012:root", AssetType::AWSAccount),
        ("docker.io/library/busybox", AssetType::DockerImage),
        ("registry.hub.docker.com/library/debian", AssetType::DockerImage),
        ("https://github.com/adevinta/vulcan-types.git", AssetType::GitRepository),
    ];

    for (identifier, expected) in cases {
        assert_eq!(detector.detect(identifier).unwrap(), vec![expected], "{identifier}");
    }
    assert!(transport.calls().is_empty());
}

#[test]
fn bare_image_name_takes_the_composite_path() {
    let transport = FakeTransport::zones(&[]);
    let detector = detector(&[], &transport);

    assert!(detector.detect("debian").unwrap().is_empty());
    assert_eq!(transport.calls().len(), 1);
}

#[test]
fn other_arns_are_not_accounts() {
    let transport = FakeTransport::zones(&[]);
    let detector = detector(&[], &transport);

    let arn = "arn:aws:s3:::my_corporate_bucket/exampleobject.png";
    assert!(detector.detect(arn).unwrap().is_empty());
}

/*************************************************************
                       Composite path
**************************************************************/

#[test]
fn resolvable_apex_is_hostname_and_domain() {
    let transport = FakeTransport::zones(&["example.com."]);
    let detector = detector(&["example.com"], &transport);

    assert_eq!(
        detector.detect("example.com").unwrap(),
        vec![AssetType::Hostname, AssetType::DomainName]
    );
}

#[test]
fn web_address_uses_its_host() {
    let transport = FakeTransport::zones(&[]);
    let detector = detector(&["www.example.com"], &transport);

    assert_eq!(
        detector.detect("https://www.example.com/login?next=/").unwrap(),
        vec![AssetType::Hostname, AssetType::WebAddress]
    );
    assert_eq!(transport.calls()[0].question, "www.example.com.");
}

#[test]
fn web_address_host_keeps_its_case() {
    let transport = FakeTransport::zones(&[]);
    let detector = detector(&["WWW.Example.com"], &transport);

    assert_eq!(
        detector.detect("http://WWW.Example.com/").unwrap(),
        vec![AssetType::Hostname, AssetType::WebAddress]
    );
    assert_eq!(transport.calls()[0].question, "WWW.Example.com.");
}

#[test]
fn numeric_web_host_is_not_rewritten() {
    let transport = FakeTransport::zones(&[]);
    let detector = detector(&["127.0.0.1"], &transport);

    assert!(detector.detect("http://0x7f.1/").unwrap().is_empty());
    assert_eq!(transport.calls()[0].question, "0x7f.1.");
}

#[test]
fn numeric_shorthand_is_not_a_hostname() {
    let transport = FakeTransport::zones(&[]);
    let detector = detector(&["31337", "192.168.1"], &transport);

    assert!(detector.detect("31337").unwrap().is_empty());
    assert!(detector.detect("192.168.1").unwrap().is_empty());
}

#[test]
fn web_address_on_apex_gets_all_three() {
    let transport = FakeTransport::zones(&["example.com."]);
    let detector = detector(&["example.com"], &transport);

    assert_eq!(
        detector.detect("http://example.com").unwrap(),
        vec![AssetType::Hostname, AssetType::WebAddress, AssetType::DomainName]
    );
}

#[test]
fn web_address_needs_a_resolvable_host() {
    let transport = FakeTransport::zones(&["example.com."]);
    let detector = detector(&[], &transport);

    assert_eq!(
        detector.detect("https://example.com/").unwrap(),
        vec![AssetType::DomainName]
    );
}

#[test]
fn unresolvable_non_apex_has_no_type() {
    let transport = FakeTransport::zones(&[]);
    let detector = detector(&[], &transport);

    assert_eq!(detector.detect("nothing.example.invalid").unwrap(), Vec::<AssetType>::new());
}

#[test]
fn dns_failure_discards_partial_result() {
    let transport = FakeTransport::new(|_, _, _| {
        Err(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"))
    });
    let detector = detector(&["www.example.com"], &transport);

    let err = detector.detect("https://www.example.com/").unwrap_err();
    let DetectError::Domain(cause) = &err;
    assert!(matches!(cause, DnsError::Transport { .. }));
    assert_eq!(err.to_string(), "cannot guess if the asset is a domain");
}

/*************************************************************
                    Repetition and batches
**************************************************************/

#[test]
fn detection_is_idempotent() {
    let transport = FakeTransport::zones(&["example.com."]);
    let detector = detector(&["example.com", "www.example.com"], &transport);

    for identifier in ["https://www.example.com", "example.com", "192.0.2.0/24", "junk"] {
        let first = detector.detect(identifier).unwrap();
        let second = detector.detect(identifier).unwrap();
        assert_eq!(first, second, "{identifier}");
    }
}

#[test]
fn batch_matches_single_detection() -> anyhow::Result<()> {
    let transport = FakeTransport::zones(&["example.com."]);
    let detector = detector(&["example.com", "www.example.com"], &transport);
    let identifiers: Vec<String> = [
        "example.com",
        "https://www.example.com/",
        "192.0.2.7",
        "10.0.0.0/8",
        "nothing.invalid",
    ]
    .iter()
    .map(|identifier| identifier.to_string())
    .collect();

    let batch = detector.detect_all(&identifiers, None);

    assert_eq!(batch.len(), identifiers.len());
    for (identifier, result) in identifiers.iter().zip(batch) {
        assert_eq!(result?, detector.detect(identifier)?, "{identifier}");
    }
    Ok(())
}

#[test]
fn offline_detector_makes_no_queries() {
    let detector = Detector::offline();

    assert_eq!(
        detector.detect("https://www.example.com/").unwrap(),
        vec![AssetType::Hostname, AssetType::WebAddress]
    );
    assert_eq!(detector.detect("192.0.2.0/24").unwrap(), vec![AssetType::IPRange]);
    assert!(detector.detect("intranet").unwrap().is_empty());
}
