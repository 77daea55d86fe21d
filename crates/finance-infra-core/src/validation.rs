//! Field-level validation for the configuration document.
//!
//! Each check returns a [`ConfigError::Invalid`] naming the dotted field path,
//! so a bad document is rejected before any stack is declared.

use std::net::Ipv4Addr;

use crate::error::{ConfigError, ConfigResult};
use crate::types::AwsRegion;

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

/// Maximum SSM parameter hierarchy depth (including the leaf name).
const MAX_PARAMETER_DEPTH: usize = 15;

/// Prefixes and suffixes S3 reserves for its own use.
const RESERVED_BUCKET_PREFIXES: [&str; 2] = ["xn--", "sthree-"];
const RESERVED_BUCKET_SUFFIXES: [&str; 2] = ["-s3alias", "--ol-s3"];

/// Reject an empty (or all-whitespace) required string.
pub fn require_non_empty(field: &'static str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField(field));
    }
    Ok(())
}

/// Validate an S3 bucket name against the general-purpose bucket naming rules.
///
/// # Examples
///
/// ```
/// use finance_infra_core::validation::validate_bucket_name;
///
/// assert!(validate_bucket_name("dashboard.bucket", "finance-dashboard-site").is_ok());
/// assert!(validate_bucket_name("dashboard.bucket", "AB").is_err());
/// ```
pub fn validate_bucket_name(field: &'static str, name: &str) -> ConfigResult<()> {
    let len = name.len();
    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
        return Err(ConfigError::invalid(
            field,
            format!("bucket name must be {MIN_BUCKET_NAME_LEN}-{MAX_BUCKET_NAME_LEN} characters"),
        ));
    }

    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
    {
        return Err(ConfigError::invalid(
            field,
            "bucket name may only contain lowercase letters, digits, hyphens, and dots",
        ));
    }

    let alnum = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    let bytes = name.as_bytes();
    if !alnum(bytes[0]) || !alnum(bytes[len - 1]) {
        return Err(ConfigError::invalid(
            field,
            "bucket name must start and end with a letter or digit",
        ));
    }

    if name.contains("..") {
        return Err(ConfigError::invalid(
            field,
            "bucket name must not contain consecutive dots",
        ));
    }

    if name.parse::<Ipv4Addr>().is_ok() {
        return Err(ConfigError::invalid(
            field,
            "bucket name must not look like an IP address",
        ));
    }

    if let Some(prefix) = RESERVED_BUCKET_PREFIXES.iter().find(|p| name.starts_with(**p)) {
        return Err(ConfigError::invalid(
            field,
            format!("bucket name must not start with '{prefix}'"),
        ));
    }
    if let Some(suffix) = RESERVED_BUCKET_SUFFIXES.iter().find(|s| name.ends_with(**s)) {
        return Err(ConfigError::invalid(
            field,
            format!("bucket name must not end with '{suffix}'"),
        ));
    }

    Ok(())
}

/// Validate the parameter-namespace prefix used for published identifiers.
///
/// The prefix must be an absolute hierarchy path (`/a/b`) without a trailing
/// slash, leaving room for one more level beneath it.
pub fn validate_parameter_prefix(field: &'static str, prefix: &str) -> ConfigResult<()> {
    if !prefix.starts_with('/') {
        return Err(ConfigError::invalid(field, "prefix must start with '/'"));
    }
    if prefix == "/" {
        return Err(ConfigError::invalid(field, "prefix must name at least one level"));
    }
    if prefix.ends_with('/') {
        return Err(ConfigError::invalid(field, "prefix must not end with '/'"));
    }
    if prefix.contains("//") {
        return Err(ConfigError::invalid(field, "prefix must not contain empty segments"));
    }
    if !prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '.' | '-'))
    {
        return Err(ConfigError::invalid(
            field,
            "prefix may only contain letters, digits, '/', '_', '.', and '-'",
        ));
    }
    let depth = prefix.split('/').filter(|s| !s.is_empty()).count();
    if depth + 1 > MAX_PARAMETER_DEPTH {
        return Err(ConfigError::invalid(
            field,
            format!("prefix is deeper than {} levels", MAX_PARAMETER_DEPTH - 1),
        ));
    }
    Ok(())
}

/// Validate an ACM certificate ARN usable as a CloudFront viewer certificate.
///
/// CloudFront only accepts certificates issued in `us-east-1`.
pub fn validate_certificate_arn(field: &'static str, arn: &str) -> ConfigResult<()> {
    // arn:<partition>:acm:<region>:<account>:certificate/<id>
    let parts: Vec<&str> = arn.splitn(6, ':').collect();
    let [scheme, _partition, service, region, account, resource] = parts.as_slice() else {
        return Err(ConfigError::invalid(field, "not an ARN"));
    };
    if *scheme != "arn" || *service != "acm" {
        return Err(ConfigError::invalid(field, "not an ACM certificate ARN"));
    }
    if *region != AwsRegion::CLOUDFRONT_CERTIFICATE_REGION {
        return Err(ConfigError::invalid(
            field,
            format!(
                "CloudFront certificates must be issued in {}, got '{region}'",
                AwsRegion::CLOUDFRONT_CERTIFICATE_REGION
            ),
        ));
    }
    if account.len() != 12 || !account.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::invalid(field, "ARN account must be 12 digits"));
    }
    match resource.strip_prefix("certificate/") {
        Some(id) if !id.is_empty() => Ok(()),
        _ => Err(ConfigError::invalid(field, "ARN resource must be 'certificate/<id>'")),
    }
}

/// Normalize a CloudFront origin path.
///
/// An empty path means "serve from the bucket root". Otherwise the path must
/// start with `/`; a trailing `/` is dropped because CloudFront rejects it.
pub fn normalize_origin_path(field: &'static str, path: &str) -> ConfigResult<String> {
    if path.is_empty() || path == "/" {
        return Ok(String::new());
    }
    if !path.starts_with('/') {
        return Err(ConfigError::invalid(field, "origin path must start with '/'"));
    }
    Ok(path.trim_end_matches('/').to_owned())
}

/// Validate a bare DNS name used as a distribution alias.
pub fn validate_domain_name(field: &'static str, domain: &str) -> ConfigResult<()> {
    if domain.contains("://") || domain.contains('/') {
        return Err(ConfigError::invalid(
            field,
            "domain name must not include a scheme or path",
        ));
    }
    let valid_label = |label: &str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    };
    if domain.len() > 253 || !domain.contains('.') || !domain.split('.').all(valid_label) {
        return Err(ConfigError::invalid(field, "not a valid DNS name"));
    }
    Ok(())
}
