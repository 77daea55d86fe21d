//! Configuration loading tests.

#[cfg(test)]
mod tests {
    use finance_infra_core::{ConfigError, InfraConfig};

    use crate::{flat_outputs, sample_document, synthesize_document, write_json};

    #[test]
    fn test_should_fail_load_without_region() {
        let dir = tempfile::tempdir().unwrap();
        let mut document = sample_document();
        document.as_object_mut().unwrap().remove("region");
        let path = write_json(dir.path(), "config.json", &document);

        let err = InfraConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("region"));
    }

    #[test]
    fn test_should_fail_load_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = InfraConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_should_reject_certificate_outside_us_east_1() {
        let mut document = sample_document();
        document["dashboard"]["acm_certificate_arn"] =
            "arn:aws:acm:ap-northeast-1:123456789012:certificate/abc".into();
        let err = InfraConfig::from_json(&document.to_string(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field, .. } if field == "dashboard.acm_certificate_arn"));
    }

    #[test]
    fn test_should_fall_back_to_deployment_account() {
        let mut document = sample_document();
        document.as_object_mut().unwrap().remove("account");

        let config =
            InfraConfig::from_json(&document.to_string(), Some("210987654321".to_owned())).unwrap();
        assert_eq!(config.target.uri(), "aws://210987654321/ap-northeast-1");
    }

    #[test]
    fn test_should_synthesize_account_agnostic_plan() {
        let mut document = sample_document();
        document.as_object_mut().unwrap().remove("account");

        let assembly = synthesize_document(&document, &flat_outputs()).unwrap();
        assert!(
            assembly
                .manifest()
                .stacks
                .iter()
                .all(|s| s.environment == "aws://unknown-account/ap-northeast-1")
        );
    }
}
