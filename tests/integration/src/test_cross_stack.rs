//! Cross-stack output resolution tests.

#[cfg(test)]
mod tests {
    use finance_infra_core::InfraConfig;
    use finance_infra_synth::stacks::SITE_STACK_NAME;
    use finance_infra_synth::{StackOutputRegistry, SynthError, synthesize};
    use serde_json::json;

    use crate::{
        BACKEND_API_URL, BACKEND_STACK, flat_outputs, sample_document, synthesize_document,
        write_json,
    };

    #[test]
    fn test_should_fail_for_nonexistent_backend_and_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cdk.out");
        let mut document = sample_document();
        document["dashboard"]["backend_stack_name"] = "nonexistent-stack".into();

        let err = match synthesize_document(&document, &flat_outputs()) {
            Ok(assembly) => {
                assembly.write_to(&out).unwrap();
                panic!("synthesis should fail for an unknown backend stack");
            }
            Err(err) => err,
        };
        assert!(err.is_cross_stack());
        assert!(err.to_string().contains("nonexistent-stack"));
        assert!(!out.exists());
    }

    #[test]
    fn test_should_fail_without_any_outputs() {
        let err = synthesize_document(&sample_document(), &json!({})).unwrap_err();
        assert!(matches!(err, SynthError::UnresolvedStack { .. }));
    }

    #[test]
    fn test_should_honor_custom_output_key() {
        let mut document = sample_document();
        document["dashboard"]["backend_api_output_key"] = "HttpApiUrl".into();
        let outputs = json!({ BACKEND_STACK: { "HttpApiUrl": "https://api.finance.example.com" } });

        let assembly = synthesize_document(&document, &outputs).unwrap();
        let site = assembly.template(SITE_STACK_NAME).unwrap();
        assert_eq!(
            site.outputs["ApiUrl"].value.as_literal(),
            Some("https://api.finance.example.com")
        );
    }

    #[test]
    fn test_should_read_describe_stacks_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let described = json!({
            "Stacks": [{
                "StackName": BACKEND_STACK,
                "Outputs": [
                    {"OutputKey": "ApiUrl", "OutputValue": BACKEND_API_URL, "Description": "API"}
                ]
            }]
        });
        let config_path = write_json(dir.path(), "config.json", &sample_document());
        let outputs_path = write_json(dir.path(), "outputs.json", &described);

        let config = InfraConfig::load(config_path).unwrap();
        let registry = StackOutputRegistry::load(outputs_path).unwrap();
        let assembly = synthesize(&config, &registry).unwrap();

        let site = assembly.template(SITE_STACK_NAME).unwrap();
        let api_origin = &site.resources["SiteDistribution"].properties["DistributionConfig"]
            ["Origins"][1];
        assert_eq!(api_origin["DomainName"], "abc123.execute-api.ap-northeast-1.amazonaws.com");
        assert_eq!(api_origin["OriginPath"], "/Prod");
    }

    #[test]
    fn test_should_reject_malformed_outputs_file() {
        let err = StackOutputRegistry::from_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, SynthError::OutputsFormat(_)));
    }
}
