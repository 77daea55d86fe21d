//! Template contents of each synthesized stack, read back from disk.

#[cfg(test)]
mod tests {
    use finance_infra_synth::stacks::{AUTH_STACK_NAME, SITE_STACK_NAME, TABLE_STACK_NAME};
    use serde_json::{Value, json};

    use crate::{flat_outputs, read_template, sample_document, synthesize_document};

    fn written_templates() -> (tempfile::TempDir, Value, Value, Value) {
        let dir = tempfile::tempdir().unwrap();
        synthesize_document(&sample_document(), &flat_outputs())
            .unwrap()
            .write_to(dir.path())
            .unwrap();
        let auth = read_template(dir.path(), AUTH_STACK_NAME);
        let table = read_template(dir.path(), TABLE_STACK_NAME);
        let site = read_template(dir.path(), SITE_STACK_NAME);
        (dir, auth, table, site)
    }

    fn resources_of_type<'a>(template: &'a Value, resource_type: &str) -> Vec<&'a Value> {
        template["Resources"]
            .as_object()
            .unwrap()
            .values()
            .filter(|r| r["Type"] == resource_type)
            .collect()
    }

    #[test]
    fn test_should_publish_parameters_under_prefix() {
        let (_dir, auth, _, _) = written_templates();
        let mut names: Vec<&str> = resources_of_type(&auth, "AWS::SSM::Parameter")
            .into_iter()
            .map(|p| p["Properties"]["Name"].as_str().unwrap())
            .collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "/finance/common/client_id",
                "/finance/common/client_secret",
                "/finance/common/user_pool_id",
            ]
        );
        for parameter in resources_of_type(&auth, "AWS::SSM::Parameter") {
            assert_eq!(parameter["Properties"]["Type"], "String");
            assert_eq!(parameter["Properties"]["Tier"], "Standard");
        }
    }

    #[test]
    fn test_should_keep_client_secret_out_of_outputs() {
        let (_dir, auth, _, _) = written_templates();
        let outputs = auth["Outputs"].as_object().unwrap();
        assert_eq!(
            outputs.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["UserPoolClientId", "UserPoolId"]
        );
        assert_eq!(
            auth["Resources"]["ClientSecretParameter"]["Properties"]["Value"],
            json!({"Fn::GetAtt": ["FinanceCommonUserPoolClient", "ClientSecret"]})
        );
    }

    #[test]
    fn test_should_retain_user_pool_and_table() {
        let (_dir, auth, table, site) = written_templates();
        assert_eq!(auth["Resources"]["FinanceCommonUserPool"]["DeletionPolicy"], "Retain");
        assert_eq!(table["Resources"]["DashboardTable"]["DeletionPolicy"], "Retain");
        assert_eq!(site["Resources"]["SiteBucket"]["DeletionPolicy"], "Retain");
    }

    #[test]
    fn test_should_declare_on_demand_table_with_composite_key() {
        let (_dir, _, table, _) = written_templates();
        let properties = &table["Resources"]["DashboardTable"]["Properties"];
        assert_eq!(properties["TableName"], "finance-dash");
        assert_eq!(
            properties["KeySchema"],
            json!([
                {"AttributeName": "pk", "KeyType": "HASH"},
                {"AttributeName": "sk", "KeyType": "RANGE"}
            ])
        );
        assert_eq!(properties["BillingMode"], "PAY_PER_REQUEST");
        assert_eq!(
            properties["PointInTimeRecoverySpecification"],
            json!({"PointInTimeRecoveryEnabled": true})
        );
        assert_eq!(
            properties["Tags"],
            json!([
                {"Key": "Created", "Value": "20251109"},
                {"Key": "Environment", "Value": "prod"},
                {"Key": "Name", "Value": "dashboard-dynamodb"}
            ])
        );
    }

    #[test]
    fn test_should_serve_site_through_distribution() {
        let (_dir, _, _, site) = written_templates();
        let config = &site["Resources"]["SiteDistribution"]["Properties"]["DistributionConfig"];
        assert_eq!(config["Aliases"], json!(["dashboard.finance.example.com"]));
        assert_eq!(config["DefaultRootObject"], "index.html");
        assert_eq!(config["Origins"][0]["OriginPath"], "/dist");
        assert_eq!(config["ViewerCertificate"]["SslSupportMethod"], "sni-only");
        assert_eq!(config["CacheBehaviors"][0]["PathPattern"], "/api/*");
        assert_eq!(
            site["Outputs"]["SiteUrl"]["Value"],
            "https://dashboard.finance.example.com"
        );
    }
}
