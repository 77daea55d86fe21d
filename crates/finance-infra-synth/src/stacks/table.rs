//! Dashboard table stack.

use finance_infra_core::{DashboardConfig, DeployEnvironment};
use finance_infra_model::dynamodb::{PrimaryKey, ScalarAttributeType, TableProperties};
use finance_infra_model::{RemovalPolicy, Tag};
use tracing::info;
use typed_builder::TypedBuilder;

use crate::error::SynthResult;
use crate::stack::Stack;

/// Name of the table stack.
pub const TABLE_STACK_NAME: &str = "stack-finance-dashboard-infra-dynamodb";

const DESCRIPTION: &str = "DynamoDB table for Finance Dashboard Backend";
const CREATED: &str = "20251109";
const NAME_TAG: &str = "dashboard-dynamodb";

const TABLE_ID: &str = "DashboardTable";

/// Partition key attribute name.
pub const PARTITION_KEY: &str = "pk";
/// Sort key attribute name.
pub const SORT_KEY: &str = "sk";

/// Inputs of the table stack.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct TableStackProps {
    /// Physical table name.
    #[builder(setter(into))]
    pub table_name: String,
    /// Environment label for tagging.
    #[builder(setter(into))]
    pub environment: String,
}

impl TableStackProps {
    /// Slice the table settings out of the configuration document.
    #[must_use]
    pub fn from_config(dashboard: &DashboardConfig, environment: &str) -> Self {
        Self {
            table_name: dashboard.dynamodb_table_name.clone(),
            environment: environment.to_owned(),
        }
    }
}

/// The synthesized table stack.
#[derive(Debug, Clone)]
pub struct TableStack {
    stack: Stack,
}

impl TableStack {
    /// Declare the `pk`/`sk` table.
    pub fn new(props: &TableStackProps, target: DeployEnvironment) -> SynthResult<Self> {
        let mut stack = Stack::new(
            TABLE_STACK_NAME,
            target,
            Some(DESCRIPTION.to_owned()),
            vec![
                Tag::new("Environment", &props.environment),
                Tag::new("Created", CREATED),
                Tag::new("Name", NAME_TAG),
            ],
        );

        let key = PrimaryKey {
            partition: (PARTITION_KEY.to_owned(), ScalarAttributeType::S),
            sort: Some((SORT_KEY.to_owned(), ScalarAttributeType::S)),
        };
        let table = stack.add_resource(
            TABLE_ID,
            TableProperties::on_demand(&props.table_name, &key),
            Some(RemovalPolicy::Retain),
        )?;

        stack.add_output("TableName", table.reference(), Some("Dashboard table name"))?;
        stack.add_output("TableArn", table.attribute("Arn"), Some("Dashboard table ARN"))?;

        info!(
            stack = TABLE_STACK_NAME,
            table = %props.table_name,
            "constructed table stack"
        );
        Ok(Self { stack })
    }


    /// The underlying stack.
    #[must_use]
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Consume into the underlying stack.
    #[must_use]
    pub fn into_stack(self) -> Stack {
        self.stack
    }
}

#[cfg(test)]
mod tests {
    use finance_infra_core::AwsRegion;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_should_declare_composite_key_on_demand_table() {
        let props = TableStackProps::builder()
            .table_name("finance-dash")
            .environment("prod")
            .build();
        let table = TableStack::new(
            &props,
            DeployEnvironment::new(None, AwsRegion::new("ap-northeast-1")),
        )
        .unwrap();

        let decl = &table.stack().template().resources[TABLE_ID];
        assert_eq!(decl.resource_type, "AWS::DynamoDB::Table");
        assert_eq!(decl.properties["TableName"], "finance-dash");
        assert_eq!(
            decl.properties["KeySchema"],
            json!([
                {"AttributeName": "pk", "KeyType": "HASH"},
                {"AttributeName": "sk", "KeyType": "RANGE"}
            ])
        );
        assert_eq!(
            decl.properties["AttributeDefinitions"],
            json!([
                {"AttributeName": "pk", "AttributeType": "S"},
                {"AttributeName": "sk", "AttributeType": "S"}
            ])
        );
        assert_eq!(decl.properties["BillingMode"], "PAY_PER_REQUEST");
        assert_eq!(
            decl.properties["PointInTimeRecoverySpecification"]["PointInTimeRecoveryEnabled"],
            true
        );
        assert_eq!(decl.deletion_policy, Some(RemovalPolicy::Retain));
    }

    #[test]
    fn test_should_have_no_cross_stack_links() {
        let props = TableStackProps::builder()
            .table_name("finance-dash")
            .environment("prod")
            .build();
        let table = TableStack::new(
            &props,
            DeployEnvironment::new(None, AwsRegion::new("ap-northeast-1")),
        )
        .unwrap();
        assert!(table.stack().imports().is_empty());
        assert!(table.stack().published_parameters().is_empty());
        assert!(table.stack().external_dependencies().is_empty());
    }
}
