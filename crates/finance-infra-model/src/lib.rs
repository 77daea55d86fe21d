//! CloudFormation model types for Finance infra.
//!
//! This crate provides the template document, intrinsic values, and the typed
//! properties of every resource type the stacks declare. The types are
//! hand-written with serde derives; field names follow CloudFormation's
//! `PascalCase` through `#[serde(rename_all = "PascalCase")]`
//! with explicit renames for the acronym-heavy keys.
#![allow(clippy::struct_excessive_bools)]

pub mod cloudfront;
pub mod cognito;
pub mod dynamodb;
pub mod intrinsic;
pub mod s3;
pub mod ssm;
pub mod tag;
pub mod template;

pub use intrinsic::CfnValue;
pub use tag::Tag;
pub use template::{RemovalPolicy, ResourceDeclaration, ResourceProperties, Template, TemplateOutput};
