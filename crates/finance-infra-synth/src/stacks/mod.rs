//! The three stacks of the application.

mod auth;
mod site;
mod table;

pub use auth::{
    AUTH_STACK_NAME, AuthStack, AuthStackProps, CLIENT_ID_PARAMETER, CLIENT_SECRET_PARAMETER,
    USER_POOL_ID_PARAMETER,
};
pub use site::{API_PATH_PATTERN, SITE_STACK_NAME, SiteStack, SiteStackProps};
pub use table::{PARTITION_KEY, SORT_KEY, TABLE_STACK_NAME, TableStack, TableStackProps};
