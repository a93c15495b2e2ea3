pub const TABLE_NAME_ENV: &str = "DYNAMODB_TABLE";
pub const DEFAULT_TABLE_NAME: &str = "ServerlessBackendTable";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsLambdaConfig {
    pub table_name: String,
}

impl ItemsLambdaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let table_name = lookup(TABLE_NAME_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
        Self { table_name }
    }
}
