pub const SERVICE_NAME: &str = "Fitness Membership Classifier";

/// Prefix for environment overrides (`FITCLASS__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "FITCLASS";
/// Environment variable holding an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "FITCLASS_CONFIG";
/// Base name of the config file looked up when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "fitclass";

// OpenAPI tags
pub const SYSTEM_TAG: &str = "system";
pub const PREDICTION_TAG: &str = "prediction";

// Feature column names
pub const BMI: &str = "bmi";
pub const AGE_GROUP: &str = "age_group";
pub const FITNESS_RISK: &str = "fitness_risk";
pub const INCOME_CATEGORY: &str = "income_category";
pub const CITY_TIER: &str = "city_tier";
pub const INCOME_LPA: &str = "income_lpa";
pub const OCCUPATION: &str = "occupation";
