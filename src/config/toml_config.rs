use crate::domain::model::{Account, AccountId, User, PAY_IN_LIMIT};
use crate::utils::error::{MoneyboxError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub accounts: Vec<AccountSeed>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

/// One `[[accounts]]` entry: the stored state of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSeed {
    pub id: AccountId,
    pub email: String,
    pub balance: Decimal,
    #[serde(default)]
    pub withdrawn: Decimal,
    #[serde(default)]
    pub paid_in: Decimal,
}

impl AccountSeed {
    pub fn to_account(&self) -> Account {
        Account::new(
            self.id,
            User::new(self.email.clone()),
            self.balance,
            self.withdrawn,
            self.paid_in,
        )
    }
}

impl LedgerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unset
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MoneyboxError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn accounts(&self) -> impl Iterator<Item = Account> + '_ {
        self.accounts.iter().map(AccountSeed::to_account)
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or("info")
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }
}

impl Validate for AccountSeed {
    fn validate(&self) -> Result<()> {
        let field = |name: &str| format!("accounts[{}].{}", self.id, name);

        validation::validate_email(&field("email"), &self.email)?;

        if self.balance < Decimal::ZERO {
            return Err(MoneyboxError::InvalidConfigValueError {
                field: field("balance"),
                value: self.balance.to_string(),
                reason: "Balance cannot be negative".to_string(),
            });
        }

        if self.withdrawn > Decimal::ZERO {
            return Err(MoneyboxError::InvalidConfigValueError {
                field: field("withdrawn"),
                value: self.withdrawn.to_string(),
                reason: "Withdrawn total is recorded as zero or negative".to_string(),
            });
        }

        validation::validate_range(&field("paid_in"), self.paid_in, Decimal::ZERO, PAY_IN_LIMIT)
    }
}

impl Validate for LedgerConfig {
    fn validate(&self) -> Result<()> {
        if let Some(level) = &self.logging.level {
            validation::validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        let mut seen = HashSet::new();
        for seed in &self.accounts {
            if !seen.insert(seed.id) {
                return Err(MoneyboxError::InvalidConfigValueError {
                    field: "accounts".to_string(),
                    value: seed.id.to_string(),
                    reason: "Duplicate account id".to_string(),
                });
            }
            seed.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PAYER: &str = "0b8f4a34-5f43-4a3c-9d2e-6f1d0a7c1b11";
    const PAYEE: &str = "7d1e2c3b-4a59-4e68-8f7a-9b0c1d2e3f40";

    #[test]
    fn test_parse_ledger_config() {
        let toml_content = format!(
            r#"
[logging]
level = "debug"
json = true

[[accounts]]
id = "{PAYER}"
email = "payer@example.com"
balance = "1000"

[[accounts]]
id = "{PAYEE}"
email = "payee@example.com"
balance = "12.50"
withdrawn = "-30"
paid_in = "3900"
"#
        );

        let config = LedgerConfig::from_toml_str(&toml_content).unwrap();

        assert_eq!(config.log_level(), "debug");
        assert!(config.json_logs());
        assert!(!config.verbose());
        assert_eq!(config.accounts.len(), 2);
        assert!(config.validate().is_ok());

        let accounts: Vec<Account> = config.accounts().collect();
        assert_eq!(accounts[0].id(), PAYER.parse().unwrap());
        assert_eq!(accounts[0].paid_in(), Decimal::ZERO);
        assert_eq!(accounts[1].balance(), Decimal::new(1250, 2));
        assert_eq!(accounts[1].withdrawn(), Decimal::from(-30));
        assert_eq!(accounts[1].user().email(), "payee@example.com");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = LedgerConfig::from_toml_str("").unwrap();

        assert_eq!(config.log_level(), "info");
        assert!(!config.json_logs());
        assert!(config.accounts.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MONEYBOX_TEST_PAYER_EMAIL", "env@example.com");

        let toml_content = format!(
            r#"
[[accounts]]
id = "{PAYER}"
email = "${{MONEYBOX_TEST_PAYER_EMAIL}}"
balance = "1"
"#
        );

        let config = LedgerConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(config.accounts[0].email, "env@example.com");

        std::env::remove_var("MONEYBOX_TEST_PAYER_EMAIL");
    }

    #[test]
    fn test_validation_rejects_bad_accounts() {
        let base = AccountSeed {
            id: PAYER.parse().unwrap(),
            email: "payer@example.com".to_string(),
            balance: Decimal::from(10),
            withdrawn: Decimal::ZERO,
            paid_in: Decimal::ZERO,
        };
        assert!(base.validate().is_ok());

        let negative_balance = AccountSeed {
            balance: Decimal::NEGATIVE_ONE,
            ..base.clone()
        };
        assert!(negative_balance.validate().is_err());

        let positive_withdrawn = AccountSeed {
            withdrawn: Decimal::ONE,
            ..base.clone()
        };
        assert!(positive_withdrawn.validate().is_err());

        let over_limit = AccountSeed {
            paid_in: PAY_IN_LIMIT + Decimal::ONE,
            ..base.clone()
        };
        assert!(over_limit.validate().is_err());

        let no_email = AccountSeed {
            email: " ".to_string(),
            ..base.clone()
        };
        assert!(no_email.validate().is_err());

        let duplicated = LedgerConfig {
            logging: LoggingConfig::default(),
            accounts: vec![base.clone(), base],
        };
        let err = duplicated.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate account id"));
    }

    #[test]
    fn test_validation_rejects_unknown_log_level() {
        let config = LedgerConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let err = LedgerConfig::from_toml_str("[[accounts]]\nid = 12\n").unwrap_err();
        assert!(matches!(err, MoneyboxError::TomlError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let toml_content = format!(
            "[[accounts]]\nid = \"{PAYER}\"\nemail = \"file@example.com\"\nbalance = \"5\"\n"
        );
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = LedgerConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.accounts[0].email, "file@example.com");
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = LedgerConfig::from_file("/definitely/not/here/ledger.toml").unwrap_err();
        assert!(matches!(err, MoneyboxError::IoError(_)));
    }
}
