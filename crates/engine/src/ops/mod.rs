use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod categories;
mod items;
mod sub_categories;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Entry point for every catalog operation.
///
/// The engine holds no state besides the connection pool, so it can be
/// shared behind an `Arc` by any number of request handlers.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// Trimmed `value`, rejecting blank input.
fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<String>, label: &str) -> ResultEngine<Option<String>> {
    value
        .map(|value| normalize_required_text(&value, label))
        .transpose()
}

/// Amounts (tax, base amount, discount) must be finite and non-negative.
fn validate_amount(value: f64, label: &str) -> ResultEngine<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "{label} must be a non-negative number"
        )));
    }
    Ok(value)
}

fn validate_optional_amount(value: Option<f64>, label: &str) -> ResultEngine<Option<f64>> {
    value.map(|value| validate_amount(value, label)).transpose()
}

/// Tax to store: zero unless tax is applicable.
fn applicable_tax(is_tax_applicable: bool, tax: f64) -> f64 {
    if is_tax_applicable { tax } else { 0.0 }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        tracing::debug!("catalog engine ready");
        Ok(Engine {
            database: self.database,
        })
    }
}
