use thiserror::Error;

/// A failure raised by the data layer while serving a request.
///
/// `Query` covers malformed statements and schema lookups (SQLSTATE class
/// 42 and sqlx column/type resolution); everything else is `Database`. The
/// distinction only changes the report wording.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{message}")]
    Query { message: String, code: Option<String> },

    #[error("{message}")]
    Database { message: String, code: Option<String> },
}

impl DataError {
    pub fn code(&self) -> Option<&str> {
        match self {
            DataError::Query { code, .. } | DataError::Database { code, .. } => code.as_deref(),
        }
    }

    fn class(&self) -> &'static str {
        match self {
            DataError::Query { .. } => "query/schema",
            DataError::Database { .. } => "data layer",
        }
    }

    /// Text returned to the client: fixed notice, original error, code.
    pub fn report(&self) -> String {
        format!(
            "Database error ({}). Please, contact the administrator.\nInformation: {}\nerror code: {}",
            self.class(),
            self,
            self.code().unwrap_or("none")
        )
    }
}

impl From<sqlx::Error> for DataError {
    fn from(err: sqlx::Error) -> Self {
        let message = err.to_string();
        match &err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.into_owned());
                if code.as_deref().is_some_and(|c| c.starts_with("42")) {
                    DataError::Query { message, code }
                } else {
                    DataError::Database { message, code }
                }
            }
            sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::TypeNotFound { .. } => DataError::Query {
                message,
                code: None,
            },
            _ => DataError::Database {
                message,
                code: None,
            },
        }
    }
}
