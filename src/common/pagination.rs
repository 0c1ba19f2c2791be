// src/common/pagination.rs

use serde::Deserialize;
use utoipa::IntoParams;

use crate::common::error::AppError;

pub const DEFAULT_LIMIT: i64 = 100;

// Query string `?skip=&limit=` usada nas listagens
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }

    /// Devolve `(skip, limit)` já com os padrões, rejeitando valores negativos.
    pub fn window(&self) -> Result<(i64, i64), AppError> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if skip < 0 || limit < 0 {
            return Err(AppError::BadRequest(
                "skip e limit não podem ser negativos".to_string(),
            ));
        }
        Ok((skip, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_hundred() {
        assert_eq!(Pagination::default().window().unwrap(), (0, 100));
    }

    #[test]
    fn rejects_negative_window() {
        assert!(Pagination::new(-1, 10).window().is_err());
        assert!(Pagination::new(0, -5).window().is_err());
    }
}
