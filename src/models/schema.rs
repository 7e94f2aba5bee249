//! Row-shape validation shared by every read path.
//!
//! Rows come out of Postgres as loose structs with every column optional.
//! Each row type derives [`validator::Validate`] and converts into its strict
//! model only when the whole batch is clean; one bad row fails the batch.

use validator::ValidationErrors;

use crate::errors::{AppError, ValidationIssue};

/// A loosely-typed row that can be checked and promoted to a strict model.
pub trait ValidatedRow: Sized {
    type Output;

    /// Validate the row, prefixing issue paths with `prefix` (e.g. `posts[2]`).
    fn into_model(self, prefix: &str) -> Result<Self::Output, Vec<ValidationIssue>>;
}

/// Flatten `validator` errors into path-addressed issues, sorted by path.
pub fn issues_from_errors(prefix: &str, errors: &ValidationErrors) -> Vec<ValidationIssue> {
    let mut issues: Vec<ValidationIssue> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let path = format!("{prefix}.{field}");
            field_errors.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                ValidationIssue::new(path.clone(), message)
            })
        })
        .collect();
    issues.sort_by(|a, b| a.path.cmp(&b.path));
    issues
}

/// Validate every row of a batch; any failure rejects the whole batch.
pub fn validate_rows<R: ValidatedRow>(
    collection: &str,
    rows: Vec<R>,
) -> Result<Vec<R::Output>, AppError> {
    let mut models = Vec::with_capacity(rows.len());
    let mut issues = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        match row.into_model(&format!("{collection}[{index}]")) {
            Ok(model) => models.push(model),
            Err(mut row_issues) => issues.append(&mut row_issues),
        }
    }

    if issues.is_empty() {
        Ok(models)
    } else {
        Err(AppError::DataValidation(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(required(message = "id is required"))]
        id: Option<String>,
        #[validate(range(min = 0))]
        count: Option<i64>,
    }

    impl ValidatedRow for Sample {
        type Output = String;

        fn into_model(self, prefix: &str) -> Result<String, Vec<ValidationIssue>> {
            self.validate()
                .map_err(|e| issues_from_errors(prefix, &e))?;
            self.id
                .ok_or_else(|| vec![ValidationIssue::new(format!("{prefix}.id"), "id is required")])
        }
    }

    #[test]
    fn issues_carry_prefixed_paths_and_messages() {
        let sample = Sample {
            id: None,
            count: Some(-1),
        };
        let errors = sample.validate().unwrap_err();
        let issues = issues_from_errors("rows[4]", &errors);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].path, "rows[4].count");
        assert_eq!(issues[0].message, "range");
        assert_eq!(issues[1], ValidationIssue::new("rows[4].id", "id is required"));
    }

    #[test]
    fn validate_rows_accepts_clean_batch() {
        let rows = vec![
            Sample {
                id: Some("a".to_string()),
                count: None,
            },
            Sample {
                id: Some("b".to_string()),
                count: Some(3),
            },
        ];
        let models = validate_rows("rows", rows).unwrap();
        assert_eq!(models, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn validate_rows_rejects_whole_batch_on_one_bad_row() {
        let rows = vec![
            Sample {
                id: Some("a".to_string()),
                count: None,
            },
            Sample {
                id: None,
                count: None,
            },
        ];
        match validate_rows("rows", rows) {
            Err(AppError::DataValidation(issues)) => {
                assert_eq!(issues, vec![ValidationIssue::new("rows[1].id", "id is required")]);
            }
            other => panic!("expected data validation error, got {other:?}"),
        }
    }
}
