use error_stack::Report;
use thiserror::Error;
use validator::ValidateError;

#[derive(Debug, Error)]
#[error("Invalid given data occurred")]
pub struct Wrapper;

/// Flattens a [`ValidateError`] into a report where every message
/// is attached as `field.path: message`.
pub trait IntoValidatorReport<T> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper>;
}

impl<T> IntoValidatorReport<T> for Result<T, ValidateError> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper> {
        fn read_errors(
            err: &ValidateError,
            path: &mut Vec<String>,
            mut report: Report<Wrapper>,
        ) -> Report<Wrapper> {
            match err {
                ValidateError::Fields(fields) => {
                    for (field, data) in fields {
                        path.push(field.to_string());
                        report = read_errors(data, path, report);
                        path.pop();
                    }
                    report
                }
                ValidateError::Messages(messages) => {
                    let field_str = path.join(".");
                    for message in messages {
                        report = report.attach_printable(format!("{field_str}: {message}"));
                    }
                    report
                }
            }
        }

        self.map_err(|v| read_errors(&v, &mut Vec::new(), Report::new(Wrapper)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_attach_field_paths() {
        let error = ValidateError::field_builder()
            .insert("db", ValidateError::field("url", "Invalid Postgres connection URL"))
            .build();

        let report = Err::<(), _>(error).into_validator_report().unwrap_err();
        let printed = format!("{report:?}");
        assert!(printed.contains("db.url: Invalid Postgres connection URL"));
    }
}
