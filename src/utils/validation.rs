use crate::utils::error::{ExplorerError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> ExplorerError {
    ExplorerError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 路徑不可為空白，也不可含 NUL 字元
pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    match path {
        "" => Err(invalid(field_name, path, "Path cannot be empty")),
        p if p.contains('\0') => Err(invalid(field_name, p, "Path contains null bytes")),
        _ => Ok(()),
    }
}

/// 頁數等計數設定的下限檢查
pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value >= min_value {
        return Ok(());
    }
    Err(invalid(field_name, value, format!("Value must be at least {}", min_value)))
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(extension) => {}
            Some(extension) => {
                return Err(invalid(
                    field_name,
                    file,
                    format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                ));
            }
            None => {
                return Err(invalid(field_name, file, "File has no extension or invalid filename"));
            }
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    match value {
        Some(value) => Ok(value),
        None => Err(ExplorerError::MissingConfigError {
            field: field_name.to_string(),
        }),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(invalid(field_name, value, format!("Value must be between {} and {}", min, max)))
}

/// 工作階段報告一律寫成 JSON
pub fn validate_report_path(field_name: &str, report_path: &str) -> Result<()> {
    validate_path(field_name, report_path)?;
    validate_file_extensions(field_name, &[report_path.to_string()], &["json"])
}
