use crate::config::RemoverConfig;
use crate::error::RemoverError;
use crate::source::FileSource;

/// Checks run on an upload before any byte of it is read.
pub fn check_upload<F: FileSource>(file: &F, config: &RemoverConfig) -> Result<(), RemoverError> {
    check_mime_type(&file.mime_type(), config)?;
    check_size(file.size(), config)
}

pub fn check_mime_type(mime_type: &str, config: &RemoverConfig) -> Result<(), RemoverError> {
    // Browsers may append parameters, e.g. "application/pdf; charset=binary".
    let essence = mime_type.split(';').next().unwrap_or_default().trim();
    let accepted = config
        .accepted_mime_types
        .iter()
        .any(|m| m.eq_ignore_ascii_case(essence));

    if accepted {
        Ok(())
    } else {
        Err(RemoverError::InvalidType {
            mime_type: mime_type.to_string(),
        })
    }
}

pub fn check_size(size: u64, config: &RemoverConfig) -> Result<(), RemoverError> {
    if size > config.max_file_size {
        return Err(RemoverError::TooLarge {
            size,
            limit: config.max_file_size,
        });
    }
    Ok(())
}
