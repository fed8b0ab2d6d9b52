use crate::editor::AssetError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("application exited with status {code}")]
    Exit { code: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn load(path: &str) -> AppResult<()> {
        let loaded: Result<(), AssetError> = Err(AssetError::Missing {
            path: PathBuf::from(path),
        });
        loaded?;
        Ok(())
    }

    #[test]
    fn asset_errors_convert_transparently() {
        let err = load("apps/spock.png").expect_err("missing asset");
        assert!(matches!(err, AppError::Asset(AssetError::Missing { .. })));
        assert_eq!(err.to_string(), "asset not found: apps/spock.png");
    }

    #[test]
    fn exit_status_is_reported() {
        assert_eq!(
            AppError::Exit { code: 2 }.to_string(),
            "application exited with status 2"
        );
    }
}
