use crate::error::{MatmulError, Result};

/// Default tile side for the blocked strategy. 16×16 `i64` tiles of B are
/// 2 KiB, well inside L1 alongside the rows of A being streamed.
pub const DEFAULT_TILE_SIZE: usize = 16;

/// Tuning knobs shared by the strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Tile side used by the blocked kernel (and by each parallel worker).
    pub tile_size: usize,
    /// Worker count for the parallel strategy. `None` uses the available
    /// hardware parallelism.
    pub workers: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tile_size: DEFAULT_TILE_SIZE,
            workers: None,
        }
    }
}

impl EngineConfig {
    pub fn with_tile_size(mut self, tile_size: usize) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Rejects zero tile sizes and zero worker counts.
    pub fn validate(&self) -> Result<()> {
        validate_tile_size(self.tile_size)?;
        if let Some(workers) = self.workers {
            validate_workers(workers)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_tile_size(tile_size: usize) -> Result<()> {
    if tile_size == 0 {
        return Err(MatmulError::InvalidConfiguration {
            parameter: "tile_size",
            value: tile_size,
        });
    }
    Ok(())
}

pub(crate) fn validate_workers(workers: usize) -> Result<()> {
    if workers == 0 {
        return Err(MatmulError::InvalidConfiguration {
            parameter: "workers",
            value: workers,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.tile_size, DEFAULT_TILE_SIZE);
        assert_eq!(cfg.workers, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_tile_rejected() {
        let err = EngineConfig::default().with_tile_size(0).validate().unwrap_err();
        assert!(matches!(
            err,
            MatmulError::InvalidConfiguration {
                parameter: "tile_size",
                value: 0
            }
        ));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = EngineConfig::default().with_workers(0).validate().unwrap_err();
        assert!(matches!(
            err,
            MatmulError::InvalidConfiguration {
                parameter: "workers",
                value: 0
            }
        ));
    }
}
