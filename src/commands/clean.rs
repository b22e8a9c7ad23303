//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Horizon;

/// Remove everything `build` wrote
pub fn run(horizon: &Horizon) -> Result<()> {
    if horizon.public_dir.exists() {
        fs::remove_dir_all(&horizon.public_dir)?;
        tracing::info!("Deleted: {:?}", horizon.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_public_dir() {
        let dir = TempDir::new().unwrap();
        let horizon = Horizon::new(dir.path()).unwrap();
        fs::create_dir_all(horizon.public_dir.join("news")).unwrap();
        run(&horizon).unwrap();
        assert!(!horizon.public_dir.exists());
        // cleaning twice is fine
        run(&horizon).unwrap();
    }
}
