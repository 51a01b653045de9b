use anyhow::Result;

/// A configuration section loaded from TOML.
pub(crate) trait ConfigEntity {
    /// Normalizes raw values (trimming, derived defaults).
    fn finalize(&mut self) -> Result<()>;

    /// Rejects values the run cannot use. Called after `finalize`.
    fn validate(&self) -> Result<()>;

    fn apply(&mut self) -> Result<()> {
        self.finalize()?;
        self.validate()
    }
}
