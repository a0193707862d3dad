use crate::core::models::protein::InsertOptions;

/// Controls how a bulk load treats records that cannot be attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPolicy {
    /// Treat a duplicate domain name as an error rather than a silent skip.
    pub safe: bool,
    /// Skip records that violate an annotation invariant instead of aborting.
    /// Also lets tolerant readers skip malformed lines.
    pub skip_bad: bool,
    /// Report skipped records as diagnostics.
    pub verbose: bool,
    /// Resolve duplicate domain names with a numeric suffix.
    pub autoname: bool,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            safe: true,
            skip_bad: true,
            verbose: true,
            autoname: false,
        }
    }
}

impl LoadPolicy {
    pub fn builder() -> LoadPolicyBuilder {
        LoadPolicyBuilder::new()
    }

    pub fn insert_options(&self) -> InsertOptions {
        InsertOptions {
            safe: self.safe,
            autoname: self.autoname,
        }
    }
}

/// Builds a [`LoadPolicy`]; unset fields keep their defaults.
#[derive(Debug, Default)]
pub struct LoadPolicyBuilder {
    safe: Option<bool>,
    skip_bad: Option<bool>,
    verbose: Option<bool>,
    autoname: Option<bool>,
}

impl LoadPolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn safe(mut self, safe: bool) -> Self {
        self.safe = Some(safe);
        self
    }
    pub fn skip_bad(mut self, skip_bad: bool) -> Self {
        self.skip_bad = Some(skip_bad);
        self
    }
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }
    pub fn autoname(mut self, autoname: bool) -> Self {
        self.autoname = Some(autoname);
        self
    }

    pub fn build(self) -> LoadPolicy {
        let defaults = LoadPolicy::default();
        LoadPolicy {
            safe: self.safe.unwrap_or(defaults.safe),
            skip_bad: self.skip_bad.unwrap_or(defaults.skip_bad),
            verbose: self.verbose.unwrap_or(defaults.verbose),
            autoname: self.autoname.unwrap_or(defaults.autoname),
        }
    }
}
