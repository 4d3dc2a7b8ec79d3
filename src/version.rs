// Version and build information, filled in by build.rs

use std::fmt;

pub struct VersionInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_dirty: bool,
    pub build_date: &'static str,
    pub build_profile: &'static str,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            version: env!("LINEFMT_VERSION"),
            git_hash: env!("LINEFMT_GIT_HASH"),
            git_dirty: env!("LINEFMT_GIT_DIRTY") == "true",
            build_date: env!("LINEFMT_BUILD_DATE"),
            build_profile: env!("LINEFMT_BUILD_PROFILE"),
        }
    }

    /// Get a short version string (just version and git hash)
    pub fn short(&self) -> String {
        if self.git_dirty {
            format!("v{} ({}+dirty)", self.version, self.git_hash)
        } else {
            format!("v{} ({})", self.version, self.git_hash)
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "linefmt {}", self.short())?;
        writeln!(f, "Built: {} ({})", self.build_date, self.build_profile)?;
        Ok(())
    }
}

/// Get the version string for --version-full output
pub fn version_string() -> String {
    VersionInfo::current().to_string()
}

/// Get a short version string for logs
pub fn short_version() -> String {
    VersionInfo::current().short()
}
