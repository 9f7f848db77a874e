use clap::ValueEnum;
use serde::Serialize;

/// Host platforms the packager can produce binaries for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[value(name = "windows")]
    Windows,
    #[value(name = "macos")]
    MacOs,
    #[value(name = "linux")]
    Linux,
}

impl Platform {
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Anything that is not Windows or macOS is built as Linux.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            _ => Self::Linux,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
        }
    }

    /// OS/arch suffix of the `pkg` target, e.g. `win-x64`.
    pub fn pkg_suffix(self) -> &'static str {
        match self {
            Self::Windows => "win-x64",
            Self::MacOs => "macos-x64",
            Self::Linux => "linux-x64",
        }
    }

    /// Full `pkg -t` argument for a node runtime tag such as `node12`.
    pub fn pkg_target(self, node: &str) -> String {
        format!("{node}-{}", self.pkg_suffix())
    }

    /// npm script that assembles the installer or archive.
    pub fn dist_script(self) -> &'static str {
        match self {
            Self::Windows => "dist-win",
            Self::MacOs => "dist-mac",
            Self::Linux => "dist-linux",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
