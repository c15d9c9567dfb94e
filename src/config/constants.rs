pub mod registry {
    pub const KITS_ROOT_KEY: &str = r"SOFTWARE\Microsoft\Windows Kits\Installed Roots";
    pub const KITS_ROOT_10: &str = "KitsRoot10";
    pub const KITS_ROOT_81: &str = "KitsRoot81";

    pub const VS7_KEY: &str = r"SOFTWARE\Microsoft\VisualStudio\SxS\VS7";

    /// Probed in this order; the first one with a usable library directory wins.
    pub const LEGACY_VS_VERSIONS: [&str; 4] = ["14.0", "12.0", "11.0", "10.0"];
}

pub mod sdk {
    pub const LIB_DIR: &str = "Lib";
    pub const UM_X64_SUFFIX: &str = r"\um\x64";
    pub const UCRT_X64_SUFFIX: &str = r"\ucrt\x64";

    pub const KIT81_PREFIX: &str = "winv";
}

pub mod toolchain {
    pub const TOOLS_VERSION_FILE: &str = r"\VC\Auxiliary\Build\Microsoft.VCToolsVersion.default.txt";
    pub const MSVC_TOOLS_DIR: &str = r"\VC\Tools\MSVC\";
    pub const LIB_X64_SUFFIX: &str = r"\lib\x64";
    pub const BIN_HOST_X64_SUFFIX: &str = r"\bin\Hostx64\x64";

    pub const LEGACY_LIB_SUFFIX: &str = r"VC\Lib\amd64";
    pub const LEGACY_BIN_SUFFIX: &str = r"VC\bin";

    pub const MARKER_FILE: &str = r"\vcruntime.lib";
}

pub const PATH_SEPARATOR: &str = r"\";
pub const HIDDEN_PREFIX: char = '.';
