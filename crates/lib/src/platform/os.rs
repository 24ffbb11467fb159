/// Host operating systems known to reconf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// The host operating system, if it is one reconf knows
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Windows resolves shared libraries through `PATH`, so launched binaries
  /// need the toolchain runtime directory prepended there.
  pub fn requires_runtime_path(&self) -> bool {
    matches!(self, Self::Windows)
  }

  /// Separator between entries of `PATH`-like variables
  pub fn path_list_separator(&self) -> char {
    match self {
      Self::Windows => ';',
      Self::Linux | Self::MacOs => ':',
    }
  }
}
